//! Page Présences : filtre de classe, aperçu de la liste, impression et PDF.

use crate::domain::a001_student::api::fetch_students;
use crate::shared::components::{same_options, PageHeader, SelectField};
use crate::shared::date_utils::{current_year, today};
use crate::shared::export::{download_bytes, MIME_PDF};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::shared::print::{alert, alert_on_error, open_print_window};
use contracts::domain::a001_student::Student;
use contracts::shared::dictionaries::cycles::{academic_years, allowed_years, Cycle};
use contracts::shared::dictionaries::programs::{filiere_labels, is_industrial, options_for, specialites_for};
use contracts::shared::documents::attendance_sheet::{attendance_document, AttendanceFilter, AttendanceMeta};
use contracts::shared::documents::dates::file_date;
use contracts::shared::documents::pdf::attendance_pdf;
use contracts::shared::error::ScolariteError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const NO_STUDENT: &str = "Aucun étudiant pour ces critères.";

#[component]
pub fn AttendancePage() -> impl IntoView {
    let (students, set_students) = signal::<Vec<Student>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let filter = RwSignal::new(AttendanceFilter::default());
    let period = RwSignal::new(String::new());
    let show_preview = RwSignal::new(false);

    spawn_local(async move {
        match fetch_students("").await {
            Ok(v) => set_students.set(v),
            Err(e) => {
                log::error!("présences : {}", e);
                set_error.set(Some(e));
            }
        }
    });

    let edit = move |f: fn(AttendanceFilter, String) -> AttendanceFilter| {
        Callback::new(move |v: String| filter.update(|current| *current = f(std::mem::take(current), v)))
    };

    // Étudiants retenus, clonés pour rester hors de l'emprunt du signal
    let filtered = Memo::new(move |_| {
        let f = filter.get();
        students.with(|all| f.apply(all).into_iter().cloned().collect::<Vec<Student>>())
    });

    let meta = move || AttendanceMeta::from_filter(&filter.get_untracked(), &period.get_untracked());

    let print = move |_| {
        filtered.with_untracked(|list| {
            if list.is_empty() {
                alert(NO_STUDENT);
                return;
            }
            let refs: Vec<&Student> = list.iter().collect();
            alert_on_error(open_print_window(&attendance_document(&meta(), &refs)));
        })
    };

    let download_pdf = move |_| {
        filtered.with_untracked(|list| {
            let refs: Vec<&Student> = list.iter().collect();
            let meta = meta();
            match attendance_pdf(&meta, &refs) {
                Ok(bytes) => alert_on_error(download_bytes(&bytes, MIME_PDF, &meta.pdf_file_name(&file_date(today())))),
                Err(ScolariteError::NoStudents) => alert(NO_STUDENT),
                Err(e) => {
                    log::error!("PDF présences : {}", e);
                    alert(&e.to_string());
                }
            }
        })
    };

    let preview_html = move || {
        let f = filter.get();
        let p = period.get();
        filtered.with(|list| {
            let refs: Vec<&Student> = list.iter().collect();
            attendance_document(&AttendanceMeta::from_filter(&f, &p), &refs).to_preview_html()
        })
    };

    let filiere_value = Signal::derive(move || filter.with(|f| f.filiere.clone()));
    let specialite_options = Signal::derive(move || {
        filter.with(|f| same_options(specialites_for(&f.filiere).iter().map(|e| e.label)))
    });
    let option_options = Signal::derive(move || {
        filter.with(|f| same_options(options_for(&f.filiere, &f.specialite).iter().map(|e| e.label)))
    });
    let year_options = Signal::derive(move || {
        filter.with(|f| {
            let years: &[u8] = if f.cycle.is_empty() { &[1, 2, 3, 4, 5] } else { allowed_years(&f.cycle) };
            years.iter().map(|y| (y.to_string(), format!("Niveau {}", y))).collect::<Vec<_>>()
        })
    });

    view! {
        <PageFrame page_id="u502_attendance--usecase" category=PAGE_CAT_USECASE>
            <PageHeader title="Listes de présence" subtitle="Feuilles hebdomadaires par classe".to_string()>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| show_preview.update(|v| *v = !*v)>
                    {icon("eye")}
                    {move || if show_preview.get() { " Masquer l'aperçu" } else { " Aperçu" }}
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=print>
                    {icon("printer")}
                    " Imprimer"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=download_pdf>
                    {icon("download")}
                    " PDF"
                </Button>
            </PageHeader>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}

                <div class="filters">
                    <SelectField
                        id="att-year"
                        options=Signal::derive(|| same_options(academic_years(current_year())))
                        value=Signal::derive(move || filter.with(|f| f.academic_year.clone()))
                        on_change=edit(|mut f, v| { f.academic_year = v; f })
                        placeholder="Toutes les années"
                    />
                    <SelectField
                        id="att-filiere"
                        options=Signal::derive(|| same_options(filiere_labels()))
                        value=filiere_value
                        on_change=edit(|f, v| f.on_filiere_change(&v))
                        placeholder="Toutes les filières"
                    />
                    <SelectField
                        id="att-specialite"
                        options=specialite_options
                        value=Signal::derive(move || filter.with(|f| f.specialite.clone()))
                        on_change=edit(|f, v| f.on_specialite_change(&v))
                        placeholder="Toutes les spécialités"
                        disabled=Signal::derive(move || filiere_value.get().is_empty())
                    />
                    <Show when=move || is_industrial(&filiere_value.get())>
                        <SelectField
                            id="att-option"
                            options=option_options
                            value=Signal::derive(move || filter.with(|f| f.option.clone()))
                            on_change=edit(|mut f, v| { f.option = v; f })
                            placeholder="Toutes les options"
                        />
                    </Show>
                    <SelectField
                        id="att-cycle"
                        options=Signal::derive(|| same_options(Cycle::all().iter().map(Cycle::label)))
                        value=Signal::derive(move || filter.with(|f| f.cycle.clone()))
                        on_change=edit(|mut f, v| {
                            f.cycle = v;
                            if f.study_year.map(|y| !f.cycle.is_empty() && !allowed_years(&f.cycle).contains(&y)).unwrap_or(false) {
                                f.study_year = None;
                            }
                            f
                        })
                        placeholder="Tous les cycles"
                    />
                    <SelectField
                        id="att-level"
                        options=year_options
                        value=Signal::derive(move || filter.with(|f| f.study_year.map(|y| y.to_string()).unwrap_or_default()))
                        on_change=edit(|mut f, v| { f.study_year = v.parse().ok(); f })
                        placeholder="Tous les niveaux"
                    />
                    <input
                        class="form__input"
                        type="text"
                        placeholder="Nom ou matricule"
                        prop:value=move || filter.with(|f| f.search.clone())
                        on:input=move |ev| {
                            let v = event_target_value(&ev);
                            filter.update(|f| f.search = v);
                        }
                    />
                    <input
                        class="form__input"
                        type="text"
                        placeholder="Période, ex. 24 au 28 Nov 2025"
                        prop:value=move || period.get()
                        on:input=move |ev| period.set(event_target_value(&ev))
                    />
                </div>

                <div class="attendance__summary">
                    <span class="attendance__class">
                        {move || filter.with(|f| f.class_label())}
                    </span>
                    " · "
                    {move || format!("{} étudiant(s)", filtered.with(Vec::len))}
                </div>

                <Show
                    when=move || show_preview.get()
                    fallback=move || view! {
                        <table class="attendance__table">
                            <thead>
                                <tr><th>"N°"</th><th>"Noms et prénoms"</th><th>"Matricule"</th></tr>
                            </thead>
                            <tbody>
                                {move || filtered.get().into_iter().enumerate().map(|(i, s)| view! {
                                    <tr>
                                        <td>{i + 1}</td>
                                        <td>{s.full_name()}</td>
                                        <td>{s.matricule.clone().unwrap_or_default()}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }
                >
                    <div class="doc-preview" inner_html=preview_html></div>
                </Show>
            </div>
        </PageFrame>
    }
}
