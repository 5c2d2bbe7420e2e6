//! Page Notes : aperçu des fiches par classe, impression, saisie et
//! fiches de report vierges.

use super::blank_sheet::BlankSheet;
use super::entry::GradeEntry;
use crate::domain::a001_student::api::fetch_students;
use crate::domain::a004_grade::api;
use crate::shared::components::{same_options, PageHeader, SelectField};
use crate::shared::date_utils::{current_year, today};
use crate::shared::export::{download_text, MIME_HTML};
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::print::{alert, alert_on_error, open_print_window};
use contracts::domain::a001_student::Student;
use contracts::domain::a004_grade::preview::{filiere_options, specialite_options};
use contracts::domain::a004_grade::{build_groups, NotesFilter, NotesGroup};
use contracts::shared::dictionaries::cycles::academic_years;
use contracts::shared::documents::dates::file_date;
use contracts::shared::documents::grade_sheet::{grade_sheet_document, notes_download_file_name};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const STUDY_YEARS: [u8; 5] = [1, 2, 3, 4, 5];

fn print_groups(groups: &[NotesGroup]) {
    if groups.is_empty() {
        alert("Aucune fiche à imprimer.");
        return;
    }
    alert_on_error(open_print_window(&grade_sheet_document(groups)));
}

fn download_groups(groups: &[NotesGroup], academic_year: &str) {
    if groups.is_empty() {
        alert("Aucune fiche à télécharger.");
        return;
    }
    let doc = grade_sheet_document(groups);
    let name = notes_download_file_name(academic_year, &file_date(today()));
    alert_on_error(download_text(&doc.to_download_html(), MIME_HTML, &name));
}

#[derive(Clone)]
enum NotesModal {
    Entry(NotesGroup),
    BlankSheet,
}

#[component]
pub fn NotesPage() -> impl IntoView {
    let filter = RwSignal::new(NotesFilter::default());
    let (students, set_students) = signal::<Vec<Student>>(Vec::new());
    let (groups, set_groups) = signal::<Vec<NotesGroup>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let modal = RwSignal::new(None::<NotesModal>);

    // Listes de filières et spécialités tirées des étudiants inscrits
    spawn_local(async move {
        match fetch_students("").await {
            Ok(v) => set_students.set(v),
            Err(e) => log::warn!("options du filtre Notes : {}", e),
        }
    });

    let load = move || {
        let current = filter.get_untracked();
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_preview(&current).await {
                Ok(preview) => {
                    set_groups.set(preview.groups);
                    set_error.set(None);
                }
                Err(e) => {
                    // repli : fiches construites à partir des étudiants déjà chargés
                    log::error!("aperçu des notes : {}", e);
                    let local = students.with_untracked(|all| build_groups(all, &current));
                    let mut message = format!("{} Fiches construites localement.", e);
                    if let Some(lost) = local.ungroupable_message() {
                        message = format!("{} {}", message, lost);
                    }
                    set_groups.set(local.preview.groups);
                    set_error.set(Some(message));
                }
            }
            set_loading.set(false);
        });
    };

    load();

    let year_options = Signal::derive(|| same_options(academic_years(current_year())));
    let filiere_opts = Signal::derive(move || students.with(|s| same_options(filiere_options(s))));
    let specialite_opts = Signal::derive(move || {
        let filiere = filter.with(|f| f.filiere.clone());
        students.with(|s| same_options(specialite_options(s, &filiere)))
    });
    let year_level_options = Signal::derive(|| {
        STUDY_YEARS
            .iter()
            .map(|y| (y.to_string(), format!("Niveau {}", y)))
            .collect::<Vec<_>>()
    });

    let total = move || groups.with(|g| g.iter().map(|x| x.students.len()).sum::<usize>());
    let close = Callback::new(move |_| modal.set(None));

    view! {
        <PageFrame page_id="a004_grade--list" category=PAGE_CAT_LIST>
            <PageHeader title="Notes" subtitle="Fiches de notes par classe".to_string()>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| groups.with_untracked(|g| print_groups(g))>
                    {icon("printer")}
                    " Tout imprimer"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| {
                        let year = filter.with_untracked(|f| f.academic_year.clone());
                        groups.with_untracked(|g| download_groups(g, &year));
                    }
                >
                    {icon("download")}
                    " Télécharger"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| modal.set(Some(NotesModal::BlankSheet))>
                    {icon("file-text")}
                    " Fiche de report vierge"
                </Button>
            </PageHeader>

            <div class="page__content">
                <div class="filters">
                    <SelectField
                        id="notes-year"
                        options=year_options
                        value=Signal::derive(move || filter.with(|f| f.academic_year.clone()))
                        on_change=Callback::new(move |v: String| filter.update(|f| f.academic_year = v))
                        placeholder="Toutes les années"
                    />
                    <SelectField
                        id="notes-filiere"
                        options=filiere_opts
                        value=Signal::derive(move || filter.with(|f| f.filiere.clone()))
                        on_change=Callback::new(move |v: String| filter.update(|f| {
                            f.filiere = v;
                            f.specialite.clear();
                        }))
                        placeholder="Toutes les filières"
                    />
                    <SelectField
                        id="notes-specialite"
                        options=specialite_opts
                        value=Signal::derive(move || filter.with(|f| f.specialite.clone()))
                        on_change=Callback::new(move |v: String| filter.update(|f| f.specialite = v))
                        placeholder="Toutes les spécialités"
                    />
                    <SelectField
                        id="notes-level"
                        options=year_level_options
                        value=Signal::derive(move || {
                            filter.with(|f| f.study_year.map(|y| y.to_string()).unwrap_or_default())
                        })
                        on_change=Callback::new(move |v: String| filter.update(|f| f.study_year = v.parse().ok()))
                        placeholder="Tous les niveaux"
                    />
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| load() disabled=loading>
                        {icon("search")}
                        " Afficher"
                    </Button>
                </div>

                {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}

                <div class="notes__summary">
                    {move || format!("{} fiche(s) · {} étudiant(s)", groups.with(|g| g.len()), total())}
                </div>

                <div class="notes__groups">
                    {move || {
                        let list = groups.get();
                        if list.is_empty() {
                            return view! { <div class="empty">"Aucune classe pour ces critères."</div> }.into_any();
                        }
                        list.into_iter().map(|group| {
                            let for_print = group.clone();
                            let for_entry = group.clone();
                            view! {
                                <Card class="notes-group">
                                    <div class="notes-group__title">{group.specialite_display()}</div>
                                    <div class="notes-group__meta">
                                        {group.level_label()} " · "
                                        {group.academic_year.clone().unwrap_or_else(|| "—".to_string())} " · "
                                        {format!("{} étudiant(s)", group.students.len())}
                                    </div>
                                    <div class="notes-group__actions">
                                        <Button size=ButtonSize::Small on_click=move |_| print_groups(std::slice::from_ref(&for_print))>
                                            {icon("printer")}
                                            " Imprimer"
                                        </Button>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Primary
                                            on_click=move |_| modal.set(Some(NotesModal::Entry(for_entry.clone())))
                                        >
                                            {icon("edit")}
                                            " Saisir les notes"
                                        </Button>
                                    </div>
                                </Card>
                            }
                        }).collect_view().into_any()
                    }}
                </div>
            </div>

            {move || modal.get().map(|m| match m {
                NotesModal::Entry(group) => view! {
                    <Modal title="Saisie des notes" on_close=close max_width="960px">
                        <GradeEntry group=group on_close=close />
                    </Modal>
                }.into_any(),
                NotesModal::BlankSheet => view! {
                    <Modal title="Fiche de report de notes" on_close=close max_width="820px">
                        <BlankSheet on_close=close />
                    </Modal>
                }.into_any(),
            })}
        </PageFrame>
    }
}
