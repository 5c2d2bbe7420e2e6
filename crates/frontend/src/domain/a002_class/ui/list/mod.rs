//! Page Classes : filtres, statistiques, fiches imprimables et export CSV.

use crate::domain::a001_student::api::fetch_students;
use crate::domain::a002_class::api::fetch_classes;
use crate::shared::components::{same_options, PageHeader, SelectField, StatCard};
use crate::shared::date_utils::today;
use crate::shared::export::export_csv;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::print::{alert, alert_on_error, open_print_window};
use contracts::domain::a001_student::Student;
use contracts::domain::a002_class::{
    filter_classes, level_options, roster_rows, ClassFilter, ClassRecord, ClassStats,
};
use contracts::shared::dictionaries::cycles::Cycle;
use contracts::shared::dictionaries::programs::FiliereType;
use contracts::shared::documents::class_roster::{bulk_roster_title, roster_document, roster_title};
use contracts::shared::documents::dates::file_date;
use contracts::shared::export::sanitize_file_name;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn print_classes(classes: &[&ClassRecord], title: &str) {
    if classes.is_empty() {
        alert("Aucune classe à exporter avec ces critères.");
        return;
    }
    alert_on_error(open_print_window(&roster_document(classes, title)));
}

fn export_classes_csv(classes: &[&ClassRecord], file_stem: &str) {
    let rows = roster_rows(classes.iter().copied());
    if rows.is_empty() {
        alert("Aucun étudiant à exporter avec ces critères.");
        return;
    }
    alert_on_error(export_csv(&rows, &format!("{}.csv", file_stem)));
}

fn or_all(value: &str) -> &str {
    if value.is_empty() {
        "tous"
    } else {
        value
    }
}

#[component]
pub fn ClassList() -> impl IntoView {
    let (classes, set_classes) = signal::<Vec<ClassRecord>>(Vec::new());
    let (students, set_students) = signal::<Vec<Student>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let filter = RwSignal::new(ClassFilter::default());

    let fetch = move || {
        spawn_local(async move {
            match fetch_classes("").await {
                Ok(v) => {
                    set_classes.set(v);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("liste des classes : {}", e);
                    set_classes.set(Vec::new());
                    set_error.set(Some(e));
                }
            }
            match fetch_students("").await {
                Ok(v) => set_students.set(v),
                Err(e) => {
                    log::error!("étudiants pour les statistiques : {}", e);
                    set_students.set(Vec::new());
                }
            }
        });
    };

    fetch();

    let stats = Memo::new(move |_| {
        classes.with(|c| students.with(|s| ClassStats::compute(c, s)))
    });
    let filtered_ids = Memo::new(move |_| {
        let f = filter.get();
        classes.with(|all| filter_classes(all, &f).into_iter().map(|c| c.id.clone()).collect::<Vec<_>>())
    });
    let levels = Signal::derive(move || {
        let cycle = filter.with(|f| f.cycle.clone());
        same_options(classes.with(|all| level_options(all, &cycle)))
    });

    let with_filtered = move |action: &dyn Fn(&[&ClassRecord])| {
        let f = filter.get_untracked();
        classes.with_untracked(|all| action(&filter_classes(all, &f)));
    };

    let bulk_stem = move || {
        let f = filter.get_untracked();
        bulk_roster_title(or_all(&f.cycle), or_all(&f.level), &file_date(today()))
    };

    let stat = move |pick: fn(&ClassStats) -> usize| Signal::derive(move || Some(pick(&stats.get()).to_string()));

    view! {
        <PageFrame page_id="a002_class--list" category=PAGE_CAT_LIST>
            <PageHeader
                title="Gestion des classes"
                subtitle="Organisation des classes, délégués et bureau des élèves".to_string()
            >
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| with_filtered(&|list| print_classes(list, &bulk_stem()))
                >
                    {icon("printer")}
                    " Imprimer la sélection"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| with_filtered(&|list| export_classes_csv(list, &bulk_stem()))
                >
                    {icon("download")}
                    " Exporter CSV"
                </Button>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| fetch()>
                    {icon("refresh")}
                </Button>
            </PageHeader>

            <div class="page__content">
                <div class="stats-grid">
                    <StatCard label="Classes actives" icon_name="school" value=stat(|s| s.active_classes) />
                    <StatCard label="Délégués" icon_name="users" value=stat(|s| s.delegates) tone="accent" />
                    <StatCard label="Membres du bureau" icon_name="users" value=stat(|s| s.bureau_members) tone="warning" />
                    <StatCard label="Étudiants actifs" icon_name="users" value=stat(|s| s.active_students) tone="success" />
                </div>

                <div class="filter-bar">
                    <SelectField
                        options={FiliereType::all()
                            .into_iter()
                            .map(|t| (t.code().to_string(), t.filiere_label().to_string()))
                            .collect::<Vec<_>>()}
                        value=Signal::derive(move || filter.with(|f| f.filiere_type.map(|t| t.code().to_string()).unwrap_or_default()))
                        on_change=Callback::new(move |v: String| filter.update(|f| f.filiere_type = FiliereType::from_code(&v)))
                        placeholder="Toutes les filières"
                    />
                    <SelectField
                        options=same_options(Cycle::all().iter().map(|c| c.label()))
                        value=Signal::derive(move || filter.with(|f| f.cycle.clone()))
                        on_change=Callback::new(move |v: String| filter.update(|f| {
                            f.cycle = v;
                            f.level.clear();
                        }))
                        placeholder="Tous les cycles"
                    />
                    <SelectField
                        options=levels
                        value=Signal::derive(move || filter.with(|f| f.level.clone()))
                        on_change=Callback::new(move |v: String| filter.update(|f| f.level = v))
                        placeholder="Tous les niveaux"
                    />
                    <div class="search-box">
                        {icon("search")}
                        <input
                            type="search"
                            placeholder="Classe, étudiant ou matricule"
                            prop:value=move || filter.with(|f| f.search.clone())
                            on:input=move |ev| filter.update(|f| f.search = event_target_value(&ev))
                        />
                    </div>
                </div>

                {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}

                <div class="class-grid">
                    {move || {
                        let ids = filtered_ids.get();
                        if ids.is_empty() {
                            return view! { <div class="empty">"Aucune classe ne correspond aux filtres."</div> }.into_any();
                        }
                        classes.with(|all| {
                            all.iter()
                                .filter(|c| ids.contains(&c.id))
                                .cloned()
                                .map(|class| view! { <ClassCard class=class /> })
                                .collect_view()
                        }).into_any()
                    }}
                </div>
            </div>
        </PageFrame>
    }
}

#[component]
fn ClassCard(class: ClassRecord) -> impl IntoView {
    let class = StoredValue::new(class);
    let (title, abbrev, headcount, reps) = class.with_value(|c| {
        (
            c.label(),
            c.abbrev.clone().unwrap_or_else(|| "—".into()),
            c.headcount(),
            c.representatives()
                .iter()
                .map(|m| (m.full_name.clone(), m.class_role.clone().unwrap_or_default()))
                .collect::<Vec<_>>(),
        )
    });

    let print = move |_| class.with_value(|c| print_classes(&[c], &roster_title(c)));
    let csv = move |_| {
        class.with_value(|c| export_classes_csv(&[c], &sanitize_file_name(&roster_title(c))))
    };

    view! {
        <Card class="class-card">
            <div class="class-card__header">
                <div>
                    <div class="class-card__title">{title}</div>
                    <div class="class-card__meta">{format!("Effectif : {} étudiant(s)", headcount)}</div>
                </div>
                <span class="pill">{abbrev}</span>
            </div>
            <div class="class-card__reps">
                {if reps.is_empty() {
                    view! { <span class="empty">"Aucun représentant renseigné."</span> }.into_any()
                } else {
                    reps.into_iter()
                        .map(|(name, role)| view! { <div class="rep-row"><span>{name}</span><span class="badge">{role}</span></div> })
                        .collect_view()
                        .into_any()
                }}
            </div>
            <div class="class-card__actions">
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle on_click=print>
                    {icon("printer")}
                    " Fiche"
                </Button>
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle on_click=csv>
                    {icon("download")}
                    " CSV"
                </Button>
            </div>
        </Card>
    }
}

