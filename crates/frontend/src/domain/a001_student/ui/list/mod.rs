use crate::domain::a001_student::api;
use crate::domain::a001_student::ui::details::StudentDetails;
use crate::shared::components::PageHeader;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a001_student::{FeeCounts, FeeFilter, Student};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;

/// Fenêtre ouverte au-dessus de la liste
#[derive(Clone)]
enum ListModal {
    View(Student),
    Edit(Student),
    Create,
}

#[component]
pub fn StudentList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<Student>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let search = RwSignal::new(String::new());
    let fee_filter = RwSignal::new(FeeFilter::All);
    let modal = RwSignal::new(None::<ListModal>);

    let fetch = move || {
        let query = search.get_untracked();
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_students(&query).await {
                Ok(v) => {
                    set_items.set(v);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("liste des étudiants : {}", e);
                    set_items.set(Vec::new());
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    fetch();

    let counts = Memo::new(move |_| items.with(|list| FeeCounts::compute(list)));
    let visible = Memo::new(move |_| {
        let filter = fee_filter.get();
        items.with(|list| list.iter().filter(|s| filter.accepts(s)).cloned().collect::<Vec<_>>())
    });

    let close_modal = Callback::new(move |_| modal.set(None));

    let filter_chip = move |filter: FeeFilter, label: &'static str| {
        let count = move || {
            let c = counts.get();
            match filter {
                FeeFilter::All => c.all,
                FeeFilter::Paid => c.paid,
                FeeFilter::Unpaid => c.unpaid,
            }
        };
        view! {
            <button
                class="filter-chip"
                class:filter-chip--active=move || fee_filter.get() == filter
                on:click=move |_| fee_filter.set(filter)
            >
                {label} " (" {count} ")"
            </button>
        }
    };

    view! {
        <PageFrame page_id="a001_student--list" category=PAGE_CAT_LIST>
            <PageHeader title=Student::list_name() subtitle="Inscriptions et fiches étudiants".to_string()>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| modal.set(Some(ListModal::Create))>
                    {icon("plus")}
                    " Inscrire un étudiant"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch() disabled=loading>
                    {icon("refresh")}
                    " Actualiser"
                </Button>
            </PageHeader>

            <div class="page__content">
                <div class="filter-bar">
                    <div class="search-box">
                        {icon("search")}
                        <input
                            type="search"
                            placeholder="Nom, prénom ou matricule"
                            prop:value=move || search.get()
                            on:input=move |ev| search.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    fetch();
                                }
                            }
                        />
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| fetch()>"Rechercher"</Button>
                    </div>
                    <div class="filter-chips">
                        {filter_chip(FeeFilter::All, "Tous")}
                        {filter_chip(FeeFilter::Paid, "Inscrits")}
                        {filter_chip(FeeFilter::Unpaid, "Non inscrits")}
                    </div>
                </div>

                {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}

                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=110.0>"Matricule"</TableHeaderCell>
                            <TableHeaderCell resizable=true min_width=200.0>"Nom et prénoms"</TableHeaderCell>
                            <TableHeaderCell resizable=true min_width=160.0>"Filière"</TableHeaderCell>
                            <TableHeaderCell resizable=true min_width=160.0>"Spécialité"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Cycle"</TableHeaderCell>
                            <TableHeaderCell min_width=70.0>"Année"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Frais"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Actions"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let rows = visible.get();
                            if rows.is_empty() && !loading.get() {
                                return view! {
                                    <TableRow>
                                        <TableCell><span class="empty">"Aucun étudiant trouvé."</span></TableCell>
                                    </TableRow>
                                }.into_any();
                            }
                            rows.into_iter().map(|student| {
                                let for_view = student.clone();
                                let for_edit = student.clone();
                                let matricule = student.matricule.clone().unwrap_or_else(|| "—".into());
                                let full_name = student.full_name();
                                let filiere = student.filiere.clone().unwrap_or_default();
                                let specialite = student.specialite_display();
                                let cycle = student.cycle.clone().unwrap_or_default();
                                let study_year = student.study_year.map(|y| y.to_string()).unwrap_or_default();
                                let fee_paid = student.registration_fee_paid;
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{matricule}</TableCellLayout></TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <a
                                                    href="#"
                                                    on:click=move |e| {
                                                        e.prevent_default();
                                                        modal.set(Some(ListModal::View(for_view.clone())));
                                                    }
                                                >
                                                    {full_name}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell><TableCellLayout>{filiere}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{specialite}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{cycle}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{study_year}</TableCellLayout></TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {if fee_paid {
                                                    view! { <span class="badge badge--success">"Payé"</span> }
                                                } else {
                                                    view! { <span class="badge badge--warning">"Non payé"</span> }
                                                }}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| modal.set(Some(ListModal::Edit(for_edit.clone())))
                                                >
                                                    {icon("edit")}
                                                </Button>
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view().into_any()
                        }}
                    </TableBody>
                </Table>
            </div>

            {move || modal.get().map(|m| match m {
                ListModal::View(student) => view! {
                    <Modal title=student.full_name() on_close=close_modal>
                        <StudentSummary student=student />
                    </Modal>
                }.into_any(),
                ListModal::Edit(student) => {
                    let title = format!("Modifier : {}", student.full_name());
                    view! {
                        <Modal title=title on_close=close_modal max_width="960px">
                            <StudentDetails
                                student=Some(student)
                                on_saved=Rc::new(move |_: ()| { modal.set(None); fetch(); })
                                on_cancel=Rc::new(move |_: ()| modal.set(None))
                            />
                        </Modal>
                    }.into_any()
                }
                ListModal::Create => view! {
                    <Modal title="Nouvelle inscription" on_close=close_modal max_width="960px">
                        <StudentDetails
                            student=None
                            on_saved=Rc::new(move |_: ()| { modal.set(None); fetch(); })
                            on_cancel=Rc::new(move |_: ()| modal.set(None))
                        />
                    </Modal>
                }.into_any(),
            })}
        </PageFrame>
    }
}

/// Fiche en lecture seule
#[component]
fn StudentSummary(student: Student) -> impl IntoView {
    let or_dash = |v: Option<String>| v.filter(|s| !s.trim().is_empty()).unwrap_or_else(|| "—".to_string());
    let d = &student.enrollment;
    let rows: Vec<(&'static str, String)> = vec![
        ("Matricule", or_dash(student.matricule.clone())),
        ("Date de naissance", or_dash(student.birth_date.as_deref().map(format_date))),
        ("Lieu de naissance", or_dash(student.birth_place.clone())),
        ("Année académique", or_dash(student.academic_year.clone())),
        ("Filière", or_dash(student.filiere.clone())),
        ("Spécialité", or_dash(Some(student.specialite_display()))),
        ("Cycle", or_dash(student.cycle.clone())),
        ("Année d’étude", or_dash(student.study_year.map(|y| y.to_string()))),
        ("Téléphone", or_dash(student.contact.clone())),
        ("E-mail", or_dash(student.email.clone())),
        ("Responsabilité de classe", or_dash(student.class_role.clone())),
        ("Responsabilité établissement", or_dash(student.school_role.clone())),
        (
            "Frais d’inscription",
            if student.registration_fee_paid { "Payé" } else { "Non payé" }.to_string(),
        ),
        ("Langue vivante", or_dash(d.living_language.clone())),
        ("Région d’origine", or_dash(d.region_origine.clone())),
        ("Département d’origine", or_dash(d.departement_origine.clone())),
        ("Quartier", or_dash(d.quartier_habitation.clone())),
        ("Urgence", or_dash(d.emergency_name.clone())),
        ("Téléphone d’urgence", or_dash(d.emergency_phone.clone())),
        ("Dernier établissement", or_dash(d.last_school.clone())),
        ("Diplôme présenté", or_dash(d.diploma_presented.clone())),
    ];
    let photo = student.photo_url.clone().filter(|u| !u.is_empty());

    view! {
        <div class="student-summary">
            {photo.map(|url| view! { <img class="photo-preview" src=url alt="Photo" /> })}
            <dl class="summary-grid">
                {rows.into_iter().map(|(label, value)| view! {
                    <dt>{label}</dt>
                    <dd>{value}</dd>
                }).collect_view()}
            </dl>
        </div>
    }
}
