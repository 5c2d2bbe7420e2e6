use crate::domain::a003_subject::api;
use crate::domain::a003_subject::ui::details::SubjectDetails;
use crate::shared::components::PageHeader;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::print::{alert, confirm};
use contracts::domain::a003_subject::{group_by_room, Subject};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => v.to_string(),
        None => "—".to_string(),
    }
}

#[component]
pub fn SubjectList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<Subject>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    // Some(None) : création, Some(Some(s)) : modification
    let editing = RwSignal::new(None::<Option<Subject>>);

    let fetch = move || {
        spawn_local(async move {
            match api::fetch_subjects(None).await {
                Ok(v) => {
                    set_items.set(v);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("liste des matières : {}", e);
                    set_items.set(Vec::new());
                    set_error.set(Some(e));
                }
            }
        });
    };

    let handle_delete = move |subject: Subject| {
        if !confirm(&format!("Supprimer la matière « {} » ?", subject.display_label())) {
            return;
        }
        spawn_local(async move {
            match api::delete_subject(&subject.id).await {
                Ok(()) => fetch(),
                Err(e) => {
                    log::error!("suppression matière : {}", e);
                    alert(&e);
                }
            }
        });
    };

    fetch();

    let close = Callback::new(move |_| editing.set(None));

    view! {
        <PageFrame page_id="a003_subject--list" category=PAGE_CAT_LIST>
            <PageHeader title=Subject::list_name() subtitle="UE et EC par filière, spécialité et niveau".to_string()>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| editing.set(Some(None))>
                    {icon("plus")}
                    " Nouvelle matière"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    " Actualiser"
                </Button>
            </PageHeader>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}

                {move || items.with(|all| {
                    let rooms = group_by_room(all);
                    if rooms.is_empty() {
                        return view! { <div class="empty">"Aucune matière enregistrée."</div> }.into_any();
                    }
                    rooms.into_iter().map(|room| {
                        let subjects: Vec<Subject> = room.visible_subjects().into_iter().cloned().collect();
                        let room_title = room.title();
                        let room_meta = room.meta();
                        view! {
                            <Card class="subject-room">
                                <div class="subject-room__header">
                                    <div class="subject-room__title">{room_title}</div>
                                    <div class="subject-room__meta">{room_meta}</div>
                                </div>
                                <table class="subject-table">
                                    <thead>
                                        <tr>
                                            <th>"UE"</th>
                                            <th>"EC"</th>
                                            <th>"Crédits"</th>
                                            <th>"Coef."</th>
                                            <th></th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {subjects.into_iter().map(|subject| {
                                            let for_edit = subject.clone();
                                            let for_delete = subject.clone();
                                            view! {
                                                <tr>
                                                    <td>{subject.display_label()}</td>
                                                    <td>{subject.ec_title.clone().unwrap_or_default()}</td>
                                                    <td>{format_optional(subject.credits)}</td>
                                                    <td>{format_optional(subject.coefficient)}</td>
                                                    <td>{subject.is_optional.then(|| view! { <span class="badge">"Optionnelle"</span> })}</td>
                                                    <td class="actions">
                                                        <button class="btn btn-link" title="Modifier" on:click=move |_| editing.set(Some(Some(for_edit.clone())))>
                                                            {icon("edit")}
                                                        </button>
                                                        <button class="btn btn-link" title="Supprimer" on:click=move |_| handle_delete(for_delete.clone())>
                                                            {icon("trash")}
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }).collect_view()}
                                    </tbody>
                                </table>
                            </Card>
                        }
                    }).collect_view().into_any()
                })}
            </div>

            {move || editing.get().map(|subject| {
                let title = if subject.is_some() { "Modifier la matière" } else { "Nouvelle matière" };
                view! {
                    <Modal title=title on_close=close max_width="820px">
                        <SubjectDetails
                            subject=subject
                            on_saved=Rc::new(move |_: ()| { editing.set(None); fetch(); })
                            on_cancel=Rc::new(move |_: ()| editing.set(None))
                        />
                    </Modal>
                }
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(4.0)), "4");
        assert_eq!(format_optional(Some(1.5)), "1.5");
        assert_eq!(format_optional(None), "—");
    }
}
