//! Menu latéral : groupes repliables, un élément ouvre (ou active) un onglet.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::*;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (id, label, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: TAB_OVERVIEW,
            label: tab_label_for_key(TAB_OVERVIEW),
            icon: "dashboard",
            items: vec![],
        },
        MenuGroup {
            id: "scolarite",
            label: "Scolarité",
            icon: "school",
            items: vec![
                (TAB_STUDENTS, tab_label_for_key(TAB_STUDENTS), "users"),
                (TAB_CLASSES, tab_label_for_key(TAB_CLASSES), "school"),
                (TAB_SUBJECTS, tab_label_for_key(TAB_SUBJECTS), "book"),
                (TAB_GRADES, tab_label_for_key(TAB_GRADES), "clipboard"),
            ],
        },
        MenuGroup {
            id: "documents",
            label: "Documents",
            icon: "file-text",
            items: vec![
                (TAB_DOCUMENTS, tab_label_for_key(TAB_DOCUMENTS), "printer"),
                (TAB_ATTENDANCE, tab_label_for_key(TAB_ATTENDANCE), "calendar-check"),
            ],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let expanded_groups = RwSignal::new(vec!["scolarite".to_string(), "documents".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                let has_children = !group.items.is_empty();
                let group_id = group.id.to_string();
                let gid_active = group_id.clone();
                let gid_click = group_id.clone();
                let gid_chevron = group_id.clone();

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || {
                                !has_children && ctx.active.get().as_deref() == Some(gid_active.as_str())
                            }
                            style:padding-left="12px"
                            on:click=move |_| {
                                if has_children {
                                    let gid = gid_click.clone();
                                    expanded_groups.update(move |items| {
                                        if let Some(pos) = items.iter().position(|x| x == &gid) {
                                            items.remove(pos);
                                        } else {
                                            items.push(gid);
                                        }
                                    });
                                } else {
                                    ctx.open_tab(group.id, group.label);
                                }
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            {has_children.then(|| view! {
                                <div
                                    class="app-sidebar__chevron"
                                    class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&gid_chevron)
                                >
                                    {icon("chevron-right")}
                                </div>
                            })}
                        </div>

                        {has_children.then(|| {
                            let items = group.items.clone();
                            view! {
                                <Show when=move || expanded_groups.get().contains(&group_id)>
                                    <div class="app-sidebar__children">
                                        {items.clone().into_iter().map(|(id, label, icon_name)| view! {
                                            <div
                                                class="app-sidebar__item"
                                                class:app-sidebar__item--active=move || ctx.active.get().as_deref() == Some(id)
                                                style:padding-left="10px"
                                                on:click=move |_| ctx.open_tab(id, label)
                                            >
                                                <div class="app-sidebar__item-content">
                                                    {icon(icon_name)}
                                                    <span>{label}</span>
                                                </div>
                                            </div>
                                        }).collect_view()}
                                    </div>
                                </Show>
                            }
                        })}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
