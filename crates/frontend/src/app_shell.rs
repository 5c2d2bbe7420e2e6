//! Coquille de l'application : menu latéral et onglets.
//!
//! L'onglet actif est synchronisé avec l'URL (`?active=...`).

use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::left::sidebar::Sidebar;
use crate::layout::tabs::tab_labels::TAB_OVERVIEW;
use crate::layout::tabs::{tab_label_for_key, TabPage};
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    tabs_store.init_router_integration(TAB_OVERVIEW, tab_label_for_key(TAB_OVERVIEW));

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: TabData| view! {
                            <TabPage tab=tab tabs_store=tabs_store />
                        }
                    />
                }.into_any()
            }
        />
    }
}

/// Pas d'authentification : la coquille est affichée directement
#[component]
pub fn AppShell() -> impl IntoView {
    view! { <MainLayout /> }
}
