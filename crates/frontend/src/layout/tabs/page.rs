use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use leptos::prelude::*;

/// Contenu d'un onglet, rendu une seule fois puis masqué ou affiché
/// selon l'onglet actif
#[component]
pub fn TabPage(tab: TabData, tabs_store: AppGlobalContext) -> impl IntoView {
    let key = tab.key.clone();
    let key_for_active = key.clone();
    let is_active = move || tabs_store.active.get().as_deref() == Some(key_for_active.as_str());

    log::debug!("onglet '{}' monté", key);
    let key_for_cleanup = key.clone();
    on_cleanup(move || log::debug!("onglet '{}' démonté", key_for_cleanup));

    let content = render_tab_content(&key);

    view! {
        <div
            class="tabs__item"
            class:tabs__item--hidden=move || !is_active()
            data-tab-key=key
        >
            {content}
        </div>
    }
}
