//! Barre supérieure : nom de l'établissement et bascule du menu latéral.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use contracts::shared::documents::school::{SCHOOL_SHORT_NAME, SCHOOL_SLOGAN};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Masquer le menu" } else { "Afficher le menu" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">{format!("{} · Scolarité", SCHOOL_SHORT_NAME)}</span>
            </div>
            <div class="top-header__actions">
                <span class="top-header__slogan">{SCHOOL_SLOGAN}</span>
            </div>
        </div>
    }
}
