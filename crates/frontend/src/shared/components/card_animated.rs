//! Carte thaw avec animation d'apparition (`@keyframes card-appear`).

use leptos::prelude::*;
use thaw::Card;

/// `delay_ms` décale l'animation pour un effet en cascade
#[component]
pub fn CardAnimated(
    #[prop(optional)]
    delay_ms: u32,
    #[prop(optional, into)]
    style: String,
    children: Children,
) -> impl IntoView {
    let full_style = format!(
        "animation: card-appear 0.3s ease both; animation-delay: {}ms; {}",
        delay_ms, style
    );
    view! {
        <Card attr:style=full_style>
            {children()}
        </Card>
    }
}
