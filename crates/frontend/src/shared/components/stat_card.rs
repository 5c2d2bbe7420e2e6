use crate::shared::icons::icon;
use leptos::prelude::*;

/// Tuile de compteur ; `None` affiche un tiret pendant le chargement
#[component]
pub fn StatCard(
    #[prop(into)]
    label: String,
    icon_name: &'static str,
    #[prop(into)]
    value: Signal<Option<String>>,
    /// Variante de couleur : "", "success", "warning", "accent"
    #[prop(optional)]
    tone: &'static str,
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,
) -> impl IntoView {
    let class = if tone.is_empty() {
        "stat-card".to_string()
    } else {
        format!("stat-card stat-card--{}", tone)
    };

    view! {
        <div class=class>
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{move || value.get().unwrap_or_else(|| "—".to_string())}</div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}
