//! Champ téléphone : préfixe `+237 6` fixe et 8 chiffres au plus.

use contracts::domain::a001_student::phone::{normalize_phone_input, PHONE_PREFIX};
use leptos::prelude::*;

const TAIL_DIGITS: usize = 8;

/// Chiffres encore attendus après le préfixe
pub fn missing_digits(contact: &str) -> usize {
    let typed = contact
        .strip_prefix(PHONE_PREFIX)
        .unwrap_or(contact)
        .chars()
        .filter(char::is_ascii_digit)
        .count();
    TAIL_DIGITS.saturating_sub(typed)
}

/// Aide affichée sous le champ
pub fn phone_hint(contact: &str) -> String {
    match missing_digits(contact) {
        0 | TAIL_DIGITS => "Format : +237 6 suivi de 8 chiffres".to_string(),
        1 => "Encore 1 chiffre".to_string(),
        n => format!("Encore {} chiffres", n),
    }
}

#[component]
pub fn PhoneInput(
    #[prop(into)]
    value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional)]
    id: &'static str,
) -> impl IntoView {
    view! {
        <input
            type="tel"
            id=id
            class="form__input"
            placeholder="+237 6XXXXXXXX"
            prop:value=move || value.get()
            on:input=move |ev| on_change.run(normalize_phone_input(&event_target_value(&ev)))
        />
        <small class="form__hint">{move || phone_hint(&value.get())}</small>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_digits() {
        assert_eq!(missing_digits("+237 6"), 8);
        assert_eq!(missing_digits("+237 6123"), 5);
        assert_eq!(missing_digits("+237 612345678"), 0);
    }

    #[test]
    fn test_phone_hint() {
        assert_eq!(phone_hint("+237 6"), "Format : +237 6 suivi de 8 chiffres");
        assert_eq!(phone_hint("+237 61234567"), "Encore 1 chiffre");
        assert_eq!(phone_hint("+237 612"), "Encore 6 chiffres");
    }
}
