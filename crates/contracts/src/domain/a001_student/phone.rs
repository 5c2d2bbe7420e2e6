//! Saisie du numéro de téléphone camerounais : préfixe fixe `+237 6` suivi
//! d'au plus 8 chiffres.

pub const PHONE_PREFIX: &str = "+237 6";
const MAX_TAIL_DIGITS: usize = 8;

/// Normalise la valeur du champ à chaque frappe
pub fn normalize_phone_input(raw: &str) -> String {
    let mut value: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+' || *c == ' ')
        .collect();

    if !value.starts_with(PHONE_PREFIX) {
        value = format!("{}{}", PHONE_PREFIX, strip_country_code(&value));
    }

    let tail: String = value
        .replacen(PHONE_PREFIX, "", 1)
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_TAIL_DIGITS)
        .collect();

    format!("{}{}", PHONE_PREFIX, tail)
}

/// Retire un indicatif partiellement saisi (`+237 6`, `2376`, `+23 `...)
fn strip_country_code(value: &str) -> &str {
    let rest = value.strip_prefix('+').unwrap_or(value);
    let Some(rest) = rest.strip_prefix("23") else {
        return value;
    };
    let rest = rest.strip_prefix('7').unwrap_or(rest);
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    rest.strip_prefix('6').unwrap_or(rest)
}

/// Valeur envoyée au backend : vide si seul le préfixe est présent
pub fn contact_for_submit(contact: &str) -> String {
    let tail_digits = contact
        .replacen(PHONE_PREFIX, "", 1)
        .chars()
        .filter(char::is_ascii_digit)
        .count();
    if tail_digits == 0 {
        String::new()
    } else {
        contact.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_always_kept() {
        assert_eq!(normalize_phone_input(""), "+237 6");
        assert_eq!(normalize_phone_input("+237 "), "+237 6");
        assert_eq!(normalize_phone_input("+237 6"), "+237 6");
    }

    #[test]
    fn test_non_digits_are_dropped() {
        assert_eq!(normalize_phone_input("+237 69a9-12"), "+237 69912");
    }

    #[test]
    fn test_tail_limited_to_eight_digits() {
        assert_eq!(normalize_phone_input("+237 6123456789"), "+237 612345678");
    }

    #[test]
    fn test_pasted_number_with_country_code() {
        assert_eq!(normalize_phone_input("237699112233"), "+237 699112233");
        assert_eq!(normalize_phone_input("699112233"), "+237 669911223");
    }

    #[test]
    fn test_contact_for_submit() {
        assert_eq!(contact_for_submit("+237 6"), "");
        assert_eq!(contact_for_submit("+237 699"), "+237 699");
    }
}
