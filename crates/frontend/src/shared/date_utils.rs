//! Dates côté navigateur.
//!
//! `chrono::Local` n'est pas disponible en wasm sans `wasmbind` : la date du
//! jour vient de `js_sys::Date`, la mise en forme reste pure et testable.

use chrono::NaiveDate;

/// Date du jour selon l'horloge du navigateur
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    from_parts(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

pub fn current_year() -> i32 {
    js_sys::Date::new_0().get_full_year() as i32
}

fn from_parts(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// "2024-03-15" ou "2024-03-15T14:02:26Z" → "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(d) => d.format("%d/%m/%Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
        assert_eq!(format_date("invalide"), "invalide");
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(from_parts(2025, 11, 24).map(|d| d.to_string()), Some("2025-11-24".to_string()));
        assert!(from_parts(2025, 2, 30).is_none());
    }
}
