use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre", "octobre",
    "novembre", "décembre",
];

/// "2005-04-21" (ou un horodatage ISO) → "21 avril 2005".
/// Une valeur illisible est rendue telle quelle.
pub fn format_date_fr(iso: &str) -> String {
    let raw = iso.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(d) => long_date(d),
        Err(_) => raw.to_string(),
    }
}

pub fn long_date(d: NaiveDate) -> String {
    format!("{} {} {}", d.day(), MONTHS[d.month0() as usize], d.year())
}

/// Suffixe de date des fichiers exportés : "2025-11-24"
pub fn file_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_fr() {
        assert_eq!(format_date_fr("2005-04-21"), "21 avril 2005");
        assert_eq!(format_date_fr("2001-08-01T00:00:00.000Z"), "1 août 2001");
        assert_eq!(format_date_fr("21/04/2005"), "21/04/2005");
    }

    #[test]
    fn test_file_date() {
        let d = NaiveDate::from_ymd_opt(2025, 11, 4).unwrap();
        assert_eq!(file_date(d), "2025-11-04");
    }
}
