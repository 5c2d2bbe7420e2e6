//! Cycles de formation, années d'étude autorisées, années académiques et
//! diplômes d'admission.

use crate::shared::text::normalize;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ACADEMIC_YEAR: &str = "2025-2026";
const FIRST_ACADEMIC_YEAR: i32 = 2025;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cycle {
    #[serde(rename = "BTS")]
    Bts,
    #[serde(rename = "LICENCE")]
    Licence,
    #[serde(rename = "MASTER")]
    Master,
    #[serde(rename = "INGÉNIEUR")]
    Ingenieur,
}

impl Cycle {
    pub fn label(&self) -> &'static str {
        match self {
            Cycle::Bts => "BTS",
            Cycle::Licence => "LICENCE",
            Cycle::Master => "MASTER",
            Cycle::Ingenieur => "INGÉNIEUR",
        }
    }

    pub fn all() -> Vec<Cycle> {
        vec![Cycle::Bts, Cycle::Licence, Cycle::Master, Cycle::Ingenieur]
    }

    /// Insensible à la casse et aux accents ("Ingenieur" → INGÉNIEUR)
    pub fn parse(value: &str) -> Option<Self> {
        match normalize(value).as_str() {
            "bts" => Some(Cycle::Bts),
            "licence" => Some(Cycle::Licence),
            "master" => Some(Cycle::Master),
            "ingenieur" => Some(Cycle::Ingenieur),
            _ => None,
        }
    }

    pub fn allowed_years(&self) -> &'static [u8] {
        match self {
            Cycle::Bts => &[1, 2],
            Cycle::Licence => &[3],
            Cycle::Master => &[4, 5],
            Cycle::Ingenieur => &[1, 2, 3, 4, 5],
        }
    }

    /// Nombre de jours de cours par semaine sur la liste de présence
    pub fn attendance_days(&self) -> usize {
        match self {
            Cycle::Licence | Cycle::Master => 6,
            Cycle::Bts | Cycle::Ingenieur => 5,
        }
    }

    pub fn diploma_options(&self) -> &'static [&'static str] {
        match self {
            Cycle::Bts => &[
                "BEPC",
                "Probatoire",
                "Baccalauréat",
                "GCE O-Level",
                "GCE A-Level",
                "BT",
                "CAP",
            ],
            Cycle::Licence => &["Baccalauréat / GCE A-Level", "BTS", "HND", "DUT"],
            Cycle::Master => &["Licence", "Bachelor", "Maîtrise"],
            Cycle::Ingenieur => &["Baccalauréat / GCE A-Level", "BTS", "HND", "DUT", "Licence"],
        }
    }
}

impl std::fmt::Display for Cycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Années autorisées pour un libellé de cycle (vide si inconnu)
pub fn allowed_years(cycle: &str) -> &'static [u8] {
    Cycle::parse(cycle).map(|c| c.allowed_years()).unwrap_or(&[])
}

pub fn is_year_allowed(cycle: &str, year: u8) -> bool {
    allowed_years(cycle).contains(&year)
}

pub fn diploma_options(cycle: &str) -> &'static [&'static str] {
    Cycle::parse(cycle).map(|c| c.diploma_options()).unwrap_or(&[])
}

pub const WEEK_DAYS: [&str; 6] = ["Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi"];

/// Colonnes de jours de la liste de présence pour un cycle
pub fn attendance_days(cycle: &str) -> &'static [&'static str] {
    let count = Cycle::parse(cycle).map(|c| c.attendance_days()).unwrap_or(5);
    &WEEK_DAYS[..count]
}

/// Années académiques "2025-2026" jusqu'à l'année courante + 6
pub fn academic_years(current_year: i32) -> Vec<String> {
    (FIRST_ACADEMIC_YEAR..=current_year.max(FIRST_ACADEMIC_YEAR) + 6)
        .map(|y| format!("{}-{}", y, y + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_rules_mapping() {
        assert_eq!(allowed_years("BTS"), &[1, 2]);
        assert_eq!(allowed_years("LICENCE"), &[3]);
        assert_eq!(allowed_years("MASTER"), &[4, 5]);
        assert_eq!(allowed_years("INGÉNIEUR"), &[1, 2, 3, 4, 5]);
        assert!(allowed_years("").is_empty());
        assert!(!is_year_allowed("LICENCE", 1));
    }

    #[test]
    fn test_cycle_parse_is_accent_insensitive() {
        assert_eq!(Cycle::parse("ingenieur"), Some(Cycle::Ingenieur));
        assert_eq!(Cycle::parse(" Licence "), Some(Cycle::Licence));
        assert_eq!(Cycle::parse("doctorat"), None);
    }

    #[test]
    fn test_attendance_days_per_cycle() {
        assert_eq!(attendance_days("LICENCE").len(), 6);
        assert_eq!(attendance_days("MASTER").len(), 6);
        assert_eq!(attendance_days("BTS").len(), 5);
        assert_eq!(attendance_days("INGÉNIEUR").len(), 5);
        assert_eq!(attendance_days("").last(), Some(&"Vendredi"));
    }

    #[test]
    fn test_academic_years_range() {
        let years = academic_years(2026);
        assert_eq!(years.first().map(String::as_str), Some("2025-2026"));
        assert_eq!(years.last().map(String::as_str), Some("2032-2033"));
        assert_eq!(years.len(), 8);
    }

    #[test]
    fn test_diploma_options() {
        assert!(diploma_options("MASTER").contains(&"Maîtrise"));
        assert!(diploma_options("").is_empty());
    }
}
