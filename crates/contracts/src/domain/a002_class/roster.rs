use super::aggregate::{ClassMember, ClassRecord};
use crate::domain::a001_student::Student;
use crate::shared::dictionaries::programs::{matches_filiere_type, FiliereType};
use crate::shared::dictionaries::roles::{has_school_role, is_class_representative, NO_ROLE};
use crate::shared::export::CsvExportable;
use crate::shared::text::normalize;

// ============================================================================
// Filtres de la page Classes
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassFilter {
    pub filiere_type: Option<FiliereType>,
    pub cycle: String,
    pub level: String,
    pub search: String,
}

impl ClassFilter {
    pub fn accepts(&self, class: &ClassRecord) -> bool {
        if !matches_filiere_type(class.filiere.as_deref().unwrap_or_default(), self.filiere_type) {
            return false;
        }
        if !self.cycle.is_empty() && class.cycle.as_deref().unwrap_or_default() != self.cycle {
            return false;
        }
        if !self.level.is_empty() && class.level.as_deref().unwrap_or_default() != self.level {
            return false;
        }

        let q = normalize(&self.search);
        if q.is_empty() {
            return true;
        }
        let in_title = [class.title.as_deref(), class.abbrev.as_deref()]
            .into_iter()
            .flatten()
            .any(|v| normalize(v).contains(&q));
        in_title
            || class.students.iter().any(|s| {
                normalize(&s.full_name).contains(&q)
                    || s.matricule
                        .as_deref()
                        .map(|m| normalize(m).contains(&q))
                        .unwrap_or(false)
            })
    }
}

pub fn filter_classes<'a>(classes: &'a [ClassRecord], filter: &ClassFilter) -> Vec<&'a ClassRecord> {
    classes.iter().filter(|c| filter.accepts(c)).collect()
}

/// Niveaux distincts (non vides) des classes du cycle choisi, triés
pub fn level_options(classes: &[ClassRecord], cycle: &str) -> Vec<String> {
    let mut levels: Vec<String> = classes
        .iter()
        .filter(|c| cycle.is_empty() || c.cycle.as_deref().unwrap_or_default() == cycle)
        .filter_map(|c| c.level.clone())
        .filter(|l| !l.trim().is_empty())
        .collect();
    levels.sort();
    levels.dedup();
    levels
}

// ============================================================================
// Statistiques
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassStats {
    pub active_classes: usize,
    pub delegates: usize,
    pub bureau_members: usize,
    pub active_students: usize,
}

impl ClassStats {
    pub fn compute(classes: &[ClassRecord], students: &[Student]) -> Self {
        Self {
            active_classes: classes.len(),
            delegates: students
                .iter()
                .filter(|s| is_class_representative(s.class_role.as_deref()))
                .count(),
            bureau_members: students
                .iter()
                .filter(|s| has_school_role(s.school_role.as_deref()))
                .count(),
            active_students: students.len(),
        }
    }
}

// ============================================================================
// Export CSV
// ============================================================================

/// Ligne de l'export CSV : un étudiant dans sa classe
#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub class_title: String,
    pub abbrev: String,
    pub cycle: String,
    pub level: String,
    pub matricule: String,
    pub full_name: String,
    pub contact: String,
    pub class_role: String,
    pub school_role: String,
}

impl RosterRow {
    fn new(class: &ClassRecord, member: &ClassMember) -> Self {
        let role = |r: Option<&str>| r.unwrap_or(NO_ROLE).to_string();
        Self {
            class_title: class.label(),
            abbrev: class.abbrev.clone().unwrap_or_default(),
            cycle: class.cycle.clone().unwrap_or_default(),
            level: class.level.clone().unwrap_or_default(),
            matricule: member.matricule.clone().unwrap_or_default(),
            full_name: member.full_name.clone(),
            contact: member.contact.clone().unwrap_or_default(),
            class_role: role(member.class_role.as_deref()),
            school_role: role(member.school_role.as_deref()),
        }
    }
}

impl CsvExportable for RosterRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Classe",
            "Abréviation",
            "Cycle",
            "Niveau",
            "Matricule",
            "Nom",
            "Contact",
            "Responsabilité de classe",
            "Responsabilité établissement",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.class_title.clone(),
            self.abbrev.clone(),
            self.cycle.clone(),
            self.level.clone(),
            self.matricule.clone(),
            self.full_name.clone(),
            self.contact.clone(),
            self.class_role.clone(),
            self.school_role.clone(),
        ]
    }
}

/// Lignes CSV de plusieurs classes, membres triés dans chaque classe
pub fn roster_rows<'a, I>(classes: I) -> Vec<RosterRow>
where
    I: IntoIterator<Item = &'a ClassRecord>,
{
    classes
        .into_iter()
        .flat_map(|c| {
            c.sorted_members()
                .into_iter()
                .map(move |m| RosterRow::new(c, m))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::export::build_csv;

    fn member(name: &str, mat: &str, class_role: &str) -> ClassMember {
        ClassMember {
            id: mat.into(),
            full_name: name.into(),
            matricule: Some(mat.into()),
            class_role: Some(class_role.into()),
            ..Default::default()
        }
    }

    fn class(title: &str, filiere: &str, cycle: &str, level: &str) -> ClassRecord {
        ClassRecord {
            id: title.into(),
            title: Some(title.into()),
            filiere: Some(filiere.into()),
            cycle: Some(cycle.into()),
            level: Some(level.into()),
            students: vec![member("ZOA Marie", "M2", "Aucune"), member("ABENA Luc", "M1", "Délégué")],
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_by_type_cycle_and_search() {
        let classes = vec![
            class("CGE BTS 1", "Filières de gestion", "BTS", "1"),
            class("BAT BTS 1", "Filières industrielles", "BTS", "1"),
            class("CGE LIC 3", "Filières de gestion", "LICENCE", "3"),
        ];
        let f = ClassFilter {
            filiere_type: Some(FiliereType::Gestion),
            cycle: "BTS".into(),
            ..Default::default()
        };
        assert_eq!(filter_classes(&classes, &f).len(), 1);

        let f = ClassFilter {
            search: "abena".into(),
            ..Default::default()
        };
        assert_eq!(filter_classes(&classes, &f).len(), 3);

        let f = ClassFilter {
            search: "bat".into(),
            ..Default::default()
        };
        assert_eq!(filter_classes(&classes, &f).len(), 1);
    }

    #[test]
    fn test_level_options_sorted_unique() {
        let classes = vec![
            class("A", "Filières de gestion", "BTS", "2"),
            class("B", "Filières de gestion", "BTS", "1"),
            class("C", "Filières de gestion", "BTS", "1"),
            class("D", "Filières de gestion", "MASTER", "4"),
        ];
        assert_eq!(level_options(&classes, "BTS"), vec!["1", "2"]);
        assert_eq!(level_options(&classes, "").len(), 3);
    }

    #[test]
    fn test_stats_from_students() {
        let students = vec![
            Student {
                class_role: Some("Délégué".into()),
                school_role: Some("Aucune".into()),
                ..Default::default()
            },
            Student {
                class_role: Some("adjoint".into()),
                school_role: Some("Président".into()),
                ..Default::default()
            },
            Student::default(),
        ];
        let stats = ClassStats::compute(&[class("A", "x", "BTS", "1")], &students);
        assert_eq!(stats.active_classes, 1);
        assert_eq!(stats.delegates, 2);
        assert_eq!(stats.bureau_members, 1);
        assert_eq!(stats.active_students, 3);
    }

    #[test]
    fn test_roster_csv_columns_and_order() {
        let c = class("CGE BTS 1", "Filières de gestion", "BTS", "1");
        let rows = roster_rows([&c]);
        assert_eq!(rows[0].full_name, "ABENA Luc");
        let csv = build_csv(&rows).unwrap();
        let header = csv.lines().next().unwrap();
        assert!(header.ends_with("Responsabilité de classe;Responsabilité établissement"));
        assert_eq!(csv.lines().count(), 3);
    }
}
