use crate::domain::a001_student::Student;
use crate::domain::a002_class::group_by_class;
use crate::shared::serde_utils::{id_lenient, opt_string_lenient, opt_u8_lenient};
use crate::shared::text::{capitalize_first, first_non_empty, format_full_name};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Étudiant tel qu'il apparaît sur une fiche de notes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewStudent {
    #[serde(default, deserialize_with = "id_lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_lenient")]
    pub matricule: Option<String>,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
}

impl PreviewStudent {
    pub fn full_name(&self) -> String {
        format_full_name(&self.last_name, &self.first_name)
    }
}

impl From<&Student> for PreviewStudent {
    fn from(s: &Student) -> Self {
        Self {
            id: s.id.clone(),
            matricule: s.matricule.clone(),
            last_name: s.last_name.clone(),
            first_name: s.first_name.clone(),
        }
    }
}

/// Une fiche de notes (une classe)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesGroup {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default, deserialize_with = "opt_u8_lenient")]
    pub study_year: Option<u8>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub filiere: Option<String>,
    #[serde(default)]
    pub option: Option<String>,
    #[serde(default)]
    pub specialite: Option<String>,
    #[serde(default)]
    pub specialite_code: Option<String>,
    #[serde(default)]
    pub option_code: Option<String>,
    #[serde(default)]
    pub students: Vec<PreviewStudent>,
}

impl NotesGroup {
    /// Spécialité affichée en tête de fiche
    pub fn specialite_display(&self) -> String {
        if let Some(v) = first_non_empty([
            self.display_name.as_deref(),
            self.option.as_deref(),
            self.specialite.as_deref(),
        ]) {
            return capitalize_first(v);
        }
        first_non_empty([self.specialite_code.as_deref(), self.option_code.as_deref()])
            .unwrap_or("Spécialité non définie")
            .to_string()
    }

    pub fn level_label(&self) -> String {
        self.study_year
            .map(|y| format!("Niveau {}", y))
            .unwrap_or_default()
    }
}

/// Réponse de `GET /notes/preview`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotesPreview {
    #[serde(default)]
    pub groups: Vec<NotesGroup>,
}

impl NotesPreview {
    pub fn total_students(&self) -> usize {
        self.groups.iter().map(|g| g.students.len()).sum()
    }
}

// ============================================================================
// Filtres
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesFilter {
    pub academic_year: String,
    pub filiere: String,
    pub specialite: String,
    pub study_year: Option<u8>,
}

impl NotesFilter {
    /// Paramètres de `GET /notes/preview`, tous présents même vides
    pub fn query_string(&self) -> String {
        format!(
            "academicYear={}&filiere={}&specialite={}&studyYear={}",
            urlencoding::encode(&self.academic_year),
            urlencoding::encode(&self.filiere),
            urlencoding::encode(&self.specialite),
            self.study_year.map(|y| y.to_string()).unwrap_or_default()
        )
    }

    pub fn accepts(&self, s: &Student) -> bool {
        let eq = |filter: &str, value: Option<&str>| filter.is_empty() || value == Some(filter);
        eq(&self.academic_year, s.academic_year.as_deref())
            && eq(&self.filiere, s.filiere.as_deref())
            && (self.specialite.is_empty()
                || s.specialite.as_deref() == Some(self.specialite.as_str())
                || s.specialite_code.as_deref() == Some(self.specialite.as_str()))
            && (self.study_year.is_none() || s.study_year == self.study_year)
    }
}

/// Fiches construites localement, quand l'aperçu serveur est indisponible
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalNotes {
    pub preview: NotesPreview,
    /// Étudiants retenus par le filtre mais sans clé de classe
    pub ungroupable: Vec<PreviewStudent>,
}

impl LocalNotes {
    /// "2 étudiant(s) sans classe identifiable : ABENA Luc, ZOA Marc"
    pub fn ungroupable_message(&self) -> Option<String> {
        if self.ungroupable.is_empty() {
            return None;
        }
        let names: Vec<String> = self.ungroupable.iter().map(PreviewStudent::full_name).collect();
        Some(format!(
            "{} étudiant(s) sans classe identifiable : {}",
            names.len(),
            names.join(", ")
        ))
    }
}

/// Une fiche par clé de classe, étudiants triés par nom ; les étudiants
/// inclassables sont rendus à part.
pub fn build_groups(students: &[Student], filter: &NotesFilter) -> LocalNotes {
    let grouping = group_by_class(students.iter().filter(|s| filter.accepts(s)));

    let groups = grouping
        .groups
        .into_iter()
        .filter_map(|(key, members)| {
            let first = *members.first()?;
            let mut students: Vec<PreviewStudent> = members.into_iter().map(PreviewStudent::from).collect();
            students.sort_by_key(|s| s.full_name().to_lowercase());
            Some(NotesGroup {
                key,
                academic_year: first.academic_year.clone(),
                study_year: first.study_year,
                display_name: None,
                filiere: first.filiere.clone(),
                option: first.option.clone(),
                specialite: first.specialite.clone(),
                specialite_code: first.specialite_code.clone(),
                option_code: first.option_code.clone(),
                students,
            })
        })
        .collect();

    LocalNotes {
        preview: NotesPreview { groups },
        ungroupable: grouping.ungroupable.into_iter().map(PreviewStudent::from).collect(),
    }
}

/// Filières présentes parmi les étudiants
pub fn filiere_options(students: &[Student]) -> Vec<String> {
    students
        .iter()
        .filter_map(|s| s.filiere.clone())
        .filter(|f| !f.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Spécialités et codes présents pour la filière choisie
pub fn specialite_options(students: &[Student], filiere: &str) -> Vec<String> {
    students
        .iter()
        .filter(|s| filiere.is_empty() || s.filiere.as_deref() == Some(filiere))
        .flat_map(|s| [s.specialite.clone(), s.specialite_code.clone()])
        .flatten()
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str, last: &str, year: &str, filiere: &str, cycle: &str, sy: u8) -> Student {
        Student {
            id: id.into(),
            last_name: last.into(),
            first_name: "Jean".into(),
            academic_year: Some(year.into()),
            filiere: Some(filiere.into()),
            specialite: Some("Comptabilité et Gestion des Entreprises".into()),
            specialite_code: Some("CGE".into()),
            cycle: Some(cycle.into()),
            study_year: Some(sy),
            ..Default::default()
        }
    }

    #[test]
    fn test_grade_sheet_scenario_filters_students() {
        let students = vec![
            student("1", "MBALLA", "2025-2026", "Filières de gestion", "LICENCE", 3),
            student("2", "ATANGANA", "2025-2026", "Filières de gestion", "LICENCE", 3),
            student("3", "OWONA", "2024-2025", "Filières de gestion", "LICENCE", 3),
            student("4", "ESSOMBA", "2025-2026", "Filières industrielles", "LICENCE", 3),
            student("5", "NGONO", "2025-2026", "Filières de gestion", "BTS", 1),
        ];
        let filter = NotesFilter {
            academic_year: "2025-2026".into(),
            filiere: "Filières de gestion".into(),
            specialite: String::new(),
            study_year: Some(3),
        };
        let local = build_groups(&students, &filter);
        assert!(local.ungroupable.is_empty());
        let groups = local.preview.groups;
        assert_eq!(groups.len(), 1);
        let names: Vec<&str> = groups[0].students.iter().map(|s| s.last_name.as_str()).collect();
        assert_eq!(names, vec!["ATANGANA", "MBALLA"]);
        assert_eq!(groups[0].key, "CGE::licence::3");
    }

    #[test]
    fn test_ungroupable_students_reported() {
        let mut lost = student("9", "ZOA", "2025-2026", "", "BTS", 1);
        lost.filiere = None;
        lost.specialite_code = None;
        let students = vec![student("1", "MBALLA", "2025-2026", "Filières de gestion", "BTS", 1), lost];
        let local = build_groups(&students, &NotesFilter::default());
        assert_eq!(local.preview.total_students(), 1);
        assert_eq!(local.ungroupable.len(), 1);
        assert_eq!(
            local.ungroupable_message().as_deref(),
            Some("1 étudiant(s) sans classe identifiable : ZOA Jean")
        );
    }

    #[test]
    fn test_specialite_display_fallback_chain() {
        let mut g = NotesGroup::default();
        assert_eq!(g.specialite_display(), "Spécialité non définie");
        g.option_code = Some("BAT".into());
        assert_eq!(g.specialite_display(), "BAT");
        g.specialite = Some("GÉNIE CIVIL".into());
        assert_eq!(g.specialite_display(), "Génie civil");
        g.display_name = Some("bâtiment".into());
        assert_eq!(g.specialite_display(), "Bâtiment");
    }

    #[test]
    fn test_query_string_keeps_empty_params() {
        let f = NotesFilter {
            filiere: "Filières de gestion".into(),
            ..Default::default()
        };
        assert_eq!(
            f.query_string(),
            "academicYear=&filiere=Fili%C3%A8res%20de%20gestion&specialite=&studyYear="
        );
    }

    #[test]
    fn test_preview_deserialize() {
        let json = r#"{"groups":[{"key":"k","studyYear":"2","students":[{"id":1,"lastName":"A","firstName":"b"}]}]}"#;
        let p: NotesPreview = serde_json::from_str(json).unwrap();
        assert_eq!(p.total_students(), 1);
        assert_eq!(p.groups[0].level_label(), "Niveau 2");
    }

    #[test]
    fn test_filter_options() {
        let students = vec![
            student("1", "A", "2025-2026", "Filières de gestion", "BTS", 1),
            student("2", "B", "2025-2026", "Filières de gestion", "BTS", 1),
        ];
        assert_eq!(filiere_options(&students), vec!["Filières de gestion"]);
        assert_eq!(
            specialite_options(&students, "Filières de gestion"),
            vec!["CGE", "Comptabilité et Gestion des Entreprises"]
        );
    }
}
