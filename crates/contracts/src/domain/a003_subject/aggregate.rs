use crate::domain::common::AggregateRoot;
use crate::shared::serde_utils::{bool_lenient, id_lenient, opt_f64_lenient, opt_u8_lenient};
use crate::shared::text::first_non_empty;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Matière (UE, éventuellement EC) rattachée à une salle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(default, deserialize_with = "id_lenient")]
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub ue_label: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ec_title: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub credits: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub coefficient: Option<f64>,
    #[serde(default)]
    pub filiere: Option<String>,
    #[serde(default)]
    pub specialite: Option<String>,
    #[serde(default)]
    pub specialite_code: Option<String>,
    #[serde(default)]
    pub option_code: Option<String>,
    #[serde(default)]
    pub cycle: Option<String>,
    #[serde(default, deserialize_with = "opt_u8_lenient")]
    pub study_year: Option<u8>,
    #[serde(default, deserialize_with = "bool_lenient")]
    pub is_optional: bool,
}

impl Subject {
    /// Intitulé de l'UE : `label`, `ueLabel` ou `name`
    pub fn display_label(&self) -> String {
        first_non_empty([
            self.label.as_deref(),
            self.ue_label.as_deref(),
            self.name.as_deref(),
        ])
        .unwrap_or_default()
        .to_string()
    }

    pub fn ref_key(&self) -> String {
        first_non_empty([self.option_code.as_deref(), self.specialite_code.as_deref()])
            .unwrap_or_default()
            .to_string()
    }

    /// Ligne affichable dans le tableau d'une salle
    pub fn is_visible(&self) -> bool {
        let has_ec = self
            .ec_title
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false);
        let has_num = self.credits.map(|c| c != 0.0).unwrap_or(false)
            || self.coefficient.map(|c| c != 0.0).unwrap_or(false);
        let has_cycle = self
            .cycle
            .as_deref()
            .map(|c| !c.trim().is_empty())
            .unwrap_or(false);
        !self.display_label().is_empty() || has_ec || has_num || has_cycle || self.is_optional
    }
}

impl AggregateRoot for Subject {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> String {
        self.display_label()
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "subjects"
    }

    fn element_name() -> &'static str {
        "Matière"
    }

    fn list_name() -> &'static str {
        "Matières"
    }
}

/// Corps de `POST /subjects` / `PUT /subjects/:id`.
///
/// L'intitulé est recopié dans `ueLabel`, `name` et `label` pour
/// les différentes versions du backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectPayload {
    pub filiere: String,
    pub specialite: String,
    pub specialite_code: String,
    pub study_year: u8,
    pub cycle: Option<String>,
    pub is_optional: bool,
    pub ue_label: String,
    pub name: String,
    pub label: String,
    pub ec_title: Option<String>,
    pub credits: Option<f64>,
    pub coefficient: Option<f64>,
}

// ============================================================================
// Regroupement par salle
// ============================================================================

/// Bloc « salle » de la page Matières : filière + code + niveau
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectRoom<'a> {
    pub key: String,
    pub filiere: String,
    pub room_code: String,
    pub specialite: String,
    pub level: u8,
    pub cycle: String,
    pub subjects: Vec<&'a Subject>,
}

impl SubjectRoom<'_> {
    pub fn title(&self) -> String {
        format!("{} – {}", self.room_code, self.specialite)
    }

    pub fn meta(&self) -> String {
        let mut meta = format!("{} · Niveau {}", self.filiere, self.level);
        if !self.cycle.is_empty() {
            meta.push_str(&format!(" · Cycle {}", self.cycle));
        }
        meta
    }

    pub fn visible_subjects(&self) -> Vec<&Subject> {
        self.subjects.iter().copied().filter(|s| s.is_visible()).collect()
    }
}

pub fn group_by_room(subjects: &[Subject]) -> Vec<SubjectRoom<'_>> {
    let mut rooms: BTreeMap<(String, String, u8), SubjectRoom<'_>> = BTreeMap::new();
    for s in subjects {
        let filiere = first_non_empty([s.filiere.as_deref()])
            .unwrap_or("Filière non définie")
            .to_string();
        let room_code = first_non_empty([s.specialite_code.as_deref()])
            .unwrap_or("???")
            .to_string();
        let level = s.study_year.unwrap_or(1);

        rooms
            .entry((filiere.clone(), room_code.clone(), level))
            .or_insert_with(|| SubjectRoom {
                key: format!("{}::{}::{}", filiere, room_code, level),
                filiere,
                room_code,
                specialite: first_non_empty([s.specialite.as_deref()])
                    .unwrap_or("Spécialité ?")
                    .to_string(),
                level,
                cycle: s.cycle.clone().unwrap_or_default(),
                subjects: Vec::new(),
            })
            .subjects
            .push(s);
    }
    rooms.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(filiere: &str, code: &str, year: u8, label: &str) -> Subject {
        Subject {
            id: label.into(),
            ue_label: Some(label.into()),
            filiere: Some(filiere.into()),
            specialite: Some("Comptabilité".into()),
            specialite_code: Some(code.into()),
            study_year: Some(year),
            ..Default::default()
        }
    }

    #[test]
    fn test_deserialize_with_string_numbers() {
        let json = r#"{"id": 12, "name": "Droit civil", "credits": "4", "coefficient": "2,5",
            "studyYear": "3", "isOptional": true}"#;
        let s: Subject = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, "12");
        assert_eq!(s.display_label(), "Droit civil");
        assert_eq!(s.coefficient, Some(2.5));
        assert_eq!(s.study_year, Some(3));
        assert!(s.is_optional);
    }

    #[test]
    fn test_group_by_room_sorted() {
        let list = vec![
            subject("Filières de gestion", "MKT", 1, "Marketing"),
            subject("Filières de gestion", "CGE", 2, "Audit"),
            subject("Filières de gestion", "CGE", 1, "Compta"),
            subject("Filières de gestion", "CGE", 1, "Fiscalité"),
        ];
        let rooms = group_by_room(&list);
        let keys: Vec<&str> = rooms.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "Filières de gestion::CGE::1",
                "Filières de gestion::CGE::2",
                "Filières de gestion::MKT::1"
            ]
        );
        assert_eq!(rooms[0].subjects.len(), 2);
        assert_eq!(rooms[0].title(), "CGE – Comptabilité");
        assert_eq!(rooms[0].meta(), "Filières de gestion · Niveau 1");
    }

    #[test]
    fn test_empty_subject_is_hidden() {
        let s = Subject::default();
        assert!(!s.is_visible());
        let s = Subject {
            is_optional: true,
            ..Default::default()
        };
        assert!(s.is_visible());
    }
}
