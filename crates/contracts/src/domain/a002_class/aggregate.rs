use crate::domain::common::AggregateRoot;
use crate::shared::dictionaries::roles::{has_school_role, is_class_representative};
use crate::shared::serde_utils::{id_lenient, opt_string_lenient, opt_u8_lenient};
use crate::shared::text::{capitalize_first, first_non_empty};
use serde::{Deserialize, Serialize};

/// Classe avec son effectif, telle que renvoyée par `GET /classes`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    #[serde(default, deserialize_with = "id_lenient")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub abbrev: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default)]
    pub filiere: Option<String>,
    #[serde(default)]
    pub specialite: Option<String>,
    #[serde(default)]
    pub specialite_code: Option<String>,
    #[serde(default)]
    pub option: Option<String>,
    #[serde(default)]
    pub option_code: Option<String>,
    #[serde(default)]
    pub cycle: Option<String>,
    #[serde(default, alias = "niveau", deserialize_with = "opt_string_lenient")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "opt_u8_lenient")]
    pub study_year: Option<u8>,
    #[serde(default)]
    pub effectif: Option<u32>,
    #[serde(default)]
    pub students: Vec<ClassMember>,
}

/// Membre d'une classe (vue allégée de l'étudiant)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMember {
    #[serde(default, deserialize_with = "id_lenient")]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, deserialize_with = "opt_string_lenient")]
    pub matricule: Option<String>,
    #[serde(default)]
    pub class_role: Option<String>,
    #[serde(default)]
    pub school_role: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

impl ClassMember {
    pub fn is_representative(&self) -> bool {
        is_class_representative(self.class_role.as_deref())
    }

    pub fn is_bureau_member(&self) -> bool {
        has_school_role(self.school_role.as_deref())
    }
}

impl ClassRecord {
    /// Libellé de la classe : titre, abréviation, sinon identifiant
    pub fn label(&self) -> String {
        first_non_empty([self.title.as_deref(), self.abbrev.as_deref(), Some(self.id.as_str())])
            .unwrap_or("Classe")
            .to_string()
    }

    pub fn headcount(&self) -> usize {
        self.effectif
            .map(|e| e as usize)
            .unwrap_or(self.students.len())
    }

    pub fn representatives(&self) -> Vec<&ClassMember> {
        self.students.iter().filter(|s| s.is_representative()).collect()
    }

    /// Membres triés par nom complet (majuscules) puis matricule
    pub fn sorted_members(&self) -> Vec<&ClassMember> {
        let mut members: Vec<&ClassMember> = self.students.iter().collect();
        members.sort_by(|a, b| {
            a.full_name
                .to_uppercase()
                .cmp(&b.full_name.to_uppercase())
                .then_with(|| {
                    a.matricule
                        .as_deref()
                        .unwrap_or_default()
                        .to_uppercase()
                        .cmp(&b.matricule.as_deref().unwrap_or_default().to_uppercase())
                })
        });
        members
    }

    /// Année d'étude : champ explicite, sinon niveau numérique
    pub fn effective_study_year(&self) -> Option<u8> {
        self.study_year
            .or_else(|| self.level.as_deref().and_then(|l| l.trim().parse().ok()))
    }

    /// Spécialité affichée sur les fiches : partie avant le tiret du nom
    /// d'affichage, puis option, spécialité, codes et filière
    pub fn specialite_display(&self) -> String {
        if let Some(name) = self.display_name.as_deref() {
            let before_dash = name.split('-').next().unwrap_or_default().trim();
            if !before_dash.is_empty() {
                return capitalize_first(before_dash);
            }
        }
        if let Some(v) = first_non_empty([self.option.as_deref(), self.specialite.as_deref()]) {
            return capitalize_first(v);
        }
        if let Some(code) = first_non_empty([self.specialite_code.as_deref(), self.option_code.as_deref()]) {
            return code.to_string();
        }
        self.filiere
            .as_deref()
            .map(capitalize_first)
            .unwrap_or_default()
    }
}

impl AggregateRoot for ClassRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> String {
        self.label()
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "classes"
    }

    fn element_name() -> &'static str {
        "Classe"
    }

    fn list_name() -> &'static str {
        "Classes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_class_with_numeric_level() {
        let json = r#"{"id": 3, "title": "BAT BTS 1", "abbrev": "BAT-BTS1", "level": 1,
            "students": [{"id": 1, "fullName": "NKOMO Paul", "classRole": "Délégué"}]}"#;
        let c: ClassRecord = serde_json::from_str(json).unwrap();
        assert_eq!(c.level.as_deref(), Some("1"));
        assert_eq!(c.effective_study_year(), Some(1));
        assert_eq!(c.representatives().len(), 1);
        assert_eq!(c.headcount(), 1);
    }

    #[test]
    fn test_specialite_display_fallbacks() {
        let c = ClassRecord {
            display_name: Some("GÉNIE LOGICIEL - BTS 1".into()),
            ..Default::default()
        };
        assert_eq!(c.specialite_display(), "Génie logiciel");
        let c = ClassRecord {
            option_code: Some("GLI".into()),
            ..Default::default()
        };
        assert_eq!(c.specialite_display(), "GLI");
        assert_eq!(ClassRecord::default().specialite_display(), "");
    }

    #[test]
    fn test_sorted_members_by_name_then_matricule() {
        let m = |name: &str, mat: &str| ClassMember {
            full_name: name.into(),
            matricule: Some(mat.into()),
            ..Default::default()
        };
        let c = ClassRecord {
            students: vec![m("b", "2"), m("A", "9"), m("B", "1")],
            ..Default::default()
        };
        let order: Vec<&str> = c
            .sorted_members()
            .iter()
            .map(|s| s.matricule.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(order, vec!["9", "1", "2"]);
    }
}
