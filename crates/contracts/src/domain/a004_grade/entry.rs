//! Saisie des notes d'une fiche et construction de `POST /notes/save`.

use super::preview::{NotesGroup, PreviewStudent};
use crate::shared::error::FieldErrors;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MAX_SCORE: f64 = 20.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    #[default]
    Normale,
    Rattrapage,
}

impl Session {
    pub fn code(&self) -> &'static str {
        match self {
            Session::Normale => "normale",
            Session::Rattrapage => "rattrapage",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Session::Normale => "Session normale",
            Session::Rattrapage => "Rattrapage",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "rattrapage" => Session::Rattrapage,
            _ => Session::Normale,
        }
    }
}

/// Mention sur la note ramenée à 20
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mention {
    #[serde(rename = "Ajourné")]
    Ajourne,
    Passable,
    #[serde(rename = "Assez bien")]
    AssezBien,
    Bien,
    #[serde(rename = "Très bien")]
    TresBien,
}

impl Mention {
    pub fn from_score(on_twenty: f64) -> Self {
        match on_twenty {
            n if n < 10.0 => Mention::Ajourne,
            n if n < 12.0 => Mention::Passable,
            n if n < 14.0 => Mention::AssezBien,
            n if n < 16.0 => Mention::Bien,
            _ => Mention::TresBien,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mention::Ajourne => "Ajourné",
            Mention::Passable => "Passable",
            Mention::AssezBien => "Assez bien",
            Mention::Bien => "Bien",
            Mention::TresBien => "Très bien",
        }
    }
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeStatus {
    #[serde(rename = "Validé")]
    Valide,
    #[serde(rename = "Ajourné")]
    Ajourne,
    #[serde(rename = "Non saisi")]
    NonSaisi,
}

impl GradeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GradeStatus::Valide => "Validé",
            GradeStatus::Ajourne => "Ajourné",
            GradeStatus::NonSaisi => "Non saisi",
        }
    }
}

/// Note ramenée sur 20
pub fn normalize_score(score: f64, max_score: f64) -> f64 {
    if max_score <= 0.0 {
        return 0.0;
    }
    score * DEFAULT_MAX_SCORE / max_score
}

/// Lecture d'une note saisie ("12,5" accepté) ; vide → `None`
pub fn parse_score(raw: &str, max_score: f64) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw
        .replace(',', ".")
        .parse()
        .map_err(|_| format!("« {} » n'est pas une note valide.", raw))?;
    if !value.is_finite() || value < 0.0 || value > max_score {
        return Err(format!("La note doit être comprise entre 0 et {}.", format_score(max_score)));
    }
    Ok(Some(value))
}

pub fn format_score(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value).trim_end_matches('0').to_string()
    }
}

// ============================================================================
// Requête d'enregistrement
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeLine {
    pub student_id: String,
    pub matricule: Option<String>,
    pub score: Option<f64>,
    pub score_on_twenty: Option<f64>,
    pub mention: Option<Mention>,
    pub status: GradeStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveNotesRequest {
    pub group_key: String,
    pub academic_year: Option<String>,
    pub subject_label: String,
    pub session: Session,
    pub max_score: f64,
    pub grades: Vec<GradeLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveNotesResponse {
    #[serde(default)]
    pub saved: Option<u32>,
}

/// Saisie d'une matière pour une fiche : une note brute par étudiant
#[derive(Debug, Clone, PartialEq)]
pub struct GradeEntryForm {
    pub group_key: String,
    pub academic_year: Option<String>,
    pub subject_label: String,
    pub session: Session,
    pub max_score: String,
    pub rows: Vec<(PreviewStudent, String)>,
}

impl GradeEntryForm {
    pub fn for_group(group: &NotesGroup) -> Self {
        Self {
            group_key: group.key.clone(),
            academic_year: group.academic_year.clone(),
            subject_label: String::new(),
            session: Session::Normale,
            max_score: format_score(DEFAULT_MAX_SCORE),
            rows: group
                .students
                .iter()
                .map(|s| (s.clone(), String::new()))
                .collect(),
        }
    }

    pub fn set_score(mut self, student_id: &str, raw: &str) -> Self {
        if let Some(row) = self.rows.iter_mut().find(|(s, _)| s.id == student_id) {
            row.1 = raw.to_string();
        }
        self
    }

    pub fn max_score_value(&self) -> Result<f64, String> {
        let raw = self.max_score.trim();
        if raw.is_empty() {
            return Ok(DEFAULT_MAX_SCORE);
        }
        match raw.replace(',', ".").parse::<f64>() {
            Ok(v) if v > 0.0 => Ok(v),
            _ => Err("Le barème doit être un nombre positif.".to_string()),
        }
    }

    /// Aperçu d'une ligne : (note /20, mention, statut)
    pub fn evaluate(&self, raw: &str) -> (Option<f64>, Option<Mention>, GradeStatus) {
        let max = self.max_score_value().unwrap_or(DEFAULT_MAX_SCORE);
        match parse_score(raw, max) {
            Ok(Some(score)) => {
                let on_twenty = normalize_score(score, max);
                let status = if on_twenty >= 10.0 {
                    GradeStatus::Valide
                } else {
                    GradeStatus::Ajourne
                };
                (Some(on_twenty), Some(Mention::from_score(on_twenty)), status)
            }
            _ => (None, None, GradeStatus::NonSaisi),
        }
    }

    /// Erreurs par étudiant (clé = identifiant) ou requête prête à envoyer
    pub fn to_request(&self) -> Result<SaveNotesRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.subject_label.trim().is_empty() {
            errors.add("subjectLabel", "La matière est obligatoire.");
        }
        let max_score = match self.max_score_value() {
            Ok(v) => v,
            Err(msg) => {
                errors.add("maxScore", msg);
                DEFAULT_MAX_SCORE
            }
        };

        let mut grades = Vec::with_capacity(self.rows.len());
        let mut row_errors = Vec::new();
        for (student, raw) in &self.rows {
            match parse_score(raw, max_score) {
                Ok(score) => {
                    let (on_twenty, mention, status) = self.evaluate(raw);
                    grades.push(GradeLine {
                        student_id: student.id.clone(),
                        matricule: student.matricule.clone(),
                        score,
                        score_on_twenty: on_twenty,
                        mention,
                        status,
                    });
                }
                Err(msg) => row_errors.push(format!("{} : {}", student.full_name(), msg)),
            }
        }
        if !row_errors.is_empty() {
            errors.add("grades", row_errors.join("\n"));
        }
        if grades.iter().all(|g| g.score.is_none()) && row_errors.is_empty() {
            errors.add("grades", "Aucune note saisie.");
        }

        errors.into_result()?;
        Ok(SaveNotesRequest {
            group_key: self.group_key.clone(),
            academic_year: self.academic_year.clone(),
            subject_label: self.subject_label.trim().to_string(),
            session: self.session,
            max_score,
            grades,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> NotesGroup {
        let s = |id: &str, last: &str| PreviewStudent {
            id: id.into(),
            matricule: Some(format!("M{}", id)),
            last_name: last.into(),
            first_name: "Awa".into(),
        };
        NotesGroup {
            key: "CGE::bts::1".into(),
            academic_year: Some("2025-2026".into()),
            students: vec![s("1", "ABENA"), s("2", "BELLA"), s("3", "ZAMBO")],
            ..Default::default()
        }
    }

    #[test]
    fn test_mention_thresholds() {
        assert_eq!(Mention::from_score(9.99), Mention::Ajourne);
        assert_eq!(Mention::from_score(10.0), Mention::Passable);
        assert_eq!(Mention::from_score(12.0), Mention::AssezBien);
        assert_eq!(Mention::from_score(14.0), Mention::Bien);
        assert_eq!(Mention::from_score(16.0), Mention::TresBien);
    }

    #[test]
    fn test_parse_score_bounds_and_comma() {
        assert_eq!(parse_score("12,5", 20.0), Ok(Some(12.5)));
        assert_eq!(parse_score("", 20.0), Ok(None));
        assert!(parse_score("21", 20.0).is_err());
        assert!(parse_score("-1", 20.0).is_err());
        assert!(parse_score("abc", 20.0).is_err());
    }

    #[test]
    fn test_request_normalizes_on_twenty() {
        let mut form = GradeEntryForm::for_group(&group())
            .set_score("1", "30")
            .set_score("2", "12");
        form.subject_label = "Comptabilité".into();
        form.max_score = "40".into();
        form.session = Session::Rattrapage;
        let req = form.to_request().unwrap();
        assert_eq!(req.max_score, 40.0);
        assert_eq!(req.grades[0].score_on_twenty, Some(15.0));
        assert_eq!(req.grades[0].mention, Some(Mention::Bien));
        assert_eq!(req.grades[1].status, GradeStatus::Ajourne);
        assert_eq!(req.grades[2].status, GradeStatus::NonSaisi);

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["session"], "rattrapage");
        assert_eq!(json["grades"][0]["mention"], "Bien");
    }

    #[test]
    fn test_request_errors() {
        let form = GradeEntryForm::for_group(&group()).set_score("3", "25");
        let errors = form.to_request().unwrap_err();
        assert!(errors.get("subjectLabel").is_some());
        assert!(errors.get("grades").unwrap_or_default().contains("ZAMBO"));

        let mut empty = GradeEntryForm::for_group(&group());
        empty.subject_label = "Droit".into();
        assert_eq!(empty.to_request().unwrap_err().get("grades"), Some("Aucune note saisie."));
    }
}
