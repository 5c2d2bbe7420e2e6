//! Formulaire matière : création unitaire, création en lot (plusieurs UE
//! partageant la même portée) et modification.

use super::aggregate::{Subject, SubjectPayload};
use crate::shared::dictionaries::cycles::is_year_allowed;
use crate::shared::dictionaries::programs::{filiere_def, FILIERE_INDUSTRIELLE};

pub const UE_REQUIRED: &str = "Intitulé de l'UE (Unité d'enseignement) requis.";
pub const BULK_EMPTY: &str = "Ajoutez au moins une UE.";

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectForm {
    pub id: Option<String>,
    pub bulk: bool,
    pub ue_title: String,
    pub ue_rows: Vec<String>,
    pub ec_title: String,
    pub credits: String,
    pub coefficient: String,
    pub filiere: String,
    /// Spécialité parente (industriel), jamais envoyée au backend
    pub specialite_parent: String,
    pub specialite: String,
    pub specialite_code: String,
    pub option: String,
    pub option_code: String,
    pub cycle: String,
    pub study_year: Option<u8>,
    pub is_optional: bool,
}

impl Default for SubjectForm {
    fn default() -> Self {
        Self {
            id: None,
            bulk: false,
            ue_title: String::new(),
            ue_rows: vec![String::new()],
            ec_title: String::new(),
            credits: String::new(),
            coefficient: String::new(),
            filiere: String::new(),
            specialite_parent: String::new(),
            specialite: String::new(),
            specialite_code: String::new(),
            option: String::new(),
            option_code: String::new(),
            cycle: String::new(),
            study_year: None,
            is_optional: false,
        }
    }
}

/// Requêtes à envoyer après validation
#[derive(Debug, Clone, PartialEq)]
pub enum SubjectSubmission {
    Create(SubjectPayload),
    Update { id: String, payload: SubjectPayload },
    /// Un POST par intitulé non vide
    Bulk(Vec<SubjectPayload>),
}

impl SubjectForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formulaire de modification. Une matière industrielle stocke l'option
    /// dans `specialite` : la spécialité parente est retrouvée par le libellé.
    pub fn from_subject(subject: &Subject) -> Self {
        let label = subject.display_label();
        let mut form = Self {
            id: Some(subject.id.clone()),
            ue_title: label.clone(),
            ue_rows: vec![label],
            ec_title: subject.ec_title.clone().unwrap_or_default(),
            credits: subject.credits.map(format_number).unwrap_or_default(),
            coefficient: subject.coefficient.map(format_number).unwrap_or_default(),
            filiere: subject.filiere.clone().unwrap_or_default(),
            specialite: subject.specialite.clone().unwrap_or_default(),
            specialite_code: subject.specialite_code.clone().unwrap_or_default(),
            cycle: subject.cycle.clone().unwrap_or_default(),
            study_year: subject.study_year,
            is_optional: subject.is_optional,
            ..Self::default()
        };

        if form.filiere == FILIERE_INDUSTRIELLE {
            let found = filiere_def(FILIERE_INDUSTRIELLE)
                .and_then(|def| def.option_by_label(&form.specialite));
            if let Some((parent, opt)) = found {
                form.specialite_parent = parent.to_string();
                form.specialite = opt.label.to_string();
                form.option = opt.label.to_string();
                form.option_code = opt.code.to_string();
                form.specialite_code = opt.code.to_string();
            }
        }
        form
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_industrial(&self) -> bool {
        filiere_def(&self.filiere)
            .map(|f| f.is_industrial())
            .unwrap_or(false)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    pub fn on_filiere_change(mut self, filiere: &str) -> Self {
        self.filiere = filiere.to_string();
        self.specialite_parent.clear();
        self.specialite.clear();
        self.specialite_code.clear();
        self.option.clear();
        self.option_code.clear();
        self
    }

    /// Industriel : choix du parent, l'option reste à choisir.
    /// Autres filières : libellé et code appariés.
    pub fn on_specialite_select(mut self, value: &str) -> Self {
        let Some(def) = filiere_def(&self.filiere) else {
            return self;
        };
        if def.is_industrial() {
            self.specialite_parent = value.to_string();
            self.specialite.clear();
            self.specialite_code.clear();
            self.option.clear();
            self.option_code.clear();
        } else {
            self.specialite = value.to_string();
            self.specialite_code = def
                .specialite(value)
                .map(|s| s.code.to_string())
                .unwrap_or_default();
        }
        self
    }

    /// L'option devient la spécialité enregistrée (code de salle = code option)
    pub fn on_option_select(mut self, value: &str) -> Self {
        let Some(def) = filiere_def(&self.filiere).filter(|f| f.is_industrial()) else {
            return self;
        };
        if self.specialite_parent.is_empty() {
            return self;
        }
        let code = def
            .options_of(&self.specialite_parent)
            .iter()
            .find(|o| o.label == value)
            .map(|o| o.code.to_string())
            .unwrap_or_default();
        self.option = value.to_string();
        self.option_code = code.clone();
        self.specialite = value.to_string();
        self.specialite_code = code;
        self
    }

    pub fn on_cycle_change(mut self, cycle: &str) -> Self {
        if self.cycle != cycle {
            self.study_year = None;
        }
        self.cycle = cycle.to_string();
        self
    }

    pub fn pick_year(mut self, year: u8) -> Self {
        if !is_year_allowed(&self.cycle, year) {
            return self;
        }
        self.study_year = if self.study_year == Some(year) {
            None
        } else {
            Some(year)
        };
        self
    }

    /// Passage en mode lot : la liste démarre avec l'intitulé saisi
    pub fn set_bulk(mut self, bulk: bool) -> Self {
        if bulk && !self.bulk {
            let seed = self.ue_title.trim();
            if !seed.is_empty() {
                self.ue_rows = vec![seed.to_string()];
            }
        }
        self.bulk = bulk;
        self
    }

    pub fn add_ue_row(mut self) -> Self {
        self.ue_rows.push(String::new());
        self
    }

    /// La dernière ligne n'est jamais supprimée
    pub fn remove_ue_row(mut self, index: usize) -> Self {
        if self.ue_rows.len() > 1 && index < self.ue_rows.len() {
            self.ue_rows.remove(index);
        }
        self
    }

    pub fn update_ue_row(mut self, index: usize, value: &str) -> Self {
        if let Some(row) = self.ue_rows.get_mut(index) {
            *row = value.to_string();
        }
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn validate_common(&self) -> Result<u8, String> {
        if self.filiere.is_empty() {
            return Err("La filière est obligatoire.".into());
        }
        if self.specialite.is_empty() {
            return Err("La spécialité est obligatoire.".into());
        }
        if self.specialite_code.is_empty() {
            return Err("Le code spécialité (salle) est obligatoire.".into());
        }
        if self.cycle.is_empty() {
            return Err("Le cycle est obligatoire.".into());
        }
        self.study_year
            .ok_or_else(|| "L’année d’étude est obligatoire.".to_string())
    }

    fn base_payload(&self, study_year: u8, title: &str) -> SubjectPayload {
        SubjectPayload {
            filiere: self.filiere.clone(),
            specialite: self.specialite.clone(),
            specialite_code: self.specialite_code.clone(),
            study_year,
            cycle: Some(self.cycle.clone()).filter(|c| !c.is_empty()),
            is_optional: self.is_optional,
            ue_label: title.to_string(),
            name: title.to_string(),
            label: title.to_string(),
            ec_title: None,
            credits: None,
            coefficient: None,
        }
    }

    /// Valide le formulaire ; le premier message d'erreur est renvoyé
    pub fn submit(&self) -> Result<SubjectSubmission, String> {
        let study_year = self.validate_common()?;

        if self.bulk && !self.is_edit() {
            let titles: Vec<&str> = self
                .ue_rows
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .collect();
            if titles.is_empty() {
                return Err(UE_REQUIRED.into());
            }
            return Ok(SubjectSubmission::Bulk(
                titles
                    .into_iter()
                    .map(|t| self.base_payload(study_year, t))
                    .collect(),
            ));
        }

        let title = self.ue_title.trim();
        if title.is_empty() {
            return Err(UE_REQUIRED.into());
        }
        let coefficient = parse_decimal(&self.coefficient, "Le coefficient doit être un nombre.")?;
        let credits = parse_decimal(&self.credits, "Le crédit doit être un nombre.")?;

        let mut payload = self.base_payload(study_year, title);
        payload.ec_title = Some(self.ec_title.trim().to_string()).filter(|t| !t.is_empty());
        payload.coefficient = coefficient;
        payload.credits = credits;

        Ok(match &self.id {
            Some(id) => SubjectSubmission::Update {
                id: id.clone(),
                payload,
            },
            None => SubjectSubmission::Create(payload),
        })
    }
}

/// Nombre décimal optionnel, la virgule est acceptée
pub fn parse_decimal(raw: &str, error: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.replace(',', ".")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| error.to_string())
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::dictionaries::FILIERE_GESTION;

    fn scoped() -> SubjectForm {
        SubjectForm::new()
            .on_filiere_change(FILIERE_GESTION)
            .on_specialite_select("Comptabilité et Gestion des Entreprises")
            .on_cycle_change("BTS")
            .pick_year(1)
    }

    #[test]
    fn test_single_create_with_comma_decimal() {
        let mut form = scoped();
        form.ue_title = " Comptabilité générale ".into();
        form.coefficient = "2,5".into();
        form.credits = "4".into();
        match form.submit().unwrap() {
            SubjectSubmission::Create(p) => {
                assert_eq!(p.specialite_code, "CGE");
                assert_eq!(p.ue_label, "Comptabilité générale");
                assert_eq!(p.label, p.name);
                assert_eq!(p.coefficient, Some(2.5));
                assert_eq!(p.credits, Some(4.0));
                assert_eq!(p.ec_title, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let mut form = scoped();
        form.ue_title = "Audit".into();
        form.coefficient = "deux".into();
        assert_eq!(form.submit().unwrap_err(), "Le coefficient doit être un nombre.");
        form.coefficient = String::new();
        form.credits = "x".into();
        assert_eq!(form.submit().unwrap_err(), "Le crédit doit être un nombre.");
    }

    #[test]
    fn test_validation_order() {
        assert_eq!(SubjectForm::new().submit().unwrap_err(), "La filière est obligatoire.");
        let form = SubjectForm::new().on_filiere_change(FILIERE_GESTION);
        assert_eq!(form.submit().unwrap_err(), "La spécialité est obligatoire.");
        let form = scoped().pick_year(1);
        assert_eq!(form.submit().unwrap_err(), "L’année d’étude est obligatoire.");
        assert_eq!(scoped().submit().unwrap_err(), UE_REQUIRED);
    }

    #[test]
    fn test_bulk_skips_blank_titles() {
        let form = scoped()
            .set_bulk(true)
            .update_ue_row(0, "Droit")
            .add_ue_row()
            .add_ue_row()
            .update_ue_row(2, "  Économie ");
        match form.submit().unwrap() {
            SubjectSubmission::Bulk(list) => {
                assert_eq!(list.len(), 2);
                assert_eq!(list[1].ue_label, "Économie");
                assert!(list.iter().all(|p| p.coefficient.is_none()));
            }
            other => panic!("unexpected {:?}", other),
        }
        let empty = scoped().set_bulk(true);
        assert_eq!(empty.submit().unwrap_err(), UE_REQUIRED);
    }

    #[test]
    fn test_last_row_kept() {
        let form = SubjectForm::new().remove_ue_row(0);
        assert_eq!(form.ue_rows.len(), 1);
    }

    #[test]
    fn test_industrial_option_becomes_room_code() {
        let form = SubjectForm::new()
            .on_filiere_change(FILIERE_INDUSTRIELLE)
            .on_specialite_select("Génie Civil")
            .on_option_select("Bâtiment");
        assert_eq!(form.specialite, "Bâtiment");
        assert_eq!(form.specialite_code, "BAT");
        assert_eq!(form.specialite_parent, "Génie Civil");
    }

    #[test]
    fn test_edit_rehydrates_industrial_parent() {
        let subject = Subject {
            id: "7".into(),
            ue_label: Some("Topographie".into()),
            filiere: Some(FILIERE_INDUSTRIELLE.into()),
            specialite: Some("Bâtiment".into()),
            coefficient: Some(3.0),
            ..Default::default()
        };
        let form = SubjectForm::from_subject(&subject);
        assert_eq!(form.specialite_parent, "Génie Civil");
        assert_eq!(form.option_code, "BAT");
        assert_eq!(form.coefficient, "3");
        assert!(matches!(form.submit(), Err(_)));
    }
}
