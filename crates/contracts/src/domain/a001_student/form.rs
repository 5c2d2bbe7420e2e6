//! Formulaire d'inscription et d'édition d'un étudiant.
//!
//! L'état du formulaire est un enregistrement explicite ; chaque transition
//! est une fonction pure qui consomme l'état et renvoie le nouvel état.
//! Les remises à zéro en cascade (filière → spécialité → option,
//! cycle → année, région → département) passent par un marqueur de valeur
//! précédente : elles ne se déclenchent que sur un vrai changement, jamais
//! sur le chargement d'un enregistrement existant.

use super::aggregate::{EnrollmentDetails, Student, StudentPayload};
use super::phone::{contact_for_submit, normalize_phone_input, PHONE_PREFIX};
use crate::shared::dictionaries::cycles::{diploma_options, is_year_allowed};
use crate::shared::dictionaries::programs::{filiere_def, hydrate, ProgramChoice};
use crate::shared::dictionaries::regions::is_department_of;
use crate::shared::dictionaries::roles::NO_ROLE;
use crate::shared::dictionaries::DEFAULT_ACADEMIC_YEAR;
use crate::shared::error::FieldErrors;

pub const REQUIRED: &str = "Champ obligatoire";
pub const STUDY_YEAR_REQUIRED: &str = "Sélectionnez une année d’étude";
pub const FEE_LOCKED_NOTE: &str = "Déjà payé : impossible de revenir à « Non payé ».";
pub const MAX_PHOTO_BYTES: u64 = 2 * 1024 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

/// Champs d'identité, figés en édition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    LastName,
    FirstName,
    BirthDate,
    AcademicYear,
}

/// Dernières valeurs vues pour les sélections en cascade
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviousValues {
    pub filiere: Option<String>,
    pub specialite: Option<String>,
    pub cycle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentForm {
    pub mode: FormMode,
    pub id: Option<String>,

    pub last_name: String,
    pub first_name: String,
    pub birth_date: String,
    pub academic_year: String,

    pub program: ProgramChoice,
    pub cycle: String,
    pub study_year: Option<u8>,

    pub contact: String,
    pub email: String,
    pub class_role: String,
    pub school_role: String,
    pub registration_fee_paid: bool,
    /// Frais déjà payés au chargement : le retour à « Non payé » est interdit
    pub fee_locked: bool,
    pub photo_url: String,

    pub birth_place: String,
    pub details: EnrollmentDetails,

    pub previous: PreviousValues,
}

impl StudentForm {
    /// Formulaire vierge d'inscription
    pub fn new_enrollment(default_academic_year: Option<&str>) -> Self {
        Self {
            mode: FormMode::Create,
            academic_year: default_academic_year.unwrap_or(DEFAULT_ACADEMIC_YEAR).to_string(),
            contact: PHONE_PREFIX.to_string(),
            class_role: NO_ROLE.to_string(),
            school_role: NO_ROLE.to_string(),
            previous: PreviousValues {
                filiere: Some(String::new()),
                specialite: Some(String::new()),
                cycle: Some(String::new()),
            },
            ..Self::default()
        }
    }

    /// Formulaire d'édition hydraté depuis un enregistrement existant.
    ///
    /// Les marqueurs de valeur précédente sont positionnés sur les valeurs
    /// chargées : la première notification de sélection ne vide rien.
    pub fn from_student(student: &Student) -> Self {
        let program = hydrate(&student.program_choice());
        let cycle = student.cycle.clone().unwrap_or_default();
        let contact = match student.contact.as_deref() {
            Some(c) if !c.trim().is_empty() => normalize_phone_input(c),
            _ => PHONE_PREFIX.to_string(),
        };

        Self {
            mode: FormMode::Edit,
            id: Some(student.id.clone()),
            last_name: student.last_name.clone(),
            first_name: student.first_name.clone(),
            birth_date: student.birth_date.clone().unwrap_or_default(),
            academic_year: student.academic_year.clone().unwrap_or_default(),
            previous: PreviousValues {
                filiere: Some(program.filiere.clone()),
                specialite: Some(program.specialite.clone()),
                cycle: Some(cycle.clone()),
            },
            program,
            cycle,
            study_year: student.study_year,
            contact,
            email: student.email.clone().unwrap_or_default(),
            class_role: student
                .class_role
                .clone()
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| NO_ROLE.to_string()),
            school_role: student
                .school_role
                .clone()
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| NO_ROLE.to_string()),
            registration_fee_paid: student.registration_fee_paid,
            fee_locked: student.registration_fee_paid,
            photo_url: student.photo_url.clone().unwrap_or_default(),
            birth_place: student.birth_place.clone().unwrap_or_default(),
            details: student.enrollment.clone(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.mode == FormMode::Edit
    }

    pub fn is_identity_locked(&self) -> bool {
        self.is_edit()
    }

    pub fn is_industrial(&self) -> bool {
        filiere_def(&self.program.filiere)
            .map(|f| f.is_industrial())
            .unwrap_or(false)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    pub fn set_identity(mut self, field: IdentityField, value: &str) -> Self {
        if self.is_identity_locked() {
            return self;
        }
        let value = value.to_string();
        match field {
            IdentityField::LastName => self.last_name = value,
            IdentityField::FirstName => self.first_name = value,
            IdentityField::BirthDate => self.birth_date = value,
            IdentityField::AcademicYear => self.academic_year = value,
        }
        self
    }

    /// Filière changée : spécialité, option et codes vidés si la valeur change
    pub fn on_filiere_change(mut self, filiere: &str) -> Self {
        let changed = self.previous.filiere.as_deref() != Some(filiere);
        self.program.filiere = filiere.to_string();
        if changed {
            self.program.specialite.clear();
            self.program.specialite_code.clear();
            self.program.option.clear();
            self.program.option_code.clear();
            self.previous.specialite = Some(String::new());
        }
        self.previous.filiere = Some(filiere.to_string());
        self
    }

    /// Spécialité choisie : le code apparié est toujours repris du dictionnaire.
    /// En industriel, l'option est vidée si la spécialité parente change.
    pub fn on_specialite_change(mut self, specialite: &str) -> Self {
        let changed = self.previous.specialite.as_deref() != Some(specialite);
        let Some(def) = filiere_def(&self.program.filiere) else {
            return self;
        };

        let code = def
            .specialite(specialite)
            .map(|s| s.code.to_string())
            .unwrap_or_default();
        self.program.specialite = specialite.to_string();
        self.program.specialite_code = code;

        if !def.is_industrial() || changed {
            self.program.option.clear();
            self.program.option_code.clear();
        }
        self.previous.specialite = Some(specialite.to_string());
        self
    }

    /// Option choisie sous la spécialité parente courante
    pub fn on_option_change(mut self, option: &str) -> Self {
        let Some(def) = filiere_def(&self.program.filiere).filter(|f| f.is_industrial()) else {
            return self;
        };
        let entry = def
            .options_of(&self.program.specialite)
            .iter()
            .find(|o| o.label == option);
        match entry {
            Some(o) => {
                self.program.option = o.label.to_string();
                self.program.option_code = o.code.to_string();
            }
            None => {
                self.program.option.clear();
                self.program.option_code.clear();
            }
        }
        self
    }

    /// Cycle changé : année d'étude et diplôme présenté remis à zéro
    pub fn on_cycle_change(mut self, cycle: &str) -> Self {
        let changed = self.previous.cycle.as_deref() != Some(cycle);
        self.cycle = cycle.to_string();
        if changed {
            self.study_year = None;
            self.details.diploma_presented = None;
        }
        self.previous.cycle = Some(cycle.to_string());
        self
    }

    /// Une seule année active : re-cliquer l'année la désélectionne,
    /// une année hors du cycle est ignorée.
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

    /// Région changée : le département est vidé s'il n'en fait pas partie
    pub fn on_region_change(mut self, region: &str) -> Self {
        let region = region.trim();
        self.details.region_origine = if region.is_empty() {
            None
        } else {
            Some(region.to_string())
        };
        let keep = self
            .details
            .departement_origine
            .as_deref()
            .map(|d| is_department_of(region, d))
            .unwrap_or(false);
        if !keep {
            self.details.departement_origine = None;
        }
        self
    }

    /// Un département hors de la région courante n'est jamais retenu
    pub fn on_department_change(mut self, department: &str) -> Self {
        let region = self.details.region_origine.clone().unwrap_or_default();
        self.details.departement_origine = if is_department_of(&region, department) {
            Some(department.to_string())
        } else {
            None
        };
        self
    }

    /// Frais d'inscription : une fois payés au chargement, ne reviennent plus à faux
    pub fn set_fee_paid(mut self, paid: bool) -> Self {
        if self.fee_locked && !paid {
            return self;
        }
        self.registration_fee_paid = paid;
        self
    }

    pub fn set_contact(mut self, raw: &str) -> Self {
        self.contact = normalize_phone_input(raw);
        self
    }

    pub fn set_has_job(mut self, has_job: bool) -> Self {
        self.details.has_job = has_job;
        if !has_job {
            self.details.job_detail = None;
        }
        self
    }

    pub fn set_has_disease(mut self, has_disease: bool) -> Self {
        self.details.has_disease = has_disease;
        if !has_disease {
            self.details.disease_detail = None;
        }
        self
    }

    /// Photo embarquée en data URL : image uniquement, 2 Mo au plus
    pub fn set_photo(mut self, mime: &str, size: u64, data_url: String) -> Result<Self, String> {
        validate_photo(mime, size)?;
        self.photo_url = data_url;
        Ok(self)
    }

    pub fn clear_photo(mut self) -> Self {
        self.photo_url.clear();
        self
    }

    // ========================================================================
    // Lectures
    // ========================================================================

    pub fn allowed_years(&self) -> &'static [u8] {
        crate::shared::dictionaries::allowed_years(&self.cycle)
    }

    pub fn diploma_options(&self) -> &'static [&'static str] {
        diploma_options(&self.cycle)
    }

    // ========================================================================
    // Validation et envoi
    // ========================================================================

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.last_name.trim().is_empty() {
            errors.add("lastName", REQUIRED);
        }
        if self.first_name.trim().is_empty() {
            errors.add("firstName", REQUIRED);
        }
        if self.birth_date.trim().is_empty() {
            errors.add("birthDate", REQUIRED);
        }
        if self.academic_year.trim().is_empty() {
            errors.add("academicYear", REQUIRED);
        }
        if self.program.filiere.trim().is_empty() {
            errors.add("filiere", REQUIRED);
        }
        if self.program.specialite.trim().is_empty() {
            errors.add("specialite", REQUIRED);
        }
        if self.cycle.trim().is_empty() {
            errors.add("cycle", REQUIRED);
        }
        if self.study_year.is_none() {
            errors.add("studyYear", STUDY_YEAR_REQUIRED);
        }
        errors.into_result()
    }

    /// Valide puis construit le corps de requête (chaînes vides → null)
    pub fn to_payload(&self) -> Result<StudentPayload, FieldErrors> {
        self.validate()?;
        let study_year = match self.study_year {
            Some(y) => y,
            None => {
                let mut errors = FieldErrors::new();
                errors.add("studyYear", STUDY_YEAR_REQUIRED);
                return Err(errors);
            }
        };

        let mut details = self.details.clone();
        details.job_detail = if details.has_job { opt(details.job_detail.as_deref()) } else { None };
        details.disease_detail = if details.has_disease {
            opt(details.disease_detail.as_deref())
        } else {
            None
        };
        details.living_language = opt(details.living_language.as_deref());
        details.bac_serie = opt(details.bac_serie.as_deref());
        details.quartier_habitation = opt(details.quartier_habitation.as_deref());
        details.region_origine = opt(details.region_origine.as_deref());
        details.departement_origine = opt(details.departement_origine.as_deref());
        details.canal = opt(details.canal.as_deref());
        details.emergency_name = opt(details.emergency_name.as_deref());
        details.emergency_address = opt(details.emergency_address.as_deref());
        details.emergency_phone = opt(details.emergency_phone.as_deref());
        details.emergency_profession = opt(details.emergency_profession.as_deref());
        details.emergency_relation = opt(details.emergency_relation.as_deref());
        details.last_school = opt(details.last_school.as_deref());
        details.last_diploma_year = opt(details.last_diploma_year.as_deref());
        details.diploma_presented = opt(details.diploma_presented.as_deref());

        Ok(StudentPayload {
            last_name: self.last_name.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            birth_date: self.birth_date.clone(),
            academic_year: self.academic_year.clone(),
            contact: opt(Some(&contact_for_submit(&self.contact))),
            email: opt(Some(&self.email)),
            cycle: self.cycle.clone(),
            study_year,
            filiere: self.program.filiere.clone(),
            specialite: opt(Some(&self.program.specialite)),
            specialite_code: opt(Some(&self.program.specialite_code)),
            option: opt(Some(&self.program.option)),
            option_code: opt(Some(&self.program.option_code)),
            class_role: non_empty_or_none_role(&self.class_role),
            school_role: non_empty_or_none_role(&self.school_role),
            registration_fee_paid: self.registration_fee_paid || self.fee_locked,
            photo_url: opt(Some(&self.photo_url)),
            birth_place: opt(Some(&self.birth_place)),
            enrollment: details,
        })
    }
}

pub fn validate_photo(mime: &str, size: u64) -> Result<(), String> {
    if !mime.starts_with("image/") {
        return Err("Le fichier doit être une image.".to_string());
    }
    if size > MAX_PHOTO_BYTES {
        return Err("La photo ne doit pas dépasser 2 Mo.".to_string());
    }
    Ok(())
}

fn opt(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn non_empty_or_none_role(role: &str) -> String {
    if role.trim().is_empty() {
        NO_ROLE.to_string()
    } else {
        role.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::dictionaries::{FILIERE_GESTION, FILIERE_INDUSTRIELLE};

    fn filled_form() -> StudentForm {
        StudentForm::new_enrollment(None)
            .set_identity(IdentityField::LastName, "Nkomo")
            .set_identity(IdentityField::FirstName, "Paul")
            .set_identity(IdentityField::BirthDate, "2004-05-17")
            .on_filiere_change(FILIERE_INDUSTRIELLE)
            .on_specialite_change("Génie Civil")
            .on_option_change("Bâtiment")
            .on_cycle_change("BTS")
            .pick_year(1)
    }

    #[test]
    fn test_industrial_enrollment_payload() {
        let payload = filled_form().to_payload().unwrap();
        assert_eq!(payload.specialite.as_deref(), Some("Génie Civil"));
        assert_eq!(payload.specialite_code, None);
        assert_eq!(payload.option_code.as_deref(), Some("BAT"));
        assert_eq!(payload.study_year, 1);
        assert_eq!(payload.contact, None);
        assert_eq!(payload.class_role, "Aucune");
        assert_eq!(payload.academic_year, "2025-2026");
    }

    #[test]
    fn test_filiere_change_resets_dependents() {
        let form = filled_form().on_filiere_change(FILIERE_GESTION);
        assert_eq!(form.program.specialite, "");
        assert_eq!(form.program.option_code, "");
    }

    #[test]
    fn test_same_filiere_notification_keeps_selection() {
        let form = filled_form().on_filiere_change(FILIERE_INDUSTRIELLE);
        assert_eq!(form.program.option_code, "BAT");
    }

    #[test]
    fn test_specialite_change_resets_option_only_when_changed() {
        let same = filled_form().on_specialite_change("Génie Civil");
        assert_eq!(same.program.option, "Bâtiment");
        let other = filled_form().on_specialite_change("Génie Thermique");
        assert_eq!(other.program.option, "");
        assert_eq!(other.program.option_code, "");
    }

    #[test]
    fn test_edit_hydration_does_not_reset() {
        let student = Student {
            id: "5".into(),
            last_name: "Abena".into(),
            first_name: "Marie".into(),
            filiere: Some(FILIERE_INDUSTRIELLE.into()),
            option_code: Some("GLI".into()),
            cycle: Some("BTS".into()),
            study_year: Some(2),
            ..Default::default()
        };
        let form = StudentForm::from_student(&student)
            .on_filiere_change(FILIERE_INDUSTRIELLE)
            .on_specialite_change("Génie Informatique")
            .on_cycle_change("BTS");
        assert_eq!(form.program.option, "Génie Logiciel");
        assert_eq!(form.study_year, Some(2));
        let changed = form.on_filiere_change(FILIERE_GESTION);
        assert_eq!(changed.program.option_code, "");
    }

    #[test]
    fn test_cycle_change_resets_year_and_diploma() {
        let mut form = filled_form();
        form.details.diploma_presented = Some("BEPC".into());
        let form = form.on_cycle_change("LICENCE");
        assert_eq!(form.study_year, None);
        assert_eq!(form.details.diploma_presented, None);
    }

    #[test]
    fn test_pick_year_rules() {
        let form = StudentForm::new_enrollment(None).on_cycle_change("LICENCE");
        let form = form.pick_year(1);
        assert_eq!(form.study_year, None);
        let form = form.pick_year(3);
        assert_eq!(form.study_year, Some(3));
        let form = form.pick_year(3);
        assert_eq!(form.study_year, None);
    }

    #[test]
    fn test_region_change_clears_foreign_department() {
        let form = StudentForm::new_enrollment(None)
            .on_region_change("Littoral")
            .on_department_change("Wouri");
        assert_eq!(form.details.departement_origine.as_deref(), Some("Wouri"));
        let form = form.on_region_change("Centre");
        assert_eq!(form.details.departement_origine, None);
        let form = form.on_department_change("Wouri");
        assert_eq!(form.details.departement_origine, None);
    }

    #[test]
    fn test_fee_is_monotonic_in_edit() {
        let student = Student {
            registration_fee_paid: true,
            ..Default::default()
        };
        let form = StudentForm::from_student(&student).set_fee_paid(false);
        assert!(form.registration_fee_paid);
        let fresh = StudentForm::new_enrollment(None).set_fee_paid(true).set_fee_paid(false);
        assert!(!fresh.registration_fee_paid);
    }

    #[test]
    fn test_identity_locked_in_edit() {
        let student = Student {
            last_name: "Abena".into(),
            ..Default::default()
        };
        let form = StudentForm::from_student(&student).set_identity(IdentityField::LastName, "X");
        assert_eq!(form.last_name, "Abena");
    }

    #[test]
    fn test_validation_reports_each_missing_field() {
        let errors = StudentForm::new_enrollment(None).validate().unwrap_err();
        assert_eq!(errors.get("lastName"), Some(REQUIRED));
        assert_eq!(errors.get("studyYear"), Some(STUDY_YEAR_REQUIRED));
        assert_eq!(errors.get("academicYear"), None);
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn test_job_toggle_clears_detail() {
        let mut form = StudentForm::new_enrollment(None).set_has_job(true);
        form.details.job_detail = Some("Vendeur".into());
        let form = form.set_has_job(false);
        assert_eq!(form.details.job_detail, None);
    }

    #[test]
    fn test_photo_validation() {
        assert!(validate_photo("image/png", 1024).is_ok());
        assert!(validate_photo("application/pdf", 1024).is_err());
        assert!(validate_photo("image/jpeg", MAX_PHOTO_BYTES + 1).is_err());
    }
}
