use crate::domain::common::AggregateRoot;
use crate::shared::dictionaries::ProgramChoice;
use crate::shared::serde_utils::{bool_lenient, id_lenient, opt_string_lenient, opt_u8_lenient};
use crate::shared::text::format_full_name;
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Étudiant tel que renvoyé par `GET /students`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, deserialize_with = "id_lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_lenient")]
    pub matricule: Option<String>,

    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub birth_place: Option<String>,

    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default)]
    pub cycle: Option<String>,
    #[serde(default, deserialize_with = "opt_u8_lenient")]
    pub study_year: Option<u8>,

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
    pub contact: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub class_role: Option<String>,
    #[serde(default)]
    pub school_role: Option<String>,
    #[serde(default, deserialize_with = "bool_lenient")]
    pub registration_fee_paid: bool,
    #[serde(default)]
    pub photo_url: Option<String>,

    #[serde(flatten)]
    pub enrollment: EnrollmentDetails,
}

/// Champs de la fiche d'inscription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDetails {
    #[serde(default)]
    pub living_language: Option<String>,
    #[serde(default)]
    pub bac_serie: Option<String>,
    #[serde(default)]
    pub quartier_habitation: Option<String>,
    #[serde(default)]
    pub region_origine: Option<String>,
    #[serde(default)]
    pub departement_origine: Option<String>,
    #[serde(default)]
    pub canal: Option<String>,
    #[serde(default, deserialize_with = "bool_lenient")]
    pub has_job: bool,
    #[serde(default)]
    pub job_detail: Option<String>,
    #[serde(default, deserialize_with = "bool_lenient")]
    pub has_disease: bool,
    #[serde(default)]
    pub disease_detail: Option<String>,
    #[serde(default)]
    pub emergency_name: Option<String>,
    #[serde(default)]
    pub emergency_address: Option<String>,
    #[serde(default)]
    pub emergency_phone: Option<String>,
    #[serde(default)]
    pub emergency_profession: Option<String>,
    #[serde(default)]
    pub emergency_relation: Option<String>,
    #[serde(default)]
    pub last_school: Option<String>,
    #[serde(default, deserialize_with = "opt_string_lenient")]
    pub last_diploma_year: Option<String>,
    #[serde(default)]
    pub diploma_presented: Option<String>,
}

impl Student {
    /// "NOM Prénoms"
    pub fn full_name(&self) -> String {
        format_full_name(&self.last_name, &self.first_name)
    }

    /// Clé de tri « nom prénom » en minuscules
    pub fn sort_key(&self) -> String {
        format!("{} {}", self.last_name.trim(), self.first_name.trim()).to_lowercase()
    }

    pub fn program_choice(&self) -> ProgramChoice {
        ProgramChoice {
            filiere: self.filiere.clone().unwrap_or_default(),
            specialite: self.specialite.clone().unwrap_or_default(),
            specialite_code: self.specialite_code.clone().unwrap_or_default(),
            option: self.option.clone().unwrap_or_default(),
            option_code: self.option_code.clone().unwrap_or_default(),
        }
    }

    /// Libellé de spécialité affichable : l'option pour l'industriel
    pub fn specialite_display(&self) -> String {
        crate::shared::text::first_non_empty([self.option.as_deref(), self.specialite.as_deref()])
            .unwrap_or_default()
            .to_string()
    }

    pub fn has_matricule(&self) -> bool {
        self.matricule
            .as_deref()
            .map(|m| !m.trim().is_empty())
            .unwrap_or(false)
    }

    /// Correspondance de la recherche locale (nom, prénom, matricule)
    pub fn matches_search(&self, query: &str) -> bool {
        let q = crate::shared::text::normalize(query);
        if q.is_empty() {
            return true;
        }
        let haystack = crate::shared::text::normalize(&format!(
            "{} {} {}",
            self.last_name,
            self.first_name,
            self.matricule.as_deref().unwrap_or_default()
        ));
        haystack.contains(&q)
    }
}

impl AggregateRoot for Student {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> String {
        self.full_name()
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "students"
    }

    fn element_name() -> &'static str {
        "Étudiant"
    }

    fn list_name() -> &'static str {
        "Étudiants"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Corps de `POST /students` et `PUT /students/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub last_name: String,
    pub first_name: String,
    pub birth_date: String,
    pub academic_year: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub cycle: String,
    pub study_year: u8,
    pub filiere: String,
    pub specialite: Option<String>,
    pub specialite_code: Option<String>,
    pub option: Option<String>,
    pub option_code: Option<String>,
    pub class_role: String,
    pub school_role: String,
    pub registration_fee_paid: bool,
    pub photo_url: Option<String>,
    pub birth_place: Option<String>,
    #[serde(flatten)]
    pub enrollment: EnrollmentDetails,
}

/// Réponse de `POST /students`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStudentResponse {
    #[serde(default, deserialize_with = "id_lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_lenient")]
    pub matricule: Option<String>,
}

impl CreateStudentResponse {
    /// Message affiché après la création
    pub fn confirmation_message(&self) -> String {
        match self.matricule.as_deref().filter(|m| !m.trim().is_empty()) {
            Some(m) => format!("Étudiant créé.\nMatricule: {}", m),
            None => "Étudiant créé.\nMatricule non généré (frais d’inscription non payés).".to_string(),
        }
    }
}

/// Corps d'erreur renvoyé par le backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Filtre « inscrits / non inscrits » de la liste des étudiants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeeFilter {
    #[default]
    All,
    Paid,
    Unpaid,
}

impl FeeFilter {
    pub fn accepts(&self, student: &Student) -> bool {
        match self {
            FeeFilter::All => true,
            FeeFilter::Paid => student.registration_fee_paid,
            FeeFilter::Unpaid => !student.registration_fee_paid,
        }
    }
}

/// Compteurs affichés dans l'en-tête de la liste
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeCounts {
    pub all: usize,
    pub paid: usize,
    pub unpaid: usize,
}

impl FeeCounts {
    pub fn compute(students: &[Student]) -> Self {
        let paid = students.iter().filter(|s| s.registration_fee_paid).count();
        Self {
            all: students.len(),
            paid,
            unpaid: students.len() - paid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_student() {
        let json = r#"{
            "id": 12, "matricule": "IPM25BAT001", "lastName": "Nkomo", "firstName": "Paul",
            "cycle": "BTS", "studyYear": "1", "filiere": "Filières industrielles",
            "specialite": "Génie Civil", "specialiteCode": "", "option": "Bâtiment", "optionCode": "BAT",
            "registrationFeePaid": true, "hasJob": false, "regionOrigine": "Centre"
        }"#;
        let s: Student = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, "12");
        assert_eq!(s.study_year, Some(1));
        assert_eq!(s.full_name(), "NKOMO Paul");
        assert_eq!(s.enrollment.region_origine.as_deref(), Some("Centre"));
        assert_eq!(s.specialite_display(), "Bâtiment");
        assert!(s.has_matricule());
    }

    #[test]
    fn test_create_response_message() {
        let with = CreateStudentResponse { id: "1".into(), matricule: Some("M1".into()) };
        assert!(with.confirmation_message().contains("M1"));
        let without = CreateStudentResponse { id: "1".into(), matricule: None };
        assert!(without.confirmation_message().contains("non généré"));
    }

    #[test]
    fn test_fee_filter_and_counts() {
        let paid = Student { registration_fee_paid: true, ..Default::default() };
        let unpaid = Student::default();
        let list = vec![paid.clone(), unpaid.clone(), unpaid.clone()];
        assert_eq!(FeeCounts::compute(&list), FeeCounts { all: 3, paid: 1, unpaid: 2 });
        assert!(FeeFilter::Paid.accepts(&paid));
        assert!(!FeeFilter::Paid.accepts(&unpaid));
        assert!(FeeFilter::All.accepts(&unpaid));
    }

    #[test]
    fn test_matches_search_ignores_accents() {
        let s = Student {
            last_name: "Éboa".into(),
            first_name: "Jean".into(),
            matricule: Some("IPM-01".into()),
            ..Default::default()
        };
        assert!(s.matches_search("eboa"));
        assert!(s.matches_search("ipm-01"));
        assert!(!s.matches_search("zzz"));
    }

    #[test]
    fn test_collection_paths() {
        assert_eq!(Student::collection_path(), "/students");
        assert_eq!(Student::item_path("7"), "/students/7");
    }
}
