use serde::{Deserialize, Serialize};

/// Réponse de `GET /dashboard/overview`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    #[serde(default)]
    pub active_students: u32,
    #[serde(default)]
    pub class_count: u32,
    /// Taux d'assiduité en pourcentage
    #[serde(default)]
    pub assiduite_rate: f64,
    #[serde(default)]
    pub documents_count: u32,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl DashboardOverview {
    /// "93.4%"
    pub fn assiduite_display(&self) -> String {
        format!("{:.1}%", self.assiduite_rate)
    }
}

/// Activité récente
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time: String,
}

/// Raccourcis du tableau de bord vers les autres sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    EnrollStudent,
    PrintDocuments,
    TakeAttendance,
}

impl QuickAction {
    pub fn all() -> [QuickAction; 3] {
        [
            QuickAction::EnrollStudent,
            QuickAction::PrintDocuments,
            QuickAction::TakeAttendance,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::EnrollStudent => "Inscrire un étudiant",
            QuickAction::PrintDocuments => "Éditer des documents",
            QuickAction::TakeAttendance => "Feuille de présence",
        }
    }

    /// Clé de la section ouverte
    pub fn target(&self) -> &'static str {
        match self {
            QuickAction::EnrollStudent => "a001_student",
            QuickAction::PrintDocuments => "u501_documents",
            QuickAction::TakeAttendance => "u502_attendance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let o: DashboardOverview = serde_json::from_str(r#"{"classCount": 12}"#).unwrap();
        assert_eq!(o.class_count, 12);
        assert_eq!(o.active_students, 0);
        assert!(o.activities.is_empty());
        assert_eq!(o.assiduite_display(), "0.0%");
    }

    #[test]
    fn test_rate_one_decimal() {
        let o = DashboardOverview {
            assiduite_rate: 93.44,
            ..Default::default()
        };
        assert_eq!(o.assiduite_display(), "93.4%");
    }
}
