//! Titres des onglets.
//!
//! Les listes d'entités reprennent `AggregateRoot::list_name()` ; les
//! tableaux de bord et pages d'action ont un titre fixe.

use contracts::domain::a001_student::Student;
use contracts::domain::a002_class::ClassRecord;
use contracts::domain::a003_subject::Subject;
use contracts::domain::common::AggregateRoot;

pub const TAB_OVERVIEW: &str = "d400_overview";
pub const TAB_STUDENTS: &str = "a001_student";
pub const TAB_CLASSES: &str = "a002_class";
pub const TAB_SUBJECTS: &str = "a003_subject";
pub const TAB_GRADES: &str = "a004_grade";
pub const TAB_DOCUMENTS: &str = "u501_documents";
pub const TAB_ATTENDANCE: &str = "u502_attendance";

pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        TAB_OVERVIEW => "Tableau de bord",
        TAB_STUDENTS => Student::list_name(),
        TAB_CLASSES => ClassRecord::list_name(),
        TAB_SUBJECTS => Subject::list_name(),
        TAB_GRADES => "Notes",
        TAB_DOCUMENTS => "Documents",
        TAB_ATTENDANCE => "Présences",
        _ => "Page inconnue",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key(TAB_STUDENTS), "Étudiants");
        assert_eq!(tab_label_for_key(TAB_ATTENDANCE), "Présences");
        assert_eq!(tab_label_for_key("x"), "Page inconnue");
    }
}
