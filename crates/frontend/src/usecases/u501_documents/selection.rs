//! Sélection d'étudiants pour les documents individuels et les badges.

use contracts::domain::a001_student::Student;
use contracts::domain::a002_class::{add_class_to_selection, ClassDescriptor};
use contracts::domain::a003_subject::{subjects_for_class, Subject};
use contracts::shared::documents::transcript::TranscriptItem;

/// Étudiant de référence : celui choisi, sinon le premier badge
pub fn anchor<'a>(selected: Option<&'a Student>, badges: &'a [Student]) -> Option<&'a Student> {
    selected.or_else(|| badges.first())
}

/// Ajoute ou retire un étudiant de la planche de badges
pub fn toggle_badge(badges: &mut Vec<Student>, student: &Student) {
    if let Some(pos) = badges.iter().position(|b| b.id == student.id) {
        badges.remove(pos);
    } else {
        badges.push(student.clone());
    }
}

/// Planche complétée par les camarades de classe de l'étudiant de
/// référence, dans l'ordre de la liste complète
pub fn with_classmates(
    all: &[Student],
    badges: &[Student],
    selected: Option<&Student>,
) -> Result<Vec<Student>, String> {
    let ids: Vec<String> = badges.iter().map(|b| b.id.clone()).collect();
    let merged = add_class_to_selection(all, &ids, anchor(selected, badges)).map_err(|e| e.to_string())?;
    Ok(all
        .iter()
        .filter(|s| merged.contains(&s.id))
        .cloned()
        .collect())
}

/// Libellé affiché à côté de la recherche
pub fn selection_label(selected: Option<&Student>, badge_count: usize) -> String {
    if badge_count > 0 {
        return format!("{} étudiant(s) sélectionné(s)", badge_count);
    }
    match selected {
        Some(s) => format!(
            "{} · {}",
            s.full_name(),
            s.matricule.as_deref().filter(|m| !m.is_empty()).unwrap_or("Sans matricule")
        ),
        None => "Aucun étudiant sélectionné".to_string(),
    }
}

/// Ligne secondaire d'un résultat de recherche
pub fn result_meta(s: &Student) -> String {
    let mut meta = format!(
        "{} · {}",
        s.matricule.as_deref().filter(|m| !m.is_empty()).unwrap_or("Sans matricule"),
        s.filiere.as_deref().unwrap_or_default()
    );
    let code = s
        .option_code
        .as_deref()
        .filter(|c| !c.is_empty())
        .or(s.specialite_code.as_deref().filter(|c| !c.is_empty()));
    if let Some(code) = code {
        meta.push_str(&format!(" · {}", code));
    }
    if let Some(cycle) = s.cycle.as_deref().filter(|c| !c.is_empty()) {
        meta.push_str(&format!(" · {}", cycle));
    }
    if let Some(year) = s.study_year {
        meta.push_str(&format!(" {}", year));
    }
    meta
}

/// UE de la classe de l'étudiant, sans note tant que les notes ne sont pas
/// publiées
pub fn transcript_items(subjects: &[Subject], student: &Student) -> Vec<TranscriptItem> {
    subjects_for_class(subjects, &ClassDescriptor::from(student))
        .iter()
        .enumerate()
        .map(|(i, s)| TranscriptItem {
            code: format!("UE{}", i + 1),
            title: s.display_label(),
            coefficient: s.coefficient.unwrap_or(1.0),
            note: None,
            credits: s.credits,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str, code: &str, year: u8) -> Student {
        Student {
            id: id.into(),
            last_name: format!("NOM{}", id),
            first_name: "Paul".into(),
            filiere: Some("Filières de gestion".into()),
            specialite_code: Some(code.into()),
            cycle: Some("BTS".into()),
            study_year: Some(year),
            ..Default::default()
        }
    }

    #[test]
    fn test_toggle_badge() {
        let a = student("1", "CGE", 1);
        let mut badges = Vec::new();
        toggle_badge(&mut badges, &a);
        assert_eq!(badges.len(), 1);
        toggle_badge(&mut badges, &a);
        assert!(badges.is_empty());
    }

    #[test]
    fn test_with_classmates_keeps_list_order() {
        let all = vec![student("1", "CGE", 1), student("2", "BAT", 1), student("3", "CGE", 1)];
        let badges = vec![all[2].clone()];
        let merged = with_classmates(&all, &badges, None).unwrap_or_default();
        let ids: Vec<&str> = merged.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_with_classmates_errors() {
        let all = vec![student("1", "CGE", 1), student("2", "BAT", 1)];
        assert_eq!(
            with_classmates(&all, &[], None),
            Err("Sélectionnez d'abord un étudiant.".to_string())
        );
        assert_eq!(
            with_classmates(&all, &[], Some(&all[1])),
            Err("Aucun autre membre de classe trouvé.".to_string())
        );
    }

    #[test]
    fn test_selection_label() {
        let a = student("1", "CGE", 1);
        assert_eq!(selection_label(None, 0), "Aucun étudiant sélectionné");
        assert_eq!(selection_label(Some(&a), 0), format!("{} · Sans matricule", a.full_name()));
        assert_eq!(selection_label(Some(&a), 3), "3 étudiant(s) sélectionné(s)");
    }

    #[test]
    fn test_result_meta() {
        let a = student("1", "CGE", 2);
        assert_eq!(result_meta(&a), "Sans matricule · Filières de gestion · CGE · BTS 2");
    }

    #[test]
    fn test_transcript_items() {
        let a = student("1", "CGE", 1);
        let subjects = vec![
            Subject {
                id: "s1".into(),
                label: Some("Comptabilité générale".into()),
                filiere: Some("Filières de gestion".into()),
                cycle: Some("bts".into()),
                study_year: Some(1),
                credits: Some(4.0),
                ..Default::default()
            },
            Subject {
                id: "s2".into(),
                label: Some("Droit du travail".into()),
                filiere: Some("Filières de gestion".into()),
                study_year: Some(2),
                ..Default::default()
            },
        ];
        let items = transcript_items(&subjects, &a);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, "UE1");
        assert_eq!(items[0].coefficient, 1.0);
        assert_eq!(items[0].credits, Some(4.0));
        assert!(items[0].note.is_none());
    }
}
