//! Matières proposées à une classe.
//!
//! Une matière est retenue si son intitulé est renseigné et si chacun de ses
//! champs de portée (filière, cycle, année) est vide ou égal à celui de la
//! classe. Le code de salle n'est exigé que pour les matières obligatoires.

use super::aggregate::Subject;
use crate::domain::a002_class::ClassDescriptor;
use crate::shared::text::normalize;
use std::collections::HashSet;

fn scope_matches(subject_value: Option<&str>, class_value: &str) -> bool {
    match subject_value.map(str::trim) {
        None | Some("") => true,
        Some(v) => v == class_value.trim(),
    }
}

pub fn is_applicable(subject: &Subject, class: &ClassDescriptor) -> bool {
    if subject.display_label().is_empty() {
        return false;
    }
    if !scope_matches(subject.filiere.as_deref(), &class.filiere)
        || !scope_matches(subject.cycle.as_deref(), &class.cycle)
    {
        return false;
    }
    if let Some(year) = subject.study_year {
        if class.study_year != Some(year) {
            return false;
        }
    }

    if subject.is_optional {
        return true;
    }
    let ref_key = subject.ref_key();
    ref_key.is_empty() || ref_key == class.ref_key.trim()
}

/// Filtre, dédoublonne par intitulé (sans casse, le premier gagne) puis trie
pub fn subjects_for_class(subjects: &[Subject], class: &ClassDescriptor) -> Vec<Subject> {
    let mut seen = HashSet::new();
    let mut kept: Vec<Subject> = subjects
        .iter()
        .filter(|s| is_applicable(s, class))
        .filter(|s| seen.insert(s.display_label().to_lowercase()))
        .cloned()
        .collect();

    kept.sort_by(|a, b| {
        let (la, lb) = (a.display_label(), b.display_label());
        normalize(&la).cmp(&normalize(&lb)).then_with(|| la.cmp(&lb))
    });
    log::debug!("{} matière(s) retenue(s) sur {}", kept.len(), subjects.len());
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class() -> ClassDescriptor {
        ClassDescriptor {
            filiere: "Filières industrielles".into(),
            ref_key: "BAT".into(),
            cycle: "BTS".into(),
            study_year: Some(1),
        }
    }

    fn subject(label: &str, code: &str, optional: bool) -> Subject {
        Subject {
            id: label.into(),
            label: Some(label.into()),
            filiere: Some("Filières industrielles".into()),
            specialite_code: Some(code.into()),
            cycle: Some("BTS".into()),
            study_year: Some(1),
            is_optional: optional,
            ..Default::default()
        }
    }

    #[test]
    fn test_optional_subject_skips_ref_key() {
        assert!(is_applicable(&subject("Anglais", "GLI", true), &class()));
    }

    #[test]
    fn test_mandatory_subject_with_other_ref_key_excluded() {
        assert!(!is_applicable(&subject("Algorithmique", "GLI", false), &class()));
        assert!(is_applicable(&subject("Topographie", "BAT", false), &class()));
        assert!(is_applicable(&subject("Mathématiques", "", false), &class()));
    }

    #[test]
    fn test_scope_mismatch_excluded() {
        let mut s = subject("Topographie", "BAT", true);
        s.study_year = Some(2);
        assert!(!is_applicable(&s, &class()));

        let mut s = subject("Topographie", "BAT", true);
        s.filiere = Some("Filières de gestion".into());
        assert!(!is_applicable(&s, &class()));

        let mut s = subject("Topographie", "BAT", false);
        s.cycle = Some(" BTS ".into());
        s.filiere = None;
        assert!(is_applicable(&s, &class()));
    }

    #[test]
    fn test_cycle_compared_exactly() {
        let mut s = subject("Topographie", "BAT", false);
        s.cycle = Some("bts".into());
        assert!(!is_applicable(&s, &class()));

        s.cycle = None;
        assert!(is_applicable(&s, &class()));
    }

    #[test]
    fn test_unlabelled_subject_excluded() {
        assert!(!is_applicable(&subject("  ", "BAT", false), &class()));
    }

    #[test]
    fn test_dedupe_case_insensitive_first_wins_and_sorted() {
        let mut first = subject("Maths", "", false);
        first.id = "first".into();
        let list = vec![
            subject("Physics", "", false),
            first,
            subject("maths", "", false),
        ];
        let out = subjects_for_class(&list, &class());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].display_label(), "Maths");
        assert_eq!(out[0].id, "first");
        assert_eq!(out[1].display_label(), "Physics");
    }
}
