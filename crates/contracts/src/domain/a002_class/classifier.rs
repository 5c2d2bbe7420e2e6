//! Clé de classe et regroupement des étudiants.
//!
//! Deux étudiants sont camarades de classe si leurs clés sont égales :
//! `code::cycle::année`, le code étant l'option (industriel), sinon le code
//! de spécialité, sinon la filière.

use super::aggregate::ClassRecord;
use crate::domain::a001_student::Student;
use crate::shared::error::{ScolariteError, ScolariteResult};
use crate::shared::text::first_non_empty;
use std::collections::{BTreeMap, HashSet};

/// Tout ce qui porte une classification de programme
pub trait Classifiable {
    fn filiere(&self) -> Option<&str>;
    fn specialite_code(&self) -> Option<&str>;
    fn option_code(&self) -> Option<&str>;
    fn cycle(&self) -> Option<&str>;
    fn study_year(&self) -> Option<u8>;

    /// `optionCode || specialiteCode`
    fn ref_key(&self) -> String {
        first_non_empty([self.option_code(), self.specialite_code()])
            .unwrap_or_default()
            .to_string()
    }
}

/// Clé de classe ; chaîne vide si ni code ni filière
pub fn class_key<C: Classifiable + ?Sized>(item: &C) -> String {
    let head = match first_non_empty([item.option_code(), item.specialite_code(), item.filiere()]) {
        Some(h) => h,
        None => return String::new(),
    };
    let cycle = item.cycle().unwrap_or_default().trim().to_lowercase();
    let year = item
        .study_year()
        .map(|y| y.to_string())
        .unwrap_or_default();
    format!("{}::{}::{}", head, cycle, year)
}

impl Classifiable for Student {
    fn filiere(&self) -> Option<&str> {
        self.filiere.as_deref()
    }
    fn specialite_code(&self) -> Option<&str> {
        self.specialite_code.as_deref()
    }
    fn option_code(&self) -> Option<&str> {
        self.option_code.as_deref()
    }
    fn cycle(&self) -> Option<&str> {
        self.cycle.as_deref()
    }
    fn study_year(&self) -> Option<u8> {
        self.study_year
    }
}

impl Classifiable for ClassRecord {
    fn filiere(&self) -> Option<&str> {
        self.filiere.as_deref()
    }
    fn specialite_code(&self) -> Option<&str> {
        self.specialite_code.as_deref()
    }
    fn option_code(&self) -> Option<&str> {
        self.option_code.as_deref()
    }
    fn cycle(&self) -> Option<&str> {
        self.cycle.as_deref()
    }
    fn study_year(&self) -> Option<u8> {
        self.effective_study_year()
    }
}

/// Descripteur d'une classe pour le filtrage des matières
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub filiere: String,
    pub ref_key: String,
    pub cycle: String,
    pub study_year: Option<u8>,
}

impl ClassDescriptor {
    pub fn of<C: Classifiable + ?Sized>(item: &C) -> Self {
        Self {
            filiere: item.filiere().unwrap_or_default().trim().to_string(),
            ref_key: item.ref_key(),
            cycle: item.cycle().unwrap_or_default().trim().to_string(),
            study_year: item.study_year(),
        }
    }
}

impl From<&Student> for ClassDescriptor {
    fn from(s: &Student) -> Self {
        Self::of(s)
    }
}

impl From<&ClassRecord> for ClassDescriptor {
    fn from(c: &ClassRecord) -> Self {
        Self::of(c)
    }
}

/// Résultat d'un regroupement : classes par clé, et les inclassables à part
#[derive(Debug, Clone, Default)]
pub struct Grouping<'a, T> {
    pub groups: BTreeMap<String, Vec<&'a T>>,
    pub ungroupable: Vec<&'a T>,
}

pub fn group_by_class<'a, T, I>(items: I) -> Grouping<'a, T>
where
    T: Classifiable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut grouping = Grouping {
        groups: BTreeMap::new(),
        ungroupable: Vec::new(),
    };
    for item in items {
        let key = class_key(item);
        if key.is_empty() {
            grouping.ungroupable.push(item);
        } else {
            grouping.groups.entry(key).or_default().push(item);
        }
    }
    grouping
}

/// Ajoute à la sélection tous les camarades de classe de `anchor`.
///
/// Le résultat suit l'ordre de `all` ; les identifiants absents de `all`
/// sont abandonnés.
pub fn add_class_to_selection(
    all: &[Student],
    selected_ids: &[String],
    anchor: Option<&Student>,
) -> ScolariteResult<Vec<String>> {
    let anchor = anchor.ok_or(ScolariteError::NoSelection)?;
    let key = class_key(anchor);
    if key.is_empty() {
        return Err(ScolariteError::Ungroupable);
    }

    let classmates: Vec<&Student> = all.iter().filter(|s| class_key(*s) == key).collect();
    if !classmates.iter().any(|s| s.id != anchor.id) {
        return Err(ScolariteError::NoClassmates);
    }

    let mut ids: HashSet<&str> = selected_ids.iter().map(String::as_str).collect();
    ids.insert(anchor.id.as_str());
    ids.extend(classmates.iter().map(|s| s.id.as_str()));

    Ok(all
        .iter()
        .filter(|s| ids.contains(s.id.as_str()))
        .map(|s| s.id.clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::dictionaries::{hydrate, ProgramChoice, FILIERE_INDUSTRIELLE};

    fn student(id: &str, code: &str, cycle: &str, year: u8) -> Student {
        Student {
            id: id.into(),
            last_name: format!("NOM{}", id),
            filiere: Some("Filières de gestion".into()),
            specialite_code: Some(code.into()),
            cycle: Some(cycle.into()),
            study_year: Some(year),
            ..Default::default()
        }
    }

    #[test]
    fn test_class_key_industrial_scenario() {
        let choice = hydrate(&ProgramChoice {
            filiere: FILIERE_INDUSTRIELLE.into(),
            specialite: "Génie Civil".into(),
            option: "Bâtiment".into(),
            ..Default::default()
        });
        assert_eq!(choice.specialite_code, "");
        assert_eq!(choice.option_code, "BAT");

        let s = Student {
            filiere: Some(choice.filiere),
            specialite: Some(choice.specialite),
            option: Some(choice.option),
            option_code: Some(choice.option_code),
            cycle: Some("BTS".into()),
            study_year: Some(1),
            ..Default::default()
        };
        assert_eq!(class_key(&s), "BAT::bts::1");
    }

    #[test]
    fn test_class_key_case_insensitive_on_cycle() {
        let a = student("1", "CGE", "LICENCE", 3);
        let b = student("2", "CGE", "licence", 3);
        assert_eq!(class_key(&a), class_key(&b));
        assert_eq!(class_key(&a), class_key(&a));
    }

    #[test]
    fn test_class_key_falls_back_to_filiere_then_empty() {
        let mut s = student("1", "", "BTS", 2);
        assert_eq!(class_key(&s), "Filières de gestion::bts::2");
        s.filiere = None;
        assert_eq!(class_key(&s), "");
    }

    #[test]
    fn test_group_by_class_separates_ungroupable() {
        let mut lost = student("3", "", "BTS", 1);
        lost.filiere = None;
        let list = vec![student("1", "CGE", "BTS", 1), student("2", "CGE", "bts", 1), lost];
        let g = group_by_class(&list);
        assert_eq!(g.groups.len(), 1);
        assert_eq!(g.groups["CGE::bts::1"].len(), 2);
        assert_eq!(g.ungroupable.len(), 1);
    }

    #[test]
    fn test_add_class_keeps_full_list_order() {
        let all = vec![
            student("1", "CGE", "BTS", 1),
            student("2", "MKT", "BTS", 1),
            student("3", "CGE", "BTS", 1),
            student("4", "CGE", "BTS", 2),
        ];
        let selected = vec!["2".to_string(), "3".to_string()];
        let ids = add_class_to_selection(&all, &selected, Some(&all[2])).unwrap();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_add_class_errors() {
        let all = vec![student("1", "CGE", "BTS", 1), student("2", "MKT", "BTS", 1)];
        assert!(matches!(
            add_class_to_selection(&all, &[], None),
            Err(ScolariteError::NoSelection)
        ));
        assert!(matches!(
            add_class_to_selection(&all, &[], Some(&all[0])),
            Err(ScolariteError::NoClassmates)
        ));
        let mut lost = student("9", "", "BTS", 1);
        lost.filiere = None;
        assert!(matches!(
            add_class_to_selection(&all, &[], Some(&lost)),
            Err(ScolariteError::Ungroupable)
        ));
    }

    #[test]
    fn test_descriptor_ref_key_prefers_option_code() {
        let mut s = student("1", "GC", "BTS", 1);
        s.option_code = Some("BAT".into());
        let d = ClassDescriptor::from(&s);
        assert_eq!(d.ref_key, "BAT");
        assert_eq!(d.study_year, Some(1));
    }
}
