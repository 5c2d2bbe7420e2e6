use std::collections::BTreeMap;
use thiserror::Error;

/// Erreurs métier du crate
#[derive(Debug, Error)]
pub enum ScolariteError {
    #[error("Classe non identifiable pour cet étudiant.")]
    Ungroupable,

    #[error("Sélectionnez d'abord un étudiant.")]
    NoSelection,

    #[error("Aucun autre membre de classe trouvé.")]
    NoClassmates,

    #[error("Aucun étudiant pour ces critères.")]
    NoStudents,

    #[error("Erreur de génération PDF : {0}")]
    Pdf(String),
}

pub type ScolariteResult<T> = Result<T, ScolariteError>;

/// Erreurs de saisie, une par champ (clé = nom du champ côté formulaire)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_keep_first_message_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("lastName", "Champ obligatoire");
        errors.add("lastName", "autre");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("lastName"), Some("Champ obligatoire"));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_empty_field_errors_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
