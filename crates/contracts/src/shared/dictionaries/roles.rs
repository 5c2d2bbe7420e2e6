//! Listes fermées des formulaires : responsabilités, langues, liens de parenté.

use crate::shared::text::normalize;

pub const NO_ROLE: &str = "Aucune";

pub const CLASS_ROLES: &[&str] = &[NO_ROLE, "Délégué", "Adjoint"];

pub const SCHOOL_ROLES: &[&str] = &[
    NO_ROLE,
    "PRÉSIDENT",
    "VICE-PRÉSIDENTE",
    "SECRÉTAIRE GÉNÉRALE",
    "TRÉSORIERS",
    "CENSEUR",
    "DÉLÉGUÉ DU PÔLE ÉVÉNEMENT",
    "DÉLÉGUÉ DU PÔLE COMMUNICATION",
    "DÉLÉGUÉ EN CHARGE DES SPONSORINGS",
    "DÉLÉGUÉ DES RELATIONS EXTÉRIEURES",
    "DÉLÉGUÉ EN CHARGE DU CONTRÔLE DISCIPLINAIRE ET DE L'INSALUBRITÉ",
    "DÉLÉGUÉ DES AFFAIRES SPORTIVES",
];

pub const LIVING_LANGUAGES: &[&str] = &["Français", "Anglais"];

pub const EMERGENCY_RELATIONS: &[&str] = &[
    "Père",
    "Mère",
    "Frère / Sœur",
    "Oncle / Tante",
    "Grand-parent",
    "Tuteur légal",
    "Autre",
];

/// Délégué ou adjoint de classe, quelle que soit la casse ou l'accentuation
pub fn is_class_representative(role: Option<&str>) -> bool {
    let role = normalize(role.unwrap_or_default());
    !role.is_empty() && (role.starts_with("delegue") || role.starts_with("adjoint"))
}

/// Membre du bureau des élèves (toute responsabilité autre que « Aucune »)
pub fn has_school_role(role: Option<&str>) -> bool {
    match role.map(str::trim) {
        Some(r) => !r.is_empty() && r != NO_ROLE,
        None => false,
    }
}

/// Responsabilité affichable (None pour « Aucune » ou vide)
pub fn displayable_role(role: Option<&str>) -> Option<&str> {
    role.map(str::trim).filter(|r| !r.is_empty() && *r != NO_ROLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_representative_detection() {
        assert!(is_class_representative(Some("Délégué")));
        assert!(is_class_representative(Some("  DELEGUE adjoint")));
        assert!(is_class_representative(Some("Adjoint")));
        assert!(!is_class_representative(Some("Aucune")));
        assert!(!is_class_representative(None));
    }

    #[test]
    fn test_school_role_detection() {
        assert!(has_school_role(Some("CENSEUR")));
        assert!(!has_school_role(Some("Aucune")));
        assert!(!has_school_role(Some("")));
        assert_eq!(displayable_role(Some("Aucune")), None);
    }
}
