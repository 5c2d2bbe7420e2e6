//! Contrats partagés de l'application Scolarité.
//!
//! Ce crate ne dépend d'aucune cible (wasm ou natif) : il contient les DTO
//! échangés avec le backend REST, les dictionnaires de l'établissement,
//! les règles de classement (classes, matières, notes) et le rendu des
//! documents imprimables (HTML et PDF).

pub mod dashboards;
pub mod domain;
pub mod shared;
