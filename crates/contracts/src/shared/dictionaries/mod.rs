//! Dictionnaires statiques de l'établissement.
//!
//! Toutes les tables sont des constantes : aucune mutation, aucune copie par
//! requête, uniquement des fonctions de consultation.

pub mod cycles;
pub mod programs;
pub mod regions;
pub mod roles;

pub use cycles::{academic_years, allowed_years, Cycle, DEFAULT_ACADEMIC_YEAR};
pub use programs::{
    filiere_def, hydrate, is_industrial, options_for, specialites_for, DictEntry, FiliereType,
    ProgramChoice, FILIERE_GESTION, FILIERE_INDUSTRIELLE, FILIERE_JURIDIQUE,
};
pub use regions::{departments_for, region_names};
