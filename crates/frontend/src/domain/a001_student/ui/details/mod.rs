//! Inscription et modification d'un étudiant (MVVM)
//!
//! - view_model.rs : état du formulaire et commandes
//! - view.rs : composant `StudentDetails`

mod view;
mod view_model;

pub use view::StudentDetails;
pub use view_model::StudentDetailsViewModel;
