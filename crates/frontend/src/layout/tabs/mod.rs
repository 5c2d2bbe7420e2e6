//! Onglets de l'espace central
//!
//! - `page` : enveloppe d'un onglet (masqué quand il n'est pas actif)
//! - `registry` : clé d'onglet → contenu
//! - `tab_labels` : clé d'onglet → titre
//! - `tab_bar` : barre des onglets ouverts

pub mod page;
pub mod registry;
pub mod tab_bar;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_bar::TabBar;
pub use tab_labels::tab_label_for_key;
