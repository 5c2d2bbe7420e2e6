//! Catégories de pages affichées dans un onglet.
//!
//! Chaque page racine porte un `id` de la forme `{entité}--{catégorie}`
//! (ex. `"a001_student--list"`) et l'attribut `data-page-category`.

/// Liste d'enregistrements avec filtres
pub const PAGE_CAT_LIST: &str = "list";

/// Tableau de bord
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Page d'action : documents à imprimer, listes de présence
pub const PAGE_CAT_USECASE: &str = "usecase";
