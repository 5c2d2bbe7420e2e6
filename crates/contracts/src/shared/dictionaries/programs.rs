//! Filières, spécialités et options de l'établissement.
//!
//! Pour les filières industrielles la spécialité n'est qu'une catégorie
//! parente (code vide) : la valeur visible est l'option, qui porte le code.

use crate::shared::text::normalize;
use serde::{Deserialize, Serialize};

pub const FILIERE_GESTION: &str = "Filières de gestion";
pub const FILIERE_JURIDIQUE: &str = "Filières carrières juridiques";
pub const FILIERE_INDUSTRIELLE: &str = "Filières industrielles";

/// Type de filière (valeurs du filtre « type de filière »)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FiliereType {
    Gestion,
    Juridique,
    Industriel,
}

impl FiliereType {
    pub fn code(&self) -> &'static str {
        match self {
            FiliereType::Gestion => "gestion",
            FiliereType::Juridique => "juridique",
            FiliereType::Industriel => "industriel",
        }
    }

    /// Libellé de la filière correspondante
    pub fn filiere_label(&self) -> &'static str {
        match self {
            FiliereType::Gestion => FILIERE_GESTION,
            FiliereType::Juridique => FILIERE_JURIDIQUE,
            FiliereType::Industriel => FILIERE_INDUSTRIELLE,
        }
    }

    pub fn all() -> Vec<FiliereType> {
        vec![
            FiliereType::Industriel,
            FiliereType::Gestion,
            FiliereType::Juridique,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "gestion" => Some(FiliereType::Gestion),
            "juridique" => Some(FiliereType::Juridique),
            "industriel" => Some(FiliereType::Industriel),
            _ => None,
        }
    }

    /// Type d'une filière à partir de son libellé
    pub fn of_filiere(filiere: &str) -> Option<Self> {
        filiere_def(filiere).map(|f| f.kind)
    }
}

/// Couple (libellé, code) d'un dictionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictEntry {
    pub label: &'static str,
    pub code: &'static str,
}

const fn e(label: &'static str, code: &'static str) -> DictEntry {
    DictEntry { label, code }
}

#[derive(Debug)]
pub struct FiliereDef {
    pub label: &'static str,
    pub kind: FiliereType,
    pub specialites: &'static [DictEntry],
    /// Options par spécialité parente (filières industrielles uniquement)
    pub options: &'static [(&'static str, &'static [DictEntry])],
}

impl FiliereDef {
    pub fn is_industrial(&self) -> bool {
        self.kind == FiliereType::Industriel
    }

    pub fn specialite(&self, label: &str) -> Option<&'static DictEntry> {
        self.specialites.iter().find(|s| s.label == label)
    }

    pub fn specialite_by_code(&self, code: &str) -> Option<&'static DictEntry> {
        if code.trim().is_empty() {
            return None;
        }
        self.specialites.iter().find(|s| s.code == code)
    }

    pub fn options_of(&self, specialite: &str) -> &'static [DictEntry] {
        self.options
            .iter()
            .find(|(parent, _)| *parent == specialite)
            .map(|(_, opts)| *opts)
            .unwrap_or(&[])
    }

    /// Recherche d'une option par code dans toutes les spécialités parentes
    pub fn option_by_code(&self, code: &str) -> Option<(&'static str, &'static DictEntry)> {
        if code.trim().is_empty() {
            return None;
        }
        self.options.iter().find_map(|(parent, opts)| {
            opts.iter().find(|o| o.code == code).map(|o| (*parent, o))
        })
    }

    /// Recherche d'une option par libellé dans toutes les spécialités parentes
    pub fn option_by_label(&self, label: &str) -> Option<(&'static str, &'static DictEntry)> {
        self.options.iter().find_map(|(parent, opts)| {
            opts.iter().find(|o| o.label == label).map(|o| (*parent, o))
        })
    }
}

pub static FILIERES: &[FiliereDef] = &[
    FiliereDef {
        label: FILIERE_GESTION,
        kind: FiliereType::Gestion,
        specialites: &[
            e("Comptabilité et Gestion des Entreprises", "CGE"),
            e("Administration des Collectivités Territoriales", "ACT"),
            e("Gestion des ONG", "ONG"),
            e("Gestion de Projets", "GPR"),
            e("Gestion des Ressources Humaines", "GRH"),
            e("Assistant Manager", "AMA"),
            e("Banque et Finance", "BAF"),
            e("Marketing – Commerce – Vente", "MCV"),
            e("Commerce International", "CIN"),
            e("Gestion Logistique et Transport", "GLT"),
            e("Statistiques", "STA"),
            e("Douane et Transit", "DTR"),
            e("Comptabilité – Contrôle – Audit", "CCA"),
            e("Finance – Comptabilité", "FIC"),
            e("Banque – Finance et Assurance", "BFA"),
            e("Marketing et Communication Digitale", "MCD"),
            e("Marketing – Management Opérationnel", "MMO"),
            e("Management des Organisations", "MOR"),
            e("Management de la Qualité", "MAQ"),
            e("Management des Projets", "MPR"),
        ],
        options: &[],
    },
    FiliereDef {
        label: FILIERE_JURIDIQUE,
        kind: FiliereType::Juridique,
        specialites: &[
            e("Droit Foncier et Domanial", "DFD"),
            e("Professions Immobilières", "PRI"),
            e("Douane et Transit", "DTR"),
            e("Droit des Affaires et de l’Entreprise", "DAE"),
        ],
        options: &[],
    },
    FiliereDef {
        label: FILIERE_INDUSTRIELLE,
        kind: FiliereType::Industriel,
        specialites: &[
            e("Génie Civil", ""),
            e("Génie Informatique", ""),
            e("Télécommunication", ""),
            e("Génie Mécanique", ""),
            e("Génie Thermique", ""),
            e("Génie Électrique", ""),
        ],
        options: &[
            (
                "Génie Civil",
                &[
                    e("Bâtiment", "BAT"),
                    e("Travaux Publics", "TPU"),
                    e("Géométrie Topographe", "GTP"),
                    e("Installation Sanitaire", "INS"),
                ],
            ),
            (
                "Génie Informatique",
                &[
                    e("Génie Logiciel", "GLI"),
                    e("E-Commerce et Marketing Numérique", "ECM"),
                    e("Maintenance Systèmes Informatiques", "GSI"),
                    e("Informatique Industrielle et Automatisme", "IIA"),
                ],
            ),
            (
                "Télécommunication",
                &[e("Télécommunication", "TEL"), e("Réseau et Sécurité", "RES")],
            ),
            (
                "Génie Mécanique",
                &[
                    e("Chaudronnerie et Soudure", "CHS"),
                    e("Fabrication Mécanique", "FBM"),
                    e("Mécatronique", "MEC"),
                    e("Maintenance Systèmes Industriels", "MSI"),
                    e("Électromécanique", "ELM"),
                ],
            ),
            (
                "Génie Thermique",
                &[
                    e("Énergies Renouvelables", "ENR"),
                    e("Froid et Climatisation", "FRC"),
                ],
            ),
            (
                "Génie Électrique",
                &[
                    e("Maintenance Appareils Biomédicaux", "MAB"),
                    e("Électrotechnique", "ELT"),
                ],
            ),
        ],
    },
];

pub fn filiere_def(label: &str) -> Option<&'static FiliereDef> {
    FILIERES.iter().find(|f| f.label == label)
}

pub fn filiere_labels() -> Vec<&'static str> {
    FILIERES.iter().map(|f| f.label).collect()
}

pub fn is_industrial(filiere: &str) -> bool {
    filiere_def(filiere).map(FiliereDef::is_industrial).unwrap_or(false)
}

/// Spécialités d'une filière (vide si filière inconnue)
pub fn specialites_for(filiere: &str) -> &'static [DictEntry] {
    filiere_def(filiere).map(|f| f.specialites).unwrap_or(&[])
}

/// Options d'une spécialité parente industrielle (vide sinon)
pub fn options_for(filiere: &str, specialite: &str) -> &'static [DictEntry] {
    filiere_def(filiere)
        .filter(|f| f.is_industrial())
        .map(|f| f.options_of(specialite))
        .unwrap_or(&[])
}

/// Libellé de la filière qui connaît ce code (spécialité ou option)
pub fn filiere_for_code(code: &str) -> Option<&'static str> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    FILIERES
        .iter()
        .find(|f| f.specialite_by_code(code).is_some() || f.option_by_code(code).is_some())
        .map(|f| f.label)
}

// ============================================================================
// Hydratation des anciens enregistrements
// ============================================================================

/// Choix de programme d'un enregistrement (étudiant, matière, classe)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramChoice {
    pub filiere: String,
    pub specialite: String,
    pub specialite_code: String,
    pub option: String,
    pub option_code: String,
}

impl ProgramChoice {
    /// Code visible : l'option pour l'industriel, sinon la spécialité
    pub fn ref_key(&self) -> &str {
        if !self.option_code.trim().is_empty() {
            &self.option_code
        } else {
            &self.specialite_code
        }
    }

    fn cleared(filiere: &str) -> Self {
        Self {
            filiere: filiere.to_string(),
            ..Self::default()
        }
    }
}

/// Reconstruit une sélection cohérente à partir d'un enregistrement partiel.
///
/// Chaque couple (libellé, code) est soit entièrement résolu par le
/// dictionnaire, soit vidé. La correspondance par libellé est préférée,
/// la correspondance par code sert de repli. Aucune paire n'est inventée.
pub fn hydrate(record: &ProgramChoice) -> ProgramChoice {
    let Some(def) = filiere_def(record.filiere.trim()) else {
        return ProgramChoice::cleared(record.filiere.trim());
    };

    if !def.is_industrial() {
        let resolved = def
            .specialite(record.specialite.trim())
            .or_else(|| def.specialite_by_code(record.specialite_code.trim()));
        return match resolved {
            Some(entry) => ProgramChoice {
                filiere: def.label.to_string(),
                specialite: entry.label.to_string(),
                specialite_code: entry.code.to_string(),
                option: String::new(),
                option_code: String::new(),
            },
            None => ProgramChoice::cleared(def.label),
        };
    }

    let parent_label = record.specialite.trim();
    let option_label = record.option.trim();
    let option_code = record.option_code.trim();

    let from_parts = |parent: &'static str, opt: &'static DictEntry| ProgramChoice {
        filiere: def.label.to_string(),
        specialite: parent.to_string(),
        specialite_code: def
            .specialite(parent)
            .map(|s| s.code.to_string())
            .unwrap_or_default(),
        option: opt.label.to_string(),
        option_code: opt.code.to_string(),
    };

    if let Some(parent) = def.specialite(parent_label) {
        let opts = def.options_of(parent.label);
        if let Some(opt) = opts.iter().find(|o| o.label == option_label) {
            return from_parts(parent.label, opt);
        }
        if let Some(opt) = opts.iter().find(|o| !option_code.is_empty() && o.code == option_code) {
            return from_parts(parent.label, opt);
        }
    }

    // Option connue par son code sous un autre parent, ou parent manquant
    if let Some((parent, opt)) = def.option_by_code(option_code) {
        return from_parts(parent, opt);
    }

    // Anciennes matières : la « spécialité » stockée est le libellé de l'option
    if let Some((parent, opt)) = def
        .option_by_label(option_label)
        .or_else(|| def.option_by_label(parent_label))
    {
        return from_parts(parent, opt);
    }

    match def.specialite(parent_label) {
        Some(parent) => ProgramChoice {
            filiere: def.label.to_string(),
            specialite: parent.label.to_string(),
            specialite_code: parent.code.to_string(),
            option: String::new(),
            option_code: String::new(),
        },
        None => ProgramChoice::cleared(def.label),
    }
}

/// Filtre de liste : une filière correspond-elle au type demandé ?
pub fn matches_filiere_type(filiere: &str, filter: Option<FiliereType>) -> bool {
    match filter {
        None => true,
        Some(kind) => normalize(filiere) == normalize(kind.filiere_label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(filiere: &str, spec: &str, spec_code: &str, opt: &str, opt_code: &str) -> ProgramChoice {
        ProgramChoice {
            filiere: filiere.into(),
            specialite: spec.into(),
            specialite_code: spec_code.into(),
            option: opt.into(),
            option_code: opt_code.into(),
        }
    }

    #[test]
    fn test_gestion_has_no_duplicate_codes() {
        let specs = specialites_for(FILIERE_GESTION);
        let mut codes: Vec<&str> = specs.iter().map(|s| s.code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), specs.len());
    }

    #[test]
    fn test_industrial_parents_have_empty_codes() {
        assert!(specialites_for(FILIERE_INDUSTRIELLE).iter().all(|s| s.code.is_empty()));
        assert_eq!(options_for(FILIERE_INDUSTRIELLE, "Génie Civil").len(), 4);
        assert!(options_for(FILIERE_GESTION, "Génie Civil").is_empty());
    }

    #[test]
    fn test_hydrate_fills_missing_code_from_label() {
        let out = hydrate(&choice(FILIERE_GESTION, "Banque et Finance", "", "x", "y"));
        assert_eq!(out, choice(FILIERE_GESTION, "Banque et Finance", "BAF", "", ""));
    }

    #[test]
    fn test_hydrate_fills_missing_label_from_code() {
        let out = hydrate(&choice(FILIERE_JURIDIQUE, "", "DAE", "", ""));
        assert_eq!(out.specialite, "Droit des Affaires et de l’Entreprise");
        assert_eq!(out.specialite_code, "DAE");
    }

    #[test]
    fn test_hydrate_prefers_label_over_code() {
        let out = hydrate(&choice(FILIERE_GESTION, "Statistiques", "CGE", "", ""));
        assert_eq!(out.specialite_code, "STA");
    }

    #[test]
    fn test_hydrate_unresolvable_leaves_both_empty() {
        let out = hydrate(&choice(FILIERE_GESTION, "Inconnue", "ZZZ", "", ""));
        assert_eq!(out, choice(FILIERE_GESTION, "", "", "", ""));
    }

    #[test]
    fn test_hydrate_industrial_from_option_code_only() {
        let out = hydrate(&choice(FILIERE_INDUSTRIELLE, "", "", "", "GLI"));
        assert_eq!(out, choice(FILIERE_INDUSTRIELLE, "Génie Informatique", "", "Génie Logiciel", "GLI"));
    }

    #[test]
    fn test_hydrate_industrial_option_label_from_code_under_known_parent() {
        let out = hydrate(&choice(FILIERE_INDUSTRIELLE, "Génie Civil", "", "", "BAT"));
        assert_eq!(out.option, "Bâtiment");
    }

    #[test]
    fn test_hydrate_industrial_code_from_labels() {
        let out = hydrate(&choice(FILIERE_INDUSTRIELLE, "Génie Civil", "", "Bâtiment", ""));
        assert_eq!(out.option_code, "BAT");
        assert_eq!(out.specialite_code, "");
    }

    #[test]
    fn test_hydrate_industrial_specialite_stored_as_option_label() {
        let out = hydrate(&choice(FILIERE_INDUSTRIELLE, "Froid et Climatisation", "FRC", "", ""));
        assert_eq!(out.specialite, "Génie Thermique");
        assert_eq!(out.option_code, "FRC");
    }

    #[test]
    fn test_hydrate_industrial_parent_only() {
        let out = hydrate(&choice(FILIERE_INDUSTRIELLE, "Génie Mécanique", "", "Inconnue", ""));
        assert_eq!(out, choice(FILIERE_INDUSTRIELLE, "Génie Mécanique", "", "", ""));
    }

    #[test]
    fn test_hydrate_unknown_filiere_clears_everything() {
        let out = hydrate(&choice("Autre", "Bâtiment", "", "", "BAT"));
        assert_eq!(out, choice("Autre", "", "", "", ""));
    }

    #[test]
    fn test_filiere_type_mapping() {
        assert_eq!(FiliereType::of_filiere(FILIERE_INDUSTRIELLE), Some(FiliereType::Industriel));
        assert!(matches_filiere_type(FILIERE_GESTION, Some(FiliereType::Gestion)));
        assert!(!matches_filiere_type(FILIERE_GESTION, Some(FiliereType::Juridique)));
        assert!(matches_filiere_type("n'importe", None));
        assert_eq!(filiere_for_code("TEL"), Some(FILIERE_INDUSTRIELLE));
    }
}
