//! Régions du Cameroun et leurs départements.

pub static REGIONS: &[(&str, &[&str])] = &[
    ("Adamaoua", &["Djérem", "Faro-et-Déo", "Mayo-Banyo", "Mbéré", "Vina"]),
    (
        "Centre",
        &[
            "Haute-Sanaga",
            "Lekié",
            "Mbam-et-Inoubou",
            "Mbam-et-Kim",
            "Méfou-et-Afamba",
            "Méfou-et-Akono",
            "Mfoundi",
            "Nyong-et-Kellé",
            "Nyong-et-Mfoumou",
            "Nyong-et-So’o",
        ],
    ),
    ("Est", &["Boumba-et-Ngoko", "Haut-Nyong", "Kadey", "Lom-et-Djérem"]),
    (
        "Extrême-Nord",
        &["Diamaré", "Logone-et-Chari", "Mayo-Danay", "Mayo-Kani", "Mayo-Sava", "Mayo-Tsanaga"],
    ),
    ("Littoral", &["Moungo", "Nkam", "Sanaga-Maritime", "Wouri"]),
    ("Nord", &["Bénoué", "Faro", "Mayo-Louti", "Mayo-Rey"]),
    (
        "Nord-Ouest",
        &["Boyo", "Bui", "Donga-Mantung", "Mezam", "Momo", "Ngoketunjia", "Menchum"],
    ),
    (
        "Ouest",
        &["Bamboutos", "Haut-Nkam", "Hauts-Plateaux", "Koung-Khi", "Menoua", "Mifi", "Ndé", "Noun"],
    ),
    ("Sud", &["Dja-et-Lobo", "Mvila", "Océan", "Vallée-du-Ntem"]),
    ("Sud-Ouest", &["Fako", "Koupé-Manengouba", "Lebialem", "Manyu", "Meme", "Ndian"]),
];

pub fn region_names() -> Vec<&'static str> {
    REGIONS.iter().map(|(name, _)| *name).collect()
}

pub fn departments_for(region: &str) -> &'static [&'static str] {
    REGIONS
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, deps)| *deps)
        .unwrap_or(&[])
}

pub fn is_department_of(region: &str, department: &str) -> bool {
    departments_for(region).contains(&department)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_regions() {
        assert_eq!(region_names().len(), 10);
    }

    #[test]
    fn test_departments_lookup() {
        assert!(is_department_of("Littoral", "Wouri"));
        assert!(!is_department_of("Centre", "Wouri"));
        assert!(departments_for("Atlantide").is_empty());
    }
}
