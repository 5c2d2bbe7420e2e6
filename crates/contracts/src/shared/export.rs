/// Construction des fichiers CSV (séparateur `;`, BOM UTF-8 pour Excel)
/// et des noms de fichiers exportés.

/// Type exportable en CSV
pub trait CsvExportable {
    /// En-têtes de colonnes
    fn headers() -> Vec<&'static str>;

    /// Valeurs d'une ligne, dans l'ordre des en-têtes
    fn to_csv_row(&self) -> Vec<String>;
}

/// Contenu CSV complet ; `None` si aucune ligne (l'appelant prévient l'utilisateur)
pub fn build_csv<T: CsvExportable>(rows: &[T]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    let mut content = String::new();
    content.push('\u{FEFF}');
    content.push_str(&T::headers().join(";"));

    for row in rows {
        content.push('\n');
        let cells: Vec<String> = row.to_csv_row().iter().map(|c| escape_csv_cell(c)).collect();
        content.push_str(&cells.join(";"));
    }

    Some(content)
}

/// Guillemets si la cellule contient `;`, `"` ou un saut de ligne
pub fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Nom de fichier sûr : seuls lettres, chiffres, `_`, `-` et espaces sont
/// conservés, les espaces deviennent `_`, 80 caractères au plus.
pub fn sanitize_file_name(name: &str) -> String {
    let kept: String = name
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut out = String::with_capacity(kept.len());
    let mut in_space = false;
    for c in kept.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }

    let out: String = out.chars().take(80).collect();
    if out.is_empty() {
        "export".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl CsvExportable for Row {
        fn headers() -> Vec<&'static str> {
            vec!["Nom", "Contact"]
        }

        fn to_csv_row(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn test_build_csv_with_bom_and_escaping() {
        let csv = build_csv(&[Row("NKOMO; Paul", "+237 612345678"), Row("ABENA \"Jo\"", "")]).unwrap();
        assert!(csv.starts_with('\u{FEFF}'));
        let lines: Vec<&str> = csv.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines[0], "Nom;Contact");
        assert_eq!(lines[1], "\"NKOMO; Paul\";+237 612345678");
        assert_eq!(lines[2], "\"ABENA \"\"Jo\"\"\";");
    }

    #[test]
    fn test_build_csv_empty_is_none() {
        assert!(build_csv::<Row>(&[]).is_none());
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("  BAT - BTS 1 (2025) "), "BAT_-_BTS_1_2025");
        assert_eq!(sanitize_file_name("Génie"), "Gnie");
        assert_eq!(sanitize_file_name("***"), "export");
        assert_eq!(sanitize_file_name(&"a".repeat(100)).len(), 80);
    }
}
