//! Petites fonctions de texte utilisées par les filtres et les documents.

/// Retire les accents français usuels (é → e, ç → c, œ → oe, ...)
pub fn strip_accents(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            'à' | 'â' | 'ä' | 'á' | 'ã' => out.push('a'),
            'À' | 'Â' | 'Ä' | 'Á' | 'Ã' => out.push('A'),
            'é' | 'è' | 'ê' | 'ë' => out.push('e'),
            'É' | 'È' | 'Ê' | 'Ë' => out.push('E'),
            'î' | 'ï' | 'í' | 'ì' => out.push('i'),
            'Î' | 'Ï' | 'Í' | 'Ì' => out.push('I'),
            'ô' | 'ö' | 'ó' | 'ò' | 'õ' => out.push('o'),
            'Ô' | 'Ö' | 'Ó' | 'Ò' | 'Õ' => out.push('O'),
            'ù' | 'û' | 'ü' | 'ú' => out.push('u'),
            'Ù' | 'Û' | 'Ü' | 'Ú' => out.push('U'),
            'ç' => out.push('c'),
            'Ç' => out.push('C'),
            'ÿ' => out.push('y'),
            'Ÿ' => out.push('Y'),
            'ñ' => out.push('n'),
            'Ñ' => out.push('N'),
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("OE"),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("AE"),
            other => out.push(other),
        }
    }
    out
}

/// Forme de comparaison : sans espaces autour, minuscules, sans accents
pub fn normalize(s: &str) -> String {
    strip_accents(s.trim()).to_lowercase()
}

/// Première lettre en majuscule, reste en minuscules ("GÉNIE civil" → "Génie civil")
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// Premier élément non vide (après trim) d'une liste de candidats
pub fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
}

pub fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// Échappement HTML pour l'injection de données dans les gabarits
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Nom complet : NOM en majuscules puis prénoms
pub fn format_full_name(last_name: &str, first_name: &str) -> String {
    let last = last_name.trim().to_uppercase();
    let first = first_name.trim();
    match (last.is_empty(), first.is_empty()) {
        (true, true) => String::new(),
        (false, true) => last,
        (true, false) => first.to_string(),
        (false, false) => format!("{} {}", last, first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents_and_case() {
        assert_eq!(normalize("  Délégué "), "delegue");
        assert_eq!(normalize("INGÉNIEUR"), "ingenieur");
        assert_eq!(normalize("Sœur"), "soeur");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("génie CIVIL"), "Génie civil");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_first_non_empty_skips_blank_values() {
        assert_eq!(first_non_empty([None, Some("  "), Some("BAT")]), Some("BAT"));
        assert_eq!(first_non_empty([None, Some("")]), None);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"L'été\" & co</b>"), "&lt;b&gt;&quot;L&#39;été&quot; &amp; co&lt;/b&gt;");
    }

    #[test]
    fn test_format_full_name() {
        assert_eq!(format_full_name("Nkomo", "Paul Arthur"), "NKOMO Paul Arthur");
        assert_eq!(format_full_name("", "Paul"), "Paul");
        assert_eq!(format_full_name(" ", " "), "");
    }
}
