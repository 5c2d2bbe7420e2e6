//! Désérialisation tolérante pour les champs que le backend renvoie tantôt
//! en nombre, tantôt en chaîne (anciens enregistrements).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `1`, `"1"`, `" 1 "` → `Some(1)` ; `null`, `""` ou texte non numérique → `None`
pub fn opt_u8_lenient<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u8::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse::<u8>().ok(),
        _ => None,
    })
}

/// Nombre ou chaîne → `Some(String)` ; `null` ou chaîne vide → `None`
pub fn opt_string_lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Identifiant numérique ou textuel → `String` (vide si absent)
pub fn id_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string_lenient(deserializer)?.unwrap_or_default())
}

/// Nombre décimal ou chaîne avec virgule → `Option<f64>`
pub fn opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    })
}

/// `true`, `"true"`, `1` → vrai ; tout le reste → faux
pub fn bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::String(s)) => matches!(s.trim(), "true" | "1" | "oui"),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_u8_lenient")]
        year: Option<u8>,
        #[serde(default, deserialize_with = "id_lenient")]
        id: String,
        #[serde(default, deserialize_with = "bool_lenient")]
        paid: bool,
        #[serde(default, deserialize_with = "opt_f64_lenient")]
        coef: Option<f64>,
    }

    #[test]
    fn test_lenient_numbers_and_strings() {
        let p: Probe = serde_json::from_str(r#"{"year":"3","id":42,"paid":"true","coef":"2,5"}"#).unwrap();
        assert_eq!(p.year, Some(3));
        assert_eq!(p.id, "42");
        assert!(p.paid);
        assert_eq!(p.coef, Some(2.5));
    }

    #[test]
    fn test_lenient_missing_and_null() {
        let p: Probe = serde_json::from_str(r#"{"year":null,"coef":""}"#).unwrap();
        assert_eq!(p.year, None);
        assert_eq!(p.id, "");
        assert!(!p.paid);
        assert_eq!(p.coef, None);
    }
}
