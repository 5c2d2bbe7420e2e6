//! Relevé de notes (aperçu).

use super::html::{cell, school_header, HtmlDocument, PageFormat};
use crate::domain::a001_student::Student;
use crate::domain::a004_grade::entry::{format_score, Mention};
use crate::shared::dictionaries::DEFAULT_ACADEMIC_YEAR;
use crate::shared::text::{escape_html, first_non_empty};

const CSS: &str = r#"
.info-block { display: grid; grid-template-columns: 1fr 1fr; gap: 4px 18px; margin-bottom: 12px; font-size: 12px; }
.info-block .label { color: #4b5563; }
.transcript-footer { display: flex; justify-content: space-between; margin-top: 14px; font-weight: 700; }
"#;

/// Ligne du relevé : une UE
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptItem {
    pub code: String,
    pub title: String,
    pub coefficient: f64,
    /// Note sur 20
    pub note: Option<f64>,
    pub credits: Option<f64>,
}

impl TranscriptItem {
    pub fn mention(&self) -> Option<Mention> {
        self.note.map(Mention::from_score)
    }
}

/// Moyenne pondérée par les coefficients des UE notées
pub fn weighted_average(items: &[TranscriptItem]) -> Option<f64> {
    let (sum, weights) = items
        .iter()
        .filter_map(|i| i.note.map(|n| (n * i.coefficient, i.coefficient)))
        .fold((0.0, 0.0), |(s, w), (ns, nw)| (s + ns, w + nw));
    if weights > 0.0 {
        Some(sum / weights)
    } else {
        None
    }
}

/// (crédits capitalisés, crédits totaux) : une UE est capitalisée à 10/20
pub fn capitalized_credits(items: &[TranscriptItem]) -> (f64, f64) {
    items.iter().fold((0.0, 0.0), |(acquired, total), i| {
        let credits = i.credits.unwrap_or(0.0);
        let ok = i.note.map(|n| n >= 10.0).unwrap_or(false);
        (if ok { acquired + credits } else { acquired }, total + credits)
    })
}

pub fn transcript_document(student: &Student, academic_year: Option<&str>, items: &[TranscriptItem]) -> HtmlDocument {
    let full_name = student.full_name();
    let info = [
        ("Nom & Prénoms", full_name.clone()),
        ("Matricule", first_non_empty([student.matricule.as_deref()]).unwrap_or("—").to_string()),
        ("Cycle", first_non_empty([student.cycle.as_deref()]).unwrap_or("BTS").to_string()),
        ("Filière", student.filiere.clone().unwrap_or_default()),
        (
            "Année académique",
            first_non_empty([academic_year, student.academic_year.as_deref()])
                .unwrap_or(DEFAULT_ACADEMIC_YEAR)
                .to_string(),
        ),
    ];
    let info_html: String = info
        .iter()
        .map(|(label, value)| {
            format!(
                r#"<div><span class="label">{} :</span> <b>{}</b></div>"#,
                label,
                escape_html(value)
            )
        })
        .collect();

    let rows: String = if items.is_empty() {
        r#"<tr><td colspan="6" class="center empty">Aucune note enregistrée.</td></tr>"#.to_string()
    } else {
        items
            .iter()
            .map(|i| {
                format!(
                    r#"<tr><td class="center">{}</td><td>{}</td><td class="center">{}</td><td class="center">{}</td><td class="center">{}</td><td class="center">{}</td></tr>"#,
                    cell(&i.code),
                    cell(&i.title),
                    format_score(i.coefficient),
                    i.note.map(format_score).unwrap_or_else(|| "—".into()),
                    i.credits.map(format_score).unwrap_or_else(|| "—".into()),
                    i.mention().map(|m| m.label()).unwrap_or(""),
                )
            })
            .collect()
    };

    let average = weighted_average(items)
        .map(|a| format!("{:.2}", a))
        .unwrap_or_else(|| "……".into());
    let (acquired, total) = capitalized_credits(items);

    let mut doc = HtmlDocument::new(format!("Relevé de notes - {}", full_name), PageFormat::A4Portrait, CSS);
    doc.push_page(format!(
        r#"{header}
<div class="doc-title">RELEVÉ DE NOTES</div>
<div class="info-block">{info}</div>
<table class="grid">
<thead><tr><th>Code UE</th><th>Intitulé</th><th>Coef.</th><th>Note /20</th><th>Crédits</th><th>Mention</th></tr></thead>
<tbody>{rows}</tbody>
</table>
<div class="transcript-footer"><span>Moyenne générale : {average} / 20</span><span>Crédits capitalisés : {acquired} / {total}</span></div>"#,
        header = school_header(),
        info = info_html,
        rows = rows,
        average = average,
        acquired = format_score(acquired),
        total = format_score(total),
    ));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(code: &str, coef: f64, note: Option<f64>, credits: f64) -> TranscriptItem {
        TranscriptItem {
            code: code.into(),
            title: format!("UE {}", code),
            coefficient: coef,
            note,
            credits: Some(credits),
        }
    }

    #[test]
    fn test_weighted_average_ignores_missing_notes() {
        let items = vec![item("UE-101", 3.0, Some(12.0), 6.0), item("UE-102", 1.0, Some(8.0), 2.0), item("UE-103", 2.0, None, 4.0)];
        assert_eq!(weighted_average(&items), Some(11.0));
        assert_eq!(capitalized_credits(&items), (6.0, 12.0));
        assert_eq!(weighted_average(&[]), None);
    }

    #[test]
    fn test_transcript_rows_and_mentions() {
        let items = vec![item("UE-101", 3.0, Some(14.5), 6.0)];
        let html = transcript_document(&Student::default(), None, &items).to_preview_html();
        assert!(html.contains("UE-101"));
        assert!(html.contains("Bien"));
        assert!(html.contains("Moyenne générale : 14.50 / 20"));
        assert!(html.contains("Crédits capitalisés : 6 / 6"));
    }
}
