//! Carte d'étudiant (format ID-1).

use super::html::{HtmlDocument, PageFormat};
use super::school::{HEADER_IMAGE, SCHOOL_NAME, SCHOOL_SHORT_NAME, SCHOOL_SLOGAN};
use crate::domain::a001_student::Student;
use crate::shared::dictionaries::DEFAULT_ACADEMIC_YEAR;
use crate::shared::text::{escape_html, first_non_empty};

const CSS: &str = r#"
.card { width: 86mm; height: 54mm; border: 1px solid #d1d5db; border-radius: 3mm; overflow: hidden; display: flex; flex-direction: column; font-size: 8px; }
.card-header { display: flex; gap: 2mm; align-items: center; padding: 1.5mm 2mm; background: #00A082; color: #fff; }
.card-header img { height: 8mm; }
.card-header .school { font-weight: 700; font-size: 7px; line-height: 1.2; }
.card-header .kind { font-size: 8px; text-transform: uppercase; letter-spacing: .05em; }
.card-content { flex: 1; display: flex; gap: 2mm; padding: 2mm; }
.card-photo { width: 20mm; height: 25mm; border: 1px solid #9ca3af; display: flex; align-items: center; justify-content: center; color: #9ca3af; overflow: hidden; }
.card-photo img { width: 100%; height: 100%; object-fit: cover; }
.card-info { flex: 1; }
.card-info .row { margin-bottom: 1mm; }
.card-info .label { color: #6b7280; }
.card-info .value { font-weight: 700; }
.card-qr { width: 14mm; text-align: center; }
.card-qr .qr { width: 14mm; height: 14mm; border: 1px dashed #9ca3af; display: flex; align-items: center; justify-content: center; }
.card-bottom { display: flex; justify-content: space-between; padding: 1mm 2mm; background: #FF8200; color: #fff; font-weight: 700; }
"#;

/// Valeurs affichées sur la carte
#[derive(Debug, Clone, PartialEq)]
pub struct CardData {
    pub full_name: String,
    pub matricule: String,
    pub cycle: String,
    pub filiere: String,
    pub academic_year: String,
    pub photo_url: Option<String>,
}

impl CardData {
    pub fn new(s: &Student, academic_year: Option<&str>) -> Self {
        Self {
            full_name: s.full_name(),
            matricule: first_non_empty([s.matricule.as_deref()]).unwrap_or("—").to_string(),
            cycle: first_non_empty([s.cycle.as_deref()]).unwrap_or("BTS").to_string(),
            filiere: s.filiere.clone().unwrap_or_default(),
            academic_year: first_non_empty([academic_year, s.academic_year.as_deref()])
                .unwrap_or(DEFAULT_ACADEMIC_YEAR)
                .to_string(),
            photo_url: first_non_empty([s.photo_url.as_deref()]).map(str::to_string),
        }
    }
}

fn card(data: &CardData) -> String {
    let row = |label: &str, value: &str| {
        format!(
            r#"<div class="row"><span class="label">{} :</span> <span class="value">{}</span></div>"#,
            label,
            escape_html(value)
        )
    };
    let photo = match &data.photo_url {
        Some(url) => format!(r#"<img src="{}" alt="" />"#, escape_html(url)),
        None => "PHOTO".to_string(),
    };
    format!(
        r#"<div class="card">
  <div class="card-header"><img src="{img}" alt="{short}" onerror="this.style.display='none'" /><div><div class="school">{school}</div><div class="kind">Carte d'étudiant</div></div></div>
  <div class="card-content">
    <div class="card-photo">{photo}</div>
    <div class="card-info">{name}{mat}{cycle}{filiere}{year}</div>
    <div class="card-qr"><div class="qr">QR</div><div>Vérification</div></div>
  </div>
  <div class="card-bottom"><span>{short}</span><span>{slogan}</span></div>
</div>"#,
        img = HEADER_IMAGE,
        short = SCHOOL_SHORT_NAME,
        school = escape_html(SCHOOL_NAME),
        photo = photo,
        name = row("Nom & Prénoms", &data.full_name),
        mat = row("Matricule", &data.matricule),
        cycle = row("Cycle", &data.cycle),
        filiere = row("Filière", &data.filiere),
        year = row("Année académique", &data.academic_year),
        slogan = SCHOOL_SLOGAN,
    )
}

pub fn card_document(student: &Student, academic_year: Option<&str>) -> HtmlDocument {
    let data = CardData::new(student, academic_year);
    let mut doc = HtmlDocument::new(
        format!("Carte d'étudiant - {}", data.full_name),
        PageFormat::A4Portrait,
        CSS,
    );
    doc.push_page(card(&data));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_defaults() {
        let s = Student {
            last_name: "Abena".into(),
            first_name: "Luc".into(),
            ..Default::default()
        };
        let data = CardData::new(&s, None);
        assert_eq!(data.matricule, "—");
        assert_eq!(data.cycle, "BTS");
        assert_eq!(data.academic_year, "2025-2026");

        let data = CardData::new(&s, Some("2026-2027"));
        assert_eq!(data.academic_year, "2026-2027");
    }

    #[test]
    fn test_card_html_has_slogan_and_photo_placeholder() {
        let html = card_document(&Student::default(), None).to_preview_html();
        assert!(html.contains("Votre carrière commence ici"));
        assert!(html.contains(r#"<div class="card-photo">PHOTO</div>"#));
    }
}
