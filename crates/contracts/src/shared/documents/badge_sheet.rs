//! Planches de badges étudiants : 4 badges A6 par feuille A4.

use super::html::{HtmlDocument, PageFormat};
use super::layout::{badge_sheets, BADGES_PER_SHEET};
use super::school::{HEADER_IMAGE, SCHOOL_SHORT_NAME, SCHOOL_SLOGAN};
use crate::domain::a001_student::Student;
use crate::shared::dictionaries::DEFAULT_ACADEMIC_YEAR;
use crate::shared::text::{escape_html, first_non_empty};

const CSS: &str = r#"
.sheet { display: grid; grid-template-columns: 1fr 1fr; grid-template-rows: 1fr 1fr; gap: 4mm; height: 270mm; }
.badge { border: 1px dashed #9ca3af; border-radius: 3mm; overflow: hidden; display: flex; flex-direction: column; }
.badge-empty { align-items: center; justify-content: center; color: #9ca3af; font-size: 11px; }
.badge-title { background: #00A082; color: #fff; text-align: center; font-weight: 800; padding: 2mm; letter-spacing: .08em; }
.badge-header img { width: 100%; height: auto; display: block; }
.badge-body { flex: 1; display: flex; gap: 3mm; padding: 3mm; }
.photo-col { width: 32mm; display: flex; flex-direction: column; align-items: center; gap: 2mm; }
.photo-frame { width: 30mm; height: 38mm; border: 1px solid #6b7280; display: flex; align-items: center; justify-content: center; overflow: hidden; color: #9ca3af; }
.photo-frame img { width: 100%; height: 100%; object-fit: cover; }
.matricule-chip { background: #FF8200; color: #fff; border-radius: 10px; padding: 1mm 3mm; font-weight: 700; font-size: 10px; }
.info-col { flex: 1; display: flex; flex-direction: column; gap: 2mm; font-size: 11px; }
.name-block { font-weight: 800; font-size: 13px; }
.info-label { color: #6b7280; margin-right: 2px; }
.footer-slogan { margin-top: auto; font-style: italic; color: #00A082; }
"#;

/// Classe affichée sur le badge : "BAT-BTS1", "CGE", "-LICENCE3" devient "LICENCE3"
pub fn level_label(code: &str, cycle: Option<&str>, study_year: Option<u8>) -> String {
    let cycle_part = match cycle.map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => format!(
            "-{}{}",
            c.to_uppercase(),
            study_year.map(|y| y.to_string()).unwrap_or_default()
        ),
        None => String::new(),
    };
    let label = format!("{}{}", code.trim(), cycle_part).replace("--", "-");
    label.trim_start_matches('-').to_string()
}

/// Données d'un badge
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeData {
    pub full_name: String,
    pub matricule: String,
    pub class_label: String,
    pub academic_year: String,
    pub filiere: Option<String>,
    pub photo_url: Option<String>,
}

impl From<&Student> for BadgeData {
    fn from(s: &Student) -> Self {
        let code = first_non_empty([s.option_code.as_deref(), s.specialite_code.as_deref()]).unwrap_or_default();
        Self {
            full_name: s.full_name(),
            matricule: first_non_empty([s.matricule.as_deref()]).unwrap_or("—").to_string(),
            class_label: level_label(code, s.cycle.as_deref(), s.study_year),
            academic_year: first_non_empty([s.academic_year.as_deref()])
                .unwrap_or(DEFAULT_ACADEMIC_YEAR)
                .to_string(),
            filiere: first_non_empty([s.filiere.as_deref()]).map(str::to_string),
            photo_url: first_non_empty([s.photo_url.as_deref()]).map(str::to_string),
        }
    }
}

fn badge(data: Option<&BadgeData>) -> String {
    let Some(b) = data else {
        return r#"<div class="badge badge-empty">Emplacement vide</div>"#.to_string();
    };
    let photo = match &b.photo_url {
        Some(url) => format!(r#"<img src="{}" alt="{}" />"#, escape_html(url), escape_html(&b.full_name)),
        None => "PHOTO".to_string(),
    };
    let filiere = b
        .filiere
        .as_deref()
        .map(|f| {
            format!(
                r#"<div><span class="info-label">Filière :</span>{}</div>"#,
                escape_html(f)
            )
        })
        .unwrap_or_default();
    let class_label = if b.class_label.is_empty() { "—" } else { b.class_label.as_str() };

    format!(
        r#"<div class="badge">
  <div class="badge-title">BADGE ÉTUDIANT</div>
  <div class="badge-header"><img src="{img}" alt="{short}" onerror="this.style.display='none'" /></div>
  <div class="badge-body">
    <div class="photo-col"><div class="photo-frame">{photo}</div><div class="matricule-chip">{mat}</div></div>
    <div class="info-col">
      <div class="name-block">{name}</div>
      <div><span class="info-label">Classe :</span>{class}</div>
      <div><span class="info-label">Année :</span>{year}</div>
      {filiere}
      <div class="footer-slogan">{slogan}</div>
    </div>
  </div>
</div>"#,
        img = HEADER_IMAGE,
        short = SCHOOL_SHORT_NAME,
        photo = photo,
        mat = escape_html(&b.matricule),
        name = escape_html(&b.full_name),
        class = escape_html(class_label),
        year = escape_html(&b.academic_year),
        filiere = filiere,
        slogan = SCHOOL_SLOGAN,
    )
}

pub fn badge_sheet_document(badges: &[BadgeData]) -> HtmlDocument {
    let mut doc = HtmlDocument::new("Impression badges", PageFormat::A4Portrait, CSS);
    for sheet in badge_sheets(badges) {
        let slots: String = sheet.rows.iter().map(|r| badge(r.item)).collect();
        doc.push_page(format!(r#"<div class="sheet">{}</div>"#, slots));
    }
    doc
}

/// "3 badge(s) · 1 page(s)"
pub fn badge_summary(count: usize) -> String {
    format!("{} badge(s) · {} page(s)", count, count.div_ceil(BADGES_PER_SHEET).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_label() {
        assert_eq!(level_label("BAT", Some("bts"), Some(1)), "BAT-BTS1");
        assert_eq!(level_label("CGE", None, Some(1)), "CGE");
        assert_eq!(level_label("", Some("LICENCE"), Some(3)), "LICENCE3");
    }

    #[test]
    fn test_sheet_always_has_four_slots() {
        let doc = badge_sheet_document(&[]);
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].matches("Emplacement vide").count(), 4);

        let s = Student {
            last_name: "Essomba".into(),
            option_code: Some("BAT".into()),
            cycle: Some("BTS".into()),
            study_year: Some(1),
            ..Default::default()
        };
        let badges: Vec<BadgeData> = std::iter::repeat(&s).take(5).map(BadgeData::from).collect();
        let doc = badge_sheet_document(&badges);
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[1].matches("Emplacement vide").count(), 3);
        assert!(doc.pages[0].contains("BAT-BTS1"));
        assert_eq!(badge_summary(5), "5 badge(s) · 2 page(s)");
    }
}
