//! Certificat de scolarité.

use super::dates::format_date_fr;
use super::html::{school_header, HtmlDocument, PageFormat};
use super::school::PLACEHOLDER;
use crate::domain::a001_student::Student;
use crate::shared::dictionaries::DEFAULT_ACADEMIC_YEAR;
use crate::shared::text::{escape_html, first_non_empty};

const CSS: &str = r#"
.certificate-title { text-align: center; margin: 28px 0 24px; }
.certificate-title span { border: 2px solid #111; padding: 6px 22px; font-weight: 800; font-size: 17px; letter-spacing: .05em; }
.certificate p { font-size: 14px; line-height: 1.7; margin: 6px 0; }
.certificate .bold { font-weight: 700; }
.sign-row { display: flex; justify-content: flex-end; margin-top: 36px; font-size: 13px; }
.sign-row .sign { text-align: center; }
.footer-line { border-bottom: 4px solid #00A082; margin-top: 80px; }
"#;

/// Niveau en toutes lettres : "Première année Cycle BTS", "4ᵉ année Cycle MASTER"
pub fn niveau_texte(cycle: &str, study_year: Option<u8>) -> String {
    let year = study_year.filter(|y| *y > 0).unwrap_or(1);
    let annee = match year {
        1 => "Première année".to_string(),
        2 => "Deuxième année".to_string(),
        3 => "Troisième année".to_string(),
        y => format!("{}ᵉ année", y),
    };
    format!("{} Cycle {}", annee, cycle).trim().to_string()
}

/// Champs du certificat, déjà mis en forme
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateData {
    pub full_name: String,
    pub birth_date: String,
    pub birth_place: String,
    pub niveau: String,
    pub specialite: String,
    pub academic_year: String,
    pub matricule: String,
}

impl From<&Student> for CertificateData {
    fn from(s: &Student) -> Self {
        let cycle = first_non_empty([s.cycle.as_deref()]).unwrap_or("BTS");
        let birth_date = first_non_empty([s.birth_date.as_deref()])
            .map(format_date_fr)
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        Self {
            full_name: s.full_name(),
            birth_date,
            birth_place: first_non_empty([s.birth_place.as_deref()])
                .unwrap_or(PLACEHOLDER)
                .to_string(),
            niveau: niveau_texte(cycle, s.study_year),
            specialite: first_non_empty([s.option.as_deref(), s.specialite.as_deref()])
                .unwrap_or(PLACEHOLDER)
                .to_string(),
            academic_year: first_non_empty([s.academic_year.as_deref()])
                .unwrap_or(DEFAULT_ACADEMIC_YEAR)
                .to_string(),
            matricule: first_non_empty([s.matricule.as_deref()])
                .unwrap_or(PLACEHOLDER)
                .to_string(),
        }
    }
}

fn page(data: &CertificateData) -> String {
    let line = |label: &str, value: &str| {
        format!(
            r#"<p>{} <span class="bold">{}</span></p>"#,
            label,
            escape_html(value)
        )
    };
    format!(
        r#"{header}
<div class="certificate">
  <div class="certificate-title"><span>CERTIFICAT DE SCOLARITÉ</span></div>
  <p>Nous soussignés {placeholder} le Directeur, certifions que :</p>
  {name}
  <p>Né(e) le <span class="bold">{birth}</span> à <span class="bold">{place}</span></p>
  {niveau}
  {spec}
  {year}
  {mat}
  <p style="margin-top:24px">En foi de quoi, le présent certificat lui est délivré pour servir et valoir ce que de droit.</p>
</div>
<div class="sign-row"><div class="sign"><div>Le Directeur des Affaires Académiques</div><div style="margin-top:40px">LE DIRECTEUR</div></div></div>
<div class="footer-line"></div>"#,
        header = school_header(),
        placeholder = PLACEHOLDER,
        name = line("L'étudiant (e) :", &data.full_name),
        birth = escape_html(&data.birth_date),
        place = escape_html(&data.birth_place),
        niveau = line("Est inscrit(e) en", &data.niveau),
        spec = line("Spécialité :", &data.specialite),
        year = line("Année académique :", &data.academic_year),
        mat = line("Matricule :", &data.matricule),
    )
}

/// Un certificat par étudiant, une page chacun
pub fn certificate_document(students: &[&Student]) -> HtmlDocument {
    let title = match students {
        [one] => format!("Certificat de scolarité - {}", one.full_name()),
        _ => "Certificats de scolarité".to_string(),
    };
    let mut doc = HtmlDocument::new(title, PageFormat::A4Portrait, CSS);
    for s in students {
        doc.push_page(page(&CertificateData::from(*s)));
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_niveau_texte() {
        assert_eq!(niveau_texte("BTS", Some(1)), "Première année Cycle BTS");
        assert_eq!(niveau_texte("LICENCE", Some(3)), "Troisième année Cycle LICENCE");
        assert_eq!(niveau_texte("MASTER", Some(5)), "5ᵉ année Cycle MASTER");
        assert_eq!(niveau_texte("BTS", None), "Première année Cycle BTS");
    }

    #[test]
    fn test_certificate_fields_and_placeholders() {
        let s = Student {
            last_name: "Ngoumeka".into(),
            first_name: "Divine".into(),
            birth_date: Some("2005-04-21".into()),
            cycle: Some("BTS".into()),
            study_year: Some(2),
            specialite: Some("Banques et Finances".into()),
            ..Default::default()
        };
        let data = CertificateData::from(&s);
        assert_eq!(data.full_name, "NGOUMEKA Divine");
        assert_eq!(data.birth_date, "21 avril 2005");
        assert_eq!(data.birth_place, PLACEHOLDER);
        assert_eq!(data.matricule, PLACEHOLDER);
        assert_eq!(data.academic_year, "2025-2026");

        let doc = certificate_document(&[&s, &s]);
        assert_eq!(doc.page_count(), 2);
        assert!(doc.to_print_html().contains("Deuxième année Cycle BTS"));
    }
}
