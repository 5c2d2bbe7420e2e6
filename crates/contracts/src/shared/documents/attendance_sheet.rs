//! Listes de présence : filtre de la page, en-tête de classe et feuilles A4
//! paysage de 24 lignes.

use super::html::{cell, HtmlDocument, PageFormat};
use super::layout::attendance_sheets;
use super::school::{HEADER_IMAGE, SCHOOL_NAME, SCHOOL_SHORT_NAME};
use crate::domain::a001_student::Student;
use crate::shared::dictionaries::cycles::attendance_days;
use crate::shared::dictionaries::programs::filiere_def;
use crate::shared::text::escape_html;

const CSS: &str = r#"
.att-header { display: flex; justify-content: space-between; align-items: flex-start; gap: 12px; }
.att-header .school { font-weight: 700; font-size: 13px; }
.att-header img { width: 120px; height: auto; }
.att-header .page-info { font-size: 11px; color: #374151; white-space: nowrap; }
.title-bar { background: #00A082; color: #fff; text-align: center; font-weight: 800; padding: 4px; margin: 8px 0; letter-spacing: .06em; }
table.grid td.num { width: 28px; text-align: center; }
table.grid td.name { min-width: 220px; }
table.grid td.day { width: 70px; }
table.grid tr { height: 22px; }
"#;

/// Filtres de la page Présences
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceFilter {
    pub academic_year: String,
    pub filiere: String,
    /// Spécialité (parente en industriel)
    pub specialite: String,
    pub option: String,
    pub cycle: String,
    pub study_year: Option<u8>,
    pub search: String,
}

impl AttendanceFilter {
    /// Changer de filière vide spécialité et option
    pub fn on_filiere_change(mut self, filiere: &str) -> Self {
        self.filiere = filiere.to_string();
        self.specialite.clear();
        self.option.clear();
        self
    }

    pub fn on_specialite_change(mut self, specialite: &str) -> Self {
        self.specialite = specialite.to_string();
        self.option.clear();
        self
    }

    pub fn accepts(&self, s: &Student) -> bool {
        let eq = |filter: &str, value: Option<&str>| filter.is_empty() || value.unwrap_or_default() == filter;
        if !eq(&self.academic_year, s.academic_year.as_deref())
            || !eq(&self.filiere, s.filiere.as_deref())
            || !eq(&self.cycle, s.cycle.as_deref())
        {
            return false;
        }
        if self.study_year.is_some() && s.study_year != self.study_year {
            return false;
        }
        // En industriel la spécialité stockée est la parente de l'option
        if !eq(&self.specialite, s.specialite.as_deref()) || !eq(&self.option, s.option.as_deref()) {
            return false;
        }
        s.matches_search(&self.search)
    }

    /// Étudiants retenus, triés par « nom prénom » en minuscules
    pub fn apply<'a>(&self, students: &'a [Student]) -> Vec<&'a Student> {
        let mut out: Vec<&Student> = students.iter().filter(|s| self.accepts(s)).collect();
        out.sort_by_key(|s| s.sort_key());
        out
    }

    /// "BAT - BTS1", "CGE", "Filières de gestion - LICENCE3", "Classe"
    pub fn class_label(&self) -> String {
        let def = filiere_def(&self.filiere);
        let code = match def {
            Some(d) if d.is_industrial() => d
                .options_of(&self.specialite)
                .iter()
                .find(|o| o.label == self.option)
                .map(|o| o.code.to_string()),
            Some(d) => d.specialite(&self.specialite).map(|e| e.code.to_string()),
            None => None,
        }
        .filter(|c| !c.is_empty());

        let head = code
            .or_else(|| Some(self.option.clone()).filter(|o| !o.is_empty()))
            .or_else(|| Some(self.specialite.clone()).filter(|s| !s.is_empty()))
            .or_else(|| Some(self.filiere.clone()).filter(|f| !f.is_empty()))
            .unwrap_or_else(|| "Classe".to_string());

        match (self.cycle.is_empty(), self.study_year) {
            (false, Some(y)) => format!("{} - {}{}", head, self.cycle, y),
            _ => head,
        }
    }

    pub fn days(&self) -> &'static [&'static str] {
        attendance_days(&self.cycle)
    }
}

/// En-tête d'une liste de présence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceMeta {
    pub class_label: String,
    pub filiere: String,
    pub academic_year: String,
    pub cycle: String,
    pub study_year: Option<u8>,
    /// Texte libre, ex. "24 au 28 Nov 2025"
    pub period: String,
}

impl AttendanceMeta {
    pub fn from_filter(filter: &AttendanceFilter, period: &str) -> Self {
        Self {
            class_label: filter.class_label(),
            filiere: filter.filiere.clone(),
            academic_year: filter.academic_year.clone(),
            cycle: filter.cycle.clone(),
            study_year: filter.study_year,
            period: period.trim().to_string(),
        }
    }

    pub fn days(&self) -> &'static [&'static str] {
        attendance_days(&self.cycle)
    }

    /// Nom du PDF : "liste-presence-BAT_-_BTS1-2025-11-24.pdf"
    pub fn pdf_file_name(&self, date: &str) -> String {
        let label = if self.class_label.trim().is_empty() {
            "classe".to_string()
        } else {
            crate::shared::export::sanitize_file_name(&self.class_label)
        };
        format!("liste-presence-{}-{}.pdf", label, date)
    }
}

/// Ligne imprimée : nom en majuscules puis prénoms
pub fn row_name(s: &Student) -> String {
    s.full_name()
}

pub fn attendance_document(meta: &AttendanceMeta, students: &[&Student]) -> HtmlDocument {
    let days = meta.days();
    let or_dash = |v: &str| if v.trim().is_empty() { "—".to_string() } else { escape_html(v) };
    let day_headers: String = days
        .iter()
        .map(|d| format!(r#"<th class="center">{}</th>"#, d.to_uppercase()))
        .collect();
    let empty_days: String = days.iter().map(|_| r#"<td class="day"></td>"#).collect();

    let mut doc = HtmlDocument::new(
        format!("Liste de présence - {}", meta.class_label),
        PageFormat::A4Landscape,
        CSS,
    );
    for sheet in attendance_sheets(students) {
        let rows: String = sheet
            .rows
            .iter()
            .map(|r| {
                format!(
                    r#"<tr><td class="num">{}</td><td class="name">{}</td>{}</tr>"#,
                    r.number.map(|n| n.to_string()).unwrap_or_default(),
                    r.item.map(|s| cell(&row_name(s))).unwrap_or_default(),
                    empty_days
                )
            })
            .collect();
        let cycle = match meta.study_year {
            Some(y) => format!("{} ({})", or_dash(&meta.cycle), y),
            None => or_dash(&meta.cycle),
        };

        doc.push_page(format!(
            r#"<div class="att-header">
  <div>
    <div class="school">{school}</div>
    <div class="meta">
      <span><b>Classe :</b> {class}</span><span><b>Filière :</b> {filiere}</span>
      <span><b>Année académique :</b> {year}</span><span><b>Cycle :</b> {cycle}</span>
      <span><b>Période :</b> {period}</span>
    </div>
  </div>
  <img src="{img}" alt="{short}" onerror="this.style.display='none'" />
  <div class="page-info">{page}</div>
</div>
<div class="title-bar">LISTE DE PRÉSENCE</div>
<table class="grid">
<thead><tr><th>N°</th><th>NOMS &amp; PRÉNOMS</th>{days}</tr></thead>
<tbody>{rows}</tbody>
</table>
<div class="footer-note">Signature enseignant / responsable : ____________________________</div>"#,
            school = escape_html(SCHOOL_NAME),
            class = or_dash(&meta.class_label),
            filiere = or_dash(&meta.filiere),
            year = or_dash(&meta.academic_year),
            cycle = cycle,
            period = or_dash(&meta.period),
            img = HEADER_IMAGE,
            short = SCHOOL_SHORT_NAME,
            page = sheet.page_label(),
            days = day_headers,
            rows = rows,
        ));
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::dictionaries::{FILIERE_GESTION, FILIERE_INDUSTRIELLE};

    fn student(last: &str, first: &str, cycle: &str, year: u8) -> Student {
        Student {
            id: last.into(),
            last_name: last.into(),
            first_name: first.into(),
            academic_year: Some("2025-2026".into()),
            filiere: Some(FILIERE_GESTION.into()),
            specialite: Some("Comptabilité et Gestion des Entreprises".into()),
            specialite_code: Some("CGE".into()),
            cycle: Some(cycle.into()),
            study_year: Some(year),
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_sorted_by_last_then_first() {
        let list = vec![
            student("Zambo", "Eric", "BTS", 1),
            student("abena", "Luc", "BTS", 1),
            student("Abena", "Alice", "BTS", 1),
            student("Owona", "Paul", "BTS", 2),
        ];
        let filter = AttendanceFilter {
            academic_year: "2025-2026".into(),
            cycle: "BTS".into(),
            study_year: Some(1),
            ..Default::default()
        };
        let names: Vec<String> = filter.apply(&list).iter().map(|s| s.first_name.clone()).collect();
        assert_eq!(names, vec!["Alice", "Luc", "Eric"]);
    }

    #[test]
    fn test_industrial_filter_keeps_parent_specialite() {
        let industrial = |id: &str, specialite: &str, option: &str, code: &str| Student {
            id: id.into(),
            last_name: id.into(),
            academic_year: Some("2025-2026".into()),
            filiere: Some(FILIERE_INDUSTRIELLE.into()),
            specialite: Some(specialite.into()),
            option: Some(option.into()),
            option_code: Some(code.into()),
            cycle: Some("BTS".into()),
            study_year: Some(1),
            ..Default::default()
        };
        let list = vec![
            industrial("CIVIL", "Génie Civil", "Bâtiment", "BAT"),
            industrial("INFO", "Génie Informatique", "Génie Logiciel", "GLI"),
        ];
        let filter = AttendanceFilter {
            cycle: "BTS".into(),
            study_year: Some(1),
            ..AttendanceFilter::default()
                .on_filiere_change(FILIERE_INDUSTRIELLE)
                .on_specialite_change("Génie Civil")
        };
        let ids: Vec<&str> = filter.apply(&list).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["CIVIL"]);

        let filter = AttendanceFilter {
            option: "Génie Logiciel".into(),
            ..filter.on_specialite_change("Génie Informatique")
        };
        let ids: Vec<&str> = filter.apply(&list).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["INFO"]);
    }

    #[test]
    fn test_class_label() {
        let f = AttendanceFilter::default()
            .on_filiere_change(FILIERE_INDUSTRIELLE)
            .on_specialite_change("Génie Civil");
        let f = AttendanceFilter {
            option: "Bâtiment".into(),
            cycle: "BTS".into(),
            study_year: Some(1),
            ..f
        };
        assert_eq!(f.class_label(), "BAT - BTS1");

        let f = AttendanceFilter::default()
            .on_filiere_change(FILIERE_GESTION)
            .on_specialite_change("Comptabilité et Gestion des Entreprises");
        assert_eq!(f.class_label(), "CGE");
        assert_eq!(AttendanceFilter::default().class_label(), "Classe");
    }

    #[test]
    fn test_day_columns_by_cycle() {
        let meta = AttendanceMeta {
            cycle: "LICENCE".into(),
            ..Default::default()
        };
        assert_eq!(meta.days().len(), 6);
        let meta = AttendanceMeta {
            cycle: "INGÉNIEUR".into(),
            ..Default::default()
        };
        assert_eq!(meta.days().len(), 5);
    }

    #[test]
    fn test_document_pages_and_numbering() {
        let list: Vec<Student> = (0..30).map(|i| student(&format!("NOM{:02}", i), "x", "MASTER", 4)).collect();
        let refs: Vec<&Student> = list.iter().collect();
        let meta = AttendanceMeta {
            class_label: "CGE - MASTER4".into(),
            cycle: "MASTER".into(),
            ..Default::default()
        };
        let doc = attendance_document(&meta, &refs);
        assert_eq!(doc.page_count(), 2);
        assert!(doc.pages[1].contains(r#"<td class="num">25</td>"#));
        assert!(doc.pages[0].contains("SAMEDI"));
        assert!(doc.pages[1].contains("Page 2/2"));
        assert_eq!(meta.pdf_file_name("2025-11-24"), "liste-presence-CGE_-_MASTER4-2025-11-24.pdf");
    }
}
