//! Fiches de notes (aperçu « Notes ») et fiches de report vierges par classe.

use super::html::{cell, school_header, HtmlDocument, PageFormat};
use super::layout::grade_sheets;
use crate::domain::a002_class::{ClassMember, ClassRecord};
use crate::domain::a004_grade::{NotesGroup, PreviewStudent};
use crate::shared::text::{escape_html, first_non_empty};

const CSS: &str = r#"
.meta-row { display: flex; justify-content: space-between; margin: 4px 0; }
.meta-label { font-weight: 700; }
.center-title { text-align: center; font-weight: 800; font-size: 16px; text-decoration: underline; margin: 14px 0; }
table.grid th, table.grid td { text-align: center; height: 24px; }
table.grid .th-matiere { text-align: left; padding: 8px 10px; }
table.grid .td-left { text-align: left; padding-left: 6px; }
table.grid .th-note div { font-size: 10px; }
"#;

const TEACHER_SIGNATURE: &str = "Nom, date et signature de l&apos;enseignant :";

fn note_headers() -> &'static str {
    r#"<th style="width:30px">N°</th><th style="width:90px">Matricule</th><th class="td-left">Noms et prénoms</th><th class="th-note"><div>Notes CC</div><div>/ 20</div></th><th class="th-note"><div>Notes SN</div><div>/ 20</div></th>"#
}

fn student_row(number: Option<usize>, matricule: &str, name: &str) -> String {
    format!(
        r#"<tr><td>{}</td><td>{}</td><td class="td-left">{}</td><td></td><td></td></tr>"#,
        number.map(|n| n.to_string()).unwrap_or_default(),
        cell(matricule),
        cell(name),
    )
}

/// Une fiche par tranche de 20 étudiants, complétée par des lignes vides
pub fn grade_sheet_document(groups: &[NotesGroup]) -> HtmlDocument {
    let mut doc = HtmlDocument::new("Fiches de notes", PageFormat::A4Portrait, CSS);

    for group in groups {
        let year = group.academic_year.as_deref().unwrap_or("—");
        let specialite = group.specialite_display();
        for sheet in grade_sheets(&group.students) {
            let rows: String = sheet
                .rows
                .iter()
                .map(|r| match r.item {
                    Some(s) => student_row(r.number, s.matricule.as_deref().unwrap_or_default(), &s.full_name()),
                    None => student_row(None, "", ""),
                })
                .collect();

            doc.push_page(format!(
                r#"{header}
<div class="meta-row"><div><span class="meta-label">Année académique :</span> {year}</div><div><span class="meta-label">Niveau :</span> {level}</div></div>
<div class="center-title">FICHE DE NOTES</div>
<table class="grid">
<thead>
<tr><th class="th-matiere" colspan="3">Matière :</th><th class="th-matiere" colspan="2">Spécialité : {spec}</th></tr>
<tr>{headers}</tr>
</thead>
<tbody>{rows}</tbody>
</table>
<div class="footer-note">{signature}</div>"#,
                header = school_header(),
                year = escape_html(year),
                level = escape_html(&group.level_label()),
                spec = escape_html(&specialite),
                headers = note_headers(),
                rows = rows,
                signature = TEACHER_SIGNATURE,
            ));
        }
    }
    doc
}

/// "fiches_notes_2025-2026_2025-11-24.html", ou "toutes" sans année
pub fn notes_download_file_name(academic_year: &str, date: &str) -> String {
    let year = if academic_year.trim().is_empty() {
        "toutes"
    } else {
        academic_year.trim()
    };
    format!("fiches_notes_{}_{}.html", year, date)
}

/// Niveau affiché sur une fiche de report : saisie libre, sinon niveau ou
/// titre de la classe
pub fn blank_sheet_level(class: &ClassRecord, typed: &str) -> String {
    first_non_empty([Some(typed), class.level.as_deref(), class.title.as_deref()])
        .unwrap_or("—")
        .to_string()
}

fn member_row(index: usize, m: &ClassMember) -> String {
    student_row(
        Some(index + 1),
        m.matricule.as_deref().unwrap_or_default(),
        &m.full_name.to_uppercase(),
    )
}

/// Fiche de report vierge : une page par matière, ou une page unique
/// sans matière si la liste est vide
pub fn blank_sheet_document(
    class: &ClassRecord,
    academic_year: &str,
    level: &str,
    subjects: &[String],
) -> HtmlDocument {
    let or_dash = |v: &str| {
        if v.trim().is_empty() {
            "—".to_string()
        } else {
            escape_html(v.trim())
        }
    };
    let members = class.sorted_members();
    let rows: String = if members.is_empty() {
        r#"<tr><td colspan="5">Aucun étudiant.</td></tr>"#.to_string()
    } else {
        members.iter().enumerate().map(|(i, m)| member_row(i, m)).collect()
    };

    let single = [String::new()];
    let subjects = if subjects.is_empty() { &single[..] } else { subjects };

    let mut doc = HtmlDocument::new("Fiche de report de notes", PageFormat::A4Portrait, CSS);
    for subject in subjects {
        doc.push_page(format!(
            r#"{header}
<div class="meta-row"><div><span class="meta-label">Année académique :</span> {year}</div><div><span class="meta-label">Niveau :</span> {level}</div></div>
<div class="meta-row"><div><span class="meta-label">Spécialité :</span> {spec}</div><div></div></div>
<div class="center-title">FICHE DE REPORT DE NOTES</div>
<table class="grid">
<thead>
<tr><th class="th-matiere" colspan="5">Matière : {subject}</th></tr>
<tr>{headers}</tr>
</thead>
<tbody>{rows}</tbody>
</table>
<div class="footer-note">{signature}</div>"#,
            header = school_header(),
            year = or_dash(academic_year),
            level = or_dash(level),
            spec = or_dash(&class.specialite_display()),
            subject = escape_html(subject),
            headers = note_headers(),
            rows = rows,
            signature = TEACHER_SIGNATURE,
        ));
    }
    doc
}

/// Étudiants d'une fiche de notes, utile pour l'aperçu tabulaire
pub fn sheet_students(group: &NotesGroup) -> Vec<Vec<Option<&PreviewStudent>>> {
    grade_sheets(&group.students)
        .into_iter()
        .map(|sheet| sheet.rows.into_iter().map(|r| r.item).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(n: usize) -> NotesGroup {
        NotesGroup {
            key: "CGE::licence::3".into(),
            academic_year: Some("2025-2026".into()),
            study_year: Some(3),
            specialite: Some("comptabilité".into()),
            students: (0..n)
                .map(|i| PreviewStudent {
                    id: i.to_string(),
                    matricule: Some(format!("M{:03}", i)),
                    last_name: format!("Nom{:02}", i),
                    first_name: "Jean".into(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_grade_sheet_pages_padded() {
        let doc = grade_sheet_document(&[group(23)]);
        assert_eq!(doc.page_count(), 2);
        let first = &doc.pages[0];
        assert!(first.contains("FICHE DE NOTES"));
        assert!(first.contains("Niveau 3"));
        assert!(first.contains("<td>20</td>"));
        assert!(doc.pages[1].contains("<td>23</td>"));
        assert!(!doc.pages[1].contains("<td>24</td>"));
        // 3 lignes remplies + 17 lignes vides
        assert_eq!(doc.pages[1].matches("<tr><td></td>").count(), 17);
    }

    #[test]
    fn test_empty_group_still_one_sheet() {
        let doc = grade_sheet_document(&[group(0)]);
        assert_eq!(doc.page_count(), 1);
        assert_eq!(sheet_students(&group(0))[0].len(), 20);
    }

    #[test]
    fn test_download_name() {
        assert_eq!(notes_download_file_name("", "2025-11-24"), "fiches_notes_toutes_2025-11-24.html");
        assert_eq!(
            notes_download_file_name("2025-2026", "2025-11-24"),
            "fiches_notes_2025-2026_2025-11-24.html"
        );
    }

    #[test]
    fn test_blank_sheet_one_page_per_subject() {
        let class = ClassRecord {
            id: "c1".into(),
            title: Some("BTS 1 Bâtiment".into()),
            display_name: Some("bâtiment - BTS1".into()),
            students: vec![
                ClassMember {
                    id: "2".into(),
                    full_name: "zoa marc".into(),
                    ..Default::default()
                },
                ClassMember {
                    id: "1".into(),
                    full_name: "Abena Luc".into(),
                    matricule: Some("B01".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let doc = blank_sheet_document(&class, "2025-2026", "BTS1", &["Topographie".into(), "RDM".into()]);
        assert_eq!(doc.page_count(), 2);
        assert!(doc.pages[1].contains("Matière : RDM"));
        assert!(doc.pages[0].contains("Bâtiment"));
        let abena = doc.pages[0].find("ABENA LUC").unwrap_or(usize::MAX);
        let zoa = doc.pages[0].find("ZOA MARC").unwrap_or(0);
        assert!(abena < zoa);

        let doc = blank_sheet_document(&ClassRecord::default(), "", "", &[]);
        assert_eq!(doc.page_count(), 1);
        assert!(doc.pages[0].contains("Aucun étudiant."));
    }

    #[test]
    fn test_blank_sheet_level() {
        let class = ClassRecord {
            level: Some("2".into()),
            title: Some("Classe X".into()),
            ..Default::default()
        };
        assert_eq!(blank_sheet_level(&class, " "), "2");
        assert_eq!(blank_sheet_level(&class, "BTS2"), "BTS2");
    }
}
