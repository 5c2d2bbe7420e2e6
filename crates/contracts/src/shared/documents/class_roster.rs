//! Fiche de classe imprimable : représentants puis liste complète.
//! Une page par classe, que l'export soit unitaire ou groupé.

use super::html::{HtmlDocument, PageFormat};
use crate::domain::a002_class::{ClassMember, ClassRecord};
use crate::shared::dictionaries::roles::displayable_role;
use crate::shared::export::sanitize_file_name;
use crate::shared::text::escape_html;

const CLASS_ROLE_COLOR: &str = "#FF8200";
const SCHOOL_ROLE_COLOR: &str = "#00A082";
const SCHOOL_ROLE_COLOR_FULL_LIST: &str = "#F50057";

const CSS: &str = r#"
.card { border: 1px solid #e6e8ee; border-radius: 12px; padding: 16px 18px; }
.header { display: flex; justify-content: space-between; align-items: flex-start; gap: 12px; }
.title { margin: 0; font-size: 18px; font-weight: 800; }
.subtitle { margin-top: 4px; color: #6b7280; font-size: 12.5px; }
.pill { padding: 4px 12px; border-radius: 999px; background: #eef2ff; font-weight: 700; font-size: 12.5px; }
.section { margin-top: 14px; padding-top: 10px; border-top: 1px solid #f1f2f5; }
.section-title { font-weight: 700; font-size: 13px; margin-bottom: 8px; }
.row { display: flex; justify-content: space-between; align-items: center; padding: 6px 0; border-bottom: 1px dashed #e6e8ee; gap: 10px; }
.row .name { font-weight: 700; font-size: 13px; margin: 0; }
.row .mat { margin: 2px 0 0; color: #6b7280; font-size: 12px; }
.row .right { display: flex; gap: 6px; flex-wrap: wrap; justify-content: flex-end; max-width: 260px; }
.badge { display: inline-flex; padding: 3px 10px; border-radius: 999px; color: #fff; font-weight: 700; font-size: 11.5px; white-space: nowrap; }
.phone { color: #6b7280; font-size: 12px; white-space: nowrap; }
"#;

fn role_badge(role: Option<&str>, color: &str) -> String {
    displayable_role(role)
        .map(|r| format!(r#"<span class="badge" style="background:{}">{}</span>"#, color, escape_html(r)))
        .unwrap_or_default()
}

fn member_row(m: &ClassMember, school_color: &str, crown: bool) -> String {
    let crown = if crown && m.is_representative() { " 👑" } else { "" };
    let phone = m
        .contact
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(|c| format!(r#"<span class="phone">{}</span>"#, escape_html(c)))
        .unwrap_or_default();
    format!(
        r#"<div class="row"><div><p class="name">{name}{crown}</p><p class="mat">{mat}</p></div><div class="right">{class_role}{school_role}{phone}</div></div>"#,
        name = escape_html(&m.full_name),
        crown = crown,
        mat = escape_html(m.matricule.as_deref().unwrap_or_default()),
        class_role = role_badge(m.class_role.as_deref(), CLASS_ROLE_COLOR),
        school_role = role_badge(m.school_role.as_deref(), school_color),
        phone = phone,
    )
}

fn class_page(class: &ClassRecord) -> String {
    let reps = class.representatives();
    let reps_html = if reps.is_empty() {
        r#"<div class="empty">Aucun représentant renseigné.</div>"#.to_string()
    } else {
        reps.iter().map(|m| member_row(m, SCHOOL_ROLE_COLOR, false)).collect()
    };
    let all_html = if class.students.is_empty() {
        r#"<div class="empty">Aucun étudiant.</div>"#.to_string()
    } else {
        class
            .students
            .iter()
            .map(|m| member_row(m, SCHOOL_ROLE_COLOR_FULL_LIST, true))
            .collect()
    };

    format!(
        r#"<div class="card">
<div class="header">
  <div><h1 class="title">{title}</h1><div class="subtitle">Effectif : {count} étudiant(s)</div></div>
  <div class="pill">{abbrev}</div>
</div>
<div class="section"><div class="section-title">Représentants de la classe</div>{reps}</div>
<div class="section"><div class="section-title">Liste complète de la classe</div>{all}</div>
</div>"#,
        title = escape_html(class.title.as_deref().filter(|t| !t.trim().is_empty()).unwrap_or("Classe")),
        count = class.headcount(),
        abbrev = escape_html(class.abbrev.as_deref().filter(|a| !a.trim().is_empty()).unwrap_or("—")),
        reps = reps_html,
        all = all_html,
    )
}

pub fn roster_document(classes: &[&ClassRecord], title: &str) -> HtmlDocument {
    let mut doc = HtmlDocument::new(title, PageFormat::A4Portrait, CSS);
    for class in classes {
        doc.push_page(class_page(class));
    }
    doc
}

/// Titre d'une fiche unitaire
pub fn roster_title(class: &ClassRecord) -> String {
    format!("Classe - {}", class.label())
}

/// Titre de l'export groupé : "classes_BTS_1_2025-11-24"
pub fn bulk_roster_title(cycle: &str, level: &str, date: &str) -> String {
    sanitize_file_name(&format!("classes_{}_{}_{}", cycle, level, date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, class_role: Option<&str>, school_role: Option<&str>) -> ClassMember {
        ClassMember {
            id: name.into(),
            full_name: name.into(),
            matricule: Some(format!("M-{}", name)),
            class_role: class_role.map(Into::into),
            school_role: school_role.map(Into::into),
            contact: Some("699000000".into()),
        }
    }

    #[test]
    fn test_representatives_section() {
        let class = ClassRecord {
            id: "c1".into(),
            title: Some("BTS 1 Bâtiment".into()),
            abbrev: Some("BAT1".into()),
            effectif: Some(2),
            students: vec![
                member("ABENA Luc", Some("Délégué"), Some("Aucune")),
                member("ZOA Marc", Some("Aucune"), Some("Trésorier")),
            ],
            ..Default::default()
        };
        let doc = roster_document(&[&class], &roster_title(&class));
        assert_eq!(doc.page_count(), 1);
        let page = &doc.pages[0];
        assert!(page.contains("Effectif : 2 étudiant(s)"));
        assert!(page.contains("BAT1"));
        assert!(page.contains("ABENA Luc 👑"));
        assert!(!page.contains(">Aucune<"));
        assert!(!page.contains("Aucun représentant renseigné."));
    }

    #[test]
    fn test_empty_class() {
        let class = ClassRecord {
            id: "c2".into(),
            ..Default::default()
        };
        let doc = roster_document(&[&class, &class], "x");
        assert_eq!(doc.page_count(), 2);
        assert!(doc.pages[0].contains("Aucun représentant renseigné."));
        assert!(doc.pages[0].contains("Aucun étudiant."));
        assert!(doc.pages[0].contains(r#"<div class="pill">—</div>"#));
    }

    #[test]
    fn test_bulk_title() {
        assert_eq!(bulk_roster_title("BTS", "1", "2025-11-24"), "classes_BTS_1_2025-11-24");
    }
}
