//! Gabarit commun des documents imprimables.
//!
//! Un document est une suite de blocs `.page` plus une feuille de style.
//! L'aperçu à l'écran et la fenêtre d'impression reçoivent exactement les
//! mêmes blocs ; seule l'impression ajoute le script qui lance `print()`
//! au chargement puis referme la fenêtre.

use super::school::{HEADER_IMAGE, SCHOOL_CONTACT, SCHOOL_DECREE, SCHOOL_NAME, SCHOOL_SHORT_NAME};
use crate::shared::text::escape_html;

/// Délai avant fermeture de la fenêtre d'impression (ms)
pub const CLOSE_DELAY_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    A4Portrait,
    A4Landscape,
}

impl PageFormat {
    fn css(&self) -> &'static str {
        match self {
            PageFormat::A4Portrait => "@page { size: A4; margin: 12mm; }\n.page { width: 186mm; min-height: 270mm; }",
            PageFormat::A4Landscape => {
                "@page { size: A4 landscape; margin: 10mm; }\n.page { width: 277mm; min-height: 186mm; }"
            }
        }
    }
}

const BASE_CSS: &str = r#"
body { font-family: Arial, sans-serif; color: #111; font-size: 12px; margin: 0; padding: 0; background: #fff; }
.page { box-sizing: border-box; margin: 0 auto; page-break-after: always; }
.page:last-child { page-break-after: auto; }
.school-header { display: flex; align-items: flex-start; gap: 12px; padding-bottom: 4px; }
.school-header img { width: 110px; height: auto; }
.school-header .school-name { font-weight: 700; font-size: 13px; text-transform: uppercase; }
.school-header .school-decree { font-size: 10px; margin-top: 2px; }
.school-header .school-contact { font-size: 9.5px; font-style: italic; color: #374151; margin-top: 2px; }
.header-underline { border-bottom: 3px solid #00A082; margin: 4px 0 12px; }
.doc-title { text-align: center; font-weight: 800; font-size: 16px; letter-spacing: .04em; margin: 12px 0; }
table.grid { width: 100%; border-collapse: collapse; }
table.grid th, table.grid td { border: 1px solid #000; padding: 4px 6px; }
table.grid th { background: #F3F4F6; font-size: 11px; }
td.center, th.center { text-align: center; }
.meta { display: flex; gap: 18px; flex-wrap: wrap; margin: 6px 0 10px; }
.meta b { font-weight: 700; }
.footer-note { margin-top: 18px; font-size: 11px; }
.empty { color: #6b7280; font-style: italic; }
"#;

/// Document HTML multi-pages
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlDocument {
    pub title: String,
    pub format: PageFormat,
    pub css: &'static str,
    pub pages: Vec<String>,
}

impl HtmlDocument {
    pub fn new(title: impl Into<String>, format: PageFormat, css: &'static str) -> Self {
        Self {
            title: title.into(),
            format,
            css,
            pages: Vec::new(),
        }
    }

    /// Ajoute une page (contenu interne du bloc `.page`)
    pub fn push_page(&mut self, inner: String) {
        self.pages.push(format!(r#"<div class="page">{}</div>"#, inner));
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn styles(&self) -> String {
        format!("<style>{}\n{}\n{}</style>", self.format.css(), BASE_CSS, self.css)
    }

    /// Fragment pour l'aperçu dans la page (styles + pages, sans script)
    pub fn to_preview_html(&self) -> String {
        format!("{}{}", self.styles(), self.pages.concat())
    }

    /// Document complet pour la fenêtre d'impression
    pub fn to_print_html(&self) -> String {
        log::debug!("document « {} » : {} page(s)", self.title, self.pages.len());
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>{title}</title>
{styles}
</head>
<body>
{pages}
<script>
window.onload = () => {{
  window.print();
  setTimeout(() => window.close(), {delay});
}};
</script>
</body>
</html>
"#,
            title = escape_html(&self.title),
            styles = self.styles(),
            pages = self.pages.join("\n"),
            delay = CLOSE_DELAY_MS,
        )
    }

    /// Document complet sans impression automatique (téléchargement `.html`)
    pub fn to_download_html(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n<title>{}</title>\n{}\n</head>\n<body>\n{}\n</body>\n</html>\n",
            escape_html(&self.title),
            self.styles(),
            self.pages.join("\n")
        )
    }
}

/// Bandeau officiel (logo, nom, arrêté, contacts) suivi du filet vert
pub fn school_header() -> String {
    format!(
        r#"<div class="school-header">
  <img src="{img}" alt="{short}" onerror="this.style.display='none'" />
  <div>
    <div class="school-name">{name}</div>
    <div class="school-decree">{decree}</div>
    <div class="school-contact">{contact}</div>
  </div>
</div>
<div class="header-underline"></div>"#,
        img = HEADER_IMAGE,
        short = SCHOOL_SHORT_NAME,
        name = escape_html(SCHOOL_NAME),
        decree = escape_html(SCHOOL_DECREE),
        contact = escape_html(SCHOOL_CONTACT),
    )
}

/// Valeur échappée, ou espace insécable si vide
pub fn cell(value: &str) -> String {
    if value.trim().is_empty() {
        "&nbsp;".to_string()
    } else {
        escape_html(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_html_has_script_and_pages() {
        let mut doc = HtmlDocument::new("Fiche <test>", PageFormat::A4Portrait, "");
        doc.push_page("un".into());
        doc.push_page("deux".into());
        let html = doc.to_print_html();
        assert!(html.contains("<title>Fiche &lt;test&gt;</title>"));
        assert!(html.contains("window.print()"));
        assert!(html.contains("setTimeout(() => window.close(), 300)"));
        assert_eq!(html.matches(r#"<div class="page">"#).count(), 2);
    }

    #[test]
    fn test_preview_shares_page_blocks() {
        let mut doc = HtmlDocument::new("x", PageFormat::A4Landscape, ".x{}");
        doc.push_page("contenu".into());
        let preview = doc.to_preview_html();
        assert!(preview.contains(r#"<div class="page">contenu</div>"#));
        assert!(!preview.contains("window.print"));
        assert!(preview.contains("A4 landscape"));
    }

    #[test]
    fn test_cell_blank() {
        assert_eq!(cell("  "), "&nbsp;");
        assert_eq!(cell("A&B"), "A&amp;B");
    }
}
