//! Génération PDF directe (planches de badges, listes de présence) avec
//! les polices intégrées de printpdf.

use super::attendance_sheet::{row_name, AttendanceMeta};
use super::badge_sheet::BadgeData;
use super::layout::{attendance_sheets, badge_sheets, ATTENDANCE_ROWS_PER_SHEET};
use super::school::{SCHOOL_NAME, SCHOOL_SHORT_NAME, SCHOOL_SLOGAN};
use crate::domain::a001_student::Student;
use crate::shared::error::{ScolariteError, ScolariteResult};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Rgb,
};

const A4_SHORT: f32 = 210.0;
const A4_LONG: f32 = 297.0;

const BADGE_W: f32 = 85.6;
const BADGE_H: f32 = 54.0;
const BADGE_GAP: f32 = 10.0;

fn green() -> Color {
    Color::Rgb(Rgb::new(0.0, 160.0 / 255.0, 130.0 / 255.0, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn pdf_err(e: impl std::fmt::Display) -> ScolariteError {
    ScolariteError::Pdf(e.to_string())
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> ScolariteResult<Self> {
        Ok(Self {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?,
        })
    }
}

/// Rectangle dont `(x, y)` est le coin bas gauche, en millimètres
fn rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32) {
    let points = vec![
        (Point::new(Mm(x), Mm(y)), false),
        (Point::new(Mm(x + w), Mm(y)), false),
        (Point::new(Mm(x + w), Mm(y + h)), false),
        (Point::new(Mm(x), Mm(y + h)), false),
    ];
    layer.add_line(Line {
        points,
        is_closed: true,
    });
}

fn segment(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y1)), false),
            (Point::new(Mm(x2), Mm(y2)), false),
        ],
        is_closed: false,
    });
}

/// Tronque un texte trop long pour sa case
fn fit(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn draw_badge(layer: &PdfLayerReference, fonts: &Fonts, badge: &BadgeData, x: f32, y: f32) {
    layer.set_outline_color(green());
    layer.set_outline_thickness(1.2);
    rect(layer, x, y, BADGE_W, BADGE_H);

    // bandeau haut
    layer.set_fill_color(green());
    layer.use_text(SCHOOL_SHORT_NAME, 12.0, Mm(x + 4.0), Mm(y + BADGE_H - 8.0), &fonts.bold);
    layer.set_fill_color(black());
    layer.use_text(fit(SCHOOL_NAME, 70), 4.5, Mm(x + 4.0), Mm(y + BADGE_H - 12.0), &fonts.regular);

    // cadre photo
    layer.set_outline_color(black());
    layer.set_outline_thickness(0.5);
    rect(layer, x + 4.0, y + 8.0, 22.0, 28.0);

    let tx = x + 30.0;
    layer.use_text(fit(&badge.full_name, 28), 8.5, Mm(tx), Mm(y + 32.0), &fonts.bold);
    layer.use_text(format!("Matricule : {}", badge.matricule), 7.0, Mm(tx), Mm(y + 26.0), &fonts.regular);
    layer.use_text(format!("Classe : {}", badge.class_label), 7.0, Mm(tx), Mm(y + 21.0), &fonts.regular);
    layer.use_text(
        format!("Année : {}", badge.academic_year),
        7.0,
        Mm(tx),
        Mm(y + 16.0),
        &fonts.regular,
    );
    if let Some(filiere) = badge.filiere.as_deref().filter(|f| !f.trim().is_empty()) {
        layer.use_text(fit(filiere, 34), 6.0, Mm(tx), Mm(y + 11.0), &fonts.regular);
    }
    layer.set_fill_color(green());
    layer.use_text(SCHOOL_SLOGAN, 6.0, Mm(x + 4.0), Mm(y + 3.0), &fonts.regular);
    layer.set_fill_color(black());
}

/// Planches A4 portrait de quatre badges (2 × 2)
pub fn badges_pdf(badges: &[BadgeData]) -> ScolariteResult<Vec<u8>> {
    let sheets = badge_sheets(badges);
    let (doc, page, layer) = PdfDocument::new("Badges étudiants", Mm(A4_SHORT), Mm(A4_LONG), "Planche 1");
    let fonts = Fonts::load(&doc)?;

    let left = (A4_SHORT - 2.0 * BADGE_W - BADGE_GAP) / 2.0;
    let top = A4_LONG - 30.0;

    let mut current = (page, layer);
    for (i, sheet) in sheets.iter().enumerate() {
        if i > 0 {
            current = doc.add_page(Mm(A4_SHORT), Mm(A4_LONG), format!("Planche {}", i + 1));
        }
        let layer = doc.get_page(current.0).get_layer(current.1);
        layer.use_text(sheet.page_label(), 8.0, Mm(A4_SHORT - 30.0), Mm(A4_LONG - 12.0), &fonts.regular);

        for (slot, row) in sheet.rows.iter().enumerate() {
            let col = (slot % 2) as f32;
            let line = (slot / 2) as f32;
            let x = left + col * (BADGE_W + BADGE_GAP);
            let y = top - (line + 1.0) * BADGE_H - line * BADGE_GAP;
            match row.item {
                Some(badge) => draw_badge(&layer, &fonts, badge, x, y),
                None => {
                    layer.set_outline_color(Color::Rgb(Rgb::new(0.8, 0.8, 0.8, None)));
                    layer.set_outline_thickness(0.4);
                    rect(&layer, x, y, BADGE_W, BADGE_H);
                    layer.use_text("Emplacement vide", 8.0, Mm(x + 28.0), Mm(y + BADGE_H / 2.0), &fonts.regular);
                }
            }
        }
    }

    log::debug!("PDF badges : {} badge(s), {} planche(s)", badges.len(), sheets.len());
    doc.save_to_bytes().map_err(pdf_err)
}

/// "badges-etudiants-2025-11-24.pdf"
pub fn badges_file_name(date: &str) -> String {
    format!("badges-etudiants-{}.pdf", date)
}

const MARGIN: f32 = 10.0;
const ROW_H: f32 = 6.0;
const NUM_W: f32 = 10.0;
const NAME_W: f32 = 90.0;

/// Listes de présence A4 paysage : 24 lignes par feuille, une colonne par
/// jour de cours du cycle. Une liste vide est refusée, comme en HTML
/// où elle ne produit aucune feuille.
pub fn attendance_pdf(meta: &AttendanceMeta, students: &[&Student]) -> ScolariteResult<Vec<u8>> {
    let sheets = attendance_sheets(students);
    if sheets.is_empty() {
        return Err(ScolariteError::NoStudents);
    }
    let days = meta.days();
    let (doc, page, layer) = PdfDocument::new(
        format!("Liste de présence - {}", meta.class_label),
        Mm(A4_LONG),
        Mm(A4_SHORT),
        "Feuille 1",
    );
    let fonts = Fonts::load(&doc)?;

    let table_w = A4_LONG - 2.0 * MARGIN;
    let day_w = if days.is_empty() {
        0.0
    } else {
        (table_w - NUM_W - NAME_W) / days.len() as f32
    };
    let or_dash = |v: &str| if v.trim().is_empty() { "—".to_string() } else { v.trim().to_string() };
    let cycle = match meta.study_year {
        Some(y) => format!("{} ({})", or_dash(&meta.cycle), y),
        None => or_dash(&meta.cycle),
    };

    let mut current = (page, layer);
    for (i, sheet) in sheets.iter().enumerate() {
        if i > 0 {
            current = doc.add_page(Mm(A4_LONG), Mm(A4_SHORT), format!("Feuille {}", i + 1));
        }
        let layer = doc.get_page(current.0).get_layer(current.1);

        let mut y = A4_SHORT - MARGIN - 6.0;
        layer.use_text(fit(SCHOOL_NAME, 95), 9.0, Mm(MARGIN), Mm(y), &fonts.bold);
        layer.use_text(sheet.page_label(), 8.0, Mm(A4_LONG - MARGIN - 20.0), Mm(y), &fonts.regular);
        y -= 6.0;
        layer.use_text(
            format!(
                "Classe : {}    Filière : {}    Année académique : {}    Cycle : {}    Période : {}",
                or_dash(&meta.class_label),
                or_dash(&meta.filiere),
                or_dash(&meta.academic_year),
                cycle,
                or_dash(&meta.period)
            ),
            8.0,
            Mm(MARGIN),
            Mm(y),
            &fonts.regular,
        );
        y -= 8.0;
        layer.set_fill_color(green());
        layer.use_text("LISTE DE PRÉSENCE", 12.0, Mm(A4_LONG / 2.0 - 22.0), Mm(y), &fonts.bold);
        layer.set_fill_color(black());
        y -= 4.0;

        layer.set_outline_color(black());
        layer.set_outline_thickness(0.4);

        // en-tête
        let header_bottom = y - ROW_H;
        rect(&layer, MARGIN, header_bottom, table_w, ROW_H);
        layer.use_text("N°", 7.5, Mm(MARGIN + 2.0), Mm(header_bottom + 2.0), &fonts.bold);
        layer.use_text("NOMS & PRÉNOMS", 7.5, Mm(MARGIN + NUM_W + 2.0), Mm(header_bottom + 2.0), &fonts.bold);
        for (d, day) in days.iter().enumerate() {
            let x = MARGIN + NUM_W + NAME_W + d as f32 * day_w;
            layer.use_text(day.to_uppercase(), 7.5, Mm(x + 2.0), Mm(header_bottom + 2.0), &fonts.bold);
        }

        // lignes
        let bottom = header_bottom - ATTENDANCE_ROWS_PER_SHEET as f32 * ROW_H;
        for (r, row) in sheet.rows.iter().enumerate() {
            let row_bottom = header_bottom - (r as f32 + 1.0) * ROW_H;
            segment(&layer, MARGIN, row_bottom, MARGIN + table_w, row_bottom);
            if let Some(n) = row.number {
                layer.use_text(n.to_string(), 7.5, Mm(MARGIN + 2.0), Mm(row_bottom + 2.0), &fonts.regular);
            }
            if let Some(s) = row.item {
                layer.use_text(
                    fit(&row_name(s), 48),
                    7.5,
                    Mm(MARGIN + NUM_W + 2.0),
                    Mm(row_bottom + 2.0),
                    &fonts.regular,
                );
            }
        }

        // colonnes
        segment(&layer, MARGIN, header_bottom + ROW_H, MARGIN, bottom);
        segment(&layer, MARGIN + NUM_W, header_bottom + ROW_H, MARGIN + NUM_W, bottom);
        for d in 0..=days.len() {
            let x = MARGIN + NUM_W + NAME_W + d as f32 * day_w;
            segment(&layer, x, header_bottom + ROW_H, x, bottom);
        }

        layer.use_text(
            "Signature enseignant / responsable : ____________________________",
            8.0,
            Mm(MARGIN),
            Mm(bottom - 8.0),
            &fonts.regular,
        );
    }

    log::debug!(
        "PDF présence « {} » : {} étudiant(s), {} feuille(s)",
        meta.class_label,
        students.len(),
        sheets.len()
    );
    doc.save_to_bytes().map_err(pdf_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge(name: &str) -> BadgeData {
        BadgeData {
            full_name: name.into(),
            matricule: "IPM-001".into(),
            class_label: "BAT-BTS1".into(),
            academic_year: "2025-2026".into(),
            filiere: Some("Filières industrielles".into()),
            photo_url: None,
        }
    }

    #[test]
    fn test_badges_pdf_bytes() {
        let badges: Vec<BadgeData> = (0..5).map(|i| badge(&format!("NOM{} Prénom", i))).collect();
        let bytes = badges_pdf(&badges).expect("pdf");
        assert!(bytes.starts_with(b"%PDF"));
        assert!(badges_pdf(&[]).expect("pdf vide").starts_with(b"%PDF"));
    }

    #[test]
    fn test_attendance_pdf_bytes() {
        let students: Vec<Student> = (0..30)
            .map(|i| Student {
                id: i.to_string(),
                last_name: format!("NOM{}", i),
                first_name: "Jean".into(),
                ..Default::default()
            })
            .collect();
        let refs: Vec<&Student> = students.iter().collect();
        let meta = AttendanceMeta {
            class_label: "BAT - BTS1".into(),
            cycle: "BTS".into(),
            study_year: Some(1),
            ..Default::default()
        };
        let bytes = attendance_pdf(&meta, &refs).expect("pdf");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_attendance_pdf_empty_list_refused() {
        let meta = AttendanceMeta {
            class_label: "CGE".into(),
            ..Default::default()
        };
        assert!(matches!(attendance_pdf(&meta, &[]), Err(ScolariteError::NoStudents)));
    }

    #[test]
    fn test_fit_and_file_name() {
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("abc", 4), "abc");
        assert_eq!(badges_file_name("2025-11-24"), "badges-etudiants-2025-11-24.pdf");
    }
}
