//! Documents imprimables : aperçu HTML, fenêtres d'impression et PDF.

pub mod attendance_sheet;
pub mod badge_sheet;
pub mod card;
pub mod certificate;
pub mod class_roster;
pub mod dates;
pub mod grade_sheet;
pub mod html;
pub mod layout;
pub mod pdf;
pub mod school;
pub mod transcript;

pub use html::{HtmlDocument, PageFormat};
