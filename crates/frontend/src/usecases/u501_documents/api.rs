//! Documents rendus par le backend, ouverts dans un nouvel onglet.

use crate::shared::api_utils::api_url;

/// `GET /documents/:id/certificate`
pub fn certificate_url(student_id: &str) -> String {
    api_url(&format!("/documents/{}/certificate", urlencoding::encode(student_id)))
}

/// `GET /documents/:id/card`
pub fn card_url(student_id: &str) -> String {
    api_url(&format!("/documents/{}/card", urlencoding::encode(student_id)))
}
