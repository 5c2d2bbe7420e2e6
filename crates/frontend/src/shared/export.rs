//! Téléchargements déclenchés depuis le navigateur (CSV, PDF, HTML).

use contracts::shared::export::{build_csv, CsvExportable};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

pub const MIME_CSV: &str = "text/csv;charset=utf-8;";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_HTML: &str = "text/html;charset=utf-8";

/// Exporte des lignes en CSV ; `Err` si la liste est vide
pub fn export_csv<T: CsvExportable>(rows: &[T], filename: &str) -> Result<(), String> {
    let content = build_csv(rows).ok_or_else(|| "Aucune donnée à exporter.".to_string())?;
    download_text(&content, MIME_CSV, filename)
}

pub fn download_text(content: &str, mime: &str, filename: &str) -> Result<(), String> {
    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(content));
    let properties = BlobPropertyBag::new();
    properties.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &properties)
        .map_err(|e| format!("Création du fichier impossible : {:?}", e))?;
    download_blob(&blob, filename)
}

pub fn download_bytes(bytes: &[u8], mime: &str, filename: &str) -> Result<(), String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());
    let properties = BlobPropertyBag::new();
    properties.set_type(mime);
    let blob = Blob::new_with_buffer_source_sequence_and_options(&parts, &properties)
        .map_err(|e| format!("Création du fichier impossible : {:?}", e))?;
    download_blob(&blob, filename)
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("Pas de fenêtre")?;
    let document = window.document().ok_or("Pas de document")?;
    let body = document.body().ok_or("Pas de body")?;

    let url = Url::create_object_url_with_blob(blob).map_err(|e| format!("URL de téléchargement : {:?}", e))?;
    let anchor = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("{:?}", e))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("{:?}", e))?;

    body.append_child(&anchor).map_err(|e| format!("{:?}", e))?;
    anchor.click();
    body.remove_child(&anchor).map_err(|e| format!("{:?}", e))?;
    Url::revoke_object_url(&url).map_err(|e| format!("{:?}", e))?;

    log::info!("téléchargement : {}", filename);
    Ok(())
}
