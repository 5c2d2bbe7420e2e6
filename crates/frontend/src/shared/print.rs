//! Fenêtres d'impression et boîtes de dialogue du navigateur.

use contracts::shared::documents::HtmlDocument;

pub const POPUP_BLOCKED: &str = "Popup bloquée. Autorise les popups pour exporter en PDF.";

/// Ouvre le document dans un nouvel onglet ; l'impression se lance au
/// chargement et la fenêtre se referme ensuite
pub fn open_print_window(doc: &HtmlDocument) -> Result<(), String> {
    let window = web_sys::window().ok_or("Pas de fenêtre")?;
    let popup = window
        .open_with_url_and_target("", "_blank")
        .ok()
        .flatten()
        .ok_or_else(|| POPUP_BLOCKED.to_string())?;
    let document = popup.document().ok_or_else(|| POPUP_BLOCKED.to_string())?;
    let html = doc.to_print_html();

    // open / write / close sur le document de la fenêtre ouverte
    let write = js_sys::Reflect::get(&document, &"write".into()).map_err(|e| format!("{:?}", e))?;
    let write: js_sys::Function = write.into();
    let open = js_sys::Reflect::get(&document, &"open".into()).map_err(|e| format!("{:?}", e))?;
    let close = js_sys::Reflect::get(&document, &"close".into()).map_err(|e| format!("{:?}", e))?;
    js_sys::Function::from(open).call0(&document).map_err(|e| format!("{:?}", e))?;
    write.call1(&document, &html.into()).map_err(|e| format!("{:?}", e))?;
    js_sys::Function::from(close).call0(&document).map_err(|e| format!("{:?}", e))?;

    log::debug!("impression « {} » ({} page(s))", doc.title, doc.page_count());
    Ok(())
}

/// Ouvre une URL du backend dans un nouvel onglet
pub fn open_in_new_tab(url: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("Pas de fenêtre")?;
    window
        .open_with_url_and_target(url, "_blank")
        .ok()
        .flatten()
        .map(|_| ())
        .ok_or_else(|| POPUP_BLOCKED.to_string())
}

pub fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(message);
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Affiche l'erreur d'une action d'impression ou de téléchargement
pub fn alert_on_error(result: Result<(), String>) {
    if let Err(e) = result {
        log::error!("{}", e);
        alert(&e);
    }
}
