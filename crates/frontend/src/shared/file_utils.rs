//! Lecture des fichiers choisis dans un `<input type="file">`.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader, HtmlInputElement};

/// Premier fichier de l'input ciblé par l'événement
pub fn first_file(ev: &web_sys::Event) -> Option<File> {
    ev.target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

/// Contenu du fichier en data URL (`data:image/png;base64,...`)
pub async fn read_as_data_url(file: &File) -> Result<String, String> {
    let reader = FileReader::new().map_err(|e| format!("Lecture du fichier impossible : {:?}", e))?;

    let promise = js_sys::Promise::new(&mut |resolve: js_sys::Function, reject: js_sys::Function| {
        let on_load = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let on_error = Closure::once_into_js(move || {
            let _ = reject.call0(&JsValue::NULL);
        });
        reader.set_onload(Some(on_load.unchecked_ref()));
        reader.set_onerror(Some(on_error.unchecked_ref()));
    });

    reader
        .read_as_data_url(file)
        .map_err(|e| format!("Lecture du fichier impossible : {:?}", e))?;
    JsFuture::from(promise)
        .await
        .map_err(|_| "Lecture du fichier impossible".to_string())?;

    reader
        .result()
        .ok()
        .and_then(|v| v.as_string())
        .ok_or_else(|| "Fichier illisible".to_string())
}
