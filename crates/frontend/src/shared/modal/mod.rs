use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

/// Fenêtre modale : Échap, clic sur le fond ou la croix ferment
#[component]
pub fn Modal(
    #[prop(into)]
    title: String,
    on_close: Callback<()>,
    /// Boutons affichés dans l'en-tête (Enregistrer, Imprimer...)
    #[prop(optional)]
    action_buttons: Option<ChildrenFn>,
    /// Largeur maximale CSS, `760px` par défaut
    #[prop(optional, into)]
    max_width: Option<String>,
    children: Children,
) -> impl IntoView {
    let listener = StoredValue::new_local(None::<Closure<dyn FnMut(web_sys::Event)>>);

    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
                if keyboard_event.key() == "Escape" {
                    on_close.run(());
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        }
        listener.set_value(Some(closure));
    });

    on_cleanup(move || {
        if let (Some(window), Some(closure)) = (web_sys::window(), listener.try_update_value(|l| l.take()).flatten()) {
            let _ = window.remove_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        }
    });

    let stop_propagation = move |ev: ev::MouseEvent| ev.stop_propagation();
    let style = format!("max-width: {};", max_width.unwrap_or_else(|| "760px".to_string()));

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" style=style on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <div class="modal-header-actions">
                        {move || action_buttons.as_ref().map(|buttons| buttons())}
                        <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                            {icon("x")}
                        </button>
                    </div>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
