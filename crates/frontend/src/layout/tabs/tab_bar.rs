use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use leptos::ev;
use leptos::prelude::*;

#[component]
fn TabHandle(tab: TabData) -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let key_active = tab.key.clone();
    let is_active = Memo::new(move |_| ctx.active.get().as_deref() == Some(key_active.as_str()));

    let key_click = tab.key.clone();
    let key_close = tab.key.clone();
    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        ctx.close_tab(&key_close);
    };

    view! {
        <div class="tab" class:active=is_active on:click=move |_| ctx.activate_tab(&key_click)>
            <span>{tab.title}</span>
            <button class="tab-close" title="Fermer" on:click=on_close>"×"</button>
        </div>
    }
}

#[component]
pub fn TabBar() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <div class="tab-bar">
            <For
                each=move || ctx.opened.get()
                key=|tab| tab.key.clone()
                children=|tab: TabData| view! { <TabHandle tab=tab /> }
            />
        </div>
    }
}
