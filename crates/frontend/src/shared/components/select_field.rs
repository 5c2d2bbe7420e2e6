use leptos::prelude::*;

/// Liste déroulante native : `options` = (valeur, libellé).
/// Le premier choix vide porte le `placeholder`.
#[component]
pub fn SelectField(
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    #[prop(into)]
    value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional)]
    placeholder: &'static str,
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
    #[prop(optional)]
    id: &'static str,
) -> impl IntoView {
    view! {
        <select
            id=id
            class="form-select"
            prop:value=move || value.get()
            disabled=move || disabled.get().unwrap_or(false)
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            <option value="">{placeholder}</option>
            {move || {
                let current = value.get();
                options
                    .get()
                    .into_iter()
                    .map(|(v, label)| {
                        let selected = v == current;
                        view! { <option value=v selected=selected>{label}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
}

/// Options dont la valeur est aussi le libellé
pub fn same_options<I, S>(values: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| (v.as_ref().to_string(), v.as_ref().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_options() {
        assert_eq!(
            same_options(["BTS", "LICENCE"]),
            vec![("BTS".to_string(), "BTS".to_string()), ("LICENCE".to_string(), "LICENCE".to_string())]
        );
    }
}
