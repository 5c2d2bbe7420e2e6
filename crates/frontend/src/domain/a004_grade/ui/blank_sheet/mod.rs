//! Fiche de report vierge : une classe, une page par matière choisie.

use crate::domain::a002_class::api::fetch_classes;
use crate::domain::a003_subject::api::fetch_subjects;
use crate::shared::components::{same_options, SelectField};
use crate::shared::date_utils::current_year;
use crate::shared::icons::icon;
use crate::shared::print::{alert_on_error, open_print_window};
use contracts::domain::a002_class::{ClassDescriptor, ClassRecord};
use contracts::domain::a003_subject::subjects_for_class;
use contracts::shared::dictionaries::cycles::{academic_years, DEFAULT_ACADEMIC_YEAR};
use contracts::shared::documents::grade_sheet::{blank_sheet_document, blank_sheet_level};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Matières retenues : la sélection, sinon le nom saisi à la main
fn chosen_subjects(selected: &[String], manual: &str) -> Vec<String> {
    if !selected.is_empty() {
        return selected.to_vec();
    }
    let manual = manual.trim();
    if manual.is_empty() {
        Vec::new()
    } else {
        vec![manual.to_string()]
    }
}

#[component]
pub fn BlankSheet(on_close: Callback<()>) -> impl IntoView {
    let year = RwSignal::new(DEFAULT_ACADEMIC_YEAR.to_string());
    let (classes, set_classes) = signal::<Vec<ClassRecord>>(Vec::new());
    let class_id = RwSignal::new(String::new());
    let (subjects, set_subjects) = signal::<Vec<String>>(Vec::new());
    let selected = RwSignal::new(Vec::<String>::new());
    let manual = RwSignal::new(String::new());
    let level = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        let y = year.get();
        class_id.set(String::new());
        spawn_local(async move {
            match fetch_classes(&y).await {
                Ok(v) => {
                    set_classes.set(v);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("classes {} : {}", y, e);
                    set_classes.set(Vec::new());
                    set_error.set(Some(e));
                }
            }
        });
    });

    let current_class = move || {
        let id = class_id.get();
        classes.with(|all| all.iter().find(|c| c.id == id).cloned())
    };

    Effect::new(move |_| {
        selected.set(Vec::new());
        set_subjects.set(Vec::new());
        let Some(class) = current_class() else {
            return;
        };
        spawn_local(async move {
            match fetch_subjects(Some(&class.id)).await {
                Ok(all) => {
                    let names: Vec<String> = subjects_for_class(&all, &ClassDescriptor::from(&class))
                        .iter()
                        .map(|s| s.display_label())
                        .filter(|l| !l.is_empty())
                        .collect();
                    set_subjects.set(names);
                }
                Err(e) => log::warn!("matières de la classe {} : {}", class.id, e),
            }
        });
    });

    let toggle = move |name: String| {
        selected.update(|s| {
            if let Some(pos) = s.iter().position(|n| *n == name) {
                s.remove(pos);
            } else {
                s.push(name);
            }
        });
    };

    let print = move |_| {
        let Some(class) = current_class() else {
            set_error.set(Some("Choisis une classe.".to_string()));
            return;
        };
        let names = chosen_subjects(&selected.get_untracked(), &manual.get_untracked());
        let level_label = blank_sheet_level(&class, &level.get_untracked());
        let doc = blank_sheet_document(&class, &year.get_untracked(), &level_label, &names);
        alert_on_error(open_print_window(&doc));
    };

    view! {
        <div class="blank-sheet">
            <div class="form-grid">
                <div class="form__group">
                    <label class="form__label">"Année académique"</label>
                    <SelectField
                        options=Signal::derive(|| same_options(academic_years(current_year())))
                        value=year
                        on_change=Callback::new(move |v: String| year.set(v))
                        placeholder="Toutes"
                    />
                </div>
                <div class="form__group">
                    <label class="form__label">"Classe"</label>
                    <SelectField
                        options=Signal::derive(move || {
                            classes.with(|all| all.iter().map(|c| (c.id.clone(), c.label())).collect::<Vec<_>>())
                        })
                        value=class_id
                        on_change=Callback::new(move |v: String| class_id.set(v))
                        placeholder="Choisir une classe"
                    />
                </div>
                <div class="form__group">
                    <label class="form__label">"Niveau affiché"</label>
                    <input
                        class="form__input"
                        type="text"
                        placeholder="Niveau de la classe"
                        prop:value=move || level.get()
                        on:input=move |ev| level.set(event_target_value(&ev))
                    />
                </div>
            </div>

            <div class="form__group">
                <label class="form__label">"Matières"</label>
                {move || {
                    let names = subjects.get();
                    if names.is_empty() {
                        return view! { <div class="empty">"Aucune matière trouvée pour cette classe."</div> }.into_any();
                    }
                    names.into_iter().map(|name| {
                        let checked_name = name.clone();
                        let toggled_name = name.clone();
                        view! {
                            <label class="checkbox-row">
                                <input
                                    type="checkbox"
                                    prop:checked=move || selected.with(|s| s.contains(&checked_name))
                                    on:change=move |_| toggle(toggled_name.clone())
                                />
                                {name}
                            </label>
                        }
                    }).collect_view().into_any()
                }}
            </div>

            <div class="form__group">
                <label class="form__label">"Ou nom de matière"</label>
                <input
                    class="form__input"
                    type="text"
                    prop:value=move || manual.get()
                    on:input=move |ev| manual.set(event_target_value(&ev))
                />
            </div>

            {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}

            <div class="details-actions">
                <Button appearance=ButtonAppearance::Primary on_click=print>
                    {icon("printer")}
                    " Imprimer"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Fermer"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chosen_subjects() {
        assert_eq!(chosen_subjects(&["RDM".to_string()], "Topo"), vec!["RDM".to_string()]);
        assert_eq!(chosen_subjects(&[], " Topo "), vec!["Topo".to_string()]);
        assert!(chosen_subjects(&[], "  ").is_empty());
    }
}
