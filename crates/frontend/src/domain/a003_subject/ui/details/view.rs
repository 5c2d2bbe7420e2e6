use super::view_model::SubjectDetailsViewModel;
use crate::shared::components::{same_options, SelectField};
use crate::shared::icons::icon;
use contracts::domain::a003_subject::{Subject, SubjectForm};
use contracts::shared::dictionaries::cycles::{allowed_years, Cycle};
use contracts::shared::dictionaries::programs::{filiere_labels, options_for, specialites_for};
use leptos::prelude::*;
use std::rc::Rc;

#[component]
pub fn SubjectDetails(
    subject: Option<Subject>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let vm = SubjectDetailsViewModel::new(subject.as_ref());
    let vm_clone = vm.clone();
    let vm_toggle = vm.clone();
    let vm_rows = vm.clone();
    let form = vm.form;
    let is_edit = form.with_untracked(SubjectForm::is_edit);

    let text_input = move |label: &'static str, get: fn(&SubjectForm) -> String, set: fn(&mut SubjectForm, String)| {
        view! {
            <div class="form-group">
                <label>{label}</label>
                <input
                    type="text"
                    prop:value=move || form.with(get)
                    on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                />
            </div>
        }
    };

    view! {
        <div class="details-container subject-details">
            {
                let vm = vm_clone.clone();
                move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })
            }

            <div class="form-grid">
                <div class="form-group">
                    <label>"Filière *"</label>
                    <SelectField
                        options=same_options(filiere_labels())
                        value=Signal::derive(move || form.with(|f| f.filiere.clone()))
                        on_change={
                            let vm = vm_clone.clone();
                            Callback::new(move |v: String| vm.apply(|f| f.on_filiere_change(&v)))
                        }
                        placeholder="Sélectionner une filière"
                    />
                </div>
                <div class="form-group">
                    <label>"Spécialité *"</label>
                    <SelectField
                        options=Signal::derive(move || form.with(|f| {
                            specialites_for(&f.filiere)
                                .iter()
                                .map(|s| {
                                    let label = if s.code.is_empty() {
                                        s.label.to_string()
                                    } else {
                                        format!("{} ({})", s.label, s.code)
                                    };
                                    (s.label.to_string(), label)
                                })
                                .collect::<Vec<_>>()
                        }))
                        value=Signal::derive(move || form.with(|f| {
                            if f.is_industrial() { f.specialite_parent.clone() } else { f.specialite.clone() }
                        }))
                        on_change={
                            let vm = vm_clone.clone();
                            Callback::new(move |v: String| vm.apply(|f| f.on_specialite_select(&v)))
                        }
                        disabled=Signal::derive(move || form.with(|f| f.filiere.is_empty()))
                        placeholder="Sélectionner une spécialité"
                    />
                </div>
                <Show when=move || form.with(SubjectForm::is_industrial)>
                    <div class="form-group">
                        <label>"Option *"</label>
                        <SelectField
                            options=Signal::derive(move || form.with(|f| {
                                options_for(&f.filiere, &f.specialite_parent)
                                    .iter()
                                    .map(|o| (o.label.to_string(), format!("{} ({})", o.label, o.code)))
                                    .collect::<Vec<_>>()
                            }))
                            value=Signal::derive(move || form.with(|f| f.option.clone()))
                            on_change=Callback::new(move |v: String| form.update(|f| *f = std::mem::take(f).on_option_select(&v)))
                            disabled=Signal::derive(move || form.with(|f| f.specialite_parent.is_empty()))
                            placeholder="Sélectionner une option"
                        />
                    </div>
                </Show>
                <div class="form-group">
                    <label>"Code salle"</label>
                    <input type="text" readonly=true prop:value=move || form.with(|f| f.specialite_code.clone()) />
                </div>
                <div class="form-group">
                    <label>"Cycle *"</label>
                    <SelectField
                        options=same_options(Cycle::all().iter().map(|c| c.label()))
                        value=Signal::derive(move || form.with(|f| f.cycle.clone()))
                        on_change=Callback::new(move |v: String| form.update(|f| *f = std::mem::take(f).on_cycle_change(&v)))
                        placeholder="Sélectionner un cycle"
                    />
                </div>
                <div class="form-group">
                    <label>"Année d’étude *"</label>
                    <div class="year-picker">
                        {move || {
                            let (cycle, current) = form.with(|f| (f.cycle.clone(), f.study_year));
                            allowed_years(&cycle)
                                .iter()
                                .map(|&y| view! {
                                    <button
                                        type="button"
                                        class="year-chip"
                                        class:year-chip--active=current == Some(y)
                                        on:click=move |_| form.update(|f| *f = std::mem::take(f).pick_year(y))
                                    >
                                        {format!("Niveau {}", y)}
                                    </button>
                                })
                                .collect_view()
                        }}
                    </div>
                </div>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.is_optional)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            form.update(|f| f.is_optional = checked);
                        }
                    />
                    " Matière optionnelle (commune à toutes les spécialités de la filière)"
                </label>
            </div>

            <Show when=move || !is_edit>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.bulk)
                        on:change={
                            let vm = vm_toggle.clone();
                            move |ev| vm.set_bulk(event_target_checked(&ev))
                        }
                    />
                    " Saisir plusieurs UE pour ce périmètre"
                </label>
            </Show>

            <Show
                when=move || form.with(|f| f.bulk && !f.is_edit())
                fallback=move || view! {
                    <div class="form-grid">
                        {text_input("Intitulé de l’UE *", |f| f.ue_title.clone(), |f, v| f.ue_title = v)}
                        {text_input("Intitulé de l’EC", |f| f.ec_title.clone(), |f, v| f.ec_title = v)}
                        {text_input("Crédits", |f| f.credits.clone(), |f, v| f.credits = v)}
                        {text_input("Coefficient", |f| f.coefficient.clone(), |f, v| f.coefficient = v)}
                    </div>
                }
            >
                {
                    let vm = vm_rows.clone();
                    let keys = vm.row_keys;
                    view! {
                        <div class="ue-rows">
                            <For
                                each=move || keys.get()
                                key=|k| *k
                                children={
                                    let vm = vm.clone();
                                    move |key| {
                                        let vm_input = vm.clone();
                                        let vm_value = vm.clone();
                                        let vm_remove = vm.clone();
                                        view! {
                                            <div class="ue-row">
                                                <input
                                                    type="text"
                                                    placeholder="Intitulé de l’UE"
                                                    prop:value=move || vm_value.row_value(key)
                                                    on:input=move |ev| vm_input.update_row(key, &event_target_value(&ev))
                                                />
                                                <button type="button" class="btn btn-link" title="Retirer" on:click=move |_| vm_remove.remove_row(key)>
                                                    {icon("trash")}
                                                </button>
                                            </div>
                                        }
                                    }
                                }
                            />
                            <button type="button" class="btn btn-secondary" on:click=move |_| vm.add_row()>
                                {icon("plus")}
                                " Ajouter une UE"
                            </button>
                        </div>
                    }
                }
            </Show>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    disabled={
                        let vm = vm.clone();
                        move || vm.saving.get()
                    }
                    on:click={
                        let vm = vm.clone();
                        let on_saved = on_saved.clone();
                        move |_| vm.save_command(on_saved.clone())
                    }
                >
                    {icon("save")}
                    {if is_edit { " Enregistrer" } else { " Créer" }}
                </button>
                <button class="btn btn-secondary" on:click=move |_| (on_cancel)(())>
                    {icon("x")}
                    " Annuler"
                </button>
            </div>
        </div>
    }
}
