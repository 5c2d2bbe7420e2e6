use super::view_model::StudentDetailsViewModel;
use crate::shared::components::{same_options, SelectField};
use crate::shared::date_utils::current_year;
use crate::shared::file_utils::first_file;
use crate::shared::icons::icon;
use crate::shared::phone_input::PhoneInput;
use contracts::domain::a001_student::form::FEE_LOCKED_NOTE;
use contracts::domain::a001_student::{EnrollmentDetails, IdentityField, Student, StudentForm};
use contracts::shared::dictionaries::cycles::{academic_years, Cycle};
use contracts::shared::dictionaries::programs::{filiere_labels, options_for, specialites_for};
use contracts::shared::dictionaries::regions::{departments_for, region_names};
use contracts::shared::dictionaries::roles::{
    CLASS_ROLES, EMERGENCY_RELATIONS, LIVING_LANGUAGES, SCHOOL_ROLES,
};
use leptos::prelude::*;
use std::rc::Rc;

fn some_text(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[component]
fn TextField(
    label: &'static str,
    #[prop(into)]
    value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional, into)]
    error: MaybeProp<String>,
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
    #[prop(optional)]
    input_type: &'static str,
    #[prop(optional)]
    required: bool,
) -> impl IntoView {
    let input_type = if input_type.is_empty() { "text" } else { input_type };
    view! {
        <div class="form-group">
            <label>{label}{required.then_some(" *")}</label>
            <input
                type=input_type
                class:input-error=move || error.get().is_some()
                prop:value=move || value.get()
                disabled=move || disabled.get().unwrap_or(false)
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {move || error.get().map(|e| view! { <div class="field-error">{e}</div> })}
        </div>
    }
}

/// Texte optionnel des détails d'inscription
fn detail_field(
    vm: &StudentDetailsViewModel,
    label: &'static str,
    get: fn(&EnrollmentDetails) -> &Option<String>,
    set: fn(&mut EnrollmentDetails, Option<String>),
) -> impl IntoView {
    let form = vm.form;
    view! {
        <TextField
            label=label
            value=Signal::derive(move || form.with(|f| get(&f.details).clone().unwrap_or_default()))
            on_input=Callback::new(move |v: String| form.update(|f| set(&mut f.details, some_text(v))))
        />
    }
}

#[component]
pub fn StudentDetails(
    /// `None` : nouvelle inscription
    student: Option<Student>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let vm = StudentDetailsViewModel::new(student.as_ref());
    let vm_clone = vm.clone();
    let form = vm.form;
    let is_edit = vm.is_edit_mode();
    let identity_locked = Signal::derive(move || form.with(|f| f.is_identity_locked()));

    let identity = {
        let vm = vm_clone.clone();
        move |field: IdentityField| {
            let vm = vm.clone();
            Callback::new(move |v: String| vm.apply(|f| f.set_identity(field, &v)))
        }
    };

    let years = academic_years(current_year());

    view! {
        <div class="details-container student-details">
            {
                let vm = vm_clone.clone();
                move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })
            }

            <div class="details-section">
                <h4>"Identité"</h4>
                <div class="form-grid">
                    <TextField
                        label="Nom"
                        required=true
                        value=Signal::derive(move || form.with(|f| f.last_name.clone()))
                        on_input=identity(IdentityField::LastName)
                        disabled=identity_locked
                        error=Signal::derive(vm.field_error("lastName"))
                    />
                    <TextField
                        label="Prénom"
                        required=true
                        value=Signal::derive(move || form.with(|f| f.first_name.clone()))
                        on_input=identity(IdentityField::FirstName)
                        disabled=identity_locked
                        error=Signal::derive(vm.field_error("firstName"))
                    />
                    <TextField
                        label="Date de naissance"
                        input_type="date"
                        required=true
                        value=Signal::derive(move || form.with(|f| f.birth_date.clone()))
                        on_input=identity(IdentityField::BirthDate)
                        disabled=identity_locked
                        error=Signal::derive(vm.field_error("birthDate"))
                    />
                    <TextField
                        label="Lieu de naissance"
                        value=Signal::derive(move || form.with(|f| f.birth_place.clone()))
                        on_input=Callback::new(move |v: String| form.update(|f| f.birth_place = v))
                    />
                    <div class="form-group">
                        <label>"Année académique *"</label>
                        <SelectField
                            options=same_options(years)
                            value=Signal::derive(move || form.with(|f| f.academic_year.clone()))
                            on_change=identity(IdentityField::AcademicYear)
                            disabled=identity_locked
                            placeholder="Sélectionner"
                        />
                        {
                            let err = vm.field_error("academicYear");
                            move || err().map(|e| view! { <div class="field-error">{e}</div> })
                        }
                    </div>
                    <div class="form-group">
                        <label>"Photo"</label>
                        {move || {
                            let url = form.with(|f| f.photo_url.clone());
                            (!url.is_empty()).then(|| view! { <img class="photo-preview" src=url alt="Photo" /> })
                        }}
                        <input
                            type="file"
                            accept="image/*"
                            on:change={
                                let vm = vm_clone.clone();
                                move |ev| {
                                    if let Some(file) = first_file(&ev) {
                                        vm.select_photo(file);
                                    }
                                }
                            }
                        />
                        <Show when=move || form.with(|f| !f.photo_url.is_empty())>
                            <button class="btn btn-link" on:click=move |_| form.update(|f| *f = std::mem::take(f).clear_photo())>
                                "Retirer la photo"
                            </button>
                        </Show>
                    </div>
                </div>
            </div>

            <div class="details-section">
                <h4>"Formation"</h4>
                <div class="form-grid">
                    <div class="form-group">
                        <label>"Filière *"</label>
                        <SelectField
                            options=same_options(filiere_labels())
                            value=Signal::derive(move || form.with(|f| f.program.filiere.clone()))
                            on_change={
                                let vm = vm_clone.clone();
                                Callback::new(move |v: String| vm.apply(|f| f.on_filiere_change(&v)))
                            }
                            placeholder="Sélectionner une filière"
                        />
                        {
                            let err = vm.field_error("filiere");
                            move || err().map(|e| view! { <div class="field-error">{e}</div> })
                        }
                    </div>
                    <div class="form-group">
                        <label>"Spécialité *"</label>
                        <SelectField
                            options=Signal::derive(move || form.with(|f| {
                                specialites_for(&f.program.filiere)
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
                            value=Signal::derive(move || form.with(|f| f.program.specialite.clone()))
                            on_change={
                                let vm = vm_clone.clone();
                                Callback::new(move |v: String| vm.apply(|f| f.on_specialite_change(&v)))
                            }
                            disabled=Signal::derive(move || form.with(|f| f.program.filiere.is_empty()))
                            placeholder="Sélectionner une spécialité"
                        />
                        {
                            let err = vm.field_error("specialite");
                            move || err().map(|e| view! { <div class="field-error">{e}</div> })
                        }
                    </div>
                    <Show when=move || form.with(StudentForm::is_industrial)>
                        <div class="form-group">
                            <label>"Option"</label>
                            <SelectField
                                options=Signal::derive(move || form.with(|f| {
                                    options_for(&f.program.filiere, &f.program.specialite)
                                        .iter()
                                        .map(|o| (o.label.to_string(), format!("{} ({})", o.label, o.code)))
                                        .collect::<Vec<_>>()
                                }))
                                value=Signal::derive(move || form.with(|f| f.program.option.clone()))
                                on_change=Callback::new(move |v: String| form.update(|f| *f = std::mem::take(f).on_option_change(&v)))
                                placeholder="Sélectionner une option"
                            />
                        </div>
                    </Show>
                    <div class="form-group">
                        <label>"Cycle *"</label>
                        <SelectField
                            options=same_options(Cycle::all().iter().map(|c| c.label()))
                            value=Signal::derive(move || form.with(|f| f.cycle.clone()))
                            on_change={
                                let vm = vm_clone.clone();
                                Callback::new(move |v: String| vm.apply(|f| f.on_cycle_change(&v)))
                            }
                            placeholder="Sélectionner un cycle"
                        />
                        {
                            let err = vm.field_error("cycle");
                            move || err().map(|e| view! { <div class="field-error">{e}</div> })
                        }
                    </div>
                    <div class="form-group">
                        <label>"Année d’étude *"</label>
                        <div class="year-picker">
                            {move || {
                                let (years, current) = form.with(|f| (f.allowed_years(), f.study_year));
                                if years.is_empty() {
                                    return view! { <span class="hint">"Choisissez d’abord un cycle"</span> }.into_any();
                                }
                                years
                                    .iter()
                                    .map(|&y| view! {
                                        <button
                                            type="button"
                                            class="year-chip"
                                            class:year-chip--active=current == Some(y)
                                            on:click=move |_| form.update(|f| *f = std::mem::take(f).pick_year(y))
                                        >
                                            {format!("{}ᵉ année", y)}
                                        </button>
                                    })
                                    .collect_view()
                                    .into_any()
                            }}
                        </div>
                        {
                            let err = vm.field_error("studyYear");
                            move || err().map(|e| view! { <div class="field-error">{e}</div> })
                        }
                    </div>
                    <div class="form-group">
                        <label>"Langue vivante"</label>
                        <SelectField
                            options=same_options(LIVING_LANGUAGES.iter())
                            value=Signal::derive(move || form.with(|f| f.details.living_language.clone().unwrap_or_default()))
                            on_change=Callback::new(move |v: String| form.update(|f| f.details.living_language = some_text(v)))
                            placeholder="—"
                        />
                    </div>
                    {detail_field(&vm, "Série du bac", |d| &d.bac_serie, |d, v| d.bac_serie = v)}
                </div>
            </div>

            <div class="details-section">
                <h4>"Contact et origine"</h4>
                <div class="form-grid">
                    <div class="form-group">
                        <label>"Téléphone"</label>
                        <PhoneInput
                            value=Signal::derive(move || form.with(|f| f.contact.clone()))
                            on_change=Callback::new(move |v: String| form.update(|f| *f = std::mem::take(f).set_contact(&v)))
                            id="student-contact"
                        />
                    </div>
                    <TextField
                        label="E-mail"
                        input_type="email"
                        value=Signal::derive(move || form.with(|f| f.email.clone()))
                        on_input=Callback::new(move |v: String| form.update(|f| f.email = v))
                    />
                    {detail_field(&vm, "Quartier d’habitation", |d| &d.quartier_habitation, |d, v| d.quartier_habitation = v)}
                    <div class="form-group">
                        <label>"Région d’origine"</label>
                        <SelectField
                            options=same_options(region_names())
                            value=Signal::derive(move || form.with(|f| f.details.region_origine.clone().unwrap_or_default()))
                            on_change=Callback::new(move |v: String| form.update(|f| *f = std::mem::take(f).on_region_change(&v)))
                            placeholder="Sélectionner une région"
                        />
                    </div>
                    <div class="form-group">
                        <label>"Département d’origine"</label>
                        <SelectField
                            options=Signal::derive(move || form.with(|f| {
                                same_options(departments_for(f.details.region_origine.as_deref().unwrap_or_default()).iter())
                            }))
                            value=Signal::derive(move || form.with(|f| f.details.departement_origine.clone().unwrap_or_default()))
                            on_change=Callback::new(move |v: String| form.update(|f| *f = std::mem::take(f).on_department_change(&v)))
                            disabled=Signal::derive(move || form.with(|f| f.details.region_origine.is_none()))
                            placeholder="Sélectionner un département"
                        />
                    </div>
                    {detail_field(&vm, "Comment avez-vous connu l’institut ?", |d| &d.canal, |d, v| d.canal = v)}
                </div>
            </div>

            <div class="details-section">
                <h4>"Responsabilités et frais"</h4>
                <div class="form-grid">
                    <div class="form-group">
                        <label>"Responsabilité de classe"</label>
                        <SelectField
                            options=same_options(CLASS_ROLES.iter())
                            value=Signal::derive(move || form.with(|f| f.class_role.clone()))
                            on_change=Callback::new(move |v: String| form.update(|f| f.class_role = v))
                        />
                    </div>
                    <div class="form-group">
                        <label>"Responsabilité établissement"</label>
                        <SelectField
                            options=same_options(SCHOOL_ROLES.iter())
                            value=Signal::derive(move || form.with(|f| f.school_role.clone()))
                            on_change=Callback::new(move |v: String| form.update(|f| f.school_role = v))
                        />
                    </div>
                    <div class="form-group">
                        <label>"Frais d’inscription"</label>
                        <select
                            class="form-select"
                            disabled=move || form.with(|f| f.fee_locked)
                            on:change=move |ev| {
                                let paid = event_target_value(&ev) == "paid";
                                form.update(|f| *f = std::mem::take(f).set_fee_paid(paid));
                            }
                        >
                            <option value="unpaid" selected=move || form.with(|f| !f.registration_fee_paid)>"Non payé"</option>
                            <option value="paid" selected=move || form.with(|f| f.registration_fee_paid)>"Payé"</option>
                        </select>
                        <Show when=move || form.with(|f| f.fee_locked)>
                            <div class="hint">{FEE_LOCKED_NOTE}</div>
                        </Show>
                    </div>
                </div>
            </div>

            <div class="details-section">
                <h4>"Situation"</h4>
                <div class="form-grid">
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.details.has_job)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                form.update(|f| *f = std::mem::take(f).set_has_job(checked));
                            }
                        />
                        " Exerce une activité professionnelle"
                    </label>
                    <Show when=move || form.with(|f| f.details.has_job)>
                        <TextField
                            label="Activité"
                            value=Signal::derive(move || form.with(|f| f.details.job_detail.clone().unwrap_or_default()))
                            on_input=Callback::new(move |v: String| form.update(|f| f.details.job_detail = some_text(v)))
                        />
                    </Show>
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.details.has_disease)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                form.update(|f| *f = std::mem::take(f).set_has_disease(checked));
                            }
                        />
                        " Maladie ou handicap à signaler"
                    </label>
                    <Show when=move || form.with(|f| f.details.has_disease)>
                        <TextField
                            label="Précisions"
                            value=Signal::derive(move || form.with(|f| f.details.disease_detail.clone().unwrap_or_default()))
                            on_input=Callback::new(move |v: String| form.update(|f| f.details.disease_detail = some_text(v)))
                        />
                    </Show>
                </div>
            </div>

            <div class="details-section">
                <h4>"Personne à contacter en cas d’urgence"</h4>
                <div class="form-grid">
                    {detail_field(&vm, "Nom", |d| &d.emergency_name, |d, v| d.emergency_name = v)}
                    {detail_field(&vm, "Adresse", |d| &d.emergency_address, |d, v| d.emergency_address = v)}
                    {detail_field(&vm, "Téléphone", |d| &d.emergency_phone, |d, v| d.emergency_phone = v)}
                    {detail_field(&vm, "Profession", |d| &d.emergency_profession, |d, v| d.emergency_profession = v)}
                    <div class="form-group">
                        <label>"Lien de parenté"</label>
                        <SelectField
                            options=same_options(EMERGENCY_RELATIONS.iter())
                            value=Signal::derive(move || form.with(|f| f.details.emergency_relation.clone().unwrap_or_default()))
                            on_change=Callback::new(move |v: String| form.update(|f| f.details.emergency_relation = some_text(v)))
                            placeholder="—"
                        />
                    </div>
                </div>
            </div>

            <div class="details-section">
                <h4>"Scolarité antérieure"</h4>
                <div class="form-grid">
                    {detail_field(&vm, "Dernier établissement fréquenté", |d| &d.last_school, |d, v| d.last_school = v)}
                    {detail_field(&vm, "Année d’obtention du dernier diplôme", |d| &d.last_diploma_year, |d, v| d.last_diploma_year = v)}
                    <div class="form-group">
                        <label>"Diplôme présenté"</label>
                        <SelectField
                            options=Signal::derive(move || form.with(|f| same_options(f.diploma_options().iter())))
                            value=Signal::derive(move || form.with(|f| f.details.diploma_presented.clone().unwrap_or_default()))
                            on_change=Callback::new(move |v: String| form.update(|f| f.details.diploma_presented = some_text(v)))
                            disabled=Signal::derive(move || form.with(|f| f.cycle.is_empty()))
                            placeholder="Sélectionner"
                        />
                    </div>
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    disabled={
                        let vm = vm_clone.clone();
                        move || vm.saving.get()
                    }
                    on:click={
                        let vm = vm_clone.clone();
                        let on_saved = on_saved.clone();
                        move |_| vm.save_command(on_saved.clone())
                    }
                >
                    {icon("save")}
                    {if is_edit { " Enregistrer les modifications" } else { " Inscrire l’étudiant" }}
                </button>
                <button class="btn btn-secondary" on:click=move |_| (on_cancel)(())>
                    {icon("x")}
                    " Annuler"
                </button>
            </div>
        </div>
    }
}
