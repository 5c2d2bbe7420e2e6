//! Saisie des notes d'une fiche pour une matière et une session.

use crate::domain::a004_grade::api;
use crate::shared::icons::icon;
use contracts::domain::a004_grade::entry::format_score;
use contracts::domain::a004_grade::{GradeEntryForm, GradeStatus, NotesGroup, Session};
use contracts::shared::error::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn status_class(status: GradeStatus) -> &'static str {
    match status {
        GradeStatus::Valide => "status status--ok",
        GradeStatus::Ajourne => "status status--ko",
        GradeStatus::NonSaisi => "status status--empty",
    }
}

fn raw_score(form: &GradeEntryForm, student_id: &str) -> String {
    form.rows
        .iter()
        .find(|(s, _)| s.id == student_id)
        .map(|(_, raw)| raw.clone())
        .unwrap_or_default()
}

#[component]
pub fn GradeEntry(group: NotesGroup, on_close: Callback<()>) -> impl IntoView {
    let form = RwSignal::new(GradeEntryForm::for_group(&group));
    let errors = RwSignal::new(FieldErrors::new());
    let (saving, set_saving) = signal(false);
    let (message, set_message) = signal::<Option<String>>(None);

    let save = move |_| {
        let request = match form.with_untracked(|f| f.to_request()) {
            Ok(r) => r,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::new());
        set_saving.set(true);
        spawn_local(async move {
            match api::save_notes(&request).await {
                Ok(response) => {
                    let count = response.saved.unwrap_or(request.grades.len() as u32);
                    set_message.set(Some(format!("{} note(s) enregistrée(s).", count)));
                }
                Err(e) => {
                    log::error!("enregistrement des notes : {}", e);
                    set_message.set(Some(e));
                }
            }
            set_saving.set(false);
        });
    };

    let error_for = move |field: &'static str| {
        move || {
            errors
                .with(|e| e.get(field).map(str::to_string))
                .map(|msg| view! { <div class="field-error">{msg}</div> })
        }
    };

    let rows = form.with_untracked(|f| f.rows.iter().map(|(s, _)| s.clone()).collect::<Vec<_>>());

    view! {
        <div class="grade-entry">
            <div class="grade-entry__meta">
                {group.specialite_display()} " · " {group.level_label()} " · "
                {group.academic_year.clone().unwrap_or_else(|| "—".to_string())}
            </div>

            <div class="form-grid">
                <div class="form__group">
                    <label class="form__label">"Matière *"</label>
                    <input
                        class="form__input"
                        type="text"
                        prop:value=move || form.with(|f| f.subject_label.clone())
                        on:input=move |ev| {
                            let v = event_target_value(&ev);
                            form.update(|f| f.subject_label = v);
                        }
                    />
                    {error_for("subjectLabel")}
                </div>
                <div class="form__group">
                    <label class="form__label">"Session"</label>
                    <select
                        class="form__select"
                        prop:value=move || form.with(|f| f.session.code())
                        on:change=move |ev| {
                            let session = Session::from_code(&event_target_value(&ev));
                            form.update(|f| f.session = session);
                        }
                    >
                        {[Session::Normale, Session::Rattrapage]
                            .into_iter()
                            .map(|s| view! { <option value=s.code()>{s.label()}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="form__group">
                    <label class="form__label">"Barème"</label>
                    <input
                        class="form__input"
                        type="text"
                        inputmode="decimal"
                        prop:value=move || form.with(|f| f.max_score.clone())
                        on:input=move |ev| {
                            let v = event_target_value(&ev);
                            form.update(|f| f.max_score = v);
                        }
                    />
                    {error_for("maxScore")}
                </div>
            </div>

            <table class="grade-entry__table">
                <thead>
                    <tr>
                        <th>"N°"</th>
                        <th>"Matricule"</th>
                        <th>"Noms et prénoms"</th>
                        <th>"Note"</th>
                        <th>"/20"</th>
                        <th>"Mention"</th>
                        <th>"Statut"</th>
                    </tr>
                </thead>
                <tbody>
                    {rows.into_iter().enumerate().map(|(i, student)| {
                        let id = student.id.clone();
                        let id_value = student.id.clone();
                        let id_input = student.id.clone();
                        let evaluated = Memo::new(move |_| form.with(|f| f.evaluate(&raw_score(f, &id))));
                        view! {
                            <tr>
                                <td>{i + 1}</td>
                                <td>{student.matricule.clone().unwrap_or_default()}</td>
                                <td class="td-left">{student.full_name()}</td>
                                <td>
                                    <input
                                        class="form__input form__input--score"
                                        type="text"
                                        inputmode="decimal"
                                        prop:value=move || form.with(|f| raw_score(f, &id_value))
                                        on:input=move |ev| {
                                            let v = event_target_value(&ev);
                                            form.update(|f| *f = f.clone().set_score(&id_input, &v));
                                        }
                                    />
                                </td>
                                <td>{move || evaluated.get().0.map(format_score).unwrap_or_default()}</td>
                                <td>{move || evaluated.get().1.map(|m| m.label()).unwrap_or_default()}</td>
                                <td>
                                    {move || {
                                        let status = evaluated.get().2;
                                        view! { <span class=status_class(status)>{status.label()}</span> }
                                    }}
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>
            {error_for("grades")}

            {move || message.get().map(|m| view! { <div class="info-box">{m}</div> })}

            <div class="details-actions">
                <Button appearance=ButtonAppearance::Primary on_click=save disabled=Signal::derive(move || saving.get())>
                    {icon("save")}
                    {move || if saving.get() { " Enregistrement..." } else { " Enregistrer les notes" }}
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
    fn test_status_class() {
        assert_eq!(status_class(GradeStatus::Valide), "status status--ok");
        assert_eq!(status_class(GradeStatus::NonSaisi), "status status--empty");
    }
}
