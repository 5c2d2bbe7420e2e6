use crate::domain::a001_student::api;
use crate::shared::file_utils::read_as_data_url;
use crate::shared::print::alert;
use contracts::domain::a001_student::form::validate_photo;
use contracts::domain::a001_student::{Student, StudentForm};
use contracts::shared::error::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

#[derive(Clone)]
pub struct StudentDetailsViewModel {
    pub form: RwSignal<StudentForm>,
    pub errors: RwSignal<FieldErrors>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl StudentDetailsViewModel {
    /// Nouvelle inscription, ou modification si un étudiant est fourni
    pub fn new(student: Option<&Student>) -> Self {
        let form = match student {
            Some(s) => StudentForm::from_student(s),
            None => StudentForm::new_enrollment(None),
        };
        Self {
            form: RwSignal::new(form),
            errors: RwSignal::new(FieldErrors::new()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    /// Applique une transition pure du formulaire
    pub fn apply(&self, transition: impl FnOnce(StudentForm) -> StudentForm) {
        self.form.update(|f| *f = transition(std::mem::take(f)));
    }

    pub fn field_error(&self, field: &'static str) -> impl Fn() -> Option<String> + Send + Sync + 'static {
        let errors = self.errors;
        move || errors.with(|e| e.get(field).map(str::to_string))
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with_untracked(|f| f.is_edit())
    }

    /// Photo choisie : type et taille vérifiés avant lecture
    pub fn select_photo(&self, file: web_sys::File) {
        let mime = file.type_();
        let size = file.size() as u64;
        if let Err(msg) = validate_photo(&mime, size) {
            alert(&msg);
            return;
        }
        let vm = self.clone();
        spawn_local(async move {
            match read_as_data_url(&file).await {
                Ok(data_url) => match vm.form.get_untracked().set_photo(&mime, size, data_url) {
                    Ok(next) => vm.form.set(next),
                    Err(msg) => vm.error.set(Some(msg)),
                },
                Err(e) => {
                    log::error!("lecture de la photo : {}", e);
                    vm.error.set(Some(e));
                }
            }
        });
    }

    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        if self.saving.get_untracked() {
            return;
        }
        let current = self.form.get_untracked();
        let payload = match current.to_payload() {
            Ok(p) => p,
            Err(errors) => {
                self.errors.set(errors);
                self.error.set(Some("Veuillez corriger les champs signalés.".to_string()));
                return;
            }
        };
        self.errors.set(FieldErrors::new());
        self.error.set(None);
        self.saving.set(true);

        let error = self.error;
        let saving = self.saving;
        spawn_local(async move {
            let result = match &current.id {
                Some(id) if current.is_edit() => api::update_student(id, &payload).await,
                _ => api::create_student(&payload).await.map(|created| {
                    log::info!("étudiant inscrit : {}", created.id);
                    alert(&created.confirmation_message());
                }),
            };
            saving.set(false);
            match result {
                Ok(()) => (on_saved)(()),
                Err(e) => {
                    log::error!("enregistrement étudiant : {}", e);
                    error.set(Some(e));
                }
            }
        });
    }
}
