use crate::domain::a003_subject::api;
use contracts::domain::a003_subject::{Subject, SubjectForm, SubjectSubmission};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use uuid::Uuid;

#[derive(Clone)]
pub struct SubjectDetailsViewModel {
    pub form: RwSignal<SubjectForm>,
    /// Une clé stable par ligne d'UE du mode lot, alignée sur `form.ue_rows`
    pub row_keys: RwSignal<Vec<Uuid>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl SubjectDetailsViewModel {
    pub fn new(subject: Option<&Subject>) -> Self {
        let form = subject.map(SubjectForm::from_subject).unwrap_or_default();
        let keys = form.ue_rows.iter().map(|_| Uuid::new_v4()).collect();
        Self {
            form: RwSignal::new(form),
            row_keys: RwSignal::new(keys),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn apply(&self, transition: impl FnOnce(SubjectForm) -> SubjectForm) {
        self.form.update(|f| *f = transition(std::mem::take(f)));
    }

    pub fn set_bulk(&self, bulk: bool) {
        self.apply(|f| f.set_bulk(bulk));
        self.sync_keys();
    }

    pub fn add_row(&self) {
        self.apply(SubjectForm::add_ue_row);
        self.row_keys.update(|k| k.push(Uuid::new_v4()));
    }

    pub fn remove_row(&self, key: Uuid) {
        let Some(index) = self.row_keys.with_untracked(|k| k.iter().position(|x| *x == key)) else {
            return;
        };
        let before = self.form.with_untracked(|f| f.ue_rows.len());
        self.apply(|f| f.remove_ue_row(index));
        if self.form.with_untracked(|f| f.ue_rows.len()) < before {
            self.row_keys.update(|k| {
                k.remove(index);
            });
        }
    }

    pub fn update_row(&self, key: Uuid, value: &str) {
        if let Some(index) = self.row_keys.with_untracked(|k| k.iter().position(|x| *x == key)) {
            self.apply(|f| f.update_ue_row(index, value));
        }
    }

    pub fn row_value(&self, key: Uuid) -> String {
        let index = self.row_keys.with(|k| k.iter().position(|x| *x == key));
        index
            .and_then(|i| self.form.with(|f| f.ue_rows.get(i).cloned()))
            .unwrap_or_default()
    }

    /// Une clé par ligne après un changement de mode
    fn sync_keys(&self) {
        let rows = self.form.with_untracked(|f| f.ue_rows.len());
        self.row_keys.update(|k| {
            k.truncate(rows);
            while k.len() < rows {
                k.push(Uuid::new_v4());
            }
        });
    }

    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        if self.saving.get_untracked() {
            return;
        }
        let submission = match self.form.with_untracked(|f| f.submit()) {
            Ok(s) => s,
            Err(msg) => {
                self.error.set(Some(msg));
                return;
            }
        };
        self.error.set(None);
        self.saving.set(true);

        let error = self.error;
        let saving = self.saving;
        spawn_local(async move {
            let result = match submission {
                SubjectSubmission::Create(payload) => api::create_subject(&payload).await,
                SubjectSubmission::Update { id, payload } => api::update_subject(&id, &payload).await,
                SubjectSubmission::Bulk(payloads) => {
                    let mut outcome = Ok(());
                    for payload in &payloads {
                        if let Err(e) = api::create_subject(payload).await {
                            outcome = Err(format!("« {} » : {}", payload.label, e));
                            break;
                        }
                    }
                    if outcome.is_ok() {
                        log::info!("{} UE enregistrée(s)", payloads.len());
                    }
                    outcome
                }
            };
            saving.set(false);
            match result {
                Ok(()) => (on_saved)(()),
                Err(e) => {
                    log::error!("enregistrement matière : {}", e);
                    error.set(Some(e));
                }
            }
        });
    }
}
