use crate::shared::api_utils::{api_url, error_message, read_json};
use contracts::domain::a003_subject::{Subject, SubjectPayload};
use contracts::domain::common::AggregateRoot;
use gloo_net::http::{Request, Response};

async fn send(request: Result<Request, gloo_net::Error>, url: &str) -> Result<Response, String> {
    request
        .map_err(|e| format!("Requête invalide : {}", e))?
        .send()
        .await
        .map_err(|e| {
            log::error!("{} : {}", url, e);
            format!("Erreur réseau : {}", e)
        })
}

/// `GET /subjects[?classId=]`
pub async fn fetch_subjects(class_id: Option<&str>) -> Result<Vec<Subject>, String> {
    let mut url = api_url(&Subject::collection_path());
    if let Some(id) = class_id.filter(|id| !id.is_empty()) {
        url.push_str(&format!("?classId={}", urlencoding::encode(id)));
    }
    let response = Request::get(&url).send().await.map_err(|e| {
        log::error!("GET {} : {}", url, e);
        format!("Erreur réseau : {}", e)
    })?;
    let subjects: Vec<Subject> = read_json(response, "Erreur chargement matières").await?;
    log::debug!("{} matière(s) chargée(s)", subjects.len());
    Ok(subjects)
}

/// `POST /subjects`
pub async fn create_subject(payload: &SubjectPayload) -> Result<(), String> {
    let url = api_url(&Subject::collection_path());
    let response = send(Request::post(&url).json(payload), &url).await?;
    if !response.ok() {
        return Err(error_message(response, "Erreur lors de l'enregistrement").await);
    }
    Ok(())
}

/// `PUT /subjects/:id`
pub async fn update_subject(id: &str, payload: &SubjectPayload) -> Result<(), String> {
    let url = api_url(&Subject::item_path(id));
    let response = send(Request::put(&url).json(payload), &url).await?;
    if !response.ok() {
        return Err(error_message(response, "Erreur lors de l'enregistrement").await);
    }
    Ok(())
}

/// `DELETE /subjects/:id`
pub async fn delete_subject(id: &str) -> Result<(), String> {
    let url = api_url(&Subject::item_path(id));
    let response = Request::delete(&url).send().await.map_err(|e| {
        log::error!("DELETE {} : {}", url, e);
        format!("Erreur réseau : {}", e)
    })?;
    if !response.ok() {
        return Err(error_message(response, "Erreur lors de la suppression").await);
    }
    log::info!("matière {} supprimée", id);
    Ok(())
}
