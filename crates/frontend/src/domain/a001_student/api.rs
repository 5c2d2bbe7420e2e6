use crate::shared::api_utils::{api_url, error_message, read_json};
use contracts::domain::a001_student::{CreateStudentResponse, Student, StudentPayload};
use contracts::domain::common::AggregateRoot;
use gloo_net::http::Request;

/// `GET /students[?q=]`
pub async fn fetch_students(query: &str) -> Result<Vec<Student>, String> {
    let mut url = api_url(&Student::collection_path());
    let query = query.trim();
    if !query.is_empty() {
        url.push_str(&format!("?q={}", urlencoding::encode(query)));
    }

    let response = Request::get(&url).send().await.map_err(|e| {
        log::error!("GET {} : {}", url, e);
        format!("Erreur réseau : {}", e)
    })?;
    let students: Vec<Student> = read_json(response, "Erreur chargement étudiants").await?;
    log::debug!("{} étudiant(s) chargé(s)", students.len());
    Ok(students)
}

/// `POST /students`
pub async fn create_student(payload: &StudentPayload) -> Result<CreateStudentResponse, String> {
    let url = api_url(&Student::collection_path());
    let response = Request::post(&url)
        .json(payload)
        .map_err(|e| format!("Requête invalide : {}", e))?
        .send()
        .await
        .map_err(|e| {
            log::error!("POST {} : {}", url, e);
            format!("Erreur réseau : {}", e)
        })?;
    read_json(response, "Erreur lors de l'inscription").await
}

/// `PUT /students/:id`
pub async fn update_student(id: &str, payload: &StudentPayload) -> Result<(), String> {
    let url = api_url(&Student::item_path(id));
    let response = Request::put(&url)
        .json(payload)
        .map_err(|e| format!("Requête invalide : {}", e))?
        .send()
        .await
        .map_err(|e| {
            log::error!("PUT {} : {}", url, e);
            format!("Erreur réseau : {}", e)
        })?;
    if !response.ok() {
        return Err(error_message(response, "Erreur lors de la mise à jour").await);
    }
    log::info!("étudiant {} mis à jour", id);
    Ok(())
}
