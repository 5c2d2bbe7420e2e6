use crate::shared::api_utils::{api_url, read_json};
use contracts::domain::a004_grade::{NotesFilter, NotesPreview, SaveNotesRequest, SaveNotesResponse};
use gloo_net::http::Request;

/// `GET /notes/preview?academicYear=&filiere=&specialite=&studyYear=`
pub async fn fetch_preview(filter: &NotesFilter) -> Result<NotesPreview, String> {
    let url = api_url(&format!("/notes/preview?{}", filter.query_string()));
    let response = Request::get(&url).send().await.map_err(|e| {
        log::error!("GET {} : {}", url, e);
        format!("Erreur réseau : {}", e)
    })?;
    let preview: NotesPreview = read_json(response, "Erreur chargement des fiches").await?;
    log::debug!(
        "{} fiche(s), {} étudiant(s)",
        preview.groups.len(),
        preview.total_students()
    );
    Ok(preview)
}

/// `POST /notes/save`
pub async fn save_notes(request: &SaveNotesRequest) -> Result<SaveNotesResponse, String> {
    let url = api_url("/notes/save");
    let response = Request::post(&url)
        .json(request)
        .map_err(|e| format!("Requête invalide : {}", e))?
        .send()
        .await
        .map_err(|e| {
            log::error!("POST {} : {}", url, e);
            format!("Erreur réseau : {}", e)
        })?;
    let saved: SaveNotesResponse = read_json(response, "Erreur lors de l'enregistrement des notes").await?;
    log::info!(
        "notes enregistrées : {} ({} ligne(s))",
        request.subject_label,
        saved.saved.unwrap_or(request.grades.len() as u32)
    );
    Ok(saved)
}
