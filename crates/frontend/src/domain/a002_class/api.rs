use crate::shared::api_utils::{api_url, read_json};
use contracts::domain::a002_class::ClassRecord;
use contracts::domain::common::AggregateRoot;
use gloo_net::http::Request;

/// `GET /classes[?year=]`, classes avec leurs étudiants
pub async fn fetch_classes(academic_year: &str) -> Result<Vec<ClassRecord>, String> {
    let mut url = api_url(&ClassRecord::collection_path());
    if !academic_year.trim().is_empty() {
        url.push_str(&format!("?year={}", urlencoding::encode(academic_year.trim())));
    }

    let response = Request::get(&url).send().await.map_err(|e| {
        log::error!("GET {} : {}", url, e);
        format!("Erreur réseau : {}", e)
    })?;
    let classes: Vec<ClassRecord> = read_json(response, "Erreur chargement classes").await?;
    log::debug!("{} classe(s) chargée(s)", classes.len());
    Ok(classes)
}
