//! Accès au backend REST.
//!
//! L'URL de base est fixée à la compilation par `SCOLARITE_API_URL`
//! (par défaut `http://localhost:4000`). Toutes les fonctions d'API du
//! frontend renvoient `Result<_, String>` avec un message lisible.

use contracts::domain::a001_student::aggregate::ApiErrorBody;
use gloo_net::http::Response;
use serde::de::DeserializeOwned;

const DEFAULT_API_URL: &str = "http://localhost:4000";

/// URL de base du backend, sans barre finale
pub fn api_base() -> String {
    option_env!("SCOLARITE_API_URL")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

/// `api_url("/students")` → `http://localhost:4000/students`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Message d'erreur d'une réponse non 2xx : champ `error` du corps JSON
/// si présent, sinon le statut HTTP
pub async fn error_message(response: Response, fallback: &str) -> String {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(ApiErrorBody { error: Some(e) }) if !e.trim().is_empty() => e,
        _ => format!("{} (HTTP {})", fallback, status),
    }
}

/// Décode le corps JSON d'une réponse réussie
pub async fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, String> {
    if !response.ok() {
        return Err(error_message(response, fallback).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Réponse illisible : {}", e))
}
