use crate::shared::api_utils::{api_url, read_json};
use contracts::dashboards::d400_overview::dto::DashboardOverview;
use gloo_net::http::Request;

/// `GET /dashboard/overview`
pub async fn fetch_overview() -> Result<DashboardOverview, String> {
    let url = api_url("/dashboard/overview");
    let response = Request::get(&url).send().await.map_err(|e| {
        log::error!("GET {} : {}", url, e);
        format!("Erreur réseau : {}", e)
    })?;
    read_json(response, "Erreur chargement du tableau de bord").await
}
