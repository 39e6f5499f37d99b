//! Dashboard search, persistence, and import.

use reqwest::Method;
use serde_json::{Map, Value};
use tracing::info;

use crate::models::dashboard::{ImportDashboardRequest, SaveDashboardRequest};
use crate::models::{
    Dashboard, DashboardImportInput, DashboardImportResponse, DashboardList, DashboardSaveResponse,
    SearchQuery,
};
use crate::utils::{dashboard_path, segment};

use super::client::NO_BODY;
use super::{ApiClient, ApiError};

impl ApiClient {
    /// List every dashboard the caller can see
    pub async fn dashboards(&self) -> Result<DashboardList, ApiError> {
        self.read(Method::GET, "/api/search", NO_BODY).await
    }

    /// Search dashboards by title text, tags, and starred state
    pub async fn search_dashboards(&self, query: &SearchQuery) -> Result<DashboardList, ApiError> {
        self.read_with_query(Method::GET, "/api/search", &query.to_pairs(), NO_BODY)
            .await
    }

    /// Create or update a dashboard from its JSON model.
    ///
    /// Without `overwrite`, a name or version clash comes back as
    /// `ApiError::PreconditionFailed` with the server's explanation;
    /// a malformed model as `ApiError::BadRequest`.
    pub async fn save_dashboard(
        &self,
        model: &Map<String, Value>,
        overwrite: bool,
    ) -> Result<DashboardSaveResponse, ApiError> {
        let body = SaveDashboardRequest { dashboard: model, overwrite };
        let saved: DashboardSaveResponse = self
            .read(Method::POST, "/api/dashboards/db", Some(&body))
            .await?;
        info!(slug = %saved.slug, version = saved.version, "Dashboard saved");
        Ok(saved)
    }

    /// Import a dashboard, binding its templated inputs (data sources etc).
    /// Import failures on the server surface as `ApiError::ServerError`
    /// carrying the server's message.
    pub async fn import_dashboard(
        &self,
        model: &Map<String, Value>,
        overwrite: bool,
        inputs: &[DashboardImportInput],
    ) -> Result<DashboardImportResponse, ApiError> {
        let body = ImportDashboardRequest {
            dashboard: model,
            overwrite,
            inputs,
        };
        let imported: DashboardImportResponse = self
            .read(Method::POST, "/api/dashboards/import", Some(&body))
            .await?;
        info!(uri = %imported.imported_uri, "Dashboard imported");
        Ok(imported)
    }

    /// Fetch the dashboard at `uri`. A bare slug is looked up under `db/`.
    pub async fn dashboard(&self, uri: &str) -> Result<Dashboard, ApiError> {
        self.read(Method::GET, &dashboard_path(uri), NO_BODY).await
    }

    pub async fn delete_dashboard(&self, slug: &str) -> Result<(), ApiError> {
        let path = format!("/api/dashboards/db/{}", segment(slug));
        self.execute(Method::DELETE, &path, NO_BODY).await
    }
}
