//! Organization CRUD.

use reqwest::Method;

use crate::models::organization::OrgForm;
use crate::models::{Org, OrgResponse};
use crate::utils::segment;

use super::client::NO_BODY;
use super::{ApiClient, ApiError};

impl ApiClient {
    pub async fn orgs(&self) -> Result<Vec<Org>, ApiError> {
        self.read(Method::GET, "/api/orgs/", NO_BODY).await
    }

    /// Create an organization. `external_id` is omitted from the request when `None`.
    pub async fn new_org(
        &self,
        name: &str,
        external_id: Option<&str>,
    ) -> Result<OrgResponse, ApiError> {
        let form = OrgForm { name, external_id };
        self.read(Method::POST, "/api/orgs/", Some(&form)).await
    }

    pub async fn update_org(
        &self,
        id: i64,
        name: &str,
        external_id: Option<&str>,
    ) -> Result<OrgResponse, ApiError> {
        let form = OrgForm { name, external_id };
        let path = format!("/api/orgs/{}", id);
        self.read(Method::PUT, &path, Some(&form)).await
    }

    pub async fn org_by_name(&self, name: &str) -> Result<Org, ApiError> {
        let path = format!("/api/orgs/name/{}", segment(name));
        self.read(Method::GET, &path, NO_BODY).await
    }

    pub async fn org_by_id(&self, id: i64) -> Result<Org, ApiError> {
        let path = format!("/api/orgs/{}", id);
        self.read(Method::GET, &path, NO_BODY).await
    }

    pub async fn delete_org(&self, id: i64) -> Result<OrgResponse, ApiError> {
        let path = format!("/api/orgs/{}", id);
        self.read(Method::DELETE, &path, NO_BODY).await
    }
}
