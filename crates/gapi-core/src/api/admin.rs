//! Server-admin user management.

use reqwest::Method;

use crate::models::{AdminCreateUserForm, AdminCreateUserResponse};

use super::client::NO_BODY;
use super::{ApiClient, ApiError};

impl ApiClient {
    pub async fn create_user(
        &self,
        form: &AdminCreateUserForm,
    ) -> Result<AdminCreateUserResponse, ApiError> {
        self.read(Method::POST, "/api/admin/users", Some(form)).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("/api/admin/users/{}", id);
        self.execute(Method::DELETE, &path, NO_BODY).await
    }
}
