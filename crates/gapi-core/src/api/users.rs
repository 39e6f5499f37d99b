//! User listing and context switching.

use reqwest::Method;

use crate::models::{SwitchUserContextResponse, User};

use super::client::NO_BODY;
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Fetch every user visible to the caller
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.read(Method::GET, "/api/users", NO_BODY).await
    }

    /// Switch the signed-in user's active organization.
    ///
    /// A 401 comes back as `ApiError::Unauthorized` carrying the server's
    /// message (usually that the user is not a member of the org).
    pub async fn switch_user_context(
        &self,
        org_id: i64,
    ) -> Result<SwitchUserContextResponse, ApiError> {
        let path = format!("/api/user/using/{}", org_id);
        self.read(Method::POST, &path, NO_BODY).await
    }
}
