//! Login Endpoints

use super::{ApiClient, Navigator};
use crate::error::ApiError;
use crate::models::{Credentials, LoginResponse, Role};
use crate::storage::KeyValueStore;

impl<S: KeyValueStore, N: Navigator> ApiClient<S, N> {
    /// Exchange credentials for a token. A 401 here is a wrong password and
    /// comes back as a plain status error.
    pub async fn login(&self, role: Role, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        log::info!("[api] logging in as {}", role.as_str());
        self.post_unguarded(role.login_path(), credentials).await
    }
}
