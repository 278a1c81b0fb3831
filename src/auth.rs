//! Authentication State
//!
//! Token, role and profile of the logged-in user, mirrored into session
//! storage so a reload keeps the user logged in.

use serde::Serialize;
use serde_json::Value;

use crate::error::StorageError;
use crate::models::{profile_display_name, LoginResponse, Role};
use crate::storage::{keys, read_json, write_json, KeyValueStore};

const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthSession {
    pub token: Option<String>,
    pub role: Option<Role>,
    /// Profile object of the logged-in admin, seller or buyer
    pub user: Option<Value>,
    pub is_admin_logged_in: bool,
    pub is_seller_logged_in: bool,
    pub is_buyer_logged_in: bool,
}

/// Shape of the `admin` session key
#[derive(Serialize)]
struct AdminRecord<'a> {
    token: &'a str,
    admin: &'a Value,
}

impl AuthSession {
    /// Adopt a login response.
    ///
    /// Only the profile matching the declared role is taken. A response whose
    /// role has no matching profile changes nothing and returns false.
    pub fn login(&mut self, response: &LoginResponse) -> bool {
        let Some((role, profile)) = response.profile_for_role() else {
            log::warn!("[auth] ignoring login response for role {:?} without matching profile", response.role);
            return false;
        };
        *self = AuthSession {
            token: Some(response.token.clone()),
            role: Some(role),
            user: Some(profile.clone()),
            is_admin_logged_in: role == Role::Admin,
            is_seller_logged_in: role == Role::Seller,
            is_buyer_logged_in: role == Role::Buyer,
        };
        log::info!("[auth] logged in as {}", role.as_str());
        true
    }

    pub fn logout(&mut self) {
        *self = AuthSession::default();
    }

    pub fn is_authenticated(&self) -> bool {
        let has_token = self.token.as_deref().is_some_and(|t| !t.is_empty());
        has_token && (self.is_admin_logged_in || self.is_seller_logged_in || self.is_buyer_logged_in)
    }

    pub fn auth_headers(&self) -> [(&'static str, String); 2] {
        let bearer = match self.token.as_deref() {
            Some(token) if !token.is_empty() => format!("Bearer {token}"),
            _ => String::new(),
        };
        [("Authorization", bearer), ("Content-Type", CONTENT_TYPE_JSON.to_string())]
    }

    /// Role of an authenticated session
    pub fn active_role(&self) -> Option<Role> {
        self.is_authenticated().then_some(self.role).flatten()
    }

    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .and_then(profile_display_name)
            .or_else(|| self.role.map(|r| r.label().to_string()))
            .unwrap_or_else(|| "Guest".to_string())
    }

    /// Rebuild the session written by `persist`.
    ///
    /// Anything inconsistent (flag without profile, unknown role, corrupt
    /// profile JSON) reads as logged out.
    pub fn restore(store: &impl KeyValueStore) -> Self {
        let flag = |key: &str| matches!(store.get(key), Ok(Some(v)) if v == "true");
        let token = match store.get(keys::TOKEN) {
            Ok(Some(token)) if !token.is_empty() => token,
            _ => return Self::default(),
        };
        let role = store
            .get(keys::USER_ROLE)
            .ok()
            .flatten()
            .and_then(|raw| Role::parse(&raw));
        let user: Option<Value> = read_json(store, keys::USER);
        let (Some(role), Some(user)) = (role, user) else {
            return Self::default();
        };
        let role_flag = match role {
            Role::Admin => keys::IS_ADMIN_LOGGED_IN,
            Role::Seller => keys::IS_SELLER_LOGGED_IN,
            Role::Buyer => keys::IS_BUYER_LOGGED_IN,
        };
        if !flag(role_flag) {
            return Self::default();
        }
        AuthSession {
            token: Some(token),
            role: Some(role),
            user: Some(user),
            is_admin_logged_in: role == Role::Admin,
            is_seller_logged_in: role == Role::Seller,
            is_buyer_logged_in: role == Role::Buyer,
        }
    }

    pub fn persist(&self, store: &impl KeyValueStore) -> Result<(), StorageError> {
        store.set(keys::IS_ADMIN_LOGGED_IN, bool_str(self.is_admin_logged_in))?;
        store.set(keys::IS_SELLER_LOGGED_IN, bool_str(self.is_seller_logged_in))?;
        store.set(keys::IS_BUYER_LOGGED_IN, bool_str(self.is_buyer_logged_in))?;
        store.set(keys::TOKEN, self.token.as_deref().unwrap_or(""))?;
        store.set(keys::USER_ROLE, self.role.map(Role::as_str).unwrap_or(""))?;
        match &self.user {
            Some(user) => write_json(store, keys::USER, user)?,
            None => store.set(keys::USER, "")?,
        }
        match (&self.user, self.role, self.token.as_deref()) {
            (Some(admin), Some(Role::Admin), Some(token)) => {
                write_json(store, keys::ADMIN, &AdminRecord { token, admin })?
            }
            _ => store.remove(keys::ADMIN)?,
        }
        Ok(())
    }

    /// Remove every session-held auth key
    pub fn clear_persisted(store: &impl KeyValueStore) -> Result<(), StorageError> {
        for key in [
            keys::TOKEN,
            keys::USER,
            keys::USER_ROLE,
            keys::ADMIN,
            keys::IS_ADMIN_LOGGED_IN,
            keys::IS_SELLER_LOGGED_IN,
            keys::IS_BUYER_LOGGED_IN,
        ] {
            store.remove(key)?;
        }
        Ok(())
    }

    /// Token as currently persisted, for attaching to an outgoing request
    pub fn stored_token(store: &impl KeyValueStore) -> Option<String> {
        store.get(keys::TOKEN).ok().flatten().filter(|t| !t.is_empty())
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn buyer_login() -> LoginResponse {
        LoginResponse {
            token: "t".into(),
            role: "BUYER".into(),
            buyer: Some(json!({ "id": 3, "name": "Asha", "email": "asha@example.org" })),
            ..Default::default()
        }
    }

    #[test]
    fn test_buyer_login_sets_only_buyer_flag() {
        let mut session = AuthSession::default();
        assert!(session.login(&buyer_login()));
        assert!(session.is_buyer_logged_in);
        assert!(!session.is_admin_logged_in);
        assert!(!session.is_seller_logged_in);
        assert_eq!(session.user, Some(json!({ "id": 3, "name": "Asha", "email": "asha@example.org" })));
        assert_eq!(session.role, Some(Role::Buyer));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_mismatched_login_is_noop() {
        let mut session = AuthSession::default();
        let response = LoginResponse {
            token: "t".into(),
            role: "ADMIN".into(),
            seller: Some(json!({ "username": "bakery" })),
            ..Default::default()
        };
        assert!(!session.login(&response));
        assert_eq!(session, AuthSession::default());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut session = AuthSession::default();
        session.login(&buyer_login());
        session.logout();
        assert_eq!(session, AuthSession::default());
    }

    #[test]
    fn test_authenticated_requires_token_and_flag() {
        let session = AuthSession { token: Some("t".into()), ..Default::default() };
        assert!(!session.is_authenticated());
        let session = AuthSession { token: Some(String::new()), is_buyer_logged_in: true, ..Default::default() };
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_auth_headers() {
        let mut session = AuthSession::default();
        assert_eq!(session.auth_headers()[0], ("Authorization", String::new()));
        session.login(&buyer_login());
        let headers = session.auth_headers();
        assert_eq!(headers[0], ("Authorization", "Bearer t".to_string()));
        assert_eq!(headers[1], ("Content-Type", "application/json".to_string()));
    }

    #[test]
    fn test_persist_and_restore() {
        let store = MemoryStore::new();
        let mut session = AuthSession::default();
        session.login(&buyer_login());
        session.persist(&store).unwrap();

        assert_eq!(store.get(keys::IS_BUYER_LOGGED_IN).unwrap().as_deref(), Some("true"));
        assert_eq!(store.get(keys::IS_ADMIN_LOGGED_IN).unwrap().as_deref(), Some("false"));
        assert_eq!(store.get(keys::USER_ROLE).unwrap().as_deref(), Some("BUYER"));
        assert_eq!(store.get(keys::ADMIN).unwrap(), None);
        assert_eq!(AuthSession::restore(&store), session);
    }

    #[test]
    fn test_admin_login_writes_admin_record() {
        let store = MemoryStore::new();
        let mut session = AuthSession::default();
        session.login(&LoginResponse {
            token: "jwt".into(),
            role: "ADMIN".into(),
            admin: Some(json!({ "username": "root" })),
            ..Default::default()
        });
        session.persist(&store).unwrap();
        let record: Value = read_json(&store, keys::ADMIN).unwrap();
        assert_eq!(record, json!({ "token": "jwt", "admin": { "username": "root" } }));
        assert_eq!(session.display_name(), "root");
    }

    #[test]
    fn test_restore_rejects_inconsistent_state() {
        let store = MemoryStore::new();
        store.set(keys::TOKEN, "t").unwrap();
        store.set(keys::USER_ROLE, "SELLER").unwrap();
        store.set(keys::IS_SELLER_LOGGED_IN, "true").unwrap();
        store.set(keys::USER, "{broken").unwrap();
        assert_eq!(AuthSession::restore(&store), AuthSession::default());
    }

    #[test]
    fn test_clear_persisted() {
        let store = MemoryStore::new();
        let mut session = AuthSession::default();
        session.login(&buyer_login());
        session.persist(&store).unwrap();
        AuthSession::clear_persisted(&store).unwrap();
        assert_eq!(AuthSession::stored_token(&store), None);
        assert_eq!(store.get(keys::USER).unwrap(), None);
        assert_eq!(store.get(keys::IS_BUYER_LOGGED_IN).unwrap(), None);
    }
}
