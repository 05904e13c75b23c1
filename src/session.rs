//! Signed-in user, as persisted in `localStorage` by the login page.

use serde::Deserialize;
use web_sys::Storage;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl UserSession {
    /// Parses a stored session. Returns `None` for malformed JSON.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw)
            .map_err(|e| log::warn!("Ignoring malformed stored user: {}", e))
            .ok()
    }

    /// Reads the session stored under `key`, if any.
    pub fn load(key: &str) -> Option<Self> {
        let raw = local_storage()?.get_item(key).ok()??;
        Self::from_json(&raw)
    }

    /// Bearer token, when present and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn user_id(&self) -> Option<String> {
        self.user.as_ref().and_then(|u| u.id.clone())
    }

    pub fn first_name(&self) -> Option<String> {
        self.user.as_ref().and_then(|u| u.first_name.clone())
    }

    pub fn email(&self) -> Option<String> {
        self.user.as_ref().and_then(|u| u.email.clone())
    }
}

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}
