//! Checkout page configuration.
//!
//! The backend base URL is baked in at compile time:
//! - development: `http://localhost:4001/api/v1` (default)
//! - production: whatever `BACKEND_URL` holds when the crate is built

use serde::{Deserialize, Serialize};

/// Backend base URL, without a trailing slash.
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:4001/api/v1",
};

/// Razorpay Checkout SDK location.
pub const RAZORPAY_CHECKOUT_SRC: &str = "https://checkout.razorpay.com/v1/checkout.js";

/// `localStorage` key holding the signed-in user.
pub const USER_STORAGE_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    pub backend_url: String,
    /// Merchant name shown in the widget header.
    pub merchant_name: String,
    /// Widget accent colour.
    pub theme_color: String,
    pub script_src: String,
    pub user_storage_key: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            backend_url: BACKEND_URL.to_string(),
            merchant_name: "FL-Med".to_string(),
            theme_color: "#6366F1".to_string(),
            script_src: RAZORPAY_CHECKOUT_SRC.to_string(),
            user_storage_key: USER_STORAGE_KEY.to_string(),
        }
    }
}

impl CheckoutConfig {
    /// Joins `path` onto the backend base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.backend_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
