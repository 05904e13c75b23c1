//! Backend calls made by the checkout page.
//!
//! Both endpoints are authenticated with the session's bearer token and send
//! credentials (cookies) along with the request.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use web_sys::RequestCredentials;

use crate::config::CheckoutConfig;
use crate::model::{CourseDetails, CourseOrder, VerifyPaymentRequest};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The backend answers 400 when the user already owns the course.
    #[error("course already purchased")]
    AlreadyPurchased,
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Decode(String),
    #[error("serialization error: {0}")]
    Encode(String),
}

impl ApiError {
    /// Maps a non-2xx status of the buy endpoint.
    pub fn from_buy_status(status: u16, message: String) -> Self {
        if status == 400 {
            ApiError::AlreadyPurchased
        } else {
            ApiError::Status { status, message }
        }
    }
}

/// Stateless client for the course endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct BackendClient {
    config: CheckoutConfig,
    token: String,
}

impl BackendClient {
    pub fn new(config: CheckoutConfig, token: impl Into<String>) -> Self {
        Self {
            config,
            token: token.into(),
        }
    }

    fn buy_url(&self, course_id: &str) -> String {
        self.config.endpoint(&format!("course/buy/{}", course_id))
    }

    fn verify_url(&self) -> String {
        self.config.endpoint("course/verify-payment")
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    async fn post_buy(&self, course_id: &str) -> Result<Response, ApiError> {
        let url = self.buy_url(course_id);
        log::info!("POST {}", url);

        let response = Request::post(&url)
            .header("Authorization", &self.bearer())
            .credentials(RequestCredentials::Include)
            .json(&serde_json::json!({}))
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            Ok(response)
        } else {
            let status = response.status();
            let message = error_text(response).await;
            Err(ApiError::from_buy_status(status, message))
        }
    }

    /// `POST /course/buy/:courseId`, keeping only the course.
    pub async fn fetch_course(&self, course_id: &str) -> Result<CourseDetails, ApiError> {
        let response = self.post_buy(course_id).await?;
        decode(response).await
    }

    /// `POST /course/buy/:courseId`, returning the Razorpay order to pay.
    pub async fn create_order(&self, course_id: &str) -> Result<CourseOrder, ApiError> {
        let response = self.post_buy(course_id).await?;
        let order: CourseOrder = decode(response).await?;
        log::info!("Order {} created: {} {}", order.id, order.amount, order.currency);
        Ok(order)
    }

    /// `POST /course/verify-payment` with the widget's receipt.
    pub async fn verify_payment(&self, body: &VerifyPaymentRequest) -> Result<(), ApiError> {
        let url = self.verify_url();
        log::info!("POST {} (order {})", url, body.razorpay_order_id);

        let response = Request::post(&url)
            .header("Authorization", &self.bearer())
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            let status = response.status();
            let message = error_text(response).await;
            Err(ApiError::Status { status, message })
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Best-effort extraction of the backend's `{ "errors": ... }` or
/// `{ "message": ... }` body, falling back to the raw text.
async fn error_text(response: Response) -> String {
    let status_text = response.status_text();
    match response.text().await {
        Ok(body) => backend_message(&body).unwrap_or(status_text),
        Err(_) => status_text,
    }
}

fn backend_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => ["errors", "error", "message"]
            .iter()
            .find_map(|k| value.get(*k))
            .map(|v| match v.as_str() {
                Some(s) => s.to_string(),
                None => v.to_string(),
            }),
        Err(_) => Some(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_400_means_already_purchased() {
        assert_eq!(
            ApiError::from_buy_status(400, "User has already purchased this course".into()),
            ApiError::AlreadyPurchased
        );
        assert_eq!(
            ApiError::from_buy_status(401, "Unauthorized".into()),
            ApiError::Status {
                status: 401,
                message: "Unauthorized".into()
            }
        );
    }

    #[test]
    fn urls_are_built_from_config() {
        let client = BackendClient::new(
            CheckoutConfig {
                backend_url: "http://localhost:4001/api/v1".into(),
                ..CheckoutConfig::default()
            },
            "tok",
        );
        assert_eq!(client.buy_url("c9"), "http://localhost:4001/api/v1/course/buy/c9");
        assert_eq!(
            client.verify_url(),
            "http://localhost:4001/api/v1/course/verify-payment"
        );
        assert_eq!(client.bearer(), "Bearer tok");
    }

    #[test]
    fn backend_message_prefers_json_fields() {
        assert_eq!(
            backend_message(r#"{"errors":"Course not found"}"#).as_deref(),
            Some("Course not found")
        );
        assert_eq!(
            backend_message(r#"{"message":"Invalid signature"}"#).as_deref(),
            Some("Invalid signature")
        );
        assert_eq!(backend_message("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(backend_message("   "), None);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ApiError::Status {
                status: 500,
                message: "boom".into()
            }
            .to_string(),
            "HTTP 500: boom"
        );
        assert_eq!(
            ApiError::Network("offline".into()).to_string(),
            "network error: offline"
        );
    }
}
