//! yew_course_checkout/src/client.rs
//!
//! High-level Rust API for opening Razorpay Checkout from Yew applications.
//!
//! This module provides:
//! - `CheckoutOptions` to configure the widget for a backend-issued order.
//! - `PaymentReceipt`, the payload the widget hands to the success handler.
//! - `RazorpayError` for vendor error objects and JS exceptions.
//! - `open_checkout()` to construct the widget, wire its callbacks and open it.
//!
//! # Example Usage
//! ```rust,ignore
//! use yew::prelude::*;
//! use yew_course_checkout::client::{open_checkout, CheckoutHandlers, CheckoutOptions};
//!
//! let handlers = CheckoutHandlers {
//!     on_success: Callback::from(|receipt| log::info!("Paid: {:?}", receipt)),
//!     on_failed: Callback::from(|err| log::error!("Failed: {}", err)),
//!     on_dismiss: Callback::noop(),
//! };
//! match open_checkout(&options, handlers) {
//!     Ok(session) => *session_ref.borrow_mut() = Some(session),
//!     Err(err) => log::error!("Widget failed: {}", err),
//! };
//! ```

use gloo_utils::format::JsValueSerdeExt;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use thiserror::Error;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Error as JsError, Object, Reflect};
use yew::Callback;

use crate::bindings::JsRazorpay;
use crate::config::CheckoutConfig;
use crate::model::{CourseOrder, VerifyPaymentRequest};
use crate::session::UserSession;

/// Options passed to `new Razorpay({ ... })`, minus the callbacks.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CheckoutOptions {
    /// Razorpay public key (`rzp_live_…` / `rzp_test_…`).
    pub key: String,
    /// Amount in the smallest currency unit, as a string.
    pub amount: String,
    pub currency: String,
    /// Merchant name shown in the widget header.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order_id: String,
    pub prefill: Prefill,
    pub theme: Theme,
}

/// Customer details pre-filled in the widget form.
#[derive(Serialize, Clone, Debug, PartialEq, Default)]
pub struct Prefill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Theme {
    pub color: String,
}

impl CheckoutOptions {
    /// Builds widget options for a backend-issued order.
    pub fn for_order(order: &CourseOrder, config: &CheckoutConfig, session: &UserSession) -> Self {
        Self {
            key: order.key.clone(),
            amount: order.amount.to_string(),
            currency: order.currency.clone(),
            name: config.merchant_name.clone(),
            description: Some(order.course.title.clone()).filter(|t| !t.is_empty()),
            order_id: order.id.clone(),
            prefill: Prefill {
                name: session.first_name(),
                email: session.email(),
            },
            theme: Theme {
                color: config.theme_color.clone(),
            },
        }
    }
}

/// Payload given to the `handler` option once a payment is captured.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct PaymentReceipt {
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_order_id: String,
    #[serde(default)]
    pub razorpay_signature: String,
}

impl PaymentReceipt {
    /// Attaches the purchase context expected by the verification endpoint.
    pub fn into_verify_request(self, course_id: &str, user_id: Option<String>) -> VerifyPaymentRequest {
        VerifyPaymentRequest {
            razorpay_order_id: self.razorpay_order_id,
            razorpay_payment_id: self.razorpay_payment_id,
            razorpay_signature: self.razorpay_signature,
            course_id: course_id.to_string(),
            user_id,
        }
    }
}

/// Razorpay error object, e.g. the `error` of a `payment.failed` event.
#[derive(Error, Deserialize, Clone, Debug, PartialEq)]
#[error("{description}")]
pub struct RazorpayError {
    /// Razorpay error code, e.g. `"BAD_REQUEST_ERROR"`.
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message.
    #[serde(default)]
    pub description: String,
    /// Who caused the failure, e.g. `"customer"` or `"bank"`.
    #[serde(rename = "source", default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub metadata: Option<FailureMetadata>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Default)]
pub struct FailureMetadata {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
}

#[derive(Deserialize)]
struct PaymentFailedEvent {
    error: RazorpayError,
}

impl RazorpayError {
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            description: message.into(),
            origin: None,
            step: None,
            reason: None,
            metadata: None,
        }
    }
}

/// Callbacks wired into the widget.
#[derive(Clone, Default)]
pub struct CheckoutHandlers {
    /// Payment captured; the receipt still needs server-side verification.
    pub on_success: Callback<PaymentReceipt>,
    /// `payment.failed` event. The widget stays open so the user can retry.
    pub on_failed: Callback<RazorpayError>,
    /// The user closed the widget without paying.
    pub on_dismiss: Callback<()>,
}

/// An opened widget together with the closures it calls back into.
///
/// Dropping the session frees the closures; keep it alive while the widget
/// can still fire events.
pub struct CheckoutSession {
    razorpay: JsRazorpay,
    _on_success: Closure<dyn FnMut(JsValue)>,
    _on_failed: Closure<dyn FnMut(JsValue)>,
    _on_dismiss: Closure<dyn FnMut()>,
}

impl CheckoutSession {
    /// Programmatically hides the widget.
    pub fn close(&self) -> Result<(), RazorpayError> {
        self.razorpay.close().map_err(js_to_razorpay_error)
    }
}

/// Construct the Razorpay widget for `options`, register `handlers` and open it.
///
/// # Errors
///
/// Returns `Err(RazorpayError)` if the options cannot be converted, if
/// `window.Razorpay` is missing, or if the constructor or `open()` throws.
pub fn open_checkout(
    options: &CheckoutOptions,
    handlers: CheckoutHandlers,
) -> Result<CheckoutSession, RazorpayError> {
    // 1) Options → plain JS object
    let opts_js = to_value(options).map_err(serde_error_to_razorpay_error)?;

    // 2) Success handler
    let on_success = {
        let on_success = handlers.on_success.clone();
        let on_failed = handlers.on_failed.clone();
        Closure::wrap(Box::new(move |response: JsValue| {
            match from_value::<PaymentReceipt>(response) {
                Ok(receipt) => on_success.emit(receipt),
                Err(e) => {
                    log::error!("Unreadable Razorpay receipt: {}", e);
                    on_failed.emit(RazorpayError::from_message(format!(
                        "Unreadable payment receipt: {}",
                        e
                    )));
                }
            }
        }) as Box<dyn FnMut(JsValue)>)
    };
    set(&opts_js, "handler", on_success.as_ref())?;

    // 3) Dismiss handler under `modal.ondismiss`
    let on_dismiss = {
        let on_dismiss = handlers.on_dismiss.clone();
        Closure::wrap(Box::new(move || on_dismiss.emit(())) as Box<dyn FnMut()>)
    };
    let modal = Object::new();
    set(&modal, "ondismiss", on_dismiss.as_ref())?;
    set(&opts_js, "modal", &modal)?;

    // 4) Construct, listen for failures, open
    let razorpay = JsRazorpay::new_razorpay(&opts_js).map_err(js_to_razorpay_error)?;

    let on_failed = {
        let on_failed = handlers.on_failed;
        Closure::wrap(Box::new(move |event: JsValue| {
            let err = event
                .into_serde::<PaymentFailedEvent>()
                .map(|e| e.error)
                .unwrap_or_else(|_| js_to_razorpay_error(event));
            on_failed.emit(err);
        }) as Box<dyn FnMut(JsValue)>)
    };
    razorpay
        .on("payment.failed", on_failed.as_ref().unchecked_ref())
        .map_err(js_to_razorpay_error)?;

    razorpay.open().map_err(js_to_razorpay_error)?;

    Ok(CheckoutSession {
        razorpay,
        _on_success: on_success,
        _on_failed: on_failed,
        _on_dismiss: on_dismiss,
    })
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), RazorpayError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_to_razorpay_error)
}

/// Convert any caught `JsValue` into a `RazorpayError` with best effort.
fn js_to_razorpay_error(value: JsValue) -> RazorpayError {
    if let Ok(err) = from_value::<RazorpayError>(value.clone()) {
        if !err.description.is_empty() {
            return err;
        }
    }
    if let Some(js_err) = value.dyn_ref::<JsError>() {
        return RazorpayError::from_message(String::from(js_err.message()));
    }
    RazorpayError::from_message(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// Convert a `serde_wasm_bindgen::Error` (from `to_value`) into `RazorpayError`.
fn serde_error_to_razorpay_error(err: serde_wasm_bindgen::Error) -> RazorpayError {
    RazorpayError::from_message(err.to_string())
}
