//! interop.rs
//!
//! Runtime loader for Razorpay Checkout (no inline JS).
//!
//! # Overview
//! `load_checkout_script()` injects a single
//! `<script id="razorpay-checkout-sdk" src="https://checkout.razorpay.com/v1/checkout.js">`
//! into `<body>` and resolves once the script's `load` or `error` event
//! fires. If `window.Razorpay` already exists nothing is injected. A tag
//! left behind by an earlier failed attempt is replaced, so every pay click
//! gets a fresh download attempt.
//!
//! # Usage
//! ```rust,ignore
//! wasm_bindgen_futures::spawn_local(async move {
//!     if load_checkout_script(RAZORPAY_CHECKOUT_SRC).await.is_err() {
//!         toast.error("Failed to load Razorpay SDK.");
//!     }
//! });
//! ```

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::{Function, Promise, Reflect};
use web_sys::{Document, HtmlScriptElement};

use crate::error::CheckoutError;

/// Id of the injected `<script>` tag.
pub const SCRIPT_ID: &str = "razorpay-checkout-sdk";

/// `true` once `window.Razorpay` exists (script loaded & parsed).
pub fn checkout_available() -> bool {
    web_sys::window()
        .and_then(|win| Reflect::has(&win, &JsValue::from_str("Razorpay")).ok())
        .unwrap_or(false)
}

/// Load the Razorpay Checkout SDK from `src`.
///
/// # Errors
///
/// `CheckoutError::SdkLoad` if there is no DOM, the tag cannot be created,
/// or the browser reports a load error.
pub async fn load_checkout_script(src: &str) -> Result<(), CheckoutError> {
    if checkout_available() {
        return Ok(());
    }

    let document = web_sys::window()
        .and_then(|win| win.document())
        .ok_or(CheckoutError::SdkLoad)?;

    // Drop a stale tag from a previous (failed or pending) attempt
    if let Some(stale) = document.get_element_by_id(SCRIPT_ID) {
        stale.remove();
    }

    let script = create_script(&document, src).map_err(|e| {
        log::error!("Cannot create checkout script tag: {:?}", e);
        CheckoutError::SdkLoad
    })?;

    // Resolve with `true` on load, `false` on error
    let loaded = Promise::new(&mut |resolve: Function, _reject: Function| {
        let on_load = {
            let resolve = resolve.clone();
            Closure::once_into_js(move || {
                let _ = resolve.call1(&JsValue::NULL, &JsValue::TRUE);
            })
        };
        let on_error = Closure::once_into_js(move || {
            let _ = resolve.call1(&JsValue::NULL, &JsValue::FALSE);
        });
        script.set_onload(Some(on_load.unchecked_ref()));
        script.set_onerror(Some(on_error.unchecked_ref()));
    });

    let body = document.body().ok_or(CheckoutError::SdkLoad)?;
    body.append_child(&script).map_err(|e| {
        log::error!("Cannot append checkout script tag: {:?}", e);
        CheckoutError::SdkLoad
    })?;

    match JsFuture::from(loaded).await {
        Ok(v) if v.as_bool() == Some(true) => {
            log::info!("Razorpay SDK loaded from {}", src);
            Ok(())
        }
        _ => {
            log::error!("Razorpay SDK failed to load from {}", src);
            Err(CheckoutError::SdkLoad)
        }
    }
}

fn create_script(document: &Document, src: &str) -> Result<HtmlScriptElement, JsValue> {
    let script: HtmlScriptElement = document.create_element("script")?.dyn_into()?;
    script.set_id(SCRIPT_ID);
    script.set_src(src);
    Ok(script)
}
