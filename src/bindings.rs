//! yew_course_checkout/src/bindings.rs
//!
//! Low‐level wasm-bindgen bindings to Razorpay Checkout (`checkout.js` v1).
//!
//! Exposes the raw widget handle (`JsRazorpay`) created by the global
//! `Razorpay` constructor. Higher-level wrappers live in `client.rs`.

use wasm_bindgen::prelude::*;
use web_sys::js_sys::Function;

#[wasm_bindgen]
extern "C" {
    //------------------------------------------------------------------------------
    // Core Types
    //------------------------------------------------------------------------------

    /// Raw Razorpay Checkout widget handle.
    #[wasm_bindgen(js_name = Razorpay)]
    #[derive(Debug, Clone)]
    pub type JsRazorpay;

    //------------------------------------------------------------------------------
    // Constructors
    //------------------------------------------------------------------------------

    /// Construct a widget from a checkout options object.
    ///
    /// ```js
    ///   const rzp = new Razorpay({ key, amount, currency, order_id, handler });
    /// ```
    #[wasm_bindgen(constructor, catch, js_class = "Razorpay")]
    pub fn new_razorpay(options: &JsValue) -> Result<JsRazorpay, JsValue>;

    //------------------------------------------------------------------------------
    // Instance Methods
    //------------------------------------------------------------------------------

    /// `rzp.open()` → shows the checkout modal
    #[wasm_bindgen(method, catch, js_class = "Razorpay", js_name = open)]
    pub fn open(this: &JsRazorpay) -> Result<(), JsValue>;

    /// `rzp.close()` → hides the checkout modal
    #[wasm_bindgen(method, catch, js_class = "Razorpay", js_name = close)]
    pub fn close(this: &JsRazorpay) -> Result<(), JsValue>;

    /// `rzp.on("payment.failed", fn)` → registers a widget event listener
    #[wasm_bindgen(method, catch, js_class = "Razorpay", js_name = on)]
    pub fn on(this: &JsRazorpay, event: &str, handler: &Function) -> Result<(), JsValue>;
}
