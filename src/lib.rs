pub mod api;
pub mod bindings;
pub mod checkout_component;
pub mod client;
pub mod components;
pub mod config;
pub mod error;
pub mod interop;
pub mod model;
pub mod route;
pub mod session;
pub mod toast;

pub use bindings::*;
pub use checkout_component::*;
pub use components::*;
pub use config::CheckoutConfig;
pub use error::CheckoutError;
pub use interop::load_checkout_script;
pub use route::Route;
pub use toast::{use_toast, ToastHandle, ToastProvider};
