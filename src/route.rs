//! Application paths the checkout page links or redirects to.

use std::fmt;

use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Purchases,
    Buy { course_id: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Purchases => "/purchases".to_string(),
            Route::Buy { course_id } => format!("/buy/{}", course_id),
        }
    }

    /// Matches a location pathname. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["login"] => Some(Route::Login),
            ["purchases"] => Some(Route::Purchases),
            ["buy", course_id] => Some(Route::Buy {
                course_id: (*course_id).to_string(),
            }),
            _ => None,
        }
    }

    /// Full page navigation via `window.location.assign`.
    pub fn redirect(&self) {
        let path = self.path();
        log::info!("Navigating to {}", path);
        let result = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))
            .and_then(|win| win.location().assign(&path));
        if let Err(e) = result {
            log::error!("Navigation to {} failed: {:?}", path, e);
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
