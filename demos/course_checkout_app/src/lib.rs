// src/lib.rs
//
// Serve with `trunk serve` and open http://127.0.0.1:8080/buy/<course id>.
// Before that, sign in by storing a user in localStorage, e.g. from the console:
//
//   localStorage.setItem("user", JSON.stringify({
//       token: "dev-token",
//       user: { _id: "u1", firstName: "Dev", email: "dev@example.com" }
//   }))
//
// and start the mock backend: `BACKEND_URL=http://127.0.0.1:2718 trunk serve`
// together with `cargo run --manifest-path ../mock_course_backend/Cargo.toml`.

use wasm_bindgen::prelude::*;
use yew::prelude::*;
use yew_course_checkout::client::PaymentReceipt;
use yew_course_checkout::{CheckoutConfig, CourseCheckout, Route, ToastProvider};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Course checkout demo starting");

    yew::Renderer::<App>::new().render();
}

fn current_route() -> Option<Route> {
    let path = web_sys::window()?.location().pathname().ok()?;
    Route::parse(&path)
}

#[function_component(App)]
fn app() -> Html {
    let route = use_state(current_route);

    // In-app navigation: swap the rendered page without a reload
    let on_navigate = {
        let route = route.clone();
        Callback::from(move |next: Route| {
            log::info!("Demo navigation to {}", next);
            route.set(Some(next));
        })
    };

    let page = match &*route {
        Some(Route::Buy { course_id }) => html! {
            <CourseCheckout
                course_id={course_id.clone()}
                config={CheckoutConfig::default()}
                on_navigate={Some(on_navigate)}
                on_success={Callback::from(|receipt: PaymentReceipt| log::info!("Verified: {:?}", receipt))}
            />
        },
        Some(Route::Purchases) => html! {
            <p class="m-10">{ "Your purchases would be listed here." }</p>
        },
        Some(Route::Login) => html! {
            <p class="m-10">{ "Sign in first: store a `user` with a token in localStorage." }</p>
        },
        None => html! {
            <p class="m-10">{ "Open /buy/<course id> to start a checkout." }</p>
        },
    };

    html! {
        <ToastProvider>
            { page }
        </ToastProvider>
    }
}
