//! The course checkout page, ready to drop into your app.
//!
//! This component reads the signed-in user, fetches the order details of one
//! course, loads Razorpay Checkout on demand, opens the payment widget and
//! forwards the widget's receipt to the backend for verification. Outcomes are
//! reported through an inline error panel (page-blocking failures) or toasts
//! (failures of the pay action).

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{ApiError, BackendClient};
use crate::client::{
    open_checkout, CheckoutHandlers, CheckoutOptions, CheckoutSession, PaymentReceipt,
    RazorpayError,
};
use crate::components::{Button, ErrorPanel, OrderDetails, SECONDARY_BUTTON};
use crate::config::CheckoutConfig;
use crate::error::CheckoutError;
use crate::interop::load_checkout_script;
use crate::model::{Course, CourseOrder};
use crate::route::Route;
use crate::session::UserSession;
use crate::toast::{use_toast, ToastHandle, ToastKind};

pub const ALREADY_PURCHASED: &str = "You have already purchased this course.";
pub const LOAD_FAILED: &str = "Error loading course data.";
pub const PAYMENT_SUCCESSFUL: &str = "Payment Successful";
pub const VERIFICATION_FAILED: &str = "Payment verification failed";

/// Where a visitor without a token is sent. `None` means the page may render.
pub fn entry_redirect(session: Option<&UserSession>) -> Option<Route> {
    match session.and_then(UserSession::token) {
        Some(_) => None,
        None => Some(Route::Login),
    }
}

/// Blocking error shown when the order details cannot be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub message: &'static str,
    pub redirect: Option<Route>,
}

impl LoadFailure {
    pub fn from_api_error(err: &ApiError) -> Self {
        match err {
            ApiError::AlreadyPurchased => Self {
                message: ALREADY_PURCHASED,
                redirect: Some(Route::Purchases),
            },
            _ => Self {
                message: LOAD_FAILED,
                redirect: None,
            },
        }
    }
}

/// Toast and navigation following a verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: ToastKind,
    pub message: &'static str,
    pub redirect: Option<Route>,
}

pub fn verify_outcome(result: &Result<(), ApiError>) -> Notice {
    match result {
        Ok(()) => Notice {
            kind: ToastKind::Success,
            message: PAYMENT_SUCCESSFUL,
            redirect: Some(Route::Purchases),
        },
        Err(_) => Notice {
            kind: ToastKind::Error,
            message: VERIFICATION_FAILED,
            redirect: None,
        },
    }
}

/// What the page shows before the pay button is pressed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub course: Option<Course>,
    pub error: Option<String>,
}

pub enum PageAction {
    /// A new course id is being fetched; anything shown for the old one goes.
    Fetching,
    Loaded(Course),
    Failed(&'static str),
}

impl Reducible for PageState {
    type Action = PageAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            PageAction::Fetching => PageState::default(),
            PageAction::Loaded(course) => PageState {
                course: Some(course),
                error: None,
            },
            PageAction::Failed(message) => PageState {
                course: None,
                error: Some(message.to_string()),
            },
        };
        Rc::new(next)
    }
}

/// Route callback used by the page: the host's `on_navigate` when given,
/// a full page load otherwise.
pub fn navigator(on_navigate: Option<Callback<Route>>) -> Callback<Route> {
    Callback::from(move |route: Route| match &on_navigate {
        Some(cb) => cb.emit(route),
        None => route.redirect(),
    })
}

/// Properties for the [`CourseCheckout`] component.
///
/// # Fields
///
/// * `course_id` – Backend id of the course being bought.
/// * `config` – Backend URL, merchant branding, SDK location.
/// * `on_navigate` – Called instead of a full page load when the page
///   redirects (login, purchases). Hook your router in here.
/// * `on_success` – Called with the receipt once the backend verified it.
#[derive(Properties, PartialEq, Clone)]
pub struct CourseCheckoutProps {
    pub course_id: String,
    #[prop_or_default]
    pub config: CheckoutConfig,
    #[prop_or_default]
    pub on_navigate: Option<Callback<Route>>,
    #[prop_or_default]
    pub on_success: Callback<PaymentReceipt>,
}

/// Yew function component rendering the checkout page for one course.
///
/// # Example
///
/// ```rust,ignore
/// use yew::prelude::*;
/// use yew_course_checkout::{CourseCheckout, ToastProvider};
///
/// #[function_component(App)]
/// fn app() -> Html {
///     html! {
///         <ToastProvider>
///             <CourseCheckout course_id={"66a1f0c2".to_string()} />
///         </ToastProvider>
///     }
/// }
/// ```
#[function_component(CourseCheckout)]
pub fn course_checkout(props: &CourseCheckoutProps) -> Html {
    let toast = use_toast();
    let session = use_memo(props.config.user_storage_key.clone(), |key| UserSession::load(key));
    let token = (*session).as_ref().and_then(UserSession::token).map(str::to_string);

    let page = use_reducer(PageState::default);
    let loading = use_state(|| false);
    let widget: Rc<RefCell<Option<CheckoutSession>>> = use_mut_ref(|| None);

    let navigate = navigator(props.on_navigate.clone());

    // Fetch order details once per course id and token
    {
        let page = page.dispatcher();
        let navigate = navigate.clone();
        let config = props.config.clone();
        use_effect_with((props.course_id.clone(), token.clone()), move |(course_id, token)| {
            match token {
                None => {
                    log::info!("No signed-in user, redirecting to login");
                    navigate.emit(Route::Login);
                }
                Some(token) => {
                    page.dispatch(PageAction::Fetching);
                    let client = BackendClient::new(config, token.clone());
                    let course_id = course_id.clone();
                    spawn_local(async move {
                        match client.fetch_course(&course_id).await {
                            Ok(details) => page.dispatch(PageAction::Loaded(details.course)),
                            Err(err) => {
                                log::error!("Loading course {} failed: {}", course_id, err);
                                let failure = LoadFailure::from_api_error(&err);
                                page.dispatch(PageAction::Failed(failure.message));
                                if let Some(route) = failure.redirect {
                                    navigate.emit(route);
                                }
                            }
                        }
                    });
                }
            }
            || ()
        });
    }

    // Close an open widget before its callbacks are dropped
    {
        let widget = widget.clone();
        use_effect_with((), move |_| {
            move || {
                if let Some(open) = widget.borrow_mut().take() {
                    if let Err(e) = open.close() {
                        log::warn!("Closing Razorpay widget failed: {}", e);
                    }
                }
            }
        });
    }

    let on_pay = {
        let loading = loading.clone();
        let toast = toast.clone();
        let navigate = navigate.clone();
        let widget = widget.clone();
        let session = session.clone();
        let config = props.config.clone();
        let course_id = props.course_id.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(current) = (*session).clone().filter(|s| s.token().is_some()) else {
                navigate.emit(Route::Login);
                return;
            };
            let token = current.token().unwrap_or_default().to_string();
            let client = BackendClient::new(config.clone(), token);
            let handlers = payment_handlers(
                &client,
                &course_id,
                current.user_id(),
                toast.clone(),
                navigate.clone(),
                on_success.clone(),
            );

            let loading = loading.clone();
            let toast = toast.clone();
            let widget = widget.clone();
            let config = config.clone();
            let course_id = course_id.clone();
            loading.set(true);

            spawn_local(async move {
                let steps = RazorpaySteps {
                    config: &config,
                    client: &client,
                    course_id: &course_id,
                    session: &current,
                    handlers,
                };
                match start_payment(steps).await {
                    Ok(opened) => *widget.borrow_mut() = Some(opened),
                    Err(err) => {
                        log::error!("Payment for course {} not started: {}", course_id, err);
                        toast.error(err.toast_message());
                    }
                }
                loading.set(false);
            });
        })
    };

    if entry_redirect((*session).as_ref()).is_some() {
        return Html::default();
    }

    if let Some(msg) = &page.error {
        return html! { <ErrorPanel message={msg.clone()} on_navigate={Some(navigate)} /> };
    }

    html! {
        <div class="flex flex-col sm:flex-row my-40 container mx-auto">
            {
                match &page.course {
                    Some(course) => html! { <OrderDetails course={course.clone()} /> },
                    None => html! {
                        <div class="w-full md:w-1/2">
                            <p class="text-gray-500">{ "Loading order details…" }</p>
                        </div>
                    },
                }
            }
            <div class="w-full md:w-1/2 flex justify-center items-center">
                <div class="bg-white shadow-md rounded-lg p-6 w-full max-w-sm">
                    <h2 class="text-lg font-semibold mb-4">{ "Process your Payment!" }</h2>
                    <Button
                        label={if *loading { "Processing...".to_string() } else { "Pay with Razorpay".to_string() }}
                        onclick={on_pay}
                        disabled={*loading}
                    />
                    <Button
                        label={"Other Payments Method".to_string()}
                        class={SECONDARY_BUTTON.to_string()}
                        icon={Some("🅿️".to_string())}
                    />
                </div>
            </div>
        </div>
    }
}

/// The three steps behind the pay button.
#[async_trait(?Send)]
pub trait PaymentSteps {
    type Widget;

    async fn load_sdk(&self) -> Result<(), CheckoutError>;
    async fn create_order(&self) -> Result<CourseOrder, ApiError>;
    fn open_widget(self, order: &CourseOrder) -> Result<Self::Widget, RazorpayError>;
}

/// SDK → backend order → widget. Stops at the first failure.
pub async fn start_payment<S: PaymentSteps>(steps: S) -> Result<S::Widget, CheckoutError> {
    steps.load_sdk().await?;
    let order = steps.create_order().await?;
    Ok(steps.open_widget(&order)?)
}

struct RazorpaySteps<'a> {
    config: &'a CheckoutConfig,
    client: &'a BackendClient,
    course_id: &'a str,
    session: &'a UserSession,
    handlers: CheckoutHandlers,
}

#[async_trait(?Send)]
impl<'a> PaymentSteps for RazorpaySteps<'a> {
    type Widget = CheckoutSession;

    async fn load_sdk(&self) -> Result<(), CheckoutError> {
        load_checkout_script(&self.config.script_src).await
    }

    async fn create_order(&self) -> Result<CourseOrder, ApiError> {
        self.client.create_order(self.course_id).await
    }

    fn open_widget(self, order: &CourseOrder) -> Result<CheckoutSession, RazorpayError> {
        let options = CheckoutOptions::for_order(order, self.config, self.session);
        open_checkout(&options, self.handlers)
    }
}

fn payment_handlers(
    client: &BackendClient,
    course_id: &str,
    user_id: Option<String>,
    toast: ToastHandle,
    navigate: Callback<Route>,
    on_verified: Callback<PaymentReceipt>,
) -> CheckoutHandlers {
    let on_success = {
        let client = client.clone();
        let course_id = course_id.to_string();
        let toast = toast.clone();
        Callback::from(move |receipt: PaymentReceipt| {
            let request = receipt.clone().into_verify_request(&course_id, user_id.clone());
            let client = client.clone();
            let toast = toast.clone();
            let navigate = navigate.clone();
            let on_verified = on_verified.clone();
            spawn_local(async move {
                let result = client.verify_payment(&request).await;
                if let Err(e) = &result {
                    log::error!("Verification failed: {}", e);
                }
                let notice = verify_outcome(&result);
                match notice.kind {
                    ToastKind::Success => toast.success(notice.message),
                    ToastKind::Error => toast.error(notice.message),
                }
                if result.is_ok() {
                    on_verified.emit(receipt);
                }
                if let Some(route) = notice.redirect {
                    navigate.emit(route);
                }
            });
        })
    };

    let on_failed = {
        let toast = toast.clone();
        Callback::from(move |err: RazorpayError| {
            log::error!(
                "Razorpay payment failed ({}): {}",
                err.code.as_deref().unwrap_or("unknown"),
                err
            );
            toast.error(err.description);
        })
    };

    let on_dismiss = {
        let course_id = course_id.to_string();
        Callback::from(move |_: ()| log::info!("Razorpay widget dismissed for course {}", course_id))
    };

    CheckoutHandlers {
        on_success,
        on_failed,
        on_dismiss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visitor_without_token_goes_to_login() {
        assert_eq!(entry_redirect(None), Some(Route::Login));

        let no_token = UserSession::from_json(r#"{"user":{"_id":"u1"}}"#).unwrap();
        assert_eq!(entry_redirect(Some(&no_token)), Some(Route::Login));

        let signed_in = UserSession::from_json(r#"{"token":"jwt"}"#).unwrap();
        assert_eq!(entry_redirect(Some(&signed_in)), None);
    }

    fn course(title: &str) -> Course {
        Course {
            id: Some("c1".into()),
            title: title.into(),
            price: 499.0,
            description: None,
        }
    }

    #[test]
    fn switching_course_clears_previous_page() {
        let shown = Rc::new(PageState::default()).reduce(PageAction::Loaded(course("Anatomy")));
        assert_eq!(shown.course.as_ref().map(|c| c.title.as_str()), Some("Anatomy"));

        let refetching = shown.reduce(PageAction::Fetching);
        assert_eq!(*refetching, PageState::default());

        let failed = Rc::new(PageState::default()).reduce(PageAction::Failed(LOAD_FAILED));
        let refetching = failed.reduce(PageAction::Fetching);
        assert_eq!(refetching.error, None);
        assert_eq!(refetching.course, None);
    }

    #[test]
    fn failure_replaces_loaded_course() {
        let page = Rc::new(PageState::default())
            .reduce(PageAction::Loaded(course("Anatomy")))
            .reduce(PageAction::Failed(ALREADY_PURCHASED));
        assert_eq!(page.course, None);
        assert_eq!(page.error.as_deref(), Some(ALREADY_PURCHASED));
    }

    #[test]
    fn host_navigator_receives_routes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let navigate = {
            let seen = seen.clone();
            navigator(Some(Callback::from(move |route: Route| seen.borrow_mut().push(route))))
        };
        navigate.emit(Route::Purchases);
        navigate.emit(Route::Login);
        assert_eq!(*seen.borrow(), vec![Route::Purchases, Route::Login]);
    }

    #[test]
    fn already_purchased_redirects_to_purchases() {
        let failure = LoadFailure::from_api_error(&ApiError::AlreadyPurchased);
        assert_eq!(failure.message, "You have already purchased this course.");
        assert_eq!(failure.redirect, Some(Route::Purchases));
    }

    #[test]
    fn other_load_errors_stay_on_page() {
        for err in [
            ApiError::Status {
                status: 500,
                message: "boom".into(),
            },
            ApiError::Network("offline".into()),
            ApiError::Decode("missing field `course`".into()),
        ] {
            let failure = LoadFailure::from_api_error(&err);
            assert_eq!(failure.message, "Error loading course data.");
            assert_eq!(failure.redirect, None);
        }
    }

    #[test]
    fn verified_payment_goes_to_purchases() {
        let notice = verify_outcome(&Ok(()));
        assert_eq!(notice.kind, ToastKind::Success);
        assert_eq!(notice.message, "Payment Successful");
        assert_eq!(notice.redirect, Some(Route::Purchases));
    }

    #[test]
    fn failed_verification_stays_put() {
        let notice = verify_outcome(&Err(ApiError::Status {
            status: 400,
            message: "Invalid signature".into(),
        }));
        assert_eq!(notice.kind, ToastKind::Error);
        assert_eq!(notice.message, "Payment verification failed");
        assert_eq!(notice.redirect, None);
    }
}
