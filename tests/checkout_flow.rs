use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::json;
use yew_course_checkout::api::ApiError;
use yew_course_checkout::checkout_component::{
    entry_redirect, start_payment, verify_outcome, LoadFailure, PaymentSteps,
};
use yew_course_checkout::client::{CheckoutOptions, PaymentReceipt, RazorpayError};
use yew_course_checkout::model::{CourseDetails, CourseOrder};
use yew_course_checkout::session::UserSession;
use yew_course_checkout::toast::ToastKind;
use yew_course_checkout::{CheckoutConfig, CheckoutError, Route};

const STORED_USER: &str = r#"{
    "token": "eyJhbGciOiJIUzI1NiJ9.e30.sig",
    "user": {
        "_id": "665f1c0ab2",
        "firstName": "Meera",
        "lastName": "Iyer",
        "email": "meera@example.com"
    }
}"#;

#[test]
fn signed_in_user_sees_order_details() {
    let session = UserSession::from_json(STORED_USER).unwrap();
    assert_eq!(entry_redirect(Some(&session)), None);

    let details: CourseDetails = serde_json::from_value(json!({
        "message": "Course details",
        "course": { "_id": "c7", "title": "Clinical Microbiology", "price": 1299 }
    }))
    .unwrap();
    assert_eq!(details.course.display_price(), "$1299");
    assert_eq!(details.course.title, "Clinical Microbiology");
}

#[test]
fn second_purchase_is_refused() {
    let err = ApiError::from_buy_status(400, "User has already purchased this course".into());
    let failure = LoadFailure::from_api_error(&err);
    assert_eq!(failure.message, "You have already purchased this course.");
    assert_eq!(failure.redirect.map(|r| r.path()).as_deref(), Some("/purchases"));
}

/// Pay-button steps that record their calls and answer from fixed results.
struct ScriptedSteps {
    sdk: Result<(), CheckoutError>,
    order: Result<CourseOrder, ApiError>,
    calls: Rc<RefCell<Vec<&'static str>>>,
}

impl ScriptedSteps {
    fn new(sdk: Result<(), CheckoutError>, order: Result<CourseOrder, ApiError>) -> Self {
        Self {
            sdk,
            order,
            calls: Rc::default(),
        }
    }
}

#[async_trait(?Send)]
impl PaymentSteps for ScriptedSteps {
    type Widget = String;

    async fn load_sdk(&self) -> Result<(), CheckoutError> {
        self.calls.borrow_mut().push("load_sdk");
        self.sdk.clone()
    }

    async fn create_order(&self) -> Result<CourseOrder, ApiError> {
        self.calls.borrow_mut().push("create_order");
        self.order.clone()
    }

    fn open_widget(self, order: &CourseOrder) -> Result<String, RazorpayError> {
        self.calls.borrow_mut().push("open_widget");
        Ok(order.id.clone())
    }
}

fn sample_order() -> CourseOrder {
    serde_json::from_value(json!({
        "id": "order_OZ8x",
        "amount": 129900,
        "currency": "INR",
        "key": "rzp_test_1DP5mmOlF5G5ag",
        "course": { "_id": "c7", "title": "Clinical Microbiology", "price": 1299 }
    }))
    .unwrap()
}

#[tokio::test]
async fn sdk_failure_stops_before_order_and_widget() {
    let steps = ScriptedSteps::new(Err(CheckoutError::SdkLoad), Ok(sample_order()));
    let calls = steps.calls.clone();

    let err = start_payment(steps).await.unwrap_err();

    assert_eq!(*calls.borrow(), vec!["load_sdk"]);
    assert_eq!(err, CheckoutError::SdkLoad);
    assert_eq!(err.toast_message(), "Failed to load Razorpay SDK.");
}

#[tokio::test]
async fn order_failure_never_opens_widget() {
    let steps = ScriptedSteps::new(Ok(()), Err(ApiError::Network("offline".into())));
    let calls = steps.calls.clone();

    let err = start_payment(steps).await.unwrap_err();

    assert_eq!(*calls.borrow(), vec!["load_sdk", "create_order"]);
    assert_eq!(err.toast_message(), "Payment initiation failed");
}

#[tokio::test]
async fn pay_runs_sdk_then_order_then_widget() {
    let steps = ScriptedSteps::new(Ok(()), Ok(sample_order()));
    let calls = steps.calls.clone();

    let opened = start_payment(steps).await.unwrap();

    assert_eq!(opened, "order_OZ8x");
    assert_eq!(*calls.borrow(), vec!["load_sdk", "create_order", "open_widget"]);
}

#[test]
fn order_to_widget_to_verification() {
    let session = UserSession::from_json(STORED_USER).unwrap();
    let order = sample_order();

    let options = CheckoutOptions::for_order(&order, &CheckoutConfig::default(), &session);
    assert_eq!(options.amount, "129900");
    assert_eq!(options.order_id, "order_OZ8x");
    assert_eq!(options.prefill.name.as_deref(), Some("Meera"));

    let receipt: PaymentReceipt = serde_json::from_value(json!({
        "razorpay_payment_id": "pay_OZ8y",
        "razorpay_order_id": "order_OZ8x",
        "razorpay_signature": "9e4b0c"
    }))
    .unwrap();
    let body = serde_json::to_value(receipt.into_verify_request("c7", session.user_id())).unwrap();
    assert_eq!(body["courseId"], "c7");
    assert_eq!(body["userId"], "665f1c0ab2");
    assert_eq!(body["razorpay_order_id"], "order_OZ8x");

    let notice = verify_outcome(&Ok(()));
    assert_eq!(notice.kind, ToastKind::Success);
    assert_eq!(notice.redirect, Some(Route::Purchases));
}

#[test]
fn anonymous_visit_redirects_to_login() {
    assert_eq!(entry_redirect(None).map(|r| r.path()).as_deref(), Some("/login"));
}
