use serde::{Deserialize, Serialize};

/// Course as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Course {
    /// Price as rendered on the order summary, e.g. `$49.5`.
    pub fn display_price(&self) -> String {
        format!("${}", self.price)
    }
}

/// Body of `POST /course/buy/:courseId` when only the course is needed.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseDetails {
    pub course: Course,
}

/// Body of `POST /course/buy/:courseId` used to start a payment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CourseOrder {
    /// Razorpay order id, e.g. `order_Ndx1...`.
    pub id: String,
    /// Amount in the smallest currency unit.
    pub amount: u64,
    pub currency: String,
    /// Razorpay public key.
    pub key: String,
    pub course: Course,
}

/// Body of `POST /course/verify-payment`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    #[serde(rename = "courseId")]
    pub course_id: String,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}
