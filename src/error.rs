use thiserror::Error;

use crate::api::ApiError;
use crate::client::RazorpayError;

/// Failure of the pay-button flow. Each variant ends up as a toast.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    #[error("Razorpay SDK could not be loaded")]
    SdkLoad,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Razorpay widget error: {0}")]
    Widget(#[from] RazorpayError),
}

impl CheckoutError {
    /// Text of the error toast shown for this failure.
    pub fn toast_message(&self) -> &'static str {
        match self {
            CheckoutError::SdkLoad => "Failed to load Razorpay SDK.",
            CheckoutError::Api(_) | CheckoutError::Widget(_) => "Payment initiation failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_messages() {
        assert_eq!(CheckoutError::SdkLoad.toast_message(), "Failed to load Razorpay SDK.");
        assert_eq!(
            CheckoutError::from(ApiError::Network("offline".into())).toast_message(),
            "Payment initiation failed"
        );
        assert_eq!(
            CheckoutError::from(RazorpayError::from_message("Razorpay is not defined"))
                .toast_message(),
            "Payment initiation failed"
        );
    }

    #[test]
    fn api_errors_display_transparently() {
        let err = CheckoutError::from(ApiError::AlreadyPurchased);
        assert_eq!(err.to_string(), "course already purchased");
    }
}
