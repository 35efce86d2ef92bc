// Payment session operations

use std::sync::Arc;

use tracing::info;

use super::models::{CheckoutRequest, CheckoutSession, PaymentConfirmation, PaymentInfo};
use crate::api::ApiClient;
use crate::applications::LoanApplication;
use crate::common::ClientError;

/// Typed operations for the checkout flow.
#[derive(Clone)]
pub struct PaymentClient {
    api: Arc<ApiClient>,
}

impl PaymentClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// POST /create-checkout-session - start a hosted checkout for the
    /// application fee. The caller sends the user to the returned URL.
    pub async fn create_checkout(
        &self,
        application: &LoanApplication,
    ) -> Result<CheckoutSession, ClientError> {
        let request = CheckoutRequest::for_application(application);
        let session: CheckoutSession = self
            .api
            .post("/create-checkout-session", &request)
            .await?;
        info!(application_id = %application.id, "Checkout session created");
        Ok(session)
    }

    /// PATCH /payment-success?session_id= - confirm a completed checkout
    /// and obtain the transaction id.
    pub async fn confirm(&self, session_id: &str) -> Result<PaymentConfirmation, ClientError> {
        let path = format!(
            "/payment-success?session_id={}",
            urlencoding::encode(session_id)
        );
        let confirmation: PaymentConfirmation = self.api.patch_empty(&path).await?;
        info!(transaction_id = %confirmation.transaction_id, "Payment confirmed");
        Ok(confirmation)
    }

    /// GET /payment-info?transactionId= - receipt lookup.
    pub async fn info(&self, transaction_id: &str) -> Result<PaymentInfo, ClientError> {
        let path = format!(
            "/payment-info?transactionId={}",
            urlencoding::encode(transaction_id)
        );
        self.api.get(&path).await
    }
}
