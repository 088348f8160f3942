//! Payment return page.

use std::sync::Arc;

use storefront::models::PaymentRecord;
use tracing::{info, warn};

use crate::{
    domain::payments::{GatewayReturn, PaymentsService},
    pages::PageError,
};

/// Handles the user's return from the payment gateway.
pub struct PaymentPage {
    payments: Arc<dyn PaymentsService>,
}

impl std::fmt::Debug for PaymentPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentPage").finish_non_exhaustive()
    }
}

impl PaymentPage {
    pub fn new(payments: Arc<dyn PaymentsService>) -> Self {
        Self { payments }
    }

    pub fn parse_return(query: &str) -> GatewayReturn {
        GatewayReturn::parse(query)
    }

    /// Hand the return to the backend, which checks the signature and
    /// records the payment. Returns the recorded payment's id.
    pub async fn confirm(&self, gateway: &GatewayReturn) -> Result<String, PageError> {
        if !gateway.is_success() {
            warn!(
                txn_ref = gateway.txn_ref.as_str(),
                response_code = gateway.response_code.as_str(),
                "gateway reported an unsuccessful payment"
            );
        }

        let payment_id = self.payments.handle_success(gateway.query()).await?;

        info!(txn_ref = gateway.txn_ref.as_str(), %payment_id, "payment recorded");

        Ok(payment_id)
    }

    pub async fn payment(&self, payment_id: &str) -> Result<PaymentRecord, PageError> {
        Ok(self.payments.payment(payment_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{api::ApiError, domain::payments::MockPaymentsService};

    const QUERY: &str = "?vnp_Amount=15000000&vnp_ResponseCode=00&vnp_TransactionStatus=00\
        &vnp_TxnRef=5f2c&vnp_SecureHash=9a8b7c";

    #[tokio::test]
    async fn confirm_forwards_query_without_question_mark() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_handle_success()
            .withf(|query| {
                query.starts_with("vnp_Amount=15000000&") && query.ends_with("vnp_SecureHash=9a8b7c")
            })
            .once()
            .return_once(|_| Ok("pay-1".to_string()));

        let page = PaymentPage::new(Arc::new(payments));
        let gateway = PaymentPage::parse_return(QUERY);

        assert_eq!(page.confirm(&gateway).await?, "pay-1");

        Ok(())
    }

    #[tokio::test]
    async fn rejected_confirmation_surfaces_server_message() {
        let mut payments = MockPaymentsService::new();

        payments.expect_handle_success().once().return_once(|_| {
            Err(ApiError::Application {
                status: 400,
                message: "invalid signature".to_string(),
            })
        });

        let page = PaymentPage::new(Arc::new(payments));
        let result = page.confirm(&PaymentPage::parse_return(QUERY)).await;

        assert_eq!(
            result.err().map(|error| error.to_string()),
            Some("invalid signature".to_string())
        );
    }

    #[tokio::test]
    async fn payment_is_fetched_by_id() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_payment()
            .withf(|id| id == "pay-1")
            .once()
            .return_once(|_| {
                Ok(PaymentRecord {
                    id: "pay-1".to_string(),
                    order_id: "order-9".to_string(),
                    vnp_txn_ref: "5f2c".to_string(),
                    vnp_transaction_no: "14422574".to_string(),
                    amount: "150000".to_string(),
                    bank_code: "NCB".to_string(),
                    card_type: "ATM".to_string(),
                    pay_date: "20240315143005".to_string(),
                    response_code: "00".to_string(),
                    transaction_status: "00".to_string(),
                    payment_status: "COMPLETED".to_string(),
                })
            });

        let page = PaymentPage::new(Arc::new(payments));

        assert_eq!(page.payment("pay-1").await?.order_id, "order-9");

        Ok(())
    }
}
