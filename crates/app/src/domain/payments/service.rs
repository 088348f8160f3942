//! Payments service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Method, RequestBuilder};
use storefront::models::PaymentRecord;

use crate::api::{ApiClient, ApiError};

#[derive(Debug, Clone)]
pub struct HttpPaymentsService {
    client: ApiClient,
}

impl HttpPaymentsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn payment_request(&self, payment_id: &str) -> RequestBuilder {
        self.client
            .request_item(Method::GET, "/payment/vnpay_return", payment_id)
    }

    fn handle_success_request(&self, query: &str) -> RequestBuilder {
        let query = query.trim_start_matches('?');

        self.client
            .request(Method::GET, &format!("/payment/handle_success?{query}"))
    }
}

#[async_trait]
impl PaymentsService for HttpPaymentsService {
    async fn payment(&self, payment_id: &str) -> Result<PaymentRecord, ApiError> {
        self.client
            .send(self.payment_request(payment_id))
            .await
    }

    async fn handle_success(&self, query: &str) -> Result<String, ApiError> {
        self.client.send(self.handle_success_request(query)).await
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Retrieve the recorded payment.
    async fn payment(&self, payment_id: &str) -> Result<PaymentRecord, ApiError>;

    /// Forward the gateway's return query untouched. Returns the payment id.
    async fn handle_success(&self, query: &str) -> Result<String, ApiError>;
}
