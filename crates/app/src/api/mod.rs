//! Storefront API client
//!
//! Thin typed layer over `reqwest`: every request is sent under `/api/v1`
//! with the session's bearer token and user id, and every response is
//! unwrapped from the backend envelope.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use storefront::session::Session;
use tracing::{debug, warn};

use crate::config::ApiConfig;

mod envelope;
mod errors;

pub use errors::{ApiError, ErrorCategory};

use envelope::Envelope;

/// Prefix of every backend route.
pub const API_PREFIX: &str = "/api/v1";

/// Header carrying the signed-in user's subject id.
pub const USER_ID_HEADER: &str = "X-USER-ID";

/// HTTP client bound to one backend and, optionally, one session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig, session: Option<Session>) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Session requests are sent with.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Absolute URL of a backend route.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    /// Start a request to a backend route, with session headers attached.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.authorize(self.http.request(method, self.endpoint(path)))
    }

    /// Start a request to `route/{segment}`, escaping the segment so it stays a
    /// single path segment.
    pub(crate) fn request_item(&self, method: Method, route: &str, segment: &str) -> RequestBuilder {
        let endpoint = self.endpoint(route);

        let request = match Url::parse(&endpoint) {
            Ok(mut url) => {
                // Only non-hierarchical URLs refuse segments; reqwest rejects their scheme on send.
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.push(segment);
                }

                self.http.request(method, url)
            }
            // Parse errors surface when the request is built.
            Err(_) => self.http.request(method, endpoint),
        };

        self.authorize(request)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(session) => request
                .bearer_auth(session.access_token())
                .header(USER_ID_HEADER, session.user_id()),
            None => request,
        }
    }

    /// Send a request and unwrap the envelope's payload.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        debug!(%method, path = url.path(), "sending API request");

        let response = self.http.execute(request).await.inspect_err(|error| {
            warn!(%method, path = url.path(), "API request failed: {error}");
        })?;

        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(envelope::message_from_body);

            warn!(%method, path = url.path(), status = status.as_u16(), "API request rejected");

            return Err(ApiError::from_status(status.as_u16(), message));
        }

        let body = response.bytes().await?;
        let envelope: Envelope = serde_json::from_slice(&body)?;

        envelope.into_data().inspect_err(|error| {
            warn!(%method, path = url.path(), "API returned an error: {error}");
        })
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;
    use storefront::session::UserInfo;
    use testresult::TestResult;

    use super::*;
    use crate::test::api_config;

    #[test]
    fn endpoint_joins_base_url_and_prefix() -> TestResult {
        let client = ApiClient::new(&api_config("http://shop.test/"), None)?;

        assert_eq!(
            client.endpoint("/sale/products"),
            "http://shop.test/api/v1/sale/products"
        );

        Ok(())
    }

    #[test]
    fn session_headers_are_attached() -> TestResult {
        let session = Session::new(
            "token-123",
            UserInfo {
                sub: "user-9".to_string(),
                ..UserInfo::default()
            },
        );
        let client = ApiClient::new(&api_config("http://shop.test"), Some(session))?;

        let request = client.request(Method::GET, "/user/address").build()?;

        assert_eq!(
            request.headers().get("authorization").map(HeaderValue::as_bytes),
            Some(b"Bearer token-123".as_slice())
        );
        assert_eq!(
            request.headers().get(USER_ID_HEADER).map(HeaderValue::as_bytes),
            Some(b"user-9".as_slice())
        );

        Ok(())
    }

    #[test]
    fn item_segment_cannot_change_the_route() -> TestResult {
        let client = ApiClient::new(&api_config("http://shop.test"), None)?;

        let request = client
            .request_item(Method::GET, "/sale/products", "lamp/../orders?x=1#top")
            .build()?;

        assert_eq!(
            request.url().path(),
            "/api/v1/sale/products/lamp%2F..%2Forders%3Fx=1%23top"
        );
        assert_eq!(request.url().query(), None);
        assert_eq!(request.url().fragment(), None);

        Ok(())
    }

    #[test]
    fn anonymous_requests_carry_no_credentials() -> TestResult {
        let client = ApiClient::new(&api_config("http://shop.test"), None)?;

        let request = client.request(Method::GET, "/sale/products").build()?;

        assert!(request.headers().get("authorization").is_none());
        assert!(request.headers().get(USER_ID_HEADER).is_none());

        Ok(())
    }
}
