//! Response envelope.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::api::ApiError;

/// Wrapper the backend puts around every response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Envelope {
    #[serde(default = "succeeded")]
    success: bool,

    #[serde(default)]
    data: Value,

    #[serde(default = "ok_status")]
    http_status: u16,
}

fn succeeded() -> bool {
    true
}

fn ok_status() -> u16 {
    200
}

impl Envelope {
    /// Unwrap the payload, turning a failed envelope into an [`ApiError`].
    ///
    /// A failed envelope carries its message in `data`.
    pub(crate) fn into_data<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        if !self.success || self.http_status >= 400 {
            let status = if self.http_status >= 400 {
                self.http_status
            } else {
                400
            };

            return Err(ApiError::from_status(status, message(self.data)));
        }

        Ok(serde_json::from_value(self.data)?)
    }
}

/// Message of a non-2xx response body, enveloped or not.
pub(crate) fn message_from_body(mut body: Value) -> Option<String> {
    match body.get_mut("data").map(Value::take) {
        Some(data) => message(data).or_else(|| message(body)),
        None => message(body),
    }
}

/// Human-readable message carried by a failure payload, if any.
fn message(data: Value) -> Option<String> {
    match data {
        Value::String(message) if !message.is_empty() => Some(message),
        Value::Object(mut fields) => match fields.remove("message") {
            Some(Value::String(message)) => Some(message),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use storefront::{models::CartItem, paging::Page};
    use testresult::TestResult;

    use super::*;
    use crate::api::ErrorCategory;

    #[test]
    fn successful_envelope_yields_page() -> TestResult {
        let envelope: Envelope = serde_json::from_str(
            r#"{
                "success": true,
                "httpStatus": 200,
                "executeDate": "2024-05-01T10:00:00",
                "data": {
                    "content": [{"id": "c1", "productTitle": "Lamp", "productId": "p1",
                                 "price": 120000, "quantity": 1}],
                    "totalPages": 3,
                    "hasNext": true,
                    "currentPage": 1
                }
            }"#,
        )?;

        let page: Page<CartItem> = envelope.into_data()?;

        assert_eq!(page.content.len(), 1);
        assert!(page.has_next);

        Ok(())
    }

    #[test]
    fn failed_envelope_carries_server_message() -> TestResult {
        let envelope: Envelope = serde_json::from_str(
            r#"{"success": false, "httpStatus": 400, "data": "Quantity exceeds stock"}"#,
        )?;

        let error = envelope.into_data::<String>().err();

        assert_eq!(
            error.as_ref().map(ToString::to_string).as_deref(),
            Some("Quantity exceeds stock")
        );

        Ok(())
    }

    #[test]
    fn error_status_wins_over_success_flag() -> TestResult {
        let envelope: Envelope =
            serde_json::from_str(r#"{"success": true, "httpStatus": 401, "data": null}"#)?;

        let error = envelope.into_data::<String>().err();

        assert_eq!(
            error.map(|error| error.category()),
            Some(ErrorCategory::Unauthorized)
        );

        Ok(())
    }

    #[test]
    fn error_body_message_is_extracted() {
        let enveloped = serde_json::json!({"success": false, "data": "Cart item not found"});
        let plain = serde_json::json!({"status": 500, "message": "Internal error"});

        assert_eq!(
            message_from_body(enveloped).as_deref(),
            Some("Cart item not found")
        );
        assert_eq!(message_from_body(plain).as_deref(), Some("Internal error"));
    }

    #[test]
    fn null_data_decodes_as_none() -> TestResult {
        let envelope: Envelope = serde_json::from_str(r#"{"success": true, "data": null}"#)?;

        let address: Option<String> = envelope.into_data()?;

        assert_eq!(address, None);

        Ok(())
    }
}
