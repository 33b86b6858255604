use crate::domain::response::order::{ErrorBody, METHOD_NOT_ALLOWED_MESSAGE};
use serde::{Deserialize, Serialize};
use shared::errors::ServiceError;
use std::collections::BTreeMap;

pub const HEADER_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const HEADER_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const HEADER_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const HEADER_MAX_AGE: &str = "Access-Control-Max-Age";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, X-User-Id";
pub const PREFLIGHT_MAX_AGE_SECS: u32 = 86400;

/// Outgoing envelope handed back to the HTTP trigger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEvent {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ResponseEvent {
    pub fn preflight() -> Self {
        let headers = BTreeMap::from([
            (HEADER_ALLOW_ORIGIN.to_string(), "*".to_string()),
            (HEADER_ALLOW_METHODS.to_string(), ALLOWED_METHODS.to_string()),
            (HEADER_ALLOW_HEADERS.to_string(), ALLOWED_HEADERS.to_string()),
            (HEADER_MAX_AGE.to_string(), PREFLIGHT_MAX_AGE_SECS.to_string()),
        ]);

        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    pub fn json<T: Serialize>(status_code: u16, payload: &T) -> Result<Self, ServiceError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ServiceError::Internal(format!("Failed to serialize response: {e}")))?;

        let headers = BTreeMap::from([
            (HEADER_CONTENT_TYPE.to_string(), "application/json".to_string()),
            (HEADER_ALLOW_ORIGIN.to_string(), "*".to_string()),
        ]);

        Ok(Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        })
    }

    pub fn method_not_allowed() -> Result<Self, ServiceError> {
        let body = serde_json::to_string(&ErrorBody {
            error: METHOD_NOT_ALLOWED_MESSAGE.to_string(),
        })
        .map_err(|e| ServiceError::Internal(format!("Failed to serialize response: {e}")))?;

        Ok(Self {
            status_code: 405,
            headers: BTreeMap::from([(HEADER_ALLOW_ORIGIN.to_string(), "*".to_string())]),
            body,
            is_base64_encoded: false,
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflight_carries_fixed_cors_headers() {
        let response = ResponseEvent::preflight();

        assert_eq!(response.status_code, 200);
        assert!(response.body.is_empty());
        assert_eq!(response.header(HEADER_ALLOW_ORIGIN), Some("*"));
        assert_eq!(
            response.header(HEADER_ALLOW_METHODS),
            Some("GET, POST, PUT, OPTIONS")
        );
        assert_eq!(
            response.header(HEADER_ALLOW_HEADERS),
            Some("Content-Type, X-User-Id")
        );
        assert_eq!(response.header(HEADER_MAX_AGE), Some("86400"));
        assert_eq!(response.header(HEADER_CONTENT_TYPE), None);
    }

    #[test]
    fn method_not_allowed_only_sets_origin_header() {
        let response = ResponseEvent::method_not_allowed().unwrap();

        assert_eq!(response.status_code, 405);
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.header(HEADER_ALLOW_ORIGIN), Some("*"));

        let body: ErrorBody = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body.error, "Method not allowed");
    }

    #[test]
    fn envelope_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(ResponseEvent::preflight()).unwrap();

        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["isBase64Encoded"], false);
        assert_eq!(value["body"], "");
        assert!(value["headers"].is_object());
    }
}
