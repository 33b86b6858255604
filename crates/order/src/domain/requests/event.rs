use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Method name as carried by the request envelope. Matching is exact and
/// case-sensitive, so `"get"` lands in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Options,
    Get,
    Post,
    Put,
    Other(String),
}

impl From<&str> for HttpMethod {
    fn from(value: &str) -> Self {
        match value {
            "OPTIONS" => HttpMethod::Options,
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            other => HttpMethod::Other(other.to_string()),
        }
    }
}

/// Incoming invocation envelope produced by the HTTP trigger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEvent {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl RequestEvent {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            http_method: Some(method.into()),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_query(mut self, params: HashMap<String, String>) -> Self {
        self.query_string_parameters = Some(params);
        self
    }

    /// Missing method defaults to `GET`.
    pub fn method(&self) -> HttpMethod {
        HttpMethod::from(self.http_method.as_deref().unwrap_or("GET"))
    }

    /// Absent body decodes as an empty JSON object.
    pub fn body_or_empty(&self) -> &str {
        self.body.as_deref().unwrap_or("{}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_matching_is_case_sensitive() {
        assert_eq!(RequestEvent::new("GET").method(), HttpMethod::Get);
        assert_eq!(RequestEvent::new("OPTIONS").method(), HttpMethod::Options);
        assert_eq!(
            RequestEvent::new("get").method(),
            HttpMethod::Other("get".into())
        );
    }

    #[test]
    fn missing_method_defaults_to_get() {
        let event: RequestEvent = serde_json::from_str(r#"{"body": null}"#).unwrap();
        assert_eq!(event.method(), HttpMethod::Get);
    }

    #[test]
    fn envelope_fields_use_camel_case() {
        let event: RequestEvent = serde_json::from_str(
            r#"{
                "httpMethod": "PUT",
                "body": "{\"id\": 1}",
                "queryStringParameters": {"page": "2"},
                "headers": {"Content-Type": "application/json"}
            }"#,
        )
        .unwrap();

        assert_eq!(event.method(), HttpMethod::Put);
        assert_eq!(event.body_or_empty(), "{\"id\": 1}");
        assert_eq!(
            event
                .query_string_parameters
                .as_ref()
                .and_then(|q| q.get("page"))
                .map(String::as_str),
            Some("2")
        );
    }

    #[test]
    fn absent_body_reads_as_empty_object() {
        assert_eq!(RequestEvent::new("POST").body_or_empty(), "{}");
    }
}
