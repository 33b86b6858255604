use serde::{
    Deserialize, Serialize,
    de::{DeserializeOwned, Error as _},
};
use serde_json::Value;

pub const INITIAL_ORDER_STATUS: &str = "pending";

/// Decodes a request body that must be a JSON object. Derived `Deserialize`
/// would otherwise accept an array and bind its items to fields by position.
pub fn decode_object<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;

    let found = match &value {
        Value::Object(_) => return serde_json::from_value(value),
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    };

    Err(serde_json::Error::custom(format!(
        "expected a JSON object body, found {found}"
    )))
}

/// Body of a create call. The three `String` fields are mandatory: a body
/// without them fails to decode and nothing is inserted. Any `status` or
/// `id` sent by the client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub telegram: String,
    pub uid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRecordRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub telegram: String,
    pub uid: String,
    pub status: String,
}

impl From<CreateOrderRequest> for CreateOrderRecordRequest {
    fn from(value: CreateOrderRequest) -> Self {
        CreateOrderRecordRequest {
            first_name: value.first_name,
            last_name: value.last_name,
            phone: value.phone,
            telegram: value.telegram,
            uid: value.uid,
            status: INITIAL_ORDER_STATUS.to_string(),
        }
    }
}

/// Body of an update call. Both fields are optional and neither is checked
/// against storage or a status vocabulary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_first_name_telegram_and_uid() {
        for body in [
            r#"{"telegram": "@ann", "uid": "u1"}"#,
            r#"{"first_name": "Ann", "uid": "u1"}"#,
            r#"{"first_name": "Ann", "telegram": "@ann"}"#,
            "{}",
        ] {
            assert!(
                serde_json::from_str::<CreateOrderRequest>(body).is_err(),
                "expected decode failure for {body}"
            );
        }
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        for body in [r#"["Ann", null, null, "@ann", "u1"]"#, "[]", "\"Ann\"", "7", "null"] {
            assert!(
                decode_object::<CreateOrderRequest>(body).is_err(),
                "expected decode failure for {body}"
            );
        }

        assert!(decode_object::<UpdateOrderStatusRequest>(r#"[1, "accepted"]"#).is_err());
        assert!(decode_object::<UpdateOrderStatusRequest>("[]").is_err());
    }

    #[test]
    fn object_bodies_decode() {
        let req: UpdateOrderStatusRequest =
            decode_object(r#"{"id": 3, "status": "accepted"}"#).unwrap();

        assert_eq!(req.id, Some(3));
        assert_eq!(req.status.as_deref(), Some("accepted"));
    }

    #[test]
    fn create_optional_fields_default_to_none() {
        let req: CreateOrderRequest =
            serde_json::from_str(r#"{"first_name": "Ann", "telegram": "@ann", "uid": "u1"}"#)
                .unwrap();

        assert!(req.last_name.is_none());
        assert!(req.phone.is_none());
    }

    #[test]
    fn record_status_is_forced_to_pending() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{"first_name": "Ann", "telegram": "@ann", "uid": "u1", "status": "accepted"}"#,
        )
        .unwrap();

        let record = CreateOrderRecordRequest::from(req);
        assert_eq!(record.status, "pending");
    }

    #[test]
    fn update_accepts_missing_fields() {
        let req: UpdateOrderStatusRequest = serde_json::from_str("{}").unwrap();
        assert!(req.id.is_none());
        assert!(req.status.is_none());

        let req: UpdateOrderStatusRequest =
            serde_json::from_str(r#"{"id": 7, "status": "whatever"}"#).unwrap();
        assert_eq!(req.id, Some(7));
        assert_eq!(req.status.as_deref(), Some("whatever"));
    }
}
