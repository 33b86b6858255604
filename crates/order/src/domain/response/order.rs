use crate::model::order::Order as OrderModel;
use serde::{Deserialize, Serialize};
use shared::utils::format_iso_datetime;

pub const ORDER_CREATED_MESSAGE: &str = "Order created";
pub const ORDER_UPDATED_MESSAGE: &str = "Order updated";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub telegram: String,
    pub uid: String,
    pub status: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// model to response
impl From<OrderModel> for OrderResponse {
    fn from(value: OrderModel) -> Self {
        OrderResponse {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            phone: value.phone,
            telegram: value.telegram,
            uid: value.uid,
            status: value.status,
            created_at: value.created_at.as_ref().map(format_iso_datetime),
            updated_at: value.updated_at.as_ref().map(format_iso_datetime),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderCreatedResponse {
    pub id: i32,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn null_timestamps_stay_null() {
        let model = OrderModel {
            id: 3,
            first_name: "Ann".into(),
            last_name: None,
            phone: None,
            telegram: "@ann".into(),
            uid: "u1".into(),
            status: "pending".into(),
            created_at: Some(
                NaiveDate::from_ymd_opt(2025, 1, 2)
                    .unwrap()
                    .and_hms_opt(3, 4, 5)
                    .unwrap(),
            ),
            updated_at: None,
        };

        let value = serde_json::to_value(OrderResponse::from(model)).unwrap();

        assert_eq!(value["created_at"], "2025-01-02T03:04:05");
        assert!(value["updated_at"].is_null());
        assert!(value["last_name"].is_null());
        assert!(value["phone"].is_null());
    }
}
