use crate::{
    domain::requests::order::{CreateOrderRecordRequest, UpdateOrderStatusRequest},
    model::order::Order as OrderModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;

pub type DynOrderConnection = Box<dyn OrderConnectionTrait + Send>;

/// One open storage session. Every statement commits on its own.
#[async_trait]
pub trait OrderConnectionTrait {
    /// All orders, newest `created_at` first.
    async fn find_all(&mut self) -> Result<Vec<OrderModel>, RepositoryError>;

    /// Inserts one row and returns the generated id.
    async fn create_order(
        &mut self,
        req: &CreateOrderRecordRequest,
    ) -> Result<i32, RepositoryError>;

    /// Sets status and `updated_at` for the matching row. Returns the number
    /// of rows affected, which is zero when nothing matched.
    async fn update_order_status(
        &mut self,
        req: &UpdateOrderStatusRequest,
    ) -> Result<u64, RepositoryError>;

    async fn close(&mut self) -> Result<(), RepositoryError>;
}
