use crate::abstract_trait::order::repository::DynOrderConnection;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderConnectionFactory = Arc<dyn OrderConnectionFactoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderConnectionFactoryTrait {
    async fn connect(&self) -> Result<DynOrderConnection, RepositoryError>;
}
