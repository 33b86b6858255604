use crate::{
    abstract_trait::order::repository::DynOrderConnectionFactory,
    handler::OrderRequestHandler,
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub order_handler: OrderRequestHandler,
    pub registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("order_handler", &self.order_handler)
            .field("registry", &self.registry)
            .finish()
    }
}

impl AppState {
    pub fn new(connections: DynOrderConnectionFactory) -> Self {
        let mut registry = Registry::default();

        let order_handler = OrderRequestHandler::new(connections, &mut registry);

        Self {
            order_handler,
            registry: Arc::new(Mutex::new(registry)),
        }
    }
}
