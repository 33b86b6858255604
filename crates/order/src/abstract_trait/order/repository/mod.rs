mod connection;
mod factory;

pub use self::connection::{DynOrderConnection, OrderConnectionTrait};
pub use self::factory::{DynOrderConnectionFactory, OrderConnectionFactoryTrait};
