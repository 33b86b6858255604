mod in_memory;
mod postgres;

pub use self::in_memory::{InMemoryOrderConnection, InMemoryOrderStore};
pub use self::postgres::{PgOrderConnection, PgOrderConnectionFactory};
