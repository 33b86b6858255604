mod database;

pub use self::database::{ConnectionManager, DatabaseConnection};
