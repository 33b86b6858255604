use crate::errors::RepositoryError;
use sqlx::{Connection, PgConnection};
use tracing::{debug, error};

pub type DatabaseConnection = PgConnection;

/// Opens standalone PostgreSQL sessions. Orders are served one session per
/// invocation, so there is no pool here.
pub struct ConnectionManager;

impl ConnectionManager {
    pub async fn connect(connection_string: &str) -> Result<DatabaseConnection, RepositoryError> {
        let conn = PgConnection::connect(connection_string)
            .await
            .map_err(|err| {
                error!("❌ Failed to open database connection: {err}");
                RepositoryError::from(err)
            })?;

        debug!("🔌 Database connection established");
        Ok(conn)
    }

    pub async fn close(conn: DatabaseConnection) -> Result<(), RepositoryError> {
        conn.close().await.map_err(|err| {
            error!("❌ Failed to close database connection: {err}");
            RepositoryError::from(err)
        })?;

        debug!("🔌 Database connection closed");
        Ok(())
    }
}
