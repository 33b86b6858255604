use crate::{
    abstract_trait::order::repository::{
        DynOrderConnection, OrderConnectionFactoryTrait, OrderConnectionTrait,
    },
    domain::requests::order::{CreateOrderRecordRequest, UpdateOrderStatusRequest},
    model::order::Order as OrderModel,
};
use async_trait::async_trait;
use shared::{
    config::{ConnectionManager, DatabaseConnection},
    errors::RepositoryError,
};
use tracing::{error, info};

/// Opens a fresh PostgreSQL session for every invocation.
pub struct PgOrderConnectionFactory {
    database_url: String,
    timezone: String,
}

impl PgOrderConnectionFactory {
    pub fn new(database_url: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            timezone: timezone.into(),
        }
    }
}

#[async_trait]
impl OrderConnectionFactoryTrait for PgOrderConnectionFactory {
    async fn connect(&self) -> Result<DynOrderConnection, RepositoryError> {
        let conn = ConnectionManager::connect(&self.database_url).await?;

        Ok(Box::new(PgOrderConnection {
            conn: Some(conn),
            timezone: self.timezone.clone(),
        }))
    }
}

pub struct PgOrderConnection {
    conn: Option<DatabaseConnection>,
    timezone: String,
}

impl PgOrderConnection {
    fn session(&mut self) -> Result<&mut DatabaseConnection, RepositoryError> {
        self.conn.as_mut().ok_or(RepositoryError::ConnectionClosed)
    }
}

#[async_trait]
impl OrderConnectionTrait for PgOrderConnection {
    async fn find_all(&mut self) -> Result<Vec<OrderModel>, RepositoryError> {
        let conn = self.session()?;

        let orders = sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT id, first_name, last_name, phone, telegram, uid, status, created_at, updated_at
            FROM orders
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch orders: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!("📦 Found {} orders", orders.len());
        Ok(orders)
    }

    async fn create_order(
        &mut self,
        req: &CreateOrderRecordRequest,
    ) -> Result<i32, RepositoryError> {
        let conn = self.session()?;

        let order_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO orders (first_name, last_name, phone, telegram, uid, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&req.first_name)
        .bind(req.last_name.as_deref())
        .bind(req.phone.as_deref())
        .bind(&req.telegram)
        .bind(&req.uid)
        .bind(&req.status)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create order for uid {}: {:?}", req.uid, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created order ID {} for uid {}", order_id, req.uid);
        Ok(order_id)
    }

    async fn update_order_status(
        &mut self,
        req: &UpdateOrderStatusRequest,
    ) -> Result<u64, RepositoryError> {
        let timezone = self.timezone.clone();
        let conn = self.session()?;

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = $1,
                updated_at = NOW() AT TIME ZONE $2
            WHERE id = $3
            "#,
        )
        .bind(req.status.as_deref())
        .bind(timezone.as_str())
        .bind(req.id)
        .execute(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update order ID {:?}: {:?}", req.id, err);
            RepositoryError::from(err)
        })?;

        Ok(result.rows_affected())
    }

    async fn close(&mut self) -> Result<(), RepositoryError> {
        match self.conn.take() {
            Some(conn) => ConnectionManager::close(conn).await,
            None => Ok(()),
        }
    }
}
