use crate::{
    abstract_trait::order::repository::{
        DynOrderConnection, OrderConnectionFactoryTrait, OrderConnectionTrait,
    },
    domain::requests::order::{CreateOrderRecordRequest, UpdateOrderStatusRequest},
    model::order::Order as OrderModel,
};
use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};
use shared::errors::RepositoryError;
use std::{
    cmp::Ordering,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering as AtomicOrdering},
    },
};
use tokio::sync::RwLock;

const DEFAULT_OFFSET_SECS: i64 = 3 * 3600;

struct InMemoryState {
    orders: RwLock<Vec<OrderModel>>,
    next_id: AtomicI32,
    opened: AtomicUsize,
    closed: AtomicUsize,
    statements: AtomicUsize,
    unavailable: AtomicBool,
    failing_statements: AtomicBool,
    update_offset: Duration,
}

/// Storage double for the `orders` table. Tracks how many sessions were
/// opened and released so callers can assert on connection scope.
#[derive(Clone)]
pub struct InMemoryOrderStore {
    inner: Arc<InMemoryState>,
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::with_update_offset_secs(DEFAULT_OFFSET_SECS)
    }

    /// `updated_at` is written as UTC shifted by this many seconds, the
    /// in-memory stand-in for `NOW() AT TIME ZONE`.
    pub fn with_update_offset_secs(offset_secs: i64) -> Self {
        Self {
            inner: Arc::new(InMemoryState {
                orders: RwLock::new(Vec::new()),
                next_id: AtomicI32::new(1),
                opened: AtomicUsize::new(0),
                closed: AtomicUsize::new(0),
                statements: AtomicUsize::new(0),
                unavailable: AtomicBool::new(false),
                failing_statements: AtomicBool::new(false),
                update_offset: Duration::seconds(offset_secs),
            }),
        }
    }

    /// Makes `connect` fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.unavailable.store(unavailable, AtomicOrdering::SeqCst);
    }

    /// Makes every statement on an open session fail.
    pub fn set_failing_statements(&self, failing: bool) {
        self.inner
            .failing_statements
            .store(failing, AtomicOrdering::SeqCst);
    }

    pub fn opened_connections(&self) -> usize {
        self.inner.opened.load(AtomicOrdering::SeqCst)
    }

    pub fn closed_connections(&self) -> usize {
        self.inner.closed.load(AtomicOrdering::SeqCst)
    }

    pub fn statements_executed(&self) -> usize {
        self.inner.statements.load(AtomicOrdering::SeqCst)
    }

    /// Rows in insertion order.
    pub async fn orders(&self) -> Vec<OrderModel> {
        self.inner.orders.read().await.clone()
    }

    pub async fn find(&self, id: i32) -> Option<OrderModel> {
        self.inner
            .orders
            .read()
            .await
            .iter()
            .find(|o| o.id == id)
            .cloned()
    }

    /// Seeds a row verbatim, bypassing the generated id and timestamps.
    pub async fn insert_raw(&self, order: OrderModel) {
        self.inner
            .next_id
            .fetch_max(order.id.saturating_add(1), AtomicOrdering::SeqCst);
        self.inner.orders.write().await.push(order);
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

#[async_trait]
impl OrderConnectionFactoryTrait for InMemoryOrderStore {
    async fn connect(&self) -> Result<DynOrderConnection, RepositoryError> {
        if self.inner.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(RepositoryError::Custom("storage unavailable".into()));
        }

        self.inner.opened.fetch_add(1, AtomicOrdering::SeqCst);

        Ok(Box::new(InMemoryOrderConnection {
            store: self.clone(),
            released: false,
        }))
    }
}

pub struct InMemoryOrderConnection {
    store: InMemoryOrderStore,
    released: bool,
}

impl InMemoryOrderConnection {
    fn begin_statement(&self) -> Result<(), RepositoryError> {
        if self.released {
            return Err(RepositoryError::ConnectionClosed);
        }
        if self
            .store
            .inner
            .failing_statements
            .load(AtomicOrdering::SeqCst)
        {
            return Err(RepositoryError::Custom("statement failed".into()));
        }

        self.store
            .inner
            .statements
            .fetch_add(1, AtomicOrdering::SeqCst);
        Ok(())
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.store.inner.closed.fetch_add(1, AtomicOrdering::SeqCst);
        }
    }
}

impl Drop for InMemoryOrderConnection {
    fn drop(&mut self) {
        self.release();
    }
}

/// `ORDER BY created_at DESC` with PostgreSQL's default `NULLS FIRST`; ties
/// fall back to the newest id.
fn newest_first(a: &OrderModel, b: &OrderModel) -> Ordering {
    match (&a.created_at, &b.created_at) {
        (None, None) => b.id.cmp(&a.id),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => y.cmp(x).then_with(|| b.id.cmp(&a.id)),
    }
}

#[async_trait]
impl OrderConnectionTrait for InMemoryOrderConnection {
    async fn find_all(&mut self) -> Result<Vec<OrderModel>, RepositoryError> {
        self.begin_statement()?;

        let mut orders = self.store.inner.orders.read().await.clone();
        orders.sort_by(newest_first);
        Ok(orders)
    }

    async fn create_order(
        &mut self,
        req: &CreateOrderRecordRequest,
    ) -> Result<i32, RepositoryError> {
        self.begin_statement()?;

        let id = self.store.inner.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let now = InMemoryOrderStore::now();

        self.store.inner.orders.write().await.push(OrderModel {
            id,
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            phone: req.phone.clone(),
            telegram: req.telegram.clone(),
            uid: req.uid.clone(),
            status: req.status.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        });

        Ok(id)
    }

    async fn update_order_status(
        &mut self,
        req: &UpdateOrderStatusRequest,
    ) -> Result<u64, RepositoryError> {
        self.begin_statement()?;

        let Some(id) = req.id else {
            return Ok(0);
        };

        let mut orders = self.store.inner.orders.write().await;
        let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
            return Ok(0);
        };

        let Some(status) = req.status.clone() else {
            return Err(RepositoryError::Custom(
                "null value in column \"status\" violates not-null constraint".into(),
            ));
        };

        order.status = status;
        order.updated_at = Some(InMemoryOrderStore::now() + self.store.inner.update_offset);
        Ok(1)
    }

    async fn close(&mut self) -> Result<(), RepositoryError> {
        self.release();
        Ok(())
    }
}
