use crate::{
    abstract_trait::order::repository::{DynOrderConnectionFactory, OrderConnectionTrait},
    domain::{
        requests::{
            event::{HttpMethod, RequestEvent},
            order::{
                CreateOrderRecordRequest, CreateOrderRequest, UpdateOrderStatusRequest,
                decode_object,
            },
        },
        response::{
            event::ResponseEvent,
            order::{
                MessageResponse, ORDER_CREATED_MESSAGE, ORDER_UPDATED_MESSAGE,
                OrderCreatedResponse, OrderListResponse, OrderResponse,
            },
        },
    },
};
use opentelemetry::{
    Context, KeyValue, global,
    trace::{SpanKind, Status as SpanStatus, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use std::fmt;
use tokio::time::Instant;
use tracing::{error, info, warn};

type OrderConnection = dyn OrderConnectionTrait + Send;

/// Serves one request envelope per call: dispatches on the method, runs a
/// single statement on a per-invocation storage session and shapes the
/// response envelope.
#[derive(Clone)]
pub struct OrderRequestHandler {
    connections: DynOrderConnectionFactory,
    metrics: Metrics,
}

impl fmt::Debug for OrderRequestHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderRequestHandler")
            .field("connections", &"DynOrderConnectionFactory")
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl OrderRequestHandler {
    pub fn new(connections: DynOrderConnectionFactory, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "orders_function");

        Self {
            connections,
            metrics,
        }
    }

    /// `Err` is an unhandled fault; the host decides how to surface it.
    pub async fn handle(&self, event: RequestEvent) -> Result<ResponseEvent, ServiceError> {
        let method = event.method();
        let operation = operation_name(&method);

        let tracing_ctx = self.start_tracing(
            operation,
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", operation),
                KeyValue::new(
                    "http.method",
                    event.http_method.clone().unwrap_or_else(|| "GET".into()),
                ),
            ],
        );

        let result = match method {
            HttpMethod::Options => Ok(ResponseEvent::preflight()),
            _ => self.handle_with_connection(&method, &event).await,
        };

        match &result {
            Ok(response) => {
                let message = format!("{operation} responded {}", response.status_code);
                self.complete_tracing(
                    &tracing_ctx,
                    metric_method(&method),
                    response.status_code < 400,
                    &message,
                );
            }
            Err(err) => {
                self.complete_tracing(
                    &tracing_ctx,
                    metric_method(&method),
                    false,
                    &format!("{operation} failed: {err}"),
                );
            }
        }

        result
    }

    async fn handle_with_connection(
        &self,
        method: &HttpMethod,
        event: &RequestEvent,
    ) -> Result<ResponseEvent, ServiceError> {
        let mut conn = self.connections.connect().await?;

        let result = self.dispatch(method, event, conn.as_mut()).await;

        if let Err(e) = conn.close().await {
            warn!("⚠️ Failed to release storage connection: {e}");
        }

        result
    }

    async fn dispatch(
        &self,
        method: &HttpMethod,
        event: &RequestEvent,
        conn: &mut OrderConnection,
    ) -> Result<ResponseEvent, ServiceError> {
        match method {
            HttpMethod::Get => self.list_orders(conn).await,
            HttpMethod::Post => self.create_order(event, conn).await,
            HttpMethod::Put => self.update_order_status(event, conn).await,
            HttpMethod::Options => Ok(ResponseEvent::preflight()),
            HttpMethod::Other(name) => {
                info!("🚫 Rejecting unsupported method {name}");
                ResponseEvent::method_not_allowed()
            }
        }
    }

    async fn list_orders(&self, conn: &mut OrderConnection) -> Result<ResponseEvent, ServiceError> {
        info!("🔍 Listing all orders");

        let orders = conn.find_all().await?;

        let response = OrderListResponse {
            orders: orders.into_iter().map(OrderResponse::from).collect(),
        };

        info!("✅ Listed {} orders", response.orders.len());
        ResponseEvent::json(200, &response)
    }

    async fn create_order(
        &self,
        event: &RequestEvent,
        conn: &mut OrderConnection,
    ) -> Result<ResponseEvent, ServiceError> {
        let req: CreateOrderRequest = decode_object(event.body_or_empty()).map_err(|e| {
            error!("❌ Rejected create body: {e}");
            ServiceError::from(e)
        })?;

        info!("🏗️ Creating new order for uid={}", req.uid);

        let record = CreateOrderRecordRequest::from(req);
        let order_id = conn.create_order(&record).await?;

        ResponseEvent::json(
            201,
            &OrderCreatedResponse {
                id: order_id,
                message: ORDER_CREATED_MESSAGE.to_string(),
            },
        )
    }

    async fn update_order_status(
        &self,
        event: &RequestEvent,
        conn: &mut OrderConnection,
    ) -> Result<ResponseEvent, ServiceError> {
        let req: UpdateOrderStatusRequest = decode_object(event.body_or_empty()).map_err(|e| {
            error!("❌ Rejected update body: {e}");
            ServiceError::from(e)
        })?;

        info!(
            "✏️ Updating order ID={:?} to status={:?}",
            req.id, req.status
        );

        let affected = conn.update_order_status(&req).await?;

        if affected == 0 {
            warn!("⚠️ Status update for order ID={:?} matched no rows", req.id);
        } else {
            info!("🔄 Updated order ID={:?}", req.id);
        }

        ResponseEvent::json(
            200,
            &MessageResponse {
                message: ORDER_UPDATED_MESSAGE.to_string(),
            },
        )
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = global::tracer("orders-function");
        let span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    fn complete_tracing(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        let span = tracing_ctx.cx.span();
        span.add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed: {message}");
        } else {
            span.set_status(SpanStatus::error(message.to_string()));
            error!("❌ Operation failed: {message}");
        }

        self.metrics.record(method, status, elapsed);

        span.end();
    }
}

fn operation_name(method: &HttpMethod) -> &'static str {
    match method {
        HttpMethod::Options => "preflight",
        HttpMethod::Get => "list_orders",
        HttpMethod::Post => "create_order",
        HttpMethod::Put => "update_order_status",
        HttpMethod::Other(_) => "reject_method",
    }
}

fn metric_method(method: &HttpMethod) -> Method {
    match method {
        HttpMethod::Options => Method::Options,
        HttpMethod::Get => Method::Get,
        HttpMethod::Post => Method::Post,
        HttpMethod::Put => Method::Put,
        HttpMethod::Other(_) => Method::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::order::InMemoryOrderStore;
    use shared::utils::Labels;
    use std::sync::Arc;

    fn handler_with(store: &InMemoryOrderStore) -> OrderRequestHandler {
        let mut registry = Registry::default();
        OrderRequestHandler::new(Arc::new(store.clone()), &mut registry)
    }

    #[tokio::test]
    async fn every_invocation_records_one_observation() {
        let store = InMemoryOrderStore::new();
        let handler = handler_with(&store);

        handler.handle(RequestEvent::new("GET")).await.unwrap();
        handler.handle(RequestEvent::new("OPTIONS")).await.unwrap();
        handler.handle(RequestEvent::new("DELETE")).await.unwrap();
        let _ = handler.handle(RequestEvent::new("POST")).await;

        let count = |method: Method, status: StatusUtils| {
            handler
                .metrics
                .request_counter
                .get_or_create(&Labels { method, status })
                .get()
        };

        assert_eq!(count(Method::Get, StatusUtils::Success), 1);
        assert_eq!(count(Method::Options, StatusUtils::Success), 1);
        assert_eq!(count(Method::Other, StatusUtils::Error), 1);
        assert_eq!(count(Method::Post, StatusUtils::Error), 1);
    }

    #[test]
    fn operations_are_named_per_method() {
        assert_eq!(operation_name(&HttpMethod::Get), "list_orders");
        assert_eq!(operation_name(&HttpMethod::Put), "update_order_status");
        assert_eq!(
            operation_name(&HttpMethod::Other("PATCH".into())),
            "reject_method"
        );
    }
}
