mod gracefullshutdown;
mod logs;
mod metrics;
mod otel;
mod parse_datetime;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::metrics::{Labels, Method, Metrics, Status};
pub use self::otel::{Telemetry, TracingContext};
pub use self::parse_datetime::format_iso_datetime;
