pub mod aggregate;
pub mod logging;
pub mod stats;
pub mod validate;

pub use aggregate::AggregateConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use stats::StatsConfig;
