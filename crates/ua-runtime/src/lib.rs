#[macro_use]
mod log_macros;

pub mod driver;
pub mod error;
pub mod tracing_init;

pub use driver::PartitionDriver;
pub use error::{RuntimeError, RuntimeReason, RuntimeResult};
