pub mod aggregate;
pub mod bridge;
pub mod directive;
pub mod error;
pub mod row;

pub use aggregate::{AggregateStats, PartitionTotals};
pub use directive::{ArgDef, ArgKind, Directive, ExecutorContext, UsageDefinition};
pub use error::{CoreError, CoreReason, CoreResult, ExecError};
pub use row::{Row, Value};
