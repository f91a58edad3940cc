//! Parsers for unit-suffixed magnitudes: byte sizes (`"1.5GB"`) and
//! compound durations (`"1h30m"`, `"500ms"`).

pub mod byte_size;
pub mod duration;
pub mod error;
mod scan;

pub use byte_size::{ByteSize, ByteSizeUnit};
pub use duration::{Duration, DurationUnit};
pub use error::{UnitError, UnitResult};
