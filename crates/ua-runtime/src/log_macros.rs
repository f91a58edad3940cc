//! Domain-aware logging macros.
//!
//! Each macro injects a `domain` field so callers never spell the string
//! literal by hand. Domains in use: `pipe` (batch and partition flow) and
//! `conf` (configuration loading).
//!
//! # Usage
//!
//! ```ignore
//! ua_info!(pipe, partition = name, rows = 3, "partition finalized");
//! ua_error!(pipe, error = %e, "batch rejected");
//! ```
//!
//! The domain identifier is a bare identifier, not a string; the macro
//! converts it with `stringify!`. The macros are visible crate-wide through
//! `#[macro_use]` on the module declaration.

/// Internal helper. Do not call directly; use `ua_error!`, `ua_info!` or
/// `ua_debug!`.
#[doc(hidden)]
macro_rules! ua_log {
    ($level:ident, $domain:ident, $($field:tt)*) => {
        tracing::$level!(domain = stringify!($domain), $($field)*)
    };
}

/// Log at ERROR level with an automatic `domain` field.
macro_rules! ua_error {
    ($domain:ident, $($rest:tt)*) => {
        ua_log!(error, $domain, $($rest)*)
    };
}

/// Log at INFO level with an automatic `domain` field.
macro_rules! ua_info {
    ($domain:ident, $($rest:tt)*) => {
        ua_log!(info, $domain, $($rest)*)
    };
}

/// Log at DEBUG level with an automatic `domain` field.
macro_rules! ua_debug {
    ($domain:ident, $($rest:tt)*) => {
        ua_log!(debug, $domain, $($rest)*)
    };
}
