use serde::Deserialize;

pub const DEFAULT_TOTAL_SIZE_COLUMN: &str = "total_size_mb";
pub const DEFAULT_TOTAL_TIME_COLUMN: &str = "total_time_sec";

/// Column wiring for the `aggregate-stats` directive: two input columns
/// holding unit-suffixed text and two output columns for the summary row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregateConfig {
    /// Column holding byte sizes such as `"10MB"`.
    pub size_column: String,
    /// Column holding durations such as `"1h30m"`.
    pub time_column: String,
    #[serde(default = "default_total_size_column")]
    pub total_size_column: String,
    #[serde(default = "default_total_time_column")]
    pub total_time_column: String,
}

fn default_total_size_column() -> String {
    DEFAULT_TOTAL_SIZE_COLUMN.to_string()
}

fn default_total_time_column() -> String {
    DEFAULT_TOTAL_TIME_COLUMN.to_string()
}

impl AggregateConfig {
    /// Input columns with the default output column names.
    pub fn new(size_column: impl Into<String>, time_column: impl Into<String>) -> Self {
        Self {
            size_column: size_column.into(),
            time_column: time_column.into(),
            total_size_column: default_total_size_column(),
            total_time_column: default_total_time_column(),
        }
    }

    pub fn with_outputs(
        mut self,
        total_size_column: impl Into<String>,
        total_time_column: impl Into<String>,
    ) -> Self {
        self.total_size_column = total_size_column.into();
        self.total_time_column = total_time_column.into();
        self
    }

    /// Build from positional directive arguments:
    /// `<size_column> <time_column> <total_size_column> <total_time_column>`.
    pub fn from_args(args: &[&str]) -> anyhow::Result<Self> {
        let [size, time, total_size, total_time] = args else {
            anyhow::bail!(
                "aggregate-stats expects 4 column arguments, got {}",
                args.len()
            );
        };
        let config = Self::new(*size, *time).with_outputs(*total_size, *total_time);
        crate::validate::validate_aggregate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_outputs() {
        let cfg = AggregateConfig::new("size", "time");
        assert_eq!(cfg.total_size_column, "total_size_mb");
        assert_eq!(cfg.total_time_column, "total_time_sec");
    }

    #[test]
    fn from_args_positional() {
        let cfg = AggregateConfig::from_args(&["bytes", "elapsed", "mb", "sec"]).unwrap();
        assert_eq!(cfg.size_column, "bytes");
        assert_eq!(cfg.time_column, "elapsed");
        assert_eq!(cfg.total_size_column, "mb");
        assert_eq!(cfg.total_time_column, "sec");
    }

    #[test]
    fn from_args_wrong_arity() {
        let err = AggregateConfig::from_args(&["size", "time"]).unwrap_err();
        assert!(err.to_string().contains("got 2"), "{err}");
    }

    #[test]
    fn from_args_runs_validation() {
        assert!(AggregateConfig::from_args(&["size", "time", "out", "out"]).is_err());
        assert!(AggregateConfig::from_args(&["", "time", "a", "b"]).is_err());
    }
}
