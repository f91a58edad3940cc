use crate::aggregate::AggregateConfig;
use crate::stats::StatsConfig;

/// Validate a fully-parsed [`StatsConfig`].
pub fn validate(config: &StatsConfig) -> anyhow::Result<()> {
    validate_aggregate(&config.aggregate)?;
    if config.logging.level.trim().is_empty() {
        anyhow::bail!("logging.level must not be empty");
    }
    Ok(())
}

/// Column names must be non-blank and the two output columns must differ,
/// otherwise the summary row would lose one of its values.
pub fn validate_aggregate(config: &AggregateConfig) -> anyhow::Result<()> {
    let columns = [
        ("size_column", &config.size_column),
        ("time_column", &config.time_column),
        ("total_size_column", &config.total_size_column),
        ("total_time_column", &config.total_time_column),
    ];
    for (key, name) in columns {
        if name.trim().is_empty() {
            anyhow::bail!("aggregate.{key} must not be empty");
        }
    }
    if config.total_size_column == config.total_time_column {
        anyhow::bail!(
            "aggregate.total_size_column and aggregate.total_time_column must differ (both {:?})",
            config.total_size_column
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_distinct_names() {
        let cfg = AggregateConfig::new("size", "time");
        assert!(validate_aggregate(&cfg).is_ok());
    }

    #[test]
    fn input_columns_may_coincide() {
        let cfg = AggregateConfig::new("v", "v");
        assert!(validate_aggregate(&cfg).is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let cfg = AggregateConfig::new("size", "  ");
        let err = validate_aggregate(&cfg).unwrap_err();
        assert!(err.to_string().contains("time_column"), "{err}");
    }

    #[test]
    fn rejects_same_outputs() {
        let cfg = AggregateConfig::new("size", "time").with_outputs("total", "total");
        let err = validate_aggregate(&cfg).unwrap_err();
        assert!(err.to_string().contains("must differ"), "{err}");
    }
}
