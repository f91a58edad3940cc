use std::path::Path;

use orion_error::prelude::*;
use orion_error::StructError;
use orion_error::ErrorOwe;
use ua_config::{AggregateConfig, StatsConfig};
use ua_core::{AggregateStats, Directive, ExecutorContext, Row};

use crate::error::{RuntimeReason, RuntimeResult};

/// Drives `aggregate-stats` over whole partitions.
///
/// Every partition gets its own freshly built [`AggregateStats`], so no
/// totals leak from one partition into the next. All batches of a partition
/// are fed as non-terminal calls, followed by a single empty terminal call
/// whose output is the partition's summary row.
#[derive(Debug, Clone)]
pub struct PartitionDriver {
    config: AggregateConfig,
}

impl PartitionDriver {
    pub fn new(config: AggregateConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: &StatsConfig) -> Self {
        Self::new(config.aggregate.clone())
    }

    /// Load a `StatsConfig` TOML file and build a driver from its
    /// `[aggregate]` section.
    pub fn load(path: &Path) -> RuntimeResult<Self> {
        let config = StatsConfig::load(path).map_err(|e| {
            StructError::from(RuntimeReason::Setup).with_detail(format!("{e:#}"))
        })?;
        ua_info!(
            conf,
            path = %path.display(),
            size_column = %config.aggregate.size_column,
            time_column = %config.aggregate.time_column,
            "aggregate config loaded"
        );
        Ok(Self::from_config(&config))
    }

    pub fn config(&self) -> &AggregateConfig {
        &self.config
    }

    /// Run one partition and return its summary row.
    #[tracing::instrument(name = "partition.run", skip_all, fields(partition = %name))]
    pub fn run<I>(&self, name: &str, batches: I) -> RuntimeResult<Row>
    where
        I: IntoIterator<Item = Vec<Row>>,
    {
        let mut directive = AggregateStats::new(self.config.clone()).owe_conf()?;

        for (idx, batch) in batches.into_iter().enumerate() {
            let rows = batch.len();
            if let Err(e) = directive.execute(batch, &ExecutorContext::non_terminal()) {
                ua_error!(pipe, batch = idx, rows, error = %e, "batch rejected, stopping partition");
                return StructError::from(RuntimeReason::Core(e.reason()))
                    .with_detail(e.to_string())
                    .err();
            }
            ua_debug!(pipe, batch = idx, rows, "batch accumulated");
        }

        let mut out = match directive.execute(Vec::new(), &ExecutorContext::terminal()) {
            Ok(out) => out,
            Err(e) => {
                return StructError::from(RuntimeReason::Core(e.reason()))
                    .with_detail(e.to_string())
                    .err();
            }
        };
        let Some(summary) = out.pop() else {
            return StructError::from(RuntimeReason::Partition)
                .with_detail(format!("{} emitted no summary row", AggregateStats::NAME))
                .err();
        };

        let totals = directive.totals();
        ua_info!(
            pipe,
            rows = totals.rows_seen,
            total_size_mb = totals.total_size_mb(),
            total_time_sec = totals.total_time_sec(),
            "partition finalized"
        );
        Ok(summary)
    }

    /// Run several independent partitions in order, each with its own
    /// directive instance. Stops at the first failing partition.
    pub fn run_partitions<I, B>(&self, partitions: I) -> RuntimeResult<Vec<(String, Row)>>
    where
        I: IntoIterator<Item = (String, B)>,
        B: IntoIterator<Item = Vec<Row>>,
    {
        let mut summaries = Vec::new();
        for (name, batches) in partitions {
            let summary = self.run(&name, batches)?;
            summaries.push((name, summary));
        }
        ua_info!(pipe, partitions = summaries.len(), "all partitions finalized");
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ua_core::Value;

    fn batch(pairs: &[(&str, &str)]) -> Vec<Row> {
        pairs
            .iter()
            .map(|&(s, t)| Row::new().with("size", s).with("time", t))
            .collect()
    }

    fn driver() -> PartitionDriver {
        PartitionDriver::new(AggregateConfig::new("size", "time"))
    }

    #[test]
    fn run_sums_every_batch() {
        let summary = driver()
            .run(
                "p0",
                vec![
                    batch(&[("10MB", "1.5s")]),
                    batch(&[("20MB", "2s"), ("30MB", "500ms")]),
                ],
            )
            .unwrap();
        assert_eq!(summary.get("total_size_mb"), Some(&Value::Number(60.0)));
        assert_eq!(summary.get("total_time_sec"), Some(&Value::Number(4.0)));
    }

    #[test]
    fn run_with_no_batches() {
        let summary = driver().run("empty", Vec::<Vec<Row>>::new()).unwrap();
        assert_eq!(summary.get("total_size_mb"), Some(&Value::Number(0.0)));
    }

    #[test]
    fn run_fails_on_bad_value() {
        let result = driver().run("bad", vec![batch(&[("1MB", "1s")]), batch(&[("x", "1s")])]);
        assert!(result.is_err());
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(PartitionDriver::load(Path::new("/nonexistent/ua-stats.toml")).is_err());
    }

    #[test]
    fn run_fails_on_bad_config() {
        let cfg = AggregateConfig::new("size", "time").with_outputs("same", "same");
        assert!(PartitionDriver::new(cfg).run("p", vec![batch(&[])]).is_err());
    }
}
