mod state;


use orion_error::prelude::*;
use orion_error::StructError;
use ua_config::AggregateConfig;

use crate::directive::{ArgKind, Directive, ExecutorContext, UsageDefinition};
use crate::error::{CoreReason, CoreResult, ExecError};
use crate::row::Row;

pub use state::PartitionTotals;
use state::Phase;

/// Sums byte sizes and durations over every batch of a partition and emits a
/// single summary row on the terminal call.
///
/// Non-terminal calls pass their rows through unchanged. A batch with any
/// unparseable cell fails as a whole and leaves the totals exactly as they
/// were before that batch. The terminal call ignores the rows it is given,
/// returns one row holding `total_size_column` (MiB) and `total_time_column`
/// (seconds), and moves the instance to its finalized state; every later
/// call fails with [`ExecError::Finalized`].
///
/// An instance belongs to exactly one partition, so it cannot be cloned;
/// build a new one with [`AggregateStats::new`] for the next partition.
///
/// ```compile_fail
/// fn requires_clone<T: Clone>() {}
/// requires_clone::<ua_core::AggregateStats>();
/// ```
#[derive(Debug)]
pub struct AggregateStats {
    config: AggregateConfig,
    phase: Phase,
}

impl AggregateStats {
    pub const NAME: &'static str = "aggregate-stats";

    /// Fresh instance with zero totals. The config is validated here so a
    /// bad column wiring surfaces before any batch arrives.
    pub fn new(config: AggregateConfig) -> CoreResult<Self> {
        if let Err(e) = ua_config::validate::validate_aggregate(&config) {
            return StructError::from(CoreReason::DirectiveConfig)
                .with_detail(e.to_string())
                .err();
        }
        Ok(Self {
            config,
            phase: Phase::Accumulating(PartitionTotals::default()),
        })
    }

    pub fn config(&self) -> &AggregateConfig {
        &self.config
    }

    pub fn totals(&self) -> PartitionTotals {
        match &self.phase {
            Phase::Accumulating(t) | Phase::Finalized(t) => *t,
        }
    }

    pub fn rows_seen(&self) -> u64 {
        self.totals().rows_seen
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.phase, Phase::Finalized(_))
    }

    fn accumulate(&mut self, rows: Vec<Row>) -> Result<Vec<Row>, ExecError> {
        let Phase::Accumulating(totals) = &mut self.phase else {
            return Err(ExecError::Finalized);
        };

        // Work on a copy so a failing row leaves the committed totals intact.
        let mut staged = *totals;
        for row in &rows {
            if let Err(e) = staged.absorb(row, &self.config) {
                log::warn!("{} rejected batch of {} rows: {e}", Self::NAME, rows.len());
                return Err(e);
            }
        }
        *totals = staged;

        log::debug!(
            "{} accumulated {} rows (rows_seen={}, total_bytes={}, total_nanos={})",
            Self::NAME,
            rows.len(),
            staged.rows_seen,
            staged.total_bytes,
            staged.total_nanos
        );
        Ok(rows)
    }

    fn finalize(&mut self) -> Result<Vec<Row>, ExecError> {
        let Phase::Accumulating(totals) = self.phase else {
            return Err(ExecError::Finalized);
        };
        self.phase = Phase::Finalized(totals);

        let size_mb = totals.total_size_mb();
        let time_sec = totals.total_time_sec();
        log::info!(
            "{} finalized: rows_seen={} {}={size_mb} {}={time_sec}",
            Self::NAME,
            totals.rows_seen,
            self.config.total_size_column,
            self.config.total_time_column
        );

        let summary = Row::new()
            .with(self.config.total_size_column.as_str(), size_mb)
            .with(self.config.total_time_column.as_str(), time_sec);
        Ok(vec![summary])
    }
}

impl Directive for AggregateStats {
    fn define(&self) -> UsageDefinition {
        UsageDefinition::builder(Self::NAME)
            .define("size_column", ArgKind::Column)
            .define("time_column", ArgKind::Column)
            .define("total_size_column", ArgKind::OutputColumn)
            .define("total_time_column", ArgKind::OutputColumn)
            .build()
    }

    fn execute(&mut self, rows: Vec<Row>, ctx: &ExecutorContext) -> Result<Vec<Row>, ExecError> {
        if ctx.is_last() {
            if !rows.is_empty() {
                log::debug!(
                    "{} dropping {} rows from the terminal batch",
                    Self::NAME,
                    rows.len()
                );
            }
            self.finalize()
        } else {
            self.accumulate(rows)
        }
    }
}
