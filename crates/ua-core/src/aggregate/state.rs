use ua_config::AggregateConfig;
use ua_units::{ByteSize, Duration};

use crate::error::ExecError;
use crate::row::Row;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
const NANOS_PER_SEC: f64 = 1_000_000_000.0;

// ---------------------------------------------------------------------------
// PartitionTotals: running sums for one partition
// ---------------------------------------------------------------------------

/// Running sums over every row accepted so far in one partition.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartitionTotals {
    pub total_bytes: f64,
    pub total_nanos: i64,
    pub rows_seen: u64,
}

impl PartitionTotals {
    pub fn total_size_mb(&self) -> f64 {
        self.total_bytes / BYTES_PER_MB
    }

    pub fn total_time_sec(&self) -> f64 {
        self.total_nanos as f64 / NANOS_PER_SEC
    }

    /// Add one row's size and duration cells. Absent and null cells count as
    /// zero; a present cell that does not parse fails the row.
    pub(super) fn absorb(&mut self, row: &Row, config: &AggregateConfig) -> Result<(), ExecError> {
        let row_no = self.rows_seen + 1;

        if let Some(text) = cell_text(row, &config.size_column) {
            let size = ByteSize::parse(&text).map_err(|source| ExecError::InvalidValue {
                row: row_no,
                column: config.size_column.clone(),
                raw: text.clone(),
                source,
            })?;
            let total = self.total_bytes + size.as_bytes();
            if !total.is_finite() {
                return Err(ExecError::Overflow { row: row_no });
            }
            self.total_bytes = total;
        }

        if let Some(text) = cell_text(row, &config.time_column) {
            let duration = Duration::parse(&text).map_err(|source| ExecError::InvalidValue {
                row: row_no,
                column: config.time_column.clone(),
                raw: text.clone(),
                source,
            })?;
            self.total_nanos = self
                .total_nanos
                .checked_add(duration.as_nanos())
                .ok_or(ExecError::Overflow { row: row_no })?;
        }

        self.rows_seen = row_no;
        Ok(())
    }
}

fn cell_text(row: &Row, column: &str) -> Option<String> {
    row.get(column)
        .and_then(|v| v.as_text())
        .map(|t| t.into_owned())
}

// ---------------------------------------------------------------------------
// Phase: accumulating until the terminal batch, then finalized
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Phase {
    Accumulating(PartitionTotals),
    Finalized(PartitionTotals),
}
