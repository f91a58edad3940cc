use derive_more::From;
use orion_error::{ErrorCode, StructError, UvsReason};
use ua_units::UnitError;

#[derive(Debug, Clone, PartialEq, thiserror::Error, From)]
pub enum CoreReason {
    #[error("directive config error")]
    DirectiveConfig,
    #[error("directive execution error")]
    DirectiveExec,
    #[error("data format error")]
    DataFormat,
    #[error("{0}")]
    Uvs(UvsReason),
}

impl ErrorCode for CoreReason {
    fn error_code(&self) -> i32 {
        match self {
            Self::DirectiveConfig => 1001,
            Self::DirectiveExec => 1002,
            Self::DataFormat => 1003,
            Self::Uvs(u) => u.error_code(),
        }
    }
}

pub type CoreError = StructError<CoreReason>;
pub type CoreResult<T> = Result<T, CoreError>;

/// Failure of a single `execute` call. The whole call fails; no rows are
/// produced for it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExecError {
    /// A present cell could not be parsed. `row` is the 1-based offset of the
    /// row in the running count of rows seen by this directive instance.
    #[error("Invalid format in row {row}: column {column:?} value {raw:?}: {source}")]
    InvalidValue {
        row: u64,
        column: String,
        raw: String,
        #[source]
        source: UnitError,
    },
    #[error("directive already emitted its summary row; no further batches are accepted")]
    Finalized,
    #[error("running total overflowed at row {row}")]
    Overflow { row: u64 },
}

impl ExecError {
    /// Structured reason used when this failure crosses a crate boundary.
    pub fn reason(&self) -> CoreReason {
        match self {
            Self::InvalidValue { .. } => CoreReason::DataFormat,
            Self::Finalized | Self::Overflow { .. } => CoreReason::DirectiveExec,
        }
    }
}
