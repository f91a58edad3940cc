/// Why a magnitude string was rejected. Every variant is a user-input
/// error; the offending text is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    #[error("value cannot be null or empty")]
    EmptyInput,
    #[error("negative values are not allowed: {0:?}")]
    NegativeNotAllowed(String),
    #[error("invalid format: {0:?}")]
    InvalidFormat(String),
    #[error("invalid number format: {0:?}")]
    InvalidNumber(String),
    #[error("invalid unit {unit:?} in {text:?}")]
    InvalidUnit { unit: String, text: String },
    #[error("value out of range: {0:?}")]
    OutOfRange(String),
}

impl UnitError {
    /// Stable short name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::NegativeNotAllowed(_) => "negative_not_allowed",
            Self::InvalidFormat(_) => "invalid_format",
            Self::InvalidNumber(_) => "invalid_number",
            Self::InvalidUnit { .. } => "invalid_unit",
            Self::OutOfRange(_) => "out_of_range",
        }
    }
}

pub type UnitResult<T> = Result<T, UnitError>;
