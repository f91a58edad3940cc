use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use winnow::ascii::Caseless;
use winnow::combinator::{alt, eof, terminated};
use winnow::prelude::*;
use winnow::token::literal;

use crate::error::{UnitError, UnitResult};
use crate::scan;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

// ---------------------------------------------------------------------------
// ByteSizeUnit
// ---------------------------------------------------------------------------

/// Binary (1024-based) size units accepted after the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteSizeUnit {
    Kilo,
    Mega,
    Giga,
    Tera,
}

impl ByteSizeUnit {
    /// Bytes per one unit: `1024^1` … `1024^4`.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Kilo => 1024.0,
            Self::Mega => 1024.0 * 1024.0,
            Self::Giga => 1024.0 * 1024.0 * 1024.0,
            Self::Tera => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Kilo => "KB",
            Self::Mega => "MB",
            Self::Giga => "GB",
            Self::Tera => "TB",
        }
    }
}

/// The whole remaining suffix must be exactly one unit token.
fn unit_suffix(input: &mut &str) -> ModalResult<ByteSizeUnit> {
    terminated(
        alt((
            literal(Caseless("KB")).value(ByteSizeUnit::Kilo),
            literal(Caseless("MB")).value(ByteSizeUnit::Mega),
            literal(Caseless("GB")).value(ByteSizeUnit::Giga),
            literal(Caseless("TB")).value(ByteSizeUnit::Tera),
        )),
        eof,
    )
    .parse_next(input)
}

// ---------------------------------------------------------------------------
// ByteSize
// ---------------------------------------------------------------------------

/// A data size parsed from text like `"10MB"` or `"1.5tb"`.
///
/// Displays as the exact text it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct ByteSize {
    bytes: f64,
    original: String,
}

impl ByteSize {
    /// Parse `<number><unit>` with unit one of `KB`, `MB`, `GB`, `TB`
    /// (case-insensitive). Surrounding whitespace is ignored; whitespace
    /// between the number and the unit is not.
    pub fn parse(text: &str) -> UnitResult<Self> {
        let trimmed = scan::prepare(text)?;
        let mut input = trimmed;
        let number = scan::number(&mut input, text)?;
        let suffix = input;
        let unit = unit_suffix(&mut input).map_err(|_| UnitError::InvalidUnit {
            unit: suffix.to_uppercase(),
            text: text.to_string(),
        })?;
        let bytes = number * unit.multiplier();
        if !bytes.is_finite() {
            return Err(UnitError::OutOfRange(text.to_string()));
        }
        Ok(Self {
            bytes,
            original: text.to_string(),
        })
    }

    pub fn as_bytes(&self) -> f64 {
        self.bytes
    }

    pub fn as_megabytes(&self) -> f64 {
        self.bytes / BYTES_PER_MB
    }

    /// The text this value was parsed from, untouched.
    pub fn original(&self) -> &str {
        &self.original
    }
}

impl FromStr for ByteSize {
    type Err = UnitError;

    fn from_str(s: &str) -> UnitResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Serialize for ByteSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for ByteSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
