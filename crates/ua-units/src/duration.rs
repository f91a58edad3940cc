use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use winnow::ascii::Caseless;
use winnow::combinator::alt;
use winnow::prelude::*;
use winnow::token::literal;

use crate::error::{UnitError, UnitResult};
use crate::scan;

const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SEC: f64 = 1_000_000_000.0;

// ---------------------------------------------------------------------------
// DurationUnit
// ---------------------------------------------------------------------------

/// Time units accepted after each number of a duration term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Millis,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    pub fn millis(&self) -> i64 {
        match self {
            Self::Millis => 1,
            Self::Seconds => 1_000,
            Self::Minutes => 60_000,
            Self::Hours => 3_600_000,
            Self::Days => 86_400_000,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Millis => "ms",
            Self::Seconds => "s",
            Self::Minutes => "m",
            Self::Hours => "h",
            Self::Days => "d",
        }
    }
}

/// One unit token. `ms` must be tried before `m`, otherwise `1ms` reads as
/// one minute followed by a dangling `s`.
fn unit_token(input: &mut &str) -> ModalResult<DurationUnit> {
    alt((
        literal(Caseless("ms")).value(DurationUnit::Millis),
        literal(Caseless("s")).value(DurationUnit::Seconds),
        literal(Caseless("m")).value(DurationUnit::Minutes),
        literal(Caseless("h")).value(DurationUnit::Hours),
        literal(Caseless("d")).value(DurationUnit::Days),
    ))
    .parse_next(input)
}

/// Nanoseconds for `number` units, rounded to the nearest nanosecond.
fn term_nanos(number: f64, unit: DurationUnit, text: &str) -> UnitResult<i64> {
    let nanos = (number * (unit.millis() * NANOS_PER_MILLI) as f64).round();
    if nanos >= i64::MAX as f64 {
        return Err(UnitError::OutOfRange(text.to_string()));
    }
    Ok(nanos as i64)
}

// ---------------------------------------------------------------------------
// Duration
// ---------------------------------------------------------------------------

/// A time span parsed from text like `"1.5s"`, `"500ms"` or `"1h1m1s"`,
/// held at nanosecond precision.
///
/// Displays as the exact text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Duration {
    nanos: i64,
    original: String,
}

impl Duration {
    /// Parse one or more `<number><unit>` terms written back to back, with
    /// unit one of `ms`, `s`, `m`, `h`, `d` (case-insensitive). Terms are
    /// summed; fractional numbers are allowed in every term.
    pub fn parse(text: &str) -> UnitResult<Self> {
        let mut input = scan::prepare(text)?;
        let mut nanos: i64 = 0;

        while !input.is_empty() {
            let number = scan::number(&mut input, text)?;
            let unit = unit_token(&mut input).map_err(|_| UnitError::InvalidUnit {
                unit: input.chars().next().map(String::from).unwrap_or_default(),
                text: text.to_string(),
            })?;
            nanos = nanos
                .checked_add(term_nanos(number, unit, text)?)
                .ok_or_else(|| UnitError::OutOfRange(text.to_string()))?;
        }

        Ok(Self {
            nanos,
            original: text.to_string(),
        })
    }

    pub fn as_nanos(&self) -> i64 {
        self.nanos
    }

    /// Whole milliseconds, truncated.
    pub fn as_millis(&self) -> i64 {
        self.nanos / NANOS_PER_MILLI
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.nanos as f64 / NANOS_PER_SEC
    }

    pub fn as_std(&self) -> std::time::Duration {
        std::time::Duration::from_nanos(self.nanos.unsigned_abs())
    }

    /// The text this value was parsed from, untouched.
    pub fn original(&self) -> &str {
        &self.original
    }
}

impl FromStr for Duration {
    type Err = UnitError;

    fn from_str(s: &str) -> UnitResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
