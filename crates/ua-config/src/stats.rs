use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::aggregate::AggregateConfig;
use crate::logging::LoggingConfig;
use crate::validate;

// ---------------------------------------------------------------------------
// Raw TOML structure (intermediate representation)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StatsConfigRaw {
    aggregate: AggregateConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// StatsConfig (resolved, validated)
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct StatsConfig {
    pub aggregate: AggregateConfig,
    pub logging: LoggingConfig,
}

impl StatsConfig {
    /// Read and parse a `ua-stats.toml` file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.as_ref().display()))?;
        content.parse()
    }
}

impl FromStr for StatsConfig {
    type Err = anyhow::Error;

    /// Parse a TOML string into a validated [`StatsConfig`].
    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let raw: StatsConfigRaw = toml::from_str(toml_str)?;
        let config = StatsConfig {
            aggregate: raw.aggregate,
            logging: raw.logging,
        };
        validate::validate(&config)?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogFormat;
    use std::io::Write;
    use std::path::PathBuf;

    const FULL_TOML: &str = r#"
[aggregate]
size_column = "size"
time_column = "time"
total_size_column = "mb"
total_time_column = "sec"

[logging]
level = "debug"
format = "json"
file = "logs/ua.log"

[logging.modules]
"ua_core::aggregate" = "trace"
"#;

    #[test]
    fn parse_full() {
        let cfg: StatsConfig = FULL_TOML.parse().unwrap();
        assert_eq!(cfg.aggregate.size_column, "size");
        assert_eq!(cfg.aggregate.time_column, "time");
        assert_eq!(cfg.aggregate.total_size_column, "mb");
        assert_eq!(cfg.aggregate.total_time_column, "sec");
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.logging.file, Some(PathBuf::from("logs/ua.log")));
        assert_eq!(cfg.logging.modules["ua_core::aggregate"], "trace");
        assert_eq!(
            cfg.logging.filter_directives(),
            "debug,ua_core::aggregate=trace"
        );
    }

    #[test]
    fn parse_minimal_uses_defaults() {
        let cfg: StatsConfig = r#"
[aggregate]
size_column = "size"
time_column = "time"
"#
        .parse()
        .unwrap();
        assert_eq!(cfg.aggregate.total_size_column, "total_size_mb");
        assert_eq!(cfg.aggregate.total_time_column, "total_time_sec");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, LogFormat::Plain);
        assert!(cfg.logging.file.is_none());
    }

    #[test]
    fn reject_missing_aggregate_section() {
        let err = "[logging]\nlevel = \"info\"\n"
            .parse::<StatsConfig>()
            .unwrap_err();
        assert!(err.to_string().contains("aggregate"), "{err}");
    }

    #[test]
    fn reject_unknown_section() {
        let toml = format!("{FULL_TOML}\n[server]\nlisten = \"x\"\n");
        assert!(toml.parse::<StatsConfig>().is_err());
    }

    #[test]
    fn reject_duplicate_output_columns() {
        let err = r#"
[aggregate]
size_column = "size"
time_column = "time"
total_size_column = "out"
total_time_column = "out"
"#
        .parse::<StatsConfig>()
        .unwrap_err();
        assert!(err.to_string().contains("must differ"), "{err}");
    }

    #[test]
    fn reject_bad_log_format() {
        let toml = r#"
[aggregate]
size_column = "size"
time_column = "time"

[logging]
format = "xml"
"#;
        assert!(toml.parse::<StatsConfig>().is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL_TOML.as_bytes()).unwrap();
        let cfg = StatsConfig::load(file.path()).unwrap();
        assert_eq!(cfg.aggregate.total_size_column, "mb");
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = StatsConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"), "{err}");
    }
}
