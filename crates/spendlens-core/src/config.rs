//! Dashboard configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/spendlens/config.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/spendlens.toml");

/// Which rows the metric cards summarize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricsScope {
    /// The whole selected year/month
    #[default]
    Period,
    /// The year/month narrowed by amount, search, provider and category filters
    Filtered,
}

impl std::str::FromStr for MetricsScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "period" => Ok(Self::Period),
            "filtered" => Ok(Self::Filtered),
            _ => Err(format!(
                "Unknown metrics scope: {} (valid: period, filtered)",
                s
            )),
        }
    }
}

/// Labels used when the data lacks a value or when a category is special
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub investments: String,
    pub missing_category: String,
    pub missing_provider: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            investments: "Investments".to_string(),
            missing_category: "undefined".to_string(),
            missing_provider: "(none)".to_string(),
        }
    }
}

/// How the CLI prints metric values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub currency: String,
    /// Metric values are divided by this before printing
    pub scale: Decimal,
    pub scale_suffix: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: "COP".to_string(),
            scale: Decimal::from(1_000_000),
            scale_suffix: "M".to_string(),
        }
    }
}

/// Resolved dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub transactions_path: PathBuf,
    pub categories_path: PathBuf,
    pub labels: Labels,
    pub metrics_scope: MetricsScope,
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transactions_path: PathBuf::from("transactions_backup.csv"),
            categories_path: PathBuf::from("categories_backup.csv"),
            labels: Labels::default(),
            metrics_scope: MetricsScope::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Load from `path` if given, else the data-dir override, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(default_path) => {
                    debug!("Using config override at {}", default_path.display());
                    fs::read_to_string(&default_path)
                        .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
                }
                None => DEFAULT_CONFIG.to_string(),
            },
        };

        Self::parse(&content)
    }

    /// Parse TOML, layering it over the embedded defaults
    pub fn parse(content: &str) -> Result<Self> {
        let mut config = Config::default();
        apply(&mut config, DEFAULT_CONFIG)?;
        apply(&mut config, content)?;
        Ok(config)
    }
}

/// Get the default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("spendlens").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    data: Option<RawData>,
    labels: Option<RawLabels>,
    metrics: Option<RawMetrics>,
    display: Option<RawDisplay>,
}

#[derive(Debug, Deserialize)]
struct RawData {
    transactions: Option<PathBuf>,
    categories: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawLabels {
    investments: Option<String>,
    missing_category: Option<String>,
    missing_provider: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMetrics {
    scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency: Option<String>,
    scale: Option<u64>,
    scale_suffix: Option<String>,
}

fn apply(config: &mut Config, content: &str) -> Result<()> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    if let Some(data) = raw.data {
        if let Some(path) = data.transactions {
            config.transactions_path = path;
        }
        if let Some(path) = data.categories {
            config.categories_path = path;
        }
    }

    if let Some(labels) = raw.labels {
        if let Some(investments) = labels.investments {
            config.labels.investments = investments;
        }
        if let Some(missing) = labels.missing_category {
            config.labels.missing_category = missing;
        }
        if let Some(missing) = labels.missing_provider {
            config.labels.missing_provider = missing;
        }
    }

    if let Some(metrics) = raw.metrics {
        if let Some(scope) = metrics.scope {
            config.metrics_scope = scope.parse().map_err(Error::Config)?;
        }
    }

    if let Some(display) = raw.display {
        if let Some(currency) = display.currency {
            config.display.currency = currency;
        }
        if let Some(scale) = display.scale {
            if scale == 0 {
                return Err(Error::Config("display.scale must be positive".into()));
            }
            config.display.scale = Decimal::from(scale);
        }
        if let Some(suffix) = display.scale_suffix {
            config.display.scale_suffix = suffix;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_parse() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = Config::parse(
            r#"
            [labels]
            investments = "Inversiones"

            [metrics]
            scope = "filtered"
            "#,
        )
        .unwrap();

        assert_eq!(config.labels.investments, "Inversiones");
        assert_eq!(config.labels.missing_category, "undefined");
        assert_eq!(config.metrics_scope, MetricsScope::Filtered);
        assert_eq!(config.display.currency, "COP");
    }

    #[test]
    fn test_display_override() {
        let config = Config::parse(
            r#"
            [display]
            currency = "USD"
            scale = 1000
            scale_suffix = "K"
            "#,
        )
        .unwrap();

        assert_eq!(config.display.currency, "USD");
        assert_eq!(config.display.scale, Decimal::from(1000));
        assert_eq!(config.display.scale_suffix, "K");
    }

    #[test]
    fn test_zero_scale_rejected() {
        let err = Config::parse("[display]\nscale = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unknown_scope_rejected() {
        let err = Config::parse("[metrics]\nscope = \"weekly\"\n").unwrap_err();
        assert!(err.to_string().contains("Unknown metrics scope"));
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(Config::parse("[ollama]\nmodel = \"x\"\n").is_err());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[data]\ntransactions = \"/tmp/tx.csv\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.transactions_path, PathBuf::from("/tmp/tx.csv"));
        assert_eq!(
            config.categories_path,
            PathBuf::from("categories_backup.csv")
        );
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
