//! Shared session loading
//!
//! Every command works on the same immutable session: the resolved config
//! plus the joined dataset.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use spendlens_core::{Config, Dataset};
use tracing::{debug, info};

pub struct Session {
    pub config: Config,
    pub dataset: Dataset,
}

/// Resolve config, apply path overrides and load both tables
pub fn load_session(
    config_path: Option<&Path>,
    transactions: Option<&Path>,
    categories: Option<&Path>,
) -> Result<Session> {
    let mut config = Config::load(config_path).context("Failed to load config")?;
    if let Some(path) = transactions {
        config.transactions_path = path.to_path_buf();
    }
    if let Some(path) = categories {
        config.categories_path = path.to_path_buf();
    }
    debug!(
        transactions = %config.transactions_path.display(),
        categories = %config.categories_path.display(),
        "Resolved data paths"
    );

    let dataset = Dataset::load(&config).with_context(|| {
        format!(
            "Failed to load {} / {}",
            config.transactions_path.display(),
            config.categories_path.display()
        )
    })?;

    let missing = dataset.missing_category_count();
    if missing > 0 {
        info!(
            "{} transactions have no known category, shown as \"{}\"",
            missing, dataset.labels().missing_category
        );
    }

    Ok(Session { config, dataset })
}

impl Session {
    /// Format an amount in display units, e.g. "1.23 M COP"
    pub fn money(&self, amount: Decimal) -> String {
        let display = &self.config.display;
        let scaled = amount.checked_div(display.scale).unwrap_or(amount);
        if display.scale_suffix.is_empty() {
            format!("{:.2} {}", scaled, display.currency)
        } else {
            format!("{:.2} {} {}", scaled, display.scale_suffix, display.currency)
        }
    }
}
