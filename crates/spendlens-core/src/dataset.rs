//! Session-scoped, immutable view of the two source tables
//!
//! A `Dataset` is built once per session. The category join and the derived
//! year/month fields are computed at construction; every query afterwards
//! borrows the enriched rows and never mutates them.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use tracing::debug;

use crate::config::{Config, Labels};
use crate::error::{Error, Result};
use crate::import::{load_categories, load_transactions};
use crate::models::{
    AmountRange, Category, CategoryOption, EnrichedTransaction, FilterOptions, Period,
    Transaction,
};

#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<EnrichedTransaction>,
    categories: Vec<Category>,
    labels: Labels,
}

impl Dataset {
    /// Join transactions with their category names
    ///
    /// A category id without a matching category (or no id at all) gets the
    /// `labels.missing_category` name; the row is kept.
    pub fn new(transactions: Vec<Transaction>, categories: Vec<Category>, labels: Labels) -> Self {
        let names: HashMap<&str, &str> = categories
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str()))
            .collect();

        let mut missing = 0usize;
        let rows: Vec<EnrichedTransaction> = transactions
            .iter()
            .map(|tx| {
                let name = tx
                    .category_id
                    .as_deref()
                    .and_then(|id| names.get(id).copied());
                if name.is_none() {
                    missing += 1;
                    debug!(
                        category_id = tx.category_id.as_deref().unwrap_or(""),
                        date = %tx.date,
                        "No category for transaction, using placeholder"
                    );
                }
                EnrichedTransaction::new(tx, name, &labels.missing_category)
            })
            .collect();

        debug!(
            "Dataset ready: {} transactions, {} categories, {} without category",
            rows.len(),
            categories.len(),
            missing
        );

        Self {
            rows,
            categories,
            labels,
        }
    }

    /// Load both tables from disk
    pub fn from_paths(transactions: &Path, categories: &Path, labels: Labels) -> Result<Self> {
        let txs = load_transactions(transactions)?;
        let cats = load_categories(categories)?;
        Ok(Self::new(txs, cats, labels))
    }

    /// Load both tables from the paths and labels in `config`
    pub fn load(config: &Config) -> Result<Self> {
        Self::from_paths(
            &config.transactions_path,
            &config.categories_path,
            config.labels.clone(),
        )
    }

    pub fn rows(&self) -> &[EnrichedTransaction] {
        &self.rows
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows carrying the missing-category placeholder
    pub fn missing_category_count(&self) -> usize {
        self.rows.iter().filter(|r| r.category_missing).count()
    }

    /// Distinct years, ascending
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.rows.iter().map(|r| r.year).collect();
        years.into_iter().collect()
    }

    /// Distinct months present in `year`, ascending
    pub fn months(&self, year: i32) -> Vec<u32> {
        let months: BTreeSet<u32> = self
            .rows
            .iter()
            .filter(|r| r.year == year)
            .map(|r| r.month)
            .collect();
        months.into_iter().collect()
    }

    /// Distinct (year, month) pairs, ascending
    pub fn periods(&self) -> Vec<Period> {
        let periods: BTreeSet<Period> = self
            .rows
            .iter()
            .map(|r| Period::new(r.year, r.month))
            .collect();
        periods.into_iter().collect()
    }

    pub fn has_period(&self, period: Period) -> bool {
        self.rows
            .iter()
            .any(|r| r.year == period.year && r.month == period.month)
    }

    /// Fail with `InvalidInput` unless `period` occurs in the data
    pub fn check_period(&self, period: Period) -> Result<()> {
        if self.has_period(period) {
            return Ok(());
        }
        if !self.years().contains(&period.year) {
            return Err(Error::InvalidInput(format!(
                "Year {} not present in data (available: {})",
                period.year,
                join(self.years())
            )));
        }
        Err(Error::InvalidInput(format!(
            "Month {} not present in {} (available: {})",
            period.month,
            period.year,
            join(self.months(period.year))
        )))
    }

    /// Rows of one year/month, in file order
    pub fn period_rows(&self, period: Period) -> impl Iterator<Item = &EnrichedTransaction> {
        self.rows
            .iter()
            .filter(move |r| r.year == period.year && r.month == period.month)
    }

    /// Choices a UI may offer for the sidebar filters of `period`
    pub fn filter_options(&self, period: Period) -> Result<FilterOptions> {
        self.check_period(period)?;

        let mut bounds: Option<AmountRange> = None;
        let mut providers = Vec::new();
        let mut seen_providers = HashSet::new();
        let mut categories = Vec::new();
        let mut seen_categories = HashSet::new();

        for row in self.period_rows(period) {
            bounds = Some(match bounds {
                Some(b) => AmountRange {
                    low: b.low.min(row.amount),
                    high: b.high.max(row.amount),
                },
                None => AmountRange {
                    low: row.amount,
                    high: row.amount,
                },
            });

            let provider = row.provider_or(&self.labels.missing_provider);
            if seen_providers.insert(provider) {
                providers.push(provider.to_string());
            }

            if seen_categories.insert((row.category_id.as_deref(), row.category.as_str())) {
                categories.push(CategoryOption {
                    id: row.category_id.clone(),
                    name: row.category.clone(),
                });
            }
        }

        Ok(FilterOptions {
            period,
            amount_bounds: bounds,
            providers,
            categories,
        })
    }
}

fn join<T: ToString>(values: Vec<T>) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
