//! Domain models for SpendLens

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row of the transactions table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Amount as recorded; exports store outflows as positive magnitudes
    pub amount: Decimal,
    pub description: Option<String>,
    /// Merchant or counterparty
    pub provider: Option<String>,
    /// Foreign key into the categories table
    pub category_id: Option<String>,
    /// true = inflow, false = outflow
    pub income: bool,
}

/// A row of the categories table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A transaction joined with its category name and derived period fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTransaction {
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub amount: Decimal,
    pub description: Option<String>,
    pub provider: Option<String>,
    pub category_id: Option<String>,
    /// Resolved name, or the missing-category label when the id has no match
    pub category: String,
    /// Whether `category` is the placeholder label
    pub category_missing: bool,
    pub income: bool,
}

impl EnrichedTransaction {
    pub fn new(tx: &Transaction, category: Option<&str>, missing_label: &str) -> Self {
        Self {
            date: tx.date,
            year: tx.date.year(),
            month: tx.date.month(),
            amount: tx.amount,
            description: tx.description.clone(),
            provider: tx.provider.clone(),
            category_id: tx.category_id.clone(),
            category: category.unwrap_or(missing_label).to_string(),
            category_missing: category.is_none(),
            income: tx.income,
        }
    }

    /// Provider used for grouping; absent providers fall under `missing_label`
    pub fn provider_or<'a>(&'a self, missing_label: &'a str) -> &'a str {
        self.provider.as_deref().unwrap_or(missing_label)
    }
}

/// A (year, month) pair present in the data
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Inclusive amount bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRange {
    pub low: Decimal,
    pub high: Decimal,
}

impl AmountRange {
    pub fn contains(&self, amount: Decimal) -> bool {
        self.low <= amount && amount <= self.high
    }
}

/// Summed amount for one chart bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub amount: Decimal,
    pub transaction_count: usize,
}

/// Month-level metric cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_expenses: Decimal,
    pub total_income: Decimal,
    pub total_savings: Decimal,
    pub total_investments: Decimal,
}

impl SummaryMetrics {
    /// Savings as a percentage of income; `None` when there is no income
    pub fn savings_rate(&self) -> Option<Decimal> {
        percentage_of_income(self.total_savings, self.total_income)
    }

    /// Investments as a percentage of income; `None` when there is no income
    pub fn investment_rate(&self) -> Option<Decimal> {
        percentage_of_income(self.total_investments, self.total_income)
    }
}

fn percentage_of_income(value: Decimal, income: Decimal) -> Option<Decimal> {
    if income.is_zero() {
        return None;
    }
    value
        .checked_div(income)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
}

/// A category offered as a filter choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    /// `None` for transactions without a category id
    pub id: Option<String>,
    pub name: String,
}

/// Values a UI may offer for the sidebar filters of one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub period: Period,
    /// `None` when the period has no transactions
    pub amount_bounds: Option<AmountRange>,
    pub providers: Vec<String>,
    pub categories: Vec<CategoryOption>,
}

/// Everything the dashboard renders for one interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub period: Period,
    pub rows: Vec<EnrichedTransaction>,
    pub category_totals: Vec<GroupTotal>,
    pub provider_totals: Vec<GroupTotal>,
    pub summary: SummaryMetrics,
}

impl DashboardView {
    pub fn rows_total(&self) -> Decimal {
        self.rows.iter().map(|r| r.amount).sum()
    }
}
