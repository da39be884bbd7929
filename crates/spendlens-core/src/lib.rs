//! SpendLens Core Library
//!
//! Filter-and-aggregate engine behind the SpendLens spending dashboard:
//! - CSV loaders for the transactions and categories tables
//! - Session dataset with the category join and derived year/month
//! - Sidebar filters and chart drill-down selection
//! - Category/provider totals and month-level metric cards
//! - TOML configuration with embedded defaults

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod filter;
pub mod import;
pub mod metrics;
pub mod models;

/// Test utilities including a fixed sample dataset
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{Config, Labels, MetricsScope};
pub use dataset::Dataset;
pub use engine::Engine;
pub use error::{Error, Result};
pub use filter::{FilterConfig, SearchText, Selection};
pub use models::{
    AmountRange, Category, DashboardView, EnrichedTransaction, FilterOptions, GroupTotal, Period,
    SummaryMetrics, Transaction,
};
