//! Test utilities for spendlens-core
//!
//! A small fixed dataset spanning three months, with the awkward rows the
//! real exports contain: a category id with no category, a row with no
//! category id, and a row without provider or description. Amounts are
//! positive magnitudes; the income flag says which way the money moved.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::Labels;
use crate::dataset::Dataset;
use crate::models::{Category, Transaction};

/// Build a transaction from literal parts
pub fn tx(
    date: &str,
    amount: i64,
    description: Option<&str>,
    provider: Option<&str>,
    category_id: Option<&str>,
    income: bool,
) -> Transaction {
    Transaction {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid test date"),
        amount: Decimal::from(amount),
        description: description.map(String::from),
        provider: provider.map(String::from),
        category_id: category_id.map(String::from),
        income,
    }
}

pub fn sample_categories() -> Vec<Category> {
    [
        ("c-salary", "Salary"),
        ("c-food", "Food"),
        ("c-rent", "Rent"),
        ("c-inv", "Investments"),
        ("c-fun", "Entertainment"),
    ]
    .into_iter()
    .map(|(id, name)| Category {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        tx("2023-12-20", 50_000, Some("Christmas dinner"), Some("Crepes"), Some("c-food"), false),
        tx("2024-02-01", 5_000_000, Some("Salary February"), Some("ACME"), Some("c-salary"), true),
        tx("2024-02-10", 300_000, Some("Supermarket"), Some("Exito"), Some("c-food"), false),
        tx("2024-03-01", 5_000_000, Some("Salary March"), Some("ACME"), Some("c-salary"), true),
        tx("2024-03-02", 1_200_000, Some("Apartment rent"), Some("Landlord"), Some("c-rent"), false),
        tx("2024-03-05", 85_000, Some("Mercado semanal"), Some("Exito"), Some("c-food"), false),
        tx("2024-03-07", 1_000_000, Some("Index fund"), Some("Broker"), Some("c-inv"), false),
        tx("2024-03-09", 45_000, Some("Cinema tickets"), Some("Cinemark"), Some("c-fun"), false),
        tx("2024-03-12", 32_000, Some("EXITO express snacks"), Some("Exito"), Some("c-fun"), false),
        tx("2024-03-15", 20_000, None, None, Some("c-gone"), false),
        tx("2024-03-20", 150_000, Some("Refund cinema"), Some("Cinemark"), None, true),
    ]
}

/// The fixed dataset with default labels
pub fn sample_dataset() -> Dataset {
    Dataset::new(sample_transactions(), sample_categories(), Labels::default())
}

/// The sample tables rendered as CSV text (transactions, categories)
pub fn sample_csv() -> (String, String) {
    let mut transactions = String::from("date,amount,description,provider,categoryId,income\n");
    for t in sample_transactions() {
        transactions.push_str(&format!(
            "{},{},{},{},{},{}\n",
            t.date,
            t.amount,
            t.description.unwrap_or_default(),
            t.provider.unwrap_or_default(),
            t.category_id.unwrap_or_default(),
            if t.income { "True" } else { "False" },
        ));
    }

    let mut categories = String::from("id,name\n");
    for c in sample_categories() {
        categories.push_str(&format!("{},{}\n", c.id, c.name));
    }

    (transactions, categories)
}
