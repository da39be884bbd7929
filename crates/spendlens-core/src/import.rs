//! CSV loaders for the transactions and categories tables
//!
//! Columns are matched by header name, so column order is free and extra
//! columns are ignored. Expected headers:
//! - transactions: `date,amount,description,provider,categoryId,income`
//! - categories: `id,name`

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Category, Transaction};

#[derive(Debug, Deserialize)]
struct RawTransaction {
    date: String,
    amount: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    provider: Option<String>,
    #[serde(rename = "categoryId", alias = "category_id", default)]
    category_id: Option<String>,
    income: String,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    id: String,
    name: String,
}

/// Parse the transactions table
pub fn parse_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut transactions = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = line_of(&record);
        let raw: RawTransaction = record
            .deserialize(Some(&headers))
            .map_err(|e| Error::Import(format!("line {}: {}", line, e)))?;

        let date = parse_date(&raw.date).map_err(|e| at_line(line, e))?;
        let amount = parse_amount(&raw.amount).map_err(|e| at_line(line, e))?;
        let income = parse_flag(&raw.income).map_err(|e| at_line(line, e))?;

        transactions.push(Transaction {
            date,
            amount,
            description: non_empty(raw.description),
            provider: non_empty(raw.provider),
            category_id: non_empty(raw.category_id),
            income,
        });
    }

    debug!("Parsed {} transactions", transactions.len());
    Ok(transactions)
}

/// Parse the categories table, rejecting duplicate ids
pub fn parse_categories<R: Read>(reader: R) -> Result<Vec<Category>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut categories = Vec::new();
    let mut seen = HashSet::new();

    for result in rdr.records() {
        let record = result?;
        let line = line_of(&record);
        let raw: RawCategory = record
            .deserialize(Some(&headers))
            .map_err(|e| Error::Import(format!("line {}: {}", line, e)))?;

        if raw.id.is_empty() {
            return Err(Error::Import(format!("line {}: missing category id", line)));
        }
        if !seen.insert(raw.id.clone()) {
            return Err(Error::InvalidData(format!(
                "Duplicate category id {} on line {}",
                raw.id, line
            )));
        }

        categories.push(Category {
            id: raw.id,
            name: raw.name,
        });
    }

    debug!("Parsed {} categories", categories.len());
    Ok(categories)
}

/// Load the transactions table from a file
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let file = File::open(path)?;
    parse_transactions(file)
}

/// Load the categories table from a file
pub fn load_categories(path: &Path) -> Result<Vec<Category>> {
    let file = File::open(path)?;
    parse_categories(file)
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn at_line(line: u64, err: Error) -> Error {
    match err {
        Error::Import(msg) => Error::Import(format!("line {}: {}", line, msg)),
        other => other,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Parse a date in one of the common export formats
///
/// Timestamps keep the calendar date as written, without converting zones.
fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let date_formats = [
        "%Y-%m-%d", // 2024-03-15
        "%m/%d/%Y", // 03/15/2024
        "%Y/%m/%d", // 2024/03/15
    ];
    for fmt in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(dt.date_naive());
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}

/// Parse the income flag
fn parse_flag(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(Error::Import(format!("Unable to parse income flag: {}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date("2024-03-15").unwrap(), expected);
        assert_eq!(parse_date("03/15/2024").unwrap(), expected);
        assert_eq!(parse_date("2024-03-15 23:10:00").unwrap(), expected);
        assert_eq!(parse_date("2024-03-15T08:00:00.250").unwrap(), expected);
        assert_eq!(parse_date("2024-03-15T23:30:00-05:00").unwrap(), expected);
        assert_eq!(parse_date("2024-03-15 23:30:00+00:00").unwrap(), expected);
        assert!(parse_date("15 March").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("-85000").unwrap(), dec!(-85000));
        assert_eq!(parse_amount("(20.00)").unwrap(), dec!(-20));
        assert_eq!(parse_amount("1.5e3").unwrap(), dec!(1500));
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("True").unwrap());
        assert!(parse_flag("1").unwrap());
        assert!(!parse_flag("False").unwrap());
        assert!(!parse_flag("no").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_parse_transactions() {
        let csv = "date,amount,description,provider,categoryId,income
2024-03-01,5000000,Salary March,ACME,c-salary,True
2024-03-02,-85000,Mercado,Exito,c-food,False
2024-03-03,-12000,,,,False";

        let txs = parse_transactions(csv.as_bytes()).unwrap();
        assert_eq!(txs.len(), 3);
        assert_eq!(txs[0].amount, dec!(5000000));
        assert!(txs[0].income);
        assert_eq!(txs[1].provider.as_deref(), Some("Exito"));
        assert_eq!(txs[1].category_id.as_deref(), Some("c-food"));
        assert_eq!(txs[2].description, None);
        assert_eq!(txs[2].provider, None);
        assert_eq!(txs[2].category_id, None);
    }

    #[test]
    fn test_parse_transactions_column_order_and_extras() {
        let csv = "income,categoryId,id,amount,date,provider,description
false,c1,tx-9,-10.50,2024-01-05,Cafe,Coffee";

        let txs = parse_transactions(csv.as_bytes()).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].amount, dec!(-10.50));
        assert_eq!(txs[0].description.as_deref(), Some("Coffee"));
    }

    #[test]
    fn test_parse_transactions_without_optional_columns() {
        let csv = "date,amount,income\n2024-01-05,-1,false";
        let txs = parse_transactions(csv.as_bytes()).unwrap();
        assert_eq!(txs[0].provider, None);
        assert_eq!(txs[0].category_id, None);
    }

    #[test]
    fn test_parse_transactions_reports_line() {
        let csv = "date,amount,description,provider,categoryId,income
2024-03-01,10,ok,p,c,true
2024-03-02,ten,bad,p,c,true";

        let err = parse_transactions(csv.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 3"), "got: {msg}");
        assert!(msg.contains("Unable to parse amount"), "got: {msg}");
    }

    #[test]
    fn test_parse_categories() {
        let csv = "id,name\nc-food,Food\nc-inv,Investments";
        let cats = parse_categories(csv.as_bytes()).unwrap();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[1].name, "Investments");
    }

    #[test]
    fn test_parse_categories_rejects_duplicates() {
        let csv = "id,name\nc1,Food\nc1,Groceries";
        let err = parse_categories(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let tx_path = dir.path().join("transactions.csv");
        let cat_path = dir.path().join("categories.csv");
        std::fs::write(
            &tx_path,
            "date,amount,description,provider,categoryId,income\n2024-02-01,-1,x,y,c1,false\n",
        )
        .unwrap();
        std::fs::write(&cat_path, "id,name\nc1,Food\n").unwrap();

        assert_eq!(load_transactions(&tx_path).unwrap().len(), 1);
        assert_eq!(load_categories(&cat_path).unwrap().len(), 1);
        assert!(matches!(
            load_categories(&dir.path().join("missing.csv")),
            Err(Error::Io(_))
        ));
    }
}
