//! Period listing

use anyhow::Result;

use super::Session;

pub fn cmd_periods(session: &Session) -> Result<()> {
    let dataset = &session.dataset;

    println!();
    println!("📅 Available Periods");
    println!("   ─────────────────────────────────────────────────────────────");

    if dataset.is_empty() {
        println!("   No transactions loaded.");
        return Ok(());
    }

    for year in dataset.years() {
        let months: Vec<String> = dataset
            .months(year)
            .iter()
            .map(|m| format!("{:02}", m))
            .collect();
        println!("   {} │ {}", year, months.join(" "));
    }

    println!();
    println!(
        "   {} transactions, {} categories",
        dataset.len(),
        dataset.categories().len()
    );

    Ok(())
}
