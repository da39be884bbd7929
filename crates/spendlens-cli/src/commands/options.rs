//! Sidebar filter choices for one month

use anyhow::Result;
use spendlens_core::Period;

use super::Session;

pub fn cmd_options(session: &Session, year: i32, month: u32) -> Result<()> {
    let options = session.dataset.filter_options(Period::new(year, month))?;

    println!();
    println!("🎛️  Filter Options for {}", options.period);
    println!("   ─────────────────────────────────────────────────────────────");

    match options.amount_bounds {
        Some(bounds) => println!("   Amount range: {} .. {}", bounds.low, bounds.high),
        None => println!("   Amount range: (no transactions)"),
    }

    println!();
    println!("   Providers ({}):", options.providers.len());
    for provider in &options.providers {
        println!("     • {}", provider);
    }

    println!();
    println!("   Categories ({}):", options.categories.len());
    for category in &options.categories {
        match &category.id {
            Some(id) => println!("     • {:30} [{}]", category.name, id),
            None => println!("     • {:30} \x1b[2m(no id, not filterable)\x1b[0m", category.name),
        }
    }

    Ok(())
}
