//! Dashboard command: one filter-aggregate pass, printed

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use spendlens_core::{
    DashboardView, Dataset, Engine, FilterConfig, GroupTotal, Period, SearchText, Selection,
};

use super::{truncate, Session};
use crate::cli::FilterArgs;

/// Turn command-line filters into a `FilterConfig`
///
/// A single amount bound is completed with the month's own minimum or
/// maximum. Categories may be given by id or by name.
pub fn build_filters(dataset: &Dataset, args: &FilterArgs) -> Result<FilterConfig> {
    let period = Period::new(args.year, args.month);
    let mut filters = FilterConfig::new(args.year, args.month);

    if args.min.is_some() || args.max.is_some() {
        let bounds = dataset.filter_options(period)?.amount_bounds;
        let low = args
            .min
            .or(bounds.map(|b| b.low))
            .unwrap_or(Decimal::MIN);
        let high = args
            .max
            .or(bounds.map(|b| b.high))
            .unwrap_or(Decimal::MAX);
        filters = filters.with_amount_range(low, high);
    }

    if let Some(search) = &args.search {
        filters = filters.with_search(SearchText::from_os_str(search)?);
    }

    filters = filters
        .with_providers(args.provider.iter().cloned())
        .with_categories(resolve_categories(dataset, &args.category)?)
        .with_selection(Selection::new(
            args.select_category.as_deref(),
            args.select_provider.as_deref(),
        ));

    Ok(filters)
}

/// Map category arguments to ids, accepting either an id or a name
///
/// Ids found only on transactions (no row in the categories table) are
/// accepted too, since `options` offers them.
fn resolve_categories(dataset: &Dataset, values: &[String]) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    for value in values {
        let known_id = dataset.categories().iter().any(|c| &c.id == value)
            || dataset
                .rows()
                .iter()
                .any(|r| r.category_id.as_deref() == Some(value.as_str()));
        if known_id {
            ids.push(value.clone());
            continue;
        }
        let by_name: Vec<String> = dataset
            .categories()
            .iter()
            .filter(|c| c.name.eq_ignore_ascii_case(value))
            .map(|c| c.id.clone())
            .collect();
        if by_name.is_empty() {
            bail!(
                "Unknown category: {}. Run `spendlens options` to list categories",
                value
            );
        }
        ids.extend(by_name);
    }
    Ok(ids)
}

pub fn cmd_dashboard(session: &Session, args: &FilterArgs, json: bool, limit: usize) -> Result<()> {
    let filters = build_filters(&session.dataset, args)?;
    let view = Engine::new(&session.dataset)
        .with_metrics_scope(session.config.metrics_scope)
        .run(&filters)?;

    if json {
        let out = serde_json::to_string_pretty(&view).context("Failed to serialize view")?;
        println!("{}", out);
        return Ok(());
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│        💰 Spendlens Dashboard {:>7}   │", view.period.to_string());
    println!("╰─────────────────────────────────────────╯");

    if let Some(category) = &filters.selection.category {
        println!("   Selected category: {}", category);
    }
    if let Some(provider) = &filters.selection.provider {
        println!("   Selected provider: {}", provider);
    }

    print_metrics(session, &view);
    print_totals(session, "📊 By Category", "Category", &view.category_totals);
    print_totals(session, "🏪 By Provider", "Provider", &view.provider_totals);
    print_rows(session, &view, limit);

    Ok(())
}

fn print_metrics(session: &Session, view: &DashboardView) {
    let m = &view.summary;

    println!();
    println!("   Expenses:     {:>18}", session.money(m.total_expenses));
    println!("   Income:       {:>18}", session.money(m.total_income));
    match m.savings_rate() {
        Some(rate) => println!(
            "   Savings:      {:>18}  ({:.1}% of income)",
            session.money(m.total_savings),
            rate
        ),
        None => println!("   Savings:      {:>18}", session.money(m.total_savings)),
    }
    match m.investment_rate() {
        Some(rate) => println!(
            "   Investments:  {:>18}  ({:.1}% of income)",
            session.money(m.total_investments),
            rate
        ),
        None => println!("   Investments:  {:>18}", session.money(m.total_investments)),
    }
}

fn print_totals(session: &Session, title: &str, label: &str, totals: &[GroupTotal]) {
    println!();
    println!("{}", title);
    println!("   ─────────────────────────────────────────────────────────────");

    if totals.is_empty() {
        println!("   No transactions match these filters.");
        return;
    }

    println!("   {:25} │ {:>18} │ {:>5}", label, "Amount", "Count");
    println!("   ──────────────────────────┼────────────────────┼───────");
    for total in totals {
        println!(
            "   {:25} │ {:>18} │ {:>5}",
            truncate(&total.key, 25),
            session.money(total.amount),
            total.transaction_count
        );
    }
}

fn print_rows(session: &Session, view: &DashboardView, limit: usize) {
    let missing_provider = &session.dataset.labels().missing_provider;

    println!();
    println!("📋 Transactions ({})", view.rows.len());
    println!("   ─────────────────────────────────────────────────────────────");

    if view.rows.is_empty() {
        println!("   No transactions match these filters.");
        return;
    }

    println!(
        "   {:10} │ {:>14} │ {:20} │ {:20} │ {:6}",
        "Date", "Amount", "Category", "Provider", "Income"
    );
    println!("   ───────────┼────────────────┼──────────────────────┼──────────────────────┼───────");
    for row in view.rows.iter().take(limit) {
        println!(
            "   {:10} │ {:>14} │ {:20} │ {:20} │ {:6}",
            row.date.to_string(),
            format!("{:.2}", row.amount),
            truncate(&row.category, 20),
            truncate(row.provider_or(missing_provider), 20),
            if row.income { "yes" } else { "" }
        );
    }

    if view.rows.len() > limit {
        println!(
            "   \x1b[2m... {} more (use --limit to show more)\x1b[0m",
            view.rows.len() - limit
        );
    }
    println!();
    println!("   Total: {}", session.money(view.rows_total()));
}
