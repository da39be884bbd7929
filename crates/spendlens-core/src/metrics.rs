//! Month-level metric cards (expenses, income, savings, investments)

use rust_decimal::Decimal;

use crate::config::Labels;
use crate::models::{EnrichedTransaction, SummaryMetrics};

/// Compute the metric cards over `rows`
///
/// Amounts are magnitudes and the income flag gives the direction, so
/// savings are income minus expenses. Expenses are outflows outside the
/// investments category; investments are every row in that category
/// regardless of direction. A negative outflow (a reversal) is summed as
/// recorded and lowers expenses.
pub fn summarize<'r, I>(rows: I, labels: &Labels) -> SummaryMetrics
where
    I: IntoIterator<Item = &'r EnrichedTransaction>,
{
    let mut total_expenses = Decimal::ZERO;
    let mut total_income = Decimal::ZERO;
    let mut total_investments = Decimal::ZERO;

    for row in rows {
        let is_investment = row.category == labels.investments;
        if row.income {
            total_income += row.amount;
        } else if !is_investment {
            total_expenses += row.amount;
        }
        if is_investment {
            total_investments += row.amount;
        }
    }

    SummaryMetrics {
        total_expenses,
        total_income,
        total_savings: total_income - total_expenses,
        total_investments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Period;
    use crate::test_utils::{sample_dataset, tx};
    use rust_decimal_macros::dec;

    #[test]
    fn test_summarize_march() {
        let ds = sample_dataset();
        let m = summarize(ds.period_rows(Period::new(2024, 3)), ds.labels());

        assert_eq!(m.total_income, dec!(5150000));
        assert_eq!(m.total_expenses, dec!(1382000));
        assert_eq!(m.total_investments, dec!(1000000));
        assert_eq!(m.total_savings, dec!(3768000));
        assert!(m.total_savings <= m.total_income);
    }

    #[test]
    fn test_rates_for_march() {
        let ds = sample_dataset();
        let m = summarize(ds.period_rows(Period::new(2024, 3)), ds.labels());

        assert_eq!(m.savings_rate().unwrap().round_dp(1), dec!(73.2));
        assert_eq!(m.investment_rate().unwrap().round_dp(1), dec!(19.4));
    }

    #[test]
    fn test_negative_outflow_reduces_expenses() {
        let labels = Labels::default();
        let rows: Vec<EnrichedTransaction> = [
            tx("2024-03-01", 1_000, None, None, Some("c"), true),
            tx("2024-03-02", 300, None, None, Some("c"), false),
            // reversal of an earlier charge
            tx("2024-03-03", -50, None, None, Some("c"), false),
        ]
        .iter()
        .map(|t| EnrichedTransaction::new(t, Some("Food"), &labels.missing_category))
        .collect();

        let m = summarize(&rows, &labels);
        assert_eq!(m.total_expenses, dec!(250));
        assert_eq!(m.total_savings, dec!(750));
    }

    #[test]
    fn test_summarize_empty_is_zero() {
        let ds = sample_dataset();
        let m = summarize(std::iter::empty::<&EnrichedTransaction>(), ds.labels());
        assert_eq!(m, SummaryMetrics::default());
        assert_eq!(m.savings_rate(), None);
    }

    #[test]
    fn test_investments_label_is_configurable() {
        let ds = sample_dataset();
        let labels = Labels {
            investments: "Rent".to_string(),
            ..Labels::default()
        };
        let m = summarize(ds.period_rows(Period::new(2024, 3)), &labels);
        assert_eq!(m.total_investments, dec!(1200000));
        // "Investments" is now an ordinary expense
        assert_eq!(m.total_expenses, dec!(1182000));
    }
}
