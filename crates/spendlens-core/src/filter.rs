//! Filter configuration and row predicates
//!
//! A `FilterConfig` carries everything one dashboard interaction selects:
//! the sidebar filters (period, amount range, search text, providers,
//! categories) and the drill-down selection coming from chart clicks.
//! Each active filter becomes one `Predicate`; predicates only ever remove
//! rows and are combined with AND, so the order they run in does not change
//! the result.

use std::collections::BTreeSet;
use std::ffi::OsStr;

use regex::{Regex, RegexBuilder};
use rust_decimal::Decimal;

use crate::config::Labels;
use crate::error::{Error, Result};
use crate::models::{AmountRange, EnrichedTransaction, Period};

/// Case-insensitive substring search on the description
#[derive(Debug, Clone, Default)]
pub struct SearchText {
    text: String,
    matcher: Option<Regex>,
}

impl SearchText {
    pub fn new(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Ok(Self::default());
        }
        let matcher = RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::InvalidInput(format!("Unusable search text: {}", e)))?;
        Ok(Self {
            text: text.to_string(),
            matcher: Some(matcher),
        })
    }

    /// Fails with `InvalidInput` when the bytes are not UTF-8 text
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::InvalidInput(format!("Search text is not valid UTF-8: {}", e)))?;
        Self::new(text)
    }

    /// Fails with `InvalidInput` when the argument is not valid Unicode
    pub fn from_os_str(s: &OsStr) -> Result<Self> {
        let text = s.to_str().ok_or_else(|| {
            Error::InvalidInput(format!(
                "Search text is not valid Unicode: {}",
                s.to_string_lossy()
            ))
        })?;
        Self::new(text)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_none()
    }

    /// Empty search matches everything; otherwise absent descriptions never match
    pub fn matches(&self, description: Option<&str>) -> bool {
        match &self.matcher {
            None => true,
            Some(re) => description.is_some_and(|d| re.is_match(d)),
        }
    }
}

impl PartialEq for SearchText {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

/// Drill-down selection from chart clicks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Exact category name of the clicked category bar
    pub category: Option<String>,
    /// Exact provider name of the clicked provider bar
    pub provider: Option<String>,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    /// Empty strings count as "nothing selected"
    pub fn new(category: Option<&str>, provider: Option<&str>) -> Self {
        Self {
            category: category.filter(|s| !s.is_empty()).map(String::from),
            provider: provider.filter(|s| !s.is_empty()).map(String::from),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.provider.is_none()
    }
}

/// One interaction's worth of filter choices
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub period: Period,
    /// `None` keeps every amount
    pub amount_range: Option<AmountRange>,
    pub search: SearchText,
    /// Empty set keeps every provider
    pub providers: BTreeSet<String>,
    /// Category ids; empty set keeps every category
    pub categories: BTreeSet<String>,
    pub selection: Selection,
}

impl FilterConfig {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            period: Period::new(year, month),
            amount_range: None,
            search: SearchText::default(),
            providers: BTreeSet::new(),
            categories: BTreeSet::new(),
            selection: Selection::none(),
        }
    }

    pub fn with_amount_range(mut self, low: Decimal, high: Decimal) -> Self {
        self.amount_range = Some(AmountRange { low, high });
        self
    }

    pub fn with_search(mut self, search: SearchText) -> Self {
        self.search = search;
        self
    }

    pub fn with_providers<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.providers = providers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Reject reversed amount bounds
    pub fn validate(&self) -> Result<()> {
        if let Some(range) = self.amount_range {
            if range.low > range.high {
                return Err(Error::InvalidRange {
                    low: range.low.to_string(),
                    high: range.high.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Period predicate plus every active sidebar filter
    pub fn sidebar_predicates(&self) -> Vec<Predicate<'_>> {
        let mut predicates = vec![Predicate::Period(self.period)];
        if let Some(range) = self.amount_range {
            predicates.push(Predicate::Amount(range));
        }
        if !self.search.is_empty() {
            predicates.push(Predicate::Search(&self.search));
        }
        if !self.providers.is_empty() {
            predicates.push(Predicate::Providers(&self.providers));
        }
        if !self.categories.is_empty() {
            predicates.push(Predicate::Categories(&self.categories));
        }
        predicates
    }

    pub fn category_selection(&self) -> Option<Predicate<'_>> {
        self.selection
            .category
            .as_deref()
            .map(Predicate::SelectedCategory)
    }

    pub fn provider_selection(&self) -> Option<Predicate<'_>> {
        self.selection
            .provider
            .as_deref()
            .map(Predicate::SelectedProvider)
    }

    /// Every predicate, drill-down included
    pub fn all_predicates(&self) -> Vec<Predicate<'_>> {
        let mut predicates = self.sidebar_predicates();
        predicates.extend(self.category_selection());
        predicates.extend(self.provider_selection());
        predicates
    }
}

/// A single row test
#[derive(Debug, Clone, Copy)]
pub enum Predicate<'a> {
    Period(Period),
    Amount(AmountRange),
    Search(&'a SearchText),
    Providers(&'a BTreeSet<String>),
    Categories(&'a BTreeSet<String>),
    SelectedCategory(&'a str),
    SelectedProvider(&'a str),
}

impl Predicate<'_> {
    pub fn matches(&self, row: &EnrichedTransaction, labels: &Labels) -> bool {
        match self {
            Self::Period(period) => row.year == period.year && row.month == period.month,
            Self::Amount(range) => range.contains(row.amount),
            Self::Search(search) => search.matches(row.description.as_deref()),
            Self::Providers(providers) => {
                providers.contains(row.provider_or(&labels.missing_provider))
            }
            Self::Categories(ids) => row
                .category_id
                .as_deref()
                .is_some_and(|id| ids.contains(id)),
            Self::SelectedCategory(name) => row.category == *name,
            Self::SelectedProvider(name) => row.provider_or(&labels.missing_provider) == *name,
        }
    }
}

/// Keep the rows matching every predicate, preserving order
pub fn apply<'r, I>(
    rows: I,
    predicates: &[Predicate<'_>],
    labels: &Labels,
) -> Vec<&'r EnrichedTransaction>
where
    I: IntoIterator<Item = &'r EnrichedTransaction>,
{
    rows.into_iter()
        .filter(|row| predicates.iter().all(|p| p.matches(row, labels)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_dataset;
    use rust_decimal_macros::dec;

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let search = SearchText::new("exito").unwrap();
        assert!(search.matches(Some("EXITO express snacks")));
        assert!(search.matches(Some("Pago Exito")));
        assert!(!search.matches(Some("Carulla")));
        assert!(!search.matches(None));
    }

    #[test]
    fn test_search_treats_metacharacters_literally() {
        let search = SearchText::new("a.b (x)").unwrap();
        assert!(search.matches(Some("A.B (X) store")));
        assert!(!search.matches(Some("aXb (x)")));
    }

    #[test]
    fn test_empty_search_matches_absent_description() {
        let search = SearchText::new("").unwrap();
        assert!(search.is_empty());
        assert!(search.matches(None));
        assert!(search.matches(Some("")));
    }

    #[test]
    fn test_search_rejects_non_utf8() {
        let err = SearchText::from_bytes(&[0x66, 0xff, 0x6f]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(SearchText::from_bytes(b"rent").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_search_rejects_non_unicode_os_str() {
        use std::os::unix::ffi::OsStrExt;
        let err = SearchText::from_os_str(OsStr::from_bytes(&[0xc3, 0x28])).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_reversed_range_is_invalid() {
        let filters = FilterConfig::new(2024, 3).with_amount_range(dec!(10), dec!(-10));
        assert!(matches!(
            filters.validate(),
            Err(Error::InvalidRange { .. })
        ));
        let filters = FilterConfig::new(2024, 3).with_amount_range(dec!(5), dec!(5));
        assert!(filters.validate().is_ok());
    }

    #[test]
    fn test_inactive_filters_add_no_predicates() {
        let filters = FilterConfig::new(2024, 3)
            .with_providers(Vec::<String>::new())
            .with_categories(Vec::<String>::new());
        assert_eq!(filters.sidebar_predicates().len(), 1);
        assert_eq!(filters.all_predicates().len(), 1);
    }

    #[test]
    fn test_empty_selection_strings_are_ignored() {
        let selection = Selection::new(Some(""), Some(""));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_provider_filter_matches_missing_label() {
        let ds = sample_dataset();
        let filters = FilterConfig::new(2024, 3).with_providers(["(none)"]);
        let rows = apply(ds.rows(), &filters.sidebar_predicates(), ds.labels());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].provider, None);
    }

    #[test]
    fn test_category_filter_uses_ids() {
        let ds = sample_dataset();
        let filters = FilterConfig::new(2024, 3).with_categories(["c-food", "c-fun"]);
        let rows = apply(ds.rows(), &filters.sidebar_predicates(), ds.labels());
        assert_eq!(rows.len(), 3);
        assert!(rows
            .iter()
            .all(|r| r.category == "Food" || r.category == "Entertainment"));
    }

    #[test]
    fn test_predicate_order_does_not_matter() {
        let ds = sample_dataset();
        let filters = FilterConfig::new(2024, 3)
            .with_amount_range(dec!(0), dec!(100000))
            .with_search(SearchText::new("e").unwrap())
            .with_providers(["Exito", "Cinemark"])
            .with_selection(Selection::new(Some("Entertainment"), None));

        let forward = filters.all_predicates();
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = apply(ds.rows(), &forward, ds.labels());
        let b = apply(ds.rows(), &reversed, ds.labels());

        // one predicate at a time, in yet another order
        let mut c: Vec<&EnrichedTransaction> = ds.rows().iter().collect();
        for p in [forward[3], forward[0], forward[4], forward[2], forward[1]] {
            c = apply(c, &[p], ds.labels());
        }

        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.len(), 2);
    }
}
