//! Form 4 filings view: search, transaction-type filter, sort.

pub mod export;

use crate::error::TrackerError;
use crate::models::{Filing, TransactionType};
use crate::search::Searchable;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

// ── Transaction filter ────────────────────────────────────────────────────────

/// Selected transaction category; `All` is the "no filter" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionFilter {
    #[default]
    All,
    Only(TransactionType),
}

impl TransactionFilter {
    pub fn accepts(&self, filing: &Filing) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Only(kind) => filing.transaction_type == *kind,
        }
    }
}

impl fmt::Display for TransactionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionFilter::All => f.write_str("All Transactions"),
            TransactionFilter::Only(kind) => write!(f, "{}", kind),
        }
    }
}

impl FromStr for TransactionFilter {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TransactionFilter::All);
        }
        s.parse::<TransactionType>().map(TransactionFilter::Only)
    }
}

/// Filings whose kind matches `filter`, original order kept.
pub fn filter_by_type(filings: &[Filing], filter: TransactionFilter) -> Vec<Filing> {
    filings.iter().filter(|f| filter.accepts(f)).cloned().collect()
}

// ── Sorting ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    FilingDate,
    TransactionDate,
    Value,
    Shares,
    Company,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::FilingDate,
        SortKey::TransactionDate,
        SortKey::Value,
        SortKey::Shares,
        SortKey::Company,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::FilingDate => "filing-date",
            SortKey::TransactionDate => "transaction-date",
            SortKey::Value => "value",
            SortKey::Shares => "shares",
            SortKey::Company => "company",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| TrackerError::UnknownSortKey(s.to_string()))
    }
}

/// Stable in-place sort. Dates and magnitudes descend, company ascends.
pub fn sort_filings(filings: &mut [Filing], key: SortKey) {
    match key {
        SortKey::FilingDate => filings.sort_by_key(|f| Reverse(f.filing_date)),
        SortKey::TransactionDate => filings.sort_by_key(|f| Reverse(f.transaction_date)),
        SortKey::Value => filings.sort_by(|a, b| b.total_value.total_cmp(&a.total_value)),
        SortKey::Shares => filings.sort_by_key(|f| Reverse(f.shares)),
        SortKey::Company => filings.sort_by_key(|f| f.company.to_lowercase()),
    }
}

// ── Query ─────────────────────────────────────────────────────────────────────

/// Everything the filings view lets the user change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilingQuery {
    pub search: String,
    pub filter: TransactionFilter,
    pub sort: SortKey,
}

impl FilingQuery {
    /// Search, then type filter, then sort.
    pub fn apply(&self, filings: &[Filing]) -> Vec<Filing> {
        let mut rows: Vec<Filing> = filings
            .iter()
            .filter(|f| f.matches(&self.search) && self.filter.accepts(f))
            .cloned()
            .collect();
        sort_filings(&mut rows, self.sort);
        debug!(
            "filings query search={:?} filter={} sort={}: {} of {} rows",
            self.search,
            self.filter,
            self.sort,
            rows.len(),
            filings.len()
        );
        rows
    }
}

/// Filings view state: private dataset plus the active query.
#[derive(Debug, Clone)]
pub struct FilingsView {
    filings: Vec<Filing>,
    pub query: FilingQuery,
}

impl FilingsView {
    pub fn new(filings: Vec<Filing>) -> Self {
        Self {
            filings,
            query: FilingQuery::default(),
        }
    }

    pub fn visible(&self) -> Vec<Filing> {
        self.query.apply(&self.filings)
    }

    /// The N most recently filed records, ignoring the active query.
    pub fn most_recent(&self, n: usize) -> Vec<Filing> {
        let mut rows = self.filings.clone();
        sort_filings(&mut rows, SortKey::FilingDate);
        rows.truncate(n);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DataSource, SeedData};

    fn ids(rows: &[Filing]) -> Vec<&str> {
        rows.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<TransactionFilter>().unwrap(), TransactionFilter::All);
        assert_eq!("ALL".parse::<TransactionFilter>().unwrap(), TransactionFilter::All);
        assert_eq!(
            "exercise".parse::<TransactionFilter>().unwrap(),
            TransactionFilter::Only(TransactionType::Exercise)
        );
        assert_eq!(
            "bogus".parse::<TransactionFilter>(),
            Err(TrackerError::UnknownTransactionType("bogus".into()))
        );
    }

    #[test]
    fn test_filter_by_type() {
        let filings = SeedData.filings();
        let sales = filter_by_type(&filings, TransactionFilter::Only(TransactionType::Sale));
        assert_eq!(ids(&sales), vec!["1", "3", "5"]);

        let all = filter_by_type(&filings, TransactionFilter::All);
        assert_eq!(all.len(), filings.len());

        let exercises =
            filter_by_type(&filings, TransactionFilter::Only(TransactionType::Exercise));
        assert!(exercises.is_empty());
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("filing-date".parse::<SortKey>().unwrap(), SortKey::FilingDate);
        assert_eq!("transaction_date".parse::<SortKey>().unwrap(), SortKey::TransactionDate);
        assert_eq!("Value".parse::<SortKey>().unwrap(), SortKey::Value);
        assert!("price".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_orders() {
        let mut rows = SeedData.filings();

        sort_filings(&mut rows, SortKey::Value);
        assert_eq!(ids(&rows), vec!["3", "1", "5", "2", "4"]);

        sort_filings(&mut rows, SortKey::Shares);
        assert_eq!(ids(&rows), vec!["3", "5", "1", "2", "4"]);

        sort_filings(&mut rows, SortKey::Company);
        assert_eq!(ids(&rows), vec!["4", "1", "2", "5", "3"]);

        sort_filings(&mut rows, SortKey::TransactionDate);
        assert_eq!(ids(&rows), vec!["2", "1", "3", "4", "5"]);
    }

    #[test]
    fn test_filing_date_sort_is_stable() {
        let mut rows = SeedData.filings();
        rows.reverse();
        sort_filings(&mut rows, SortKey::FilingDate);
        // ties keep their incoming order
        assert_eq!(ids(&rows), vec!["2", "1", "4", "3", "5"]);
    }

    #[test]
    fn test_query_combines_search_and_filter() {
        let filings = SeedData.filings();
        let query = FilingQuery {
            search: "corporation".into(),
            filter: TransactionFilter::Only(TransactionType::Sale),
            sort: SortKey::FilingDate,
        };
        assert_eq!(ids(&query.apply(&filings)), vec!["5"]);
    }

    #[test]
    fn test_query_no_match_is_empty() {
        let view = FilingsView {
            query: FilingQuery {
                search: "berkshire".into(),
                ..FilingQuery::default()
            },
            ..FilingsView::new(SeedData.filings())
        };
        assert!(view.visible().is_empty());
    }

    #[test]
    fn test_most_recent_ignores_query() {
        let mut view = FilingsView::new(SeedData.filings());
        view.query.search = "tesla".into();
        assert_eq!(ids(&view.most_recent(3)), vec!["1", "2", "3"]);
    }
}
