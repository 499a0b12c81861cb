//! Case-insensitive substring search shared by the filings and watchlist views.

use crate::models::{Filing, WatchlistItem};

/// Records that expose a fixed set of text fields to free-text search.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl Searchable for Filing {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.company.as_str(), self.ticker.as_str(), self.insider.as_str()]
    }
}

impl Searchable for WatchlistItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.symbol.as_str(), self.company.as_str()]
    }
}

impl Searchable for &str {
    fn search_fields(&self) -> Vec<&str> {
        vec![*self]
    }
}

/// Subsequence of `items` matching `query`, original order kept.
pub fn search<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    items.iter().filter(|item| item.matches(query)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DataSource, SeedData};

    #[test]
    fn test_search_plain_strings() {
        let names = ["Apple Inc.", "Microsoft Corp"];
        assert_eq!(search(&names, "micro"), vec!["Microsoft Corp"]);
    }

    #[test]
    fn test_search_is_idempotent() {
        let filings = SeedData.filings();
        for q in ["", "inc", "ceo", "JENSEN", "zzz"] {
            let once = search(&filings, q);
            let twice = search(&once, q);
            assert_eq!(once, twice, "query {:?}", q);
        }
    }

    #[test]
    fn test_search_filing_fields() {
        let filings = SeedData.filings();
        let by_ticker: Vec<_> = search(&filings, "nvda").into_iter().map(|f| f.id).collect();
        assert_eq!(by_ticker, vec!["5"]);

        let by_insider: Vec<_> = search(&filings, "nadella").into_iter().map(|f| f.id).collect();
        assert_eq!(by_insider, vec!["2"]);

        // title is not a search field
        assert!(search(&filings, "Chief Executive").is_empty());
    }

    #[test]
    fn test_search_watchlist_fields() {
        let items = SeedData.watchlist();
        let hits: Vec<_> = search(&items, "inc").into_iter().map(|i| i.symbol).collect();
        assert_eq!(hits, vec!["AAPL", "TSLA", "AMZN"]);
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let items = SeedData.watchlist();
        assert_eq!(search(&items, "").len(), items.len());
    }
}
