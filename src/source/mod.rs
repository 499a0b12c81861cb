//! Where the views get their records from.
//!
//! Only the bundled fixtures exist today; a real feed would implement
//! [`DataSource`] and be handed to the views instead of [`SeedData`].

use crate::models::{
    AllocationSlice, Filing, Holding, MetricCard, PerformanceSample, TransactionType, Trend,
    WatchlistItem,
};
use chrono::NaiveDate;

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable data source abstraction.
pub trait DataSource {
    fn filings(&self) -> Vec<Filing>;
    fn watchlist(&self) -> Vec<WatchlistItem>;
    fn performance(&self) -> Vec<PerformanceSample>;
    fn allocation(&self) -> Vec<AllocationSlice>;
    fn holdings(&self) -> Vec<Holding>;
    fn dashboard_metrics(&self) -> Vec<MetricCard>;
}

// ── Bundled fixtures ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
pub struct SeedData;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Fixture dates are literals below; an invalid one is a typo, not input.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn filing(
    id: &str,
    company: &str,
    ticker: &str,
    insider: &str,
    kind: TransactionType,
    shares: u64,
    price: f64,
    total_value: f64,
    change: f64,
    filed: NaiveDate,
    traded: NaiveDate,
) -> Filing {
    Filing {
        id: id.to_string(),
        company: company.to_string(),
        ticker: ticker.to_string(),
        insider: insider.to_string(),
        title: "Chief Executive Officer".to_string(),
        transaction_type: kind,
        shares,
        price,
        total_value,
        shareholding_change: change,
        filing_date: filed,
        transaction_date: traded,
    }
}

#[allow(clippy::too_many_arguments)]
fn watch(
    id: &str,
    symbol: &str,
    company: &str,
    price: f64,
    change: f64,
    change_percent: f64,
    volume: u64,
    market_cap: &str,
    last_filing: &str,
    alerts: bool,
    starred: bool,
) -> WatchlistItem {
    WatchlistItem {
        id: id.to_string(),
        symbol: symbol.to_string(),
        company: company.to_string(),
        current_price: price,
        change,
        change_percent,
        volume,
        market_cap: market_cap.to_string(),
        last_filing: last_filing.to_string(),
        alerts,
        starred,
    }
}

fn metric(title: &str, value: &str, change: &str, trend: Trend) -> MetricCard {
    MetricCard {
        title: title.to_string(),
        value: value.to_string(),
        change: change.to_string(),
        trend,
    }
}

impl DataSource for SeedData {
    #[rustfmt::skip]
    fn filings(&self) -> Vec<Filing> {
        use TransactionType::*;
        vec![
            filing("1", "Apple Inc.", "AAPL", "Timothy D. Cook", Sale,
                5040, 189.84, 956_794.0, -0.8, date(2024, 8, 30), date(2024, 8, 28)),
            filing("2", "Microsoft Corporation", "MSFT", "Satya Nadella", Purchase,
                2500, 374.12, 935_300.0, 1.2, date(2024, 8, 30), date(2024, 8, 29)),
            filing("3", "Tesla, Inc.", "TSLA", "Elon Musk", Sale,
                10_000, 248.50, 2_485_000.0, -0.03, date(2024, 8, 29), date(2024, 8, 27)),
            filing("4", "Amazon.com, Inc.", "AMZN", "Andrew R. Jassy", Grant,
                1200, 145.33, 174_396.0, 0.5, date(2024, 8, 29), date(2024, 8, 26)),
            filing("5", "NVIDIA Corporation", "NVDA", "Jensen Huang", Sale,
                8000, 118.11, 944_880.0, -0.2, date(2024, 8, 28), date(2024, 8, 25)),
        ]
    }

    #[rustfmt::skip]
    fn watchlist(&self) -> Vec<WatchlistItem> {
        vec![
            watch("1", "AAPL", "Apple Inc.", 189.84, 4.25, 2.29,
                58_420_000, "2.95T", "2 hrs ago", true, true),
            watch("2", "MSFT", "Microsoft Corporation", 374.12, -2.18, -0.58,
                24_350_000, "2.78T", "4 hrs ago", true, true),
            watch("3", "TSLA", "Tesla, Inc.", 248.50, -5.23, -2.06,
                87_640_000, "792B", "6 hrs ago", false, false),
            watch("4", "NVDA", "NVIDIA Corporation", 118.11, 1.85, 1.59,
                342_850_000, "2.91T", "1 day ago", true, true),
            watch("5", "AMZN", "Amazon.com, Inc.", 145.33, 0.87, 0.60,
                45_230_000, "1.51T", "8 hrs ago", false, false),
        ]
    }

    fn performance(&self) -> Vec<PerformanceSample> {
        [
            (date(2024, 7, 30), 782_000.0, 780_000.0),
            (date(2024, 8, 5), 795_000.0, 785_000.0),
            (date(2024, 8, 10), 801_000.0, 790_000.0),
            (date(2024, 8, 15), 815_000.0, 795_000.0),
            (date(2024, 8, 20), 823_000.0, 800_000.0),
            (date(2024, 8, 25), 839_000.0, 810_000.0),
            (date(2024, 8, 30), 847_392.0, 815_000.0),
        ]
        .into_iter()
        .map(|(date, value, benchmark)| PerformanceSample { date, value, benchmark })
        .collect()
    }

    fn allocation(&self) -> Vec<AllocationSlice> {
        [
            ("Technology", 35.0, "#3b82f6"),
            ("Healthcare", 20.0, "#10b981"),
            ("Finance", 15.0, "#f59e0b"),
            ("Consumer", 12.0, "#ef4444"),
            ("Energy", 10.0, "#8b5cf6"),
            ("Other", 8.0, "#6b7280"),
        ]
        .into_iter()
        .map(|(name, percent, color)| AllocationSlice {
            name: name.to_string(),
            percent,
            color: color.to_string(),
        })
        .collect()
    }

    fn holdings(&self) -> Vec<Holding> {
        [
            ("AAPL", "Apple Inc.", 125_000.0, 14.7, 2.3),
            ("MSFT", "Microsoft Corp", 98_000.0, 11.6, 1.8),
            ("NVDA", "NVIDIA Corp", 87_000.0, 10.3, -0.5),
            ("GOOGL", "Alphabet Inc.", 76_000.0, 9.0, 1.2),
            ("TSLA", "Tesla Inc.", 65_000.0, 7.7, -2.1),
        ]
        .into_iter()
        .map(|(symbol, name, value, weight, change)| Holding {
            symbol: symbol.to_string(),
            name: name.to_string(),
            value,
            weight,
            change,
        })
        .collect()
    }

    fn dashboard_metrics(&self) -> Vec<MetricCard> {
        vec![
            metric("Total Portfolio Value", "$847,392", "+12.5%", Trend::Positive),
            metric("Active Watchlist Items", "24", "+3", Trend::Positive),
            metric("Form 4 Filings Today", "47", "+8", Trend::Positive),
            metric("Monthly Return", "+8.2%", "-2.1%", Trend::Negative),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let filings = SeedData.filings();
        let ids: HashSet<_> = filings.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), filings.len());

        let items = SeedData.watchlist();
        let ids: HashSet<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_seed_allocation_sums_to_hundred() {
        let total: f64 = SeedData.allocation().iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_seed_performance_is_chronological() {
        let samples = SeedData.performance();
        assert!(samples.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(samples.last().map(|s| s.value), Some(847_392.0));
    }
}
