use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

// ── Transaction kind ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Purchase,
    Sale,
    Grant,
    Exercise,
}

impl TransactionType {
    pub const ALL: [TransactionType; 4] = [
        TransactionType::Purchase,
        TransactionType::Sale,
        TransactionType::Grant,
        TransactionType::Exercise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Purchase => "Purchase",
            TransactionType::Sale => "Sale",
            TransactionType::Grant => "Grant",
            TransactionType::Exercise => "Exercise",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TransactionType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TrackerError::UnknownTransactionType(s.to_string()))
    }
}

// ── Form 4 filing ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Filing {
    pub id: String,
    pub company: String,
    pub ticker: String,
    pub insider: String,
    pub title: String,             // insider's position
    pub transaction_type: TransactionType,
    pub shares: u64,
    pub price: f64,
    pub total_value: f64,
    pub shareholding_change: f64,  // percent, signed
    pub filing_date: NaiveDate,
    pub transaction_date: NaiveDate,
}

// ── Watchlist ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistItem {
    pub id: String,
    pub symbol: String,
    pub company: String,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub market_cap: String,   // display label, e.g. "2.95T"
    pub last_filing: String,  // display label, e.g. "2 hrs ago"
    pub alerts: bool,
    pub starred: bool,
}

impl WatchlistItem {
    /// Placeholder record for a symbol typed in by the user.
    pub fn placeholder(id: String, symbol: &str) -> Self {
        let symbol = symbol.to_uppercase();
        Self {
            id,
            company: format!("{} Company", symbol),
            symbol,
            current_price: 100.0,
            change: 0.0,
            change_percent: 0.0,
            volume: 1_000_000,
            market_cap: "1B".to_string(),
            last_filing: "No recent filings".to_string(),
            alerts: false,
            starred: false,
        }
    }
}

// ── Portfolio ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceSample {
    pub date: NaiveDate,
    pub value: f64,
    pub benchmark: f64,  // S&P 500, same scale as value
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationSlice {
    pub name: String,
    pub percent: f64,
    pub color: String,  // hex, "#3b82f6"
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub value: f64,
    pub weight: f64,
    pub change: f64,
}

// ── Dashboard ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    pub change: String,
    pub trend: Trend,
}
