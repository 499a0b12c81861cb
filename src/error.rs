use thiserror::Error;

/// Input the user can get wrong. Everything else is `anyhow` at the edges.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("unknown view '{0}' (expected dashboard, filings, portfolio or watchlist)")]
    UnknownView(String),

    #[error("unknown transaction type '{0}' (expected all, purchase, sale, grant or exercise)")]
    UnknownTransactionType(String),

    #[error("unknown sort key '{0}' (expected filing-date, transaction-date, value, shares or company)")]
    UnknownSortKey(String),

    #[error("unknown time range '{0}' (expected 1W, 1M, 3M, 6M, 1Y or ALL)")]
    UnknownTimeRange(String),

    #[error("unknown command '{0}', type `help` for a list")]
    UnknownCommand(String),

    #[error("`{command}` needs an argument: {usage}")]
    MissingArgument {
        command: String,
        usage: &'static str,
    },
}
