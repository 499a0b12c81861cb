use crate::error::TrackerError;
use std::fmt;
use std::str::FromStr;

pub const APP_TITLE: &str = "SEC Tracker";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    Filings,
    Portfolio,
    Watchlist,
}

impl View {
    pub const ALL: [View; 4] = [View::Dashboard, View::Filings, View::Portfolio, View::Watchlist];

    pub fn id(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Filings => "filings",
            View::Portfolio => "portfolio",
            View::Watchlist => "watchlist",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Filings => "Form 4 Filings",
            View::Portfolio => "Portfolio",
            View::Watchlist => "Watchlist",
        }
    }

    pub fn badge(&self) -> Option<&'static str> {
        match self {
            View::Filings => Some("47"),
            View::Watchlist => Some("24"),
            View::Dashboard | View::Portfolio => None,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for View {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        View::ALL
            .into_iter()
            .find(|v| v.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TrackerError::UnknownView(s.to_string()))
    }
}
