//! Text renderers for each view. Pure: data in, `String` out.

use std::fmt::Write as _;

use crate::filings::FilingQuery;
use crate::models::{Filing, MetricCard, WatchlistItem};
use crate::navigation::{APP_TITLE, View};
use crate::portfolio::PortfolioView;
use crate::theme::{Palette, Theme};
use crate::utils::{
    fit, fmt_currency, fmt_date_long, fmt_date_short, fmt_number, fmt_price, fmt_signed,
    fmt_signed_pct, fmt_volume,
};

pub const NO_FILINGS: &str = "No filings match the current filters.";
pub const NO_STOCKS: &str = "No stocks found matching your search.";

const RULE: &str = "─────────────────────────────────────────────────────────────────────────────";
const BAR_WIDTH: f64 = 30.0;

fn heading(out: &mut String, p: &Palette, title: &str, subtitle: &str) {
    let _ = writeln!(out, "{}", p.paint(p.bold, title));
    let _ = writeln!(out, "{}", p.paint(p.muted, subtitle));
    let _ = writeln!(out, "{}", RULE);
}

// ── Navigation ────────────────────────────────────────────────────────────────

pub fn render_header(active: View, theme: Theme, p: &Palette) -> String {
    let tabs: Vec<String> = View::ALL
        .iter()
        .map(|v| {
            let label = match v.badge() {
                Some(badge) => format!("{} ({})", v.label(), badge),
                None => v.label().to_string(),
            };
            if *v == active {
                p.paint(p.accent, &format!("[{}]", label))
            } else {
                format!(" {} ", label)
            }
        })
        .collect();

    let mode = match theme {
        Theme::Dark => "☀ Light Mode",
        Theme::Light => "☾ Dark Mode",
    };

    format!(
        "{}  {}  {}\n",
        p.paint(p.bold, APP_TITLE),
        tabs.join(" "),
        p.paint(p.muted, mode)
    )
}

// ── Dashboard ─────────────────────────────────────────────────────────────────

pub fn render_dashboard(metrics: &[MetricCard], recent: &[Filing], p: &Palette) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        p,
        "SEC Filings Dashboard",
        "Track insider trading activity and portfolio performance",
    );

    for card in metrics {
        let _ = writeln!(
            out,
            "  {} {}  {} {}",
            fit(&card.title, 24),
            p.paint(p.bold, &fit(&card.value, 10)),
            p.paint(p.trend(card.trend), &card.change),
            p.paint(p.muted, "from last month"),
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", p.paint(p.bold, "Recent Form 4 Filings"));
    if recent.is_empty() {
        let _ = writeln!(out, "  {}", p.paint(p.muted, NO_FILINGS));
    }
    for f in recent {
        let _ = writeln!(
            out,
            "  {} {} {} {} shares @ {}  {}  {}",
            fit(&f.company, 22),
            p.paint(p.transaction(f.transaction_type), &fit(f.transaction_type.as_str(), 9)),
            fit(&f.insider, 16),
            fmt_number(f.shares as i64),
            fmt_price(f.price),
            p.paint(
                p.signed(f.shareholding_change),
                &fmt_signed_pct(f.shareholding_change, 2)
            ),
            p.paint(p.muted, &fmt_date_long(f.filing_date)),
        );
    }
    out
}

// ── Filings ───────────────────────────────────────────────────────────────────

pub fn render_filings(query: &FilingQuery, rows: &[Filing], p: &Palette) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        p,
        "Form 4 Filings Tracker",
        "Monitor insider trading activity across public companies",
    );

    let search = if query.search.is_empty() { "—" } else { query.search.as_str() };
    let _ = writeln!(
        out,
        "Search: {}   Type: {}   Sort: {}   {} filings found",
        search,
        query.filter,
        query.sort,
        rows.len()
    );
    let _ = writeln!(out);

    if rows.is_empty() {
        let _ = writeln!(out, "  {}", p.paint(p.muted, NO_FILINGS));
        return out;
    }

    let _ = writeln!(
        out,
        "{}",
        p.paint(
            p.muted,
            &format!(
                "{} {} {} {:>8} {:>9} {:>12} {:>8}  {}",
                fit("Company", 24),
                fit("Insider", 18),
                fit("Type", 9),
                "Shares",
                "Price",
                "Total Value",
                "Holdings",
                "Filed"
            )
        )
    );
    for f in rows {
        let _ = writeln!(
            out,
            "{} {} {} {:>8} {:>9} {:>12} {}  {}",
            fit(&format!("{} ({})", f.company, f.ticker), 24),
            fit(&f.insider, 18),
            p.paint(p.transaction(f.transaction_type), &fit(f.transaction_type.as_str(), 9)),
            fmt_number(f.shares as i64),
            fmt_price(f.price),
            fmt_currency(f.total_value),
            p.paint(
                p.signed(f.shareholding_change),
                &format!("{:>8}", fmt_signed_pct(f.shareholding_change, 2))
            ),
            fmt_date_long(f.filing_date),
        );
    }
    out
}

// ── Portfolio ─────────────────────────────────────────────────────────────────

pub fn render_portfolio(view: &PortfolioView, p: &Palette) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        p,
        "Portfolio Performance",
        "Track your investment returns and allocation",
    );
    let _ = writeln!(out, "Range: {}", view.range);
    let _ = writeln!(out);

    match view.summary() {
        Some(s) => {
            let verdict = if s.vs_benchmark_pct >= 0.0 {
                "Outperforming"
            } else {
                "Underperforming"
            };
            let rows = [
                (
                    "Total Value",
                    fmt_currency(s.total_value),
                    fmt_signed_pct(s.total_return_pct, 1),
                    s.total_return_pct,
                ),
                (
                    "Total Return",
                    signed_currency(s.total_return),
                    fmt_signed_pct(s.total_return_pct, 1),
                    s.total_return,
                ),
                (
                    "Latest Change",
                    signed_currency(s.last_change),
                    fmt_signed_pct(s.last_change_pct, 1),
                    s.last_change,
                ),
                (
                    "vs S&P 500",
                    fmt_signed_pct(s.vs_benchmark_pct, 1),
                    verdict.to_string(),
                    s.vs_benchmark_pct,
                ),
            ];
            for (label, value, change, sign) in rows {
                let _ = writeln!(
                    out,
                    "  {} {} {}",
                    fit(label, 14),
                    p.paint(p.bold, &fit(&value, 12)),
                    p.paint(p.signed(sign), &change)
                );
            }
        }
        None => {
            let _ = writeln!(out, "  {}", p.paint(p.muted, "No performance data in range."));
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", p.paint(p.bold, "Portfolio Value Over Time"));
    for s in view.visible_samples() {
        let _ = writeln!(
            out,
            "  {}  {:>10}  {}",
            fit(&fmt_date_short(s.date), 7),
            fmt_currency(s.value),
            p.paint(p.muted, &format!("S&P 500 {}", fmt_currency(s.benchmark)))
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", p.paint(p.bold, "Asset Allocation"));
    for slice in &view.allocation {
        let width = (slice.percent / 100.0 * BAR_WIDTH).round() as usize;
        let _ = writeln!(
            out,
            "  {} {:>3}%  {} {}",
            fit(&slice.name, 12),
            slice.percent,
            p.paint(p.accent, &"█".repeat(width)),
            p.paint(p.muted, &slice.color)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", p.paint(p.bold, "Top Holdings"));
    for (rank, h) in view.holdings.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} {} {:>10} {:>5.1}%  {}",
            rank + 1,
            fit(&h.symbol, 6),
            fit(&h.name, 16),
            fmt_currency(h.value),
            h.weight,
            p.paint(p.signed(h.change), &fmt_signed_pct(h.change, 1))
        );
    }
    out
}

fn signed_currency(amount: f64) -> String {
    if amount >= 0.0 {
        format!("+{}", fmt_currency(amount))
    } else {
        fmt_currency(amount)
    }
}

// ── Watchlist ─────────────────────────────────────────────────────────────────

pub fn render_watchlist(
    search: &str,
    items: &[WatchlistItem],
    total: usize,
    p: &Palette,
) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        p,
        "Watchlist",
        "Monitor your favorite stocks and track insider activity",
    );
    if !search.is_empty() {
        let _ = writeln!(out, "Search: {}   {} of {} stocks", search, items.len(), total);
    } else {
        let _ = writeln!(out, "{} stocks", total);
    }
    let _ = writeln!(out);

    if items.is_empty() {
        let _ = writeln!(out, "  {}", p.paint(p.muted, NO_STOCKS));
        return out;
    }

    for item in items {
        let star = if item.starred {
            p.paint(p.exercise, "★")
        } else {
            p.paint(p.muted, "☆")
        };
        let change = format!(
            "{} ({})",
            fmt_signed(item.change),
            fmt_signed_pct(item.change_percent, 2)
        );
        let bell = if item.alerts { "🔔 on " } else { "🔕 off" };
        let _ = writeln!(
            out,
            "{} {} {} {} {:>9} {} {:>8}  {}  {}  {}",
            star,
            p.paint(p.bold, &fit(&item.symbol, 6)),
            fit(&item.market_cap, 6),
            fit(&item.company, 22),
            fmt_price(item.current_price),
            p.paint(p.signed(item.change), &format!("{:>16}", change)),
            fmt_volume(item.volume),
            fit(&item.last_filing, 17),
            bell,
            p.paint(p.muted, &format!("id {}", item.id)),
        );
    }
    out
}
