mod app;
mod config;
mod error;
mod filings;
mod models;
mod navigation;
mod portfolio;
mod render;
mod search;
mod source;
mod storage;
mod theme;
mod utils;
mod watchlist;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::app::{run_shell, App};
use crate::config::AppConfig;
use crate::filings::{FilingQuery, SortKey, TransactionFilter};
use crate::navigation::View;
use crate::portfolio::TimeRange;
use crate::source::SeedData;
use crate::storage::{MemoryStore, PreferenceStore, Repository};
use crate::theme::{Theme, ThemeSettings};

#[derive(Parser)]
#[command(name = "sec-tracker", about = "SEC Form 4 insider-trading dashboard", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive session (default)
    Shell,

    /// Headline metrics and the most recent filings
    Dashboard,

    /// Search, filter, sort and export Form 4 filings
    Filings {
        /// Case-insensitive match on company, ticker or insider
        #[arg(short, long, default_value = "")]
        search: String,

        /// all | purchase | sale | grant | exercise
        #[arg(short = 't', long = "type", default_value = "all")]
        kind: TransactionFilter,

        /// filing-date | transaction-date | value | shares | company
        #[arg(long, default_value = "filing-date")]
        sort: SortKey,

        /// Write the result to sec-form4-filings-<date>.csv in the export dir
        #[arg(long)]
        export: bool,

        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Portfolio value, allocation and top holdings
    Portfolio {
        /// 1W | 1M | 3M | 6M | 1Y | ALL
        #[arg(short, long, default_value = "1M")]
        range: TimeRange,
    },

    /// Watchlist, optionally filtered
    Watchlist {
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show or change the stored light/dark preference
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
    Dark,
    Light,
}

fn open_store(config: &AppConfig) -> Result<Box<dyn PreferenceStore>> {
    if !config.storage.persist {
        info!("Preferences kept in memory (storage.persist = false)");
        return Ok(Box::new(MemoryStore::default()));
    }
    let repo = Repository::open(&config.storage.db_path)?;
    repo.run_migrations()?;
    Ok(Box::new(repo))
}

/// One-shot `filings`: apply the query, then print a table or JSON and
/// optionally export the same rows.
fn filings_report(
    app: &mut App<'_>,
    query: FilingQuery,
    export: bool,
    json: bool,
) -> Result<String> {
    app.view = View::Filings;
    app.filings.query = query;

    let mut out = if json {
        serde_json::to_string_pretty(&app.filings.visible())?
    } else {
        app.render()
    };
    if export {
        let path = app.export()?;
        out.push_str(&format!("\nExported to {}", path.display()));
    }
    Ok(out)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "sec_tracker=warn,warn",
        1 => "sec_tracker=info,warn",
        2 => "sec_tracker=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;
    let store = open_store(&config)?;
    let theme = ThemeSettings::init(store.as_ref(), config.theme.prefers_dark)?;
    let mut app = App::new(&SeedData, theme, &config);

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let stdin = std::io::stdin();
            run_shell(&mut app, stdin.lock(), std::io::stdout().lock())?;
        }

        Command::Dashboard => {
            app.view = View::Dashboard;
            println!("{}", app.render());
        }

        Command::Filings {
            search,
            kind,
            sort,
            export,
            json,
        } => {
            let query = FilingQuery {
                search,
                filter: kind,
                sort,
            };
            println!("{}", filings_report(&mut app, query, export, json)?);
        }

        Command::Portfolio { range } => {
            app.view = View::Portfolio;
            app.portfolio.range = range;
            println!("{}", app.render());
        }

        Command::Watchlist { search } => {
            app.view = View::Watchlist;
            app.watchlist_search = search;
            println!("{}", app.render());
        }

        Command::Theme { action } => {
            let settings = app.theme_settings();
            let theme = match action {
                ThemeAction::Show => settings.theme(),
                ThemeAction::Toggle => settings.toggle()?,
                ThemeAction::Dark => settings.set(Theme::Dark)?,
                ThemeAction::Light => settings.set(Theme::Light)?,
            };
            println!("{}", theme);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Filing, TransactionType};

    fn app<'a>(store: &'a MemoryStore, cfg: &AppConfig) -> App<'a> {
        let theme = ThemeSettings::init(store, false).unwrap();
        App::new(&SeedData, theme, cfg)
    }

    fn sales_query() -> FilingQuery {
        FilingQuery {
            search: "inc".to_string(),
            filter: "sale".parse().unwrap(),
            sort: SortKey::FilingDate,
        }
    }

    #[test]
    fn test_filings_json_output() {
        let store = MemoryStore::default();
        let cfg = AppConfig::default();
        let mut app = app(&store, &cfg);

        let out = filings_report(&mut app, sales_query(), false, true).unwrap();
        let rows: Vec<Filing> = serde_json::from_str(&out).unwrap();

        let tickers: Vec<_> = rows.iter().map(|f| f.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "TSLA"]);
        assert!(rows.iter().all(|f| f.transaction_type == TransactionType::Sale));
    }

    #[test]
    fn test_filings_table_with_export() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::default();
        let mut cfg = AppConfig::default();
        cfg.display.color = false;
        cfg.export.dir = dir.path().to_path_buf();
        let mut app = app(&store, &cfg);

        let out = filings_report(&mut app, sales_query(), true, false).unwrap();
        assert!(out.contains("2 filings found"));
        assert!(out.contains("Exported to"));

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
        let body = std::fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
        assert_eq!(body.lines().count(), 3);
    }
}
