//! Root application state and the interactive shell loop.
//!
//! `App` owns the active view, the theme settings and each view's private
//! state. Every shell line is parsed into a [`Command`], handled to
//! completion, then the active view is rendered again.

use crate::config::AppConfig;
use crate::error::TrackerError;
use crate::filings::{FilingsView, SortKey, TransactionFilter, export};
use crate::models::MetricCard;
use crate::navigation::View;
use crate::portfolio::{PortfolioView, TimeRange};
use crate::render;
use crate::source::DataSource;
use crate::theme::{Palette, Theme, ThemeSettings};
use crate::watchlist::Watchlist;
use anyhow::Result;
use chrono::Utc;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

pub const HELP: &str = "\
Commands:
  view <name>        switch to dashboard | filings | portfolio | watchlist
  <name>             same as `view <name>`
  theme [dark|light] toggle light/dark mode, or pick one
  search <text>      search the filings or watchlist view (empty clears)
  clear              reset search, type filter and sort
  type <kind>        filings: all | purchase | sale | grant | exercise
  sort <key>         filings: filing-date | transaction-date | value | shares | company
  export             write the visible filings to CSV
  range <range>      portfolio: 1W | 1M | 3M | 6M | 1Y | ALL
  add <symbol>       add a symbol to the watchlist
  remove <id>        remove a watchlist entry
  star <id>          toggle the star on a watchlist entry
  alert <id>         toggle alerts on a watchlist entry
  help               show this list
  quit               leave the shell";

// ── Commands ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show(View),
    ToggleTheme,
    SetTheme(Theme),
    Search(String),
    Clear,
    Type(TransactionFilter),
    Sort(SortKey),
    Export,
    Range(TimeRange),
    Add(String),
    Remove(String),
    Star(String),
    Alert(String),
    Help,
    Quit,
}

fn required(command: &str, arg: &str, usage: &'static str) -> Result<String, TrackerError> {
    if arg.is_empty() {
        Err(TrackerError::MissingArgument {
            command: command.to_string(),
            usage,
        })
    } else {
        Ok(arg.to_string())
    }
}

impl Command {
    /// Parse one shell line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, TrackerError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (head, arg) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let cmd = match head.to_lowercase().as_str() {
            "view" | "go" => Command::Show(required(head, arg, "view <name>")?.parse()?),
            "theme" => match arg.to_lowercase().as_str() {
                "" | "toggle" => Command::ToggleTheme,
                "dark" => Command::SetTheme(Theme::Dark),
                "light" => Command::SetTheme(Theme::Light),
                _ => return Err(TrackerError::UnknownCommand(line.to_string())),
            },
            "search" | "find" => Command::Search(arg.to_string()),
            "clear" => Command::Clear,
            "type" => Command::Type(required(head, arg, "type <kind>")?.parse()?),
            "sort" => Command::Sort(required(head, arg, "sort <key>")?.parse()?),
            "export" => Command::Export,
            "range" => Command::Range(required(head, arg, "range <range>")?.parse()?),
            "add" => Command::Add(arg.to_string()),
            "remove" | "rm" => Command::Remove(required(head, arg, "remove <id>")?),
            "star" => Command::Star(required(head, arg, "star <id>")?),
            "alert" => Command::Alert(required(head, arg, "alert <id>")?),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => match other.parse::<View>() {
                Ok(view) if arg.is_empty() => Command::Show(view),
                _ => return Err(TrackerError::UnknownCommand(line.to_string())),
            },
        };
        Ok(Some(cmd))
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Render,
    Message(String),
    Quit,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App<'a> {
    pub view: View,
    theme: ThemeSettings<'a>,
    color: bool,
    pub filings: FilingsView,
    pub watchlist: Watchlist,
    pub watchlist_search: String,
    pub portfolio: PortfolioView,
    metrics: Vec<MetricCard>,
    recent_limit: usize,
    export_dir: PathBuf,
}

impl<'a> App<'a> {
    pub fn new(source: &dyn DataSource, theme: ThemeSettings<'a>, config: &AppConfig) -> Self {
        Self {
            view: View::default(),
            theme,
            color: config.display.color,
            filings: FilingsView::new(source.filings()),
            watchlist: Watchlist::new(source.watchlist()),
            watchlist_search: String::new(),
            portfolio: PortfolioView::new(
                source.performance(),
                source.allocation(),
                source.holdings(),
            ),
            metrics: source.dashboard_metrics(),
            recent_limit: config.display.recent_filings,
            export_dir: config.export.dir.clone(),
        }
    }

    pub fn theme_settings(&mut self) -> &mut ThemeSettings<'a> {
        &mut self.theme
    }

    pub fn palette(&self) -> Palette {
        if self.color {
            Palette::for_theme(self.theme.theme())
        } else {
            Palette::plain()
        }
    }

    /// Write the visible filings to the export dir, stamped with today's date.
    pub fn export(&self) -> Result<PathBuf> {
        let rows = self.filings.visible();
        export::write_export(&self.export_dir, Utc::now().date_naive(), &rows)
    }

    pub fn handle(&mut self, cmd: Command) -> Result<Flow> {
        debug!("command: {:?}", cmd);
        let flow = match cmd {
            Command::Show(view) => {
                self.view = view;
                Flow::Render
            }
            Command::ToggleTheme => {
                let theme = self.theme.toggle()?;
                Flow::Message(format!("Switched to {} mode.", theme))
            }
            Command::SetTheme(theme) => {
                self.theme.set(theme)?;
                Flow::Message(format!("Switched to {} mode.", theme))
            }
            Command::Search(text) => match self.view {
                View::Filings => {
                    self.filings.query.search = text;
                    Flow::Render
                }
                View::Watchlist => {
                    self.watchlist_search = text;
                    Flow::Render
                }
                View::Dashboard | View::Portfolio => Flow::Message(
                    "Search applies to the filings and watchlist views.".to_string(),
                ),
            },
            Command::Clear => {
                self.filings.query = Default::default();
                self.watchlist_search.clear();
                Flow::Render
            }
            Command::Type(filter) => {
                self.view = View::Filings;
                self.filings.query.filter = filter;
                Flow::Render
            }
            Command::Sort(key) => {
                self.view = View::Filings;
                self.filings.query.sort = key;
                Flow::Render
            }
            Command::Export => {
                let path = self.export()?;
                Flow::Message(format!("Exported to {}", path.display()))
            }
            Command::Range(range) => {
                self.view = View::Portfolio;
                self.portfolio.range = range;
                Flow::Render
            }
            Command::Add(symbol) => {
                self.view = View::Watchlist;
                match self.watchlist.add_symbol(&symbol) {
                    Some(id) => Flow::Message(format!(
                        "Added {} (id {}).",
                        symbol.trim().to_uppercase(),
                        id
                    )),
                    None => Flow::Render,
                }
            }
            Command::Remove(id) => {
                self.view = View::Watchlist;
                self.watchlist.remove(&id);
                Flow::Render
            }
            Command::Star(id) => {
                self.view = View::Watchlist;
                self.watchlist.toggle_star(&id);
                Flow::Render
            }
            Command::Alert(id) => {
                self.view = View::Watchlist;
                self.watchlist.toggle_alert(&id);
                Flow::Render
            }
            Command::Help => Flow::Message(HELP.to_string()),
            Command::Quit => Flow::Quit,
        };
        Ok(flow)
    }

    /// Header plus the active view.
    pub fn render(&self) -> String {
        let p = self.palette();
        let body = match self.view {
            View::Dashboard => render::render_dashboard(
                &self.metrics,
                &self.filings.most_recent(self.recent_limit),
                &p,
            ),
            View::Filings => {
                render::render_filings(&self.filings.query, &self.filings.visible(), &p)
            }
            View::Portfolio => render::render_portfolio(&self.portfolio, &p),
            View::Watchlist => render::render_watchlist(
                &self.watchlist_search,
                &self.watchlist.search(&self.watchlist_search),
                self.watchlist.items().len(),
                &p,
            ),
        };
        format!("{}\n{}", render::render_header(self.view, self.theme.theme(), &p), body)
    }
}

// ── Shell loop ────────────────────────────────────────────────────────────────

pub const PROMPT: &str = "sec-tracker> ";

/// Read commands from `input` until EOF or `quit`, rendering into `output`.
/// A failing command is reported and the session carries on; only errors on
/// `input` or `output` end it.
pub fn run_shell<R: BufRead, W: Write>(app: &mut App<'_>, input: R, mut output: W) -> Result<()> {
    writeln!(output, "{}", app.render())?;
    write!(output, "{}", PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match Command::parse(&line) {
            Ok(None) => {}
            Ok(Some(cmd)) => match app.handle(cmd) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Render) => writeln!(output, "{}", app.render())?,
                Ok(Flow::Message(msg)) => {
                    writeln!(output, "{}\n", msg)?;
                    writeln!(output, "{}", app.render())?;
                }
                Err(e) => {
                    warn!("Command failed: {:#}", e);
                    writeln!(output, "{:#}", e)?;
                }
            },
            Err(e) => {
                warn!("{}", e);
                writeln!(output, "{}", e)?;
            }
        }
        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }
    Ok(())
}
