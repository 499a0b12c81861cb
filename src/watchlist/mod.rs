//! In-memory watchlist: search, flag toggles, add/remove.

use crate::models::WatchlistItem;
use crate::search::search;
use chrono::Utc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Alerts,
    Starred,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Watchlist {
    items: Vec<WatchlistItem>,
}

impl Watchlist {
    pub fn new(items: Vec<WatchlistItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[WatchlistItem] {
        &self.items
    }

    pub fn search(&self, query: &str) -> Vec<WatchlistItem> {
        search(&self.items, query)
    }

    /// Flip `flag` on the item with `id`. Returns the new value, or `None`
    /// when no item has that id (the list is left untouched).
    pub fn toggle(&mut self, id: &str, flag: Flag) -> Option<bool> {
        let item = self.items.iter_mut().find(|i| i.id == id)?;
        let slot = match flag {
            Flag::Alerts => &mut item.alerts,
            Flag::Starred => &mut item.starred,
        };
        *slot = !*slot;
        debug!("{}: {:?} -> {}", item.symbol, flag, *slot);
        Some(*slot)
    }

    pub fn toggle_alert(&mut self, id: &str) -> Option<bool> {
        self.toggle(id, Flag::Alerts)
    }

    pub fn toggle_star(&mut self, id: &str) -> Option<bool> {
        self.toggle(id, Flag::Starred)
    }

    /// Append a placeholder entry for `symbol`. Blank input is ignored.
    /// Returns the generated id.
    pub fn add_symbol(&mut self, symbol: &str) -> Option<String> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return None;
        }

        let id = self.next_id();
        let item = WatchlistItem::placeholder(id.clone(), symbol);
        info!("Watchlist: added {} (id {})", item.symbol, id);
        self.items.push(item);
        Some(id)
    }

    /// Remove the item with `id`. Returns the removed item, if any.
    pub fn remove(&mut self, id: &str) -> Option<WatchlistItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        let item = self.items.remove(pos);
        info!("Watchlist: removed {} (id {})", item.symbol, id);
        Some(item)
    }

    /// Millisecond timestamp, bumped past any id already in the list.
    fn next_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.items.iter().any(|i| i.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}
