//! Light/dark preference and the terminal palette each one maps to.

use crate::models::{TransactionType, Trend};
use crate::storage::PreferenceStore;
use anyhow::Result;
use std::fmt;
use tracing::{info, warn};

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Resolve the startup theme: a stored "dark" wins, any other non-empty
    /// stored value means light, and an absent or empty value falls back to
    /// the hint.
    pub fn resolve(stored: Option<&str>, prefers_dark: bool) -> Self {
        match stored {
            Some("dark") => Theme::Dark,
            Some("light") => Theme::Light,
            Some(other) if !other.is_empty() => {
                warn!("Unrecognised stored theme {:?}, using light", other);
                Theme::Light
            }
            _ if prefers_dark => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The theme plus the store it is written back to.
pub struct ThemeSettings<'a> {
    theme: Theme,
    store: &'a dyn PreferenceStore,
}

impl<'a> ThemeSettings<'a> {
    pub fn init(store: &'a dyn PreferenceStore, prefers_dark: bool) -> Result<Self> {
        let stored = store.get(THEME_KEY)?;
        let theme = Theme::resolve(stored.as_deref(), prefers_dark);
        info!("Theme: {} (stored: {:?})", theme, stored);
        Ok(Self { theme, store })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set(&mut self, theme: Theme) -> Result<Theme> {
        self.store.set(THEME_KEY, theme.as_str())?;
        self.theme = theme;
        Ok(theme)
    }

    pub fn toggle(&mut self) -> Result<Theme> {
        self.set(self.theme.toggled())
    }
}

// ── Palette ───────────────────────────────────────────────────────────────────

/// ANSI styles used by the renderers. `plain()` emits no escape codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub positive: &'static str,
    pub negative: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub purchase: &'static str,
    pub sale: &'static str,
    pub grant: &'static str,
    pub exercise: &'static str,
    pub bold: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn plain() -> Self {
        Self {
            positive: "",
            negative: "",
            muted: "",
            accent: "",
            purchase: "",
            sale: "",
            grant: "",
            exercise: "",
            bold: "",
            reset: "",
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            // bright variants read better on dark terminals
            Theme::Dark => Self {
                positive: "\x1b[92m",
                negative: "\x1b[91m",
                muted: "\x1b[90m",
                accent: "\x1b[94m",
                purchase: "\x1b[92m",
                sale: "\x1b[91m",
                grant: "\x1b[94m",
                exercise: "\x1b[93m",
                bold: "\x1b[1m",
                reset: "\x1b[0m",
            },
            Theme::Light => Self {
                positive: "\x1b[32m",
                negative: "\x1b[31m",
                muted: "\x1b[2m",
                accent: "\x1b[34m",
                purchase: "\x1b[32m",
                sale: "\x1b[31m",
                grant: "\x1b[34m",
                exercise: "\x1b[33m",
                bold: "\x1b[1m",
                reset: "\x1b[0m",
            },
        }
    }

    pub fn paint(&self, style: &str, text: &str) -> String {
        if style.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", style, text, self.reset)
        }
    }

    pub fn signed(&self, value: f64) -> &'static str {
        if value >= 0.0 { self.positive } else { self.negative }
    }

    pub fn trend(&self, trend: Trend) -> &'static str {
        match trend {
            Trend::Positive => self.positive,
            Trend::Negative => self.negative,
            Trend::Neutral => self.muted,
        }
    }

    pub fn transaction(&self, kind: TransactionType) -> &'static str {
        match kind {
            TransactionType::Purchase => self.purchase,
            TransactionType::Sale => self.sale,
            TransactionType::Grant => self.grant,
            TransactionType::Exercise => self.exercise,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_resolve_prefers_stored_value() {
        assert_eq!(Theme::resolve(Some("dark"), false), Theme::Dark);
        assert_eq!(Theme::resolve(Some("light"), true), Theme::Light);
        assert_eq!(Theme::resolve(Some("solarized"), true), Theme::Light);
    }

    #[test]
    fn test_resolve_falls_back_to_hint() {
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(None, false), Theme::Light);
    }

    #[test]
    fn test_resolve_empty_stored_value_uses_hint() {
        assert_eq!(Theme::resolve(Some(""), true), Theme::Dark);
        assert_eq!(Theme::resolve(Some(""), false), Theme::Light);

        let store = MemoryStore::default();
        store.set(THEME_KEY, "").unwrap();
        let settings = ThemeSettings::init(&store, true).unwrap();
        assert_eq!(settings.theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_writes_back() {
        let store = MemoryStore::default();
        let mut settings = ThemeSettings::init(&store, false).unwrap();
        assert_eq!(settings.theme(), Theme::Light);
        assert_eq!(store.get(THEME_KEY).unwrap(), None);

        assert_eq!(settings.toggle().unwrap(), Theme::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        assert_eq!(settings.toggle().unwrap(), Theme::Light);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_init_reads_store() {
        let store = MemoryStore::default();
        store.set(THEME_KEY, "dark").unwrap();
        let settings = ThemeSettings::init(&store, false).unwrap();
        assert_eq!(settings.theme(), Theme::Dark);
    }

    #[test]
    fn test_plain_palette_paints_nothing() {
        let p = Palette::plain();
        assert_eq!(p.paint(p.positive, "+1.20%"), "+1.20%");

        let dark = Palette::for_theme(Theme::Dark);
        assert_eq!(dark.paint(dark.negative, "x"), "\x1b[91mx\x1b[0m");
    }
}
