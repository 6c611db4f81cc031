//! Theme selection and persistence.
//!
//! The display theme is a single `{dark, light}` preference. Resolution order
//! at startup: a stored preference wins, then the OS-level setting, then
//! light. The stored value lives behind the [`ThemeStore`] capability so the
//! controller can be exercised without a real filesystem.
//!
//! # Example
//!
//! ```ignore
//! use backdrop::theme::{FileThemeStore, Theme, ThemeController};
//!
//! let store = FileThemeStore::new(FileThemeStore::default_path());
//! let mut themes = ThemeController::new(Box::new(store), os_prefers_dark);
//!
//! // On the toggle key:
//! let now = themes.toggle()?;
//! window.set_title(&themes.window_title("backdrop"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// The two display themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Stable string form, used as the persisted value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parse a persisted value. Anything unrecognized reads as `None`,
    /// the same as no stored preference at all.
    pub fn parse(s: &str) -> Option<Theme> {
        match s.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    /// The other theme.
    pub fn flipped(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Accessible label for the toggle control.
    pub fn action_label(&self) -> &'static str {
        match self {
            Theme::Dark => "Toggle dark mode",
            Theme::Light => "Toggle light mode",
        }
    }

    /// Icon glyph for the toggle control.
    pub fn glyph(&self) -> char {
        match self {
            Theme::Dark => '\u{263e}',  // last-quarter moon
            Theme::Light => '\u{2600}', // sun
        }
    }
}

/// Pick the theme to start with.
///
/// A stored preference always wins; without one the OS setting decides, and
/// an unknown OS setting falls back to light.
pub fn resolve_initial_theme(stored: Option<Theme>, os_prefers_dark: bool) -> Theme {
    if let Some(theme) = stored {
        return theme;
    }
    if os_prefers_dark {
        return Theme::Dark;
    }
    Theme::Light
}

/// Persistence capability for the theme preference: one string value.
pub trait ThemeStore {
    /// Read the stored preference. Missing or unreadable values are `None`.
    fn load(&self) -> Option<Theme>;

    /// Persist the preference synchronously.
    fn save(&mut self, theme: Theme) -> Result<(), StorageError>;
}

/// File-backed [`ThemeStore`]: the preference is the file's entire content.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default preference location: `$BACKDROP_THEME` if set, else
    /// `$HOME/.config/backdrop/theme`, else `.backdrop-theme` in the
    /// working directory.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("BACKDROP_THEME") {
            return PathBuf::from(path);
        }
        if let Ok(home) = std::env::var("HOME") {
            return Path::new(&home).join(".config").join("backdrop").join("theme");
        }
        PathBuf::from(".backdrop-theme")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Option<Theme> {
        let raw = fs::read_to_string(&self.path).ok()?;
        Theme::parse(&raw)
    }

    fn save(&mut self, theme: Theme) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        fs::write(&self.path, theme.as_str()).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory [`ThemeStore`] for tests and headless use.
#[derive(Debug, Default, Clone)]
pub struct MemoryThemeStore {
    value: Option<Theme>,
}

impl MemoryThemeStore {
    pub fn new(value: Option<Theme>) -> Self {
        Self { value }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Option<Theme> {
        self.value
    }

    fn save(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.value = Some(theme);
        Ok(())
    }
}

/// Owns the current theme and its persistence.
///
/// Renderers never read theme state globally; they take a palette derived
/// from [`ThemeController::current`] each frame.
pub struct ThemeController {
    store: Box<dyn ThemeStore>,
    current: Theme,
}

impl ThemeController {
    /// Resolve the initial theme from the store and the OS preference.
    pub fn new(store: Box<dyn ThemeStore>, os_prefers_dark: bool) -> Self {
        let current = resolve_initial_theme(store.load(), os_prefers_dark);
        log::info!("theme resolved to {}", current.as_str());
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist the new value.
    pub fn toggle(&mut self) -> Result<Theme, StorageError> {
        let next = self.current.flipped();
        self.store.save(next)?;
        self.current = next;
        log::info!("theme toggled to {}", next.as_str());
        Ok(next)
    }

    /// Window title carrying the toggle control's label and glyph.
    pub fn window_title(&self, app_name: &str) -> String {
        format!(
            "{} {} - press T: {}",
            app_name,
            self.current.glyph(),
            self.current.action_label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_preference_wins_over_os() {
        assert_eq!(resolve_initial_theme(Some(Theme::Dark), false), Theme::Dark);
        assert_eq!(resolve_initial_theme(Some(Theme::Light), true), Theme::Light);
    }

    #[test]
    fn os_preference_used_without_stored_value() {
        assert_eq!(resolve_initial_theme(None, true), Theme::Dark);
        assert_eq!(resolve_initial_theme(None, false), Theme::Light);
    }

    #[test]
    fn toggle_flips_and_persists_both_ways() {
        let mut controller = ThemeController::new(Box::new(MemoryThemeStore::default()), false);
        assert_eq!(controller.current(), Theme::Light);

        let dark = controller.toggle().unwrap();
        assert_eq!(dark, Theme::Dark);

        // A fresh controller over the same stored value picks it up.
        let store = MemoryThemeStore::new(Some(Theme::Dark));
        let restored = ThemeController::new(Box::new(store), false);
        assert_eq!(restored.current(), Theme::Dark);

        let light = controller.toggle().unwrap();
        assert_eq!(light, Theme::Light);
        assert_eq!(controller.current(), Theme::Light);
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse(" light\n"), Some(Theme::Light));
        assert_eq!(Theme::parse("solarized"), None);
        assert_eq!(Theme::parse(""), None);
    }

    #[test]
    fn file_store_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "backdrop-theme-test-{}",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let mut store = FileThemeStore::new(&path);
        assert_eq!(store.load(), None);

        store.save(Theme::Dark).unwrap();
        assert_eq!(store.load(), Some(Theme::Dark));

        fs::write(&path, "garbage").unwrap();
        assert_eq!(store.load(), None);

        let _ = fs::remove_file(&path);
    }
}
