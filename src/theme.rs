//! The theme preference store.
//!
//! One process-wide store owns the user's `light`/`dark`/`system` choice, persists it
//! under a single key, and tells subscribers which appearance is in effect. While the
//! choice is `system`, changes to the system appearance are forwarded as well.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Storage key holding the persisted choice.
pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// What the user asked for.
pub enum ThemeChoice {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    #[default]
    /// Follow the system appearance.
    System,
}

impl ThemeChoice {
    #[must_use]
    /// Parses a stored value; anything unrecognised means "follow the system".
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            Some("dark") => Self::Dark,
            _ => Self::System,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The appearance actually applied.
pub enum Appearance {
    /// Light colours.
    Light,
    /// Dark colours.
    Dark,
}

impl Appearance {
    #[must_use]
    /// The other appearance.
    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Client-local key/value persistence.
pub trait Storage {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;
    /// Writes `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Default, Debug)]
/// Storage that lives only as long as the process.
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug)]
/// Storage persisted as a flat JSON object in one file.
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStorage {
    #[must_use]
    /// Opens the file at `path`; a missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|text| match serde_json::from_str(&text) {
                Ok(values) => Some(values),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "ignoring corrupt preferences: {e}");
                    None
                }
            })
            .unwrap_or_default();
        Self { path, values }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Handle returned by [`PreferenceStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(usize);

type Listener = Box<dyn FnMut(Appearance)>;

/// Owns the theme choice and notifies subscribers of the resulting appearance.
pub struct PreferenceStore {
    storage: Box<dyn Storage>,
    choice: ThemeChoice,
    system_dark: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: usize,
}

impl PreferenceStore {
    #[must_use]
    /// Reads the stored choice from `storage`.
    pub fn new(storage: Box<dyn Storage>, system_dark: bool) -> Self {
        let choice = ThemeChoice::from_stored(storage.get(THEME_KEY).as_deref());
        tracing::debug!(?choice, system_dark, "theme preference loaded");
        Self {
            storage,
            choice,
            system_dark,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    #[must_use]
    /// The user's choice.
    pub fn get(&self) -> ThemeChoice {
        self.choice
    }

    #[must_use]
    /// The appearance in effect given the choice and the system setting.
    pub fn appearance(&self) -> Appearance {
        match self.choice {
            ThemeChoice::Light => Appearance::Light,
            ThemeChoice::Dark => Appearance::Dark,
            ThemeChoice::System if self.system_dark => Appearance::Dark,
            ThemeChoice::System => Appearance::Light,
        }
    }

    /// Stores `choice` and notifies subscribers.
    ///
    /// `System` is kept in memory only; the key is written for explicit choices.
    ///
    /// # Errors
    ///
    /// Returns an error if the choice cannot be persisted. The in-memory choice is
    /// updated regardless.
    pub fn set(&mut self, choice: ThemeChoice) -> Result<()> {
        self.choice = choice;
        self.notify();
        match choice {
            ThemeChoice::Light => self.storage.set(THEME_KEY, "light"),
            ThemeChoice::Dark => self.storage.set(THEME_KEY, "dark"),
            ThemeChoice::System => Ok(()),
        }
    }

    /// Flips the appearance: from `system` to the opposite of the system, else light/dark.
    ///
    /// # Errors
    ///
    /// Returns an error if the new choice cannot be persisted.
    pub fn toggle(&mut self) -> Result<ThemeChoice> {
        let next = match self.choice {
            ThemeChoice::System if self.system_dark => ThemeChoice::Light,
            ThemeChoice::System | ThemeChoice::Light => ThemeChoice::Dark,
            ThemeChoice::Dark => ThemeChoice::Light,
        };
        self.set(next)?;
        Ok(next)
    }

    /// Records a system appearance change; subscribers hear about it only in `system` mode.
    pub fn set_system_dark(&mut self, dark: bool) {
        if self.system_dark == dark {
            return;
        }
        self.system_dark = dark;
        if self.choice == ThemeChoice::System {
            self.notify();
        }
    }

    /// Registers `listener` for appearance changes.
    pub fn subscribe(&mut self, listener: impl FnMut(Appearance) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let appearance = self.appearance();
        for (_, listener) in &mut self.listeners {
            listener(appearance);
        }
    }
}

/// Guesses whether the terminal uses a dark background from `COLORFGBG`.
///
/// The variable holds `fg;bg` colour indices; backgrounds 0-6 and 8 are dark.
/// Without it the system is assumed dark.
#[must_use]
pub fn system_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| value.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()))
        .is_none_or(|bg| matches!(bg, 0..=6 | 8))
}

#[cfg(test)]
#[path = "tests/theme.rs"]
mod tests;
