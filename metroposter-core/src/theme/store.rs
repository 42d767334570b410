use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::warn;

use crate::foundation::error::PosterResult;
use crate::theme::model::Theme;

/// A listed theme: identifier plus display metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeEntry {
    /// Identifier (file stem) used to request the theme.
    pub id: String,
    /// Display name; the identifier when the record carries no name.
    pub display_name: String,
    /// Optional free-text description.
    pub description: Option<String>,
}

/// Keyed theme storage over a directory of `<id>.json` palette records.
#[derive(Clone, Debug)]
pub struct ThemeStore {
    dir: PathBuf,
}

impl ThemeStore {
    /// Store reading from `dir`. The directory may not exist yet; resolution
    /// then always lands on the fallback theme and listing is empty.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the theme record for `id`, surfacing every failure mode.
    ///
    /// Exposed so the fallback path of [`ThemeStore::resolve`] stays testable
    /// on its own.
    pub fn try_load(&self, id: &str) -> PosterResult<Theme> {
        let path = self.dir.join(format!("{id}.json"));
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read theme file '{}'", path.display()))?;
        let theme: Theme = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse theme file '{}'", path.display()))?;
        Ok(theme)
    }

    /// Resolve `id` to a theme, substituting the embedded fallback on any
    /// failure. Never fails: a poster run must not abort over styling.
    pub fn resolve(&self, id: &str) -> Theme {
        match self.try_load(id) {
            Ok(theme) => theme,
            Err(err) => {
                warn!(theme = id, %err, "theme unavailable, using fallback palette");
                Theme::fallback()
            }
        }
    }

    /// List all readable theme records, sorted by identifier.
    ///
    /// Individually corrupt entries are skipped with a warning so one bad
    /// file cannot break discovery.
    pub fn list(&self) -> Vec<ThemeEntry> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut ids: Vec<String> = entries
            .flatten()
            .filter_map(|e| {
                let path = e.path();
                if path.extension().and_then(|s| s.to_str()) != Some("json") {
                    return None;
                }
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_owned)
            })
            .collect();
        ids.sort();

        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            match self.try_load(&id) {
                Ok(theme) => out.push(ThemeEntry {
                    display_name: theme.name.clone().unwrap_or_else(|| id.clone()),
                    description: theme.description.clone(),
                    id,
                }),
                Err(err) => {
                    warn!(theme = %id, %err, "skipping unreadable theme in listing");
                }
            }
        }
        out
    }
}
