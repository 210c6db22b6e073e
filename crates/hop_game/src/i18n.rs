//! Translation catalogs.
//!
//! One JSON file per locale, `<search_path>/<code>.json`, holding a single
//! object named after the locale:
//!
//! ```json
//! { "fr": { "new_game": "Nouvelle partie" } }
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("no catalog for locale '{locale}' at '{}'", .path.display())]
    NotFound { locale: String, path: PathBuf },
    #[error("failed to read catalog '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse catalog '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("catalog '{}' has no '{locale}' section", .path.display())]
    MissingSection { locale: String, path: PathBuf },
}

pub type Catalog = HashMap<String, String>;

/// Reads `<dir>/<locale>.json` and returns its `<locale>` section.
pub fn load_catalog(dir: &Path, locale: &str) -> Result<Catalog, I18nError> {
    let path = dir.join(format!("{locale}.json"));
    if !path.is_file() {
        return Err(I18nError::NotFound {
            locale: locale.to_string(),
            path,
        });
    }
    let raw = fs::read_to_string(&path).map_err(|source| I18nError::Read {
        path: path.clone(),
        source,
    })?;
    let mut sections: HashMap<String, Catalog> =
        serde_json::from_str(&raw).map_err(|source| I18nError::Parse {
            path: path.clone(),
            source,
        })?;
    sections
        .remove(locale)
        .ok_or_else(|| I18nError::MissingSection {
            locale: locale.to_string(),
            path,
        })
}

pub struct Localizer {
    search_path: PathBuf,
    locale: Option<String>,
    catalog: Catalog,
}

impl Localizer {
    pub fn new(search_path: impl Into<PathBuf>) -> Self {
        Self {
            search_path: search_path.into(),
            locale: None,
            catalog: Catalog::new(),
        }
    }

    pub fn set_search_path(&mut self, dir: impl Into<PathBuf>) {
        self.search_path = dir.into();
    }

    pub fn search_path(&self) -> &Path {
        &self.search_path
    }

    /// On failure the previous locale and catalog stay active.
    pub fn set_locale(&mut self, code: &str) -> Result<(), I18nError> {
        let catalog = load_catalog(&self.search_path, code)?;
        log::info!("Locale set to '{}' ({} keys)", code, catalog.len());
        self.locale = Some(code.to_string());
        self.catalog = catalog;
        Ok(())
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Unknown keys translate to themselves.
    pub fn translate(&self, key: &str) -> String {
        match self.catalog.get(key) {
            Some(text) => text.clone(),
            None => {
                log::warn!(
                    "Missing translation for '{}' in locale {:?}",
                    key,
                    self.locale
                );
                key.to_string()
            }
        }
    }
}
