//! Persistent settings (title database locations, config file location).
//!
//! The settings file is `~/.config/psiso-tool/settings.toml`:
//!
//! ```toml
//! [database]
//! ps1 = "/games/db/ps1titles_us_eu_jp.txt"
//! ps2 = "/games/db/ps2titleid.txt"
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Platform;

/// Canonical path to the settings file: `~/.config/psiso-tool/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("psiso-tool").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,
}

/// Title database file per platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub ps1: Option<PathBuf>,
    pub ps2: Option<PathBuf>,
}

impl DatabaseSettings {
    pub fn get(&self, platform: Platform) -> Option<&Path> {
        match platform {
            Platform::Ps1 => self.ps1.as_deref(),
            Platform::Ps2 => self.ps2.as_deref(),
            Platform::Ps3 | Platform::Psp => None,
        }
    }
}

/// Database file name looked up under the working directory when nothing
/// else is configured.
pub fn default_title_db(platform: Platform) -> Option<&'static str> {
    match platform {
        Platform::Ps1 => Some("db/ps1titles_us_eu_jp.txt"),
        Platform::Ps2 => Some("db/ps2titleid.txt"),
        Platform::Ps3 | Platform::Psp => None,
    }
}

/// Load the settings file, falling back to defaults when it is missing or
/// unreadable.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

pub fn load_settings_from(path: &Path) -> Settings {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Settings::default(),
    };
    match toml::from_str(&contents) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring malformed settings file {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

/// Resolve the title database for a platform using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. `database.<platform>` in `settings.toml`
/// 3. The default file name under the current working directory
///
/// Returns `None` for platforms that do not use a title database.
pub fn resolve_title_db(platform: Platform, cli_override: Option<PathBuf>) -> Option<PathBuf> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_title_db_with(platform, cli_override, &load_settings(), &cwd)
}

pub fn resolve_title_db_with(
    platform: Platform,
    cli_override: Option<PathBuf>,
    settings: &Settings,
    cwd: &Path,
) -> Option<PathBuf> {
    let default = default_title_db(platform)?;
    if let Some(p) = cli_override {
        return Some(p);
    }
    if let Some(p) = settings.database.get(platform) {
        return Some(p.to_path_buf());
    }
    Some(cwd.join(default))
}

/// Save (or clear) the title database path for a platform in `settings.toml`.
pub fn save_title_db(platform: Platform, db: Option<&Path>) -> io::Result<()> {
    save_title_db_to(&settings_path(), platform, db)
}

/// Uses `toml::Value` for a surgical update so unrelated fields are preserved.
pub fn save_title_db_to(settings: &Path, platform: Platform, db: Option<&Path>) -> io::Result<()> {
    if default_title_db(platform).is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} does not use a title database", platform),
        ));
    }

    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    // Ensure [database] table exists
    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let database = table
        .entry("database")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let db_table = database
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[database] is not a table"))?;

    match db {
        Some(p) => {
            db_table.insert(
                platform.short_name().to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            db_table.remove(platform.short_name());
        }
    }

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
