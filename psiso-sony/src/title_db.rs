//! Plain-text title databases for PS1 and PS2.
//!
//! One entry per line: the title id, a single space, then the title.
//!
//! ```text
//! // comment
//! SLUS-00594 Metal Gear Solid
//! SLUS20312 Grand Theft Auto III
//! ```

use std::collections::HashMap;
use std::io;
use std::path::Path;

use log::debug;
use psiso_core::TitleLookup;

/// Lines shorter than this cannot hold an id and a title.
const MIN_LINE_LEN: usize = 11;

/// Title id to title map loaded from a database file.
#[derive(Debug, Clone, Default)]
pub struct TitleDatabase {
    titles: HashMap<String, String>,
}

impl TitleDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a database file. Invalid UTF-8 is replaced rather than rejected.
    pub fn load(path: &Path) -> io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let db = Self::parse(&String::from_utf8_lossy(&bytes));
        debug!("Loaded {} titles from {}", db.len(), path.display());
        Ok(db)
    }

    /// Parse database text. Comment lines (`//`), short lines and lines
    /// without a space are skipped. The first entry for an id wins.
    pub fn parse(contents: &str) -> Self {
        let mut titles = HashMap::new();
        for line in contents.lines() {
            let line = line.trim_end_matches(['\r', '\n']);
            if line.starts_with("//") || line.len() < MIN_LINE_LEN {
                continue;
            }
            let Some((id, title)) = line.split_once(' ') else {
                continue;
            };
            titles
                .entry(id.to_string())
                .or_insert_with(|| title.to_string());
        }
        Self { titles }
    }

    pub fn get(&self, title_id: &str) -> Option<&str> {
        self.titles.get(title_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl TitleLookup for TitleDatabase {
    fn lookup(&self, title_id: &str) -> Option<String> {
        self.get(title_id).map(str::to_string)
    }
}

#[cfg(test)]
#[path = "tests/title_db_tests.rs"]
mod tests;
