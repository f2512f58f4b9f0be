//! PlayStation disc analyzer.
//!
//! Supports:
//! - ISO images (2048-byte sectors)
//! - Raw BIN/IMG images (2352-byte Mode 2 Form 1 sectors)
//!
//! The title id comes from the `BOOT = cdrom:\` line of `SYSTEM.CNF`; the
//! title is looked up in a title database.

use std::sync::Arc;

use psiso_core::{
    DiscAnalyzer, ImageStream, InspectError, InspectOptions, Platform, ReadSeek, TitleLookup,
    TitleRecord,
};

use crate::{disc, inspector};

/// Analyzer for PlayStation disc images.
#[derive(Default)]
pub struct Ps1Analyzer {
    titles: Option<Arc<dyn TitleLookup>>,
}

impl Ps1Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `titles` to resolve title ids to display titles.
    pub fn with_titles(titles: Arc<dyn TitleLookup>) -> Self {
        Self {
            titles: Some(titles),
        }
    }
}

impl DiscAnalyzer for Ps1Analyzer {
    fn inspect(
        &self,
        image: &mut dyn ImageStream,
        options: &InspectOptions,
    ) -> Result<TitleRecord, InspectError> {
        inspector::inspect(image, Platform::Ps1, options, self.titles.as_deref())
    }

    fn platform(&self) -> Platform {
        Platform::Ps1
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["bin", "iso", "img"]
    }

    fn can_handle(&self, reader: &mut dyn ReadSeek) -> bool {
        matches!(disc::detect_geometry(reader, Platform::Ps1), Ok(Some(_)))
    }
}

#[cfg(test)]
#[path = "tests/ps1_tests.rs"]
mod tests;
