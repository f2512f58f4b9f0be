//! PlayStation 2 disc analyzer.
//!
//! DVD titles ship as 2048-byte ISO images; CD titles may also be raw
//! 2352-byte dumps.
//!
//! The title id comes from the `BOOT2 = cdrom0:\` line of `SYSTEM.CNF`; the
//! title is looked up in a title database.

use std::sync::Arc;

use psiso_core::{
    DiscAnalyzer, ImageStream, InspectError, InspectOptions, Platform, ReadSeek, TitleLookup,
    TitleRecord,
};

use crate::{disc, inspector};

/// Analyzer for PlayStation 2 disc images.
#[derive(Default)]
pub struct Ps2Analyzer {
    titles: Option<Arc<dyn TitleLookup>>,
}

impl Ps2Analyzer {
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

impl DiscAnalyzer for Ps2Analyzer {
    fn inspect(
        &self,
        image: &mut dyn ImageStream,
        options: &InspectOptions,
    ) -> Result<TitleRecord, InspectError> {
        inspector::inspect(image, Platform::Ps2, options, self.titles.as_deref())
    }

    fn platform(&self) -> Platform {
        Platform::Ps2
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["iso", "bin", "img"]
    }

    fn can_handle(&self, reader: &mut dyn ReadSeek) -> bool {
        matches!(disc::detect_geometry(reader, Platform::Ps2), Ok(Some(_)))
    }
}

#[cfg(test)]
#[path = "tests/ps2_tests.rs"]
mod tests;
