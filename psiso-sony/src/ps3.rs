//! PlayStation 3 disc image analyzer.
//!
//! Reads `TITLE_ID` and `TITLE` from `PS3_GAME/PARAM.SFO`. Only 2048-byte
//! ISO images are recognized. With [`InspectOptions::patch`] set, images
//! missing the `PlayStation3` disc header get one written in place.

use psiso_core::{
    DiscAnalyzer, ImageStream, InspectError, InspectOptions, Platform, ReadSeek, TitleRecord,
};

use crate::{disc, inspector};

/// Analyzer for PlayStation 3 disc images.
#[derive(Debug, Default)]
pub struct Ps3Analyzer;

impl Ps3Analyzer {
    pub fn new() -> Self {
        Self
    }
}

impl DiscAnalyzer for Ps3Analyzer {
    fn inspect(
        &self,
        image: &mut dyn ImageStream,
        options: &InspectOptions,
    ) -> Result<TitleRecord, InspectError> {
        inspector::inspect(image, Platform::Ps3, options, None)
    }

    fn platform(&self) -> Platform {
        Platform::Ps3
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["iso"]
    }

    fn can_handle(&self, reader: &mut dyn ReadSeek) -> bool {
        matches!(disc::detect_geometry(reader, Platform::Ps3), Ok(Some(_)))
    }

    fn supports_patching(&self) -> bool {
        true
    }
}
