//! PlayStation Portable UMD image analyzer.

use psiso_core::{
    DiscAnalyzer, ImageStream, InspectError, InspectOptions, Platform, ReadSeek, TitleRecord,
};

use crate::{disc, inspector};

/// Analyzer for PSP UMD images. `DISC_ID` and `TITLE` come from
/// `PSP_GAME/PARAM.SFO`.
#[derive(Debug, Default)]
pub struct PspAnalyzer;

impl PspAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl DiscAnalyzer for PspAnalyzer {
    fn inspect(
        &self,
        image: &mut dyn ImageStream,
        options: &InspectOptions,
    ) -> Result<TitleRecord, InspectError> {
        inspector::inspect(image, Platform::Psp, options, None)
    }

    fn platform(&self) -> Platform {
        Platform::Psp
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["iso"]
    }

    fn can_handle(&self, reader: &mut dyn ReadSeek) -> bool {
        matches!(disc::detect_geometry(reader, Platform::Psp), Ok(Some(_)))
    }
}
