use std::collections::HashMap;
use std::io::{Read, Seek, Write};

pub mod disc;
pub mod error;
pub mod platform;
pub mod settings;
pub mod util;

pub use disc::{SectorGeometry, VolumeInfo};
pub use error::InspectError;
pub use platform::{Platform, PlatformParseError};

/// Options that control how a disc image is inspected.
#[derive(Debug, Clone, Default)]
pub struct InspectOptions {
    /// Rewrite the PS3 disc header if the image does not carry one yet.
    /// Ignored by every platform that does not support patching.
    pub patch: bool,
}

impl InspectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patch(mut self, patch: bool) -> Self {
        self.patch = patch;
        self
    }
}

/// Result of a PS3 header patch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Both header blocks were written.
    Patched,
    /// The image already starts its second sector with `PlayStation3`; nothing was written.
    AlreadyValid,
}

/// Information extracted from one disc image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleRecord {
    /// Normalized title identifier (e.g. "SLUS-00594", "BLUS30109", "ULUS-10041").
    /// Empty when the image did not yield one.
    pub title_id: String,

    /// Display title, transliterated to ASCII. Empty when unknown.
    pub title: String,

    /// Physical sector layout the volume descriptor was found in.
    pub geometry: Option<SectorGeometry>,

    /// Logical volume size in bytes (volume sectors * 2048).
    pub volume_bytes: u64,

    /// Set when a patch was requested on a platform that supports it.
    pub patch: Option<PatchOutcome>,
}

impl TitleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title_id(mut self, title_id: impl Into<String>) -> Self {
        self.title_id = title_id.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_volume(mut self, geometry: SectorGeometry, volume: &VolumeInfo) -> Self {
        self.geometry = Some(geometry);
        self.volume_bytes = volume.total_bytes();
        self
    }

    /// True when both the title id and the title were found.
    pub fn is_complete(&self) -> bool {
        !self.title_id.is_empty() && !self.title.is_empty()
    }
}

/// A reader that implements both Read and Seek.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// A seekable byte source that can also be written in place.
///
/// Files opened read-only still satisfy this bound; writes to them fail
/// with an I/O error, which only the patcher ever attempts.
pub trait ImageStream: Read + Write + Seek {}
impl<T: Read + Write + Seek> ImageStream for T {}

/// Title-id to display-title lookup used for platforms whose discs do not
/// carry their own title (PS1, PS2).
pub trait TitleLookup: Send + Sync {
    /// Look up a normalized title id. Returns `None` when unknown.
    fn lookup(&self, title_id: &str) -> Option<String>;
}

impl TitleLookup for HashMap<String, String> {
    fn lookup(&self, title_id: &str) -> Option<String> {
        self.get(title_id).cloned()
    }
}

/// Trait for extracting title information from a platform's disc images.
pub trait DiscAnalyzer: Send + Sync {
    /// Inspect an image and extract its title id and title.
    ///
    /// # Arguments
    /// * `image` - The open disc image; only written to when patching
    /// * `options` - Inspection options (patch request)
    ///
    /// # Returns
    /// * `Ok(TitleRecord)` - The image was recognized; fields may still be empty
    /// * `Err(InspectError)` - The image is unreadable, unsupported or corrupt
    fn inspect(
        &self,
        image: &mut dyn ImageStream,
        options: &InspectOptions,
    ) -> Result<TitleRecord, InspectError>;

    /// Returns the platform this analyzer handles.
    fn platform(&self) -> Platform;

    /// Returns the full name of the platform this analyzer handles.
    fn platform_name(&self) -> &'static str {
        self.platform().display_name()
    }

    /// Returns the short name used for CLI matching.
    fn short_name(&self) -> &'static str {
        self.platform().short_name()
    }

    /// Returns file extensions commonly associated with this platform.
    fn file_extensions(&self) -> &'static [&'static str];

    /// Quick check that the image carries an ISO9660 volume descriptor in a
    /// sector layout this platform uses.
    fn can_handle(&self, reader: &mut dyn ReadSeek) -> bool;

    /// Whether `InspectOptions::patch` has any effect for this platform.
    fn supports_patching(&self) -> bool {
        false
    }
}
