use std::path::PathBuf;

use thiserror::Error;

use crate::Platform;

/// Errors that abort the inspection of a disc image.
///
/// Missing PARAM.SFO fields are not errors at this level; they leave the
/// corresponding `TitleRecord` field empty.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The image could not be opened
    #[error("Cannot open disc image {}: {source}", path.display())]
    CannotOpenSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither sector layout carries a `CD001` volume descriptor
    #[error("The {platform} disc image is not supported / valid")]
    UnsupportedGeometry { platform: Platform },

    /// A system file record is missing from the sector it must be in
    #[error("Couldn't find {record} entry on the specified sector; the {platform} image is corrupt or unsupported")]
    RequiredRecordMissing {
        record: &'static str,
        platform: Platform,
    },

    /// PARAM.SFO could not be read
    #[error("Invalid PARAM.SFO: {0}")]
    InvalidSfo(String),

    /// I/O error while reading or patching the image
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InspectError {
    pub fn cannot_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CannotOpenSource {
            path: path.into(),
            source,
        }
    }

    pub fn unsupported_geometry(platform: Platform) -> Self {
        Self::UnsupportedGeometry { platform }
    }

    pub fn required_record_missing(record: &'static str, platform: Platform) -> Self {
        Self::RequiredRecordMissing { record, platform }
    }

    pub fn invalid_sfo(msg: impl Into<String>) -> Self {
        Self::InvalidSfo(msg.into())
    }

    /// True for failures caused by the image's content rather than by I/O.
    pub fn is_corrupt_image(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedGeometry { .. } | Self::RequiredRecordMissing { .. } | Self::InvalidSfo(_)
        )
    }
}
