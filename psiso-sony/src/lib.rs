//! Sony disc image inspection.
//!
//! This crate extracts title ids and titles from disc images for:
//!
//! - PlayStation (PS1/PSX)
//! - PlayStation 2 (PS2)
//! - PlayStation 3 (PS3), including the optional disc header patch
//! - PlayStation Portable (PSP)
//!
//! [`inspector::inspect`] does the work for every platform; the analyzers
//! wrap it behind [`psiso_core::DiscAnalyzer`].

use std::sync::Arc;

use psiso_core::{DiscAnalyzer, Platform, TitleLookup};

pub mod codec;
pub mod disc;
pub mod inspector;
pub mod ps1;
pub mod ps2;
pub mod ps3;
pub mod ps3_patch;
pub mod psp;
pub mod record;
pub mod sfo;
pub mod title_db;
pub mod title_id;

pub use inspector::{inspect, inspect_file};
pub use ps1::Ps1Analyzer;
pub use ps2::Ps2Analyzer;
pub use ps3::Ps3Analyzer;
pub use psp::PspAnalyzer;
pub use sfo::{SfoError, SfoTable};
pub use title_db::TitleDatabase;

/// Build the analyzer for `platform`. `titles` is only used by platforms
/// whose discs do not carry their own title.
pub fn analyzer_for(
    platform: Platform,
    titles: Option<Arc<dyn TitleLookup>>,
) -> Box<dyn DiscAnalyzer> {
    match (platform, titles) {
        (Platform::Ps1, Some(t)) => Box::new(Ps1Analyzer::with_titles(t)),
        (Platform::Ps1, None) => Box::new(Ps1Analyzer::new()),
        (Platform::Ps2, Some(t)) => Box::new(Ps2Analyzer::with_titles(t)),
        (Platform::Ps2, None) => Box::new(Ps2Analyzer::new()),
        (Platform::Ps3, _) => Box::new(Ps3Analyzer::new()),
        (Platform::Psp, _) => Box::new(PspAnalyzer::new()),
    }
}

/// One analyzer per supported platform, without title databases.
pub fn all_analyzers() -> Vec<Box<dyn DiscAnalyzer>> {
    Platform::all()
        .iter()
        .map(|&p| analyzer_for(p, None))
        .collect()
}

#[cfg(test)]
#[path = "tests/image_builder.rs"]
mod test_image;
