//! Per-image inspection: locate the volume, find the platform's system
//! file and extract the title id and title.
//!
//! PS1/PS2 read the boot executable name from `SYSTEM.CNF` and look the
//! title up in a title database. PS3/PSP read both from
//! `PS3_GAME/PARAM.SFO` or `PSP_GAME/PARAM.SFO`.

use std::fs::OpenOptions;
use std::path::Path;

use log::{debug, warn};
use psiso_core::util::read_at;
use psiso_core::{ImageStream, InspectError, InspectOptions, Platform, TitleLookup, TitleRecord};

use crate::codec::transliterate_title;
use crate::disc::{self, DiscLayout};
use crate::ps3_patch;
use crate::record::find_entry;
use crate::sfo::{PARAM_SFO, SfoError, SfoTable};
use crate::title_id::{self, SYSTEM_CNF};

/// SYSTEM.CNF is a few lines of text; anything beyond this is not read.
const MAX_SYSTEM_CNF_LEN: usize = 64 * 1024;

/// Game data directory holding PARAM.SFO.
pub fn game_dir(platform: Platform) -> Option<&'static str> {
    match platform {
        Platform::Ps3 => Some("PS3_GAME"),
        Platform::Psp => Some("PSP_GAME"),
        Platform::Ps1 | Platform::Ps2 => None,
    }
}

/// PARAM.SFO key holding the title id.
pub fn title_id_key(platform: Platform) -> Option<&'static str> {
    match platform {
        Platform::Ps3 => Some("TITLE_ID"),
        Platform::Psp => Some("DISC_ID"),
        Platform::Ps1 | Platform::Ps2 => None,
    }
}

/// Open `path` and inspect it.
///
/// The file is opened read-write only when a PS3 patch is requested.
pub fn inspect_file(
    path: &Path,
    platform: Platform,
    options: &InspectOptions,
    titles: Option<&dyn TitleLookup>,
) -> Result<TitleRecord, InspectError> {
    let writable = options.patch && platform == Platform::Ps3;
    let mut file = OpenOptions::new()
        .read(true)
        .write(writable)
        .open(path)
        .map_err(|e| InspectError::cannot_open(path, e))?;
    debug!(
        "Opened {} ({})",
        path.display(),
        if writable { "read-write" } else { "read-only" }
    );
    inspect(&mut file, platform, options, titles)
}

/// Inspect an open image.
///
/// `titles` is consulted for PS1/PS2 only. Missing fields leave the
/// corresponding record field empty; only I/O failures and images that are
/// not recognizable as the platform's discs are errors.
pub fn inspect<S: ImageStream + ?Sized>(
    image: &mut S,
    platform: Platform,
    options: &InspectOptions,
    titles: Option<&dyn TitleLookup>,
) -> Result<TitleRecord, InspectError> {
    let layout = disc::locate(image, platform)?;
    let record = TitleRecord::new().with_volume(layout.geometry, &layout.volume);

    match platform {
        Platform::Ps1 | Platform::Ps2 => {
            if options.patch {
                debug!("Patching is only available for PS3 images; ignoring");
            }
            inspect_boot_config(image, platform, &layout, titles, record)
        }
        Platform::Ps3 | Platform::Psp => {
            inspect_param_sfo(image, platform, &layout, options, record)
        }
    }
}

fn inspect_boot_config<S: ImageStream + ?Sized>(
    image: &mut S,
    platform: Platform,
    layout: &DiscLayout,
    titles: Option<&dyn TitleLookup>,
    record: TitleRecord,
) -> Result<TitleRecord, InspectError> {
    let sector_size = layout.geometry.sector_size();
    let entry = find_entry(image, layout.volume.root_dir_offset, sector_size, SYSTEM_CNF)?
        .ok_or_else(|| InspectError::required_record_missing("SYSTEM.CNF", platform))?;

    let len = (entry.data_length as usize).min(MAX_SYSTEM_CNF_LEN);
    let mut contents = vec![0u8; len];
    read_at(
        image,
        entry.extent_offset + layout.geometry.header_len() as u64,
        &mut contents,
    )?;

    let Some(prefix) = title_id::boot_prefix(platform) else {
        return Ok(record);
    };
    let Some(raw) = title_id::find_boot_token(&contents, prefix) else {
        warn!("No boot executable found in SYSTEM.CNF");
        return Ok(record);
    };
    let title_id = title_id::normalize(platform, &raw);
    debug!("Boot executable {} -> title id {}", raw, title_id);

    let title = match titles {
        Some(db) => match db.lookup(&title_id) {
            Some(title) => transliterate_title(title.as_bytes()),
            None => {
                debug!("{} is not in the title database", title_id);
                String::new()
            }
        },
        None => {
            debug!("No title database loaded");
            String::new()
        }
    };

    Ok(record.with_title_id(title_id).with_title(title))
}

fn inspect_param_sfo<S: ImageStream + ?Sized>(
    image: &mut S,
    platform: Platform,
    layout: &DiscLayout,
    options: &InspectOptions,
    mut record: TitleRecord,
) -> Result<TitleRecord, InspectError> {
    let (Some(dir), Some(id_key)) = (game_dir(platform), title_id_key(platform)) else {
        return Ok(record);
    };
    let sector_size = layout.geometry.sector_size();

    let game = find_entry(
        image,
        layout.volume.root_dir_offset,
        sector_size,
        dir.as_bytes(),
    )?
    .ok_or_else(|| InspectError::required_record_missing(dir, platform))?;
    let sfo = find_entry(image, game.extent_offset, sector_size, PARAM_SFO)?
        .ok_or_else(|| InspectError::required_record_missing("PARAM.SFO", platform))?;

    let base = sfo.extent_offset + layout.geometry.header_len() as u64;
    match SfoTable::read(image, base) {
        Ok(table) => {
            if let Some(id) = table.text_prefix(id_key) {
                let raw = String::from_utf8_lossy(id);
                record.title_id = title_id::normalize(platform, &raw);
            }
            if let Some(title) = table.text_prefix("TITLE") {
                record.title = transliterate_title(title);
            }
        }
        Err(SfoError::Io(e)) => return Err(e.into()),
        Err(e) => warn!("Unreadable PARAM.SFO: {}", e),
    }

    if platform == Platform::Ps3 {
        if options.patch {
            let token = ps3_patch::format_disc_title_id(&record.title_id);
            let outcome = ps3_patch::patch(image, &token, layout.volume.volume_size_be)?;
            record.patch = Some(outcome);
        } else {
            debug!("No PS3 patch requested");
        }
    }

    Ok(record)
}

#[cfg(test)]
#[path = "tests/inspector_tests.rs"]
mod tests;
