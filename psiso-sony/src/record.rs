//! Directory record scanner.
//!
//! Finds a named entry by scanning one sector-sized window of a directory
//! extent for the name bytes, then reads the record fields at fixed
//! distances before the match. A match only counts when the surrounding
//! bytes look like a directory record carrying that name, so the same bytes
//! inside an unrelated record (or file data) are skipped.

use std::io::{self, Read, Seek};

use log::debug;
use psiso_core::util::read_at;

/// Distance from the start of a record to its file identifier.
pub const IDENTIFIER_OFFSET: usize = 33;

/// Both-endian extent field, counted back from the identifier.
pub const EXTENT_FIELD_BACK: usize = 0x1F;

/// Both-endian data length field, counted back from the identifier.
pub const LENGTH_FIELD_BACK: usize = 0x17;

const IDENTIFIER_LEN_POS: usize = IDENTIFIER_OFFSET - 1;

/// A record matched by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: Vec<u8>,
    pub extent_sector: u32,
    pub data_length: u32,
    /// `extent_sector * sector_size`.
    pub extent_offset: u64,
}

/// Bounds-checked view of the fixed part of a directory record, anchored
/// at its identifier.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryRecordView<'a> {
    bytes: &'a [u8],
}

impl<'a> DirectoryRecordView<'a> {
    /// View the record whose identifier starts at `name_pos` in `window`.
    ///
    /// Returns `None` when the record would start before the window or the
    /// identifier would run past its end.
    pub fn at(window: &'a [u8], name_pos: usize, name_len: usize) -> Option<Self> {
        let start = name_pos.checked_sub(IDENTIFIER_OFFSET)?;
        if name_pos + name_len > window.len() {
            return None;
        }
        Some(Self {
            bytes: &window[start..],
        })
    }

    /// Big-endian half of the both-endian field starting `back` bytes
    /// before the identifier.
    fn both_endian_u32(&self, back: usize) -> u32 {
        let at = IDENTIFIER_OFFSET - back + 4;
        u32::from_be_bytes([
            self.bytes[at],
            self.bytes[at + 1],
            self.bytes[at + 2],
            self.bytes[at + 3],
        ])
    }

    pub fn record_len(&self) -> u8 {
        self.bytes[0]
    }

    pub fn extent_sector(&self) -> u32 {
        self.both_endian_u32(EXTENT_FIELD_BACK)
    }

    pub fn data_length(&self) -> u32 {
        self.both_endian_u32(LENGTH_FIELD_BACK)
    }

    pub fn identifier_len(&self) -> u8 {
        self.bytes[IDENTIFIER_LEN_POS]
    }

    /// Identifier bytes, clipped to the window.
    pub fn identifier(&self) -> &'a [u8] {
        let end = (IDENTIFIER_OFFSET + self.identifier_len() as usize).min(self.bytes.len());
        &self.bytes[IDENTIFIER_OFFSET..end]
    }

    /// True when the record length covers the identifier and the identifier
    /// is exactly `name`, optionally followed by a `;version` suffix.
    pub fn names(&self, name: &[u8]) -> bool {
        if (self.record_len() as usize) < IDENTIFIER_OFFSET + self.identifier_len() as usize {
            return false;
        }
        let id = self.identifier();
        if id.len() < name.len() || !id.starts_with(name) {
            return false;
        }
        id.len() == name.len() || id[name.len()] == b';'
    }
}

/// Scan `sector_size` candidate positions starting at `region_start` for a
/// record named `name`.
///
/// Returns `Ok(None)` when no plausible record matches.
pub fn find_entry<R: Read + Seek + ?Sized>(
    reader: &mut R,
    region_start: u64,
    sector_size: u32,
    name: &[u8],
) -> io::Result<Option<DirectoryEntry>> {
    if name.is_empty() {
        return Ok(None);
    }
    let positions = sector_size as usize;
    let mut window = vec![0u8; positions + name.len() - 1];
    read_at(reader, region_start, &mut window)?;

    for pos in 0..positions {
        if &window[pos..pos + name.len()] != name {
            continue;
        }
        let Some(view) = DirectoryRecordView::at(&window, pos, name.len()) else {
            debug!(
                "Skipping {} at 0x{:08X}: no room for a record",
                String::from_utf8_lossy(name),
                region_start + pos as u64
            );
            continue;
        };
        if !view.names(name) {
            debug!(
                "Skipping {} at 0x{:08X}: not a record identifier",
                String::from_utf8_lossy(name),
                region_start + pos as u64
            );
            continue;
        }

        let entry = DirectoryEntry {
            name: name.to_vec(),
            extent_sector: view.extent_sector(),
            data_length: view.data_length(),
            extent_offset: view.extent_sector() as u64 * sector_size as u64,
        };
        debug!(
            "{} found at 0x{:08X}: extent sector {} (0x{:08X}), {} bytes",
            String::from_utf8_lossy(name),
            region_start + pos as u64,
            entry.extent_sector,
            entry.extent_offset,
            entry.data_length
        );
        return Ok(Some(entry));
    }

    debug!(
        "{} not found in the sector at 0x{:08X}",
        String::from_utf8_lossy(name),
        region_start
    );
    Ok(None)
}

#[cfg(test)]
#[path = "tests/record_tests.rs"]
mod tests;
