//! PARAM.SFO reader.
//!
//! PARAM.SFO is the key/value metadata file found under `PS3_GAME/` and
//! `PSP_GAME/`. Layout (all fields little-endian):
//!
//! ```text
//! 0x00  1   file type byte
//! 0x01  3   identifier ("PSF")
//! 0x04  4   version
//! 0x08  4   name table offset   (relative to the SFO start)
//! 0x0C  4   data table offset   (relative to the SFO start)
//! 0x10  4   total variables
//! 0x14  16 * total variables    index entries
//! ```
//!
//! Each index entry holds a name offset (2), data type (2), data size (4),
//! data block size (4) and data offset (4).

use std::cell::Cell;
use std::io::{self, Read, Seek};

use log::{debug, warn};
use psiso_core::InspectError;
use psiso_core::util::{read_array, read_at};
use thiserror::Error;

use crate::codec::{sfo_u16, sfo_u32, transliterate_title};

/// File name of the metadata file.
pub const PARAM_SFO: &[u8] = b"PARAM.SFO";

/// Size of the fixed header; the index table follows it.
pub const SFO_HEADER_LEN: u64 = 0x14;

/// Size of one index entry.
pub const SFO_INDEX_ENTRY_LEN: usize = 16;

/// Variable names are read from a 32-byte window and cut at the first NUL.
const NAME_LEN: usize = 32;

/// UTF-8 text data type.
pub const SFO_TYPE_TEXT: u32 = 0x0204;

/// Unsigned integer data type.
pub const SFO_TYPE_NUMERIC: u32 = 0x0404;

/// Upper bound on a text value; real values are at most a few hundred bytes.
const MAX_TEXT_LEN: usize = 1024;

/// Upper bound on the variable count; real tables hold a few dozen.
const MAX_VARIABLES: u32 = 4096;

#[derive(Debug, Error)]
pub enum SfoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Variable data \"{0}\" not found on SFO")]
    FieldNotFound(String),

    #[error("SFO declares {0} variables")]
    TooManyVariables(u32),
}

impl From<SfoError> for InspectError {
    fn from(err: SfoError) -> Self {
        match err {
            SfoError::Io(e) => InspectError::Io(e),
            other => InspectError::invalid_sfo(other.to_string()),
        }
    }
}

/// Decoded PARAM.SFO header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SfoHeader {
    pub file_type: u8,
    pub identifier: [u8; 3],
    pub version: u32,
    pub name_table_offset: u32,
    pub data_table_offset: u32,
    pub total_variables: u32,
}

impl SfoHeader {
    pub fn has_psf_magic(&self) -> bool {
        &self.identifier == b"PSF"
    }
}

/// One raw index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SfoIndexEntry {
    pub name_offset: u32,
    pub data_type: u32,
    pub data_size: u32,
    pub data_block_size: u32,
    pub data_offset: u32,
}

impl SfoIndexEntry {
    fn parse(raw: &[u8; SFO_INDEX_ENTRY_LEN]) -> Self {
        let u16_at = |o: usize| sfo_u16([raw[o], raw[o + 1]]);
        let u32_at = |o: usize| sfo_u32([raw[o], raw[o + 1], raw[o + 2], raw[o + 3]]);
        Self {
            name_offset: u16_at(0),
            data_type: u16_at(2),
            data_size: u32_at(4),
            data_block_size: u32_at(8),
            data_offset: u32_at(12),
        }
    }

    pub fn kind(&self) -> SfoKind {
        match (self.data_type, self.data_block_size) {
            (SFO_TYPE_TEXT, _) => SfoKind::Text,
            (SFO_TYPE_NUMERIC, 4) => SfoKind::Numeric4,
            (SFO_TYPE_NUMERIC, 2) => SfoKind::Numeric2,
            (other, _) => SfoKind::Other(other),
        }
    }
}

/// How an entry's value is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SfoKind {
    Text,
    Numeric4,
    Numeric2,
    /// Any other type, or a numeric entry with an unexpected block size.
    /// The value is not decoded.
    Other(u32),
}

/// A materialized variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfoEntry {
    pub name: String,
    pub kind: SfoKind,
    /// Raw text bytes up to the first NUL. Empty for non-text entries.
    pub text_value: Vec<u8>,
    /// Zero for non-numeric entries.
    pub numeric_value: u32,
}

impl SfoEntry {
    /// Text value as a display string, with the same transliteration used
    /// for titles.
    pub fn text_display(&self) -> String {
        transliterate_title(&self.text_value)
    }
}

/// Reads a PARAM.SFO in three steps: header, index table, entries.
struct SfoReader<'r, R: ?Sized> {
    reader: &'r mut R,
    base: u64,
}

impl<'r, R: Read + Seek + ?Sized> SfoReader<'r, R> {
    fn new(reader: &'r mut R, base: u64) -> Self {
        Self { reader, base }
    }

    fn read_header(&mut self) -> Result<SfoHeader, SfoError> {
        let raw: [u8; SFO_HEADER_LEN as usize] = read_array(self.reader, self.base)?;
        let u32_at = |o: usize| sfo_u32([raw[o], raw[o + 1], raw[o + 2], raw[o + 3]]);

        let header = SfoHeader {
            file_type: raw[0],
            identifier: [raw[1], raw[2], raw[3]],
            version: u32_at(4),
            name_table_offset: u32_at(8),
            data_table_offset: u32_at(12),
            total_variables: u32_at(16),
        };
        if !header.has_psf_magic() {
            warn!(
                "PARAM.SFO at 0x{:08X} has identifier {:?}, expected \"PSF\"",
                self.base,
                String::from_utf8_lossy(&header.identifier)
            );
        }
        if header.total_variables > MAX_VARIABLES {
            return Err(SfoError::TooManyVariables(header.total_variables));
        }
        Ok(header)
    }

    fn read_index(&mut self, header: &SfoHeader) -> Result<Vec<SfoIndexEntry>, SfoError> {
        let count = header.total_variables as usize;
        let mut raw = vec![0u8; count * SFO_INDEX_ENTRY_LEN];
        read_at(self.reader, self.base + SFO_HEADER_LEN, &mut raw)?;

        Ok(raw
            .chunks_exact(SFO_INDEX_ENTRY_LEN)
            .map(|chunk| {
                let mut entry = [0u8; SFO_INDEX_ENTRY_LEN];
                entry.copy_from_slice(chunk);
                SfoIndexEntry::parse(&entry)
            })
            .collect())
    }

    fn read_entry(
        &mut self,
        header: &SfoHeader,
        index: &SfoIndexEntry,
    ) -> Result<SfoEntry, SfoError> {
        let name_at = self.base + header.name_table_offset as u64 + index.name_offset as u64;
        let raw_name: [u8; NAME_LEN] = read_array(self.reader, name_at)?;
        let name_end = raw_name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        let name = String::from_utf8_lossy(&raw_name[..name_end]).into_owned();

        let data_at = self.base + header.data_table_offset as u64 + index.data_offset as u64;
        let kind = index.kind();
        let mut entry = SfoEntry {
            name,
            kind,
            text_value: Vec::new(),
            numeric_value: 0,
        };

        match kind {
            SfoKind::Text => {
                let len = (index.data_size as usize).min(MAX_TEXT_LEN);
                let mut text = vec![0u8; len];
                read_at(self.reader, data_at, &mut text)?;
                if let Some(end) = text.iter().position(|&b| b == 0) {
                    text.truncate(end);
                }
                entry.text_value = text;
            }
            SfoKind::Numeric4 => {
                entry.numeric_value = sfo_u32(read_array(self.reader, data_at)?);
            }
            SfoKind::Numeric2 => {
                entry.numeric_value = sfo_u16(read_array(self.reader, data_at)?);
            }
            SfoKind::Other(_) => {}
        }
        Ok(entry)
    }
}

/// A fully materialized PARAM.SFO.
///
/// Parse once per image and run every lookup against the same table. The
/// contents are logged at debug level the first time a lookup runs.
#[derive(Debug)]
pub struct SfoTable {
    header: SfoHeader,
    entries: Vec<SfoEntry>,
    dumped: Cell<bool>,
}

impl SfoTable {
    /// Read the PARAM.SFO whose first byte is at `base`.
    ///
    /// Reads past the end of the source yield zero bytes rather than errors,
    /// so a truncated table materializes with empty names and values.
    pub fn read<R: Read + Seek + ?Sized>(reader: &mut R, base: u64) -> Result<Self, SfoError> {
        let mut sfo = SfoReader::new(reader, base);
        let header = sfo.read_header()?;
        let index = sfo.read_index(&header)?;
        let entries = index
            .iter()
            .map(|i| sfo.read_entry(&header, i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            header,
            entries,
            dumped: Cell::new(false),
        })
    }

    pub fn header(&self) -> &SfoHeader {
        &self.header
    }

    pub fn entries(&self) -> &[SfoEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Log the header and every variable at debug level, once per table.
    pub fn dump(&self) {
        if self.dumped.replace(true) {
            return;
        }
        let h = &self.header;
        debug!("SFO Type: 0x{:02X}", h.file_type);
        debug!(
            "SFO Identifier: {}",
            String::from_utf8_lossy(&h.identifier)
        );
        debug!("SFO Version: 0x{:08X}", h.version);
        debug!("SFO Name Table Offset: 0x{:08X}", h.name_table_offset);
        debug!("SFO Data Table Offset: 0x{:08X}", h.data_table_offset);
        debug!("SFO Total Variables: {}", h.total_variables);
        for entry in &self.entries {
            match entry.kind {
                SfoKind::Text => debug!(" >> {}: {}", entry.name, entry.text_display()),
                SfoKind::Numeric4 | SfoKind::Numeric2 => {
                    debug!(" >> {}: 0x{:08X}", entry.name, entry.numeric_value)
                }
                SfoKind::Other(t) => debug!(" >> {}: <type 0x{:04X}>", entry.name, t),
            }
        }
    }

    /// Text entry named exactly `key`.
    pub fn text(&self, key: &str) -> Option<&[u8]> {
        self.find_text(key, |name| name == key)
    }

    /// First text entry whose name starts with `key`.
    ///
    /// Names are compared over the key's length only, so `TITLE` also
    /// matches `TITLE_ID` when that entry comes first. PARAM.SFO keys are
    /// sorted, which puts `TITLE` ahead of `TITLE_ID` on real discs.
    pub fn text_prefix(&self, key: &str) -> Option<&[u8]> {
        self.find_text(key, |name| name.starts_with(key))
    }

    fn find_text(&self, key: &str, matches: impl Fn(&str) -> bool) -> Option<&[u8]> {
        self.dump();
        debug!("Searching variable data for [ {} ]", key);
        let found = self
            .entries
            .iter()
            .find(|e| e.kind == SfoKind::Text && matches(&e.name));
        match found {
            Some(e) => {
                debug!("Found variable data for [ {} ]", key);
                Some(e.text_value.as_slice())
            }
            None => {
                debug!("Variable data [ {} ] not found", key);
                None
            }
        }
    }

    /// First numeric entry whose name equals `key`.
    pub fn numeric(&self, key: &str) -> Option<u32> {
        self.dump();
        debug!("Searching variable data for [ {} ]", key);
        let found = self
            .entries
            .iter()
            .find(|e| matches!(e.kind, SfoKind::Numeric4 | SfoKind::Numeric2) && e.name == key)
            .map(|e| e.numeric_value);
        if found.is_none() {
            debug!("Variable data [ {} ] not found", key);
        }
        found
    }

    /// Exact text lookup, transliterated for display. Fails when the key
    /// is absent.
    pub fn require_text(&self, key: &str) -> Result<String, SfoError> {
        self.text(key)
            .map(transliterate_title)
            .ok_or_else(|| SfoError::FieldNotFound(key.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/sfo_tests.rs"]
mod tests;
