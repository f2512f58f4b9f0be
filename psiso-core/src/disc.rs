//! Disc geometry and volume types shared by the locator and the inspector.

/// ISO 9660 logical block size. Fixed by the standard even when the
/// carrier sector is larger.
pub const LOGICAL_BLOCK_SIZE: u64 = 2048;

/// The Primary Volume Descriptor always lives in logical sector 16.
pub const PVD_SECTOR: u64 = 16;

/// Physical sector layout carrying the ISO 9660 logical sectors.
///
/// Only these two layouts are recognized; anything else is a
/// classification failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorGeometry {
    /// 2048-byte sectors with no header (ISO9660/MODE1/2048).
    Mode1,
    /// 2352-byte raw sectors, user data after a 24-byte header
    /// (ISO9660/MODE2/FORM1/2352).
    Mode2Form1,
}

impl SectorGeometry {
    /// Physical sector size in bytes.
    pub fn sector_size(&self) -> u32 {
        match self {
            Self::Mode1 => 2048,
            Self::Mode2Form1 => 2352,
        }
    }

    /// Bytes preceding the user data in each physical sector.
    /// 12 (sync) + 4 (header) + 8 (subheader) for Mode 2 Form 1.
    pub fn header_len(&self) -> u32 {
        match self {
            Self::Mode1 => 0,
            Self::Mode2Form1 => 24,
        }
    }

    /// CD mode number (1 or 2).
    pub fn mode(&self) -> u8 {
        match self {
            Self::Mode1 => 1,
            Self::Mode2Form1 => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mode1 => "ISO9660/MODE1/2048",
            Self::Mode2Form1 => "ISO9660/MODE2/FORM1/2352",
        }
    }

    /// Byte offset of the user data of `sector`.
    pub fn data_offset(&self, sector: u64) -> u64 {
        sector * self.sector_size() as u64 + self.header_len() as u64
    }

    /// Byte offset of the Primary Volume Descriptor.
    pub fn pvd_offset(&self) -> u64 {
        self.data_offset(PVD_SECTOR)
    }
}

impl std::fmt::Display for SectorGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Volume fields read once from the Primary Volume Descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeInfo {
    /// Volume space size in logical sectors.
    pub volume_sectors: u32,
    /// The same field exactly as stored on disc (big-endian); the PS3
    /// header copies it verbatim.
    pub volume_size_be: [u8; 4],
    /// Sector number of the root directory extent.
    pub root_dir_sector: u32,
    /// `root_dir_sector * physical sector size`.
    pub root_dir_offset: u64,
}

impl VolumeInfo {
    /// Total logical volume size in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.volume_sectors as u64 * LOGICAL_BLOCK_SIZE
    }
}

#[cfg(test)]
#[path = "tests/disc_tests.rs"]
mod tests;
