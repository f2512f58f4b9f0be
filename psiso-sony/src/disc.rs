//! ISO 9660 volume location.
//!
//! The Primary Volume Descriptor sits in sector 16. Its standard identifier
//! `CD001` at byte 1 tells which sector geometry the image uses; the volume
//! space size (offset 0x50) and the root directory record (offset 0x9C) are
//! read from the same descriptor.

use std::io::{self, Read, Seek};

use log::debug;
use psiso_core::util::read_array;
use psiso_core::{InspectError, Platform, SectorGeometry, VolumeInfo};

/// ISO 9660 standard identifier.
pub const STANDARD_ID: &[u8; 5] = b"CD001";

/// Big-endian half of the both-endian volume space size.
const VOLUME_SIZE_BE_OFFSET: u64 = 0x50 + 4;

/// Root directory record; its extent field starts at +2.
const ROOT_RECORD_OFFSET: u64 = 0x9C;
const ROOT_EXTENT_OFFSET: u64 = ROOT_RECORD_OFFSET + 2;

/// Geometry and PVD fields of a located volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscLayout {
    pub geometry: SectorGeometry,
    pub volume: VolumeInfo,
}

/// Sector geometries worth probing, in order. PS3 discs are only ever
/// 2048-byte images.
pub fn geometries_for(platform: Platform) -> &'static [SectorGeometry] {
    match platform {
        Platform::Ps3 => &[SectorGeometry::Mode1],
        Platform::Ps1 | Platform::Ps2 | Platform::Psp => {
            &[SectorGeometry::Mode1, SectorGeometry::Mode2Form1]
        }
    }
}

/// Find the geometry whose PVD carries `CD001`.
pub fn detect_geometry<R: Read + Seek + ?Sized>(
    reader: &mut R,
    platform: Platform,
) -> io::Result<Option<SectorGeometry>> {
    for &geometry in geometries_for(platform) {
        let id: [u8; 5] = read_array(reader, geometry.pvd_offset() + 1)?;
        if &id == STANDARD_ID {
            return Ok(Some(geometry));
        }
        debug!("No volume descriptor for {}", geometry);
    }
    Ok(None)
}

/// Read the volume size and root directory location from the PVD.
pub fn read_volume_info<R: Read + Seek + ?Sized>(
    reader: &mut R,
    geometry: SectorGeometry,
) -> io::Result<VolumeInfo> {
    let pvd = geometry.pvd_offset();

    let volume_size_be: [u8; 4] = read_array(reader, pvd + VOLUME_SIZE_BE_OFFSET)?;
    let root_extent: [u8; 8] = read_array(reader, pvd + ROOT_EXTENT_OFFSET)?;
    let root_dir_sector =
        u32::from_be_bytes([root_extent[4], root_extent[5], root_extent[6], root_extent[7]]);

    Ok(VolumeInfo {
        volume_sectors: u32::from_be_bytes(volume_size_be),
        volume_size_be,
        root_dir_sector,
        root_dir_offset: root_dir_sector as u64 * geometry.sector_size() as u64,
    })
}

/// Classify the image's geometry and read its volume fields.
pub fn locate<R: Read + Seek + ?Sized>(
    reader: &mut R,
    platform: Platform,
) -> Result<DiscLayout, InspectError> {
    let geometry = detect_geometry(reader, platform)?
        .ok_or_else(|| InspectError::unsupported_geometry(platform))?;
    debug!("Supported {} ISO ({})", platform, geometry);

    let volume = read_volume_info(reader, geometry)?;
    debug!(
        "Volume Size: (0x{:08X} sectors) ({} bytes)",
        volume.volume_sectors,
        volume.total_bytes()
    );
    debug!(
        "Root Directory Record Offset: 0x{:08X} (sector {})",
        volume.root_dir_offset, volume.root_dir_sector
    );

    Ok(DiscLayout { geometry, volume })
}

#[cfg(test)]
#[path = "tests/disc_tests.rs"]
mod tests;
