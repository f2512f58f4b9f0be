//! PS3 disc header patch.
//!
//! Disc images dumped without the PS3 disc header lack the
//! `PlayStation3` block in their second sector. The patch writes two
//! blocks:
//!
//! ```text
//! 0x000  32 bytes  00 00 00 02, 16 x 00, volume size (BE), 8 x 00
//! 0x800  64 bytes  "PlayStation3", 4 x 00, "XXXX-XXXXX", 22 x ' ', 16 x 00
//! ```

use std::io::{self, Read, Seek, SeekFrom, Write};

use log::{info, warn};
use psiso_core::PatchOutcome;
use psiso_core::util::read_array;

/// Offset of the disc id block (start of the second sector).
pub const DISC_ID_OFFSET: u64 = 0x800;

pub const DISC_ID_MAGIC: &[u8; 12] = b"PlayStation3";

const DISC_MARKER: [u8; 4] = [0x00, 0x00, 0x00, 0x02];

pub const DISC_HEADER_LEN: usize = 32;
pub const DISC_ID_BLOCK_LEN: usize = 64;

/// Length of the `XXXX-XXXXX` token.
pub const DISC_TITLE_ID_LEN: usize = 10;

/// The 32-byte block written at offset 0.
pub fn disc_header_block(volume_size_be: [u8; 4]) -> [u8; DISC_HEADER_LEN] {
    let mut block = [0u8; DISC_HEADER_LEN];
    block[0..4].copy_from_slice(&DISC_MARKER);
    block[20..24].copy_from_slice(&volume_size_be);
    block
}

/// The 64-byte block written at 0x800.
pub fn disc_id_block(title_token: &[u8; DISC_TITLE_ID_LEN]) -> [u8; DISC_ID_BLOCK_LEN] {
    let mut block = [0u8; DISC_ID_BLOCK_LEN];
    block[0..12].copy_from_slice(DISC_ID_MAGIC);
    block[16..26].copy_from_slice(title_token);
    block[26..48].fill(b' ');
    block
}

/// Format a normalized PS3 title id (`BLUS30109`) as `BLUS-30109`.
/// Missing characters are left as zero bytes.
pub fn format_disc_title_id(title_id: &str) -> [u8; DISC_TITLE_ID_LEN] {
    let id = title_id.as_bytes();
    let mut token = [0u8; DISC_TITLE_ID_LEN];
    for (i, &b) in id.iter().take(4).enumerate() {
        token[i] = b;
    }
    token[4] = b'-';
    for (i, &b) in id.iter().skip(4).take(5).enumerate() {
        token[5 + i] = b;
    }
    token
}

/// True when the image already carries the `PlayStation3` block.
pub fn has_disc_header<R: Read + Seek + ?Sized>(image: &mut R) -> io::Result<bool> {
    let magic: [u8; 12] = read_array(image, DISC_ID_OFFSET)?;
    Ok(&magic == DISC_ID_MAGIC)
}

/// Write both header blocks unless the image already has them.
pub fn patch<S: Read + Write + Seek + ?Sized>(
    image: &mut S,
    title_token: &[u8; DISC_TITLE_ID_LEN],
    volume_size_be: [u8; 4],
) -> io::Result<PatchOutcome> {
    if has_disc_header(image)? {
        info!("PS3 ISO is already patched (no patching needed)");
        return Ok(PatchOutcome::AlreadyValid);
    }
    if title_token[0] == 0 {
        warn!("Patching PS3 ISO without a title id");
    }

    image.seek(SeekFrom::Start(0))?;
    image.write_all(&disc_header_block(volume_size_be))?;
    image.seek(SeekFrom::Start(DISC_ID_OFFSET))?;
    image.write_all(&disc_id_block(title_token))?;
    image.flush()?;

    info!(
        "PS3 ISO patched with title id {}",
        String::from_utf8_lossy(title_token).trim_end_matches('\0')
    );
    Ok(PatchOutcome::Patched)
}

#[cfg(test)]
#[path = "tests/ps3_patch_tests.rs"]
mod tests;
