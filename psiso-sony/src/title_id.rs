//! Title id extraction from SYSTEM.CNF and per-platform normalization.

use psiso_core::Platform;
use psiso_core::util::read_ascii;

/// Boot configuration file on PS1 and PS2 discs.
pub const SYSTEM_CNF: &[u8] = b"SYSTEM.CNF";

/// Boot path prefix in a PS1 SYSTEM.CNF (`BOOT = cdrom:\SLUS_005.94;1`).
pub const PS1_BOOT_PREFIX: &[u8] = b"cdrom:\\";

/// Boot path prefix in a PS2 SYSTEM.CNF (`BOOT2 = cdrom0:\SLUS_203.12;1`).
pub const PS2_BOOT_PREFIX: &[u8] = b"cdrom0:\\";

/// Length of the boot executable name that doubles as the raw title id.
pub const RAW_TITLE_ID_LEN: usize = 11;

/// The prefix is searched for at offsets 1 through this value.
const MAX_PREFIX_OFFSET: usize = 30;

pub fn boot_prefix(platform: Platform) -> Option<&'static [u8]> {
    match platform {
        Platform::Ps1 => Some(PS1_BOOT_PREFIX),
        Platform::Ps2 => Some(PS2_BOOT_PREFIX),
        Platform::Ps3 | Platform::Psp => None,
    }
}

/// Extract the raw title id following the boot path prefix.
///
/// The prefix is only recognized at offsets 1 through 30. The 11 bytes
/// after it are returned, cut at a NUL if one occurs.
pub fn find_boot_token(system_cnf: &[u8], prefix: &[u8]) -> Option<String> {
    (1..=MAX_PREFIX_OFFSET).find_map(|start| {
        let end = start + prefix.len();
        if system_cnf.get(start..end) != Some(prefix) {
            return None;
        }
        let token_end = (end + RAW_TITLE_ID_LEN).min(system_cnf.len());
        Some(read_ascii(&system_cnf[end..token_end]))
    })
}

/// Rewrite a raw title id into the form used by the title databases and
/// shown to the user.
///
/// | Platform | Raw           | Normalized   |
/// |----------|---------------|--------------|
/// | PS1      | `SLUS_005.94` | `SLUS-00594` |
/// | PS2      | `SLUS_203.12` | `SLUS20312`  |
/// | PS3      | `BLUS-30109`  | `BLUS30109`  |
/// | PSP      | `ULUS10041`   | `ULUS-10041` |
///
/// Ids that do not have the expected shape are returned unchanged.
pub fn normalize(platform: Platform, raw: &str) -> String {
    if !raw.is_ascii() {
        return raw.to_string();
    }
    match platform {
        Platform::Ps1 | Platform::Ps2 => {
            if raw.len() < RAW_TITLE_ID_LEN || raw.as_bytes()[4] != b'_' {
                return raw.to_string();
            }
            let sep = if platform == Platform::Ps1 { "-" } else { "" };
            format!("{}{}{}{}", &raw[0..4], sep, &raw[5..8], &raw[9..11])
        }
        Platform::Ps3 => {
            if raw.as_bytes().get(4) == Some(&b'-') {
                format!("{}{}", &raw[..4], &raw[5..])
            } else {
                raw.to_string()
            }
        }
        Platform::Psp => {
            if raw.len() > 4 && raw.as_bytes()[4] != b'-' {
                format!("{}-{}", &raw[..4], &raw[4..])
            } else {
                raw.to_string()
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/title_id_tests.rs"]
mod tests;
