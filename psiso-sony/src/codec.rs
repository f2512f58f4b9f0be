//! Byte-order helpers for PARAM.SFO fields and the UTF-8 to ASCII title
//! transliteration.
//!
//! PARAM.SFO stores its header and index fields little-endian. They are
//! decoded by reversing the bytes into big-endian order, rendering them as
//! hex text and parsing that text back as an unsigned integer. The result is
//! identical to `u32::from_le_bytes` for every input.

/// Reverse the byte order of a 4-byte field.
pub fn reverse_u32_bytes(bytes: [u8; 4]) -> [u8; 4] {
    [bytes[3], bytes[2], bytes[1], bytes[0]]
}

/// Reverse the byte order of a 2-byte field.
pub fn reverse_u16_bytes(bytes: [u8; 2]) -> [u8; 2] {
    [bytes[1], bytes[0]]
}

/// Decode four big-endian bytes through their hex rendering.
pub fn be_hex_to_u32(bytes: [u8; 4]) -> u32 {
    let hex = format!(
        "{:02X}{:02X}{:02X}{:02X}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    );
    // Eight hex digits always fit in a u32.
    u32::from_str_radix(&hex, 16).unwrap_or_default()
}

/// Decode two big-endian bytes through their hex rendering.
pub fn be_hex_to_u16(bytes: [u8; 2]) -> u32 {
    let hex = format!("{:02X}{:02X}", bytes[0], bytes[1]);
    u32::from_str_radix(&hex, 16).unwrap_or_default()
}

/// Decode a little-endian 4-byte PARAM.SFO field.
pub fn sfo_u32(bytes: [u8; 4]) -> u32 {
    be_hex_to_u32(reverse_u32_bytes(bytes))
}

/// Decode a little-endian 2-byte PARAM.SFO field.
pub fn sfo_u16(bytes: [u8; 2]) -> u32 {
    be_hex_to_u16(reverse_u16_bytes(bytes))
}

/// Map a Latin-1 supplement code point to its unaccented ASCII letter.
fn latin1_to_ascii(c: u8) -> Option<u8> {
    let mapped = match c {
        0xC0..=0xC5 => b'A',
        0xC7 => b'C',
        0xC8..=0xCB => b'E',
        0xCC..=0xCF => b'I',
        0xD1 => b'N',
        0xD2..=0xD6 => b'O',
        0xD9..=0xDC => b'U',
        0xDD => b'Y',
        0xE0..=0xE5 => b'a',
        0xE7 => b'c',
        0xE8..=0xEB => b'e',
        0xEC..=0xEF => b'i',
        0xF1 => b'n',
        0xF2..=0xF6 => b'o',
        0xF9..=0xFC => b'u',
        0xFD | 0xFF => b'y',
        _ => return None,
    };
    Some(mapped)
}

/// Transliterate UTF-8 text into exactly `max_codepoints` single-byte slots.
///
/// - 2-byte sequences for accented Latin letters map to the base letter
///   (`é` → `e`, `ç` → `c`, `ñ` → `n`, `ý`/`ÿ` → `y`). Any other 2-byte
///   code point above 0x7F is replaced by the byte that follows the
///   sequence, and that byte is consumed too.
/// - 3- and 4-byte sequences collapse to a single space.
/// - Control bytes below 0x20 become spaces.
/// - Other bytes are copied as-is.
///
/// Conversion stops at the first NUL byte, at the end of `input`, or once
/// `max_codepoints` slots are filled. The remainder is padded with NULs.
pub fn utf8_transliterate(input: &[u8], max_codepoints: usize) -> Vec<u8> {
    let byte_at = |i: usize| input.get(i).copied().unwrap_or(0);

    let mut out = Vec::with_capacity(max_codepoints);
    let mut i = 0;
    while out.len() < max_codepoints {
        let b = byte_at(i);
        if b == 0 {
            break;
        }
        let next = byte_at(i + 1);
        let continued = next & 0xC0 == 0x80;
        let four_byte = b & 0xF1 == 0xF0;

        if (four_byte || b & 0xF0 == 0xE0) && continued {
            out.push(b' ');
            i += if four_byte { 4 } else { 3 };
        } else if b & 0xE0 == 0xC0 && continued {
            let c = ((b & 0x03) << 6) | (next & 0x3F);
            match latin1_to_ascii(c) {
                Some(ascii) => {
                    out.push(ascii);
                    i += 2;
                }
                None if c > 0x7F => {
                    out.push(byte_at(i + 2));
                    i += 3;
                }
                None => {
                    out.push(c);
                    i += 2;
                }
            }
        } else {
            out.push(if b < 0x20 { b' ' } else { b });
            i += 1;
        }
    }

    out.resize(max_codepoints, 0);
    out
}

/// Canonicalize a display title: transliterate up to the first NUL and
/// return the slots before the first NUL as a string.
pub fn transliterate_title(text: &[u8]) -> String {
    let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
    let slots = utf8_transliterate(&text[..end], end);
    slots
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| char::from(b))
        .collect()
}

#[cfg(test)]
#[path = "tests/codec_tests.rs"]
mod tests;
