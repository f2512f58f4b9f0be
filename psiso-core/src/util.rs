use std::io::{self, Read, Seek, SeekFrom};

/// Format a byte count with fractional units (e.g., "1.5 KB", "23.4 GB").
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let b = bytes as f64;
    if b >= GB {
        format!("{:.1} GB", b / GB)
    } else if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Read a null-terminated ASCII string from a byte slice.
///
/// Stops at the first null byte, filters out non-printable characters,
/// and returns the result. No trimming is performed.
pub fn read_ascii(buf: &[u8]) -> String {
    buf.iter()
        .take_while(|&&b| b != 0)
        .filter(|&&b| (0x20..0x7F).contains(&b))
        .map(|&b| b as char)
        .collect()
}

/// Seek to `offset` and fill `buf` as far as the source allows.
///
/// Bytes past the end of the source are left zeroed. Returns the number of
/// bytes actually read. Only genuine I/O failures are errors; a short
/// source is not.
pub fn read_at<R: Read + Seek + ?Sized>(
    reader: &mut R,
    offset: u64,
    buf: &mut [u8],
) -> io::Result<usize> {
    buf.fill(0);
    reader.seek(SeekFrom::Start(offset))?;

    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Fixed-size variant of [`read_at`].
pub fn read_array<const N: usize, R: Read + Seek + ?Sized>(
    reader: &mut R,
    offset: u64,
) -> io::Result<[u8; N]> {
    let mut buf = [0u8; N];
    read_at(reader, offset, &mut buf)?;
    Ok(buf)
}
