use super::*;
use std::io::Cursor;

// -- Test helpers --

enum Value<'a> {
    Text(&'a str),
    Int(u32),
    Short(u16),
}

/// Build a PARAM.SFO image from (name, value) pairs.
fn make_sfo(vars: &[(&str, Value)]) -> Vec<u8> {
    let index_len = vars.len() * SFO_INDEX_ENTRY_LEN;
    let name_table = SFO_HEADER_LEN as usize + index_len;

    let mut names = Vec::new();
    let mut data = Vec::new();
    let mut index = Vec::new();
    for (name, value) in vars {
        let name_off = names.len() as u16;
        names.extend_from_slice(name.as_bytes());
        names.push(0);

        let data_off = data.len() as u32;
        let (ty, size, block): (u16, u32, u32) = match value {
            Value::Text(s) => {
                data.extend_from_slice(s.as_bytes());
                data.push(0);
                let block = (s.len() as u32 + 1).next_multiple_of(4);
                data.resize(data_off as usize + block as usize, 0);
                (0x0204, s.len() as u32 + 1, block)
            }
            Value::Int(v) => {
                data.extend_from_slice(&v.to_le_bytes());
                (0x0404, 4, 4)
            }
            Value::Short(v) => {
                data.extend_from_slice(&v.to_le_bytes());
                data.extend_from_slice(&[0, 0]);
                (0x0404, 2, 2)
            }
        };
        index.extend_from_slice(&name_off.to_le_bytes());
        index.extend_from_slice(&ty.to_le_bytes());
        index.extend_from_slice(&size.to_le_bytes());
        index.extend_from_slice(&block.to_le_bytes());
        index.extend_from_slice(&data_off.to_le_bytes());
    }
    names.resize(names.len().next_multiple_of(4), 0);
    let data_table = name_table + names.len();

    let mut sfo = vec![0x00, b'P', b'S', b'F'];
    sfo.extend_from_slice(&0x0101u32.to_le_bytes());
    sfo.extend_from_slice(&(name_table as u32).to_le_bytes());
    sfo.extend_from_slice(&(data_table as u32).to_le_bytes());
    sfo.extend_from_slice(&(vars.len() as u32).to_le_bytes());
    sfo.extend_from_slice(&index);
    sfo.extend_from_slice(&names);
    sfo.extend_from_slice(&data);
    sfo
}

fn read_table(bytes: Vec<u8>) -> SfoTable {
    SfoTable::read(&mut Cursor::new(bytes), 0).unwrap()
}

// -- Tests --

#[test]
fn reads_header() {
    let table = read_table(make_sfo(&[("TITLE", Value::Text("Game"))]));
    let h = table.header();
    assert!(h.has_psf_magic());
    assert_eq!(h.version, 0x0101);
    assert_eq!(h.name_table_offset, 0x14 + 16);
    assert_eq!(h.total_variables, 1);
    assert_eq!(table.len(), 1);
}

#[test]
fn reads_text_and_numeric_entries() {
    let table = read_table(make_sfo(&[
        ("CATEGORY", Value::Text("DG")),
        ("PARENTAL_LEVEL", Value::Int(5)),
        ("REGION", Value::Short(0x8000)),
        ("TITLE_ID", Value::Text("BLUS30109")),
    ]));

    let entries = table.entries();
    assert_eq!(entries[0].name, "CATEGORY");
    assert_eq!(entries[0].kind, SfoKind::Text);
    assert_eq!(entries[0].text_value, b"DG");
    assert_eq!(entries[1].kind, SfoKind::Numeric4);
    assert_eq!(entries[1].numeric_value, 5);
    assert_eq!(entries[2].kind, SfoKind::Numeric2);
    assert_eq!(entries[2].numeric_value, 0x8000);

    assert_eq!(table.text("TITLE_ID"), Some(&b"BLUS30109"[..]));
    assert_eq!(table.numeric("PARENTAL_LEVEL"), Some(5));
    assert_eq!(table.numeric("REGION"), Some(0x8000));
}

#[test]
fn text_lookup_is_exact() {
    let table = read_table(make_sfo(&[("TITLE_ID", Value::Text("BLUS30109"))]));
    assert_eq!(table.text("TITLE_ID"), Some(&b"BLUS30109"[..]));
    assert_eq!(table.text("TITLE"), None);
}

#[test]
fn prefix_lookup_can_land_on_a_longer_key() {
    let table = read_table(make_sfo(&[
        ("TITLE_ID", Value::Text("BLUS30109")),
        ("TITLE", Value::Text("Real Title")),
    ]));
    // TITLE_ID comes first and its first five bytes are "TITLE".
    assert_eq!(table.text_prefix("TITLE"), Some(&b"BLUS30109"[..]));
    assert_eq!(table.text("TITLE"), Some(&b"Real Title"[..]));

    let table = read_table(make_sfo(&[
        ("TITLE", Value::Text("Real Title")),
        ("TITLE_ID", Value::Text("BLUS30109")),
    ]));
    assert_eq!(table.text_prefix("TITLE"), Some(&b"Real Title"[..]));
    assert_eq!(table.text_prefix("TITLE_ID"), Some(&b"BLUS30109"[..]));
}

#[test]
fn lookups_respect_type() {
    let table = read_table(make_sfo(&[
        ("APP_VER", Value::Int(1)),
        ("VERSION", Value::Text("01.00")),
    ]));
    assert_eq!(table.text("APP_VER"), None);
    assert_eq!(table.numeric("VERSION"), None);
}

#[test]
fn numeric_lookup_is_exact() {
    let table = read_table(make_sfo(&[("PARENTAL_LEVEL", Value::Int(3))]));
    assert_eq!(table.numeric("PARENTAL"), None);
    assert_eq!(table.numeric("PARENTAL_LEVEL_X"), None);
    assert_eq!(table.numeric("PARENTAL_LEVEL"), Some(3));
}

#[test]
fn missing_key_is_not_an_error_until_required() {
    let table = read_table(make_sfo(&[("TITLE", Value::Text("Game"))]));
    assert_eq!(table.text("DISC_ID"), None);
    let err = table.require_text("DISC_ID").unwrap_err();
    assert!(matches!(err, SfoError::FieldNotFound(ref k) if k == "DISC_ID"));
    assert_eq!(table.require_text("TITLE").unwrap(), "Game");
}

#[test]
fn required_text_is_transliterated() {
    let table = read_table(make_sfo(&[("TITLE", Value::Text("Pokémon Ñ"))]));
    assert_eq!(table.require_text("TITLE").unwrap(), "Pokemon N");
}

#[test]
fn empty_table() {
    let table = read_table(make_sfo(&[]));
    assert!(table.is_empty());
    assert_eq!(table.text("TITLE"), None);
}

#[test]
fn bad_magic_still_reads() {
    let mut bytes = make_sfo(&[("TITLE", Value::Text("Game"))]);
    bytes[1..4].copy_from_slice(b"XYZ");
    let table = read_table(bytes);
    assert!(!table.header().has_psf_magic());
    assert_eq!(table.text("TITLE"), Some(&b"Game"[..]));
}

#[test]
fn truncated_table_zero_fills() {
    let mut bytes = make_sfo(&[("TITLE", Value::Text("Game"))]);
    // Drop the whole data table.
    bytes.truncate(bytes.len() - 8);
    let table = read_table(bytes);
    assert_eq!(table.len(), 1);
    assert_eq!(table.entries()[0].name, "TITLE");
    assert!(table.entries()[0].text_value.is_empty());
}

#[test]
fn absurd_variable_count_is_rejected() {
    let mut bytes = make_sfo(&[]);
    bytes[16..20].copy_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
    let err = SfoTable::read(&mut Cursor::new(bytes), 0).unwrap_err();
    assert!(matches!(err, SfoError::TooManyVariables(0xFFFF_FFFF)));
}

#[test]
fn reads_at_base_offset() {
    let mut image = vec![0xAAu8; 0x1000];
    image.extend_from_slice(&make_sfo(&[("DISC_ID", Value::Text("ULUS10041"))]));
    let table = SfoTable::read(&mut Cursor::new(image), 0x1000).unwrap();
    assert_eq!(table.text("DISC_ID"), Some(&b"ULUS10041"[..]));
}

#[test]
fn sfo_error_maps_to_inspect_error() {
    let err: InspectError = SfoError::TooManyVariables(9999).into();
    assert!(matches!(err, InspectError::InvalidSfo(_)));

    let err: InspectError = SfoError::Io(io::Error::other("boom")).into();
    assert!(matches!(err, InspectError::Io(_)));
}
