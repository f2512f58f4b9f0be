use super::*;
use crate::test_image::make_dir_record;
use std::io::Cursor;

/// A 2048-byte directory sector holding "." and ".." plus `records`.
fn make_dir_sector(records: &[Vec<u8>]) -> Vec<u8> {
    let mut sector = Vec::new();
    sector.extend(make_dir_record(&[0x00], 18, 2048, true));
    sector.extend(make_dir_record(&[0x01], 18, 2048, true));
    for rec in records {
        sector.extend_from_slice(rec);
    }
    sector.resize(2048, 0);
    sector
}

#[test]
fn finds_named_record() {
    let sector = make_dir_sector(&[
        make_dir_record(b"README.TXT;1", 30, 100, false),
        make_dir_record(b"SYSTEM.CNF;1", 23, 68, false),
    ]);
    let entry = find_entry(&mut Cursor::new(sector), 0, 2048, b"SYSTEM.CNF")
        .unwrap()
        .unwrap();

    assert_eq!(entry.extent_sector, 23);
    assert_eq!(entry.data_length, 68);
    assert_eq!(entry.extent_offset, 23 * 2048);
    assert_eq!(entry.name, b"SYSTEM.CNF");
}

#[test]
fn extent_offset_uses_physical_sector_size() {
    let mut sector = vec![0u8; 24];
    sector.extend(make_dir_sector(&[make_dir_record(b"PARAM.SFO;1", 40, 512, false)]));
    sector.resize(2352, 0);
    let entry = find_entry(&mut Cursor::new(sector), 0, 2352, b"PARAM.SFO")
        .unwrap()
        .unwrap();
    assert_eq!(entry.extent_offset, 40 * 2352);
}

#[test]
fn finds_directory_without_version_suffix() {
    let sector = make_dir_sector(&[make_dir_record(b"PS3_GAME", 300, 2048, true)]);
    let entry = find_entry(&mut Cursor::new(sector), 0, 2048, b"PS3_GAME")
        .unwrap()
        .unwrap();
    assert_eq!(entry.extent_sector, 300);
}

#[test]
fn scans_from_region_start() {
    let mut image = vec![0u8; 5 * 2048];
    let sector = make_dir_sector(&[make_dir_record(b"SYSTEM.CNF;1", 7, 40, false)]);
    image.extend_from_slice(&sector);
    let entry = find_entry(&mut Cursor::new(image), 5 * 2048, 2048, b"SYSTEM.CNF")
        .unwrap()
        .unwrap();
    assert_eq!(entry.extent_sector, 7);
}

#[test]
fn missing_name_is_none() {
    let sector = make_dir_sector(&[make_dir_record(b"README.TXT;1", 30, 100, false)]);
    let found = find_entry(&mut Cursor::new(sector), 0, 2048, b"SYSTEM.CNF").unwrap();
    assert_eq!(found, None);
}

#[test]
fn rejects_name_embedded_in_longer_identifier() {
    // "SYSTEM.CNF" appears inside "OLDSYSTEM.CNF;1" and as a prefix of
    // "SYSTEM.CNFX;1"; neither is the record we want.
    let sector = make_dir_sector(&[
        make_dir_record(b"OLDSYSTEM.CNF;1", 50, 10, false),
        make_dir_record(b"SYSTEM.CNFX;1", 51, 11, false),
        make_dir_record(b"SYSTEM.CNF;1", 52, 12, false),
    ]);
    let entry = find_entry(&mut Cursor::new(sector), 0, 2048, b"SYSTEM.CNF")
        .unwrap()
        .unwrap();
    assert_eq!(entry.extent_sector, 52);
    assert_eq!(entry.data_length, 12);
}

#[test]
fn rejects_match_too_close_to_window_start() {
    let mut sector = b"SYSTEM.CNF".to_vec();
    sector.resize(2048, 0);
    let found = find_entry(&mut Cursor::new(sector), 0, 2048, b"SYSTEM.CNF").unwrap();
    assert_eq!(found, None);
}

#[test]
fn short_source_is_not_an_error() {
    let found = find_entry(&mut Cursor::new(vec![0u8; 10]), 0, 2048, b"PARAM.SFO").unwrap();
    assert_eq!(found, None);
}

#[test]
fn record_view_accessors() {
    let mut window = vec![0u8; 4];
    window.extend(make_dir_record(b"PSP_GAME", 0x1234, 0x800, true));
    let view = DirectoryRecordView::at(&window, 4 + IDENTIFIER_OFFSET, 8).unwrap();

    assert_eq!(view.record_len(), 42);
    assert_eq!(view.extent_sector(), 0x1234);
    assert_eq!(view.data_length(), 0x800);
    assert_eq!(view.identifier_len(), 8);
    assert_eq!(view.identifier(), b"PSP_GAME");
    assert!(view.names(b"PSP_GAME"));
    assert!(!view.names(b"PSP_GAMES"));

    assert!(DirectoryRecordView::at(&window, 10, 8).is_none());
}
