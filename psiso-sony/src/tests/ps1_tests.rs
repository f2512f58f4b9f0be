use super::*;
use crate::test_image::{IsoBuilder, ROOT_SECTOR};
use psiso_core::SectorGeometry;
use std::collections::HashMap;
use std::io::Cursor;

fn make_image(geometry: SectorGeometry) -> Vec<u8> {
    let cnf = b"BOOT = cdrom:\\SCES_100.01;1\r\nTCB = 4\r\nEVENT = 10\r\nSTACK = 801FFFF0\r\n";
    IsoBuilder::new(geometry)
        .file(ROOT_SECTOR, "SYSTEM.CNF;1", 22, cnf.len() as u32)
        .data(22, cnf)
        .build()
}

fn titles() -> Arc<dyn TitleLookup> {
    Arc::new(HashMap::from([(
        "SCES-10001".to_string(),
        "Ridge Racer".to_string(),
    )]))
}

#[test]
fn test_can_handle_iso_and_bin() {
    let analyzer = Ps1Analyzer::new();
    assert!(analyzer.can_handle(&mut Cursor::new(make_image(SectorGeometry::Mode1))));
    assert!(analyzer.can_handle(&mut Cursor::new(make_image(SectorGeometry::Mode2Form1))));
}

#[test]
fn test_cannot_handle_garbage() {
    let analyzer = Ps1Analyzer::new();
    assert!(!analyzer.can_handle(&mut Cursor::new(vec![0u8; 64 * 1024])));
    assert!(!analyzer.can_handle(&mut Cursor::new(Vec::new())));
}

#[test]
fn test_inspect_with_titles() {
    let analyzer = Ps1Analyzer::with_titles(titles());
    let mut image = Cursor::new(make_image(SectorGeometry::Mode2Form1));
    let record = analyzer.inspect(&mut image, &InspectOptions::new()).unwrap();

    assert_eq!(record.title_id, "SCES-10001");
    assert_eq!(record.title, "Ridge Racer");
    assert!(record.is_complete());
}

#[test]
fn test_inspect_without_titles() {
    let analyzer = Ps1Analyzer::new();
    let mut image = Cursor::new(make_image(SectorGeometry::Mode1));
    let record = analyzer.inspect(&mut image, &InspectOptions::new()).unwrap();
    assert_eq!(record.title_id, "SCES-10001");
    assert_eq!(record.title, "");
}

#[test]
fn test_analyzer_metadata() {
    let analyzer = Ps1Analyzer::new();
    assert_eq!(analyzer.platform(), Platform::Ps1);
    assert_eq!(analyzer.short_name(), "ps1");
    assert!(analyzer.file_extensions().contains(&"bin"));
    assert!(!analyzer.supports_patching());
}
