use std::fs;
use std::path::Path;
use std::sync::Arc;

use psiso_core::{InspectError, InspectOptions, PatchOutcome, Platform, TitleLookup};
use psiso_sony::*;
use tempfile::TempDir;

const ROOT: usize = 18;
const NO_DATA: &[u8] = &[];

fn dir_record(name: &[u8], extent: u32, length: u32) -> Vec<u8> {
    let len = (33 + name.len() + 1) & !1;
    let mut rec = vec![0u8; len];
    rec[0] = len as u8;
    rec[2..6].copy_from_slice(&extent.to_le_bytes());
    rec[6..10].copy_from_slice(&extent.to_be_bytes());
    rec[10..14].copy_from_slice(&length.to_le_bytes());
    rec[14..18].copy_from_slice(&length.to_be_bytes());
    rec[32] = name.len() as u8;
    rec[33..33 + name.len()].copy_from_slice(name);
    rec
}

/// 2048-byte image: PVD at 16, root directory at 18, then `files` as
/// (directory sector, name, extent sector, contents).
fn make_iso(files: &[(usize, &str, u32, &[u8])]) -> Vec<u8> {
    let mut image = vec![0u8; 40 * 2048];
    let pvd = 16 * 2048;
    image[pvd] = 1;
    image[pvd + 1..pvd + 6].copy_from_slice(b"CD001");
    image[pvd + 80..pvd + 84].copy_from_slice(&40u32.to_le_bytes());
    image[pvd + 84..pvd + 88].copy_from_slice(&40u32.to_be_bytes());
    image[pvd + 158..pvd + 162].copy_from_slice(&(ROOT as u32).to_le_bytes());
    image[pvd + 162..pvd + 166].copy_from_slice(&(ROOT as u32).to_be_bytes());

    let mut fill = std::collections::HashMap::new();
    for &(dir, name, extent, contents) in files {
        let pos = fill.entry(dir).or_insert(68usize);
        let rec = dir_record(name.as_bytes(), extent, contents.len().max(2048) as u32);
        let at = dir * 2048 + *pos;
        image[at..at + rec.len()].copy_from_slice(&rec);
        *pos += rec.len();

        let data = extent as usize * 2048;
        image[data..data + contents.len()].copy_from_slice(contents);
    }
    image
}

fn make_sfo(vars: &[(&str, &str)]) -> Vec<u8> {
    let name_table = 0x14 + vars.len() * 16;
    let (mut names, mut data, mut index) = (Vec::new(), Vec::new(), Vec::new());
    for (name, value) in vars {
        index.extend_from_slice(&(names.len() as u16).to_le_bytes());
        index.extend_from_slice(&0x0204u16.to_le_bytes());
        index.extend_from_slice(&(value.len() as u32 + 1).to_le_bytes());
        index.extend_from_slice(&(value.len() as u32 + 1).to_le_bytes());
        index.extend_from_slice(&(data.len() as u32).to_le_bytes());
        names.extend_from_slice(name.as_bytes());
        names.push(0);
        data.extend_from_slice(value.as_bytes());
        data.push(0);
    }
    let mut sfo = b"\0PSF".to_vec();
    sfo.extend_from_slice(&0x0101u32.to_le_bytes());
    sfo.extend_from_slice(&(name_table as u32).to_le_bytes());
    sfo.extend_from_slice(&((name_table + names.len()) as u32).to_le_bytes());
    sfo.extend_from_slice(&(vars.len() as u32).to_le_bytes());
    sfo.extend(index);
    sfo.extend(names);
    sfo.extend(data);
    sfo
}

fn write_image(dir: &Path, name: &str, image: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, image).unwrap();
    path
}

#[test]
fn ps2_file_with_title_database() {
    let tmp = TempDir::new().unwrap();
    let cnf = b"BOOT2 = cdrom0:\\SLUS_203.12;1\nVER = 1.00\n";
    let path = write_image(
        tmp.path(),
        "gta3.iso",
        &make_iso(&[(ROOT, "SYSTEM.CNF;1", 22, cnf.as_slice())]),
    );
    let db_path = tmp.path().join("ps2titleid.txt");
    fs::write(&db_path, "// PS2\nSLUS20312 Grand Theft Auto III\n").unwrap();

    let db = TitleDatabase::load(&db_path).unwrap();
    let titles: &dyn TitleLookup = &db;
    let record =
        inspect_file(&path, Platform::Ps2, &InspectOptions::new(), Some(titles)).unwrap();

    assert_eq!(record.title_id, "SLUS20312");
    assert_eq!(record.title, "Grand Theft Auto III");
    assert_eq!(record.volume_bytes, 40 * 2048);
}

#[test]
fn ps3_patch_on_disk() {
    let tmp = TempDir::new().unwrap();
    let sfo = make_sfo(&[("TITLE", "Demo Game"), ("TITLE_ID", "BLES00001")]);
    let image = make_iso(&[
        (ROOT, "PS3_GAME", 20, NO_DATA),
        (20, "PARAM.SFO;1", 24, sfo.as_slice()),
    ]);
    let path = write_image(tmp.path(), "demo.iso", &image);
    let options = InspectOptions::new().patch(true);

    let record = inspect_file(&path, Platform::Ps3, &options, None).unwrap();
    assert_eq!(record.title_id, "BLES00001");
    assert_eq!(record.title, "Demo Game");
    assert_eq!(record.patch, Some(PatchOutcome::Patched));

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), image.len());
    assert_eq!(&bytes[0..4], &[0, 0, 0, 2]);
    assert_eq!(&bytes[20..24], &40u32.to_be_bytes());
    assert_eq!(&bytes[0x800..0x80C], b"PlayStation3");
    assert_eq!(&bytes[0x810..0x81A], b"BLES-00001");

    let record = inspect_file(&path, Platform::Ps3, &options, None).unwrap();
    assert_eq!(record.patch, Some(PatchOutcome::AlreadyValid));
    assert_eq!(fs::read(&path).unwrap(), bytes);
}

#[test]
fn ps3_without_patch_opens_read_only() {
    let tmp = TempDir::new().unwrap();
    let sfo = make_sfo(&[("TITLE_ID", "BLES00001"), ("TITLE", "Demo Game")]);
    let image = make_iso(&[
        (ROOT, "PS3_GAME", 20, NO_DATA),
        (20, "PARAM.SFO;1", 24, sfo.as_slice()),
    ]);
    let path = write_image(tmp.path(), "demo.iso", &image);

    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&path, perms).unwrap();

    let record = inspect_file(&path, Platform::Ps3, &InspectOptions::new(), None).unwrap();
    // TITLE_ID precedes TITLE, so the prefix lookup for TITLE lands on it.
    assert_eq!(record.title, "BLES00001");
    assert_eq!(record.patch, None);
    assert_eq!(fs::read(&path).unwrap(), image);
}

#[test]
fn missing_file_cannot_be_opened() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nope.iso");
    let err = inspect_file(&path, Platform::Psp, &InspectOptions::new(), None).unwrap_err();
    assert!(matches!(err, InspectError::CannotOpenSource { .. }));
    assert!(!err.is_corrupt_image());
}

#[test]
fn analyzers_by_platform() {
    let titles: Arc<dyn TitleLookup> =
        Arc::new(TitleDatabase::parse("SLUS-00594 Metal Gear Solid\n"));
    for &platform in Platform::all() {
        let analyzer = analyzer_for(platform, Some(titles.clone()));
        assert_eq!(analyzer.platform(), platform);
        assert_eq!(analyzer.supports_patching(), platform == Platform::Ps3);
    }
    assert_eq!(all_analyzers().len(), Platform::all().len());

    let cnf = b"BOOT = cdrom:\\SLUS_005.94;1\r\n";
    let image = make_iso(&[(ROOT, "SYSTEM.CNF;1", 22, cnf.as_slice())]);
    let analyzer = analyzer_for(Platform::Ps1, Some(titles));
    assert!(analyzer.can_handle(&mut std::io::Cursor::new(image.clone())));
    let record = analyzer
        .inspect(&mut std::io::Cursor::new(image), &InspectOptions::new())
        .unwrap();
    assert_eq!(record.title, "Metal Gear Solid");
}

#[test]
fn psp_image_without_game_dir_is_corrupt() {
    let tmp = TempDir::new().unwrap();
    let path = write_image(tmp.path(), "empty.iso", &make_iso(&[]));
    let err = inspect_file(&path, Platform::Psp, &InspectOptions::new(), None).unwrap_err();
    assert!(err.is_corrupt_image());
}
