#[path = "../src/archive.rs"]
mod archive;
#[path = "../src/error.rs"]
mod error;

use std::{fs, io::Write};

use error::InstallError;

fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, body) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(body).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}

#[test]
fn extract_keeps_relative_layout() {
    let payload = build_zip(&[
        ("Eula.txt", b"terms"),
        ("docs/", b""),
        ("x64/procexp64.exe", b"MZ..."),
    ]);
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("SysInternals");
    fs::create_dir_all(&dest).unwrap();

    let written = archive::extract_zip(&payload, &dest).unwrap();

    assert_eq!(written, 2);
    assert_eq!(fs::read(dest.join("Eula.txt")).unwrap(), b"terms");
    assert!(dest.join("docs").is_dir());
    assert_eq!(fs::read(dest.join("x64").join("procexp64.exe")).unwrap(), b"MZ...");
}

#[test]
fn extract_overwrites_previous_install() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("SysInternals");
    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join("Eula.txt"), "old").unwrap();

    archive::extract_zip(&build_zip(&[("Eula.txt", b"new")]), &dest).unwrap();

    assert_eq!(fs::read_to_string(dest.join("Eula.txt")).unwrap(), "new");
}

#[test]
fn extract_rejects_traversal_before_writing_anything() {
    let payload = build_zip(&[
        ("good.txt", b"fine"),
        ("../outside.txt", b"escaped"),
    ]);
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("SysInternals");
    fs::create_dir_all(&dest).unwrap();

    let err = archive::extract_zip(&payload, &dest).unwrap_err();

    assert!(matches!(err, InstallError::UnsafeEntry(ref name) if name == "../outside.txt"));
    assert!(!tmp.path().join("outside.txt").exists());
    assert!(!dest.join("good.txt").exists());
}

#[test]
fn extract_rejects_absolute_entries() {
    let payload = build_zip(&[("/tmp/absolute.txt", b"escaped")]);
    let tmp = tempfile::tempdir().unwrap();

    let err = archive::extract_zip(&payload, tmp.path()).unwrap_err();
    assert!(matches!(err, InstallError::UnsafeEntry(_)));
}

#[test]
fn extract_tolerates_current_dir_entry() {
    let payload = build_zip(&[("./", b""), ("tool.exe", b"MZ")]);
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("SysInternals");
    fs::create_dir_all(&dest).unwrap();

    let written = archive::extract_zip(&payload, &dest).unwrap();

    assert_eq!(written, 1);
    assert_eq!(fs::read(dest.join("tool.exe")).unwrap(), b"MZ");
}
