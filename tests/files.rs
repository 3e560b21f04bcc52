use std::fs;
use std::path::Path;

use huffzip::compression::compress::compress_file;
use huffzip::compression::decompress::{decompress_file, test_file};
use huffzip::tools::cli::{HzOpts, Output};
use huffzip::HuffError;

use tempfile::tempdir;

fn path_str(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

#[test]
fn compress_then_decompress_file() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("peter.txt");
    let text = "Peter Piper picked a peck of pickled peppers.\n".repeat(50);
    fs::write(&original, &text).unwrap();

    let opts = HzOpts::new();
    compress_file(&path_str(&original), &opts).unwrap();
    assert!(!original.exists(), "input should be removed");
    let packed = dir.path().join("peter.txt.hz");
    assert!(fs::metadata(&packed).unwrap().len() < text.len() as u64);

    test_file(&path_str(&packed)).unwrap();

    decompress_file(&path_str(&packed), &opts).unwrap();
    assert!(!packed.exists());
    assert_eq!(fs::read_to_string(&original).unwrap(), text);
}

#[test]
fn keep_and_force() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("data.bin");
    fs::write(&original, [1_u8, 2, 3, 3, 3, 3]).unwrap();

    let mut opts = HzOpts::new();
    opts.keep_input_files = true;
    compress_file(&path_str(&original), &opts).unwrap();
    assert!(original.exists());

    // Output exists now: refuse without --force.
    match compress_file(&path_str(&original), &opts) {
        Err(HuffError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::AlreadyExists),
        other => panic!("expected AlreadyExists, got {:?}", other),
    }

    opts.force_overwrite = true;
    compress_file(&path_str(&original), &opts).unwrap();
}

#[test]
fn empty_file() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("empty.txt");
    fs::write(&original, b"").unwrap();

    let opts = HzOpts::new();
    compress_file(&path_str(&original), &opts).unwrap();
    decompress_file(&path_str(&dir.path().join("empty.txt.hz")), &opts).unwrap();
    assert_eq!(fs::read(&original).unwrap(), b"");
}

#[test]
fn corrupt_archive_is_reported() {
    let dir = tempdir().unwrap();
    let bogus = dir.path().join("bogus.hz");
    fs::write(&bogus, b"definitely not an archive").unwrap();
    assert!(matches!(
        test_file(&path_str(&bogus)),
        Err(HuffError::BadArchive(_))
    ));
}

#[test]
fn missing_file_passes_io_error_through() {
    let dir = tempdir().unwrap();
    let opts = HzOpts::new();
    match compress_file(&path_str(&dir.path().join("nope.txt")), &opts) {
        Err(HuffError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn stdout_leaves_input_alone() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("short.txt");
    fs::write(&original, b"abba").unwrap();

    let mut opts = HzOpts::new();
    opts.output = Output::Stdout;
    compress_file(&path_str(&original), &opts).unwrap();
    assert!(original.exists());
    assert!(!dir.path().join("short.txt.hz").exists());
}
