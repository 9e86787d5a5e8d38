// Tests for the building blocks exported from the crate root

use fixle::classifier::{is_binary_prefix, seems_binary, PREFIX_SIZE_TO_CHECK};
use fixle::{normalize, normalize_bytes, EolStats, LineEnding, Normalizer, StagedFile};
use std::io::{Cursor, Seek, SeekFrom, Write};
use tempfile::TempDir;

#[test]
fn test_classify_then_normalize_same_handle() {
    let mut source = Cursor::new(b"one\rtwo\r\nthree\n".to_vec());
    source.seek(SeekFrom::End(0)).unwrap();

    assert!(!seems_binary(&mut source).unwrap());

    let mut out = Vec::new();
    let stats = normalize(&mut source, Some(&mut out), LineEnding::Dos).unwrap();
    assert_eq!(out, b"one\r\ntwo\r\nthree\r\n");
    assert_eq!(stats, EolStats { unix: 1, mac: 1, dos: 1 });
}

#[test]
fn test_high_bytes_count_as_non_ascii() {
    let mut data = vec![b'.'; PREFIX_SIZE_TO_CHECK];
    for b in data.iter_mut().take(PREFIX_SIZE_TO_CHECK / 10) {
        *b = 0xc3;
    }
    assert!(is_binary_prefix(&data));
}

#[test]
fn test_normalizer_byte_at_a_time() {
    let input = b"a\r\nb\rc\nd\r";
    let mut out = Vec::new();
    let mut normalizer = Normalizer::new(LineEnding::Mac);
    for byte in input {
        normalizer.push(std::slice::from_ref(byte), Some(&mut out)).unwrap();
    }
    let stats = normalizer.finish(Some(&mut out)).unwrap();

    let (expected, expected_stats) = normalize_bytes(input, LineEnding::Mac);
    assert_eq!(out, expected);
    assert_eq!(out, b"a\rb\rc\rd\r");
    assert_eq!(stats, expected_stats);
    assert_eq!(stats, EolStats { unix: 1, mac: 2, dos: 1 });
}

#[test]
fn test_staged_file_commit() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let target = temp_dir.path().join("file.txt");
    std::fs::write(&target, b"before\r\n").unwrap();

    let mut staged = StagedFile::create(Default::default(), &target).unwrap();
    staged.file_mut().write_all(b"after\n").unwrap();
    staged.commit(&target).unwrap();

    assert_eq!(std::fs::read(&target).unwrap(), b"after\n");
}
