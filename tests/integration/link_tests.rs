use dupelink::actions::link::{LinkError, Linker};
use dupelink::config::ScanPolicy;
use dupelink::duplicates::{DuplicateFinder, DuplicatePair};
use dupelink::scanner::{FileIdentity, Scanner};
use filetime::{set_file_mtime, FileTime};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_scan_pair_and_link() {
    let dir = tempdir().unwrap();
    let big1 = dir.path().join("big1.bin");
    let big2 = dir.path().join("big2.bin");
    fs::write(&big1, vec![0xAB; 2048]).unwrap();
    fs::write(&big2, vec![0xAB; 2048]).unwrap();

    let policy = ScanPolicy::default();
    let catalog = Scanner::new(policy).scan(&[dir.path()]).unwrap();
    let (set, _) = DuplicateFinder::new(policy).find(catalog);
    assert_eq!(set.pair_count(), 1);
    assert_eq!(set.byte_sum(), 2048);

    let result = Linker::new().link_all(set);
    assert_eq!(result.success_count(), 1);
    assert_eq!(result.bytes_saved, 2048);

    assert_eq!(
        FileIdentity::of_path(&big1).unwrap(),
        FileIdentity::of_path(&big2).unwrap()
    );
    assert_eq!(fs::read(&big2).unwrap(), vec![0xAB; 2048]);
    assert!(!dir.path().join("big2.bin_backup").exists());
}

#[test]
fn test_second_run_finds_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.bin"), vec![9u8; 3000]).unwrap();
    fs::write(dir.path().join("b.bin"), vec![9u8; 3000]).unwrap();

    let policy = ScanPolicy::default();
    let catalog = Scanner::new(policy).scan(&[dir.path()]).unwrap();
    let (set, _) = DuplicateFinder::new(policy).find(catalog);
    Linker::new().link_all(set);

    let catalog = Scanner::new(policy).scan(&[dir.path()]).unwrap();
    let (set, summary) = DuplicateFinder::new(policy).find(catalog);
    assert_eq!(set.pair_count(), 0);
    assert_eq!(summary.already_linked, 1);
}

#[test]
fn test_three_copies_end_up_sharing_data() {
    let dir = tempdir().unwrap();
    let paths: Vec<_> = ["a.bin", "b.bin", "c.bin"]
        .iter()
        .map(|name| dir.path().join(name))
        .collect();
    for path in &paths {
        fs::write(path, vec![4u8; 1500]).unwrap();
    }

    let policy = ScanPolicy::default();
    let catalog = Scanner::new(policy).scan(&[dir.path()]).unwrap();
    let (set, _) = DuplicateFinder::new(policy).find(catalog);
    assert_eq!(set.pair_count(), 2);

    let result = Linker::new().link_all(set);
    assert!(result.all_succeeded());

    let first = FileIdentity::of_path(&paths[0]).unwrap();
    for path in &paths[1..] {
        assert_eq!(FileIdentity::of_path(path).unwrap(), first);
    }
}

#[test]
fn test_timestamp_mismatch_not_linked() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    fs::write(&a, vec![2u8; 2048]).unwrap();
    fs::write(&b, vec![2u8; 2048]).unwrap();
    set_file_mtime(&a, FileTime::from_unix_time(1_500_000_000, 0)).unwrap();
    set_file_mtime(&b, FileTime::from_unix_time(1_600_000_000, 0)).unwrap();

    let policy = ScanPolicy::default().with_match_timestamps(true);
    let catalog = Scanner::new(policy).scan(&[dir.path()]).unwrap();
    let (set, summary) = DuplicateFinder::new(policy).find(catalog);

    assert_eq!(set.pair_count(), 0);
    assert_eq!(summary.filtered, 1);
    assert_ne!(
        FileIdentity::of_path(&a).unwrap(),
        FileIdentity::of_path(&b).unwrap()
    );
}

#[test]
fn test_failed_link_keeps_original_file() {
    let dir = tempdir().unwrap();
    let second = dir.path().join("second.bin");
    fs::write(&second, b"original data").unwrap();
    let pair = DuplicatePair::new(dir.path().join("no-such-file.bin"), second.clone(), 13);

    let err = Linker::new().link(&pair).unwrap_err();

    assert!(matches!(err, LinkError::Link { .. }));
    assert_eq!(fs::read(&second).unwrap(), b"original data");
    assert!(!dir.path().join("second.bin_backup").exists());
}

#[test]
fn test_content_changed_after_scan_is_not_paired() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    fs::write(&a, vec![1u8; 2048]).unwrap();
    fs::write(&b, vec![1u8; 2048]).unwrap();

    let policy = ScanPolicy::default();
    let catalog = Scanner::new(policy).scan(&[dir.path()]).unwrap();

    let mut changed = vec![1u8; 2048];
    changed[2047] = 0;
    fs::write(&b, changed).unwrap();

    let (set, summary) = DuplicateFinder::new(policy).find(catalog);
    assert_eq!(set.pair_count(), 0);
    assert_eq!(summary.different, 1);
}
