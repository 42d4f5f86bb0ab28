use dupelink::config::ScanPolicy;
use dupelink::duplicates::DuplicateFinder;
use dupelink::scanner::Scanner;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_small_files_ignored_without_include_small() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("small1.txt"), "hello").unwrap();
    fs::write(dir.path().join("small2.txt"), "hello").unwrap();

    let mut scanner = Scanner::new(ScanPolicy::default());
    let catalog = scanner.scan(&[dir.path()]).unwrap();
    assert!(catalog.is_empty());
    assert_eq!(scanner.stats().entries_filtered, 2);

    let (set, _) = DuplicateFinder::new(ScanPolicy::default()).find(catalog);
    assert_eq!(set.pair_count(), 0);
}

#[test]
fn test_small_files_paired_with_include_small() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("small1.txt"), "hello").unwrap();
    fs::write(dir.path().join("small2.txt"), "hello").unwrap();

    let policy = ScanPolicy::default().with_include_small(true);
    let catalog = Scanner::new(policy).scan(&[dir.path()]).unwrap();
    assert_eq!(catalog.len(), 2);

    let (set, _) = DuplicateFinder::new(policy).find(catalog);
    assert_eq!(set.pair_count(), 1);
    assert_eq!(set.byte_sum(), 5);
}

#[test]
fn test_recursion_gates_subfolders() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(dir.path().join("top.bin"), vec![7u8; 2048]).unwrap();
    fs::write(sub.join("nested.bin"), vec![7u8; 2048]).unwrap();

    let flat = Scanner::new(ScanPolicy::default())
        .scan(&[dir.path()])
        .unwrap();
    assert_eq!(flat.len(), 1);

    let policy = ScanPolicy::default().with_recurse(true);
    let deep = Scanner::new(policy).scan(&[dir.path()]).unwrap();
    assert_eq!(deep.len(), 2);

    let (set, _) = DuplicateFinder::new(policy).find(deep);
    assert_eq!(set.pair_count(), 1);
}

#[test]
fn test_duplicates_across_roots() {
    let left = tempdir().unwrap();
    let right = tempdir().unwrap();
    fs::write(left.path().join("a.bin"), vec![3u8; 4096]).unwrap();
    fs::write(right.path().join("b.bin"), vec![3u8; 4096]).unwrap();

    let policy = ScanPolicy::default();
    let catalog = Scanner::new(policy)
        .scan(&[left.path(), right.path()])
        .unwrap();
    let (set, _) = DuplicateFinder::new(policy).find(catalog);

    assert_eq!(set.pair_count(), 1);
    let pair = set.iter().next().unwrap();
    assert!(pair.first.starts_with(left.path()));
    assert!(pair.second.starts_with(right.path()));
}

#[test]
fn test_already_hard_linked_files_not_paired() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.bin");
    fs::write(&original, vec![1u8; 2048]).unwrap();
    if let Err(e) = fs::hard_link(&original, dir.path().join("hardlink.bin")) {
        eprintln!("Skipping hardlink test: failed to create hardlink: {}", e);
        return;
    }

    let policy = ScanPolicy::default();
    let catalog = Scanner::new(policy).scan(&[dir.path()]).unwrap();
    assert_eq!(catalog.len(), 2);

    let (set, summary) = DuplicateFinder::new(policy).find(catalog);
    assert_eq!(set.pair_count(), 0);
    assert_eq!(summary.already_linked, 1);
}

#[test]
#[cfg(unix)]
fn test_hidden_duplicates_need_include_hidden() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".a.bin"), vec![5u8; 2048]).unwrap();
    fs::write(dir.path().join(".b.bin"), vec![5u8; 2048]).unwrap();

    let skipped = Scanner::new(ScanPolicy::default())
        .scan(&[dir.path()])
        .unwrap();
    assert!(skipped.is_empty());

    let policy = ScanPolicy::default().with_include_hidden(true);
    let catalog = Scanner::new(policy).scan(&[dir.path()]).unwrap();
    let (set, _) = DuplicateFinder::new(policy).find(catalog);
    assert_eq!(set.pair_count(), 1);
}
