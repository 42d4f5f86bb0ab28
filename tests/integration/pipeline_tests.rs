use dupelink::cli::{parse_args, Invocation};
use dupelink::config::RunConfig;
use dupelink::error::ExitCode;
use dupelink::run_app;
use dupelink::scanner::FileIdentity;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn config_for(flags: &[&str], root: &Path) -> RunConfig {
    let mut args: Vec<String> = vec!["dupelink".into()];
    args.extend(flags.iter().map(|f| f.to_string()));
    args.push(root.to_string_lossy().into_owned());

    match parse_args(args).unwrap() {
        Invocation::Run(cli) => RunConfig::from_cli(&cli),
        Invocation::Help(_) => panic!("unexpected help"),
    }
}

#[test]
fn test_report_only_run_lists_and_keeps_files() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    fs::write(&a, vec![8u8; 2048]).unwrap();
    fs::write(&b, vec![8u8; 2048]).unwrap();

    let config = config_for(&["/o"], dir.path());
    let mut out = Vec::new();
    let code = run_app(&config, &mut out).unwrap();

    assert_eq!(code, ExitCode::Success);
    let listing = String::from_utf8(out).unwrap();
    assert!(listing.starts_with("Result of duplicate analysis:\n"));
    assert!(listing.contains(&format!("2048 bytes: {} = {}", a.display(), b.display())));
    assert_ne!(
        FileIdentity::of_path(&a).unwrap(),
        FileIdentity::of_path(&b).unwrap()
    );
}

#[test]
fn test_link_run_merges_files() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("nested");
    fs::create_dir(&sub).unwrap();
    let a = dir.path().join("a.bin");
    let b = sub.join("b.bin");
    fs::write(&a, vec![6u8; 5000]).unwrap();
    fs::write(&b, vec![6u8; 5000]).unwrap();

    let config = config_for(&["/r", "/l", "/q"], dir.path());
    let mut out = Vec::new();
    let code = run_app(&config, &mut out).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(out.is_empty());
    assert_eq!(
        FileIdentity::of_path(&a).unwrap(),
        FileIdentity::of_path(&b).unwrap()
    );
}

#[test]
fn test_empty_folder_lists_nothing() {
    let dir = tempdir().unwrap();

    let config = config_for(&["-o"], dir.path());
    let mut out = Vec::new();
    run_app(&config, &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "No duplicates to list.\n");
}

#[test]
fn test_without_list_flag_nothing_on_stdout() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.bin"), vec![1u8; 2048]).unwrap();
    fs::write(dir.path().join("b.bin"), vec![1u8; 2048]).unwrap();

    let config = config_for(&[], dir.path());
    let mut out = Vec::new();
    run_app(&config, &mut out).unwrap();

    assert!(out.is_empty());
}
