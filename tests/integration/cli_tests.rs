use dupelink::cli::{parse_args, Invocation, UsageError};
use dupelink::config::{RunConfig, Verbosity};
use tempfile::tempdir;

#[test]
fn test_missing_directory_rejected() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = parse_args([
        "dupelink".to_string(),
        missing.to_string_lossy().into_owned(),
    ])
    .unwrap_err();

    assert!(matches!(err, UsageError::MissingDirectory(ref p) if *p == missing));
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_no_paths_is_usage_error() {
    let err = parse_args(["dupelink", "/r"]).unwrap_err();
    assert!(matches!(err, UsageError::Arguments(_)));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let dir = tempdir().unwrap();
    let err = parse_args([
        "dupelink".to_string(),
        "/x".to_string(),
        dir.path().to_string_lossy().into_owned(),
    ])
    .unwrap_err();
    assert!(matches!(err, UsageError::Arguments(_)));
    assert!(err.to_string().contains("-x"));
}

#[test]
fn test_help_flag() {
    for flag in ["/?", "-?", "--help"] {
        match parse_args(["dupelink", flag]).unwrap() {
            Invocation::Help(text) => assert!(text.contains("Usage")),
            Invocation::Run(_) => panic!("expected help for {}", flag),
        }
    }
}

fn run_config(args: Vec<String>) -> RunConfig {
    match parse_args(args).unwrap() {
        Invocation::Run(cli) => RunConfig::from_cli(&cli),
        Invocation::Help(_) => panic!("unexpected help"),
    }
}

#[test]
fn test_last_verbosity_flag_wins() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_string_lossy().into_owned();

    let config = run_config(vec!["dupelink".into(), "/q".into(), "/v".into(), root.clone()]);
    assert_eq!(config.verbosity, Verbosity::Verbose);

    let config = run_config(vec!["dupelink".into(), "/v".into(), "/q".into(), root.clone()]);
    assert_eq!(config.verbosity, Verbosity::Quiet);

    let config = run_config(vec!["dupelink".into(), "/d".into(), "/v".into(), root]);
    assert_eq!(config.verbosity, Verbosity::Verbose);
}

#[test]
fn test_repeated_flag_is_accepted() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_string_lossy().into_owned();

    let config = run_config(vec!["dupelink".into(), "/r".into(), "/r".into(), root]);
    assert!(config.policy.recurse);
}

#[test]
fn test_full_flag_set_maps_to_config() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_string_lossy().into_owned();
    let args = [
        "dupelink", "/a", "/t", "/h", "/s", "/m", "/j", "/r", "/l", "/o", "/d", root.as_str(),
    ];

    let cli = match parse_args(args).unwrap() {
        Invocation::Run(cli) => cli,
        Invocation::Help(_) => panic!("unexpected help"),
    };
    let config = RunConfig::from_cli(&cli);

    assert!(config.policy.match_attributes);
    assert!(config.policy.match_timestamps);
    assert!(config.policy.include_hidden);
    assert!(config.policy.include_system);
    assert!(config.policy.include_small);
    assert!(config.policy.follow_junctions);
    assert!(config.policy.recurse);
    assert!(config.link);
    assert!(config.list);
    assert_eq!(config.verbosity, Verbosity::Debug);
    assert_eq!(config.roots, vec![dir.path().to_path_buf()]);
}
