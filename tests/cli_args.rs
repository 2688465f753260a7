// tests/cli_args.rs
use clap::Parser;
use fieldnorm_core::cli::args::{Commands, EngineArgs, OutputFormat, StrategyArg};
use fieldnorm_core::cli::dispatch::execute;
use fieldnorm_core::cli::Cli;
use fieldnorm_core::exit::FieldnormExit;
use std::fs;

#[test]
fn test_parse_summary_with_globals() {
    let cli = Cli::try_parse_from(["fieldnorm", "summary", "data.json", "--threshold", "0.9"]).unwrap();
    assert_eq!(cli.engine.threshold, Some(0.9));
    match cli.command {
        Some(Commands::Summary { format, details, .. }) => {
            assert_eq!(format, OutputFormat::Markdown);
            assert!(!details);
        }
        _ => panic!("expected summary"),
    }
}

#[test]
fn test_parse_normalise() {
    let cli = Cli::try_parse_from([
        "fieldnorm",
        "--strategy",
        "greedy",
        "normalise",
        "data.json",
        "--field",
        "college",
        "--category",
        "college",
    ])
    .unwrap();
    assert_eq!(cli.engine.strategy, Some(StrategyArg::Greedy));
    match cli.command {
        Some(Commands::Normalise { field, category, format, .. }) => {
            assert_eq!(field, "college");
            assert_eq!(category.as_deref(), Some("college"));
            assert_eq!(format, OutputFormat::Json);
        }
        _ => panic!("expected normalise"),
    }
}

#[test]
fn test_normalise_requires_field() {
    assert!(Cli::try_parse_from(["fieldnorm", "normalise", "data.json"]).is_err());
}

#[test]
fn test_exit_codes() {
    assert_eq!(FieldnormExit::Success.code(), 0);
    assert_eq!(FieldnormExit::Error.code(), 1);
    assert_eq!(FieldnormExit::InvalidInput.code(), 2);
}

#[test]
fn test_empty_batch_is_invalid_input() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("empty.json");
    fs::write(&path, "[]").unwrap();
    let exit = execute(Commands::Payloads { input: path }, &EngineArgs::default()).unwrap();
    assert_eq!(exit, FieldnormExit::InvalidInput);
}

#[test]
fn test_malformed_input_is_invalid_input() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("bad.json");
    fs::write(&path, "{ nope").unwrap();
    let exit = execute(Commands::Payloads { input: path }, &EngineArgs::default()).unwrap();
    assert_eq!(exit, FieldnormExit::InvalidInput);
}

#[test]
fn test_bad_threshold_is_error() {
    let args = EngineArgs {
        threshold: Some(2.0),
        ..EngineArgs::default()
    };
    assert!(execute(Commands::Rules, &args).is_err());
}

#[test]
fn test_summary_succeeds() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("docs.json");
    fs::write(&path, r#"[{"college": "Fareham"}, {"college": "BMET"}]"#).unwrap();
    let exit = execute(
        Commands::Summary {
            input: path,
            format: OutputFormat::Markdown,
            details: true,
        },
        &EngineArgs::default(),
    )
    .unwrap();
    assert_eq!(exit, FieldnormExit::Success);
}
