use clap::{CommandFactory, Parser};
use wp_sac::tooling::cli::Cli;

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["wp-sac", "convert"],
        vec!["wp-sac", "convert", "--input", "in.json", "--output-dir", "out"],
        vec!["wp-sac", "convert", "--individual", "--skip-invalid", "--random-uids"],
        vec!["wp-sac", "--config", "wp-sac.toml", "convert"],
        vec!["wp-sac", "convert", "--log-level", "debug", "--log-format", "json"],
        vec!["wp-sac", "validate"],
        vec!["wp-sac", "validate", "--input", "in.json", "--format", "json"],
        vec!["wp-sac", "decode", "i:5;"],
        vec!["wp-sac", "decode", "--file", "meta.txt"],
        vec!["wp-sac", "--log-output", "file", "--log-file", "/tmp/wp.log", "decode", "i:5;"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_invalid_commands() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["wp-sac"],
        vec!["wp-sac", "scan"],
        vec!["wp-sac", "decode"],
        vec!["wp-sac", "decode", "i:5;", "--file", "meta.txt"],
        vec!["wp-sac", "convert", "--individual=maybe"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_err(), "expected parse failure for args: {args:?}");
    }
}

#[test]
fn help_lists_every_subcommand() {
    let help = Cli::command().render_long_help().to_string();
    for name in ["convert", "validate", "decode"] {
        assert!(help.contains(name), "help should mention {name}");
    }
}
