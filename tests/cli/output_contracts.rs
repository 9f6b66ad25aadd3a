use std::fs;
use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;
use wp_sac::config::SacConfig;
use wp_sac::tooling::cli::{CliContext, Commands};
use wp_sac::ApiError;

use crate::cli::support::{post, write_export};

fn context_for(temp: &TempDir) -> CliContext {
    CliContext::with_config(SacConfig {
        input: temp.path().join("export.json"),
        output_dir: temp.path().join("out"),
        ..SacConfig::default()
    })
}

#[test]
fn validate_json_contract_has_required_fields() {
    let temp = TempDir::new().unwrap();
    write_export(
        temp.path(),
        json!([post(1, 0, "https://example.com/1"), post(2, 1, "broken")]),
    );

    let output = context_for(&temp)
        .execute(&Commands::Validate {
            input: None,
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["total_items"], json!(2));
    assert_eq!(parsed["valid_items"], json!(1));
    assert_eq!(parsed["fatal"], json!(false));
    let issues = parsed["issues"].as_array().expect("issues array should exist");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["path"], json!("rss.channel.item[1].link"));
    assert!(issues[0]["message"].as_str().is_some());
}

#[test]
fn validate_does_not_write_output() {
    let temp = TempDir::new().unwrap();
    write_export(temp.path(), json!([post(1, 0, "https://example.com/1")]));

    let output = context_for(&temp)
        .execute(&Commands::Validate {
            input: None,
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("No issues found."));
    assert!(!temp.path().join("out").exists());
}

#[test]
fn validate_rejects_unknown_format() {
    let temp = TempDir::new().unwrap();
    write_export(temp.path(), json!([]));
    let result = context_for(&temp).execute(&Commands::Validate {
        input: None,
        format: "yaml".to_string(),
    });
    assert!(matches!(result, Err(ApiError::ConfigError(_))));
}

#[test]
fn convert_flags_override_config() {
    let temp = TempDir::new().unwrap();
    let input = write_export(
        temp.path(),
        json!([post(1, 0, "https://example.com/1"), post(2, 1, "broken")]),
    );
    let out = temp.path().join("custom-out");

    let summary = context_for(&temp)
        .execute(&Commands::Convert {
            input: Some(input),
            output_dir: Some(out.clone()),
            individual: true,
            skip_invalid: true,
            random_uids: false,
        })
        .unwrap();

    assert!(summary.contains("Skipped (invalid)"));
    assert!(summary.contains("one file per item"));
    let mut names: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"root.json".to_string()));
    assert!(!temp.path().join("out").exists());
}

#[test]
fn convert_aborts_on_invalid_item_by_default() {
    let temp = TempDir::new().unwrap();
    write_export(temp.path(), json!([post(1, 0, "broken")]));

    let result = context_for(&temp).execute(&Commands::Convert {
        input: None,
        output_dir: None,
        individual: false,
        skip_invalid: false,
        random_uids: false,
    });
    let err = result.unwrap_err();
    assert!(err.to_string().contains("rss.channel.item[0].link"));
}

#[test]
fn decode_reads_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("meta.txt");
    fs::write(&path, "'a: 1: { s: 4: \"file\"; s: 5: \"x.jpg\"; }'\n").unwrap();

    let output = context_for(&temp)
        .execute(&Commands::Decode {
            text: None,
            file: Some(path),
        })
        .unwrap();
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&output).unwrap(),
        json!({"file": "x.jpg"})
    );
}

#[test]
fn config_file_feeds_context() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("wp-sac.toml");
    fs::write(
        &config_path,
        "input = \"somewhere.json\"\nwrite_individual_items = true\n",
    )
    .unwrap();

    let context = CliContext::new(Some(config_path)).unwrap();
    assert_eq!(context.config().input, PathBuf::from("somewhere.json"));
    assert!(context.config().write_individual_items);
}
