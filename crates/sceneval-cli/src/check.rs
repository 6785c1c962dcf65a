//! # `sceneval check`
//!
//! Validates a document against a record descriptor and prints
//! `{"passed": bool, "failures": {...}}` as pretty JSON.
//!
//! ```bash
//! sceneval check --descriptor example.yaml --document input.json --scene create
//! sceneval check --descriptor example.yaml --document input.yaml --locale en
//! ```
//!
//! Exit code 0 on pass, 1 when any rule or whole-object check fails.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sceneval_core::{DocumentSubject, Failures};
use sceneval_engine::{ValidationOptions, Validator};
use serde::Serialize;

use crate::input::load_value;

/// Arguments of `sceneval check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Record descriptor (YAML or JSON).
    #[arg(long)]
    pub descriptor: PathBuf,

    /// Document to validate (YAML or JSON).
    #[arg(long)]
    pub document: PathBuf,

    /// Scene name. Omit for full validation.
    #[arg(long, default_value = "")]
    pub scene: String,

    /// Message locale (`zh`, `en`, region suffixes accepted).
    #[arg(long)]
    pub locale: Option<String>,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    passed: bool,
    failures: &'a Failures,
}

/// Execute `sceneval check`, writing the report to `out`.
pub fn run_check(args: &CheckArgs, options: ValidationOptions, out: &mut impl Write) -> Result<u8> {
    let descriptor = load_value(&args.descriptor)?;
    let document = load_value(&args.document)?;
    let subject = DocumentSubject::new(&descriptor, document)
        .with_context(|| format!("reading descriptor: {}", args.descriptor.display()))?;

    let outcome = Validator::with_options(options)
        .validate(&subject, &args.scene, args.locale.as_deref())
        .with_context(|| format!("validating {}", args.document.display()))?;

    let report = CheckReport {
        passed: outcome.passed(),
        failures: outcome.failures(),
    };
    serde_json::to_writer_pretty(&mut *out, &report).context("writing report")?;
    writeln!(out)?;

    tracing::info!(
        scene = %args.scene,
        passed = report.passed,
        failures = report.failures.len(),
        "check complete"
    );
    Ok(if report.passed { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sceneval_engine::KeyStyle;

    const DESCRIPTOR: &str = r#"
record: Example
fields:
  - key: id
    rules: required
  - key: title
    rules: required
    alias: 标题
  - key: works
    rules: gt=0,dive,required
    alias: 公式
    list:
      record:
        name: Work
        fields:
          - { key: code, rules: required, alias: 代码 }
scenes:
  create: [title, works]
  update: { id: "", title: "len>10" }
messages:
  required: "{0}是必须的"
"#;

    fn setup(document: &str) -> (tempfile::TempDir, CheckArgs) {
        let dir = tempfile::tempdir().unwrap();
        let descriptor = dir.path().join("example.yaml");
        let doc = dir.path().join("input.json");
        std::fs::write(&descriptor, DESCRIPTOR).unwrap();
        std::fs::write(&doc, document).unwrap();
        let args = CheckArgs {
            descriptor,
            document: doc,
            scene: String::new(),
            locale: None,
        };
        (dir, args)
    }

    fn run(args: &CheckArgs, options: ValidationOptions) -> (u8, serde_json::Value) {
        let mut out = Vec::new();
        let code = run_check(args, options, &mut out).unwrap();
        (code, serde_json::from_slice(&out).unwrap())
    }

    #[test]
    fn test_check_create_scene_fails() {
        let (_dir, mut args) = setup(r#"{"id": 0, "title": "", "works": [{"code": ""}]}"#);
        args.scene = "create".into();
        let (code, report) = run(&args, ValidationOptions::default());
        assert_eq!(code, 1);
        assert_eq!(report["passed"], false);
        assert_eq!(report["failures"]["title"], "标题是必须的");
        assert_eq!(report["failures"]["works[0].code"], "代码是必须的");
        assert!(report["failures"].get("id").is_none());
    }

    #[test]
    fn test_check_passes() {
        let (_dir, args) = setup(r#"{"id": 3, "title": "t", "works": [{"code": "c"}]}"#);
        let (code, report) = run(&args, ValidationOptions::default());
        assert_eq!(code, 0);
        assert_eq!(report, serde_json::json!({"passed": true, "failures": {}}));
    }

    #[test]
    fn test_check_alias_keys_in_english() {
        let (_dir, mut args) = setup(r#"{"id": 3, "title": "t", "works": []}"#);
        args.locale = Some("en".into());
        let options = ValidationOptions {
            key_style: KeyStyle::Alias,
            ..ValidationOptions::default()
        };
        let (code, report) = run(&args, options);
        assert_eq!(code, 1);
        assert_eq!(report["failures"]["公式"], "公式 must contain more than 0 items");
    }

    #[test]
    fn test_check_engine_error_propagates() {
        let (_dir, mut args) = setup(r#"{"id": 1}"#);
        args.locale = Some("xx".into());
        let err = run_check(&args, ValidationOptions::default(), &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported locale 'xx'"));
    }
}
