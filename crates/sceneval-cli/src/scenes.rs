//! # `sceneval scenes`
//!
//! Lists the scenes a descriptor declares, the field keys each selects,
//! and any rule overrides that are accepted but not applied.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sceneval_core::scene::resolve;
use sceneval_core::{DocumentSubject, Subject};
use serde::Serialize;
use serde_json::Value;

use crate::input::load_value;

/// Arguments of `sceneval scenes`.
#[derive(Args, Debug)]
pub struct ScenesArgs {
    /// Record descriptor (YAML or JSON).
    #[arg(long)]
    pub descriptor: PathBuf,
}

#[derive(Debug, Serialize)]
struct SceneSummary {
    fields: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    unapplied_overrides: BTreeMap<String, String>,
}

/// Execute `sceneval scenes`, writing the listing to `out`.
pub fn run_scenes(args: &ScenesArgs, out: &mut impl Write) -> Result<u8> {
    let descriptor = load_value(&args.descriptor)?;
    let subject = DocumentSubject::new(&descriptor, Value::Null)
        .with_context(|| format!("reading descriptor: {}", args.descriptor.display()))?;
    let scenes = subject
        .scenes()
        .with_context(|| format!("reading scenes: {}", args.descriptor.display()))?;

    let listing: BTreeMap<&str, SceneSummary> = scenes
        .iter()
        .map(|(name, scene)| {
            let resolved = resolve(&scenes, name);
            let summary = SceneSummary {
                fields: scene.keys().into_iter().map(str::to_string).collect(),
                unapplied_overrides: resolved.unapplied_overrides.into_iter().collect(),
            };
            (name, summary)
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &listing).context("writing scene listing")?;
    writeln!(out)?;
    tracing::debug!(scenes = listing.len(), "listed scenes");
    Ok(0)
}
