//! # sceneval-cli — Command-Line Validation
//!
//! Provides the `sceneval` command, which validates YAML or JSON documents
//! against a record descriptor without writing any Rust.
//!
//! ## Subcommands
//!
//! - `sceneval check` — validate a document, optionally in a scene.
//! - `sceneval scenes` — list a descriptor's scenes.
//!
//! ```bash
//! sceneval check --descriptor example.yaml --document input.json --scene create
//! sceneval -v --config sceneval.yaml check --descriptor example.yaml --document input.yaml
//! sceneval scenes --descriptor example.yaml
//! ```
//!
//! ## Exit Codes
//!
//! `0` pass, `1` validation failures, `2` any error (unreadable input,
//! malformed metadata, unsupported locale).

pub mod check;
pub mod input;
pub mod scenes;

/// Exit code for an error that prevented validation.
pub const EXIT_ERROR: u8 = 2;
