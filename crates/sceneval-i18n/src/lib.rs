//! # sceneval-i18n — Message Translation
//!
//! Turns rule failures into human-readable messages.
//!
//! - [`Locale`] — supported languages (`zh` base, `en`).
//! - [`Catalog`] — default templates per locale, with class-specific
//!   variants for the measuring rules.
//! - [`Translator`] — requested catalog, a distinct fallback catalog, and
//!   the subject's overrides layered on top.
//!
//! ## Crate Policy
//!
//! - Depends only on `sceneval-core` internally.
//! - Template problems surface as [`SetupError`](sceneval_core::SetupError)
//!   and abort the call; they are never swallowed.

pub mod catalog;
pub mod locale;
pub mod template;
pub mod translator;

pub use catalog::Catalog;
pub use locale::Locale;
pub use template::Template;
pub use translator::{MessageArgs, Translator};
