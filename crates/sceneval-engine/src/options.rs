//! Validator configuration.

use sceneval_i18n::Locale;
use serde::{Deserialize, Serialize};

/// How failure keys are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStyle {
    /// Record-relative serialization path: `works[0].code`.
    #[default]
    Path,
    /// Same path with the terminal key replaced by its display name:
    /// `works[0].代码`.
    Alias,
}

/// Options shared by every call on one [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationOptions {
    /// Locale used when a call passes none.
    pub default_locale: Locale,
    /// Catalog consulted when the requested one has no template. Replaced
    /// by another supported locale when it equals the requested one.
    pub fallback_locale: Locale,
    /// Failure key format.
    pub key_style: KeyStyle,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            default_locale: Locale::Zh,
            fallback_locale: Locale::En,
            key_style: KeyStyle::Path,
        }
    }
}
