//! # Locales
//!
//! The languages the default catalogs cover. Region suffixes are accepted
//! and ignored (`zh-CN`, `en_US`), so callers can pass what their request
//! headers carry.

use std::fmt;
use std::str::FromStr;

use sceneval_core::SetupError;
use serde::{Deserialize, Serialize};

/// A supported message language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    /// Simplified Chinese, the base language.
    #[default]
    Zh,
    /// English.
    En,
}

impl Locale {
    /// Every supported locale, base language first.
    pub fn all() -> &'static [Locale] {
        &[Locale::Zh, Locale::En]
    }

    /// The language code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }

    /// Pick a fallback distinct from `self`, preferring `preferred`.
    pub fn distinct_fallback(self, preferred: Locale) -> Locale {
        if preferred != self {
            return preferred;
        }
        Locale::all()
            .iter()
            .copied()
            .find(|l| *l != self)
            .unwrap_or(preferred)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = SetupError;

    /// Parse a language code, ignoring case and any region suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "zh" => Ok(Self::Zh),
            "en" => Ok(Self::En),
            _ => Err(SetupError::UnsupportedLocale(s.to_string())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = SetupError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_region() {
        assert_eq!("zh".parse::<Locale>().unwrap(), Locale::Zh);
        assert_eq!("zh-CN".parse::<Locale>().unwrap(), Locale::Zh);
        assert_eq!("EN_us".parse::<Locale>().unwrap(), Locale::En);
    }

    #[test]
    fn test_unsupported_locale_is_setup_error() {
        assert_eq!(
            "fr".parse::<Locale>(),
            Err(SetupError::UnsupportedLocale("fr".into()))
        );
        assert!("".parse::<Locale>().is_err());
    }

    #[test]
    fn test_fallback_is_always_distinct() {
        assert_eq!(Locale::Zh.distinct_fallback(Locale::En), Locale::En);
        assert_eq!(Locale::En.distinct_fallback(Locale::En), Locale::Zh);
        for l in Locale::all() {
            for p in Locale::all() {
                assert_ne!(l.distinct_fallback(*p), *l);
            }
        }
    }

    #[test]
    fn test_serde_uses_language_code() {
        let json = serde_json::to_string(&Locale::En).unwrap();
        assert_eq!(json, "\"en\"");
        let parsed: Locale = serde_json::from_str("\"zh-TW\"").unwrap();
        assert_eq!(parsed, Locale::Zh);
        assert!(serde_json::from_str::<Locale>("\"de\"").is_err());
    }
}
