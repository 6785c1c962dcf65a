//! # Message Translator
//!
//! A [`Translator`] renders the message for one rule failure in the
//! requested locale. It is built per validation call from the default
//! catalogs plus the subject's message overrides.
//!
//! ## Lookup order
//!
//! 1. subject override for the rule kind;
//! 2. requested catalog, class-specific entry then plain entry;
//! 3. fallback catalog, same two entries;
//! 4. the generic message naming the path, field, and rule kind.
//!
//! Override templates may only use `{0}`, the field's display name.

use sceneval_core::{FieldPath, MessageOverrides, SetupError};

use crate::catalog::Catalog;
use crate::locale::Locale;
use crate::template::Template;

/// What a rendered message is about.
#[derive(Debug, Clone, Copy)]
pub struct MessageArgs<'a> {
    /// Failing rule kind.
    pub kind: &'a str,
    /// Value class suffix (`string`, `number`, `items`), if any.
    pub variant: Option<&'a str>,
    /// Display name filled into `{0}`.
    pub label: &'a str,
    /// Rule parameter filled into `{1}`.
    pub param: Option<&'a str>,
    /// Path of the failing value.
    pub path: &'a FieldPath,
}

/// Locale-bound message renderer.
#[derive(Debug, Clone)]
pub struct Translator {
    primary: Catalog,
    fallback: Catalog,
    overrides: Catalog,
}

impl Translator {
    /// Build a translator for `locale`. The fallback is `preferred_fallback`
    /// unless that equals `locale`, in which case another supported locale
    /// is used.
    ///
    /// # Errors
    ///
    /// [`SetupError::InvalidTemplate`] if a default catalog fails to load.
    pub fn new(locale: Locale, preferred_fallback: Locale) -> Result<Self, SetupError> {
        let fallback = locale.distinct_fallback(preferred_fallback);
        tracing::debug!(%locale, %fallback, "building translator");
        Ok(Self {
            primary: Catalog::defaults(locale)?,
            fallback: Catalog::defaults(fallback)?,
            overrides: Catalog::empty(locale),
        })
    }

    /// Parse a locale code and build a translator for it.
    ///
    /// # Errors
    ///
    /// [`SetupError::UnsupportedLocale`] for a code with no catalog.
    pub fn for_code(code: &str, preferred_fallback: Locale) -> Result<Self, SetupError> {
        Self::new(code.parse()?, preferred_fallback)
    }

    /// Overlay subject message overrides. A later overlay replaces earlier
    /// entries for the same rule kind.
    ///
    /// # Errors
    ///
    /// [`SetupError::InvalidTemplate`] if an override does not parse or uses
    /// a placeholder other than `{0}`.
    pub fn with_overrides(mut self, overrides: &MessageOverrides) -> Result<Self, SetupError> {
        for (kind, text) in overrides {
            let invalid = |reason: String| SetupError::InvalidTemplate {
                kind: kind.clone(),
                template: text.clone(),
                reason,
            };
            let template = Template::parse(text).map_err(invalid)?;
            if template.max_arg().is_some_and(|i| i > 0) {
                return Err(invalid(
                    "override templates accept only the {0} placeholder".to_string(),
                ));
            }
            self.overrides.insert(kind, text)?;
        }
        Ok(self)
    }

    /// Requested locale.
    pub fn locale(&self) -> Locale {
        self.primary.locale()
    }

    /// Locale consulted for missing templates.
    pub fn fallback(&self) -> Locale {
        self.fallback.locale()
    }

    /// Render the message for one failure.
    pub fn render(&self, args: &MessageArgs<'_>) -> String {
        let template = self
            .overrides
            .get(args.kind)
            .or_else(|| self.primary.lookup(args.kind, args.variant))
            .or_else(|| self.fallback.lookup(args.kind, args.variant));
        match template {
            Some(t) => t.fill(&[args.label, args.param.unwrap_or_default()]),
            None => generic_message(args),
        }
    }
}

fn generic_message(args: &MessageArgs<'_>) -> String {
    let field = args
        .path
        .terminal()
        .map_or(args.path.record(), |s| s.key.as_str());
    format!(
        "Key: '{}' Error:Field validation for '{}' failed on the '{}' tag",
        args.path, field, args.kind
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args<'a>(
        kind: &'a str,
        variant: Option<&'a str>,
        label: &'a str,
        path: &'a FieldPath,
    ) -> MessageArgs<'a> {
        MessageArgs {
            kind,
            variant,
            label,
            param: Some("1"),
            path,
        }
    }

    fn overrides(pairs: &[(&str, &str)]) -> MessageOverrides {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_catalog_render() {
        let path = FieldPath::root("Example").child("works");
        let t = Translator::new(Locale::Zh, Locale::En).unwrap();
        assert_eq!(t.render(&args("gt", Some("items"), "公式", &path)), "公式必须大于1项");
        let t = Translator::new(Locale::En, Locale::En).unwrap();
        assert_eq!(t.fallback(), Locale::Zh);
        assert_eq!(
            t.render(&args("gt", Some("items"), "works", &path)),
            "works must contain more than 1 items"
        );
    }

    #[test]
    fn test_override_wins_and_last_write_wins() {
        let path = FieldPath::root("Example").child("title");
        let t = Translator::new(Locale::Zh, Locale::En)
            .unwrap()
            .with_overrides(&overrides(&[("required", "{0}不能为空")]))
            .unwrap()
            .with_overrides(&overrides(&[("required", "{0}是必须的")]))
            .unwrap();
        assert_eq!(
            t.render(&args("required", Some("string"), "标题", &path)),
            "标题是必须的"
        );
    }

    #[test]
    fn test_override_with_second_placeholder_rejected() {
        let err = Translator::new(Locale::Zh, Locale::En)
            .unwrap()
            .with_overrides(&overrides(&[("min", "{0} needs {1}")]))
            .unwrap_err();
        assert!(err.to_string().contains("only the {0} placeholder"));
    }

    #[test]
    fn test_unparsable_override_rejected() {
        let result = Translator::new(Locale::Zh, Locale::En)
            .unwrap()
            .with_overrides(&overrides(&[("required", "{0")]));
        assert!(matches!(result, Err(SetupError::InvalidTemplate { .. })));
    }

    #[test]
    fn test_override_with_stray_closing_brace_accepted() {
        let path = FieldPath::root("Author").child("age");
        let t = Translator::new(Locale::Zh, Locale::En)
            .unwrap()
            .with_overrides(&overrides(&[("CheckAge", "年龄不对}")]))
            .unwrap();
        assert_eq!(t.render(&args("CheckAge", None, "年龄", &path)), "年龄不对}");
    }

    #[test]
    fn test_unsupported_code() {
        assert!(matches!(
            Translator::for_code("fr", Locale::En),
            Err(SetupError::UnsupportedLocale(code)) if code == "fr"
        ));
    }

    #[test]
    fn test_custom_kind_without_template_renders_generic() {
        let path = FieldPath::root("Example").child("author").child("age");
        let t = Translator::new(Locale::Zh, Locale::En).unwrap();
        assert_eq!(
            t.render(&args("CheckAge", Some("string"), "年龄", &path)),
            "Key: 'Example.author.age' Error:Field validation for 'age' failed on the 'CheckAge' tag"
        );
    }

    #[test]
    fn test_plain_override_without_placeholder() {
        let path = FieldPath::root("Example").child("author").child("age");
        let t = Translator::new(Locale::En, Locale::Zh)
            .unwrap()
            .with_overrides(&overrides(&[("CheckAge", "age must be 1")]))
            .unwrap();
        assert_eq!(t.render(&args("CheckAge", None, "Age", &path)), "age must be 1");
    }
}
