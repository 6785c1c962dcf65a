//! # Default Catalogs
//!
//! The complete template set for the built-in rule kinds in each supported
//! locale. Measuring rules have one entry per value class (`min-string`,
//! `min-number`, `min-items`); the other kinds have a single entry.

use std::collections::HashMap;

use sceneval_core::SetupError;

use crate::locale::Locale;
use crate::template::Template;

const ZH: &[(&str, &str)] = &[
    ("required", "{0}为必填字段"),
    ("len-string", "{0}长度必须是{1}个字符"),
    ("len-number", "{0}必须等于{1}"),
    ("len-items", "{0}必须包含{1}项"),
    ("min-string", "{0}长度必须至少为{1}个字符"),
    ("min-number", "{0}最小只能为{1}"),
    ("min-items", "{0}必须至少包含{1}项"),
    ("max-string", "{0}长度不能超过{1}个字符"),
    ("max-number", "{0}必须小于或等于{1}"),
    ("max-items", "{0}最多只能包含{1}项"),
    ("eq", "{0}不等于{1}"),
    ("ne", "{0}不能等于{1}"),
    ("lt-string", "{0}长度必须小于{1}个字符"),
    ("lt-number", "{0}必须小于{1}"),
    ("lt-items", "{0}必须包含少于{1}项"),
    ("lte-string", "{0}长度不能超过{1}个字符"),
    ("lte-number", "{0}必须小于或等于{1}"),
    ("lte-items", "{0}最多只能包含{1}项"),
    ("gt-string", "{0}长度必须大于{1}个字符"),
    ("gt-number", "{0}必须大于{1}"),
    ("gt-items", "{0}必须大于{1}项"),
    ("gte-string", "{0}长度必须至少为{1}个字符"),
    ("gte-number", "{0}必须大于或等于{1}"),
    ("gte-items", "{0}必须至少包含{1}项"),
    ("oneof", "{0}必须是[{1}]中的一个"),
    ("email", "{0}必须是一个有效的邮箱"),
    ("alpha", "{0}只能包含字母"),
    ("alphanum", "{0}只能包含字母和数字"),
    ("numeric", "{0}必须是一个有效的数值"),
];

const EN: &[(&str, &str)] = &[
    ("required", "{0} is a required field"),
    ("len-string", "{0} must be {1} characters in length"),
    ("len-number", "{0} must be equal to {1}"),
    ("len-items", "{0} must contain {1} items"),
    ("min-string", "{0} must be at least {1} characters in length"),
    ("min-number", "{0} must be {1} or greater"),
    ("min-items", "{0} must contain at least {1} items"),
    ("max-string", "{0} must be a maximum of {1} characters in length"),
    ("max-number", "{0} must be {1} or less"),
    ("max-items", "{0} must contain at maximum {1} items"),
    ("eq", "{0} is not equal to {1}"),
    ("ne", "{0} should not be equal to {1}"),
    ("lt-string", "{0} must be less than {1} characters in length"),
    ("lt-number", "{0} must be less than {1}"),
    ("lt-items", "{0} must contain less than {1} items"),
    ("lte-string", "{0} must be at maximum {1} characters in length"),
    ("lte-number", "{0} must be {1} or less"),
    ("lte-items", "{0} must contain at maximum {1} items"),
    ("gt-string", "{0} must be greater than {1} characters in length"),
    ("gt-number", "{0} must be greater than {1}"),
    ("gt-items", "{0} must contain more than {1} items"),
    ("gte-string", "{0} must be at least {1} characters in length"),
    ("gte-number", "{0} must be {1} or greater"),
    ("gte-items", "{0} must contain at least {1} items"),
    ("oneof", "{0} must be one of [{1}]"),
    ("email", "{0} must be a valid email address"),
    ("alpha", "{0} can only contain alphabetic characters"),
    ("alphanum", "{0} can only contain alphanumeric characters"),
    ("numeric", "{0} must be a valid numeric value"),
];

/// Parsed templates of one locale, keyed by catalog key.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: Locale,
    templates: HashMap<String, Template>,
}

impl Catalog {
    /// An empty catalog.
    pub fn empty(locale: Locale) -> Self {
        Self {
            locale,
            templates: HashMap::new(),
        }
    }

    /// The built-in catalog for `locale`.
    ///
    /// # Errors
    ///
    /// [`SetupError::InvalidTemplate`] if a default template does not parse.
    pub fn defaults(locale: Locale) -> Result<Self, SetupError> {
        let entries = match locale {
            Locale::Zh => ZH,
            Locale::En => EN,
        };
        let mut catalog = Self::empty(locale);
        for (key, text) in entries {
            catalog.insert(key, text)?;
        }
        Ok(catalog)
    }

    /// Parse and register a template, replacing any previous entry.
    pub fn insert(&mut self, key: &str, text: &str) -> Result<(), SetupError> {
        let template = Template::parse(text).map_err(|reason| SetupError::InvalidTemplate {
            kind: key.to_string(),
            template: text.to_string(),
            reason,
        })?;
        self.templates.insert(key.to_string(), template);
        Ok(())
    }

    /// Look up a template by catalog key.
    pub fn get(&self, key: &str) -> Option<&Template> {
        self.templates.get(key)
    }

    /// Look up the class-specific entry (`min-string`), then the plain one.
    pub fn lookup(&self, kind: &str, variant: Option<&str>) -> Option<&Template> {
        variant
            .and_then(|v| self.get(&format!("{kind}-{v}")))
            .or_else(|| self.get(kind))
    }

    /// The catalog's locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_defaults_parse_for_every_locale() {
        for locale in Locale::all() {
            let catalog = Catalog::defaults(*locale).unwrap();
            assert_eq!(catalog.locale(), *locale);
            assert!(!catalog.is_empty());
        }
    }

    #[test]
    fn test_locales_cover_the_same_keys() {
        let zh: BTreeSet<_> = ZH.iter().map(|(k, _)| *k).collect();
        let en: BTreeSet<_> = EN.iter().map(|(k, _)| *k).collect();
        assert_eq!(zh, en);
        assert_eq!(zh.len(), ZH.len());
    }

    #[test]
    fn test_lookup_prefers_variant() {
        let catalog = Catalog::defaults(Locale::Zh).unwrap();
        let t = catalog.lookup("min", Some("items")).unwrap();
        assert_eq!(t.fill(&["公式", "1"]), "公式必须至少包含1项");
        let t = catalog.lookup("required", Some("string")).unwrap();
        assert_eq!(t.fill(&["标题"]), "标题为必填字段");
        assert!(catalog.lookup("min", None).is_none());
        assert!(catalog.lookup("CheckAge", Some("number")).is_none());
    }

    #[test]
    fn test_insert_rejects_bad_template() {
        let mut catalog = Catalog::empty(Locale::En);
        let err = catalog.insert("required", "{0 is required").unwrap_err();
        assert!(matches!(err, SetupError::InvalidTemplate { kind, .. } if kind == "required"));
        assert!(catalog.is_empty());
    }
}
