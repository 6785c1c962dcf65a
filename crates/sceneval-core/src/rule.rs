//! # Rule Expressions
//!
//! Parses the comma-separated rule expressions attached to fields, e.g.
//! `required,min=3` or `gt=0,dive,required`. Everything after a `dive`
//! token applies to each element of the collection rather than to the
//! collection itself; dives nest.
//!
//! Grammar keywords are not rules: `dive` switches level, `omitempty`
//! stops the current level on an empty value, and a lone `-` excludes the
//! field from validation.

/// Switches the remaining rules to collection elements.
pub const DIVE: &str = "dive";
/// Stops the current level silently when the value is empty.
pub const OMITEMPTY: &str = "omitempty";
/// Excludes the field from validation.
pub const SKIP: &str = "-";

/// Returns true for tokens that belong to the grammar rather than to a
/// predicate.
pub fn is_keyword(kind: &str) -> bool {
    matches!(kind, DIVE | OMITEMPTY | SKIP)
}

/// A single rule: its kind and optional parameter (`min=3` → `min`, `3`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    /// Rule kind, the name a predicate is registered under.
    pub kind: String,
    /// Raw parameter text after `=`.
    pub param: Option<String>,
}

impl RuleSpec {
    /// Build a spec from its parts.
    pub fn new(kind: impl Into<String>, param: Option<&str>) -> Self {
        Self {
            kind: kind.into(),
            param: param.map(str::to_string),
        }
    }
}

/// Parsed rule expression for one level of a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleChain {
    /// Rules applied to the value at this level, in declaration order.
    /// May contain `omitempty`.
    pub rules: Vec<RuleSpec>,
    /// Rules applied to each element when the expression contains `dive`.
    pub dive: Option<Box<RuleChain>>,
    /// The field is excluded (`-`).
    pub skip: bool,
}

impl RuleChain {
    /// Parse a rule expression. The error is a human-readable reason.
    pub fn parse(expr: &str) -> Result<Self, String> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Ok(Self::default());
        }
        if expr == SKIP {
            return Ok(Self {
                skip: true,
                ..Self::default()
            });
        }
        let tokens: Vec<&str> = expr.split(',').map(str::trim).collect();
        Self::parse_tokens(&tokens)
    }

    fn parse_tokens(tokens: &[&str]) -> Result<Self, String> {
        let mut chain = Self::default();
        for (i, token) in tokens.iter().enumerate() {
            match *token {
                "" => return Err("empty rule between commas".to_string()),
                SKIP => return Err("'-' must be the only rule of a field".to_string()),
                DIVE => {
                    chain.dive = Some(Box::new(Self::parse_tokens(&tokens[i + 1..])?));
                    return Ok(chain);
                }
                _ => {
                    let spec = match token.split_once('=') {
                        Some((kind, _)) if kind.trim().is_empty() => {
                            return Err(format!("rule '{token}' has no kind"));
                        }
                        Some((kind, param)) if param.is_empty() => {
                            return Err(format!("rule '{}' is missing its parameter", kind.trim()));
                        }
                        Some((kind, param)) => RuleSpec::new(kind.trim(), Some(param)),
                        None => RuleSpec::new(*token, None),
                    };
                    chain.rules.push(spec);
                }
            }
        }
        Ok(chain)
    }

    /// True when the chain contains no rules at any level and does not dive.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.dive.is_none()
    }

    /// Nesting depth of `dive` tokens.
    pub fn dive_depth(&self) -> usize {
        match &self.dive {
            Some(inner) => 1 + inner.dive_depth(),
            None => 0,
        }
    }

    /// Every predicate kind referenced at any level, keywords excluded.
    pub fn kinds(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .rules
            .iter()
            .map(|r| r.kind.as_str())
            .filter(|k| !is_keyword(k))
            .collect();
        if let Some(inner) = &self.dive {
            out.extend(inner.kinds());
        }
        out
    }
}
