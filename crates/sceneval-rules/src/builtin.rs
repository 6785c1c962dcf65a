//! # Built-in Predicates
//!
//! The rule kinds every subject can use without declaring them. Measuring
//! rules (`len`, `min`, `max`, `gt`, `gte`, `lt`, `lte`) compare the value's
//! measure against a numeric parameter: character count for strings, the
//! value for numbers, element count for arrays and objects. A parameter
//! that does not parse, or a value that cannot be measured, fails the rule.

use std::sync::OnceLock;

use regex::Regex;
use sceneval_core::{FieldContext, RuleBook};
use serde_json::Value;

use crate::value::{has_value, measure, scalar_text};

/// Names of all built-in rule kinds.
pub const BUILTIN_KINDS: &[&str] = &[
    "required", "len", "min", "max", "eq", "ne", "gt", "gte", "lt", "lte", "oneof", "email",
    "alpha", "alphanum", "numeric",
];

fn compare(ctx: &FieldContext<'_>, cmp: fn(f64, f64) -> bool) -> bool {
    let Some(limit) = ctx.param().and_then(|p| p.trim().parse::<f64>().ok()) else {
        return false;
    };
    measure(ctx.value()).is_some_and(|m| cmp(m, limit))
}

fn equals(ctx: &FieldContext<'_>) -> bool {
    let Some(param) = ctx.param() else {
        return false;
    };
    match ctx.value() {
        Value::String(s) => s == param,
        Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            compare(ctx, |m, limit| m == limit)
        }
        Value::Bool(b) => param.trim().parse::<bool>().is_ok_and(|p| p == *b),
        Value::Null => false,
    }
}

fn one_of(ctx: &FieldContext<'_>) -> bool {
    let (Some(param), Some(text)) = (ctx.param(), scalar_text(ctx.value())) else {
        return false;
    };
    param.split_whitespace().any(|choice| choice == text)
}

fn pattern(cell: &'static OnceLock<Option<Regex>>, source: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(source).ok()).as_ref()
}

fn matches_text(value: &Value, re: Option<&Regex>) -> bool {
    match (value, re) {
        (Value::String(s), Some(re)) => re.is_match(s),
        _ => false,
    }
}

fn email(value: &Value) -> bool {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    matches_text(value, pattern(&RE, r"^[^\s@]+@[^\s@]+\.[^\s@]+$"))
}

fn alpha(value: &Value) -> bool {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    matches_text(value, pattern(&RE, r"^[a-zA-Z]+$"))
}

fn alphanum(value: &Value) -> bool {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    matches_text(value, pattern(&RE, r"^[a-zA-Z0-9]+$"))
}

fn numeric(value: &Value) -> bool {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    match value {
        Value::Number(_) => true,
        other => matches_text(other, pattern(&RE, r"^[-+]?[0-9]+(?:\.[0-9]+)?$")),
    }
}

/// The built-in rule book.
pub fn builtins() -> RuleBook {
    RuleBook::new()
        .value("required", has_value)
        .context("len", |ctx| compare(ctx, |m, limit| m == limit))
        .context("min", |ctx| compare(ctx, |m, limit| m >= limit))
        .context("max", |ctx| compare(ctx, |m, limit| m <= limit))
        .context("gt", |ctx| compare(ctx, |m, limit| m > limit))
        .context("gte", |ctx| compare(ctx, |m, limit| m >= limit))
        .context("lt", |ctx| compare(ctx, |m, limit| m < limit))
        .context("lte", |ctx| compare(ctx, |m, limit| m <= limit))
        .context("eq", equals)
        .context("ne", |ctx| ctx.param().is_some() && !equals(ctx))
        .context("oneof", one_of)
        .value("email", email)
        .value("alpha", alpha)
        .value("alphanum", alphanum)
        .value("numeric", numeric)
}
