//! Message templates with positional placeholders (`{0}`, `{1}`).
//!
//! `{0}` is the field's display name and `{1}` the rule parameter. `{{` and
//! `}}` escape literal braces; a lone `}` is kept as text.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text(String),
    Arg(usize),
}

/// A parsed template.
#[derive(Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    parts: Vec<Part>,
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Template").field(&self.source).finish()
    }
}

impl Template {
    /// Parse template text. The error is a human-readable reason.
    pub fn parse(source: &str) -> Result<Self, String> {
        let mut parts = Vec::new();
        let mut text = String::new();
        let mut chars = source.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(d) => digits.push(d),
                            None => return Err("unclosed '{'".to_string()),
                        }
                    }
                    let index = digits
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| format!("placeholder '{{{digits}}}' is not a position"))?;
                    if !text.is_empty() {
                        parts.push(Part::Text(std::mem::take(&mut text)));
                    }
                    parts.push(Part::Arg(index));
                }
                other => text.push(other),
            }
        }
        if !text.is_empty() {
            parts.push(Part::Text(text));
        }
        Ok(Self {
            source: source.to_string(),
            parts,
        })
    }

    /// The raw template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Highest placeholder position used, if any.
    pub fn max_arg(&self) -> Option<usize> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Arg(i) => Some(*i),
                Part::Text(_) => None,
            })
            .max()
    }

    /// Fill placeholders. Positions without an argument render empty.
    pub fn fill(&self, args: &[&str]) -> String {
        let mut out = String::with_capacity(self.source.len());
        for part in &self.parts {
            match part {
                Part::Text(t) => out.push_str(t),
                Part::Arg(i) => out.push_str(args.get(*i).copied().unwrap_or_default()),
            }
        }
        out
    }
}
