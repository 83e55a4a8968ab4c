//! Template rendering for the config file.
//!
//! The config file is rendered before it is parsed as YAML, so values can be
//! pulled from the environment:
//!
//! ```yaml
//! production:
//!   push_api_key: "${APPSIGNAL_PUSH_API_KEY}"
//!   endpoint: "${APPSIGNAL_ENDPOINT:-https://push.appsignal.com/1}"
//! ```
//!
//! # Syntax
//!
//! - `${NAME}` - replaced with the variable's value, or nothing when unset
//! - `${NAME:-fallback}` - replaced with `fallback` when unset or empty
//! - `$${escaped}` - produces literal `${escaped}` in output
//! - `$` not followed by `{` is kept as is
//!
//! ERB tags (`<%= ENV['KEY'] %>`) from older config generators are not
//! evaluated; [`find_erb_tag`] lets the loader reject such files.

use std::collections::HashMap;

/// A segment of a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference with optional fallback
    Variable {
        name: String,
        fallback: Option<String>,
    },
}

/// Split a template into literal and variable segments.
///
/// An unterminated `${` is kept as literal text.
pub fn parse_template(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        literal.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(escaped) = after.strip_prefix("${") {
            // $${...} -> literal ${...}
            match escaped.find('}') {
                Some(end) => {
                    literal.push_str("${");
                    literal.push_str(&escaped[..=end]);
                    rest = &escaped[end + 1..];
                }
                None => {
                    literal.push_str("${");
                    rest = escaped;
                }
            }
        } else if let Some(body) = after.strip_prefix('{') {
            match body.find('}') {
                Some(end) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(variable(&body[..end]));
                    rest = &body[end + 1..];
                }
                None => {
                    literal.push_str("${");
                    rest = body;
                }
            }
        } else {
            literal.push('$');
            rest = after;
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

fn variable(body: &str) -> Segment {
    match body.split_once(":-") {
        Some((name, fallback)) => Segment::Variable {
            name: name.trim().to_string(),
            fallback: Some(fallback.to_string()),
        },
        None => Segment::Variable {
            name: body.trim().to_string(),
            fallback: None,
        },
    }
}

/// Find the first ERB tag (`<% ... %>`) in `input`, if any.
pub fn find_erb_tag(input: &str) -> Option<&str> {
    let start = input.find("<%")?;
    let end = input[start..].find("%>")?;
    Some(&input[start..start + end + 2])
}

/// Variables available while rendering.
#[derive(Debug, Default, Clone)]
pub struct TemplateContext {
    /// Environment variables
    pub env: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a context from an environment map.
    pub fn new(env: HashMap<String, String>) -> Self {
        Self { env }
    }

    /// Create a context from the process environment.
    pub fn from_system_env() -> Self {
        Self::new(
            std::env::vars_os()
                .map(|(k, v)| {
                    (
                        k.to_string_lossy().into_owned(),
                        v.to_string_lossy().into_owned(),
                    )
                })
                .collect(),
        )
    }

    /// Look up a variable.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }
}

/// Render a template.
///
/// Never fails: unset variables without a fallback render as empty text.
pub fn render_template(input: &str, context: &TemplateContext) -> String {
    let mut result = String::with_capacity(input.len());

    for segment in parse_template(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable { name, fallback } => {
                let value = match (context.resolve(&name), fallback.as_deref()) {
                    (Some(v), Some(fallback)) if v.is_empty() => fallback,
                    (Some(v), _) => v,
                    (None, fallback) => fallback.unwrap_or_default(),
                };
                result.push_str(value);
            }
        }
    }

    result
}
