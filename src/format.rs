//! Message template rendering.
//!
//! Error messages are rendered from a template and positional parameters by a
//! [`MessageFormatter`]. The library treats the formatter as opaque; swapping it
//! on a [`ValidationContext`](crate::ValidationContext) is how messages get
//! localized.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// Renders a message template with positional parameters.
pub trait MessageFormatter: Send + Sync {
    /// Returns the rendered message.
    fn format(&self, template: &str, params: &[Value]) -> String;
}

impl<F> MessageFormatter for F
where
    F: Fn(&str, &[Value]) -> String + Send + Sync,
{
    fn format(&self, template: &str, params: &[Value]) -> String {
        self(template, params)
    }
}

/// The default formatter.
///
/// - `{}` is replaced by the next parameter.
/// - `{N}` is replaced by parameter `N` and does not advance `{}`.
/// - `{{` and `}}` render a literal brace.
///
/// String parameters are written without quotes, everything else as JSON text.
/// A placeholder without a matching parameter is left as written.
///
/// ```rust
/// use faultline::{MessageFormatter, PositionalFormatter};
/// use serde_json::json;
///
/// let text = PositionalFormatter.format("{} must be at least {}", &[json!("age"), json!(18)]);
/// assert_eq!(text, "age must be at least 18");
///
/// let text = PositionalFormatter.format("{1} before {0}, {{literal}}", &[json!("a"), json!("b")]);
/// assert_eq!(text, "b before a, {literal}");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalFormatter;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{|\}\}|\{(\d*)\}").expect("placeholder pattern is valid"))
}

impl MessageFormatter for PositionalFormatter {
    fn format(&self, template: &str, params: &[Value]) -> String {
        let mut out = String::with_capacity(template.len());
        let mut last = 0;
        let mut next = 0;

        for caps in placeholder_regex().captures_iter(template) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&template[last..whole.start()]);
            last = whole.end();

            match whole.as_str() {
                "{{" => out.push('{'),
                "}}" => out.push('}'),
                placeholder => {
                    let index = match caps.get(1).map(|m| m.as_str()) {
                        Some("") | None => {
                            next += 1;
                            Some(next - 1)
                        }
                        Some(digits) => digits.parse::<usize>().ok(),
                    };
                    match index.and_then(|i| params.get(i)) {
                        Some(value) => out.push_str(&render_param(value)),
                        None => out.push_str(placeholder),
                    }
                }
            }
        }

        out.push_str(&template[last..]);
        out
    }
}

/// Renders a single parameter the way it appears inside a message.
pub fn render_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
