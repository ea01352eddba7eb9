//! HTML entity escaping for the safe-output expression form.
use crate::lexer::Value;

/// Escape the five HTML-significant characters plus the forward slash.
///
/// The ampersand is handled together with the other characters in a
/// single pass, so entities produced by the later substitutions are
/// never escaped twice.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            c => escaped.push(c),
        }
    }

    escaped
}

/// Escaping is a no-op for non-text values; numbers and booleans
/// pass through raw.
pub fn escape(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(escape_html(s)),
        value => value.clone(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;&#x2F;script&gt;"
        );
    }

    #[test]
    fn test_no_double_escaping() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_non_string_passthrough() {
        assert_eq!(escape(&Value::Integer(5)), Value::Integer(5));
        assert_eq!(escape(&Value::Boolean(true)), Value::Boolean(true));
    }
}
