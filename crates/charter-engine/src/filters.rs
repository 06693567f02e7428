//! Chart template filters
//!
//! These extend MiniJinja with the YAML and string helpers chart templates
//! lean on. `toyaml` is the one the output format depends on: it must emit a
//! document without a trailing newline so templates control their own layout.

use base64::Engine as _;
use minijinja::{Error, ErrorKind, Value};

/// Serialize a value to YAML, trimming exactly one trailing newline
///
/// Usage: {{ ports | toyaml }}
pub fn toyaml(value: Value) -> Result<String, Error> {
    let json_value: serde_json::Value = serde_json::to_value(&value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    let yaml = serde_yaml::to_string(&json_value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    let yaml = yaml.strip_prefix("---\n").unwrap_or(&yaml);
    Ok(yaml.strip_suffix('\n').unwrap_or(yaml).to_string())
}

/// Serialize a value to compact JSON
///
/// Usage: {{ config.param_env_vars | tojson }}
pub fn tojson(value: Value) -> Result<String, Error> {
    let json_value: serde_json::Value = serde_json::to_value(&value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    serde_json::to_string(&json_value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
}

/// Quote a string with double quotes
///
/// Usage: {{ name | quote }}
#[must_use]
pub fn quote(value: Value) -> String {
    let s = value.as_str().map_or_else(|| value.to_string(), String::from);
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Quote a string with single quotes
///
/// Usage: {{ name | squote }}
#[must_use]
pub fn squote(value: Value) -> String {
    let s = value.as_str().map_or_else(|| value.to_string(), String::from);
    format!("'{}'", s.replace('\'', "''"))
}

/// Indent every non-empty line
///
/// Usage: {{ content | indent(4) }}
#[must_use]
pub fn indent(value: String, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    let mut result = String::with_capacity(value.len() + spaces * value.lines().count());
    let mut first = true;

    for line in value.lines() {
        if !first {
            result.push('\n');
        }
        first = false;

        if !line.is_empty() {
            result.push_str(&pad);
        }
        result.push_str(line);
    }

    result
}

/// Indent with a leading newline, for inline map/list splicing
///
/// Usage: ports:{{ ports | toyaml | nindent(2) }}
#[must_use]
pub fn nindent(value: String, spaces: usize) -> String {
    format!("\n{}", indent(value, spaces))
}

/// Base64 encode a string
///
/// Usage: {{ secret | b64encode }}
#[must_use]
pub fn b64encode(value: String) -> String {
    base64::engine::general_purpose::STANDARD.encode(value.as_bytes())
}

/// Truncate a string to at most `len` characters
///
/// Usage: {{ name | trunc(63) }}
#[must_use]
pub fn trunc(value: String, len: usize) -> String {
    value.chars().take(len).collect()
}

/// Strip a prefix when present
///
/// Usage: {{ tag | trimprefix("v") }}
#[must_use]
pub fn trimprefix(value: String, prefix: String) -> String {
    value.strip_prefix(&prefix).unwrap_or(&value).to_string()
}

/// Strip a suffix when present
///
/// Usage: {{ name | trimsuffix("-latest") }}
#[must_use]
pub fn trimsuffix(value: String, suffix: String) -> String {
    value.strip_suffix(&suffix).unwrap_or(&value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toyaml_no_trailing_newline() {
        let value = Value::from_serialize(serde_json::json!({"a": 1, "b": "two"}));
        let yaml = toyaml(value).unwrap();
        assert!(!yaml.ends_with('\n'));
        assert_eq!(yaml, "a: 1\nb: two");
    }

    #[test]
    fn test_toyaml_list() {
        let value = Value::from_serialize(serde_json::json!([
            {"number": 80, "protocol": "tcp"},
            {"number": 443, "protocol": "tcp"}
        ]));
        let yaml = toyaml(value).unwrap();
        assert_eq!(
            yaml,
            "- number: 80\n  protocol: tcp\n- number: 443\n  protocol: tcp"
        );
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(Value::from("a\"b")), "\"a\\\"b\"");
    }

    #[test]
    fn test_indent_skips_empty_lines() {
        assert_eq!(indent("a\n\nb".to_string(), 2), "  a\n\n  b");
    }

    #[test]
    fn test_nindent_leads_with_newline() {
        assert_eq!(nindent("a: 1".to_string(), 2), "\n  a: 1");
    }

    #[test]
    fn test_trunc() {
        assert_eq!(trunc("abcdef".to_string(), 3), "abc");
        assert_eq!(trunc("ab".to_string(), 3), "ab");
    }

    #[test]
    fn test_trimprefix() {
        assert_eq!(trimprefix("v1.2.3".to_string(), "v".to_string()), "1.2.3");
        assert_eq!(trimprefix("1.2.3".to_string(), "v".to_string()), "1.2.3");
    }
}
