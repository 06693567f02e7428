//! Chart template functions

use minijinja::value::Rest;
use minijinja::{Error, ErrorKind, Value};

/// Fail rendering with a custom error message
///
/// Usage: {{ fail("ports are required") }}
pub fn fail(message: String) -> Result<Value, Error> {
    Err(Error::new(ErrorKind::InvalidOperation, message))
}

/// Build a dict from key-value pairs
///
/// Usage: {{ dict("name", config.project_name, "tag", version) }}
pub fn dict(args: Rest<Value>) -> Result<Value, Error> {
    if args.len() % 2 != 0 {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            "dict requires an even number of arguments (key-value pairs)",
        ));
    }

    let mut map = serde_json::Map::new();
    for chunk in args.chunks(2) {
        let key = chunk[0]
            .as_str()
            .ok_or_else(|| Error::new(ErrorKind::InvalidOperation, "dict keys must be strings"))?;
        let value: serde_json::Value = serde_json::to_value(&chunk[1])
            .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;
        map.insert(key.to_string(), value);
    }

    Ok(Value::from_serialize(serde_json::Value::Object(map)))
}

/// Build a list from values
///
/// Usage: {{ list("a", "b", "c") }}
pub fn list(args: Rest<Value>) -> Value {
    Value::from(args.0)
}

/// Return the first non-empty value
///
/// Usage: {{ coalesce(config.param_hostname, config.project_name) }}
pub fn coalesce(args: Rest<Value>) -> Value {
    for arg in args.0 {
        if !arg.is_undefined() && !arg.is_none() {
            if let Some(s) = arg.as_str() {
                if !s.is_empty() {
                    return arg;
                }
            } else {
                return arg;
            }
        }
    }
    Value::UNDEFINED
}

/// Ternary operator
///
/// Usage: {{ ternary("udp", "tcp", port.protocol == "udp") }}
pub fn ternary(true_val: Value, false_val: Value, condition: Value) -> Value {
    if condition.is_true() { true_val } else { false_val }
}

/// Printf-style formatting with %s, %d, %f, %v and %%
///
/// Usage: {{ printf("%s:%d", config.project_name, port.number) }}
pub fn printf(format: String, args: Rest<Value>) -> Result<String, Error> {
    let mut result = String::with_capacity(format.len() + args.len() * 8);
    let mut chars = format.chars().peekable();
    let mut arg_idx = 0;

    let next_arg = |idx: &mut usize| -> Result<Value, Error> {
        let arg = args.get(*idx).cloned().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("printf: not enough arguments for format '{format}'"),
            )
        })?;
        *idx += 1;
        Ok(arg)
    };

    while let Some(c) = chars.next() {
        if c != '%' {
            result.push(c);
            continue;
        }

        match chars.next() {
            Some('%') => result.push('%'),
            Some('s') | Some('v') => {
                let arg = next_arg(&mut arg_idx)?;
                match arg.as_str() {
                    Some(s) => result.push_str(s),
                    None => result.push_str(&arg.to_string()),
                }
            }
            Some('d') => {
                let arg = next_arg(&mut arg_idx)?;
                let n = arg.as_i64().ok_or_else(|| {
                    Error::new(
                        ErrorKind::InvalidOperation,
                        format!("printf: %d expects an integer, got {arg:?}"),
                    )
                })?;
                result.push_str(&n.to_string());
            }
            Some('f') => {
                let arg = next_arg(&mut arg_idx)?;
                let f = match arg.as_i64() {
                    Some(n) => n as f64,
                    None => arg.to_string().parse::<f64>().map_err(|_| {
                        Error::new(
                            ErrorKind::InvalidOperation,
                            format!("printf: %f expects a number, got {arg:?}"),
                        )
                    })?,
                };
                result.push_str(&f.to_string());
            }
            Some(other) => {
                return Err(Error::new(
                    ErrorKind::InvalidOperation,
                    format!("printf: unsupported format specifier '%{other}'"),
                ));
            }
            None => {
                return Err(Error::new(
                    ErrorKind::InvalidOperation,
                    "printf: trailing '%' in format string",
                ));
            }
        }
    }

    Ok(result)
}
