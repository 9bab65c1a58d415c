//! JSON text boundary.

use serde_json::Value;

use crate::error::DecodeError;

pub fn parse(text: &str) -> Result<Value, DecodeError> {
    serde_json::from_str(text).map_err(|e| DecodeError::Parse(e.to_string()))
}

/// Prints compact JSON. Object keys keep their insertion order.
pub fn print(value: &Value) -> String {
    // Serializing a `Value` cannot fail: its keys are always strings.
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reports_syntax_errors() {
        assert!(matches!(parse("{\"a\":"), Err(DecodeError::Parse(_))));
    }

    #[test]
    fn print_keeps_key_order() {
        let value = parse(r#"{"z":1,"a":2}"#).unwrap();
        assert_eq!(print(&value), r#"{"z":1,"a":2}"#);
    }
}
