//! Loosely typed identifier fields.
//!
//! Callers send identifiers as JSON integers, decimal strings, `0x` hex
//! strings or, for attributes and data types, catalog names.

use std::fmt;

use serde::Deserialize;
use serde_json::Number;

use super::errors::DispatchError;

/// Identifier as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IdField {
    /// JSON number.
    Number(Number),
    /// String holding a number or a name.
    Text(String),
}

/// Identifier after the numeric check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdValue<'a> {
    /// Canonical integer.
    Numeric(u64),
    /// Name to resolve against the catalog.
    Name(&'a str),
}

impl IdField {
    /// Splits the field into a numeric value or a name.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidField`] for negative or fractional
    /// JSON numbers.
    pub fn classify(&self, field: &'static str) -> Result<IdValue<'_>, DispatchError> {
        match self {
            Self::Number(number) => number
                .as_u64()
                .map(IdValue::Numeric)
                .ok_or_else(|| DispatchError::invalid_field(field, number)),
            Self::Text(text) => Ok(parse_integer(text)
                .map_or_else(|| IdValue::Name(text.trim()), IdValue::Numeric)),
        }
    }

    /// Numeric value, or `None` when the field is not an unsigned integer.
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Self::Number(number) => number.as_u64(),
            Self::Text(text) => parse_integer(text),
        }
    }
}

impl fmt::Display for IdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => write!(f, "'{text}'"),
        }
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal integer.
pub fn parse_integer(text: &str) -> Option<u64> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Narrows a parsed integer to the field's width.
///
/// # Errors
///
/// Returns [`DispatchError::InvalidField`] when the value does not fit.
pub fn narrow<T: TryFrom<u64>>(field: &'static str, value: u64) -> Result<T, DispatchError> {
    T::try_from(value).map_err(|_| DispatchError::invalid_field(field, value))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn field(value: serde_json::Value) -> IdField {
        serde_json::from_value(value).expect("identifier field")
    }

    #[rstest]
    #[case::integer(json!(6), 6)]
    #[case::decimal(json!("6"), 6)]
    #[case::hex(json!("0x0006"), 6)]
    #[case::upper_hex(json!("0X10"), 16)]
    #[case::padded(json!(" 42 "), 42)]
    fn numeric_forms_agree(#[case] raw: serde_json::Value, #[case] expected: u64) {
        let field = field(raw);
        assert_eq!(field.classify("attrId").expect("classify"), IdValue::Numeric(expected));
        assert_eq!(field.as_integer(), Some(expected));
    }

    #[rstest]
    fn non_numeric_text_is_a_name() {
        let field = field(json!("onOff"));
        assert_eq!(field.classify("attrId").expect("classify"), IdValue::Name("onOff"));
        assert_eq!(field.as_integer(), None);
    }

    #[rstest]
    #[case::negative(json!(-1))]
    #[case::fraction(json!(1.5))]
    fn rejects_non_unsigned_numbers(#[case] raw: serde_json::Value) {
        let error = field(raw).classify("dataType").expect_err("invalid number");
        assert!(matches!(error, DispatchError::InvalidField { field: "dataType", .. }));
    }

    #[rstest]
    fn narrowing_checks_range() {
        assert_eq!(narrow::<u8>("cmd", 255).expect("fits"), 255);
        assert!(matches!(
            narrow::<u8>("cmd", 256),
            Err(DispatchError::InvalidField { field: "cmd", .. })
        ));
    }
}
