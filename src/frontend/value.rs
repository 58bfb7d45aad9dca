//! Literal values carried by tokens and expression nodes
#![allow(dead_code)]

use serde::Serialize;
use std::fmt;

/// A literal value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }
}

/// Integral numbers keep one fractional digit (`6` -> `6.0`); everything
/// else uses the shortest text that reads back to the same `f64`.
fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_finite() && n == n.trunc() {
        write!(f, "{:.1}", n)
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => format_number(*n, f),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_numbers_keep_one_decimal() {
        assert_eq!(Value::Number(6.0).to_string(), "6.0");
        assert_eq!(Value::Number(0.0).to_string(), "0.0");
        assert_eq!(Value::Number(1234.0).to_string(), "1234.0");
    }

    #[test]
    fn test_fractional_numbers_are_shortest() {
        assert_eq!(Value::Number(6.25).to_string(), "6.25");
        assert_eq!(Value::Number(0.1).to_string(), "0.1");
    }

    #[test]
    fn test_other_values() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::String("abc".into()).to_string(), "abc");
    }

    #[test]
    fn test_discriminants() {
        assert!(Value::Nil.is_nil());
        assert!(Value::Bool(false).is_bool());
        assert!(Value::Number(1.5).is_number());
        assert!(Value::String(String::new()).is_string());
        assert!(!Value::Nil.is_number());
    }
}
