//! Typed option values
//!
//! This module defines the [`Value`] enum, the value half of every named option
//! stored in a section. The variant is the type tag, so the tag and the payload
//! can never disagree.
//!
//! # Value Types
//!
//! - [`Value::Boolean`]: `y`/`yes`/`t`/`true` or `n`/`no`/`f`/`false`, any case
//! - [`Value::Integer`]: 64-bit signed integer
//! - [`Value::Float`]: 64-bit float
//! - [`Value::String`]: quoted text, copied verbatim without the quotes
//! - [`Value::Section`]: a nested section, exclusively owned by this value
//!
//! Dropping a `Value::Section` drops the whole subtree below it.

use super::section::Section;
use std::fmt;

/// An option value in a configuration section
#[derive(Debug, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Section(Section),
}

/// The type tag of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    Integer,
    Float,
    String,
    Section,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Section => "section",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Section(_) => ValueKind::Section,
        }
    }

    /// Get the boolean value, returns None if not a Boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the integer value, returns None if not an Integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the float value, returns None if not a Float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Value::Section(section) => Some(section),
            _ => None,
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, Value::Section(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(true) => write!(f, "TRUE"),
            Value::Boolean(false) => write!(f, "FALSE"),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Section(section) => write!(f, "<section, {} options>", section.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Value::Boolean(true).kind(), ValueKind::Boolean);
        assert_eq!(Value::Integer(3).kind(), ValueKind::Integer);
        assert_eq!(Value::Float(0.5).kind(), ValueKind::Float);
        assert_eq!(Value::String("x".into()).kind(), ValueKind::String);
        assert_eq!(Value::Section(Section::new()).kind(), ValueKind::Section);
    }

    #[test]
    fn test_accessors_reject_other_kinds() {
        let value = Value::Integer(42);
        assert_eq!(value.as_int(), Some(42));
        assert_eq!(value.as_bool(), None);
        assert_eq!(value.as_float(), None);
        assert_eq!(value.as_str(), None);
        assert!(value.as_section().is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Boolean(false).to_string(), "FALSE");
        assert_eq!(Value::Integer(-7).to_string(), "-7");
        assert_eq!(Value::String("hi".into()).to_string(), "\"hi\"");
        assert_eq!(Value::Section(Section::new()).to_string(), "<section, 0 options>");
    }
}
