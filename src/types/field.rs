use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// A record field that is either a well-typed value or raw text.
///
/// Raw values let a payload carry data the API is expected to reject, e.g.
/// a `pageCount` of `"abc"`. On the wire a valid value keeps its JSON type
/// and a raw value is always a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field<T> {
    Valid(T),
    Raw(String),
}

impl<T: FromStr> Field<T> {
    /// `Valid` if `s` parses as `T`, `Raw` otherwise.
    pub fn parse(s: &str) -> Self {
        s.trim()
            .parse()
            .map(Field::Valid)
            .unwrap_or_else(|_| Field::Raw(s.to_string()))
    }
}

impl<T> Field<T> {
    pub fn raw(s: impl Into<String>) -> Self {
        Field::Raw(s.into())
    }

    pub fn valid(&self) -> Option<&T> {
        match self {
            Field::Valid(value) => Some(value),
            Field::Raw(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Field::Valid(_))
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Valid(value)
    }
}

impl<T: Display> Display for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Valid(value) => write!(f, "{value}"),
            Field::Raw(s) => write!(f, "{s}"),
        }
    }
}

impl<T: PartialEq + Display> PartialEq for Field<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Field::Valid(a), Field::Valid(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}
