//! Status and field-level checks used by every scenario.

use std::fmt::Display;

use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::info;

use crate::{
    error::{Error, Result},
    requests::ApiResponse,
    traits::Resource,
};

/// One differing field between an expected and an actual record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub field:    &'static str,
    pub expected: String,
    pub actual:   String,
}

pub fn mismatch<T: PartialEq + Display>(
    field: &'static str,
    expected: &Option<T>,
    actual: &Option<T>,
) -> Option<Mismatch> {
    if expected == actual {
        return None;
    }
    let render = |value: &Option<T>| match value {
        Some(value) => value.to_string(),
        None => "null".to_string(),
    };
    Some(Mismatch {
        field,
        expected: render(expected),
        actual: render(actual),
    })
}

/// One acceptable status code, or several when servers disagree (PUT may answer 200 or 201).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedStatus(Vec<StatusCode>);

impl ExpectedStatus {
    pub fn any_of(codes: &[StatusCode]) -> Self {
        Self(codes.to_vec())
    }

    pub fn matches(&self, status: StatusCode) -> bool {
        self.0.contains(&status)
    }
}

impl From<StatusCode> for ExpectedStatus {
    fn from(code: StatusCode) -> Self {
        Self(vec![code])
    }
}

impl Display for ExpectedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let codes = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" or ");
        write!(f, "{codes}")
    }
}

/// Expected result of a call that may legitimately fail before reaching the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    Status(ExpectedStatus),
    /// A transport error or one of the given statuses (malformed ids).
    TransportOrStatus(ExpectedStatus),
}

impl Expectation {
    pub fn status(code: StatusCode) -> Self {
        Self::Status(code.into())
    }

    pub fn statuses(&self) -> &ExpectedStatus {
        match self {
            Self::Status(codes) | Self::TransportOrStatus(codes) => codes,
        }
    }

    pub fn check(&self, result: Result<ApiResponse>, message: &str) -> Result<()> {
        match (self, result) {
            (_, Ok(response)) => verify_status_code(&response, self.statuses().clone(), message),
            (Self::TransportOrStatus(_), Err(error)) if error.is_transport() => {
                info!(%error, "request failed in transport as accepted");
                Ok(())
            }
            (_, Err(error)) => Err(error),
        }
    }
}

impl Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(codes) => write!(f, "{codes}"),
            Self::TransportOrStatus(codes) => write!(f, "transport error or {codes}"),
        }
    }
}

fn pretty<T: Serialize + std::fmt::Debug>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
}

pub fn verify_status_code(
    response: &ApiResponse,
    expected: impl Into<ExpectedStatus>,
    message: &str,
) -> Result<()> {
    let expected = expected.into();
    if expected.matches(response.status) {
        return Ok(());
    }
    Err(Error::Status {
        message:  message.to_string(),
        expected: expected.to_string(),
        actual:   response.status,
    })
}

/// Compares every field and logs the actual record.
pub fn verify_record_data<R: Resource>(expected: &R, actual: &R, message: &str) -> Result<()> {
    info!("{}", pretty(actual));
    match expected.first_mismatch(actual) {
        None => Ok(()),
        Some(Mismatch {
            field,
            expected,
            actual,
        }) => Err(Error::FieldMismatch {
            message: message.to_string(),
            field,
            expected,
            actual,
        }),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Checks the status, decodes the body into `T`, rejects empty content and logs it.
pub fn verify_and_print_response<T>(
    response: &ApiResponse,
    expected: impl Into<ExpectedStatus>,
    message: &str,
) -> Result<T>
where
    T: DeserializeOwned + Serialize + std::fmt::Debug,
{
    verify_status_code(response, expected, message)?;
    let empty = || Error::EmptyBody {
        message: message.to_string(),
    };
    if response.body.trim().is_empty() {
        return Err(empty());
    }
    let value: Value = response.json()?;
    if is_empty(&value) {
        return Err(empty());
    }
    let content: T = serde_path_to_error::deserialize(value).map_err(|e| Error::Decode {
        path:   e.path().to_string(),
        source: e.into_inner(),
    })?;
    info!("{}", pretty(&content));
    Ok(content)
}
