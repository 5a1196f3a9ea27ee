//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes an `invalid_request` error whose details name the
//! offending field and a machine-readable code.

use std::collections::BTreeSet;
use std::fmt::Display;

use serde_json::json;

use crate::domain::{AvailabilitySlot, Error, SkillSet, SwapRequestId, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidId,
    InvalidValue,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidId => "invalid_id",
            Self::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {name}"),
    )
}

/// A field was present but failed domain validation.
pub(crate) fn invalid_field_error(field: FieldName, reason: impl Display) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ValidationCode::InvalidValue,
        format!("invalid {name}: {reason}"),
    )
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_user_id(raw: &str, field: FieldName) -> Result<UserId, Error> {
    let name = field.as_str();
    UserId::new(raw).map_err(|_| {
        field_error(
            field,
            ValidationCode::InvalidId,
            format!("{name} must be a valid UUID"),
        )
    })
}

pub(crate) fn parse_request_id(raw: &str, field: FieldName) -> Result<SwapRequestId, Error> {
    let name = field.as_str();
    raw.parse().map_err(|_| {
        field_error(
            field,
            ValidationCode::InvalidId,
            format!("{name} must be a valid UUID"),
        )
    })
}

pub(crate) fn parse_skills(raw: Vec<String>, field: FieldName) -> Result<SkillSet, Error> {
    SkillSet::parse(raw).map_err(|err| invalid_field_error(field, err))
}

pub(crate) fn parse_availability(
    raw: Vec<String>,
    field: FieldName,
) -> Result<BTreeSet<AvailabilitySlot>, Error> {
    raw.iter()
        .map(|label| label.parse().map_err(|err| invalid_field_error(field, err)))
        .collect()
}
