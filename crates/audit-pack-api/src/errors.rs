// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidRequestParameter,
    ValidationFailed,
    ItemNotFound,
    CredentialMismatch,
    ServiceUnavailable,
    Internal,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequestParameter => "invalid_request_parameter",
            Self::ValidationFailed => "validation_failed",
            Self::ItemNotFound => "item_not_found",
            Self::CredentialMismatch => "credential_mismatch",
            Self::ServiceUnavailable => "service_unavailable",
            Self::Internal => "internal",
        }
    }
}

impl Display for ApiErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    #[must_use]
    pub fn invalid_param(name: &str, reason: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidRequestParameter,
            format!("invalid request parameter: {name}"),
            json!({"field_errors":[{"parameter": name, "reason": reason}]}),
        )
    }

    #[must_use]
    pub fn validation_failed(field_errors: Value) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            "validation failed",
            json!({"field_errors": field_errors}),
        )
    }

    #[must_use]
    pub fn item_not_found(department: &str, document: &str) -> Self {
        Self::new(
            ApiErrorCode::ItemNotFound,
            "no checklist item matches the given key",
            json!({"department": department, "document": document}),
        )
    }

    #[must_use]
    pub fn credential_mismatch() -> Self {
        Self::new(
            ApiErrorCode::CredentialMismatch,
            "password and confirmation do not match",
            json!({}),
        )
    }
}

const _: fn() = || {
    fn assert_traits<T: Serialize + for<'de> Deserialize<'de>>() {}
    assert_traits::<ApiErrorCode>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_serialize_snake_case() {
        assert_eq!(
            serde_json::to_value(ApiErrorCode::ItemNotFound).expect("serialize"),
            json!("item_not_found")
        );
        assert_eq!(
            serde_json::to_value(ApiErrorCode::CredentialMismatch).expect("serialize"),
            json!("credential_mismatch")
        );
    }

    #[test]
    fn named_constructors_carry_details() {
        let err = ApiError::item_not_found("HR", "Nonexistent Document");
        assert_eq!(err.code, ApiErrorCode::ItemNotFound);
        assert_eq!(err.details["department"], "HR");
        assert_eq!(err.details["document"], "Nonexistent Document");
    }
}
