// SPDX-License-Identifier: Apache-2.0

use crate::dto::SignUpRequestDto;
use crate::errors::ApiError;
use serde_json::json;

/// Pure input validation for the sign-up form. Errors are surfaced to the
/// caller immediately; nothing is logged, stored, or retried.
pub fn validate_signup(req: &SignUpRequestDto) -> Result<(), ApiError> {
    let mut field_errors = Vec::new();
    for (name, value) in [
        ("full_name", &req.full_name),
        ("email", &req.email),
        ("password", &req.password),
    ] {
        if value.trim().is_empty() {
            field_errors.push(json!({"parameter": name, "reason": "must not be empty"}));
        }
    }
    if !field_errors.is_empty() {
        return Err(ApiError::validation_failed(json!(field_errors)));
    }
    if req.password != req.confirm_password {
        return Err(ApiError::credential_mismatch());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiErrorCode;

    fn request() -> SignUpRequestDto {
        SignUpRequestDto {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
            confirm_password: "hunter2".to_string(),
        }
    }

    #[test]
    fn accepts_matching_credentials() {
        assert_eq!(validate_signup(&request()), Ok(()));
    }

    #[test]
    fn rejects_password_confirmation_mismatch() {
        let mut req = request();
        req.confirm_password = "hunter3".to_string();
        let err = validate_signup(&req).expect_err("mismatch");
        assert_eq!(err.code, ApiErrorCode::CredentialMismatch);
    }

    #[test]
    fn rejects_blank_fields_before_checking_mismatch() {
        let mut req = request();
        req.full_name = "  ".to_string();
        req.confirm_password = "different".to_string();
        let err = validate_signup(&req).expect_err("blank field");
        assert_eq!(err.code, ApiErrorCode::ValidationFailed);
        let errors = err.details["field_errors"]
            .as_array()
            .expect("field errors");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["parameter"], "full_name");
    }
}
