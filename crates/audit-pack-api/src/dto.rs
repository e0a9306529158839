// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Body of `POST /v1/uploads`. The file descriptor fields describe the
/// upload for the log line only; the file's bytes are never inspected or
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadRequestDto {
    pub department: String,
    pub document: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size_bytes: Option<u64>,
}

/// Body of `POST /v1/auth/signup`. Validated and discarded; no account
/// exists behind this form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignUpRequestDto {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignUpResponseDto {
    pub accepted: bool,
}
