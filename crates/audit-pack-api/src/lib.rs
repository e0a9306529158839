#![forbid(unsafe_code)]

mod dto;
mod errors;
mod responses;
mod signup;

pub use dto::{SignUpRequestDto, SignUpResponseDto, UploadRequestDto};
pub use errors::{ApiError, ApiErrorCode};
pub use responses::{json_envelope, API_VERSION};
pub use signup::validate_signup;

pub const CRATE_NAME: &str = "audit-pack-api";
