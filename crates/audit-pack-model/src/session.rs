// SPDX-License-Identifier: Apache-2.0

use crate::item::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const SESSION_ID_MAX_LEN: usize = 64;

/// Identifier of one interactive session. Each session owns its own
/// checklist; ids never cross session boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct SessionId(String);

impl SessionId {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("session id"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("session id"));
        }
        if input.len() > SESSION_ID_MAX_LEN {
            return Err(ParseError::TooLong("session id", SESSION_ID_MAX_LEN));
        }
        if !input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
        {
            return Err(ParseError::InvalidFormat(
                "session id must match [A-Za-z0-9._-]+",
            ));
        }
        Ok(Self(input.to_string()))
    }

    /// Server-minted id for a request that arrived without one.
    #[must_use]
    pub fn minted(seq: u64) -> Self {
        Self(format!("sess-{seq:016x}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
