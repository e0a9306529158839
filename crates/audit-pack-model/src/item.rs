// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const DEPARTMENT_MAX_LEN: usize = 64;
pub const DOCUMENT_MAX_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
    InvalidFormat(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::InvalidFormat(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct Department(String);

impl Department {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("department"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("department"));
        }
        if input.len() > DEPARTMENT_MAX_LEN {
            return Err(ParseError::TooLong("department", DEPARTMENT_MAX_LEN));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct DocumentName(String);

impl DocumentName {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("document"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("document"));
        }
        if input.len() > DOCUMENT_MAX_LEN {
            return Err(ParseError::TooLong("document", DOCUMENT_MAX_LEN));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DocumentName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of one checklist row. Completed is terminal: nothing moves a
/// row back to Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ItemStatus {
    Pending,
    Completed,
}

impl ItemStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (department, document) requirement tracked for completion.
///
/// `last_updated` holds unix milliseconds and is `Some` exactly while the
/// status is Completed. `owner` and `reviewer` are descriptive labels with
/// no behavior attached; they never gate completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditItem {
    pub department: Department,
    pub document: DocumentName,
    pub status: ItemStatus,
    pub last_updated: Option<u64>,
    pub owner: Option<String>,
    pub reviewer: Option<String>,
}

impl AuditItem {
    #[must_use]
    pub fn new(department: Department, document: DocumentName) -> Self {
        Self {
            department,
            document,
            status: ItemStatus::Pending,
            last_updated: None,
            owner: None,
            reviewer: None,
        }
    }

    #[must_use]
    pub fn with_assignees(mut self, owner: &str, reviewer: &str) -> Self {
        self.owner = Some(owner.to_string());
        self.reviewer = Some(reviewer.to_string());
        self
    }

    /// The only transition: Pending -> Completed, stamping the update time.
    /// Re-invoking on a Completed row re-stamps the time only.
    pub fn complete_at(&mut self, at_millis: u64) {
        self.status = ItemStatus::Completed;
        self.last_updated = Some(at_millis);
    }

    #[must_use]
    pub fn matches(&self, department: &Department, document: &DocumentName) -> bool {
        self.department == *department && self.document == *document
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChecklistSummary {
    pub department_count: u64,
    pub total_items: u64,
    pub completed_count: u64,
}

impl ChecklistSummary {
    #[must_use]
    pub const fn new(department_count: u64, total_items: u64, completed_count: u64) -> Self {
        Self {
            department_count,
            total_items,
            completed_count,
        }
    }
}
