//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical employee record persisted by the directory.
//! - Distinguish transient records from persisted ones via `id` presence.
//! - Validate field shape before records reach persistence.
//!
//! # Invariants
//! - `id` is assigned by the store on first successful save and never changes
//!   afterwards.
//! - A present `id` is always positive.
//! - `email` is an alternate lookup key; uniqueness is not enforced.
//!
//! # See also
//! - docs/architecture/data-model.md

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-generated surrogate identifier for persisted employees.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EmployeeId = i64;

// Shape check only: one `@` with a non-empty local part. Addresses without a
// domain part (e.g. `john@`) are legal in the existing data set and must
// remain storable.
static EMAIL_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]*$").expect("valid email shape regex"));

/// Field-level validation failure for an employee record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    /// `first_name` is empty or whitespace-only.
    BlankFirstName,
    /// `last_name` is empty or whitespace-only.
    BlankLastName,
    /// `email` does not match the accepted address shape.
    InvalidEmail(String),
    /// A persisted id must be a positive store-generated value.
    NonPositiveId(EmployeeId),
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankFirstName => write!(f, "first_name must not be blank"),
            Self::BlankLastName => write!(f, "last_name must not be blank"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::NonPositiveId(id) => {
                write!(f, "employee id must be positive, got {id}")
            }
        }
    }
}

impl Error for EmployeeValidationError {}

/// Canonical employee record.
///
/// `id` is `None` while the record is transient (never persisted). The store
/// assigns the identifier on first save; callers must treat it as immutable
/// from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Store-generated id; `None` marks a transient record.
    pub id: Option<EmployeeId>,
    /// Given name used by the unique name lookup.
    pub first_name: String,
    /// Family name used by the unique name lookup.
    pub last_name: String,
    /// Alternate lookup key; not constrained to be unique.
    pub email: String,
}

impl Employee {
    /// Creates a transient employee record.
    ///
    /// # Invariants
    /// - `id` starts as `None` until the store assigns one.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Returns whether this record has not been persisted yet.
    pub fn is_transient(&self) -> bool {
        self.id.is_none()
    }

    /// Returns the display form `"first last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Checks field shape ahead of persistence.
    ///
    /// # Contract
    /// - Names must contain at least one non-whitespace character.
    /// - `email` must have a single `@` with a non-empty local part.
    /// - A present `id` must be positive.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(EmployeeValidationError::BlankFirstName);
        }
        if self.last_name.trim().is_empty() {
            return Err(EmployeeValidationError::BlankLastName);
        }
        if !EMAIL_SHAPE_RE.is_match(&self.email) {
            return Err(EmployeeValidationError::InvalidEmail(self.email.clone()));
        }
        if let Some(id) = self.id {
            if id <= 0 {
                return Err(EmployeeValidationError::NonPositiveId(id));
            }
        }
        Ok(())
    }
}
