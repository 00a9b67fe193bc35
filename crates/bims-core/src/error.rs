//! Error types for `bims-core`.

use serde::Serialize;
use thiserror::Error;

/// A single failed validation rule, reported back to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field:   String,
  pub message: String,
}

impl FieldError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self { field: field.into(), message: message.into() }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  NotFound(String),

  /// Illegal state transition or uniqueness violation.
  #[error("{0}")]
  Conflict(String),

  #[error("validation failed")]
  Validation(Vec<FieldError>),

  /// A foreign key in the request body points at nothing.
  #[error("{0}")]
  InvalidReference(String),

  #[error("{0}")]
  Unauthorized(String),

  #[error("{0}")]
  Forbidden(String),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn not_found(what: &str) -> Self { Self::NotFound(format!("{what} not found")) }

  pub fn invalid(field: &str, message: &str) -> Self {
    Self::Validation(vec![FieldError::new(field, message)])
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Collects [`FieldError`]s and turns them into a single
/// [`Error::Validation`] if any were pushed.
#[derive(Debug, Default)]
pub struct Validator {
  errors: Vec<FieldError>,
}

impl Validator {
  pub fn new() -> Self { Self::default() }

  pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
    if !ok {
      self.errors.push(FieldError::new(field, message));
    }
    self
  }

  pub fn require(&mut self, value: &str, field: &str) -> &mut Self {
    self.check(!value.trim().is_empty(), field, &format!("{field} is required"))
  }

  pub fn finish(&mut self) -> Result<()> {
    if self.errors.is_empty() {
      Ok(())
    } else {
      Err(Error::Validation(std::mem::take(&mut self.errors)))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validator_collects_every_failure() {
    let err = Validator::new()
      .require("", "first_name")
      .require("  ", "last_name")
      .check(true, "purok", "unused")
      .finish()
      .unwrap_err();

    match err {
      Error::Validation(fields) => {
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "first_name");
        assert_eq!(fields[1].message, "last_name is required");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn validator_passes_when_clean() {
    assert!(Validator::new().require("Juan", "first_name").finish().is_ok());
  }
}
