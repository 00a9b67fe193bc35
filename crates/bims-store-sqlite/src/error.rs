//! Error type for `bims-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// A stored column did not decode into its domain type.
  #[error("decode error: {0}")]
  Decode(String),

  /// An update targeted a row that no longer exists.
  #[error("{0} not found")]
  NotFound(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  /// The SQLite constraint message, if this is a constraint violation.
  fn constraint(&self) -> Option<&str> {
    match self {
      Self::Database(tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
        err,
        msg,
      ))) if err.code == rusqlite::ErrorCode::ConstraintViolation => {
        Some(msg.as_deref().unwrap_or_default())
      }
      _ => None,
    }
  }
}

/// Human-readable message for a constraint violation.
fn describe_constraint(msg: &str) -> &'static str {
  if msg.contains("households.household_code") {
    "Household code already exists"
  } else if msg.contains("users.username") {
    "Username already taken"
  } else if msg.contains("users.email") {
    "Email already registered"
  } else if msg.contains("residents.household_id") {
    "Household already has a head"
  } else {
    "Conflicting record"
  }
}

impl From<Error> for bims_core::Error {
  fn from(e: Error) -> Self {
    if let Error::NotFound(what) = e {
      return Self::not_found(what);
    }
    let violation = e
      .constraint()
      .map(|msg| (msg.contains("FOREIGN KEY"), describe_constraint(msg)));
    match violation {
      Some((true, _)) => Self::InvalidReference("Invalid reference".into()),
      Some((false, message)) => Self::Conflict(message.into()),
      None => Self::Storage(Box::new(e)),
    }
  }
}
