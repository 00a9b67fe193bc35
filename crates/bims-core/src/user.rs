//! Staff and resident accounts, and the sessions issued to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::error::{Result, Validator};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  Admin,
  Clerk,
  Official,
  #[default]
  Resident,
}

impl Role {
  pub fn is_admin(self) -> bool { self == Self::Admin }

  /// Officials and admins may decide blotter approvals.
  pub fn can_decide_blotters(self) -> bool { matches!(self, Self::Admin | Self::Official) }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
  pub user_id:       Uuid,
  pub name:          String,
  pub username:      String,
  pub email:         String,
  /// Argon2 PHC string. Never leaves the server.
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub role:          Role,
  pub is_approved:   bool,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

fn validate_name(v: &mut Validator, name: &str) {
  v.check(name.trim().chars().count() >= 2, "name", "name must be at least 2 characters");
}

fn validate_username(v: &mut Validator, username: &str) {
  v.check(
    username.len() >= 4 && username.chars().all(|c| c.is_ascii_alphanumeric()),
    "username",
    "username must be at least 4 alphanumeric characters",
  );
}

fn validate_password(v: &mut Validator, field: &str, password: &str) {
  v.check(password.chars().count() >= 8, field, "password must be at least 8 characters");
}

fn looks_like_email(email: &str) -> bool {
  match email.split_once('@') {
    Some((local, domain)) => {
      !local.is_empty()
        && domain
          .split_once('.')
          .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
    }
    None => false,
  }
}

// ─── Registration ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
  pub name:     String,
  pub username: String,
  pub email:    String,
  pub password: String,
  #[serde(default)]
  pub role:     Role,
}

impl Registration {
  pub fn validate(&self) -> Result<()> {
    let mut v = Validator::new();
    validate_name(&mut v, &self.name);
    validate_username(&mut v, &self.username);
    v.check(looks_like_email(self.email.trim()), "email", "email must be a valid address");
    validate_password(&mut v, "password", &self.password);
    v.finish()
  }

  /// Build the account from an already-hashed password. New accounts wait
  /// for an admin's approval.
  pub fn into_user(self, password_hash: String, now: DateTime<Utc>) -> User {
    User {
      user_id: Uuid::new_v4(),
      name: self.name.trim().to_owned(),
      username: self.username.to_lowercase(),
      email: self.email.trim().to_lowercase(),
      password_hash,
      role: self.role,
      is_approved: false,
      created_at: now,
      updated_at: now,
    }
  }
}

// ─── Account maintenance ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordChange {
  pub current_password: String,
  pub new_password:     String,
}

impl PasswordChange {
  pub fn validate(&self) -> Result<()> {
    let mut v = Validator::new();
    validate_password(&mut v, "new_password", &self.new_password);
    v.finish()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
  pub name:     Option<String>,
  pub username: Option<String>,
}

impl ProfileUpdate {
  pub fn validate(&self) -> Result<()> {
    let mut v = Validator::new();
    if let Some(name) = &self.name {
      validate_name(&mut v, name);
    }
    if let Some(username) = &self.username {
      validate_username(&mut v, username);
    }
    v.finish()
  }

  pub fn apply(self, user: &mut User, now: DateTime<Utc>) {
    if let Some(name) = self.name {
      user.name = name.trim().to_owned();
    }
    if let Some(username) = self.username {
      user.username = username.to_lowercase();
    }
    user.updated_at = now;
  }
}

/// Admin decision on an account.
#[derive(Debug, Clone, Deserialize)]
pub struct ApprovalUpdate {
  pub user_id:     Uuid,
  pub is_approved: Option<bool>,
  pub role:        Option<Role>,
}

// ─── Password hashing ────────────────────────────────────────────────────────

/// Password hashing, supplied by the caller so this crate stays free of
/// cryptography.
pub trait PasswordScheme: Send + Sync {
  fn hash(&self, password: &str) -> Result<String>;

  fn verify(&self, password: &str, hash: &str) -> bool;
}

// ─── Sessions ────────────────────────────────────────────────────────────────

/// A live bearer token. Only the SHA-256 of the token is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
  pub token_hash: String,
  pub user_id:    Uuid,
  pub created_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}

impl Session {
  pub fn is_expired(&self, now: DateTime<Utc>) -> bool { now >= self.expires_at }
}
