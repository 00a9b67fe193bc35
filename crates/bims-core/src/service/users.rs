//! Accounts and sessions.
//!
//! Token generation and hashing live in the HTTP layer; these functions
//! only ever see the SHA-256 of a bearer token.

use std::net::IpAddr;

use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::{
  Error, Result,
  audit::{Action, Actor, Entity},
  service::{audit, backend},
  store::RecordStore,
  user::{
    ApprovalUpdate, PasswordChange, PasswordScheme, ProfileUpdate, Registration, Role, Session,
    User,
  },
};

const BAD_CREDENTIALS: &str = "Invalid credentials";

pub async fn get<S: RecordStore>(store: &S, id: Uuid) -> Result<User> {
  store
    .get_user(id)
    .await
    .map_err(backend)?
    .ok_or_else(|| Error::not_found("User"))
}

pub async fn list<S: RecordStore>(store: &S, pending_only: bool) -> Result<Vec<User>> {
  store.list_users(pending_only).await.map_err(backend)
}

async fn ensure_unused<S: RecordStore>(
  store: &S,
  identifier: &str,
  owner: Option<Uuid>,
  message: &str,
) -> Result<()> {
  match store.find_user(identifier.to_owned()).await.map_err(backend)? {
    Some(existing) if Some(existing.user_id) != owner => Err(Error::Conflict(message.into())),
    _ => Ok(()),
  }
}

// ─── Registration and login ──────────────────────────────────────────────────

/// Create an unapproved account.
pub async fn register<S: RecordStore, P: PasswordScheme>(
  store: &S,
  scheme: &P,
  input: Registration,
  ip: Option<IpAddr>,
) -> Result<User> {
  input.validate()?;
  ensure_unused(store, &input.username, None, "Username already taken").await?;
  ensure_unused(store, &input.email, None, "Email already registered").await?;

  let hash = scheme.hash(&input.password)?;
  let user = store
    .insert_user(input.into_user(hash, Utc::now()))
    .await
    .map_err(backend)?;

  audit::record(
    store,
    Actor::user(user.user_id).with_ip(ip),
    Action::RegisterUser,
    Entity::User,
    Some(user.user_id),
    json!({ "username": user.username, "role": user.role }),
  )
  .await;
  tracing::info!(user_id = %user.user_id, role = %user.role, "user registered");
  Ok(user)
}

/// Check a username-or-email and password pair. Unknown users and wrong
/// passwords are indistinguishable to the caller.
pub async fn authenticate<S: RecordStore, P: PasswordScheme>(
  store: &S,
  scheme: &P,
  identifier: &str,
  password: &str,
  ip: Option<IpAddr>,
) -> Result<User> {
  let user = store
    .find_user(identifier.trim().to_owned())
    .await
    .map_err(backend)?;

  let Some(user) = user.filter(|u| scheme.verify(password, &u.password_hash)) else {
    tracing::warn!(identifier, ?ip, "rejected login");
    return Err(Error::Unauthorized(BAD_CREDENTIALS.into()));
  };
  if !user.is_approved {
    tracing::warn!(user_id = %user.user_id, "login by unapproved account");
    return Err(Error::Forbidden("Account is pending approval".into()));
  }

  audit::record(
    store,
    Actor::user(user.user_id).with_ip(ip),
    Action::Login,
    Entity::User,
    Some(user.user_id),
    json!({}),
  )
  .await;
  Ok(user)
}

// ─── Sessions ────────────────────────────────────────────────────────────────

pub async fn open_session<S: RecordStore>(
  store: &S,
  user_id: Uuid,
  token_hash: String,
  ttl: Duration,
) -> Result<Session> {
  let now = Utc::now();
  let session = Session { token_hash, user_id, created_at: now, expires_at: now + ttl };
  store.insert_session(session.clone()).await.map_err(backend)?;
  Ok(session)
}

async fn live_session<S: RecordStore>(store: &S, token_hash: String) -> Result<Session> {
  let session = store
    .get_session(token_hash.clone())
    .await
    .map_err(backend)?
    .ok_or_else(|| Error::Unauthorized("Invalid or expired token".into()))?;

  if session.is_expired(Utc::now()) {
    store.delete_session(token_hash).await.map_err(backend)?;
    return Err(Error::Unauthorized("Invalid or expired token".into()));
  }
  Ok(session)
}

/// The approved user a bearer token belongs to.
pub async fn resolve_session<S: RecordStore>(store: &S, token_hash: String) -> Result<User> {
  let session = live_session(store, token_hash).await?;
  let user = store
    .get_user(session.user_id)
    .await
    .map_err(backend)?
    .ok_or_else(|| Error::Unauthorized("Invalid or expired token".into()))?;

  if !user.is_approved {
    return Err(Error::Forbidden("Account is pending approval".into()));
  }
  Ok(user)
}

/// Swap a live token for a new one with a fresh expiry.
pub async fn rotate_session<S: RecordStore>(
  store: &S,
  old_hash: String,
  new_hash: String,
  ttl: Duration,
) -> Result<Session> {
  let old = live_session(store, old_hash.clone()).await?;
  store.delete_session(old_hash).await.map_err(backend)?;
  open_session(store, old.user_id, new_hash, ttl).await
}

pub async fn close_session<S: RecordStore>(
  store: &S,
  token_hash: String,
  actor: Actor,
) -> Result<()> {
  store.delete_session(token_hash).await.map_err(backend)?;
  audit::record(store, actor, Action::Logout, Entity::User, actor.user_id, json!({})).await;
  Ok(())
}

// ─── Account maintenance ─────────────────────────────────────────────────────

pub async fn change_password<S: RecordStore, P: PasswordScheme>(
  store: &S,
  scheme: &P,
  user_id: Uuid,
  change: PasswordChange,
  ip: Option<IpAddr>,
) -> Result<()> {
  change.validate()?;
  let mut user = get(store, user_id).await?;
  if !scheme.verify(&change.current_password, &user.password_hash) {
    return Err(Error::invalid("current_password", "current password is incorrect"));
  }

  user.password_hash = scheme.hash(&change.new_password)?;
  user.updated_at = Utc::now();
  store.update_user(user).await.map_err(backend)?;

  audit::record(
    store,
    Actor::user(user_id).with_ip(ip),
    Action::ChangePassword,
    Entity::User,
    Some(user_id),
    json!({}),
  )
  .await;
  tracing::info!(%user_id, "password changed");
  Ok(())
}

pub async fn update_account<S: RecordStore>(
  store: &S,
  user_id: Uuid,
  update: ProfileUpdate,
  ip: Option<IpAddr>,
) -> Result<User> {
  update.validate()?;
  if let Some(username) = &update.username {
    ensure_unused(store, username, Some(user_id), "Username already taken").await?;
  }

  let mut user = get(store, user_id).await?;
  update.apply(&mut user, Utc::now());
  let user = store.update_user(user).await.map_err(backend)?;

  audit::record(
    store,
    Actor::user(user_id).with_ip(ip),
    Action::UpdateAccount,
    Entity::User,
    Some(user_id),
    json!({ "name": user.name, "username": user.username }),
  )
  .await;
  Ok(user)
}

/// Approve, suspend or re-role an account. Suspending drops its sessions.
pub async fn set_approval<S: RecordStore>(
  store: &S,
  update: ApprovalUpdate,
  actor: Actor,
) -> Result<User> {
  let mut user = get(store, update.user_id).await?;
  if let Some(approved) = update.is_approved {
    user.is_approved = approved;
  }
  if let Some(role) = update.role {
    user.role = role;
  }
  user.updated_at = Utc::now();
  let user = store.update_user(user).await.map_err(backend)?;

  if !user.is_approved {
    let dropped = store.delete_user_sessions(user.user_id).await.map_err(backend)?;
    tracing::info!(user_id = %user.user_id, dropped, "sessions revoked");
  }

  audit::record(
    store,
    actor,
    Action::ApproveUser,
    Entity::User,
    Some(user.user_id),
    json!({ "is_approved": user.is_approved, "role": user.role }),
  )
  .await;
  Ok(user)
}

/// Seed an approved admin when no account exists yet. Returns the new
/// account, or `None` if there already were users.
pub async fn bootstrap_admin<S: RecordStore>(
  store: &S,
  name: String,
  username: String,
  email: String,
  password_hash: String,
) -> Result<Option<User>> {
  if store.count_users().await.map_err(backend)? > 0 {
    return Ok(None);
  }

  let now = Utc::now();
  let admin = User {
    user_id: Uuid::new_v4(),
    name,
    username: username.to_lowercase(),
    email: email.to_lowercase(),
    password_hash,
    role: Role::Admin,
    is_approved: true,
    created_at: now,
    updated_at: now,
  };
  let admin = store.insert_user(admin).await.map_err(backend)?;
  tracing::info!(user_id = %admin.user_id, username = %admin.username, "bootstrap admin created");
  Ok(Some(admin))
}
