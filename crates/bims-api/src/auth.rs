//! Bearer-token sessions and the extractors that gate handlers by role.
//!
//! Tokens are 32 random bytes, base64url-encoded without padding. Only the
//! hex SHA-256 of a token ever reaches the store.

use std::{
  convert::Infallible,
  net::{IpAddr, SocketAddr},
};

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use axum::{
  extract::{ConnectInfo, FromRequestParts},
  http::{HeaderMap, header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use bims_core::{
  audit::Actor,
  service::users,
  store::RecordStore,
  user::{PasswordScheme, User},
};
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::{AppState, error::ApiError};

// ─── Tokens ──────────────────────────────────────────────────────────────────

/// A fresh opaque bearer token.
pub fn new_token() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  URL_SAFE_NO_PAD.encode(bytes)
}

/// The session key stored for `token`.
pub fn token_hash(token: &str) -> String { hex::encode(Sha256::digest(token.as_bytes())) }

fn bearer(headers: &HeaderMap) -> Option<&str> {
  headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|t| !t.is_empty())
}

// ─── Passwords ───────────────────────────────────────────────────────────────

/// Argon2id PHC string for `password` with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string())
}

/// Argon2 with default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Scheme;

impl PasswordScheme for Argon2Scheme {
  fn hash(&self, password: &str) -> bims_core::Result<String> {
    hash_password(password)
      .map_err(|e| bims_core::Error::Storage(format!("argon2 error: {e}").into()))
  }

  fn verify(&self, password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
      Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
    })
  }
}

// ─── Extractors ──────────────────────────────────────────────────────────────

/// Peer address of the connection, when the server was started with
/// connect info. Recorded on audit entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientIp(pub Option<IpAddr>);

impl ClientIp {
  /// Audit actor for `user` calling from this address.
  pub fn actor(self, user: &User) -> Actor { Actor::user(user.user_id).with_ip(self.0) }
}

impl<S> FromRequestParts<S> for ClientIp
where
  S: Send + Sync,
{
  type Rejection = Infallible;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let ip = parts
      .extensions
      .get::<ConnectInfo<SocketAddr>>()
      .map(|ConnectInfo(addr)| addr.ip());
    Ok(Self(ip))
  }
}

/// The raw bearer token of the request, unchecked.
pub struct BearerToken(pub String);

impl<S> FromRequestParts<AppState<S>> for BearerToken
where
  S: RecordStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    bearer(&parts.headers)
      .map(|t| Self(t.to_owned()))
      .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))
  }
}

/// Any approved, signed-in user.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: RecordStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer(&parts.headers).ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;
    let user = users::resolve_session(state.store.as_ref(), token_hash(token)).await?;
    Ok(Self(user))
  }
}

/// A signed-in user with the `admin` role.
pub struct RequireAdmin(pub User);

impl<S> FromRequestParts<AppState<S>> for RequireAdmin
where
  S: RecordStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
    if !user.role.is_admin() {
      tracing::warn!(user_id = %user.user_id, role = %user.role, "admin route refused");
      return Err(ApiError::forbidden("Admin access required"));
    }
    Ok(Self(user))
  }
}

/// A signed-in official or admin.
pub struct RequireOfficial(pub User);

impl<S> FromRequestParts<AppState<S>> for RequireOfficial
where
  S: RecordStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
    if !user.role.can_decide_blotters() {
      return Err(ApiError::forbidden("Official access required"));
    }
    Ok(Self(user))
  }
}

/// The signed-in user if a valid token was sent; `None` otherwise. Used by
/// public routes that show more to staff.
pub struct MaybeUser(pub Option<User>);

impl<S> FromRequestParts<AppState<S>> for MaybeUser
where
  S: RecordStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let Some(token) = bearer(&parts.headers) else {
      return Ok(Self(None));
    };
    let user = users::resolve_session(state.store.as_ref(), token_hash(token))
      .await
      .ok();
    Ok(Self(user))
  }
}
