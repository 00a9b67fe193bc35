//! Handlers for `/auth` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/auth/register` | 201; account awaits approval |
//! | `POST` | `/auth/login` | `{"identifier", "password"}`; username or email |
//! | `POST` | `/auth/refresh` | Bearer; swaps the token for a new one |
//! | `POST` | `/auth/logout` | Bearer; ends the session |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use bims_core::{
  service::users,
  store::RecordStore,
  user::{Registration, User},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
  AppState,
  auth::{Argon2Scheme, BearerToken, ClientIp, CurrentUser, new_token, token_hash},
  error::ApiError,
};

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  #[serde(alias = "username", alias = "email")]
  pub identifier: String,
  pub password:   String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
  pub token:      String,
  pub token_type: &'static str,
  pub expires_at: DateTime<Utc>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user:       Option<User>,
}

fn ttl<S: RecordStore>(state: &AppState<S>) -> Duration {
  Duration::minutes(state.config.session_ttl_minutes)
}

/// `POST /auth/register`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  ClientIp(ip): ClientIp,
  Json(body): Json<Registration>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let user = users::register(state.store.as_ref(), &Argon2Scheme, body, ip).await?;
  Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /auth/login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  ClientIp(ip): ClientIp,
  Json(body): Json<LoginBody>,
) -> Result<Json<TokenResponse>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let user = users::authenticate(
    state.store.as_ref(),
    &Argon2Scheme,
    &body.identifier,
    &body.password,
    ip,
  )
  .await?;

  let token = new_token();
  let session =
    users::open_session(state.store.as_ref(), user.user_id, token_hash(&token), ttl(&state))
      .await?;
  tracing::info!(user_id = %user.user_id, "user logged in");

  Ok(Json(TokenResponse {
    token,
    token_type: "Bearer",
    expires_at: session.expires_at,
    user: Some(user),
  }))
}

/// `POST /auth/refresh`
pub async fn refresh<S>(
  State(state): State<AppState<S>>,
  BearerToken(old): BearerToken,
) -> Result<Json<TokenResponse>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let token = new_token();
  let session = users::rotate_session(
    state.store.as_ref(),
    token_hash(&old),
    token_hash(&token),
    ttl(&state),
  )
  .await?;

  Ok(Json(TokenResponse {
    token,
    token_type: "Bearer",
    expires_at: session.expires_at,
    user: None,
  }))
}

/// `POST /auth/logout`
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  ip: ClientIp,
  BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  users::close_session(state.store.as_ref(), token_hash(&token), ip.actor(&user)).await?;
  Ok(Json(json!({ "message": "Logged out" })))
}
