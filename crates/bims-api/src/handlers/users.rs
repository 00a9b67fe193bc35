//! Handlers for `/users` (own account) and `/admin` (account approval).

use axum::{
  Json,
  extract::{Query, State},
  response::IntoResponse,
};
use bims_core::{
  service::users,
  store::RecordStore,
  user::{ApprovalUpdate, PasswordChange, ProfileUpdate, User},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState,
  auth::{Argon2Scheme, ClientIp, CurrentUser, RequireAdmin},
  error::ApiError,
};

/// `GET /users/me`
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> { Json(user) }

/// `PATCH /users/change-password`
pub async fn change_password<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  ClientIp(ip): ClientIp,
  Json(body): Json<PasswordChange>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  users::change_password(state.store.as_ref(), &Argon2Scheme, user.user_id, body, ip).await?;
  Ok(Json(json!({ "message": "Password updated" })))
}

/// `PATCH /users/update-profile`
pub async fn update_profile<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  ClientIp(ip): ClientIp,
  Json(body): Json<ProfileUpdate>,
) -> Result<Json<User>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(users::update_account(state.store.as_ref(), user.user_id, body, ip).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub pending: bool,
}

/// `GET /admin/users[?pending=true]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<User>>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(users::list(state.store.as_ref(), params.pending).await?))
}

/// `PATCH /admin/approval`
pub async fn set_approval<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Json(body): Json<ApprovalUpdate>,
) -> Result<Json<User>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(users::set_approval(state.store.as_ref(), body, ip.actor(&admin)).await?))
}
