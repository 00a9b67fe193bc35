//! `GET /profile` (public) and `PUT /profile` (admin).

use axum::{Json, extract::State};
use bims_core::{
  profile::{BarangayProfile, ProfileInput},
  service::profile,
  store::RecordStore,
};

use crate::{
  AppState,
  auth::{ClientIp, RequireAdmin},
  error::ApiError,
};

pub async fn get<S>(State(state): State<AppState<S>>) -> Result<Json<BarangayProfile>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(profile::get(state.store.as_ref()).await?))
}

pub async fn put<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Json(body): Json<ProfileInput>,
) -> Result<Json<BarangayProfile>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(profile::put(state.store.as_ref(), body, ip.actor(&admin)).await?))
}
