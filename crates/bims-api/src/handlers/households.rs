//! Handlers for `/households` endpoints. Admin only.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use bims_core::{
  household::{Household, HouseholdPatch, HouseholdSummary, NewHousehold},
  resident::Resident,
  service::households,
  store::{HouseholdQuery, Page, RecordStore},
};
use uuid::Uuid;

use crate::{
  AppState,
  auth::{ClientIp, RequireAdmin},
  error::ApiError,
  handlers::{Deleted, deleted},
};

/// `GET /households`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
  Query(query): Query<HouseholdQuery>,
) -> Result<Json<Page<Household>>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(households::list(state.store.as_ref(), query).await?))
}

/// `POST /households`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Json(body): Json<NewHousehold>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let household = households::create(state.store.as_ref(), body, ip.actor(&admin)).await?;
  Ok((StatusCode::CREATED, Json(household)))
}

/// `GET /households/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
  Path(id): Path<Uuid>,
) -> Result<Json<Household>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(households::get(state.store.as_ref(), id).await?))
}

/// `PUT /households/{id}`. Summary fields in the body are ignored.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Path(id): Path<Uuid>,
  Json(body): Json<HouseholdPatch>,
) -> Result<Json<Household>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(households::update(state.store.as_ref(), id, body, ip.actor(&admin)).await?))
}

/// `DELETE /households/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  households::delete(state.store.as_ref(), id, ip.actor(&admin)).await?;
  Ok(deleted(id))
}

/// `GET /households/{id}/members`
pub async fn members<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Resident>>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(households::members(state.store.as_ref(), id).await?))
}

/// `PUT /households/{id}/recalculate`
pub async fn recalculate<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Path(id): Path<Uuid>,
) -> Result<Json<HouseholdSummary>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let summary = households::recalculate(
    state.store.as_ref(),
    id,
    state.config.income_aggregate,
    ip.actor(&admin),
  )
  .await?;
  Ok(Json(summary))
}
