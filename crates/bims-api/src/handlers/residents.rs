//! Handlers for `/residents` endpoints. Admin only.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/residents` | Filters: `search`, `purok`, `gender`, `status`, `household_id`, flags; paged |
//! | `POST`   | `/residents` | 201; demotes a previous head, recomputes the household |
//! | `GET`    | `/residents/{id}` | 404 if not found |
//! | `PUT`    | `/residents/{id}` | Allow-listed fields only |
//! | `DELETE` | `/residents/{id}` | Recomputes the former household |
//! | `GET`    | `/residents/household/{household_id}` | Members in head-election order |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use bims_core::{
  resident::{NewResident, Resident, ResidentPatch},
  service::{households, residents},
  store::{Page, RecordStore, ResidentQuery},
};
use uuid::Uuid;

use crate::{
  AppState,
  auth::{ClientIp, RequireAdmin},
  error::ApiError,
  handlers::{Deleted, deleted},
};

/// `GET /residents`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
  Query(query): Query<ResidentQuery>,
) -> Result<Json<Page<Resident>>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(residents::list(state.store.as_ref(), query).await?))
}

/// `POST /residents`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Json(body): Json<NewResident>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let resident = residents::create(
    state.store.as_ref(),
    body,
    ip.actor(&admin),
    state.config.income_aggregate,
  )
  .await?;
  Ok((StatusCode::CREATED, Json(resident)))
}

/// `GET /residents/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
  Path(id): Path<Uuid>,
) -> Result<Json<Resident>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(residents::get(state.store.as_ref(), id).await?))
}

/// `PUT /residents/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Path(id): Path<Uuid>,
  Json(body): Json<ResidentPatch>,
) -> Result<Json<Resident>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let resident = residents::update(
    state.store.as_ref(),
    id,
    body,
    ip.actor(&admin),
    state.config.income_aggregate,
  )
  .await?;
  Ok(Json(resident))
}

/// `DELETE /residents/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  residents::delete(
    state.store.as_ref(),
    id,
    ip.actor(&admin),
    state.config.income_aggregate,
  )
  .await?;
  Ok(deleted(id))
}

/// `GET /residents/household/{household_id}`
pub async fn by_household<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
  Path(household_id): Path<Uuid>,
) -> Result<Json<Vec<Resident>>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(households::members(state.store.as_ref(), household_id).await?))
}
