//! Handlers for `/documents` endpoints.
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | `POST` | `/documents` | signed in; 404 if the resident is unknown |
//! | `GET`  | `/documents` | admin; filters `status`, `doc_type`, `resident_id` |
//! | `GET`  | `/documents/{id}` | admin |
//! | `PUT`  | `/documents/{id}/approve` | admin; issues the QR code |
//! | `PUT`  | `/documents/{id}/reject` | admin |
//! | `PUT`  | `/documents/{id}/claim` | admin; approved requests only |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use bims_core::{
  document::{DocumentRequest, NewDocumentRequest},
  service::documents,
  store::{DocumentQuery, Page, RecordStore},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState,
  auth::{ClientIp, CurrentUser, RequireAdmin},
  error::ApiError,
};

/// `POST /documents`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  ip: ClientIp,
  Json(body): Json<NewDocumentRequest>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let request = documents::create(state.store.as_ref(), body, ip.actor(&user)).await?;
  Ok((StatusCode::CREATED, Json(request)))
}

/// `GET /documents`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
  Query(query): Query<DocumentQuery>,
) -> Result<Json<Page<DocumentRequest>>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(documents::list(state.store.as_ref(), query).await?))
}

/// `GET /documents/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
  Path(id): Path<Uuid>,
) -> Result<Json<DocumentRequest>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(documents::get(state.store.as_ref(), id).await?))
}

/// `PUT /documents/{id}/approve`
pub async fn approve<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Path(id): Path<Uuid>,
) -> Result<Json<DocumentRequest>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(documents::approve(state.store.as_ref(), id, ip.actor(&admin)).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct RejectBody {
  pub remarks: Option<String>,
}

/// `PUT /documents/{id}/reject`, body `{"remarks": "..."}`
pub async fn reject<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Path(id): Path<Uuid>,
  Json(body): Json<RejectBody>,
) -> Result<Json<DocumentRequest>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let request = documents::reject(state.store.as_ref(), id, body.remarks, ip.actor(&admin)).await?;
  Ok(Json(request))
}

/// `PUT /documents/{id}/claim`
pub async fn claim<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Path(id): Path<Uuid>,
) -> Result<Json<DocumentRequest>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(documents::claim(state.store.as_ref(), id, ip.actor(&admin)).await?))
}
