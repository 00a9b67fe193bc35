//! Handlers for `/blotters` endpoints.
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | `POST`   | `/blotters/public` | none; marked `is_public` |
//! | `GET`    | `/blotters` | signed in |
//! | `POST`   | `/blotters` | signed in |
//! | `GET`    | `/blotters/{id}` | signed in |
//! | `PUT`    | `/blotters/{id}` | signed in; status changes are logged |
//! | `DELETE` | `/blotters/{id}` | admin |
//! | `POST`   | `/blotters/{id}/attachments` | signed in |
//! | `PATCH`  | `/blotters/{id}/approve` | official or admin; once only |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use bims_core::{
  audit::Actor,
  blotter::{ApprovalDecision, Blotter, BlotterPatch, NewBlotter},
  service::blotters,
  store::{BlotterQuery, Page, RecordStore},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState,
  auth::{ClientIp, CurrentUser, RequireAdmin, RequireOfficial},
  error::ApiError,
  handlers::{Deleted, deleted},
};

/// `POST /blotters/public`
pub async fn create_public<S>(
  State(state): State<AppState<S>>,
  ClientIp(ip): ClientIp,
  Json(body): Json<NewBlotter>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let actor = Actor::anonymous().with_ip(ip);
  let blotter = blotters::create(state.store.as_ref(), body, actor, true).await?;
  Ok((StatusCode::CREATED, Json(blotter)))
}

/// `POST /blotters`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  ip: ClientIp,
  Json(body): Json<NewBlotter>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let blotter = blotters::create(state.store.as_ref(), body, ip.actor(&user), false).await?;
  Ok((StatusCode::CREATED, Json(blotter)))
}

/// `GET /blotters`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentUser(_): CurrentUser,
  Query(query): Query<BlotterQuery>,
) -> Result<Json<Page<Blotter>>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(blotters::list(state.store.as_ref(), query).await?))
}

/// `GET /blotters/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentUser(_): CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<Json<Blotter>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(blotters::get(state.store.as_ref(), id).await?))
}

/// `PUT /blotters/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  ip: ClientIp,
  Path(id): Path<Uuid>,
  Json(body): Json<BlotterPatch>,
) -> Result<Json<Blotter>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(blotters::update(state.store.as_ref(), id, body, ip.actor(&user)).await?))
}

/// `DELETE /blotters/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  blotters::delete(state.store.as_ref(), id, ip.actor(&admin)).await?;
  Ok(deleted(id))
}

#[derive(Debug, Deserialize)]
pub struct AttachmentsBody {
  pub attachments: Vec<String>,
}

/// `POST /blotters/{id}/attachments`. Files are uploaded elsewhere; this
/// records their paths.
pub async fn add_attachments<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  ip: ClientIp,
  Path(id): Path<Uuid>,
  Json(body): Json<AttachmentsBody>,
) -> Result<Json<Blotter>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let blotter =
    blotters::add_attachments(state.store.as_ref(), id, body.attachments, ip.actor(&user))
      .await?;
  Ok(Json(blotter))
}

#[derive(Debug, Deserialize)]
pub struct DecisionBody {
  pub status:  ApprovalDecision,
  pub remarks: Option<String>,
}

/// `PATCH /blotters/{id}/approve`, body `{"status":"approved"|"rejected"}`
pub async fn approve<S>(
  State(state): State<AppState<S>>,
  RequireOfficial(official): RequireOfficial,
  ip: ClientIp,
  Path(id): Path<Uuid>,
  Json(body): Json<DecisionBody>,
) -> Result<Json<Blotter>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let blotter =
    blotters::decide(state.store.as_ref(), id, body.status, body.remarks, ip.actor(&official))
      .await?;
  Ok(Json(blotter))
}
