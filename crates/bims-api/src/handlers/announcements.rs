//! Handlers for `/announcements` endpoints.
//!
//! Reads are public but only show published, public posts unless the caller
//! is an admin. Writes are admin only.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use bims_core::{
  announcement::{Announcement, AnnouncementPatch, NewAnnouncement},
  service::announcements,
  store::{AnnouncementQuery, Page, RecordStore},
  user::User,
};
use uuid::Uuid;

use crate::{
  AppState,
  auth::{ClientIp, MaybeUser, RequireAdmin},
  error::ApiError,
  handlers::{Deleted, deleted},
};

fn is_admin(user: &Option<User>) -> bool { user.as_ref().is_some_and(|u| u.role.is_admin()) }

/// `GET /announcements`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  MaybeUser(user): MaybeUser,
  Query(query): Query<AnnouncementQuery>,
) -> Result<Json<Page<Announcement>>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let query = if is_admin(&user) { query } else { query.public_only() };
  Ok(Json(announcements::list(state.store.as_ref(), query).await?))
}

/// `GET /announcements/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  MaybeUser(user): MaybeUser,
  Path(id): Path<Uuid>,
) -> Result<Json<Announcement>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let announcement = if is_admin(&user) {
    announcements::get(state.store.as_ref(), id).await?
  } else {
    announcements::get_public(state.store.as_ref(), id).await?
  };
  Ok(Json(announcement))
}

/// `POST /announcements`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Json(body): Json<NewAnnouncement>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let announcement =
    announcements::create(state.store.as_ref(), body, ip.actor(&admin)).await?;
  Ok((StatusCode::CREATED, Json(announcement)))
}

/// `PUT /announcements/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Path(id): Path<Uuid>,
  Json(body): Json<AnnouncementPatch>,
) -> Result<Json<Announcement>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let announcement =
    announcements::update(state.store.as_ref(), id, body, ip.actor(&admin)).await?;
  Ok(Json(announcement))
}

/// `DELETE /announcements/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(admin): RequireAdmin,
  ip: ClientIp,
  Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  announcements::delete(state.store.as_ref(), id, ip.actor(&admin)).await?;
  Ok(deleted(id))
}
