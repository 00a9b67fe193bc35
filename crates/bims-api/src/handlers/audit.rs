//! `GET /audit-logs[?actor_id=&entity=&action=&page=&limit=]`. Admin only.

use axum::{
  Json,
  extract::{Query, State},
};
use bims_core::{
  audit::AuditEntry,
  service::audit,
  store::{AuditQuery, Page, RecordStore},
};

use crate::{AppState, auth::RequireAdmin, error::ApiError};

pub async fn list<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
  Query(query): Query<AuditQuery>,
) -> Result<Json<Page<AuditEntry>>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(audit::list(state.store.as_ref(), query).await?))
}
