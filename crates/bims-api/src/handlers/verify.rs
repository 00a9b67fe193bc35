//! Public verification of issued documents and resident ids, e.g. from a
//! scanned QR code.

use axum::{
  Json,
  extract::{Path, State},
};
use bims_core::{
  document::DocumentVerification,
  resident::ResidentVerification,
  service::{documents, residents},
  store::RecordStore,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// `GET /verify/document/{id}`
pub async fn document<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<DocumentVerification>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(documents::verify(state.store.as_ref(), id).await?))
}

/// `GET /verify/resident/{id}`
pub async fn resident<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ResidentVerification>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(residents::verify(state.store.as_ref(), id).await?))
}
