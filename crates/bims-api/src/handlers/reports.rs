//! `GET /reports/*`. Admin only, JSON only.

use axum::{Json, extract::State};
use bims_core::{
  report::{BlotterReport, DemographicsReport, DocumentReport, PopulationReport, VoterReport},
  service::reports,
  store::RecordStore,
};

use crate::{AppState, auth::RequireAdmin, error::ApiError};

pub async fn population<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
) -> Result<Json<PopulationReport>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(reports::population(state.store.as_ref()).await?))
}

pub async fn demographics<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
) -> Result<Json<DemographicsReport>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(reports::demographics(state.store.as_ref()).await?))
}

pub async fn voters<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
) -> Result<Json<VoterReport>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(reports::voters(state.store.as_ref()).await?))
}

pub async fn documents<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
) -> Result<Json<DocumentReport>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(reports::documents(state.store.as_ref()).await?))
}

pub async fn blotters<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_): RequireAdmin,
) -> Result<Json<BlotterReport>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  Ok(Json(reports::blotters(state.store.as_ref()).await?))
}
