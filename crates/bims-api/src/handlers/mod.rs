//! Per-resource axum handlers.
//!
//! Handlers stay thin: extract, call the matching `bims_core::service`
//! function, wrap the result in JSON. Role checks happen in the extractors
//! from [`crate::auth`].

pub mod announcements;
pub mod audit;
pub mod auth;
pub mod blotters;
pub mod documents;
pub mod households;
pub mod profile;
pub mod reports;
pub mod residents;
pub mod users;
pub mod verify;

use axum::Json;
use serde::Serialize;
use uuid::Uuid;

/// Body returned by `DELETE` routes.
#[derive(Debug, Serialize)]
pub struct Deleted {
  pub id:      Uuid,
  pub deleted: bool,
}

pub(crate) fn deleted(id: Uuid) -> Json<Deleted> { Json(Deleted { id, deleted: true }) }
