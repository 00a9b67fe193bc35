//! JSON REST API for the barangay records backend.
//!
//! Exposes an axum [`Router`] backed by any [`RecordStore`]. Handlers are
//! thin; the business rules live in [`bims_core::service`]. Authentication is
//! a bearer token issued by `POST /auth/login`; role checks are extractors in
//! [`auth`].
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = bims_api::router(AppState { store, config });
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, patch, post, put},
};
use bims_core::{household::IncomeAggregate, store::RecordStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{
  announcements, audit, blotters, documents, households, profile, reports, residents, users,
  verify,
};

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_session_ttl() -> i64 { 24 * 60 }

/// Runtime server configuration, deserialised from `config.toml` and
/// `BIMS_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  pub store_path:          PathBuf,
  #[serde(default = "default_session_ttl")]
  pub session_ttl_minutes: i64,
  #[serde(default)]
  pub income_aggregate:    IncomeAggregate,
  /// Seeded as the first account when the store has no users.
  #[serde(default)]
  pub admin:               Option<AdminConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
  pub name:          String,
  pub username:      String,
  pub email:         String,
  /// Argon2 PHC string, see `server --hash-password`.
  pub password_hash: String,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: RecordStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RecordStore + Clone + 'static,
{
  Router::new()
    // Auth
    .route("/auth/register",                      post(handlers::auth::register::<S>))
    .route("/auth/login",                         post(handlers::auth::login::<S>))
    .route("/auth/refresh",                       post(handlers::auth::refresh::<S>))
    .route("/auth/logout",                        post(handlers::auth::logout::<S>))
    // Own account
    .route("/users/me",                           get(users::me))
    .route("/users/change-password",              patch(users::change_password::<S>))
    .route("/users/update-profile",               patch(users::update_profile::<S>))
    // Account administration
    .route("/admin/users",                        get(users::list::<S>))
    .route("/admin/approval",                     patch(users::set_approval::<S>))
    // Residents
    .route("/residents",                          get(residents::list::<S>).post(residents::create::<S>))
    .route(
      "/residents/{id}",
      get(residents::get_one::<S>)
        .put(residents::update::<S>)
        .delete(residents::delete::<S>),
    )
    .route("/residents/household/{household_id}", get(residents::by_household::<S>))
    // Households
    .route("/households",                         get(households::list::<S>).post(households::create::<S>))
    .route(
      "/households/{id}",
      get(households::get_one::<S>)
        .put(households::update::<S>)
        .delete(households::delete::<S>),
    )
    .route("/households/{id}/members",            get(households::members::<S>))
    .route("/households/{id}/recalculate",        put(households::recalculate::<S>))
    // Blotters
    .route("/blotters/public",                    post(blotters::create_public::<S>))
    .route("/blotters",                           get(blotters::list::<S>).post(blotters::create::<S>))
    .route(
      "/blotters/{id}",
      get(blotters::get_one::<S>)
        .put(blotters::update::<S>)
        .delete(blotters::delete::<S>),
    )
    .route("/blotters/{id}/attachments",          post(blotters::add_attachments::<S>))
    .route("/blotters/{id}/approve",              patch(blotters::approve::<S>))
    // Documents
    .route("/documents",                          get(documents::list::<S>).post(documents::create::<S>))
    .route("/documents/{id}",                     get(documents::get_one::<S>))
    .route("/documents/{id}/approve",             put(documents::approve::<S>))
    .route("/documents/{id}/reject",              put(documents::reject::<S>))
    .route("/documents/{id}/claim",               put(documents::claim::<S>))
    // Public verification
    .route("/verify/document/{id}",               get(verify::document::<S>))
    .route("/verify/resident/{id}",               get(verify::resident::<S>))
    // Announcements
    .route(
      "/announcements",
      get(announcements::list::<S>).post(announcements::create::<S>),
    )
    .route(
      "/announcements/{id}",
      get(announcements::get_one::<S>)
        .put(announcements::update::<S>)
        .delete(announcements::delete::<S>),
    )
    // Barangay profile
    .route("/profile",                            get(profile::get::<S>).put(profile::put::<S>))
    // Reports
    .route("/reports/population",                 get(reports::population::<S>))
    .route("/reports/demographics",               get(reports::demographics::<S>))
    .route("/reports/voters",                     get(reports::voters::<S>))
    .route("/reports/documents",                  get(reports::documents::<S>))
    .route("/reports/blotters",                   get(reports::blotters::<S>))
    // Audit trail
    .route("/audit-logs",                         get(audit::list::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
