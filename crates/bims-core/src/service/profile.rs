use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
  Error, Result,
  audit::{Action, Actor, Entity},
  profile::{BarangayProfile, ProfileInput},
  service::{audit, backend},
  store::RecordStore,
};

pub async fn get<S: RecordStore>(store: &S) -> Result<BarangayProfile> {
  store
    .get_profile()
    .await
    .map_err(backend)?
    .ok_or_else(|| Error::NotFound("Barangay profile has not been set up".into()))
}

pub async fn put<S: RecordStore>(
  store: &S,
  input: ProfileInput,
  actor: Actor,
) -> Result<BarangayProfile> {
  input.validate()?;
  let profile = store
    .put_profile(input.into_profile(Utc::now()))
    .await
    .map_err(backend)?;

  audit::record(
    store,
    actor,
    Action::UpdateProfile,
    Entity::BarangayProfile,
    None,
    json!({ "barangay_name": profile.barangay_name, "officials": profile.officials.len() }),
  )
  .await;
  tracing::info!(barangay = %profile.barangay_name, "barangay profile saved");
  Ok(profile)
}
