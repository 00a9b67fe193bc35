//! Resident use cases, including the single-head rule.
//!
//! Every mutation that touches a household reference recomputes the summary
//! of each household involved: the new one, and the old one if it changed.

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
  Error, Result,
  audit::{Action, Actor, Entity},
  household::IncomeAggregate,
  resident::{NewResident, Resident, ResidentPatch, ResidentVerification},
  service::{audit, backend, households},
  store::{Page, RecordStore, ResidentQuery},
};

/// Demote every `Head` of `household_id` except `keep` to `Relative`.
///
/// Must run before a resident whose resulting relationship is `Head` is
/// written. `keep` is that resident's id, or `None` when it is new.
pub async fn ensure_single_head<S: RecordStore>(
  store: &S,
  household_id: Uuid,
  keep: Option<Uuid>,
) -> Result<()> {
  let demoted = store.demote_heads(household_id, keep).await.map_err(backend)?;
  if demoted > 0 {
    tracing::info!(%household_id, demoted, "demoted previous household head");
  }
  Ok(())
}

async fn check_household<S: RecordStore>(store: &S, household_id: Uuid) -> Result<()> {
  match store.get_household(household_id).await.map_err(backend)? {
    Some(_) => Ok(()),
    None => Err(Error::InvalidReference("Invalid household reference".into())),
  }
}

async fn enforce_head<S: RecordStore>(store: &S, resident: &Resident, keep: Option<Uuid>) -> Result<()> {
  match resident.household_id {
    Some(household_id) if resident.is_head() => ensure_single_head(store, household_id, keep).await,
    _ => Ok(()),
  }
}

// ─── Reads ───────────────────────────────────────────────────────────────────

pub async fn get<S: RecordStore>(store: &S, id: Uuid) -> Result<Resident> {
  store
    .get_resident(id)
    .await
    .map_err(backend)?
    .ok_or_else(|| Error::not_found("Resident"))
}

pub async fn list<S: RecordStore>(store: &S, query: ResidentQuery) -> Result<Page<Resident>> {
  store.list_residents(query).await.map_err(backend)
}

/// Public check that a resident id belongs to someone on file.
pub async fn verify<S: RecordStore>(store: &S, id: Uuid) -> Result<ResidentVerification> {
  Ok(ResidentVerification::from(&get(store, id).await?))
}

// ─── Writes ──────────────────────────────────────────────────────────────────

pub async fn create<S: RecordStore>(
  store: &S,
  input: NewResident,
  actor: Actor,
  aggregate: IncomeAggregate,
) -> Result<Resident> {
  input.validate()?;
  if let Some(household_id) = input.household_id {
    check_household(store, household_id).await?;
  }

  let resident = input.into_resident(actor.user_id, Utc::now());
  enforce_head(store, &resident, None).await?;
  let resident = store.insert_resident(resident).await.map_err(backend)?;

  households::recompute_summary(store, resident.household_id, aggregate).await?;

  audit::record(
    store,
    actor,
    Action::CreateResident,
    Entity::Resident,
    Some(resident.resident_id),
    json!({ "name": resident.full_name(), "household_id": resident.household_id }),
  )
  .await;
  tracing::info!(resident_id = %resident.resident_id, "resident created");
  Ok(resident)
}

pub async fn update<S: RecordStore>(
  store: &S,
  id: Uuid,
  patch: ResidentPatch,
  actor: Actor,
  aggregate: IncomeAggregate,
) -> Result<Resident> {
  patch.validate()?;
  let before = get(store, id).await?;
  let target = patch.target_household(&before);
  if let Some(household_id) = target
    && target != before.household_id
  {
    check_household(store, household_id).await?;
  }

  let mut resident = before.clone();
  patch.apply(&mut resident, Utc::now());
  enforce_head(store, &resident, Some(id)).await?;
  let resident = store.update_resident(resident).await.map_err(backend)?;

  households::recompute_summary(store, resident.household_id, aggregate).await?;
  if before.household_id != resident.household_id {
    households::recompute_summary(store, before.household_id, aggregate).await?;
  }

  audit::record(
    store,
    actor,
    Action::UpdateResident,
    Entity::Resident,
    Some(id),
    json!({ "before": before, "after": resident }),
  )
  .await;
  tracing::info!(resident_id = %id, "resident updated");
  Ok(resident)
}

pub async fn delete<S: RecordStore>(
  store: &S,
  id: Uuid,
  actor: Actor,
  aggregate: IncomeAggregate,
) -> Result<()> {
  let resident = get(store, id).await?;
  if !store.delete_resident(id).await.map_err(backend)? {
    return Err(Error::not_found("Resident"));
  }

  households::recompute_summary(store, resident.household_id, aggregate).await?;

  audit::record(
    store,
    actor,
    Action::DeleteResident,
    Entity::Resident,
    Some(id),
    json!({ "name": resident.full_name(), "household_id": resident.household_id }),
  )
  .await;
  tracing::info!(resident_id = %id, "resident deleted");
  Ok(())
}
