//! Household use cases and the summary aggregator.

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
  Error, Result,
  audit::{Action, Actor, Entity},
  household::{Household, HouseholdPatch, HouseholdSummary, IncomeAggregate, NewHousehold, summarize},
  resident::Resident,
  service::{audit, backend},
  store::{HouseholdQuery, Page, RecordStore},
};

// ─── Aggregator ──────────────────────────────────────────────────────────────

/// Recompute and persist the derived summary of `household_id` from the
/// residents that currently reference it.
///
/// `None` is a no-op. Returns `Ok(None)` when the household does not exist,
/// so callers that recompute as a side effect can ignore dangling ids.
pub async fn recompute_summary<S: RecordStore>(
  store: &S,
  household_id: Option<Uuid>,
  aggregate: IncomeAggregate,
) -> Result<Option<HouseholdSummary>> {
  let Some(household_id) = household_id else {
    return Ok(None);
  };

  let members = store.household_members(household_id).await.map_err(backend)?;
  let summary = summarize(&members, aggregate, Utc::now());

  let written = store
    .write_summary(household_id, summary.clone())
    .await
    .map_err(backend)?;
  if !written {
    tracing::debug!(%household_id, "summary target no longer exists");
    return Ok(None);
  }

  tracing::debug!(
    %household_id,
    total_members = summary.total_members,
    head_id = ?summary.head_id,
    "household summary recomputed"
  );
  Ok(Some(summary))
}

/// Explicit recalculation, e.g. after a bulk import.
pub async fn recalculate<S: RecordStore>(
  store: &S,
  household_id: Uuid,
  aggregate: IncomeAggregate,
  actor: Actor,
) -> Result<HouseholdSummary> {
  let summary = recompute_summary(store, Some(household_id), aggregate)
    .await?
    .ok_or_else(|| Error::not_found("Household"))?;

  audit::record(
    store,
    actor,
    Action::RecalculateHousehold,
    Entity::Household,
    Some(household_id),
    json!({ "summary": summary }),
  )
  .await;
  Ok(summary)
}

// ─── CRUD ────────────────────────────────────────────────────────────────────

pub async fn get<S: RecordStore>(store: &S, id: Uuid) -> Result<Household> {
  store
    .get_household(id)
    .await
    .map_err(backend)?
    .ok_or_else(|| Error::not_found("Household"))
}

pub async fn list<S: RecordStore>(store: &S, query: HouseholdQuery) -> Result<Page<Household>> {
  store.list_households(query).await.map_err(backend)
}

/// Residents of the household, in head-election order.
pub async fn members<S: RecordStore>(store: &S, id: Uuid) -> Result<Vec<Resident>> {
  get(store, id).await?;
  store.household_members(id).await.map_err(backend)
}

pub async fn create<S: RecordStore>(
  store: &S,
  input: NewHousehold,
  actor: Actor,
) -> Result<Household> {
  input.validate()?;
  let household = store
    .insert_household(input.into_household(Utc::now()))
    .await
    .map_err(backend)?;

  audit::record(
    store,
    actor,
    Action::CreateHousehold,
    Entity::Household,
    Some(household.household_id),
    json!({ "household_code": household.household_code }),
  )
  .await;
  tracing::info!(household_id = %household.household_id, "household created");
  Ok(household)
}

pub async fn update<S: RecordStore>(
  store: &S,
  id: Uuid,
  patch: HouseholdPatch,
  actor: Actor,
) -> Result<Household> {
  patch.validate()?;
  let before = get(store, id).await?;
  let mut household = before.clone();
  patch.apply(&mut household, Utc::now());

  let household = store.update_household(household).await.map_err(backend)?;

  audit::record(
    store,
    actor,
    Action::UpdateHousehold,
    Entity::Household,
    Some(id),
    json!({ "before": before, "after": household }),
  )
  .await;
  tracing::info!(household_id = %id, "household updated");
  Ok(household)
}

/// Residents of a deleted household keep their records with the reference
/// cleared.
pub async fn delete<S: RecordStore>(store: &S, id: Uuid, actor: Actor) -> Result<()> {
  let household = get(store, id).await?;
  if !store.delete_household(id).await.map_err(backend)? {
    return Err(Error::not_found("Household"));
  }

  audit::record(
    store,
    actor,
    Action::DeleteHousehold,
    Entity::Household,
    Some(id),
    json!({ "household_code": household.household_code }),
  )
  .await;
  tracing::info!(household_id = %id, "household deleted");
  Ok(())
}
