//! Blotter use cases: filing, the status workflow and the approval gate.

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
  Error, Result,
  audit::{Action, Actor, Entity},
  blotter::{ApprovalDecision, Blotter, BlotterPatch, NewBlotter, Party},
  service::{audit, backend},
  store::{BlotterQuery, Page, RecordStore},
  workflow,
};

async fn check_party<S: RecordStore>(store: &S, party: &Party, role: &str) -> Result<()> {
  if let Some(id) = party.resident_id {
    if store.get_resident(id).await.map_err(backend)?.is_none() {
      return Err(Error::InvalidReference(format!("Invalid {role} reference")));
    }
  }
  Ok(())
}

async fn check_handler<S: RecordStore>(store: &S, handler: Option<Uuid>) -> Result<()> {
  if let Some(id) = handler {
    if store.get_user(id).await.map_err(backend)?.is_none() {
      return Err(Error::InvalidReference("Invalid case handler reference".into()));
    }
  }
  Ok(())
}

pub async fn get<S: RecordStore>(store: &S, id: Uuid) -> Result<Blotter> {
  store
    .get_blotter(id)
    .await
    .map_err(backend)?
    .ok_or_else(|| Error::not_found("Blotter"))
}

pub async fn list<S: RecordStore>(store: &S, query: BlotterQuery) -> Result<Page<Blotter>> {
  store.list_blotters(query).await.map_err(backend)
}

/// File a new blotter. `is_public` marks reports that came in through the
/// unauthenticated endpoint.
pub async fn create<S: RecordStore>(
  store: &S,
  input: NewBlotter,
  actor: Actor,
  is_public: bool,
) -> Result<Blotter> {
  input.validate()?;
  check_party(store, &input.complainant, "complainant").await?;
  check_party(store, &input.respondent, "respondent").await?;
  check_handler(store, input.case_handler).await?;

  let blotter = store
    .insert_blotter(input.into_blotter(actor.user_id, is_public, Utc::now()))
    .await
    .map_err(backend)?;

  audit::record(
    store,
    actor,
    Action::CreateBlotter,
    Entity::Blotter,
    Some(blotter.blotter_id),
    json!({
      "complainant": blotter.complainant.display_name(),
      "respondent": blotter.respondent.display_name(),
      "is_public": is_public,
    }),
  )
  .await;
  tracing::info!(blotter_id = %blotter.blotter_id, is_public, "blotter filed");
  Ok(blotter)
}

/// Apply an allow-listed update. A status change appends exactly one
/// history entry; re-sending the current status appends none.
pub async fn update<S: RecordStore>(
  store: &S,
  id: Uuid,
  patch: BlotterPatch,
  actor: Actor,
) -> Result<Blotter> {
  let before = get(store, id).await?;
  patch.validate(&before)?;
  if let Some(party) = &patch.complainant {
    check_party(store, party, "complainant").await?;
  }
  if let Some(party) = &patch.respondent {
    check_party(store, party, "respondent").await?;
  }
  check_handler(store, patch.case_handler).await?;

  let mut blotter = before.clone();
  let status_changed =
    workflow::apply_blotter_patch(&mut blotter, patch, actor.user_id, Utc::now());
  let blotter = store.update_blotter(blotter).await.map_err(backend)?;

  audit::record(
    store,
    actor,
    Action::UpdateBlotter,
    Entity::Blotter,
    Some(id),
    json!({ "before": before, "after": blotter }),
  )
  .await;
  tracing::info!(blotter_id = %id, status = %blotter.status, status_changed, "blotter updated");
  Ok(blotter)
}

/// Record an official's decision. A blotter is decided at most once.
pub async fn decide<S: RecordStore>(
  store: &S,
  id: Uuid,
  decision: ApprovalDecision,
  remarks: Option<String>,
  actor: Actor,
) -> Result<Blotter> {
  let decided_by = actor.require()?;
  let mut blotter = get(store, id).await?;
  workflow::decide_approval(&mut blotter, decision, remarks, decided_by, Utc::now())?;
  let blotter = store.update_blotter(blotter).await.map_err(backend)?;

  let action = match decision {
    ApprovalDecision::Approved => Action::ApproveBlotter,
    ApprovalDecision::Rejected => Action::RejectBlotter,
  };
  audit::record(
    store,
    actor,
    action,
    Entity::Blotter,
    Some(id),
    json!({ "approval": blotter.approval }),
  )
  .await;
  tracing::info!(blotter_id = %id, decision = ?decision, "blotter decided");
  Ok(blotter)
}

/// Attach already-stored files (paths or URLs) to a blotter.
pub async fn add_attachments<S: RecordStore>(
  store: &S,
  id: Uuid,
  paths: Vec<String>,
  actor: Actor,
) -> Result<Blotter> {
  let paths: Vec<String> = paths
    .into_iter()
    .map(|p| p.trim().to_owned())
    .filter(|p| !p.is_empty())
    .collect();
  if paths.is_empty() {
    return Err(Error::invalid("attachments", "at least one attachment is required"));
  }

  let mut blotter = get(store, id).await?;
  blotter.attachments.extend(paths.iter().cloned());
  blotter.updated_by = actor.user_id;
  blotter.updated_at = Utc::now();
  let blotter = store.update_blotter(blotter).await.map_err(backend)?;

  audit::record(
    store,
    actor,
    Action::AddBlotterAttachments,
    Entity::Blotter,
    Some(id),
    json!({ "added": paths }),
  )
  .await;
  Ok(blotter)
}

pub async fn delete<S: RecordStore>(store: &S, id: Uuid, actor: Actor) -> Result<()> {
  let blotter = get(store, id).await?;
  if !store.delete_blotter(id).await.map_err(backend)? {
    return Err(Error::not_found("Blotter"));
  }

  audit::record(
    store,
    actor,
    Action::DeleteBlotter,
    Entity::Blotter,
    Some(id),
    json!({ "nature_of_complaint": blotter.nature_of_complaint }),
  )
  .await;
  tracing::info!(blotter_id = %id, "blotter deleted");
  Ok(())
}
