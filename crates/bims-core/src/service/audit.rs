//! Audit trail recorder.

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Result,
  audit::{Action, Actor, AuditEntry, Entity},
  service::backend,
  store::{AuditQuery, Page, RecordStore},
};

/// Append one audit entry.
///
/// A failed write never fails the operation being audited: it is logged and
/// dropped.
pub async fn record<S: RecordStore>(
  store: &S,
  actor: Actor,
  action: Action,
  entity: Entity,
  entity_id: Option<Uuid>,
  details: serde_json::Value,
) {
  let entry = AuditEntry {
    audit_id: Uuid::new_v4(),
    actor_id: actor.user_id,
    ip: actor.ip,
    action,
    entity,
    entity_id,
    details,
    recorded_at: Utc::now(),
  };

  if let Err(e) = store.append_audit(entry).await {
    tracing::warn!(%action, %entity, ?entity_id, error = %e, "failed to record audit entry");
  }
}

pub async fn list<S: RecordStore>(store: &S, query: AuditQuery) -> Result<Page<AuditEntry>> {
  store.list_audit(query).await.map_err(backend)
}
