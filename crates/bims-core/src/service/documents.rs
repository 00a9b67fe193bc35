//! Document request use cases.

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
  Error, Result,
  audit::{Action, Actor, Entity},
  document::{DocumentRequest, DocumentVerification, NewDocumentRequest},
  service::{audit, backend},
  store::{DocumentQuery, Page, RecordStore},
  workflow,
};

pub async fn get<S: RecordStore>(store: &S, id: Uuid) -> Result<DocumentRequest> {
  store
    .get_document(id)
    .await
    .map_err(backend)?
    .ok_or_else(|| Error::not_found("Document request"))
}

pub async fn list<S: RecordStore>(
  store: &S,
  query: DocumentQuery,
) -> Result<Page<DocumentRequest>> {
  store.list_documents(query).await.map_err(backend)
}

/// File a request for a resident on record. Nothing is written when the
/// resident does not exist.
pub async fn create<S: RecordStore>(
  store: &S,
  input: NewDocumentRequest,
  actor: Actor,
) -> Result<DocumentRequest> {
  input.validate()?;
  if store.get_resident(input.resident_id).await.map_err(backend)?.is_none() {
    return Err(Error::not_found("Resident"));
  }

  let request = store
    .insert_document(input.into_request(actor.user_id, Utc::now()))
    .await
    .map_err(backend)?;

  audit::record(
    store,
    actor,
    Action::CreateDocumentRequest,
    Entity::DocumentRequest,
    Some(request.request_id),
    json!({ "resident_id": request.resident_id, "doc_type": request.doc_type }),
  )
  .await;
  tracing::info!(request_id = %request.request_id, doc_type = %request.doc_type, "document requested");
  Ok(request)
}

pub async fn approve<S: RecordStore>(store: &S, id: Uuid, actor: Actor) -> Result<DocumentRequest> {
  let issued_by = actor.require()?;
  let mut request = get(store, id).await?;
  workflow::approve_document(&mut request, issued_by, Utc::now())?;
  let request = store.update_document(request).await.map_err(backend)?;

  audit::record(
    store,
    actor,
    Action::ApproveDocument,
    Entity::DocumentRequest,
    Some(id),
    json!({ "qr_code": request.qr_code }),
  )
  .await;
  tracing::info!(request_id = %id, "document approved");
  Ok(request)
}

pub async fn reject<S: RecordStore>(
  store: &S,
  id: Uuid,
  remarks: Option<String>,
  actor: Actor,
) -> Result<DocumentRequest> {
  let mut request = get(store, id).await?;
  workflow::reject_document(&mut request, remarks, Utc::now())?;
  let request = store.update_document(request).await.map_err(backend)?;

  audit::record(
    store,
    actor,
    Action::RejectDocument,
    Entity::DocumentRequest,
    Some(id),
    json!({ "remarks": request.remarks }),
  )
  .await;
  tracing::info!(request_id = %id, "document rejected");
  Ok(request)
}

pub async fn claim<S: RecordStore>(store: &S, id: Uuid, actor: Actor) -> Result<DocumentRequest> {
  let mut request = get(store, id).await?;
  workflow::claim_document(&mut request, Utc::now())?;
  let request = store.update_document(request).await.map_err(backend)?;

  audit::record(
    store,
    actor,
    Action::ClaimDocument,
    Entity::DocumentRequest,
    Some(id),
    json!({ "claimed_at": request.claimed_at }),
  )
  .await;
  tracing::info!(request_id = %id, "document claimed");
  Ok(request)
}

/// Public authenticity check. Only approved or claimed documents are valid.
pub async fn verify<S: RecordStore>(store: &S, id: Uuid) -> Result<DocumentVerification> {
  let request = store
    .get_document(id)
    .await
    .map_err(backend)?
    .ok_or_else(|| Error::not_found("Document"))?;
  let resident = store.get_resident(request.resident_id).await.map_err(backend)?;

  Ok(DocumentVerification {
    request_id:    request.request_id,
    doc_type:      request.doc_type,
    status:        request.status,
    resident_name: resident.map(|r| r.full_name()),
    issued_at:     request.issued_at,
    valid:         request.status.is_issued(),
  })
}
