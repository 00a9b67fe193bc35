//! Status workflow engine for blotters and document requests.
//!
//! Everything here is pure: functions mutate an in-memory record and return
//! an error when a transition is illegal, leaving the record untouched. The
//! service layer loads, calls one of these, and persists.
//!
//! | Record | Field | Legal transitions |
//! |--------|-------|-------------------|
//! | Blotter | `status` | any → any other (same value is a no-op) |
//! | Blotter | `approval.status` | `pending` → `approved` \| `rejected`, once |
//! | DocumentRequest | `status` | `Pending` → `Approved` → `Claimed`; `Pending` → `Rejected` |

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  Error, Result,
  blotter::{ApprovalDecision, ApprovalStatus, Blotter, BlotterPatch, BlotterStatus, StatusChange},
  document::{DocumentRequest, DocumentStatus, qr_code_for},
};

// ─── Blotter status ──────────────────────────────────────────────────────────

/// Move `blotter` to `status`, appending to the history. Returns `false`
/// (and records nothing) when the blotter is already in that status.
pub fn change_status(
  blotter: &mut Blotter,
  status: BlotterStatus,
  actor: Option<Uuid>,
  remarks: Option<String>,
  now: DateTime<Utc>,
) -> bool {
  if blotter.status == status {
    return false;
  }
  blotter.status_history.push(StatusChange {
    status,
    changed_by: actor,
    changed_at: now,
    remarks,
  });
  blotter.status = status;
  true
}

/// Apply an allow-listed update. The status goes through [`change_status`];
/// every other field is copied independently of it.
///
/// Returns whether a status-history entry was appended.
pub fn apply_blotter_patch(
  blotter: &mut Blotter,
  patch: BlotterPatch,
  actor: Option<Uuid>,
  now: DateTime<Utc>,
) -> bool {
  let changed = match patch.status {
    Some(status) => change_status(blotter, status, actor, patch.remarks.clone(), now),
    None => false,
  };

  if let Some(v) = patch.case_handler {
    blotter.case_handler = Some(v);
  }
  if let Some(v) = patch.complainant {
    blotter.complainant = v;
  }
  if let Some(v) = patch.respondent {
    blotter.respondent = v;
  }
  if let Some(v) = patch.incident_date {
    blotter.incident_date = v;
  }
  if let Some(v) = patch.incident_time {
    blotter.incident_time = v;
  }
  if let Some(v) = patch.location {
    blotter.location = v;
  }
  if let Some(v) = patch.nature_of_complaint {
    blotter.nature_of_complaint = v.trim().to_owned();
  }
  if let Some(v) = patch.description {
    blotter.description = v;
  }
  if let Some(v) = patch.action_taken {
    blotter.action_taken = v;
  }
  if let Some(v) = patch.remarks {
    blotter.remarks = Some(v);
  }

  blotter.updated_by = actor;
  blotter.updated_at = now;
  changed
}

// ─── Blotter approval ────────────────────────────────────────────────────────

/// Record an approval decision. The gate opens exactly once.
pub fn decide_approval(
  blotter: &mut Blotter,
  decision: ApprovalDecision,
  remarks: Option<String>,
  actor: Uuid,
  now: DateTime<Utc>,
) -> Result<()> {
  match blotter.approval.status {
    ApprovalStatus::Pending => {}
    ApprovalStatus::Approved => {
      return Err(Error::Conflict("Blotter already approved".into()));
    }
    ApprovalStatus::Rejected => {
      return Err(Error::Conflict("Blotter already rejected".into()));
    }
  }

  blotter.approval.status = decision.into();
  blotter.approval.decided_by = Some(actor);
  blotter.approval.decided_at = Some(now);
  blotter.approval.remarks = remarks;
  blotter.updated_by = Some(actor);
  blotter.updated_at = now;
  Ok(())
}

// ─── Document requests ───────────────────────────────────────────────────────

/// `Pending → Approved`. Sets the issuer, issue time and QR token.
pub fn approve_document(
  request: &mut DocumentRequest,
  actor: Uuid,
  now: DateTime<Utc>,
) -> Result<()> {
  match request.status {
    DocumentStatus::Pending => {}
    DocumentStatus::Approved => {
      return Err(Error::Conflict("Request already approved".into()));
    }
    other => {
      return Err(Error::Conflict(format!("Cannot approve a {other} request")));
    }
  }

  request.qr_code = Some(qr_code_for(request.request_id));
  request.status = DocumentStatus::Approved;
  request.issued_by = Some(actor);
  request.issued_at = Some(now);
  request.updated_at = now;
  Ok(())
}

/// `Pending → Rejected`.
pub fn reject_document(
  request: &mut DocumentRequest,
  remarks: Option<String>,
  now: DateTime<Utc>,
) -> Result<()> {
  if request.status != DocumentStatus::Pending {
    return Err(Error::Conflict(format!("Cannot reject a {} request", request.status)));
  }
  request.status = DocumentStatus::Rejected;
  request.remarks = remarks;
  request.updated_at = now;
  Ok(())
}

/// `Approved → Claimed`. A request that was never approved cannot be
/// claimed.
pub fn claim_document(request: &mut DocumentRequest, now: DateTime<Utc>) -> Result<()> {
  if request.status != DocumentStatus::Approved {
    return Err(Error::Conflict(format!(
      "Only approved requests can be claimed (current status: {})",
      request.status
    )));
  }
  request.status = DocumentStatus::Claimed;
  request.claimed_at = Some(now);
  request.updated_at = now;
  Ok(())
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, NaiveDate};

  use super::*;
  use crate::{
    blotter::{NewBlotter, Party},
    document::{DocumentType, NewDocumentRequest},
  };

  fn blotter() -> Blotter {
    NewBlotter {
      complainant:         Party { resident_id: None, name: Some("Ana".into()) },
      respondent:          Party { resident_id: None, name: Some("Ben".into()) },
      incident_date:       NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
      incident_time:       None,
      location:            None,
      nature_of_complaint: "Trespass".into(),
      description:         None,
      action_taken:        None,
      remarks:             None,
      status:              None,
      case_handler:        None,
    }
    .into_blotter(None, false, Utc::now())
  }

  fn request() -> DocumentRequest {
    NewDocumentRequest {
      resident_id: Uuid::new_v4(),
      doc_type:    DocumentType::CertificateOfResidency,
      purpose:     Some("Employment".into()),
    }
    .into_request(None, Utc::now())
  }

  #[test]
  fn new_status_appends_one_entry() {
    let mut b = blotter();
    let actor = Uuid::new_v4();
    assert!(change_status(&mut b, BlotterStatus::UnderInvestigation, Some(actor), None, Utc::now()));
    assert_eq!(b.status_history.len(), 2);
    assert_eq!(b.status_history[1].status, BlotterStatus::UnderInvestigation);
    assert_eq!(b.status_history[1].changed_by, Some(actor));
  }

  #[test]
  fn same_status_appends_nothing() {
    let mut b = blotter();
    assert!(!change_status(&mut b, BlotterStatus::Pending, None, None, Utc::now()));
    assert_eq!(b.status_history.len(), 1);
  }

  #[test]
  fn any_status_can_follow_any_other() {
    let mut b = blotter();
    for s in [
      BlotterStatus::Closed,
      BlotterStatus::Pending,
      BlotterStatus::Escalated,
      BlotterStatus::Settled,
    ] {
      assert!(change_status(&mut b, s, None, None, Utc::now()));
    }
    assert_eq!(b.status_history.len(), 5);
  }

  #[test]
  fn patch_updates_fields_without_status() {
    let mut b = blotter();
    let handler = Uuid::new_v4();
    let patch = BlotterPatch {
      case_handler: Some(handler),
      location: Some(Some("Purok 4".into())),
      ..Default::default()
    };
    assert!(!apply_blotter_patch(&mut b, patch, Some(handler), Utc::now()));
    assert_eq!(b.case_handler, Some(handler));
    assert_eq!(b.location.as_deref(), Some("Purok 4"));
    assert_eq!(b.status_history.len(), 1);
    assert_eq!(b.updated_by, Some(handler));
  }

  #[test]
  fn patch_remarks_travel_with_status_change() {
    let mut b = blotter();
    let patch = BlotterPatch {
      status: Some(BlotterStatus::ForHearing),
      remarks: Some("scheduled".into()),
      ..Default::default()
    };
    assert!(apply_blotter_patch(&mut b, patch, None, Utc::now()));
    assert_eq!(b.status_history[1].remarks.as_deref(), Some("scheduled"));
    assert_eq!(b.remarks.as_deref(), Some("scheduled"));
  }

  #[test]
  fn second_approval_conflicts_and_keeps_timestamp() {
    let mut b = blotter();
    let official = Uuid::new_v4();
    let first = Utc::now();
    decide_approval(&mut b, ApprovalDecision::Approved, None, official, first).unwrap();

    let err = decide_approval(
      &mut b,
      ApprovalDecision::Approved,
      None,
      official,
      first + Duration::minutes(5),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Conflict(ref m) if m.contains("already approved")));
    assert_eq!(b.approval.decided_at, Some(first));
  }

  #[test]
  fn rejection_is_final() {
    let mut b = blotter();
    let official = Uuid::new_v4();
    decide_approval(&mut b, ApprovalDecision::Rejected, Some("dup".into()), official, Utc::now())
      .unwrap();
    assert_eq!(b.approval.status, ApprovalStatus::Rejected);
    assert!(
      decide_approval(&mut b, ApprovalDecision::Approved, None, official, Utc::now()).is_err()
    );
  }

  #[test]
  fn approval_is_independent_of_status() {
    let mut b = blotter();
    change_status(&mut b, BlotterStatus::Closed, None, None, Utc::now());
    assert_eq!(b.approval.status, ApprovalStatus::Pending);
    decide_approval(&mut b, ApprovalDecision::Approved, None, Uuid::new_v4(), Utc::now()).unwrap();
    assert_eq!(b.status, BlotterStatus::Closed);
  }

  #[test]
  fn document_approval_sets_issue_fields_once() {
    let mut r = request();
    let clerk = Uuid::new_v4();
    let at = Utc::now();
    approve_document(&mut r, clerk, at).unwrap();
    assert_eq!(r.status, DocumentStatus::Approved);
    assert_eq!(r.issued_by, Some(clerk));
    assert_eq!(r.qr_code, Some(qr_code_for(r.request_id)));

    let err = approve_document(&mut r, clerk, at + Duration::hours(1)).unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    assert_eq!(r.issued_at, Some(at));
  }

  #[test]
  fn claim_requires_approval() {
    let mut r = request();
    assert!(claim_document(&mut r, Utc::now()).is_err());
    assert_eq!(r.status, DocumentStatus::Pending);

    approve_document(&mut r, Uuid::new_v4(), Utc::now()).unwrap();
    claim_document(&mut r, Utc::now()).unwrap();
    assert_eq!(r.status, DocumentStatus::Claimed);
    assert!(r.claimed_at.is_some());
  }

  #[test]
  fn terminal_states_stay_terminal() {
    let mut r = request();
    reject_document(&mut r, Some("incomplete".into()), Utc::now()).unwrap();
    assert!(approve_document(&mut r, Uuid::new_v4(), Utc::now()).is_err());
    assert!(claim_document(&mut r, Utc::now()).is_err());
    assert!(reject_document(&mut r, None, Utc::now()).is_err());
    assert_eq!(r.status, DocumentStatus::Rejected);
  }
}
