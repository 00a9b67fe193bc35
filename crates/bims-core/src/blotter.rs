//! Blotters: incident reports with a status workflow and an approval gate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{
  error::{Result, Validator},
  resident::nullable,
};

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
pub enum BlotterStatus {
  #[default]
  Pending,
  #[serde(rename = "Under Investigation")]
  #[strum(serialize = "Under Investigation")]
  UnderInvestigation,
  Settled,
  Escalated,
  #[serde(rename = "For Hearing")]
  #[strum(serialize = "For Hearing")]
  ForHearing,
  Closed,
}

/// One entry of a blotter's append-only status log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
  pub status:     BlotterStatus,
  pub changed_by: Option<Uuid>,
  pub changed_at: DateTime<Utc>,
  pub remarks:    Option<String>,
}

// ─── Approval ────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ApprovalStatus {
  #[default]
  Pending,
  Approved,
  Rejected,
}

/// The outcome an official records on a pending blotter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalDecision {
  Approved,
  Rejected,
}

impl From<ApprovalDecision> for ApprovalStatus {
  fn from(d: ApprovalDecision) -> Self {
    match d {
      ApprovalDecision::Approved => Self::Approved,
      ApprovalDecision::Rejected => Self::Rejected,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Approval {
  pub status:     ApprovalStatus,
  pub decided_by: Option<Uuid>,
  pub decided_at: Option<DateTime<Utc>>,
  pub remarks:    Option<String>,
}

// ─── Parties ─────────────────────────────────────────────────────────────────

/// A complainant or respondent: a resident on file, a free-text name, or both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
  pub resident_id: Option<Uuid>,
  pub name:        Option<String>,
}

impl Party {
  pub fn is_identified(&self) -> bool {
    self.resident_id.is_some() || self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
  }

  pub fn display_name(&self) -> String {
    match (&self.name, self.resident_id) {
      (Some(name), _) => name.clone(),
      (None, Some(id)) => id.to_string(),
      (None, None) => String::new(),
    }
  }
}

// ─── Blotter ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blotter {
  pub blotter_id:          Uuid,
  pub complainant:         Party,
  pub respondent:          Party,
  pub incident_date:       NaiveDate,
  pub incident_time:       Option<String>,
  pub location:            Option<String>,
  pub nature_of_complaint: String,
  pub description:         Option<String>,
  pub action_taken:        Option<String>,
  pub remarks:             Option<String>,
  pub attachments:         Vec<String>,
  pub status:              BlotterStatus,
  pub status_history:      Vec<StatusChange>,
  pub approval:            Approval,
  pub case_handler:        Option<Uuid>,
  pub is_public:           bool,
  pub created_by:          Option<Uuid>,
  pub updated_by:          Option<Uuid>,
  pub created_at:          DateTime<Utc>,
  pub updated_at:          DateTime<Utc>,
}

fn validate_parties(v: &mut Validator, complainant: &Party, respondent: &Party) {
  v.check(
    complainant.is_identified(),
    "complainant",
    "complainant needs a resident_id or a name",
  )
  .check(
    respondent.is_identified(),
    "respondent",
    "respondent needs a resident_id or a name",
  );
}

/// Input to blotter creation, from staff or from the public endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBlotter {
  #[serde(default)]
  pub complainant:         Party,
  #[serde(default)]
  pub respondent:          Party,
  pub incident_date:       NaiveDate,
  pub incident_time:       Option<String>,
  pub location:            Option<String>,
  pub nature_of_complaint: String,
  pub description:         Option<String>,
  pub action_taken:        Option<String>,
  pub remarks:             Option<String>,
  pub status:              Option<BlotterStatus>,
  pub case_handler:        Option<Uuid>,
}

impl NewBlotter {
  pub fn validate(&self) -> Result<()> {
    let mut v = Validator::new();
    validate_parties(&mut v, &self.complainant, &self.respondent);
    v.require(&self.nature_of_complaint, "nature_of_complaint").finish()
  }

  /// Build the record; the creation itself is the first status-history entry.
  pub fn into_blotter(
    self,
    actor: Option<Uuid>,
    is_public: bool,
    now: DateTime<Utc>,
  ) -> Blotter {
    let status = self.status.unwrap_or_default();
    Blotter {
      blotter_id: Uuid::new_v4(),
      complainant: self.complainant,
      respondent: self.respondent,
      incident_date: self.incident_date,
      incident_time: self.incident_time,
      location: self.location,
      nature_of_complaint: self.nature_of_complaint.trim().to_owned(),
      description: self.description,
      action_taken: self.action_taken,
      remarks: self.remarks.clone(),
      attachments: Vec::new(),
      status,
      status_history: vec![StatusChange {
        status,
        changed_by: actor,
        changed_at: now,
        remarks: self.remarks,
      }],
      approval: Approval::default(),
      case_handler: self.case_handler,
      is_public,
      created_by: actor,
      updated_by: None,
      created_at: now,
      updated_at: now,
    }
  }
}

/// Allow-listed blotter update. `status` is routed through the workflow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlotterPatch {
  pub status:              Option<BlotterStatus>,
  pub case_handler:        Option<Uuid>,
  pub complainant:         Option<Party>,
  pub respondent:          Option<Party>,
  pub incident_date:       Option<NaiveDate>,
  #[serde(default, deserialize_with = "nullable")]
  pub incident_time:       Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub location:            Option<Option<String>>,
  pub nature_of_complaint: Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub description:         Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub action_taken:        Option<Option<String>>,
  /// Stored on the blotter and attached to the status-history entry, if any.
  pub remarks:             Option<String>,
}

impl BlotterPatch {
  pub fn validate(&self, current: &Blotter) -> Result<()> {
    let mut v = Validator::new();
    validate_parties(
      &mut v,
      self.complainant.as_ref().unwrap_or(&current.complainant),
      self.respondent.as_ref().unwrap_or(&current.respondent),
    );
    if let Some(nature) = &self.nature_of_complaint {
      v.require(nature, "nature_of_complaint");
    }
    v.finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_labels_round_trip_through_strum() {
    for s in [
      BlotterStatus::Pending,
      BlotterStatus::UnderInvestigation,
      BlotterStatus::ForHearing,
      BlotterStatus::Closed,
    ] {
      assert_eq!(s.as_ref().parse::<BlotterStatus>().unwrap(), s);
    }
    assert_eq!(
      serde_json::to_string(&BlotterStatus::UnderInvestigation).unwrap(),
      "\"Under Investigation\""
    );
  }

  #[test]
  fn new_blotter_requires_both_parties() {
    let b: NewBlotter = serde_json::from_value(serde_json::json!({
      "complainant": { "name": "Maria" },
      "incident_date": "2024-03-01",
      "nature_of_complaint": "Noise"
    }))
    .unwrap();
    match b.validate() {
      Err(crate::Error::Validation(f)) => assert_eq!(f[0].field, "respondent"),
      other => panic!("unexpected: {other:?}"),
    }
  }

  #[test]
  fn creation_seeds_history() {
    let actor = Uuid::new_v4();
    let b: NewBlotter = serde_json::from_value(serde_json::json!({
      "complainant": { "name": "Maria" },
      "respondent": { "resident_id": Uuid::new_v4() },
      "incident_date": "2024-03-01",
      "nature_of_complaint": "Noise",
      "remarks": "walk-in"
    }))
    .unwrap();
    let blotter = b.into_blotter(Some(actor), false, Utc::now());
    assert_eq!(blotter.status, BlotterStatus::Pending);
    assert_eq!(blotter.status_history.len(), 1);
    assert_eq!(blotter.status_history[0].changed_by, Some(actor));
    assert_eq!(blotter.status_history[0].remarks.as_deref(), Some("walk-in"));
    assert_eq!(blotter.approval.status, ApprovalStatus::Pending);
  }
}
