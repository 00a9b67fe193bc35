//! Audit trail entries. Append-only: nothing in any layer updates or deletes
//! them.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result};

/// Who performed an audited operation, and from which address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actor {
  pub user_id: Option<Uuid>,
  pub ip:      Option<IpAddr>,
}

impl Actor {
  pub fn user(user_id: Uuid) -> Self { Self { user_id: Some(user_id), ip: None } }

  pub fn anonymous() -> Self { Self::default() }

  pub fn with_ip(self, ip: Option<IpAddr>) -> Self { Self { ip, ..self } }

  /// The signed-in user, for operations that stamp who decided them.
  pub fn require(self) -> Result<Uuid> {
    self
      .user_id
      .ok_or_else(|| Error::Unauthorized("Authentication required".into()))
  }
}

/// What was done.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
  RegisterUser,
  Login,
  Logout,
  ChangePassword,
  UpdateAccount,
  ApproveUser,
  CreateResident,
  UpdateResident,
  DeleteResident,
  CreateHousehold,
  UpdateHousehold,
  DeleteHousehold,
  RecalculateHousehold,
  CreateBlotter,
  UpdateBlotter,
  DeleteBlotter,
  AddBlotterAttachments,
  ApproveBlotter,
  RejectBlotter,
  CreateDocumentRequest,
  ApproveDocument,
  RejectDocument,
  ClaimDocument,
  CreateAnnouncement,
  UpdateAnnouncement,
  DeleteAnnouncement,
  UpdateProfile,
}

/// What it was done to.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Entity {
  User,
  Resident,
  Household,
  Blotter,
  DocumentRequest,
  Announcement,
  BarangayProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
  pub audit_id:    Uuid,
  pub actor_id:    Option<Uuid>,
  pub ip:          Option<IpAddr>,
  pub action:      Action,
  pub entity:      Entity,
  pub entity_id:   Option<Uuid>,
  pub details:     serde_json::Value,
  pub recorded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn action_labels_are_screaming_snake() {
    assert_eq!(Action::UpdateBlotter.as_ref(), "UPDATE_BLOTTER");
    assert_eq!(
      serde_json::to_string(&Action::CreateDocumentRequest).unwrap(),
      "\"CREATE_DOCUMENT_REQUEST\""
    );
    assert_eq!("APPROVE_DOCUMENT".parse::<Action>().unwrap(), Action::ApproveDocument);
  }

  #[test]
  fn anonymous_actor_cannot_decide() {
    assert!(matches!(Actor::anonymous().require(), Err(Error::Unauthorized(_))));
    let id = Uuid::new_v4();
    let actor = Actor::user(id).with_ip(Some("10.0.0.7".parse().unwrap()));
    assert_eq!(actor.require().unwrap(), id);
    assert_eq!(actor.ip, Some(IpAddr::from([10, 0, 0, 7])));
  }

  #[test]
  fn entity_labels_are_snake() {
    assert_eq!(Entity::DocumentRequest.as_ref(), "document_request");
    assert_eq!("barangay_profile".parse::<Entity>().unwrap(), Entity::BarangayProfile);
  }
}
