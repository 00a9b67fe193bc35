//! Document requests: clearances and certificates issued to residents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::error::{Result, Validator};

/// Prefix of the verification token printed on issued documents.
pub const QR_PREFIX: &str = "BRGY-DOC-";

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum DocumentType {
  #[serde(rename = "Barangay Clearance")]
  #[strum(serialize = "Barangay Clearance")]
  BarangayClearance,
  #[serde(rename = "Certificate of Residency")]
  #[strum(serialize = "Certificate of Residency")]
  CertificateOfResidency,
  #[serde(rename = "Certificate of Indigency")]
  #[strum(serialize = "Certificate of Indigency")]
  CertificateOfIndigency,
  #[serde(rename = "Certificate of Good Moral")]
  #[strum(serialize = "Certificate of Good Moral")]
  CertificateOfGoodMoral,
  #[serde(rename = "Barangay ID")]
  #[strum(serialize = "Barangay ID")]
  BarangayId,
  #[serde(rename = "Barangay Business Permit")]
  #[strum(serialize = "Barangay Business Permit")]
  BarangayBusinessPermit,
}

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
pub enum DocumentStatus {
  #[default]
  Pending,
  Approved,
  Claimed,
  Rejected,
}

impl DocumentStatus {
  /// Whether a document in this state may be presented as genuine.
  pub fn is_issued(self) -> bool { matches!(self, Self::Approved | Self::Claimed) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRequest {
  pub request_id:   Uuid,
  pub resident_id:  Uuid,
  pub doc_type:     DocumentType,
  pub purpose:      Option<String>,
  pub status:       DocumentStatus,
  pub remarks:      Option<String>,
  pub issued_by:    Option<Uuid>,
  pub issued_at:    Option<DateTime<Utc>>,
  pub qr_code:      Option<String>,
  pub claimed_at:   Option<DateTime<Utc>>,
  pub requested_by: Option<Uuid>,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

/// What the public document-verification endpoint discloses.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentVerification {
  pub request_id:    Uuid,
  pub doc_type:      DocumentType,
  pub status:        DocumentStatus,
  pub resident_name: Option<String>,
  pub issued_at:     Option<DateTime<Utc>>,
  pub valid:         bool,
}

/// The verification token derived from a request's identity.
pub fn qr_code_for(request_id: Uuid) -> String { format!("{QR_PREFIX}{request_id}") }

#[derive(Debug, Clone, Deserialize)]
pub struct NewDocumentRequest {
  pub resident_id: Uuid,
  pub doc_type:    DocumentType,
  pub purpose:     Option<String>,
}

impl NewDocumentRequest {
  pub fn validate(&self) -> Result<()> {
    let mut v = Validator::new();
    if let Some(purpose) = &self.purpose {
      v.check(purpose.len() <= 500, "purpose", "purpose must be at most 500 characters");
    }
    v.finish()
  }

  pub fn into_request(self, requested_by: Option<Uuid>, now: DateTime<Utc>) -> DocumentRequest {
    DocumentRequest {
      request_id: Uuid::new_v4(),
      resident_id: self.resident_id,
      doc_type: self.doc_type,
      purpose: self.purpose.map(|p| p.trim().to_owned()),
      status: DocumentStatus::Pending,
      remarks: None,
      issued_by: None,
      issued_at: None,
      qr_code: None,
      claimed_at: None,
      requested_by,
      created_at: now,
      updated_at: now,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn qr_code_is_deterministic() {
    let id = Uuid::new_v4();
    assert_eq!(qr_code_for(id), qr_code_for(id));
    assert_eq!(qr_code_for(id), format!("BRGY-DOC-{id}"));
  }

  #[test]
  fn doc_type_uses_display_labels() {
    let t: DocumentType = serde_json::from_str("\"Barangay Clearance\"").unwrap();
    assert_eq!(t, DocumentType::BarangayClearance);
    assert_eq!(t.as_ref(), "Barangay Clearance");
  }

  #[test]
  fn only_approved_and_claimed_are_issued() {
    assert!(DocumentStatus::Approved.is_issued());
    assert!(DocumentStatus::Claimed.is_issued());
    assert!(!DocumentStatus::Pending.is_issued());
    assert!(!DocumentStatus::Rejected.is_issued());
  }
}
