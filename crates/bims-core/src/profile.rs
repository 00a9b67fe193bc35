//! The barangay's own profile. There is at most one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, Validator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Official {
  pub name:       String,
  pub position:   String,
  pub term_start: Option<NaiveDate>,
  pub term_end:   Option<NaiveDate>,
  pub photo:      Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
  pub auto_id_format: Option<String>,
  pub pdf_header:     Option<String>,
  pub backup_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarangayProfile {
  pub barangay_name:  String,
  pub logo:           Option<String>,
  pub vision:         Option<String>,
  pub mission:        Option<String>,
  pub address:        Option<String>,
  pub contact_number: Option<String>,
  pub email:          Option<String>,
  pub officials:      Vec<Official>,
  pub settings:       ProfileSettings,
  pub updated_at:     DateTime<Utc>,
}

/// Body of `PUT /profile`; replaces the stored profile wholesale.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileInput {
  pub barangay_name:  String,
  pub logo:           Option<String>,
  pub vision:         Option<String>,
  pub mission:        Option<String>,
  pub address:        Option<String>,
  pub contact_number: Option<String>,
  pub email:          Option<String>,
  #[serde(default)]
  pub officials:      Vec<Official>,
  #[serde(default)]
  pub settings:       ProfileSettings,
}

impl ProfileInput {
  pub fn validate(&self) -> Result<()> {
    let mut v = Validator::new();
    v.require(&self.barangay_name, "barangay_name");
    for (i, o) in self.officials.iter().enumerate() {
      v.check(
        !o.name.trim().is_empty() && !o.position.trim().is_empty(),
        &format!("officials[{i}]"),
        "officials need a name and a position",
      );
      if let (Some(start), Some(end)) = (o.term_start, o.term_end) {
        v.check(start <= end, &format!("officials[{i}]"), "term_start must not follow term_end");
      }
    }
    v.finish()
  }

  pub fn into_profile(self, now: DateTime<Utc>) -> BarangayProfile {
    BarangayProfile {
      barangay_name:  self.barangay_name.trim().to_owned(),
      logo:           self.logo,
      vision:         self.vision,
      mission:        self.mission,
      address:        self.address,
      contact_number: self.contact_number,
      email:          self.email,
      officials:      self.officials,
      settings:       self.settings,
      updated_at:     now,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn officials_are_checked_individually() {
    let input: ProfileInput = serde_json::from_value(serde_json::json!({
      "barangay_name": "San Isidro",
      "officials": [
        { "name": "Pedro Penduko", "position": "Punong Barangay" },
        { "name": "", "position": "Kagawad" },
        { "name": "Lia", "position": "SK Chair",
          "term_start": "2026-01-01", "term_end": "2025-01-01" }
      ]
    }))
    .unwrap();
    match input.validate() {
      Err(crate::Error::Validation(fields)) => {
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "officials[1]");
        assert_eq!(fields[1].field, "officials[2]");
      }
      other => panic!("unexpected: {other:?}"),
    }
  }

  #[test]
  fn settings_default_when_absent() {
    let input: ProfileInput =
      serde_json::from_str(r#"{"barangay_name":"San Isidro"}"#).unwrap();
    let profile = input.into_profile(Utc::now());
    assert!(!profile.settings.backup_enabled);
    assert!(profile.officials.is_empty());
  }
}
