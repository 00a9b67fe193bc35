//! Residents, the person records every other collection hangs off.
//!
//! A resident optionally belongs to a household and carries the flags the
//! household summary is derived from.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::error::{Result, Validator};

// ─── Enumerations ────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum Gender {
  Male,
  Female,
  Other,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum CivilStatus {
  Single,
  Married,
  Widowed,
  Divorced,
  Separated,
}

/// A resident's role within their household.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum Relationship {
  Head,
  Spouse,
  Child,
  Sibling,
  Parent,
  Relative,
  Boarder,
  Other,
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
pub enum EmploymentStatus {
  Employed,
  #[default]
  Unemployed,
  #[serde(rename = "Self-Employed")]
  #[strum(serialize = "Self-Employed")]
  SelfEmployed,
  Student,
  Retired,
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
pub enum ResidencyStatus {
  #[default]
  Active,
  Deceased,
  Transferred,
  Migrated,
}

// ─── Supplementary details ───────────────────────────────────────────────────

/// Profile data the core never interprets; stored as a single JSON column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResidentDetails {
  pub nationality:            Option<String>,
  pub religion:               Option<String>,
  pub educational_attainment: Option<String>,
  pub school:                 Option<String>,
  pub is_student:             bool,
  pub blood_type:             Option<String>,
  pub disability_type:        Option<String>,
  pub philhealth_number:      Option<String>,
  pub sss_number:             Option<String>,
  pub gsis_number:            Option<String>,
  pub tin_number:             Option<String>,
  pub contact_number:         Option<String>,
  pub email:                  Option<String>,
  pub voter_id_number:        Option<String>,
  pub occupation:             Option<String>,
  pub employer:               Option<String>,
  pub avatar:                 Option<String>,
  pub remarks:                Option<String>,
}

// ─── Resident ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
  pub resident_id:          Uuid,
  pub first_name:           String,
  pub middle_name:          Option<String>,
  pub last_name:            String,
  pub suffix:               Option<String>,
  pub birthdate:            NaiveDate,
  pub gender:               Gender,
  pub civil_status:         CivilStatus,
  pub purok:                String,
  pub house_number:         Option<String>,
  pub household_id:         Option<Uuid>,
  pub relationship_to_head: Option<Relationship>,
  pub monthly_income:       Option<f64>,
  pub employment_status:    EmploymentStatus,
  pub is_4ps_beneficiary:   bool,
  pub is_pwd:               bool,
  pub is_senior_citizen:    bool,
  pub is_solo_parent:       bool,
  pub is_voter:             bool,
  pub status:               ResidencyStatus,
  pub details:              ResidentDetails,
  pub registered_by:        Option<Uuid>,
  pub created_at:           DateTime<Utc>,
  pub updated_at:           DateTime<Utc>,
}

impl Resident {
  pub fn is_head(&self) -> bool { self.relationship_to_head == Some(Relationship::Head) }

  pub fn full_name(&self) -> String { format!("{} {}", self.first_name, self.last_name) }
}

/// What the public resident-verification endpoint discloses.
#[derive(Debug, Clone, Serialize)]
pub struct ResidentVerification {
  pub resident_id: Uuid,
  pub full_name:   String,
  pub purok:       String,
  pub status:      ResidencyStatus,
  pub valid:       bool,
}

impl From<&Resident> for ResidentVerification {
  fn from(r: &Resident) -> Self {
    Self {
      resident_id: r.resident_id,
      full_name:   r.full_name(),
      purok:       r.purok.clone(),
      status:      r.status,
      valid:       r.status == ResidencyStatus::Active,
    }
  }
}

// ─── NewResident ─────────────────────────────────────────────────────────────

/// Input to resident creation. Timestamps and the id are assigned by the
/// service layer.
#[derive(Debug, Clone, Deserialize)]
pub struct NewResident {
  pub first_name:           String,
  pub middle_name:          Option<String>,
  pub last_name:            String,
  pub suffix:               Option<String>,
  pub birthdate:            NaiveDate,
  pub gender:               Gender,
  pub civil_status:         CivilStatus,
  pub purok:                String,
  pub house_number:         Option<String>,
  pub household_id:         Option<Uuid>,
  pub relationship_to_head: Option<Relationship>,
  pub monthly_income:       Option<f64>,
  #[serde(default)]
  pub employment_status:    EmploymentStatus,
  #[serde(default)]
  pub is_4ps_beneficiary:   bool,
  #[serde(default)]
  pub is_pwd:               bool,
  #[serde(default)]
  pub is_senior_citizen:    bool,
  #[serde(default)]
  pub is_solo_parent:       bool,
  #[serde(default)]
  pub is_voter:             bool,
  #[serde(default)]
  pub status:               ResidencyStatus,
  #[serde(default)]
  pub details:              ResidentDetails,
}

impl NewResident {
  pub fn validate(&self) -> Result<()> {
    Validator::new()
      .require(&self.first_name, "first_name")
      .require(&self.last_name, "last_name")
      .require(&self.purok, "purok")
      .check(
        self.monthly_income.is_none_or(|i| i.is_finite()),
        "monthly_income",
        "monthly_income must be a number",
      )
      .finish()
  }

  pub fn into_resident(
    self,
    registered_by: Option<Uuid>,
    now: DateTime<Utc>,
  ) -> Resident {
    Resident {
      resident_id:          Uuid::new_v4(),
      first_name:           self.first_name.trim().to_owned(),
      middle_name:          self.middle_name,
      last_name:            self.last_name.trim().to_owned(),
      suffix:               self.suffix,
      birthdate:            self.birthdate,
      gender:               self.gender,
      civil_status:         self.civil_status,
      purok:                self.purok,
      house_number:         self.house_number,
      household_id:         self.household_id,
      relationship_to_head: self.relationship_to_head,
      monthly_income:       self.monthly_income,
      employment_status:    self.employment_status,
      is_4ps_beneficiary:   self.is_4ps_beneficiary,
      is_pwd:               self.is_pwd,
      is_senior_citizen:    self.is_senior_citizen,
      is_solo_parent:       self.is_solo_parent,
      is_voter:             self.is_voter,
      status:               self.status,
      details:              self.details,
      registered_by,
      created_at:           now,
      updated_at:           now,
    }
  }
}

// ─── ResidentPatch ───────────────────────────────────────────────────────────

/// Deserialise a field that distinguishes "absent" (`None`) from an
/// explicit `null` (`Some(None)`).
pub fn nullable<'de, D, T>(de: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}

/// The fields an update request may touch. Anything not listed here is
/// ignored, including ids, timestamps and the registering user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResidentPatch {
  pub first_name:           Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub middle_name:          Option<Option<String>>,
  pub last_name:            Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub suffix:               Option<Option<String>>,
  pub birthdate:            Option<NaiveDate>,
  pub gender:               Option<Gender>,
  pub civil_status:         Option<CivilStatus>,
  pub purok:                Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub house_number:         Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub household_id:         Option<Option<Uuid>>,
  #[serde(default, deserialize_with = "nullable")]
  pub relationship_to_head: Option<Option<Relationship>>,
  #[serde(default, deserialize_with = "nullable")]
  pub monthly_income:       Option<Option<f64>>,
  pub employment_status:    Option<EmploymentStatus>,
  pub is_4ps_beneficiary:   Option<bool>,
  pub is_pwd:               Option<bool>,
  pub is_senior_citizen:    Option<bool>,
  pub is_solo_parent:       Option<bool>,
  pub is_voter:             Option<bool>,
  pub status:               Option<ResidencyStatus>,
  pub details:              Option<ResidentDetails>,
}

impl ResidentPatch {
  /// Household the resident will reference once the patch is applied.
  pub fn target_household(&self, current: &Resident) -> Option<Uuid> {
    match self.household_id {
      Some(h) => h,
      None => current.household_id,
    }
  }

  pub fn validate(&self) -> Result<()> {
    let mut v = Validator::new();
    if let Some(name) = &self.first_name {
      v.require(name, "first_name");
    }
    if let Some(name) = &self.last_name {
      v.require(name, "last_name");
    }
    if let Some(purok) = &self.purok {
      v.require(purok, "purok");
    }
    if let Some(Some(income)) = self.monthly_income {
      v.check(income.is_finite(), "monthly_income", "monthly_income must be a number");
    }
    v.finish()
  }

  pub fn apply(self, r: &mut Resident, now: DateTime<Utc>) {
    if let Some(v) = self.first_name {
      r.first_name = v.trim().to_owned();
    }
    if let Some(v) = self.middle_name {
      r.middle_name = v;
    }
    if let Some(v) = self.last_name {
      r.last_name = v.trim().to_owned();
    }
    if let Some(v) = self.suffix {
      r.suffix = v;
    }
    if let Some(v) = self.birthdate {
      r.birthdate = v;
    }
    if let Some(v) = self.gender {
      r.gender = v;
    }
    if let Some(v) = self.civil_status {
      r.civil_status = v;
    }
    if let Some(v) = self.purok {
      r.purok = v;
    }
    if let Some(v) = self.house_number {
      r.house_number = v;
    }
    if let Some(v) = self.household_id {
      r.household_id = v;
    }
    if let Some(v) = self.relationship_to_head {
      r.relationship_to_head = v;
    }
    if let Some(v) = self.monthly_income {
      r.monthly_income = v;
    }
    if let Some(v) = self.employment_status {
      r.employment_status = v;
    }
    if let Some(v) = self.is_4ps_beneficiary {
      r.is_4ps_beneficiary = v;
    }
    if let Some(v) = self.is_pwd {
      r.is_pwd = v;
    }
    if let Some(v) = self.is_senior_citizen {
      r.is_senior_citizen = v;
    }
    if let Some(v) = self.is_solo_parent {
      r.is_solo_parent = v;
    }
    if let Some(v) = self.is_voter {
      r.is_voter = v;
    }
    if let Some(v) = self.status {
      r.status = v;
    }
    if let Some(v) = self.details {
      r.details = v;
    }
    r.updated_at = now;
  }
}
