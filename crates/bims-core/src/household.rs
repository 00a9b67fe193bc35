//! Households and their derived summary.
//!
//! The summary fields are a cache over the residents that reference the
//! household. They are never accepted from callers; [`summarize`] is the only
//! place they are computed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  error::{Result, Validator},
  resident::{Resident, nullable},
};

// ─── Summary ─────────────────────────────────────────────────────────────────

/// How member incomes fold into the household's `monthly_income`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeAggregate {
  #[default]
  Mean,
  Sum,
}

/// Derived fields of a household, recomputed from its members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseholdSummary {
  pub head_id:             Option<Uuid>,
  pub total_members:       u32,
  pub monthly_income:      f64,
  pub has_4ps_beneficiary: bool,
  pub has_pwd:             bool,
  pub has_senior_citizen:  bool,
  pub has_solo_parent:     bool,
  /// When the aggregator last wrote this snapshot.
  pub summarized_at:       Option<DateTime<Utc>>,
}

/// Compute the summary for `members`.
///
/// `members` must be in `(created_at, resident_id)` order: the first resident
/// marked `Head` in that order becomes the household head. An absent income
/// counts as zero; negative or non-finite incomes are left out entirely.
pub fn summarize(
  members: &[Resident],
  aggregate: IncomeAggregate,
  now: DateTime<Utc>,
) -> HouseholdSummary {
  let incomes: Vec<f64> = members
    .iter()
    .map(|r| r.monthly_income.unwrap_or(0.0))
    .filter(|i| i.is_finite() && *i >= 0.0)
    .collect();

  let total: f64 = incomes.iter().sum();
  let monthly_income = match aggregate {
    IncomeAggregate::Sum => total,
    IncomeAggregate::Mean if incomes.is_empty() => 0.0,
    IncomeAggregate::Mean => total / incomes.len() as f64,
  };

  HouseholdSummary {
    head_id: members.iter().find(|r| r.is_head()).map(|r| r.resident_id),
    total_members: members.len() as u32,
    monthly_income,
    has_4ps_beneficiary: members.iter().any(|r| r.is_4ps_beneficiary),
    has_pwd: members.iter().any(|r| r.is_pwd),
    has_senior_citizen: members.iter().any(|r| r.is_senior_citizen),
    has_solo_parent: members.iter().any(|r| r.is_solo_parent),
    summarized_at: Some(now),
  }
}

// ─── Household ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
  pub household_id:   Uuid,
  pub household_code: String,
  pub purok:          String,
  pub address:        Option<String>,
  pub tags:           Vec<String>,
  #[serde(flatten)]
  pub summary:        HouseholdSummary,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

/// Input to household creation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewHousehold {
  pub household_code: String,
  pub purok:          String,
  pub address:        Option<String>,
  #[serde(default)]
  pub tags:           Vec<String>,
}

impl NewHousehold {
  pub fn validate(&self) -> Result<()> {
    Validator::new()
      .require(&self.household_code, "household_code")
      .require(&self.purok, "purok")
      .finish()
  }

  pub fn into_household(self, now: DateTime<Utc>) -> Household {
    Household {
      household_id:   Uuid::new_v4(),
      household_code: self.household_code.trim().to_owned(),
      purok:          self.purok,
      address:        self.address,
      tags:           self.tags,
      summary:        HouseholdSummary::default(),
      created_at:     now,
      updated_at:     now,
    }
  }
}

/// Allow-listed household update. Summary fields are intentionally absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HouseholdPatch {
  pub household_code: Option<String>,
  pub purok:          Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub address:        Option<Option<String>>,
  pub tags:           Option<Vec<String>>,
}

impl HouseholdPatch {
  pub fn validate(&self) -> Result<()> {
    let mut v = Validator::new();
    if let Some(code) = &self.household_code {
      v.require(code, "household_code");
    }
    if let Some(purok) = &self.purok {
      v.require(purok, "purok");
    }
    v.finish()
  }

  pub fn apply(self, h: &mut Household, now: DateTime<Utc>) {
    if let Some(v) = self.household_code {
      h.household_code = v.trim().to_owned();
    }
    if let Some(v) = self.purok {
      h.purok = v;
    }
    if let Some(v) = self.address {
      h.address = v;
    }
    if let Some(v) = self.tags {
      h.tags = v;
    }
    h.updated_at = now;
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, NaiveDate, TimeZone};

  use super::*;
  use crate::resident::{
    CivilStatus, EmploymentStatus, Gender, Relationship, ResidencyStatus, ResidentDetails,
  };

  fn member(
    created_secs: i64,
    relationship: Option<Relationship>,
    income: Option<f64>,
  ) -> Resident {
    let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(created_secs);
    Resident {
      resident_id: Uuid::new_v4(),
      first_name: "Test".into(),
      middle_name: None,
      last_name: "Member".into(),
      suffix: None,
      birthdate: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
      gender: Gender::Female,
      civil_status: CivilStatus::Single,
      purok: "Purok 1".into(),
      house_number: None,
      household_id: None,
      relationship_to_head: relationship,
      monthly_income: income,
      employment_status: EmploymentStatus::Unemployed,
      is_4ps_beneficiary: false,
      is_pwd: false,
      is_senior_citizen: false,
      is_solo_parent: false,
      is_voter: false,
      status: ResidencyStatus::Active,
      details: ResidentDetails::default(),
      registered_by: None,
      created_at: at,
      updated_at: at,
    }
  }

  #[test]
  fn head_and_relative_average_income() {
    let a = member(0, Some(Relationship::Head), Some(10_000.0));
    let b = member(1, Some(Relationship::Relative), Some(0.0));
    let s = summarize(&[a.clone(), b], IncomeAggregate::Mean, Utc::now());

    assert_eq!(s.total_members, 2);
    assert_eq!(s.head_id, Some(a.resident_id));
    assert_eq!(s.monthly_income, 5_000.0);
    assert!(!s.has_4ps_beneficiary);
    assert!(!s.has_pwd);
    assert!(!s.has_senior_citizen);
    assert!(!s.has_solo_parent);
  }

  #[test]
  fn sum_mode_adds_incomes() {
    let a = member(0, None, Some(10_000.0));
    let b = member(1, None, Some(2_500.0));
    let s = summarize(&[a, b], IncomeAggregate::Sum, Utc::now());
    assert_eq!(s.monthly_income, 12_500.0);
  }

  #[test]
  fn missing_income_counts_as_zero_and_negative_is_dropped() {
    let a = member(0, None, Some(9_000.0));
    let b = member(1, None, None);
    let c = member(2, None, Some(-50.0));
    let s = summarize(&[a, b, c], IncomeAggregate::Mean, Utc::now());
    assert_eq!(s.total_members, 3);
    assert_eq!(s.monthly_income, 4_500.0);
  }

  #[test]
  fn no_head_when_nobody_is_head() {
    let b = member(0, Some(Relationship::Relative), Some(0.0));
    let s = summarize(&[b], IncomeAggregate::Mean, Utc::now());
    assert_eq!(s.head_id, None);
    assert_eq!(s.total_members, 1);
  }

  #[test]
  fn first_head_in_order_wins() {
    let older = member(0, Some(Relationship::Head), None);
    let newer = member(10, Some(Relationship::Head), None);
    let s = summarize(&[older.clone(), newer], IncomeAggregate::Mean, Utc::now());
    assert_eq!(s.head_id, Some(older.resident_id));
  }

  #[test]
  fn flags_are_any_member() {
    let mut a = member(0, None, None);
    a.is_pwd = true;
    let mut b = member(1, None, None);
    b.is_4ps_beneficiary = true;
    let s = summarize(&[a, b], IncomeAggregate::Mean, Utc::now());
    assert!(s.has_pwd);
    assert!(s.has_4ps_beneficiary);
    assert!(!s.has_solo_parent);
  }

  #[test]
  fn empty_household_is_all_zero() {
    let s = summarize(&[], IncomeAggregate::Mean, Utc::now());
    assert_eq!(s.total_members, 0);
    assert_eq!(s.monthly_income, 0.0);
    assert_eq!(s.head_id, None);
  }

  #[test]
  fn patch_cannot_carry_summary_fields() {
    let patch: HouseholdPatch =
      serde_json::from_str(r#"{"purok":"Purok 3","total_members":99}"#).unwrap();
    let mut h = NewHousehold {
      household_code: "HH-001".into(),
      purok:          "Purok 1".into(),
      address:        None,
      tags:           vec![],
    }
    .into_household(Utc::now());
    patch.apply(&mut h, Utc::now());
    assert_eq!(h.purok, "Purok 3");
    assert_eq!(h.summary.total_members, 0);
  }
}
