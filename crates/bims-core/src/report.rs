//! Aggregate reports. Rendering (PDF, spreadsheets) is left to clients; these
//! are the numbers they are drawn from.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One bucket of a grouped count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
  pub label: String,
  pub count: u64,
}

impl Tally {
  pub fn new(label: impl Into<String>, count: u64) -> Self {
    Self { label: label.into(), count }
  }
}

/// Age buckets, youngest first.
pub const AGE_GROUPS: [&str; 4] = ["0-12", "13-17", "18-59", "60+"];

/// Completed years between `birthdate` and `today`; zero for future dates.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> u32 {
  let mut years = today.year() - birthdate.year();
  if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
    years -= 1;
  }
  years.max(0) as u32
}

pub fn age_group(age: u32) -> &'static str {
  match age {
    0..=12 => AGE_GROUPS[0],
    13..=17 => AGE_GROUPS[1],
    18..=59 => AGE_GROUPS[2],
    _ => AGE_GROUPS[3],
  }
}

/// Tally `birthdates` into [`AGE_GROUPS`], keeping empty buckets.
pub fn tally_ages(birthdates: &[NaiveDate], today: NaiveDate) -> Vec<Tally> {
  let mut counts = [0u64; 4];
  for b in birthdates {
    let group = age_group(age_on(*b, today));
    if let Some(i) = AGE_GROUPS.iter().position(|g| *g == group) {
      counts[i] += 1;
    }
  }
  AGE_GROUPS.iter().zip(counts).map(|(g, c)| Tally::new(*g, c)).collect()
}

/// Active residents only.
#[derive(Debug, Clone, Serialize)]
pub struct PopulationReport {
  pub total:        u64,
  pub by_purok:     Vec<Tally>,
  pub by_gender:    Vec<Tally>,
  pub by_age_group: Vec<Tally>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemographicsReport {
  pub by_civil_status:       Vec<Tally>,
  pub by_employment_status:  Vec<Tally>,
  pub pwd:                   u64,
  pub senior_citizens:       u64,
  pub solo_parents:          u64,
  pub four_ps_beneficiaries: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoterReport {
  pub voters:     u64,
  pub non_voters: u64,
  /// Registered voters per purok.
  pub by_purok:   Vec<Tally>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
  pub total:     u64,
  pub by_type:   Vec<Tally>,
  pub by_status: Vec<Tally>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlotterReport {
  pub total:       u64,
  pub by_status:   Vec<Tally>,
  /// Keyed by incident month, `YYYY-MM`.
  pub by_month:    Vec<Tally>,
  pub by_approval: Vec<Tally>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, day).unwrap() }

  #[test]
  fn age_counts_completed_years() {
    let today = d(2024, 6, 15);
    assert_eq!(age_on(d(2000, 6, 15), today), 24);
    assert_eq!(age_on(d(2000, 6, 16), today), 23);
    assert_eq!(age_on(d(2030, 1, 1), today), 0);
  }

  #[test]
  fn group_boundaries() {
    assert_eq!(age_group(12), "0-12");
    assert_eq!(age_group(13), "13-17");
    assert_eq!(age_group(18), "18-59");
    assert_eq!(age_group(59), "18-59");
    assert_eq!(age_group(60), "60+");
  }

  #[test]
  fn tally_keeps_empty_groups() {
    let today = d(2024, 1, 1);
    let t = tally_ages(&[d(2020, 1, 1), d(1950, 1, 1), d(1951, 1, 1)], today);
    assert_eq!(t.len(), 4);
    assert_eq!(t[0], Tally::new("0-12", 1));
    assert_eq!(t[1].count, 0);
    assert_eq!(t[3].count, 2);
  }
}
