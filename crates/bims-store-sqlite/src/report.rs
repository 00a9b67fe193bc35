//! Grouped counts behind the report endpoints. Each function runs on the
//! connection thread and issues only `SELECT`s.

use bims_core::report::{
  BlotterReport, DemographicsReport, DocumentReport, PopulationReport, Tally, VoterReport,
  tally_ages,
};
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::{Result, encode::decode_date};

const ACTIVE: &str = "status = 'Active'";

fn count(conn: &Connection, sql: &str) -> rusqlite::Result<u64> {
  let n: i64 = conn.query_row(sql, [], |r| r.get(0))?;
  Ok(n.max(0) as u64)
}

/// `sql` must select `(label, count)` pairs.
fn tally(conn: &Connection, sql: &str) -> rusqlite::Result<Vec<Tally>> {
  let mut stmt = conn.prepare(sql)?;
  let rows = stmt
    .query_map([], |r| {
      let label: Option<String> = r.get(0)?;
      let n: i64 = r.get(1)?;
      Ok(Tally::new(label.unwrap_or_else(|| "Unspecified".to_owned()), n.max(0) as u64))
    })?
    .collect();
  rows
}

fn group_by(conn: &Connection, column: &str, table: &str, filter: Option<&str>) -> rusqlite::Result<Vec<Tally>> {
  let where_clause = filter.map(|f| format!("WHERE {f}")).unwrap_or_default();
  tally(
    conn,
    &format!(
      "SELECT {column}, COUNT(*) FROM {table} {where_clause} GROUP BY {column} ORDER BY {column}"
    ),
  )
}

// ─── Population ──────────────────────────────────────────────────────────────

/// Population counts with birthdates still undecoded; ages depend on the
/// reporting date.
pub struct PopulationRows {
  total:      u64,
  by_purok:   Vec<Tally>,
  by_gender:  Vec<Tally>,
  birthdates: Vec<String>,
}

impl PopulationRows {
  pub fn finish(self, today: NaiveDate) -> Result<PopulationReport> {
    let birthdates = self
      .birthdates
      .iter()
      .map(|b| decode_date(b))
      .collect::<Result<Vec<_>>>()?;
    Ok(PopulationReport {
      total:        self.total,
      by_purok:     self.by_purok,
      by_gender:    self.by_gender,
      by_age_group: tally_ages(&birthdates, today),
    })
  }
}

pub fn population(conn: &Connection) -> rusqlite::Result<PopulationRows> {
  let mut stmt = conn.prepare(&format!("SELECT birthdate FROM residents WHERE {ACTIVE}"))?;
  let birthdates = stmt
    .query_map([], |r| r.get(0))?
    .collect::<rusqlite::Result<Vec<String>>>()?;

  Ok(PopulationRows {
    total: count(conn, &format!("SELECT COUNT(*) FROM residents WHERE {ACTIVE}"))?,
    by_purok: group_by(conn, "purok", "residents", Some(ACTIVE))?,
    by_gender: group_by(conn, "gender", "residents", Some(ACTIVE))?,
    birthdates,
  })
}

// ─── Residents ───────────────────────────────────────────────────────────────

pub fn demographics(conn: &Connection) -> rusqlite::Result<DemographicsReport> {
  let flagged =
    |flag: &str| count(conn, &format!("SELECT COUNT(*) FROM residents WHERE {ACTIVE} AND {flag} = 1"));

  Ok(DemographicsReport {
    by_civil_status:       group_by(conn, "civil_status", "residents", Some(ACTIVE))?,
    by_employment_status:  group_by(conn, "employment_status", "residents", Some(ACTIVE))?,
    pwd:                   flagged("is_pwd")?,
    senior_citizens:       flagged("is_senior_citizen")?,
    solo_parents:          flagged("is_solo_parent")?,
    four_ps_beneficiaries: flagged("is_4ps_beneficiary")?,
  })
}

pub fn voters(conn: &Connection) -> rusqlite::Result<VoterReport> {
  Ok(VoterReport {
    voters:     count(conn, &format!("SELECT COUNT(*) FROM residents WHERE {ACTIVE} AND is_voter = 1"))?,
    non_voters: count(conn, &format!("SELECT COUNT(*) FROM residents WHERE {ACTIVE} AND is_voter = 0"))?,
    by_purok:   group_by(conn, "purok", "residents", Some(&format!("{ACTIVE} AND is_voter = 1")))?,
  })
}

// ─── Documents and blotters ──────────────────────────────────────────────────

pub fn documents(conn: &Connection) -> rusqlite::Result<DocumentReport> {
  Ok(DocumentReport {
    total:     count(conn, "SELECT COUNT(*) FROM document_requests")?,
    by_type:   group_by(conn, "doc_type", "document_requests", None)?,
    by_status: group_by(conn, "status", "document_requests", None)?,
  })
}

pub fn blotters(conn: &Connection) -> rusqlite::Result<BlotterReport> {
  Ok(BlotterReport {
    total:       count(conn, "SELECT COUNT(*) FROM blotters")?,
    by_status:   group_by(conn, "status", "blotters", None)?,
    by_month:    tally(
      conn,
      "SELECT substr(incident_date, 1, 7) AS month, COUNT(*) FROM blotters
       GROUP BY month ORDER BY month",
    )?,
    by_approval: group_by(conn, "approval_status", "blotters", None)?,
  })
}
