//! Encoding and decoding helpers between domain types and the plain
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings with a fixed nanosecond width, so they
//! round-trip exactly and lexical order in SQL matches chronological order.
//! Calendar dates are `YYYY-MM-DD`. Enumerations are stored as their display labels. Nested
//! structures (status history, officials, tags, details) are compact JSON.
//!
//! Each table has a column list, a `*_values` encoder producing parameters
//! in that order, and a `Raw*` row type decoded outside the connection
//! thread.

use std::{fmt::Display, net::IpAddr, str::FromStr};

use bims_core::{
  announcement::Announcement,
  audit::AuditEntry,
  blotter::{Approval, Blotter, Party},
  document::DocumentRequest,
  household::{Household, HouseholdSummary},
  profile::BarangayProfile,
  resident::Resident,
  user::{Session, User},
};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{Row, types::Value};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

fn decode_opt_uuid(s: Option<String>) -> Result<Option<Uuid>> {
  s.as_deref().map(decode_uuid).transpose()
}

fn decode_opt_ip(s: Option<String>) -> Result<Option<IpAddr>> {
  s.map(|s| s.parse().map_err(|e| Error::Decode(format!("ip address {s:?}: {e}"))))
    .transpose()
}

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Nanos, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp {s:?}: {e}")))
}

fn decode_opt_dt(s: Option<String>) -> Result<Option<DateTime<Utc>>> {
  s.as_deref().map(decode_dt).transpose()
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::Decode(format!("date {s:?}: {e}")))
}

/// Parse an enumeration from its stored label.
pub fn decode_label<T>(s: &str) -> Result<T>
where
  T: FromStr,
  T::Err: Display,
{
  s.parse().map_err(|e| Error::Decode(format!("label {s:?}: {e}")))
}

pub fn label<T: AsRef<str>>(v: T) -> String { v.as_ref().to_owned() }

fn opt_uuid(id: Option<Uuid>) -> Value { Value::from(id.map(encode_uuid)) }

fn opt_dt(dt: Option<DateTime<Utc>>) -> Value { Value::from(dt.map(encode_dt)) }

// ─── Residents ───────────────────────────────────────────────────────────────

pub const RESIDENT_COLUMNS: &[&str] = &[
  "resident_id",
  "first_name",
  "middle_name",
  "last_name",
  "suffix",
  "birthdate",
  "gender",
  "civil_status",
  "purok",
  "house_number",
  "household_id",
  "relationship_to_head",
  "monthly_income",
  "employment_status",
  "is_4ps_beneficiary",
  "is_pwd",
  "is_senior_citizen",
  "is_solo_parent",
  "is_voter",
  "status",
  "details",
  "registered_by",
  "created_at",
  "updated_at",
];

pub fn resident_values(r: &Resident) -> Result<Vec<Value>> {
  Ok(vec![
    Value::from(encode_uuid(r.resident_id)),
    Value::from(r.first_name.clone()),
    Value::from(r.middle_name.clone()),
    Value::from(r.last_name.clone()),
    Value::from(r.suffix.clone()),
    Value::from(encode_date(r.birthdate)),
    Value::from(label(r.gender)),
    Value::from(label(r.civil_status)),
    Value::from(r.purok.clone()),
    Value::from(r.house_number.clone()),
    opt_uuid(r.household_id),
    Value::from(r.relationship_to_head.map(label)),
    Value::from(r.monthly_income),
    Value::from(label(r.employment_status)),
    Value::from(r.is_4ps_beneficiary),
    Value::from(r.is_pwd),
    Value::from(r.is_senior_citizen),
    Value::from(r.is_solo_parent),
    Value::from(r.is_voter),
    Value::from(label(r.status)),
    Value::from(serde_json::to_string(&r.details)?),
    opt_uuid(r.registered_by),
    Value::from(encode_dt(r.created_at)),
    Value::from(encode_dt(r.updated_at)),
  ])
}

pub struct RawResident {
  pub resident_id:          String,
  pub first_name:           String,
  pub middle_name:          Option<String>,
  pub last_name:            String,
  pub suffix:               Option<String>,
  pub birthdate:            String,
  pub gender:               String,
  pub civil_status:         String,
  pub purok:                String,
  pub house_number:         Option<String>,
  pub household_id:         Option<String>,
  pub relationship_to_head: Option<String>,
  pub monthly_income:       Option<f64>,
  pub employment_status:    String,
  pub is_4ps_beneficiary:   bool,
  pub is_pwd:               bool,
  pub is_senior_citizen:    bool,
  pub is_solo_parent:       bool,
  pub is_voter:             bool,
  pub status:               String,
  pub details:              String,
  pub registered_by:        Option<String>,
  pub created_at:           String,
  pub updated_at:           String,
}

impl RawResident {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      resident_id:          row.get(0)?,
      first_name:           row.get(1)?,
      middle_name:          row.get(2)?,
      last_name:            row.get(3)?,
      suffix:               row.get(4)?,
      birthdate:            row.get(5)?,
      gender:               row.get(6)?,
      civil_status:         row.get(7)?,
      purok:                row.get(8)?,
      house_number:         row.get(9)?,
      household_id:         row.get(10)?,
      relationship_to_head: row.get(11)?,
      monthly_income:       row.get(12)?,
      employment_status:    row.get(13)?,
      is_4ps_beneficiary:   row.get(14)?,
      is_pwd:               row.get(15)?,
      is_senior_citizen:    row.get(16)?,
      is_solo_parent:       row.get(17)?,
      is_voter:             row.get(18)?,
      status:               row.get(19)?,
      details:              row.get(20)?,
      registered_by:        row.get(21)?,
      created_at:           row.get(22)?,
      updated_at:           row.get(23)?,
    })
  }

  pub fn into_resident(self) -> Result<Resident> {
    Ok(Resident {
      resident_id:          decode_uuid(&self.resident_id)?,
      first_name:           self.first_name,
      middle_name:          self.middle_name,
      last_name:            self.last_name,
      suffix:               self.suffix,
      birthdate:            decode_date(&self.birthdate)?,
      gender:               decode_label(&self.gender)?,
      civil_status:         decode_label(&self.civil_status)?,
      purok:                self.purok,
      house_number:         self.house_number,
      household_id:         decode_opt_uuid(self.household_id)?,
      relationship_to_head: self
        .relationship_to_head
        .as_deref()
        .map(decode_label)
        .transpose()?,
      monthly_income:       self.monthly_income,
      employment_status:    decode_label(&self.employment_status)?,
      is_4ps_beneficiary:   self.is_4ps_beneficiary,
      is_pwd:               self.is_pwd,
      is_senior_citizen:    self.is_senior_citizen,
      is_solo_parent:       self.is_solo_parent,
      is_voter:             self.is_voter,
      status:               decode_label(&self.status)?,
      details:              serde_json::from_str(&self.details)?,
      registered_by:        decode_opt_uuid(self.registered_by)?,
      created_at:           decode_dt(&self.created_at)?,
      updated_at:           decode_dt(&self.updated_at)?,
    })
  }
}

// ─── Households ──────────────────────────────────────────────────────────────

pub const HOUSEHOLD_COLUMNS: &[&str] = &[
  "household_id",
  "household_code",
  "purok",
  "address",
  "tags",
  "head_id",
  "total_members",
  "monthly_income",
  "has_4ps_beneficiary",
  "has_pwd",
  "has_senior_citizen",
  "has_solo_parent",
  "summarized_at",
  "created_at",
  "updated_at",
];

pub fn household_values(h: &Household) -> Result<Vec<Value>> {
  let s = &h.summary;
  Ok(vec![
    Value::from(encode_uuid(h.household_id)),
    Value::from(h.household_code.clone()),
    Value::from(h.purok.clone()),
    Value::from(h.address.clone()),
    Value::from(serde_json::to_string(&h.tags)?),
    opt_uuid(s.head_id),
    Value::from(i64::from(s.total_members)),
    Value::from(s.monthly_income),
    Value::from(s.has_4ps_beneficiary),
    Value::from(s.has_pwd),
    Value::from(s.has_senior_citizen),
    Value::from(s.has_solo_parent),
    opt_dt(s.summarized_at),
    Value::from(encode_dt(h.created_at)),
    Value::from(encode_dt(h.updated_at)),
  ])
}

pub struct RawHousehold {
  pub household_id:        String,
  pub household_code:      String,
  pub purok:               String,
  pub address:             Option<String>,
  pub tags:                String,
  pub head_id:             Option<String>,
  pub total_members:       i64,
  pub monthly_income:      f64,
  pub has_4ps_beneficiary: bool,
  pub has_pwd:             bool,
  pub has_senior_citizen:  bool,
  pub has_solo_parent:     bool,
  pub summarized_at:       Option<String>,
  pub created_at:          String,
  pub updated_at:          String,
}

impl RawHousehold {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      household_id:        row.get(0)?,
      household_code:      row.get(1)?,
      purok:               row.get(2)?,
      address:             row.get(3)?,
      tags:                row.get(4)?,
      head_id:             row.get(5)?,
      total_members:       row.get(6)?,
      monthly_income:      row.get(7)?,
      has_4ps_beneficiary: row.get(8)?,
      has_pwd:             row.get(9)?,
      has_senior_citizen:  row.get(10)?,
      has_solo_parent:     row.get(11)?,
      summarized_at:       row.get(12)?,
      created_at:          row.get(13)?,
      updated_at:          row.get(14)?,
    })
  }

  pub fn into_household(self) -> Result<Household> {
    Ok(Household {
      household_id:   decode_uuid(&self.household_id)?,
      household_code: self.household_code,
      purok:          self.purok,
      address:        self.address,
      tags:           serde_json::from_str(&self.tags)?,
      summary:        HouseholdSummary {
        head_id:             decode_opt_uuid(self.head_id)?,
        total_members:       u32::try_from(self.total_members)
          .map_err(|e| Error::Decode(format!("total_members: {e}")))?,
        monthly_income:      self.monthly_income,
        has_4ps_beneficiary: self.has_4ps_beneficiary,
        has_pwd:             self.has_pwd,
        has_senior_citizen:  self.has_senior_citizen,
        has_solo_parent:     self.has_solo_parent,
        summarized_at:       decode_opt_dt(self.summarized_at)?,
      },
      created_at:     decode_dt(&self.created_at)?,
      updated_at:     decode_dt(&self.updated_at)?,
    })
  }
}

// ─── Blotters ────────────────────────────────────────────────────────────────

pub const BLOTTER_COLUMNS: &[&str] = &[
  "blotter_id",
  "complainant_id",
  "complainant_name",
  "respondent_id",
  "respondent_name",
  "incident_date",
  "incident_time",
  "location",
  "nature_of_complaint",
  "description",
  "action_taken",
  "remarks",
  "attachments",
  "status",
  "status_history",
  "approval_status",
  "decided_by",
  "decided_at",
  "approval_remarks",
  "case_handler",
  "is_public",
  "created_by",
  "updated_by",
  "created_at",
  "updated_at",
];

pub fn blotter_values(b: &Blotter) -> Result<Vec<Value>> {
  Ok(vec![
    Value::from(encode_uuid(b.blotter_id)),
    opt_uuid(b.complainant.resident_id),
    Value::from(b.complainant.name.clone()),
    opt_uuid(b.respondent.resident_id),
    Value::from(b.respondent.name.clone()),
    Value::from(encode_date(b.incident_date)),
    Value::from(b.incident_time.clone()),
    Value::from(b.location.clone()),
    Value::from(b.nature_of_complaint.clone()),
    Value::from(b.description.clone()),
    Value::from(b.action_taken.clone()),
    Value::from(b.remarks.clone()),
    Value::from(serde_json::to_string(&b.attachments)?),
    Value::from(label(b.status)),
    Value::from(serde_json::to_string(&b.status_history)?),
    Value::from(label(b.approval.status)),
    opt_uuid(b.approval.decided_by),
    opt_dt(b.approval.decided_at),
    Value::from(b.approval.remarks.clone()),
    opt_uuid(b.case_handler),
    Value::from(b.is_public),
    opt_uuid(b.created_by),
    opt_uuid(b.updated_by),
    Value::from(encode_dt(b.created_at)),
    Value::from(encode_dt(b.updated_at)),
  ])
}

pub struct RawBlotter {
  pub blotter_id:          String,
  pub complainant_id:      Option<String>,
  pub complainant_name:    Option<String>,
  pub respondent_id:       Option<String>,
  pub respondent_name:     Option<String>,
  pub incident_date:       String,
  pub incident_time:       Option<String>,
  pub location:            Option<String>,
  pub nature_of_complaint: String,
  pub description:         Option<String>,
  pub action_taken:        Option<String>,
  pub remarks:             Option<String>,
  pub attachments:         String,
  pub status:              String,
  pub status_history:      String,
  pub approval_status:     String,
  pub decided_by:          Option<String>,
  pub decided_at:          Option<String>,
  pub approval_remarks:    Option<String>,
  pub case_handler:        Option<String>,
  pub is_public:           bool,
  pub created_by:          Option<String>,
  pub updated_by:          Option<String>,
  pub created_at:          String,
  pub updated_at:          String,
}

impl RawBlotter {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      blotter_id:          row.get(0)?,
      complainant_id:      row.get(1)?,
      complainant_name:    row.get(2)?,
      respondent_id:       row.get(3)?,
      respondent_name:     row.get(4)?,
      incident_date:       row.get(5)?,
      incident_time:       row.get(6)?,
      location:            row.get(7)?,
      nature_of_complaint: row.get(8)?,
      description:         row.get(9)?,
      action_taken:        row.get(10)?,
      remarks:             row.get(11)?,
      attachments:         row.get(12)?,
      status:              row.get(13)?,
      status_history:      row.get(14)?,
      approval_status:     row.get(15)?,
      decided_by:          row.get(16)?,
      decided_at:          row.get(17)?,
      approval_remarks:    row.get(18)?,
      case_handler:        row.get(19)?,
      is_public:           row.get(20)?,
      created_by:          row.get(21)?,
      updated_by:          row.get(22)?,
      created_at:          row.get(23)?,
      updated_at:          row.get(24)?,
    })
  }

  pub fn into_blotter(self) -> Result<Blotter> {
    Ok(Blotter {
      blotter_id:          decode_uuid(&self.blotter_id)?,
      complainant:         Party {
        resident_id: decode_opt_uuid(self.complainant_id)?,
        name:        self.complainant_name,
      },
      respondent:          Party {
        resident_id: decode_opt_uuid(self.respondent_id)?,
        name:        self.respondent_name,
      },
      incident_date:       decode_date(&self.incident_date)?,
      incident_time:       self.incident_time,
      location:            self.location,
      nature_of_complaint: self.nature_of_complaint,
      description:         self.description,
      action_taken:        self.action_taken,
      remarks:             self.remarks,
      attachments:         serde_json::from_str(&self.attachments)?,
      status:              decode_label(&self.status)?,
      status_history:      serde_json::from_str(&self.status_history)?,
      approval:            Approval {
        status:     decode_label(&self.approval_status)?,
        decided_by: decode_opt_uuid(self.decided_by)?,
        decided_at: decode_opt_dt(self.decided_at)?,
        remarks:    self.approval_remarks,
      },
      case_handler:        decode_opt_uuid(self.case_handler)?,
      is_public:           self.is_public,
      created_by:          decode_opt_uuid(self.created_by)?,
      updated_by:          decode_opt_uuid(self.updated_by)?,
      created_at:          decode_dt(&self.created_at)?,
      updated_at:          decode_dt(&self.updated_at)?,
    })
  }
}

// ─── Document requests ───────────────────────────────────────────────────────

pub const DOCUMENT_COLUMNS: &[&str] = &[
  "request_id",
  "resident_id",
  "doc_type",
  "purpose",
  "status",
  "remarks",
  "issued_by",
  "issued_at",
  "qr_code",
  "claimed_at",
  "requested_by",
  "created_at",
  "updated_at",
];

pub fn document_values(d: &DocumentRequest) -> Vec<Value> {
  vec![
    Value::from(encode_uuid(d.request_id)),
    Value::from(encode_uuid(d.resident_id)),
    Value::from(label(d.doc_type)),
    Value::from(d.purpose.clone()),
    Value::from(label(d.status)),
    Value::from(d.remarks.clone()),
    opt_uuid(d.issued_by),
    opt_dt(d.issued_at),
    Value::from(d.qr_code.clone()),
    opt_dt(d.claimed_at),
    opt_uuid(d.requested_by),
    Value::from(encode_dt(d.created_at)),
    Value::from(encode_dt(d.updated_at)),
  ]
}

pub struct RawDocument {
  pub request_id:   String,
  pub resident_id:  String,
  pub doc_type:     String,
  pub purpose:      Option<String>,
  pub status:       String,
  pub remarks:      Option<String>,
  pub issued_by:    Option<String>,
  pub issued_at:    Option<String>,
  pub qr_code:      Option<String>,
  pub claimed_at:   Option<String>,
  pub requested_by: Option<String>,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawDocument {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      request_id:   row.get(0)?,
      resident_id:  row.get(1)?,
      doc_type:     row.get(2)?,
      purpose:      row.get(3)?,
      status:       row.get(4)?,
      remarks:      row.get(5)?,
      issued_by:    row.get(6)?,
      issued_at:    row.get(7)?,
      qr_code:      row.get(8)?,
      claimed_at:   row.get(9)?,
      requested_by: row.get(10)?,
      created_at:   row.get(11)?,
      updated_at:   row.get(12)?,
    })
  }

  pub fn into_document(self) -> Result<DocumentRequest> {
    Ok(DocumentRequest {
      request_id:   decode_uuid(&self.request_id)?,
      resident_id:  decode_uuid(&self.resident_id)?,
      doc_type:     decode_label(&self.doc_type)?,
      purpose:      self.purpose,
      status:       decode_label(&self.status)?,
      remarks:      self.remarks,
      issued_by:    decode_opt_uuid(self.issued_by)?,
      issued_at:    decode_opt_dt(self.issued_at)?,
      qr_code:      self.qr_code,
      claimed_at:   decode_opt_dt(self.claimed_at)?,
      requested_by: decode_opt_uuid(self.requested_by)?,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}

// ─── Users and sessions ──────────────────────────────────────────────────────

pub const USER_COLUMNS: &[&str] = &[
  "user_id",
  "name",
  "username",
  "email",
  "password_hash",
  "role",
  "is_approved",
  "created_at",
  "updated_at",
];

pub fn user_values(u: &User) -> Vec<Value> {
  vec![
    Value::from(encode_uuid(u.user_id)),
    Value::from(u.name.clone()),
    Value::from(u.username.clone()),
    Value::from(u.email.clone()),
    Value::from(u.password_hash.clone()),
    Value::from(label(u.role)),
    Value::from(u.is_approved),
    Value::from(encode_dt(u.created_at)),
    Value::from(encode_dt(u.updated_at)),
  ]
}

pub struct RawUser {
  pub user_id:       String,
  pub name:          String,
  pub username:      String,
  pub email:         String,
  pub password_hash: String,
  pub role:          String,
  pub is_approved:   bool,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawUser {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:       row.get(0)?,
      name:          row.get(1)?,
      username:      row.get(2)?,
      email:         row.get(3)?,
      password_hash: row.get(4)?,
      role:          row.get(5)?,
      is_approved:   row.get(6)?,
      created_at:    row.get(7)?,
      updated_at:    row.get(8)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:       decode_uuid(&self.user_id)?,
      name:          self.name,
      username:      self.username,
      email:         self.email,
      password_hash: self.password_hash,
      role:          decode_label(&self.role)?,
      is_approved:   self.is_approved,
      created_at:    decode_dt(&self.created_at)?,
      updated_at:    decode_dt(&self.updated_at)?,
    })
  }
}

pub struct RawSession {
  pub token_hash: String,
  pub user_id:    String,
  pub created_at: String,
  pub expires_at: String,
}

impl RawSession {
  pub fn into_session(self) -> Result<Session> {
    Ok(Session {
      token_hash: self.token_hash,
      user_id:    decode_uuid(&self.user_id)?,
      created_at: decode_dt(&self.created_at)?,
      expires_at: decode_dt(&self.expires_at)?,
    })
  }
}

// ─── Audit log ───────────────────────────────────────────────────────────────

pub const AUDIT_COLUMNS: &[&str] = &[
  "audit_id",
  "actor_id",
  "ip",
  "action",
  "entity",
  "entity_id",
  "details",
  "recorded_at",
];

pub fn audit_values(a: &AuditEntry) -> Result<Vec<Value>> {
  Ok(vec![
    Value::from(encode_uuid(a.audit_id)),
    opt_uuid(a.actor_id),
    Value::from(a.ip.map(|ip| ip.to_string())),
    Value::from(label(a.action)),
    Value::from(label(a.entity)),
    opt_uuid(a.entity_id),
    Value::from(serde_json::to_string(&a.details)?),
    Value::from(encode_dt(a.recorded_at)),
  ])
}

pub struct RawAudit {
  pub audit_id:    String,
  pub actor_id:    Option<String>,
  pub ip:          Option<String>,
  pub action:      String,
  pub entity:      String,
  pub entity_id:   Option<String>,
  pub details:     String,
  pub recorded_at: String,
}

impl RawAudit {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      audit_id:    row.get(0)?,
      actor_id:    row.get(1)?,
      ip:          row.get(2)?,
      action:      row.get(3)?,
      entity:      row.get(4)?,
      entity_id:   row.get(5)?,
      details:     row.get(6)?,
      recorded_at: row.get(7)?,
    })
  }

  pub fn into_entry(self) -> Result<AuditEntry> {
    Ok(AuditEntry {
      audit_id:    decode_uuid(&self.audit_id)?,
      actor_id:    decode_opt_uuid(self.actor_id)?,
      ip:          decode_opt_ip(self.ip)?,
      action:      decode_label(&self.action)?,
      entity:      decode_label(&self.entity)?,
      entity_id:   decode_opt_uuid(self.entity_id)?,
      details:     serde_json::from_str(&self.details)?,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}

// ─── Announcements ───────────────────────────────────────────────────────────

pub const ANNOUNCEMENT_COLUMNS: &[&str] = &[
  "announcement_id",
  "title",
  "content",
  "image",
  "posted_by",
  "published",
  "visible_to",
  "created_at",
  "updated_at",
];

pub fn announcement_values(a: &Announcement) -> Vec<Value> {
  vec![
    Value::from(encode_uuid(a.announcement_id)),
    Value::from(a.title.clone()),
    Value::from(a.content.clone()),
    Value::from(a.image.clone()),
    opt_uuid(a.posted_by),
    Value::from(a.published),
    Value::from(label(a.visible_to)),
    Value::from(encode_dt(a.created_at)),
    Value::from(encode_dt(a.updated_at)),
  ]
}

pub struct RawAnnouncement {
  pub announcement_id: String,
  pub title:           String,
  pub content:         String,
  pub image:           Option<String>,
  pub posted_by:       Option<String>,
  pub published:       bool,
  pub visible_to:      String,
  pub created_at:      String,
  pub updated_at:      String,
}

impl RawAnnouncement {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      announcement_id: row.get(0)?,
      title:           row.get(1)?,
      content:         row.get(2)?,
      image:           row.get(3)?,
      posted_by:       row.get(4)?,
      published:       row.get(5)?,
      visible_to:      row.get(6)?,
      created_at:      row.get(7)?,
      updated_at:      row.get(8)?,
    })
  }

  pub fn into_announcement(self) -> Result<Announcement> {
    Ok(Announcement {
      announcement_id: decode_uuid(&self.announcement_id)?,
      title:           self.title,
      content:         self.content,
      image:           self.image,
      posted_by:       decode_opt_uuid(self.posted_by)?,
      published:       self.published,
      visible_to:      decode_label(&self.visible_to)?,
      created_at:      decode_dt(&self.created_at)?,
      updated_at:      decode_dt(&self.updated_at)?,
    })
  }
}

// ─── Barangay profile ────────────────────────────────────────────────────────

pub struct RawProfile {
  pub barangay_name:  String,
  pub logo:           Option<String>,
  pub vision:         Option<String>,
  pub mission:        Option<String>,
  pub address:        Option<String>,
  pub contact_number: Option<String>,
  pub email:          Option<String>,
  pub officials:      String,
  pub settings:       String,
  pub updated_at:     String,
}

impl RawProfile {
  pub fn into_profile(self) -> Result<BarangayProfile> {
    Ok(BarangayProfile {
      barangay_name:  self.barangay_name,
      logo:           self.logo,
      vision:         self.vision,
      mission:        self.mission,
      address:        self.address,
      contact_number: self.contact_number,
      email:          self.email,
      officials:      serde_json::from_str(&self.officials)?,
      settings:       serde_json::from_str(&self.settings)?,
      updated_at:     decode_dt(&self.updated_at)?,
    })
  }
}
