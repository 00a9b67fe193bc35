//! [`SqliteStore`], the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::{OptionalExtension as _, Row, params_from_iter, types::Value};
use uuid::Uuid;

use bims_core::{
  announcement::Announcement,
  audit::AuditEntry,
  blotter::Blotter,
  document::DocumentRequest,
  household::{Household, HouseholdSummary},
  profile::BarangayProfile,
  report::{BlotterReport, DemographicsReport, DocumentReport, PopulationReport, VoterReport},
  resident::{Relationship, Resident},
  store::{
    AnnouncementQuery, AuditQuery, BlotterQuery, DocumentQuery, HouseholdQuery, Page, Paging,
    RecordStore, ResidentQuery,
  },
  user::{Session, User},
};

use crate::{
  Error, Result,
  encode::{
    ANNOUNCEMENT_COLUMNS, AUDIT_COLUMNS, BLOTTER_COLUMNS, DOCUMENT_COLUMNS, HOUSEHOLD_COLUMNS,
    RESIDENT_COLUMNS, RawAnnouncement, RawAudit, RawBlotter, RawDocument, RawHousehold,
    RawProfile, RawResident, RawSession, RawUser, USER_COLUMNS, announcement_values,
    audit_values, blotter_values, document_values, encode_date, encode_dt, encode_uuid,
    household_values, label, resident_values, user_values,
  },
  query::{Filter, insert_sql, update_params, update_sql},
  report,
  schema::SCHEMA,
};

type RowMapper<R> = fn(&Row<'_>) -> rusqlite::Result<R>;

/// Columns of `households` a regular update may overwrite.
const HOUSEHOLD_EDITABLE: &[&str] =
  &["household_id", "household_code", "purok", "address", "tags", "updated_at"];

// ─── Store ───────────────────────────────────────────────────────────────────

/// A barangay records store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, e.g. for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Generic helpers ───────────────────────────────────────────────────────

  async fn execute(&self, sql: String, params: Vec<Value>) -> Result<usize> {
    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, params_from_iter(params))?))
      .await?;
    Ok(changed)
  }

  async fn insert_row(&self, table: &'static str, columns: &'static [&'static str], values: Vec<Value>) -> Result<()> {
    self.execute(insert_sql(table, columns), values).await?;
    Ok(())
  }

  /// Overwrite a row keyed by its first column; a missing row is an error.
  async fn update_row(
    &self,
    table: &'static str,
    columns: &'static [&'static str],
    values: Vec<Value>,
    what: &'static str,
  ) -> Result<()> {
    let changed = self
      .execute(update_sql(table, columns), update_params(values))
      .await?;
    if changed == 0 {
      return Err(Error::NotFound(what));
    }
    Ok(())
  }

  async fn delete_by_id(&self, table: &'static str, key: &'static str, id: Uuid) -> Result<bool> {
    let changed = self
      .execute(
        format!("DELETE FROM {table} WHERE {key} = ?"),
        vec![Value::from(encode_uuid(id))],
      )
      .await?;
    Ok(changed > 0)
  }

  async fn select_one<R: Send + 'static>(
    &self,
    table: &'static str,
    columns: &'static [&'static str],
    id: Uuid,
    map: RowMapper<R>,
  ) -> Result<Option<R>> {
    let sql = format!(
      "SELECT {} FROM {table} WHERE {} = ?1",
      columns.join(", "),
      columns[0]
    );
    let id_str = encode_uuid(id);
    let row = self
      .conn
      .call(move |conn| Ok(conn.query_row(&sql, [id_str], map).optional()?))
      .await?;
    Ok(row)
  }

  async fn select_all<R: Send + 'static>(
    &self,
    sql: String,
    params: Vec<Value>,
    map: RowMapper<R>,
  ) -> Result<Vec<R>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), map)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// One page of `table` matching `filter`, plus the unpaged match count.
  async fn select_page<R: Send + 'static>(
    &self,
    table: &'static str,
    columns: &'static [&'static str],
    filter: Filter,
    order_by: &'static str,
    paging: Paging,
    map: RowMapper<R>,
  ) -> Result<(Vec<R>, u64)> {
    let where_clause = filter.where_clause();
    let count_sql = format!("SELECT COUNT(*) FROM {table} {where_clause}");
    let page_sql = format!(
      "SELECT {} FROM {table} {where_clause} ORDER BY {order_by} LIMIT ? OFFSET ?",
      columns.join(", ")
    );

    let (rows, total) = self
      .conn
      .call(move |conn| {
        let total: i64 =
          conn.query_row(&count_sql, params_from_iter(filter.params()), |r| r.get(0))?;
        let mut stmt = conn.prepare(&page_sql)?;
        let rows = stmt
          .query_map(
            params_from_iter(filter.paged_params(paging.limit, paging.offset())),
            map,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok((rows, total))
      })
      .await?;

    Ok((rows, total.max(0) as u64))
  }
}

fn decode_page<R, T>(
  paging: Paging,
  (rows, total): (Vec<R>, u64),
  decode: impl Fn(R) -> Result<T>,
) -> Result<Page<T>> {
  let items = rows.into_iter().map(decode).collect::<Result<Vec<_>>>()?;
  Ok(paging.wrap(items, total))
}

fn uuid_value(id: Option<Uuid>) -> Option<String> { id.map(encode_uuid) }

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  // ── Residents ─────────────────────────────────────────────────────────────

  async fn insert_resident(&self, resident: Resident) -> Result<Resident> {
    self
      .insert_row("residents", RESIDENT_COLUMNS, resident_values(&resident)?)
      .await?;
    Ok(resident)
  }

  async fn get_resident(&self, id: Uuid) -> Result<Option<Resident>> {
    self
      .select_one("residents", RESIDENT_COLUMNS, id, RawResident::from_row)
      .await?
      .map(RawResident::into_resident)
      .transpose()
  }

  async fn update_resident(&self, resident: Resident) -> Result<Resident> {
    self
      .update_row("residents", RESIDENT_COLUMNS, resident_values(&resident)?, "Resident")
      .await?;
    Ok(resident)
  }

  async fn delete_resident(&self, id: Uuid) -> Result<bool> {
    self.delete_by_id("residents", "resident_id", id).await
  }

  async fn list_residents(&self, query: ResidentQuery) -> Result<Page<Resident>> {
    let paging = Paging::new(query.page, query.limit);
    let mut filter = Filter::new();
    filter
      .contains_any(&["first_name", "middle_name", "last_name"], query.search.as_deref())
      .eq("purok", query.purok)
      .eq("gender", query.gender.map(label))
      .eq("status", query.status.map(label))
      .eq("household_id", uuid_value(query.household_id))
      .eq("is_voter", query.is_voter)
      .eq("is_pwd", query.is_pwd)
      .eq("is_senior_citizen", query.is_senior_citizen);

    let rows = self
      .select_page(
        "residents",
        RESIDENT_COLUMNS,
        filter,
        "created_at DESC, resident_id",
        paging,
        RawResident::from_row,
      )
      .await?;
    decode_page(paging, rows, RawResident::into_resident)
  }

  async fn household_members(&self, household_id: Uuid) -> Result<Vec<Resident>> {
    let sql = format!(
      "SELECT {} FROM residents WHERE household_id = ?1 ORDER BY created_at, resident_id",
      RESIDENT_COLUMNS.join(", ")
    );
    self
      .select_all(sql, vec![Value::from(encode_uuid(household_id))], RawResident::from_row)
      .await?
      .into_iter()
      .map(RawResident::into_resident)
      .collect()
  }

  async fn demote_heads(&self, household_id: Uuid, keep: Option<Uuid>) -> Result<usize> {
    let mut sql = String::from(
      "UPDATE residents SET relationship_to_head = ?, updated_at = ?
       WHERE household_id = ? AND relationship_to_head = ?",
    );
    let mut params = vec![
      Value::from(label(Relationship::Relative)),
      Value::from(encode_dt(Utc::now())),
      Value::from(encode_uuid(household_id)),
      Value::from(label(Relationship::Head)),
    ];
    if let Some(keep) = keep {
      sql.push_str(" AND resident_id != ?");
      params.push(Value::from(encode_uuid(keep)));
    }
    self.execute(sql, params).await
  }

  // ── Households ────────────────────────────────────────────────────────────

  async fn insert_household(&self, household: Household) -> Result<Household> {
    self
      .insert_row("households", HOUSEHOLD_COLUMNS, household_values(&household)?)
      .await?;
    Ok(household)
  }

  async fn get_household(&self, id: Uuid) -> Result<Option<Household>> {
    self
      .select_one("households", HOUSEHOLD_COLUMNS, id, RawHousehold::from_row)
      .await?
      .map(RawHousehold::into_household)
      .transpose()
  }

  async fn update_household(&self, household: Household) -> Result<Household> {
    let values = vec![
      Value::from(encode_uuid(household.household_id)),
      Value::from(household.household_code.clone()),
      Value::from(household.purok.clone()),
      Value::from(household.address.clone()),
      Value::from(serde_json::to_string(&household.tags)?),
      Value::from(encode_dt(household.updated_at)),
    ];
    self
      .update_row("households", HOUSEHOLD_EDITABLE, values, "Household")
      .await?;
    Ok(household)
  }

  async fn delete_household(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let now = encode_dt(Utc::now());
    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "UPDATE residents SET household_id = NULL, relationship_to_head = NULL, updated_at = ?1
           WHERE household_id = ?2",
          rusqlite::params![now, id_str],
        )?;
        let n = tx.execute(
          "DELETE FROM households WHERE household_id = ?1",
          rusqlite::params![id_str],
        )?;
        tx.commit()?;
        Ok(n > 0)
      })
      .await?;
    Ok(deleted)
  }

  async fn list_households(&self, query: HouseholdQuery) -> Result<Page<Household>> {
    let paging = Paging::new(query.page, query.limit);
    let mut filter = Filter::new();
    filter
      .contains_any(&["household_code", "address"], query.search.as_deref())
      .eq("purok", query.purok);

    let rows = self
      .select_page(
        "households",
        HOUSEHOLD_COLUMNS,
        filter,
        "household_code",
        paging,
        RawHousehold::from_row,
      )
      .await?;
    decode_page(paging, rows, RawHousehold::into_household)
  }

  async fn write_summary(&self, household_id: Uuid, summary: HouseholdSummary) -> Result<bool> {
    let id_str = encode_uuid(household_id);
    let head_str = summary.head_id.map(encode_uuid);
    let at_str = summary.summarized_at.map(encode_dt);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE households SET
             head_id = ?1, total_members = ?2, monthly_income = ?3,
             has_4ps_beneficiary = ?4, has_pwd = ?5, has_senior_citizen = ?6,
             has_solo_parent = ?7, summarized_at = ?8
           WHERE household_id = ?9",
          rusqlite::params![
            head_str,
            summary.total_members,
            summary.monthly_income,
            summary.has_4ps_beneficiary,
            summary.has_pwd,
            summary.has_senior_citizen,
            summary.has_solo_parent,
            at_str,
            id_str,
          ],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  // ── Blotters ──────────────────────────────────────────────────────────────

  async fn insert_blotter(&self, blotter: Blotter) -> Result<Blotter> {
    self
      .insert_row("blotters", BLOTTER_COLUMNS, blotter_values(&blotter)?)
      .await?;
    Ok(blotter)
  }

  async fn get_blotter(&self, id: Uuid) -> Result<Option<Blotter>> {
    self
      .select_one("blotters", BLOTTER_COLUMNS, id, RawBlotter::from_row)
      .await?
      .map(RawBlotter::into_blotter)
      .transpose()
  }

  async fn update_blotter(&self, blotter: Blotter) -> Result<Blotter> {
    self
      .update_row("blotters", BLOTTER_COLUMNS, blotter_values(&blotter)?, "Blotter")
      .await?;
    Ok(blotter)
  }

  async fn delete_blotter(&self, id: Uuid) -> Result<bool> {
    self.delete_by_id("blotters", "blotter_id", id).await
  }

  async fn list_blotters(&self, query: BlotterQuery) -> Result<Page<Blotter>> {
    let paging = Paging::new(query.page, query.limit);
    let mut filter = Filter::new();
    filter
      .eq("status", query.status.map(label))
      .eq("approval_status", query.approval.map(label))
      .eq("complainant_id", uuid_value(query.complainant_id))
      .eq("respondent_id", uuid_value(query.respondent_id))
      .contains_any(&["complainant_name", "respondent_name"], query.name.as_deref())
      .contains_any(&["location"], query.location.as_deref())
      .contains_any(&["nature_of_complaint", "description"], query.search.as_deref())
      .cmp("incident_date", ">=", query.from.map(encode_date))
      .cmp("incident_date", "<=", query.to.map(encode_date));

    let rows = self
      .select_page(
        "blotters",
        BLOTTER_COLUMNS,
        filter,
        "incident_date DESC, created_at DESC",
        paging,
        RawBlotter::from_row,
      )
      .await?;
    decode_page(paging, rows, RawBlotter::into_blotter)
  }

  // ── Document requests ─────────────────────────────────────────────────────

  async fn insert_document(&self, request: DocumentRequest) -> Result<DocumentRequest> {
    self
      .insert_row("document_requests", DOCUMENT_COLUMNS, document_values(&request))
      .await?;
    Ok(request)
  }

  async fn get_document(&self, id: Uuid) -> Result<Option<DocumentRequest>> {
    self
      .select_one("document_requests", DOCUMENT_COLUMNS, id, RawDocument::from_row)
      .await?
      .map(RawDocument::into_document)
      .transpose()
  }

  async fn update_document(&self, request: DocumentRequest) -> Result<DocumentRequest> {
    self
      .update_row(
        "document_requests",
        DOCUMENT_COLUMNS,
        document_values(&request),
        "Document request",
      )
      .await?;
    Ok(request)
  }

  async fn list_documents(&self, query: DocumentQuery) -> Result<Page<DocumentRequest>> {
    let paging = Paging::new(query.page, query.limit);
    let mut filter = Filter::new();
    filter
      .eq("status", query.status.map(label))
      .eq("doc_type", query.doc_type.map(label))
      .eq("resident_id", uuid_value(query.resident_id));

    let rows = self
      .select_page(
        "document_requests",
        DOCUMENT_COLUMNS,
        filter,
        "created_at DESC, request_id",
        paging,
        RawDocument::from_row,
      )
      .await?;
    decode_page(paging, rows, RawDocument::into_document)
  }

  // ── Users and sessions ────────────────────────────────────────────────────

  async fn insert_user(&self, user: User) -> Result<User> {
    self.insert_row("users", USER_COLUMNS, user_values(&user)).await?;
    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    self
      .select_one("users", USER_COLUMNS, id, RawUser::from_row)
      .await?
      .map(RawUser::into_user)
      .transpose()
  }

  async fn find_user(&self, identifier: String) -> Result<Option<User>> {
    let sql = format!(
      "SELECT {} FROM users WHERE username = lower(?1) OR email = lower(?1) LIMIT 1",
      USER_COLUMNS.join(", ")
    );
    self
      .select_all(sql, vec![Value::from(identifier)], RawUser::from_row)
      .await?
      .into_iter()
      .next()
      .map(RawUser::into_user)
      .transpose()
  }

  async fn update_user(&self, user: User) -> Result<User> {
    self
      .update_row("users", USER_COLUMNS, user_values(&user), "User")
      .await?;
    Ok(user)
  }

  async fn list_users(&self, pending_only: bool) -> Result<Vec<User>> {
    let mut filter = Filter::new();
    filter.eq("is_approved", pending_only.then_some(false));
    let sql = format!(
      "SELECT {} FROM users {} ORDER BY created_at DESC, user_id",
      USER_COLUMNS.join(", "),
      filter.where_clause()
    );
    self
      .select_all(sql, filter.params().to_vec(), RawUser::from_row)
      .await?
      .into_iter()
      .map(RawUser::into_user)
      .collect()
  }

  async fn count_users(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?))
      .await?;
    Ok(n.max(0) as u64)
  }

  async fn insert_session(&self, session: Session) -> Result<()> {
    let user_str = encode_uuid(session.user_id);
    let created_str = encode_dt(session.created_at);
    let expires_str = encode_dt(session.expires_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (token_hash, user_id, created_at, expires_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![session.token_hash, user_str, created_str, expires_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_session(&self, token_hash: String) -> Result<Option<Session>> {
    let raw: Option<RawSession> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT token_hash, user_id, created_at, expires_at
             FROM sessions WHERE token_hash = ?1",
            rusqlite::params![token_hash],
            |row| {
              Ok(RawSession {
                token_hash: row.get(0)?,
                user_id:    row.get(1)?,
                created_at: row.get(2)?,
                expires_at: row.get(3)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSession::into_session).transpose()
  }

  async fn delete_session(&self, token_hash: String) -> Result<bool> {
    let changed = self
      .execute(
        "DELETE FROM sessions WHERE token_hash = ?".to_owned(),
        vec![Value::from(token_hash)],
      )
      .await?;
    Ok(changed > 0)
  }

  async fn delete_user_sessions(&self, user_id: Uuid) -> Result<usize> {
    self
      .execute(
        "DELETE FROM sessions WHERE user_id = ?".to_owned(),
        vec![Value::from(encode_uuid(user_id))],
      )
      .await
  }

  // ── Audit trail ───────────────────────────────────────────────────────────

  async fn append_audit(&self, entry: AuditEntry) -> Result<()> {
    self
      .insert_row("audit_log", AUDIT_COLUMNS, audit_values(&entry)?)
      .await
  }

  async fn list_audit(&self, query: AuditQuery) -> Result<Page<AuditEntry>> {
    let paging = Paging::new(query.page, query.limit);
    let mut filter = Filter::new();
    filter
      .eq("actor_id", uuid_value(query.actor_id))
      .eq("entity", query.entity.map(label))
      .eq("action", query.action.map(label));

    let rows = self
      .select_page(
        "audit_log",
        AUDIT_COLUMNS,
        filter,
        "recorded_at DESC, rowid DESC",
        paging,
        RawAudit::from_row,
      )
      .await?;
    decode_page(paging, rows, RawAudit::into_entry)
  }

  // ── Announcements ─────────────────────────────────────────────────────────

  async fn insert_announcement(&self, announcement: Announcement) -> Result<Announcement> {
    self
      .insert_row("announcements", ANNOUNCEMENT_COLUMNS, announcement_values(&announcement))
      .await?;
    Ok(announcement)
  }

  async fn get_announcement(&self, id: Uuid) -> Result<Option<Announcement>> {
    self
      .select_one("announcements", ANNOUNCEMENT_COLUMNS, id, RawAnnouncement::from_row)
      .await?
      .map(RawAnnouncement::into_announcement)
      .transpose()
  }

  async fn update_announcement(&self, announcement: Announcement) -> Result<Announcement> {
    self
      .update_row(
        "announcements",
        ANNOUNCEMENT_COLUMNS,
        announcement_values(&announcement),
        "Announcement",
      )
      .await?;
    Ok(announcement)
  }

  async fn delete_announcement(&self, id: Uuid) -> Result<bool> {
    self.delete_by_id("announcements", "announcement_id", id).await
  }

  async fn list_announcements(&self, query: AnnouncementQuery) -> Result<Page<Announcement>> {
    let paging = Paging::new(query.page, query.limit);
    let mut filter = Filter::new();
    filter
      .contains_any(&["title", "content"], query.search.as_deref())
      .eq("published", query.published)
      .eq("visible_to", query.visible_to.map(label));

    let rows = self
      .select_page(
        "announcements",
        ANNOUNCEMENT_COLUMNS,
        filter,
        "created_at DESC, announcement_id",
        paging,
        RawAnnouncement::from_row,
      )
      .await?;
    decode_page(paging, rows, RawAnnouncement::into_announcement)
  }

  // ── Barangay profile ──────────────────────────────────────────────────────

  async fn get_profile(&self) -> Result<Option<BarangayProfile>> {
    let raw: Option<RawProfile> = self
      .conn
      .call(|conn| {
        Ok(conn
          .query_row(
            "SELECT barangay_name, logo, vision, mission, address, contact_number,
                    email, officials, settings, updated_at
             FROM barangay_profile WHERE profile_id = 1",
            [],
            |row| {
              Ok(RawProfile {
                barangay_name:  row.get(0)?,
                logo:           row.get(1)?,
                vision:         row.get(2)?,
                mission:        row.get(3)?,
                address:        row.get(4)?,
                contact_number: row.get(5)?,
                email:          row.get(6)?,
                officials:      row.get(7)?,
                settings:       row.get(8)?,
                updated_at:     row.get(9)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  async fn put_profile(&self, profile: BarangayProfile) -> Result<BarangayProfile> {
    let officials_str = serde_json::to_string(&profile.officials)?;
    let settings_str = serde_json::to_string(&profile.settings)?;
    let updated_str = encode_dt(profile.updated_at);
    let p = profile.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO barangay_profile (
             profile_id, barangay_name, logo, vision, mission, address,
             contact_number, email, officials, settings, updated_at
           ) VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            p.barangay_name,
            p.logo,
            p.vision,
            p.mission,
            p.address,
            p.contact_number,
            p.email,
            officials_str,
            settings_str,
            updated_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(profile)
  }

  // ── Reports ───────────────────────────────────────────────────────────────

  async fn population_report(&self, today: NaiveDate) -> Result<PopulationReport> {
    let rows = self.conn.call(|conn| Ok(report::population(conn)?)).await?;
    rows.finish(today)
  }

  async fn demographics_report(&self) -> Result<DemographicsReport> {
    Ok(self.conn.call(|conn| Ok(report::demographics(conn)?)).await?)
  }

  async fn voter_report(&self) -> Result<VoterReport> {
    Ok(self.conn.call(|conn| Ok(report::voters(conn)?)).await?)
  }

  async fn document_report(&self) -> Result<DocumentReport> {
    Ok(self.conn.call(|conn| Ok(report::documents(conn)?)).await?)
  }

  async fn blotter_report(&self) -> Result<BlotterReport> {
    Ok(self.conn.call(|conn| Ok(report::blotters(conn)?)).await?)
  }
}
