//! The `RecordStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `bims-store-sqlite`).
//! It is deliberately dumb: it reads and writes whole records and never
//! enforces domain rules. The functions in [`crate::service`] sequence these
//! calls with the aggregator, the single-head rule, the workflows and the
//! audit trail.

use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  announcement::{Announcement, Visibility},
  audit::{Action, AuditEntry, Entity},
  blotter::{ApprovalStatus, Blotter, BlotterStatus},
  document::{DocumentRequest, DocumentStatus, DocumentType},
  household::{Household, HouseholdSummary},
  profile::BarangayProfile,
  report::{BlotterReport, DemographicsReport, DocumentReport, PopulationReport, VoterReport},
  resident::{Gender, Resident, ResidencyStatus},
  user::{Session, User},
};

// ─── Pagination ──────────────────────────────────────────────────────────────

/// A normalised page request: 1-based page, bounded limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
  pub page:  u32,
  pub limit: u32,
}

impl Paging {
  pub const DEFAULT_LIMIT: u32 = 10;
  pub const MAX_LIMIT: u32 = 100;

  pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
    Self {
      page:  page.unwrap_or(1).max(1),
      limit: limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, Self::MAX_LIMIT),
    }
  }

  pub fn offset(&self) -> u64 { u64::from(self.page - 1) * u64::from(self.limit) }

  pub fn wrap<T>(self, items: Vec<T>, total: u64) -> Page<T> {
    Page {
      items,
      total,
      page: self.page,
      limit: self.limit,
      total_pages: total.div_ceil(u64::from(self.limit)) as u32,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
  pub items:       Vec<T>,
  pub total:       u64,
  pub page:        u32,
  pub limit:       u32,
  pub total_pages: u32,
}

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`RecordStore::list_residents`]. Newest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResidentQuery {
  /// Substring over first, middle and last name.
  pub search:            Option<String>,
  pub purok:             Option<String>,
  pub gender:            Option<Gender>,
  pub status:            Option<ResidencyStatus>,
  pub household_id:      Option<Uuid>,
  pub is_voter:          Option<bool>,
  pub is_pwd:            Option<bool>,
  pub is_senior_citizen: Option<bool>,
  pub page:              Option<u32>,
  pub limit:             Option<u32>,
}

/// Parameters for [`RecordStore::list_households`]. Ordered by code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HouseholdQuery {
  /// Substring over household code and address.
  pub search: Option<String>,
  pub purok:  Option<String>,
  pub page:   Option<u32>,
  pub limit:  Option<u32>,
}

/// Parameters for [`RecordStore::list_blotters`]. Ordered by incident date,
/// then creation, both descending.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlotterQuery {
  pub status:          Option<BlotterStatus>,
  pub approval:        Option<ApprovalStatus>,
  pub complainant_id:  Option<Uuid>,
  pub respondent_id:   Option<Uuid>,
  /// Substring over either party's name.
  pub name:            Option<String>,
  pub location:        Option<String>,
  /// Free text over nature of complaint and description.
  pub search:          Option<String>,
  pub from:            Option<NaiveDate>,
  pub to:              Option<NaiveDate>,
  pub page:            Option<u32>,
  pub limit:           Option<u32>,
}

/// Parameters for [`RecordStore::list_documents`]. Newest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentQuery {
  pub status:      Option<DocumentStatus>,
  pub doc_type:    Option<DocumentType>,
  pub resident_id: Option<Uuid>,
  pub page:        Option<u32>,
  pub limit:       Option<u32>,
}

/// Parameters for [`RecordStore::list_audit`]. Newest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
  pub actor_id: Option<Uuid>,
  pub entity:   Option<Entity>,
  pub action:   Option<Action>,
  pub page:     Option<u32>,
  pub limit:    Option<u32>,
}

/// Parameters for [`RecordStore::list_announcements`]. Newest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementQuery {
  /// Substring over title and content.
  pub search:     Option<String>,
  pub published:  Option<bool>,
  pub visible_to: Option<Visibility>,
  pub page:       Option<u32>,
  pub limit:      Option<u32>,
}

impl AnnouncementQuery {
  /// Restrict to what an anonymous caller may see.
  pub fn public_only(mut self) -> Self {
    self.published = Some(true);
    self.visible_to = Some(Visibility::Public);
    self
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a barangay records backend.
///
/// Inserts take the fully-built record and hand it back once persisted.
/// `update_*` methods overwrite every stored column of an existing record and
/// fail with a not-found error when it has disappeared; `delete_*` methods
/// report whether a row was removed.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  // ── Residents ─────────────────────────────────────────────────────────

  fn insert_resident(
    &self,
    resident: Resident,
  ) -> impl Future<Output = Result<Resident, Self::Error>> + Send + '_;

  fn get_resident(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Resident>, Self::Error>> + Send + '_;

  fn update_resident(
    &self,
    resident: Resident,
  ) -> impl Future<Output = Result<Resident, Self::Error>> + Send + '_;

  fn delete_resident(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn list_residents(
    &self,
    query: ResidentQuery,
  ) -> impl Future<Output = Result<Page<Resident>, Self::Error>> + Send + '_;

  /// Every resident referencing `household_id`, ordered by
  /// `(created_at, resident_id)`.
  fn household_members(
    &self,
    household_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Resident>, Self::Error>> + Send + '_;

  /// Set every `Head` in the household other than `keep` to `Relative`, in
  /// a single statement. Returns the number of residents demoted.
  fn demote_heads(
    &self,
    household_id: Uuid,
    keep: Option<Uuid>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Households ────────────────────────────────────────────────────────

  fn insert_household(
    &self,
    household: Household,
  ) -> impl Future<Output = Result<Household, Self::Error>> + Send + '_;

  fn get_household(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Household>, Self::Error>> + Send + '_;

  /// Overwrite the editable columns. Summary columns are left alone.
  fn update_household(
    &self,
    household: Household,
  ) -> impl Future<Output = Result<Household, Self::Error>> + Send + '_;

  /// Residents referencing the household are detached, not deleted.
  fn delete_household(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn list_households(
    &self,
    query: HouseholdQuery,
  ) -> impl Future<Output = Result<Page<Household>, Self::Error>> + Send + '_;

  /// Write the summary columns only. Returns `false` if the household does
  /// not exist.
  fn write_summary(
    &self,
    household_id: Uuid,
    summary: HouseholdSummary,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Blotters ──────────────────────────────────────────────────────────

  fn insert_blotter(
    &self,
    blotter: Blotter,
  ) -> impl Future<Output = Result<Blotter, Self::Error>> + Send + '_;

  fn get_blotter(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Blotter>, Self::Error>> + Send + '_;

  fn update_blotter(
    &self,
    blotter: Blotter,
  ) -> impl Future<Output = Result<Blotter, Self::Error>> + Send + '_;

  fn delete_blotter(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn list_blotters(
    &self,
    query: BlotterQuery,
  ) -> impl Future<Output = Result<Page<Blotter>, Self::Error>> + Send + '_;

  // ── Document requests ─────────────────────────────────────────────────

  fn insert_document(
    &self,
    request: DocumentRequest,
  ) -> impl Future<Output = Result<DocumentRequest, Self::Error>> + Send + '_;

  fn get_document(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<DocumentRequest>, Self::Error>> + Send + '_;

  fn update_document(
    &self,
    request: DocumentRequest,
  ) -> impl Future<Output = Result<DocumentRequest, Self::Error>> + Send + '_;

  fn list_documents(
    &self,
    query: DocumentQuery,
  ) -> impl Future<Output = Result<Page<DocumentRequest>, Self::Error>> + Send + '_;

  // ── Users and sessions ────────────────────────────────────────────────

  fn insert_user(
    &self,
    user: User,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Look a user up by username or email, case-insensitively.
  fn find_user(
    &self,
    identifier: String,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn update_user(
    &self,
    user: User,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// All users, newest first; only unapproved ones when `pending_only`.
  fn list_users(
    &self,
    pending_only: bool,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  fn count_users(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn insert_session(
    &self,
    session: Session,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_session(
    &self,
    token_hash: String,
  ) -> impl Future<Output = Result<Option<Session>, Self::Error>> + Send + '_;

  fn delete_session(
    &self,
    token_hash: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Drop every session belonging to `user_id`. Returns how many.
  fn delete_user_sessions(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Audit trail (append-only) ─────────────────────────────────────────

  fn append_audit(
    &self,
    entry: AuditEntry,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn list_audit(
    &self,
    query: AuditQuery,
  ) -> impl Future<Output = Result<Page<AuditEntry>, Self::Error>> + Send + '_;

  // ── Announcements ─────────────────────────────────────────────────────

  fn insert_announcement(
    &self,
    announcement: Announcement,
  ) -> impl Future<Output = Result<Announcement, Self::Error>> + Send + '_;

  fn get_announcement(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Announcement>, Self::Error>> + Send + '_;

  fn update_announcement(
    &self,
    announcement: Announcement,
  ) -> impl Future<Output = Result<Announcement, Self::Error>> + Send + '_;

  fn delete_announcement(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn list_announcements(
    &self,
    query: AnnouncementQuery,
  ) -> impl Future<Output = Result<Page<Announcement>, Self::Error>> + Send + '_;

  // ── Barangay profile ──────────────────────────────────────────────────

  fn get_profile(
    &self,
  ) -> impl Future<Output = Result<Option<BarangayProfile>, Self::Error>> + Send + '_;

  /// Insert or replace the singleton profile.
  fn put_profile(
    &self,
    profile: BarangayProfile,
  ) -> impl Future<Output = Result<BarangayProfile, Self::Error>> + Send + '_;

  // ── Reports ───────────────────────────────────────────────────────────

  /// Ages are computed as of `today`.
  fn population_report(
    &self,
    today: NaiveDate,
  ) -> impl Future<Output = Result<PopulationReport, Self::Error>> + Send + '_;

  fn demographics_report(
    &self,
  ) -> impl Future<Output = Result<DemographicsReport, Self::Error>> + Send + '_;

  fn voter_report(&self) -> impl Future<Output = Result<VoterReport, Self::Error>> + Send + '_;

  fn document_report(
    &self,
  ) -> impl Future<Output = Result<DocumentReport, Self::Error>> + Send + '_;

  fn blotter_report(
    &self,
  ) -> impl Future<Output = Result<BlotterReport, Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn paging_defaults_and_clamps() {
    assert_eq!(Paging::new(None, None), Paging { page: 1, limit: 10 });
    assert_eq!(Paging::new(Some(0), Some(0)), Paging { page: 1, limit: 1 });
    assert_eq!(Paging::new(Some(3), Some(1000)).limit, Paging::MAX_LIMIT);
    assert_eq!(Paging::new(Some(3), Some(20)).offset(), 40);
  }

  #[test]
  fn page_counts_round_up() {
    let page = Paging::new(Some(1), Some(10)).wrap(vec![1, 2, 3], 21);
    assert_eq!(page.total_pages, 3);
    let empty = Paging::new(None, None).wrap(Vec::<u8>::new(), 0);
    assert_eq!(empty.total_pages, 0);
  }

  #[test]
  fn public_only_overrides_filters() {
    let q = AnnouncementQuery {
      published: Some(false),
      visible_to: Some(Visibility::Internal),
      ..Default::default()
    }
    .public_only();
    assert_eq!(q.published, Some(true));
    assert_eq!(q.visible_to, Some(Visibility::Public));
  }
}
