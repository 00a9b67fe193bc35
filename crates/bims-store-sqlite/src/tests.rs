//! Integration tests for `SqliteStore` against an in-memory database, driven
//! mostly through the `bims_core::service` use cases.

use bims_core::{
  Error as CoreError,
  announcement::NewAnnouncement,
  audit::{Action, Actor, Entity},
  blotter::{ApprovalDecision, ApprovalStatus, BlotterPatch, BlotterStatus, NewBlotter},
  document::{DocumentStatus, NewDocumentRequest},
  household::{HouseholdPatch, IncomeAggregate, NewHousehold},
  profile::ProfileInput,
  resident::{NewResident, Relationship, Resident, ResidentPatch},
  service::{announcements, audit, blotters, documents, households, profile, residents, users},
  store::{AnnouncementQuery, AuditQuery, BlotterQuery, RecordStore, ResidentQuery},
  user::{ApprovalUpdate, PasswordScheme, Registration},
};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::SqliteStore;

const MEAN: IncomeAggregate = IncomeAggregate::Mean;
const ANON: Actor = Actor { user_id: None, ip: None };

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

struct PlainScheme;

impl PasswordScheme for PlainScheme {
  fn hash(&self, password: &str) -> bims_core::Result<String> { Ok(format!("plain:{password}")) }

  fn verify(&self, password: &str, hash: &str) -> bool { hash == format!("plain:{password}") }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

async fn household(s: &SqliteStore, code: &str) -> Uuid {
  households::create(
    s,
    NewHousehold {
      household_code: code.into(),
      purok:          "Purok 1".into(),
      address:        Some("Rizal St.".into()),
      tags:           vec![],
    },
    ANON,
  )
  .await
  .unwrap()
  .household_id
}

fn new_resident(
  first: &str,
  household_id: Option<Uuid>,
  relationship: Option<Relationship>,
  income: Option<f64>,
) -> NewResident {
  let mut r: NewResident = serde_json::from_value(json!({
    "first_name": first,
    "last_name": "Santos",
    "birthdate": "1985-02-10",
    "gender": "Female",
    "civil_status": "Married",
    "purok": "Purok 1",
  }))
  .unwrap();
  r.household_id = household_id;
  r.relationship_to_head = relationship;
  r.monthly_income = income;
  r
}

async fn resident(
  s: &SqliteStore,
  first: &str,
  household_id: Option<Uuid>,
  relationship: Option<Relationship>,
  income: Option<f64>,
) -> Resident {
  residents::create(s, new_resident(first, household_id, relationship, income), ANON, MEAN)
    .await
    .unwrap()
}

fn new_blotter(complainant: &str, respondent: &str, incident: NaiveDate) -> NewBlotter {
  serde_json::from_value(json!({
    "complainant": { "name": complainant },
    "respondent": { "name": respondent },
    "incident_date": incident,
    "location": "Basketball court",
    "nature_of_complaint": "Noise disturbance",
  }))
  .unwrap()
}

// ─── Residents ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn resident_round_trips_through_store() {
  let s = store().await;
  let hid = household(&s, "HH-001").await;
  let mut input = new_resident("Ana", Some(hid), Some(Relationship::Head), Some(1500.5));
  input.details.religion = Some("Catholic".into());
  input.is_voter = true;

  let created = residents::create(&s, input, ANON, MEAN).await.unwrap();
  let fetched = s.get_resident(created.resident_id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_resident_missing_returns_none() {
  let s = store().await;
  assert!(s.get_resident(Uuid::new_v4()).await.unwrap().is_none());
  assert!(matches!(
    residents::get(&s, Uuid::new_v4()).await,
    Err(CoreError::NotFound(m)) if m == "Resident not found"
  ));
}

#[tokio::test]
async fn dangling_household_reference_is_rejected() {
  let s = store().await;
  let err = residents::create(&s, new_resident("Ana", Some(Uuid::new_v4()), None, None), ANON, MEAN)
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::InvalidReference(_)));
  assert_eq!(s.list_residents(ResidentQuery::default()).await.unwrap().total, 0);
}

#[tokio::test]
async fn list_residents_filters_and_pages() {
  let s = store().await;
  for name in ["Ana", "Bea", "Carla", "Dina", "Ella"] {
    resident(&s, name, None, None, None).await;
  }
  let mut voter = new_resident("Fely", None, None, None);
  voter.is_voter = true;
  residents::create(&s, voter, ANON, MEAN).await.unwrap();

  let page = s
    .list_residents(ResidentQuery { page: Some(2), limit: Some(4), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(page.total, 6);
  assert_eq!(page.total_pages, 2);
  assert_eq!(page.items.len(), 2);

  let found = s
    .list_residents(ResidentQuery { search: Some("carl".into()), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(found.total, 1);
  assert_eq!(found.items[0].first_name, "Carla");

  let voters = s
    .list_residents(ResidentQuery { is_voter: Some(true), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(voters.total, 1);
  assert_eq!(voters.items[0].first_name, "Fely");
}

// ─── Household summary ───────────────────────────────────────────────────────

#[tokio::test]
async fn summary_follows_member_changes() {
  let s = store().await;
  let hid = household(&s, "HH-001").await;
  let a = resident(&s, "Ana", Some(hid), Some(Relationship::Head), Some(8000.0)).await;
  resident(&s, "Ben", Some(hid), Some(Relationship::Child), Some(2000.0)).await;

  let h = households::get(&s, hid).await.unwrap();
  assert_eq!(h.summary.total_members, 2);
  assert_eq!(h.summary.monthly_income, 5000.0);
  assert_eq!(h.summary.head_id, Some(a.resident_id));

  residents::delete(&s, a.resident_id, ANON, MEAN).await.unwrap();

  let h = households::get(&s, hid).await.unwrap();
  assert_eq!(h.summary.total_members, 1);
  assert_eq!(h.summary.head_id, None);
  assert_eq!(h.summary.monthly_income, 2000.0);
}

#[tokio::test]
async fn absent_income_counts_as_zero() {
  let s = store().await;
  let hid = household(&s, "HH-002").await;
  resident(&s, "Ana", Some(hid), None, Some(3000.0)).await;
  resident(&s, "Ben", Some(hid), None, None).await;

  let h = households::get(&s, hid).await.unwrap();
  assert_eq!(h.summary.monthly_income, 1500.0);
}

#[tokio::test]
async fn moving_a_resident_updates_both_households() {
  let s = store().await;
  let from = household(&s, "HH-A").await;
  let to = household(&s, "HH-B").await;
  let mut pwd = new_resident("Ana", Some(from), None, Some(1000.0));
  pwd.is_pwd = true;
  let ana = residents::create(&s, pwd, ANON, MEAN).await.unwrap();
  resident(&s, "Ben", Some(from), None, None).await;

  let patch = ResidentPatch { household_id: Some(Some(to)), ..Default::default() };
  residents::update(&s, ana.resident_id, patch, ANON, MEAN).await.unwrap();

  let old = households::get(&s, from).await.unwrap();
  let new = households::get(&s, to).await.unwrap();
  assert_eq!(old.summary.total_members, 1);
  assert!(!old.summary.has_pwd);
  assert_eq!(new.summary.total_members, 1);
  assert!(new.summary.has_pwd);
  assert_eq!(new.summary.monthly_income, 1000.0);
}

#[tokio::test]
async fn total_members_matches_referencing_residents() {
  let s = store().await;
  let hid = household(&s, "HH-003").await;
  let mut ids = Vec::new();
  for name in ["Ana", "Ben", "Cris"] {
    ids.push(resident(&s, name, Some(hid), None, None).await.resident_id);
  }
  let patch = ResidentPatch { household_id: Some(None), ..Default::default() };
  residents::update(&s, ids[1], patch, ANON, MEAN).await.unwrap();

  let h = households::get(&s, hid).await.unwrap();
  let members = s.household_members(hid).await.unwrap();
  assert_eq!(h.summary.total_members as usize, members.len());
  assert_eq!(members.len(), 2);
}

#[tokio::test]
async fn recalculate_missing_household_is_not_found() {
  let s = store().await;
  let err = households::recalculate(&s, Uuid::new_v4(), MEAN, ANON).await.unwrap_err();
  assert!(matches!(err, CoreError::NotFound(m) if m == "Household not found"));
}

#[tokio::test]
async fn household_update_keeps_summary() {
  let s = store().await;
  let hid = household(&s, "HH-004").await;
  resident(&s, "Ana", Some(hid), None, Some(900.0)).await;

  let patch = HouseholdPatch { purok: Some("Purok 7".into()), ..Default::default() };
  households::update(&s, hid, patch, ANON).await.unwrap();

  let h = households::get(&s, hid).await.unwrap();
  assert_eq!(h.purok, "Purok 7");
  assert_eq!(h.summary.total_members, 1);
  assert_eq!(h.summary.monthly_income, 900.0);
}

#[tokio::test]
async fn duplicate_household_code_conflicts() {
  let s = store().await;
  household(&s, "HH-001").await;
  let err = households::create(
    &s,
    NewHousehold {
      household_code: "HH-001".into(),
      purok:          "Purok 2".into(),
      address:        None,
      tags:           vec![],
    },
    ANON,
  )
  .await
  .unwrap_err();
  assert!(matches!(err, CoreError::Conflict(m) if m == "Household code already exists"));
}

#[tokio::test]
async fn deleting_a_household_detaches_residents() {
  let s = store().await;
  let hid = household(&s, "HH-005").await;
  let ana = resident(&s, "Ana", Some(hid), Some(Relationship::Head), None).await;

  households::delete(&s, hid, ANON).await.unwrap();

  let ana = residents::get(&s, ana.resident_id).await.unwrap();
  assert_eq!(ana.household_id, None);
  assert!(households::get(&s, hid).await.is_err());
}

// ─── Single head ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn new_head_demotes_previous_head() {
  let s = store().await;
  let hid = household(&s, "HH-006").await;
  let a = resident(&s, "Ana", Some(hid), Some(Relationship::Head), None).await;
  let b = resident(&s, "Ben", Some(hid), Some(Relationship::Head), None).await;

  let a = residents::get(&s, a.resident_id).await.unwrap();
  assert_eq!(a.relationship_to_head, Some(Relationship::Relative));

  let heads: Vec<_> = s
    .household_members(hid)
    .await
    .unwrap()
    .into_iter()
    .filter(Resident::is_head)
    .collect();
  assert_eq!(heads.len(), 1);
  assert_eq!(households::get(&s, hid).await.unwrap().summary.head_id, Some(b.resident_id));
}

#[tokio::test]
async fn promoting_a_member_demotes_the_head() {
  let s = store().await;
  let hid = household(&s, "HH-007").await;
  let a = resident(&s, "Ana", Some(hid), Some(Relationship::Head), None).await;
  let b = resident(&s, "Ben", Some(hid), Some(Relationship::Spouse), None).await;

  let patch = ResidentPatch {
    relationship_to_head: Some(Some(Relationship::Head)),
    ..Default::default()
  };
  residents::update(&s, b.resident_id, patch, ANON, MEAN).await.unwrap();

  assert!(!residents::get(&s, a.resident_id).await.unwrap().is_head());
  assert!(residents::get(&s, b.resident_id).await.unwrap().is_head());
  assert_eq!(households::get(&s, hid).await.unwrap().summary.head_id, Some(b.resident_id));
}

#[tokio::test]
async fn moving_a_head_into_a_headed_household() {
  let s = store().await;
  let from = household(&s, "HH-010").await;
  let to = household(&s, "HH-011").await;
  let a = resident(&s, "Ana", Some(from), Some(Relationship::Head), None).await;
  let b = resident(&s, "Ben", Some(to), Some(Relationship::Head), None).await;

  let patch = ResidentPatch { household_id: Some(Some(to)), ..Default::default() };
  let moved = residents::update(&s, a.resident_id, patch, ANON, MEAN).await.unwrap();
  assert!(moved.is_head());

  let b = residents::get(&s, b.resident_id).await.unwrap();
  assert_eq!(b.relationship_to_head, Some(Relationship::Relative));

  let heads: Vec<_> = s
    .household_members(to)
    .await
    .unwrap()
    .into_iter()
    .filter(Resident::is_head)
    .collect();
  assert_eq!(heads.len(), 1);

  let target = households::get(&s, to).await.unwrap();
  assert_eq!(target.summary.head_id, Some(a.resident_id));
  assert_eq!(target.summary.total_members, 2);

  let source = households::get(&s, from).await.unwrap();
  assert_eq!(source.summary.head_id, None);
  assert_eq!(source.summary.total_members, 0);
}

#[tokio::test]
async fn moving_to_an_unknown_household_is_rejected() {
  let s = store().await;
  let hid = household(&s, "HH-012").await;
  let ana = resident(&s, "Ana", Some(hid), None, None).await;

  let patch = ResidentPatch { household_id: Some(Some(Uuid::new_v4())), ..Default::default() };
  let err = residents::update(&s, ana.resident_id, patch, ANON, MEAN).await.unwrap_err();
  assert!(matches!(err, CoreError::InvalidReference(_)));

  let unchanged = ResidentPatch { first_name: Some("Anna".into()), ..Default::default() };
  let ana = residents::update(&s, ana.resident_id, unchanged, ANON, MEAN).await.unwrap();
  assert_eq!(ana.household_id, Some(hid));
}

#[tokio::test]
async fn second_head_written_directly_conflicts() {
  let s = store().await;
  let hid = household(&s, "HH-008").await;
  resident(&s, "Ana", Some(hid), Some(Relationship::Head), None).await;

  let raw = new_resident("Ben", Some(hid), Some(Relationship::Head), None)
    .into_resident(None, Utc::now());
  let err: CoreError = s.insert_resident(raw).await.unwrap_err().into();
  assert!(matches!(err, CoreError::Conflict(m) if m == "Household already has a head"));
}

// ─── Document requests ───────────────────────────────────────────────────────

#[tokio::test]
async fn request_for_missing_resident_is_not_stored() {
  let s = store().await;
  let input = NewDocumentRequest {
    resident_id: Uuid::new_v4(),
    doc_type:    "Barangay Clearance".parse().unwrap(),
    purpose:     Some("Employment".into()),
  };
  let err = documents::create(&s, input, ANON).await.unwrap_err();
  assert!(matches!(err, CoreError::NotFound(m) if m == "Resident not found"));
  assert_eq!(documents::list(&s, Default::default()).await.unwrap().total, 0);
}

#[tokio::test]
async fn document_approval_is_one_shot() {
  let s = store().await;
  let ana = resident(&s, "Ana", None, None, None).await;
  let official = Uuid::new_v4();
  let req = documents::create(
    &s,
    NewDocumentRequest {
      resident_id: ana.resident_id,
      doc_type:    "Certificate of Residency".parse().unwrap(),
      purpose:     None,
    },
    ANON,
  )
  .await
  .unwrap();
  assert_eq!(req.status, DocumentStatus::Pending);

  let approved = documents::approve(&s, req.request_id, Actor::user(official)).await.unwrap();
  assert_eq!(approved.status, DocumentStatus::Approved);
  assert_eq!(approved.qr_code, Some(format!("BRGY-DOC-{}", req.request_id)));
  let issued_at = approved.issued_at;

  let err = documents::approve(&s, req.request_id, Actor::user(Uuid::new_v4())).await.unwrap_err();
  assert!(matches!(err, CoreError::Conflict(m) if m == "Request already approved"));

  let stored = documents::get(&s, req.request_id).await.unwrap();
  assert_eq!(stored.issued_at, issued_at);
  assert_eq!(stored.issued_by, Some(official));
}

#[tokio::test]
async fn claim_requires_approval() {
  let s = store().await;
  let ana = resident(&s, "Ana", None, None, None).await;
  let req = documents::create(
    &s,
    NewDocumentRequest {
      resident_id: ana.resident_id,
      doc_type:    "Certificate of Indigency".parse().unwrap(),
      purpose:     None,
    },
    ANON,
  )
  .await
  .unwrap();

  let staff = Uuid::new_v4();
  assert!(matches!(
    documents::claim(&s, req.request_id, Actor::user(staff)).await,
    Err(CoreError::Conflict(_))
  ));

  documents::approve(&s, req.request_id, Actor::user(staff)).await.unwrap();
  let claimed = documents::claim(&s, req.request_id, Actor::user(staff)).await.unwrap();
  assert_eq!(claimed.status, DocumentStatus::Claimed);
  assert!(claimed.claimed_at.is_some());

  let check = documents::verify(&s, req.request_id).await.unwrap();
  assert!(check.valid);
  assert_eq!(check.resident_name.as_deref(), Some("Ana Santos"));
}

// ─── Blotters ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn blotter_decision_is_one_shot() {
  let s = store().await;
  let b = blotters::create(&s, new_blotter("Maria", "Pedro", date(2024, 3, 1)), ANON, true)
    .await
    .unwrap();
  assert!(b.is_public);
  assert_eq!(b.approval.status, ApprovalStatus::Pending);

  let captain = Uuid::new_v4();
  let decided =
    blotters::decide(&s, b.blotter_id, ApprovalDecision::Approved, None, Actor::user(captain))
      .await
      .unwrap();
  assert_eq!(decided.approval.status, ApprovalStatus::Approved);
  let decided_at = decided.approval.decided_at;

  let err = blotters::decide(
    &s,
    b.blotter_id,
    ApprovalDecision::Rejected,
    Some("late".into()),
    Actor::user(Uuid::new_v4()),
  )
  .await
  .unwrap_err();
  assert!(matches!(err, CoreError::Conflict(m) if m == "Blotter already approved"));

  let stored = blotters::get(&s, b.blotter_id).await.unwrap();
  assert_eq!(stored.approval.decided_at, decided_at);
  assert_eq!(stored.approval.decided_by, Some(captain));
}

#[tokio::test]
async fn status_change_appends_history_once() {
  let s = store().await;
  let b = blotters::create(&s, new_blotter("Maria", "Pedro", date(2024, 3, 1)), ANON, false)
    .await
    .unwrap();
  assert_eq!(b.status_history.len(), 1);

  let patch = BlotterPatch {
    status: Some(BlotterStatus::UnderInvestigation),
    remarks: Some("assigned to tanod".into()),
    ..Default::default()
  };
  let b = blotters::update(&s, b.blotter_id, patch.clone(), ANON).await.unwrap();
  assert_eq!(b.status_history.len(), 2);
  assert_eq!(b.status_history[1].remarks.as_deref(), Some("assigned to tanod"));

  let b = blotters::update(&s, b.blotter_id, patch, ANON).await.unwrap();
  assert_eq!(b.status_history.len(), 2);

  let stored = blotters::get(&s, b.blotter_id).await.unwrap();
  assert_eq!(stored.status, BlotterStatus::UnderInvestigation);
  assert_eq!(stored.status_history.len(), 2);
}

#[tokio::test]
async fn blotter_attachments_accumulate() {
  let s = store().await;
  let b = blotters::create(&s, new_blotter("Maria", "Pedro", date(2024, 3, 1)), ANON, false)
    .await
    .unwrap();
  blotters::add_attachments(&s, b.blotter_id, vec!["uploads/a.jpg".into()], ANON)
    .await
    .unwrap();
  let more = vec!["uploads/b.jpg".into(), " ".into()];
  let b = blotters::add_attachments(&s, b.blotter_id, more, ANON).await.unwrap();
  assert_eq!(b.attachments, vec!["uploads/a.jpg", "uploads/b.jpg"]);
}

#[tokio::test]
async fn blotter_list_filters_by_date_and_party() {
  let s = store().await;
  blotters::create(&s, new_blotter("Maria", "Pedro", date(2024, 1, 5)), ANON, false)
    .await
    .unwrap();
  blotters::create(&s, new_blotter("Jose", "Pedro", date(2024, 2, 10)), ANON, false)
    .await
    .unwrap();
  blotters::create(&s, new_blotter("Maria", "Luis", date(2024, 3, 15)), ANON, false)
    .await
    .unwrap();

  let feb_on = blotters::list(
    &s,
    BlotterQuery { from: Some(date(2024, 2, 1)), ..Default::default() },
  )
  .await
  .unwrap();
  assert_eq!(feb_on.total, 2);
  assert_eq!(feb_on.items[0].incident_date, date(2024, 3, 15));

  let maria = blotters::list(&s, BlotterQuery { name: Some("maria".into()), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(maria.total, 2);

  let report = s.blotter_report().await.unwrap();
  assert_eq!(report.total, 3);
  assert_eq!(report.by_month.len(), 3);
  assert_eq!(report.by_month[0].label, "2024-01");
}

// ─── Users and sessions ──────────────────────────────────────────────────────

fn registration(username: &str, email: &str) -> Registration {
  serde_json::from_value(json!({
    "name": "Clara Reyes",
    "username": username,
    "email": email,
    "password": "s3cretpass",
  }))
  .unwrap()
}

#[tokio::test]
async fn login_waits_for_approval() {
  let s = store().await;
  let user = users::register(&s, &PlainScheme, registration("clara", "clara@example.com"), None)
    .await
    .unwrap();
  assert!(!user.is_approved);

  let err = users::authenticate(&s, &PlainScheme, "clara", "s3cretpass", None).await.unwrap_err();
  assert!(matches!(err, CoreError::Forbidden(_)));

  let admin = Uuid::new_v4();
  users::set_approval(
    &s,
    ApprovalUpdate { user_id: user.user_id, is_approved: Some(true), role: None },
    Actor::user(admin),
  )
  .await
  .unwrap();

  let by_email = users::authenticate(&s, &PlainScheme, "CLARA@example.com", "s3cretpass", None)
    .await
    .unwrap();
  assert_eq!(by_email.user_id, user.user_id);

  let err = users::authenticate(&s, &PlainScheme, "clara", "wrong-pass", None).await.unwrap_err();
  assert!(matches!(err, CoreError::Unauthorized(_)));
}

#[tokio::test]
async fn duplicate_username_conflicts() {
  let s = store().await;
  users::register(&s, &PlainScheme, registration("clara", "clara@example.com"), None)
    .await
    .unwrap();
  let err = users::register(&s, &PlainScheme, registration("Clara", "other@example.com"), None)
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Conflict(m) if m == "Username already taken"));
}

#[tokio::test]
async fn sessions_resolve_expire_and_revoke() {
  let s = store().await;
  let admin = users::bootstrap_admin(
    &s,
    "Admin".into(),
    "admin".into(),
    "admin@example.com".into(),
    PlainScheme.hash("adminpass").unwrap(),
  )
  .await
  .unwrap()
  .unwrap();

  users::open_session(&s, admin.user_id, "live".into(), Duration::hours(1))
    .await
    .unwrap();
  assert_eq!(users::resolve_session(&s, "live".into()).await.unwrap().user_id, admin.user_id);

  let rotated = users::rotate_session(&s, "live".into(), "next".into(), Duration::hours(1))
    .await
    .unwrap();
  assert_eq!(rotated.token_hash, "next");
  assert!(users::resolve_session(&s, "live".into()).await.is_err());

  users::open_session(&s, admin.user_id, "stale".into(), Duration::seconds(-1))
    .await
    .unwrap();
  assert!(matches!(
    users::resolve_session(&s, "stale".into()).await,
    Err(CoreError::Unauthorized(_))
  ));
  assert!(s.get_session("stale".into()).await.unwrap().is_none());

  users::close_session(&s, "next".into(), Actor::user(admin.user_id)).await.unwrap();
  assert!(users::resolve_session(&s, "next".into()).await.is_err());

  // A second bootstrap is a no-op.
  let again = users::bootstrap_admin(&s, "X".into(), "x".into(), "x@x.com".into(), "h".into())
    .await
    .unwrap();
  assert!(again.is_none());
}

#[tokio::test]
async fn suspending_a_user_drops_sessions() {
  let s = store().await;
  let user = users::register(&s, &PlainScheme, registration("clara", "clara@example.com"), None)
    .await
    .unwrap();
  let admin = Uuid::new_v4();
  let approve = |ok| ApprovalUpdate { user_id: user.user_id, is_approved: Some(ok), role: None };

  users::set_approval(&s, approve(true), Actor::user(admin)).await.unwrap();
  users::open_session(&s, user.user_id, "t1".into(), Duration::hours(1))
    .await
    .unwrap();
  users::set_approval(&s, approve(false), Actor::user(admin)).await.unwrap();

  assert!(s.get_session("t1".into()).await.unwrap().is_none());
  assert_eq!(users::list(&s, true).await.unwrap().len(), 1);
}

// ─── Audit trail ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn mutations_are_audited() {
  let s = store().await;
  let actor = Uuid::new_v4();
  let hid = household(&s, "HH-009").await;
  let input = new_resident("Ana", Some(hid), None, None);
  let ana = residents::create(&s, input, Actor::user(actor), MEAN).await.unwrap();
  residents::delete(&s, ana.resident_id, Actor::user(actor), MEAN).await.unwrap();

  let log = audit::list(&s, AuditQuery { entity: Some(Entity::Resident), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(log.total, 2);
  assert_eq!(log.items[0].action, Action::DeleteResident);
  assert_eq!(log.items[1].action, Action::CreateResident);
  assert!(log.items.iter().all(|e| e.actor_id == Some(actor)));

  let mine = audit::list(&s, AuditQuery { actor_id: Some(actor), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(mine.total, 2);
}

#[tokio::test]
async fn audit_entries_keep_the_caller_address() {
  let s = store().await;
  let ip = "192.168.10.4".parse().unwrap();
  let actor = Actor::user(Uuid::new_v4()).with_ip(Some(ip));
  let hid = household(&s, "HH-013").await;
  households::delete(&s, hid, actor).await.unwrap();

  let log = audit::list(&s, AuditQuery { entity: Some(Entity::Household), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(log.total, 2);
  assert_eq!(log.items[0].action, Action::DeleteHousehold);
  assert_eq!(log.items[0].ip, Some(ip));
  assert_eq!(log.items[0].actor_id, actor.user_id);
  assert_eq!(log.items[1].ip, None);
}

// ─── Announcements and profile ───────────────────────────────────────────────

#[tokio::test]
async fn anonymous_callers_see_public_announcements_only() {
  let s = store().await;
  let post = |title: &str, published: bool, visible_to: &str| -> NewAnnouncement {
    serde_json::from_value(json!({
      "title": title,
      "content": "Details inside",
      "published": published,
      "visible_to": visible_to,
    }))
    .unwrap()
  };
  let public = announcements::create(&s, post("Clean-up drive", true, "public"), ANON)
    .await
    .unwrap();
  let internal = announcements::create(&s, post("Staff meeting", true, "internal"), ANON)
    .await
    .unwrap();
  announcements::create(&s, post("Draft", false, "public"), ANON).await.unwrap();

  let listed = announcements::list(&s, AnnouncementQuery::default().public_only())
    .await
    .unwrap();
  assert_eq!(listed.total, 1);
  assert_eq!(listed.items[0].announcement_id, public.announcement_id);

  assert!(announcements::get_public(&s, public.announcement_id).await.is_ok());
  assert!(matches!(
    announcements::get_public(&s, internal.announcement_id).await,
    Err(CoreError::NotFound(_))
  ));
  assert_eq!(announcements::list(&s, AnnouncementQuery::default()).await.unwrap().total, 3);
}

#[tokio::test]
async fn profile_is_a_singleton() {
  let s = store().await;
  assert!(matches!(profile::get(&s).await, Err(CoreError::NotFound(_))));

  let input = |name: &str| -> ProfileInput {
    serde_json::from_value(json!({
      "barangay_name": name,
      "officials": [{ "name": "Jose Rizal", "position": "Punong Barangay" }],
      "settings": { "backup_enabled": true },
    }))
    .unwrap()
  };
  profile::put(&s, input("San Isidro"), ANON).await.unwrap();
  profile::put(&s, input("San Roque"), ANON).await.unwrap();

  let p = profile::get(&s).await.unwrap();
  assert_eq!(p.barangay_name, "San Roque");
  assert_eq!(p.officials.len(), 1);
  assert!(p.settings.backup_enabled);
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn population_counts_active_residents() {
  let s = store().await;
  let mut child = new_resident("Ana", None, None, None);
  child.birthdate = date(2020, 1, 1);
  residents::create(&s, child, ANON, MEAN).await.unwrap();

  let mut senior = new_resident("Ben", None, None, None);
  senior.birthdate = date(1950, 6, 1);
  senior.gender = "Male".parse().unwrap();
  senior.is_voter = true;
  residents::create(&s, senior, ANON, MEAN).await.unwrap();

  let mut gone = new_resident("Cris", None, None, None);
  gone.status = "Deceased".parse().unwrap();
  residents::create(&s, gone, ANON, MEAN).await.unwrap();

  let report = s.population_report(date(2024, 6, 1)).await.unwrap();
  assert_eq!(report.total, 2);
  let groups: Vec<(String, u64)> = report
    .by_age_group
    .into_iter()
    .map(|t| (t.label, t.count))
    .collect();
  assert_eq!(groups, vec![
    ("0-12".to_owned(), 1),
    ("13-17".to_owned(), 0),
    ("18-59".to_owned(), 0),
    ("60+".to_owned(), 1),
  ]);
  assert_eq!(report.by_gender.len(), 2);

  let voters = s.voter_report().await.unwrap();
  assert_eq!(voters.voters, 1);
  assert_eq!(voters.non_voters, 1);
}
