//! SQL schema for the barangay records store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS households (
    household_id        TEXT PRIMARY KEY,
    household_code      TEXT NOT NULL UNIQUE,
    purok               TEXT NOT NULL,
    address             TEXT,
    tags                TEXT NOT NULL DEFAULT '[]',
    -- derived; written only by the summary aggregator
    head_id             TEXT,
    total_members       INTEGER NOT NULL DEFAULT 0,
    monthly_income      REAL    NOT NULL DEFAULT 0,
    has_4ps_beneficiary INTEGER NOT NULL DEFAULT 0,
    has_pwd             INTEGER NOT NULL DEFAULT 0,
    has_senior_citizen  INTEGER NOT NULL DEFAULT 0,
    has_solo_parent     INTEGER NOT NULL DEFAULT 0,
    summarized_at       TEXT,
    created_at          TEXT NOT NULL,
    updated_at          TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS residents (
    resident_id          TEXT PRIMARY KEY,
    first_name           TEXT NOT NULL,
    middle_name          TEXT,
    last_name            TEXT NOT NULL,
    suffix               TEXT,
    birthdate            TEXT NOT NULL,   -- YYYY-MM-DD
    gender               TEXT NOT NULL,
    civil_status         TEXT NOT NULL,
    purok                TEXT NOT NULL,
    house_number         TEXT,
    household_id         TEXT REFERENCES households(household_id) ON DELETE SET NULL,
    relationship_to_head TEXT,
    monthly_income       REAL,
    employment_status    TEXT NOT NULL,
    is_4ps_beneficiary   INTEGER NOT NULL DEFAULT 0,
    is_pwd               INTEGER NOT NULL DEFAULT 0,
    is_senior_citizen    INTEGER NOT NULL DEFAULT 0,
    is_solo_parent       INTEGER NOT NULL DEFAULT 0,
    is_voter             INTEGER NOT NULL DEFAULT 0,
    status               TEXT NOT NULL,
    details              TEXT NOT NULL DEFAULT '{}',
    registered_by        TEXT,
    created_at           TEXT NOT NULL,
    updated_at           TEXT NOT NULL
);

-- At most one head per household, even under racing promotions.
CREATE UNIQUE INDEX IF NOT EXISTS residents_single_head
    ON residents(household_id) WHERE relationship_to_head = 'Head';
CREATE INDEX IF NOT EXISTS residents_household_idx
    ON residents(household_id, created_at, resident_id);
CREATE INDEX IF NOT EXISTS residents_name_idx ON residents(last_name, first_name);

CREATE TABLE IF NOT EXISTS blotters (
    blotter_id          TEXT PRIMARY KEY,
    complainant_id      TEXT,
    complainant_name    TEXT,
    respondent_id       TEXT,
    respondent_name     TEXT,
    incident_date       TEXT NOT NULL,
    incident_time       TEXT,
    location            TEXT,
    nature_of_complaint TEXT NOT NULL,
    description         TEXT,
    action_taken        TEXT,
    remarks             TEXT,
    attachments         TEXT NOT NULL DEFAULT '[]',
    status              TEXT NOT NULL,
    status_history      TEXT NOT NULL DEFAULT '[]',
    approval_status     TEXT NOT NULL DEFAULT 'pending',
    decided_by          TEXT,
    decided_at          TEXT,
    approval_remarks    TEXT,
    case_handler        TEXT,
    is_public           INTEGER NOT NULL DEFAULT 0,
    created_by          TEXT,
    updated_by          TEXT,
    created_at          TEXT NOT NULL,
    updated_at          TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS blotters_incident_idx ON blotters(incident_date, created_at);

CREATE TABLE IF NOT EXISTS document_requests (
    request_id   TEXT PRIMARY KEY,
    resident_id  TEXT NOT NULL,
    doc_type     TEXT NOT NULL,
    purpose      TEXT,
    status       TEXT NOT NULL,
    remarks      TEXT,
    issued_by    TEXT,
    issued_at    TEXT,
    qr_code      TEXT,
    claimed_at   TEXT,
    requested_by TEXT,
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS document_requests_resident_idx ON document_requests(resident_id);

CREATE TABLE IF NOT EXISTS users (
    user_id       TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    username      TEXT NOT NULL UNIQUE,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role          TEXT NOT NULL,
    is_approved   INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    token_hash TEXT PRIMARY KEY,   -- sha256 hex of the bearer token
    user_id    TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    created_at TEXT NOT NULL,
    expires_at TEXT NOT NULL
);

-- Append-only. No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS audit_log (
    audit_id    TEXT PRIMARY KEY,
    actor_id    TEXT,
    ip          TEXT,
    action      TEXT NOT NULL,
    entity      TEXT NOT NULL,
    entity_id   TEXT,
    details     TEXT NOT NULL DEFAULT '{}',
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS audit_log_recorded_idx ON audit_log(recorded_at);

CREATE TABLE IF NOT EXISTS announcements (
    announcement_id TEXT PRIMARY KEY,
    title           TEXT NOT NULL,
    content         TEXT NOT NULL,
    image           TEXT,
    posted_by       TEXT,
    published       INTEGER NOT NULL DEFAULT 1,
    visible_to      TEXT NOT NULL DEFAULT 'public',
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

-- Singleton row.
CREATE TABLE IF NOT EXISTS barangay_profile (
    profile_id     INTEGER PRIMARY KEY CHECK (profile_id = 1),
    barangay_name  TEXT NOT NULL,
    logo           TEXT,
    vision         TEXT,
    mission        TEXT,
    address        TEXT,
    contact_number TEXT,
    email          TEXT,
    officials      TEXT NOT NULL DEFAULT '[]',
    settings       TEXT NOT NULL DEFAULT '{}',
    updated_at     TEXT NOT NULL
);

PRAGMA user_version = 1;
";
