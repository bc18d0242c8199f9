//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- The implicit rowid preserves insertion order for unsorted reads.
CREATE TABLE IF NOT EXISTS contacts (
    contact_id            TEXT PRIMARY KEY,
    external_id           INTEGER,
    name                  TEXT,
    name_folded           TEXT,            -- lower-cased copy of name for search
    title                 TEXT,
    level                 TEXT,
    company               TEXT,
    company_folded        TEXT,            -- lower-cased copy of company for search
    email                 TEXT,            -- always lower-case
    phone                 TEXT,
    linkedin              TEXT,
    photo                 TEXT,
    unlocked              INTEGER NOT NULL DEFAULT 0,
    unlocked_company      INTEGER NOT NULL DEFAULT 0,
    email_check_status    TEXT,
    linkedin_check_status TEXT,
    email_check_date      TEXT,            -- RFC 3339 UTC
    linkedin_check_date   TEXT,            -- RFC 3339 UTC
    created_at            TEXT NOT NULL,   -- RFC 3339 UTC; server-assigned
    updated_at            TEXT NOT NULL    -- RFC 3339 UTC; bumped on update
);

CREATE INDEX IF NOT EXISTS contacts_external_id_idx ON contacts(external_id);
CREATE INDEX IF NOT EXISTS contacts_name_idx        ON contacts(name_folded);
CREATE INDEX IF NOT EXISTS contacts_company_idx     ON contacts(company_folded);
CREATE INDEX IF NOT EXISTS contacts_email_idx       ON contacts(email);

PRAGMA user_version = 1;
";

/// Columns selected for every read, in [`crate::encode::RawContact`] order.
pub const CONTACT_COLUMNS: &str = "
    contact_id, external_id, name, title, level, company, email, phone,
    linkedin, photo, unlocked, unlocked_company, email_check_status,
    linkedin_check_status, email_check_date, linkedin_check_date,
    created_at, updated_at";
