//! SQL schema for the survey store.
//!
//! Executed on every open. There is no migration path; `user_version` only
//! records which layout created the file.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Append-only: no UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS surveys (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    name              TEXT,
    phone             TEXT,
    frequency         TEXT,
    favorite_product  TEXT,
    average_spend     TEXT,
    pickup_interest   INTEGER NOT NULL DEFAULT 0,  -- 0 | 1
    delivery_interest INTEGER NOT NULL DEFAULT 0,  -- 0 | 1
    switch_reason     TEXT,
    promo_consent     TEXT,
    segment           TEXT NOT NULL,               -- 'low' | 'medium' | 'high'
    created_at        TEXT NOT NULL                -- RFC 3339 UTC; store-assigned
);

CREATE INDEX IF NOT EXISTS surveys_segment_idx ON surveys(segment);

PRAGMA user_version = 1;
";
