//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, booleans are 0/1 integers and segments
//! are their lowercase labels.

use chrono::{DateTime, Utc};
use wolfcuts_core::{
  segment::Segment,
  survey::{NewSurvey, SurveyResponse},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Flags ───────────────────────────────────────────────────────────────────

pub fn encode_flag(b: bool) -> i64 { i64::from(b) }

pub fn decode_flag(i: i64) -> bool { i != 0 }

// ─── Segment ─────────────────────────────────────────────────────────────────

pub fn encode_segment(s: Segment) -> &'static str { s.into() }

pub fn decode_segment(s: &str) -> Result<Segment> {
  s.parse()
    .map_err(|_| wolfcuts_core::Error::UnknownSegment(s.to_owned()).into())
}

pub fn decode_count(n: i64) -> Result<u64> { u64::try_from(n).map_err(|_| Error::Count(n)) }

// ─── Raw row ─────────────────────────────────────────────────────────────────

/// Column list matching [`RawSurvey::from_row`].
pub const SURVEY_COLUMNS: &str = "id, name, phone, frequency, favorite_product, \
  average_spend, pickup_interest, delivery_interest, switch_reason, \
  promo_consent, segment, created_at";

/// A `surveys` row as read from SQLite, before decoding.
pub struct RawSurvey {
  pub id:                i64,
  pub name:              Option<String>,
  pub phone:             Option<String>,
  pub frequency:         Option<String>,
  pub favorite_product:  Option<String>,
  pub average_spend:     Option<String>,
  pub pickup_interest:   i64,
  pub delivery_interest: i64,
  pub switch_reason:     Option<String>,
  pub promo_consent:     Option<String>,
  pub segment:           String,
  pub created_at:        String,
}

impl RawSurvey {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      name:              row.get(1)?,
      phone:             row.get(2)?,
      frequency:         row.get(3)?,
      favorite_product:  row.get(4)?,
      average_spend:     row.get(5)?,
      pickup_interest:   row.get(6)?,
      delivery_interest: row.get(7)?,
      switch_reason:     row.get(8)?,
      promo_consent:     row.get(9)?,
      segment:           row.get(10)?,
      created_at:        row.get(11)?,
    })
  }

  pub fn into_response(self) -> Result<SurveyResponse> {
    Ok(SurveyResponse {
      id:         self.id,
      survey:     NewSurvey {
        name:              self.name,
        phone:             self.phone,
        frequency:         self.frequency,
        favorite_product:  self.favorite_product,
        average_spend:     self.average_spend,
        pickup_interest:   decode_flag(self.pickup_interest),
        delivery_interest: decode_flag(self.delivery_interest),
        switch_reason:     self.switch_reason,
        promo_consent:     self.promo_consent,
      },
      segment:    decode_segment(&self.segment)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
