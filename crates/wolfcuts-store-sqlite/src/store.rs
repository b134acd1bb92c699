//! [`SqliteStore`]: the SQLite implementation of [`SurveyStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use wolfcuts_core::{
  store::{SegmentCount, SurveyStore},
  survey::{SurveyRecord, SurveyResponse},
};

use crate::{
  Result,
  encode::{
    RawSurvey, SURVEY_COLUMNS, decode_count, decode_segment, encode_dt, encode_flag,
    encode_segment,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A survey store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  pub(crate) async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SurveyStore impl ────────────────────────────────────────────────────────

impl SurveyStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, record: SurveyRecord) -> Result<SurveyResponse> {
    let (survey, segment) = record.into_parts();
    let created_at = Utc::now();

    let name              = survey.name.clone();
    let phone             = survey.phone.clone();
    let frequency         = survey.frequency.clone();
    let favorite_product  = survey.favorite_product.clone();
    let average_spend     = survey.average_spend.clone();
    let pickup_interest   = encode_flag(survey.pickup_interest);
    let delivery_interest = encode_flag(survey.delivery_interest);
    let switch_reason     = survey.switch_reason.clone();
    let promo_consent     = survey.promo_consent.clone();
    let segment_str       = encode_segment(segment);
    let created_at_str    = encode_dt(created_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO surveys (
             name, phone, frequency, favorite_product, average_spend,
             pickup_interest, delivery_interest, switch_reason, promo_consent,
             segment, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            name,
            phone,
            frequency,
            favorite_product,
            average_spend,
            pickup_interest,
            delivery_interest,
            switch_reason,
            promo_consent,
            segment_str,
            created_at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(id, %segment, "survey row inserted");

    Ok(SurveyResponse { id, survey, segment, created_at })
  }

  async fn get(&self, id: i64) -> Result<Option<SurveyResponse>> {
    let raw: Option<RawSurvey> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {SURVEY_COLUMNS} FROM surveys WHERE id = ?1"),
            rusqlite::params![id],
            RawSurvey::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSurvey::into_response).transpose()
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM surveys", [], |r| r.get(0))?))
      .await?;
    decode_count(n)
  }

  async fn segment_counts(&self) -> Result<Vec<SegmentCount>> {
    let raws: Vec<(String, i64)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT segment, COUNT(*) FROM surveys GROUP BY segment ORDER BY segment",
        )?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|(segment, count)| {
        Ok(SegmentCount {
          segment: decode_segment(&segment)?,
          count:   decode_count(count)?,
        })
      })
      .collect()
  }
}
