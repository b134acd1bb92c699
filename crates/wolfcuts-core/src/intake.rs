//! The intake operations: record a survey and report aggregate statistics.
//!
//! Both take the store as an explicit argument. Store errors are passed
//! through unchanged; nothing is retried or queued.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  segment::Segment,
  store::{SegmentCount, SurveyStore},
  survey::{NewSurvey, SurveyRecord, SurveyResponse},
};

// ─── Policy ──────────────────────────────────────────────────────────────────

/// Server-side acceptance rules for submissions.
///
/// By default the intake trusts the client to enforce required fields and
/// stores whatever it receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyPolicy {
  /// Reject submissions with absent or blank required fields.
  #[serde(default)]
  pub require_complete: bool,
}

impl SurveyPolicy {
  pub fn check(&self, survey: &NewSurvey) -> Result<()> {
    if !self.require_complete {
      return Ok(());
    }
    let missing = survey.missing_fields();
    if missing.is_empty() {
      Ok(())
    } else {
      Err(Error::Incomplete(missing))
    }
  }
}

// ─── Submit ──────────────────────────────────────────────────────────────────

/// Outcome of a successful [`submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
  pub segment:  Segment,
  pub response: SurveyResponse,
}

/// Derive the segment for `survey` and append it to `store` as one row.
pub async fn submit<S>(store: &S, survey: NewSurvey) -> Result<Submission, S::Error>
where
  S: SurveyStore,
{
  let record = SurveyRecord::new(survey);
  let response = store.insert(record).await?;
  Ok(Submission { segment: response.segment, response })
}

// ─── Stats ───────────────────────────────────────────────────────────────────

/// Aggregate counts over all stored responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyStats {
  pub total:    u64,
  pub segments: Vec<SegmentCount>,
}

impl SurveyStats {
  /// Count for one segment; zero if the segment has no rows.
  pub fn count_for(&self, segment: Segment) -> u64 {
    self
      .segments
      .iter()
      .find(|c| c.segment == segment)
      .map_or(0, |c| c.count)
  }
}

/// Read the total and the per-segment breakdown.
///
/// The two reads are separate; a write landing between them can make the
/// breakdown disagree with the total by that row.
pub async fn stats<S>(store: &S) -> Result<SurveyStats, S::Error>
where
  S: SurveyStore,
{
  let total = store.count().await?;
  let segments = store.segment_counts().await?;
  Ok(SurveyStats { total, segments })
}
