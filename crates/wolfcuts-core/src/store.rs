//! The `SurveyStore` trait and supporting aggregate types.
//!
//! The trait is implemented by storage backends (e.g. `wolfcuts-store-sqlite`
//! and the in-memory [`MemoryStore`](crate::memory::MemoryStore)). Higher
//! layers depend on this abstraction and receive a store explicitly; there is
//! no process-wide handle.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  segment::Segment,
  survey::{SurveyRecord, SurveyResponse},
};

// ─── Aggregates ──────────────────────────────────────────────────────────────

/// Number of stored responses in one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentCount {
  pub segment: Segment,
  pub count:   u64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a survey store backend.
///
/// The store is append-only: responses are inserted and read, never updated
/// or deleted. Each call is an independent unit of work.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait SurveyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist one response. The store assigns `id` and `created_at`; the
  /// interest flags are stored as 0/1. Either the whole row is written or
  /// nothing is.
  fn insert(
    &self,
    record: SurveyRecord,
  ) -> impl Future<Output = Result<SurveyResponse, Self::Error>> + Send + '_;

  /// Retrieve a response by id. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<SurveyResponse>, Self::Error>> + Send + '_;

  /// Total number of stored responses.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Per-segment counts, ordered by segment label. Segments without rows are
  /// omitted.
  fn segment_counts(
    &self,
  ) -> impl Future<Output = Result<Vec<SegmentCount>, Self::Error>> + Send + '_;
}
