//! [`MemoryStore`]: an in-process [`SurveyStore`] for tests and demos.

use std::{
  collections::BTreeMap,
  sync::{Mutex, MutexGuard, PoisonError},
};

use chrono::Utc;

use crate::{
  Error, Result,
  segment::Segment,
  store::{SegmentCount, SurveyStore},
  survey::{SurveyRecord, SurveyResponse},
};

#[derive(Debug, Default)]
struct Inner {
  rows:        Vec<SurveyResponse>,
  fail_writes: bool,
  fail_reads:  bool,
}

/// A survey store held in a mutex-guarded vector.
///
/// Writes and reads can be switched to fail with
/// [`Error::StoreUnavailable`] to exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
  inner: Mutex<Inner>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Make subsequent inserts fail (or succeed again).
  pub fn fail_writes(&self, fail: bool) {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner).fail_writes = fail;
  }

  /// Make subsequent reads fail (or succeed again).
  pub fn fail_reads(&self, fail: bool) {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner).fail_reads = fail;
  }

  fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
    self.inner.lock().map_err(|_| Error::Poisoned)
  }

  fn read(&self) -> Result<MutexGuard<'_, Inner>> {
    let inner = self.lock()?;
    if inner.fail_reads {
      return Err(Error::StoreUnavailable);
    }
    Ok(inner)
  }
}

impl SurveyStore for MemoryStore {
  type Error = Error;

  async fn insert(&self, record: SurveyRecord) -> Result<SurveyResponse> {
    let mut inner = self.lock()?;
    if inner.fail_writes {
      return Err(Error::StoreUnavailable);
    }

    let (survey, segment) = record.into_parts();
    let response = SurveyResponse {
      id: inner.rows.len() as i64 + 1,
      survey,
      segment,
      created_at: Utc::now(),
    };
    inner.rows.push(response.clone());
    Ok(response)
  }

  async fn get(&self, id: i64) -> Result<Option<SurveyResponse>> {
    let inner = self.read()?;
    Ok(inner.rows.iter().find(|r| r.id == id).cloned())
  }

  async fn count(&self) -> Result<u64> {
    let inner = self.read()?;
    Ok(inner.rows.len() as u64)
  }

  async fn segment_counts(&self) -> Result<Vec<SegmentCount>> {
    let inner = self.read()?;

    // Keyed by label so the order matches an SQL `ORDER BY segment`.
    let mut counts: BTreeMap<&'static str, (Segment, u64)> = BTreeMap::new();
    for row in &inner.rows {
      let label: &'static str = row.segment.into();
      counts.entry(label).or_insert((row.segment, 0)).1 += 1;
    }

    Ok(
      counts
        .into_values()
        .map(|(segment, count)| SegmentCount { segment, count })
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::survey::NewSurvey;

  fn poison(store: &MemoryStore) {
    let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
      let _guard = store.inner.lock().unwrap();
      panic!("poison the lock");
    }));
    assert!(store.inner.is_poisoned());
  }

  #[tokio::test]
  async fn poisoned_lock_surfaces_on_reads_and_writes() {
    let store = MemoryStore::new();
    poison(&store);

    assert!(matches!(store.count().await, Err(Error::Poisoned)));
    assert!(matches!(
      store.insert(SurveyRecord::new(NewSurvey::default())).await,
      Err(Error::Poisoned)
    ));
  }

  #[test]
  fn failure_switches_apply_through_a_poisoned_lock() {
    let store = MemoryStore::new();
    poison(&store);

    store.fail_writes(true);
    store.fail_reads(true);

    let inner = store.inner.lock().unwrap_or_else(PoisonError::into_inner);
    assert!(inner.fail_writes);
    assert!(inner.fail_reads);
  }
}
