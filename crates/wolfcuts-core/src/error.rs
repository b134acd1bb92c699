//! Error types for `wolfcuts-core`.

use thiserror::Error;

use crate::wizard::Step;

#[derive(Debug, Error)]
pub enum Error {
  #[error("survey is incomplete, missing: {}", .0.join(", "))]
  Incomplete(Vec<&'static str>),

  #[error("cannot move from step {from} to step {to}")]
  InvalidTransition { from: Step, to: Step },

  #[error("unknown segment label: {0:?}")]
  UnknownSegment(String),

  #[error("in-memory store is unavailable")]
  StoreUnavailable,

  #[error("in-memory store lock poisoned")]
  Poisoned,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
