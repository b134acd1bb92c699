//! JSON API for the Wolf Cuts survey intake.
//!
//! Exposes an axum [`Router`] backed by any
//! [`wolfcuts_core::store::SurveyStore`]. Static assets, TLS and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", wolfcuts_api::api_router(state))
//! ```

pub mod error;
pub mod survey;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use wolfcuts_core::{coupon::Coupon, intake::SurveyPolicy, store::SurveyStore};

pub use error::ApiError;

// ─── State ────────────────────────────────────────────────────────────────────

/// Shared state threaded through the API handlers.
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub policy: SurveyPolicy,
  pub coupon: Arc<Coupon>,
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      policy: SurveyPolicy::default(),
      coupon: Arc::new(Coupon::default()),
    }
  }
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      policy: self.policy,
      coupon: Arc::clone(&self.coupon),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: SurveyStore + 'static,
{
  Router::new()
    .route("/survey", post(survey::submit::<S>))
    .route("/stats", get(survey::stats::<S>))
    .route("/coupon", get(survey::coupon::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
