//! Handlers for the survey endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/survey` | Body: `{"customer": NewSurvey}`; returns segment + coupon |
//! | `GET`  | `/stats` | Total and per-segment counts |
//! | `GET`  | `/coupon` | The reward shown after submitting |

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use wolfcuts_core::{
  Error as CoreError,
  coupon::Coupon,
  intake::{self, SurveyStats},
  segment::Segment,
  store::SurveyStore,
  survey::NewSurvey,
};

use crate::{ApiState, error::ApiError};

// ─── Submit ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /survey`.
#[derive(Debug, Deserialize)]
pub struct SubmitBody {
  pub customer: NewSurvey,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReply {
  pub success: bool,
  pub segment: Segment,
  pub coupon:  CouponReply,
}

/// `POST /survey`
///
/// The row id is not returned; clients only learn their segment.
pub async fn submit<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<SubmitBody>, JsonRejection>,
) -> Result<Json<SubmitReply>, ApiError>
where
  S: SurveyStore,
{
  let Json(body) = body?;

  state.policy.check(&body.customer).map_err(|e| match e {
    CoreError::Incomplete(missing) => ApiError::Incomplete(missing),
    other => ApiError::save(other),
  })?;

  let submission = intake::submit(state.store.as_ref(), body.customer)
    .await
    .map_err(ApiError::save)?;

  tracing::info!(
    id = submission.response.id,
    segment = %submission.segment,
    "survey recorded"
  );

  Ok(Json(SubmitReply {
    success: true,
    segment: submission.segment,
    coupon:  CouponReply::from(state.coupon.as_ref()),
  }))
}

// ─── Stats ────────────────────────────────────────────────────────────────────

/// `GET /stats`
pub async fn stats<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<SurveyStats>, ApiError>
where
  S: SurveyStore,
{
  let stats = intake::stats(state.store.as_ref())
    .await
    .map_err(ApiError::stats)?;
  Ok(Json(stats))
}

// ─── Coupon ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponReply {
  #[serde(flatten)]
  pub coupon:        Coupon,
  pub whatsapp_link: String,
}

impl From<&Coupon> for CouponReply {
  fn from(coupon: &Coupon) -> Self {
    Self {
      whatsapp_link: coupon.whatsapp_link(),
      coupon:        coupon.clone(),
    }
  }
}

/// `GET /coupon`
pub async fn coupon<S>(State(state): State<ApiState<S>>) -> Json<CouponReply>
where
  S: SurveyStore,
{
  Json(CouponReply::from(state.coupon.as_ref()))
}
