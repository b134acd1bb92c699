//! Async HTTP client wrapping the survey JSON API.

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use wolfcuts_core::{coupon::Coupon, intake::SurveyStats, segment::Segment, survey::NewSurvey};

/// Connection settings for the survey API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Reply to a successful `POST /api/survey`.
#[derive(Debug, Deserialize)]
pub struct SubmitReply {
  pub success: bool,
  pub segment: Segment,
  pub coupon:  Coupon,
}

/// Async HTTP client for the survey API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// `POST /api/survey`
  pub async fn submit(&self, survey: &NewSurvey) -> Result<SubmitReply> {
    tracing::debug!(url = %self.url("/survey"), "submitting survey");
    let resp = self
      .client
      .post(self.url("/survey"))
      .json(&json!({ "customer": survey }))
      .send()
      .await
      .context("POST /survey failed")?;

    let resp = check("POST /survey", resp).await?;
    let reply: SubmitReply = resp.json().await.context("deserialising survey reply")?;
    if !reply.success {
      return Err(anyhow!("POST /survey → server did not accept the survey"));
    }
    Ok(reply)
  }

  /// `GET /api/stats`
  pub async fn stats(&self) -> Result<SurveyStats> {
    let resp = self
      .client
      .get(self.url("/stats"))
      .send()
      .await
      .context("GET /stats failed")?;

    let resp = check("GET /stats", resp).await?;
    resp.json().await.context("deserialising stats")
  }
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn check(what: &str, resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }

  #[derive(Deserialize)]
  struct ErrorBody {
    error: String,
  }

  match resp.json::<ErrorBody>().await {
    Ok(body) => Err(anyhow!("{what} → {status}: {}", body.error)),
    Err(_) => Err(anyhow!("{what} → {status}")),
  }
}
