//! Survey payloads and stored responses.
//!
//! The caller-supplied [`NewSurvey`] carries raw strings: the core stores
//! whatever the client sent and only interprets the spend bracket. The closed
//! label sets the wizard offers are exposed as enums for presentation and
//! completeness checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumMessage, EnumString};

use crate::segment::{Segment, segment_for};

// ─── Label sets ──────────────────────────────────────────────────────────────

/// How often the customer buys meat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, EnumIter)]
pub enum Frequency {
  #[strum(serialize = "Cada semana")]
  Weekly,
  #[strum(serialize = "Cada 15 días")]
  Fortnightly,
  #[strum(serialize = "Una vez al mes")]
  Monthly,
  #[strum(serialize = "Ocasional")]
  Occasional,
}

/// The product the customer buys most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, EnumIter)]
pub enum FavoriteProduct {
  Bistec,
  Costilla,
  Molida,
  Arrachera,
  Mixto,
}

/// What would make the customer switch to the shop for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, EnumIter)]
pub enum SwitchReason {
  #[strum(serialize = "Mejor precio")]
  BetterPrice,
  #[strum(serialize = "Mejor calidad")]
  BetterQuality,
  #[strum(serialize = "Servicio rápido")]
  FastService,
  #[strum(serialize = "Promociones")]
  Promotions,
  #[strum(serialize = "Atención personalizada")]
  PersonalAttention,
}

/// Which promotional messages the customer agreed to receive.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, EnumIter, EnumMessage,
)]
pub enum PromoConsent {
  #[strum(serialize = "all", message = "Sí, mándame todo 🔥")]
  All,
  #[strum(serialize = "important", message = "Solo lo importante")]
  Important,
  #[strum(serialize = "none", message = "No")]
  OptOut,
}

// ─── Payload ─────────────────────────────────────────────────────────────────

/// One candidate survey as submitted by a client.
///
/// Every field is optional and no field is type-checked. Text fields keep
/// strings as sent and store numbers or booleans as their text, so a phone
/// sent as `5512345678` is kept; `null` stays `None`. The two interest flags
/// follow JavaScript truthiness, so `null`, `0` and `""` all count as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewSurvey {
  #[serde(deserialize_with = "text")]
  pub name:              Option<String>,
  #[serde(deserialize_with = "text")]
  pub phone:             Option<String>,
  #[serde(deserialize_with = "text")]
  pub frequency:         Option<String>,
  #[serde(deserialize_with = "text")]
  pub favorite_product:  Option<String>,
  #[serde(deserialize_with = "text")]
  pub average_spend:     Option<String>,
  #[serde(deserialize_with = "truthy")]
  pub pickup_interest:   bool,
  #[serde(deserialize_with = "truthy")]
  pub delivery_interest: bool,
  #[serde(deserialize_with = "text")]
  pub switch_reason:     Option<String>,
  #[serde(deserialize_with = "text")]
  pub promo_consent:     Option<String>,
}

impl NewSurvey {
  /// The text fields a complete survey must fill, as `(wire name, value)`.
  pub fn required_fields(&self) -> [(&'static str, Option<&str>); 7] {
    [
      ("name", self.name.as_deref()),
      ("phone", self.phone.as_deref()),
      ("frequency", self.frequency.as_deref()),
      ("favoriteProduct", self.favorite_product.as_deref()),
      ("averageSpend", self.average_spend.as_deref()),
      ("switchReason", self.switch_reason.as_deref()),
      ("promoConsent", self.promo_consent.as_deref()),
    ]
  }

  /// Wire names of required fields that are absent or empty.
  pub fn missing_fields(&self) -> Vec<&'static str> {
    self
      .required_fields()
      .into_iter()
      .filter(|(_, value)| is_blank(*value))
      .map(|(field, _)| field)
      .collect()
  }

  /// The segment this survey would be stored under.
  pub fn segment(&self) -> Segment { segment_for(self.average_spend.as_deref()) }
}

/// Absent or empty. Whitespace counts as an answer, as in the web wizard.
pub(crate) fn is_blank(value: Option<&str>) -> bool { value.is_none_or(str::is_empty) }

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  use serde_json::Value;

  Ok(match Value::deserialize(deserializer)? {
    Value::Null => None,
    Value::String(s) => Some(s),
    Value::Bool(b) => Some(b.to_string()),
    Value::Number(n) => Some(n.to_string()),
    other @ (Value::Array(_) | Value::Object(_)) => Some(other.to_string()),
  })
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
  D: Deserializer<'de>,
{
  use serde_json::Value;

  Ok(match Value::deserialize(deserializer)? {
    Value::Null => false,
    Value::Bool(b) => b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  })
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A survey paired with its derived segment, ready to be written.
///
/// The only way to build one is [`SurveyRecord::new`], so the segment is
/// always the one computed from the payload's spend bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyRecord {
  survey:  NewSurvey,
  segment: Segment,
}

impl SurveyRecord {
  pub fn new(survey: NewSurvey) -> Self {
    let segment = survey.segment();
    Self { survey, segment }
  }

  pub fn segment(&self) -> Segment { self.segment }

  pub fn into_parts(self) -> (NewSurvey, Segment) { (self.survey, self.segment) }
}

// ─── Stored response ─────────────────────────────────────────────────────────

/// A persisted survey row. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
  /// Store-assigned, monotonically increasing.
  pub id:         i64,
  #[serde(flatten)]
  pub survey:     NewSurvey,
  pub segment:    Segment,
  /// Store-assigned at insertion.
  pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserialises_camel_case_with_missing_fields() {
    let survey: NewSurvey = serde_json::from_str(
      r#"{"name":"Ana","favoriteProduct":"Bistec","averageSpend":"over800","pickupInterest":true}"#,
    )
    .unwrap();

    assert_eq!(survey.name.as_deref(), Some("Ana"));
    assert_eq!(survey.favorite_product.as_deref(), Some("Bistec"));
    assert!(survey.pickup_interest);
    assert!(!survey.delivery_interest);
    assert_eq!(survey.phone, None);
    assert_eq!(survey.segment(), Segment::High);
  }

  #[test]
  fn interest_flags_follow_truthiness() {
    let survey: NewSurvey = serde_json::from_str(
      r#"{"pickupInterest":null,"deliveryInterest":1}"#,
    )
    .unwrap();
    assert!(!survey.pickup_interest);
    assert!(survey.delivery_interest);

    let survey: NewSurvey = serde_json::from_str(
      r#"{"pickupInterest":"","deliveryInterest":"yes"}"#,
    )
    .unwrap();
    assert!(!survey.pickup_interest);
    assert!(survey.delivery_interest);
  }

  #[test]
  fn text_fields_accept_any_scalar() {
    let survey: NewSurvey = serde_json::from_str(
      r#"{"name":null,"phone":5512345678,"averageSpend":800,"switchReason":true,"promoConsent":["all"]}"#,
    )
    .unwrap();

    assert_eq!(survey.name, None);
    assert_eq!(survey.phone.as_deref(), Some("5512345678"));
    assert_eq!(survey.average_spend.as_deref(), Some("800"));
    assert_eq!(survey.switch_reason.as_deref(), Some("true"));
    assert_eq!(survey.promo_consent.as_deref(), Some(r#"["all"]"#));
    assert_eq!(survey.segment(), Segment::Medium);
  }

  #[test]
  fn missing_fields_reports_empty_values() {
    let survey = NewSurvey {
      name: Some("Ana".into()),
      phone: Some(String::new()),
      frequency: Some("   ".into()),
      average_spend: Some("under200".into()),
      ..Default::default()
    };
    assert_eq!(
      survey.missing_fields(),
      vec!["phone", "favoriteProduct", "switchReason", "promoConsent"]
    );
  }

  #[test]
  fn record_segment_comes_from_payload() {
    let record = SurveyRecord::new(NewSurvey {
      average_spend: Some("under200".into()),
      ..Default::default()
    });
    assert_eq!(record.segment(), Segment::Low);
  }

  #[test]
  fn label_sets_use_wire_values() {
    assert_eq!(Frequency::Fortnightly.as_ref(), "Cada 15 días");
    assert_eq!("Mixto".parse::<FavoriteProduct>().unwrap(), FavoriteProduct::Mixto);
    assert_eq!(SwitchReason::FastService.to_string(), "Servicio rápido");
    assert_eq!(PromoConsent::OptOut.as_ref(), "none");
  }
}
