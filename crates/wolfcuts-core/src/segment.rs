//! Customer segmentation.
//!
//! A segment is a coarse customer-value tier derived from the self-reported
//! spend bracket. It is computed once, when a survey is written, and never
//! recomputed afterwards.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

// ─── Segment ─────────────────────────────────────────────────────────────────

/// Derived customer-value tier.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  IntoStaticStr,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Segment {
  Low,
  Medium,
  High,
}

// ─── Spend bracket ───────────────────────────────────────────────────────────

/// The four self-reported purchase ranges offered by the survey.
///
/// The wire identifiers are the exact strings the segmentation rule compares
/// against; the message is the label shown to customers.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  EnumIter,
  EnumMessage,
)]
pub enum SpendBracket {
  #[serde(rename = "under200")]
  #[strum(serialize = "under200", message = "Menos de $200")]
  Under200,
  #[serde(rename = "200to400")]
  #[strum(serialize = "200to400", message = "$200 – $400")]
  From200To400,
  #[serde(rename = "400to800")]
  #[strum(serialize = "400to800", message = "$400 – $800")]
  From400To800,
  #[serde(rename = "over800")]
  #[strum(serialize = "over800", message = "Más de $800")]
  Over800,
}

impl SpendBracket {
  pub fn segment(self) -> Segment {
    match self {
      Self::Over800 => Segment::High,
      Self::Under200 => Segment::Low,
      Self::From200To400 | Self::From400To800 => Segment::Medium,
    }
  }
}

/// Map a raw spend-bracket value to its segment.
///
/// Total over every input: `over800` is `high`, `under200` is `low`, and
/// everything else (the two middle brackets, unrecognised text, the empty
/// string, or no value at all) is `medium`. Matching is exact and
/// case-sensitive.
pub fn segment_for(average_spend: Option<&str>) -> Segment {
  average_spend
    .and_then(|raw| raw.parse::<SpendBracket>().ok())
    .map_or(Segment::Medium, SpendBracket::segment)
}
