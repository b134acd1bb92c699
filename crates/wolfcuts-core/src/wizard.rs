//! The survey wizard as a linear state machine.
//!
//! `welcome → basic → habits → future → final`, with one extra transition
//! from `final` back to `welcome` that starts a fresh survey. Leaving a step
//! requires that step's fields to be filled in; leaving `future` is the
//! moment the survey gets submitted.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
  Error, Result,
  survey::{NewSurvey, is_blank},
};

// ─── Step ────────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Step {
  #[default]
  Welcome,
  Basic,
  Habits,
  Future,
  Final,
}

impl Step {
  /// The step that follows this one in the linear flow.
  pub fn next(self) -> Option<Step> {
    match self {
      Self::Welcome => Some(Self::Basic),
      Self::Basic => Some(Self::Habits),
      Self::Habits => Some(Self::Future),
      Self::Future => Some(Self::Final),
      Self::Final => None,
    }
  }

  /// Wire names of the fields that must be filled before leaving this step.
  pub fn required_fields(self) -> &'static [&'static str] {
    match self {
      Self::Welcome | Self::Final => &[],
      Self::Basic => &["name", "phone"],
      Self::Habits => &["frequency", "favoriteProduct", "averageSpend"],
      Self::Future => &["switchReason", "promoConsent"],
    }
  }
}

// ─── Wizard ──────────────────────────────────────────────────────────────────

/// Current step plus the answers collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wizard {
  step: Step,
  form: NewSurvey,
}

impl Wizard {
  pub fn new() -> Self { Self::default() }

  pub fn step(&self) -> Step { self.step }

  pub fn form(&self) -> &NewSurvey { &self.form }

  pub fn form_mut(&mut self) -> &mut NewSurvey { &mut self.form }

  /// Required fields of the current step that are still blank.
  pub fn missing(&self) -> Vec<&'static str> {
    let required = self.step.required_fields();
    self
      .form
      .required_fields()
      .into_iter()
      .filter(|(field, value)| required.contains(field) && is_blank(*value))
      .map(|(field, _)| field)
      .collect()
  }

  pub fn can_advance(&self) -> bool { self.step.next().is_some() && self.missing().is_empty() }

  /// Move to `target`.
  ///
  /// Allowed moves are the next step in the flow, once the current step's
  /// fields are filled, and `final → welcome`, which also clears the form.
  pub fn advance_to(&mut self, target: Step) -> Result<Step> {
    if self.step == Step::Final && target == Step::Welcome {
      self.restart();
      return Ok(self.step);
    }

    if self.step.next() != Some(target) {
      return Err(Error::InvalidTransition { from: self.step, to: target });
    }

    let missing = self.missing();
    if !missing.is_empty() {
      return Err(Error::Incomplete(missing));
    }

    self.step = target;
    Ok(self.step)
  }

  /// Back to `welcome` with an empty form.
  pub fn restart(&mut self) { *self = Self::default(); }

  /// Upsell nudge shown while the `200to400` bracket is selected.
  pub fn spend_hint(&self) -> Option<&'static str> {
    (self.form.average_spend.as_deref() == Some("200to400")).then_some(
      "🔥 Nuestros clientes más frecuentes aprovechan el descuento desde $400.",
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn filled_through(step: Step) -> Wizard {
    let mut w = Wizard::new();
    w.advance_to(Step::Basic).unwrap();
    if step == Step::Basic {
      return w;
    }
    w.form_mut().name = Some("Ana".into());
    w.form_mut().phone = Some("5512345678".into());
    w.advance_to(Step::Habits).unwrap();
    if step == Step::Habits {
      return w;
    }
    w.form_mut().frequency = Some("Cada semana".into());
    w.form_mut().favorite_product = Some("Arrachera".into());
    w.form_mut().average_spend = Some("over800".into());
    w.advance_to(Step::Future).unwrap();
    if step == Step::Future {
      return w;
    }
    w.form_mut().switch_reason = Some("Mejor calidad".into());
    w.form_mut().promo_consent = Some("all".into());
    w.advance_to(Step::Final).unwrap();
    w
  }

  #[test]
  fn linear_progression() {
    let w = filled_through(Step::Final);
    assert_eq!(w.step(), Step::Final);
    assert!(w.form().missing_fields().is_empty());
    assert!(!w.can_advance());
  }

  #[test]
  fn basic_requires_name_and_phone() {
    let mut w = filled_through(Step::Basic);
    w.form_mut().name = Some("Ana".into());

    let err = w.advance_to(Step::Habits).unwrap_err();
    assert!(matches!(err, Error::Incomplete(ref m) if m == &["phone"]));
    assert_eq!(w.step(), Step::Basic);
  }

  #[test]
  fn whitespace_counts_as_an_answer() {
    let mut w = filled_through(Step::Basic);
    w.form_mut().name = Some("  ".into());
    w.form_mut().phone = Some(" ".into());
    assert!(w.can_advance());
    assert_eq!(w.advance_to(Step::Habits).unwrap(), Step::Habits);
  }

  #[test]
  fn cannot_skip_steps() {
    let mut w = Wizard::new();
    let err = w.advance_to(Step::Habits).unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidTransition { from: Step::Welcome, to: Step::Habits }
    ));
  }

  #[test]
  fn cannot_go_back_mid_flow() {
    let mut w = filled_through(Step::Habits);
    assert!(w.advance_to(Step::Welcome).is_err());
    assert!(w.advance_to(Step::Basic).is_err());
  }

  #[test]
  fn restart_clears_form() {
    let mut w = filled_through(Step::Final);
    assert_eq!(w.advance_to(Step::Welcome).unwrap(), Step::Welcome);
    assert_eq!(w.form(), &NewSurvey::default());
  }

  #[test]
  fn hint_only_for_middle_low_bracket() {
    let mut w = filled_through(Step::Habits);
    assert_eq!(w.spend_hint(), None);
    w.form_mut().average_spend = Some("200to400".into());
    assert!(w.spend_hint().is_some());
  }

  #[test]
  fn step_labels() {
    assert_eq!(Step::Future.to_string(), "future");
    assert_eq!("final".parse::<Step>().unwrap(), Step::Final);
  }
}
