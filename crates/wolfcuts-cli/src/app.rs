//! Drives the survey wizard through terminal prompts.

use std::io::{BufRead, Write};

use anyhow::Result;
use strum::{EnumMessage, IntoEnumIterator};
use wolfcuts_core::{
  coupon::Coupon,
  segment::{Segment, SpendBracket},
  survey::{FavoriteProduct, Frequency, PromoConsent, SwitchReason},
  wizard::{Step, Wizard},
};

use crate::prompt::{Choice, Prompter};

// ─── Choices ──────────────────────────────────────────────────────────────────

fn plain_choices<E: IntoEnumIterator + AsRef<str>>() -> Vec<Choice> {
  E::iter().map(|e| Choice::plain(e.as_ref())).collect()
}

fn labelled_choices<E: IntoEnumIterator + AsRef<str> + EnumMessage>() -> Vec<Choice> {
  E::iter()
    .map(|e| Choice::new(e.as_ref(), e.get_message().unwrap_or(e.as_ref())))
    .collect()
}

// ─── Steps ────────────────────────────────────────────────────────────────────

/// Ask the questions belonging to `wizard`'s current step.
pub fn ask<R: BufRead, W: Write>(wizard: &mut Wizard, p: &mut Prompter<R, W>) -> Result<()> {
  match wizard.step() {
    Step::Welcome => {
      p.say("SuKarNeppo'S · Wolf Cuts · Born to Provide")?;
      p.say("¿Listo para la mejor carne de tu vida?")?;
      p.say("Ayúdanos a mejorar y llévate un beneficio exclusivo para nuestra reapertura.")?;
    }
    Step::Basic => {
      p.say("\n01 / Datos básicos")?;
      wizard.form_mut().name = Some(p.text("¿Cómo te llamas?")?);
      wizard.form_mut().phone = Some(p.text("¿Cuál es tu WhatsApp?")?);
    }
    Step::Habits => {
      p.say("\n02 / Hábitos de compra")?;
      wizard.form_mut().frequency =
        Some(p.choose("¿Cada cuánto compras carne?", &plain_choices::<Frequency>())?);
      wizard.form_mut().favorite_product = Some(p.choose(
        "¿Qué producto es el rey en tu mesa?",
        &plain_choices::<FavoriteProduct>(),
      )?);
      wizard.form_mut().average_spend = Some(p.choose(
        "Cuando compras para la familia, normalmente tu compra es de:",
        &labelled_choices::<SpendBracket>(),
      )?);
      if let Some(hint) = wizard.spend_hint() {
        p.say(hint)?;
      }
    }
    Step::Future => {
      p.say("\n03 / Preferencias futuras")?;
      wizard.form_mut().pickup_interest = p.confirm("¿Pedir por WhatsApp y solo recoger?")?;
      wizard.form_mut().delivery_interest = p.confirm("¿Servicio a domicilio?")?;
      wizard.form_mut().switch_reason = Some(p.choose(
        "¿Qué te haría ser cliente fiel de SuKarNeppo'S?",
        &plain_choices::<SwitchReason>(),
      )?);
      wizard.form_mut().promo_consent = Some(p.choose(
        "¿Quieres recibir descuentos exclusivos que no publicamos en redes?",
        &labelled_choices::<PromoConsent>(),
      )?);
    }
    Step::Final => {}
  }
  Ok(())
}

/// Walk the wizard from its current step up to the point of submission.
///
/// Returns with the wizard on [`Step::Future`] and every required field
/// filled.
pub fn collect<R: BufRead, W: Write>(wizard: &mut Wizard, p: &mut Prompter<R, W>) -> Result<()> {
  loop {
    ask(wizard, p)?;
    if matches!(wizard.step(), Step::Future | Step::Final) {
      return Ok(());
    }
    if !wizard.can_advance() {
      p.say(&format!("  falta: {}", wizard.missing().join(", ")))?;
      continue;
    }
    if let Some(next) = wizard.step().next() {
      wizard.advance_to(next)?;
    }
  }
}

/// Print the thank-you screen.
pub fn show_reward<R: BufRead, W: Write>(
  p: &mut Prompter<R, W>,
  segment: Segment,
  coupon: &Coupon,
) -> Result<()> {
  tracing::debug!(%segment, "survey accepted");
  p.say("\n¡Gracias por el apoyo, patrón!")?;
  p.say("Tu opinión es oro para nosotros. Aquí tienes tu recompensa:")?;
  p.say(&format!("  CUPÓN DIGITAL: {}", coupon.code))?;
  p.say(&format!(
    "  ${} DE DESCUENTO en compras mayores a ${}",
    coupon.discount, coupon.minimum_purchase
  ))?;
  p.say(&format!("  Escríbenos por WhatsApp: {}", coupon.whatsapp_link()))?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use wolfcuts_core::survey::NewSurvey;

  #[test]
  fn collect_fills_every_field() {
    // name, phone, frequency 2, product 4, spend 4, pickup yes, delivery no,
    // reason 2, consent 1
    let input = "Ana\n5512345678\n2\n4\n4\ns\nn\n2\n1\n";
    let mut p = Prompter::new(input.as_bytes(), Vec::new());
    let mut wizard = Wizard::new();

    collect(&mut wizard, &mut p).unwrap();

    assert_eq!(wizard.step(), Step::Future);
    assert!(wizard.missing().is_empty());
    assert_eq!(
      wizard.form(),
      &NewSurvey {
        name:              Some("Ana".into()),
        phone:             Some("5512345678".into()),
        frequency:         Some("Cada 15 días".into()),
        favorite_product:  Some("Arrachera".into()),
        average_spend:     Some("over800".into()),
        pickup_interest:   true,
        delivery_interest: false,
        switch_reason:     Some("Mejor calidad".into()),
        promo_consent:     Some("all".into()),
      }
    );
    assert_eq!(wizard.form().segment(), Segment::High);
  }

  #[test]
  fn middle_bracket_shows_hint() {
    let input = "Ana\n55\n1\n1\n2\n\n\n1\n3\n";
    let mut p = Prompter::new(input.as_bytes(), Vec::new());
    let mut wizard = Wizard::new();

    collect(&mut wizard, &mut p).unwrap();

    assert_eq!(wizard.form().average_spend.as_deref(), Some("200to400"));
    assert_eq!(wizard.form().promo_consent.as_deref(), Some("none"));
    let out = String::from_utf8(p.into_output()).unwrap();
    assert!(out.contains("desde $400"));
    assert!(out.contains("Más de $800"));
  }

  #[test]
  fn reward_mentions_coupon() {
    let mut p = Prompter::new(&b""[..], Vec::new());
    show_reward(&mut p, Segment::Low, &Coupon::default()).unwrap();
    let out = String::from_utf8(p.into_output()).unwrap();
    assert!(out.contains("PRIMERBISTEC"));
    assert!(out.contains("$50 DE DESCUENTO"));
    assert!(out.contains("https://wa.me/"));
  }
}
