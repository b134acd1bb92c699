//! The reward handed out after a completed survey.

use serde::{Deserialize, Serialize};

/// A discount coupon plus the WhatsApp number customers redeem it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Coupon {
  pub code:             String,
  /// Discount in whole pesos.
  pub discount:         u32,
  /// Minimum purchase, in whole pesos, the discount applies to.
  #[serde(alias = "minimum_purchase")]
  pub minimum_purchase: u32,
  /// International number without `+`, as `wa.me` expects it.
  #[serde(alias = "whatsapp_number")]
  pub whatsapp_number:  String,
}

impl Default for Coupon {
  fn default() -> Self {
    Self {
      code:             "PRIMERBISTEC".to_string(),
      discount:         50,
      minimum_purchase: 400,
      whatsapp_number:  "521234567890".to_string(),
    }
  }
}

impl Coupon {
  /// Deep link that opens a WhatsApp chat pre-filled with the coupon code.
  pub fn whatsapp_link(&self) -> String {
    let text = format!(
      "Hola! Acabo de terminar la encuesta de SuKarNeppo'S. Mi cupón es {}",
      self.code
    );
    format!(
      "https://wa.me/{}?text={}",
      self.whatsapp_number,
      text.replace(' ', "%20")
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_link() {
    assert_eq!(
      Coupon::default().whatsapp_link(),
      "https://wa.me/521234567890?text=Hola!%20Acabo%20de%20terminar%20la%20encuesta%20de%20SuKarNeppo'S.%20Mi%20cupón%20es%20PRIMERBISTEC"
    );
  }

  #[test]
  fn partial_config_keeps_defaults() {
    let coupon: Coupon =
      serde_json::from_str(r#"{"code":"ASADO10","whatsapp_number":"525500000000"}"#)
        .unwrap();
    assert_eq!(coupon.code, "ASADO10");
    assert_eq!(coupon.whatsapp_number, "525500000000");
    assert_eq!(coupon.discount, 50);
    assert_eq!(coupon.minimum_purchase, 400);
  }
}
