//! Payment kinds and payment validation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use core_kernel::Money;

use crate::error::ReceiptError;

/// The tender type of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    /// Physical cash
    Cash,
    /// Card or other non-cash tender
    Cashless,
}

impl PaymentKind {
    /// Stable wire/storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentKind::Cash => "cash",
            PaymentKind::Cashless => "cashless",
        }
    }

    /// Localized label printed on the text receipt
    pub fn receipt_label(&self) -> &'static str {
        match self {
            PaymentKind::Cash => "Готівка",
            PaymentKind::Cashless => "Картка",
        }
    }
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raised when a stored or submitted payment kind is not recognized
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment kind: {0}")]
pub struct UnknownPaymentKind(pub String);

impl FromStr for PaymentKind {
    type Err = UnknownPaymentKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentKind::Cash),
            "cashless" => Ok(PaymentKind::Cashless),
            other => Err(UnknownPaymentKind(other.to_string())),
        }
    }
}

/// A payment as submitted by the client, not yet validated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    /// Tender type; serialized as `type` on the wire
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    /// Amount tendered, arbitrary scale
    pub amount: Decimal,
}

impl PaymentInput {
    pub fn new(kind: PaymentKind, amount: Decimal) -> Self {
        Self { kind, amount }
    }
}

/// A validated payment with a normalized amount
///
/// Exists only within a request; the receipt stores its kind and amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payment {
    kind: PaymentKind,
    amount: Money,
}

impl Payment {
    /// Validates a candidate payment
    ///
    /// # Errors
    ///
    /// Returns `ReceiptError::Validation` if the amount is not strictly
    /// positive.
    pub fn validate(input: &PaymentInput) -> Result<Self, ReceiptError> {
        if input.amount <= Decimal::ZERO {
            return Err(ReceiptError::validation(format!(
                "payment amount must be positive, got {}",
                input.amount
            )));
        }

        Ok(Self {
            kind: input.kind,
            amount: Money::new(input.amount),
        })
    }

    /// Checks that the payment covers the computed total
    ///
    /// When this passes, `amount - total` is always ≥ 0.
    ///
    /// # Errors
    ///
    /// Returns `ReceiptError::Validation` if the amount is below the total.
    pub fn ensure_covers(&self, total: Money) -> Result<(), ReceiptError> {
        if self.amount < total {
            return Err(ReceiptError::validation(
                "payment amount cannot be less than total",
            ));
        }
        Ok(())
    }

    pub fn kind(&self) -> PaymentKind {
        self.kind
    }

    /// Amount tendered, rounded to 2 decimal places
    pub fn amount(&self) -> Money {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn valid_payment_normalizes_amount() {
        let payment = Payment::validate(&PaymentInput::new(PaymentKind::Cash, dec!(50.005))).unwrap();
        assert_eq!(payment.amount(), Money::new(dec!(50.00)));
        assert_eq!(payment.kind(), PaymentKind::Cash);
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        assert!(Payment::validate(&PaymentInput::new(PaymentKind::Cash, dec!(0)))
            .unwrap_err()
            .is_validation());
        assert!(Payment::validate(&PaymentInput::new(PaymentKind::Cashless, dec!(-5)))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn payment_below_total_is_rejected() {
        let payment = Payment::validate(&PaymentInput::new(PaymentKind::Cash, dec!(30.00))).unwrap();
        let error = payment.ensure_covers(Money::new(dec!(40.00))).unwrap_err();
        assert!(error.to_string().contains("cannot be less than total"));
    }

    #[test]
    fn payment_equal_to_total_passes() {
        let payment = Payment::validate(&PaymentInput::new(PaymentKind::Cash, dec!(2700.00))).unwrap();
        assert!(payment.ensure_covers(Money::new(dec!(2700.00))).is_ok());
    }

    #[test]
    fn kind_round_trips_through_text() {
        assert_eq!("cash".parse::<PaymentKind>().unwrap(), PaymentKind::Cash);
        assert_eq!("cashless".parse::<PaymentKind>().unwrap(), PaymentKind::Cashless);
        assert!("card".parse::<PaymentKind>().is_err());
    }

    #[test]
    fn input_uses_type_field_on_the_wire() {
        let input: PaymentInput =
            serde_json::from_str(r#"{"type":"cash","amount":1516610.00}"#).unwrap();
        assert_eq!(input.kind, PaymentKind::Cash);
        assert_eq!(input.amount, dec!(1516610.00));

        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"type\":\"cash\""));
    }

    #[test]
    fn receipt_labels_are_localized() {
        assert_eq!(PaymentKind::Cash.receipt_label(), "Готівка");
        assert_eq!(PaymentKind::Cashless.receipt_label(), "Картка");
    }
}
