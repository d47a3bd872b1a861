//! Line item validation
//!
//! A line item arrives from the client as a raw name/price/quantity triple
//! and must pass validation before it can take part in any calculation:
//!
//! - the name must be non-empty,
//! - the unit price must be strictly positive,
//! - the quantity must be strictly positive.
//!
//! On success the unit price is normalized to 2 fractional digits with
//! round-half-to-even; every later computation uses the normalized price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Money;

use crate::error::ReceiptError;

/// A purchased item as submitted by the client, not yet validated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemInput {
    /// Product name
    pub name: String,
    /// Unit price, arbitrary scale
    pub price: Decimal,
    /// Number of units purchased
    pub quantity: i64,
}

impl LineItemInput {
    pub fn new(name: impl Into<String>, price: Decimal, quantity: i64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }
}

/// A validated line item with a normalized unit price
///
/// Exists only within a request until persisted alongside its receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    name: String,
    unit_price: Money,
    quantity: i64,
}

impl LineItem {
    /// Validates a candidate item
    ///
    /// # Errors
    ///
    /// Returns `ReceiptError::Validation` if the name is empty, the price is
    /// not strictly positive, or the quantity is not strictly positive.
    pub fn validate(input: &LineItemInput) -> Result<Self, ReceiptError> {
        if input.name.trim().is_empty() {
            return Err(ReceiptError::validation("item name cannot be empty"));
        }
        if input.price <= Decimal::ZERO {
            return Err(ReceiptError::validation(format!(
                "item price must be positive, got {}",
                input.price
            )));
        }
        if input.quantity <= 0 {
            return Err(ReceiptError::validation(format!(
                "item quantity must be positive, got {}",
                input.quantity
            )));
        }

        Ok(Self {
            name: input.name.clone(),
            unit_price: Money::new(input.price),
            quantity: input.quantity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price, already rounded to 2 decimal places
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Line subtotal: unit price × quantity, computed exactly
    pub fn subtotal(&self) -> Money {
        self.unit_price * self.quantity
    }
}
