//! Test data builders
//!
//! Builder patterns for constructing domain values with sensible defaults,
//! so tests specify only the fields they care about.

use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;

use core_kernel::{AccountId, Money, ReceiptId};
use domain_receipt::{PaymentKind, Receipt, ReceiptLine};

use crate::fixtures::{IdFixtures, TemporalFixtures};

/// Builder for a persisted receipt line
pub struct LineBuilder {
    name: String,
    unit_price: Money,
    quantity: i64,
}

impl Default for LineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuilder {
    pub fn new() -> Self {
        Self {
            name: "Widget".to_string(),
            unit_price: Money::new(dec!(10.00)),
            quantity: 1,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_unit_price(mut self, price: Money) -> Self {
        self.unit_price = price;
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn build(self) -> ReceiptLine {
        let subtotal = self.unit_price * self.quantity;
        ReceiptLine {
            name: self.name,
            unit_price: self.unit_price,
            quantity: self.quantity,
            subtotal,
        }
    }
}

/// Builder for a persisted receipt header
pub struct ReceiptBuilder {
    id: ReceiptId,
    owner_id: AccountId,
    total: Money,
    payment_kind: PaymentKind,
    payment_amount: Money,
    created_at: DateTime<Utc>,
}

impl Default for ReceiptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptBuilder {
    pub fn new() -> Self {
        Self {
            id: ReceiptId::new(1),
            owner_id: IdFixtures::owner(),
            total: Money::new(dec!(40.00)),
            payment_kind: PaymentKind::Cash,
            payment_amount: Money::new(dec!(50.00)),
            created_at: TemporalFixtures::created_at(),
        }
    }

    pub fn with_id(mut self, id: ReceiptId) -> Self {
        self.id = id;
        self
    }

    pub fn with_owner(mut self, owner_id: AccountId) -> Self {
        self.owner_id = owner_id;
        self
    }

    pub fn with_total(mut self, total: Money) -> Self {
        self.total = total;
        self
    }

    pub fn with_payment(mut self, kind: PaymentKind, amount: Money) -> Self {
        self.payment_kind = kind;
        self.payment_amount = amount;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds the header; rest is derived from payment amount and total
    pub fn build(self) -> Receipt {
        let rest = self.payment_amount - self.total;
        Receipt {
            id: self.id,
            owner_id: self.owner_id,
            total: self.total,
            rest,
            payment_kind: self.payment_kind,
            payment_amount: self.payment_amount,
            created_at: self.created_at,
        }
    }
}
