//! The receipt aggregate and total/change calculation
//!
//! A receipt owns a non-empty ordered collection of line items. Its total and
//! change are derived server-side from the validated items and payment; they
//! are never client-supplied and never change after creation. A receipt
//! belongs to exactly one owning account and ownership never transfers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, Money, ReceiptId};

use crate::error::ReceiptError;
use crate::item::LineItem;
use crate::payment::PaymentKind;

/// Computes the receipt total from a non-empty sequence of validated items
///
/// `total = Σ price_i × quantity_i`, each product computed before summation.
/// There is no intermediate rounding beyond the already-rounded unit prices,
/// so the sum is exact to 2 decimal places. Pure function, no I/O.
///
/// # Errors
///
/// Returns `ReceiptError::Validation` if the item sequence is empty; a
/// receipt must contain at least one item.
pub fn calculate_total(items: &[LineItem]) -> Result<Money, ReceiptError> {
    if items.is_empty() {
        return Err(ReceiptError::validation(
            "receipt must contain at least one item",
        ));
    }
    Ok(items.iter().map(LineItem::subtotal).sum())
}

/// Computes the change returned to the customer
///
/// Non-negative whenever the payment has passed `Payment::ensure_covers`.
pub fn calculate_change(payment_amount: Money, total: Money) -> Money {
    payment_amount - total
}

/// A persisted receipt header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Assigned identity (sequence number)
    pub id: ReceiptId,
    /// The account that created the receipt
    pub owner_id: AccountId,
    /// Derived sum of line subtotals
    pub total: Money,
    /// Derived change: payment amount minus total
    pub rest: Money,
    /// Tender type of the payment
    pub payment_kind: PaymentKind,
    /// Amount tendered
    pub payment_amount: Money,
    /// Set at persistence time, never client-supplied
    pub created_at: DateTime<Utc>,
}

/// A persisted line item, always read through its parent receipt
///
/// Created atomically alongside the receipt and immutable afterwards.
/// Collection order is the input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// price × quantity, frozen at creation
    pub subtotal: Money,
}

impl From<&LineItem> for ReceiptLine {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name().to_string(),
            unit_price: item.unit_price(),
            quantity: item.quantity(),
            subtotal: item.subtotal(),
        }
    }
}

/// One product entry in a response view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineView {
    pub name: String,
    pub price: Money,
    pub quantity: i64,
    pub total: Money,
}

impl From<&ReceiptLine> for LineView {
    fn from(line: &ReceiptLine) -> Self {
        Self {
            name: line.name.clone(),
            price: line.unit_price,
            quantity: line.quantity,
            total: line.subtotal,
        }
    }
}

/// The payment section of a response view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentView {
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    pub amount: Money,
}

/// A receipt reshaped for responses
///
/// Composed of the persisted header fields plus its product lines; the view
/// contains the echoed request data rather than extending it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptView {
    pub id: ReceiptId,
    pub products: Vec<LineView>,
    pub payment: PaymentView,
    pub total: Money,
    pub rest: Money,
    pub created_at: DateTime<Utc>,
    pub owner_id: AccountId,
}

impl ReceiptView {
    /// Assembles a view from a persisted header and its ordered lines
    ///
    /// A receipt with zero stored lines renders an empty product list; it is
    /// impossible by invariant but must not fail here.
    pub fn from_parts(receipt: &Receipt, lines: &[ReceiptLine]) -> Self {
        Self {
            id: receipt.id,
            products: lines.iter().map(LineView::from).collect(),
            payment: PaymentView {
                kind: receipt.payment_kind,
                amount: receipt.payment_amount,
            },
            total: receipt.total,
            rest: receipt.rest,
            created_at: receipt.created_at,
            owner_id: receipt.owner_id,
        }
    }
}
