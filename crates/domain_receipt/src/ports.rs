//! Receipt store port
//!
//! The `ReceiptStore` trait defines everything the receipt domain needs from
//! its persistence collaborator. Adapters implement it against a concrete
//! backend:
//!
//! - **PostgreSQL adapter** in `infra_db` for production,
//! - **in-memory adapter** in `test_utils` for tests.
//!
//! Ownership enforcement for reads is layered on top by `ReceiptService`;
//! the store only answers the raw queries it is asked.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use core_kernel::{AccountId, Money, ReceiptId};

use crate::payment::PaymentKind;
use crate::receipt::{Receipt, ReceiptLine};

/// Default page size for owner-scoped listing
pub const DEFAULT_LIMIT: i64 = 10;

/// Errors raised by store adapters
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Any other backend failure; propagated unchanged, never retried here
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        StoreError::NotFound(format!("{entity} with id {id} not found"))
    }

    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend(message.into())
    }
}

/// A line item ready to be persisted alongside its receipt
#[derive(Debug, Clone)]
pub struct NewReceiptLine {
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// price × quantity, derived before the write
    pub subtotal: Money,
}

/// A receipt ready to be persisted as one atomic unit
///
/// All monetary fields are derived server-side; the store writes them
/// verbatim and assigns the identity.
#[derive(Debug, Clone)]
pub struct NewReceipt {
    pub owner_id: AccountId,
    pub total: Money,
    pub rest: Money,
    pub payment_kind: PaymentKind,
    pub payment_amount: Money,
    pub created_at: DateTime<Utc>,
    /// Non-empty, in input order
    pub items: Vec<NewReceiptLine>,
}

/// Optional filters for owner-scoped listing, combined with AND
///
/// Omitted filters impose no constraint. Pagination skips `offset` matching
/// rows and returns at most `limit`.
#[derive(Debug, Clone)]
pub struct ReceiptQuery {
    /// Keep receipts created at or after this instant
    pub start_date: Option<DateTime<Utc>>,
    /// Keep receipts created at or before this instant
    pub end_date: Option<DateTime<Utc>>,
    /// Keep receipts with total ≥ this amount
    pub min_total: Option<Money>,
    /// Keep receipts with total ≤ this amount
    pub max_total: Option<Money>,
    /// Keep receipts paid with this tender type
    pub payment_kind: Option<PaymentKind>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for ReceiptQuery {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            min_total: None,
            max_total: None,
            payment_kind: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl ReceiptQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn with_end_date(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn with_min_total(mut self, min: Money) -> Self {
        self.min_total = Some(min);
        self
    }

    pub fn with_max_total(mut self, max: Money) -> Self {
        self.max_total = Some(max);
        self
    }

    pub fn with_payment_kind(mut self, kind: PaymentKind) -> Self {
        self.payment_kind = Some(kind);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// The filter predicate every adapter must agree with
    ///
    /// The SQL adapter expresses the same conditions in its WHERE clause;
    /// the in-memory adapter applies this directly.
    pub fn matches(&self, receipt: &Receipt) -> bool {
        if let Some(start) = self.start_date {
            if receipt.created_at < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if receipt.created_at > end {
                return false;
            }
        }
        if let Some(min) = self.min_total {
            if receipt.total < min {
                return false;
            }
        }
        if let Some(max) = self.max_total {
            if receipt.total > max {
                return false;
            }
        }
        if let Some(kind) = self.payment_kind {
            if receipt.payment_kind != kind {
                return false;
            }
        }
        true
    }
}

/// Persistence operations consumed by the receipt service
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Persists a receipt header and its items as one atomic unit
    ///
    /// Either the header and every item are committed together or nothing
    /// is; a header with zero items must never be left behind. Assigns the
    /// identity and returns the persisted header.
    async fn create_receipt(&self, receipt: NewReceipt) -> Result<Receipt, StoreError>;

    /// Returns the owner's receipts matching every supplied filter
    ///
    /// Total order is ascending identity, which makes pagination stable.
    async fn find_by_owner(
        &self,
        owner_id: AccountId,
        query: &ReceiptQuery,
    ) -> Result<Vec<Receipt>, StoreError>;

    /// Fetches a receipt header by identity
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is unknown.
    async fn get_by_id(&self, id: ReceiptId) -> Result<Receipt, StoreError>;

    /// Fetches a receipt's line items in insertion order
    async fn items_for_receipt(&self, id: ReceiptId) -> Result<Vec<ReceiptLine>, StoreError>;
}
