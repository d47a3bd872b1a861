//! Receipt repository implementation
//!
//! PostgreSQL adapter for the domain's `ReceiptStore` port. A receipt and
//! its line items are written in one transaction so a header can never be
//! committed without its items. Listing orders by ascending identity, which
//! keeps pagination stable across requests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use core_kernel::{AccountId, Money, ReceiptId};
use domain_receipt::{
    NewReceipt, PaymentKind, Receipt, ReceiptLine, ReceiptQuery, ReceiptStore, StoreError,
};

use crate::error::DatabaseError;

const RECEIPT_COLUMNS: &str =
    "id, owner_id, total, rest, payment_kind, payment_amount, created_at";

/// PostgreSQL-backed receipt store
#[derive(Debug, Clone)]
pub struct PgReceiptStore {
    pool: PgPool,
}

impl PgReceiptStore {
    /// Creates a store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_receipt(&self, receipt: &NewReceipt) -> Result<Receipt, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let row: ReceiptRow = sqlx::query_as(
            "INSERT INTO receipts (owner_id, total, rest, payment_kind, payment_amount, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, owner_id, total, rest, payment_kind, payment_amount, created_at",
        )
        .bind(receipt.owner_id.value())
        .bind(receipt.total.amount())
        .bind(receipt.rest.amount())
        .bind(receipt.payment_kind.as_str())
        .bind(receipt.payment_amount.amount())
        .bind(receipt.created_at)
        .fetch_one(&mut *tx)
        .await?;

        for item in &receipt.items {
            sqlx::query(
                "INSERT INTO receipt_items (receipt_id, name, price, quantity, total) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(row.id)
            .bind(&item.name)
            .bind(item.unit_price.amount())
            .bind(item.quantity)
            .bind(item.subtotal.amount())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!(receipt_id = row.id, items = receipt.items.len(), "receipt persisted");
        row.try_into()
    }

    async fn select_by_owner(
        &self,
        owner_id: AccountId,
        query: &ReceiptQuery,
    ) -> Result<Vec<Receipt>, DatabaseError> {
        let mut builder = owner_listing(owner_id, query);
        let rows: Vec<ReceiptRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Receipt::try_from).collect()
    }

    async fn select_by_id(&self, id: ReceiptId) -> Result<Receipt, DatabaseError> {
        let row: Option<ReceiptRow> = sqlx::query_as(&format!(
            "SELECT {RECEIPT_COLUMNS} FROM receipts WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DatabaseError::not_found("receipt", id))?
            .try_into()
    }

    async fn select_items(&self, id: ReceiptId) -> Result<Vec<ReceiptLine>, DatabaseError> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            "SELECT name, price, quantity, total FROM receipt_items \
             WHERE receipt_id = $1 ORDER BY id ASC",
        )
        .bind(id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ReceiptLine::from).collect())
    }
}

#[async_trait]
impl ReceiptStore for PgReceiptStore {
    async fn create_receipt(&self, receipt: NewReceipt) -> Result<Receipt, StoreError> {
        self.insert_receipt(&receipt).await.map_err(Into::into)
    }

    async fn find_by_owner(
        &self,
        owner_id: AccountId,
        query: &ReceiptQuery,
    ) -> Result<Vec<Receipt>, StoreError> {
        self.select_by_owner(owner_id, query).await.map_err(Into::into)
    }

    async fn get_by_id(&self, id: ReceiptId) -> Result<Receipt, StoreError> {
        self.select_by_id(id).await.map_err(Into::into)
    }

    async fn items_for_receipt(&self, id: ReceiptId) -> Result<Vec<ReceiptLine>, StoreError> {
        self.select_items(id).await.map_err(Into::into)
    }
}

/// Builds the owner-scoped listing query
///
/// Every optional filter appends one AND predicate; the WHERE clause must
/// agree with `ReceiptQuery::matches`. Pagination always runs after the
/// `ORDER BY id ASC` total order.
fn owner_listing(owner_id: AccountId, query: &ReceiptQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {RECEIPT_COLUMNS} FROM receipts WHERE owner_id = "
    ));
    builder.push_bind(owner_id.value());

    if let Some(start) = query.start_date {
        builder.push(" AND created_at >= ");
        builder.push_bind(start);
    }
    if let Some(end) = query.end_date {
        builder.push(" AND created_at <= ");
        builder.push_bind(end);
    }
    if let Some(min) = query.min_total {
        builder.push(" AND total >= ");
        builder.push_bind(min.amount());
    }
    if let Some(max) = query.max_total {
        builder.push(" AND total <= ");
        builder.push_bind(max.amount());
    }
    if let Some(kind) = query.payment_kind {
        builder.push(" AND payment_kind = ");
        builder.push_bind(kind.as_str());
    }

    builder.push(" ORDER BY id ASC LIMIT ");
    builder.push_bind(query.limit);
    builder.push(" OFFSET ");
    builder.push_bind(query.offset);
    builder
}

/// Database row for a receipt header
#[derive(Debug, sqlx::FromRow)]
struct ReceiptRow {
    id: i64,
    owner_id: i64,
    total: Decimal,
    rest: Decimal,
    payment_kind: String,
    payment_amount: Decimal,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReceiptRow> for Receipt {
    type Error = DatabaseError;

    fn try_from(row: ReceiptRow) -> Result<Self, Self::Error> {
        let payment_kind: PaymentKind = row
            .payment_kind
            .parse()
            .map_err(|e: domain_receipt::payment::UnknownPaymentKind| {
                DatabaseError::SerializationError(e.to_string())
            })?;

        Ok(Receipt {
            id: ReceiptId::new(row.id),
            owner_id: AccountId::new(row.owner_id),
            total: Money::new(row.total),
            rest: Money::new(row.rest),
            payment_kind,
            payment_amount: Money::new(row.payment_amount),
            created_at: row.created_at,
        })
    }
}

/// Database row for a receipt line item
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    name: String,
    price: Decimal,
    quantity: i64,
    total: Decimal,
}

impl From<ItemRow> for ReceiptLine {
    fn from(row: ItemRow) -> Self {
        ReceiptLine {
            name: row.name,
            unit_price: Money::new(row.price),
            quantity: row.quantity,
            subtotal: Money::new(row.total),
        }
    }
}
