//! In-memory receipt store adapter
//!
//! Implements the domain's `ReceiptStore` port against a mutexed vector so
//! service-level behavior can be tested without PostgreSQL. Filtering reuses
//! `ReceiptQuery::matches`, and listing reproduces the SQL adapter's
//! ascending-identity order with offset/limit pagination.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use core_kernel::{AccountId, ReceiptId};
use domain_receipt::{NewReceipt, Receipt, ReceiptLine, ReceiptQuery, ReceiptStore, StoreError};

#[derive(Default)]
struct Inner {
    next_id: i64,
    receipts: Vec<Receipt>,
    items: HashMap<i64, Vec<ReceiptLine>>,
}

/// A `ReceiptStore` backed by process memory
#[derive(Default)]
pub struct InMemoryReceiptStore {
    inner: Mutex<Inner>,
    create_calls: AtomicUsize,
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of create calls the store has received
    ///
    /// Lets tests assert that validation failures never reach persistence.
    pub fn create_call_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::backend("store mutex poisoned"))
    }
}

#[async_trait]
impl ReceiptStore for InMemoryReceiptStore {
    async fn create_receipt(&self, receipt: NewReceipt) -> Result<Receipt, StoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.lock()?;

        inner.next_id += 1;
        let id = inner.next_id;

        let stored = Receipt {
            id: ReceiptId::new(id),
            owner_id: receipt.owner_id,
            total: receipt.total,
            rest: receipt.rest,
            payment_kind: receipt.payment_kind,
            payment_amount: receipt.payment_amount,
            created_at: receipt.created_at,
        };
        let lines: Vec<ReceiptLine> = receipt
            .items
            .into_iter()
            .map(|item| ReceiptLine {
                name: item.name,
                unit_price: item.unit_price,
                quantity: item.quantity,
                subtotal: item.subtotal,
            })
            .collect();

        inner.receipts.push(stored.clone());
        inner.items.insert(id, lines);
        Ok(stored)
    }

    async fn find_by_owner(
        &self,
        owner_id: AccountId,
        query: &ReceiptQuery,
    ) -> Result<Vec<Receipt>, StoreError> {
        let inner = self.lock()?;

        let mut matching: Vec<Receipt> = inner
            .receipts
            .iter()
            .filter(|r| r.owner_id == owner_id && query.matches(r))
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.id);

        Ok(matching
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .collect())
    }

    async fn get_by_id(&self, id: ReceiptId) -> Result<Receipt, StoreError> {
        let inner = self.lock()?;
        inner
            .receipts
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("receipt", id))
    }

    async fn items_for_receipt(&self, id: ReceiptId) -> Result<Vec<ReceiptLine>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.items.get(&id.value()).cloned().unwrap_or_default())
    }
}
