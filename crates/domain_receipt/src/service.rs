//! Receipt service
//!
//! Orchestrates validation, calculation and persistence into the three
//! public operations: create, owner-scoped listing, and text rendering.
//! The service receives the authenticated account id from the surrounding
//! request-handling collaborator and the store through its port.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use core_kernel::{AccountId, ReceiptId};

use crate::error::ReceiptError;
use crate::item::{LineItem, LineItemInput};
use crate::payment::{Payment, PaymentInput};
use crate::ports::{NewReceipt, NewReceiptLine, ReceiptQuery, ReceiptStore};
use crate::receipt::{calculate_change, calculate_total, ReceiptLine, ReceiptView};
use crate::render::{render_receipt, RenderOptions};

/// A create-receipt request as submitted by the client
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReceiptRequest {
    pub products: Vec<LineItemInput>,
    pub payment: PaymentInput,
}

/// The receipt service exposed to the request-handling collaborator
pub struct ReceiptService {
    store: Arc<dyn ReceiptStore>,
    render_options: RenderOptions,
}

impl ReceiptService {
    pub fn new(store: Arc<dyn ReceiptStore>, render_options: RenderOptions) -> Self {
        Self {
            store,
            render_options,
        }
    }

    /// Creates a receipt for the authenticated owner
    ///
    /// Validates every item and the payment, derives total and change, and
    /// persists the aggregate in a single store write with the creation
    /// timestamp taken at the moment of the call. Any validation failure
    /// aborts before the store is touched; there are no partial writes.
    ///
    /// # Errors
    ///
    /// `Validation` if the item list is empty, any item has an empty name or
    /// non-positive price/quantity, the payment amount is non-positive, or
    /// the payment does not cover the total.
    pub async fn create(
        &self,
        request: CreateReceiptRequest,
        owner_id: AccountId,
    ) -> Result<ReceiptView, ReceiptError> {
        let items = request
            .products
            .iter()
            .map(LineItem::validate)
            .collect::<Result<Vec<_>, _>>()?;

        let total = calculate_total(&items)?;
        let payment = Payment::validate(&request.payment)?;
        payment.ensure_covers(total)?;
        let rest = calculate_change(payment.amount(), total);

        let lines: Vec<ReceiptLine> = items.iter().map(ReceiptLine::from).collect();
        let new_receipt = NewReceipt {
            owner_id,
            total,
            rest,
            payment_kind: payment.kind(),
            payment_amount: payment.amount(),
            created_at: Utc::now(),
            items: items
                .iter()
                .map(|item| NewReceiptLine {
                    name: item.name().to_string(),
                    unit_price: item.unit_price(),
                    quantity: item.quantity(),
                    subtotal: item.subtotal(),
                })
                .collect(),
        };

        let receipt = self.store.create_receipt(new_receipt).await?;
        info!(receipt_id = %receipt.id, owner_id = %owner_id, total = %total, "receipt created");

        Ok(ReceiptView::from_parts(&receipt, &lines))
    }

    /// Fetches one of the owner's receipts by identity
    ///
    /// Scoped to the caller: a receipt belonging to a different account is
    /// indistinguishable from one that does not exist.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id is unknown or the receipt belongs to another
    /// account.
    pub async fn get_by_owner(
        &self,
        receipt_id: ReceiptId,
        owner_id: AccountId,
    ) -> Result<ReceiptView, ReceiptError> {
        let receipt = self.store.get_by_id(receipt_id).await?;
        if receipt.owner_id != owner_id {
            debug!(receipt_id = %receipt_id, owner_id = %owner_id, "receipt owned by another account");
            return Err(ReceiptError::not_found(format!(
                "receipt with id {receipt_id} not found"
            )));
        }

        let lines = self.store.items_for_receipt(receipt_id).await?;
        Ok(ReceiptView::from_parts(&receipt, &lines))
    }

    /// Lists the owner's receipts matching the supplied filters
    ///
    /// Delegates to the store restricted to `owner_id`, so a caller can
    /// never see another account's receipts. Each returned receipt carries
    /// its line items; a receipt with no stored items yields an empty
    /// product list.
    pub async fn list_by_owner(
        &self,
        owner_id: AccountId,
        query: ReceiptQuery,
    ) -> Result<Vec<ReceiptView>, ReceiptError> {
        let receipts = self.store.find_by_owner(owner_id, &query).await?;
        debug!(owner_id = %owner_id, count = receipts.len(), "listed receipts");

        let mut views = Vec::with_capacity(receipts.len());
        for receipt in &receipts {
            let lines = self.store.items_for_receipt(receipt.id).await?;
            views.push(ReceiptView::from_parts(receipt, &lines));
        }
        Ok(views)
    }

    /// Renders a receipt as a fixed-width text document
    ///
    /// The text representation is the customer-facing copy of the receipt
    /// and is intentionally not owner-scoped: anyone holding the receipt id
    /// can fetch the printable document. `line_length` overrides the
    /// configured width when supplied.
    ///
    /// # Errors
    ///
    /// `NotFound` if the receipt id does not exist; `Validation` if the
    /// requested line length is below the renderer's minimum.
    pub async fn render_text(
        &self,
        receipt_id: ReceiptId,
        line_length: Option<usize>,
    ) -> Result<String, ReceiptError> {
        let receipt = self.store.get_by_id(receipt_id).await?;
        let lines = self.store.items_for_receipt(receipt_id).await?;

        let options = match line_length {
            Some(width) => self.render_options.clone().with_line_length(width),
            None => self.render_options.clone(),
        };
        debug!(receipt_id = %receipt_id, line_length = options.line_length, "rendering receipt");

        render_receipt(&receipt, &lines, &options)
    }
}
