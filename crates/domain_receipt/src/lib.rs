//! Receipt Domain - purchase receipts for authenticated account holders
//!
//! This crate implements the receipt business rules: validation of monetary
//! input, total and change computation, the ownership-scoped filtered
//! listing, and the deterministic fixed-width text rendering of a receipt.
//!
//! Persistence and HTTP handling stay behind boundaries: the
//! [`ports::ReceiptStore`] trait is implemented by `infra_db` for
//! PostgreSQL, and the [`service::ReceiptService`] operations are consumed
//! by the surrounding request-handling collaborator, which supplies the
//! authenticated account id.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_receipt::{ReceiptService, CreateReceiptRequest, ReceiptConfig};
//!
//! let service = ReceiptService::new(store, ReceiptConfig::default().render_options());
//! let view = service.create(request, owner_id).await?;
//! let text = service.render_text(view.id, None).await?;
//! ```

pub mod config;
pub mod error;
pub mod item;
pub mod payment;
pub mod ports;
pub mod receipt;
pub mod render;
pub mod service;

pub use config::ReceiptConfig;
pub use error::ReceiptError;
pub use item::{LineItem, LineItemInput};
pub use payment::{Payment, PaymentInput, PaymentKind};
pub use ports::{NewReceipt, NewReceiptLine, ReceiptQuery, ReceiptStore, StoreError};
pub use receipt::{
    calculate_change, calculate_total, LineView, PaymentView, Receipt, ReceiptLine, ReceiptView,
};
pub use render::{render_receipt, RenderOptions, DEFAULT_LINE_LENGTH, MIN_LINE_LENGTH};
pub use service::{CreateReceiptRequest, ReceiptService};
