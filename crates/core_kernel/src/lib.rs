//! Core Kernel - Foundational types for the receipt system
//!
//! This crate provides the fundamental building blocks used across all other
//! crates in the workspace:
//! - Money with precise decimal arithmetic and receipt formatting
//! - Strongly-typed identifiers for persisted entities

pub mod identifiers;
pub mod money;

pub use identifiers::{AccountId, ReceiptId};
pub use money::Money;
