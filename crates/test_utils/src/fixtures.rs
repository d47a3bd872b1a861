//! Deterministic fixture values
//!
//! Fixed timestamps and amounts keep rendered documents byte-stable across
//! test runs.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{AccountId, Money};
use rust_decimal_macros::dec;

/// Common monetary amounts
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A small unit price
    pub fn widget_price() -> Money {
        Money::new(dec!(10.00))
    }

    /// A large unit price that exercises thousands grouping
    pub fn drone_price() -> Money {
        Money::new(dec!(298870.00))
    }

    /// A payment that covers the default two-widget receipt with change
    pub fn cash_payment() -> Money {
        Money::new(dec!(50.00))
    }
}

/// Common instants
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The canonical receipt creation instant used across render tests
    pub fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    }

    /// An instant strictly before [`Self::created_at`]
    pub fn earlier() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
    }

    /// An instant strictly after [`Self::created_at`]
    pub fn later() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()
    }
}

/// Common identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// The default receipt owner
    pub fn owner() -> AccountId {
        AccountId::new(1)
    }

    /// A different account, for ownership isolation tests
    pub fn other_owner() -> AccountId {
        AccountId::new(2)
    }
}
