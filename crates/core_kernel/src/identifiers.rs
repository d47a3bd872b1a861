//! Strongly-typed identifiers for persisted entities
//!
//! Identities are database sequence numbers. Newtype wrappers around `i64`
//! prevent accidental mixing of different identifier types, such as passing
//! an owner id where a receipt id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps an existing sequence value
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying sequence value
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(ReceiptId, "Identity of a persisted receipt");
define_id!(AccountId, "Identity of the authenticated account owning receipts");
