//! Repository implementations backed by PostgreSQL

pub mod receipt;

pub use receipt::PgReceiptStore;
