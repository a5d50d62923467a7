//! Database adapters: SQLite pool, schema and row-level repositories.
//!
//! Repository functions take a `&mut SqliteConnection` so callers decide the
//! transaction boundary (`&mut *tx` or a pooled connection).

pub mod balances;
pub mod connection;
pub mod locations;
pub mod movements;
pub mod products;

pub use connection::Database;
