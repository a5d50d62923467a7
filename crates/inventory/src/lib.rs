//! Inventory domain module: the movement ledger and the balances derived from it.
//!
//! This crate contains business rules for inventory, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod balance;
pub mod movement;

pub use balance::{Balance, compute_balances, net_quantities};
pub use movement::{Movement, MovementDraft, MovementInput, MovementView, NewMovement};
pub use stockroom_core::MovementId;
