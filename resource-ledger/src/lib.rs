//! System Resource Ledger
//!
//! Tracks per-account RAM byte allocations against a fixed global capacity.
//! Accounts buy bytes from the RAM market (exact byte amounts or priced by a
//! bancor curve), sell them back to the free pool, and transfer them between
//! accounts. Every contract credited with bytes receives a
//! `ResourceNotify` hook within the same transaction.

pub mod contract;
pub mod error;
pub mod market;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
