//! RAM Bridge Contract - Fungible Token Backed by Native RAM
//!
//! This contract issues a `RAM` token whose circulating amount always matches
//! the RAM bytes the bridge holds on the resource ledger. The bridge hosts the
//! token ledger itself, so every balance change passes through its transfer guard.
//!
//! # Create
//! 1. Admin calls `Create` once, pinning max supply to the chain's RAM capacity
//! 2. The unallocated RAM float is minted into the bridge's custody balance
//!
//! # Wrap (RAM in, tokens out)
//! - `RamTransfer` to the bridge: the sender is paid from custody inventory
//! - `BuyRam`/`BuyRamBytes` for the bridge: the purchased bytes are minted to the payer
//!
//! # Unwrap (tokens in, RAM out)
//! - `Transfer` to the bridge (or a CW20 `Send` hook from this contract): the
//!   same number of bytes is sent back over the resource ledger
//! - The memo `ignore` accepts tokens into custody without moving RAM
//!
//! # Security
//! - Notifications are only honoured from the configured resource ledger
//! - Token receipts are only honoured from this contract's own ledger
//! - Egress list blocks accounts from ever receiving the token

pub mod contract;
pub mod error;
mod execute;
pub mod guard;
pub mod ledger;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
