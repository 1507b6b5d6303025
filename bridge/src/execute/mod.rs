//! Execute handlers for the RAM bridge contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `create` - Supply initializer
//! - `wrap` - Resource ledger notifications (RAM in, tokens out)
//! - `unwrap` - Tokens received by the bridge (tokens in, RAM out)
//! - `transfer` - Token transfers through the transfer guard
//! - `admin` - Egress list and admin transfer

mod admin;
mod create;
mod transfer;
mod unwrap;
mod wrap;

pub use admin::*;
pub use create::*;
pub use transfer::*;
pub use unwrap::execute_receive;
pub use wrap::*;
