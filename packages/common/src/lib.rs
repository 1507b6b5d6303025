//! Common - Shared Types for the RAM Bridge Contracts
//!
//! This package provides the wire types shared between the bridge contract
//! and the system resource ledger it mirrors:
//! - `asset` - symbol and quantity types for the `RAM` token
//! - `resource` - resource ledger messages, queries and notifications

pub mod asset;
pub mod resource;

pub use asset::{Asset, Symbol, RAM_PRECISION, RAM_SYMBOL_CODE};
pub use resource::{
    GlobalStateResponse, RamMarketResponse, ResourceLedger, ResourceLedgerExecuteMsg,
    ResourceLedgerQueryMsg, ResourceNotice, UserResourcesResponse,
};
