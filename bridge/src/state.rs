//! State definitions for the RAM bridge contract
//!
//! The contract hosts the RAM token ledger itself: one token class row keyed
//! by symbol code and one balance row per holder.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

use common::Symbol;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Controlling authority (creates the token, manages the egress list)
    pub admin: Addr,
    /// The system resource ledger; the only trusted source of RAM notifications
    pub resource_ledger: Addr,
}

/// Pending admin change proposal
#[cw_serde]
pub struct PendingAdmin {
    /// Proposed new admin address
    pub new_address: Addr,
    /// Block time when the change can be executed
    pub execute_after: Timestamp,
}

/// Token class (currency stats)
///
/// `supply` counts every minted token, the bridge's own custody balance
/// included, and never exceeds `max_supply`.
#[cw_serde]
pub struct TokenClass {
    pub symbol: Symbol,
    /// Circulating supply
    pub supply: Uint128,
    /// Fixed at creation to the chain's `max_ram_size`
    pub max_supply: Uint128,
    /// Always the bridge contract
    pub issuer: Addr,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:ram-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 7 days in seconds for admin change timelock
pub const ADMIN_TIMELOCK_DURATION: u64 = 604_800;

/// Memo that accepts tokens into custody without unwrapping them
pub const IGNORE_MEMO: &str = "ignore";

/// Memo attached to RAM sent back to unwrapping holders
pub const UNWRAP_MEMO: &str = "unwrap ram";

// ============================================================================
// State Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Pending admin proposal (if any)
pub const PENDING_ADMIN: Item<PendingAdmin> = Item::new("pending_admin");

/// Token classes
/// Key: symbol code, Value: TokenClass
pub const TOKEN_CLASSES: Map<&str, TokenClass> = Map::new("stat");

/// Token balances
/// Key: holder address, Value: balance (rows persist at zero)
pub const BALANCES: Map<&Addr, Uint128> = Map::new("accounts");

/// RAM bytes held by the bridge as last observed.
/// Baselined at creation, moved by every wrap and unwrap.
pub const WRAPPED_BYTES: Item<Uint128> = Item::new("wrapped_bytes");

/// Accounts that may never receive the token
/// Key: account address, Value: always true
pub const EGRESS: Map<&Addr, bool> = Map::new("egresslist");
