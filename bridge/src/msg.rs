//! Message types for the RAM bridge contract
//!
//! This module defines all messages for instantiation, execution, and queries.

use common::{Asset, ResourceNotice};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Timestamp, Uint128, Uint64};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for contract management
    pub admin: String,
    /// System resource ledger contract address
    pub resource_ledger: String,
    /// Accounts excluded from receiving the token
    #[serde(default)]
    pub egress: Vec<String>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Token Ledger
    // ========================================================================
    /// Create the RAM token class (once)
    ///
    /// Authorization: Admin only
    ///
    /// `maximum_supply` must be `0,RAM` with an amount equal to the resource
    /// ledger's `max_ram_size`. The free RAM float is pre-minted into the
    /// bridge's custody balance.
    Create {
        /// Must be the bridge contract address
        issuer: String,
        maximum_supply: Asset,
    },

    /// Transfer RAM tokens
    ///
    /// Authorization: Token holder
    ///
    /// Transferring to the bridge contract unwraps the tokens into RAM bytes
    /// credited to the sender, unless `memo` is `"ignore"`.
    Transfer {
        recipient: String,
        amount: Uint128,
        memo: Option<String>,
    },

    // ========================================================================
    // Notifications
    // ========================================================================
    /// RAM moved to or purchased for the bridge (sent by the resource ledger)
    ResourceNotify(ResourceNotice),

    /// CW20 tokens sent to the bridge
    ///
    /// The RAM token is hosted by this contract and never sends this hook, so
    /// every CW20 `Send` here is rejected with `UntrustedTokenSource`.
    Receive(cw20::Cw20ReceiveMsg),

    // ========================================================================
    // Egress List
    // ========================================================================
    /// Block transfers to accounts (admin only)
    AddEgress { accounts: Vec<String> },

    /// Unblock transfers to accounts (admin only)
    RemoveEgress { accounts: Vec<String> },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    /// Propose new admin (starts 7-day timelock)
    ProposeAdmin { new_admin: String },

    /// Accept admin role (after timelock)
    AcceptAdmin {},

    /// Cancel pending admin proposal
    CancelAdminProposal {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Token class row for a symbol code
    #[returns(TokenClassResponse)]
    TokenClass { symbol: String },

    /// CW20-compatible token info
    #[returns(cw20::TokenInfoResponse)]
    TokenInfo {},

    /// CW20-compatible balance
    #[returns(cw20::BalanceResponse)]
    Balance { address: String },

    #[returns(AllAccountsResponse)]
    AllAccounts {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Bridge custody: token inventory and RAM held
    #[returns(CustodyResponse)]
    Custody {},

    #[returns(EgressListResponse)]
    EgressList {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(IsEgressResponse)]
    IsEgress { account: String },

    #[returns(Option<PendingAdminResponse>)]
    PendingAdmin {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub resource_ledger: Addr,
}

#[cw_serde]
pub struct TokenClassResponse {
    pub supply: Asset,
    pub max_supply: Asset,
    pub issuer: Addr,
}

#[cw_serde]
pub struct AccountBalance {
    pub address: Addr,
    pub balance: Uint128,
}

#[cw_serde]
pub struct AllAccountsResponse {
    pub accounts: Vec<AccountBalance>,
}

#[cw_serde]
pub struct CustodyResponse {
    /// Bridge's own token balance (undistributed inventory)
    pub balance: Uint128,
    /// Tokens held outside the bridge
    pub outstanding: Uint128,
    /// Circulating supply
    pub supply: Uint128,
    /// RAM bytes the bridge accounts for
    pub wrapped_bytes: Uint128,
    /// RAM bytes the resource ledger reports for the bridge
    pub ram_bytes: Uint64,
}

#[cw_serde]
pub struct EgressListResponse {
    pub accounts: Vec<Addr>,
}

#[cw_serde]
pub struct IsEgressResponse {
    pub is_egress: bool,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub new_address: Addr,
    pub execute_after: Timestamp,
}
