//! Resource ledger interface.
//!
//! The system resource ledger owns per-account RAM byte allocations. This
//! module defines its execute and query messages, and the notifications it
//! delivers to contracts receiving RAM (the `ResourceNotify` hook).

use cosmwasm_schema::{cw_serde, QueryResponses};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{
    to_json_binary, Addr, Coin, CosmosMsg, QuerierWrapper, StdResult, Uint128, Uint64, WasmMsg,
};

// ============================================================================
// Messages
// ============================================================================

#[cw_serde]
pub enum ResourceLedgerExecuteMsg {
    /// Buy an exact number of bytes for `receiver`
    BuyRamBytes { receiver: String, bytes: Uint64 },
    /// Buy bytes for `receiver` with the attached core funds, priced by the RAM market
    BuyRam { receiver: String },
    /// Release bytes held by the caller back to the free pool
    SellRam { bytes: Uint64 },
    /// Move bytes from the caller to `to`
    RamTransfer {
        to: String,
        bytes: Uint64,
        memo: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum ResourceLedgerQueryMsg {
    /// Global capacity and reservation totals
    #[returns(GlobalStateResponse)]
    GlobalState {},
    /// RAM bytes held by a single account
    #[returns(UserResourcesResponse)]
    UserResources { owner: String },
    /// Current RAM market reserves
    #[returns(RamMarketResponse)]
    RamMarket {},
}

#[cw_serde]
pub struct GlobalStateResponse {
    /// Total RAM capacity of the chain in bytes
    pub max_ram_size: Uint64,
    /// Bytes allocated to accounts
    pub total_ram_bytes_reserved: Uint64,
}

impl GlobalStateResponse {
    /// Bytes not allocated to any account
    pub fn free_ram(&self) -> Uint64 {
        self.max_ram_size.saturating_sub(self.total_ram_bytes_reserved)
    }
}

#[cw_serde]
pub struct UserResourcesResponse {
    pub owner: String,
    pub ram_bytes: Uint64,
}

#[cw_serde]
pub struct RamMarketResponse {
    /// Denom paid for RAM
    pub denom: String,
    /// Bytes held by the market
    pub ram_reserve: Uint128,
    /// Core funds held by the market
    pub core_reserve: Uint128,
}

// ============================================================================
// Notifications
// ============================================================================

/// Notification delivered by the resource ledger to a contract receiving RAM.
#[cw_serde]
pub enum ResourceNotice {
    /// Pre-existing bytes moved from `from` to `to`
    RamTransfer {
        from: String,
        to: String,
        bytes: Uint64,
        memo: String,
    },
    /// New bytes purchased by `payer` and credited to `receiver`.
    ///
    /// `bytes` is what the market granted; `ram_bytes` is the receiver's total afterwards.
    BuyRam {
        payer: String,
        receiver: String,
        quantity: Coin,
        bytes: Uint64,
        ram_bytes: Uint64,
    },
}

impl ResourceNotice {
    /// The account credited by the notified action
    pub fn receiver(&self) -> &str {
        match self {
            ResourceNotice::RamTransfer { to, .. } => to,
            ResourceNotice::BuyRam { receiver, .. } => receiver,
        }
    }

    /// Wrap the notice as a `ResourceNotify` execute message for `contract_addr`
    pub fn into_cosmos_msg(self, contract_addr: impl Into<String>) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: contract_addr.into(),
            msg: to_json_binary(&ResourceHookMsg::ResourceNotify(self))?,
            funds: vec![],
        }
        .into())
    }
}

/// Serializes the same way as a receiving contract's `ExecuteMsg::ResourceNotify`
#[cw_serde]
enum ResourceHookMsg {
    ResourceNotify(ResourceNotice),
}

// ============================================================================
// Contract helper
// ============================================================================

/// Typed handle on a deployed resource ledger.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct ResourceLedger(pub Addr);

impl ResourceLedger {
    pub fn addr(&self) -> &Addr {
        &self.0
    }

    pub fn global_state(&self, querier: &QuerierWrapper) -> StdResult<GlobalStateResponse> {
        querier.query_wasm_smart(self.0.to_string(), &ResourceLedgerQueryMsg::GlobalState {})
    }

    pub fn ram_bytes(&self, querier: &QuerierWrapper, owner: &Addr) -> StdResult<Uint64> {
        let res: UserResourcesResponse = querier.query_wasm_smart(
            self.0.to_string(),
            &ResourceLedgerQueryMsg::UserResources {
                owner: owner.to_string(),
            },
        )?;
        Ok(res.ram_bytes)
    }

    /// `RamTransfer` executed with the calling contract as sender
    pub fn ram_transfer_msg(
        &self,
        to: impl Into<String>,
        bytes: Uint64,
        memo: impl Into<String>,
    ) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.0.to_string(),
            msg: to_json_binary(&ResourceLedgerExecuteMsg::RamTransfer {
                to: to.into(),
                bytes,
                memo: memo.into(),
            })?,
            funds: vec![],
        }
        .into())
    }
}
