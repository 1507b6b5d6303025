use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Uint128, Uint64};

pub use common::resource::{
    GlobalStateResponse, RamMarketResponse, ResourceLedgerExecuteMsg as ExecuteMsg,
    ResourceLedgerQueryMsg as QueryMsg, UserResourcesResponse,
};

#[cw_serde]
pub struct RamAllocation {
    pub account: String,
    pub bytes: Uint64,
}

#[cw_serde]
pub struct RamMarketInit {
    /// Denom accepted by `BuyRam`
    pub denom: String,
    pub ram_reserve: Uint128,
    pub core_reserve: Uint128,
}

#[cw_serde]
pub struct InstantiateMsg {
    /// Total RAM capacity in bytes
    pub max_ram_size: Uint64,
    /// Bytes already allocated at genesis, including `allocations`
    pub total_ram_bytes_reserved: Uint64,
    /// Genesis allocations for named accounts
    pub allocations: Vec<RamAllocation>,
    pub market: RamMarketInit,
}
