use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:resource-ledger";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Global RAM accounting
#[cw_serde]
pub struct GlobalState {
    pub max_ram_size: u64,
    pub total_ram_bytes_reserved: u64,
}

impl GlobalState {
    pub fn free_ram(&self) -> u64 {
        self.max_ram_size - self.total_ram_bytes_reserved
    }
}

/// Bancor market between RAM bytes and the core denom
#[cw_serde]
pub struct RamMarket {
    pub denom: String,
    pub ram_reserve: Uint128,
    pub core_reserve: Uint128,
}

pub const GLOBAL: Item<GlobalState> = Item::new("global");

pub const RAM_MARKET: Item<RamMarket> = Item::new("rammarket");

/// owner => ram bytes
pub const USER_RES: Map<&Addr, u64> = Map::new("userres");
