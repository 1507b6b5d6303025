//! Supply initializer.
//!
//! Creates the RAM token class once, pinned to the chain's RAM capacity, and
//! seeds the bridge's custody balance with the free RAM float.

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};

use common::{Asset, ResourceLedger, Symbol, RAM_PRECISION, RAM_SYMBOL_CODE};

use crate::error::ContractError;
use crate::guard::assert_admin;
use crate::ledger::credit;
use crate::state::{TokenClass, CONFIG, TOKEN_CLASSES, WRAPPED_BYTES};

pub fn execute_create(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    issuer: String,
    maximum_supply: Asset,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_admin(&config, &info.sender)?;

    if TOKEN_CLASSES.has(deps.storage, RAM_SYMBOL_CODE) {
        return Err(ContractError::AlreadyInitialized {
            symbol: RAM_SYMBOL_CODE.to_string(),
        });
    }

    let issuer = deps.api.addr_validate(&issuer)?;
    if issuer != env.contract.address {
        return Err(ContractError::InvalidIssuer {
            issuer: issuer.to_string(),
        });
    }

    if maximum_supply.symbol.code != RAM_SYMBOL_CODE {
        return Err(ContractError::SymbolMismatch {
            expected: RAM_SYMBOL_CODE.to_string(),
            got: maximum_supply.symbol.code,
        });
    }
    if maximum_supply.symbol.precision != RAM_PRECISION {
        return Err(ContractError::PrecisionMismatch {
            expected: RAM_PRECISION,
            got: maximum_supply.symbol.precision,
        });
    }

    let ledger = ResourceLedger(config.resource_ledger);
    let global = ledger.global_state(&deps.querier)?;
    let max_ram_size = Uint128::from(global.max_ram_size);
    if maximum_supply.amount != max_ram_size {
        return Err(ContractError::SupplyCapMismatch {
            expected: max_ram_size,
            got: maximum_supply.amount,
        });
    }

    // unallocated RAM is minted up front into custody
    let free_float = Uint128::from(global.free_ram());
    let class = TokenClass {
        symbol: Symbol::ram(),
        supply: free_float,
        max_supply: maximum_supply.amount,
        issuer: env.contract.address.clone(),
    };
    TOKEN_CLASSES.save(deps.storage, RAM_SYMBOL_CODE, &class)?;
    credit(deps.storage, &env.contract.address, free_float)?;

    let held = ledger.ram_bytes(&deps.querier, &env.contract.address)?;
    WRAPPED_BYTES.save(deps.storage, &Uint128::from(held))?;

    Ok(Response::new()
        .add_attribute("method", "create")
        .add_attribute("issuer", issuer)
        .add_attribute("max_supply", Asset::ram(class.max_supply).to_string())
        .add_attribute("supply", Asset::ram(class.supply).to_string())
        .add_attribute("free_float", free_float)
        .add_attribute("wrapped_bytes", held))
}
