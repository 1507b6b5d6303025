use cosmwasm_std::{
    coin, entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response,
    StdResult, Storage, Uint64,
};
use cw2::set_contract_version;

use common::resource::ResourceNotice;

use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, GlobalStateResponse, InstantiateMsg, QueryMsg, RamMarketResponse,
    UserResourcesResponse,
};
use crate::state::{
    GlobalState, RamMarket, CONTRACT_NAME, CONTRACT_VERSION, GLOBAL, RAM_MARKET, USER_RES,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let global = GlobalState {
        max_ram_size: msg.max_ram_size.u64(),
        total_ram_bytes_reserved: msg.total_ram_bytes_reserved.u64(),
    };
    if global.total_ram_bytes_reserved > global.max_ram_size {
        return Err(ContractError::InvalidAllocation {
            reason: "reserved bytes exceed max_ram_size".to_string(),
        });
    }

    let mut allocated = 0u64;
    for allocation in &msg.allocations {
        let account = deps.api.addr_validate(&allocation.account)?;
        allocated = allocated
            .checked_add(allocation.bytes.u64())
            .ok_or_else(|| ContractError::InvalidAllocation {
                reason: "allocation total overflows".to_string(),
            })?;
        add_ram(deps.storage, &account, allocation.bytes.u64())?;
    }
    if allocated > global.total_ram_bytes_reserved {
        return Err(ContractError::InvalidAllocation {
            reason: format!(
                "allocations total {} exceeds reserved {}",
                allocated, global.total_ram_bytes_reserved
            ),
        });
    }
    GLOBAL.save(deps.storage, &global)?;

    RAM_MARKET.save(
        deps.storage,
        &RamMarket {
            denom: msg.market.denom,
            ram_reserve: msg.market.ram_reserve,
            core_reserve: msg.market.core_reserve,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("max_ram_size", msg.max_ram_size)
        .add_attribute("total_ram_bytes_reserved", msg.total_ram_bytes_reserved)
        .add_attribute("allocations", msg.allocations.len().to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::BuyRamBytes { receiver, bytes } => {
            execute_buy_ram_bytes(deps, env, info, receiver, bytes)
        }
        ExecuteMsg::BuyRam { receiver } => execute_buy_ram(deps, env, info, receiver),
        ExecuteMsg::SellRam { bytes } => execute_sell_ram(deps, info, bytes),
        ExecuteMsg::RamTransfer { to, bytes, memo } => {
            execute_ram_transfer(deps, info, to, bytes, memo)
        }
    }
}

fn execute_buy_ram_bytes(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    receiver: String,
    bytes: Uint64,
) -> Result<Response, ContractError> {
    let receiver = deps.api.addr_validate(&receiver)?;
    let bytes = positive(bytes)?;
    let denom = RAM_MARKET.load(deps.storage)?.denom;

    reserve_ram(deps.storage, bytes)?;
    let ram_bytes = add_ram(deps.storage, &receiver, bytes)?;

    let notice = ResourceNotice::BuyRam {
        payer: info.sender.to_string(),
        receiver: receiver.to_string(),
        quantity: coin(0, denom),
        bytes: Uint64::new(bytes),
        ram_bytes: Uint64::new(ram_bytes),
    };

    Ok(notify(deps.as_ref(), &receiver, notice)?
        .add_attribute("action", "buyrambytes")
        .add_attribute("payer", info.sender)
        .add_attribute("receiver", receiver)
        .add_attribute("bytes", bytes.to_string())
        .add_attribute("ram_bytes", ram_bytes.to_string()))
}

fn execute_buy_ram(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    receiver: String,
) -> Result<Response, ContractError> {
    let receiver = deps.api.addr_validate(&receiver)?;
    let mut market = RAM_MARKET.load(deps.storage)?;

    let payment = info
        .funds
        .iter()
        .find(|c| c.denom == market.denom && !c.amount.is_zero())
        .cloned()
        .ok_or_else(|| ContractError::NoFunds {
            denom: market.denom.clone(),
        })?;

    let bytes = market.buy(payment.amount)?;
    if bytes == 0 {
        return Err(ContractError::InvalidAmount {
            reason: "payment too small to buy any RAM".to_string(),
        });
    }
    RAM_MARKET.save(deps.storage, &market)?;

    reserve_ram(deps.storage, bytes)?;
    let ram_bytes = add_ram(deps.storage, &receiver, bytes)?;

    let notice = ResourceNotice::BuyRam {
        payer: info.sender.to_string(),
        receiver: receiver.to_string(),
        quantity: payment.clone(),
        bytes: Uint64::new(bytes),
        ram_bytes: Uint64::new(ram_bytes),
    };

    Ok(notify(deps.as_ref(), &receiver, notice)?
        .add_attribute("action", "buyram")
        .add_attribute("payer", info.sender)
        .add_attribute("receiver", receiver)
        .add_attribute("quantity", payment.to_string())
        .add_attribute("bytes", bytes.to_string())
        .add_attribute("ram_bytes", ram_bytes.to_string()))
}

fn execute_sell_ram(
    deps: DepsMut,
    info: MessageInfo,
    bytes: Uint64,
) -> Result<Response, ContractError> {
    let bytes = positive(bytes)?;

    let ram_bytes = sub_ram(deps.storage, &info.sender, bytes)?;
    let mut global = GLOBAL.load(deps.storage)?;
    global.total_ram_bytes_reserved -= bytes;
    GLOBAL.save(deps.storage, &global)?;

    Ok(Response::new()
        .add_attribute("action", "sellram")
        .add_attribute("account", info.sender)
        .add_attribute("bytes", bytes.to_string())
        .add_attribute("ram_bytes", ram_bytes.to_string()))
}

fn execute_ram_transfer(
    deps: DepsMut,
    info: MessageInfo,
    to: String,
    bytes: Uint64,
    memo: String,
) -> Result<Response, ContractError> {
    let to = deps.api.addr_validate(&to)?;
    let bytes = positive(bytes)?;
    if to == info.sender {
        return Err(ContractError::InvalidAmount {
            reason: "cannot transfer RAM to self".to_string(),
        });
    }

    sub_ram(deps.storage, &info.sender, bytes)?;
    add_ram(deps.storage, &to, bytes)?;

    let notice = ResourceNotice::RamTransfer {
        from: info.sender.to_string(),
        to: to.to_string(),
        bytes: Uint64::new(bytes),
        memo: memo.clone(),
    };

    Ok(notify(deps.as_ref(), &to, notice)?
        .add_attribute("action", "ramtransfer")
        .add_attribute("from", info.sender)
        .add_attribute("to", to)
        .add_attribute("bytes", bytes.to_string())
        .add_attribute("memo", memo))
}

// ============================================================================
// Helpers
// ============================================================================

fn positive(bytes: Uint64) -> Result<u64, ContractError> {
    if bytes.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "bytes must be positive".to_string(),
        });
    }
    Ok(bytes.u64())
}

/// Notify `receiver` when it is a contract; accounts receive no hook.
fn notify(deps: Deps, receiver: &Addr, notice: ResourceNotice) -> StdResult<Response> {
    if deps
        .querier
        .query_wasm_contract_info(receiver.to_string())
        .is_err()
    {
        return Ok(Response::new());
    }
    Ok(Response::new().add_message(notice.into_cosmos_msg(receiver.to_string())?))
}

fn reserve_ram(storage: &mut dyn Storage, bytes: u64) -> Result<(), ContractError> {
    let mut global = GLOBAL.load(storage)?;
    let free = global.free_ram();
    if bytes > free {
        return Err(ContractError::CapacityExceeded {
            free,
            requested: bytes,
        });
    }
    global.total_ram_bytes_reserved += bytes;
    GLOBAL.save(storage, &global)?;
    Ok(())
}

fn add_ram(storage: &mut dyn Storage, owner: &Addr, bytes: u64) -> Result<u64, ContractError> {
    let ram_bytes = USER_RES.may_load(storage, owner)?.unwrap_or_default() + bytes;
    USER_RES.save(storage, owner, &ram_bytes)?;
    Ok(ram_bytes)
}

fn sub_ram(storage: &mut dyn Storage, owner: &Addr, bytes: u64) -> Result<u64, ContractError> {
    let available = USER_RES.may_load(storage, owner)?.unwrap_or_default();
    let ram_bytes = available
        .checked_sub(bytes)
        .ok_or_else(|| ContractError::InsufficientRam {
            account: owner.to_string(),
            available,
            requested: bytes,
        })?;
    USER_RES.save(storage, owner, &ram_bytes)?;
    Ok(ram_bytes)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GlobalState {} => to_json_binary(&query_global_state(deps)?),
        QueryMsg::UserResources { owner } => to_json_binary(&query_user_resources(deps, owner)?),
        QueryMsg::RamMarket {} => to_json_binary(&query_ram_market(deps)?),
    }
}

fn query_global_state(deps: Deps) -> StdResult<GlobalStateResponse> {
    let global = GLOBAL.load(deps.storage)?;
    Ok(GlobalStateResponse {
        max_ram_size: Uint64::new(global.max_ram_size),
        total_ram_bytes_reserved: Uint64::new(global.total_ram_bytes_reserved),
    })
}

fn query_user_resources(deps: Deps, owner: String) -> StdResult<UserResourcesResponse> {
    let owner_addr = deps.api.addr_validate(&owner)?;
    let ram_bytes = USER_RES
        .may_load(deps.storage, &owner_addr)?
        .unwrap_or_default();
    Ok(UserResourcesResponse {
        owner,
        ram_bytes: Uint64::new(ram_bytes),
    })
}

fn query_ram_market(deps: Deps) -> StdResult<RamMarketResponse> {
    let market = RAM_MARKET.load(deps.storage)?;
    Ok(RamMarketResponse {
        denom: market.denom,
        ram_reserve: market.ram_reserve,
        core_reserve: market.core_reserve,
    })
}
