//! Wrap handler.
//!
//! Reacts to RAM arriving in the bridge's account on the resource ledger:
//! - `RamTransfer` moves pre-existing bytes; the holder is paid out of the
//!   custody inventory and supply is unchanged.
//! - `BuyRam` allocates new bytes; the observed byte increase is minted to the
//!   payer and supply grows.

use cosmwasm_std::{Deps, DepsMut, Env, MessageInfo, Response, StdError, Uint128, Uint64};

use common::{ResourceLedger, ResourceNotice};

use crate::error::ContractError;
use crate::guard::{assert_resource_ledger, check_egress};
use crate::ledger::{balance_of, load_ram_class, mint, move_tokens};
use crate::state::{Config, CONFIG, WRAPPED_BYTES};

pub fn execute_resource_notify(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    notice: ResourceNotice,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_resource_ledger(&config, &info.sender)?;

    // ignore RAM not sent to this contract
    if notice.receiver() != env.contract.address.as_str() {
        return Ok(Response::new()
            .add_attribute("method", "ignore_notice")
            .add_attribute("receiver", notice.receiver()));
    }

    match notice {
        ResourceNotice::RamTransfer {
            from, bytes, memo, ..
        } => wrap_transfer(deps, env, from, bytes, memo),
        ResourceNotice::BuyRam { payer, bytes, .. } => {
            wrap_purchase(deps, env, config, payer, bytes)
        }
    }
}

/// Pre-existing bytes moved into custody: pay the holder from inventory.
fn wrap_transfer(
    deps: DepsMut,
    env: Env,
    from: String,
    bytes: Uint64,
    memo: String,
) -> Result<Response, ContractError> {
    let class = load_ram_class(deps.storage)?;
    let from = deps.api.addr_validate(&from)?;
    let amount = positive(bytes)?;
    check_egress(deps.storage, &env, &from)?;

    let custody = balance_of(deps.storage, &env.contract.address)?;
    if custody < amount {
        return Err(ContractError::InsufficientCustody {
            available: custody,
            required: amount,
        });
    }
    move_tokens(deps.storage, &env.contract.address, &from, amount)?;

    let wrapped = WRAPPED_BYTES.update(deps.storage, |wrapped| -> Result<_, ContractError> {
        Ok(wrapped.checked_add(amount).map_err(StdError::from)?)
    })?;

    Ok(Response::new()
        .add_attribute("method", "wrap")
        .add_attribute("from", from)
        .add_attribute("amount", amount)
        .add_attribute("memo", memo)
        .add_attribute("supply", class.supply)
        .add_attribute("wrapped_bytes", wrapped))
}

/// New bytes purchased for the bridge: mint what the ledger actually credited.
fn wrap_purchase(
    deps: DepsMut,
    env: Env,
    config: Config,
    payer: String,
    requested: Uint64,
) -> Result<Response, ContractError> {
    load_ram_class(deps.storage)?;
    let payer = deps.api.addr_validate(&payer)?;
    check_egress(deps.storage, &env, &payer)?;

    let minted = observed_increase(deps.as_ref(), &env, &config)?;
    let class = mint(deps.storage, &payer, minted)?;
    WRAPPED_BYTES.update(deps.storage, |wrapped| -> Result<_, ContractError> {
        Ok(wrapped.checked_add(minted).map_err(StdError::from)?)
    })?;

    Ok(Response::new()
        .add_attribute("method", "wrap_purchase")
        .add_attribute("payer", payer)
        .add_attribute("requested", requested)
        .add_attribute("amount", minted)
        .add_attribute("supply", class.supply))
}

/// Bytes credited to the bridge since the last wrap or unwrap, read back from the ledger.
fn observed_increase(deps: Deps, env: &Env, config: &Config) -> Result<Uint128, ContractError> {
    let ledger = ResourceLedger(config.resource_ledger.clone());
    let held = Uint128::from(ledger.ram_bytes(&deps.querier, &env.contract.address)?);
    let wrapped = WRAPPED_BYTES.load(deps.storage)?;

    let increase = held.saturating_sub(wrapped);
    if increase.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: format!(
                "no RAM credited to the bridge: holds {} bytes, {} already wrapped",
                held, wrapped
            ),
        });
    }
    Ok(increase)
}

fn positive(bytes: Uint64) -> Result<Uint128, ContractError> {
    if bytes.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "RAM transfer must be positive".to_string(),
        });
    }
    Ok(Uint128::from(bytes))
}
