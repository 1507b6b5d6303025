//! Token ledger helpers
//!
//! All balance and supply mutations go through these functions so the
//! invariants hold after every call:
//! - the sum of all balances equals the class supply
//! - the class supply never exceeds its max supply

use cosmwasm_std::{Addr, Storage, Uint128, Uint64};

use common::RAM_SYMBOL_CODE;

use crate::error::ContractError;
use crate::state::{TokenClass, BALANCES, TOKEN_CLASSES};

/// Load the RAM token class, failing if `Create` has not run yet.
pub fn load_ram_class(storage: &dyn Storage) -> Result<TokenClass, ContractError> {
    TOKEN_CLASSES
        .may_load(storage, RAM_SYMBOL_CODE)?
        .ok_or(ContractError::NotInitialized)
}

pub fn balance_of(storage: &dyn Storage, owner: &Addr) -> Result<Uint128, ContractError> {
    Ok(BALANCES.may_load(storage, owner)?.unwrap_or_default())
}

/// Add to a balance, creating the row on first credit.
pub fn credit(
    storage: &mut dyn Storage,
    owner: &Addr,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let balance = balance_of(storage, owner)?
        .checked_add(amount)
        .map_err(cosmwasm_std::StdError::from)?;
    BALANCES.save(storage, owner, &balance)?;
    Ok(balance)
}

/// Subtract from a balance. The row is kept at zero.
pub fn debit(
    storage: &mut dyn Storage,
    owner: &Addr,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let available = balance_of(storage, owner)?;
    if available < amount {
        return Err(ContractError::InsufficientFunds {
            available,
            required: amount,
        });
    }
    let balance = available - amount;
    BALANCES.save(storage, owner, &balance)?;
    Ok(balance)
}

/// Move tokens between two holders; supply is unchanged.
pub fn move_tokens(
    storage: &mut dyn Storage,
    from: &Addr,
    to: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    debit(storage, from, amount)?;
    credit(storage, to, amount)?;
    Ok(())
}

/// Mint new tokens to `to`, raising the supply.
pub fn mint(
    storage: &mut dyn Storage,
    to: &Addr,
    amount: Uint128,
) -> Result<TokenClass, ContractError> {
    let mut class = load_ram_class(storage)?;
    let supply = class
        .supply
        .checked_add(amount)
        .ok()
        .filter(|supply| *supply <= class.max_supply)
        .ok_or(ContractError::SupplyCapExceeded {
            supply: class.supply,
            minted: amount,
            max_supply: class.max_supply,
        })?;

    class.supply = supply;
    TOKEN_CLASSES.save(storage, RAM_SYMBOL_CODE, &class)?;
    credit(storage, to, amount)?;
    Ok(class)
}

/// Tokens map 1:1 onto bytes; reject quantities the resource ledger cannot carry.
pub fn to_bytes(amount: Uint128) -> Result<Uint64, ContractError> {
    u64::try_from(amount.u128())
        .map(Uint64::new)
        .map_err(|_| ContractError::InvalidAmount {
            reason: format!("{} exceeds the RAM byte range", amount),
        })
}
