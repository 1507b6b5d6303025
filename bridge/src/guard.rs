//! Authorization checks
//!
//! Trust is established by comparing the notifying contract's address with a
//! single trusted identity, never by symbol or message shape: any contract can
//! deploy a token named `RAM` or forward a look-alike notification.

use cosmwasm_std::{Addr, Env, Storage};

use crate::error::ContractError;
use crate::state::{Config, EGRESS};

pub fn assert_admin(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    if *sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// RAM notifications are accepted only from the configured resource ledger.
pub fn assert_resource_ledger(config: &Config, notifier: &Addr) -> Result<(), ContractError> {
    if *notifier != config.resource_ledger {
        return Err(ContractError::UntrustedSender {
            sender: notifier.to_string(),
        });
    }
    Ok(())
}

/// Transfer guard: block tokens to accounts on the egress list.
///
/// The bridge itself is never blocked; receiving tokens is how it unwraps.
pub fn check_egress(
    storage: &dyn Storage,
    env: &Env,
    receiver: &Addr,
) -> Result<(), ContractError> {
    if *receiver == env.contract.address {
        return Ok(());
    }
    if EGRESS.has(storage, receiver) {
        return Err(ContractError::ForbiddenDestination {
            account: receiver.to_string(),
        });
    }
    Ok(())
}
