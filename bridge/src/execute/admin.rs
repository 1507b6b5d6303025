//! Admin operations handlers.
//!
//! This module handles:
//! - Egress list maintenance (accounts barred from receiving RAM tokens)
//! - Admin handover behind a timelock

use cosmwasm_std::{Addr, DepsMut, Env, MessageInfo, Response, Timestamp};

use crate::error::ContractError;
use crate::guard::assert_admin;
use crate::state::{PendingAdmin, ADMIN_TIMELOCK_DURATION, CONFIG, EGRESS, PENDING_ADMIN};

// ============================================================================
// Egress List
// ============================================================================

/// Add accounts to the egress list. Accounts already listed are skipped.
pub fn execute_add_egress(
    deps: DepsMut,
    info: MessageInfo,
    accounts: Vec<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_admin(&config, &info.sender)?;

    let mut added = vec![];
    for account in accounts {
        let addr = deps.api.addr_validate(&account)?;
        if EGRESS.has(deps.storage, &addr) {
            continue;
        }
        EGRESS.save(deps.storage, &addr, &true)?;
        added.push(account);
    }

    Ok(Response::new()
        .add_attribute("method", "add_egress")
        .add_attribute("accounts", added.join(",")))
}

/// Remove accounts from the egress list. Accounts not listed are skipped.
pub fn execute_remove_egress(
    deps: DepsMut,
    info: MessageInfo,
    accounts: Vec<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_admin(&config, &info.sender)?;

    let mut removed = vec![];
    for account in accounts {
        let addr = deps.api.addr_validate(&account)?;
        if !EGRESS.has(deps.storage, &addr) {
            continue;
        }
        EGRESS.remove(deps.storage, &addr);
        removed.push(account);
    }

    Ok(Response::new()
        .add_attribute("method", "remove_egress")
        .add_attribute("accounts", removed.join(",")))
}

// ============================================================================
// Admin Handover
// ============================================================================

/// Start a handover to `new_admin`. A later proposal replaces an earlier one and
/// restarts the timelock.
pub fn execute_propose_admin(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_admin: String,
) -> Result<Response, ContractError> {
    assert_admin(&CONFIG.load(deps.storage)?, &info.sender)?;

    let proposal = PendingAdmin {
        new_address: deps.api.addr_validate(&new_admin)?,
        execute_after: env.block.time.plus_seconds(ADMIN_TIMELOCK_DURATION),
    };
    PENDING_ADMIN.save(deps.storage, &proposal)?;

    Ok(Response::new().add_attributes([
        ("method", "propose_admin".to_string()),
        ("new_admin", proposal.new_address.to_string()),
        ("execute_after", proposal.execute_after.seconds().to_string()),
    ]))
}

/// Complete the handover. Only the proposed address may claim, once the
/// timelock has run out.
pub fn execute_accept_admin(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let proposal = PENDING_ADMIN.may_load(deps.storage)?;
    let new_admin = claim_handover(proposal, &info.sender, env.block.time)?;

    let mut config = CONFIG.load(deps.storage)?;
    let previous = std::mem::replace(&mut config.admin, new_admin);
    CONFIG.save(deps.storage, &config)?;
    PENDING_ADMIN.remove(deps.storage);

    Ok(Response::new().add_attributes([
        ("method", "accept_admin"),
        ("previous_admin", previous.as_str()),
        ("new_admin", config.admin.as_str()),
    ]))
}

/// Withdraw the open proposal, if any.
pub fn execute_cancel_admin_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    assert_admin(&CONFIG.load(deps.storage)?, &info.sender)?;

    let withdrawn = match PENDING_ADMIN.may_load(deps.storage)? {
        Some(proposal) => {
            PENDING_ADMIN.remove(deps.storage);
            proposal.new_address.to_string()
        }
        None => String::new(),
    };

    Ok(Response::new()
        .add_attribute("method", "cancel_admin_proposal")
        .add_attribute("withdrawn", withdrawn))
}

/// Resolve who becomes admin when `claimant` accepts at `now`.
fn claim_handover(
    proposal: Option<PendingAdmin>,
    claimant: &Addr,
    now: Timestamp,
) -> Result<Addr, ContractError> {
    match proposal {
        None => Err(ContractError::NoPendingAdmin),
        Some(p) if p.new_address != *claimant => Err(ContractError::UnauthorizedPendingAdmin),
        Some(p) if now < p.execute_after => Err(ContractError::TimelockNotExpired {
            remaining_seconds: p.execute_after.seconds() - now.seconds(),
        }),
        Some(p) => Ok(p.new_address),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal_for(addr: &str, unlock_at: u64) -> Option<PendingAdmin> {
        Some(PendingAdmin {
            new_address: Addr::unchecked(addr),
            execute_after: Timestamp::from_seconds(unlock_at),
        })
    }

    #[test]
    fn test_claim_handover_rules() {
        let claimant = Addr::unchecked("terra1newadmin");

        assert_eq!(
            claim_handover(None, &claimant, Timestamp::from_seconds(0)).unwrap_err(),
            ContractError::NoPendingAdmin
        );
        assert_eq!(
            claim_handover(
                proposal_for("terra1other", 100),
                &claimant,
                Timestamp::from_seconds(200)
            )
            .unwrap_err(),
            ContractError::UnauthorizedPendingAdmin
        );
        assert_eq!(
            claim_handover(
                proposal_for("terra1newadmin", 100),
                &claimant,
                Timestamp::from_seconds(40)
            )
            .unwrap_err(),
            ContractError::TimelockNotExpired {
                remaining_seconds: 60
            }
        );

        // claimable from the unlock second onward
        let admin = claim_handover(
            proposal_for("terra1newadmin", 100),
            &claimant,
            Timestamp::from_seconds(100),
        )
        .unwrap();
        assert_eq!(admin, claimant);
    }
}
