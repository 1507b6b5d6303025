//! Token transfer with the transfer guard applied.

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::execute::unwrap::unwrap_to;
use crate::guard::check_egress;
use crate::ledger::{load_ram_class, move_tokens};

pub fn execute_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
    memo: Option<String>,
) -> Result<Response, ContractError> {
    load_ram_class(deps.storage)?;

    let recipient = deps.api.addr_validate(&recipient)?;
    if recipient == info.sender {
        return Err(ContractError::CannotTransferToSelf);
    }
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "must transfer positive quantity".to_string(),
        });
    }
    check_egress(deps.storage, &env, &recipient)?;

    move_tokens(deps.storage, &info.sender, &recipient, amount)?;

    let memo = memo.unwrap_or_default();
    let res = Response::new()
        .add_attribute("method", "transfer")
        .add_attribute("from", info.sender.as_str())
        .add_attribute("to", recipient.as_str())
        .add_attribute("amount", amount)
        .add_attribute("memo", memo.as_str());

    // the bridge is its own token ledger: tokens sent here are unwrapped in place
    if recipient == env.contract.address {
        let unwrap = unwrap_to(deps, &env, info.sender, amount, &memo)?;
        return Ok(res
            .add_submessages(unwrap.messages)
            .add_attributes(unwrap.attributes));
    }

    Ok(res)
}
