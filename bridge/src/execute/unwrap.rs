//! Unwrap handler.
//!
//! Tokens that land in the bridge's own balance are paid out as RAM bytes to
//! the sender. The tokens stay in custody as inventory for later wraps.

use cosmwasm_std::{Addr, DepsMut, Env, MessageInfo, Response, Uint128};
use cw20::Cw20ReceiveMsg;

use common::ResourceLedger;

use crate::error::ContractError;
use crate::ledger::to_bytes;
use crate::state::{CONFIG, IGNORE_MEMO, UNWRAP_MEMO, WRAPPED_BYTES};

/// CW20 `Send` hook.
///
/// The genuine RAM token lives in this contract and is unwrapped with
/// `Transfer`; no token moves into custody on this path, so any caller is a
/// look-alike token and nothing is released.
pub fn execute_receive(
    info: MessageInfo,
    _cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    Err(ContractError::UntrustedTokenSource {
        sender: info.sender.to_string(),
    })
}

/// Send `amount` bytes from custody to `holder`, who has just paid `amount` tokens
/// into the bridge's balance.
pub fn unwrap_to(
    deps: DepsMut,
    env: &Env,
    holder: Addr,
    amount: Uint128,
    memo: &str,
) -> Result<Response, ContractError> {
    if memo == IGNORE_MEMO {
        return Ok(Response::new()
            .add_attribute("unwrap", "ignored")
            .add_attribute("holder", holder)
            .add_attribute("amount", amount));
    }

    let config = CONFIG.load(deps.storage)?;
    let ledger = ResourceLedger(config.resource_ledger);
    let bytes = to_bytes(amount)?;

    let held = ledger.ram_bytes(&deps.querier, &env.contract.address)?;
    if held < bytes {
        return Err(ContractError::InsufficientCustodyBytes {
            available: held,
            required: bytes,
        });
    }
    WRAPPED_BYTES.update(deps.storage, |wrapped| {
        wrapped
            .checked_sub(amount)
            .map_err(|_| ContractError::WrappedBytesUnderflow {
                wrapped,
                released: amount,
            })
    })?;

    Ok(Response::new()
        .add_message(ledger.ram_transfer_msg(holder.to_string(), bytes, UNWRAP_MEMO)?)
        .add_attribute("unwrap", "ramtransfer")
        .add_attribute("holder", holder)
        .add_attribute("bytes", bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{
        mock_dependencies, mock_env, mock_info, MockApi, MockQuerier, MockStorage,
    };
    use cosmwasm_std::{
        to_json_binary, ContractResult, OwnedDeps, SystemError, SystemResult, Uint64, WasmQuery,
    };

    use common::UserResourcesResponse;

    use crate::state::Config;

    type MockDeps = OwnedDeps<MockStorage, MockApi, MockQuerier>;

    /// Bridge config plus a resource ledger reporting `held` bytes for every account.
    fn deps_holding(held: u64, wrapped: u128) -> MockDeps {
        let mut deps = mock_dependencies();
        CONFIG
            .save(
                deps.as_mut().storage,
                &Config {
                    admin: Addr::unchecked("admin"),
                    resource_ledger: Addr::unchecked("eosio"),
                },
            )
            .unwrap();
        WRAPPED_BYTES
            .save(deps.as_mut().storage, &Uint128::new(wrapped))
            .unwrap();
        deps.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { .. } => SystemResult::Ok(ContractResult::Ok(
                to_json_binary(&UserResourcesResponse {
                    owner: "bridge".to_string(),
                    ram_bytes: Uint64::new(held),
                })
                .unwrap(),
            )),
            _ => SystemResult::Err(SystemError::Unknown {}),
        });
        deps
    }

    #[test]
    fn test_unwrap_releases_bytes() {
        let mut deps = deps_holding(1000, 1000);
        let res = unwrap_to(
            deps.as_mut(),
            &mock_env(),
            Addr::unchecked("alice"),
            Uint128::new(400),
            "",
        )
        .unwrap();

        assert_eq!(res.messages.len(), 1);
        assert_eq!(
            WRAPPED_BYTES.load(deps.as_ref().storage).unwrap(),
            Uint128::new(600)
        );
    }

    #[test]
    fn test_unwrap_with_drifted_accounting_is_invariant_violation() {
        // the ledger reports more bytes than the bridge accounts as wrapped
        let mut deps = deps_holding(1000, 100);
        let err = unwrap_to(
            deps.as_mut(),
            &mock_env(),
            Addr::unchecked("alice"),
            Uint128::new(500),
            "",
        )
        .unwrap_err();

        assert_eq!(
            err,
            ContractError::WrappedBytesUnderflow {
                wrapped: Uint128::new(100),
                released: Uint128::new(500),
            }
        );
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_receive_hook_rejected_from_any_sender() {
        let env = mock_env();
        for sender in [env.contract.address.as_str(), "fake.token"] {
            let err = execute_receive(
                mock_info(sender, &[]),
                Cw20ReceiveMsg {
                    sender: "alice".to_string(),
                    amount: Uint128::new(700),
                    msg: Default::default(),
                },
            )
            .unwrap_err();
            assert_eq!(
                err,
                ContractError::UntrustedTokenSource {
                    sender: sender.to_string()
                }
            );
        }
    }
}
