//! RAM Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_admin, execute_add_egress, execute_cancel_admin_proposal, execute_create,
    execute_propose_admin, execute_receive, execute_remove_egress, execute_resource_notify,
    execute_transfer,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_all_accounts, query_balance, query_config, query_custody, query_egress_list,
    query_is_egress, query_pending_admin, query_token_class, query_token_info,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, EGRESS};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        admin: deps.api.addr_validate(&msg.admin)?,
        resource_ledger: deps.api.addr_validate(&msg.resource_ledger)?,
    };
    CONFIG.save(deps.storage, &config)?;

    for account in &msg.egress {
        let addr = deps.api.addr_validate(account)?;
        EGRESS.save(deps.storage, &addr, &true)?;
    }

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("resource_ledger", config.resource_ledger)
        .add_attribute("egress_count", msg.egress.len().to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let api = deps.api;
    let result = match msg {
        // Supply
        ExecuteMsg::Create {
            issuer,
            maximum_supply,
        } => execute_create(deps, env, info, issuer, maximum_supply),

        // Token movement
        ExecuteMsg::Transfer {
            recipient,
            amount,
            memo,
        } => execute_transfer(deps, env, info, recipient, amount, memo),
        ExecuteMsg::ResourceNotify(notice) => execute_resource_notify(deps, env, info, notice),
        ExecuteMsg::Receive(cw20_msg) => execute_receive(info, cw20_msg),

        // Egress list
        ExecuteMsg::AddEgress { accounts } => execute_add_egress(deps, info, accounts),
        ExecuteMsg::RemoveEgress { accounts } => execute_remove_egress(deps, info, accounts),

        // Admin
        ExecuteMsg::ProposeAdmin { new_admin } => execute_propose_admin(deps, env, info, new_admin),
        ExecuteMsg::AcceptAdmin {} => execute_accept_admin(deps, env, info),
        ExecuteMsg::CancelAdminProposal {} => execute_cancel_admin_proposal(deps, info),
    };

    // supply and custody drifted apart; the transaction still aborts
    if let Err(err) = &result {
        if err.is_invariant_violation() {
            api.debug(&format!("invariant violation: {}", err));
        }
    }
    result
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::TokenClass { symbol } => to_json_binary(&query_token_class(deps, symbol)?),
        QueryMsg::TokenInfo {} => to_json_binary(&query_token_info(deps)?),
        QueryMsg::Balance { address } => to_json_binary(&query_balance(deps, address)?),
        QueryMsg::AllAccounts { start_after, limit } => {
            to_json_binary(&query_all_accounts(deps, start_after, limit)?)
        }
        QueryMsg::Custody {} => to_json_binary(&query_custody(deps, env)?),
        QueryMsg::EgressList { start_after, limit } => {
            to_json_binary(&query_egress_list(deps, start_after, limit)?)
        }
        QueryMsg::IsEgress { account } => to_json_binary(&query_is_egress(deps, account)?),
        QueryMsg::PendingAdmin {} => to_json_binary(&query_pending_admin(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
