//! Query handlers for the RAM bridge contract.

use cosmwasm_std::{Addr, Deps, Env, Order, StdError, StdResult, Uint128};
use cw20::{BalanceResponse, TokenInfoResponse};
use cw_storage_plus::Bound;

use common::{Asset, ResourceLedger, RAM_SYMBOL_CODE};

use crate::msg::{
    AccountBalance, AllAccountsResponse, ConfigResponse, CustodyResponse, EgressListResponse,
    IsEgressResponse, PendingAdminResponse, TokenClassResponse,
};
use crate::state::{
    TokenClass, BALANCES, CONFIG, EGRESS, PENDING_ADMIN, TOKEN_CLASSES, WRAPPED_BYTES,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

// ============================================================================
// Core Queries
// ============================================================================

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        resource_ledger: config.resource_ledger,
    })
}

fn load_class(deps: Deps, symbol: &str) -> StdResult<TokenClass> {
    TOKEN_CLASSES
        .may_load(deps.storage, symbol)?
        .ok_or_else(|| StdError::not_found(format!("token class {}", symbol)))
}

/// Query the token class row for a symbol code.
pub fn query_token_class(deps: Deps, symbol: String) -> StdResult<TokenClassResponse> {
    let class = load_class(deps, &symbol)?;
    Ok(TokenClassResponse {
        supply: Asset::new(class.supply, class.symbol.clone()),
        max_supply: Asset::new(class.max_supply, class.symbol),
        issuer: class.issuer,
    })
}

// ============================================================================
// Token Queries
// ============================================================================

pub fn query_token_info(deps: Deps) -> StdResult<TokenInfoResponse> {
    let class = load_class(deps, RAM_SYMBOL_CODE)?;
    Ok(TokenInfoResponse {
        name: class.symbol.code.clone(),
        symbol: class.symbol.code,
        decimals: class.symbol.precision,
        total_supply: class.supply,
    })
}

pub fn query_balance(deps: Deps, address: String) -> StdResult<BalanceResponse> {
    let address = deps.api.addr_validate(&address)?;
    let balance = BALANCES.may_load(deps.storage, &address)?.unwrap_or_default();
    Ok(BalanceResponse { balance })
}

/// Query paginated balances, ordered by address.
pub fn query_all_accounts(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AllAccountsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_addr = start_after.map(Addr::unchecked);
    let start = start_addr.as_ref().map(Bound::exclusive);

    let accounts = BALANCES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (address, balance) = item?;
            Ok(AccountBalance { address, balance })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AllAccountsResponse { accounts })
}

/// Query the bridge's custody position against the resource ledger.
pub fn query_custody(deps: Deps, env: Env) -> StdResult<CustodyResponse> {
    let config = CONFIG.load(deps.storage)?;
    let class = load_class(deps, RAM_SYMBOL_CODE)?;
    let balance = BALANCES
        .may_load(deps.storage, &env.contract.address)?
        .unwrap_or_default();
    let ram_bytes =
        ResourceLedger(config.resource_ledger).ram_bytes(&deps.querier, &env.contract.address)?;

    Ok(CustodyResponse {
        balance,
        outstanding: class.supply.checked_sub(balance)?,
        supply: class.supply,
        wrapped_bytes: WRAPPED_BYTES.may_load(deps.storage)?.unwrap_or(Uint128::zero()),
        ram_bytes,
    })
}

// ============================================================================
// Egress Queries
// ============================================================================

pub fn query_egress_list(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<EgressListResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_addr = start_after.map(Addr::unchecked);
    let start = start_addr.as_ref().map(Bound::exclusive);

    let accounts = EGRESS
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    Ok(EgressListResponse { accounts })
}

pub fn query_is_egress(deps: Deps, account: String) -> StdResult<IsEgressResponse> {
    let account = deps.api.addr_validate(&account)?;
    Ok(IsEgressResponse {
        is_egress: EGRESS.has(deps.storage, &account),
    })
}

// ============================================================================
// Admin Queries
// ============================================================================

/// Query pending admin transfer.
pub fn query_pending_admin(deps: Deps) -> StdResult<Option<PendingAdminResponse>> {
    let pending = PENDING_ADMIN.may_load(deps.storage)?;
    Ok(pending.map(|p| PendingAdminResponse {
        new_address: p.new_address,
        execute_after: p.execute_after,
    }))
}
