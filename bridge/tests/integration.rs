//! Integration tests for the RAM bridge using cw-multi-test.
//!
//! A resource ledger and the bridge are wired together so that wrap
//! notifications and unwrap payouts travel over real contract messages.

use cosmwasm_std::{coins, Addr, Empty, StdResult, Uint128, Uint64};
use cw20::{BalanceResponse, TokenInfoResponse};
use cw_multi_test::{App, Contract, ContractWrapper, Executor};

use common::{
    Asset, GlobalStateResponse, ResourceLedgerExecuteMsg, ResourceLedgerQueryMsg, Symbol,
    UserResourcesResponse,
};
use ram_bridge::msg::{
    AllAccountsResponse, CustodyResponse, ExecuteMsg, InstantiateMsg, QueryMsg,
    TokenClassResponse,
};
use resource_ledger::msg::{InstantiateMsg as LedgerInstantiateMsg, RamAllocation, RamMarketInit};

const MAX_RAM_SIZE: u64 = 418_945_440_768;
const RESERVED: u64 = 97_037_339_343;
const FREE_RAM: u128 = 321_908_101_425;

// ============================================================================
// Test Setup
// ============================================================================

fn contract_bridge() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        ram_bridge::contract::execute,
        ram_bridge::contract::instantiate,
        ram_bridge::contract::query,
    );
    Box::new(contract)
}

fn contract_resource_ledger() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        resource_ledger::contract::execute,
        resource_ledger::contract::instantiate,
        resource_ledger::contract::query,
    );
    Box::new(contract)
}

struct Suite {
    app: App,
    admin: Addr,
    alice: Addr,
    bob: Addr,
    ledger: Addr,
    bridge: Addr,
}

fn setup() -> Suite {
    setup_with(MAX_RAM_SIZE, RESERVED)
}

fn setup_with(max_ram_size: u64, reserved: u64) -> Suite {
    let mut app = App::default();

    let admin = Addr::unchecked("terra1admin");
    let alice = Addr::unchecked("terra1alice");
    let bob = Addr::unchecked("terra1bob");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &bob, coins(10_000_000_000, "uluna"))
            .unwrap();
    });

    let ledger_code = app.store_code(contract_resource_ledger());
    let ledger = app
        .instantiate_contract(
            ledger_code,
            admin.clone(),
            &LedgerInstantiateMsg {
                max_ram_size: Uint64::new(max_ram_size),
                total_ram_bytes_reserved: Uint64::new(reserved),
                allocations: vec![
                    RamAllocation {
                        account: alice.to_string(),
                        bytes: Uint64::new(10_000),
                    },
                    RamAllocation {
                        account: bob.to_string(),
                        bytes: Uint64::new(10_000),
                    },
                ],
                market: RamMarketInit {
                    denom: "uluna".to_string(),
                    ram_reserve: Uint128::new(129_542_469_746),
                    core_reserve: Uint128::new(147_223_045_946),
                },
            },
            &[],
            "resource-ledger",
            None,
        )
        .unwrap();

    let bridge_code = app.store_code(contract_bridge());
    let bridge = app
        .instantiate_contract(
            bridge_code,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                resource_ledger: ledger.to_string(),
                egress: vec![],
            },
            &[],
            "ram-bridge",
            Some(admin.to_string()),
        )
        .unwrap();

    Suite {
        app,
        admin,
        alice,
        bob,
        ledger,
        bridge,
    }
}

fn create_msg(bridge: &Addr, max_supply: u128) -> ExecuteMsg {
    ExecuteMsg::Create {
        issuer: bridge.to_string(),
        maximum_supply: Asset::ram(max_supply),
    }
}

impl Suite {
    fn create(&mut self) {
        let msg = create_msg(&self.bridge, MAX_RAM_SIZE as u128);
        self.app
            .execute_contract(self.admin.clone(), self.bridge.clone(), &msg, &[])
            .unwrap();
    }

    fn balance(&self, account: &Addr) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::Balance {
                    address: account.to_string(),
                },
            )
            .unwrap();
        res.balance
    }

    fn ram_bytes(&self, account: &Addr) -> u64 {
        let res: UserResourcesResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.ledger,
                &ResourceLedgerQueryMsg::UserResources {
                    owner: account.to_string(),
                },
            )
            .unwrap();
        res.ram_bytes.u64()
    }

    fn custody(&self) -> CustodyResponse {
        self.app
            .wrap()
            .query_wasm_smart(&self.bridge, &QueryMsg::Custody {})
            .unwrap()
    }

    fn ram_transfer(
        &mut self,
        from: &Addr,
        to: &Addr,
        bytes: u64,
    ) -> anyhow::Result<cw_multi_test::AppResponse> {
        self.app.execute_contract(
            from.clone(),
            self.ledger.clone(),
            &ResourceLedgerExecuteMsg::RamTransfer {
                to: to.to_string(),
                bytes: Uint64::new(bytes),
                memo: String::new(),
            },
            &[],
        )
    }

    fn transfer(
        &mut self,
        from: &Addr,
        to: &Addr,
        amount: u128,
        memo: Option<&str>,
    ) -> anyhow::Result<cw_multi_test::AppResponse> {
        self.app.execute_contract(
            from.clone(),
            self.bridge.clone(),
            &ExecuteMsg::Transfer {
                recipient: to.to_string(),
                amount: Uint128::new(amount),
                memo: memo.map(str::to_string),
            },
            &[],
        )
    }

    /// Bytes the bridge holds must equal the tokens held outside custody
    fn assert_conserved(&self) {
        let custody = self.custody();
        assert_eq!(
            Uint128::from(custody.ram_bytes),
            custody.outstanding,
            "bridge RAM bytes and outstanding tokens diverged"
        );
        assert_eq!(custody.outstanding, custody.supply - custody.balance);
    }
}

// ============================================================================
// Supply Initializer
// ============================================================================

#[test]
fn test_create_mints_free_ram_into_custody() {
    let mut suite = setup();
    suite.create();

    let class: TokenClassResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.bridge,
            &QueryMsg::TokenClass {
                symbol: "RAM".to_string(),
            },
        )
        .unwrap();
    assert_eq!(class.max_supply, Asset::ram(418_945_440_768u128));
    assert_eq!(class.supply, Asset::ram(FREE_RAM));
    assert_eq!(class.issuer, suite.bridge);

    assert_eq!(suite.balance(&suite.bridge), Uint128::new(FREE_RAM));
    assert_eq!(suite.balance(&suite.alice), Uint128::zero());

    let info: TokenInfoResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.bridge, &QueryMsg::TokenInfo {})
        .unwrap();
    assert_eq!(info.symbol, "RAM");
    assert_eq!(info.decimals, 0);
    assert_eq!(info.total_supply, Uint128::new(FREE_RAM));

    suite.assert_conserved();
}

#[test]
fn test_create_twice_fails() {
    let mut suite = setup();
    suite.create();

    let res = suite.app.execute_contract(
        suite.admin.clone(),
        suite.bridge.clone(),
        &create_msg(&suite.bridge, MAX_RAM_SIZE as u128),
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("already initialized"),
        "Expected AlreadyInitialized, got: {}",
        err_str
    );

    // supply untouched
    assert_eq!(suite.balance(&suite.bridge), Uint128::new(FREE_RAM));
}

#[test]
fn test_create_rejects_bad_arguments() {
    let mut suite = setup();
    let admin = suite.admin.clone();
    let bridge = suite.bridge.clone();

    // non-admin
    let res = suite.app.execute_contract(
        suite.alice.clone(),
        bridge.clone(),
        &create_msg(&bridge, MAX_RAM_SIZE as u128),
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unauthorized"), "got: {}", err_str);

    // issuer other than the bridge
    let res = suite.app.execute_contract(
        admin.clone(),
        bridge.clone(),
        &ExecuteMsg::Create {
            issuer: suite.alice.to_string(),
            maximum_supply: Asset::ram(MAX_RAM_SIZE as u128),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Issuer must be the bridge"), "got: {}", err_str);

    // wrong symbol code
    let res = suite.app.execute_contract(
        admin.clone(),
        bridge.clone(),
        &ExecuteMsg::Create {
            issuer: bridge.to_string(),
            maximum_supply: Asset::new(MAX_RAM_SIZE as u128, Symbol::new("RAMX", 0)),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Symbol mismatch"), "got: {}", err_str);

    // wrong precision
    let res = suite.app.execute_contract(
        admin.clone(),
        bridge.clone(),
        &ExecuteMsg::Create {
            issuer: bridge.to_string(),
            maximum_supply: Asset::new(MAX_RAM_SIZE as u128, Symbol::new("RAM", 4)),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Precision mismatch"), "got: {}", err_str);

    // cap other than max_ram_size
    let res = suite.app.execute_contract(
        admin.clone(),
        bridge.clone(),
        &create_msg(&bridge, 1_000_000),
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Supply cap mismatch"), "got: {}", err_str);

    // nothing was created
    let res: StdResult<TokenInfoResponse> = suite
        .app
        .wrap()
        .query_wasm_smart(&bridge, &QueryMsg::TokenInfo {});
    assert!(res.is_err());
}

// ============================================================================
// Wrap
// ============================================================================

#[test]
fn test_wrap_before_create_fails() {
    let mut suite = setup();
    let (alice, bridge) = (suite.alice.clone(), suite.bridge.clone());

    let res = suite.ram_transfer(&alice, &bridge, 1000);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("not initialized"), "got: {}", err_str);
    assert_eq!(suite.ram_bytes(&alice), 10_000);
}

#[test]
fn test_wrap_ram_transfer_pays_from_custody() {
    let mut suite = setup();
    suite.create();
    let (alice, bridge) = (suite.alice.clone(), suite.bridge.clone());

    suite.ram_transfer(&alice, &bridge, 1000).unwrap();

    assert_eq!(suite.balance(&alice), Uint128::new(1000));
    assert_eq!(suite.balance(&bridge), Uint128::new(FREE_RAM - 1000));
    assert_eq!(suite.ram_bytes(&alice), 9_000);
    assert_eq!(suite.ram_bytes(&bridge), 1000);

    // supply unchanged by a transfer-in
    let custody = suite.custody();
    assert_eq!(custody.supply, Uint128::new(FREE_RAM));
    assert_eq!(custody.wrapped_bytes, Uint128::new(1000));
    suite.assert_conserved();
}

#[test]
fn test_wrap_buy_ram_bytes_mints_to_payer() {
    let mut suite = setup();
    suite.create();
    let (bob, bridge, ledger) = (suite.bob.clone(), suite.bridge.clone(), suite.ledger.clone());

    suite
        .app
        .execute_contract(
            bob.clone(),
            ledger.clone(),
            &ResourceLedgerExecuteMsg::BuyRamBytes {
                receiver: bridge.to_string(),
                bytes: Uint64::new(2000),
            },
            &[],
        )
        .unwrap();

    assert_eq!(suite.balance(&bob), Uint128::new(2000));
    assert_eq!(suite.balance(&bridge), Uint128::new(FREE_RAM));
    assert_eq!(suite.ram_bytes(&bridge), 2000);

    let custody = suite.custody();
    assert_eq!(custody.supply, Uint128::new(FREE_RAM + 2000));
    suite.assert_conserved();

    // the purchase came out of the free pool
    let global: GlobalStateResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&ledger, &ResourceLedgerQueryMsg::GlobalState {})
        .unwrap();
    assert_eq!(global.total_ram_bytes_reserved, Uint64::new(RESERVED + 2000));
}

#[test]
fn test_wrap_buy_ram_mints_observed_bytes() {
    let mut suite = setup();
    suite.create();
    let (bob, bridge, ledger) = (suite.bob.clone(), suite.bridge.clone(), suite.ledger.clone());

    suite
        .app
        .execute_contract(
            bob.clone(),
            ledger.clone(),
            &ResourceLedgerExecuteMsg::BuyRam {
                receiver: bridge.to_string(),
            },
            &coins(10_000_000, "uluna"),
        )
        .unwrap();

    // 0.5% fee, then bancor against the market reserves
    let after_fee = 10_000_000u128 - 50_000;
    let expected = after_fee * 129_542_469_746 / (147_223_045_946 + after_fee);

    let bought = suite.ram_bytes(&bridge) as u128;
    assert_eq!(bought, expected);
    assert_eq!(suite.balance(&bob), Uint128::new(bought));
    assert_eq!(suite.custody().supply, Uint128::new(FREE_RAM + bought));
    suite.assert_conserved();
}

#[test]
fn test_purchase_for_other_account_is_ignored() {
    let mut suite = setup();
    suite.create();
    let (alice, bob, ledger) = (suite.alice.clone(), suite.bob.clone(), suite.ledger.clone());

    suite
        .app
        .execute_contract(
            bob.clone(),
            ledger,
            &ResourceLedgerExecuteMsg::BuyRamBytes {
                receiver: alice.to_string(),
                bytes: Uint64::new(500),
            },
            &[],
        )
        .unwrap();

    assert_eq!(suite.ram_bytes(&alice), 10_500);
    assert_eq!(suite.balance(&bob), Uint128::zero());
    assert_eq!(suite.custody().supply, Uint128::new(FREE_RAM));
}

#[test]
fn test_wrap_with_empty_custody_is_invariant_violation() {
    // every byte reserved at genesis: nothing minted into custody
    let mut suite = setup_with(MAX_RAM_SIZE, MAX_RAM_SIZE);
    suite.create();
    let (alice, bridge) = (suite.alice.clone(), suite.bridge.clone());
    assert_eq!(suite.balance(&bridge), Uint128::zero());

    let res = suite.ram_transfer(&alice, &bridge, 1000);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Insufficient custody"), "got: {}", err_str);

    // whole transaction rolled back, bytes stay with alice
    assert_eq!(suite.ram_bytes(&alice), 10_000);
    assert_eq!(suite.ram_bytes(&bridge), 0);
}

#[test]
fn test_purchase_past_max_supply_is_invariant_violation() {
    // only the genesis allocations are reserved, so nearly all RAM is pre-minted
    let reserved = 20_000;
    let mut suite = setup_with(MAX_RAM_SIZE, reserved);
    suite.create();
    let (bob, bridge, ledger) = (suite.bob.clone(), suite.bridge.clone(), suite.ledger.clone());
    let buy = |bytes: u64| ResourceLedgerExecuteMsg::BuyRamBytes {
        receiver: bridge.to_string(),
        bytes: Uint64::new(bytes),
    };

    // filling the reserved gap lands exactly on max supply
    suite
        .app
        .execute_contract(bob.clone(), ledger.clone(), &buy(reserved), &[])
        .unwrap();
    assert_eq!(suite.custody().supply, Uint128::from(MAX_RAM_SIZE));

    let res = suite
        .app
        .execute_contract(bob.clone(), ledger.clone(), &buy(reserved + 1), &[]);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("Supply cap exceeded"),
        "Expected SupplyCapExceeded, got: {}",
        err_str
    );

    // the purchase was rolled back on the ledger too
    assert_eq!(suite.ram_bytes(&bridge), reserved);
    assert_eq!(suite.balance(&bob), Uint128::from(reserved));
    let global: GlobalStateResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&ledger, &ResourceLedgerQueryMsg::GlobalState {})
        .unwrap();
    assert_eq!(global.total_ram_bytes_reserved, Uint64::new(2 * reserved));
    suite.assert_conserved();
}

// ============================================================================
// Unwrap
// ============================================================================

#[test]
fn test_unwrap_returns_bytes() {
    let mut suite = setup();
    suite.create();
    let (alice, bridge) = (suite.alice.clone(), suite.bridge.clone());

    suite.ram_transfer(&alice, &bridge, 1000).unwrap();
    let res = suite.transfer(&alice, &bridge, 500, None).unwrap();

    assert!(res.events.iter().any(|e| e
        .attributes
        .iter()
        .any(|a| a.key == "unwrap" && a.value == "ramtransfer")));

    assert_eq!(suite.balance(&alice), Uint128::new(500));
    assert_eq!(suite.ram_bytes(&alice), 9_500);
    assert_eq!(suite.ram_bytes(&bridge), 500);

    // tokens are retained as inventory, not burned
    let custody = suite.custody();
    assert_eq!(custody.balance, Uint128::new(FREE_RAM - 500));
    assert_eq!(custody.supply, Uint128::new(FREE_RAM));
    suite.assert_conserved();
}

#[test]
fn test_unwrap_with_ignore_memo_keeps_bytes() {
    let mut suite = setup();
    suite.create();
    let (alice, bridge) = (suite.alice.clone(), suite.bridge.clone());

    suite.ram_transfer(&alice, &bridge, 1000).unwrap();
    suite.transfer(&alice, &bridge, 300, Some("ignore")).unwrap();

    assert_eq!(suite.balance(&alice), Uint128::new(700));
    assert_eq!(suite.balance(&bridge), Uint128::new(FREE_RAM - 700));
    // no bytes moved
    assert_eq!(suite.ram_bytes(&alice), 9_000);
    assert_eq!(suite.ram_bytes(&bridge), 1000);
    assert_eq!(suite.custody().wrapped_bytes, Uint128::new(1000));
}

#[test]
fn test_unwrap_more_than_balance_fails() {
    let mut suite = setup();
    suite.create();
    let (alice, bridge) = (suite.alice.clone(), suite.bridge.clone());

    suite.ram_transfer(&alice, &bridge, 1000).unwrap();
    let res = suite.transfer(&alice, &bridge, 1001, None);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Insufficient funds"), "got: {}", err_str);

    assert_eq!(suite.ram_bytes(&bridge), 1000);
}

// ============================================================================
// Token transfers and conservation
// ============================================================================

#[test]
fn test_transfer_between_holders() {
    let mut suite = setup();
    suite.create();
    let (alice, bob, bridge) = (suite.alice.clone(), suite.bob.clone(), suite.bridge.clone());

    suite.ram_transfer(&alice, &bridge, 1000).unwrap();
    suite.transfer(&alice, &bob, 400, Some("rent")).unwrap();

    assert_eq!(suite.balance(&alice), Uint128::new(600));
    assert_eq!(suite.balance(&bob), Uint128::new(400));

    // bob can unwrap tokens he never wrapped himself
    suite.transfer(&bob, &bridge, 400, None).unwrap();
    assert_eq!(suite.ram_bytes(&bob), 10_400);
    suite.assert_conserved();

    let res = suite.transfer(&alice, &alice, 1, None);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Cannot transfer to self"), "got: {}", err_str);

    let res = suite.transfer(&alice, &bob, 0, None);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Invalid amount"), "got: {}", err_str);
}

#[test]
fn test_conservation_across_sequence() {
    let mut suite = setup();
    suite.create();
    let (alice, bob, bridge, ledger) = (
        suite.alice.clone(),
        suite.bob.clone(),
        suite.bridge.clone(),
        suite.ledger.clone(),
    );

    suite.ram_transfer(&alice, &bridge, 1000).unwrap();
    suite.assert_conserved();

    suite
        .app
        .execute_contract(
            bob.clone(),
            ledger,
            &ResourceLedgerExecuteMsg::BuyRamBytes {
                receiver: bridge.to_string(),
                bytes: Uint64::new(2000),
            },
            &[],
        )
        .unwrap();
    suite.assert_conserved();

    suite.transfer(&alice, &bridge, 500, None).unwrap();
    suite.assert_conserved();

    suite.transfer(&bob, &alice, 1500, None).unwrap();
    suite.transfer(&alice, &bridge, 2000, None).unwrap();
    suite.assert_conserved();

    suite.ram_transfer(&bob, &bridge, 250).unwrap();
    suite.assert_conserved();

    assert_eq!(suite.ram_bytes(&bridge), 750);
    assert_eq!(suite.ram_bytes(&alice), 9_000 + 500 + 2000);
    assert_eq!(suite.balance(&alice), Uint128::zero());
    assert_eq!(suite.balance(&bob), Uint128::new(750));
    assert_eq!(suite.custody().supply, Uint128::new(FREE_RAM + 2000));

    let accounts: AllAccountsResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &bridge,
            &QueryMsg::AllAccounts {
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
    let total: Uint128 = accounts.accounts.iter().map(|a| a.balance).sum();
    assert_eq!(total, Uint128::new(FREE_RAM + 2000));
}
