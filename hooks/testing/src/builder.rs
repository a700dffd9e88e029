use {
    crate::{
        MockChannel, MockMigration, MockTransferApp, MockVm, TestSuite, mint,
        tracing::setup_tracing_subscriber,
    },
    tracing::Level,
    wasm_hooks::{HooksConfig, WasmHooks, set_allowed},
    wasm_hooks_types::{Addr, MockStorage, Shared},
};

const DEFAULT_TRACING_LEVEL: Level = Level::INFO;
const DEFAULT_GAS_LIMIT: u64 = 1_000_000;
const DEFAULT_RELAYER: Addr = Addr::mock(255);

pub struct TestBuilder {
    tracing_level: Option<Level>,
    gas_limit: Option<u64>,
    config: HooksConfig,
    // Counter contracts, and whether each is on the ACL.
    counters: Vec<(Addr, bool)>,
    balances: Vec<(Addr, String, u128)>,
    migration: MockMigration,
}

// Clippy incorrectly thinks we can derive `Default` here, which we can't.
#[allow(clippy::new_without_default)]
impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tracing_level: Some(DEFAULT_TRACING_LEVEL),
            gas_limit: None,
            config: HooksConfig::default(),
            counters: Vec::new(),
            balances: Vec::new(),
            migration: MockMigration::new(),
        }
    }

    /// Use `None` to leave the tracing subscriber unset.
    pub fn set_tracing_level(mut self, level: Option<Level>) -> Self {
        self.tracing_level = level;
        self
    }

    pub fn set_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn set_authority(mut self, authority: Addr) -> Self {
        self.config.authority = Some(authority);
        self
    }

    pub fn set_callback_gas_limit(mut self, gas_limit: u64) -> Self {
        self.config.callback_gas_limit = Some(gas_limit);
        self
    }

    pub fn set_config(mut self, config: HooksConfig) -> Self {
        self.config = config;
        self
    }

    pub fn add_counter(mut self, contract: Addr, allowed: bool) -> Self {
        self.counters.push((contract, allowed));
        self
    }

    pub fn add_balance<D>(mut self, owner: Addr, denom: D, amount: u128) -> Self
    where
        D: Into<String>,
    {
        self.balances.push((owner, denom.into(), amount));
        self
    }

    pub fn add_migration<D1, D2>(mut self, ibc_denom: D1, l2_denom: D2) -> Self
    where
        D1: Into<String>,
        D2: Into<String>,
    {
        self.migration.add(ibc_denom.into(), l2_denom.into());
        self
    }

    pub fn build(self) -> TestSuite {
        if let Some(level) = self.tracing_level {
            setup_tracing_subscriber(level);
        }

        let mut storage = Shared::new(MockStorage::new());

        for (contract, allowed) in self.counters {
            MockVm::instantiate_counter(&mut storage, contract)
                .unwrap_or_else(|err| panic!("failed to instantiate counter: {err}"));

            if allowed {
                set_allowed(&mut storage, contract, true)
                    .unwrap_or_else(|err| panic!("failed to allow counter: {err}"));
            }
        }

        for (owner, denom, amount) in self.balances {
            mint(&mut storage, owner, &denom, amount)
                .unwrap_or_else(|err| panic!("failed to mint initial balance: {err}"));
        }

        let hooks = WasmHooks::new_with_migration(
            MockTransferApp::new_with_migration(self.migration.clone()),
            MockChannel::new(),
            MockVm::new(),
            self.migration,
            self.config,
        );

        TestSuite::new(
            storage,
            hooks,
            DEFAULT_RELAYER,
            self.gas_limit.unwrap_or(DEFAULT_GAS_LIMIT),
        )
    }
}
