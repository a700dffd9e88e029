use {
    std::collections::BTreeMap,
    wasm_hooks::{DenomMigration, HookCtx, HookResult},
};

/// Denoms migrated from their IBC form to a native L2 denom.
#[derive(Default, Debug, Clone)]
pub struct MockMigration {
    denoms: BTreeMap<String, String>,
}

impl MockMigration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, ibc_denom: String, l2_denom: String) {
        self.denoms.insert(ibc_denom, l2_denom);
    }

    pub fn l2_denom(&self, ibc_denom: &str) -> Option<&String> {
        self.denoms.get(ibc_denom)
    }
}

impl DenomMigration for MockMigration {
    fn ibc_to_l2_denom(&self, _ctx: &HookCtx, ibc_denom: &str) -> HookResult<Option<String>> {
        Ok(self.l2_denom(ibc_denom).cloned())
    }
}
