use {
    crate::HookResult,
    config_parser::ConfigParser,
    serde::Deserialize,
    std::path::Path,
    wasm_hooks_types::Addr,
};

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct HooksConfig {
    /// The account allowed to update the ACL. If unset, the ACL can't be
    /// updated through [`update_acl`](crate::update_acl).
    pub authority: Option<Addr>,
    /// Gas limit of an async callback, on top of the gas remaining in the
    /// enclosing context.
    pub callback_gas_limit: Option<u64>,
}

impl HooksConfig {
    /// Load the config from a TOML file. Environment variables override its
    /// values, e.g. `CALLBACK_GAS_LIMIT=100000`.
    pub fn load<P>(path: P) -> HookResult<Self>
    where
        P: AsRef<Path>,
    {
        Ok(ConfigParser::parse(path)?)
    }
}
