use {
    wasm_hooks_storage::{Map, Serde},
    wasm_hooks_types::Addr,
};

/// Contracts that may be called by the hooks. Absence means not allowed.
pub const ACLS: Map<Addr, bool> = Map::new("acl");

/// Contracts to notify when a sent packet is acknowledged or times out.
///
/// Keyed by `(source port, source channel, sequence)`.
pub const ASYNC_CALLBACKS: Map<(&str, &str, u64), String, Serde> = Map::new("async_callback");
