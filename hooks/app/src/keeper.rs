use {
    crate::{ACLS, ASYNC_CALLBACKS, HookError, HookResult},
    serde::{Deserialize, Serialize},
    std::str::FromStr,
    wasm_hooks_storage::Bound,
    wasm_hooks_types::{Addr, Order, StdResult, Storage},
};

pub const DEFAULT_PAGE_LIMIT: u32 = 30;

/// An entry of the contract allow-list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acl {
    pub address: Addr,
    pub allowed: bool,
}

// ------------------------------------ acl ------------------------------------

pub fn is_allowed(storage: &dyn Storage, contract: Addr) -> StdResult<bool> {
    ACLS.may_load(storage, contract)
        .map(|allowed| allowed.unwrap_or(false))
}

pub fn set_allowed(storage: &mut dyn Storage, contract: Addr, allowed: bool) -> StdResult<()> {
    ACLS.save(storage, contract, &allowed)
}

/// Parse the contract address and check it against the allow-list, returning
/// the parsed address if the contract may be called.
pub fn check_acl(storage: &dyn Storage, contract: &str) -> HookResult<Addr> {
    let addr = Addr::from_str(contract)?;

    if !is_allowed(storage, addr)? {
        return Err(HookError::not_allowed(contract));
    }

    Ok(addr)
}

/// Set a contract's ACL entry on behalf of `sender`, who must be the hooks
/// authority.
pub fn update_acl(
    storage: &mut dyn Storage,
    authority: Option<Addr>,
    sender: Addr,
    contract: Addr,
    allowed: bool,
) -> HookResult<()> {
    if authority != Some(sender) {
        return Err(HookError::Unauthorized { sender });
    }

    set_allowed(storage, contract, allowed)?;

    #[cfg(feature = "tracing")]
    tracing::info!(
        contract = contract.to_string(),
        allowed,
        "Updated ACL"
    );

    Ok(())
}

pub fn query_acls(
    storage: &dyn Storage,
    start_after: Option<Addr>,
    limit: Option<u32>,
) -> StdResult<Vec<Acl>> {
    let start = start_after.map(Bound::exclusive);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);

    ACLS.range(storage, start, None, Order::Ascending)
        .take(limit as usize)
        .map(|res| res.map(|(address, allowed)| Acl { address, allowed }))
        .collect()
}

// ------------------------------ async callbacks ------------------------------

pub fn register_async_callback(
    storage: &mut dyn Storage,
    port: &str,
    channel: &str,
    sequence: u64,
    contract: &str,
) -> StdResult<()> {
    ASYNC_CALLBACKS.save(storage, (port, channel, sequence), &contract.to_string())
}

/// Load and remove the callback registered for a packet. `Ok(None)` if there
/// is none. An entry that fails to decode is removed all the same.
pub fn take_async_callback(
    storage: &mut dyn Storage,
    port: &str,
    channel: &str,
    sequence: u64,
) -> StdResult<Option<String>> {
    ASYNC_CALLBACKS.take(storage, (port, channel, sequence))
}

/// Remove every callback still pending on a channel, returning how many were
/// removed.
pub fn purge_async_callbacks(storage: &mut dyn Storage, port: &str, channel: &str) -> usize {
    ASYNC_CALLBACKS
        .prefix(port)
        .append(channel)
        .clear(storage)
}

// ----------------------------------- tests -----------------------------------
