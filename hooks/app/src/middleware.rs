use {
    crate::{
        Acl, ContractVm, DenomMigration, HookCtx, HookResult, HooksConfig, Ics4Wrapper,
        NoMigration, TransferApp, purge_async_callbacks, query_acls, update_acl,
    },
    wasm_hooks_types::{Addr, StdResult},
};

/// Middleware between the channel layer and a transfer application, which
/// executes contracts named in the memos of transfer packets and notifies
/// contracts when packets they sent complete.
pub struct WasmHooks<A, I, V, M = NoMigration> {
    pub(crate) app: A,
    pub(crate) ics4: I,
    pub(crate) vm: V,
    pub(crate) migration: M,
    pub(crate) config: HooksConfig,
}

impl<A, I, V> WasmHooks<A, I, V>
where
    A: TransferApp,
    I: Ics4Wrapper,
    V: ContractVm,
{
    pub fn new(app: A, ics4: I, vm: V, config: HooksConfig) -> Self {
        Self::new_with_migration(app, ics4, vm, NoMigration, config)
    }
}

impl<A, I, V, M> WasmHooks<A, I, V, M>
where
    A: TransferApp,
    I: Ics4Wrapper,
    V: ContractVm,
    M: DenomMigration,
{
    pub fn new_with_migration(app: A, ics4: I, vm: V, migration: M, config: HooksConfig) -> Self {
        Self {
            app,
            ics4,
            vm,
            migration,
            config,
        }
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn ics4(&self) -> &I {
        &self.ics4
    }

    pub fn vm(&self) -> &V {
        &self.vm
    }

    pub fn config(&self) -> &HooksConfig {
        &self.config
    }

    pub fn update_acl(
        &self,
        ctx: &mut HookCtx,
        sender: Addr,
        contract: Addr,
        allowed: bool,
    ) -> HookResult<()> {
        update_acl(
            ctx.storage.as_mut(),
            self.config.authority,
            sender,
            contract,
            allowed,
        )
    }

    pub fn query_acls(
        &self,
        ctx: &HookCtx,
        start_after: Option<Addr>,
        limit: Option<u32>,
    ) -> StdResult<Vec<Acl>> {
        query_acls(ctx.storage.as_ref(), start_after, limit)
    }

    /// Drop the callbacks of packets that can no longer be acknowledged or
    /// time out, because their channel was closed.
    pub fn on_channel_closed(&self, ctx: &mut HookCtx, port: &str, channel: &str) -> usize {
        let purged = purge_async_callbacks(ctx.storage.as_mut(), port, channel);

        #[cfg(feature = "tracing")]
        tracing::info!(port, channel, purged, "Purged async callbacks of closed channel");

        purged
    }
}
