use {
    crate::{ContractVm, HookCtx, HookResult},
    wasm_hooks_types::{Addr, JsonDeExt, MsgExecuteContract},
};

/// Executes the contract message attached to a bridge deposit.
pub struct BridgeHook<V> {
    vm: V,
}

impl<V> BridgeHook<V>
where
    V: ContractVm,
{
    pub fn new(vm: V) -> Self {
        Self { vm }
    }

    /// Decode the message strictly and execute it as `sender`, whatever
    /// sender the message itself names.
    pub fn hook(&self, ctx: &mut HookCtx, sender: Addr, msg_bytes: &[u8]) -> HookResult<()> {
        let mut msg: MsgExecuteContract = msg_bytes.deserialize_json()?;
        msg.sender = sender.to_string();

        self.vm.execute(ctx, &msg)?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            contract = msg.contract,
            sender = msg.sender,
            "Executed bridge hook"
        );

        Ok(())
    }
}
