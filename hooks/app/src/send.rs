use {
    crate::{
        ContractVm, DenomMigration, HookCtx, HookResult, Ics4Wrapper, TransferApp, WasmHooks,
        register_async_callback,
    },
    wasm_hooks_types::{
        HookData, parse_memo, strip_async_callback,
        ibc::{Height, TransferPayload},
    },
};

impl<A, I, V, M> WasmHooks<A, I, V, M>
where
    A: TransferApp,
    I: Ics4Wrapper,
    V: ContractVm,
    M: DenomMigration,
{
    /// Send a packet, registering the async callback named in its memo once
    /// the packet is assigned a sequence.
    ///
    /// The callback is removed from the memo before the packet leaves the
    /// chain. Packets without one are sent as is.
    pub fn on_send_packet(
        &self,
        ctx: &mut HookCtx,
        source_port: &str,
        source_channel: &str,
        timeout_height: Height,
        timeout_timestamp: u64,
        data: &[u8],
    ) -> HookResult<u64> {
        let Some(mut payload) = TransferPayload::decode(data) else {
            return self.ics4.send_packet(
                ctx,
                source_port,
                source_channel,
                timeout_height,
                timeout_timestamp,
                data.to_vec(),
            );
        };

        let (callback, message) = match parse_memo(payload.memo())? {
            Some(HookData {
                async_callback: Some(callback),
                message,
            }) => (callback, message),
            _ => {
                return self.ics4.send_packet(
                    ctx,
                    source_port,
                    source_channel,
                    timeout_height,
                    timeout_timestamp,
                    data.to_vec(),
                );
            },
        };

        let memo = strip_async_callback(payload.memo(), message.as_ref())?;
        payload.set_memo(memo);

        let sequence = self.ics4.send_packet(
            ctx,
            source_port,
            source_channel,
            timeout_height,
            timeout_timestamp,
            payload.to_json_vec()?,
        )?;

        register_async_callback(
            ctx.storage.as_mut(),
            source_port,
            source_channel,
            sequence,
            &callback,
        )?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            port = source_port,
            channel = source_channel,
            sequence,
            callback = callback.as_str(),
            "Registered async callback"
        );

        Ok(sequence)
    }
}
