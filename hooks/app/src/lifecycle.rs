use {
    crate::{
        ContractVm, DenomMigration, HookCtx, HookResult, Ics4Wrapper, TransferApp, WasmHooks,
        check_acl, take_async_callback,
    },
    std::fmt::Display,
    wasm_hooks_types::{
        Addr, Event, IbcLifecycleComplete, JsonSerExt, SudoMsg,
        ibc::{Packet, TransferPayload, is_ack_error},
    },
};

impl<A, I, V, M> WasmHooks<A, I, V, M>
where
    A: TransferApp,
    I: Ics4Wrapper,
    V: ContractVm,
    M: DenomMigration,
{
    /// Relay an acknowledgement to the transfer app, then notify the async
    /// callback registered for the packet, if any.
    ///
    /// A failing callback doesn't fail the acknowledgement; its writes are
    /// discarded and a `hook_failed` event is emitted instead.
    pub fn on_acknowledgement_packet(
        &self,
        ctx: &mut HookCtx,
        packet: &Packet,
        ack: &[u8],
        relayer: Addr,
    ) -> HookResult<()> {
        if TransferPayload::decode(&packet.data).is_none() {
            return self
                .app
                .on_acknowledgement_packet(ctx, packet, ack, relayer);
        }

        self.app
            .on_acknowledgement_packet(ctx, packet, ack, relayer)?;

        let msg = SudoMsg::IbcLifecycleComplete(IbcLifecycleComplete::IbcAck {
            channel: packet.source_channel.clone(),
            sequence: packet.sequence,
            ack: ack.into(),
            success: !is_ack_error(ack),
        });

        self.notify_async_callback(ctx, packet, msg)
    }

    /// Relay a timeout to the transfer app, then notify the async callback
    /// registered for the packet, if any.
    pub fn on_timeout_packet(
        &self,
        ctx: &mut HookCtx,
        packet: &Packet,
        relayer: Addr,
    ) -> HookResult<()> {
        if TransferPayload::decode(&packet.data).is_none() {
            return self.app.on_timeout_packet(ctx, packet, relayer);
        }

        self.app.on_timeout_packet(ctx, packet, relayer)?;

        let msg = SudoMsg::IbcLifecycleComplete(IbcLifecycleComplete::IbcTimeout {
            channel: packet.source_channel.clone(),
            sequence: packet.sequence,
        });

        self.notify_async_callback(ctx, packet, msg)
    }

    fn notify_async_callback(
        &self,
        ctx: &mut HookCtx,
        packet: &Packet,
        msg: SudoMsg,
    ) -> HookResult<()> {
        let callback = match take_async_callback(
            ctx.storage.as_mut(),
            &packet.source_port,
            &packet.source_channel,
            packet.sequence,
        ) {
            Ok(Some(callback)) => callback,
            Ok(None) => return Ok(()),
            Err(err) => {
                emit_hook_failed(ctx, "failed to unmarshal async callback", err);
                return Ok(());
            },
        };

        let contract = match check_acl(ctx.storage.as_ref(), &callback) {
            Ok(contract) => contract,
            Err(err) => {
                emit_hook_failed(ctx, "failed to check ACL", err);
                return Ok(());
            },
        };

        let msg = match msg.to_json_value() {
            Ok(msg) => msg,
            Err(err) => {
                emit_hook_failed(ctx, "failed to serialize lifecycle message", err);
                return Ok(());
            },
        };

        let mut branch = ctx.branch(self.config.callback_gas_limit);

        match self.vm.sudo(&mut branch.ctx, contract, &msg) {
            Ok(()) => {
                branch.commit(ctx)?;

                #[cfg(feature = "tracing")]
                tracing::info!(
                    contract = contract.to_string(),
                    channel = packet.source_channel,
                    sequence = packet.sequence,
                    "Executed async callback"
                );

                ctx.emit(Event::Sudo { contract, msg });
            },
            Err(err) => {
                branch.discard(ctx)?;
                emit_hook_failed(ctx, "failed to execute callback", err);
            },
        }

        Ok(())
    }
}

fn emit_hook_failed<E>(ctx: &mut HookCtx, reason: &'static str, err: E)
where
    E: Display,
{
    #[cfg(feature = "tracing")]
    tracing::error!(err = err.to_string(), reason, "Async callback failed");

    ctx.emit(Event::hook_failed(reason, err));
}
