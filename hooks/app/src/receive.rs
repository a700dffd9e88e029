use {
    crate::{
        ContractVm, DenomMigration, HookCtx, HookError, HookResult, Ics4Wrapper, TransferApp,
        WasmHooks, check_acl,
    },
    std::fmt::Display,
    wasm_hooks_types::{
        Addr, Coins, Event, HookData, MsgExecuteContract, parse_memo,
        ibc::{Acknowledgement, Packet, TransferPayload, derive_intermediate_sender, local_denom},
    },
};

impl<A, I, V, M> WasmHooks<A, I, V, M>
where
    A: TransferApp,
    I: Ics4Wrapper,
    V: ContractVm,
    M: DenomMigration,
{
    /// Receive a packet, executing the contract named in its memo with the
    /// transferred tokens.
    ///
    /// The tokens are credited to an intermediate account derived from the
    /// packet's channel and sender, which then calls the contract. Packets
    /// without an execute message are handed to the transfer app as is.
    pub fn on_recv_packet(
        &self,
        ctx: &mut HookCtx,
        packet: &Packet,
        relayer: Addr,
    ) -> Acknowledgement {
        let Some(payload) = TransferPayload::decode(&packet.data) else {
            return self.app.on_recv_packet(ctx, packet, relayer);
        };

        let message = match parse_memo(payload.memo()) {
            Ok(Some(HookData {
                message: Some(message),
                ..
            })) => message,
            Ok(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    channel = packet.destination_channel,
                    sequence = packet.sequence,
                    "Packet not routed to hooks"
                );

                return self.app.on_recv_packet(ctx, packet, relayer);
            },
            Err(err) => return new_emit_error_ack(ctx, err),
        };

        match self.do_recv_hook(ctx, packet, relayer, payload, message) {
            Ok(ack) => ack,
            Err(err) => new_emit_error_ack(ctx, err),
        }
    }

    fn do_recv_hook(
        &self,
        ctx: &mut HookCtx,
        packet: &Packet,
        relayer: Addr,
        mut payload: TransferPayload,
        mut message: MsgExecuteContract,
    ) -> HookResult<Acknowledgement> {
        if payload.receiver() != message.contract {
            return Err(HookError::ReceiverMismatch {
                contract: message.contract,
                receiver: payload.receiver().to_string(),
            });
        }

        let contract = check_acl(ctx.storage.as_ref(), &message.contract)?;

        // Amounts are held as `u128`. Larger ones are rejected before the
        // transfer app credits anything.
        let amount = match &payload {
            TransferPayload::Fungible(data) => Some(data.amount.parse::<u128>().map_err(|_| {
                HookError::InvalidAmount {
                    amount: data.amount.clone(),
                }
            })?),
            TransferPayload::NonFungible(_) => None,
        };

        let intermediate_sender =
            derive_intermediate_sender(&packet.destination_channel, payload.sender());

        payload.set_receiver(intermediate_sender.to_string());

        let packet = Packet {
            data: payload.to_json_vec()?.into(),
            ..packet.clone()
        };

        let ack = self.app.on_recv_packet(ctx, &packet, relayer);
        if !ack.is_success() {
            return Ok(ack);
        }

        // Non-fungible transfers carry no coins; the message keeps its own
        // funds, if any.
        if let (TransferPayload::Fungible(data), Some(amount)) = (&payload, amount) {
            let mut denom = local_denom(&packet, &data.denom);
            if let Some(l2_denom) = self.migration.ibc_to_l2_denom(ctx, &denom)? {
                denom = l2_denom;
            }

            message.funds = Coins::one(denom, amount)?;
        }

        message.sender = intermediate_sender.to_string();

        let mut branch = ctx.branch(None);

        if let Err(err) = self.vm.execute(&mut branch.ctx, &message) {
            branch.discard(ctx)?;
            return Err(err);
        }

        branch.commit(ctx)?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            contract = message.contract,
            sender = message.sender,
            funds = message.funds.to_string(),
            "Executed hook"
        );

        ctx.emit(Event::Execute {
            contract,
            sender: intermediate_sender,
            funds: message.funds,
        });

        Ok(ack)
    }
}

/// Build an error acknowledgement, emitting an event describing the error.
pub(crate) fn new_emit_error_ack<E>(ctx: &mut HookCtx, err: E) -> Acknowledgement
where
    E: Display,
{
    let error = format!("ibc wasm hook error: {err}");

    #[cfg(feature = "tracing")]
    tracing::warn!(err = error, "Returning error acknowledgement");

    ctx.emit(Event::ack_error(&error));

    Acknowledgement::Error(error)
}
