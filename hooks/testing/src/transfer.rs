use {
    crate::{MockMigration, mint},
    std::str::FromStr,
    wasm_hooks::{HookCtx, HookError, HookResult, TransferApp},
    wasm_hooks_storage::Map,
    wasm_hooks_types::{
        Addr, Shared, StdResult, Storage,
        ibc::{Acknowledgement, Packet, TransferPayload, local_denom},
    },
};

/// Owners of non-fungible tokens, keyed by `(class id, token id)`.
pub const NFT_OWNERS: Map<(&str, &str), Addr> = Map::new("nft/owner");

pub fn query_nft_owner(storage: &dyn Storage, class_id: &str, token_id: &str) -> StdResult<Option<Addr>> {
    NFT_OWNERS.may_load(storage, (class_id, token_id))
}

#[derive(Default, Debug)]
struct TransferState {
    received: Vec<Packet>,
    acknowledged: Vec<(Packet, Vec<u8>)>,
    timed_out: Vec<Packet>,
    fail_recv: bool,
    fail_lifecycle: bool,
}

/// A transfer app that credits received tokens by minting them, and records
/// every packet event it is handed.
///
/// The record lives outside of storage, so it survives discarded branches.
#[derive(Default, Clone)]
pub struct MockTransferApp {
    state: Shared<TransferState>,
    migration: MockMigration,
}

impl MockTransferApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit migrated denoms in their L2 form.
    pub fn new_with_migration(migration: MockMigration) -> Self {
        Self {
            state: Shared::default(),
            migration,
        }
    }

    /// Make every subsequent receive return an error acknowledgement.
    pub fn set_fail_recv(&self, fail: bool) {
        self.state.write_access().fail_recv = fail;
    }

    /// Make every subsequent acknowledgement and timeout return an error.
    pub fn set_fail_lifecycle(&self, fail: bool) {
        self.state.write_access().fail_lifecycle = fail;
    }

    pub fn received(&self) -> Vec<Packet> {
        self.state.read_access().received.clone()
    }

    pub fn acknowledged(&self) -> Vec<(Packet, Vec<u8>)> {
        self.state.read_access().acknowledged.clone()
    }

    pub fn timed_out(&self) -> Vec<Packet> {
        self.state.read_access().timed_out.clone()
    }

    fn credit(&self, storage: &mut dyn Storage, packet: &Packet) -> HookResult<()> {
        match TransferPayload::decode(&packet.data) {
            Some(TransferPayload::Fungible(data)) => {
                let receiver = Addr::from_str(&data.receiver)?;
                let amount = data.amount.parse::<u128>().map_err(|_| {
                    HookError::transfer(format!("invalid amount: {}", data.amount))
                })?;
                let denom = local_denom(packet, &data.denom);
                let denom = self.migration.l2_denom(&denom).unwrap_or(&denom);

                mint(storage, receiver, denom, amount)
            },
            Some(TransferPayload::NonFungible(data)) => {
                let receiver = Addr::from_str(&data.receiver)?;

                for token_id in &data.token_ids {
                    NFT_OWNERS.save(storage, (data.class_id.as_str(), token_id.as_str()), &receiver)?;
                }

                Ok(())
            },
            None => Err(HookError::invalid_packet("unknown packet data")),
        }
    }
}

impl TransferApp for MockTransferApp {
    fn on_recv_packet(&self, ctx: &mut HookCtx, packet: &Packet, _relayer: Addr) -> Acknowledgement {
        let fail = {
            let mut state = self.state.write_access();
            state.received.push(packet.clone());
            state.fail_recv
        };

        if fail {
            return Acknowledgement::error("mock transfer app refused the packet");
        }

        match self.credit(ctx.storage.as_mut(), packet) {
            Ok(()) => Acknowledgement::success(),
            Err(err) => Acknowledgement::error(err),
        }
    }

    fn on_acknowledgement_packet(
        &self,
        _ctx: &mut HookCtx,
        packet: &Packet,
        ack: &[u8],
        _relayer: Addr,
    ) -> HookResult<()> {
        let mut state = self.state.write_access();
        state.acknowledged.push((packet.clone(), ack.to_vec()));

        if state.fail_lifecycle {
            return Err(HookError::transfer("mock transfer app refused the ack"));
        }

        Ok(())
    }

    fn on_timeout_packet(&self, _ctx: &mut HookCtx, packet: &Packet, _relayer: Addr) -> HookResult<()> {
        let mut state = self.state.write_access();
        state.timed_out.push(packet.clone());

        if state.fail_lifecycle {
            return Err(HookError::transfer("mock transfer app refused the timeout"));
        }

        Ok(())
    }
}
