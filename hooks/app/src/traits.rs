use {
    crate::{HookCtx, HookResult},
    wasm_hooks_types::{
        Addr, Json, MsgExecuteContract,
        ibc::{Acknowledgement, Height, Packet},
    },
};

/// The transfer application the middleware wraps.
pub trait TransferApp {
    /// Errors are reported through the returned acknowledgement.
    fn on_recv_packet(&self, ctx: &mut HookCtx, packet: &Packet, relayer: Addr) -> Acknowledgement;

    fn on_acknowledgement_packet(
        &self,
        ctx: &mut HookCtx,
        packet: &Packet,
        ack: &[u8],
        relayer: Addr,
    ) -> HookResult<()>;

    fn on_timeout_packet(&self, ctx: &mut HookCtx, packet: &Packet, relayer: Addr)
        -> HookResult<()>;
}

/// The channel layer below the middleware on the send path.
pub trait Ics4Wrapper {
    /// Send a packet, returning the sequence it was assigned.
    fn send_packet(
        &self,
        ctx: &mut HookCtx,
        source_port: &str,
        source_channel: &str,
        timeout_height: Height,
        timeout_timestamp: u64,
        data: Vec<u8>,
    ) -> HookResult<u64>;
}

pub trait ContractVm {
    /// Execute a contract on behalf of `msg.sender`, transferring `msg.funds`
    /// from the sender to the contract first.
    ///
    /// Implementations validate the addresses in the message.
    fn execute(&self, ctx: &mut HookCtx, msg: &MsgExecuteContract) -> HookResult<()>;

    /// Call a contract's privileged entry point.
    fn sudo(&self, ctx: &mut HookCtx, contract: Addr, msg: &Json) -> HookResult<()>;
}

/// Lookup of denoms that were migrated from their IBC form to a native L2
/// denom.
pub trait DenomMigration {
    /// `Ok(None)` if the denom wasn't migrated.
    fn ibc_to_l2_denom(&self, ctx: &HookCtx, ibc_denom: &str) -> HookResult<Option<String>>;
}

/// A chain without migrated denoms.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMigration;

impl DenomMigration for NoMigration {
    fn ibc_to_l2_denom(&self, _ctx: &HookCtx, _ibc_denom: &str) -> HookResult<Option<String>> {
        Ok(None)
    }
}
