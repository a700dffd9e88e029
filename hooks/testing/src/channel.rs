use {
    std::collections::{BTreeMap, BTreeSet},
    wasm_hooks::{HookCtx, HookError, HookResult, Ics4Wrapper},
    wasm_hooks_types::{
        Shared,
        ibc::{Height, Packet},
    },
};

/// The channel on the counterparty chain that every mock channel connects to.
pub const COUNTERPARTY_CHANNEL: &str = "channel-99";

#[derive(Default, Debug)]
struct ChannelState {
    next_sequences: BTreeMap<(String, String), u64>,
    closed: BTreeSet<(String, String)>,
    sent: Vec<Packet>,
}

/// A channel layer that assigns sequences, starting from 1 on each channel,
/// and keeps every packet it sends.
#[derive(Default, Clone)]
pub struct MockChannel {
    state: Shared<ChannelState>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to send further packets on the channel.
    pub fn close(&self, port: &str, channel: &str) {
        self.state
            .write_access()
            .closed
            .insert((port.to_string(), channel.to_string()));
    }

    pub fn sent(&self) -> Vec<Packet> {
        self.state.read_access().sent.clone()
    }

    pub fn last_sent(&self) -> Option<Packet> {
        self.state.read_access().sent.last().cloned()
    }
}

impl Ics4Wrapper for MockChannel {
    fn send_packet(
        &self,
        _ctx: &mut HookCtx,
        source_port: &str,
        source_channel: &str,
        timeout_height: Height,
        timeout_timestamp: u64,
        data: Vec<u8>,
    ) -> HookResult<u64> {
        let mut state = self.state.write_access();
        let key = (source_port.to_string(), source_channel.to_string());

        if state.closed.contains(&key) {
            return Err(HookError::channel(format!(
                "channel {source_port}/{source_channel} is closed"
            )));
        }

        let sequence = state.next_sequences.entry(key).or_insert(1);
        let packet = Packet {
            sequence: *sequence,
            source_port: source_port.to_string(),
            source_channel: source_channel.to_string(),
            destination_port: source_port.to_string(),
            destination_channel: COUNTERPARTY_CHANNEL.to_string(),
            data: data.into(),
            timeout_height,
            timeout_timestamp,
        };
        *sequence += 1;

        let sequence = packet.sequence;
        state.sent.push(packet);

        Ok(sequence)
    }
}
