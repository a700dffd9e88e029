use wasm_hooks_types::{
    Binary, JsonSerExt,
    ibc::{FungibleTokenPacketData, Height, NonFungibleTokenPacketData, Packet},
};

pub const TRANSFER_PORT: &str = "transfer";
pub const NFT_TRANSFER_PORT: &str = "nft-transfer";

/// The channel packets arrive from, on the counterparty chain.
pub const SOURCE_CHANNEL: &str = "channel-0";
/// The channel packets arrive on, on this chain.
pub const DESTINATION_CHANNEL: &str = "channel-1";

/// An address on the counterparty chain.
pub const REMOTE_SENDER: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";

pub fn ics20_data(denom: &str, amount: &str, sender: &str, receiver: &str, memo: &str) -> FungibleTokenPacketData {
    FungibleTokenPacketData {
        denom: denom.to_string(),
        amount: amount.to_string(),
        sender: sender.to_string(),
        receiver: receiver.to_string(),
        memo: memo.to_string(),
    }
}

pub fn ics721_data(class_id: &str, token_ids: &[&str], sender: &str, receiver: &str, memo: &str) -> NonFungibleTokenPacketData {
    NonFungibleTokenPacketData {
        class_id: class_id.to_string(),
        class_uri: None,
        class_data: None,
        token_ids: token_ids.iter().map(|id| id.to_string()).collect(),
        token_uris: None,
        token_data: None,
        sender: sender.to_string(),
        receiver: receiver.to_string(),
        memo: memo.to_string(),
    }
}

/// A packet arriving on `transfer/channel-1` from `transfer/channel-0`.
pub fn incoming_packet(sequence: u64, data: Binary) -> Packet {
    incoming_packet_on(TRANSFER_PORT, sequence, data)
}

pub fn incoming_packet_on(port: &str, sequence: u64, data: Binary) -> Packet {
    Packet {
        sequence,
        source_port: port.to_string(),
        source_channel: SOURCE_CHANNEL.to_string(),
        destination_port: port.to_string(),
        destination_channel: DESTINATION_CHANNEL.to_string(),
        data,
        timeout_height: Height::default(),
        timeout_timestamp: 0,
    }
}

pub fn ics20_packet(sequence: u64, data: &FungibleTokenPacketData) -> Packet {
    incoming_packet(sequence, to_binary(data))
}

pub fn ics721_packet(sequence: u64, data: &NonFungibleTokenPacketData) -> Packet {
    incoming_packet_on(NFT_TRANSFER_PORT, sequence, to_binary(data))
}

fn to_binary<T>(data: &T) -> Binary
where
    T: JsonSerExt,
{
    data.to_json_vec()
        .unwrap_or_else(|err| panic!("failed to serialize packet data: {err}"))
        .into()
}
