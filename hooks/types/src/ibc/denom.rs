use {
    super::Packet,
    crate::{Addr, HashExt},
    data_encoding::HEXUPPER,
};

/// Domain tag of intermediate sender derivation.
pub const SENDER_PREFIX: &str = "ibc-wasm-hook-intermediary";

/// Derive the account that holds funds received through a hook between the
/// transfer and the contract call.
///
/// The account is a pure function of the destination channel and the sender
/// on the counterparty, so the same sender over the same channel always maps
/// to the same account, while senders can't impersonate each other across
/// channels.
pub fn derive_intermediate_sender(channel: &str, original_sender: &str) -> Addr {
    let key = format!("{channel}/{original_sender}");
    Addr::derive(SENDER_PREFIX, key.as_bytes())
}

/// The voucher prefix a chain adds to denoms it receives over a channel.
pub fn denom_prefix(port: &str, channel: &str) -> String {
    format!("{port}/{channel}/")
}

/// Whether a denom sent from `source_port/source_channel` originated on the
/// receiving chain, i.e. the sender prefixed it when it was first sent out.
pub fn receiver_chain_is_source(source_port: &str, source_channel: &str, denom: &str) -> bool {
    denom.starts_with(&denom_prefix(source_port, source_channel))
}

/// A denom split into its trace path and base denom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenomTrace {
    /// Sequence of `port/channel` pairs, joined by `/`. Empty for native
    /// denoms.
    pub path: String,
    pub base_denom: String,
}

impl DenomTrace {
    /// Split a full denom into trace and base.
    ///
    /// Segments are consumed in `(port, channel-N)` pairs; everything from the
    /// first pair whose second element isn't a channel identifier onward is
    /// the base denom, so base denoms may themselves contain `/`.
    pub fn parse(raw: &str) -> Self {
        let items = raw.split('/').collect::<Vec<_>>();
        if items.len() == 1 {
            return Self {
                path: String::new(),
                base_denom: raw.to_string(),
            };
        }

        let mut split = 0;
        while split + 1 < items.len() && items.len() > 2 && is_channel_id(items[split + 1]) {
            split += 2;
        }

        let (path, base) = items.split_at(split);

        Self {
            path: path.join("/"),
            base_denom: base.join("/"),
        }
    }

    pub fn full_path(&self) -> String {
        if self.path.is_empty() {
            self.base_denom.clone()
        } else {
            format!("{}/{}", self.path, self.base_denom)
        }
    }

    /// The local representation of the denom: the base denom itself if it is
    /// native, or `ibc/{SHA256(full path) in uppercase hex}` otherwise.
    pub fn ibc_denom(&self) -> String {
        if self.path.is_empty() {
            return self.base_denom.clone();
        }

        format!("ibc/{}", HEXUPPER.encode(&self.full_path().hash256()))
    }
}

fn is_channel_id(s: &str) -> bool {
    s.strip_prefix("channel-")
        .is_some_and(|n| !n.is_empty() && n.parse::<u64>().is_ok())
}

/// Translate the denom carried by a received fungible packet into the denom
/// the funds are credited under on this chain.
pub fn local_denom(packet: &Packet, wire_denom: &str) -> String {
    if receiver_chain_is_source(&packet.source_port, &packet.source_channel, wire_denom) {
        let prefix = denom_prefix(&packet.source_port, &packet.source_channel);
        let unprefixed = &wire_denom[prefix.len()..];

        return DenomTrace::parse(unprefixed).ibc_denom();
    }

    let prefixed = format!(
        "{}{wire_denom}",
        denom_prefix(&packet.destination_port, &packet.destination_channel)
    );

    DenomTrace::parse(&prefixed).ibc_denom()
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{Binary, ibc::Height},
        proptest::prelude::*,
        test_case::test_case,
    };

    fn mock_packet() -> Packet {
        Packet {
            sequence: 1,
            source_port: "transfer".to_string(),
            source_channel: "channel-0".to_string(),
            destination_port: "transfer".to_string(),
            destination_channel: "channel-1".to_string(),
            data: Binary::empty(),
            timeout_height: Height::default(),
            timeout_timestamp: 0,
        }
    }

    #[test_case("uatom", "", "uatom"; "native")]
    #[test_case("transfer/channel-0/uatom", "transfer/channel-0", "uatom"; "one hop")]
    #[test_case(
        "transfer/channel-0/transfer/channel-5/uatom",
        "transfer/channel-0/transfer/channel-5",
        "uatom";
        "two hops"
    )]
    #[test_case("gamm/pool/1", "", "gamm/pool/1"; "slashed base denom")]
    #[test_case("transfer/channel-0/gamm/pool/1", "transfer/channel-0", "gamm/pool/1"; "slashed base denom after hop")]
    #[test_case("transfer/channel-x/uatom", "", "transfer/channel-x/uatom"; "invalid channel id")]
    fn parsing_traces(raw: &str, path: &str, base_denom: &str) {
        let trace = DenomTrace::parse(raw);

        assert_eq!(trace.path, path);
        assert_eq!(trace.base_denom, base_denom);
    }

    #[test]
    fn ibc_denom_is_uppercase_sha256_of_full_path() {
        let trace = DenomTrace::parse("transfer/channel-1/uatom");

        assert_eq!(
            trace.ibc_denom(),
            format!("ibc/{}", HEXUPPER.encode(&"transfer/channel-1/uatom".hash256()))
        );
        assert!(trace.ibc_denom()[4..].chars().all(|c| !c.is_ascii_lowercase()));
    }

    #[test]
    fn local_denom_of_foreign_token() {
        let denom = local_denom(&mock_packet(), "uatom");

        assert_eq!(denom, DenomTrace::parse("transfer/channel-1/uatom").ibc_denom());
    }

    #[test]
    fn local_denom_of_returning_native_token() {
        let denom = local_denom(&mock_packet(), "transfer/channel-0/uinit");

        assert_eq!(denom, "uinit");
    }

    #[test]
    fn local_denom_of_returning_voucher() {
        let denom = local_denom(&mock_packet(), "transfer/channel-0/transfer/channel-7/uatom");

        assert_eq!(denom, DenomTrace::parse("transfer/channel-7/uatom").ibc_denom());
    }

    #[test]
    fn intermediate_sender_depends_on_channel_and_sender() {
        let a = derive_intermediate_sender("channel-0", "cosmos1abc");

        assert_eq!(a, derive_intermediate_sender("channel-0", "cosmos1abc"));
        assert_ne!(a, derive_intermediate_sender("channel-1", "cosmos1abc"));
        assert_ne!(a, derive_intermediate_sender("channel-0", "cosmos1abd"));
        assert_eq!(
            a,
            Addr::derive(SENDER_PREFIX, b"channel-0/cosmos1abc")
        );
    }

    proptest! {
        /// Any chain of `port/channel-N` hops in front of a base denom splits
        /// back into exactly that chain and that base.
        #[test]
        fn parsing_hop_chains(
            hops in prop::collection::vec(("[a-z]{1,12}", any::<u32>()), 0..5),
            base_denom in "u[a-z]{2,8}",
        ) {
            let path = hops
                .iter()
                .map(|(port, n)| format!("{port}/channel-{n}"))
                .collect::<Vec<_>>()
                .join("/");
            let raw = if path.is_empty() {
                base_denom.clone()
            } else {
                format!("{path}/{base_denom}")
            };

            let trace = DenomTrace::parse(&raw);

            prop_assert_eq!(&trace.path, &path);
            prop_assert_eq!(&trace.base_denom, &base_denom);
            prop_assert_eq!(trace.full_path(), raw);
        }
    }
}
