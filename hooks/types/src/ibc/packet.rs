use {
    crate::{Binary, JsonDeExt, JsonSerExt, StdResult},
    serde::{Deserialize, Serialize},
};

/// Block height on the counterparty chain after which a packet times out.
/// Zero means no height timeout.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Height {
    pub revision_number: u64,
    pub revision_height: u64,
}

/// A cross-chain packet envelope.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub sequence: u64,
    pub source_port: String,
    pub source_channel: String,
    pub destination_port: String,
    pub destination_channel: String,
    pub data: Binary,
    pub timeout_height: Height,
    pub timeout_timestamp: u64,
}

/// An ICS-04 acknowledgement in its JSON wire format: `{"result":"<base64>"}`
/// or `{"error":"<string>"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Acknowledgement {
    Result(Binary),
    Error(String),
}

impl Acknowledgement {
    /// The result a transfer application returns when a packet is received
    /// successfully: a single `0x01` byte.
    pub fn success() -> Self {
        Self::Result(Binary::from([1]))
    }

    pub fn error<E>(error: E) -> Self
    where
        E: ToString,
    {
        Self::Error(error.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Result(_))
    }

    pub fn to_bytes(&self) -> StdResult<Vec<u8>> {
        self.to_json_vec()
    }
}

/// Whether raw acknowledgement bytes decode to an error acknowledgement.
///
/// Bytes that don't decode at all are not considered an error, since the
/// counterparty application may use its own acknowledgement format.
pub fn is_ack_error(bytes: &[u8]) -> bool {
    matches!(
        bytes.deserialize_json::<Acknowledgement>(),
        Ok(Acknowledgement::Error(_))
    )
}

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    #[test]
    fn ack_wire_format() {
        assert_eq!(
            Acknowledgement::success().to_bytes().unwrap(),
            br#"{"result":"AQ=="}"#
        );
        assert_eq!(
            Acknowledgement::error("oops").to_bytes().unwrap(),
            br#"{"error":"oops"}"#
        );
    }

    #[test_case(br#"{"result":"AQ=="}"#, false; "result")]
    #[test_case(br#"{"error":"oops"}"#, true; "error")]
    #[test_case(b"\x01", false; "raw bytes")]
    #[test_case(br#"{"something":"else"}"#, false; "unknown json")]
    fn detecting_error_acks(bytes: &[u8], expect: bool) {
        assert_eq!(is_ack_error(bytes), expect);
    }
}
