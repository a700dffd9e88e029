use {
    crate::Binary,
    serde::{Deserialize, Serialize},
};

/// Privileged messages the middleware sends to contracts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SudoMsg {
    /// The lifecycle of a packet sent with an async callback has completed.
    IbcLifecycleComplete(IbcLifecycleComplete),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IbcLifecycleComplete {
    IbcAck {
        channel: String,
        sequence: u64,
        /// Raw acknowledgement bytes as relayed from the counterparty.
        ack: Binary,
        success: bool,
    },
    IbcTimeout {
        channel: String,
        sequence: u64,
    },
}

#[cfg(test)]
mod tests {
    use {super::*, crate::JsonSerExt, serde_json::json};

    #[test]
    fn ack_wire_format() {
        let msg = SudoMsg::IbcLifecycleComplete(IbcLifecycleComplete::IbcAck {
            channel: "channel-0".to_string(),
            sequence: 7,
            ack: Binary::from(br#"{"result":"AQ=="}"#.to_vec()),
            success: true,
        });

        assert_eq!(
            msg.to_json_value().unwrap(),
            json!({
                "ibc_lifecycle_complete": {
                    "ibc_ack": {
                        "channel": "channel-0",
                        "sequence": 7,
                        "ack": "eyJyZXN1bHQiOiJBUT09In0=",
                        "success": true,
                    }
                }
            })
        );
    }

    #[test]
    fn timeout_wire_format() {
        let msg = SudoMsg::IbcLifecycleComplete(IbcLifecycleComplete::IbcTimeout {
            channel: "channel-1".to_string(),
            sequence: 3,
        });

        assert_eq!(
            msg.to_json_value().unwrap(),
            json!({
                "ibc_lifecycle_complete": {
                    "ibc_timeout": {
                        "channel": "channel-1",
                        "sequence": 3,
                    }
                }
            })
        );
    }
}
