use {
    crate::{Addr, Coins, Json},
    serde::{Deserialize, Serialize},
};

/// An event emitted by the hooks middleware or by a contract it invoked.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// An acknowledgement or timeout callback could not be delivered.
    HookFailed { reason: String, error: String },
    /// The receive path returned an error acknowledgement.
    AckError { error: String },
    /// A contract was executed on behalf of a packet.
    Execute {
        contract: Addr,
        sender: Addr,
        funds: Coins,
    },
    /// A contract was called by the middleware itself.
    Sudo { contract: Addr, msg: Json },
}

impl Event {
    pub fn hook_failed<R, E>(reason: R, error: E) -> Self
    where
        R: Into<String>,
        E: ToString,
    {
        Self::HookFailed {
            reason: reason.into(),
            error: error.to_string(),
        }
    }

    pub fn ack_error<E>(error: E) -> Self
    where
        E: ToString,
    {
        Self::AckError {
            error: error.to_string(),
        }
    }
}
