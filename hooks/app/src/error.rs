use {
    std::fmt::Display,
    wasm_hooks_types::{Addr, StdError},
};

#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    Config(#[from] config_parser::Error),

    #[error("invalid packet: {reason}")]
    InvalidPacket { reason: String },

    #[error("receiver is not properly set: expecting `{contract}`, got `{receiver}`")]
    ReceiverMismatch { contract: String, receiver: String },

    #[error("contract `{contract}` is not allowed to be used in ibchooks")]
    NotAllowed { contract: String },

    #[error("invalid amount: {amount}")]
    InvalidAmount { amount: String },

    #[error("sender `{sender}` is not the hooks authority")]
    Unauthorized { sender: Addr },

    #[error("contract `{contract}` failed: {msg}")]
    Contract { contract: String, msg: String },

    #[error("transfer failed: {reason}")]
    Transfer { reason: String },

    #[error("channel error: {reason}")]
    Channel { reason: String },
}

impl HookError {
    pub fn invalid_packet<R>(reason: R) -> Self
    where
        R: ToString,
    {
        Self::InvalidPacket {
            reason: reason.to_string(),
        }
    }

    pub fn not_allowed<C>(contract: C) -> Self
    where
        C: Into<String>,
    {
        Self::NotAllowed {
            contract: contract.into(),
        }
    }

    pub fn contract<C, M>(contract: C, msg: M) -> Self
    where
        C: Display,
        M: ToString,
    {
        Self::Contract {
            contract: contract.to_string(),
            msg: msg.to_string(),
        }
    }

    pub fn transfer<R>(reason: R) -> Self
    where
        R: ToString,
    {
        Self::Transfer {
            reason: reason.to_string(),
        }
    }

    pub fn channel<R>(reason: R) -> Self
    where
        R: ToString,
    {
        Self::Channel {
            reason: reason.to_string(),
        }
    }
}

pub type HookResult<T> = core::result::Result<T, HookError>;
