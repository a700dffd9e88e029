mod address;
mod binary;
mod buffer;
mod coins;
mod error;
mod event;
mod hashers;
mod hook;
pub mod ibc;
mod lifecycle;
mod serializers;
mod shared;
mod storage;
mod utils;

pub use {
    address::*, binary::*, buffer::*, coins::*, error::*, event::*, hashers::*, hook::*,
    lifecycle::*, serializers::*, shared::*, storage::*, utils::*,
};

/// A JSON value of arbitrary shape, e.g. a contract message.
pub type Json = serde_json::Value;

/// A JSON object, e.g. a decoded packet memo.
pub type JsonObject = serde_json::Map<String, Json>;
