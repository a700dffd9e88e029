use {
    crate::{Coins, Json, JsonObject, JsonSerExt, StdError, StdResult},
    serde::{Deserialize, Deserializer, Serialize},
    serde_with::skip_serializing_none,
};

/// The top-level memo key under which hook instructions live.
pub const WASM_HOOK_MEMO_KEY: &str = "wasm";

/// An instruction to execute a contract.
///
/// Both the receive hook and the bridge hook consume this format. `sender` is
/// always overwritten by the middleware before execution, so whatever the
/// counterparty puts there is ignored. `contract` is kept as a string so that
/// a malformed address is reported by the access check rather than as a
/// decoding failure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MsgExecuteContract {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sender: String,
    pub contract: String,
    pub msg: Json,
    #[serde(default, skip_serializing_if = "Coins::is_empty")]
    pub funds: Coins,
}

/// The value found under the `wasm` key of a packet memo.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HookData {
    /// Contract call to make when the packet is received on the counterparty.
    #[serde(default)]
    pub message: Option<MsgExecuteContract>,
    /// Contract to notify, on this chain, when the packet is acknowledged or
    /// times out. Never leaves the chain.
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub async_callback: Option<String>,
}

fn deserialize_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let maybe_str = Option::<String>::deserialize(deserializer)?;
    Ok(maybe_str.filter(|s| !s.is_empty()))
}

/// Parse the memo of a transfer payload, returning the memo as a JSON object
/// if it is one and contains the `wasm` key.
///
/// Empty memos, memos that aren't JSON objects, and objects without the key
/// all mean the packet isn't routed to the hooks.
pub fn routed_memo(memo: &str) -> Option<JsonObject> {
    if memo.is_empty() {
        return None;
    }

    let object = serde_json::from_str::<JsonObject>(memo).ok()?;

    object.contains_key(WASM_HOOK_MEMO_KEY).then_some(object)
}

/// Parse the hook data out of a memo.
///
/// - `Ok(None)`: the packet isn't routed to the hooks.
/// - `Ok(Some(data))`: routed, and the `wasm` value decoded strictly. A `null`
///   value decodes to empty hook data.
/// - `Err`: routed, but the `wasm` value is malformed.
pub fn parse_memo(memo: &str) -> StdResult<Option<HookData>> {
    let Some(mut object) = routed_memo(memo) else {
        return Ok(None);
    };

    let raw = match object.remove(WASM_HOOK_MEMO_KEY) {
        None | Some(Json::Null) => return Ok(Some(HookData::default())),
        Some(raw) => raw,
    };

    serde_json::from_value(raw)
        .map(Some)
        .map_err(StdError::invalid_hook_data)
}

/// Rewrite a routed memo so that the async callback doesn't leave the chain.
///
/// If no message remains, the `wasm` key is removed; otherwise it is replaced
/// with `{"message": ...}`. Every other top-level key is preserved.
pub fn strip_async_callback(memo: &str, message: Option<&MsgExecuteContract>) -> StdResult<String> {
    let mut object = routed_memo(memo)
        .ok_or_else(|| StdError::invalid_hook_data("memo is not routed to the hooks"))?;

    match message {
        None => {
            object.remove(WASM_HOOK_MEMO_KEY);
        },
        Some(message) => {
            let data = HookData {
                message: Some(message.clone()),
                async_callback: None,
            };
            object.insert(WASM_HOOK_MEMO_KEY.to_string(), data.to_json_value()?);
        },
    }

    object.to_json_string()
}

// ----------------------------------- tests -----------------------------------
