use {
    crate::{Json, JsonDeExt, JsonSerExt, StdResult},
    serde::{Deserialize, Serialize},
    serde_with::skip_serializing_none,
};

/// ICS-20 fungible token transfer payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FungibleTokenPacketData {
    pub denom: String,
    /// Decimal string; validated only when the hooks need the number.
    pub amount: String,
    pub sender: String,
    pub receiver: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
}

/// ICS-721 non-fungible token transfer payload.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct NonFungibleTokenPacketData {
    pub class_id: String,
    pub class_uri: Option<String>,
    pub class_data: Option<Json>,
    pub token_ids: Vec<String>,
    pub token_uris: Option<Vec<String>>,
    pub token_data: Option<Vec<Json>>,
    pub sender: String,
    pub receiver: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
}

/// A transfer payload the hooks know how to inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferPayload {
    Fungible(FungibleTokenPacketData),
    NonFungible(NonFungibleTokenPacketData),
}

impl TransferPayload {
    /// Decode packet data, trying the fungible format first. Returns `None`
    /// if the data is neither, in which case the packet isn't ours to inspect.
    pub fn decode(data: &[u8]) -> Option<Self> {
        if let Ok(data) = data.deserialize_json::<FungibleTokenPacketData>() {
            return Some(Self::Fungible(data));
        }

        data.deserialize_json::<NonFungibleTokenPacketData>()
            .ok()
            .map(Self::NonFungible)
    }

    pub fn memo(&self) -> &str {
        match self {
            Self::Fungible(data) => &data.memo,
            Self::NonFungible(data) => &data.memo,
        }
    }

    pub fn sender(&self) -> &str {
        match self {
            Self::Fungible(data) => &data.sender,
            Self::NonFungible(data) => &data.sender,
        }
    }

    pub fn receiver(&self) -> &str {
        match self {
            Self::Fungible(data) => &data.receiver,
            Self::NonFungible(data) => &data.receiver,
        }
    }

    pub fn set_receiver(&mut self, receiver: String) {
        match self {
            Self::Fungible(data) => data.receiver = receiver,
            Self::NonFungible(data) => data.receiver = receiver,
        }
    }

    pub fn set_memo(&mut self, memo: String) {
        match self {
            Self::Fungible(data) => data.memo = memo,
            Self::NonFungible(data) => data.memo = memo,
        }
    }

    pub fn to_json_vec(&self) -> StdResult<Vec<u8>> {
        match self {
            Self::Fungible(data) => data.to_json_vec(),
            Self::NonFungible(data) => data.to_json_vec(),
        }
    }
}
