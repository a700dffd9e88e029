use {
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Serialize, de::DeserializeOwned},
    wasm_hooks_types::{BorshDeExt, BorshSerExt, JsonDeExt, JsonSerExt, StdResult},
};

/// How a map encodes its values into storage bytes.
pub trait Codec<T> {
    fn encode(data: &T) -> StdResult<Vec<u8>>;

    fn decode(data: &[u8]) -> StdResult<T>;
}

/// Values encoded with Borsh. The default for maps.
#[derive(Clone)]
pub struct Borsh;

impl<T> Codec<T> for Borsh
where
    T: BorshSerialize + BorshDeserialize,
{
    fn encode(data: &T) -> StdResult<Vec<u8>> {
        data.to_borsh_vec()
    }

    fn decode(data: &[u8]) -> StdResult<T> {
        data.deserialize_borsh()
    }
}

/// Values encoded as JSON, for entries other modules read in that format.
#[derive(Clone)]
pub struct Serde;

impl<T> Codec<T> for Serde
where
    T: Serialize + DeserializeOwned,
{
    fn encode(data: &T) -> StdResult<Vec<u8>> {
        data.to_json_vec()
    }

    fn decode(data: &[u8]) -> StdResult<T> {
        data.deserialize_json()
    }
}
