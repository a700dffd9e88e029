use {
    crate::{HashExt, StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    data_encoding::HEXLOWER,
    serde::{de, ser},
    std::{fmt, str::FromStr},
};

/// An account address.
///
/// Addresses are of 20-byte length, in lowercase hex encoding with the `0x`
/// prefix. Addresses are validated during deserialization, so an `Addr` found
/// in a decoded message is always well formed.
#[derive(
    BorshSerialize, BorshDeserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub struct Addr([u8; Addr::LENGTH]);

impl Addr {
    pub const LENGTH: usize = 20;
    pub const PREFIX: &str = "0x";

    pub const fn from_array(array: [u8; Self::LENGTH]) -> Self {
        Self(array)
    }

    pub const fn into_array(self) -> [u8; Self::LENGTH] {
        self.0
    }

    /// Derive a module-owned address from a type tag and a key:
    ///
    /// ```plain
    /// address := ripemd160(sha256(sha256(typ) | key))
    /// ```
    ///
    /// where `|` means byte concatenation.
    pub fn derive(typ: &str, key: &[u8]) -> Self {
        let mut preimage = Vec::with_capacity(32 + key.len());
        preimage.extend_from_slice(&typ.hash256());
        preimage.extend_from_slice(key);
        Self(preimage.hash256().hash160())
    }

    /// Generate a mock address for use in testing.
    pub const fn mock(index: u8) -> Self {
        let mut bytes = [0; Self::LENGTH];
        bytes[Self::LENGTH - 1] = index;
        Self(bytes)
    }
}

impl AsRef<[u8]> for Addr {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Addr {
    type Error = StdError;

    fn try_from(bytes: &[u8]) -> StdResult<Self> {
        bytes
            .try_into()
            .map(Self)
            .map_err(|_| StdError::invalid_addr(HEXLOWER.encode(bytes), "incorrect length"))
    }
}

impl FromStr for Addr {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        let Some(hex) = s.strip_prefix(Self::PREFIX) else {
            return Err(StdError::invalid_addr(s, "missing `0x` prefix"));
        };

        let bytes = HEXLOWER
            .decode(hex.as_bytes())
            .map_err(|err| StdError::invalid_addr(s, err))?;

        bytes
            .as_slice()
            .try_into()
            .map(Self)
            .map_err(|_| StdError::invalid_addr(s, "incorrect length"))
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, HEXLOWER.encode(&self.0))
    }
}

impl fmt::Debug for Addr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Addr({self})")
    }
}

impl ser::Serialize for Addr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Addr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(AddrVisitor)
    }
}

struct AddrVisitor;

impl de::Visitor<'_> for AddrVisitor {
    type Value = Addr;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a 20-byte address in lowercase hex encoding with the `0x` prefix")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Addr::from_str(v).map_err(E::custom)
    }
}

// ----------------------------------- tests -----------------------------------
