use {
    std::borrow::Cow,
    wasm_hooks_types::{
        Addr, StdError, StdResult, encode_length, nested_namespaces_with_key, split_one_key,
    },
};

// ------------------------------------ key ------------------------------------

/// A key of a [`Map`](crate::Map).
///
/// Keys are serialized by hand so that their byte order follows the order of
/// the keys, and iterations come out sorted. Tuple keys are split into a
/// `Prefix` (the first element) and a `Suffix` (the rest), so that entries
/// sharing a first element can be iterated or cleared together.
pub trait PrimaryKey {
    /// Number of elements: 1 for singleton keys, 2 for `(A, B)`, and so on.
    const KEY_ELEMS: u8;

    /// `()` for singleton keys.
    type Prefix: Prefixer;

    /// `()` for singleton keys.
    type Suffix;

    /// What the serialized key deserializes into, e.g. `String` for `&str`.
    type Output;

    fn raw_keys(&self) -> Vec<Cow<[u8]>>;

    /// Every element but the last is length-prefixed:
    ///
    /// ```plain
    /// len(A) | A | len(B) | B | ... | Z
    /// ```
    fn joined_key(&self) -> Vec<u8> {
        let mut raw_keys = self.raw_keys();
        let last_raw_key = raw_keys.pop();
        nested_namespaces_with_key(None, &raw_keys, last_raw_key.as_ref())
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output>;
}

impl PrimaryKey for &str {
    type Output = String;
    type Prefix = ();
    type Suffix = ();

    const KEY_ELEMS: u8 = 1;

    fn raw_keys(&self) -> Vec<Cow<[u8]>> {
        vec![Cow::Borrowed(self.as_bytes())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        String::from_utf8(bytes.to_vec())
            .map_err(|err| StdError::deserialize::<Self::Output, _>("key", err))
    }
}

impl PrimaryKey for Addr {
    type Output = Addr;
    type Prefix = ();
    type Suffix = ();

    const KEY_ELEMS: u8 = 1;

    fn raw_keys(&self) -> Vec<Cow<[u8]>> {
        vec![Cow::Borrowed(self.as_ref())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        Addr::try_from(bytes)
    }
}

impl PrimaryKey for u64 {
    type Output = u64;
    type Prefix = ();
    type Suffix = ();

    const KEY_ELEMS: u8 = 1;

    fn raw_keys(&self) -> Vec<Cow<[u8]>> {
        vec![Cow::Owned(self.to_be_bytes().to_vec())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        let bytes = <[u8; 8]>::try_from(bytes).map_err(|_| {
            StdError::deserialize::<Self::Output, _>(
                "key",
                format!("expecting 8 bytes, got {}", bytes.len()),
            )
        })?;

        Ok(u64::from_be_bytes(bytes))
    }
}

impl<A, B> PrimaryKey for (A, B)
where
    A: PrimaryKey + Prefixer,
    B: PrimaryKey,
{
    type Output = (A::Output, B::Output);
    type Prefix = A;
    type Suffix = B;

    const KEY_ELEMS: u8 = A::KEY_ELEMS + B::KEY_ELEMS;

    fn raw_keys(&self) -> Vec<Cow<[u8]>> {
        let mut keys = self.0.raw_keys();
        keys.extend(self.1.raw_keys());
        keys
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        let (a_raw, b_raw) = split_first_key(A::KEY_ELEMS, bytes)?;

        Ok((A::from_slice(&a_raw)?, B::from_slice(b_raw)?))
    }
}

// `MAP.prefix(a).append(b)` narrows down to all `C` under `(a, b)`.
impl<A, B, C> PrimaryKey for (A, B, C)
where
    A: PrimaryKey + Prefixer,
    B: PrimaryKey + Prefixer,
    C: PrimaryKey,
{
    type Output = (A::Output, B::Output, C::Output);
    type Prefix = A;
    type Suffix = (B, C);

    const KEY_ELEMS: u8 = A::KEY_ELEMS + B::KEY_ELEMS + C::KEY_ELEMS;

    fn raw_keys(&self) -> Vec<Cow<[u8]>> {
        let mut keys = self.0.raw_keys();
        keys.extend(self.1.raw_keys());
        keys.extend(self.2.raw_keys());
        keys
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        let (a_raw, rest) = split_first_key(A::KEY_ELEMS, bytes)?;
        let (b_raw, c_raw) = split_first_key(B::KEY_ELEMS, rest)?;

        Ok((
            A::from_slice(&a_raw)?,
            B::from_slice(&b_raw)?,
            C::from_slice(c_raw)?,
        ))
    }
}

/// Split the first `key_elems` length-prefixed elements off a joined key.
///
/// The split-off part comes back in joined form itself (every element but
/// its last keeps the length prefix), ready for the element's `from_slice`.
pub fn split_first_key(key_elems: u8, bytes: &[u8]) -> StdResult<(Vec<u8>, &[u8])> {
    let mut first_key = Vec::new();
    let mut rest = bytes;

    for i in 0..key_elems {
        let Some((elem, remainder)) = split_one_key(rest) else {
            return Err(StdError::deserialize::<Vec<u8>, _>(
                "key",
                format!("joined key too short: expecting {key_elems} elements"),
            ));
        };

        if i + 1 < key_elems {
            first_key.extend_from_slice(&encode_length(elem));
        }

        first_key.extend_from_slice(elem);
        rest = remainder;
    }

    Ok((first_key, rest))
}

// --------------------------------- prefixer ----------------------------------

/// A key element that can be used to narrow a map down to a prefix.
pub trait Prefixer {
    fn raw_prefixes(&self) -> Vec<Cow<[u8]>>;
}

impl Prefixer for () {
    fn raw_prefixes(&self) -> Vec<Cow<[u8]>> {
        vec![]
    }
}

impl Prefixer for &str {
    fn raw_prefixes(&self) -> Vec<Cow<[u8]>> {
        vec![Cow::Borrowed(self.as_bytes())]
    }
}

impl Prefixer for Addr {
    fn raw_prefixes(&self) -> Vec<Cow<[u8]>> {
        vec![Cow::Borrowed(self.as_ref())]
    }
}

// ----------------------------------- tests -----------------------------------
