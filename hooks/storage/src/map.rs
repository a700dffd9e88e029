use {
    crate::{Borsh, Bound, Codec, Path, Prefix, Prefixer, PrimaryKey},
    std::marker::PhantomData,
    wasm_hooks_types::{Order, StdResult, Storage},
};

/// A typed, namespaced key-value mapping over a [`Storage`].
pub struct Map<'a, K, T, C = Borsh>
where
    C: Codec<T>,
{
    namespace: &'a [u8],
    key: PhantomData<K>,
    data: PhantomData<T>,
    codec: PhantomData<C>,
}

impl<'a, K, T, C> Map<'a, K, T, C>
where
    C: Codec<T>,
{
    pub const fn new(namespace: &'a str) -> Self {
        Self {
            namespace: namespace.as_bytes(),
            key: PhantomData,
            data: PhantomData,
            codec: PhantomData,
        }
    }
}

impl<K, T, C> Map<'_, K, T, C>
where
    K: PrimaryKey,
    C: Codec<T>,
{
    #[doc(hidden)]
    pub fn path(&self, key: K) -> Path<T, C> {
        let mut raw_keys = key.raw_keys();
        let last_raw_key = raw_keys.pop();
        Path::new(self.namespace, &raw_keys, last_raw_key.as_ref())
    }

    fn no_prefix(&self) -> Prefix<K, T, C> {
        Prefix::new(self.namespace, &[])
    }

    pub fn prefix(&self, prefix: K::Prefix) -> Prefix<K::Suffix, T, C> {
        Prefix::new(self.namespace, &prefix.raw_prefixes())
    }

    pub fn is_empty(&self, storage: &dyn Storage) -> bool {
        self.no_prefix().is_empty(storage)
    }

    // ---------------------- methods for single entries -----------------------

    pub fn may_load(&self, storage: &dyn Storage, key: K) -> StdResult<Option<T>> {
        self.path(key).may_load(storage)
    }

    pub fn save(&self, storage: &mut dyn Storage, key: K, data: &T) -> StdResult<()> {
        self.path(key).save(storage, data)
    }

    pub fn remove(&self, storage: &mut dyn Storage, key: K) {
        self.path(key).remove(storage)
    }

    /// Load and remove an entry. `Ok(None)` if it doesn't exist.
    pub fn take(&self, storage: &mut dyn Storage, key: K) -> StdResult<Option<T>> {
        self.path(key).take(storage)
    }

    // --------------------------- iteration methods ---------------------------

    pub fn range<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<(K::Output, T)>> + 'b> {
        self.no_prefix().range(storage, min, max, order)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        crate::{Bound, Map, Serde},
        borsh::{BorshDeserialize, BorshSerialize},
        wasm_hooks_types::{Addr, MockStorage, Order, StdResult},
    };

    const FOOS: Map<u64, Foo> = Map::new("foo");

    const CALLBACKS: Map<(&str, &str, u64), String, Serde> = Map::new("callbacks");

    #[derive(BorshDeserialize, BorshSerialize, Debug, PartialEq, Eq)]
    struct Foo {
        name: String,
    }

    #[test]
    fn single_entries() {
        let mut storage = MockStorage::new();

        FOOS.save(&mut storage, 1, &Foo { name: "one".to_string() })
            .unwrap();

        assert_eq!(FOOS.may_load(&storage, 1).unwrap().unwrap().name, "one");
        assert_eq!(FOOS.may_load(&storage, 2).unwrap(), None);

        assert_eq!(FOOS.take(&mut storage, 1).unwrap().unwrap().name, "one");
        assert_eq!(FOOS.take(&mut storage, 1).unwrap(), None);
        assert!(FOOS.is_empty(&storage));
    }

    #[test]
    fn paging_with_exclusive_bound() {
        const ACLS: Map<Addr, bool> = Map::new("acl");

        let mut storage = MockStorage::new();
        for i in 1..=5 {
            ACLS.save(&mut storage, Addr::mock(i), &(i % 2 == 0)).unwrap();
        }

        let page = ACLS
            .range(&storage, Some(Bound::exclusive(Addr::mock(2))), None, Order::Ascending)
            .take(2)
            .collect::<StdResult<Vec<_>>>()
            .unwrap();

        assert_eq!(page, vec![(Addr::mock(3), false), (Addr::mock(4), true)]);
    }

    #[test]
    fn clearing_a_nested_prefix() {
        let mut storage = MockStorage::new();

        for (port, channel, sequence) in [
            ("transfer", "channel-0", 1),
            ("transfer", "channel-0", 2),
            ("transfer", "channel-1", 1),
            ("nft-transfer", "channel-0", 1),
        ] {
            CALLBACKS
                .save(&mut storage, (port, channel, sequence), &format!("{port}/{channel}/{sequence}"))
                .unwrap();
        }

        let sequences = CALLBACKS
            .prefix("transfer")
            .append("channel-0")
            .range(&storage, None, None, Order::Ascending)
            .map(|res| res.map(|(sequence, _)| sequence))
            .collect::<StdResult<Vec<_>>>()
            .unwrap();
        assert_eq!(sequences, vec![1, 2]);

        let removed = CALLBACKS
            .prefix("transfer")
            .append("channel-0")
            .clear(&mut storage);
        assert_eq!(removed, 2);

        let remaining = CALLBACKS
            .range(&storage, None, None, Order::Ascending)
            .map(|res| res.map(|(_, v)| v))
            .collect::<StdResult<Vec<_>>>()
            .unwrap();
        // Shorter strings sort first, because of the length prefixes.
        assert_eq!(remaining, vec![
            "transfer/channel-1/1".to_string(),
            "nft-transfer/channel-0/1".to_string(),
        ]);
    }
}
