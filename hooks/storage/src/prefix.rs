use {
    crate::{Bound, Codec, Prefixer, PrimaryKey, RawBound},
    std::{borrow::Cow, marker::PhantomData},
    wasm_hooks_types::{
        Order, Record, StdResult, Storage, concat, encode_length, extend_one_byte,
        increment_last_byte, nested_namespaces_with_key, trim,
    },
};

/// All entries of a map whose keys share a common prefix.
pub struct Prefix<K, T, C>
where
    C: Codec<T>,
{
    namespace: Vec<u8>,
    suffix: PhantomData<K>,
    data: PhantomData<T>,
    codec: PhantomData<C>,
}

impl<K, T, C> Prefix<K, T, C>
where
    C: Codec<T>,
{
    pub fn new(namespace: &[u8], prefixes: &[Cow<[u8]>]) -> Self {
        Self {
            namespace: nested_namespaces_with_key(Some(namespace), prefixes, None),
            suffix: PhantomData,
            data: PhantomData,
            codec: PhantomData,
        }
    }
}

impl<K, T, C> Prefix<K, T, C>
where
    K: PrimaryKey,
    C: Codec<T>,
{
    /// Narrow the prefix by one more key element.
    pub fn append(mut self, prefix: K::Prefix) -> Prefix<K::Suffix, T, C> {
        for key_elem in prefix.raw_prefixes() {
            self.namespace.extend(encode_length(&key_elem));
            self.namespace.extend(key_elem.as_ref());
        }

        Prefix {
            namespace: self.namespace,
            suffix: PhantomData,
            data: self.data,
            codec: self.codec,
        }
    }

    pub fn is_empty(&self, storage: &dyn Storage) -> bool {
        storage
            .scan_keys(
                Some(&self.namespace),
                Some(&increment_last_byte(self.namespace.clone())),
                Order::Ascending,
            )
            .next()
            .is_none()
    }

    fn range_raw<'a>(
        &self,
        storage: &'a dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        let (min, max) = range_bounds(&self.namespace, min, max);

        // Moved into the closure so that the iterator can outlive `&self`.
        let namespace = self.namespace.clone();
        let iter = storage
            .scan(Some(&min), Some(&max), order)
            .map(move |(k, v)| (trim(&namespace, &k), v));

        Box::new(iter)
    }

    pub fn range<'a>(
        &self,
        storage: &'a dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<(K::Output, T)>> + 'a> {
        let iter = self
            .range_raw(storage, min, max, order)
            .map(|(key_raw, value_raw)| {
                let key = K::from_slice(&key_raw)?;
                let value = C::decode(&value_raw)?;
                Ok((key, value))
            });

        Box::new(iter)
    }

    /// Delete every entry under this prefix, returning how many there were.
    pub fn clear(&self, storage: &mut dyn Storage) -> usize {
        let min = self.namespace.clone();
        let max = increment_last_byte(self.namespace.clone());
        let count = storage
            .scan_keys(Some(&min), Some(&max), Order::Ascending)
            .count();

        storage.remove_range(Some(&min), Some(&max));

        count
    }
}

fn range_bounds<K>(
    namespace: &[u8],
    min: Option<Bound<K>>,
    max: Option<Bound<K>>,
) -> (Vec<u8>, Vec<u8>)
where
    K: PrimaryKey,
{
    let min = match min.map(RawBound::from) {
        None => namespace.to_vec(),
        Some(RawBound::Inclusive(k)) => concat(namespace, &k),
        Some(RawBound::Exclusive(k)) => concat(namespace, &extend_one_byte(k)),
    };
    let max = match max.map(RawBound::from) {
        None => increment_last_byte(namespace.to_vec()),
        Some(RawBound::Inclusive(k)) => concat(namespace, &extend_one_byte(k)),
        Some(RawBound::Exclusive(k)) => concat(namespace, &k),
    };

    (min, max)
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, crate::Borsh, wasm_hooks_types::MockStorage};

    #[test]
    fn ensure_proper_range_bounds() {
        let mut store = MockStorage::new();
        let prefix: Prefix<&str, u64, Borsh> = Prefix {
            namespace: b"foo".to_vec(),
            suffix: PhantomData,
            data: PhantomData,
            codec: PhantomData,
        };

        assert!(prefix.is_empty(&store));

        store.write(b"foobar", b"1");
        store.write(b"foora", b"2");
        store.write(b"foozi", b"3");
        // Outside the prefix.
        store.write(b"foply", b"100");
        store.write(b"font", b"200");

        let expected = vec![
            (b"bar".to_vec(), b"1".to_vec()),
            (b"ra".to_vec(), b"2".to_vec()),
            (b"zi".to_vec(), b"3".to_vec()),
        ];
        let expected_reversed = expected.iter().rev().cloned().collect::<Vec<_>>();

        let res = prefix
            .range_raw(&store, None, None, Order::Ascending)
            .collect::<Vec<_>>();
        assert_eq!(res, expected);

        let res = prefix
            .range_raw(&store, None, None, Order::Descending)
            .collect::<Vec<_>>();
        assert_eq!(res, expected_reversed);

        let res = prefix
            .range_raw(&store, Some(Bound::exclusive("ra")), None, Order::Ascending)
            .collect::<Vec<_>>();
        assert_eq!(res, &expected[2..]);

        let res = prefix
            .range_raw(&store, Some(Bound::exclusive("r")), None, Order::Ascending)
            .collect::<Vec<_>>();
        assert_eq!(res, &expected[1..]);

        let res = prefix
            .range_raw(
                &store,
                Some(Bound::Inclusive("ra")),
                Some(Bound::Inclusive("zi")),
                Order::Descending,
            )
            .collect::<Vec<_>>();
        assert_eq!(res, &expected_reversed[..2]);

        assert!(!prefix.is_empty(&store));
        assert_eq!(prefix.clear(&mut store), 3);
        assert!(prefix.is_empty(&store));
        assert_eq!(store.read(b"foply"), Some(b"100".to_vec()));
        assert_eq!(store.read(b"font"), Some(b"200".to_vec()));
    }
}
