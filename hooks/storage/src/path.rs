use {
    crate::Codec,
    std::{borrow::Cow, marker::PhantomData},
    wasm_hooks_types::{StdResult, Storage, nested_namespaces_with_key},
};

/// The storage key of a single map entry.
pub struct Path<T, C> {
    storage_key: Vec<u8>,
    data: PhantomData<T>,
    codec: PhantomData<C>,
}

impl<T, C> Path<T, C>
where
    C: Codec<T>,
{
    pub fn new(namespace: &[u8], prefixes: &[Cow<[u8]>], maybe_key: Option<&Cow<[u8]>>) -> Self {
        Self {
            storage_key: nested_namespaces_with_key(Some(namespace), prefixes, maybe_key),
            data: PhantomData,
            codec: PhantomData,
        }
    }

    #[inline]
    pub fn storage_key(&self) -> &[u8] {
        &self.storage_key
    }

    pub fn may_load(&self, storage: &dyn Storage) -> StdResult<Option<T>> {
        storage
            .read(&self.storage_key)
            .map(|raw| C::decode(&raw))
            .transpose()
    }

    pub fn save(&self, storage: &mut dyn Storage, data: &T) -> StdResult<()> {
        let raw = C::encode(data)?;
        storage.write(&self.storage_key, &raw);
        Ok(())
    }

    pub fn remove(&self, storage: &mut dyn Storage) {
        storage.remove(&self.storage_key);
    }

    /// Remove the entry and return its value. The entry is removed even if
    /// the value fails to decode.
    pub fn take(&self, storage: &mut dyn Storage) -> StdResult<Option<T>> {
        let Some(raw) = storage.read(&self.storage_key) else {
            return Ok(None);
        };

        storage.remove(&self.storage_key);

        C::decode(&raw).map(Some)
    }
}
