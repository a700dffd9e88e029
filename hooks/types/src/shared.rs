use {
    crate::{Batch, Order, Record, Storage},
    std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A value behind an `Arc<RwLock<_>>`. Clones refer to the same value.
#[derive(Debug, Default)]
pub struct Shared<S> {
    inner: Arc<RwLock<S>>,
}

impl<S> Shared<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    pub fn read_access(&self) -> RwLockReadGuard<S> {
        self.inner
            .read()
            .unwrap_or_else(|err| panic!("poisoned lock: {err:?}"))
    }

    pub fn write_access(&self) -> RwLockWriteGuard<S> {
        self.inner
            .write()
            .unwrap_or_else(|err| panic!("poisoned lock: {err:?}"))
    }

    pub fn write_with<F, T>(&self, action: F) -> T
    where
        F: FnOnce(RwLockWriteGuard<S>) -> T,
    {
        action(self.write_access())
    }
}

impl<S> Clone for Shared<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> Storage for Shared<S>
where
    S: Storage,
{
    fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.read_access().read(key)
    }

    // The records are collected while the read guard is held, so the
    // iterator doesn't keep the lock.
    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        let records = self
            .read_access()
            .scan(min, max, order)
            .collect::<Vec<_>>();

        Box::new(records.into_iter())
    }

    fn write(&mut self, key: &[u8], value: &[u8]) {
        self.write_access().write(key, value)
    }

    fn remove(&mut self, key: &[u8]) {
        self.write_access().remove(key)
    }

    fn remove_range(&mut self, min: Option<&[u8]>, max: Option<&[u8]>) {
        self.write_access().remove_range(min, max)
    }

    fn flush(&mut self, batch: Batch) {
        self.write_access().flush(batch)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::MockStorage};

    #[test]
    fn clones_share_state() {
        let storage = Shared::new(MockStorage::new());
        let mut clone = storage.clone();

        clone.write(b"channel-0", b"1");
        clone.write(b"channel-1", b"2");
        clone.write(b"channel-2", b"3");

        assert_eq!(storage.read(b"channel-0"), Some(b"1".to_vec()));

        // Writing while iterating a clone doesn't deadlock.
        for (key, _) in storage.scan(Some(b"channel-1"), None, Order::Descending) {
            clone.remove(&key);
        }

        let keys = storage
            .scan_keys(None, None, Order::Ascending)
            .collect::<Vec<_>>();
        assert_eq!(keys, vec![b"channel-0".to_vec()]);
    }
}
