use {
    crate::{GasTracker, HookResult},
    wasm_hooks_types::{Buffer, Event, Shared, Storage},
};

/// The state a hook operates on while handling a single packet event.
pub struct HookCtx {
    pub storage: Box<dyn Storage>,
    pub gas_tracker: GasTracker,
    pub events: Vec<Event>,
}

impl HookCtx {
    pub fn new(storage: Box<dyn Storage>, gas_tracker: GasTracker) -> Self {
        Self {
            storage,
            gas_tracker,
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Open a speculative branch over this context.
    ///
    /// The branch reads through a clone of this context's storage and
    /// buffers its writes. It gets its own gas tracker, limited by `gas_limit`
    /// or by the gas remaining in this context, whichever is smaller.
    pub fn branch(&self, gas_limit: Option<u64>) -> Branch {
        let buffer = Shared::new(Buffer::new(self.storage.clone()));

        let gas_tracker = match (gas_limit, self.gas_tracker.remaining()) {
            (Some(a), Some(b)) => GasTracker::new_limited(a.min(b)),
            (Some(limit), None) | (None, Some(limit)) => GasTracker::new_limited(limit),
            (None, None) => GasTracker::new_limitless(),
        };

        Branch {
            buffer: buffer.clone(),
            ctx: HookCtx::new(Box::new(buffer), gas_tracker),
        }
    }
}

/// A context whose writes are buffered until committed.
pub struct Branch {
    buffer: Shared<Buffer<Box<dyn Storage>>>,
    pub ctx: HookCtx,
}

impl Branch {
    /// Apply the branch's writes and events to the parent context, and charge
    /// the gas it spent.
    ///
    /// The writes are replayed onto the parent's storage, not the clone the
    /// branch reads from, so the parent sees them whatever its clones share.
    pub fn commit(self, parent: &mut HookCtx) -> HookResult<()> {
        let pending = self.buffer.write_with(|mut buffer| buffer.take_pending());
        parent.storage.flush(pending);

        parent
            .gas_tracker
            .deduct(self.ctx.gas_tracker.used(), "branch")?;
        parent.events.extend(self.ctx.events);

        Ok(())
    }

    /// Drop the branch's writes and events. The gas it spent is still charged.
    pub fn discard(self, parent: &mut HookCtx) -> HookResult<()> {
        parent
            .gas_tracker
            .deduct(self.ctx.gas_tracker.used(), "branch")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        wasm_hooks_types::{MockStorage, Shared},
    };

    fn mock_ctx(gas_limit: u64) -> (Shared<MockStorage>, HookCtx) {
        let storage = Shared::new(MockStorage::new());
        let ctx = HookCtx::new(
            Box::new(storage.clone()),
            GasTracker::new_limited(gas_limit),
        );

        (storage, ctx)
    }

    #[test]
    fn committing_a_branch() {
        let (storage, mut ctx) = mock_ctx(1_000);

        let mut branch = ctx.branch(Some(500));
        branch.ctx.storage.write(b"foo", b"bar");
        branch.ctx.gas_tracker.deduct(123, "test").unwrap();
        branch.ctx.emit(Event::ack_error("test"));

        // Nothing reaches the parent before committing.
        assert_eq!(storage.read(b"foo"), None);

        branch.commit(&mut ctx).unwrap();

        assert_eq!(storage.read(b"foo"), Some(b"bar".to_vec()));
        assert_eq!(ctx.gas_tracker.used(), 123);
        assert_eq!(ctx.events, vec![Event::ack_error("test")]);
    }

    #[test]
    fn discarding_a_branch() {
        let (storage, mut ctx) = mock_ctx(1_000);
        ctx.storage.write(b"foo", b"old");

        let mut branch = ctx.branch(None);
        branch.ctx.storage.write(b"foo", b"new");
        branch.ctx.storage.write(b"fuzz", b"buzz");
        branch.ctx.gas_tracker.deduct(77, "test").unwrap();
        branch.ctx.emit(Event::ack_error("test"));

        assert_eq!(branch.ctx.storage.read(b"foo"), Some(b"new".to_vec()));

        branch.discard(&mut ctx).unwrap();

        assert_eq!(storage.read(b"foo"), Some(b"old".to_vec()));
        assert_eq!(storage.read(b"fuzz"), None);
        assert_eq!(ctx.gas_tracker.used(), 77);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn committing_over_an_unshared_store() {
        // Clones of a plain `MockStorage` copy its data.
        let mut ctx = HookCtx::new(Box::new(MockStorage::new()), GasTracker::new_limitless());
        ctx.storage.write(b"foo", b"old");

        let mut branch = ctx.branch(None);
        assert_eq!(branch.ctx.storage.read(b"foo"), Some(b"old".to_vec()));
        branch.ctx.storage.write(b"k", b"v");
        branch.ctx.storage.remove(b"foo");
        branch.commit(&mut ctx).unwrap();

        assert_eq!(ctx.storage.read(b"k"), Some(b"v".to_vec()));
        assert_eq!(ctx.storage.read(b"foo"), None);

        let mut outer = ctx.branch(None);
        let mut inner = outer.ctx.branch(None);
        inner.ctx.storage.write(b"nested", b"1");
        inner.commit(&mut outer.ctx).unwrap();
        outer.commit(&mut ctx).unwrap();

        assert_eq!(ctx.storage.read(b"nested"), Some(b"1".to_vec()));
    }

    #[test]
    fn branch_gas_limit_is_capped_by_parent() {
        let (_, mut ctx) = mock_ctx(1_000);
        ctx.gas_tracker.deduct(900, "test").unwrap();

        assert_eq!(ctx.branch(Some(500)).ctx.gas_tracker.limit(), Some(100));
        assert_eq!(ctx.branch(None).ctx.gas_tracker.limit(), Some(100));

        let limitless = HookCtx::new(Box::new(MockStorage::new()), GasTracker::new_limitless());
        assert_eq!(limitless.branch(Some(500)).ctx.gas_tracker.limit(), Some(500));
        assert_eq!(limitless.branch(None).ctx.gas_tracker.limit(), None);
    }

    #[test]
    fn nested_branches() {
        let (storage, mut ctx) = mock_ctx(1_000);

        let mut outer = ctx.branch(None);
        let mut inner = outer.ctx.branch(None);
        inner.ctx.storage.write(b"foo", b"bar");
        inner.commit(&mut outer.ctx).unwrap();

        assert_eq!(outer.ctx.storage.read(b"foo"), Some(b"bar".to_vec()));
        assert_eq!(storage.read(b"foo"), None);

        outer.commit(&mut ctx).unwrap();
        assert_eq!(storage.read(b"foo"), Some(b"bar".to_vec()));
    }
}
