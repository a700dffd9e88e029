use {
    crate::{Batch, Op, Order, Record, Storage},
    std::{cmp::Ordering, iter::Peekable, mem, ops::Bound},
};

/// A key-value storage with an in-memory write buffer.
///
/// Writes go to the buffer and never reach the base store. The owner applies
/// them elsewhere with [`take_pending`](Buffer::take_pending), or drops them.
#[derive(Clone)]
pub struct Buffer<S> {
    base: S,
    pending: Batch,
}

impl<S> Buffer<S> {
    pub fn new(base: S) -> Self {
        Self {
            base,
            pending: Batch::new(),
        }
    }

    /// Take the pending ops out of the buffer, leaving it empty. The base
    /// store is not touched.
    pub fn take_pending(&mut self) -> Batch {
        mem::take(&mut self.pending)
    }
}

impl<S> Storage for Buffer<S>
where
    S: Storage + Clone,
{
    fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.pending.get(key) {
            Some(Op::Insert(value)) => Some(value.clone()),
            Some(Op::Delete) => None,
            None => self.base.read(key),
        }
    }

    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        // `BTreeMap::range` panics on an inverted range.
        if matches!((min, max), (Some(min), Some(max)) if min > max) {
            return Box::new(std::iter::empty());
        }

        let lower = min.map_or(Bound::Unbounded, |min| Bound::Included(min.to_vec()));
        let upper = max.map_or(Bound::Unbounded, |max| Bound::Excluded(max.to_vec()));
        let ops = self.pending.range((lower, upper));

        let ops: Box<dyn Iterator<Item = (&Vec<u8>, &Op)>> = match order {
            Order::Ascending => Box::new(ops),
            Order::Descending => Box::new(ops.rev()),
        };

        Box::new(MergedScan {
            base: self.base.scan(min, max, order).peekable(),
            ops: ops.peekable(),
            order,
        })
    }

    fn write(&mut self, key: &[u8], value: &[u8]) {
        self.pending
            .insert(key.to_vec(), Op::Insert(value.to_vec()));
    }

    fn remove(&mut self, key: &[u8]) {
        self.pending.insert(key.to_vec(), Op::Delete);
    }

    fn remove_range(&mut self, min: Option<&[u8]>, max: Option<&[u8]>) {
        let keys = self
            .scan_keys(min, max, Order::Ascending)
            .collect::<Vec<_>>();

        for key in keys {
            self.pending.insert(key, Op::Delete);
        }
    }

    fn flush(&mut self, batch: Batch) {
        // Later ops win.
        self.pending.extend(batch);
    }
}

/// Records of the base store, overlaid with the pending ops. Both sides come
/// sorted in `order`; on a common key the op wins.
struct MergedScan<'a, B, P>
where
    B: Iterator<Item = Record>,
    P: Iterator<Item = (&'a Vec<u8>, &'a Op)>,
{
    base: Peekable<B>,
    ops: Peekable<P>,
    order: Order,
}

impl<'a, B, P> MergedScan<'a, B, P>
where
    B: Iterator<Item = Record>,
    P: Iterator<Item = (&'a Vec<u8>, &'a Op)>,
{
    /// Which side holds the next key in iteration order.
    fn next_side(&mut self) -> Option<Ordering> {
        match (self.base.peek(), self.ops.peek()) {
            (None, None) => None,
            (Some(_), None) => Some(Ordering::Less),
            (None, Some(_)) => Some(Ordering::Greater),
            (Some((base_key, _)), Some((op_key, _))) => {
                let ordering = base_key.as_slice().cmp(op_key.as_slice());
                Some(match self.order {
                    Order::Ascending => ordering,
                    Order::Descending => ordering.reverse(),
                })
            },
        }
    }
}

impl<'a, B, P> Iterator for MergedScan<'a, B, P>
where
    B: Iterator<Item = Record>,
    P: Iterator<Item = (&'a Vec<u8>, &'a Op)>,
{
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        loop {
            match self.next_side()? {
                Ordering::Less => return self.base.next(),
                Ordering::Equal => {
                    // Shadowed by the op.
                    self.base.next();
                },
                Ordering::Greater => {},
            }

            if let Some((key, Op::Insert(value))) = self.ops.next() {
                return Some((key.clone(), value.clone()));
            }
        }
    }
}

// ----------------------------------- tests -----------------------------------
