use crate::PrimaryKey;

/// One end of a range iteration over typed keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound<K> {
    Inclusive(K),
    Exclusive(K),
}

impl<K> Bound<K> {
    pub fn exclusive<T>(t: T) -> Self
    where
        T: Into<K>,
    {
        Self::Exclusive(t.into())
    }
}

/// A [`Bound`] with its key serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawBound {
    Inclusive(Vec<u8>),
    Exclusive(Vec<u8>),
}

impl<K> From<Bound<K>> for RawBound
where
    K: PrimaryKey,
{
    fn from(bound: Bound<K>) -> Self {
        match bound {
            Bound::Inclusive(k) => RawBound::Inclusive(k.joined_key()),
            Bound::Exclusive(k) => RawBound::Exclusive(k.joined_key()),
        }
    }
}
