use {
    digest::Digest,
    ripemd::Ripemd160,
    sha2::Sha256,
};

/// Represents a data that can be hashed.
pub trait HashExt {
    /// Hash the data, producing a 20-byte hash.
    fn hash160(&self) -> [u8; 20];

    /// Hash the data, producing a 32-byte hash.
    fn hash256(&self) -> [u8; 32];
}

// RIPEMD-160 for 20-byte hashes, SHA2-256 for 32-byte hashes.
impl<T> HashExt for T
where
    T: AsRef<[u8]>,
{
    fn hash160(&self) -> [u8; 20] {
        let mut hasher = Ripemd160::new();
        hasher.update(self.as_ref());
        hasher.finalize().into()
    }

    fn hash256(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.as_ref());
        hasher.finalize().into()
    }
}
