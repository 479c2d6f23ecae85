//! In-memory payload of a finished transfer.

use bytes::Bytes;

/// The fully assembled content of a fetched resource.
///
/// A payload only lives for the duration of one download call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    data: Bytes,
}

impl Payload {
    /// Wrap already assembled bytes.
    pub fn new(data: Bytes) -> Self {
        Self { data }
    }

    /// Size of the payload in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the payload holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the content.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the payload, returning the content.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Self::new(Bytes::from(value))
    }
}

impl From<Bytes> for Payload {
    fn from(value: Bytes) -> Self {
        Self::new(value)
    }
}
