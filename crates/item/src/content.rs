use std::fmt;

/// Payload carried by an [`Item`](crate::Item).
///
/// The three states are mutually exclusive. Only [`Content::Buffer`] may be
/// inspected or rewritten by a transform.
#[derive(Clone, Default, Eq, PartialEq)]
pub enum Content {
    /// The item has no content (directories, placeholders).
    #[default]
    Null,
    /// Fully buffered bytes.
    Buffer(Vec<u8>),
    /// Unbuffered streaming content. Stages refuse items in this state.
    Stream,
}

impl Content {
    /// Returns the buffered bytes, if any.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Buffer(bytes) => Some(bytes),
            Self::Null | Self::Stream => None,
        }
    }

    /// Returns `true` for [`Content::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for [`Content::Buffer`].
    #[must_use]
    pub const fn is_buffer(&self) -> bool {
        matches!(self, Self::Buffer(_))
    }

    /// Returns `true` for [`Content::Stream`].
    #[must_use]
    pub const fn is_stream(&self) -> bool {
        matches!(self, Self::Stream)
    }

    /// Returns the buffered length, `0` for the other states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().map_or(0, <[u8]>::len)
    }

    /// Returns `true` when no bytes are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Buffers can be large; print the length instead of the bytes.
impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Buffer(bytes) => write!(f, "Buffer({} bytes)", bytes.len()),
            Self::Stream => f.write_str("Stream"),
        }
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Buffer(bytes)
    }
}

impl From<&[u8]> for Content {
    fn from(bytes: &[u8]) -> Self {
        Self::Buffer(bytes.to_vec())
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Buffer(text.as_bytes().to_vec())
    }
}
