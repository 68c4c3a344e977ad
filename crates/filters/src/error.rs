/// Error produced while building a condition or exclude list.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// An exclude pattern could not be compiled into a glob matcher.
    #[error("failed to compile exclude pattern '{pattern}': {source}")]
    InvalidGlob {
        /// The offending pattern.
        pattern: String,
        /// The underlying glob error.
        #[source]
        source: globset::Error,
    },

    /// A date bound is neither `YYYY-MM-DD` nor RFC 3339.
    #[error("invalid timestamp '{value}': expected YYYY-MM-DD or RFC 3339")]
    InvalidTimestamp {
        /// The rejected text.
        value: String,
        /// The underlying parse error.
        #[source]
        source: time::error::Parse,
    },
}

impl FilterError {
    /// Returns the text that was rejected.
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::InvalidGlob { pattern, .. } => pattern,
            Self::InvalidTimestamp { value, .. } => value,
        }
    }
}
