//! crates/filters/src/exclude.rs
//! Exclude lists matched against relative paths.

use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::FilterError;

/// A single exclude pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExcludePattern {
    /// Excludes paths whose text contains the substring.
    Substring(String),
    /// Excludes paths matching the glob. Globs without a `/` match at any depth.
    Glob(String),
}

impl ExcludePattern {
    /// Classifies configuration text: text with glob metacharacters
    /// (`*`, `?`, `[`, `{`) becomes a glob, anything else a substring.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.contains(['*', '?', '[', '{']) {
            Self::Glob(text.to_owned())
        } else {
            Self::Substring(text.to_owned())
        }
    }

    /// Returns the pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Substring(text) | Self::Glob(text) => text,
        }
    }
}

impl From<&str> for ExcludePattern {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// Compiled set of exclude patterns.
///
/// ```
/// use filters::{ExcludeList, ExcludePattern};
/// use std::path::Path;
///
/// let list = ExcludeList::new([
///     ExcludePattern::Substring("node_modules".into()),
///     ExcludePattern::Glob("*.map".into()),
/// ])
/// .unwrap();
///
/// assert!(list.excludes(Path::new("web/node_modules/x.js")));
/// assert!(list.excludes(Path::new("dist/app.js.map")));
/// assert!(!list.excludes(Path::new("dist/app.js")));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExcludeList {
    patterns: Vec<ExcludePattern>,
    substrings: Vec<String>,
    globs: GlobSet,
}

impl ExcludeList {
    /// Compiles `patterns`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidGlob`] for the first glob that fails to
    /// compile.
    pub fn new<I, P>(patterns: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = P>,
        P: Into<ExcludePattern>,
    {
        let patterns: Vec<ExcludePattern> = patterns.into_iter().map(Into::into).collect();
        let mut substrings = Vec::new();
        let mut builder = GlobSetBuilder::new();

        for pattern in &patterns {
            match pattern {
                ExcludePattern::Substring(text) => substrings.push(text.clone()),
                ExcludePattern::Glob(text) => {
                    let expanded = if text.contains('/') {
                        text.trim_start_matches('/').to_owned()
                    } else {
                        format!("**/{text}")
                    };
                    let glob = GlobBuilder::new(&expanded)
                        .literal_separator(true)
                        .backslash_escape(true)
                        .build()
                        .map_err(|source| FilterError::InvalidGlob {
                            pattern: text.clone(),
                            source,
                        })?;
                    builder.add(glob);
                }
            }
        }

        let globs = builder.build().map_err(|source| FilterError::InvalidGlob {
            pattern: patterns
                .iter()
                .map(ExcludePattern::as_str)
                .collect::<Vec<_>>()
                .join(" "),
            source,
        })?;

        Ok(Self {
            patterns,
            substrings,
            globs,
        })
    }

    /// Returns `true` when any pattern matches `relative_path`.
    #[must_use]
    pub fn excludes(&self, relative_path: &Path) -> bool {
        if !self.substrings.is_empty() {
            let text = relative_path.to_string_lossy();
            if self.substrings.iter().any(|needle| text.contains(needle.as_str())) {
                return true;
            }
        }
        self.globs.is_match(relative_path)
    }

    /// Returns the patterns in definition order.
    #[must_use]
    pub fn patterns(&self) -> &[ExcludePattern] {
        &self.patterns
    }

    /// Returns `true` when the list holds no pattern.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ExcludeList {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let texts = Vec::<String>::deserialize(deserializer)?;
        Self::new(texts.iter().map(String::as_str)).map_err(serde::de::Error::custom)
    }
}
