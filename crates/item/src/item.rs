use std::path::{Component, Path, PathBuf};

use crate::{Content, ItemStat};

/// One discrete unit of work flowing through a pipeline stage.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item {
    pub(crate) path: PathBuf,
    pub(crate) relative_path: PathBuf,
    pub(crate) content: Content,
    pub(crate) is_directory: bool,
    pub(crate) stat: ItemStat,
}

impl Item {
    /// Creates a file item with [`Content::Null`] and default stat values.
    ///
    /// Root and prefix components are stripped from `relative_path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, relative_path: impl AsRef<Path>) -> Self {
        Self {
            path: path.into(),
            relative_path: strip_root(relative_path.as_ref()),
            content: Content::Null,
            is_directory: false,
            stat: ItemStat::default(),
        }
    }

    /// Creates a directory marker item.
    #[must_use]
    pub fn directory(path: impl Into<PathBuf>, relative_path: impl AsRef<Path>) -> Self {
        Self {
            is_directory: true,
            ..Self::new(path, relative_path)
        }
    }

    /// Replaces the content with buffered bytes and updates `stat.size`.
    #[must_use]
    pub fn with_contents(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.set_contents(bytes);
        self
    }

    /// Replaces the content state without touching the stat record.
    #[must_use]
    pub fn with_content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    /// Replaces the stat record.
    #[must_use]
    pub const fn with_stat(mut self, stat: ItemStat) -> Self {
        self.stat = stat;
        self
    }

    /// Replaces the relative path, keeping the absolute path's parent in step.
    #[must_use]
    pub fn with_relative_path(mut self, relative_path: impl AsRef<Path>) -> Self {
        let relative_path = strip_root(relative_path.as_ref());
        if let Some(base) = self.base() {
            self.path = base.join(&relative_path);
        }
        self.relative_path = relative_path;
        self
    }

    /// Buffers `bytes` as the item's content and updates `stat.size`.
    pub fn set_contents(&mut self, bytes: impl Into<Vec<u8>>) {
        let bytes = bytes.into();
        self.stat.size = bytes.len() as u64;
        self.content = Content::Buffer(bytes);
    }

    /// Returns the absolute path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path relative to the pipeline base.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Returns the base directory the relative path is anchored at, when the
    /// absolute path ends with the relative one.
    #[must_use]
    pub fn base(&self) -> Option<PathBuf> {
        let mut base = self.path.clone();
        for _ in self.relative_path.components() {
            if !base.pop() {
                return None;
            }
        }
        (base.join(&self.relative_path) == self.path).then_some(base)
    }

    /// Returns the content state.
    #[must_use]
    pub const fn content(&self) -> &Content {
        &self.content
    }

    /// Returns the buffered bytes, if the content is buffered.
    #[must_use]
    pub fn contents(&self) -> Option<&[u8]> {
        self.content.as_bytes()
    }

    /// Returns whether the item is a directory marker.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Returns the stat record.
    #[must_use]
    pub const fn stat(&self) -> &ItemStat {
        &self.stat
    }

    /// Returns the final component of the path as UTF-8, if representable.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    /// Returns the text after the last `.` in the file name.
    ///
    /// Unlike [`Path::extension`], a leading dot counts: `.gitignore` yields
    /// `gitignore`. Names without a dot yield `None`.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        name.rfind('.').map(|index| &name[index + 1..])
    }

    /// Returns the content length in bytes.
    ///
    /// Buffered items report their buffer length, null items report `0` and
    /// streaming items fall back to `stat.size`.
    #[must_use]
    pub fn content_len(&self) -> u64 {
        match &self.content {
            Content::Buffer(bytes) => bytes.len() as u64,
            Content::Null => 0,
            Content::Stream => self.stat.size,
        }
    }
}

fn strip_root(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_)))
        .collect()
}
