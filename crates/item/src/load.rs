use std::fs;
use std::path::Path;

use crate::error::IoResultExt;
use crate::{Item, ItemStat, LoadError};

impl Item {
    /// Loads a single path as an item anchored at `base`.
    ///
    /// Regular files are read fully into a [`Content::Buffer`](crate::Content::Buffer).
    /// Directories become directory markers with null content; their children
    /// are not visited. Symlinks are followed. When `path` does not live under
    /// `base`, the file name alone is used as the relative path.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] when metadata or contents cannot be read and
    /// [`LoadError::Unsupported`] for sockets, devices and other special files.
    ///
    /// # Examples
    ///
    /// ```
    /// use item::Item;
    /// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
    /// let temp = tempfile::tempdir()?;
    /// let file = temp.path().join("notes.txt");
    /// std::fs::write(&file, "one\ntwo")?;
    ///
    /// let item = Item::load(temp.path(), &file)?;
    /// assert_eq!(item.relative_path(), std::path::Path::new("notes.txt"));
    /// assert_eq!(item.contents(), Some(&b"one\ntwo"[..]));
    /// # Ok(())
    /// # }
    /// # demo().unwrap();
    /// ```
    pub fn load(base: impl AsRef<Path>, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).with_path(path)?;
        let relative = match path.strip_prefix(base.as_ref()) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => path.file_name().map(Into::into).unwrap_or_default(),
        };
        let stat = ItemStat::from_metadata(&metadata);

        if metadata.is_dir() {
            return Ok(Self::directory(path, relative).with_stat(stat));
        }
        if !metadata.is_file() {
            return Err(LoadError::Unsupported(path.to_path_buf()));
        }

        let bytes = fs::read(path).with_path(path)?;
        let mut item = Self::new(path, relative).with_stat(stat);
        item.content = bytes.into();
        Ok(item)
    }
}
