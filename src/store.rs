use crate::error::{SearchError, SearchResult};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

/// Durable storage of named text records.
pub trait Store: Send + Sync {
    /// Returns `None` when no record of that name exists.
    fn read(&self, name: &str) -> SearchResult<Option<String>>;

    /// Creates or replaces a record. Readers see either the old or the new text.
    fn write(&self, name: &str, text: &str) -> SearchResult<()>;
}

/// Records stored as UTF-8 files inside one directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Opens an existing, writable directory.
    pub fn open<P: AsRef<Path>>(root: P) -> SearchResult<Self> {
        let root = root.as_ref();
        let meta = fs::metadata(root).map_err(|e| {
            SearchError::Io(std::io::Error::new(
                e.kind(),
                format!("Cannot access folder '{}': {}", root.display(), e),
            ))
        })?;
        if !meta.is_dir() {
            return Err(SearchError::Io(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("'{}' is not a directory", root.display()),
            )));
        }
        Self::check_writable(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    // Permission bits don't tell whether *this* process may write, so try it.
    fn check_writable(root: &Path) -> SearchResult<()> {
        let probe = root.join(format!(".cavacamixa_write_check_{}", Uuid::new_v4()));
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&probe)
            .map_err(|e| {
                SearchError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Folder '{}' is not writable: {}", root.display(), e),
                ))
            })?;
        fs::remove_file(&probe)?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Store for DirStore {
    fn read(&self, name: &str) -> SearchResult<Option<String>> {
        match fs::read_to_string(self.path_of(name)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, name: &str, text: &str) -> SearchResult<()> {
        // Write aside, then rename over the target.
        let tmp = self.path_of(&format!("{}.tmp", name));
        fs::write(&tmp, text)?;
        fs::rename(&tmp, self.path_of(name))?;
        Ok(())
    }
}

/// In-process store, handy for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .records
            .lock()
            .map(|r| r.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}

impl Store for MemoryStore {
    fn read(&self, name: &str) -> SearchResult<Option<String>> {
        let records = self
            .records
            .lock()
            .map_err(|e| SearchError::Io(std::io::Error::other(e.to_string())))?;
        Ok(records.get(name).cloned())
    }

    fn write(&self, name: &str, text: &str) -> SearchResult<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| SearchError::Io(std::io::Error::other(e.to_string())))?;
        records.insert(name.to_string(), text.to_string());
        Ok(())
    }
}

impl<S: Store + ?Sized> Store for &S {
    fn read(&self, name: &str) -> SearchResult<Option<String>> {
        (**self).read(name)
    }

    fn write(&self, name: &str, text: &str) -> SearchResult<()> {
        (**self).write(name, text)
    }
}
