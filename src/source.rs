use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// A root that map and tileset documents are read from.
/// IE: a directory on disk, or assets embedded in the binary.
pub trait MapSource {
    /// Retrieves raw bytes of the resource at `path`, relative to the root.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<S: MapSource + ?Sized> MapSource for &S {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }
}

/// Reads resources from a directory of the file system.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory every path is resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MapSource for DirSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(self.root.join(path))
    }
}

/// Serves resources from memory. Useful for embedded assets and tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the resource at `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.files.insert(path.into(), bytes.into());
        self
    }
}

impl MapSource for MemorySource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not in memory source", path.display()),
            )
        })
    }
}
