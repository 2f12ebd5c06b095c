use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::directory::Directory;
use crate::entry::ensure_present;
use crate::fake::FakeFileSystem;
use crate::filesystem::{EntryKind, FileSystem, FileSystemError, RealFileSystem, Result};
use crate::path;

/// A readable leaf entry.
#[derive(Debug, Clone)]
pub struct File<FS> {
    fs: FS,
    path: PathBuf,
}

/// A file on disk.
pub type ExistingFile = File<RealFileSystem>;

/// A file held in memory.
pub type FakeFile = File<FakeFileSystem>;

impl<FS: FileSystem + Clone> File<FS> {
    pub(crate) fn new_unchecked(fs: FS, path: PathBuf) -> Self {
        Self { fs, path }
    }

    /// Wraps the file at `path`, which must exist and must not be a directory.
    pub fn open_in(fs: FS, path: impl AsRef<Path>) -> Result<Self> {
        let path = path::normalize(path);

        match fs.metadata(&path) {
            Ok(metadata) if metadata.is_file() => Ok(Self::new_unchecked(fs, path)),
            Ok(_) => Err(FileSystemError::FileDoesNotExist(path)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FileSystemError::FileDoesNotExist(path))
            }
            Err(source) => Err(FileSystemError::Inaccessible { path, source }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_string(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    pub fn is_file(&self) -> Result<bool> {
        self.ensure_present()?;
        Ok(true)
    }

    pub fn is_directory(&self) -> Result<bool> {
        self.ensure_present()?;
        Ok(false)
    }

    pub fn load_bytes(&self) -> Result<Vec<u8>> {
        self.ensure_present()?;

        log::debug!("Loading {}", self.path.display());
        self.fs
            .read_file(&self.path)
            .map_err(|source| FileSystemError::LoadFailed {
                path: self.path.clone(),
                source,
            })
    }

    /// Reads the whole file as UTF-8 text.
    pub fn load(&self) -> Result<String> {
        let bytes = self.load_bytes()?;

        String::from_utf8(bytes).map_err(|e| FileSystemError::LoadFailed {
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })
    }

    /// The directory containing this file.
    pub fn directory(&self) -> Result<Directory<FS>> {
        self.ensure_present()?;

        let parent = path::parent(&self.path)
            .ok_or_else(|| FileSystemError::DirectoryDoesNotExist(self.path.clone()))?;

        Ok(Directory::new_unchecked(self.fs.clone(), parent))
    }

    fn ensure_present(&self) -> Result<()> {
        ensure_present(&self.fs, &self.path, EntryKind::File)
    }
}

impl ExistingFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_in(RealFileSystem::new(), path)
    }
}

impl FakeFile {
    /// A standalone in-memory file; its parent directory exists in the same store.
    pub fn new(path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Self {
        let fs = FakeFileSystem::new();
        let path = path::normalize(path);

        if let Some(parent) = path::parent(&path) {
            fs.add_directory(parent);
        }
        fs.add_file(path.clone(), contents);

        Self::new_unchecked(fs, path)
    }
}

impl<FS> fmt::Display for File<FS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
