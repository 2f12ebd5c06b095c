use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::directory::Directory;
use crate::file::File;
use crate::filesystem::{EntryKind, FileSystem, FileSystemError, RealFileSystem, Result};
use crate::path;

/// Either kind of handle, as returned by resolution and listing.
#[derive(Debug, Clone)]
pub enum Entry<FS> {
    File(File<FS>),
    Directory(Directory<FS>),
}

impl<FS: FileSystem + Clone> Entry<FS> {
    /// Inspects `path` in `fs` and returns the matching handle.
    pub fn resolve_in(fs: FS, path: impl AsRef<Path>) -> Result<Self> {
        let path = path::normalize(path);

        let metadata = match fs.metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FileSystemError::DoesNotExist(path));
            }
            Err(source) => return Err(FileSystemError::Inaccessible { path, source }),
        };

        Ok(Self::from_kind(fs, path, metadata.kind))
    }

    pub(crate) fn from_kind(fs: FS, path: PathBuf, kind: EntryKind) -> Self {
        match kind {
            EntryKind::File => Entry::File(File::new_unchecked(fs, path)),
            EntryKind::Directory => Entry::Directory(Directory::new_unchecked(fs, path)),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Entry::File(file) => file.path(),
            Entry::Directory(directory) => directory.path(),
        }
    }

    pub fn as_string(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }

    pub fn is_file(&self) -> Result<bool> {
        match self {
            Entry::File(file) => file.is_file(),
            Entry::Directory(directory) => directory.is_file(),
        }
    }

    pub fn is_directory(&self) -> Result<bool> {
        match self {
            Entry::File(file) => file.is_directory(),
            Entry::Directory(directory) => directory.is_directory(),
        }
    }

    pub fn as_file(&self) -> Option<&File<FS>> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&Directory<FS>> {
        match self {
            Entry::Directory(directory) => Some(directory),
            Entry::File(_) => None,
        }
    }

    pub fn into_file(self) -> Option<File<FS>> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Directory(_) => None,
        }
    }

    pub fn into_directory(self) -> Option<Directory<FS>> {
        match self {
            Entry::Directory(directory) => Some(directory),
            Entry::File(_) => None,
        }
    }
}

impl Entry<RealFileSystem> {
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self> {
        Self::resolve_in(RealFileSystem::new(), path)
    }
}

impl<FS> fmt::Display for Entry<FS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::File(file) => fmt::Display::fmt(file, f),
            Entry::Directory(directory) => fmt::Display::fmt(directory, f),
        }
    }
}

/// Re-validates a handle: the path must still exist and still be of `kind`.
///
/// Only a missing path or a path now holding the other kind of entry makes
/// the handle stale; any other metadata failure is reported as is.
pub(crate) fn ensure_present<FS: FileSystem>(fs: &FS, path: &Path, kind: EntryKind) -> Result<()> {
    match fs.metadata(path) {
        Ok(metadata) if metadata.kind == kind => Ok(()),
        Ok(_) => Err(FileSystemError::NoLongerExists(path.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(FileSystemError::NoLongerExists(path.to_path_buf()))
        }
        Err(source) => Err(FileSystemError::Inaccessible {
            path: path.to_path_buf(),
            source,
        }),
    }
}
