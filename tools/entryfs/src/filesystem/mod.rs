mod real;

pub use real::RealFileSystem;

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileSystemError {
    #[error("File or directory \"{}\" does not exist", .0.display())]
    DoesNotExist(PathBuf),

    #[error("File \"{}\" does not exist", .0.display())]
    FileDoesNotExist(PathBuf),

    #[error("Directory \"{}\" does not exist", .0.display())]
    DirectoryDoesNotExist(PathBuf),

    #[error("File \"{}\" exists", .0.display())]
    FileExists(PathBuf),

    #[error("Failed to create directory \"{}\": {source}", path.display())]
    FailedToCreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file \"{}\": {source}", path.display())]
    FailedToCreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to load file \"{}\": {source}", path.display())]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to delete \"{}\": {source}", path.display())]
    FailedToDelete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to list directory \"{}\": {source}", path.display())]
    FailedToList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to access \"{}\": {source}", path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("\"{}\" does not exist any more", .0.display())]
    NoLongerExists(PathBuf),

    #[error("Invalid entry name: {0:?}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, FileSystemError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Clone)]
pub struct EntryMetadata {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl EntryMetadata {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// The single-call primitives every handle is built from.
///
/// Implementations report raw `io::Error`s; handles translate them into
/// [`FileSystemError`] with the offending path attached.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Classifies `path`. Fails with `io::ErrorKind::NotFound` when nothing is there.
    fn metadata(&self, path: &Path) -> io::Result<EntryMetadata>;

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Writes a new file. Fails with `io::ErrorKind::AlreadyExists` instead of overwriting.
    fn write_new_file(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Creates a single directory; the parent must already exist.
    fn create_directory(&self, path: &Path) -> io::Result<()>;

    /// Creates a directory and any missing ancestors.
    fn create_directory_all(&self, path: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Removes an empty directory.
    fn remove_directory(&self, path: &Path) -> io::Result<()>;

    fn remove_directory_all(&self, path: &Path) -> io::Result<()>;

    /// Direct children of `path`.
    fn list_directory(&self, path: &Path) -> io::Result<Vec<EntryMetadata>>;

    /// Every non-directory below `path`, in pre-order.
    fn list_files_recursively(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}
