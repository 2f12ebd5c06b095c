pub mod directory;
pub mod entry;
pub mod file;
pub mod filesystem;
pub mod path;

pub mod fake;

pub use directory::{Directory, ExistingDirectory, FakeDirectory};
pub use entry::Entry;
pub use fake::{FakeFileSystem, FaultInjectingFileSystem};
pub use file::{ExistingFile, FakeFile, File};
pub use filesystem::{EntryKind, EntryMetadata, FileSystem, FileSystemError, RealFileSystem, Result};

/// Resolves `path` on disk to a file or directory handle.
pub fn resolve(path: impl AsRef<std::path::Path>) -> Result<Entry<RealFileSystem>> {
    Entry::resolve(path)
}
