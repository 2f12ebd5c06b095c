use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::entry::{ensure_present, Entry};
use crate::fake::FakeFileSystem;
use crate::file::File;
use crate::filesystem::{
    EntryKind, EntryMetadata, FileSystem, FileSystemError, RealFileSystem, Result,
};
use crate::path;

/// A container entry.
///
/// Every operation first checks that the directory is still there, so a
/// handle whose path was removed fails with
/// [`FileSystemError::NoLongerExists`] instead of acting on nothing.
#[derive(Debug, Clone)]
pub struct Directory<FS> {
    fs: FS,
    path: PathBuf,
}

/// A directory on disk.
pub type ExistingDirectory = Directory<RealFileSystem>;

/// A directory held in memory.
pub type FakeDirectory = Directory<FakeFileSystem>;

impl<FS: FileSystem + Clone> Directory<FS> {
    pub(crate) fn new_unchecked(fs: FS, path: PathBuf) -> Self {
        Self { fs, path }
    }

    /// Wraps the directory at `path`, which must already exist.
    pub fn open_in(fs: FS, path: impl AsRef<Path>) -> Result<Self> {
        let path = path::normalize(path);

        match fs.metadata(&path) {
            Ok(metadata) if metadata.is_directory() => Ok(Self::new_unchecked(fs, path)),
            Ok(_) => Err(FileSystemError::DirectoryDoesNotExist(path)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FileSystemError::DirectoryDoesNotExist(path))
            }
            Err(source) => Err(FileSystemError::Inaccessible { path, source }),
        }
    }

    /// Creates a root directory along with any missing ancestors.
    ///
    /// An existing directory at `path` is accepted as is; anything else
    /// there fails with [`FileSystemError::FileExists`].
    pub fn create_in(fs: FS, path: impl AsRef<Path>) -> Result<Self> {
        let path = path::normalize(path);

        match fs.metadata(&path) {
            Ok(metadata) if metadata.is_directory() => {
                debug!("Directory already exists: {}", path.display());
                return Ok(Self::new_unchecked(fs, path));
            }
            Ok(_) => return Err(FileSystemError::FileExists(path)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(FileSystemError::Inaccessible { path, source }),
        }

        if let Err(source) = fs.create_directory_all(&path) {
            return Err(FileSystemError::FailedToCreateDirectory { path, source });
        }

        info!("Created directory: {}", path.display());
        Ok(Self::new_unchecked(fs, path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_string(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn filesystem(&self) -> &FS {
        &self.fs
    }

    pub fn is_file(&self) -> Result<bool> {
        self.ensure_present()?;
        Ok(false)
    }

    pub fn is_directory(&self) -> Result<bool> {
        self.ensure_present()?;
        Ok(true)
    }

    /// Whether a direct child called `name` is currently present.
    pub fn exists(&self, name: &str) -> Result<bool> {
        self.ensure_present()?;
        let child = path::child(&self.path, name)?;

        Ok(self.fs.exists(&child))
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.ensure_present()?;

        Ok(self.children()?.is_empty())
    }

    /// Handle to the child file `name`. Existence is checked on use, not here.
    pub fn file(&self, name: &str) -> Result<File<FS>> {
        let child = path::child(&self.path, name)?;

        Ok(File::new_unchecked(self.fs.clone(), child))
    }

    /// Handle to the child directory `name`. Existence is checked on use, not here.
    pub fn subdirectory(&self, name: &str) -> Result<Directory<FS>> {
        let child = path::child(&self.path, name)?;

        Ok(Directory::new_unchecked(self.fs.clone(), child))
    }

    pub fn create_file(&self, name: &str, contents: impl AsRef<[u8]>) -> Result<File<FS>> {
        self.ensure_present()?;
        let child = path::child(&self.path, name)?;

        if self.fs.exists(&child) {
            return Err(FileSystemError::FileExists(child));
        }

        match self.fs.write_new_file(&child, contents.as_ref()) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(FileSystemError::FileExists(child));
            }
            Err(source) => {
                return Err(FileSystemError::FailedToCreateFile {
                    path: child,
                    source,
                });
            }
        }

        debug!("Created file: {}", child.display());
        Ok(File::new_unchecked(self.fs.clone(), child))
    }

    pub fn create_directory(&self, name: &str) -> Result<Directory<FS>> {
        self.ensure_present()?;
        let child = path::child(&self.path, name)?;

        if self.fs.exists(&child) {
            return Err(FileSystemError::FileExists(child));
        }

        match self.fs.create_directory(&child) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(FileSystemError::FileExists(child));
            }
            Err(source) => {
                return Err(FileSystemError::FailedToCreateDirectory {
                    path: child,
                    source,
                });
            }
        }

        debug!("Created directory: {}", child.display());
        Ok(Directory::new_unchecked(self.fs.clone(), child))
    }

    /// Removes the child directory `name` and everything beneath it.
    pub fn delete_directory(&self, name: &str) -> Result<()> {
        self.ensure_present()?;
        let child = path::child(&self.path, name)?;

        match self.fs.metadata(&child) {
            Ok(metadata) if metadata.is_directory() => {}
            Ok(_) => return Err(FileSystemError::DirectoryDoesNotExist(child)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FileSystemError::DirectoryDoesNotExist(child));
            }
            Err(source) => {
                return Err(FileSystemError::Inaccessible {
                    path: child,
                    source,
                });
            }
        }

        self.fs
            .remove_directory_all(&child)
            .map_err(|source| FileSystemError::FailedToDelete {
                path: child.clone(),
                source,
            })?;

        debug!("Deleted directory: {}", child.display());
        Ok(())
    }

    /// Removes every direct child file. Subdirectories are left alone.
    pub fn delete_all_files(&self) -> Result<()> {
        self.ensure_present()?;

        for entry in self.children()? {
            if entry.is_file() {
                self.remove_file(&entry.path)?;
            }
        }
        Ok(())
    }

    /// Removes everything below this directory, children first, then the
    /// directory itself. The handle is stale afterwards.
    ///
    /// Stops at the first failure; whatever was already removed stays removed.
    pub fn delete_all_files_and_directories_recursively(&self) -> Result<()> {
        self.ensure_present()?;

        for entry in self.children()? {
            if entry.is_directory() {
                Directory::new_unchecked(self.fs.clone(), entry.path)
                    .delete_all_files_and_directories_recursively()?;
            } else {
                self.remove_file(&entry.path)?;
            }
        }

        self.fs
            .remove_directory(&self.path)
            .map_err(|source| FileSystemError::FailedToDelete {
                path: self.path.clone(),
                source,
            })?;

        info!("Deleted directory recursively: {}", self.path.display());
        Ok(())
    }

    /// Direct children, files and directories alike.
    pub fn all_files(&self) -> Result<Vec<Entry<FS>>> {
        self.ensure_present()?;

        Ok(self
            .children()?
            .into_iter()
            .map(|entry| Entry::from_kind(self.fs.clone(), entry.path, entry.kind))
            .collect())
    }

    /// Every file at any depth below this directory, in pre-order.
    /// Directories themselves are not included.
    pub fn all_files_recursively(&self) -> Result<Vec<File<FS>>> {
        self.ensure_present()?;

        let paths = self
            .fs
            .list_files_recursively(&self.path)
            .map_err(|source| FileSystemError::FailedToList {
                path: self.path.clone(),
                source,
            })?;

        Ok(paths
            .into_iter()
            .map(|p| File::new_unchecked(self.fs.clone(), p))
            .collect())
    }

    fn children(&self) -> Result<Vec<EntryMetadata>> {
        self.fs
            .list_directory(&self.path)
            .map_err(|source| FileSystemError::FailedToList {
                path: self.path.clone(),
                source,
            })
    }

    fn remove_file(&self, file: &Path) -> Result<()> {
        self.fs
            .remove_file(file)
            .map_err(|source| FileSystemError::FailedToDelete {
                path: file.to_path_buf(),
                source,
            })?;

        debug!("Deleted file: {}", file.display());
        Ok(())
    }

    fn ensure_present(&self) -> Result<()> {
        ensure_present(&self.fs, &self.path, EntryKind::Directory)
    }
}

impl ExistingDirectory {
    /// Wraps an existing directory on disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_in(RealFileSystem::new(), path)
    }

    /// Creates a directory on disk, including missing ancestors.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::create_in(RealFileSystem::new(), path)
    }
}

impl FakeDirectory {
    /// An empty in-memory root. Nothing is read from or written to disk.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let fs = FakeFileSystem::new();
        let path = path::normalize(path);
        fs.add_directory(path.clone());

        Self::new_unchecked(fs, path)
    }
}

impl<FS> fmt::Display for Directory<FS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
