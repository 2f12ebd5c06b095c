//! In-memory backends for tests that must not touch disk.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

use crate::filesystem::{EntryKind, EntryMetadata, FileSystem};

#[derive(Debug, Clone)]
enum FakeNode {
    File(Vec<u8>),
    Directory,
}

impl FakeNode {
    fn kind(&self) -> EntryKind {
        match self {
            FakeNode::File(_) => EntryKind::File,
            FakeNode::Directory => EntryKind::Directory,
        }
    }
}

/// An insertion-ordered in-memory store shared by every clone.
///
/// Relative paths are keyed without a leading `.`, so `./notes.txt` and
/// `notes.txt` name the same node, and the empty key stands for `.`.
#[derive(Debug, Clone, Default)]
pub struct FakeFileSystem {
    nodes: Arc<Mutex<IndexMap<PathBuf, FakeNode>>>,
}

fn key(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| *c != Component::CurDir)
        .collect()
}

/// Whether `path` is `ancestor` or lies beneath it.
fn is_within(path: &Path, ancestor: &Path) -> bool {
    path.has_root() == ancestor.has_root() && path.starts_with(ancestor)
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} not found", path.display()),
    )
}

fn already_exists(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("{} already exists", path.display()),
    )
}

fn wrong_kind(path: &Path, expected: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::Other,
        format!("{} is not a {}", path.display(), expected),
    )
}

impl FakeFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn nodes(&self) -> MutexGuard<'_, IndexMap<PathBuf, FakeNode>> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds a file without any parent checks.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.nodes()
            .insert(key(path.as_ref()), FakeNode::File(content.into()));
    }

    /// Seeds a directory without any parent checks.
    pub fn add_directory(&self, path: impl AsRef<Path>) {
        self.nodes()
            .entry(key(path.as_ref()))
            .or_insert(FakeNode::Directory);
    }

    pub fn get_file_content(&self, path: &Path) -> Option<Vec<u8>> {
        match self.nodes().get(&key(path)) {
            Some(FakeNode::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    /// Looks up `path`, which must be a directory.
    fn expect_directory(nodes: &IndexMap<PathBuf, FakeNode>, path: &Path) -> io::Result<()> {
        match nodes.get(&key(path)) {
            Some(FakeNode::Directory) => Ok(()),
            Some(FakeNode::File(_)) => Err(wrong_kind(path, "directory")),
            None => Err(not_found(path)),
        }
    }

    fn insert_child(&self, path: &Path, node: FakeNode) -> io::Result<()> {
        let mut nodes = self.nodes();
        let child = key(path);

        if nodes.contains_key(&child) {
            return Err(already_exists(path));
        }

        let parent = child.parent().ok_or_else(|| not_found(path))?;
        Self::expect_directory(&nodes, parent)?;

        nodes.insert(child, node);
        Ok(())
    }

    fn collect_files(&self, path: &Path, results: &mut Vec<PathBuf>) -> io::Result<()> {
        for entry in self.list_directory(path)? {
            if entry.is_directory() {
                self.collect_files(&entry.path, results)?;
            } else {
                results.push(entry.path);
            }
        }
        Ok(())
    }
}

impl FileSystem for FakeFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.nodes().contains_key(&key(path))
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        let kind = match self.nodes().get(&key(path)) {
            Some(node) => node.kind(),
            None => return Err(not_found(path)),
        };

        Ok(EntryMetadata {
            path: path.to_path_buf(),
            kind,
        })
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.nodes().get(&key(path)) {
            Some(FakeNode::File(content)) => Ok(content.clone()),
            Some(FakeNode::Directory) => Err(wrong_kind(path, "file")),
            None => Err(not_found(path)),
        }
    }

    fn write_new_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.insert_child(path, FakeNode::File(contents.to_vec()))
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        self.insert_child(path, FakeNode::Directory)
    }

    fn create_directory_all(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.nodes();
        let target = key(path);
        let mut missing: Vec<&Path> = target.ancestors().collect();
        missing.reverse();

        for ancestor in missing {
            match nodes.get(ancestor) {
                Some(FakeNode::Directory) => {}
                Some(FakeNode::File(_)) => return Err(wrong_kind(ancestor, "directory")),
                None => {
                    nodes.insert(ancestor.to_path_buf(), FakeNode::Directory);
                }
            }
        }
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.nodes();
        let target = key(path);
        match nodes.get(&target) {
            Some(FakeNode::File(_)) => {
                nodes.shift_remove(&target);
                Ok(())
            }
            Some(FakeNode::Directory) => Err(wrong_kind(path, "file")),
            None => Err(not_found(path)),
        }
    }

    fn remove_directory(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.nodes();
        Self::expect_directory(&nodes, path)?;
        let target = key(path);

        if nodes.keys().any(|p| p.parent() == Some(target.as_path())) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is not empty", path.display()),
            ));
        }

        nodes.shift_remove(&target);
        Ok(())
    }

    fn remove_directory_all(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.nodes();
        Self::expect_directory(&nodes, path)?;
        let target = key(path);

        nodes.retain(|p, _| !is_within(p, &target));
        Ok(())
    }

    /// Children are reported under `path` as given, so `./notes.txt` lists
    /// as `./notes.txt` the way the OS would.
    fn list_directory(&self, path: &Path) -> io::Result<Vec<EntryMetadata>> {
        let nodes = self.nodes();
        Self::expect_directory(&nodes, path)?;
        let target = key(path);

        let results = nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(target.as_path()))
            .filter_map(|(p, node)| {
                p.file_name().map(|name| EntryMetadata {
                    path: path.join(name),
                    kind: node.kind(),
                })
            })
            .collect();

        Ok(results)
    }

    fn list_files_recursively(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut results = Vec::new();
        self.collect_files(path, &mut results)?;
        Ok(results)
    }
}

#[derive(Debug, Default)]
struct Faults {
    metadata: AtomicBool,
    read: AtomicBool,
    write: AtomicBool,
    create_directory: AtomicBool,
    list: AtomicBool,
}

/// Fails once if `armed`, disarming it.
fn trip(armed: &AtomicBool, operation: &str) -> io::Result<()> {
    if armed.swap(false, Ordering::SeqCst) {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("injected {} failure", operation),
        ));
    }
    Ok(())
}

/// Wraps a backend and fails single primitives on demand.
///
/// Each switch fails exactly one call and then disarms. Switches are shared
/// between clones, so they can be armed after handles have been created
/// from the wrapper.
#[derive(Debug, Clone)]
pub struct FaultInjectingFileSystem<FS> {
    inner: FS,
    faults: Arc<Faults>,
}

impl<FS: FileSystem> FaultInjectingFileSystem<FS> {
    pub fn new(inner: FS) -> Self {
        Self {
            inner,
            faults: Arc::new(Faults::default()),
        }
    }

    /// The next `metadata` call fails with a non-`NotFound` error.
    pub fn fail_on_next_metadata(&self) {
        self.faults.metadata.store(true, Ordering::SeqCst);
    }

    pub fn fail_on_next_read(&self) {
        self.faults.read.store(true, Ordering::SeqCst);
    }

    /// The next `write_new_file` fails before anything is written.
    pub fn fail_on_next_write(&self) {
        self.faults.write.store(true, Ordering::SeqCst);
    }

    /// The next directory creation, single or recursive, fails before
    /// anything is created.
    pub fn fail_on_next_create_directory(&self) {
        self.faults.create_directory.store(true, Ordering::SeqCst);
    }

    /// The next listing, flat or recursive, fails.
    pub fn fail_on_next_list(&self) {
        self.faults.list.store(true, Ordering::SeqCst);
    }
}

impl<FS: FileSystem> FileSystem for FaultInjectingFileSystem<FS> {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        trip(&self.faults.metadata, "metadata")?;
        self.inner.metadata(path)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        trip(&self.faults.read, "read")?;
        self.inner.read_file(path)
    }

    fn write_new_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        trip(&self.faults.write, "write")?;
        self.inner.write_new_file(path, contents)
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        trip(&self.faults.create_directory, "create directory")?;
        self.inner.create_directory(path)
    }

    fn create_directory_all(&self, path: &Path) -> io::Result<()> {
        trip(&self.faults.create_directory, "create directory")?;
        self.inner.create_directory_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.inner.remove_file(path)
    }

    fn remove_directory(&self, path: &Path) -> io::Result<()> {
        self.inner.remove_directory(path)
    }

    fn remove_directory_all(&self, path: &Path) -> io::Result<()> {
        self.inner.remove_directory_all(path)
    }

    fn list_directory(&self, path: &Path) -> io::Result<Vec<EntryMetadata>> {
        trip(&self.faults.list, "list")?;
        self.inner.list_directory(path)
    }

    fn list_files_recursively(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        trip(&self.faults.list, "list")?;
        self.inner.list_files_recursively(path)
    }
}
