use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{EntryKind, EntryMetadata, FileSystem};

#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

fn kind_of(file_type: fs::FileType) -> EntryKind {
    if file_type.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        let metadata = fs::metadata(path)?;

        Ok(EntryMetadata {
            path: path.to_path_buf(),
            kind: kind_of(metadata.file_type()),
        })
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write_new_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;

        file.write_all(contents)
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn create_directory_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_directory(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn remove_directory_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }

    fn list_directory(&self, path: &Path) -> io::Result<Vec<EntryMetadata>> {
        let mut results = Vec::new();

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;

            results.push(EntryMetadata {
                path: entry.path(),
                kind: kind_of(file_type),
            });
        }

        Ok(results)
    }

    fn list_files_recursively(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut results = Vec::new();

        for entry in WalkDir::new(path).min_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                results.push(entry.into_path());
            }
        }

        Ok(results)
    }
}
