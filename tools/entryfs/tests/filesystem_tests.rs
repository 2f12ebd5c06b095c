use std::fs;
use std::path::{Path, PathBuf};

use entryfs::{
    Entry, ExistingFile, File, FileSystemError, FaultInjectingFileSystem, RealFileSystem,
};

fn testdata() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("testdata")
}

#[test]
fn test_can_be_created_from_file() {
    let entry = entryfs::resolve(testdata().join("file.txt")).unwrap();

    assert!(matches!(entry, Entry::File(_)));
    assert!(entry.is_file().unwrap());
    assert!(!entry.is_directory().unwrap());
}

#[test]
fn test_can_be_created_from_directory() {
    let entry = entryfs::resolve(testdata()).unwrap();

    assert!(matches!(entry, Entry::Directory(_)));
    assert!(entry.is_directory().unwrap());
    assert!(!entry.is_file().unwrap());
}

#[test]
fn test_directory_can_have_trailing_slash() {
    let path = format!("{}/", testdata().display());

    let entry = entryfs::resolve(&path).unwrap();

    assert!(entry.as_directory().is_some());
    assert_eq!(entry.path(), testdata());
}

#[test]
fn test_exception_when_file_or_directory_does_not_exist() {
    let error = entryfs::resolve("/does-not-exist").unwrap_err();

    assert!(matches!(error, FileSystemError::DoesNotExist(_)));
    assert_eq!(
        error.to_string(),
        "File or directory \"/does-not-exist\" does not exist"
    );
}

#[test]
fn test_can_be_loaded() {
    let file = entryfs::resolve(testdata().join("file.txt"))
        .unwrap()
        .into_file()
        .unwrap();

    assert_eq!(
        file.load().unwrap(),
        fs::read_to_string(file.path()).unwrap()
    );
}

#[test]
fn test_file_resolves_its_directory() {
    let file = ExistingFile::open(testdata().join("file.txt")).unwrap();

    let directory = file.directory().unwrap();

    assert_eq!(directory.path(), testdata());
    assert!(directory.exists("file.txt").unwrap());
}

#[test]
fn test_open_file_when_does_not_exist() {
    let error = ExistingFile::open(testdata().join("does-not-exist")).unwrap_err();

    assert!(matches!(error, FileSystemError::FileDoesNotExist(_)));
    assert!(error.to_string().contains("does not exist"));
}

#[test]
fn test_exception_when_not_readable() {
    let fs = FaultInjectingFileSystem::new(RealFileSystem::new());
    let file = File::open_in(fs.clone(), testdata().join("file.txt")).unwrap();

    fs.fail_on_next_read();

    let error = file.load().unwrap_err();
    assert!(matches!(error, FileSystemError::LoadFailed { .. }));
    assert!(error.to_string().contains("Unable to load file"));

    assert!(file.load().is_ok());
}

#[cfg(target_os = "linux")]
#[test]
fn test_resolves_name_that_is_not_utf8() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join(OsStr::from_bytes(b"bad-\xff-name"));
    fs::write(&path, "the-content").unwrap();

    let entry = entryfs::resolve(&path).unwrap();

    assert_eq!(entry.path(), path);
    assert_eq!(entry.into_file().unwrap().load().unwrap(), "the-content");
}
