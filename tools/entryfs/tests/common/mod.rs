//! Behavior every directory backend must share. Each check takes a fresh,
//! empty directory.
#![allow(dead_code)]

use std::collections::BTreeSet;

use entryfs::{Directory, FileSystem, FileSystemError};

pub fn a_directory_is_no_file<FS: FileSystem + Clone>(directory: Directory<FS>) {
    assert!(directory.is_directory().unwrap());
    assert!(!directory.is_file().unwrap());
}

pub fn file_can_be_created<FS: FileSystem + Clone>(directory: Directory<FS>) {
    let file = directory.create_file("the-filename", "the-content").unwrap();

    assert_eq!(file.load().unwrap(), "the-content");

    let files = directory.all_files().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path(), directory.path().join("the-filename"));
    assert!(files[0].is_file().unwrap());
}

pub fn existing_file_cannot_be_created<FS: FileSystem + Clone + std::fmt::Debug>(directory: Directory<FS>) {
    let file = directory.create_file("the-filename", "the-content").unwrap();

    let error = directory.create_file("the-filename", "other-content").unwrap_err();

    assert!(matches!(error, FileSystemError::FileExists(_)));
    assert_eq!(error.to_string(), format!("File \"{}\" exists", file.as_string()));
    assert_eq!(file.load().unwrap(), "the-content");
}

pub fn existing_directory_cannot_be_created<FS: FileSystem + Clone + std::fmt::Debug>(directory: Directory<FS>) {
    directory.create_directory("the-subdirectory").unwrap();
    directory.create_file("the-filename", "the-content").unwrap();

    for name in ["the-subdirectory", "the-filename"] {
        let error = directory.create_directory(name).unwrap_err();
        assert!(matches!(error, FileSystemError::FileExists(_)));
    }
    assert_eq!(
        directory.file("the-filename").unwrap().load().unwrap(),
        "the-content"
    );
}

pub fn can_check_file_existence<FS: FileSystem + Clone>(directory: Directory<FS>) {
    directory.create_file("the-filename", "the-content").unwrap();

    assert!(directory.exists("the-filename").unwrap());
    assert!(!directory.exists("does-not-exist").unwrap());
}

pub fn emptiness_follows_children<FS: FileSystem + Clone>(directory: Directory<FS>) {
    assert!(directory.is_empty().unwrap());

    directory.create_directory("the-subdirectory").unwrap();

    assert!(!directory.is_empty().unwrap());
}

pub fn subdirectory_can_be_created<FS: FileSystem + Clone>(directory: Directory<FS>) {
    let subdirectory = directory.create_directory("the-subdirectory").unwrap();

    assert_eq!(subdirectory.path(), directory.path().join("the-subdirectory"));
    assert!(subdirectory.is_directory().unwrap());
    assert!(subdirectory.is_empty().unwrap());
    assert!(directory.exists("the-subdirectory").unwrap());
}

pub fn files_can_be_deleted<FS: FileSystem + Clone>(directory: Directory<FS>) {
    directory.create_file("the-filename", "the-content").unwrap();
    directory.create_file("another-filename", "the-content").unwrap();
    let subdirectory = directory.create_directory("the-subdirectory").unwrap();
    subdirectory.create_file("nested", "the-content").unwrap();

    directory.delete_all_files().unwrap();

    let remaining: Vec<String> = directory
        .all_files()
        .unwrap()
        .iter()
        .map(|e| e.as_string())
        .collect();
    assert_eq!(remaining, vec![subdirectory.as_string()]);
    assert!(subdirectory.exists("nested").unwrap());
}

pub fn only_files_leave_directory_empty<FS: FileSystem + Clone>(directory: Directory<FS>) {
    directory.create_file("the-filename", "the-content").unwrap();

    directory.delete_all_files().unwrap();

    assert!(directory.is_empty().unwrap());
}

pub fn contents_can_be_deleted_recursively<FS: FileSystem + Clone>(directory: Directory<FS>) {
    directory.create_file("the-filename", "the-content").unwrap();
    let subdirectory = directory.create_directory("the-subdirectory").unwrap();
    subdirectory.create_file("the-filename", "the-content").unwrap();
    subdirectory.create_directory("deeper").unwrap();

    directory.delete_all_files_and_directories_recursively().unwrap();

    assert!(!directory.filesystem().exists(directory.path()));
    assert!(!directory.filesystem().exists(subdirectory.path()));
    assert!(matches!(
        directory.is_directory(),
        Err(FileSystemError::NoLongerExists(_))
    ));
}

pub fn subdirectory_can_be_deleted<FS: FileSystem + Clone>(directory: Directory<FS>) {
    let subdirectory = directory.create_directory("the-subdirectory").unwrap();
    subdirectory.create_file("the-filename", "the-content").unwrap();
    directory.create_file("kept", "the-content").unwrap();

    directory.delete_directory("the-subdirectory").unwrap();

    assert!(!directory.exists("the-subdirectory").unwrap());
    assert!(directory.exists("kept").unwrap());
}

fn populate<FS: FileSystem + Clone>(directory: &Directory<FS>) {
    directory.create_file("1", "1").unwrap();
    directory.create_file("2", "2").unwrap();
    directory
        .create_directory("subdirectory")
        .unwrap()
        .create_file("3", "3")
        .unwrap();
}

pub fn iterates_over_directory<FS: FileSystem + Clone>(directory: Directory<FS>) {
    populate(&directory);

    let files: BTreeSet<_> = directory
        .all_files()
        .unwrap()
        .iter()
        .map(|e| e.path().to_path_buf())
        .collect();

    let expected: BTreeSet<_> = ["1", "2", "subdirectory"]
        .iter()
        .map(|name| directory.path().join(name))
        .collect();
    assert_eq!(files, expected);
}

pub fn iterates_over_directory_recursively<FS: FileSystem + Clone>(directory: Directory<FS>) {
    populate(&directory);

    let files: Vec<_> = directory
        .all_files_recursively()
        .unwrap()
        .iter()
        .map(|f| f.path().to_path_buf())
        .collect();
    assert_eq!(files.len(), 3);

    let files: BTreeSet<_> = files.into_iter().collect();
    let expected: BTreeSet<_> = ["1", "2", "subdirectory/3"]
        .iter()
        .map(|name| directory.path().join(name))
        .collect();
    assert_eq!(files, expected);
}

pub fn deleted_subdirectory_handle_is_stale<FS: FileSystem + Clone>(directory: Directory<FS>) {
    let subdirectory = directory.create_directory("the-subdirectory").unwrap();

    directory.delete_directory("the-subdirectory").unwrap();

    let results = [
        subdirectory.is_file().map(|_| ()),
        subdirectory.is_directory().map(|_| ()),
        subdirectory.exists("anything").map(|_| ()),
        subdirectory.is_empty().map(|_| ()),
        subdirectory.all_files().map(|_| ()),
        subdirectory.create_file("the-filename", "").map(|_| ()),
    ];

    for result in results {
        let error = result.unwrap_err();
        assert!(matches!(error, FileSystemError::NoLongerExists(_)));
        assert!(error.to_string().contains("does not exist any more"));
    }
}
