//! Tests for candidate file loading.

use std::path::Path;

use tempfile::TempDir;

use super::*;
use crate::test_support::MemoryFileSystem;

mod load_result {
    use super::*;

    #[test]
    fn loaded_content_is_returned() {
        let result = LoadResult::Loaded("a = 1".to_string());
        assert_eq!(result.into_contents().as_deref(), Some("a = 1"));
    }

    #[test]
    fn empty_file_does_not_contribute() {
        assert_eq!(LoadResult::Loaded(String::new()).into_contents(), None);
    }

    #[test]
    fn failures_do_not_contribute() {
        assert_eq!(LoadResult::NotFound.into_contents(), None);
        let unreadable = LoadResult::Unreadable {
            reason: "denied".to_string(),
        };
        assert_eq!(unreadable.into_contents(), None);
    }
}

mod std_file_system {
    use super::*;

    #[test]
    fn reads_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".apprc");
        std::fs::write(&path, "{\"a\": 1}").unwrap();

        assert_eq!(StdFileSystem.read(&path), LoadResult::Loaded("{\"a\": 1}".to_string()));
        assert!(StdFileSystem.exists(&path));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing");

        assert_eq!(StdFileSystem.read(&path), LoadResult::NotFound);
        assert!(!StdFileSystem.exists(&path));
    }

    #[test]
    fn directory_is_unreadable() {
        let dir = TempDir::new().unwrap();

        assert!(matches!(
            StdFileSystem.read(dir.path()),
            LoadResult::Unreadable { .. }
        ));
    }
}

mod load {
    use super::*;

    #[test]
    fn only_non_empty_files_contribute() {
        let fs = MemoryFileSystem::new()
            .with_file("/etc/apprc", "x = 1")
            .with_file("/etc/app.conf", "")
            .with_unreadable("/etc/app/config");

        assert_eq!(load(&fs, Path::new("/etc/apprc")).as_deref(), Some("x = 1"));
        assert_eq!(load(&fs, Path::new("/etc/app.conf")), None);
        assert_eq!(load(&fs, Path::new("/etc/app/config")), None);
        assert_eq!(load(&fs, Path::new("/etc/nothing")), None);
    }
}
