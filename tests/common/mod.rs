#![allow(dead_code)]

pub mod temp_files {
    use std::path::{Path, PathBuf};

    /// A route table written into its own temporary directory.
    ///
    /// The directory (and the file) are removed when this value drops.
    pub struct TempTable {
        _dir: tempfile::TempDir,
        path: PathBuf,
    }

    impl TempTable {
        pub fn path(&self) -> &Path {
            &self.path
        }

        /// Replace the file contents in place.
        pub fn rewrite(&self, content: &str) {
            std::fs::write(&self.path, content).unwrap();
        }
    }

    /// Creates `routes.<ext>` holding `content` in a fresh temporary directory
    pub fn create_temp_table(content: &str, ext: &str) -> TempTable {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("routes.{ext}"));
        std::fs::write(&path, content).unwrap();
        TempTable { _dir: dir, path }
    }

    /// Creates a temporary table with yaml extension
    pub fn create_temp_yaml(content: &str) -> TempTable {
        create_temp_table(content, "yaml")
    }
}
