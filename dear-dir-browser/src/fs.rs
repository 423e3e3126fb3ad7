use std::path::{Path, PathBuf};

/// Directory child returned by [`FileSystem::read_dir`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FsEntry {
    /// Base name (no parent path)
    pub name: String,
    /// Whether this entry is a directory (symlinks are followed).
    pub is_dir: bool,
}

impl FsEntry {
    /// Entry for a regular file.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    /// Entry for a directory.
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Filesystem provider used by the browser.
///
/// Implementations only report regular files and directories; anything else
/// (sockets, fifos, dangling links) is left out of [`read_dir`](Self::read_dir).
pub trait FileSystem {
    /// List the immediate children of a directory.
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FsEntry>>;
    /// Make a path absolute without touching the filesystem.
    fn absolute(&self, path: &Path) -> std::io::Result<PathBuf>;
    /// The process working directory.
    fn current_dir(&self) -> std::io::Result<PathBuf>;
    /// Create a single directory.
    fn create_dir(&self, path: &Path) -> std::io::Result<()>;
}

/// Default filesystem implementation using `std::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FsEntry>> {
        let mut out = Vec::new();
        for e in std::fs::read_dir(dir)? {
            let Ok(e) = e else {
                continue;
            };
            // `fs::metadata` follows links, so a link to a directory counts as one
            // and a dangling link drops out here.
            let Ok(md) = std::fs::metadata(e.path()) else {
                continue;
            };
            let is_dir = if md.is_dir() {
                true
            } else if md.is_file() {
                false
            } else {
                continue;
            };
            out.push(FsEntry {
                name: e.file_name().to_string_lossy().to_string(),
                is_dir,
            });
        }
        Ok(out)
    }

    fn absolute(&self, path: &Path) -> std::io::Result<PathBuf> {
        std::path::absolute(path)
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn create_dir(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir(path)
    }
}
