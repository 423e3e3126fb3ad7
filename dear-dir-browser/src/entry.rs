use std::path::{Component, Path, PathBuf};

use crate::fs::{FileSystem, FsEntry};

/// Name of the synthetic parent-navigation entry.
pub const PARENT_ENTRY: &str = "..";

/// One row of the directory listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    is_dir: bool,
    name: String,
    display_label: String,
    extension: String,
}

impl DirectoryEntry {
    fn from_fs(e: FsEntry) -> Self {
        let extension = if e.is_dir {
            String::new()
        } else {
            Path::new(&e.name)
                .extension()
                .map(|s| format!(".{}", s.to_string_lossy()))
                .unwrap_or_default()
        };
        let tag = if e.is_dir { "[D] " } else { "[F] " };
        Self {
            is_dir: e.is_dir,
            display_label: format!("{tag}{}", e.name),
            name: e.name,
            extension,
        }
    }

    pub(crate) fn parent() -> Self {
        Self {
            is_dir: true,
            name: PARENT_ENTRY.to_string(),
            display_label: format!("[D] {PARENT_ENTRY}"),
            extension: String::new(),
        }
    }

    /// Whether this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Base name of the entry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label drawn by the default UI (`[D] name` / `[F] name`).
    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    /// File suffix including the dot (`.cpp`), empty for directories.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Whether this is the synthetic `..` entry.
    pub fn is_parent(&self) -> bool {
        self.name == PARENT_ENTRY
    }
}

/// Build the listing for `dir`: `..` first, then directories, then files.
pub(crate) fn read_listing(
    fs: &dyn FileSystem,
    dir: &Path,
) -> std::io::Result<Vec<DirectoryEntry>> {
    let mut children: Vec<DirectoryEntry> = fs
        .read_dir(dir)?
        .into_iter()
        .filter(|e| !e.name.is_empty())
        .map(DirectoryEntry::from_fs)
        .collect();
    sort_entries_in_place(&mut children);

    let mut out = Vec::with_capacity(children.len() + 1);
    out.push(DirectoryEntry::parent());
    out.extend(children);
    Ok(out)
}

pub(crate) fn sort_entries_in_place(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| {
        if a.is_dir != b.is_dir {
            return b.is_dir.cmp(&a.is_dir);
        }
        a.name.cmp(&b.name)
    });
}

/// Resolve `.` and `..` components without consulting the filesystem.
///
/// `..` at the root stays at the root.
pub(crate) fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for c in path.components() {
        match c {
            Component::Prefix(_) | Component::RootDir => out.push(c.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let _ = out.pop();
            }
            Component::Normal(s) => out.push(s),
        }
    }
    out
}
