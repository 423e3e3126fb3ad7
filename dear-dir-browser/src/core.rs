use std::path::PathBuf;
use thiserror::Error;

bitflags::bitflags! {
    /// Behavior flags for a directory browser, fixed at construction.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BrowserFlags: u32 {
        /// Select a directory instead of a regular file
        const SELECT_DIRECTORY = 1 << 0;
        /// Allow typing a new file name when selecting a regular file
        const ENTER_NEW_FILENAME = 1 << 1;
        /// Show a plain popup instead of a modal one
        const NO_MODAL = 1 << 2;
        /// Hide the popup title bar
        const NO_TITLE_BAR = 1 << 3;
        /// Hide the status text at the bottom of the popup
        const NO_STATUS_BAR = 1 << 4;
        /// Close the browser when Escape is pressed
        const CLOSE_ON_ESC = 1 << 5;
        /// Allow creating new directories
        const CREATE_NEW_DIR = 1 << 6;
    }
}

/// Construction-time configuration for [`DirectoryBrowserState`].
///
/// The value is immutable once handed to the state; build a new state to
/// change flags.
///
/// ```
/// use dear_dir_browser::{BrowserConfig, BrowserFlags};
/// let cfg = BrowserConfig::new()
///     .flags(BrowserFlags::SELECT_DIRECTORY | BrowserFlags::CREATE_NEW_DIR)
///     .title("Pick a folder");
/// assert!(cfg.flags.contains(BrowserFlags::SELECT_DIRECTORY));
/// ```
///
/// [`DirectoryBrowserState`]: crate::DirectoryBrowserState
#[derive(Clone, Debug)]
pub struct BrowserConfig {
    /// Behavior flags
    pub flags: BrowserFlags,
    /// Popup title
    pub title: String,
    /// Initial directory (process working directory when `None`)
    pub start_dir: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            flags: BrowserFlags::empty(),
            title: "file browser".to_string(),
            start_dir: None,
        }
    }
}

impl BrowserConfig {
    /// Default configuration: file mode, modal, titled "file browser".
    pub fn new() -> Self {
        Self::default()
    }

    /// Set behavior flags
    pub fn flags(mut self, flags: BrowserFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the popup title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial directory
    pub fn start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }
}

/// A file type filter, matched against the file name suffix.
///
/// Both `".cpp"` and `"cpp"` are accepted; matching is case-insensitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeFilter {
    label: String,
    extension: String,
}

impl TypeFilter {
    /// Create a filter for one extension.
    pub fn new(ext: impl AsRef<str>) -> Self {
        let raw = ext.as_ref().trim();
        let bare = raw.trim_start_matches('.').to_lowercase();
        let label = if raw.starts_with('.') || raw.is_empty() {
            raw.to_string()
        } else {
            format!(".{raw}")
        };
        Self {
            label,
            extension: bare,
        }
    }

    /// Label shown in the filter combo (always dotted, e.g. `.cpp`).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns true when `extension` (as stored on a [`DirectoryEntry`], with
    /// a leading dot) passes this filter.
    ///
    /// [`DirectoryEntry`]: crate::DirectoryEntry
    pub fn matches(&self, extension: &str) -> bool {
        let ext = extension.trim_start_matches('.');
        !ext.is_empty() && ext.eq_ignore_ascii_case(&self.extension)
    }
}

impl From<&str> for TypeFilter {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TypeFilter {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Errors raised while browsing or editing directories.
///
/// The `Display` text is what ends up in the browser status line.
#[derive(Error, Debug)]
pub enum BrowseError {
    /// The requested path could not be made absolute
    #[error("cannot resolve {}: {source}", path.display())]
    Resolve {
        /// Requested path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The directory could not be listed (missing, not a directory, denied)
    #[error("cannot read {}: {source}", path.display())]
    ReadDir {
        /// Directory that failed to list
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// Creating a directory failed
    #[error("failed to create {name}: {source}")]
    CreateDir {
        /// Requested directory name
        name: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The directory name is empty or contains path syntax
    #[error("invalid directory name: '{0}'")]
    InvalidName(String),
    /// Directory creation needs [`BrowserFlags::CREATE_NEW_DIR`]
    #[error("creating directories is not enabled")]
    CreateDirDisabled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_filter_accepts_dotted_and_bare_extensions() {
        let dotted = TypeFilter::new(".cpp");
        let bare = TypeFilter::new("CPP");
        assert_eq!(dotted.label(), ".cpp");
        assert_eq!(bare.label(), ".CPP");
        assert!(dotted.matches(".cpp"));
        assert!(bare.matches(".cpp"));
        assert!(dotted.matches(".CPP"));
        assert!(!dotted.matches(".h"));
        assert!(!dotted.matches(""));
    }

    #[test]
    fn config_builder_sets_fields() {
        let cfg = BrowserConfig::new()
            .flags(BrowserFlags::NO_MODAL | BrowserFlags::CLOSE_ON_ESC)
            .title("Open")
            .start_dir("/tmp");
        assert_eq!(cfg.title, "Open");
        assert!(cfg.flags.contains(BrowserFlags::CLOSE_ON_ESC));
        assert!(!cfg.flags.contains(BrowserFlags::SELECT_DIRECTORY));
        assert_eq!(cfg.start_dir, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn create_dir_error_message_names_the_directory() {
        let err = BrowseError::CreateDir {
            name: "newdir".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to create newdir: denied");
    }
}
