use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::{BrowseError, BrowserConfig, BrowserFlags, TypeFilter};
use crate::entry::{DirectoryEntry, PARENT_ENTRY, normalize_lexically, read_listing};
use crate::fs::{FileSystem, StdFileSystem};
use crate::roots::{RootsProvider, SystemRoots};

#[cfg(feature = "tracing")]
use tracing::{debug, trace, warn};

static NEXT_BROWSER_ID: AtomicU64 = AtomicU64::new(1);

/// State of a directory browser dialog.
///
/// Independent of any UI types: a render host reads the accessors once per
/// frame and calls the mutating operations (or [`handle_event`]) in response
/// to decoded user input.
///
/// The session lifecycle is `closed -> open -> browsing -> confirmed |
/// cancelled -> closed`. A confirmed result stays readable through
/// [`has_selected`] and [`selected_path`] until [`clear_selected`] or the next
/// [`open`].
///
/// ```no_run
/// use dear_dir_browser::{BrowserConfig, BrowserFlags, DirectoryBrowserState};
///
/// let mut browser = DirectoryBrowserState::new(
///     BrowserConfig::new().flags(BrowserFlags::CREATE_NEW_DIR),
/// );
/// browser.set_type_filters([".h", ".cpp"]);
/// browser.open();
/// // ... per frame, after the UI reported a click:
/// browser.select("main.cpp");
/// if browser.confirm() {
///     println!("picked {}", browser.selected_path().display());
///     browser.clear_selected();
/// }
/// ```
///
/// [`handle_event`]: Self::handle_event
/// [`has_selected`]: Self::has_selected
/// [`selected_path`]: Self::selected_path
/// [`clear_selected`]: Self::clear_selected
/// [`open`]: Self::open
pub struct DirectoryBrowserState {
    flags: BrowserFlags,
    title: String,
    id: u64,
    fs: Box<dyn FileSystem>,
    roots_provider: Box<dyn RootsProvider>,

    current_path: PathBuf,
    entries: Vec<DirectoryEntry>,
    selected_name: String,
    type_filters: Vec<TypeFilter>,
    active_filter: Option<usize>,
    confirmed: bool,
    status_message: String,

    visible: bool,
    open_requested: bool,
    close_requested: bool,
    roots: Vec<PathBuf>,

    /// Text of the "new filename" field; mirrors the file selection.
    pub(crate) filename_input: String,
    /// Text of the "new directory" field.
    pub(crate) new_dir_name: String,
}

impl std::fmt::Debug for DirectoryBrowserState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryBrowserState")
            .field("flags", &self.flags)
            .field("title", &self.title)
            .field("current_path", &self.current_path)
            .field("entries", &self.entries.len())
            .field("selected_name", &self.selected_name)
            .field("active_filter", &self.active_filter)
            .field("confirmed", &self.confirmed)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

impl Default for DirectoryBrowserState {
    fn default() -> Self {
        Self::new(BrowserConfig::default())
    }
}

impl DirectoryBrowserState {
    /// Create a browser on the real filesystem.
    ///
    /// Starts in `config.start_dir`, or the process working directory.
    pub fn new(config: BrowserConfig) -> Self {
        Self::with_providers(config, StdFileSystem, SystemRoots)
    }

    /// Create a browser with custom filesystem and roots providers.
    pub fn with_providers(
        config: BrowserConfig,
        fs: impl FileSystem + 'static,
        roots: impl RootsProvider + 'static,
    ) -> Self {
        let BrowserConfig {
            flags,
            title,
            start_dir,
        } = config;
        let fs: Box<dyn FileSystem> = Box::new(fs);
        let roots_provider: Box<dyn RootsProvider> = Box::new(roots);
        let start = start_dir
            .or_else(|| fs.current_dir().ok())
            .unwrap_or_else(root_path);
        let mut state = Self {
            flags,
            title,
            id: NEXT_BROWSER_ID.fetch_add(1, Ordering::Relaxed),
            roots: roots_provider.list_roots(),
            fs,
            roots_provider,
            current_path: PathBuf::new(),
            entries: Vec::new(),
            selected_name: String::new(),
            type_filters: Vec::new(),
            active_filter: None,
            confirmed: false,
            status_message: String::new(),
            visible: false,
            open_requested: false,
            close_requested: false,
            filename_input: String::new(),
            new_dir_name: String::new(),
        };
        // A bad start directory lands in the working directory with a status message.
        let _ = state.set_path(start);
        state
    }

    /// Flags this browser was built with.
    pub fn flags(&self) -> BrowserFlags {
        self.flags
    }

    /// Whether the browser picks directories rather than files.
    pub fn is_directory_mode(&self) -> bool {
        self.flags.contains(BrowserFlags::SELECT_DIRECTORY)
    }

    /// Popup title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the popup title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// ImGui label of the browser popup, unique per instance.
    pub fn popup_label(&self) -> String {
        format!("{}##dir_browser_{}", self.title, self.id)
    }

    /// ImGui label of the "new directory" popup, unique per instance.
    pub fn new_dir_popup_label(&self) -> String {
        format!("new dir##dir_browser_new_dir_{}", self.id)
    }

    /// Absolute, normalized path being browsed.
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// Full listing of [`current_path`](Self::current_path), `..` first.
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Entries a UI should draw: `$`-prefixed names and files rejected by the
    /// active type filter are left out.
    pub fn visible_entries(&self) -> impl Iterator<Item = &DirectoryEntry> + '_ {
        self.entries.iter().filter(|e| self.is_entry_visible(e))
    }

    /// Selected entry name, empty when nothing is selected.
    pub fn selected_name(&self) -> &str {
        &self.selected_name
    }

    /// Last error or informational message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the user confirmed; stays set until [`clear_selected`](Self::clear_selected)
    /// or the next [`open`](Self::open).
    pub fn has_selected(&self) -> bool {
        self.confirmed
    }

    /// Whether the dialog should be displayed.
    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Filesystem roots offered by the drive selector.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Configured type filters.
    pub fn type_filters(&self) -> &[TypeFilter] {
        &self.type_filters
    }

    /// Index of the active type filter; `None` shows every file.
    pub fn active_filter(&self) -> Option<usize> {
        self.active_filter
    }

    /// The active type filter, if any.
    pub fn active_type_filter(&self) -> Option<&TypeFilter> {
        self.active_filter.and_then(|i| self.type_filters.get(i))
    }

    /// Current text of the "new filename" field.
    pub fn filename_input(&self) -> &str {
        &self.filename_input
    }

    /// [`current_path`](Self::current_path) joined with the selected name.
    ///
    /// Meaningful once [`has_selected`](Self::has_selected) is true. With no
    /// selection (directory mode) this is the current path itself.
    pub fn selected_path(&self) -> PathBuf {
        if self.selected_name.is_empty() {
            self.current_path.clone()
        } else {
            self.current_path.join(&self.selected_name)
        }
    }

    /// Clickable path segments: `(label, target)` for each component of the
    /// current path.
    pub fn breadcrumbs(&self) -> Vec<(String, PathBuf)> {
        let mut out: Vec<(String, PathBuf)> = Vec::new();
        let mut acc = PathBuf::new();
        for c in self.current_path.components() {
            acc.push(c.as_os_str());
            match c {
                Component::RootDir => {
                    // Fold the root into a preceding drive prefix (`C:` -> `C:\`).
                    if let Some(last) = out.last_mut() {
                        last.1 = acc.clone();
                    } else {
                        out.push((std::path::MAIN_SEPARATOR.to_string(), acc.clone()));
                    }
                }
                _ => out.push((c.as_os_str().to_string_lossy().to_string(), acc.clone())),
            }
        }
        out
    }

    /// Browse `path`.
    ///
    /// On failure the browser falls back to the process working directory and
    /// records the error in [`status_message`](Self::status_message); the
    /// returned error describes why `path` could not be listed. The selection is
    /// cleared either way; confirmation is left alone.
    pub fn set_path(&mut self, path: impl AsRef<Path>) -> Result<(), BrowseError> {
        let path = path.as_ref();
        match self.load(path) {
            Ok((resolved, entries)) => {
                self.apply_listing(resolved, entries);
                self.status_message.clear();
                Ok(())
            }
            Err(err) => {
                trace_listing_failed(path, &err);
                self.status_message = format!("last error: {err}");
                self.fall_back_to_working_dir();
                Err(err)
            }
        }
    }

    /// Re-read the current directory.
    pub fn refresh(&mut self) -> Result<(), BrowseError> {
        let cwd = self.current_path.clone();
        self.set_path(cwd)
    }

    /// Browse one of the [`roots`](Self::roots).
    pub fn select_root(&mut self, root: impl AsRef<Path>) -> Result<(), BrowseError> {
        self.set_path(root)
    }

    /// Start a browsing session.
    pub fn open(&mut self) {
        self.clear_selected();
        self.status_message.clear();
        self.visible = true;
        self.open_requested = true;
        self.close_requested = false;
        self.roots = self.roots_provider.list_roots();
        trace_session("open", &self.current_path);
    }

    /// End the session programmatically.
    pub fn close(&mut self) {
        self.end_session();
        trace_session("close", &self.current_path);
    }

    /// End the session on user request (cancel button, Escape, dismissed popup).
    pub fn cancel(&mut self) {
        self.end_session();
        trace_session("cancel", &self.current_path);
    }

    /// Clear the selection and the confirmed flag.
    pub fn clear_selected(&mut self) {
        self.selected_name.clear();
        self.filename_input.clear();
        self.confirmed = false;
    }

    /// Select an entry of the current listing.
    ///
    /// Selecting the selected entry again clears the selection. `..`, unknown
    /// names, hidden entries and entries of the wrong kind for the mode are
    /// ignored.
    pub fn select(&mut self, name: &str) {
        if !self.selected_name.is_empty() && self.selected_name == name {
            self.selected_name.clear();
            self.filename_input.clear();
            trace_selection("");
            return;
        }
        if name == PARENT_ENTRY {
            return;
        }
        let dir_mode = self.is_directory_mode();
        let Some(entry) = self.entries.iter().find(|e| e.name() == name) else {
            return;
        };
        if entry.is_dir() != dir_mode || !self.is_entry_visible(entry) {
            return;
        }
        self.selected_name = name.to_string();
        if !dir_mode {
            self.filename_input = self.selected_name.clone();
        }
        trace_selection(name);
    }

    /// Descend into the directory entry `name`, or go to the parent for `..`.
    ///
    /// Names that are not a visible directory of the current listing are
    /// ignored.
    pub fn navigate(&mut self, name: &str) -> Result<(), BrowseError> {
        let target = if name == PARENT_ENTRY {
            self.current_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.current_path.clone())
        } else {
            let is_listed_dir = self
                .entries
                .iter()
                .any(|e| e.name() == name && e.is_dir() && self.is_entry_visible(e));
            if !is_listed_dir {
                return Ok(());
            }
            self.current_path.join(name)
        };
        self.set_path(target)
    }

    /// Descend into the selected directory (directory mode only).
    pub fn open_selected(&mut self) -> Result<(), BrowseError> {
        if !self.is_directory_mode() || self.selected_name.is_empty() {
            return Ok(());
        }
        let name = self.selected_name.clone();
        self.navigate(&name)
    }

    /// Type a new file name (needs [`BrowserFlags::ENTER_NEW_FILENAME`], file mode).
    ///
    /// Text that is not a plain name (path separators, NUL, `.`, `..`) is kept
    /// in the input field but leaves nothing selected.
    pub fn enter_filename(&mut self, text: impl Into<String>) {
        if !self.flags.contains(BrowserFlags::ENTER_NEW_FILENAME) || self.is_directory_mode() {
            return;
        }
        self.filename_input = text.into();
        if is_plain_name(&self.filename_input) {
            self.selected_name = self.filename_input.clone();
        } else {
            self.selected_name.clear();
        }
    }

    /// Commit the session.
    ///
    /// File mode needs a selection; directory mode always succeeds (the
    /// current path is picked when nothing is selected). Returns whether the
    /// browser is now confirmed.
    pub fn confirm(&mut self) -> bool {
        if !self.is_directory_mode() && self.selected_name.is_empty() {
            return false;
        }
        self.confirmed = true;
        self.visible = false;
        self.open_requested = false;
        self.close_requested = true;
        trace_confirmed(&self.selected_path());
        true
    }

    /// Create `name` inside the current directory and refresh the listing.
    ///
    /// Failures are written to [`status_message`](Self::status_message) and
    /// leave the listing as it was.
    pub fn create_directory(&mut self, name: &str) -> Result<(), BrowseError> {
        if !self.flags.contains(BrowserFlags::CREATE_NEW_DIR) {
            let err = BrowseError::CreateDirDisabled;
            self.status_message = err.to_string();
            return Err(err);
        }
        let name = name.trim();
        if !is_plain_name(name) {
            let err = BrowseError::InvalidName(name.to_string());
            self.status_message = err.to_string();
            return Err(err);
        }
        let path = self.current_path.join(name);
        match self.fs.create_dir(&path) {
            Ok(()) => {
                trace_dir_created(&path);
                self.new_dir_name.clear();
                self.refresh()
            }
            Err(source) => {
                let err = BrowseError::CreateDir {
                    name: name.to_string(),
                    source,
                };
                trace_dir_create_failed(&path, &err);
                self.status_message = err.to_string();
                Err(err)
            }
        }
    }

    /// Replace the type filters. The active filter resets to "all files".
    pub fn set_type_filters<I, F>(&mut self, filters: I)
    where
        I: IntoIterator<Item = F>,
        F: Into<TypeFilter>,
    {
        self.type_filters = filters.into_iter().map(Into::into).collect();
        self.active_filter = None;
    }

    /// Choose the active type filter; out-of-range indices are ignored.
    ///
    /// A selected file the new filter hides is deselected.
    pub fn set_active_filter(&mut self, index: Option<usize>) {
        if let Some(i) = index {
            if i >= self.type_filters.len() {
                return;
            }
        }
        self.active_filter = index;
        let hidden = self
            .entries
            .iter()
            .find(|e| e.name() == self.selected_name)
            .is_some_and(|e| !self.is_entry_visible(e));
        if hidden {
            self.selected_name.clear();
            self.filename_input.clear();
        }
    }

    #[cfg(any(feature = "imgui", test))]
    pub(crate) fn take_open_request(&mut self) -> bool {
        std::mem::take(&mut self.open_requested)
    }

    #[cfg(any(feature = "imgui", test))]
    pub(crate) fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.close_requested)
    }

    fn is_entry_visible(&self, e: &DirectoryEntry) -> bool {
        if e.name().starts_with('$') {
            return false;
        }
        if e.is_dir() {
            return true;
        }
        self.active_type_filter()
            .is_none_or(|f| f.matches(e.extension()))
    }

    fn end_session(&mut self) {
        self.clear_selected();
        self.status_message.clear();
        self.visible = false;
        self.open_requested = false;
        self.close_requested = true;
    }

    fn load(&self, path: &Path) -> Result<(PathBuf, Vec<DirectoryEntry>), BrowseError> {
        let abs = self
            .fs
            .absolute(path)
            .map_err(|source| BrowseError::Resolve {
                path: path.to_path_buf(),
                source,
            })?;
        let abs = normalize_lexically(&abs);
        let entries = read_listing(self.fs.as_ref(), &abs).map_err(|source| {
            BrowseError::ReadDir {
                path: abs.clone(),
                source,
            }
        })?;
        Ok((abs, entries))
    }

    fn fall_back_to_working_dir(&mut self) {
        let cwd = self.fs.current_dir().unwrap_or_else(|_| root_path());
        match self.load(&cwd) {
            Ok((resolved, entries)) => self.apply_listing(resolved, entries),
            Err(err) => {
                // Still leave something drawable: the fallback path with `..` only.
                trace_listing_failed(&cwd, &err);
                self.status_message.push_str(&format!("; {err}"));
                self.apply_listing(normalize_lexically(&cwd), vec![DirectoryEntry::parent()]);
            }
        }
    }

    fn apply_listing(&mut self, path: PathBuf, entries: Vec<DirectoryEntry>) {
        trace_listing_loaded(&path, entries.len());
        self.current_path = path;
        self.entries = entries;
        self.selected_name.clear();
        self.filename_input.clear();
    }
}

fn root_path() -> PathBuf {
    PathBuf::from(std::path::MAIN_SEPARATOR.to_string())
}

fn is_plain_name(name: &str) -> bool {
    !(name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0'))
}

#[cfg(feature = "tracing")]
fn trace_listing_loaded(path: &Path, entries: usize) {
    debug!(
        event = "listing.loaded",
        path = %path.display(),
        entries,
        "directory listed"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_listing_loaded(_path: &Path, _entries: usize) {}

#[cfg(feature = "tracing")]
fn trace_listing_failed(path: &Path, err: &BrowseError) {
    warn!(
        event = "listing.failed",
        path = %path.display(),
        error = %err,
        "directory listing failed"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_listing_failed(_path: &Path, _err: &BrowseError) {}

#[cfg(feature = "tracing")]
fn trace_session(kind: &'static str, path: &Path) {
    trace!(event = "session", kind, path = %path.display(), "browser session");
}

#[cfg(not(feature = "tracing"))]
fn trace_session(_kind: &'static str, _path: &Path) {}

#[cfg(feature = "tracing")]
fn trace_selection(name: &str) {
    trace!(event = "selection", name, "selection changed");
}

#[cfg(not(feature = "tracing"))]
fn trace_selection(_name: &str) {}

#[cfg(feature = "tracing")]
fn trace_confirmed(path: &Path) {
    trace!(event = "confirmed", path = %path.display(), "browser confirmed");
}

#[cfg(not(feature = "tracing"))]
fn trace_confirmed(_path: &Path) {}

#[cfg(feature = "tracing")]
fn trace_dir_created(path: &Path) {
    debug!(event = "dir.created", path = %path.display(), "directory created");
}

#[cfg(not(feature = "tracing"))]
fn trace_dir_created(_path: &Path) {}

#[cfg(feature = "tracing")]
fn trace_dir_create_failed(path: &Path, err: &BrowseError) {
    warn!(
        event = "dir.create_failed",
        path = %path.display(),
        error = %err,
        "directory creation failed"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_dir_create_failed(_path: &Path, _err: &BrowseError) {}
