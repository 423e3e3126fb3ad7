use std::path::PathBuf;

use crate::browser_state::DirectoryBrowserState;

/// Domain events for driving the browser.
///
/// These are emitted by a UI layer that has already decoded raw input
/// (click, double click, text entry, key press) and are applied through
/// [`DirectoryBrowserState::handle_event`]. Keeping them free of UI types
/// keeps the state machine testable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowserEvent {
    /// Start a session.
    Open,
    /// End the session programmatically.
    Close,
    /// End the session on user request.
    Cancel,
    /// Browse a path (breadcrumb click, typed path).
    SetPath(PathBuf),
    /// Browse a filesystem root (drive selector).
    SelectRoot(PathBuf),
    /// Re-read the current directory.
    Refresh,
    /// Single click on an entry.
    Select(String),
    /// Double click on a directory entry (or `..`).
    Navigate(String),
    /// Descend into the selected directory (directory mode "open" button).
    OpenSelected,
    /// The new-filename field changed.
    EnterFilename(String),
    /// Ok button.
    Confirm,
    /// Create a directory in the current path.
    CreateDirectory(String),
    /// Pick a type filter; `None` shows every file.
    SetActiveFilter(Option<usize>),
    /// Drop the selection and the confirmed flag.
    ClearSelected,
}

/// Session transition caused by applying a [`BrowserEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// The session continues (or was not running).
    None,
    /// The user committed a selection.
    Confirmed,
    /// The session ended without a selection.
    Closed,
}

impl DirectoryBrowserState {
    /// Apply one event.
    ///
    /// Filesystem failures never surface here: they end up in
    /// [`status_message`](Self::status_message) like they do for the direct
    /// calls.
    pub fn handle_event(&mut self, ev: BrowserEvent) -> EventOutcome {
        match ev {
            BrowserEvent::Open => self.open(),
            BrowserEvent::Close => {
                self.close();
                return EventOutcome::Closed;
            }
            BrowserEvent::Cancel => {
                self.cancel();
                return EventOutcome::Closed;
            }
            BrowserEvent::SetPath(p) => {
                let _ = self.set_path(p);
            }
            BrowserEvent::SelectRoot(p) => {
                let _ = self.select_root(p);
            }
            BrowserEvent::Refresh => {
                let _ = self.refresh();
            }
            BrowserEvent::Select(name) => self.select(&name),
            BrowserEvent::Navigate(name) => {
                let _ = self.navigate(&name);
            }
            BrowserEvent::OpenSelected => {
                let _ = self.open_selected();
            }
            BrowserEvent::EnterFilename(text) => self.enter_filename(text),
            BrowserEvent::Confirm => {
                if self.confirm() {
                    return EventOutcome::Confirmed;
                }
            }
            BrowserEvent::CreateDirectory(name) => {
                let _ = self.create_directory(&name);
            }
            BrowserEvent::SetActiveFilter(i) => self.set_active_filter(i),
            BrowserEvent::ClearSelected => self.clear_selected(),
        }
        EventOutcome::None
    }
}
