#![deny(missing_docs)]
//! Directory browser dialog for `dear-imgui-rs` applications.
//!
//! The crate is split in two layers:
//! - [`DirectoryBrowserState`]: the browsing state machine (current path,
//!   sorted listing, selection, type filters, open/confirm/cancel session).
//!   It has no UI dependency and is driven by plain method calls or
//!   [`BrowserEvent`]s.
//! - An ImGui popup (`imgui` feature) that draws the state once per frame and
//!   feeds decoded input back as events.
//!
//! Listing failures never leave the browser empty: the state falls back to
//! the process working directory and reports the error through
//! [`DirectoryBrowserState::status_message`].

mod browser_events;
mod browser_state;
mod core;
mod entry;
mod fs;
mod roots;
#[cfg(feature = "imgui")]
mod ui;

pub use browser_events::{BrowserEvent, EventOutcome};
pub use browser_state::DirectoryBrowserState;
pub use crate::core::{BrowseError, BrowserConfig, BrowserFlags, TypeFilter};
pub use entry::{DirectoryEntry, PARENT_ENTRY};
pub use fs::{FileSystem, FsEntry, StdFileSystem};
pub use roots::{FixedRoots, RootsProvider, SystemRoots};
#[cfg(feature = "imgui")]
pub use ui::{DirBrowser, DirBrowserExt};
