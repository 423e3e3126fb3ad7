//! Drive a directory browser without a UI.
//!
//! ```text
//! RUST_LOG=dear_dir_browser=trace cargo run -p dear-dir-browser --example headless_browse -- /tmp
//! ```

use dear_dir_browser::{
    BrowserConfig, BrowserEvent, BrowserFlags, DirectoryBrowserState, EventOutcome,
};
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn print_listing(state: &DirectoryBrowserState) {
    println!("{}", state.current_path().display());
    for e in state.visible_entries() {
        println!("  {}", e.display_label());
    }
    if !state.status_message().is_empty() {
        println!("  ({})", state.status_message());
    }
}

fn main() {
    init_tracing();

    let mut config = BrowserConfig::new()
        .title("pick a folder")
        .flags(BrowserFlags::SELECT_DIRECTORY);
    if let Some(start) = std::env::args_os().nth(1) {
        config = config.start_dir(start);
    }
    let mut state = DirectoryBrowserState::new(config);
    state.handle_event(BrowserEvent::Open);
    print_listing(&state);

    // Step into the first subdirectory, if there is one.
    let first_dir = state
        .visible_entries()
        .find(|e| e.is_dir() && !e.is_parent())
        .map(|e| e.name().to_string());
    if let Some(name) = first_dir {
        state.handle_event(BrowserEvent::Select(name));
        state.handle_event(BrowserEvent::OpenSelected);
        print_listing(&state);
    }

    match state.handle_event(BrowserEvent::Confirm) {
        EventOutcome::Confirmed => println!("picked {}", state.selected_path().display()),
        other => println!("no selection ({other:?})"),
    }
}
