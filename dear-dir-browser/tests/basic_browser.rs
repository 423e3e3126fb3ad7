#![cfg(feature = "imgui")]

use dear_dir_browser::{BrowserConfig, BrowserFlags, DirBrowserExt, DirectoryBrowserState};
use dear_imgui_rs::Context;

fn context() -> Context {
    let mut imgui = Context::create();
    {
        let io = imgui.io_mut();
        io.set_display_size([800.0, 600.0]);
        io.set_delta_time(1.0 / 60.0);
    }
    let _ = imgui.font_atlas_mut().build();
    let _ = imgui.set_ini_filename::<std::path::PathBuf>(None);
    imgui
}

/// Basic smoke test: open the directory browser for a single frame and ensure
/// it renders without panicking.
#[test]
fn imgui_dir_browser_smoke_test() {
    let mut imgui = context();
    let ui = imgui.frame();

    let mut state = DirectoryBrowserState::new(BrowserConfig::new().flags(
        BrowserFlags::CREATE_NEW_DIR | BrowserFlags::ENTER_NEW_FILENAME,
    ));
    state.set_type_filters([".rs", ".toml"]);
    state.open();

    assert!(ui.dir_browser().show(&mut state).is_none());
}

#[test]
fn imgui_dir_browser_non_modal_directory_mode() {
    let mut imgui = context();
    let ui = imgui.frame();

    let mut state = DirectoryBrowserState::new(
        BrowserConfig::new()
            .title("pick a folder")
            .flags(BrowserFlags::SELECT_DIRECTORY | BrowserFlags::NO_MODAL),
    );
    state.open();

    assert!(ui.dir_browser().show(&mut state).is_none());
}

#[test]
fn imgui_dir_browser_close_on_esc_keeps_popup_without_escape() {
    let mut imgui = context();
    let ui = imgui.frame();

    let mut state =
        DirectoryBrowserState::new(BrowserConfig::new().flags(BrowserFlags::CLOSE_ON_ESC));
    state.open();

    assert!(ui.dir_browser().show(&mut state).is_none());
    assert!(state.is_open());
}
