use std::path::{Path, PathBuf};

use dear_dir_browser::{BrowserConfig, BrowserFlags, DirectoryBrowserState};
use pretty_assertions::assert_eq;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    p.push(format!("dear-dir-browser-{prefix}-{pid}-{t}"));
    p
}

/// `root/{a.txt, b.txt, sub/}`
fn make_fixture(prefix: &str) -> PathBuf {
    let root = unique_temp_dir(prefix);
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(root.join("sub")).unwrap();
    std::fs::write(root.join("b.txt"), b"b").unwrap();
    std::fs::write(root.join("a.txt"), b"a").unwrap();
    root
}

fn browser_at(dir: &Path, flags: BrowserFlags) -> DirectoryBrowserState {
    DirectoryBrowserState::new(BrowserConfig::new().flags(flags).start_dir(dir))
}

fn names(state: &DirectoryBrowserState) -> Vec<String> {
    state.entries().iter().map(|e| e.name().to_string()).collect()
}

#[test]
fn lists_kind_then_name() {
    let root = make_fixture("listing");
    let state = browser_at(&root, BrowserFlags::empty());

    assert_eq!(state.current_path(), root.as_path());
    assert_eq!(names(&state), vec!["..", "sub", "a.txt", "b.txt"]);
    assert!(state.status_message().is_empty());
    assert_eq!(state.entries()[2].extension(), ".txt");

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn missing_path_falls_back_to_working_dir() {
    let root = make_fixture("fallback");
    let mut state = browser_at(&root, BrowserFlags::empty());

    let missing = root.join("missing");
    assert!(state.set_path(&missing).is_err());

    let cwd = std::path::absolute(std::env::current_dir().unwrap()).unwrap();
    assert_eq!(state.current_path(), cwd.as_path());
    assert_eq!(state.entries()[0].name(), "..");
    assert!(!state.status_message().is_empty());

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn file_path_is_not_browsable() {
    let root = make_fixture("not_a_dir");
    let mut state = browser_at(&root, BrowserFlags::empty());

    assert!(state.set_path(root.join("a.txt")).is_err());
    assert!(state.status_message().starts_with("last error: "));

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn navigate_up_and_down() {
    let root = make_fixture("navigate");
    let mut state = browser_at(&root.join("sub"), BrowserFlags::empty());

    state.navigate("..").unwrap();
    assert_eq!(state.current_path(), root.as_path());
    state.navigate("sub").unwrap();
    assert_eq!(state.current_path(), root.join("sub").as_path());
    assert_eq!(names(&state), vec![".."]);

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn confirm_file_selection_round_trip() {
    let root = make_fixture("confirm");
    let mut state = browser_at(&root, BrowserFlags::empty());

    state.open();
    state.select("a.txt");
    assert!(state.confirm());
    assert!(state.has_selected());
    assert!(!state.is_open());
    assert_eq!(state.selected_path(), root.join("a.txt"));

    state.clear_selected();
    assert!(!state.has_selected());

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn type_filter_hides_other_files() {
    let root = make_fixture("filters");
    std::fs::write(root.join("main.cpp"), b"int main() {}").unwrap();
    std::fs::write(root.join("readme.md"), b"# readme").unwrap();
    let mut state = browser_at(&root, BrowserFlags::empty());

    state.set_type_filters([".cpp", ".h"]);
    state.set_active_filter(Some(0));
    let visible: Vec<&str> = state.visible_entries().map(|e| e.name()).collect();
    assert_eq!(visible, vec!["..", "sub", "main.cpp"]);

    state.select("readme.md");
    assert_eq!(state.selected_name(), "");
    state.select("main.cpp");
    assert_eq!(state.selected_name(), "main.cpp");

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn create_directory_refreshes_listing() {
    let root = make_fixture("mkdir");
    let mut state = browser_at(&root, BrowserFlags::CREATE_NEW_DIR);

    state.create_directory("newdir").unwrap();
    assert!(root.join("newdir").is_dir());
    assert_eq!(names(&state), vec!["..", "newdir", "sub", "a.txt", "b.txt"]);
    assert!(state.status_message().is_empty());

    // Second attempt collides with the directory created above.
    let before = names(&state);
    assert!(state.create_directory("newdir").is_err());
    assert_eq!(names(&state), before);
    assert!(state.status_message().starts_with("failed to create newdir"));

    std::fs::remove_dir_all(&root).unwrap();
}

#[cfg(unix)]
#[test]
fn dangling_symlinks_are_skipped() {
    let root = make_fixture("symlink");
    std::os::unix::fs::symlink(root.join("nowhere"), root.join("broken")).unwrap();
    std::os::unix::fs::symlink(root.join("sub"), root.join("link_to_sub")).unwrap();
    let state = browser_at(&root, BrowserFlags::empty());

    assert_eq!(
        names(&state),
        vec!["..", "link_to_sub", "sub", "a.txt", "b.txt"]
    );

    std::fs::remove_dir_all(&root).unwrap();
}
