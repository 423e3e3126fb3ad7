use std::path::PathBuf;

use dear_dir_browser::{FileSystem, StdFileSystem};

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

#[test]
fn std_fs_create_dir_and_read_back() {
    let fs = StdFileSystem;
    let dir = unique_temp_dir("fs_ops");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("a.txt"), b"hello").unwrap();

    fs.create_dir(&dir.join("child")).unwrap();
    assert!(dir.join("child").is_dir());
    assert!(fs.create_dir(&dir.join("child")).is_err());

    let mut entries = fs.read_dir(&dir).unwrap();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    let summary: Vec<(&str, bool)> = entries
        .iter()
        .map(|e| (e.name.as_str(), e.is_dir))
        .collect();
    assert_eq!(summary, vec![("a.txt", false), ("child", true)]);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn std_fs_read_dir_fails_on_missing_dir() {
    let fs = StdFileSystem;
    let dir = unique_temp_dir("missing");
    assert!(fs.read_dir(&dir).is_err());
}

#[test]
fn std_fs_absolute_keeps_absolute_paths() {
    let fs = StdFileSystem;
    let cwd = fs.current_dir().unwrap();
    assert!(cwd.is_absolute());
    assert_eq!(fs.absolute(&cwd).unwrap(), cwd);
    assert!(fs.absolute(std::path::Path::new("rel")).unwrap().is_absolute());
}
