use std::{fs, thread::sleep, time::Duration};

use serial_test::serial;
use tempfile::tempdir;

#[test]
#[serial]
fn writes_log_file_and_buffer() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("overlay.log");

    let buffer = key_overlay::logging::init(true, Some(path.clone()));
    tracing::info!("overlay test line");

    sleep(Duration::from_millis(100));

    assert!(path.exists(), "log file was not created");
    let contents = fs::read_to_string(path).unwrap();
    assert!(contents.contains("overlay test line"));
    assert!(buffer
        .snapshot()
        .iter()
        .any(|line| line.text.contains("overlay test line")));
}
