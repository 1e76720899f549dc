use key_overlay::input::{InputCapture, InputClass, MockCaptureBackend, RawInput};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn wait_for(seen: &Arc<Mutex<Vec<(String, bool)>>>, n: usize) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while seen.lock().unwrap().len() < n && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn keyboard_and_pointer_reach_callback() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let (kb, kb_handle) = MockCaptureBackend::new();
    let (ptr, ptr_handle) = MockCaptureBackend::new();
    let mut capture = InputCapture::with_backends(
        Arc::new(move |id: &str, pressed: bool| sink.lock().unwrap().push((id.to_string(), pressed))),
        Box::new(kb),
        Box::new(ptr),
    );
    capture.start();

    assert!(kb_handle.emit(RawInput::Key {
        key: rdev::Key::KeyA,
        pressed: true,
        typed: Some("a".into()),
    }));
    assert!(ptr_handle.emit(RawInput::Button {
        button: rdev::Button::Left,
        pressed: true,
    }));
    wait_for(&seen, 2);
    capture.stop();

    let mut got = seen.lock().unwrap().clone();
    got.sort();
    assert_eq!(
        got,
        vec![("a".to_string(), true), ("mouse_left".to_string(), true)]
    );
}

#[test]
fn attach_failure_leaves_other_class_running() {
    let (kb, kb_handle) = MockCaptureBackend::new();
    let (ptr, ptr_handle) = MockCaptureBackend::new();
    kb_handle.set_fail_attach(true);
    let mut capture = InputCapture::with_backends(Arc::new(|_: &str, _: bool| {}), Box::new(kb), Box::new(ptr));
    capture.start();
    assert!(!capture.is_attached(InputClass::Keyboard));
    assert!(capture.is_attached(InputClass::Pointer));
    assert!(ptr_handle.is_attached());
    capture.stop();
}

#[test]
fn detach_failure_does_not_block_the_rest() {
    let (kb, kb_handle) = MockCaptureBackend::new();
    let (ptr, ptr_handle) = MockCaptureBackend::new();
    kb_handle.set_fail_detach(true);
    let mut capture = InputCapture::with_backends(Arc::new(|_: &str, _: bool| {}), Box::new(kb), Box::new(ptr));
    capture.start();
    capture.stop();
    assert_eq!(kb_handle.detach_count(), 1);
    assert_eq!(ptr_handle.detach_count(), 1);
    assert!(!ptr_handle.is_attached());
    assert!(!capture.is_running());
}
