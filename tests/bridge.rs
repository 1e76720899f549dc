use key_overlay::bridge::EventBridge;
use key_overlay::input::KeyTransition;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn preserves_single_source_order_without_coalescing() {
    let mut bridge: EventBridge<Vec<(String, bool)>> = EventBridge::new();
    bridge
        .subscribe(|seen: &mut Vec<(String, bool)>, t: &KeyTransition| {
            seen.push((t.id.clone(), t.pressed));
        })
        .unwrap();
    let publisher = bridge.publisher();
    let handle = thread::spawn(move || {
        for i in 0..200 {
            publisher.publish("a", i % 2 == 0);
        }
    });
    handle.join().unwrap();

    let mut seen = Vec::new();
    assert_eq!(bridge.pump(&mut seen), 200);
    assert_eq!(seen.len(), 200);
    for (i, (id, pressed)) in seen.iter().enumerate() {
        assert_eq!(id, "a");
        assert_eq!(*pressed, i % 2 == 0);
    }
}

#[test]
fn waker_runs_per_publish() {
    let mut bridge: EventBridge<()> = EventBridge::new();
    bridge.subscribe(|_: &mut (), _: &KeyTransition| {}).unwrap();
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&wakes);
    bridge.set_waker(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let publisher = bridge.publisher();
    publisher.publish("x", true);
    publisher.publish("x", false);
    assert_eq!(wakes.load(Ordering::SeqCst), 2);
    assert_eq!(bridge.pump(&mut ()), 2);
}

#[test]
fn publish_after_drop_reports_failure() {
    let bridge: EventBridge<()> = EventBridge::new();
    let publisher = bridge.publisher();
    drop(bridge);
    assert!(!publisher.publish("a", true));
}
