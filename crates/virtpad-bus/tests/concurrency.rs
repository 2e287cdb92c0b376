//! Handle uniqueness under concurrent creation.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use virtpad_bus::DeviceRegistry;
use virtpad_bus::adapter::mock::MockAdapter;
use virtpad_protocol::{DeviceKind, Features};

#[test]
fn concurrent_creates_assign_pairwise_distinct_handles() {
    let mock = Arc::new(MockAdapter::new());
    let registry = Arc::new(DeviceRegistry::new(mock.clone()));

    const THREADS: usize = 8;
    const PER_THREAD: usize = 16;

    let handles: Vec<thread::JoinHandle<Vec<u64>>> = (0..THREADS)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let kind = DeviceKind::ALL[i % DeviceKind::ALL.len()];
                (0..PER_THREAD)
                    .map(|_| match registry.create(kind, Features::empty()) {
                        Ok(handle) => handle,
                        Err(e) => panic!("create failed under contention: {e}"),
                    })
                    .collect()
            })
        })
        .collect();

    let mut all = Vec::new();
    for handle in handles {
        match handle.join() {
            Ok(batch) => all.extend(batch),
            Err(_) => panic!("worker thread panicked"),
        }
    }

    let unique: HashSet<u64> = all.iter().copied().collect();
    assert_eq!(unique.len(), THREADS * PER_THREAD);
    assert!(all.iter().all(|&h| h >= 1));
    // Every assigned handle precedes the counter's next value.
    let next = registry.peek_next_handle();
    assert!(all.iter().all(|&h| h < next));
    assert_eq!(registry.device_count(), THREADS * PER_THREAD);
    assert_eq!(mock.live_count(), THREADS * PER_THREAD);
}

#[test]
fn concurrent_updates_and_destroys_never_double_delete() {
    let mock = Arc::new(MockAdapter::new());
    let registry = Arc::new(DeviceRegistry::new(mock.clone()));

    let handles: Vec<u64> = (0..16)
        .map(|_| match registry.create(DeviceKind::Xbox360, Features::empty()) {
            Ok(handle) => handle,
            Err(e) => panic!("create failed: {e}"),
        })
        .collect();

    let destroyers: Vec<thread::JoinHandle<usize>> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let handles = handles.clone();
            thread::spawn(move || {
                handles
                    .iter()
                    .filter(|&&h| registry.destroy(h).is_ok())
                    .count()
            })
        })
        .collect();

    let total: usize = destroyers
        .into_iter()
        .map(|h| match h.join() {
            Ok(count) => count,
            Err(_) => panic!("destroyer thread panicked"),
        })
        .sum();

    // Each handle is destroyed by exactly one winner.
    assert_eq!(total, handles.len());
    assert_eq!(registry.device_count(), 0);
    assert_eq!(mock.deleted().len(), handles.len());
    assert_eq!(mock.unknown_delete_count(), 0);
}
