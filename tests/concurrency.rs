//! Concurrency Tests
//!
//! A `SharedStore` serializes mutations: concurrent writers never lose or
//! duplicate records, and readers never see a partial predicate update.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use jsondb::{Replacement, Selector, SharedStore, Store, StoreOptions};
use serde_json::{json, Value};

#[test]
fn test_concurrent_map_writers_partition_keys() {
    let shared = SharedStore::new(Store::new("kv", StoreOptions::new()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    let key = format!("t{t}-{i}");
                    shared
                        .write(|store| store.create(json!(i), Some(&key)))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let store = shared.try_into_inner().unwrap();
    assert_eq!(store.len(), 100);
}

#[test]
fn test_readers_see_whole_predicate_updates() {
    let seed: Value = (0..50)
        .map(|n| (format!("k{n}"), json!(0)))
        .collect::<serde_json::Map<_, _>>()
        .into();
    let shared = SharedStore::new(Store::new("counters", StoreOptions::new().seed(seed)).unwrap());

    let writer = {
        let shared = shared.clone();
        thread::spawn(move || {
            for _ in 0..20 {
                shared
                    .write(|store| {
                        store.update(
                            Selector::matching(|_| true),
                            Replacement::with(|v| json!(v.as_i64().unwrap_or(0) + 1)),
                        )
                    })
                    .unwrap();
            }
        })
    };

    for _ in 0..20 {
        let values: Vec<i64> = shared.read(|store| {
            store
                .serialize()
                .as_object()
                .unwrap()
                .values()
                .map(|v| v.as_i64().unwrap())
                .collect()
        });
        assert!(values.windows(2).all(|w| w[0] == w[1]));
    }

    writer.join().unwrap();
    assert_eq!(shared.read(|store| store.serialize()["k7"].clone()), json!(20));
}

#[test]
fn test_subscribers_see_every_mutation() {
    let mut store = Store::new("events", StoreOptions::new().array()).unwrap();
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    store.subscribe(move |event| {
        counter.fetch_add(event.keys.len(), Ordering::SeqCst);
    });

    let shared = SharedStore::new(store);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..10 {
                    shared.write(|store| store.create(json!(i), None)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(seen.load(Ordering::SeqCst), 40);
}
