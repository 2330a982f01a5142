//! # Concurrency
//!
//! The shared bus and preferences store under parallel producers and
//! consumers. Operations must never block indefinitely, lose unrelated
//! writes, or expose a partially written value.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Barrier};
    use std::thread;

    use pr_01_preferences::{InMemoryBackend, PrefValue, Preferences, PreferencesApi, PreferencesConfig};
    use rand::Rng;
    use shared_bus::DataBus;
    use shared_types::Payload;

    const THREADS: usize = 8;
    const OPS: usize = 500;

    #[test]
    fn test_disjoint_writers_all_land() {
        let bus = Arc::new(DataBus::new());
        let barrier = Barrier::new(THREADS);

        thread::scope(|s| {
            for t in 0..THREADS {
                let bus = &bus;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    for i in 0..OPS {
                        bus.set(format!("t{t}.k{i}"), Payload::Integer((t * OPS + i) as i64));
                    }
                });
            }
        });

        assert_eq!(bus.len(), THREADS * OPS);
        for t in 0..THREADS {
            let value = bus.get(&format!("t{t}.k{}", OPS - 1)).unwrap();
            assert_eq!(*value, Payload::Integer((t * OPS + OPS - 1) as i64));
        }
    }

    #[test]
    fn test_contended_key_ends_with_some_written_value() {
        let bus = Arc::new(DataBus::new());
        let barrier = Barrier::new(THREADS * 2);
        let written: HashSet<i64> = (0..THREADS as i64).collect();

        thread::scope(|s| {
            for t in 0..THREADS {
                let bus = &bus;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    for _ in 0..OPS {
                        bus.set("hot", Payload::Integer(t as i64));
                    }
                });
            }
            for _ in 0..THREADS {
                let bus = &bus;
                let barrier = &barrier;
                let written = &written;
                s.spawn(move || {
                    barrier.wait();
                    let mut rng = rand::thread_rng();
                    for _ in 0..OPS {
                        if let Some(value) = bus.get("hot") {
                            let Payload::Integer(n) = *value else {
                                panic!("unexpected payload {value:?}");
                            };
                            assert!(written.contains(&n));
                        }
                        if rng.gen_bool(0.05) {
                            bus.remove("hot");
                        }
                    }
                });
            }
        });

        // A final write after all contention is always visible.
        bus.set("hot", Payload::Integer(99));
        assert_eq!(*bus.get("hot").unwrap(), Payload::Integer(99));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_take_hands_each_value_to_one_reader() {
        let bus = Arc::new(DataBus::new());
        for i in 0..100 {
            bus.set(format!("job{i}"), Payload::Integer(i));
        }

        let mut handles = Vec::new();
        for _ in 0..4 {
            let bus = Arc::clone(&bus);
            handles.push(tokio::spawn(async move {
                (0..100)
                    .filter_map(|i| bus.take(&format!("job{i}")))
                    .count()
            }));
        }

        let mut taken = 0;
        for handle in handles {
            taken += handle.await.unwrap();
        }
        assert_eq!(taken, 100);
        assert!(bus.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_preference_writes_flush_once_settled() {
        let store = Arc::new(
            Preferences::open("stress", InMemoryBackend::new(), PreferencesConfig::default())
                .await
                .unwrap(),
        );

        let mut handles = Vec::new();
        for t in 0..THREADS {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                for i in 0..50 {
                    store
                        .put(&format!("t{t}.k{i}"), PrefValue::Int(i))
                        .await
                        .unwrap();
                    if i % 10 == 0 {
                        store.flush().await.unwrap();
                    }
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        store.flush().await.unwrap();
        assert!(!store.is_dirty());
        assert_eq!(store.backend().persisted().len(), THREADS * 50);
    }
}
