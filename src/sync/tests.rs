#![cfg(test)]

use std::sync::Barrier;
use std::thread;

use super::*;
use crate::collections::hash::SyncHashTable;
use crate::collections::tree::SyncTreeMap;
use crate::util::panic::assert_panics;

const WRITES: u64 = 2000;

#[test]
fn test_frames() {
    let sync = RwSync::new(vec![1, 2]);

    sync.write().push(3);
    assert_eq!(sync.with_read(Vec::len), 3, "A write frame should mutate the value in place.");

    sync.with_write(Vec::clear);
    assert!(sync.read().is_empty());
    assert_eq!(format!("{sync:?}"), "RwSync { value: [] }");
}

#[test]
fn test_readers_coexist() {
    let sync = RwSync::new(42);
    let barrier = Barrier::new(2);

    thread::scope(|s| {
        for _ in 0..2 {
            s.spawn(|| {
                let frame = sync.read();
                // Both threads have to hold a read frame at once to get past the barrier.
                barrier.wait();
                assert_eq!(*frame, 42);
            });
        }
    });
}

#[test]
fn test_exclusive_access() {
    let mut sync = RwSync::from(5);
    assert_eq!(sync.get_mut(), Ok(&mut 5), "An exclusive borrow shouldn't need a frame.");
    assert_eq!(sync.into_inner(), Ok(5));
}

#[test]
fn test_poisoning() {
    let sync = RwSync::new(0);

    let result = thread::scope(|s| {
        s.spawn(|| {
            let mut frame = sync.write();
            *frame += 1;
            if *frame > 0 {
                panic!("writer failed part way through an update");
            }
        }).join()
    });

    assert!(result.is_err());
    assert!(sync.is_poisoned(), "A panic inside a write frame should poison the primitive.");
    assert_eq!(sync.try_read().err(), Some(PoisonedSync));
    assert_eq!(sync.try_write().err(), Some(PoisonedSync));
    assert_panics!(
        { sync.read(); },
        "Opening a frame on a poisoned primitive should panic."
    );
    assert_eq!(sync.into_inner(), Err(PoisonedSync));
}

#[test]
fn test_shared_table_reads_see_writes() {
    let table = SyncHashTable::new();
    table.insert("counter", 0);

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let mut last = 0;
                while last < WRITES {
                    let Some(seen) = table.get(&"counter") else {
                        panic!("The counter should never be missing.");
                    };
                    assert!(seen >= last, "Completed writes should stay visible, {seen} < {last}.");
                    assert!(seen <= WRITES, "Only written values should be observed.");
                    last = seen;
                }
            });
        }

        s.spawn(|| {
            for value in 1..=WRITES {
                assert_eq!(table.insert("counter", value), Some(value - 1));
            }
        });
    });

    assert_eq!(table.get(&"counter"), Some(WRITES));
}

#[test]
fn test_shared_map_reads_see_writes() {
    let map = SyncTreeMap::new();
    map.insert("counter", 0);

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let mut last = 0;
                while last < WRITES {
                    let Some(seen) = map.get(&"counter") else {
                        panic!("The counter should never be missing.");
                    };
                    assert!(seen >= last, "Completed writes should stay visible, {seen} < {last}.");
                    assert!(seen <= WRITES, "Only written values should be observed.");
                    last = seen;
                }
            });
        }

        s.spawn(|| {
            for value in 1..=WRITES {
                assert_eq!(map.insert("counter", value), Some(value - 1));
            }
        });
    });

    assert_eq!(map.len(), 1);
}

#[test]
fn test_write_frame_is_atomic() {
    let table = SyncHashTable::new();
    let map = SyncTreeMap::new();

    thread::scope(|s| {
        for _ in 0..3 {
            s.spawn(|| {
                loop {
                    let frame = table.read();
                    let (a, b) = (frame.get(&'a').copied(), frame.get(&'b').copied());
                    assert_eq!(a, b, "A read frame should never see half of a write frame.");
                    if a == Some(WRITES) {
                        break;
                    }
                }
            });
            s.spawn(|| {
                loop {
                    let frame = map.read();
                    let values: Vec<u64> = frame.values().copied().collect();
                    assert!(
                        values.windows(2).all(|pair| pair[0] == pair[1]),
                        "A read frame should never see half of a write frame."
                    );
                    if values.len() == 3 && values[0] == WRITES {
                        break;
                    }
                }
            });
        }

        s.spawn(|| {
            for value in 1..=WRITES {
                let mut frame = table.write();
                frame.insert('a', value);
                frame.insert('b', value);
            }
        });
        s.spawn(|| {
            for value in 1..=WRITES {
                let mut frame = map.write();
                for key in ['x', 'y', 'z'] {
                    frame.insert(key, value);
                }
            }
        });
    });
}
