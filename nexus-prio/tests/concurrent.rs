//! Multi-threaded producers and consumers sharing one queue.

use std::sync::{Arc, Barrier};
use std::thread;

use nexus_prio::{Entry, Error, PriorityQueue};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const M: usize = 200;

/// Two producers push concurrently with randomized pacing; afterwards the
/// queue holds every item exactly once and drains in priority/FIFO order.
#[test]
fn two_producers_then_drain() {
    static QUEUE: PriorityQueue<256> = PriorityQueue::named("two-producers");
    QUEUE.create().unwrap();

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2u64)
        .map(|t| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut rng = SmallRng::seed_from_u64(t + 1);
                let mut ids = Vec::with_capacity(M / 2);
                barrier.wait();
                for i in 0..M / 2 {
                    let payload = (t as i32) * 10_000 + i as i32;
                    ids.push(QUEUE.push(payload, rng.gen_range(0..5)).unwrap());
                    if rng.gen_ratio(1, 4) {
                        thread::yield_now();
                    }
                }
                ids
            })
        })
        .collect();

    let per_thread: Vec<Vec<u64>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(QUEUE.len(), M);

    let drained: Vec<Entry> = std::iter::from_fn(|| QUEUE.pop_entry().ok()).collect();
    assert_eq!(drained.len(), M);
    assert!(QUEUE.is_empty());

    for pair in drained.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(
            a.priority > b.priority || (a.priority == b.priority && a.id < b.id),
            "out of order: {a:?} before {b:?}"
        );
    }

    let mut payloads: Vec<i32> = drained.iter().map(|e| e.payload).collect();
    payloads.sort_unstable();
    payloads.dedup();
    assert_eq!(payloads.len(), M);

    // Each producer's own ids were handed out in increasing order
    for ids in &per_thread {
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    assert_eq!(QUEUE.destroy(), Ok(0));
}

#[test]
fn contended_mixed_workload() {
    let queue: Arc<PriorityQueue<32>> = Arc::new(PriorityQueue::new());
    queue.create().unwrap();

    const PRODUCERS: usize = 4;
    const PER_PRODUCER: usize = 500;

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|t| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut rng = SmallRng::seed_from_u64(100 + t as u64);
                let mut sent = 0;
                while sent < PER_PRODUCER {
                    let payload = (t * PER_PRODUCER + sent) as i32;
                    match queue.push(payload, rng.gen_range(-2..3)) {
                        Ok(_) => sent += 1,
                        Err(Error::CapacityExceeded) => thread::yield_now(),
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
            })
        })
        .collect();

    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            let mut seen = vec![false; PRODUCERS * PER_PRODUCER];
            let mut count = 0;
            while count < seen.len() {
                match queue.pop() {
                    Ok(payload) => {
                        let slot = &mut seen[payload as usize];
                        assert!(!*slot, "duplicate payload {payload}");
                        *slot = true;
                        count += 1;
                    }
                    Err(Error::EmptyQueue) => thread::yield_now(),
                    Err(e) => panic!("unexpected error: {e}"),
                }
            }
            seen
        })
    };

    for p in producers {
        p.join().unwrap();
    }
    let seen = consumer.join().unwrap();

    assert!(seen.iter().all(|&s| s));
    assert!(queue.is_empty());
    assert_eq!(queue.free_slots(), 32);
}

#[test]
fn racing_create_has_one_winner() {
    let queue: Arc<PriorityQueue> = Arc::new(PriorityQueue::new());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let queue = Arc::clone(&queue);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                queue.create()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| *r == Err(Error::AlreadyInitialized))
    );
    assert!(queue.is_ready());
}
