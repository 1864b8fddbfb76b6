//! Randomized ordering, capacity and conservation checks against a simple
//! reference model.

use nexus_prio::{Entry, Error, PriorityQueue};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const CAP: usize = 16;

/// Reference model: a plain vector, popped by (max priority, min id).
#[derive(Default)]
struct Model {
    items: Vec<Entry>,
}

impl Model {
    fn push(&mut self, entry: Entry) {
        self.items.push(entry);
    }

    fn pop(&mut self) -> Option<Entry> {
        let best = self
            .items
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.priority.cmp(&b.priority).then(b.id.cmp(&a.id)))
            .map(|(i, _)| i)?;
        Some(self.items.remove(best))
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn matches_reference_model() {
    init_tracing();

    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let queue: PriorityQueue<CAP> = PriorityQueue::named("model");
    queue.create().unwrap();
    let mut model = Model::default();

    for _ in 0..10_000 {
        if rng.gen_bool(0.55) {
            let payload = rng.gen_range(-1_000..1_000);
            let priority = rng.gen_range(-3..4);
            match queue.push(payload, priority) {
                Ok(id) => {
                    assert!(model.items.len() < CAP);
                    model.push(Entry { payload, priority, id });
                }
                Err(Error::CapacityExceeded) => assert_eq!(model.items.len(), CAP),
                Err(e) => panic!("unexpected error: {e}"),
            }
        } else {
            match (queue.pop_entry(), model.pop()) {
                (Ok(got), Some(want)) => assert_eq!(got, want),
                (Err(Error::EmptyQueue), None) => {}
                (got, want) => panic!("diverged: queue {got:?}, model {want:?}"),
            }
        }

        assert_eq!(queue.len(), model.items.len());
        assert_eq!(queue.free_slots(), CAP - model.items.len());
        assert_eq!(queue.is_empty(), model.items.is_empty());
    }
}

#[test]
fn snapshot_is_sorted() {
    let mut rng = SmallRng::seed_from_u64(7);
    let queue: PriorityQueue<CAP> = PriorityQueue::new();
    queue.create().unwrap();

    for i in 0..CAP as i32 {
        queue.push(i, rng.gen_range(0..4)).unwrap();
    }

    let mut buf = [Entry { payload: 0, priority: 0, id: 0 }; CAP];
    assert_eq!(queue.snapshot(&mut buf), Ok(CAP));

    for pair in buf.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(
            a.priority > b.priority || (a.priority == b.priority && a.id < b.id),
            "out of order: {a:?} before {b:?}"
        );
    }

    // Pop order matches the snapshot
    for want in buf {
        assert_eq!(queue.pop_entry(), Ok(want));
    }
}

#[test]
fn ids_strictly_increase_across_churn() {
    let queue: PriorityQueue<4> = PriorityQueue::new();
    queue.create().unwrap();

    let mut last = None;
    for round in 0..100 {
        if queue.free_slots() == 0 {
            queue.pop().unwrap();
        }
        let id = queue.push(round, round % 3).unwrap();
        if let Some(prev) = last {
            assert!(id > prev);
        }
        last = Some(id);

        if round % 25 == 24 {
            queue.destroy().unwrap();
            queue.create().unwrap();
        }
    }
}

#[test]
fn full_queue_rejects_then_accepts() {
    let queue: PriorityQueue = PriorityQueue::new();
    queue.create().unwrap();

    for i in 0..10 {
        assert!(queue.push(i, 1).is_ok());
    }
    assert_eq!(queue.push(10, 1), Err(Error::CapacityExceeded));
    assert_eq!(queue.len(), 10);

    assert_eq!(queue.pop(), Ok(0));
    assert!(queue.push(10, 1).is_ok());

    let drained: Vec<i32> = std::iter::from_fn(|| queue.pop().ok()).collect();
    assert_eq!(drained, (1..=10).collect::<Vec<_>>());
}
