use conflux::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Adds a fixed augend, failing once the sum leaves the i8 range.
struct Adder {
    augend: i64,
}

impl Task for Adder {
    fn execute(&self, addend: i64) -> Result<i64> {
        let sum = self.augend + addend;
        if sum > 127 {
            Err(Error::task_failed(format!(
                "{} exceeds the adder threshold",
                sum
            )))
        } else {
            Ok(sum)
        }
    }
}

struct LazyAdder {
    adder: Adder,
    delay: Duration,
}

impl Task for LazyAdder {
    fn execute(&self, addend: i64) -> Result<i64> {
        thread::sleep(self.delay);
        self.adder.execute(addend)
    }
}

fn adder(augend: i64) -> SharedTask {
    shared(Adder { augend })
}

fn lazy_adder(augend: i64, delay_ms: u64) -> SharedTask {
    shared(LazyAdder {
        adder: Adder { augend },
        delay: Duration::from_millis(delay_ms),
    })
}

/// Wait until only `expected` strong references to `task` remain, proving
/// the workers that held the other clones have terminated.
fn assert_refs_drain(task: &SharedTask, expected: usize, within: Duration) {
    let deadline = Instant::now() + within;
    while Arc::strong_count(task) > expected {
        if Instant::now() > deadline {
            panic!(
                "worker leak: {} strong refs still live (expected {})",
                Arc::strong_count(task),
                expected
            );
        }
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_pipeline_chains_outputs() {
    let pipeline = SequentialPipeline::new(vec![adder(50), adder(60)]);
    assert_eq!(pipeline.execute(10).unwrap(), 120);
}

#[test]
fn test_pipeline_stops_at_first_failure() {
    use parking_lot::Mutex;

    let ran = Arc::new(Mutex::new(Vec::new()));

    let witness = |name: &'static str, result: Result<i64>| {
        let ran = ran.clone();
        shared(move |_: i64| {
            ran.lock().push(name);
            result.clone()
        })
    };

    let pipeline = SequentialPipeline::new(vec![
        witness("first", Ok(1)),
        witness("second", Err(Error::task_failed("broken stage"))),
        witness("third", Ok(3)),
    ]);

    assert!(matches!(pipeline.execute(0), Err(Error::TaskFailed(_))));
    assert_eq!(*ran.lock(), vec!["first", "second"]);
}

#[test]
fn test_race_returns_fastest_value() {
    let race = RaceExecutor::new(vec![
        lazy_adder(20, 500),
        lazy_adder(50, 300),
        adder(41),
    ]);

    assert_eq!(race.execute(1).unwrap(), 42);
}

#[test]
fn test_race_fastest_wins_even_when_it_fails() {
    let race = RaceExecutor::new(vec![
        lazy_adder(1, 300),
        adder(200), // instant, and 200 + x > 127
    ]);

    assert!(matches!(race.execute(10), Err(Error::TaskFailed(_))));
}

#[test]
fn test_timed_cuts_off_slow_task() {
    let timed = TimedExecutor::new(lazy_adder(20, 50), Duration::from_millis(2));
    assert!(matches!(timed.execute(2), Err(Error::Timeout(_))));
}

#[test]
fn test_timed_passes_fast_task_through() {
    let timed = TimedExecutor::new(lazy_adder(20, 50), Duration::from_millis(300));
    assert_eq!(timed.execute(2).unwrap(), 22);
}

#[test]
fn test_map_reduce_applies_reduction() {
    let reduce = |values: &[i64]| values.iter().copied().min().unwrap_or(128);

    let mr = MapReduceExecutor::new(vec![adder(30), adder(50), adder(20)], reduce);
    assert_eq!(mr.execute(5).unwrap(), 25);
}

#[test]
fn test_map_reduce_is_arrival_order_independent() {
    let reduce = |values: &[i64]| values.iter().copied().min().unwrap_or(128);

    // Two runs with the delay assignment flipped must agree.
    let forward = MapReduceExecutor::new(
        vec![lazy_adder(30, 40), lazy_adder(50, 20), lazy_adder(20, 0)],
        reduce,
    );
    let reversed = MapReduceExecutor::new(
        vec![lazy_adder(30, 0), lazy_adder(50, 20), lazy_adder(20, 40)],
        reduce,
    );

    assert_eq!(forward.execute(5).unwrap(), 25);
    assert_eq!(reversed.execute(5).unwrap(), 25);
}

#[test]
fn test_map_reduce_propagates_first_failure() {
    let mr = MapReduceExecutor::new(
        vec![adder(10), lazy_adder(125, 10), adder(20)],
        |values: &[i64]| values.iter().sum(),
    );

    // 125 + 5 exceeds the threshold; the whole call fails with it.
    assert!(matches!(mr.execute(5), Err(Error::TaskFailed(_))));
}

#[test]
fn test_greatest_search_end_to_end() {
    let (tasks_tx, tasks_rx) = crossbeam_channel::unbounded();
    let search = GreatestSearchExecutor::new(2, tasks_rx); // 2 failures allowed

    let feeder = thread::spawn(move || {
        tasks_tx.send(adder(4)).unwrap();
        tasks_tx.send(lazy_adder(22, 20)).unwrap();
        tasks_tx.send(adder(125)).unwrap(); // first failure: 125 + 10 > 127
        tasks_tx.send(adder(32)).unwrap();

        // Second failure: this one times out.
        tasks_tx
            .send(shared(TimedExecutor::new(
                lazy_adder(100, 2000),
                Duration::from_millis(20),
            )))
            .unwrap();
    });

    assert_eq!(search.execute(10).unwrap(), 42);
    feeder.join().unwrap();
}

#[test]
fn test_greatest_search_budget_exceeded() {
    let (tasks_tx, tasks_rx) = crossbeam_channel::unbounded();
    let search = GreatestSearchExecutor::new(1, tasks_rx);

    tasks_tx.send(adder(4)).unwrap();
    tasks_tx.send(adder(125)).unwrap();
    tasks_tx.send(adder(126)).unwrap();
    drop(tasks_tx);

    match search.execute(10) {
        Err(Error::ErrorLimitExceeded { failures, limit }) => {
            assert_eq!(failures, 2);
            assert_eq!(limit, 1);
        }
        other => panic!("expected ErrorLimitExceeded, got {:?}", other),
    }
}

#[test]
fn test_greatest_search_empty_stream() {
    let (tasks_tx, tasks_rx) = crossbeam_channel::unbounded::<SharedTask>();
    drop(tasks_tx);

    let search = GreatestSearchExecutor::new(0, tasks_rx);
    assert!(matches!(search.execute(0), Err(Error::NoTasks)));
}

#[test]
fn test_race_workers_drain_after_return() {
    let slow = lazy_adder(1, 80);
    let race = RaceExecutor::new(vec![slow.clone(), adder(2)]);

    assert_eq!(race.execute(1).unwrap(), 3);

    // The losing worker finishes its sleep and must then exit rather than
    // block on delivery: local handle + the executor's copy remain.
    assert_refs_drain(&slow, 2, Duration::from_secs(2));
}

#[test]
fn test_timed_worker_drains_after_timeout() {
    let slow = lazy_adder(1, 100);
    let timed = TimedExecutor::new(slow.clone(), Duration::from_millis(5));

    assert!(matches!(timed.execute(0), Err(Error::Timeout(_))));
    assert_refs_drain(&slow, 2, Duration::from_secs(2));
}

#[test]
fn test_map_reduce_stragglers_drain_after_failure() {
    let straggler = lazy_adder(3, 80);
    let mr = MapReduceExecutor::new(
        vec![straggler.clone(), adder(200)],
        |values: &[i64]| values.iter().sum(),
    );

    assert!(mr.execute(1).is_err());
    assert_refs_drain(&straggler, 2, Duration::from_secs(2));
}

#[test]
fn test_combinator_instance_reuse_is_isolated() {
    let mr = Arc::new(MapReduceExecutor::new(
        vec![adder(1), adder(2), adder(3)],
        |values: &[i64]| values.iter().sum(),
    ));

    let concurrent: Vec<_> = (0..4)
        .map(|i| {
            let mr = mr.clone();
            thread::spawn(move || mr.execute(i).unwrap())
        })
        .collect();

    for (i, handle) in concurrent.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), 6 + 3 * i as i64);
    }
}

#[test]
fn test_full_combinator_tree() {
    // race(timed(slow), pipeline(+1, +2)) reduced against a plain leaf.
    let tree = MapReduceExecutor::new(
        vec![
            shared(RaceExecutor::new(vec![
                shared(TimedExecutor::new(
                    lazy_adder(100, 500),
                    Duration::from_millis(50),
                )),
                shared(SequentialPipeline::new(vec![adder(1), adder(2)])),
            ])),
            adder(10),
        ],
        |values: &[i64]| values.iter().copied().max().unwrap_or(0),
    );

    // Pipeline branch yields 5 + 1 + 2 = 8, leaf yields 15; max is 15. The
    // timed branch loses the race (or times out) either way.
    assert_eq!(tree.execute(5).unwrap(), 15);
}
