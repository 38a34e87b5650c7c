use std::sync::Arc;
use std::thread;
use std::time::Duration;

use storefront::context::SharedContext;
use storefront::error::ErrorKind;
use storefront::simulation::Simulation;
use storefront::test_utils::fixtures::immediate_config;
use storefront::test_utils::observer::RecordingObserver;
use storefront::test_utils::wait::{DEFAULT_TEST_TIMEOUT, wait_until, wait_with_timeout};
use storefront::workers::base::{Worker, WorkerHandle};
use storefront::workers::pool::ConsumerPool;
use storefront::workers::producer::Producer;
use telemetry::tracing::init_test_tracing;

#[test]
fn producer_blocks_on_full_shelf_without_consumers() {
    init_test_tracing();

    let handle = Simulation::new(immediate_config(5, 0, 6), RecordingObserver::new())
        .unwrap()
        .start()
        .unwrap();

    assert!(wait_until(DEFAULT_TEST_TIMEOUT, || handle.progress().produced == 5));

    // Give the producer time to get past the sixth item if it wrongly could.
    thread::sleep(Duration::from_millis(200));
    let progress = handle.progress();

    assert_eq!(progress.produced, 5);
    assert_eq!(progress.occupied, 5);
    assert_eq!(progress.consumed, 0);
    assert!(!progress.producer_finished);
    assert!(!progress.all_produced);
    assert!(!handle.wait_for_completion(Duration::from_millis(100)));

    // The blocked producer thread is left detached.
}

#[test]
fn full_production_without_consumers_never_completes() {
    init_test_tracing();

    let handle = Simulation::new(immediate_config(5, 0, 5), RecordingObserver::new())
        .unwrap()
        .start()
        .unwrap();

    assert!(wait_until(DEFAULT_TEST_TIMEOUT, || handle
        .progress()
        .producer_finished));

    let progress = handle.progress();
    assert_eq!(progress.produced, 5);
    assert_eq!(progress.occupied, 5);
    assert!(progress.all_produced);
    assert!(!progress.all_consumed);
    assert!(!handle.wait_for_completion(Duration::from_millis(200)));
}

#[test]
fn redundant_broadcasts_do_not_double_count() {
    init_test_tracing();

    let total = 40;
    let observer = RecordingObserver::new();
    let config = immediate_config(2, 3, total);
    let context = Arc::new(SharedContext::new(&config, Arc::new(observer.clone())));

    let pool = ConsumerPool::start(3, &context).unwrap();
    let producer = Producer::new(context.clone()).start().unwrap();
    assert_eq!(producer.wait().unwrap(), total);

    assert!(context.coordinator.wait_all_consumed_timeout(DEFAULT_TEST_TIMEOUT));
    for _ in 0..5 {
        context.coordinator.mark_all_consumed();
        context.coordinator.mark_all_produced();
    }

    let per_consumer = pool.wait_all().unwrap();

    assert_eq!(per_consumer.iter().sum::<u64>(), total);
    assert_eq!(context.buffer.consumed(), total);
    assert_eq!(context.buffer.occupied(), 0);
    assert_eq!(context.filled.count(), 0);
    assert_eq!(context.empty.count(), 2);
    assert!(observer.sequence_gaps_or_duplicates().is_empty());
}

#[test]
fn polling_for_completion_does_not_steal_item_wakeups() {
    init_test_tracing();

    for _ in 0..20 {
        let handle = Simulation::new(immediate_config(1, 1, 200), RecordingObserver::new())
            .unwrap()
            .start()
            .unwrap();

        assert!(wait_until(DEFAULT_TEST_TIMEOUT, || {
            handle.wait_for_completion(Duration::from_millis(1))
        }));

        let report = wait_with_timeout(handle).unwrap();
        assert_eq!(report.consumed, 200);
    }
}

#[test]
fn zero_capacity_is_rejected_before_any_thread_starts() {
    let err = Simulation::new(immediate_config(0, 2, 3), RecordingObserver::new())
        .err()
        .unwrap();

    assert_eq!(err.kind(), ErrorKind::ConfigError);
}

#[test]
fn progress_reports_completion_after_wait_for_completion() {
    init_test_tracing();

    let handle = Simulation::new(immediate_config(3, 2, 20), RecordingObserver::new())
        .unwrap()
        .start()
        .unwrap();

    assert!(handle.wait_for_completion(DEFAULT_TEST_TIMEOUT));
    let progress = handle.progress();
    assert_eq!(progress.consumed, 20);
    assert!(progress.all_produced);
    assert!(progress.all_consumed);

    let report = handle.wait().unwrap();
    assert_eq!(report.consumed, 20);
}
