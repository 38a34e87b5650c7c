use storefront::observer::SimulationEvent;
use storefront::simulation::Simulation;
use storefront::test_utils::fixtures::{immediate_config, jittery_config};
use storefront::test_utils::observer::RecordingObserver;
use storefront::test_utils::wait::wait_with_timeout;
use telemetry::tracing::init_test_tracing;

#[test]
fn single_slot_single_consumer_buys_items_in_order() {
    init_test_tracing();

    let observer = RecordingObserver::new();
    let handle = Simulation::new(immediate_config(1, 1, 3), observer.clone())
        .unwrap()
        .start()
        .unwrap();

    let report = wait_with_timeout(handle).unwrap();

    assert_eq!(report.produced, 3);
    assert_eq!(report.consumed, 3);
    assert_eq!(report.per_consumer, vec![3]);
    assert_eq!(
        observer.consumed_by_consumer().get(&0),
        Some(&vec![1, 2, 3])
    );
    assert_eq!(observer.exited_consumers().get(&0), Some(&3));
}

#[test]
fn every_produced_item_is_consumed_exactly_once() {
    init_test_tracing();

    for (capacity, consumers, items) in [(1, 4, 50), (3, 2, 200), (8, 8, 500), (16, 1, 64)] {
        let observer = RecordingObserver::new();
        let config = immediate_config(capacity, consumers, items);
        let handle = Simulation::new(config, observer.clone())
            .unwrap()
            .start()
            .unwrap();

        let report = wait_with_timeout(handle).unwrap();

        assert_eq!(report.produced, items);
        assert_eq!(report.consumed, items);
        assert_eq!(report.per_consumer.len(), consumers);
        assert_eq!(report.per_consumer.iter().sum::<u64>(), items);
        assert!(observer.sequence_gaps_or_duplicates().is_empty());

        let mut consumed = observer.consumed_serials();
        consumed.sort_unstable();
        assert_eq!(consumed, (1..=items).collect::<Vec<_>>());
    }
}

#[test]
fn items_leave_the_shelf_in_production_order() {
    init_test_tracing();

    let observer = RecordingObserver::new();
    let handle = Simulation::new(jittery_config(4, 3, 60), observer.clone())
        .unwrap()
        .start()
        .unwrap();

    wait_with_timeout(handle).unwrap();

    let produced = observer.produced_serials();
    assert_eq!(produced, (1..=60).collect::<Vec<_>>());
    assert_eq!(observer.consumed_serials(), produced);

    // Each consumer sees an increasing subsequence of the production order.
    for serials in observer.consumed_by_consumer().values() {
        assert!(serials.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

#[test]
fn occupancy_never_exceeds_capacity() {
    init_test_tracing();

    let capacity = 3;
    let observer = RecordingObserver::new();
    let handle = Simulation::new(jittery_config(capacity, 2, 80), observer.clone())
        .unwrap()
        .start()
        .unwrap();

    wait_with_timeout(handle).unwrap();

    let occupancies = observer.occupancies();
    assert_eq!(occupancies.len(), 160);
    assert!(occupancies.iter().all(|occupied| *occupied <= capacity));
}

#[test]
fn all_threads_terminate_for_valid_inputs() {
    init_test_tracing();

    for (capacity, consumers, items) in [
        (1, 1, 0),
        (1, 1, 1),
        (2, 5, 1),
        (5, 1, 5),
        (1, 10, 30),
        (7, 3, 100),
    ] {
        let observer = RecordingObserver::new();
        let config = jittery_config(capacity, consumers, items);
        let handle = Simulation::new(config, observer.clone())
            .unwrap()
            .start()
            .unwrap();

        let report = wait_with_timeout(handle).unwrap();

        assert_eq!(report.consumed, items);
        assert_eq!(observer.exited_consumers().len(), consumers);
        let completed = observer.count_matching(|event| {
            matches!(event, SimulationEvent::SimulationCompleted { .. })
        });
        assert_eq!(completed, 1);
    }
}

#[test]
fn consumers_go_home_at_once_when_nothing_is_produced() {
    init_test_tracing();

    let observer = RecordingObserver::new();
    let handle = Simulation::new(immediate_config(2, 4, 0), observer.clone())
        .unwrap()
        .start()
        .unwrap();

    let report = wait_with_timeout(handle).unwrap();

    assert_eq!(report.consumed, 0);
    assert_eq!(report.per_consumer, vec![0, 0, 0, 0]);
    assert_eq!(observer.exited_consumers().len(), 4);
    assert!(observer.exited_consumers().values().all(|bought| *bought == 0));
    assert!(observer.consumed_serials().is_empty());
}

#[test]
fn events_follow_the_store_front_story() {
    init_test_tracing();

    let observer = RecordingObserver::new();
    let handle = Simulation::new(immediate_config(1, 1, 1), observer.clone())
        .unwrap()
        .start()
        .unwrap();

    wait_with_timeout(handle).unwrap();

    let events = observer.events();
    assert_eq!(
        events.first(),
        Some(&SimulationEvent::ProductionStarted { total: 1 })
    );
    assert_eq!(
        events.last(),
        Some(&SimulationEvent::SimulationCompleted { consumed: 1 })
    );

    let position = |target: &SimulationEvent| events.iter().position(|event| event == target);
    let produced = position(&SimulationEvent::Produced {
        serial: 1,
        occupied: 1,
    })
    .unwrap();
    let finished = position(&SimulationEvent::ProductionFinished).unwrap();
    let awaiting = position(&SimulationEvent::AwaitingConsumers).unwrap();
    assert!(produced < finished);
    assert!(finished < awaiting);
}
