use autogate_core::config::ReplayConfig;
use autogate_core::errors::ReplayError;
use autogate_core::traits::ThresholdStrategy;
use autogate_replay::{ContinuousReevaluation, EventRecord, EventTable, Prequential};
use autogate_threshold::{AdaptiveThreshold, ControllerDefaults};

fn event(t: f64, prob: f64, label: f64) -> EventRecord {
    EventRecord::new()
        .with("timestamp", t)
        .with("prob_app", prob)
        .with("label_app", label)
}

fn controller() -> AdaptiveThreshold {
    AdaptiveThreshold::new(
        ControllerDefaults {
            window: 20,
            confidence: 0.985,
            deviation: 0.001,
        },
        0.99,
    )
    .unwrap()
}

fn stream() -> EventTable {
    // Shuffled; timestamps in milliseconds.
    vec![
        event(1001.0, 0.99, 1.0),
        event(0.0, 0.99, 1.0),
        event(500.0, 0.99, 0.0),
        event(1500.0, 0.99, 0.0),
        event(100.0, 0.99, 0.0),
    ]
    .into_iter()
    .collect()
}

#[test]
fn feedback_waits_for_the_delay_boundary() {
    let mut replay = ContinuousReevaluation::new(controller(), ["app"], 1);
    assert_eq!(replay.delay_ms(), 1000.0);
    let table = replay.evaluate(&stream()).unwrap();

    assert_eq!(
        table.column("timestamp").unwrap(),
        vec![0.0, 100.0, 500.0, 1001.0, 1500.0]
    );
    let rows = table.model_responses("app").unwrap();

    // The first event always flushes, so event 100 already sees its feedback.
    let mut after_first = controller();
    after_first.register("app");
    assert_eq!(rows[0].ths, after_first.threshold("app").unwrap());
    after_first.update("app", true, true).unwrap();

    // Nothing changes again until 1001 > 0 + 1000.
    for r in &rows[1..4] {
        assert_eq!(r.ths, after_first.threshold("app").unwrap());
        assert_eq!(r.err, after_first.get_performance("app").unwrap());
    }
    assert_ne!(rows[4].err, rows[3].err);
}

#[test]
fn flush_applies_the_queue_in_arrival_order() {
    let mut replay = ContinuousReevaluation::new(controller(), ["app"], 1);
    replay.evaluate(&stream()).unwrap();

    let batch = [(0.99, false), (0.99, false), (0.99, true)];
    let expected = |order: &[(f64, bool)]| {
        let mut c = controller();
        c.register("app");
        c.update("app", true, true).unwrap();
        let ths = c.threshold("app").unwrap();
        for &(prob, label) in order {
            c.update("app", prob > ths, label).unwrap();
        }
        c.state("app").unwrap().clone()
    };

    let in_order = expected(&batch);
    let mut reversed = batch;
    reversed.reverse();

    let actual = replay.strategy().state("app").unwrap();
    assert_eq!(actual, &in_order);
    assert_ne!(actual, &expected(&reversed));
}

#[test]
fn trailing_events_after_last_flush_are_never_applied() {
    let mut replay = ContinuousReevaluation::new(controller(), ["app"], 1);
    let table = replay.evaluate(&stream()).unwrap();
    assert_eq!(table.len(), 5);
    assert_eq!(replay.unapplied(), 1);

    // Evaluating more events later starts a fresh queue.
    let later: EventTable = vec![event(9000.0, 0.99, 1.0)].into_iter().collect();
    replay.evaluate(&later).unwrap();
    assert_eq!(replay.unapplied(), 0);
}

#[test]
fn zero_delay_flushes_on_every_increasing_timestamp() {
    let events: EventTable = (0..30)
        .map(|i| event(f64::from(i), 0.99, if i % 4 == 0 { 0.0 } else { 1.0 }))
        .collect();

    let mut batched = ContinuousReevaluation::new(controller(), ["app"], 0);
    let batched_rows = batched.evaluate(&events).unwrap();
    let mut immediate = Prequential::new(controller(), ["app"]);
    let immediate_rows = immediate.evaluate(&events).unwrap();

    assert_eq!(batched.unapplied(), 0);
    assert_eq!(
        batched_rows.model_responses("app"),
        immediate_rows.model_responses("app")
    );
    assert_eq!(
        batched.strategy().state("app").unwrap(),
        immediate.strategy().state("app").unwrap()
    );
}

#[test]
fn fit_applies_each_event_as_its_own_batch() {
    let events = stream();
    let mut batched = ContinuousReevaluation::new(controller(), ["app"], 3600);
    batched.fit(&events).unwrap();
    let mut immediate = Prequential::new(controller(), ["app"]);
    immediate.fit(&events).unwrap();

    assert_eq!(
        batched.strategy().state("app").unwrap(),
        immediate.strategy().state("app").unwrap()
    );
}

#[test]
fn missing_timestamp_is_fatal() {
    let mut events = stream();
    events.push(EventRecord::new().with("prob_app", 0.5).with("label_app", 1.0));

    let mut replay = ContinuousReevaluation::new(controller(), ["app"], 1);
    assert!(matches!(
        replay.evaluate(&events),
        Err(ReplayError::MissingTimestamp { .. })
    ));
    assert!(!replay.strategy().is_registered("app"));
}

#[test]
fn config_supplies_delay_and_columns() {
    let config = ReplayConfig {
        models: vec!["app".to_string()],
        timestamp_col: "ts".to_string(),
        delay_secs: 2,
    };
    let events: EventTable = vec![EventRecord::new()
        .with("ts", 10.0)
        .with("prob_app", 0.3)
        .with("label_app", 0.0)]
    .into_iter()
    .collect();

    let mut replay = ContinuousReevaluation::from_config(controller(), &config);
    assert_eq!(replay.delay_ms(), 2000.0);
    assert_eq!(replay.models().collect::<Vec<_>>(), vec!["app"]);

    let table = replay.evaluate(&events).unwrap();
    assert_eq!(table.rows()[0].timestamp, Some(10.0));
    let json: serde_json::Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();
    assert_eq!(json[0]["timestamp"], 10.0);
    assert_eq!(json[0]["auto_app"], 0);
}
