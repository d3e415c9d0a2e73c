//! BDD tests for the aggregation controller and refresh loop.
//!
//! These tests verify:
//! - Partial failure in the best-effort batch leaves only those slots stale
//! - Mandatory failure keeps the previous pulse and flags it
//! - The per-request timeout bounds a silent source
//! - The refresh loop cadence

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use radar_core::data::{decode, FetchError, SourceFetcher};
use radar_core::domain::{MacroSeries, MetricPoint, Payload, PayloadKind, PulseItem, SpreadPoint};
use radar_runner::config::slots;
use radar_runner::{spawn_refresh_loop, AggregationController, RadarConfig};

// ── Scripted source ──────────────────────────────────────────────────

#[derive(Clone)]
struct Step {
    delay: Duration,
    result: Result<Payload, FetchError>,
}

/// Replays one step per call; the last step repeats.
struct ScriptedSource {
    name: String,
    kind: PayloadKind,
    steps: Mutex<Vec<Step>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    fn new(name: &str, kind: PayloadKind, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            kind,
            steps: Mutex::new(steps),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn ok(name: &str, payload: Payload) -> Self {
        Self::new(name, payload.kind(), vec![ok(payload)])
    }

    fn failing(name: &str, kind: PayloadKind, error: FetchError) -> Self {
        Self::new(name, kind, vec![err(error)])
    }

    fn boxed(self) -> Box<dyn SourceFetcher> {
        Box::new(self)
    }
}

#[async_trait]
impl SourceFetcher for ScriptedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PayloadKind {
        self.kind
    }

    async fn fetch(&self) -> Result<Payload, FetchError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let step = {
            let steps = self.steps.lock().unwrap();
            steps[n.min(steps.len() - 1)].clone()
        };
        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }
        step.result
    }
}

/// Decodes one scripted body per call; the last body repeats.
struct BodySource {
    name: String,
    kind: PayloadKind,
    bodies: Vec<&'static str>,
    calls: AtomicUsize,
}

#[async_trait]
impl SourceFetcher for BodySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PayloadKind {
        self.kind
    }

    async fn fetch(&self) -> Result<Payload, FetchError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let body = self.bodies[n.min(self.bodies.len() - 1)];
        decode(self.kind, body.as_bytes()).map(|(payload, _)| payload)
    }
}

fn ok(payload: Payload) -> Step {
    Step {
        delay: Duration::ZERO,
        result: Ok(payload),
    }
}

fn err(error: FetchError) -> Step {
    Step {
        delay: Duration::ZERO,
        result: Err(error),
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn pulse(n: usize) -> Payload {
    let items = (0..n)
        .map(|i| {
            let history = vec![
                MetricPoint::new(day(3), 100.0 + i as f64),
                MetricPoint::new(day(4), 101.0 + i as f64),
            ];
            PulseItem::from_history(format!("T{i}"), format!("Ticker {i}"), history).unwrap()
        })
        .collect();
    Payload::Pulse(items)
}

fn macro_series(title: &str, value: f64) -> Payload {
    Payload::Macro(MacroSeries::new(title, vec![MetricPoint::new(day(1), value)]))
}

fn spreads(last: f64) -> Payload {
    Payload::Spread(vec![
        SpreadPoint::new(day(3), 4.0, 3.0),
        SpreadPoint::new(day(4), 3.0 + last, 3.0),
    ])
}

const TIMEOUT: Duration = Duration::from_secs(5);

// ── Scenarios ────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn bdd_scenario_two_of_five_best_effort_sources_fail() {
    // GIVEN a pulse feed with 8 instruments
    let mandatory = ScriptedSource::ok(slots::MARKET_PULSE, pulse(8)).boxed();

    // AND five best-effort sources, two of which fail
    let batch = vec![
        ScriptedSource::ok(slots::CPI, macro_series("CPI", 3.1)).boxed(),
        ScriptedSource::failing(slots::UNRATE, PayloadKind::Macro, FetchError::HttpStatus { status: 502 }).boxed(),
        ScriptedSource::ok(slots::CREDIT_SPREAD, spreads(1.35)).boxed(),
        ScriptedSource::failing(
            slots::RISK_RATIO,
            PayloadKind::Risk,
            FetchError::NetworkUnreachable("connection refused".into()),
        )
        .boxed(),
        ScriptedSource::ok(slots::RATE_SPREAD, spreads(0.07)).boxed(),
    ];
    let controller = AggregationController::new(mandatory, batch, TIMEOUT);

    // WHEN a refresh runs
    let snap = controller.refresh().await;

    // THEN the pulse is populated
    assert_eq!(snap.pulse().unwrap().len(), 8);
    assert!(snap.pulse_error.is_none());

    // AND the three successful slots are populated
    assert_eq!(snap.macro_series(slots::CPI).unwrap().title, "CPI");
    assert_eq!(snap.spreads(slots::CREDIT_SPREAD).unwrap().len(), 2);
    assert_eq!(snap.spreads(slots::RATE_SPREAD).unwrap().len(), 2);

    // AND the two failed slots stay absent with their errors recorded
    assert!(snap.slot(slots::UNRATE).is_none());
    assert!(snap.slot(slots::RISK_RATIO).is_none());
    assert_eq!(
        snap.slot_state(slots::UNRATE).unwrap().last_error.as_deref(),
        Some("HTTP 502")
    );

    // AND the cycle is complete
    assert!(!snap.loading);
    assert!(snap.last_updated.is_some());
    assert!(!controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn bdd_scenario_failed_slot_keeps_previous_payload() {
    // GIVEN a CPI source that succeeds once and then fails
    let cpi = ScriptedSource::new(
        slots::CPI,
        PayloadKind::Macro,
        vec![
            ok(macro_series("CPI", 3.1)),
            err(FetchError::Timeout { after_ms: 5000 }),
        ],
    );
    let unrate = ScriptedSource::new(
        slots::UNRATE,
        PayloadKind::Macro,
        vec![ok(macro_series("UNRATE", 4.0)), ok(macro_series("UNRATE", 4.1))],
    );
    let controller = AggregationController::new(
        ScriptedSource::ok(slots::MARKET_PULSE, pulse(3)).boxed(),
        vec![cpi.boxed(), unrate.boxed()],
        TIMEOUT,
    );

    // WHEN two refresh cycles run
    let first = controller.refresh().await;
    let second = controller.refresh().await;

    // THEN CPI still shows the first cycle's data
    let cpi_first = first.macro_series(slots::CPI).unwrap();
    assert_eq!(second.macro_series(slots::CPI).unwrap(), cpi_first);
    let state = second.slot_state(slots::CPI).unwrap();
    assert!(state.last_error.is_some());
    assert!(state.last_success.is_some());

    // AND the healthy source was replaced
    assert_eq!(second.macro_series(slots::UNRATE).unwrap().data[0].value, 4.1);

    // AND the first view is unchanged by the second cycle
    assert_eq!(first.macro_series(slots::UNRATE).unwrap().data[0].value, 4.0);
}

#[tokio::test(start_paused = true)]
async fn bdd_scenario_error_body_does_not_wipe_previous_series() {
    // GIVEN a CPI endpoint that answers once with data, then with an error body
    let cpi = BodySource {
        name: slots::CPI.into(),
        kind: PayloadKind::Macro,
        bodies: vec![
            r#"{"title":"US CPI","data":[{"date":"2024-01-01","value":3.1},{"date":"2024-02-01","value":3.2}]}"#,
            r#"{"detail":"upstream quota exceeded"}"#,
        ],
        calls: AtomicUsize::new(0),
    };
    let controller = AggregationController::new(
        ScriptedSource::ok(slots::MARKET_PULSE, pulse(2)).boxed(),
        vec![Box::new(cpi)],
        TIMEOUT,
    );
    controller.refresh().await;

    // WHEN the next refresh runs
    let snap = controller.refresh().await;

    // THEN the previous CPI series is still shown
    let series = snap.macro_series(slots::CPI).unwrap();
    assert_eq!(series.title, "US CPI");
    assert_eq!(series.data.len(), 2);

    // AND the slot records a format failure
    let error = snap.slot_state(slots::CPI).unwrap().last_error.clone().unwrap();
    assert!(error.starts_with("response format changed"), "got {error}");
}

#[tokio::test(start_paused = true)]
async fn bdd_scenario_pulse_failure_keeps_previous_pulse() {
    // GIVEN a pulse feed that succeeds once and then returns 503
    let mandatory = ScriptedSource::new(
        slots::MARKET_PULSE,
        PayloadKind::Pulse,
        vec![ok(pulse(8)), err(FetchError::HttpStatus { status: 503 })],
    );
    let cpi = ScriptedSource::new(
        slots::CPI,
        PayloadKind::Macro,
        vec![ok(macro_series("CPI", 3.1)), ok(macro_series("CPI", 3.3))],
    );
    let controller = AggregationController::new(mandatory.boxed(), vec![cpi.boxed()], TIMEOUT);
    controller.refresh().await;

    // WHEN the next refresh runs
    let snap = controller.refresh().await;

    // THEN the pulse error is flagged and the old pulse retained
    assert_eq!(snap.pulse_error.as_deref(), Some("HTTP 503"));
    assert_eq!(snap.pulse().unwrap().len(), 8);

    // AND the best-effort batch still proceeded
    assert_eq!(snap.macro_series(slots::CPI).unwrap().data[0].value, 3.3);
    assert!(!snap.loading);
}

#[tokio::test(start_paused = true)]
async fn bdd_scenario_silent_source_is_bounded_by_timeout() {
    // GIVEN a source that would answer only after a minute
    let slow = ScriptedSource::new(
        slots::YIELD_GAP,
        PayloadKind::YieldGap,
        vec![Step {
            delay: Duration::from_secs(60),
            result: Err(FetchError::Other("never seen".into())),
        }],
    );
    let controller = AggregationController::new(
        ScriptedSource::ok(slots::MARKET_PULSE, pulse(2)).boxed(),
        vec![slow.boxed(), ScriptedSource::ok(slots::CPI, macro_series("CPI", 3.1)).boxed()],
        TIMEOUT,
    );

    // WHEN a refresh runs
    let started = tokio::time::Instant::now();
    let snap = controller.refresh().await;

    // THEN it completes at the timeout, not after the slow source
    assert!(started.elapsed() < Duration::from_secs(6));
    assert_eq!(
        snap.slot_state(slots::YIELD_GAP).unwrap().last_error.as_deref(),
        Some("request timed out after 5000ms")
    );

    // AND the other sources were merged
    assert!(snap.macro_series(slots::CPI).is_some());
    assert!(snap.pulse().is_some());
}

#[tokio::test(start_paused = true)]
async fn bdd_scenario_loading_is_published_while_in_flight() {
    // GIVEN a source that takes two seconds
    let slow = ScriptedSource::new(
        slots::CPI,
        PayloadKind::Macro,
        vec![Step {
            delay: Duration::from_secs(2),
            result: Ok(macro_series("CPI", 3.1)),
        }],
    );
    let controller = Arc::new(AggregationController::new(
        ScriptedSource::ok(slots::MARKET_PULSE, pulse(2)).boxed(),
        vec![slow.boxed()],
        TIMEOUT,
    ));
    let mut rx = controller.subscribe();

    // WHEN a refresh starts in the background
    let task = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.refresh().await })
    };

    // THEN subscribers first see loading = true
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().loading);
    assert!(controller.is_loading());

    // AND then the finished snapshot
    let snap = task.await.unwrap();
    assert!(!snap.loading);
    rx.changed().await.unwrap();
    assert!(!rx.borrow().loading);
}

#[tokio::test(start_paused = true)]
async fn bdd_scenario_wrong_payload_shape_is_a_failure() {
    // GIVEN a source declared as spreads that returns a macro series
    let confused = ScriptedSource::new(
        slots::CREDIT_SPREAD,
        PayloadKind::Spread,
        vec![ok(macro_series("oops", 1.0))],
    );
    let controller = AggregationController::new(
        ScriptedSource::ok(slots::MARKET_PULSE, pulse(2)).boxed(),
        vec![confused.boxed()],
        TIMEOUT,
    );

    // WHEN a refresh runs
    let snap = controller.refresh().await;

    // THEN the slot is not populated with the wrong shape
    assert!(snap.slot(slots::CREDIT_SPREAD).is_none());
    assert!(snap
        .slot_state(slots::CREDIT_SPREAD)
        .unwrap()
        .last_error
        .as_deref()
        .unwrap()
        .contains("expected a Spread payload"));
}

#[tokio::test(start_paused = true)]
async fn bdd_scenario_refresh_loop_ticks_on_interval() {
    // GIVEN a controller and a 20 minute refresh loop
    let mandatory = ScriptedSource::ok(slots::MARKET_PULSE, pulse(2));
    let calls = Arc::clone(&mandatory.calls);
    let controller = Arc::new(AggregationController::new(mandatory.boxed(), Vec::new(), TIMEOUT));
    let handle = spawn_refresh_loop(Arc::clone(&controller), Duration::from_secs(20 * 60));

    // WHEN 45 minutes pass
    tokio::time::sleep(Duration::from_secs(45 * 60)).await;

    // THEN refreshes ran at 0, 20 and 40 minutes
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(controller.snapshot().pulse().is_some());
    handle.abort();
}

#[tokio::test]
async fn bdd_scenario_unreachable_backend_never_rejects() {
    // GIVEN the stock configuration pointed at a closed port
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let config = RadarConfig {
        base_url: format!("http://{addr}"),
        timeout_ms: 2_000,
        ..RadarConfig::default()
    };
    let controller = AggregationController::from_config(&config).unwrap();

    // WHEN a refresh runs
    let snap = controller.refresh().await;

    // THEN it resolves with every slot failed and nothing populated
    assert!(snap.pulse_error.is_some());
    assert!(snap.slots.is_empty());
    assert_eq!(snap.status.len(), config.sources.len());
    assert!(snap.status.values().all(|s| s.last_error.is_some()));
    assert!(!snap.loading);
}
