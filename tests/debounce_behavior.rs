//! End-to-end debounce timing driven by the manual clock and timer.

use debounce::infrastructure::mocks::{ManualTimer, MockClock};
use debounce::{DebounceError, DebounceOptions, Debouncer, Edge, OptionsError};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Manual time plus a log of `(args, offset)` for every invocation.
struct Harness {
    clock: MockClock,
    timer: ManualTimer,
    log: Arc<Mutex<Vec<(&'static str, Duration)>>>,
}

impl Harness {
    fn new() -> Self {
        let clock = MockClock::new(Instant::now());
        Self {
            timer: ManualTimer::new(clock.clone()),
            clock,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn debouncer(&self, options: DebounceOptions) -> Debouncer<&'static str> {
        let log = Arc::clone(&self.log);
        let clock = self.clock.clone();
        Debouncer::builder(move |args: &'static str| {
            log.lock().unwrap().push((args, clock.elapsed()));
        })
        .with_options(options)
        .with_clock(Arc::new(self.clock.clone()))
        .with_timer(Arc::new(self.timer.clone()))
        .build()
        .unwrap()
    }

    fn at(&self, offset: u64) {
        self.timer.run_until(self.clock.start() + ms(offset));
    }

    fn log(&self) -> Vec<(&'static str, Duration)> {
        self.log.lock().unwrap().clone()
    }
}

#[test]
fn test_three_quick_calls_invoke_once_at_160ms() {
    let h = Harness::new();
    let debounced = h.debouncer(DebounceOptions::new(ms(100)));

    debounced.call("a").unwrap();
    h.at(30);
    debounced.call("b").unwrap();
    h.at(60);
    debounced.call("c").unwrap();
    h.at(1_000);

    assert_eq!(h.log(), vec![("c", ms(160))]);
}

#[test]
fn test_separate_bursts_invoke_separately() {
    let h = Harness::new();
    let debounced = h.debouncer(DebounceOptions::new(ms(100)));

    debounced.call("first").unwrap();
    h.at(500);
    debounced.call("second").unwrap();
    h.at(1_000);

    assert_eq!(h.log(), vec![("first", ms(100)), ("second", ms(600))]);
}

#[test]
fn test_leading_and_trailing_single_call_invokes_once() {
    let h = Harness::new();
    let debounced = h.debouncer(DebounceOptions::new(ms(100)).with_leading(true));

    debounced.call("only").unwrap();
    h.at(1_000);

    assert_eq!(h.log(), vec![("only", ms(0))]);
}

#[test]
fn test_leading_and_trailing_burst_invokes_both_edges() {
    let h = Harness::new();
    let debounced = h.debouncer(DebounceOptions::new(ms(100)).with_leading(true));

    debounced.call("a").unwrap();
    h.at(50);
    debounced.call("b").unwrap();
    h.at(1_000);

    assert_eq!(h.log(), vec![("a", ms(0)), ("b", ms(150))]);
    let snapshot = debounced.metrics().snapshot();
    assert_eq!(snapshot.leading, 1);
    assert_eq!(snapshot.trailing, 1);
}

#[test]
fn test_leading_only_ignores_rest_of_burst() {
    let h = Harness::new();
    let debounced = h.debouncer(
        DebounceOptions::new(ms(100))
            .with_leading(true)
            .with_trailing(false),
    );

    debounced.call("a").unwrap();
    h.at(40);
    debounced.call("b").unwrap();
    h.at(80);
    debounced.call("c").unwrap();
    h.at(1_000);

    assert_eq!(h.log(), vec![("a", ms(0))]);
}

#[test]
fn test_no_edges_never_invokes() {
    let h = Harness::new();
    let debounced = h.debouncer(
        DebounceOptions::new(ms(100))
            .with_leading(false)
            .with_trailing(false),
    );

    debounced.call("a").unwrap();
    debounced.call("b").unwrap();
    h.at(1_000);

    assert!(h.log().is_empty());
    assert!(!debounced.pending());
}

#[test]
fn test_max_wait_bounds_deferral() {
    let h = Harness::new();
    let debounced = h.debouncer(DebounceOptions::new(ms(100)).with_max_wait(ms(250)));

    let args = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"];
    for (i, arg) in args.into_iter().enumerate() {
        h.at(i as u64 * 40);
        debounced.call(arg).unwrap();
    }
    h.at(2_000);

    // The burst never goes quiet for 100ms, yet the target runs every 250ms.
    assert_eq!(h.log(), vec![("6", ms(250)), ("12", ms(500))]);
    assert_eq!(debounced.metrics().invocations(Edge::MaxWait), 2);
}

#[test]
fn test_cancel_discards_burst() {
    let h = Harness::new();
    let debounced = h.debouncer(DebounceOptions::new(ms(100)));

    debounced.call("a").unwrap();
    h.at(50);
    debounced.cancel();
    h.at(1_000);
    assert!(h.log().is_empty());

    // A fresh burst after cancel behaves normally.
    debounced.call("b").unwrap();
    h.at(2_000);
    assert_eq!(h.log(), vec![("b", ms(1_100))]);
}

#[test]
fn test_flush_runs_pending_call_once() {
    let h = Harness::new();
    let debounced = h.debouncer(DebounceOptions::new(ms(100)));

    debounced.call("a").unwrap();
    h.at(20);
    debounced.call("b").unwrap();
    debounced.flush().unwrap();
    assert_eq!(h.log(), vec![("b", ms(20))]);

    h.at(1_000);
    assert_eq!(h.log().len(), 1);
    assert_eq!(h.timer.pending_timers(), 0);
}

#[test]
fn test_flush_without_trailing_drops_pending_args() {
    let h = Harness::new();
    let debounced = h.debouncer(
        DebounceOptions::new(ms(100))
            .with_leading(true)
            .with_trailing(false),
    );

    debounced.call("a").unwrap();
    debounced.call("b").unwrap();
    debounced.flush().unwrap();
    h.at(1_000);

    assert_eq!(h.log(), vec![("a", ms(0))]);
}

#[test]
fn test_zero_wait_defers_to_timer() {
    let h = Harness::new();
    let debounced = h.debouncer(DebounceOptions::new(Duration::ZERO));

    debounced.call("a").unwrap();
    debounced.call("b").unwrap();
    assert!(h.log().is_empty());

    h.at(0);
    assert_eq!(h.log(), vec![("b", ms(0))]);
}

#[test]
fn test_dropping_debouncer_cancels_timer() {
    let h = Harness::new();
    let debounced = h.debouncer(DebounceOptions::new(ms(100)));
    let handle = debounced.handle();

    debounced.call("a").unwrap();
    drop(debounced);
    h.at(1_000);

    assert!(h.log().is_empty());
    assert_eq!(handle.call("b"), Err(DebounceError::InvalidState));
}

#[test]
fn test_negative_wait_is_invalid_argument() {
    let result = Debouncer::builder(|_: ()| {}).with_wait_millis(-100).build();
    assert_eq!(
        result.unwrap_err(),
        DebounceError::InvalidArgument(OptionsError::NegativeWait(-100))
    );
}
