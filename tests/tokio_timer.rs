//! Debouncers on a tokio runtime with paused time.

#![cfg(feature = "async")]

use debounce::{DebounceError, Debouncer, TokioTimer};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, Instant};

type Log = Arc<Mutex<Vec<(u32, Duration)>>>;

fn recording(start: Instant) -> (Log, impl Fn(u32) + Send + 'static) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    (log, move |n: u32| {
        sink.lock().unwrap().push((n, start.elapsed()));
    })
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn test_three_quick_calls_invoke_once_at_160ms() {
    let start = Instant::now();
    let (log, target) = recording(start);
    let debounced = Debouncer::builder(target)
        .with_wait(ms(100))
        .build()
        .unwrap();

    debounced.call(1).unwrap();
    sleep(ms(30)).await;
    debounced.call(2).unwrap();
    sleep(ms(30)).await;
    debounced.call(3).unwrap();

    sleep(ms(99)).await;
    assert!(log.lock().unwrap().is_empty());
    assert!(debounced.pending());

    sleep(ms(500)).await;
    let log = log.lock().unwrap().clone();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].0, 3);
    assert!(log[0].1 >= ms(160) && log[0].1 < ms(170), "{:?}", log);
    assert!(!debounced.pending());
}

#[tokio::test(start_paused = true)]
async fn test_leading_only_once_per_burst() {
    let (log, target) = recording(Instant::now());
    let debounced = Debouncer::builder(target)
        .with_wait(ms(100))
        .with_leading(true)
        .with_trailing(false)
        .build()
        .unwrap();

    for n in 0..10 {
        debounced.call(n).unwrap();
        sleep(ms(20)).await;
    }
    sleep(ms(500)).await;

    let args: Vec<u32> = log.lock().unwrap().iter().map(|(n, _)| *n).collect();
    assert_eq!(args, vec![0]);
}

#[tokio::test(start_paused = true)]
async fn test_max_wait_invokes_during_long_burst() {
    let (log, target) = recording(Instant::now());
    let debounced = Debouncer::builder(target)
        .with_wait(ms(100))
        .with_max_wait(ms(300))
        .build()
        .unwrap();

    // 1.5s of calls, 50ms apart
    for n in 0..30 {
        debounced.call(n).unwrap();
        sleep(ms(50)).await;
    }

    let during_burst = log.lock().unwrap().len();
    assert!(during_burst >= 4, "only {} invocations", during_burst);
    assert!(log
        .lock()
        .unwrap()
        .windows(2)
        .all(|pair| pair[1].1 - pair[0].1 <= ms(310)));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_timer_fires() {
    let (log, target) = recording(Instant::now());
    let debounced = Debouncer::builder(target)
        .with_wait(ms(100))
        .build()
        .unwrap();

    debounced.call(1).unwrap();
    sleep(ms(50)).await;
    debounced.cancel();
    sleep(ms(500)).await;

    assert!(log.lock().unwrap().is_empty());
    assert_eq!(debounced.metrics().cancellations(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_flush_does_not_double_invoke() {
    let (log, target) = recording(Instant::now());
    let debounced = Debouncer::builder(target)
        .with_wait(ms(100))
        .build()
        .unwrap();

    debounced.call(7).unwrap();
    sleep(ms(10)).await;
    debounced.flush().unwrap();
    assert_eq!(log.lock().unwrap().len(), 1);

    sleep(ms(500)).await;
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_results_flow_back_to_callers() {
    let debounced = Debouncer::builder(|n: u32| n * 10)
        .with_wait(ms(100))
        .with_leading(true)
        .build()
        .unwrap();

    assert_eq!(debounced.call(1), Ok(Some(10)));
    assert_eq!(debounced.call(2), Ok(Some(10)));

    sleep(ms(200)).await;
    assert_eq!(debounced.last_result(), Some(20));
}

#[tokio::test(start_paused = true)]
async fn test_dispose_stops_timer() {
    let (log, target) = recording(Instant::now());
    let debounced = Debouncer::builder(target)
        .with_wait(ms(100))
        .with_timer(Arc::new(TokioTimer::try_current().unwrap()))
        .build()
        .unwrap();

    debounced.call(1).unwrap();
    debounced.dispose();
    sleep(ms(500)).await;

    assert!(log.lock().unwrap().is_empty());
    assert_eq!(debounced.call(2), Err(DebounceError::InvalidState));
}

#[tokio::test(start_paused = true)]
async fn test_handle_moves_into_spawned_task() {
    let (log, target) = recording(Instant::now());
    let debounced = Debouncer::builder(target)
        .with_wait(ms(100))
        .build()
        .unwrap();
    let handle = debounced.handle();

    let producer = tokio::spawn(async move {
        for n in 0..5 {
            handle.call(n).unwrap();
            sleep(ms(10)).await;
        }
    });
    producer.await.unwrap();
    sleep(ms(500)).await;

    let args: Vec<u32> = log.lock().unwrap().iter().map(|(n, _)| *n).collect();
    assert_eq!(args, vec![4]);
}
