//! Basic example demonstrating trailing and leading edge debouncing.
//!
//! Without a tokio runtime the debouncer arms its timers on short-lived
//! threads, so this example runs on plain `std::thread::sleep`.

use debounce::Debouncer;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debounce=debug"))
        .init();

    println!("=== Basic Debounce Example ===\n");

    // Trailing edge (default): one call, 200ms after the last request
    let resize = Debouncer::builder(|(width, height): (u32, u32)| {
        println!("  -> relayout at {}x{}", width, height);
    })
    .with_wait(Duration::from_millis(200))
    .with_name("resize")
    .build()
    .unwrap();

    println!("Dragging the window edge (10 resize events, 20ms apart):");
    for step in 0..10 {
        resize.call((800 + step * 10, 600)).unwrap();
        thread::sleep(Duration::from_millis(20));
    }
    thread::sleep(Duration::from_millis(400));

    println!("\n");

    // Leading edge only: act on the first click, ignore the rest of the burst
    let submit = Debouncer::builder(|form: &'static str| {
        println!("  -> submitting {}", form);
    })
    .with_wait(Duration::from_millis(500))
    .with_leading(true)
    .with_trailing(false)
    .with_name("submit")
    .build()
    .unwrap();

    println!("Double-clicking submit (3 clicks, 50ms apart):");
    for _ in 0..3 {
        submit.call("signup form").unwrap();
        thread::sleep(Duration::from_millis(50));
    }
    thread::sleep(Duration::from_millis(600));

    println!("\n");

    // Flush: force the pending call out before shutting down
    let save = Debouncer::builder(|text: String| {
        println!("  -> saved {} bytes", text.len());
    })
    .with_wait(Duration::from_secs(10))
    .with_name("autosave")
    .build()
    .unwrap();

    println!("Editing, then quitting before the autosave fires:");
    save.call("hello".to_string()).unwrap();
    save.call("hello, world".to_string()).unwrap();
    save.flush().unwrap();

    let snapshot = resize.metrics().snapshot();
    println!("\n=== Example Complete ===");
    println!(
        "resize: {} calls, {} invocations ({:.0}% coalesced)",
        snapshot.calls,
        snapshot.invocations(),
        snapshot.coalesce_rate() * 100.0
    );
}
