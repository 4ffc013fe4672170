//! Search-as-you-type on a tokio runtime.
//!
//! Keystrokes arrive on one task; queries are sent at most once per quiet
//! period, and at least once a second while the user keeps typing.

use debounce::Debouncer;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("search_box=info,debounce=debug"))
        .init();

    let (queries, mut received) = mpsc::unbounded_channel::<String>();

    // Built inside the runtime, so timers are tokio tasks
    let search = Debouncer::builder(move |query: String| {
        // The receiver lives until main returns
        let _ = queries.send(query);
    })
    .with_wait(Duration::from_millis(250))
    .with_max_wait(Duration::from_secs(1))
    .with_name("search")
    .build()
    .unwrap();

    let typist = {
        let search = search.handle();
        tokio::spawn(async move {
            let mut text = String::new();
            for word in ["debounce ", "leading ", "trailing ", "max ", "wait"] {
                for ch in word.chars() {
                    text.push(ch);
                    if search.call(text.clone()).is_err() {
                        return;
                    }
                    sleep(Duration::from_millis(60)).await;
                }
                // Pause between words
                sleep(Duration::from_millis(400)).await;
            }
        })
    };

    typist.await.unwrap();
    sleep(Duration::from_millis(500)).await;
    drop(search);

    while let Some(query) = received.recv().await {
        info!(%query, "sent search request");
    }
}
