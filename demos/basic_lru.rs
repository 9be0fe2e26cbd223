//! Basic LRU walkthrough
//!
//! Run with: `RUST_LOG=lithium=trace cargo run --example basic_lru`

use std::sync::Arc;
use std::thread;

use anyhow::Context;
use lithium::{Cache, CacheConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Defaults to "debug" for the cache, can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lithium=debug,basic_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::new("LRU", 3);
    let cache: Arc<dyn Cache<String>> = Arc::from(
        config
            .build::<String>()
            .context("building cache from config")?,
    );

    cache.set("user:1", "alice".to_string());
    cache.set("user:2", "bob".to_string());
    cache.set("order:1", "book".to_string());

    // Reading user:1 makes user:2 the eviction candidate
    if let Some(name) = cache.get("user:1") {
        info!(%name, "Read user:1");
    }
    cache.set("order:2", "pen".to_string());
    info!(present = cache.contains("user:2"), "user:2 after insert");

    let workers: Vec<_> = (0..2)
        .map(|n| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.set(&format!("order:{}", 10 + n), format!("item {n}")))
        })
        .collect();
    for worker in workers {
        worker
            .join()
            .map_err(|_| anyhow::anyhow!("worker thread panicked"))?;
    }

    let removed = cache.invalidate_containing("order");
    info!(removed, "Dropped all orders");

    let stats = cache.stats();
    info!(
        size = stats.size,
        capacity = stats.capacity,
        hit_rate = stats.hit_rate(),
        evictions = stats.evictions,
        "Final stats"
    );

    let unknown = lithium::try_new::<String>("ARC", 3);
    if let Err(err) = unknown {
        info!(%err, "Fallback path");
    }

    Ok(())
}
