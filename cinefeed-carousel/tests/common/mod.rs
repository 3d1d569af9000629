#![allow(dead_code)]

use std::time::Duration;

use cinefeed_carousel::{CarouselSnapshot, InputBus};
use cinefeed_model::{ListRevision, ListShape};
use tokio::sync::watch;

/// Install a test subscriber once; respects `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn fresh_list(len: usize) -> ListShape {
    ListShape::new(ListRevision::new(), len)
}

/// Wait until the published snapshot satisfies `pred`, failing after a
/// minute of (virtual) time.
pub async fn wait_for_snapshot<F>(
    rx: &mut watch::Receiver<CarouselSnapshot>,
    pred: F,
) -> anyhow::Result<CarouselSnapshot>
where
    F: FnMut(&CarouselSnapshot) -> bool,
{
    let snapshot =
        tokio::time::timeout(Duration::from_secs(60), rx.wait_for(pred))
            .await??;
    Ok(snapshot.clone())
}

/// Yield until `bus` has exactly `expected` listeners.
pub async fn settle_listeners(bus: &InputBus, expected: usize) -> usize {
    for _ in 0..32 {
        if bus.listener_count() == expected {
            break;
        }
        tokio::task::yield_now().await;
    }
    bus.listener_count()
}
