//! "Load More" grids with the simulated load delay.

mod common;

use std::time::Duration;

use anyhow::Result;
use cinefeed_carousel::{
    CarouselConfig, CarouselKey, LoadMoreButton, RevealController,
};
use cinefeed_model::{ItemList, MovieCard};
use tokio::time::{Instant, sleep, timeout};

use common::fresh_list;

#[tokio::test(start_paused = true)]
async fn load_more_grows_by_page_until_exhausted() -> Result<()> {
    let handle = RevealController::mount(
        CarouselKey::SearchResults,
        CarouselConfig::grid_defaults().mode,
    );
    handle.set_items(fresh_list(30)).await?;

    let first = handle.snapshot().await?;
    assert_eq!(first.items_to_show, 12);
    assert_eq!(first.view.range, 0..12);
    assert!(first.can_load_more());

    let mut rx = handle.subscribe();
    let started = Instant::now();
    handle.load_more().await?;
    // Clicks while loading are dropped.
    handle.load_more().await?;
    let loading = handle.snapshot().await?;
    assert!(loading.loading);
    assert_eq!(loading.view.button, LoadMoreButton::Loading);
    assert_eq!(loading.items_to_show, 12);

    let loaded = timeout(
        Duration::from_secs(5),
        rx.wait_for(|s| !s.loading && s.items_to_show == 24),
    )
    .await??
    .clone();
    assert_eq!(started.elapsed(), Duration::from_millis(600));
    assert_eq!(loaded.view.button, LoadMoreButton::Enabled);

    handle.load_more().await?;
    sleep(Duration::from_secs(1)).await;
    let done = handle.snapshot().await?;
    assert_eq!(done.items_to_show, 30);
    assert_eq!(done.view.range, 0..30);
    assert_eq!(done.view.button, LoadMoreButton::Exhausted);
    assert!(!done.can_load_more());

    handle.load_more().await?;
    sleep(Duration::from_secs(1)).await;
    assert_eq!(handle.snapshot().await?, done);

    handle.unmount().await;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn new_data_set_cancels_pending_load() -> Result<()> {
    let handle = RevealController::mount(
        CarouselKey::Custom("watchlist-grid"),
        CarouselConfig::grid_defaults().mode,
    );
    handle.set_items(fresh_list(30)).await?;
    handle.load_more().await?;
    assert!(handle.snapshot().await?.loading);

    handle.set_items(fresh_list(50)).await?;
    let reset = handle.snapshot().await?;
    assert!(!reset.loading);
    assert_eq!(reset.items_to_show, 12);
    assert_eq!(reset.item_count, 50);

    sleep(Duration::from_secs(2)).await;
    assert_eq!(handle.snapshot().await?.items_to_show, 12);

    handle.unmount().await;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn view_slices_the_list() -> Result<()> {
    let movies: Vec<MovieCard> = (0..20u64)
        .map(|i| MovieCard::new(i, format!("Movie {i}")))
        .collect();
    let list = ItemList::new(movies);

    let handle = RevealController::mount(
        CarouselKey::Popular,
        CarouselConfig::grid_defaults().mode,
    );
    handle.set_items(list.shape()).await?;

    let snapshot = handle.snapshot().await?;
    let visible = snapshot.view.slice(&list);
    assert_eq!(visible.len(), 12);
    assert_eq!(visible[11].title, "Movie 11");

    handle.unmount().await;
    Ok(())
}
