//! Growing-reveal grids ("Load More").
//!
//! `RevealState` is the pure prefix counter. `RevealController` wraps it in a
//! task that applies the simulated load delay: while a load is in flight the
//! button is disabled and further clicks are dropped, and handing over a new
//! data set cancels the pending load.

use std::ops::Range;
use std::pin::Pin;
use std::time::Duration;

use cinefeed_model::{ListRevision, ListShape};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Sleep, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, debug_span, warn};
use uuid::Uuid;

use crate::constants;
use crate::error::{CarouselError, Result};
use crate::render::{LoadMoreButton, RevealView};
use crate::types::{CarouselKey, PresentationMode};

/// Visible prefix `[0, items_to_show)` of a list that only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    page_size: usize,
    items_to_show: usize,
    item_count: usize,
    loading: bool,
    revision: ListRevision,
}

impl Default for RevealState {
    fn default() -> Self {
        Self::new(constants::reveal::PAGE_SIZE)
    }
}

impl RevealState {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            items_to_show: page_size,
            item_count: 0,
            loading: false,
            revision: ListRevision::empty(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Requested prefix length. May exceed `item_count` for short lists.
    pub fn items_to_show(&self) -> usize {
        self.items_to_show
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn revision(&self) -> ListRevision {
        self.revision
    }

    pub fn visible_range(&self) -> Range<usize> {
        0..self.items_to_show.min(self.item_count)
    }

    pub fn can_load_more(&self) -> bool {
        !self.loading && self.items_to_show < self.item_count
    }

    pub fn button(&self) -> LoadMoreButton {
        if self.loading {
            LoadMoreButton::Loading
        } else if self.items_to_show < self.item_count {
            LoadMoreButton::Enabled
        } else {
            LoadMoreButton::Exhausted
        }
    }

    pub fn view(&self) -> RevealView {
        RevealView {
            range: self.visible_range(),
            button: self.button(),
        }
    }

    /// Mark a load as started. Refused while loading or when nothing is
    /// left to reveal.
    pub fn begin_load(&mut self) -> bool {
        if !self.can_load_more() {
            return false;
        }
        self.loading = true;
        true
    }

    /// Finish an in-flight load, revealing one more page (never past the
    /// end of the list).
    pub fn complete_load(&mut self) -> bool {
        if !self.loading {
            return false;
        }
        self.loading = false;
        let next = (self.items_to_show + self.page_size).min(self.item_count);
        if next > self.items_to_show {
            self.items_to_show = next;
        }
        true
    }

    /// Begin and complete a load in one step, for callers without a delay.
    pub fn load_more(&mut self) -> bool {
        self.begin_load() && self.complete_load()
    }

    /// Take a new list shape. A new revision starts over at one page and
    /// abandons any in-flight load; the same revision only updates the count.
    pub fn replace_list(&mut self, shape: ListShape) -> bool {
        if shape.revision != self.revision {
            let restarted = self.loading;
            self.revision = shape.revision;
            self.item_count = shape.len;
            self.items_to_show = self.page_size;
            self.loading = false;
            return restarted;
        }
        self.item_count = shape.len;
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealSnapshot {
    pub key: CarouselKey,
    pub items_to_show: usize,
    pub item_count: usize,
    pub loading: bool,
    pub revision: ListRevision,
    pub view: RevealView,
}

impl RevealSnapshot {
    pub fn can_load_more(&self) -> bool {
        self.view.button.is_enabled()
    }
}

#[derive(Debug)]
pub enum RevealCommand {
    LoadMore,
    SetItems(ListShape),
    Snapshot(oneshot::Sender<RevealSnapshot>),
}

/// Task-side state of one mounted reveal grid.
#[derive(Debug)]
pub struct RevealController {
    key: CarouselKey,
    state: RevealState,
    load_delay: Duration,
    pending: Option<Pin<Box<Sleep>>>,
}

impl RevealController {
    /// Mount a reveal grid. `mode` supplies the page size and load delay;
    /// a sliding mode falls back to the reveal defaults.
    pub fn mount(key: CarouselKey, mode: PresentationMode) -> RevealHandle {
        let (page_size, load_delay) = match mode {
            PresentationMode::GrowingReveal {
                page_size,
                load_delay,
            } => (page_size, load_delay),
            PresentationMode::SlidingWindow { .. } => (
                constants::reveal::PAGE_SIZE,
                Duration::from_millis(constants::reveal::LOAD_DELAY_MS),
            ),
        };
        let controller = Self {
            key: key.clone(),
            state: RevealState::new(page_size),
            load_delay,
            pending: None,
        };
        let (command_tx, command_rx) =
            mpsc::channel(constants::channels::COMMAND_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());
        let cancel = CancellationToken::new();

        let span = debug_span!("reveal", key = ?key, mount = %Uuid::new_v4());
        let task = tokio::spawn(
            controller
                .run(command_rx, snapshot_tx, cancel.clone())
                .instrument(span),
        );

        RevealHandle {
            key,
            commands: command_tx,
            snapshots: snapshot_rx,
            cancel,
            task: Some(task),
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<RevealCommand>,
        snapshots: watch::Sender<RevealSnapshot>,
        cancel: CancellationToken,
    ) {
        debug!("reveal grid mounted");
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                command = commands.recv() => match command {
                    Some(command) => self.apply(command),
                    None => break,
                },
                _ = wait_pending(&mut self.pending) => {
                    self.pending = None;
                    self.state.complete_load();
                    debug!("revealed {} items", self.state.visible_range().end);
                }
            }
            self.publish(&snapshots);
        }
        debug!("reveal grid unmounted");
    }

    fn apply(&mut self, command: RevealCommand) {
        match command {
            RevealCommand::LoadMore => {
                if self.state.begin_load() {
                    self.pending = Some(Box::pin(sleep(self.load_delay)));
                }
            }
            RevealCommand::SetItems(shape) => {
                if self.state.replace_list(shape) {
                    debug!("new data set, dropping in-flight load");
                }
                if !self.state.is_loading() {
                    self.pending = None;
                }
            }
            RevealCommand::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
        }
    }

    fn publish(&self, snapshots: &watch::Sender<RevealSnapshot>) {
        let next = self.snapshot();
        snapshots.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    fn snapshot(&self) -> RevealSnapshot {
        RevealSnapshot {
            key: self.key.clone(),
            items_to_show: self.state.items_to_show(),
            item_count: self.state.item_count(),
            loading: self.state.is_loading(),
            revision: self.state.revision(),
            view: self.state.view(),
        }
    }
}

async fn wait_pending(pending: &mut Option<Pin<Box<Sleep>>>) {
    match pending.as_mut() {
        Some(delay) => delay.as_mut().await,
        None => std::future::pending().await,
    }
}

/// Owner's side of a mounted reveal grid.
#[derive(Debug)]
pub struct RevealHandle {
    key: CarouselKey,
    commands: mpsc::Sender<RevealCommand>,
    snapshots: watch::Receiver<RevealSnapshot>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RevealHandle {
    pub fn key(&self) -> &CarouselKey {
        &self.key
    }

    async fn send(&self, command: RevealCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| CarouselError::Unmounted)
    }

    /// Click on "Load More". Ignored while a load is in flight or when the
    /// whole list is already shown.
    pub async fn load_more(&self) -> Result<()> {
        self.send(RevealCommand::LoadMore).await
    }

    pub async fn set_items(&self, shape: ListShape) -> Result<()> {
        self.send(RevealCommand::SetItems(shape)).await
    }

    pub async fn snapshot(&self) -> Result<RevealSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(RevealCommand::Snapshot(tx)).await?;
        rx.await.map_err(|_| CarouselError::Unmounted)
    }

    pub fn current(&self) -> RevealSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RevealSnapshot> {
        self.snapshots.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub async fn unmount(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                if !err.is_cancelled() {
                    warn!(
                        "reveal task for {:?} ended abnormally: {err}",
                        self.key
                    );
                }
            }
        }
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(len: usize) -> ListShape {
        ListShape::new(ListRevision::new(), len)
    }

    #[test]
    fn starts_at_one_page() {
        let state = RevealState::new(12);
        assert_eq!(state.items_to_show(), 12);
        assert_eq!(state.visible_range(), 0..0);
        assert_eq!(state.button(), LoadMoreButton::Exhausted);
    }

    #[test]
    fn grows_by_page_and_clamps_to_count() {
        let mut state = RevealState::new(12);
        state.replace_list(shape(30));
        assert_eq!(state.visible_range(), 0..12);

        assert!(state.load_more());
        assert_eq!(state.items_to_show(), 24);

        assert!(state.load_more());
        assert_eq!(state.items_to_show(), 30);
        assert!(!state.can_load_more());
        assert_eq!(state.button(), LoadMoreButton::Exhausted);
        assert!(!state.load_more());
    }

    #[test]
    fn begin_load_disables_button() {
        let mut state = RevealState::new(12);
        state.replace_list(shape(30));
        assert!(state.begin_load());
        assert_eq!(state.button(), LoadMoreButton::Loading);
        assert!(!state.begin_load());
        assert!(state.complete_load());
        assert!(!state.complete_load());
        assert_eq!(state.items_to_show(), 24);
    }

    #[test]
    fn short_lists_show_everything() {
        let mut state = RevealState::new(12);
        state.replace_list(shape(5));
        assert_eq!(state.visible_range(), 0..5);
        assert!(!state.can_load_more());
    }

    #[test]
    fn new_data_set_starts_over() {
        let mut state = RevealState::new(12);
        state.replace_list(shape(30));
        state.load_more();
        state.begin_load();

        assert!(state.replace_list(shape(40)));
        assert_eq!(state.items_to_show(), 12);
        assert!(!state.is_loading());
    }

    #[test]
    fn same_data_set_keeps_progress() {
        let mut state = RevealState::new(12);
        let first = shape(30);
        state.replace_list(first);
        state.load_more();

        assert!(!state.replace_list(ListShape::new(first.revision, 29)));
        assert_eq!(state.items_to_show(), 24);
        assert_eq!(state.item_count(), 29);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let state = RevealState::new(0);
        assert_eq!(state.page_size(), 1);
    }
}
