//! Mounted sliding carousels.
//!
//! Each mounted carousel is one task that owns its `SlidingWindow`, its
//! auto-advance timer and its input subscription. User commands, window input
//! and timer ticks all arrive through a single `select!`, so every mutation is
//! applied in order against the current state. Dropping or unmounting the
//! handle ends the task, which releases the timer and the subscription with it.

use cinefeed_model::{ListRevision, ListShape};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, debug_span, trace, warn};
use uuid::Uuid;

use crate::breakpoints::ResponsiveTracker;
use crate::constants;
use crate::error::{CarouselError, Result};
use crate::input::{InputBus, InputEvent, NavKey};
use crate::render::{PaginationDots, TrackLayout};
use crate::timer::{AdvanceDeps, AdvanceGate, AdvanceTimer};
use crate::types::{CarouselConfig, CarouselKey};
use crate::window::SlidingWindow;

/// What a view needs to draw a sliding carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSnapshot {
    pub key: CarouselKey,
    pub current_index: usize,
    pub visible_count: usize,
    pub item_count: usize,
    pub max_index: usize,
    pub revision: ListRevision,
    pub item_width: f32,
    pub item_spacing: f32,
    pub hovering: bool,
    /// True while the auto-advance timer is scheduled.
    pub auto_advancing: bool,
}

impl CarouselSnapshot {
    pub fn layout(&self) -> TrackLayout {
        TrackLayout {
            item_width: self.item_width,
            item_spacing: self.item_spacing,
            item_count: self.item_count,
            current_index: self.current_index,
        }
    }

    pub fn dots(&self) -> Option<PaginationDots> {
        PaginationDots::for_window(
            self.current_index,
            self.visible_count,
            self.item_count,
        )
    }

    pub fn can_go_next(&self) -> bool {
        self.current_index < self.max_index
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }
}

#[derive(Debug)]
pub enum CarouselCommand {
    Next,
    Prev,
    GoTo(i64),
    SetVisibleCount(i64),
    SetHovering(bool),
    SetItems(ListShape),
    Resize { width: f32 },
    Snapshot(oneshot::Sender<CarouselSnapshot>),
}

/// Task-side state of one mounted carousel.
#[derive(Debug)]
pub struct CarouselController {
    key: CarouselKey,
    config: CarouselConfig,
    window: SlidingWindow,
    responsive: ResponsiveTracker,
    item_width: f32,
    hovering: bool,
    timer: AdvanceTimer,
    gate: AdvanceGate,
}

impl CarouselController {
    fn new(
        key: CarouselKey,
        config: CarouselConfig,
        viewport_width: f32,
    ) -> Self {
        let mut responsive = ResponsiveTracker::new(config.breakpoints.clone());
        let visible_count = responsive
            .observe(viewport_width)
            .map(|change| change.visible_count)
            .unwrap_or(1);
        let item_width = config.item_width_at(viewport_width);
        Self {
            key,
            config,
            window: SlidingWindow::new(0, visible_count),
            responsive,
            item_width,
            hovering: false,
            timer: AdvanceTimer::new(),
            gate: AdvanceGate::new(),
        }
    }

    /// Mount a sliding carousel: subscribes to `bus` and spawns the owner
    /// task on the current tokio runtime. The carousel starts empty; hand it
    /// a list with [`CarouselHandle::set_items`].
    pub fn mount(
        key: CarouselKey,
        config: CarouselConfig,
        bus: &InputBus,
        viewport_width: f32,
    ) -> CarouselHandle {
        let controller = Self::new(key.clone(), config, viewport_width);
        let (command_tx, command_rx) =
            mpsc::channel(constants::channels::COMMAND_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());
        let input = bus.subscribe();
        let cancel = CancellationToken::new();

        let span = debug_span!("carousel", key = ?key, mount = %Uuid::new_v4());
        let task = tokio::spawn(
            controller
                .run(command_rx, input, snapshot_tx, cancel.clone())
                .instrument(span),
        );

        CarouselHandle {
            key,
            commands: command_tx,
            snapshots: snapshot_rx,
            cancel,
            task: Some(task),
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<CarouselCommand>,
        input: broadcast::Receiver<InputEvent>,
        snapshots: watch::Sender<CarouselSnapshot>,
        cancel: CancellationToken,
    ) {
        debug!("carousel mounted");
        let mut input = Some(input);
        self.sync_timer();
        self.publish(&snapshots);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                command = commands.recv() => match command {
                    Some(command) => self.apply(command),
                    None => break,
                },
                event = next_input(&mut input) => match event {
                    Ok(event) => self.on_input(event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(
                            "carousel input lagged, skipped {skipped} events"
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("input bus closed");
                        input = None;
                    }
                },
                _ = self.timer.tick() => self.on_tick(),
            }
            self.sync_timer();
            self.publish(&snapshots);
        }

        self.timer.disarm();
        debug!("carousel unmounted");
    }

    fn apply(&mut self, command: CarouselCommand) {
        match command {
            CarouselCommand::Next => {
                self.window.next();
            }
            CarouselCommand::Prev => {
                self.window.prev();
            }
            CarouselCommand::GoTo(index) => {
                self.window.go_to(index);
            }
            CarouselCommand::SetVisibleCount(count) => {
                self.window.set_visible_count(count);
                self.responsive.reset();
            }
            CarouselCommand::SetHovering(hovering) => {
                self.hovering = hovering;
            }
            CarouselCommand::SetItems(shape) => {
                self.window.replace_list(shape);
            }
            CarouselCommand::Resize { width } => self.on_resize(width),
            CarouselCommand::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
        }
    }

    fn on_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyPressed(NavKey::ArrowLeft) => {
                self.window.prev();
            }
            InputEvent::KeyPressed(NavKey::ArrowRight) => {
                self.window.next();
            }
            InputEvent::KeyPressed(NavKey::Other) => {}
            InputEvent::Resized { width } => self.on_resize(width),
            InputEvent::PointerEntered(key) if key == self.key => {
                self.hovering = true;
            }
            InputEvent::PointerLeft(key) if key == self.key => {
                self.hovering = false;
            }
            InputEvent::PointerEntered(_) | InputEvent::PointerLeft(_) => {}
        }
    }

    fn on_resize(&mut self, width: f32) {
        if let Some(change) = self.responsive.observe(width) {
            self.window.set_visible_count(change.visible_count as i64);
            self.item_width = self.config.item_width_at(width);
        }
    }

    fn on_tick(&mut self) {
        if self.window.advance(self.config.mode.wrap_mode()) {
            trace!("auto-advanced to {}", self.window.current_index());
        }
    }

    fn sync_timer(&mut self) {
        let deps = AdvanceDeps {
            hovering: self.hovering,
            max_index: self.window.max_index(),
            item_count: self.window.item_count(),
        };
        self.gate
            .sync(deps, self.config.mode.auto_advance(), &mut self.timer);
    }

    fn publish(&self, snapshots: &watch::Sender<CarouselSnapshot>) {
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

    fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            key: self.key.clone(),
            current_index: self.window.current_index(),
            visible_count: self.window.visible_count(),
            item_count: self.window.item_count(),
            max_index: self.window.max_index(),
            revision: self.window.revision(),
            item_width: self.item_width,
            item_spacing: self.config.item_spacing,
            hovering: self.hovering,
            auto_advancing: self.timer.is_armed(),
        }
    }
}

async fn next_input(
    input: &mut Option<broadcast::Receiver<InputEvent>>,
) -> std::result::Result<InputEvent, broadcast::error::RecvError> {
    match input.as_mut() {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Owner's side of a mounted carousel. The carousel lives exactly as long as
/// its handle: dropping it tears the task down.
#[derive(Debug)]
pub struct CarouselHandle {
    key: CarouselKey,
    commands: mpsc::Sender<CarouselCommand>,
    snapshots: watch::Receiver<CarouselSnapshot>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl CarouselHandle {
    pub fn key(&self) -> &CarouselKey {
        &self.key
    }

    async fn send(&self, command: CarouselCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| CarouselError::Unmounted)
    }

    pub async fn next(&self) -> Result<()> {
        self.send(CarouselCommand::Next).await
    }

    pub async fn prev(&self) -> Result<()> {
        self.send(CarouselCommand::Prev).await
    }

    pub async fn go_to(&self, index: i64) -> Result<()> {
        self.send(CarouselCommand::GoTo(index)).await
    }

    pub async fn set_visible_count(&self, count: i64) -> Result<()> {
        self.send(CarouselCommand::SetVisibleCount(count)).await
    }

    pub async fn set_hovering(&self, hovering: bool) -> Result<()> {
        self.send(CarouselCommand::SetHovering(hovering)).await
    }

    pub async fn set_items(&self, shape: ListShape) -> Result<()> {
        self.send(CarouselCommand::SetItems(shape)).await
    }

    pub async fn resize(&self, width: f32) -> Result<()> {
        self.send(CarouselCommand::Resize { width }).await
    }

    /// Snapshot taken after every command sent before this call has been
    /// applied.
    pub async fn snapshot(&self) -> Result<CarouselSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(CarouselCommand::Snapshot(tx)).await?;
        rx.await.map_err(|_| CarouselError::Unmounted)
    }

    /// Latest published snapshot without a round trip.
    pub fn current(&self) -> CarouselSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that wakes whenever the published snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<CarouselSnapshot> {
        self.snapshots.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the carousel and wait for its task to finish, so the timer and
    /// input subscription are gone when this returns.
    pub async fn unmount(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                if !err.is_cancelled() {
                    warn!(
                        "carousel task for {:?} ended abnormally: {err}",
                        self.key
                    );
                }
            }
        }
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::{Instant, sleep};

    use super::*;

    fn hero(items: usize, revision: ListRevision) -> CarouselController {
        let mut controller = CarouselController::new(
            CarouselKey::Trending,
            CarouselConfig::hero_defaults(),
            1200.0,
        );
        controller.apply(CarouselCommand::SetItems(ListShape::new(
            revision, items,
        )));
        controller.sync_timer();
        controller
    }

    #[tokio::test(start_paused = true)]
    async fn item_count_change_restarts_timer_with_same_max_index() {
        let revision = ListRevision::new();
        let mut controller = hero(3, revision);
        assert_eq!(controller.window.max_index(), 0);
        assert!(controller.timer.is_armed());

        sleep(Duration::from_millis(3000)).await;
        controller
            .apply(CarouselCommand::SetItems(ListShape::new(revision, 2)));
        controller.sync_timer();
        assert_eq!(controller.window.max_index(), 0);
        let restarted = Instant::now();

        // The first schedule was due 1s from here.
        controller.timer.tick().await;
        assert_eq!(restarted.elapsed(), Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn unchanged_deps_keep_the_schedule() {
        let revision = ListRevision::new();
        let mut controller = hero(10, revision);
        let armed = Instant::now();

        sleep(Duration::from_millis(3000)).await;
        controller
            .apply(CarouselCommand::SetItems(ListShape::new(revision, 10)));
        controller.sync_timer();

        controller.timer.tick().await;
        assert_eq!(armed.elapsed(), Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn emptied_list_disarms_timer() {
        let revision = ListRevision::new();
        let mut controller = hero(10, revision);
        controller
            .apply(CarouselCommand::SetItems(ListShape::new(revision, 0)));
        controller.sync_timer();
        assert!(!controller.timer.is_armed());
        assert!(!controller.snapshot().auto_advancing);
    }
}
