//! Window-level input fan-out.
//!
//! Keyboard and resize events are global: every mounted carousel hears every
//! arrow key and every resize. `InputBus` is the one place those events enter;
//! each mounted carousel holds exactly one subscription for as long as it is
//! mounted, so `listener_count` doubles as a leak check.

use tokio::sync::broadcast;

use crate::constants;
use crate::types::CarouselKey;

/// Keys the carousels care about. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Other,
}

impl NavKey {
    /// Map a DOM-style key name (`"ArrowLeft"`, `"ArrowRight"`).
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => NavKey::ArrowLeft,
            "ArrowRight" | "Right" => NavKey::ArrowRight,
            _ => NavKey::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyPressed(NavKey),
    /// Viewport width in logical pixels.
    Resized { width: f32 },
    PointerEntered(CarouselKey),
    PointerLeft(CarouselKey),
}

#[derive(Debug, Clone)]
pub struct InputBus {
    tx: broadcast::Sender<InputEvent>,
}

impl Default for InputBus {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBus {
    pub fn new() -> Self {
        Self::with_capacity(constants::channels::INPUT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Deliver an event to every mounted carousel. Returns how many
    /// listeners received it; zero listeners is not an error.
    pub fn publish(&self, event: InputEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    pub fn key_pressed(&self, key: NavKey) -> usize {
        self.publish(InputEvent::KeyPressed(key))
    }

    pub fn resized(&self, width: f32) -> usize {
        self.publish(InputEvent::Resized { width })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InputEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscriptions (one per mounted carousel).
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_map_to_nav_keys() {
        assert_eq!(NavKey::from_key_name("ArrowLeft"), NavKey::ArrowLeft);
        assert_eq!(NavKey::from_key_name("ArrowRight"), NavKey::ArrowRight);
        assert_eq!(NavKey::from_key_name("Enter"), NavKey::Other);
    }

    #[test]
    fn publish_without_listeners_is_silent() {
        let bus = InputBus::new();
        assert_eq!(bus.key_pressed(NavKey::ArrowRight), 0);
    }

    #[tokio::test]
    async fn subscribers_are_counted_and_released() {
        let bus = InputBus::new();
        let mut rx = bus.subscribe();
        assert_eq!(bus.listener_count(), 1);

        assert_eq!(bus.resized(800.0), 1);
        assert_eq!(
            rx.recv().await.expect("event"),
            InputEvent::Resized { width: 800.0 }
        );

        drop(rx);
        assert_eq!(bus.listener_count(), 0);
    }
}
