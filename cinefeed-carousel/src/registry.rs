//! Registry for mounted carousels keyed by CarouselKey
//!
//! Screens do not build carousels themselves; they ask the registry for the
//! carousel behind a key and hand it their list. A key is mounted at most once,
//! so navigating back to a screen with a live carousel reuses it.

use std::collections::HashMap;

use cinefeed_model::ListShape;
use tracing::{debug, warn};

use crate::controller::{CarouselController, CarouselHandle};
use crate::error::{CarouselError, RegistryError, Result};
use crate::input::InputBus;
use crate::reveal::{RevealController, RevealHandle};
use crate::settings::CarouselSettings;
use crate::types::{CarouselConfig, CarouselKey};

#[derive(Debug)]
pub enum MountedCarousel {
    Sliding(CarouselHandle),
    Reveal(RevealHandle),
}

impl MountedCarousel {
    pub async fn set_items(&self, shape: ListShape) -> Result<()> {
        match self {
            MountedCarousel::Sliding(handle) => handle.set_items(shape).await,
            MountedCarousel::Reveal(handle) => handle.set_items(shape).await,
        }
    }

    pub fn is_mounted(&self) -> bool {
        match self {
            MountedCarousel::Sliding(handle) => handle.is_mounted(),
            MountedCarousel::Reveal(handle) => handle.is_mounted(),
        }
    }

    pub fn as_sliding(&self) -> Option<&CarouselHandle> {
        match self {
            MountedCarousel::Sliding(handle) => Some(handle),
            MountedCarousel::Reveal(_) => None,
        }
    }

    pub fn as_reveal(&self) -> Option<&RevealHandle> {
        match self {
            MountedCarousel::Reveal(handle) => Some(handle),
            MountedCarousel::Sliding(_) => None,
        }
    }

    pub async fn unmount(self) {
        match self {
            MountedCarousel::Sliding(handle) => handle.unmount().await,
            MountedCarousel::Reveal(handle) => handle.unmount().await,
        }
    }
}

#[derive(Debug)]
pub struct CarouselRegistry {
    bus: InputBus,
    settings: CarouselSettings,
    viewport_width: f32,
    mounted: HashMap<CarouselKey, MountedCarousel>,
}

impl CarouselRegistry {
    pub fn new(bus: InputBus, viewport_width: f32) -> Self {
        Self::with_settings(bus, CarouselSettings::default(), viewport_width)
    }

    pub fn with_settings(
        bus: InputBus,
        settings: CarouselSettings,
        viewport_width: f32,
    ) -> Self {
        Self {
            bus,
            settings,
            viewport_width,
            mounted: HashMap::new(),
        }
    }

    pub fn bus(&self) -> &InputBus {
        &self.bus
    }

    /// Forward a window resize to every mounted carousel and remember the
    /// width for carousels mounted later.
    pub fn resized(&mut self, width: f32) {
        self.viewport_width = width;
        self.bus.resized(width);
    }

    /// Mount `key` with `config` (settings layered on top) if it is not
    /// mounted yet, then hand it `shape`. An already mounted carousel keeps
    /// its state; a shape with a new revision resets it to the start.
    ///
    /// A carousel that cannot take the list is dropped from the registry, so
    /// the next call mounts it afresh.
    pub async fn mount_or_update(
        &mut self,
        key: CarouselKey,
        config: CarouselConfig,
        shape: ListShape,
    ) -> std::result::Result<&MountedCarousel, RegistryError> {
        if self.mounted.get(&key).is_some_and(|m| !m.is_mounted()) {
            debug!("carousel {key:?} had stopped, remounting");
            self.mounted.remove(&key);
        }
        if !self.mounted.contains_key(&key) {
            let config = self.settings.apply(config)?;
            let mounted = if config.mode.is_sliding() {
                MountedCarousel::Sliding(CarouselController::mount(
                    key.clone(),
                    config,
                    &self.bus,
                    self.viewport_width,
                ))
            } else {
                MountedCarousel::Reveal(RevealController::mount(
                    key.clone(),
                    config.mode,
                ))
            };
            debug!("mounted carousel {key:?}");
            self.mounted.insert(key.clone(), mounted);
        }

        let updated = self.mounted[&key].set_items(shape).await;
        if let Err(err) = updated {
            warn!("failed to update carousel {key:?}: {err}");
            self.mounted.remove(&key);
            return Err(err.into());
        }
        Ok(&self.mounted[&key])
    }

    pub fn get(&self, key: &CarouselKey) -> Option<&MountedCarousel> {
        self.mounted.get(key)
    }

    pub fn sliding(&self, key: &CarouselKey) -> Result<&CarouselHandle> {
        self.get(key)
            .and_then(MountedCarousel::as_sliding)
            .ok_or_else(|| CarouselError::NotMounted(key.clone()))
    }

    pub fn reveal(&self, key: &CarouselKey) -> Result<&RevealHandle> {
        self.get(key)
            .and_then(MountedCarousel::as_reveal)
            .ok_or_else(|| CarouselError::NotMounted(key.clone()))
    }

    pub fn contains(&self, key: &CarouselKey) -> bool {
        self.mounted.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }

    /// Return a snapshot of all keys currently in the registry.
    pub fn keys(&self) -> Vec<CarouselKey> {
        self.mounted.keys().cloned().collect()
    }

    /// Unmount one carousel and wait for it to stop.
    pub async fn unmount(&mut self, key: &CarouselKey) -> bool {
        match self.mounted.remove(key) {
            Some(mounted) => {
                mounted.unmount().await;
                debug!("unmounted carousel {key:?}");
                true
            }
            None => false,
        }
    }

    pub async fn unmount_all(&mut self) {
        for (key, mounted) in self.mounted.drain() {
            mounted.unmount().await;
            debug!("unmounted carousel {key:?}");
        }
    }
}
