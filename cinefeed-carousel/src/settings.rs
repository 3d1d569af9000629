//! User-adjustable carousel settings
//!
//! Every field is optional and falls back to the compiled constants, so an
//! empty settings file is valid. Settings are layered over a preset
//! `CarouselConfig` with [`CarouselSettings::apply`].
//!
//! ```toml
//! auto_advance_ms = 6000
//! reveal_page_size = 24
//!
//! [[breakpoints]]
//! min_width = 0
//! visible_count = 2
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::breakpoints::{Breakpoint, BreakpointTable};
use crate::constants;
use crate::error::SettingsError;
use crate::types::{CarouselConfig, PresentationMode};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselSettings {
    /// Interval between automatic steps (ms)
    pub auto_advance_ms: Option<u64>,
    /// Turn auto-advance off everywhere
    pub disable_auto_advance: Option<bool>,
    /// Items revealed per "Load More"
    pub reveal_page_size: Option<usize>,
    /// Simulated load delay for reveal grids (ms)
    pub reveal_delay_ms: Option<u64>,
    /// Gap between track items (px)
    pub item_spacing: Option<f32>,
    /// Replacement breakpoint table
    pub breakpoints: Option<Vec<Breakpoint>>,
}

impl CarouselSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let settings = Self::from_toml_str(&text)?;
        debug!("loaded carousel settings from {}", path.display());
        Ok(settings)
    }

    /// Load `path` if it exists, otherwise defaults. A file that exists but
    /// does not parse is still an error.
    pub fn load_or_default(
        path: impl AsRef<Path>,
    ) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(
                "no carousel settings at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.auto_advance_ms == Some(0) {
            return Err(SettingsError::Zero {
                field: "auto_advance_ms",
            });
        }
        if self.reveal_page_size == Some(0) {
            return Err(SettingsError::Zero {
                field: "reveal_page_size",
            });
        }
        if let Some(spacing) = self.item_spacing {
            if !spacing.is_finite() || spacing < 0.0 {
                warn!("ignoring item_spacing {spacing}");
            }
        }
        self.breakpoint_table()?;
        Ok(())
    }

    pub fn auto_advance(&self) -> Option<Duration> {
        if self.disable_auto_advance.unwrap_or(false) {
            return None;
        }
        Some(Duration::from_millis(
            self.auto_advance_ms
                .unwrap_or(constants::auto_advance::INTERVAL_MS),
        ))
    }

    pub fn reveal_page_size(&self) -> usize {
        self.reveal_page_size
            .unwrap_or(constants::reveal::PAGE_SIZE)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(
            self.reveal_delay_ms
                .unwrap_or(constants::reveal::LOAD_DELAY_MS),
        )
    }

    pub fn item_spacing(&self) -> f32 {
        self.item_spacing
            .filter(|spacing| spacing.is_finite() && *spacing >= 0.0)
            .unwrap_or(constants::layout::ITEM_SPACING)
    }

    pub fn breakpoint_table(&self) -> Result<BreakpointTable, SettingsError> {
        match &self.breakpoints {
            Some(rows) => BreakpointTable::new(rows.clone()),
            None => Ok(BreakpointTable::default()),
        }
    }

    /// Layer these settings over a preset. Only fields set here replace the
    /// preset's values. Presets without auto-advance stay without it; only
    /// the interval of an enabled timer is replaced.
    pub fn apply(
        &self,
        mut config: CarouselConfig,
    ) -> Result<CarouselConfig, SettingsError> {
        if let Some(rows) = &self.breakpoints {
            config.breakpoints = BreakpointTable::new(rows.clone())?;
        }
        if self.item_spacing.is_some() {
            config.item_spacing = self.item_spacing();
        }
        let disabled = self.disable_auto_advance.unwrap_or(false);
        config.mode = match config.mode {
            PresentationMode::SlidingWindow {
                auto_advance,
                wrap_mode,
            } => PresentationMode::SlidingWindow {
                auto_advance: auto_advance
                    .filter(|_| !disabled)
                    .map(|period| {
                        self.auto_advance_ms
                            .map_or(period, Duration::from_millis)
                    }),
                wrap_mode,
            },
            PresentationMode::GrowingReveal {
                page_size,
                load_delay,
            } => PresentationMode::GrowingReveal {
                page_size: self.reveal_page_size.unwrap_or(page_size),
                load_delay: self
                    .reveal_delay_ms
                    .map_or(load_delay, Duration::from_millis),
            },
        };
        Ok(config)
    }
}
