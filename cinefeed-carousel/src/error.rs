use std::path::PathBuf;

use thiserror::Error;

use crate::types::CarouselKey;

/// Errors surfaced by controller handles. Navigation itself never fails; the
/// only way to get an error is to talk to a carousel that has been unmounted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("carousel has been unmounted")]
    Unmounted,

    #[error("no carousel mounted for {0:?}")]
    NotMounted(CarouselKey),
}

pub type Result<T> = std::result::Result<T, CarouselError>;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid breakpoint table: {0}")]
    Breakpoints(String),

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Failures from mounting or feeding a carousel through the registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Carousel(#[from] CarouselError),
}
