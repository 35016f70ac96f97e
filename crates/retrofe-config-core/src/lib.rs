//! On-disk settings of a RetroFE frontend installation.
//!
//! [`Repository::load_all`] scans the settings tree into a [`Library`]
//! snapshot; each entity is written back with its own `save_*` call.

pub mod config;
pub mod error;
pub mod library;

pub use config::RetroFePaths;
pub use error::{ConfigError, RepositoryError};
pub use library::{
  Collection, ControllerAction, ControllerSettings, Launcher, Library, MainSettings, Repository,
};
