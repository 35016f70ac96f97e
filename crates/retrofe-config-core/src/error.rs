use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
  #[error("Config not found: {}", .0.display())]
  NotFound(PathBuf),
  #[error("Duplicate key '{key}' in {}", .path.display())]
  DuplicateKey { key: String, path: PathBuf },
  #[error("Invalid value for '{key}': '{value}' is not a number")]
  Format { key: String, value: String },
  #[error("XML error: {0}")]
  Xml(String),
}

#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Config(#[from] ConfigError),
  #[error("Required file missing: {}", .0.display())]
  MissingFile(PathBuf),
  #[error("Already exists: {}", .0.display())]
  AlreadyExists(PathBuf),
  #[error("Not found: {0}")]
  NotFound(String),
  #[error("Invalid name: '{0}'")]
  InvalidName(String),
}
