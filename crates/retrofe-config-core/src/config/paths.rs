use std::env;
use std::path::{Path, PathBuf};

pub const ROOT_ENV_VAR: &str = "RETROFE_PATH";

pub const MAIN_SETTINGS_FILE: &str = "Settings.conf";
pub const CONTROLS_FILE: &str = "Controls.conf";
pub const LAUNCHERS_DIR: &str = "Launchers";
pub const COLLECTIONS_DIR: &str = "Collections";
pub const LAYOUTS_DIR: &str = "Layouts";
pub const LAUNCHER_EXTENSION: &str = "conf";

pub const COLLECTION_SETTINGS_FILE: &str = "Settings.conf";
pub const COLLECTION_MENU_FILE: &str = "Menu.xml";
pub const COLLECTION_INCLUDE_FILE: &str = "Include.txt";
pub const COLLECTION_EXCLUDE_FILE: &str = "Exclude.txt";

fn app_root_dir() -> PathBuf {
  std::env::current_exe()
    .ok()
    .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
    .unwrap_or_else(|| Path::new(".").to_path_buf())
}

/// `RETROFE_PATH` when set, otherwise the directory of the running executable.
pub fn resolve_root() -> PathBuf {
  match env::var_os(ROOT_ENV_VAR) {
    Some(p) if !p.is_empty() => PathBuf::from(p),
    _ => app_root_dir(),
  }
}

/// Every location the repository reads or writes, relative to one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetroFePaths {
  root: PathBuf,
}

impl RetroFePaths {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn from_env() -> Self {
    Self::new(resolve_root())
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn main_settings(&self) -> PathBuf {
    self.root.join(MAIN_SETTINGS_FILE)
  }

  pub fn controls(&self) -> PathBuf {
    self.root.join(CONTROLS_FILE)
  }

  pub fn launchers_dir(&self) -> PathBuf {
    self.root.join(LAUNCHERS_DIR)
  }

  pub fn launcher_file(&self, name: &str) -> PathBuf {
    self
      .launchers_dir()
      .join(format!("{}.{}", name, LAUNCHER_EXTENSION))
  }

  pub fn collections_dir(&self) -> PathBuf {
    self.root.join(COLLECTIONS_DIR)
  }

  pub fn collection_dir(&self, name: &str) -> PathBuf {
    self.collections_dir().join(name)
  }

  pub fn collection_settings(&self, name: &str) -> PathBuf {
    self.collection_dir(name).join(COLLECTION_SETTINGS_FILE)
  }

  pub fn collection_menu(&self, name: &str) -> PathBuf {
    self.collection_dir(name).join(COLLECTION_MENU_FILE)
  }

  pub fn collection_include(&self, name: &str) -> PathBuf {
    self.collection_dir(name).join(COLLECTION_INCLUDE_FILE)
  }

  pub fn collection_exclude(&self, name: &str) -> PathBuf {
    self.collection_dir(name).join(COLLECTION_EXCLUDE_FILE)
  }

  pub fn layouts_dir(&self) -> PathBuf {
    self.root.join(LAYOUTS_DIR)
  }
}
