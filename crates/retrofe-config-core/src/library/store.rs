use super::model::{Collection, ControllerSettings, Launcher, MainSettings};
use crate::config::paths::LAUNCHER_EXTENSION;
use crate::config::{menu, ConfFile, OptionWriter, RetroFePaths};
use crate::error::RepositoryError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One consistent snapshot of everything under the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
  pub layouts: Vec<String>,
  pub launchers: Vec<Launcher>,
  pub collections: Vec<Collection>,
  pub main: MainSettings,
  pub controller: ControllerSettings,
}

impl Library {
  pub fn launcher(&self, name: &str) -> Option<&Launcher> {
    self.launchers.iter().find(|l| l.name == name)
  }

  pub fn launcher_mut(&mut self, name: &str) -> Option<&mut Launcher> {
    self.launchers.iter_mut().find(|l| l.name == name)
  }

  pub fn collection(&self, name: &str) -> Option<&Collection> {
    self.collections.iter().find(|c| c.name == name)
  }

  pub fn collection_mut(&mut self, name: &str) -> Option<&mut Collection> {
    self.collections.iter_mut().find(|c| c.name == name)
  }

  pub fn has_layout(&self, name: &str) -> bool {
    self.layouts.iter().any(|l| l == name)
  }

  pub fn sorted_layouts(&self) -> Vec<String> {
    let mut layouts = self.layouts.clone();
    layouts.sort();
    layouts
  }
}

/// Reads and writes the settings tree rooted at a [`RetroFePaths`].
#[derive(Debug, Clone)]
pub struct Repository {
  paths: RetroFePaths,
}

impl Repository {
  pub fn new(paths: RetroFePaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &RetroFePaths {
    &self.paths
  }

  /// Full rescan: layouts, launchers, collections, then the two global files.
  pub fn load_all(&self) -> Result<Library, RepositoryError> {
    let layouts = self.load_layouts()?;
    let launchers = self.load_launchers()?;
    let collections = self.load_collections(&launchers)?;
    let main = self.load_main_settings(&layouts, &collections)?;
    let controller = self.load_controller_settings()?;

    info!(
      root = %self.paths.root().display(),
      layouts = layouts.len(),
      launchers = launchers.len(),
      collections = collections.len(),
      "loaded settings"
    );

    Ok(Library {
      layouts,
      launchers,
      collections,
      main,
      controller,
    })
  }

  /// Names of the immediate subdirectories of `Layouts/`, in enumeration order.
  pub fn load_layouts(&self) -> Result<Vec<String>, RepositoryError> {
    Ok(
      list_entries(&self.paths.layouts_dir(), EntryKind::Dir)?
        .into_iter()
        .map(|(name, _)| name)
        .collect(),
    )
  }

  pub fn load_launchers(&self) -> Result<Vec<Launcher>, RepositoryError> {
    let mut launchers = Vec::new();
    for (name, path) in list_entries(&self.paths.launchers_dir(), EntryKind::File)? {
      if !has_launcher_extension(&path) {
        continue;
      }
      let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
        continue;
      };
      debug!(launcher = %stem, file = %name, "loading launcher");
      let conf = ConfFile::open(&path)?;
      launchers.push(Launcher::from_conf(&stem, &conf));
    }
    Ok(launchers)
  }

  pub fn load_collections(&self, launchers: &[Launcher]) -> Result<Vec<Collection>, RepositoryError> {
    let mut collections = Vec::new();
    for (name, _) in list_entries(&self.paths.collections_dir(), EntryKind::Dir)? {
      collections.push(self.load_collection(&name, launchers)?);
    }
    Ok(collections)
  }

  pub fn load_collection(&self, name: &str, launchers: &[Launcher]) -> Result<Collection, RepositoryError> {
    let settings = self.paths.collection_settings(name);
    if !settings.is_file() {
      return Err(RepositoryError::MissingFile(settings));
    }
    debug!(collection = name, "loading collection");
    let conf = ConfFile::open(&settings)?;
    let submenus = menu::read_menu(&self.paths.collection_menu(name))?;
    Ok(Collection::from_conf(name, &conf, launchers, submenus))
  }

  pub fn load_main_settings(&self, layouts: &[String], collections: &[Collection]) -> Result<MainSettings, RepositoryError> {
    let conf = ConfFile::open(&self.paths.main_settings())?;
    Ok(MainSettings::from_conf(&conf, layouts, collections)?)
  }

  pub fn load_controller_settings(&self) -> Result<ControllerSettings, RepositoryError> {
    let conf = ConfFile::open(&self.paths.controls())?;
    Ok(ControllerSettings::from_conf(&conf))
  }

  pub fn save_launcher(&self, launcher: &Launcher) -> Result<(), RepositoryError> {
    launcher.to_options().save(&self.paths.launcher_file(&launcher.name))?;
    Ok(())
  }

  pub fn save_collection(&self, collection: &Collection) -> Result<(), RepositoryError> {
    collection
      .to_options()
      .save(&self.paths.collection_settings(&collection.name))?;
    Ok(())
  }

  /// Writes the submenu list to `Menu.xml`. Not part of [`Self::save_collection`].
  pub fn save_submenus(&self, collection: &Collection) -> Result<(), RepositoryError> {
    menu::write_menu(&self.paths.collection_menu(&collection.name), &collection.submenus)?;
    Ok(())
  }

  pub fn save_main_settings(&self, main: &MainSettings) -> Result<(), RepositoryError> {
    main.to_options().save(&self.paths.main_settings())?;
    Ok(())
  }

  pub fn save_controller_settings(&self, controller: &ControllerSettings) -> Result<(), RepositoryError> {
    controller.to_options().save(&self.paths.controls())?;
    Ok(())
  }

  /// Creates `Launchers/<name>.conf` and registers an empty launcher.
  ///
  /// Fails with `AlreadyExists` if the file is already there; neither the
  /// file nor `library` is touched in that case.
  pub fn create_launcher<'a>(&self, library: &'a mut Library, name: &str) -> Result<&'a mut Launcher, RepositoryError> {
    check_name(name)?;
    let path = self.paths.launcher_file(name);
    if path.exists() {
      return Err(RepositoryError::AlreadyExists(path));
    }
    fs::create_dir_all(self.paths.launchers_dir())?;
    OptionWriter::new().save(&path)?;
    info!(launcher = name, "created launcher");

    library.launchers.retain(|l| l.name != name);
    library.launchers.push(Launcher::new(name));
    let idx = library.launchers.len() - 1;
    Ok(&mut library.launchers[idx])
  }

  /// Creates `Collections/<name>/` with empty settings, include and exclude files.
  pub fn create_collection<'a>(&self, library: &'a mut Library, name: &str) -> Result<&'a mut Collection, RepositoryError> {
    check_name(name)?;
    let settings = self.paths.collection_settings(name);
    if settings.exists() {
      return Err(RepositoryError::AlreadyExists(settings));
    }
    fs::create_dir_all(self.paths.collection_dir(name))?;
    OptionWriter::new().save(&settings)?;
    for extra in [self.paths.collection_include(name), self.paths.collection_exclude(name)] {
      if !extra.exists() {
        OptionWriter::new().save(&extra)?;
      }
    }
    info!(collection = name, "created collection");

    library.collections.retain(|c| c.name != name);
    library.collections.push(Collection::new(name));
    let idx = library.collections.len() - 1;
    Ok(&mut library.collections[idx])
  }

  /// Deletes the file of a loaded launcher and drops it from `library`.
  ///
  /// Collections that name it keep the stale name until the next load.
  pub fn delete_launcher(&self, library: &mut Library, name: &str) -> Result<(), RepositoryError> {
    check_name(name)?;
    if library.launcher(name).is_none() {
      return Err(RepositoryError::NotFound(name.to_string()));
    }
    if let Some(path) = self.find_launcher_file(name)? {
      fs::remove_file(&path)?;
    }
    library.launchers.retain(|l| l.name != name);
    info!(launcher = name, "deleted launcher");
    Ok(())
  }

  /// Deletes `Collections/<name>/` of a loaded collection and drops it from `library`.
  pub fn delete_collection(&self, library: &mut Library, name: &str) -> Result<(), RepositoryError> {
    check_name(name)?;
    if library.collection(name).is_none() {
      return Err(RepositoryError::NotFound(name.to_string()));
    }
    let dir = self.paths.collection_dir(name);
    if dir.is_dir() {
      fs::remove_dir_all(&dir)?;
    }
    library.collections.retain(|c| c.name != name);
    info!(collection = name, "deleted collection");
    Ok(())
  }

  /// The launcher file whose stem is `name`, with any casing of the extension.
  fn find_launcher_file(&self, name: &str) -> Result<Option<PathBuf>, RepositoryError> {
    let found = list_entries(&self.paths.launchers_dir(), EntryKind::File)?
      .into_iter()
      .map(|(_, path)| path)
      .find(|path| has_launcher_extension(path) && path.file_stem().and_then(|s| s.to_str()) == Some(name));
    Ok(found)
  }
}

/// Entity names are single path components.
fn check_name(name: &str) -> Result<(), RepositoryError> {
  let invalid = name.is_empty()
    || name == "."
    || name == ".."
    || name.chars().any(|c| c == '/' || c == '\\');
  if invalid {
    return Err(RepositoryError::InvalidName(name.to_string()));
  }
  Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
  File,
  Dir,
}

/// Lists `(file name, path)` of the entries of `dir` with the given kind.
/// A missing directory lists as empty.
fn list_entries(dir: &Path, kind: EntryKind) -> Result<Vec<(String, PathBuf)>, RepositoryError> {
  if !dir.is_dir() {
    debug!(dir = %dir.display(), "directory missing, nothing to load");
    return Ok(vec![]);
  }
  let mut items = Vec::new();
  for entry in fs::read_dir(dir)? {
    let entry = entry?;
    let file_type = entry.file_type()?;
    let matches = match kind {
      EntryKind::File => file_type.is_file(),
      EntryKind::Dir => file_type.is_dir(),
    };
    if !matches {
      continue;
    }
    let name = match entry.file_name().into_string() {
      Ok(name) => name,
      Err(raw) => {
        warn!(name = ?raw, dir = %dir.display(), "skipping entry with a non UTF-8 name");
        continue;
      }
    };
    items.push((name, entry.path()));
  }
  Ok(items)
}

fn has_launcher_extension(path: &Path) -> bool {
  path
    .extension()
    .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(LAUNCHER_EXTENSION))
    .unwrap_or(false)
}
