use crate::config::{parse_u32, read_u32_or_zero, to_bool, ConfFile, OptionWriter};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Written for `layout` when no layout is selected.
pub const DEFAULT_LAYOUT: &str = "Default";
pub const DEFAULT_FIRST_COLLECTION: &str = "Main";
pub const STRETCH: &str = "stretch";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Launcher {
  pub name: String,
  pub executable_path: String,
  pub arguments: String,
}

impl Launcher {
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      ..Self::default()
    }
  }

  pub fn from_conf(name: &str, conf: &ConfFile) -> Self {
    Self {
      name: name.to_string(),
      executable_path: conf.get("executable").to_string(),
      arguments: conf.get("arguments").to_string(),
    }
  }

  pub fn to_options(&self) -> OptionWriter {
    let mut s = OptionWriter::new();
    s.add("executable", &self.executable_path)
      .add("arguments", &self.arguments);
    s
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
  pub name: String,
  /// Name of a launcher present when this collection was loaded.
  pub launcher: Option<String>,
  pub list_path: String,
  pub file_extensions: String,
  pub media_path_video: String,
  pub media_path_title: String,
  pub media_path_logo: String,
  pub media_path_box: String,
  pub media_path_cart: String,
  pub media_path_snap: String,
  /// Empty means the frontend's default layout.
  pub layout: String,
  /// Collection names shown as submenus. Not checked against loaded collections.
  pub submenus: Vec<String>,
}

impl Collection {
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      ..Self::default()
    }
  }

  /// Builds a collection from its settings file, resolving `launcher`
  /// against the launchers loaded in the same pass.
  pub fn from_conf(name: &str, conf: &ConfFile, launchers: &[Launcher], submenus: Vec<String>) -> Self {
    let launcher_name = conf.get("launcher");
    let launcher = launchers
      .iter()
      .find(|l| l.name == launcher_name)
      .map(|l| l.name.clone());
    if launcher.is_none() && !launcher_name.is_empty() {
      warn!(collection = name, launcher = launcher_name, "unknown launcher");
    }

    Self {
      name: name.to_string(),
      launcher,
      list_path: conf.get("list.path").to_string(),
      file_extensions: conf.get("list.extensions").to_string(),
      media_path_video: conf.get("media.video").to_string(),
      media_path_title: conf.get("media.title").to_string(),
      media_path_logo: conf.get("media.logo").to_string(),
      media_path_box: conf.get("media.box").to_string(),
      media_path_cart: conf.get("media.cart").to_string(),
      media_path_snap: conf.get("media.snap").to_string(),
      layout: conf.get("layout").to_string(),
      submenus,
    }
  }

  pub fn is_default_layout(&self) -> bool {
    self.layout.is_empty()
  }

  pub fn set_layout(&mut self, layout: &str) {
    self.layout = layout.trim().to_string();
  }

  pub fn use_default_layout(&mut self) {
    self.layout.clear();
  }

  pub fn to_options(&self) -> OptionWriter {
    let mut s = OptionWriter::new();
    if !self.is_default_layout() {
      s.add("layout", &self.layout);
    }
    s.add("launcher", self.launcher.as_deref().unwrap_or(""))
      .add("list.path", &self.list_path)
      .add("list.extensions", &self.file_extensions)
      .add("media.box", &self.media_path_box)
      .add("media.cart", &self.media_path_cart)
      .add("media.logo", &self.media_path_logo)
      .add("media.snap", &self.media_path_snap)
      .add("media.title", &self.media_path_title)
      .add("media.video", &self.media_path_video);
    s
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainSettings {
  pub fullscreen: bool,
  pub horizontal_stretch: bool,
  pub vertical_stretch: bool,
  /// Only meaningful when `horizontal_stretch` is false.
  pub horizontal_resolution: u32,
  /// Only meaningful when `vertical_stretch` is false.
  pub vertical_resolution: u32,
  /// `None` is the frontend's default layout.
  pub layout: Option<String>,
  pub mouse_hidden: bool,
  pub parenthesis_visible: bool,
  pub braces_visible: bool,
  pub first_collection: Option<String>,
  pub video_enabled: bool,
  pub video_loop_count: u32,
  pub exit_on_first_back: bool,
  pub attract_mode_time_seconds: u32,
  pub attract_mode_enabled: bool,
}

impl MainSettings {
  pub fn from_conf(conf: &ConfFile, layouts: &[String], collections: &[Collection]) -> Result<Self, ConfigError> {
    let horizontal_stretch = to_bool(conf.get("horizontal"));
    let vertical_stretch = to_bool(conf.get("vertical"));
    let horizontal_resolution = if horizontal_stretch {
      0
    } else {
      parse_u32("horizontal", conf.get("horizontal"))?
    };
    let vertical_resolution = if vertical_stretch {
      0
    } else {
      parse_u32("vertical", conf.get("vertical"))?
    };

    let layout_name = conf.get("layout");
    let layout = layouts.iter().find(|l| l.as_str() == layout_name).cloned();
    if layout.is_none() && !layout_name.is_empty() && layout_name != DEFAULT_LAYOUT {
      warn!(layout = layout_name, "layout directory not found, using default");
    }

    let mut first_name = conf.get("firstCollection");
    if first_name.is_empty() {
      first_name = DEFAULT_FIRST_COLLECTION;
    }
    let first_collection = collections
      .iter()
      .find(|c| c.name == first_name)
      .map(|c| c.name.clone());
    if first_collection.is_none() {
      warn!(collection = first_name, "first collection not found");
    }

    let attract_mode_time_seconds = read_u32_or_zero(conf, "attractModeTime");

    Ok(Self {
      fullscreen: to_bool(conf.get("fullscreen")),
      horizontal_stretch,
      vertical_stretch,
      horizontal_resolution,
      vertical_resolution,
      layout,
      mouse_hidden: to_bool(conf.get("hideMouse")),
      parenthesis_visible: to_bool(conf.get("showParenthesis")),
      braces_visible: to_bool(conf.get("showSquareBrackets")),
      first_collection,
      video_enabled: to_bool(conf.get("videoEnable")),
      video_loop_count: read_u32_or_zero(conf, "videoLoop"),
      exit_on_first_back: to_bool(conf.get("exitOnFirstPageBack")),
      attract_mode_time_seconds,
      attract_mode_enabled: attract_mode_time_seconds != 0,
    })
  }

  /// A loop count of zero repeats videos forever.
  pub fn is_infinite_loop(&self) -> bool {
    self.video_loop_count == 0
  }

  pub fn to_options(&self) -> OptionWriter {
    let mut s = OptionWriter::new();

    if self.vertical_stretch {
      s.add("vertical", STRETCH);
    } else {
      s.add("vertical", &self.vertical_resolution);
    }
    if self.horizontal_stretch {
      s.add("horizontal", STRETCH);
    } else {
      s.add("horizontal", &self.horizontal_resolution);
    }

    let attract_time = if self.attract_mode_enabled {
      self.attract_mode_time_seconds
    } else {
      0
    };

    s.add("fullscreen", &self.fullscreen)
      .add("layout", self.layout.as_deref().unwrap_or(DEFAULT_LAYOUT))
      .add("hideMouse", &self.mouse_hidden)
      .add("showParenthesis", &self.parenthesis_visible)
      .add("showSquareBrackets", &self.braces_visible)
      .add(
        "firstCollection",
        self.first_collection.as_deref().unwrap_or(DEFAULT_FIRST_COLLECTION),
      )
      .add("videoEnable", &self.video_enabled)
      .add("videoLoop", &self.video_loop_count)
      .add("exitOnFirstPageBack", &self.exit_on_first_back)
      .add("attractModeTime", &attract_time);
    s
  }
}

/// Logical inputs that can be bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControllerAction {
  ScrollPrevious,
  ScrollNext,
  PageUp,
  PageDown,
  Select,
  Back,
  Quit,
}

impl ControllerAction {
  /// Save order of `Controls.conf`.
  pub const ALL: [ControllerAction; 7] = [
    ControllerAction::ScrollPrevious,
    ControllerAction::ScrollNext,
    ControllerAction::PageUp,
    ControllerAction::PageDown,
    ControllerAction::Select,
    ControllerAction::Back,
    ControllerAction::Quit,
  ];

  pub fn key(self) -> &'static str {
    match self {
      ControllerAction::ScrollPrevious => "previousItem",
      ControllerAction::ScrollNext => "nextItem",
      ControllerAction::PageUp => "pageUp",
      ControllerAction::PageDown => "pageDown",
      ControllerAction::Select => "select",
      ControllerAction::Back => "back",
      ControllerAction::Quit => "quit",
    }
  }

  pub fn from_key(key: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|a| a.key() == key)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerSettings {
  pub scroll_next: String,
  pub scroll_previous: String,
  pub page_up: String,
  pub page_down: String,
  pub select: String,
  pub back: String,
  pub quit: String,
}

impl ControllerSettings {
  pub fn from_conf(conf: &ConfFile) -> Self {
    let mut settings = Self::default();
    for action in ControllerAction::ALL {
      *settings.binding_mut(action) = conf.get(action.key()).to_string();
    }
    settings
  }

  pub fn binding(&self, action: ControllerAction) -> &str {
    match action {
      ControllerAction::ScrollPrevious => &self.scroll_previous,
      ControllerAction::ScrollNext => &self.scroll_next,
      ControllerAction::PageUp => &self.page_up,
      ControllerAction::PageDown => &self.page_down,
      ControllerAction::Select => &self.select,
      ControllerAction::Back => &self.back,
      ControllerAction::Quit => &self.quit,
    }
  }

  pub fn binding_mut(&mut self, action: ControllerAction) -> &mut String {
    match action {
      ControllerAction::ScrollPrevious => &mut self.scroll_previous,
      ControllerAction::ScrollNext => &mut self.scroll_next,
      ControllerAction::PageUp => &mut self.page_up,
      ControllerAction::PageDown => &mut self.page_down,
      ControllerAction::Select => &mut self.select,
      ControllerAction::Back => &mut self.back,
      ControllerAction::Quit => &mut self.quit,
    }
  }

  pub fn to_options(&self) -> OptionWriter {
    let mut s = OptionWriter::new();
    for action in ControllerAction::ALL {
      s.add(action.key(), self.binding(action));
    }
    s
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::Path;

  fn conf(content: &str) -> ConfFile {
    ConfFile::parse(Path::new("Settings.conf"), content).unwrap()
  }

  fn launchers() -> Vec<Launcher> {
    vec![Launcher::new("MAME"), Launcher::new("Nestopia")]
  }

  const MAIN: &str = "horizontal=stretch\nvertical=stretch\nfullscreen=yes\nlayout=Default\n";

  #[test]
  fn test_launcher_from_conf() {
    let launcher = Launcher::from_conf("MAME", &conf("executable = mame.exe\narguments = %ITEM_NAME%\n"));
    assert_eq!(launcher.name, "MAME");
    assert_eq!(launcher.executable_path, "mame.exe");
    assert_eq!(launcher.arguments, "%ITEM_NAME%");

    let options = launcher.to_options();
    assert_eq!(options.get("executable"), Some("mame.exe"));
    assert_eq!(options.get("arguments"), Some("%ITEM_NAME%"));
  }

  #[test]
  fn test_collection_resolves_known_launcher() {
    let c = Collection::from_conf("Arcade", &conf("launcher=MAME\n"), &launchers(), vec![]);
    assert_eq!(c.launcher.as_deref(), Some("MAME"));
  }

  #[test]
  fn test_collection_unknown_launcher_is_none() {
    let c = Collection::from_conf("Arcade", &conf("launcher=Unknown\n"), &launchers(), vec![]);
    assert_eq!(c.launcher, None);
    assert_eq!(c.to_options().get("launcher"), Some(""));
  }

  #[test]
  fn test_collection_default_layout() {
    let mut c = Collection::from_conf("Arcade", &conf("list.path=roms\n"), &launchers(), vec![]);
    assert!(c.is_default_layout());
    assert_eq!(c.to_options().get("layout"), None);

    c.set_layout("Neon");
    assert!(!c.is_default_layout());
    assert_eq!(c.to_options().get("layout"), Some("Neon"));

    c.use_default_layout();
    assert!(c.is_default_layout());
  }

  #[test]
  fn test_collection_media_paths() {
    let c = Collection::from_conf(
      "SNES",
      &conf("media.video=v\nmedia.title=t\nmedia.logo=l\nmedia.box=b\nmedia.cart=c\nmedia.snap=s\nlist.extensions=sfc\n"),
      &launchers(),
      vec!["Arcade".to_string()],
    );
    assert_eq!(
      (
        c.media_path_video.as_str(),
        c.media_path_title.as_str(),
        c.media_path_logo.as_str(),
        c.media_path_box.as_str(),
        c.media_path_cart.as_str(),
        c.media_path_snap.as_str()
      ),
      ("v", "t", "l", "b", "c", "s")
    );
    assert_eq!(c.file_extensions, "sfc");
    assert_eq!(c.submenus, vec!["Arcade".to_string()]);

    let options = c.to_options();
    assert_eq!(options.get("media.snap"), Some("s"));
    assert_eq!(options.get("list.extensions"), Some("sfc"));
  }

  #[test]
  fn test_main_stretch_and_resolution() {
    let main = MainSettings::from_conf(&conf("horizontal=1024\nvertical=stretch\n"), &[], &[]).unwrap();
    assert!(!main.horizontal_stretch);
    assert_eq!(main.horizontal_resolution, 1024);
    assert!(main.vertical_stretch);

    let options = main.to_options();
    assert_eq!(options.get("horizontal"), Some("1024"));
    assert_eq!(options.get("vertical"), Some("stretch"));
  }

  #[test]
  fn test_main_bad_resolution_is_format_error() {
    let err = MainSettings::from_conf(&conf("horizontal=wide\nvertical=stretch\n"), &[], &[]).unwrap_err();
    match err {
      ConfigError::Format { key, value } => {
        assert_eq!(key, "horizontal");
        assert_eq!(value, "wide");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_main_empty_layout_saves_default() {
    let layouts = vec!["Default".to_string(), "Neon".to_string()];
    let main = MainSettings::from_conf(&conf("horizontal=stretch\nvertical=stretch\nlayout=\n"), &layouts, &[]).unwrap();
    assert_eq!(main.layout, None);
    assert_eq!(main.to_options().get("layout"), Some("Default"));

    let main = MainSettings::from_conf(&conf("horizontal=stretch\nvertical=stretch\nlayout=Neon\n"), &layouts, &[]).unwrap();
    assert_eq!(main.layout.as_deref(), Some("Neon"));
  }

  #[test]
  fn test_main_unknown_layout_is_none() {
    let main = MainSettings::from_conf(&conf("horizontal=stretch\nvertical=stretch\nlayout=Gone\n"), &["Neon".to_string()], &[]).unwrap();
    assert_eq!(main.layout, None);
  }

  #[test]
  fn test_main_first_collection_defaults_to_main() {
    let collections = vec![Collection::new("Main"), Collection::new("Arcade")];
    let main = MainSettings::from_conf(&conf(MAIN), &[], &collections).unwrap();
    assert_eq!(main.first_collection.as_deref(), Some("Main"));

    let main = MainSettings::from_conf(&conf(&format!("{MAIN}firstCollection=Arcade\n")), &[], &collections).unwrap();
    assert_eq!(main.first_collection.as_deref(), Some("Arcade"));

    let main = MainSettings::from_conf(&conf(MAIN), &[], &[Collection::new("Arcade")]).unwrap();
    assert_eq!(main.first_collection, None);
    assert_eq!(main.to_options().get("firstCollection"), Some("Main"));
  }

  #[test]
  fn test_main_visibility_keeps_polarity() {
    let main = MainSettings::from_conf(
      &conf(&format!("{MAIN}showParenthesis=yes\nshowSquareBrackets=no\nhideMouse=true\n")),
      &[],
      &[],
    )
    .unwrap();
    assert!(main.parenthesis_visible);
    assert!(!main.braces_visible);
    assert!(main.mouse_hidden);

    let options = main.to_options();
    assert_eq!(options.get("showParenthesis"), Some("yes"));
    assert_eq!(options.get("showSquareBrackets"), Some("no"));
    assert_eq!(options.get("hideMouse"), Some("yes"));
  }

  #[test]
  fn test_main_video_loop() {
    let main = MainSettings::from_conf(&conf(&format!("{MAIN}videoEnable=yes\nvideoLoop=0\n")), &[], &[]).unwrap();
    assert!(main.video_enabled);
    assert!(main.is_infinite_loop());

    let main = MainSettings::from_conf(&conf(&format!("{MAIN}videoLoop=2\n")), &[], &[]).unwrap();
    assert!(!main.is_infinite_loop());
    assert_eq!(main.to_options().get("videoLoop"), Some("2"));
  }

  #[test]
  fn test_main_attract_mode() {
    let main = MainSettings::from_conf(&conf(&format!("{MAIN}attractModeTime=0\n")), &[], &[]).unwrap();
    assert!(!main.attract_mode_enabled);

    let mut main = MainSettings::from_conf(&conf(&format!("{MAIN}attractModeTime=45\n")), &[], &[]).unwrap();
    assert!(main.attract_mode_enabled);
    assert_eq!(main.attract_mode_time_seconds, 45);
    assert_eq!(main.to_options().get("attractModeTime"), Some("45"));

    main.attract_mode_enabled = false;
    assert_eq!(main.to_options().get("attractModeTime"), Some("0"));
    assert_eq!(main.attract_mode_time_seconds, 45);
  }

  #[test]
  fn test_main_save_order() {
    let main = MainSettings::from_conf(&conf(MAIN), &[], &[]).unwrap();
    let rendered = main.to_options().render();
    let keys: Vec<&str> = rendered
      .lines()
      .map(|l| l.split(" = ").next().unwrap())
      .collect();
    assert_eq!(
      keys,
      vec![
        "vertical",
        "horizontal",
        "fullscreen",
        "layout",
        "hideMouse",
        "showParenthesis",
        "showSquareBrackets",
        "firstCollection",
        "videoEnable",
        "videoLoop",
        "exitOnFirstPageBack",
        "attractModeTime",
      ]
    );
  }

  #[test]
  fn test_controller_bindings() {
    let controls = ControllerSettings::from_conf(&conf(
      "nextItem=Down\npreviousItem=Up\npageUp=PageUp\npageDown=PageDown\nselect=Space\nback=Backspace\n",
    ));
    assert_eq!(controls.scroll_next, "Down");
    assert_eq!(controls.scroll_previous, "Up");
    assert_eq!(controls.select, "Space");
    assert_eq!(controls.quit, "");

    let options = controls.to_options();
    assert_eq!(options.len(), 7);
    assert_eq!(options.get("back"), Some("Backspace"));
    assert_eq!(options.get("quit"), Some(""));
  }

  #[test]
  fn test_controller_action_keys() {
    assert_eq!(ControllerAction::from_key("pageDown"), Some(ControllerAction::PageDown));
    assert_eq!(ControllerAction::from_key("jump"), None);

    let mut controls = ControllerSettings::default();
    *controls.binding_mut(ControllerAction::Quit) = "Escape".to_string();
    assert_eq!(controls.quit, "Escape");
    assert_eq!(controls.binding(ControllerAction::Quit), "Escape");
  }
}
