//! Shared settings trees for repository tests.
#![allow(dead_code)]

use retrofe_config_core::{RetroFePaths, Repository};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const MAIN_SETTINGS: &str = "\
horizontal = stretch
vertical = 768
fullscreen = yes
layout = Neon
hideMouse = yes
showParenthesis = yes
showSquareBrackets = no
firstCollection =
videoEnable = yes
videoLoop = 0
exitOnFirstPageBack = no
attractModeTime = 30
";

pub const CONTROLS: &str = "\
previousItem = Up
nextItem = Down
pageUp = PageUp
pageDown = PageDown
select = Space
back = Backspace
quit = Escape
";

pub fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A tree with two layouts, two launchers and three collections.
pub fn sample_tree() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    write(&root.join("Settings.conf"), MAIN_SETTINGS);
    write(&root.join("Controls.conf"), CONTROLS);

    fs::create_dir_all(root.join("Layouts").join("Default")).unwrap();
    fs::create_dir_all(root.join("Layouts").join("Neon")).unwrap();

    write(
        &root.join("Launchers").join("MAME.conf"),
        "executable = C:/Emulators/mame/mame.exe\narguments = \"%ITEM_NAME%\" -skip_gameinfo\n",
    );
    write(
        &root.join("Launchers").join("Nestopia.conf"),
        "executable=C:/Emulators/nestopia/nestopia.exe\narguments=\"%ITEM_FILEPATH%\"\n",
    );

    write(
        &root.join("Collections").join("Main").join("Settings.conf"),
        "list.path = \nlauncher = \n",
    );
    write(
        &root.join("Collections").join("Main").join("Menu.xml"),
        "<menu>\n  <item collection=\"Arcade\"/>\n  <item collection=\"NES\"/>\n  <item collection=\"Missing\"/>\n</menu>\n",
    );
    write(
        &root.join("Collections").join("Arcade").join("Settings.conf"),
        "launcher = MAME\nlist.path = C:/roms/mame\nlist.extensions = zip\nlayout = Neon\nmedia.video = C:/media/video # trailers\n",
    );
    write(
        &root.join("Collections").join("NES").join("Settings.conf"),
        "launcher = Unknown\nlist.path = C:/roms/nes\nlist.extensions = nes,zip\n",
    );

    let repo = Repository::new(RetroFePaths::new(root));
    (temp_dir, repo)
}
