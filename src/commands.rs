use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use retrofe_config_core::library::model::DEFAULT_LAYOUT;
use retrofe_config_core::{ControllerAction, Library, Repository, RepositoryError};
use tracing::warn;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the loaded settings
    Show {
        /// Emit JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Add, remove or edit launchers
    #[command(subcommand)]
    Launcher(LauncherCommand),
    /// Add, remove or edit collections
    #[command(subcommand)]
    Collection(CollectionCommand),
    /// Edit the global settings
    Main(MainArgs),
    /// Bind a key to a controller action
    Controls {
        /// Action key as written in Controls.conf (e.g. nextItem, quit)
        action: String,
        /// Key name
        key: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum LauncherCommand {
    Add { name: String },
    Remove { name: String },
    Set {
        name: String,
        #[arg(long)]
        executable: Option<String>,
        #[arg(long)]
        arguments: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum CollectionCommand {
    Add { name: String },
    Remove { name: String },
    Set(CollectionArgs),
    /// Replace the submenu list written to Menu.xml
    Submenus { name: String, items: Vec<String> },
}

#[derive(Debug, Args)]
pub struct CollectionArgs {
    name: String,
    /// Launcher name; an empty string clears it
    #[arg(long)]
    launcher: Option<String>,
    #[arg(long, conflicts_with = "default_layout")]
    layout: Option<String>,
    #[arg(long)]
    default_layout: bool,
    #[arg(long)]
    list_path: Option<String>,
    #[arg(long)]
    extensions: Option<String>,
    #[arg(long)]
    video: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    logo: Option<String>,
    #[arg(long = "box")]
    box_art: Option<String>,
    #[arg(long)]
    cart: Option<String>,
    #[arg(long)]
    snap: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Stretch,
    Pixels(u32),
}

fn parse_axis(s: &str) -> std::result::Result<Axis, String> {
    if s.trim().eq_ignore_ascii_case("stretch") {
        return Ok(Axis::Stretch);
    }
    s.trim()
        .parse::<u32>()
        .map(Axis::Pixels)
        .map_err(|_| format!("expected 'stretch' or a pixel count, got '{s}'"))
}

#[derive(Debug, Args)]
pub struct MainArgs {
    /// Layout directory name, or "Default"
    #[arg(long)]
    layout: Option<String>,
    #[arg(long)]
    first_collection: Option<String>,
    #[arg(long, value_parser = parse_axis)]
    horizontal: Option<Axis>,
    #[arg(long, value_parser = parse_axis)]
    vertical: Option<Axis>,
    #[arg(long)]
    fullscreen: Option<bool>,
    #[arg(long)]
    hide_mouse: Option<bool>,
    #[arg(long)]
    show_parenthesis: Option<bool>,
    #[arg(long)]
    show_square_brackets: Option<bool>,
    #[arg(long)]
    video: Option<bool>,
    /// 0 loops forever
    #[arg(long)]
    video_loop: Option<u32>,
    #[arg(long)]
    exit_on_first_back: Option<bool>,
    /// Idle seconds before attract mode; 0 disables it
    #[arg(long)]
    attract_mode_time: Option<u32>,
}

pub fn run(repo: &Repository, command: Command) -> Result<()> {
    let mut library = repo
        .load_all()
        .with_context(|| format!("Failed to load settings from {}", repo.paths().root().display()))?;

    match command {
        Command::Show { json } => show(&library, json),
        Command::Launcher(cmd) => launcher(repo, &mut library, cmd),
        Command::Collection(cmd) => collection(repo, &mut library, cmd),
        Command::Main(args) => main_settings(repo, &mut library, args),
        Command::Controls { action, key } => {
            let action = ControllerAction::from_key(&action)
                .ok_or_else(|| anyhow!("Unknown controller action: {action}"))?;
            *library.controller.binding_mut(action) = key;
            repo.save_controller_settings(&library.controller)?;
            Ok(())
        }
    }
}

fn show(library: &Library, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(library)?);
        return Ok(());
    }

    let main = &library.main;
    println!("Layouts: {}", library.sorted_layouts().join(", "));
    println!("Layout: {}", main.layout.as_deref().unwrap_or(DEFAULT_LAYOUT));
    println!(
        "First collection: {}",
        main.first_collection.as_deref().unwrap_or("(none)")
    );
    println!("Launchers:");
    for l in &library.launchers {
        println!("  {} -> {} {}", l.name, l.executable_path, l.arguments);
    }
    println!("Collections:");
    for c in &library.collections {
        println!(
            "  {} [launcher: {}, layout: {}, submenus: {}]",
            c.name,
            c.launcher.as_deref().unwrap_or("-"),
            if c.is_default_layout() { DEFAULT_LAYOUT } else { c.layout.as_str() },
            c.submenus.len()
        );
    }
    println!("Controls:");
    for action in ControllerAction::ALL {
        println!("  {} = {}", action.key(), library.controller.binding(action));
    }
    Ok(())
}

/// `AlreadyExists` on create is reported and otherwise ignored.
fn created<T>(result: std::result::Result<T, RepositoryError>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(RepositoryError::AlreadyExists(path)) => {
            warn!(path = %path.display(), "already exists, nothing created");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn launcher(repo: &Repository, library: &mut Library, cmd: LauncherCommand) -> Result<()> {
    match cmd {
        LauncherCommand::Add { name } => created(repo.create_launcher(library, &name)),
        LauncherCommand::Remove { name } => Ok(repo.delete_launcher(library, &name)?),
        LauncherCommand::Set {
            name,
            executable,
            arguments,
        } => {
            let launcher = library
                .launcher_mut(&name)
                .ok_or_else(|| anyhow!("Unknown launcher: {name}"))?;
            if let Some(executable) = executable {
                launcher.executable_path = executable;
            }
            if let Some(arguments) = arguments {
                launcher.arguments = arguments;
            }
            repo.save_launcher(launcher)?;
            Ok(())
        }
    }
}

fn collection(repo: &Repository, library: &mut Library, cmd: CollectionCommand) -> Result<()> {
    match cmd {
        CollectionCommand::Add { name } => created(repo.create_collection(library, &name)),
        CollectionCommand::Remove { name } => Ok(repo.delete_collection(library, &name)?),
        CollectionCommand::Submenus { name, items } => {
            let collection = library
                .collection_mut(&name)
                .ok_or_else(|| anyhow!("Unknown collection: {name}"))?;
            collection.submenus = items;
            repo.save_submenus(collection)?;
            Ok(())
        }
        CollectionCommand::Set(args) => {
            let launcher = match args.launcher.as_deref() {
                None => None,
                Some("") => Some(None),
                Some(name) => match library.launcher(name) {
                    Some(l) => Some(Some(l.name.clone())),
                    None => bail!("Unknown launcher: {name}"),
                },
            };
            let collection = library
                .collection_mut(&args.name)
                .ok_or_else(|| anyhow!("Unknown collection: {}", args.name))?;

            if let Some(launcher) = launcher {
                collection.launcher = launcher;
            }
            if args.default_layout {
                collection.use_default_layout();
            } else if let Some(layout) = args.layout {
                collection.set_layout(&layout);
            }
            let fields = [
                (args.list_path, &mut collection.list_path),
                (args.extensions, &mut collection.file_extensions),
                (args.video, &mut collection.media_path_video),
                (args.title, &mut collection.media_path_title),
                (args.logo, &mut collection.media_path_logo),
                (args.box_art, &mut collection.media_path_box),
                (args.cart, &mut collection.media_path_cart),
                (args.snap, &mut collection.media_path_snap),
            ];
            for (value, field) in fields {
                if let Some(value) = value {
                    *field = value;
                }
            }
            repo.save_collection(collection)?;
            Ok(())
        }
    }
}

fn main_settings(repo: &Repository, library: &mut Library, args: MainArgs) -> Result<()> {
    if let Some(layout) = args.layout {
        library.main.layout = if library.has_layout(&layout) {
            Some(layout)
        } else if layout == DEFAULT_LAYOUT {
            None
        } else {
            bail!("Unknown layout: {layout}");
        };
    }
    if let Some(first) = args.first_collection {
        if library.collection(&first).is_none() {
            bail!("Unknown collection: {first}");
        }
        library.main.first_collection = Some(first);
    }

    let main = &mut library.main;
    match args.horizontal {
        Some(Axis::Stretch) => main.horizontal_stretch = true,
        Some(Axis::Pixels(px)) => {
            main.horizontal_stretch = false;
            main.horizontal_resolution = px;
        }
        None => {}
    }
    match args.vertical {
        Some(Axis::Stretch) => main.vertical_stretch = true,
        Some(Axis::Pixels(px)) => {
            main.vertical_stretch = false;
            main.vertical_resolution = px;
        }
        None => {}
    }
    let flags = [
        (args.fullscreen, &mut main.fullscreen),
        (args.hide_mouse, &mut main.mouse_hidden),
        (args.show_parenthesis, &mut main.parenthesis_visible),
        (args.show_square_brackets, &mut main.braces_visible),
        (args.video, &mut main.video_enabled),
        (args.exit_on_first_back, &mut main.exit_on_first_back),
    ];
    for (value, field) in flags {
        if let Some(value) = value {
            *field = value;
        }
    }
    if let Some(count) = args.video_loop {
        main.video_loop_count = count;
    }
    if let Some(seconds) = args.attract_mode_time {
        main.attract_mode_time_seconds = seconds;
        main.attract_mode_enabled = seconds != 0;
    }

    repo.save_main_settings(&library.main)
        .context("Failed to save Settings.conf")?;
    Ok(())
}
