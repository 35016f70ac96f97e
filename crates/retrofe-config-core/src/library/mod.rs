pub mod model;
pub mod store;

pub use model::{Collection, ControllerAction, ControllerSettings, Launcher, MainSettings};
pub use store::{Library, Repository};
