mod app;
pub mod components;
mod input;
pub mod ruler;
pub mod theme;
mod ui;

pub use app::{App, AppMode};
pub use ruler::{RulerState, RulerWidget};
