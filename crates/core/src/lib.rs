pub mod animation;
pub mod geometry;
pub mod layout;
pub mod source;
pub mod state;

pub use geometry::{Offsets, RulerMeasurement, RulerSpec, Size};
pub use state::DistanceState;
