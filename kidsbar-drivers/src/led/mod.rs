//! Status LED drivers

pub mod renderer;
pub mod status;

pub use renderer::LedRenderer;
pub use status::{BackgroundSchedule, LedStatus, MAX_BACKGROUND_HZ, MIN_BACKGROUND_HZ};
