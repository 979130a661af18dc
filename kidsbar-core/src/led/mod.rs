//! Status LED logic
//!
//! Colors, trend hysteresis and animation scheduling. Nothing here talks to
//! a strip; the renderer in `kidsbar-drivers` turns frames into pixels.

pub mod animation;
pub mod color;
pub mod trend;

pub use animation::{breathe_factor, party_color, select_mode, AnimationMode, AnimationScheduler, Frame};
pub use color::{hsv_to_rgb, lerp, scale, scale_channel, NamedColor, WARNING_COLOR};
pub use trend::{TrendClassifier, TrendState};
