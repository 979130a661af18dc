//! Embassy async tasks

pub mod led_anim;
pub mod pcnt;

pub use led_anim::led_anim_task;
pub use pcnt::pcnt_task;
