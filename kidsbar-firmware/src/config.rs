//! Device configuration
//!
//! Constants generated by build.rs from `device.toml`.

use kidsbar_core::config::{AnimationConfig, DispatchConfig, EncoderConfig, LedConfig, TrendConfig};

include!(concat!(env!("OUT_DIR"), "/device_config.rs"));
