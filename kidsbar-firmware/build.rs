//! Build script for kidsbar-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time and turns it into constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

// Host critical-section implementation for the config crate
use critical_section as _;
use kidsbar_core::config::{
    AnimationConfig, DispatchConfig, EncoderConfig, LedConfig, TrendConfig,
};
use serde::Deserialize;

/// Board-level settings
#[derive(Debug, Deserialize)]
#[serde(default)]
struct BoardConfig {
    status_pixels: usize,
    background_animation: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            status_pixels: 1,
            background_animation: true,
        }
    }
}

/// Whole device.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DeviceFile {
    board: BoardConfig,
    encoder: EncoderConfig,
    led: LedConfig,
    trend: TrendConfig,
    animation: AnimationConfig,
    dispatch: DispatchConfig,
}

fn main() {
    setup_linker();
    let device = load_device_config();
    validate(&device);
    write_constants(&device);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse device.toml
fn load_device_config() -> DeviceFile {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a device.toml configuration file.         ║\n\
            ║  Please create one in the kidsbar-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&config_content) {
        Ok(device) => device,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid device.toml                                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check value ranges the type system cannot express
fn validate(device: &DeviceFile) {
    let mut errors: Vec<String> = Vec::new();

    if !(1..=8).contains(&device.board.status_pixels) {
        errors.push("[board] status_pixels must be 1-8".into());
    }

    let enc = &device.encoder;
    if enc.counts_per_step == 0 {
        errors.push("[encoder] counts_per_step must be at least 1".into());
    }
    if enc.spike_threshold < enc.counts_per_step {
        errors.push("[encoder] spike_threshold must be >= counts_per_step".into());
    }
    if enc.max_emit_per_poll == 0 {
        errors.push("[encoder] max_emit_per_poll must be at least 1".into());
    }
    // Otherwise a fast spin resolves more steps per poll than can leave,
    // and the backlog grows without bound
    let drain = u32::from(enc.counts_per_step) * u32::from(enc.max_emit_per_poll);
    if u32::from(enc.spike_threshold) > drain {
        errors.push(format!(
            "[encoder] spike_threshold ({}) must be <= counts_per_step * max_emit_per_poll ({})",
            enc.spike_threshold, drain
        ));
    }
    if !(1..=100).contains(&enc.poll_interval_ms) {
        errors.push("[encoder] poll_interval_ms must be 1-100".into());
    }

    let led = &device.led;
    if !(0.0..=1.0).contains(&led.default_brightness) {
        errors.push("[led] default_brightness must be 0.0-1.0".into());
    }
    if led.reassert_ms == 0 || led.aux_off_ms == 0 {
        errors.push("[led] reassert_ms and aux_off_ms must be non-zero".into());
    }

    let trend = &device.trend;
    if !(trend.enter_pct > 0.0 && trend.exit_pct >= 0.0) {
        errors.push("[trend] enter_pct must be positive, exit_pct non-negative".into());
    }

    let anim = &device.animation;
    if anim.slow_threshold_pct > anim.fast_threshold_pct {
        errors.push("[animation] slow_threshold_pct must be <= fast_threshold_pct".into());
    }
    if anim.party_exit_pct > anim.party_enter_pct {
        errors.push("[animation] party_exit_pct must be <= party_enter_pct".into());
    }
    if !(0.0..=1.0).contains(&anim.breathe_min_fraction) {
        errors.push("[animation] breathe_min_fraction must be 0.0-1.0".into());
    }
    if !(5..=60).contains(&anim.background_rate_hz) {
        errors.push("[animation] background_rate_hz must be 5-60".into());
    }
    if anim.background_core > 1 {
        errors.push("[animation] background_core must be 0 or 1".into());
    }

    if device.dispatch.long_press_ms <= device.dispatch.debounce_ms {
        errors.push("[dispatch] long_press_ms must exceed debounce_ms".into());
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in device.toml                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=device.toml validated successfully");
}

/// Emit the validated config as Rust constants
fn write_constants(device: &DeviceFile) {
    let enc = &device.encoder;
    let led = &device.led;
    let trend = &device.trend;
    let anim = &device.animation;
    let dispatch = &device.dispatch;

    let code = format!(
        "// Generated from device.toml by build.rs\n\
         \n\
         pub const STATUS_PIXELS: usize = {status_pixels};\n\
         pub const BACKGROUND_ANIMATION: bool = {background};\n\
         \n\
         pub const ENCODER: EncoderConfig = EncoderConfig {{\n\
         \x20   counts_per_step: {},\n\
         \x20   invert_direction: {},\n\
         \x20   spike_threshold: {},\n\
         \x20   max_emit_per_poll: {},\n\
         \x20   direction_lock_ms: {},\n\
         \x20   filter_ns: {},\n\
         \x20   poll_interval_ms: {},\n\
         }};\n\
         \n\
         pub const LED: LedConfig = LedConfig {{\n\
         \x20   default_brightness: {:?},\n\
         \x20   off_threshold: {:?},\n\
         \x20   reassert_ms: {},\n\
         \x20   aux_off_ms: {},\n\
         }};\n\
         \n\
         pub const TREND: TrendConfig = TrendConfig {{\n\
         \x20   enter_pct: {:?},\n\
         \x20   exit_pct: {:?},\n\
         }};\n\
         \n\
         pub const ANIMATION: AnimationConfig = AnimationConfig {{\n\
         \x20   slow_threshold_pct: {:?},\n\
         \x20   fast_threshold_pct: {:?},\n\
         \x20   party_enter_pct: {:?},\n\
         \x20   party_exit_pct: {:?},\n\
         \x20   breathe_slow_period_ms: {},\n\
         \x20   breathe_fast_period_ms: {},\n\
         \x20   party_period_ms: {},\n\
         \x20   breathe_min_fraction: {:?},\n\
         \x20   min_update_ms: {},\n\
         \x20   background_rate_hz: {},\n\
         \x20   background_core: {},\n\
         }};\n\
         \n\
         pub const DISPATCH: DispatchConfig = DispatchConfig {{\n\
         \x20   debounce_ms: {},\n\
         \x20   long_press_ms: {},\n\
         }};\n",
        enc.counts_per_step,
        enc.invert_direction,
        enc.spike_threshold,
        enc.max_emit_per_poll,
        enc.direction_lock_ms,
        enc.filter_ns,
        enc.poll_interval_ms,
        led.default_brightness,
        led.off_threshold,
        led.reassert_ms,
        led.aux_off_ms,
        trend.enter_pct,
        trend.exit_pct,
        anim.slow_threshold_pct,
        anim.fast_threshold_pct,
        anim.party_enter_pct,
        anim.party_exit_pct,
        anim.breathe_slow_period_ms,
        anim.breathe_fast_period_ms,
        anim.party_period_ms,
        anim.breathe_min_fraction,
        anim.min_update_ms,
        anim.background_rate_hz,
        anim.background_core,
        dispatch.debounce_ms,
        dispatch.long_press_ms,
        status_pixels = device.board.status_pixels,
        background = device.board.background_animation,
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("device_config.rs"), code).unwrap();
}
