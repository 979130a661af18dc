//! Rotary encoder drivers

pub mod pcnt;

pub use pcnt::PcntEncoder;
