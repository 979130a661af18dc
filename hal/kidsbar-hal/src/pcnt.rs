//! Quadrature pulse counter abstraction
//!
//! Models a hardware pulse-count unit (ESP32 PCNT style): two inputs, a
//! glitch filter, and a signed 16-bit register that wraps and can be
//! cleared, paused and resumed independently of the CPU.

/// Edge counting mode for the A/B signal pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QuadratureMode {
    /// Count both edges of A, direction from the level of B
    #[default]
    X2,
}

/// Pulse counter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PcntConfig {
    /// Edge counting mode
    pub mode: QuadratureMode,
    /// Pulses narrower than this are ignored (nanoseconds, 0 = no filter)
    pub filter_ns: u32,
}

impl Default for PcntConfig {
    fn default() -> Self {
        Self {
            mode: QuadratureMode::X2,
            filter_ns: 1_875,
        }
    }
}

/// Hardware quadrature pulse counter
///
/// Pins are bound when the implementation is constructed. All methods are
/// expected to complete in a few register accesses.
pub trait PulseCounter {
    /// Apply mode and filter settings
    fn configure(&mut self, config: &PcntConfig);

    /// Read the signed count accumulated since the last clear
    fn read(&mut self) -> i16;

    /// Reset the register to zero
    fn clear(&mut self);

    /// Stop counting edges
    fn pause(&mut self);

    /// Resume counting edges
    fn resume(&mut self);
}

/// Count delta for a single A edge in [`QuadratureMode::X2`]
///
/// A rising counts down while B is high and up while B is low; a falling
/// edge does the opposite. One detent of a 24 PPR encoder therefore yields
/// two counts in the same direction.
pub fn x2_edge_delta(a_rising: bool, b_high: bool) -> i16 {
    match (a_rising, b_high) {
        (true, true) => -1,
        (true, false) => 1,
        (false, true) => 1,
        (false, false) => -1,
    }
}
