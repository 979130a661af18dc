//! Addressable LED strip abstraction
//!
//! A strip buffers one color per pixel and pushes the whole buffer onto the
//! bus on [`LedStrip::show`]. Colors are [`RGB8`] from `smart-leds`.

pub use smart_leds::RGB8;

/// Black, for clearing strips
pub const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// WS2812-style strip driver
pub trait LedStrip {
    /// Number of pixels on the strip
    fn len(&self) -> usize;

    /// Set the color of a buffered pixel (out-of-range indices are ignored)
    fn set_pixel(&mut self, index: usize, color: RGB8);

    /// Push the buffer onto the bus
    ///
    /// Expected to complete in microseconds for the short strips used here.
    fn show(&mut self);

    /// Check if the strip has no pixels
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set every pixel to the same color and show it
    fn fill(&mut self, color: RGB8) {
        for i in 0..self.len() {
            self.set_pixel(i, color);
        }
        self.show();
    }

    /// Turn every pixel off
    fn clear(&mut self) {
        self.fill(BLACK);
    }
}

/// Pack a color as `0x00RRGGBB`
pub const fn pack(color: RGB8) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | (color.b as u32)
}

/// Unpack a `0x00RRGGBB` word
pub const fn unpack(packed: u32) -> RGB8 {
    RGB8 {
        r: ((packed >> 16) & 0xFF) as u8,
        g: ((packed >> 8) & 0xFF) as u8,
        b: (packed & 0xFF) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        assert_eq!(pack(RGB8::new(0x12, 0x34, 0x56)), 0x0012_3456);
        assert_eq!(unpack(0x00AB_CDEF), RGB8::new(0xAB, 0xCD, 0xEF));
    }

    struct Buffer {
        pixels: [RGB8; 3],
        shows: u32,
    }

    impl LedStrip for Buffer {
        fn len(&self) -> usize {
            self.pixels.len()
        }

        fn set_pixel(&mut self, index: usize, color: RGB8) {
            if let Some(p) = self.pixels.get_mut(index) {
                *p = color;
            }
        }

        fn show(&mut self) {
            self.shows += 1;
        }
    }

    #[test]
    fn test_fill_sets_all_pixels_and_shows_once() {
        let mut strip = Buffer {
            pixels: [RGB8::new(1, 2, 3); 3],
            shows: 0,
        };
        strip.fill(RGB8::new(9, 9, 9));
        assert!(strip.pixels.iter().all(|p| *p == RGB8::new(9, 9, 9)));
        assert_eq!(strip.shows, 1);

        strip.clear();
        assert!(strip.pixels.iter().all(|p| *p == BLACK));
        assert_eq!(strip.shows, 2);
    }
}
