//! RGB565 pixel quantization.
//!
//! Packs 8-bit channels into the 5-6-5 layout used by small TFT panels:
//! `RRRRR GGGGGG BBBBB`, red in the most significant bits.

/// Mask of the 5-bit red field after shifting down.
pub const RED_MASK: u16 = 0x1F;
/// Mask of the 6-bit green field after shifting down.
pub const GREEN_MASK: u16 = 0x3F;
/// Mask of the 5-bit blue field.
pub const BLUE_MASK: u16 = 0x1F;

/// A packed 16-bit RGB565 pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Pixel565(u16);

impl Pixel565 {
    /// Wrap an already packed value
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Quantize an RGB888 triple by truncating the low bits of each channel.
    ///
    /// No rounding is applied, so `0xFF` maps to the channel maximum and any
    /// value below `0x08` (red/blue) or `0x04` (green) maps to zero.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let r5 = (r >> 3) as u16;
        let g6 = (g >> 2) as u16;
        let b5 = (b >> 3) as u16;
        Self((r5 << 11) | (g6 << 5) | b5)
    }

    /// Quantize an RGBA8 pixel. The alpha channel is dropped.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, _a: u8) -> Self {
        Self::from_rgb8(r, g, b)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    pub const fn red5(self) -> u8 {
        ((self.0 >> 11) & RED_MASK) as u8
    }

    pub const fn green6(self) -> u8 {
        ((self.0 >> 5) & GREEN_MASK) as u8
    }

    pub const fn blue5(self) -> u8 {
        (self.0 & BLUE_MASK) as u8
    }

    /// Bytes in the order they are laid out in the generated array (low byte first)
    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

impl From<Pixel565> for u16 {
    fn from(px: Pixel565) -> Self {
        px.0
    }
}
