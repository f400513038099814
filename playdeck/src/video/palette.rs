//! # Color Palettes
//!
//! The framebuffer stores 4-bit indices; a [`Palette`] maps those 16
//! indices to RGB565 colors at refresh time. Several palettes exist as
//! constants and one is active per display — switching recolors the
//! whole screen without rewriting a single stored pixel.
//!
//! Colors are natural-bit-order RGB565 (`RRRRRGGG GGGBBBBB`); any
//! byte-swapping the panel wants is the transport's job.

/// Named RGB565 colors.
///
/// Picked for contrast and variety; the default palette is built from
/// these. See <https://rgbcolorpicker.com/565> for more.
pub mod color {
    pub const BLACK: u16 = 0x0000;
    pub const WHITE: u16 = 0xFFFF;
    pub const RED: u16 = 0xF800;
    pub const GREEN: u16 = 0x07E0;
    pub const BLUE: u16 = 0x001F;
    pub const YELLOW: u16 = 0xFFE0;
    pub const CYAN: u16 = 0x07FF;
    pub const MAGENTA: u16 = 0xF81F;
    pub const GREY: u16 = 0x8410;
    pub const LIGHT_GREY: u16 = 0xC618;
    pub const DARK_GREY: u16 = 0x4208;
    pub const ORANGE: u16 = 0xFD20;
    pub const BROWN: u16 = 0xA145;
    pub const PINK: u16 = 0xFC18;
    pub const PURPLE: u16 = 0x780F;
    pub const TEAL: u16 = 0x0438;
    pub const NAVY: u16 = 0x000F;
    pub const MAROON: u16 = 0x8000;
    pub const OLIVE: u16 = 0x8400;
    pub const SKY_BLUE: u16 = 0x867D;
    pub const GOLD: u16 = 0xFEA0;
    pub const VIOLET: u16 = 0x915C;
    pub const GREEN_BRIGHT: u16 = 0x3DA9;
    pub const APRICOT: u16 = 0xF5B6;
    pub const LAVENDER: u16 = 0xD85F;
    pub const MINT: u16 = 0xA7F8;
    pub const BEIGE: u16 = 0xFDD9;
    pub const LIME_BRIGHT: u16 = 0xB9E8;
    pub const CYAN_BRIGHT: u16 = 0x44BE;
    pub const PINK_BRIGHT: u16 = 0xF85A;
    pub const TEAL_BRIGHT: u16 = 0x44D2;
}

/// An ordered table of 16 RGB565 colors, one per storable pixel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette(pub [u16; 16]);

impl Palette {
    /// Map a 4-bit color index to its RGB565 value.
    ///
    /// The index is masked to 4 bits; a nibble read out of the packed
    /// framebuffer can never exceed 15 by construction.
    #[inline]
    pub const fn resolve(&self, index: u8) -> u16 {
        self.0[(index & 0x0F) as usize]
    }
}

/// High-contrast general-purpose palette. Index 0 is black, 1 white,
/// 15 magenta.
pub const DEFAULT: Palette = Palette([
    color::BLACK,
    color::WHITE,
    color::RED,
    color::GREEN,
    color::BLUE,
    color::ORANGE,
    color::YELLOW,
    color::PINK,
    color::PURPLE,
    color::NAVY,
    color::GOLD,
    color::VIOLET,
    color::BROWN,
    color::GREY,
    color::CYAN,
    color::MAGENTA,
]);

/// 16 grey levels from black to white.
pub const GREYSCALE: Palette = Palette([
    0x0000, 0x18C3, 0x2945, 0x39C7, 0x4228, 0x52AA, 0x632C, 0x738E,
    0x7BEF, 0x8C71, 0x9CD3, 0xAD55, 0xBDF7, 0xD69A, 0xE73C, 0xFFFF,
]);

/// Vintage-console look, adapted from <https://androidarts.com/palette/16pal.htm>.
pub const VINTAGE: Palette = Palette([
    0x0000, 0x9CF3, 0xFFFF, 0xB926, 0xE371, 0x49E5, 0xA324, 0xEC46,
    0xF70D, 0x2A49, 0x4443, 0xA664, 0x1926, 0x02B0, 0x351E, 0xB6FD,
]);

/// Pastel palette used by the game's attract mode.
pub const CUSTOM: Palette = Palette([
    color::BLACK,
    color::MINT,
    color::GREEN_BRIGHT,
    color::LAVENDER,
    color::APRICOT,
    color::TEAL,
    color::LIME_BRIGHT,
    color::SKY_BLUE,
    color::BEIGE,
    color::SKY_BLUE,
    color::CYAN,
    0xA324, // vintage orange-brown
    color::PINK_BRIGHT,
    color::CYAN_BRIGHT,
    color::TEAL_BRIGHT,
    color::CYAN_BRIGHT,
]);

/// Selects one of the built-in palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteId {
    #[default]
    Default,
    Greyscale,
    Vintage,
    Custom,
}

impl PaletteId {
    /// The color table this id selects.
    pub const fn table(self) -> &'static Palette {
        match self {
            PaletteId::Default => &DEFAULT,
            PaletteId::Greyscale => &GREYSCALE,
            PaletteId::Vintage => &VINTAGE,
            PaletteId::Custom => &CUSTOM,
        }
    }
}

impl From<u8> for PaletteId {
    /// Unknown values fall back to the default palette.
    fn from(raw: u8) -> Self {
        match raw {
            1 => PaletteId::Greyscale,
            2 => PaletteId::Vintage,
            3 => PaletteId::Custom,
            _ => PaletteId::Default,
        }
    }
}
