//! # Packed Framebuffer
//!
//! One byte holds two pixels: the even-x pixel in the low nibble, the
//! odd-x pixel in the high nibble. The linear pixel index is
//! `y * WIDTH + x` for both reads and writes.
//!
//! Every in-bounds write also marks its row in the [`DirtyRows`]
//! bitmap; the refresh pipeline clears a row's flag once that row has
//! been handed to the transport. Writes outside the panel are silently
//! dropped before any state is touched.

use bit_field::BitField;

use crate::video::{BUFFER_LEN, HEIGHT, WIDTH};

const DIRTY_WORDS: usize = HEIGHT.div_ceil(32);
// Bits for rows HEIGHT.. in the last word stay zero.
const LAST_WORD_MASK: u32 = if HEIGHT % 32 == 0 {
    u32::MAX
} else {
    (1u32 << (HEIGHT % 32)) - 1
};

/// Per-row "changed since last refresh" flags, one bit per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRows {
    words: [u32; DIRTY_WORDS],
}

impl DirtyRows {
    /// All rows flagged. A fresh framebuffer starts here so the first
    /// refresh paints the whole panel.
    pub const fn all_set() -> Self {
        let mut words = [u32::MAX; DIRTY_WORDS];
        words[DIRTY_WORDS - 1] = LAST_WORD_MASK;
        Self { words }
    }

    /// No rows flagged.
    pub const fn all_clear() -> Self {
        Self {
            words: [0; DIRTY_WORDS],
        }
    }

    /// Flag one row as changed.
    #[inline]
    pub fn mark(&mut self, row: usize) {
        if row < HEIGHT {
            self.words[row / 32].set_bit(row % 32, true);
        }
    }

    /// Flag every row as changed.
    #[inline]
    pub fn mark_all(&mut self) {
        *self = Self::all_set();
    }

    /// Unflag one row. Called by the refresh pipeline after the row's
    /// data has been handed to the transport.
    #[inline]
    pub fn clear(&mut self, row: usize) {
        if row < HEIGHT {
            self.words[row / 32].set_bit(row % 32, false);
        }
    }

    #[inline]
    pub fn is_dirty(&self, row: usize) -> bool {
        row < HEIGHT && self.words[row / 32].get_bit(row % 32)
    }

    /// True if at least one row is flagged.
    pub fn any(&self) -> bool {
        self.words.iter().any(|w| *w != 0)
    }
}

/// The packed 4-bit-per-pixel image buffer plus its dirty-row flags.
///
/// Stores palette *indices*, never colors — the active palette turns
/// indices into RGB565 only when a row is unpacked for transfer.
pub struct FrameBuffer {
    pixels: [u8; BUFFER_LEN],
    dirty: DirtyRows,
}

impl FrameBuffer {
    /// A black framebuffer with every row marked dirty.
    pub const fn new() -> Self {
        Self {
            pixels: [0; BUFFER_LEN],
            dirty: DirtyRows::all_set(),
        }
    }

    /// Write a 4-bit color index at `(x, y)`.
    ///
    /// Out-of-bounds coordinates are ignored; nothing is written and
    /// no row is marked. The index is masked to 4 bits.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        self.dirty.mark(y);

        let byte = &mut self.pixels[(y * WIDTH + x) >> 1];
        if x & 1 == 1 {
            *byte = ((color & 0x0F) << 4) | (*byte & 0x0F);
        } else {
            *byte = (color & 0x0F) | (*byte & 0xF0);
        }
    }

    /// Read back the color index at `(x, y)`. Out of bounds reads 0.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return 0;
        }
        let (x, y) = (x as usize, y as usize);
        let byte = self.pixels[(y * WIDTH + x) >> 1];
        if x & 1 == 1 { byte >> 4 } else { byte & 0x0F }
    }

    /// Set every pixel to the same color index and mark all rows.
    ///
    /// Writes whole bytes (two pixels at a time) through a bulk fill,
    /// so this is far cheaper than 57,600 `set_pixel` calls.
    pub fn fill(&mut self, color: u8) {
        let twice = (color & 0x0F) * 0x11;
        self.pixels.fill(twice);
        self.dirty.mark_all();
    }

    /// `fill(0)` — color index 0 is black in every built-in palette.
    pub fn clear(&mut self) {
        self.fill(0);
    }

    /// Fill the packed buffer from a byte source and mark all rows.
    /// Test-pattern helper; each byte covers two pixels.
    pub fn fill_with<F: FnMut() -> u8>(&mut self, mut next: F) {
        for byte in &mut self.pixels {
            *byte = next();
        }
        self.dirty.mark_all();
    }

    /// The packed bytes of one row (`WIDTH / 2` of them).
    #[inline]
    pub(crate) fn packed_row(&self, y: usize) -> &[u8] {
        let start = y * WIDTH / 2;
        &self.pixels[start..start + WIDTH / 2]
    }

    pub fn dirty(&self) -> &DirtyRows {
        &self.dirty
    }

    pub(crate) fn dirty_mut(&mut self) -> &mut DirtyRows {
        &mut self.dirty
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
