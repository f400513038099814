//! # Video & Drawing
//!
//! The display is a 240×240 panel fed over a serial link. RAM is too
//! small for a full 16-bit frame (115 KB), so pixels are stored as
//! 4-bit palette indices, two per byte — 28.8 KB — and unpacked to
//! RGB565 one row at a time during refresh.
//!
//! ## Drawing
//!
//! All primitives go through [`FrameBuffer::set_pixel`], which clips
//! out-of-bounds coordinates and marks the touched row dirty:
//!
//! ```ignore
//! let frame = display.frame();
//! frame.clear();
//! frame.draw_circle(120, 120, 30, 15, true);
//! frame.draw_rect(10, 80, 8, 60, 15, true);
//! frame.print_str("SCORE 42", 8, 8, 1, 2);
//! ```
//!
//! ## Refresh
//!
//! [`Display::refresh`](display::Display::refresh) walks the dirty
//! rows in ascending order. Each row is unpacked through the active
//! palette into one of two staging buffers while the other buffer's
//! transfer is still on the wire, so the CPU and the link overlap.
//! Rows that never changed cost nothing.
//!
//! ## Palettes
//!
//! The framebuffer stores indices, never colors. Swapping the active
//! palette with [`Display::set_palette`](display::Display::set_palette)
//! recolors the whole screen on the next refresh without touching a
//! single stored pixel.

pub mod display;
pub mod font;
pub mod framebuffer;
pub mod palette;
pub mod raster;
pub mod transport;

/// Panel width in pixels.
pub const WIDTH: usize = 240;
/// Panel height in pixels.
pub const HEIGHT: usize = 240;
/// Packed framebuffer size: two pixels per byte.
pub const BUFFER_LEN: usize = WIDTH * HEIGHT / 2;

/// Sprite/font value meaning "leave the destination pixel alone".
pub const TRANSPARENT: u8 = 255;
