//! # Rasterizer
//!
//! Shape, sprite, and text primitives for the packed framebuffer.
//! Everything funnels through [`FrameBuffer::set_pixel`], so every
//! primitive clips at the panel edge and participates in dirty-row
//! tracking for free.

use bit_field::BitField;

use crate::video::{HEIGHT, TRANSPARENT, WIDTH, font, framebuffer::FrameBuffer};

impl FrameBuffer {
    /// Draw a straight line between two points.
    ///
    /// Steps along the axis with the greater span and interpolates the
    /// other, so every unit step lands exactly one pixel and steep
    /// lines have no gaps. Endpoint order does not matter. Coincident
    /// endpoints draw a single pixel.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u8) {
        let dx = x1 - x0;
        let dy = y1 - y0;

        if dx == 0 && dy == 0 {
            self.set_pixel(x0, y0, color);
            return;
        }

        if dx.abs() >= dy.abs() {
            // Normalize to left-to-right so both endpoint orders
            // interpolate identically.
            let ((xa, ya), (xb, yb)) = if x0 <= x1 {
                ((x0, y0), (x1, y1))
            } else {
                ((x1, y1), (x0, y0))
            };
            let (dx, dy) = (xb - xa, yb - ya);
            for x in xa..=xb {
                self.set_pixel(x, ya + dy * (x - xa) / dx, color);
            }
        } else {
            let ((xa, ya), (xb, yb)) = if y0 <= y1 {
                ((x0, y0), (x1, y1))
            } else {
                ((x1, y1), (x0, y0))
            };
            let (dx, dy) = (xb - xa, yb - ya);
            for y in ya..=yb {
                self.set_pixel(xa + dx * (y - ya) / dy, y, color);
            }
        }
    }

    /// Draw a circle with the midpoint algorithm.
    ///
    /// One octant is generated from the decision-variable recurrence
    /// and mirrored eight ways. `fill` connects the mirrored point
    /// pairs with horizontal spans instead of plotting them, so the
    /// filled disk and the outline agree for any radius. Radius 0 is a
    /// single pixel, negative radii draw nothing.
    pub fn draw_circle(&mut self, x0: i32, y0: i32, radius: i32, color: u8, fill: bool) {
        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - x;

        while x >= y {
            if fill {
                self.draw_line(x0 + x, y0 + y, x0 - x, y0 + y, color);
                self.draw_line(x0 + y, y0 + x, x0 - y, y0 + x, color);
                self.draw_line(x0 + y, y0 - x, x0 - y, y0 - x, color);
                self.draw_line(x0 + x, y0 - y, x0 - x, y0 - y, color);
            } else {
                self.set_pixel(x0 + x, y0 + y, color);
                self.set_pixel(x0 - x, y0 + y, color);
                self.set_pixel(x0 + y, y0 + x, color);
                self.set_pixel(x0 - y, y0 + x, color);
                self.set_pixel(x0 - y, y0 - x, color);
                self.set_pixel(x0 + y, y0 - x, color);
                self.set_pixel(x0 + x, y0 - y, color);
                self.set_pixel(x0 - x, y0 - y, color);
            }

            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Draw a rectangle from its top-left corner. `fill` draws one
    /// horizontal span per row, otherwise the four edges. Zero or
    /// negative dimensions draw nothing.
    pub fn draw_rect(&mut self, x0: i32, y0: i32, width: i32, height: i32, color: u8, fill: bool) {
        if width <= 0 || height <= 0 {
            return;
        }
        let x1 = x0 + width - 1;
        let y1 = y0 + height - 1;

        if fill {
            for y in y0..=y1 {
                self.draw_line(x0, y, x1, y, color);
            }
        } else {
            self.draw_line(x0, y0, x1, y0, color);
            self.draw_line(x0, y1, x1, y1, color);
            self.draw_line(x0, y0, x0, y1, color);
            self.draw_line(x1, y0, x1, y1, color);
        }
    }

    /// Blit a row-major sprite of color indices, `cols` pixels wide.
    /// [`TRANSPARENT`] (255) entries leave the destination untouched.
    pub fn draw_sprite(&mut self, x0: i32, y0: i32, cols: usize, data: &[u8]) {
        self.blit(x0, y0, cols, data, None, 1);
    }

    /// [`draw_sprite`](Self::draw_sprite) with each source pixel
    /// replicated into a `scale`×`scale` block. Scale 0 draws nothing.
    pub fn draw_sprite_scaled(&mut self, x0: i32, y0: i32, cols: usize, data: &[u8], scale: u8) {
        self.blit(x0, y0, cols, data, None, scale);
    }

    /// Blit every non-transparent sprite pixel in a single override
    /// color, ignoring the stored values. Used to recolor a sprite.
    pub fn draw_sprite_tinted(&mut self, x0: i32, y0: i32, cols: usize, data: &[u8], color: u8) {
        self.blit(x0, y0, cols, data, Some(color), 1);
    }

    /// Tinted and scaled blit; see
    /// [`draw_sprite_tinted`](Self::draw_sprite_tinted).
    pub fn draw_sprite_tinted_scaled(
        &mut self,
        x0: i32,
        y0: i32,
        cols: usize,
        data: &[u8],
        color: u8,
        scale: u8,
    ) {
        self.blit(x0, y0, cols, data, Some(color), scale);
    }

    fn blit(&mut self, x0: i32, y0: i32, cols: usize, data: &[u8], tint: Option<u8>, scale: u8) {
        if scale == 0 || cols == 0 {
            return;
        }
        let scale = i32::from(scale);
        for (row, line) in data.chunks_exact(cols).enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value == TRANSPARENT {
                    continue;
                }
                let color = tint.unwrap_or(value);
                let bx = x0 + col as i32 * scale;
                let by = y0 + row as i32 * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        self.set_pixel(bx + dx, by + dy, color);
                    }
                }
            }
        }
    }

    /// Draw one character of the built-in 5×7 font at native size.
    pub fn print_char(&mut self, c: char, x: i32, y: i32, color: u8) {
        self.draw_glyph(c, x, y, color, 1);
    }

    /// Draw a string of 5×7 glyphs, `size` being an integer scale
    /// factor. Rendering stops at the right edge of the panel; text
    /// never wraps. Size 0 draws nothing.
    pub fn print_str(&mut self, text: &str, x: i32, y: i32, color: u8, size: u8) {
        if size == 0 {
            return;
        }
        for (n, c) in text.chars().enumerate() {
            let advance = (n * font::GLYPH_ADVANCE) as i32 * i32::from(size);
            if !self.draw_glyph(c, x + advance, y, color, size) {
                break;
            }
        }
    }

    /// Returns false once a column falls past the right edge, so the
    /// caller can stop feeding characters.
    fn draw_glyph(&mut self, c: char, x: i32, y: i32, color: u8, size: u8) -> bool {
        let size = i32::from(size);
        for (i, &column) in font::glyph(c).iter().enumerate() {
            let px = x + i as i32 * size;
            if px >= WIDTH as i32 {
                return false;
            }
            for j in 0..font::GLYPH_HEIGHT {
                if column.get_bit(j) {
                    let py = y + j as i32 * size;
                    for dy in 0..size {
                        for dx in 0..size {
                            self.set_pixel(px + dx, py + dy, color);
                        }
                    }
                }
            }
        }
        true
    }

    /// Plot a trace of values normalised to `0.0..=1.0`, one column
    /// per element, across the panel width. 0.0 is the bottom edge.
    pub fn plot_array(&mut self, values: &[f32], color: u8) {
        for (x, &v) in values.iter().take(WIDTH).enumerate() {
            let y = HEIGHT as i32 - (v * HEIGHT as f32) as i32;
            self.set_pixel(x as i32, y, color);
        }
    }
}
