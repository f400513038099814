//! The ball: square collision box, round pixels.

use playdeck::video::framebuffer::FrameBuffer;

use crate::util::Aabb;

/// Serve speed along each axis for a 45° launch: the scalar speed
/// times cos(45°).
pub const DIAGONAL: f32 = 0.707;

pub struct Ball {
    pub x: i16,
    pub y: i16,
    pub size: i16,
    pub vx: f32,
    pub vy: f32,
    prev_x: i16,
    prev_y: i16,
    color: u8,
}

impl Ball {
    /// A ball centred on screen, launched diagonally toward the
    /// top-left at `speed` pixels per frame.
    pub fn new(screen: i16, size: i16, speed: f32, color: u8) -> Self {
        let centre = (screen - size) / 2;
        Self {
            x: centre,
            y: centre,
            size,
            vx: -speed * DIAGONAL,
            vy: -speed * DIAGONAL,
            prev_x: centre,
            prev_y: centre,
            color,
        }
    }

    /// Advance one frame. Velocity is fractional; position truncates
    /// toward zero, so sub-pixel speeds accumulate nothing.
    pub fn update(&mut self) {
        self.x += self.vx as i16;
        self.y += self.vy as i16;
    }

    /// Re-centre after a lost point and launch at `speed`, offset
    /// vertically by `offset` pixels so serves are not identical.
    pub fn serve(&mut self, screen: i16, speed: f32, offset: i16) {
        let centre = (screen - self.size) / 2;
        self.x = centre;
        self.y = centre + offset;
        self.vx = -speed * DIAGONAL;
        self.vy = -speed * DIAGONAL;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            width: self.size,
            height: self.size,
        }
    }

    /// Erase the previous frame's ball and draw the current one.
    pub fn draw(&mut self, frame: &mut FrameBuffer) {
        let r = i32::from(self.size) / 2;
        if self.prev_x != self.x || self.prev_y != self.y {
            frame.draw_circle(
                i32::from(self.prev_x) + r,
                i32::from(self.prev_y) + r,
                r,
                0,
                true,
            );
        }
        frame.draw_circle(i32::from(self.x) + r, i32::from(self.y) + r, r, self.color, true);
        self.prev_x = self.x;
        self.prev_y = self.y;
    }
}
