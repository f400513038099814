//! The player's paddle.

use playdeck::input::UserInput;
use playdeck::video::framebuffer::FrameBuffer;

use crate::util::Aabb;

pub struct Paddle {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
    /// Pixels moved per frame at full stick throw.
    pub speed: i16,
    prev_y: i16,
    color: u8,
}

impl Paddle {
    pub fn new(x: i16, y: i16, width: i16, height: i16, speed: i16, color: u8) -> Self {
        Self {
            x,
            y,
            width,
            height,
            speed,
            prev_y: y,
            color,
        }
    }

    /// Move with the stick's vertical arc and clamp to the screen.
    /// Any of North/NorthEast/NorthWest moves up; the south arc moves
    /// down; everything else holds position.
    pub fn update(&mut self, input: UserInput, screen: i16) {
        self.y += input.direction.vertical() * self.speed;
        self.y = self.y.clamp(0, screen - self.height);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Erase the previous frame's paddle and draw the current one.
    pub fn draw(&mut self, frame: &mut FrameBuffer) {
        if self.prev_y != self.y {
            frame.draw_rect(
                i32::from(self.x),
                i32::from(self.prev_y),
                i32::from(self.width),
                i32::from(self.height),
                0,
                true,
            );
        }
        frame.draw_rect(
            i32::from(self.x),
            i32::from(self.y),
            i32::from(self.width),
            i32::from(self.height),
            self.color,
            true,
        );
        self.prev_y = self.y;
    }
}
