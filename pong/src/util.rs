//! Collision rectangles and a tiny deterministic RNG.

/// Axis-aligned bounding box in screen coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Aabb {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
}

impl Aabb {
    /// True when the interiors overlap. Boxes that merely share an
    /// edge do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// xorshift32. Not remotely cryptographic; plenty for serve angles.
pub struct Rng {
    state: u32,
}

impl Rng {
    pub fn new(seed: u32) -> Self {
        // xorshift has a fixed point at zero.
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform-ish draw from `0..max`. `max` of zero yields zero.
    pub fn below(&mut self, max: u16) -> u16 {
        if max == 0 {
            return 0;
        }
        (self.next() % u32::from(max)) as u16
    }
}
