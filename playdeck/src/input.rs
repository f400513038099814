//! # Player Input
//!
//! A single analog stick reduced to a nine-way [`Direction`] plus a
//! deflection magnitude. The engine never reads hardware itself; each
//! frame the host samples its ADC (or keyboard, in a simulator) and
//! hands the game an [`InputSource`]:
//!
//! ```ignore
//! let input = stick.sample();
//! match input.direction {
//!     Direction::North | Direction::NorthEast | Direction::NorthWest => paddle.up(),
//!     _ => {}
//! }
//! ```

/// Nine-way stick position. Diagonals are distinct so a game can
/// treat, say, `NorthEast` as both "up" and "right".
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Stick at rest (inside the dead zone).
    #[default]
    Centre,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Vertical component: -1 for the north arc, 1 for the south arc,
    /// 0 otherwise. Screen coordinates, so north is negative y.
    pub fn vertical(self) -> i16 {
        match self {
            Direction::North | Direction::NorthEast | Direction::NorthWest => -1,
            Direction::South | Direction::SouthEast | Direction::SouthWest => 1,
            _ => 0,
        }
    }

    /// Horizontal component: -1 for the west arc, 1 for the east arc.
    pub fn horizontal(self) -> i16 {
        match self {
            Direction::West | Direction::NorthWest | Direction::SouthWest => -1,
            Direction::East | Direction::NorthEast | Direction::SouthEast => 1,
            _ => 0,
        }
    }
}

/// One frame's stick sample.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct UserInput {
    pub direction: Direction,
    /// Deflection from centre, 0.0 at rest to 1.0 at full throw.
    pub magnitude: f32,
}

impl UserInput {
    /// A sample with the stick at rest.
    pub const fn idle() -> Self {
        Self {
            direction: Direction::Centre,
            magnitude: 0.0,
        }
    }
}

/// Where frames get their input. Implemented over the host's ADC
/// channels on hardware, or a scripted sequence in tests.
pub trait InputSource {
    /// The stick state for the current frame.
    fn sample(&mut self) -> UserInput;
}
