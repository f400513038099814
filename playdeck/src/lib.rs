//! # playdeck
//!
//! Support layer for the playdeck handheld: a 240×240 RGB565 display
//! driven over a DMA-capable serial link, an analog joystick, and a
//! PWM buzzer.
//!
//! The display pipeline is the heart of this crate. Pixels live in a
//! packed 4-bit-per-pixel framebuffer and only resolve to real colors
//! through the active [palette](video::palette) when a row is pushed
//! to the panel. Every pixel write marks its row dirty, and
//! [`Display::refresh`](video::display::Display::refresh) sends only
//! the dirty rows, converting one row while the previous row's
//! transfer is still in flight.
//!
//! ```ignore
//! let mut display = Display::new(transport);
//!
//! loop {
//!     let input = joystick.read_input();
//!     engine.update(input, &mut buzzer);
//!
//!     display.frame().clear();
//!     engine.draw(display.frame());
//!     display.refresh()?;
//! }
//! ```
//!
//! Hardware access goes through three traits, so the crate itself has
//! no target dependency and its logic tests on the host:
//!
//! - [`video::transport::Transport`] — the display link (window
//!   addressing + non-blocking block sends)
//! - [`input::InputSource`] — polled joystick state
//! - [`audio::AudioSink`] — tone on / tone off

#![cfg_attr(not(test), no_std)]

pub mod audio;
pub mod input;
pub mod video;
