//! Display link boundary.
//!
//! The panel sits on the far side of a DMA-capable serial link. This
//! crate never touches that hardware directly; the refresh pipeline
//! drives it through [`Transport`], and tests substitute a recording
//! mock. An implementation wraps the real SPI/DMA peripherals (and,
//! on the panel side, column/row address-set and RAM-write commands).

use core::fmt;

/// One display's transfer channel.
///
/// Transfers are *non-blocking*: [`send_block`](Transport::send_block)
/// starts the transfer and returns, and [`is_busy`](Transport::is_busy)
/// reports completion. The refresh pipeline guarantees it never
/// rewrites a staging buffer while a transfer of that buffer may still
/// be in flight, and never starts a new transfer before the previous
/// one has completed.
pub trait Transport {
    /// Restrict subsequent pixel writes to the inclusive rectangle
    /// `(x0, y0)..=(x1, y1)`.
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16);

    /// Start a non-blocking transfer of RGB565 pixels into the current
    /// window. Wire byte order is the implementation's concern.
    fn send_block(&mut self, pixels: &[u16]);

    /// True while a previously started transfer is still in flight.
    fn is_busy(&self) -> bool;

    /// Power the panel on. Optional; defaults to a no-op for
    /// transports without panel control lines.
    fn display_on(&mut self) {}

    /// Power the panel off.
    fn display_off(&mut self) {}

    /// Switch the panel between normal and inverse video.
    fn set_inverted(&mut self, _inverted: bool) {}

    /// Drive the backlight line.
    fn set_backlight(&mut self, _on: bool) {}
}

/// Failure surfaced by a refresh pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshError {
    /// The transport stayed busy past the polling limit. The staging
    /// buffer that was in flight has not been overwritten, and the
    /// row that triggered the wait is still marked dirty.
    TransportTimeout,
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshError::TransportTimeout => f.write_str("display transport stayed busy"),
        }
    }
}

impl core::error::Error for RefreshError {}
