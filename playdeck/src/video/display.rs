//! # Display & Row Refresh Pipeline
//!
//! [`Display`] owns the packed framebuffer, the active palette, the
//! transport, and two row-sized staging buffers. [`Display::refresh`]
//! pushes only the dirty rows to the panel:
//!
//! ```ignore
//! display.frame().draw_circle(cx, cy, r, 15, true);
//! display.refresh()?;   // sends just the rows the circle touched
//! ```
//!
//! Each dirty row is unpacked through the palette into whichever
//! staging buffer is free while the other buffer's transfer is still
//! on the wire. The only wait is the bounded poll before handing the
//! link its next block, so row conversion and row transfer overlap and
//! clean rows cost nothing.

use bitflags::bitflags;

use crate::video::{
    HEIGHT, WIDTH,
    framebuffer::FrameBuffer,
    palette::{Palette, PaletteId},
    transport::{RefreshError, Transport},
};

/// Poll attempts before a busy transport is declared stuck. A full row
/// is 480 bytes; at any plausible link clock this bound is orders of
/// magnitude past the worst-case transfer time.
const BUSY_POLL_LIMIT: u32 = 1_000_000;

bitflags! {
    /// Shadow of the panel's write-only state. The link carries
    /// commands one way, so the current mode is tracked here — the
    /// same shadow-register scheme the console uses for its other
    /// write-only control lines.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct PanelFlags: u8 {
        /// Panel is powered and displaying.
        const POWERED   = 0b0000_0001;
        /// Backlight line is high.
        const BACKLIGHT = 0b0000_0010;
        /// Inverse-video mode is active.
        const INVERTED  = 0b0000_0100;
    }
}

/// One physical display: framebuffer, palette, staging buffers, link.
///
/// The staging buffers are exclusively owned here and never exposed;
/// the rasterizer and the game only ever see the [`FrameBuffer`].
pub struct Display<T: Transport> {
    transport: T,
    frame: FrameBuffer,
    palette_id: PaletteId,
    staging: [[u16; WIDTH]; 2],
    /// Staging slot the next transfer will use.
    slot: usize,
    flags: PanelFlags,
}

impl<T: Transport> Display<T> {
    /// A black, fully-dirty display. The first refresh paints every
    /// row.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            frame: FrameBuffer::new(),
            palette_id: PaletteId::Default,
            staging: [[0; WIDTH]; 2],
            slot: 0,
            flags: PanelFlags::empty(),
        }
    }

    /// The drawing surface. All rasterizer primitives live on the
    /// returned [`FrameBuffer`].
    #[inline]
    pub fn frame(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    /// Read-only view of the drawing surface.
    #[inline]
    pub fn frame_ref(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Swap the active palette and mark every row dirty — stored
    /// indices keep their values but now resolve to different colors,
    /// so the whole panel must be resent.
    pub fn set_palette(&mut self, id: PaletteId) {
        self.palette_id = id;
        self.frame.dirty_mut().mark_all();
    }

    pub fn palette_id(&self) -> PaletteId {
        self.palette_id
    }

    pub fn palette(&self) -> &'static Palette {
        self.palette_id.table()
    }

    pub fn panel_flags(&self) -> PanelFlags {
        self.flags
    }

    /// Power the panel and backlight on.
    pub fn turn_on(&mut self) {
        self.transport.display_on();
        self.transport.set_backlight(true);
        self.flags.insert(PanelFlags::POWERED | PanelFlags::BACKLIGHT);
    }

    /// Power the panel and backlight off. Buffer contents and dirty
    /// flags are untouched.
    pub fn turn_off(&mut self) {
        self.transport.set_backlight(false);
        self.transport.display_off();
        self.flags.remove(PanelFlags::POWERED | PanelFlags::BACKLIGHT);
    }

    /// Normal video mode.
    pub fn normal_mode(&mut self) {
        self.transport.set_inverted(false);
        self.flags.remove(PanelFlags::INVERTED);
    }

    /// Inverse video mode.
    pub fn inverse_mode(&mut self) {
        self.transport.set_inverted(true);
        self.flags.insert(PanelFlags::INVERTED);
    }

    /// Send every dirty row to the panel, in ascending row order, then
    /// clear its flag. Rows that were never written are skipped
    /// entirely.
    ///
    /// While row N's transfer is in flight, row N+1 is already being
    /// unpacked into the other staging buffer; the bounded poll before
    /// each transfer is the pipeline's only suspension point. A poll
    /// overrun aborts the pass with the in-flight buffer intact and
    /// the unsent rows still dirty.
    pub fn refresh(&mut self) -> Result<(), RefreshError> {
        let palette = self.palette_id.table();

        for y in 0..HEIGHT {
            if !self.frame.dirty().is_dirty(y) {
                continue;
            }

            // Unpack into the free slot; the other slot may still be
            // in flight. Even pixel first (low nibble), then odd.
            let packed = self.frame.packed_row(y);
            let staging = &mut self.staging[self.slot];
            for (i, &pair) in packed.iter().enumerate() {
                staging[2 * i] = palette.resolve(pair & 0x0F);
                staging[2 * i + 1] = palette.resolve(pair >> 4);
            }

            // The previous transfer owns the other slot; it must have
            // left the wire before the link takes a new block.
            self.wait_idle()?;
            self.transport
                .set_window(0, y as u16, (WIDTH - 1) as u16, y as u16);
            self.transport.send_block(&self.staging[self.slot]);

            self.frame.dirty_mut().clear(y);
            self.slot ^= 1;
        }

        Ok(())
    }

    fn wait_idle(&mut self) -> Result<(), RefreshError> {
        let mut polls = 0u32;
        while self.transport.is_busy() {
            polls += 1;
            if polls >= BUSY_POLL_LIMIT {
                return Err(RefreshError::TransportTimeout);
            }
        }
        Ok(())
    }

    /// Tear down the display and hand the transport back.
    pub fn release(self) -> T {
        self.transport
    }

    #[cfg(test)]
    fn next_slot(&self) -> usize {
        self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::palette;
    use core::cell::Cell;

    /// Records windows and blocks; optionally reports busy for a fixed
    /// number of polls after each send, or forever.
    #[derive(Default)]
    struct MockTransport {
        windows: Vec<(u16, u16, u16, u16)>,
        blocks: Vec<Vec<u16>>,
        busy_polls_after_send: u32,
        remaining_busy: Cell<u32>,
        stuck: bool,
        power_events: Vec<&'static str>,
    }

    impl Transport for MockTransport {
        fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) {
            self.windows.push((x0, y0, x1, y1));
        }

        fn send_block(&mut self, pixels: &[u16]) {
            self.blocks.push(pixels.to_vec());
            self.remaining_busy.set(self.busy_polls_after_send);
        }

        fn is_busy(&self) -> bool {
            if self.stuck {
                return true;
            }
            let left = self.remaining_busy.get();
            if left > 0 {
                self.remaining_busy.set(left - 1);
                return true;
            }
            false
        }

        fn display_on(&mut self) {
            self.power_events.push("on");
        }

        fn display_off(&mut self) {
            self.power_events.push("off");
        }
    }

    fn settled(mut display: Display<MockTransport>) -> Display<MockTransport> {
        // Flush the initial all-dirty state and discard its traffic.
        display.refresh().unwrap();
        display.transport.windows.clear();
        display.transport.blocks.clear();
        display
    }

    #[test]
    fn full_fill_sends_every_row_once() {
        let mut display = settled(Display::new(MockTransport::default()));
        display.frame().fill(3);
        display.refresh().unwrap();

        let expected = palette::DEFAULT.resolve(3);
        assert_eq!(display.transport.blocks.len(), HEIGHT);
        for (y, block) in display.transport.blocks.iter().enumerate() {
            assert_eq!(block.len(), WIDTH);
            assert!(block.iter().all(|&px| px == expected), "row {y}");
        }
        // One single-row window per row, ascending.
        for (y, &window) in display.transport.windows.iter().enumerate() {
            assert_eq!(window, (0, y as u16, (WIDTH - 1) as u16, y as u16));
        }
        for row in 0..HEIGHT {
            assert!(!display.frame_ref().dirty().is_dirty(row));
        }
    }

    #[test]
    fn clean_frame_sends_nothing() {
        let mut display = settled(Display::new(MockTransport::default()));
        display.refresh().unwrap();
        assert!(display.transport.blocks.is_empty());
        assert!(display.transport.windows.is_empty());
    }

    #[test]
    fn only_touched_rows_are_sent() {
        let mut display = settled(Display::new(MockTransport::default()));
        display.frame().set_pixel(5, 42, 9);
        display.frame().set_pixel(0, 199, 1);
        display.refresh().unwrap();

        assert_eq!(display.transport.blocks.len(), 2);
        assert_eq!(display.transport.windows[0].1, 42);
        assert_eq!(display.transport.windows[1].1, 199);

        let row42 = &display.transport.blocks[0];
        assert_eq!(row42[5], palette::DEFAULT.resolve(9));
        assert_eq!(row42[4], palette::DEFAULT.resolve(0));
    }

    #[test]
    fn unpack_order_is_even_pixel_first() {
        let mut display = settled(Display::new(MockTransport::default()));
        display.frame().set_pixel(0, 0, 5);
        display.frame().set_pixel(1, 0, 9);
        display.refresh().unwrap();

        let row = &display.transport.blocks[0];
        assert_eq!(row[0], palette::DEFAULT.resolve(5));
        assert_eq!(row[1], palette::DEFAULT.resolve(9));
    }

    #[test]
    fn palette_switch_resends_everything_with_new_colors() {
        let mut display = settled(Display::new(MockTransport::default()));
        display.frame().fill(1);
        display.refresh().unwrap();
        display.transport.blocks.clear();

        display.set_palette(PaletteId::Greyscale);
        // Stored indices are untouched by the switch.
        assert_eq!(display.frame_ref().get_pixel(17, 3), 1);

        display.refresh().unwrap();
        assert_eq!(display.transport.blocks.len(), HEIGHT);
        let expected = palette::GREYSCALE.resolve(1);
        assert_ne!(expected, palette::DEFAULT.resolve(1));
        assert!(display.transport.blocks[0].iter().all(|&px| px == expected));
    }

    #[test]
    fn staging_slots_alternate_per_transfer() {
        let mut display = settled(Display::new(MockTransport::default()));
        assert_eq!(display.next_slot(), HEIGHT % 2);

        let before = display.next_slot();
        display.frame().set_pixel(0, 10, 1);
        display.frame().set_pixel(0, 11, 1);
        display.frame().set_pixel(0, 12, 1);
        display.refresh().unwrap();
        assert_eq!(display.next_slot(), (before + 3) % 2);
    }

    #[test]
    fn transient_busy_is_polled_through() {
        let mut transport = MockTransport::default();
        transport.busy_polls_after_send = 3;
        let mut display = settled(Display::new(transport));

        display.frame().fill(2);
        display.refresh().unwrap();
        assert_eq!(display.transport.blocks.len(), HEIGHT);
    }

    #[test]
    fn stuck_transport_times_out_and_keeps_rows_dirty() {
        let mut transport = MockTransport::default();
        transport.stuck = true;
        let mut display = Display::new(transport);

        assert_eq!(display.refresh(), Err(RefreshError::TransportTimeout));
        // Nothing was sent and the pass can be retried.
        assert!(display.transport.blocks.is_empty());
        assert!(display.frame_ref().dirty().is_dirty(0));
    }

    #[test]
    fn power_and_video_mode_track_shadow_flags() {
        let mut display = Display::new(MockTransport::default());
        assert_eq!(display.panel_flags(), PanelFlags::empty());

        display.turn_on();
        assert!(display.panel_flags().contains(PanelFlags::POWERED | PanelFlags::BACKLIGHT));

        display.inverse_mode();
        assert!(display.panel_flags().contains(PanelFlags::INVERTED));
        display.normal_mode();
        assert!(!display.panel_flags().contains(PanelFlags::INVERTED));

        display.turn_off();
        assert_eq!(display.transport.power_events, vec!["on", "off"]);
    }
}
