//! # Tone Output
//!
//! Games make sound through [`AudioSink`], a single square-wave
//! channel. On hardware this is a PWM pin into a piezo buzzer; tests
//! substitute a recording sink.
//!
//! ```ignore
//! audio.play_tone(notes::A4, 50);
//! // ... some frames later ...
//! audio.stop();
//! ```

/// A one-channel tone generator.
pub trait AudioSink {
    /// Start (or retune) a continuous tone. `volume_percent` is the
    /// duty-cycle-derived loudness, 0 to 100. A frequency of zero or a
    /// volume of zero silences the channel, same as [`stop`].
    ///
    /// [`stop`]: AudioSink::stop
    fn play_tone(&mut self, freq_hz: u32, volume_percent: u8);

    /// Silence the channel.
    fn stop(&mut self);
}

/// Equal-temperament note frequencies in Hz, rounded to the nearest
/// integer, for the octaves a small piezo reproduces well.
pub mod notes {
    pub const C4: u32 = 262;
    pub const CS4: u32 = 277;
    pub const D4: u32 = 294;
    pub const DS4: u32 = 311;
    pub const E4: u32 = 330;
    pub const F4: u32 = 349;
    pub const FS4: u32 = 370;
    pub const G4: u32 = 392;
    pub const GS4: u32 = 415;
    pub const A4: u32 = 440;
    pub const AS4: u32 = 466;
    pub const B4: u32 = 494;

    pub const C5: u32 = 523;
    pub const CS5: u32 = 554;
    pub const D5: u32 = 587;
    pub const DS5: u32 = 622;
    pub const E5: u32 = 659;
    pub const F5: u32 = 698;
    pub const FS5: u32 = 740;
    pub const G5: u32 = 784;
    pub const GS5: u32 = 831;
    pub const A5: u32 = 880;
    pub const AS5: u32 = 932;
    pub const B5: u32 = 988;

    pub const C6: u32 = 1047;
    pub const D6: u32 = 1175;
    pub const E6: u32 = 1319;
    pub const F6: u32 = 1397;
    pub const G6: u32 = 1568;
    pub const A6: u32 = 1760;
    pub const B6: u32 = 1976;
}
