//! # Pong
//!
//! A one-player Pong against the left wall's mirror image: the paddle
//! guards the left edge, the other three edges return the ball, and a
//! ball escaping past the paddle costs a life.
//!
//! The engine is host-agnostic. Each frame the host samples input,
//! steps the engine, draws, and refreshes:
//!
//! ```ignore
//! let mut game = PongEngine::new(seed);
//! loop {
//!     let lives = game.update(stick.sample(), &mut buzzer);
//!     game.draw(display.frame());
//!     display.refresh()?;
//!     if lives == 0 { break; }
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod ball;
pub mod paddle;
pub mod util;

use playdeck::audio::AudioSink;
use playdeck::input::UserInput;
use playdeck::video::framebuffer::FrameBuffer;

use crate::ball::Ball;
use crate::paddle::Paddle;
use crate::util::Rng;

const SCREEN: i16 = playdeck::video::WIDTH as i16;

const PADDLE_X: i16 = 6;
const PADDLE_WIDTH: i16 = 6;
const PADDLE_HEIGHT: i16 = 40;
const PADDLE_SPEED: i16 = 6;

const BALL_SIZE: i16 = 8;
const SERVE_SPEED: f32 = 8.0;
/// Serves land up to this many pixels off centre, either way.
const SERVE_OFFSET: u16 = 20;

const STARTING_LIVES: u8 = 4;

const WALL_TONE_HZ: u32 = 1200;
const PADDLE_TONE_HZ: u32 = 800;
const BEEP_VOLUME: u8 = 50;
/// Beeps self-silence after this many engine steps (about 40 ms at
/// 50 fps).
const BEEP_FRAMES: u8 = 2;

/// Foreground palette index for all game objects and text.
const INK: u8 = 15;

pub struct PongEngine {
    ball: Ball,
    paddle: Paddle,
    rng: Rng,
    lives: u8,
    score: u16,
    beep_frames: u8,
    drawn_score: Option<u16>,
    drawn_lives: Option<u8>,
}

impl PongEngine {
    /// A fresh game. The seed only varies serve placement, so any
    /// value (a frame counter at button press, an ADC read) will do.
    pub fn new(seed: u32) -> Self {
        Self {
            ball: Ball::new(SCREEN, BALL_SIZE, SERVE_SPEED, INK),
            paddle: Paddle::new(
                PADDLE_X,
                (SCREEN - PADDLE_HEIGHT) / 2,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
                PADDLE_SPEED,
                INK,
            ),
            rng: Rng::new(seed),
            lives: STARTING_LIVES,
            score: 0,
            beep_frames: 0,
            drawn_score: None,
            drawn_lives: None,
        }
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn score(&self) -> u16 {
        self.score
    }

    /// Step one frame: move the paddle and ball, resolve collisions,
    /// and manage the beep channel. Returns the lives remaining; once
    /// it hits zero the game freezes and further steps do nothing.
    pub fn update<A: AudioSink>(&mut self, input: UserInput, audio: &mut A) -> u8 {
        if self.lives == 0 {
            return 0;
        }

        self.paddle.update(input, SCREEN);
        self.ball.update();

        // The three reflecting edges. Repositioning off the edge keeps
        // a fast ball from re-triggering the same bounce next frame.
        if self.ball.y <= 0 {
            self.ball.y = 2;
            self.ball.vy = -self.ball.vy;
            self.beep(audio, WALL_TONE_HZ);
        } else if self.ball.y + self.ball.size >= SCREEN {
            self.ball.y = SCREEN - self.ball.size - 2;
            self.ball.vy = -self.ball.vy;
            self.beep(audio, WALL_TONE_HZ);
        }
        if self.ball.x + self.ball.size >= SCREEN {
            self.ball.x = SCREEN - self.ball.size - 2;
            self.ball.vx = -self.ball.vx;
            self.beep(audio, WALL_TONE_HZ);
        }

        // Paddle return. Only an incoming ball counts, so a ball
        // passing through the paddle's row on the way out is ignored.
        if self.ball.vx < 0.0 && self.ball.aabb().overlaps(&self.paddle.aabb()) {
            self.ball.x = self.paddle.x + self.paddle.width;
            self.ball.vx = -self.ball.vx;
            self.score += 1;
            self.beep(audio, PADDLE_TONE_HZ);
        }

        // Past the left edge: point lost.
        if self.ball.x < 0 {
            self.lives -= 1;
            if self.lives == 0 {
                audio.stop();
                self.beep_frames = 0;
                return 0;
            }
            let offset = self.rng.below(2 * SERVE_OFFSET + 1) as i16 - SERVE_OFFSET as i16;
            self.ball.serve(SCREEN, SERVE_SPEED, offset);
        }

        if self.beep_frames > 0 {
            self.beep_frames -= 1;
            if self.beep_frames == 0 {
                audio.stop();
            }
        }

        self.lives
    }

    fn beep<A: AudioSink>(&mut self, audio: &mut A, freq_hz: u32) {
        audio.play_tone(freq_hz, BEEP_VOLUME);
        self.beep_frames = BEEP_FRAMES;
    }

    /// Draw the frame's changes: moved objects erase their previous
    /// position, and the score and lives readouts repaint only when
    /// their values change.
    pub fn draw(&mut self, frame: &mut FrameBuffer) {
        self.paddle.draw(frame);
        self.ball.draw(frame);

        if self.drawn_score != Some(self.score) {
            let mut digits = [0u8; 5];
            frame.draw_rect(SCORE_X, HUD_Y, 5 * 12, 8, 0, true);
            frame.print_str(fmt_u16(self.score, &mut digits), SCORE_X, HUD_Y, INK, 1);
            self.drawn_score = Some(self.score);
        }
        if self.drawn_lives != Some(self.lives) {
            let mut digits = [0u8; 5];
            frame.draw_rect(LIVES_X, HUD_Y, 12, 8, 0, true);
            frame.print_str(fmt_u16(u16::from(self.lives), &mut digits), LIVES_X, HUD_Y, INK, 1);
            self.drawn_lives = Some(self.lives);
        }
    }
}

const HUD_Y: i32 = 4;
const LIVES_X: i32 = 4;
const SCORE_X: i32 = 180;

/// Render a number into `buf` without allocating.
fn fmt_u16(mut value: u16, buf: &mut [u8; 5]) -> &str {
    let mut at = buf.len();
    loop {
        at -= 1;
        buf[at] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    // Only ASCII digits were written.
    core::str::from_utf8(&buf[at..]).unwrap_or("0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use playdeck::input::{Direction, UserInput};

    #[derive(Default)]
    struct RecordingSink {
        tones: Vec<(u32, u8)>,
        stops: usize,
        playing: bool,
    }

    impl AudioSink for RecordingSink {
        fn play_tone(&mut self, freq_hz: u32, volume_percent: u8) {
            if freq_hz == 0 || volume_percent == 0 {
                self.stop();
                return;
            }
            self.tones.push((freq_hz, volume_percent));
            self.playing = true;
        }

        fn stop(&mut self) {
            self.stops += 1;
            self.playing = false;
        }
    }

    fn idle() -> UserInput {
        UserInput::idle()
    }

    fn up() -> UserInput {
        UserInput {
            direction: Direction::North,
            magnitude: 1.0,
        }
    }

    #[test]
    fn ball_moves_every_frame() {
        let mut game = PongEngine::new(7);
        let mut audio = RecordingSink::default();
        let (x0, y0) = (game.ball.x, game.ball.y);
        game.update(idle(), &mut audio);
        assert_ne!((game.ball.x, game.ball.y), (x0, y0));
    }

    #[test]
    fn top_wall_reflects_and_beeps() {
        let mut game = PongEngine::new(7);
        let mut audio = RecordingSink::default();
        game.ball.x = 120;
        game.ball.y = 3;
        game.ball.vx = 4.0;
        game.ball.vy = -5.0;

        game.update(idle(), &mut audio);
        assert_eq!(game.ball.y, 2);
        assert!(game.ball.vy > 0.0);
        assert_eq!(audio.tones, vec![(WALL_TONE_HZ, BEEP_VOLUME)]);
    }

    #[test]
    fn right_wall_reflects_toward_the_paddle() {
        let mut game = PongEngine::new(7);
        let mut audio = RecordingSink::default();
        game.ball.x = SCREEN - BALL_SIZE - 1;
        game.ball.y = 120;
        game.ball.vx = 5.0;
        game.ball.vy = 1.0;

        game.update(idle(), &mut audio);
        assert_eq!(game.ball.x, SCREEN - BALL_SIZE - 2);
        assert!(game.ball.vx < 0.0);
    }

    #[test]
    fn paddle_return_scores_and_snaps_clear() {
        let mut game = PongEngine::new(7);
        let mut audio = RecordingSink::default();
        game.ball.x = PADDLE_X + PADDLE_WIDTH + 2;
        game.ball.y = game.paddle.y + 10;
        game.ball.vx = -5.0;
        game.ball.vy = 0.0;

        game.update(idle(), &mut audio);
        assert_eq!(game.score(), 1);
        assert_eq!(game.ball.x, PADDLE_X + PADDLE_WIDTH);
        assert!(game.ball.vx > 0.0);
        assert_eq!(audio.tones, vec![(PADDLE_TONE_HZ, BEEP_VOLUME)]);
    }

    #[test]
    fn outgoing_ball_passes_through_the_paddle() {
        let mut game = PongEngine::new(7);
        let mut audio = RecordingSink::default();
        game.ball.x = PADDLE_X + 1;
        game.ball.y = game.paddle.y + 10;
        game.ball.vx = 5.0;
        game.ball.vy = 0.0;

        game.update(idle(), &mut audio);
        assert_eq!(game.score(), 0);
        assert!(game.ball.vx > 0.0);
    }

    #[test]
    fn missed_ball_costs_a_life_and_reserves() {
        let mut game = PongEngine::new(7);
        let mut audio = RecordingSink::default();
        // Park the paddle well away from the ball's path.
        game.paddle.y = 0;
        game.ball.x = 3;
        game.ball.y = 200;
        game.ball.vx = -6.0;
        game.ball.vy = 0.0;

        game.update(idle(), &mut audio);
        assert_eq!(game.lives(), STARTING_LIVES - 1);
        let centre = (SCREEN - BALL_SIZE) / 2;
        assert_eq!(game.ball.x, centre);
        assert!((game.ball.y - centre).unsigned_abs() <= SERVE_OFFSET.into());
        assert!(game.ball.vx < 0.0);
    }

    #[test]
    fn beep_silences_itself_after_two_frames() {
        let mut game = PongEngine::new(7);
        let mut audio = RecordingSink::default();
        game.ball.x = 120;
        game.ball.y = 3;
        game.ball.vx = 0.0;
        game.ball.vy = -4.0;

        game.update(idle(), &mut audio);
        assert!(audio.playing);
        game.ball.vy = 0.0;
        game.ball.y = 120;
        game.update(idle(), &mut audio);
        assert!(!audio.playing);
    }

    #[test]
    fn game_freezes_at_zero_lives() {
        let mut game = PongEngine::new(7);
        let mut audio = RecordingSink::default();
        game.lives = 1;
        game.paddle.y = 0;
        game.ball.x = 3;
        game.ball.y = 200;
        game.ball.vx = -6.0;
        game.ball.vy = 0.0;

        assert_eq!(game.update(idle(), &mut audio), 0);
        let frozen = (game.ball.x, game.ball.y);
        assert_eq!(game.update(up(), &mut audio), 0);
        assert_eq!((game.ball.x, game.ball.y), frozen);
    }

    #[test]
    fn hud_paints_once_and_repaints_on_change() {
        let mut game = PongEngine::new(7);
        let mut frame = FrameBuffer::new();
        game.draw(&mut frame);
        assert_eq!(game.drawn_score, Some(0));
        assert_eq!(game.drawn_lives, Some(STARTING_LIVES));
        // '0' glyph, leftmost lit column.
        assert_eq!(frame.get_pixel(SCORE_X, HUD_Y + 1), INK);

        // Values unchanged, so a fresh frame gets no HUD text back.
        let mut frame = FrameBuffer::new();
        game.draw(&mut frame);
        assert_eq!(frame.get_pixel(SCORE_X, HUD_Y + 1), 0);

        game.score = 1;
        game.draw(&mut frame);
        assert_eq!(game.drawn_score, Some(1));
        // '1' glyph, centre column fully lit.
        assert_eq!(frame.get_pixel(SCORE_X + 2, HUD_Y), INK);
    }

    #[test]
    fn fmt_u16_renders_decimal() {
        let mut buf = [0u8; 5];
        assert_eq!(fmt_u16(0, &mut buf), "0");
        let mut buf = [0u8; 5];
        assert_eq!(fmt_u16(42, &mut buf), "42");
        let mut buf = [0u8; 5];
        assert_eq!(fmt_u16(65535, &mut buf), "65535");
    }
}
