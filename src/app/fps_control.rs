use crate::app::game_context::GameContext;
use std::cmp::max;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Stores an instant along with the number of frames it represents
struct NFrameInstant(usize, Instant);

/// Objective measurement of framerate based on periodic calls to
/// [`FpsCounter::register_frames`], detached from any
/// framerate-regulation mechanism
struct FpsCounter {
    /// An `Instant` is stored every `step` frames, not every frame,
    /// because `Instant::now()` is a syscall
    step: usize,
    n: usize,
    buffer: VecDeque<NFrameInstant>,
}

impl FpsCounter {
    const LEN: usize = 10;

    fn new(expected_fps: f64) -> Self {
        let mut counter = Self {
            step: 0,
            n: 0,
            buffer: VecDeque::with_capacity(Self::LEN),
        };
        counter.set_expected_fps(expected_fps);
        counter
    }

    /// Aim for roughly one stored `Instant` per second
    fn set_expected_fps(&mut self, expected_fps: f64) {
        self.step = max(1, expected_fps as usize);
        self.reset();
    }

    fn register_frames(&mut self, num_frames: usize) {
        if self.n < num_frames {
            if self.buffer.len() >= Self::LEN {
                self.buffer.pop_front();
            }
            self.buffer.push_back(NFrameInstant(
                self.step - self.n + num_frames - 1,
                Instant::now(),
            ));
            self.n = self.step - 1;
        } else {
            self.n -= num_frames;
        }
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.n = 0;
    }

    /// Inverse of the average frame duration over the buffer
    fn fps(&self) -> f64 {
        if self.buffer.len() >= 2 {
            let first = self.buffer[0].1;
            let last = self.buffer[self.buffer.len() - 1].1;
            let total = (last - first).as_secs_f64();
            let num_frames = self.buffer.iter().skip(1).map(|nfi| nfi.0).sum::<usize>() as f64;
            num_frames / total
        } else {
            0.
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum State {
    /// Waiting for the first input, nothing moves yet
    Idle,
    Playing,
    Paused,
    GameOver,
}

/// Fixed-timestep simulation clock combined with phase management.
///
/// Rendering runs at the display rate; [`Control::can_update`] is
/// polled in a loop each update and hands out exactly one simulation
/// tick per accumulated tick duration.
pub struct Control {
    tps: f64,
    tick_duration: Duration,
    start: Instant,
    last_update: Instant,

    // part of a tick that has elapsed but not yet been
    // handed out, in ticks
    remainder: f64,

    // number of ticks that still need to be performed to
    // catch up with the current time
    // TODO: zero this above some threshold so a long stall
    //  doesn't turn into a fast-forward burst
    missed_ticks: Option<usize>,

    measured_tps: FpsCounter,
    measured_fps: FpsCounter,

    state: State,

    // stores the frame fraction while the clock is stopped so
    // resuming doesn't cause catch-up ticks from stopped time
    frozen_frame_fraction: Option<f32>,
}

impl Control {
    pub fn new(tps: f64) -> Self {
        let now = Instant::now();
        Self {
            tps,
            tick_duration: Duration::from_nanos((1_000_000_000.0 / tps) as u64),
            start: now,
            last_update: now,
            remainder: 0.,

            missed_ticks: None,

            measured_tps: FpsCounter::new(tps),
            measured_fps: FpsCounter::new(60.),

            state: State::Idle,
            frozen_frame_fraction: Some(0.),
        }
    }

    // adjust last_update to match the expected frame fraction, done
    // when resuming and when changing tps to keep motion smooth
    fn set_last_update_to_match_frame_fraction(&mut self, frac: f32) {
        let mut elapsed = (frac - self.remainder as f32) * self.tick_duration.as_secs_f32();
        // slight tolerance
        if (-0.01..0.).contains(&elapsed) {
            elapsed = 0.;
        } else {
            assert!(elapsed >= 0., "elapsed ({}s) < 0", elapsed);
        }

        self.last_update = Instant::now() - Duration::from_secs_f32(elapsed);
    }

    pub fn set_tps(&mut self, tps: f64) {
        if (self.tps - tps).abs() < f64::EPSILON {
            return;
        }

        let frame_fraction = self.frame_fraction();

        self.tps = tps;
        self.tick_duration = Duration::from_nanos((1_000_000_000.0 / tps) as u64);
        self.measured_tps.set_expected_fps(tps);

        if self.frozen_frame_fraction.is_none() {
            self.set_last_update_to_match_frame_fraction(frame_fraction);
        }
    }

    /// Repeatedly polled as a while-loop condition in update(); each
    /// true result corresponds to exactly one simulation tick
    pub fn can_update(&mut self) -> bool {
        if self.state != State::Playing {
            return false;
        }

        match &mut self.missed_ticks {
            Some(0) => {
                self.missed_ticks = None;
                false
            }
            Some(n) => {
                *n -= 1;
                true
            }
            None => {
                // how many ticks should have occurred since the last call
                let ticks = self.last_update.elapsed().as_secs_f64()
                    / self.tick_duration.as_secs_f64()
                    + self.remainder;
                let missed_ticks = ticks as usize;

                if missed_ticks > 0 {
                    self.remainder = ticks % 1.;
                    self.last_update = Instant::now();

                    self.missed_ticks = Some(missed_ticks - 1);

                    self.measured_tps.register_frames(missed_ticks);

                    true
                } else {
                    false
                }
            }
        }
    }

    /// Call once per draw()
    pub fn graphics_frame(&mut self, gtx: &mut GameContext) {
        self.measured_fps.register_frames(1);
        gtx.elapsed_millis = self.start.elapsed().as_millis();
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn play(&mut self) {
        self.state = State::Playing;
        self.measured_tps.reset();
        match self.frozen_frame_fraction.take() {
            None => (),
            Some(frac) => self.set_last_update_to_match_frame_fraction(frac),
        }
    }

    pub fn pause(&mut self) {
        if self.state == State::Paused {
            return;
        }
        self.state = State::Paused;
        self.frozen_frame_fraction = Some(self.frame_fraction());
        self.missed_ticks = None;
    }

    pub fn game_over(&mut self) {
        self.state = State::GameOver;
        self.frozen_frame_fraction = Some(self.frame_fraction());
        self.missed_ticks = None;
    }

    /// Fraction of the current tick that has elapsed
    pub fn frame_fraction(&self) -> f32 {
        match self.frozen_frame_fraction {
            Some(frac) => frac,
            None => {
                let frac = self.last_update.elapsed().as_secs_f32()
                    / self.tick_duration.as_secs_f32()
                    + self.remainder as f32;
                frac.min(1.)
            }
        }
    }

    pub fn measured_tps(&self) -> f64 {
        self.measured_tps.fps()
    }

    pub fn measured_fps(&self) -> f64 {
        self.measured_fps.fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_ticks_before_play() {
        let mut control = Control::new(1000.);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(control.state(), State::Idle);
        assert!(!control.can_update());
    }

    #[test]
    fn playing_hands_out_ticks() {
        let mut control = Control::new(1000.);
        control.play();
        std::thread::sleep(Duration::from_millis(10));
        assert!(control.can_update());
    }

    #[test]
    fn paused_clock_is_frozen() {
        let mut control = Control::new(2.);
        control.play();
        control.pause();

        let frozen = control.frame_fraction();
        assert!(!control.can_update());

        // toggling pause without elapsed time leaves the
        // accumulator unchanged
        control.play();
        control.pause();
        let frac = control.frame_fraction();
        assert!((frac - frozen).abs() < 0.05, "{frac} vs {frozen}");
    }

    #[test]
    fn resume_causes_no_burst() {
        let mut control = Control::new(50.);
        control.play();
        control.pause();
        std::thread::sleep(Duration::from_millis(40));

        // two ticks' worth of wall time passed while paused but none
        // of it is owed after resuming
        control.play();
        let mut ticks = 0;
        while control.can_update() {
            ticks += 1;
        }
        assert!(ticks <= 1, "catch-up burst of {ticks} ticks after resume");
    }

    #[test]
    fn game_over_stops_the_clock() {
        let mut control = Control::new(1000.);
        control.play();
        control.game_over();
        std::thread::sleep(Duration::from_millis(5));
        assert!(!control.can_update());
    }
}
