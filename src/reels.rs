//! Reel animation and plate state.

/// Amount of symbol frames on a reel strip.
pub const REEL_FRAMES: i32 = 7;

/// Amount of update ticks between two reel frames while rolling.
pub const TICKS_PER_FRAME: u64 = 5;

/// Amount of reels on the machine.
pub const REEL_COUNT: usize = 3;

/// A single spinning wheel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reel {
    /// Visible frame, always within `0..REEL_FRAMES` after a tick.
    position: i32,
    /// Frame the reel should come to a stop at.
    ///
    /// Reserved for spinning towards a result, not read by the animation.
    target_position: i32,
}

impl Reel {
    /// Construct a reel showing a frame.
    #[inline]
    #[must_use]
    pub const fn new(position: i32) -> Self {
        Self {
            position,
            target_position: position,
        }
    }

    /// Visible frame.
    #[inline]
    #[must_use]
    pub const fn position(self) -> i32 {
        self.position
    }

    /// Frame the reel should stop at.
    #[inline]
    #[must_use]
    pub const fn target_position(self) -> i32 {
        self.target_position
    }

    /// Set the frame the reel should stop at.
    #[inline]
    pub fn set_target_position(&mut self, target_position: i32) {
        self.target_position = target_position;
    }

    /// Move to the next frame.
    fn advance(&mut self) {
        self.position += 1;
    }

    /// Wrap the position back into the valid frame range.
    ///
    /// Only moves by a single step, so the position is expected to be at most one frame out of range.
    fn wrap(&mut self) {
        if self.position > REEL_FRAMES - 1 {
            self.position = 0;
        } else if self.position < 0 {
            // Unreachable as long as reels only spin forward
            self.position = REEL_FRAMES - 1;
        }
    }
}

/// All reels of the machine, moving in lockstep while rolling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reels {
    /// Independent reel counters.
    reels: [Reel; REEL_COUNT],
    /// Whether the reels advance.
    rolling: bool,
    /// Total amount of ticks since the start.
    ticks: u64,
}

impl Reels {
    /// Start rolling with every reel at the first frame.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_positions([0; REEL_COUNT])
    }

    /// Start rolling from specific frames.
    #[inline]
    #[must_use]
    pub const fn with_positions(positions: [i32; REEL_COUNT]) -> Self {
        Self {
            reels: [
                Reel::new(positions[0]),
                Reel::new(positions[1]),
                Reel::new(positions[2]),
            ],
            rolling: true,
            ticks: 0,
        }
    }

    /// Advance the animation by a single update tick.
    ///
    /// Every [`TICKS_PER_FRAME`] ticks all reels move to their next frame while rolling.
    #[inline]
    pub fn tick(&mut self) {
        self.ticks += 1;

        if self.rolling && self.ticks % TICKS_PER_FRAME == 0 {
            self.reels.iter_mut().for_each(Reel::advance);
        }

        // Wrapping happens regardless of rolling
        self.reels.iter_mut().for_each(Reel::wrap);
    }

    /// Start or stop the reels.
    #[inline]
    pub fn set_rolling(&mut self, rolling: bool) {
        if rolling != self.rolling {
            log::debug!("Reels {}", if rolling { "start rolling" } else { "stop" });
        }

        self.rolling = rolling;
    }

    /// Whether the reels are advancing.
    #[inline]
    #[must_use]
    pub const fn is_rolling(&self) -> bool {
        self.rolling
    }

    /// Visible frame of every reel.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> [i32; REEL_COUNT] {
        self.reels.map(Reel::position)
    }

    /// Individual reels.
    #[inline]
    #[must_use]
    pub const fn reels(&self) -> &[Reel; REEL_COUNT] {
        &self.reels
    }

    /// Mutable access to the individual reels, for setting targets.
    #[inline]
    pub fn reels_mut(&mut self) -> &mut [Reel; REEL_COUNT] {
        &mut self.reels
    }

    /// Total amount of ticks since the start.
    #[inline]
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for Reels {
    fn default() -> Self {
        Self::new()
    }
}

/// Which vertical frame of the plate sheet is shown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlateState(u32);

impl PlateState {
    /// Construct from a frame index.
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Frame index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}
