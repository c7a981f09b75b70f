//! Game state threaded through the update and render loop.

use crate::{
    assets::Assets,
    compositor::{FrameBuffers, FrameState},
    input::{Button, InputState},
    reels::{PlateState, Reels},
    score::Score,
    surface::Surface,
};

/// Score shown when the game starts.
pub const INITIAL_SCORE: u64 = 5000;

/// Object holding all game state.
///
/// Created once at startup and passed to the update and render steps, there is no global state.
#[derive(Debug, Clone)]
pub struct Game {
    /// Decoded sprite sheets.
    assets: Assets,
    /// Buffers the frame is composed in.
    buffers: FrameBuffers,
    /// Reel animation.
    reels: Reels,
    /// Visible plate frame.
    plate_state: PlateState,
    /// Frame counter shown on the display.
    score: Score,
    /// Input of the last update tick.
    input: InputState,
}

impl Game {
    /// Setup the initial state with the reels rolling.
    #[inline]
    #[must_use]
    pub fn new(assets: Assets) -> Self {
        Self {
            assets,
            buffers: FrameBuffers::new(),
            reels: Reels::new(),
            plate_state: PlateState::default(),
            score: Score::new(INITIAL_SCORE),
            input: InputState::default(),
        }
    }

    /// A single update tick.
    ///
    /// Pressing Start toggles the reels.
    #[inline]
    pub fn update(&mut self, input: InputState) {
        profiling::scope!("Update");

        self.input = input;

        if input.pressed(Button::Start) {
            self.reels.set_rolling(!self.reels.is_rolling());
        }

        self.reels.tick();
    }

    /// Render a frame, counting it in the score.
    ///
    /// Returns the composed grayscale frame.
    #[inline]
    pub fn render(&mut self) -> &Surface {
        self.score.on_frame_rendered();

        let state = self.frame_state();

        self.buffers.compose(&self.assets, &state)
    }

    /// Everything the next frame depends on.
    #[inline]
    #[must_use]
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            plate_state: self.plate_state,
            a_held: self.input.held(Button::A),
            b_held: self.input.held(Button::B),
            reel_positions: self.reels.positions(),
            score: self.score,
        }
    }

    /// Decoded sprite sheets and the palette shader.
    #[inline]
    #[must_use]
    pub const fn assets(&self) -> &Assets {
        &self.assets
    }

    /// Input of the last update tick.
    #[inline]
    #[must_use]
    pub const fn input(&self) -> &InputState {
        &self.input
    }

    /// Reel animation state.
    #[inline]
    #[must_use]
    pub const fn reels(&self) -> &Reels {
        &self.reels
    }

    /// Mutable reel animation state.
    #[inline]
    pub fn reels_mut(&mut self) -> &mut Reels {
        &mut self.reels
    }

    /// Current score.
    #[inline]
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// Visible plate frame.
    #[inline]
    #[must_use]
    pub const fn plate_state(&self) -> PlateState {
        self.plate_state
    }

    /// Change the visible plate frame.
    #[inline]
    pub fn set_plate_state(&mut self, plate_state: PlateState) {
        self.plate_state = plate_state;
    }

    /// Buffers of the last rendered frame.
    #[inline]
    #[must_use]
    pub const fn buffers(&self) -> &FrameBuffers {
        &self.buffers
    }
}
