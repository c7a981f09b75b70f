//! Compose a frame from the sprite sheets.
//!
//! Every part of the machine is drawn into its own small buffer first, which are then placed on the main buffer.
//! Frames are selected from vertically stacked sprite sheets by copying a sub-rectangle at a pixel offset.

use crate::{
    assets::{Assets, SpriteSheet},
    reels::{PlateState, REEL_COUNT},
    score::Score,
    surface::{PixelRect, Surface},
};

/// Logical width of the screen.
pub const SCREEN_WIDTH: usize = 160;
/// Logical height of the screen.
pub const SCREEN_HEIGHT: usize = 144;

/// Size of the score display buffer.
pub const NUMBERS_SIZE: (usize, usize) = (68, 9);
/// Size of the reel window buffer.
pub const REELS_SIZE: (usize, usize) = (64, 38);
/// Size of the plate buffer, also the height of a single plate frame.
pub const PLATES_SIZE: (usize, usize) = (96, 36);
/// Size of the button feedback buffer.
pub const BUTTONS_SIZE: (usize, usize) = (48, 17);

/// Where the score display is placed on the screen.
pub const NUMBERS_POSITION: (i32, i32) = (46, 23);
/// Where the reel window is placed on the screen.
pub const REELS_POSITION: (i32, i32) = (48, 44);
/// Where the plates are placed on the screen.
pub const PLATES_POSITION: (i32, i32) = (32, 88);
/// Where the button feedback is placed on the screen.
pub const BUTTONS_POSITION: (i32, i32) = (56, 96);

/// Height of a single frame in the button sheet.
const BUTTON_FRAME_HEIGHT: i32 = 17;
/// Height of a single symbol on the reel strip.
const REEL_FRAME_HEIGHT: i32 = 19;
/// Shift so the current symbol is centered in the reel window.
const REEL_CENTER_OFFSET: i32 = 8;
/// Horizontal distance between two reels.
const REEL_SPACING: i32 = 24;
/// Height of a single digit glyph.
const DIGIT_HEIGHT: i32 = 9;
/// Horizontal cursor position before the first digit.
const NUMBER_CURSOR_START: i32 = -7;
/// Empty pixels between two digits.
const NUMBER_SPACING: i32 = 2;

/// Everything a frame depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct FrameState {
    /// Plate frame to show.
    pub plate_state: PlateState,
    /// Whether A is held.
    pub a_held: bool,
    /// Whether B is held.
    pub b_held: bool,
    /// Frame of every reel.
    pub reel_positions: [i32; REEL_COUNT],
    /// Score to display.
    pub score: Score,
}

/// Vertical sheet offset of the button frame for the A and B state.
#[inline]
#[must_use]
pub const fn button_frame_offset(a_held: bool, b_held: bool) -> i32 {
    match (a_held, b_held) {
        (false, false) => 0,
        (true, false) => -BUTTON_FRAME_HEIGHT,
        (false, true) => -2 * BUTTON_FRAME_HEIGHT,
        (true, true) => -3 * BUTTON_FRAME_HEIGHT,
    }
}

/// Vertical sheet offset of the glyph for a digit.
#[inline]
#[must_use]
pub const fn digit_glyph_offset(digit: u8) -> i32 {
    -DIGIT_HEIGHT * digit as i32
}

/// Vertical sheet offset of a reel symbol frame.
#[inline]
#[must_use]
pub const fn reel_frame_offset(position: i32) -> i32 {
    saturate_offset(-(position as i64) * REEL_FRAME_HEIGHT as i64 - REEL_CENTER_OFFSET as i64)
}

/// Vertical sheet offset of a plate frame.
#[inline]
#[must_use]
pub const fn plate_frame_offset(plate_state: PlateState, plate_height: usize) -> i32 {
    let offset = (plate_height as u64).saturating_mul(plate_state.index() as u64);

    saturate_offset(-(if offset > i64::MAX as u64 { i64::MAX } else { offset as i64 }))
}

/// Clamp a sheet offset to the `i32` range.
const fn saturate_offset(offset: i64) -> i32 {
    if offset < i32::MIN as i64 {
        i32::MIN
    } else if offset > i32::MAX as i64 {
        i32::MAX
    } else {
        offset as i32
    }
}

/// Off-screen buffers a frame is composed in.
///
/// Nothing is kept between frames, all buffers are cleared before drawing.
#[derive(Debug, Clone)]
pub struct FrameBuffers {
    /// Full screen.
    main: Surface,
    /// Score display.
    numbers: Surface,
    /// Reel window.
    reels: Surface,
    /// Plate.
    plates: Surface,
    /// Button feedback.
    buttons: Surface,
}

impl FrameBuffers {
    /// Allocate all buffers.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            main: Surface::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            numbers: Surface::new(NUMBERS_SIZE.0, NUMBERS_SIZE.1),
            reels: Surface::new(REELS_SIZE.0, REELS_SIZE.1),
            plates: Surface::new(PLATES_SIZE.0, PLATES_SIZE.1),
            buttons: Surface::new(BUTTONS_SIZE.0, BUTTONS_SIZE.1),
        }
    }

    /// Draw a whole frame and return the main buffer.
    #[inline]
    pub fn compose(&mut self, assets: &Assets, state: &FrameState) -> &Surface {
        profiling::scope!("Compose frame");

        self.clear();

        // Background is drawn over the logo
        self.main.draw(&assets.logo, 0, 0);
        self.main.draw(&assets.background, 0, 0);

        let plate_offset = plate_frame_offset(state.plate_state, self.plates.height());
        draw_frame(&mut self.plates, &assets.plates, 0, plate_offset);

        let button_offset = button_frame_offset(state.a_held, state.b_held);
        draw_frame(&mut self.buttons, &assets.buttons, 0, button_offset);

        for (index, position) in state.reel_positions.into_iter().enumerate() {
            draw_frame(
                &mut self.reels,
                &assets.roll,
                index as i32 * REEL_SPACING,
                reel_frame_offset(position),
            );
        }

        self.draw_score(&assets.numbers, state.score);

        // Place all parts on the screen
        for (part, (x, y)) in [
            (&self.numbers, NUMBERS_POSITION),
            (&self.reels, REELS_POSITION),
            (&self.plates, PLATES_POSITION),
            (&self.buttons, BUTTONS_POSITION),
        ] {
            self.main.draw(part, x, y);
        }

        &self.main
    }

    /// Last composed frame.
    #[inline]
    #[must_use]
    pub const fn main(&self) -> &Surface {
        &self.main
    }

    /// Score display buffer of the last frame.
    #[inline]
    #[must_use]
    pub const fn numbers(&self) -> &Surface {
        &self.numbers
    }

    /// Reel window buffer of the last frame.
    #[inline]
    #[must_use]
    pub const fn reels(&self) -> &Surface {
        &self.reels
    }

    /// Plate buffer of the last frame.
    #[inline]
    #[must_use]
    pub const fn plates(&self) -> &Surface {
        &self.plates
    }

    /// Button feedback buffer of the last frame.
    #[inline]
    #[must_use]
    pub const fn buttons(&self) -> &Surface {
        &self.buttons
    }

    /// Empty all buffers.
    fn clear(&mut self) {
        self.main.clear();
        self.numbers.clear();
        self.reels.clear();
        self.plates.clear();
        self.buttons.clear();
    }

    /// Draw every digit of the score with its own glyph.
    fn draw_score(&mut self, numbers: &SpriteSheet, score: Score) {
        let advance = numbers.width() as i32 + NUMBER_SPACING;

        let mut cursor = NUMBER_CURSOR_START;
        for digit in score.digits() {
            cursor += advance;

            draw_frame(
                &mut self.numbers,
                numbers,
                cursor,
                digit_glyph_offset(digit),
            );
        }
    }
}

impl Default for FrameBuffers {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw the part of a sheet that shifting it by `(x, y)` would show in the target.
fn draw_frame(target: &mut Surface, sheet: &SpriteSheet, x: i32, y: i32) {
    let area = PixelRect::new(
        0,
        y.saturating_neg(),
        sheet.width() as u32,
        target.height() as u32,
    );

    target.blit(sheet, area, x, 0);
}
