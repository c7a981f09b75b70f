//! Poll the Game Boy buttons from the keyboard.

use winit::keyboard::KeyCode;
use winit_input_helper::WinitInputHelper;

/// Logical Game Boy button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Button {
    /// D-pad up.
    Up,
    /// D-pad down.
    Down,
    /// D-pad left.
    Left,
    /// D-pad right.
    Right,
    /// Primary action.
    A,
    /// Secondary action.
    B,
    /// Start.
    Start,
    /// Select.
    Select,
}

impl Button {
    /// Every button, in the order they are stored.
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::A,
        Self::B,
        Self::Start,
        Self::Select,
    ];

    /// Physical key the button is bound to.
    #[inline]
    #[must_use]
    pub const fn key(self) -> KeyCode {
        match self {
            Self::Up => KeyCode::ArrowUp,
            Self::Down => KeyCode::ArrowDown,
            Self::Left => KeyCode::ArrowLeft,
            Self::Right => KeyCode::ArrowRight,
            Self::A => KeyCode::KeyZ,
            Self::B => KeyCode::KeyX,
            Self::Start => KeyCode::KeyA,
            Self::Select => KeyCode::KeyS,
        }
    }

    /// Position in the state arrays.
    const fn index(self) -> usize {
        self as usize
    }
}

/// Held state of every button for a single update tick.
///
/// Overwritten every tick, only the state of the tick before is remembered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    /// Whether the button is being held down this update tick.
    held: [bool; 8],
    /// Whether the button was being held down the previous update tick.
    previous: [bool; 8],
}

impl InputState {
    /// Poll the keyboard state for the next tick.
    ///
    /// # Arguments
    ///
    /// * `previous` - State of the tick before, used for detecting presses.
    /// * `input` - Winit input helper that received all events up until now.
    #[inline]
    #[must_use]
    pub fn sample(previous: &Self, input: &WinitInputHelper) -> Self {
        Self::from_fn(previous, |button| input.key_held(button.key()))
    }

    /// Build the next state by asking whether each button is held.
    #[inline]
    #[must_use]
    pub fn from_fn(previous: &Self, mut is_held: impl FnMut(Button) -> bool) -> Self {
        let mut held = [false; 8];
        for button in Button::ALL {
            held[button.index()] = is_held(button);
        }

        Self {
            held,
            previous: previous.held,
        }
    }

    /// State with only the passed buttons held and no history.
    #[inline]
    #[must_use]
    pub fn with_held(buttons: &[Button]) -> Self {
        Self::from_fn(&Self::default(), |button| buttons.contains(&button))
    }

    /// Whether the button is held down this tick.
    #[inline]
    #[must_use]
    pub const fn held(&self, button: Button) -> bool {
        self.held[button.index()]
    }

    /// Whether the button goes from released to held this tick.
    #[inline]
    #[must_use]
    pub const fn pressed(&self, button: Button) -> bool {
        !self.previous[button.index()] && self.held[button.index()]
    }

    /// Whether the button goes from held to released this tick.
    #[inline]
    #[must_use]
    pub const fn released(&self, button: Button) -> bool {
        self.previous[button.index()] && !self.held[button.index()]
    }
}
