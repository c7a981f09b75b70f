//! Game configuration.

use crate::palette::Palette;

/// Initial game configuration passed to [`crate::window::run`].
///
/// Start from the defaults and override with the builder methods.
///
/// # Example
///
/// ```rust
/// # use slot_jam::GameConfig;
/// GameConfig::default().with_title("My Slots").with_scaling(3.0);
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GameConfig {
    /// Factor applied to the 160x144 buffer size for the requested window size.
    ///
    /// Defaults to `4.0`.
    pub scaling: f32,
    /// Name in the title bar.
    ///
    /// Defaults to `"GB Jam 13"`.
    pub title: String,
    /// Fixed amount of update ticks per second.
    ///
    /// Defaults to `60`.
    pub updates_per_second: u32,
    /// Maximum time a single frame may add to the update accumulator.
    ///
    /// Prevents a spiral of update calls after the window was blocked for a long time.
    ///
    /// Defaults to `0.25`.
    pub max_frame_time_secs: f32,
    /// Color of the viewport.
    ///
    /// The viewport is the area outside of the integer scaled buffer when inside a bigger window.
    ///
    /// Defaults to `0xFF381C2E`, the darkest palette shade.
    pub viewport_color: u32,
    /// Whether to synchronize presenting frames with the display.
    ///
    /// Defaults to `true`.
    pub vsync: bool,
    /// Shades the grayscale frame is mapped to.
    ///
    /// Defaults to [`Palette::default`].
    pub palette: Palette,
}

impl GameConfig {
    /// Set the factor applied to the buffer size for the requested window size.
    #[inline]
    #[must_use]
    pub fn with_scaling(mut self, scaling: f32) -> Self {
        self.scaling = scaling;

        self
    }

    /// Set the name in the title bar.
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();

        self
    }

    /// Set the fixed amount of update ticks per second.
    #[inline]
    #[must_use]
    pub fn with_updates_per_second(mut self, updates_per_second: u32) -> Self {
        self.updates_per_second = updates_per_second;

        self
    }

    /// Set the color of the viewport.
    ///
    /// The viewport is the area outside of the buffer when inside a bigger window.
    #[inline]
    #[must_use]
    pub fn with_viewport_color(mut self, viewport_color: u32) -> Self {
        self.viewport_color = viewport_color;

        self
    }

    /// Set whether to synchronize presenting frames with the display.
    #[inline]
    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;

        self
    }

    /// Set the shades the frame is mapped to.
    #[inline]
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;

        self
    }

    /// Time between two update ticks in seconds.
    #[inline]
    #[must_use]
    pub fn update_delta_time(&self) -> f32 {
        (self.updates_per_second.max(1) as f32).recip()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            scaling: 4.0,
            title: "GB Jam 13".to_owned(),
            updates_per_second: 60,
            max_frame_time_secs: 0.25,
            viewport_color: 0xFF38_1C2E,
            vsync: true,
            palette: Palette::default(),
        }
    }
}
