//! Main rendering state.

use glamour::{Rect, Size2, Vector2};
use miette::{Result, WrapErr};

use crate::{surface::Surface, GameConfig};

use super::{gpu::Gpu, palette_pass::PalettePassState};

/// Main render state holding the GPU information.
pub(crate) struct MainRenderState<'window> {
    /// GPU state.
    gpu: Gpu<'window>,
    /// Palette shader pass drawing the scene to the window.
    palette_pass: PalettePassState,
    /// Size of the final buffer to draw.
    ///
    /// Will be scaled with integer scaling and letterboxing to fit the screen.
    buffer_size: Size2<u32>,
    /// Letterbox output for the final render pass viewport.
    letterbox: Rect,
    /// Viewport color
    viewport_color: wgpu::Color,
}

impl<'window> MainRenderState<'window> {
    /// Create a GPU surface on the window.
    pub(crate) async fn new<W>(
        game_config: &GameConfig,
        buffer_size: Size2<u32>,
        palette_shader: &'static str,
        window: W,
        window_size: Size2<u32>,
    ) -> Result<Self>
    where
        W: wgpu::WindowHandle + 'window,
    {
        // Setup the GPU and attach it to the window surface
        let gpu = Gpu::new(game_config, window, window_size).await?;

        let palette_pass = PalettePassState::new(
            &gpu.device,
            &gpu.queue,
            gpu.format(),
            buffer_size,
            &game_config.palette,
            palette_shader,
        )
        .await?;

        let letterbox = integer_letterbox(gpu.screen_size(), buffer_size);

        // Convert the u32 color to a WGPU color
        let viewport_color =
            super::u32_to_wgpu_color(game_config.viewport_color, gpu.format().is_srgb());

        Ok(Self {
            gpu,
            palette_pass,
            buffer_size,
            letterbox,
            viewport_color,
        })
    }

    /// Upload the composed frame and draw it through the palette shader.
    ///
    /// # Errors
    ///
    /// - When the frame doesn't match the buffer size.
    /// - When the GPU is out of memory.
    pub(crate) fn render(&mut self, scene: &Surface) -> Result<()> {
        self.palette_pass
            .upload_scene(&self.gpu.queue, scene)
            .wrap_err("Error uploading frame")?;

        // Nothing to draw to this time, try again next frame
        let Some(mut frame) = self.gpu.start()? else {
            return Ok(());
        };

        {
            profiling::scope!("Render palette pass");

            self.palette_pass
                .render(&mut frame, self.letterbox, self.viewport_color);
        }

        frame.present();

        Ok(())
    }

    /// Resize the surface.
    pub(crate) fn resize(&mut self, new_size: Size2<u32>) {
        // Resize the surface
        self.gpu.resize(new_size);

        // Recalculate the letterbox with the new size
        self.letterbox = integer_letterbox(self.gpu.screen_size(), self.buffer_size);
    }
}

/// Largest integer scaled rectangle of the buffer centered in the screen.
///
/// The scale never drops below one, a screen smaller than the buffer gets a letterbox at the origin that doesn't fit.
#[must_use]
pub(crate) fn integer_letterbox(screen_size: Size2<u32>, buffer_size: Size2<u32>) -> Rect {
    let buffer_width = buffer_size.width.max(1);
    let buffer_height = buffer_size.height.max(1);

    let scale = {
        if screen_size.height * buffer_width < screen_size.width * buffer_height {
            // Height fits
            screen_size.height / buffer_height
        } else {
            // Width fits
            screen_size.width / buffer_width
        }
        // We don't want a scale smaller than one
        .max(1)
    };

    let scaled_width = buffer_width * scale;
    let scaled_height = buffer_height * scale;

    // Calculate the offset to center the scaled rectangle inside the screen
    let offset_x = screen_size.width.saturating_sub(scaled_width) / 2;
    let offset_y = screen_size.height.saturating_sub(scaled_height) / 2;

    log::debug!(
        "Setting new letterbox to ({offset_x}:{offset_y} x {scaled_width}:{scaled_height}) with {scale} scaling"
    );

    Rect::new(
        Vector2::new(offset_x as f32, offset_y as f32),
        Size2::new(scaled_width as f32, scaled_height as f32),
    )
}

#[cfg(test)]
mod tests {
    use glamour::Size2;

    use super::integer_letterbox;

    fn buffer() -> Size2<u32> {
        Size2::new(160, 144)
    }

    #[test]
    fn exact_fit() {
        let letterbox = integer_letterbox(Size2::new(640, 576), buffer());

        assert_eq!(letterbox.origin.x, 0.0);
        assert_eq!(letterbox.origin.y, 0.0);
        assert_eq!(letterbox.size.width, 640.0);
        assert_eq!(letterbox.size.height, 576.0);
    }

    #[test]
    fn wide_window_centers_horizontally() {
        let letterbox = integer_letterbox(Size2::new(1920, 1080), buffer());

        // 1080 / 144 = 7
        assert_eq!(letterbox.size.width, 1120.0);
        assert_eq!(letterbox.size.height, 1008.0);
        assert_eq!(letterbox.origin.x, 400.0);
        assert_eq!(letterbox.origin.y, 36.0);
    }

    #[test]
    fn tall_window_centers_vertically() {
        let letterbox = integer_letterbox(Size2::new(500, 1000), buffer());

        // 500 / 160 = 3
        assert_eq!(letterbox.size.width, 480.0);
        assert_eq!(letterbox.size.height, 432.0);
        assert_eq!(letterbox.origin.x, 10.0);
        assert_eq!(letterbox.origin.y, 284.0);
    }

    #[test]
    fn tiny_window_keeps_scale_one() {
        let letterbox = integer_letterbox(Size2::new(10, 10), buffer());

        assert_eq!(letterbox.size.width, 160.0);
        assert_eq!(letterbox.size.height, 144.0);
        assert_eq!(letterbox.origin.x, 0.0);
        assert_eq!(letterbox.origin.y, 0.0);
    }
}
