//! CPU pixel surfaces the frame is composed on.

use imgref::ImgVec;
use rgb::RGBA8;

/// Rectangle in pixels, used to address a region of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct PixelRect {
    /// Horizontal start, may be negative.
    pub x: i32,
    /// Vertical start, may be negative.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Construct a rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Mutable RGBA pixel grid that sprite sheets are blitted onto.
#[derive(Debug, Clone)]
pub struct Surface {
    /// Pixels, stride is always the width.
    image: ImgVec<RGBA8>,
}

impl Surface {
    /// Create a fully transparent surface.
    #[inline]
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let image = ImgVec::new(vec![RGBA8::default(); width * height], width, height);

        Self { image }
    }

    /// Wrap already decoded pixels.
    ///
    /// # Panics
    ///
    /// - When the amount of pixels doesn't match the dimensions.
    #[inline]
    #[must_use]
    pub fn from_pixels(pixels: Vec<RGBA8>, width: usize, height: usize) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "Pixel count doesn't match {width}x{height}"
        );

        Self {
            image: ImgVec::new(pixels, width, height),
        }
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.image.width()
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.image.height()
    }

    /// Whole surface as a rectangle at the origin.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width() as u32, self.height() as u32)
    }

    /// All pixels row by row.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[RGBA8] {
        self.image.buf()
    }

    /// Pixel at a coordinate, `None` when out of bounds.
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<RGBA8> {
        (x < self.width() && y < self.height()).then(|| self.image.buf()[x + y * self.width()])
    }

    /// Reset every pixel to transparent.
    #[inline]
    pub fn clear(&mut self) {
        self.image.buf_mut().fill(RGBA8::default());
    }

    /// Draw a whole other surface at a position.
    #[inline]
    pub fn draw(&mut self, source: &Self, x: i32, y: i32) {
        self.blit(source, source.bounds(), x, y);
    }

    /// Copy a sub-rectangle of the source onto this surface at `(x, y)`.
    ///
    /// Parts of the rectangle outside of the source are skipped, as are parts outside of this surface.
    /// Pixels are composited with source-over alpha blending, fully transparent pixels never overwrite.
    #[inline]
    pub fn blit(&mut self, source: &Self, area: PixelRect, x: i32, y: i32) {
        profiling::scope!("Blit");

        // Clip the source area to the source itself, moving the destination along
        let area_x = i64::from(area.x);
        let area_y = i64::from(area.y);
        let source_left = area_x.max(0);
        let source_top = area_y.max(0);
        let source_right = (area_x + i64::from(area.width)).min(source.width() as i64);
        let source_bottom = (area_y + i64::from(area.height)).min(source.height() as i64);

        let target_left = i64::from(x) + (source_left - area_x);
        let target_top = i64::from(y) + (source_top - area_y);

        // Clip again against the target
        let skip_x = (-target_left).max(0);
        let skip_y = (-target_top).max(0);
        let width = (source_right - source_left - skip_x)
            .min(self.width() as i64 - target_left - skip_x)
            .max(0) as usize;
        let height = (source_bottom - source_top - skip_y)
            .min(self.height() as i64 - target_top - skip_y)
            .max(0) as usize;
        if width == 0 || height == 0 {
            return;
        }

        let source_left = (source_left + skip_x) as usize;
        let source_top = (source_top + skip_y) as usize;
        let target_left = (target_left + skip_x) as usize;
        let target_top = (target_top + skip_y) as usize;

        let source_stride = source.width();
        let target_stride = self.width();
        let source_pixels = source.image.buf();
        let target_pixels = self.image.buf_mut();

        for row in 0..height {
            let source_start = source_left + (source_top + row) * source_stride;
            let target_start = target_left + (target_top + row) * target_stride;

            target_pixels[target_start..target_start + width]
                .iter_mut()
                .zip(&source_pixels[source_start..source_start + width])
                .for_each(|(target, source)| *target = blend(*target, *source));
        }
    }
}

/// Source-over alpha compositing of a single pixel.
fn blend(target: RGBA8, source: RGBA8) -> RGBA8 {
    match source.a {
        0 => target,
        255 => source,
        alpha => {
            let alpha = u32::from(alpha);
            let inverse = 255 - alpha;
            let mix = |s: u8, t: u8| {
                ((u32::from(s) * alpha + u32::from(t) * inverse * u32::from(target.a) / 255) / 255)
                    as u8
            };

            RGBA8::new(
                mix(source.r, target.r),
                mix(source.g, target.g),
                mix(source.b, target.b),
                (alpha + u32::from(target.a) * inverse / 255) as u8,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use rgb::RGBA8;

    use super::{PixelRect, Surface};

    const RED: RGBA8 = RGBA8::new(255, 0, 0, 255);
    const BLUE: RGBA8 = RGBA8::new(0, 0, 255, 255);

    /// Surface where every pixel encodes its own coordinate in the red and green channels.
    fn gradient(width: usize, height: usize) -> Surface {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| RGBA8::new(x as u8, y as u8, 0, 255)))
            .collect();

        Surface::from_pixels(pixels, width, height)
    }

    #[test]
    fn clear_resets_everything() {
        let mut surface = Surface::new(4, 4);
        surface.draw(&gradient(4, 4), 0, 0);
        surface.clear();

        assert!(surface.pixels().iter().all(|pixel| *pixel == RGBA8::default()));
    }

    #[test]
    fn blit_sub_rectangle() {
        let source = gradient(8, 8);
        let mut target = Surface::new(3, 2);

        target.blit(&source, PixelRect::new(2, 5, 3, 2), 0, 0);

        assert_eq!(target.pixel(0, 0), Some(RGBA8::new(2, 5, 0, 255)));
        assert_eq!(target.pixel(2, 1), Some(RGBA8::new(4, 6, 0, 255)));
    }

    #[test]
    fn blit_clips_negative_destination() {
        let source = gradient(4, 4);
        let mut target = Surface::new(4, 4);

        target.draw(&source, -2, -1);

        assert_eq!(target.pixel(0, 0), Some(RGBA8::new(2, 1, 0, 255)));
        assert_eq!(target.pixel(1, 2), Some(RGBA8::new(3, 3, 0, 255)));
        // Nothing left to copy for these
        assert_eq!(target.pixel(2, 0), Some(RGBA8::default()));
        assert_eq!(target.pixel(0, 3), Some(RGBA8::default()));
    }

    #[test]
    fn blit_clips_destination_overflow() {
        let source = gradient(4, 4);
        let mut target = Surface::new(4, 4);

        target.draw(&source, 3, 3);

        assert_eq!(target.pixel(3, 3), Some(RGBA8::new(0, 0, 0, 255)));
        assert_eq!(target.pixel(2, 2), Some(RGBA8::default()));
    }

    #[test]
    fn blit_area_outside_source_is_skipped() {
        let source = gradient(4, 4);
        let mut target = Surface::new(4, 4);

        // Only the last source row exists
        target.blit(&source, PixelRect::new(0, 3, 4, 4), 0, 0);

        assert_eq!(target.pixel(1, 0), Some(RGBA8::new(1, 3, 0, 255)));
        assert_eq!(target.pixel(1, 1), Some(RGBA8::default()));

        // Area before the source moves the copied pixels along
        target.clear();
        target.blit(&source, PixelRect::new(-1, -1, 2, 2), 0, 0);
        assert_eq!(target.pixel(0, 0), Some(RGBA8::default()));
        assert_eq!(target.pixel(1, 1), Some(RGBA8::new(0, 0, 0, 255)));
    }

    #[test]
    fn blit_fully_outside_does_nothing() {
        let source = gradient(4, 4);
        let mut target = Surface::new(4, 4);

        target.draw(&source, 10, 0);
        target.draw(&source, 0, -10);
        target.blit(&source, PixelRect::new(8, 8, 4, 4), 0, 0);

        assert!(target.pixels().iter().all(|pixel| *pixel == RGBA8::default()));
    }

    #[test]
    fn blit_extreme_coordinates_do_nothing() {
        let source = gradient(4, 4);
        let mut target = Surface::new(4, 4);

        target.blit(&source, PixelRect::new(i32::MAX, i32::MAX, u32::MAX, u32::MAX), 0, 0);
        target.blit(&source, PixelRect::new(i32::MIN, i32::MIN, 4, 4), 0, 0);
        target.draw(&source, i32::MIN, i32::MAX);
        target.draw(&source, i32::MAX, i32::MIN);

        assert!(target.pixels().iter().all(|pixel| *pixel == RGBA8::default()));
    }

    #[test]
    fn transparent_pixels_keep_target() {
        let mut target = Surface::from_pixels(vec![RED; 4], 2, 2);
        let source = Surface::from_pixels(vec![BLUE, RGBA8::default(), RGBA8::default(), BLUE], 2, 2);

        target.draw(&source, 0, 0);

        assert_eq!(target.pixels(), &[BLUE, RED, RED, BLUE]);
    }

    #[test]
    fn translucent_pixels_blend() {
        let mut target = Surface::from_pixels(vec![RED], 1, 1);
        let source = Surface::from_pixels(vec![RGBA8::new(0, 0, 255, 128)], 1, 1);

        target.draw(&source, 0, 0);

        let pixel = target.pixel(0, 0).unwrap();
        assert_eq!(pixel.a, 255);
        assert!(pixel.r > 100 && pixel.r < 150);
        assert!(pixel.b > 100 && pixel.b < 150);
    }
}
