//! PNG asset loading.

use std::io::Cursor;

use miette::{Context, IntoDiagnostic, Result};
use png::{BitDepth, ColorType, Decoder, Transformations};
use rgb::RGBA8;

use super::Loader;
use crate::surface::Surface;

/// PNG asset loader.
///
/// Every supported PNG is converted to 8 bit RGBA pixels, 16 bit images are stripped to 8 bit.
#[non_exhaustive]
pub struct PngLoader;

impl Loader<Surface> for PngLoader {
    const EXTENSION: &'static str = "png";

    #[inline]
    fn load(bytes: &[u8], id: &str) -> Result<Surface> {
        let mut decoder = Decoder::new(Cursor::new(bytes));

        // Discard text chunks
        decoder.set_ignore_text_chunk(true);

        // Expand indexed images and always add an alpha channel
        decoder
            .set_transformations(Transformations::normalize_to_color8() | Transformations::ALPHA);

        let mut reader = decoder
            .read_info()
            .into_diagnostic()
            .wrap_err_with(|| format!("Error reading PNG header of asset '{id}'"))?;

        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader
            .next_frame(&mut buf)
            .into_diagnostic()
            .wrap_err_with(|| format!("Error decoding PNG pixels of asset '{id}'"))?;
        let data = &buf[..info.buffer_size()];

        // Grayscale images are expanded to RGB
        let pixels = match (info.color_type, info.bit_depth) {
            (ColorType::Rgba, BitDepth::Eight) => data
                .chunks_exact(4)
                .map(|pixel| RGBA8::new(pixel[0], pixel[1], pixel[2], pixel[3]))
                .collect::<Vec<_>>(),
            (ColorType::GrayscaleAlpha, BitDepth::Eight) => data
                .chunks_exact(2)
                .map(|pixel| RGBA8::new(pixel[0], pixel[0], pixel[0], pixel[1]))
                .collect(),
            (color_type, bits) => miette::bail!(
                "PNG of asset '{id}' decodes to {color_type:?} with {bits:?} bits instead of 8 bit RGBA"
            ),
        };

        let width = info.width as usize;
        let height = info.height as usize;

        Ok(Surface::from_pixels(pixels, width, height))
    }
}
