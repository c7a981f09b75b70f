//! Sprite sheets and shaders embedded in the binary.
//!
//! Everything is decoded once at startup, failing to decode any of the assets is fatal.

pub mod loader;

use miette::Result;

use crate::surface::Surface;

use self::loader::{png::PngLoader, Loader};

/// Immutable image that frames are cut out of.
pub type SpriteSheet = Surface;

/// Minified palette remap shader, validated when building.
pub const PALETTE_SHADER: &str = include_str!(concat!(env!("OUT_DIR"), "/palette.wgsl"));

/// All decoded assets the game needs.
#[derive(Debug, Clone)]
pub struct Assets {
    /// Banner shown through the transparent top of the background.
    pub logo: SpriteSheet,
    /// Cabinet, drawn on top of the logo.
    pub background: SpriteSheet,
    /// Four 17 pixel frames stacked vertically: none, A, B, both pressed.
    pub buttons: SpriteSheet,
    /// Ten 9 pixel digit glyphs stacked vertically, `0` at the top.
    pub numbers: SpriteSheet,
    /// Plate frames stacked vertically, each as high as the plate buffer.
    pub plates: SpriteSheet,
    /// Reel strip with 19 pixel symbol frames stacked vertically.
    pub roll: SpriteSheet,
    /// WGSL source of the palette post-processing pass.
    pub palette_shader: &'static str,
}

impl Assets {
    /// Decode all sprite sheets embedded in the binary.
    ///
    /// # Errors
    ///
    /// - When any of the embedded images fails to decode.
    #[inline]
    pub fn load_embedded() -> Result<Self> {
        Ok(Self {
            logo: load::<PngLoader>("logo", include_bytes!("../../assets/logo.png"))?,
            background: load::<PngLoader>(
                "background",
                include_bytes!("../../assets/background.png"),
            )?,
            buttons: load::<PngLoader>("buttons", include_bytes!("../../assets/buttons.png"))?,
            numbers: load::<PngLoader>("numbers", include_bytes!("../../assets/numbers.png"))?,
            plates: load::<PngLoader>("plates", include_bytes!("../../assets/plates.png"))?,
            roll: load::<PngLoader>("roll", include_bytes!("../../assets/roll.png"))?,
            palette_shader: PALETTE_SHADER,
        })
    }
}

/// Load a single asset with a loader, logging what's being loaded.
fn load<L: Loader<Surface>>(id: &str, bytes: &[u8]) -> Result<Surface> {
    log::debug!("Loading asset '{id}.{}'", L::EXTENSION);

    let asset = L::load(bytes, id)?;

    log::debug!(
        "Loaded asset '{id}' with size ({}x{})",
        asset.width(),
        asset.height()
    );

    Ok(asset)
}

#[cfg(test)]
mod tests {
    use super::Assets;

    #[test]
    fn embedded_assets_decode() {
        let assets = Assets::load_embedded().unwrap();

        // Full screen layers
        assert_eq!((assets.logo.width(), assets.logo.height()), (160, 144));
        assert_eq!(
            (assets.background.width(), assets.background.height()),
            (160, 144)
        );

        // Sheets must fit all frames the compositor selects
        assert_eq!(assets.buttons.width(), 48);
        assert!(assets.buttons.height() >= 17 * 4);
        assert_eq!(assets.numbers.width(), 5);
        assert!(assets.numbers.height() >= 9 * 10);
        assert_eq!(assets.plates.width(), 96);
        assert!(assets.plates.height() >= 36);
        assert_eq!(assets.roll.width(), 16);
        assert!(assets.roll.height() >= 6 * 19 + 8 + 38);
    }

    #[test]
    fn shader_is_embedded() {
        let assets = Assets::load_embedded().unwrap();

        assert!(assets.palette_shader.contains("fs_main"));
        assert!(assets.palette_shader.contains("vs_main"));
    }
}
