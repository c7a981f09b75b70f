//! Asset loader helper.

pub mod png;

use miette::Result;

/// How an asset should be loaded.
pub trait Loader<T> {
    /// Extension for the file that this loader loads.
    const EXTENSION: &'static str;

    /// Load an asset from raw bytes.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Raw file contents.
    /// * `id` - Name of the asset, only used for reporting errors.
    ///
    /// # Errors
    ///
    /// - When anything went wrong with decoding the asset.
    fn load(bytes: &[u8], id: &str) -> Result<T>;
}
