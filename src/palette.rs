//! Four shade Game Boy palette lookup table.

use rgb::RGBA8;

/// Amount of slots in the lookup table, including the empty first slot.
pub const PALETTE_SLOTS: usize = 5;

/// Colors the grayscale scene is mapped to by the palette shader.
///
/// Slot `0` is never assigned and stays transparent black, slots `1` to `4` go from the darkest to the lightest shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Lookup row as uploaded to the GPU.
    slots: [RGBA8; PALETTE_SLOTS],
}

impl Palette {
    /// Build a palette from four shades, darkest first.
    #[inline]
    #[must_use]
    pub const fn new(shades: [RGBA8; 4]) -> Self {
        Self {
            slots: [RGBA8::new(0, 0, 0, 0), shades[0], shades[1], shades[2], shades[3]],
        }
    }

    /// Color at a slot, `None` when the slot doesn't exist.
    #[inline]
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<RGBA8> {
        self.slots.get(index).copied()
    }

    /// Lookup row with the empty slot at index `0`.
    #[inline]
    #[must_use]
    pub const fn to_lookup_row(&self) -> [RGBA8; PALETTE_SLOTS] {
        self.slots
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new([
            RGBA8::new(56, 28, 46, 255),
            RGBA8::new(105, 109, 109, 255),
            RGBA8::new(255, 166, 84, 255),
            RGBA8::new(255, 215, 101, 255),
        ])
    }
}

#[cfg(test)]
mod tests {
    use rgb::RGBA8;

    use super::{Palette, PALETTE_SLOTS};

    #[test]
    fn first_slot_is_empty() {
        let palette = Palette::default();

        assert_eq!(palette.slot(0), Some(RGBA8::new(0, 0, 0, 0)));
        assert_eq!(palette.slot(PALETTE_SLOTS), None);
    }

    #[test]
    fn four_populated_slots() {
        let row = Palette::default().to_lookup_row();

        assert_eq!(row.len(), 5);
        assert_eq!(row.iter().filter(|color| color.a == 255).count(), 4);
        assert_eq!(row[1], RGBA8::new(56, 28, 46, 255));
        assert_eq!(row[4], RGBA8::new(255, 215, 101, 255));
    }
}
