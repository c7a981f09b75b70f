//! Score counter shown on the machine display.

/// Amount of digits on the display.
pub const SCORE_DIGITS: usize = 10;

/// Value at which the counter rolls over to zero, like an odometer.
const SCORE_MODULUS: u64 = 10_u64.pow(SCORE_DIGITS as u32);

/// Counter incremented once for every rendered frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score(u64);

impl Score {
    /// Start counting from a value.
    ///
    /// Values that don't fit on the display keep only their lowest digits.
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value % SCORE_MODULUS)
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Count a rendered frame.
    ///
    /// Called from the render path, so it depends on the frame rate and not the update rate.
    #[inline]
    pub fn on_frame_rendered(&mut self) {
        self.0 = (self.0 + 1) % SCORE_MODULUS;
    }

    /// Zero padded decimal representation, always [`SCORE_DIGITS`] characters.
    #[inline]
    #[must_use]
    pub fn format(self) -> String {
        format!("{:0width$}", self.0, width = SCORE_DIGITS)
    }

    /// Value of every digit on the display, most significant first.
    #[must_use]
    #[inline]
    pub fn digits(self) -> [u8; SCORE_DIGITS] {
        let mut digits = [0; SCORE_DIGITS];

        let mut rest = self.0;
        for digit in digits.iter_mut().rev() {
            *digit = (rest % 10) as u8;
            rest /= 10;
        }

        digits
    }
}

#[cfg(test)]
mod tests {
    use super::{Score, SCORE_DIGITS};

    #[test]
    fn format_pads_with_zeros() {
        assert_eq!(Score::new(5000).format(), "0000005000");
        assert_eq!(Score::new(0).format(), "0000000000");
        assert_eq!(Score::new(9_999_999_999).format(), "9999999999");
    }

    #[test]
    fn format_is_always_ten_characters() {
        let mut value = 1;
        while value < 10_000_000_000 {
            assert_eq!(Score::new(value).format().len(), SCORE_DIGITS);
            assert_eq!(Score::new(value - 1).format().len(), SCORE_DIGITS);

            value *= 10;
        }
    }

    #[test]
    fn increments_per_frame() {
        let mut score = Score::new(5000);
        for _ in 0..3 {
            score.on_frame_rendered();
        }

        assert_eq!(score.value(), 5003);
        assert_eq!(score.format(), "0000005003");
    }

    #[test]
    fn rolls_over_like_an_odometer() {
        let mut score = Score::new(9_999_999_999);
        score.on_frame_rendered();

        assert_eq!(score.value(), 0);
        assert_eq!(score.format(), "0000000000");

        assert_eq!(Score::new(12_345_678_901).format(), "2345678901");
    }

    #[test]
    fn digits_match_format() {
        for value in [0, 7, 5000, 1_234_567_890, 9_999_999_999] {
            let score = Score::new(value);

            let from_format = score
                .format()
                .bytes()
                .map(|byte| byte - b'0')
                .collect::<Vec<_>>();

            assert_eq!(score.digits().to_vec(), from_format);
        }
    }
}
