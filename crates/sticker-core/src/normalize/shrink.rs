//! Loop state for the size-check loop.

use super::options::{NormalizeOptions, FALLBACK_QUALITY};
use crate::encode::OutputFormat;
use crate::geometry::{scale_long_side, TargetSize};

/// Parameters of one encode attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ShrinkState {
    pub target: TargetSize,
    pub quality: f32,
    pub format: OutputFormat,
    /// Encodes performed so far, this one included.
    pub attempts: u32,
}

impl ShrinkState {
    /// The full-quality first attempt.
    pub fn initial(target: TargetSize) -> Self {
        Self {
            target,
            quality: 1.0,
            format: OutputFormat::Png,
            attempts: 1,
        }
    }

    /// Parameters for the next attempt after an encode of `encoded_len`
    /// bytes missed the budget.
    pub fn next(&self, encoded_len: usize, options: &NormalizeOptions) -> Self {
        let attempts = self.attempts + 1;
        let target = shrink_target(
            self.target,
            encoded_len,
            options.byte_budget,
            options.min_dimension,
        );

        if attempts >= options.max_attempts {
            let format = if options.lossy_fallback {
                OutputFormat::Jpeg
            } else {
                OutputFormat::Png
            };
            Self {
                target,
                quality: FALLBACK_QUALITY,
                format,
                attempts,
            }
        } else {
            Self {
                target,
                attempts,
                ..*self
            }
        }
    }
}

/// Scale `target` by `sqrt(budget / encoded_len)`, never below `floor` and
/// never above the current size.
pub(super) fn shrink_target(
    target: TargetSize,
    encoded_len: usize,
    budget: usize,
    floor: u32,
) -> TargetSize {
    let current = target.long_side();
    let scale = (budget as f64 / encoded_len.max(1) as f64).sqrt();
    let proposed = (current as f64 * scale).round() as u32;
    let long_side = proposed.max(floor).min(current).max(1);

    if target.is_square() {
        TargetSize::square(long_side)
    } else {
        let (width, height) = scale_long_side(target.width, target.height, long_side);
        TargetSize { width, height }
    }
}
