//! Linear scale from data values to pixel offsets

use serde::{Deserialize, Serialize};

/// Maps a data domain linearly onto a pixel range
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    /// Create a new scale
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a data value to the range
    ///
    /// A degenerate domain, or a non-finite value, maps to the middle of the
    /// range. Values outside the domain extrapolate.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;

        let t = if span != 0.0 && span.is_finite() && value.is_finite() {
            (value - d0) / span
        } else {
            0.5
        };

        r0 + (r1 - r0) * t
    }

    /// Bit-exact identity of the scale, usable as a cache key
    pub fn key(&self) -> [u64; 4] {
        [
            self.domain.0.to_bits(),
            self.domain.1.to_bits(),
            self.range.0.to_bits(),
            self.range.1.to_bits(),
        ]
    }
}
