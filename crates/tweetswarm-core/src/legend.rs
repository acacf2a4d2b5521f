//! Gradient legend for the active encoding mode

use serde::Serialize;

use crate::color::{EncodingMode, Rgb};

/// Number of color blocks in the legend bar
pub const LEGEND_BANDS: usize = 20;

/// One block of the legend bar
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Band {
    /// Lower bound of the covered value range
    pub lo_bound: f64,
    /// Upper bound of the covered value range
    pub hi_bound: f64,
    /// Fill color, the point color at the band midpoint
    pub color: Rgb,
    /// Vertical slot, 0 at the top
    pub position: usize,
}

impl Band {
    pub fn midpoint(&self) -> f64 {
        (self.lo_bound + self.hi_bound) / 2.0
    }
}

/// Legend bar plus its boundary labels
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    pub mode: EncodingMode,
    /// Bands ordered by position; band 0 covers the highest values
    pub bands: Vec<Band>,
    pub top_label: &'static str,
    pub bottom_label: &'static str,
}

/// Build the legend for an encoding mode
///
/// The domain is split into [`LEGEND_BANDS`] equal ranges that tile it with no
/// gap or overlap. Each band is colored with the same scale used for points,
/// so a value gets one color everywhere.
pub fn legend(mode: EncodingMode) -> Legend {
    let (lo, hi) = mode.domain();
    let scale = mode.scale();
    let bound = |k: usize| lo + (hi - lo) * k as f64 / LEGEND_BANDS as f64;

    let bands = (0..LEGEND_BANDS)
        .map(|position| {
            let k = LEGEND_BANDS - 1 - position;
            let lo_bound = bound(k);
            let hi_bound = bound(k + 1);
            Band {
                lo_bound,
                hi_bound,
                color: scale.sample((lo_bound + hi_bound) / 2.0),
                position,
            }
        })
        .collect();

    let (top_label, bottom_label) = mode.labels();

    Legend {
        mode,
        bands,
        top_label,
        bottom_label,
    }
}
