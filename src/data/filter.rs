use crate::error::InputError;

use super::model::SpectrumPoint;

// ---------------------------------------------------------------------------
// Band filter: inclusive [fmin, fmax] clip on spectrum points
// ---------------------------------------------------------------------------

/// Optional frequency bounds in Hz. An absent bound does not constrain.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BandFilter {
    pub fmin: Option<f64>,
    pub fmax: Option<f64>,
}

impl BandFilter {
    /// Build a filter, rejecting NaN bounds. `fmin > fmax` is allowed and
    /// simply selects nothing.
    pub fn new(fmin: Option<f64>, fmax: Option<f64>) -> Result<Self, InputError> {
        for (name, bound) in [("fmin", fmin), ("fmax", fmax)] {
            if let Some(value) = bound.filter(|v| v.is_nan()) {
                return Err(InputError::InvalidBound { name, value });
            }
        }
        Ok(Self { fmin, fmax })
    }

    pub fn is_active(&self) -> bool {
        self.fmin.is_some() || self.fmax.is_some()
    }

    pub fn contains(&self, frequency: f64) -> bool {
        self.fmin.map_or(true, |lo| frequency >= lo)
            && self.fmax.map_or(true, |hi| frequency <= hi)
    }

    /// Keep the points whose frequency lies inside the band, preserving order.
    pub fn apply(&self, points: Vec<SpectrumPoint>) -> Vec<SpectrumPoint> {
        if !self.is_active() {
            return points;
        }
        points
            .into_iter()
            .filter(|p| self.contains(p.frequency))
            .collect()
    }
}
