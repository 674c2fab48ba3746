//! ppm tolerance windows for mass matching.

use serde::Serialize;

use crate::errors::CoreError;

/// Inclusive window `[m - m*ppm/1e6, m + m*ppm/1e6]` around a target mass.
///
/// The half-width is relative to the target, so the window grows with the
/// mass. Bounds are always ordered (`lo <= hi`), including for negative input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToleranceWindow {
    pub center: f64,
    pub ppm: u32,
    pub lo: f64,
    pub hi: f64,
}

impl ToleranceWindow {
    /// Build the window for `mass` at `ppm` parts-per-million.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `mass` is NaN or infinite.
    pub fn new(mass: f64, ppm: u32) -> Result<Self, CoreError> {
        if !mass.is_finite() {
            return Err(CoreError::Validation(format!(
                "mass must be a finite number, got {mass}"
            )));
        }
        let delta = (mass * f64::from(ppm) / 1_000_000.0).abs();
        Ok(Self {
            center: mass,
            ppm,
            lo: mass - delta,
            hi: mass + delta,
        })
    }

    /// Absolute half-width of the window.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        (self.hi - self.lo) / 2.0
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }
}
