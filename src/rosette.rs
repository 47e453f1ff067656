//! Strain-gauge rosette reduction.

use serde::{Deserialize, Serialize};

use crate::state::StrainState;

/// Conversion from microstrain to strain.
pub const MICROSTRAIN: f64 = 1.0e-6;

/// Gauge layout of a three-element rosette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosetteKind {
    /// Gauges at 0°, 45° and 90°.
    Rectangular,
    /// Gauges at 0°, 60° and 120°.
    Delta,
}

impl RosetteKind {
    /// Gauge orientations from the X axis, in degrees.
    #[must_use]
    pub const fn gauge_angles_degrees(self) -> [f64; 3] {
        match self {
            RosetteKind::Rectangular => [0.0, 45.0, 90.0],
            RosetteKind::Delta => [0.0, 60.0, 120.0],
        }
    }

    /// Human readable layout label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            RosetteKind::Rectangular => "rectangular (0°, 45°, 90°)",
            RosetteKind::Delta => "delta (0°, 60°, 120°)",
        }
    }
}

impl std::str::FromStr for RosetteKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "rectangular" | "rect" | "45" => Ok(RosetteKind::Rectangular),
            "delta" | "60" => Ok(RosetteKind::Delta),
            other => Err(format!(
                "unknown rosette kind '{other}', expected 'rectangular' or 'delta'"
            )),
        }
    }
}

/// Three gauge readings εa, εb, εc in strain units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RosetteReading {
    /// Gauge A, aligned with the X axis.
    pub a: f64,
    /// Gauge B, at 45° or 60°.
    pub b: f64,
    /// Gauge C, at 90° or 120°.
    pub c: f64,
}

impl RosetteReading {
    /// Create a reading from strains.
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Create a reading from gauge values in microstrain.
    #[must_use]
    pub fn from_microstrain(a: f64, b: f64, c: f64) -> Self {
        Self::new(a * MICROSTRAIN, b * MICROSTRAIN, c * MICROSTRAIN)
    }

    /// Solve the gauge equations for the strain state in the rosette's axes.
    ///
    /// # Examples
    /// ```
    /// use planar_mechanics::{RosetteKind, RosetteReading};
    ///
    /// let reading = RosetteReading::from_microstrain(200.0, 150.0, -100.0);
    /// let strain = reading.to_strain(RosetteKind::Rectangular);
    /// assert!((strain.gamma_xy - 200.0e-6).abs() < 1.0e-12);
    /// ```
    #[must_use]
    pub fn to_strain(&self, kind: RosetteKind) -> StrainState {
        let Self { a, b, c } = *self;
        match kind {
            RosetteKind::Rectangular => StrainState::new(a, c, 2.0 * b - (a + c)),
            RosetteKind::Delta => StrainState::new(
                a,
                (2.0 * b + 2.0 * c - a) / 3.0,
                (2.0 / 3.0_f64.sqrt()) * (b - c),
            ),
        }
    }

    /// Readings a rosette of `kind` would report under `strain`.
    #[must_use]
    pub fn synthesize(strain: &StrainState, kind: RosetteKind) -> Self {
        let [a, b, c] = kind
            .gauge_angles_degrees()
            .map(|angle| strain.normal_at(angle.to_radians()));
        Self::new(a, b, c)
    }

    /// Readings expressed in microstrain.
    #[must_use]
    pub fn in_microstrain(&self) -> [f64; 3] {
        [self.a, self.b, self.c].map(|value| value / MICROSTRAIN)
    }
}
