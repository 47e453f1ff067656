//! Plane stress and strain states and their coordinate transformation.
//!
//! Both states are symmetric 2×2 tensors. Shear is stored in engineering form
//! (τxy for stress, γxy for strain); [`PlaneTensor::tensor_shear`] exposes the
//! off-diagonal tensor component so the Mohr's circle math is shared.

use serde::{Deserialize, Serialize};

use crate::mohr::MohrCircle;

/// Common view over a symmetric plane tensor.
pub trait PlaneTensor: Sized {
    /// Normal component along X.
    fn normal_x(&self) -> f64;

    /// Normal component along Y.
    fn normal_y(&self) -> f64;

    /// Off-diagonal tensor component (τxy for stress, γxy/2 for strain).
    fn tensor_shear(&self) -> f64;

    /// Rebuild the state from its normal components and tensor shear.
    fn from_tensor(normal_x: f64, normal_y: f64, tensor_shear: f64) -> Self;

    /// Mean of the two normal components, the centre of Mohr's circle.
    fn average(&self) -> f64 {
        (self.normal_x() + self.normal_y()) / 2.0
    }

    /// Radius of Mohr's circle.
    fn radius(&self) -> f64 {
        ((self.normal_x() - self.normal_y()) / 2.0).hypot(self.tensor_shear())
    }

    /// Principal values, their orientation and the circle they lie on.
    fn mohr_circle(&self) -> MohrCircle {
        MohrCircle::of(self)
    }

    /// The same state expressed in axes rotated counter-clockwise by `theta` radians.
    fn rotated(&self, theta: f64) -> Self {
        let average = self.average();
        let half_difference = (self.normal_x() - self.normal_y()) / 2.0;
        let (sin, cos) = (2.0 * theta).sin_cos();
        let normal_x = average + half_difference * cos + self.tensor_shear() * sin;
        let shear = -half_difference * sin + self.tensor_shear() * cos;
        Self::from_tensor(normal_x, 2.0 * average - normal_x, shear)
    }
}

/// Plane stress state (σx, σy, τxy).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StressState {
    /// Normal stress along X.
    pub sigma_x: f64,
    /// Normal stress along Y.
    pub sigma_y: f64,
    /// In-plane shear stress.
    pub tau_xy: f64,
}

impl StressState {
    /// Create a stress state.
    #[must_use]
    pub const fn new(sigma_x: f64, sigma_y: f64, tau_xy: f64) -> Self {
        Self {
            sigma_x,
            sigma_y,
            tau_xy,
        }
    }
}

impl PlaneTensor for StressState {
    fn normal_x(&self) -> f64 {
        self.sigma_x
    }

    fn normal_y(&self) -> f64 {
        self.sigma_y
    }

    fn tensor_shear(&self) -> f64 {
        self.tau_xy
    }

    fn from_tensor(normal_x: f64, normal_y: f64, tensor_shear: f64) -> Self {
        Self::new(normal_x, normal_y, tensor_shear)
    }
}

/// Plane strain state (εx, εy, γxy) with engineering shear strain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrainState {
    /// Normal strain along X.
    pub epsilon_x: f64,
    /// Normal strain along Y.
    pub epsilon_y: f64,
    /// Engineering shear strain.
    pub gamma_xy: f64,
}

impl StrainState {
    /// Create a strain state.
    #[must_use]
    pub const fn new(epsilon_x: f64, epsilon_y: f64, gamma_xy: f64) -> Self {
        Self {
            epsilon_x,
            epsilon_y,
            gamma_xy,
        }
    }

    /// Normal strain measured by a gauge oriented `theta` radians from the X axis.
    #[must_use]
    pub fn normal_at(&self, theta: f64) -> f64 {
        self.rotated(theta).epsilon_x
    }
}

impl PlaneTensor for StrainState {
    fn normal_x(&self) -> f64 {
        self.epsilon_x
    }

    fn normal_y(&self) -> f64 {
        self.epsilon_y
    }

    fn tensor_shear(&self) -> f64 {
        self.gamma_xy / 2.0
    }

    fn from_tensor(normal_x: f64, normal_y: f64, tensor_shear: f64) -> Self {
        Self::new(normal_x, normal_y, 2.0 * tensor_shear)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use super::*;

    #[test]
    fn rotation_preserves_invariants() {
        let state = StressState::new(50.0, -10.0, 40.0);
        for step in 0..12_i32 {
            let theta = f64::from(step) * 0.3 - 1.5;
            let rotated = state.rotated(theta);
            assert_relative_eq!(rotated.average(), state.average(), epsilon = 1.0e-9);
            assert_relative_eq!(rotated.radius(), state.radius(), epsilon = 1.0e-9);
        }
    }

    #[test]
    fn quarter_turn_swaps_normals() {
        let state = StressState::new(50.0, -10.0, 40.0);
        let rotated = state.rotated(FRAC_PI_2);
        assert_relative_eq!(rotated.sigma_x, -10.0, epsilon = 1.0e-9);
        assert_relative_eq!(rotated.sigma_y, 50.0, epsilon = 1.0e-9);
        assert_relative_eq!(rotated.tau_xy, -40.0, epsilon = 1.0e-9);
    }

    #[test]
    fn pure_shear_strain_at_45_degrees() {
        let strain = StrainState::new(0.0, 0.0, 200.0e-6);
        assert_relative_eq!(strain.normal_at(FRAC_PI_4), 100.0e-6, epsilon = 1.0e-15);
        assert_relative_eq!(strain.radius(), 100.0e-6, epsilon = 1.0e-15);
    }
}
