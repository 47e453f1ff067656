//! Closed-form principal values of a plane tensor.

use serde::{Deserialize, Serialize};

use crate::state::PlaneTensor;

/// Geometry of Mohr's circle for a plane tensor.
///
/// This is the eigen-decomposition of the symmetric 2×2 tensor written in
/// closed form: the principal values are `center ± radius`, and
/// `principal_angle` rotates the X axis onto the direction of `principal_1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MohrCircle {
    /// Mean normal value.
    pub center: f64,
    /// Circle radius, equal to the maximum in-plane tensor shear.
    pub radius: f64,
    /// Major principal value.
    pub principal_1: f64,
    /// Minor principal value.
    pub principal_2: f64,
    /// Angle from the X axis to the major principal direction, in radians.
    pub principal_angle: f64,
}

impl MohrCircle {
    /// Compute the circle of `state`.
    pub fn of<T: PlaneTensor>(state: &T) -> Self {
        let center = state.average();
        let radius = state.radius();
        Self {
            center,
            radius,
            principal_1: center + radius,
            principal_2: center - radius,
            principal_angle: 0.5
                * (2.0 * state.tensor_shear()).atan2(state.normal_x() - state.normal_y()),
        }
    }

    /// Principal angle in degrees.
    #[must_use]
    pub fn principal_angle_degrees(&self) -> f64 {
        self.principal_angle.to_degrees()
    }

    /// Maximum in-plane tensor shear (τmax for stress, γmax/2 for strain).
    #[must_use]
    pub fn max_shear(&self) -> f64 {
        self.radius
    }
}
