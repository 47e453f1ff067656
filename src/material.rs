//! Isotropic linear elastic material and the plane-stress form of Hooke's law.

use serde::{Deserialize, Serialize};

use crate::errors::{MaterialError, StressResult};
use crate::state::{StrainState, StressState};

/// Material constants for a plane-stress analysis.
///
/// Stresses, E and σy must share one unit (the command-line front end uses MPa).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Young's modulus E.
    pub elastic_modulus: f64,
    /// Poisson's ratio ν.
    pub poisson_ratio: f64,
    /// Yield stress σy.
    pub yield_stress: f64,
}

impl Material {
    /// Create a material after checking the constants are physical.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::InvalidMaterial`] when E ≤ 0 or |ν| ≥ 1, and
    /// [`MaterialError::NonPositiveYieldStress`] when σy ≤ 0.
    ///
    /// # Examples
    /// ```
    /// use planar_mechanics::Material;
    ///
    /// let steel = Material::new(200_000.0, 0.3, 250.0).expect("valid steel");
    /// assert!((steel.shear_modulus() - 76_923.076_9).abs() < 1.0e-3);
    /// assert!(Material::new(200_000.0, 1.0, 250.0).is_err());
    /// ```
    pub fn new(elastic_modulus: f64, poisson_ratio: f64, yield_stress: f64) -> StressResult<Self> {
        let material = Self {
            elastic_modulus,
            poisson_ratio,
            yield_stress,
        };
        material.validate()?;
        Ok(material)
    }

    /// Check the constants without constructing a new value.
    ///
    /// # Errors
    ///
    /// See [`Material::new`].
    pub fn validate(&self) -> StressResult<()> {
        self.validate_elastic()?;
        if !(self.yield_stress.is_finite() && self.yield_stress > 0.0) {
            return Err(MaterialError::NonPositiveYieldStress {
                yield_stress: self.yield_stress,
            });
        }
        Ok(())
    }

    /// Check only E and ν, the constants Hooke's law depends on.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::InvalidMaterial`] when E ≤ 0 or |ν| ≥ 1.
    pub fn validate_elastic(&self) -> StressResult<()> {
        let invalid = |reason| MaterialError::InvalidMaterial {
            reason,
            elastic_modulus: self.elastic_modulus,
            poisson_ratio: self.poisson_ratio,
        };
        if !(self.elastic_modulus.is_finite() && self.elastic_modulus > 0.0) {
            return Err(invalid("elastic modulus must be positive"));
        }
        if !(self.poisson_ratio.is_finite() && self.poisson_ratio.abs() < 1.0) {
            return Err(invalid("Poisson ratio must lie strictly between -1 and 1"));
        }
        Ok(())
    }

    /// Shear modulus G = E / (2(1 + ν)).
    #[must_use]
    pub fn shear_modulus(&self) -> f64 {
        self.elastic_modulus / (2.0 * (1.0 + self.poisson_ratio))
    }

    /// Strains produced by a plane stress state.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::InvalidMaterial`] when E or ν is invalid.
    pub fn strain_from_stress(&self, stress: &StressState) -> StressResult<StrainState> {
        self.validate_elastic()?;
        let (e, nu) = (self.elastic_modulus, self.poisson_ratio);
        Ok(StrainState::new(
            (stress.sigma_x - nu * stress.sigma_y) / e,
            (stress.sigma_y - nu * stress.sigma_x) / e,
            stress.tau_xy / self.shear_modulus(),
        ))
    }

    /// Plane stress state that produces the given strains.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::InvalidMaterial`] when E or ν is invalid.
    pub fn stress_from_strain(&self, strain: &StrainState) -> StressResult<StressState> {
        self.validate_elastic()?;
        let nu = self.poisson_ratio;
        let factor = self.elastic_modulus / (1.0 - nu * nu);
        Ok(StressState::new(
            factor * (strain.epsilon_x + nu * strain.epsilon_y),
            factor * (strain.epsilon_y + nu * strain.epsilon_x),
            self.shear_modulus() * strain.gamma_xy,
        ))
    }
}

impl Default for Material {
    /// Structural steel in MPa: E = 200 GPa, ν = 0.3, σy = 250 MPa.
    fn default() -> Self {
        Self {
            elastic_modulus: 200_000.0,
            poisson_ratio: 0.3,
            yield_stress: 250.0,
        }
    }
}
