//! Von Mises yield check for plane stress.

use serde::{Deserialize, Serialize};

/// Von Mises stresses at or below this fraction of `max(1, σy)` count as an unloaded state.
pub const ZERO_STRESS_TOLERANCE: f64 = 1.0e-12;

/// Factor of safety above which a state is reported as comfortably safe.
pub const SAFE_FACTOR: f64 = 1.5;

/// Coarse verdict derived from the factor of safety.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyStatus {
    /// FoS above [`SAFE_FACTOR`].
    Safe,
    /// 1 < FoS ≤ [`SAFE_FACTOR`].
    Marginal,
    /// FoS ≤ 1, yielding is predicted.
    Failure,
}

impl SafetyStatus {
    /// Classify a factor of safety.
    #[must_use]
    pub fn from_factor(factor_of_safety: f64) -> Self {
        if factor_of_safety > SAFE_FACTOR {
            SafetyStatus::Safe
        } else if factor_of_safety > 1.0 {
            SafetyStatus::Marginal
        } else {
            SafetyStatus::Failure
        }
    }
}

/// Result of the von Mises check.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FailureAssessment {
    /// Equivalent von Mises stress.
    pub von_mises: f64,
    /// σy / σvm, infinite for an unloaded state.
    pub factor_of_safety: f64,
    /// Verdict for the factor of safety.
    pub status: SafetyStatus,
}

impl FailureAssessment {
    /// Assess principal stresses `principal_1`, `principal_2` against `yield_stress`.
    ///
    /// # Examples
    /// ```
    /// use planar_mechanics::{FailureAssessment, SafetyStatus};
    ///
    /// let check = FailureAssessment::assess(70.0, -30.0, 250.0);
    /// assert!((check.von_mises - 7_900.0_f64.sqrt()).abs() < 1.0e-9);
    /// assert_eq!(check.status, SafetyStatus::Safe);
    /// ```
    #[must_use]
    pub fn assess(principal_1: f64, principal_2: f64, yield_stress: f64) -> Self {
        let von_mises = von_mises(principal_1, principal_2);
        let factor_of_safety = factor_of_safety(von_mises, yield_stress);
        Self {
            von_mises,
            factor_of_safety,
            status: SafetyStatus::from_factor(factor_of_safety),
        }
    }
}

/// Von Mises equivalent stress for plane principal stresses.
#[must_use]
pub fn von_mises(principal_1: f64, principal_2: f64) -> f64 {
    (principal_1 * principal_1 - principal_1 * principal_2 + principal_2 * principal_2)
        .max(0.0)
        .sqrt()
}

/// Ratio of yield stress to von Mises stress, `+∞` when the state is effectively unloaded.
#[must_use]
pub fn factor_of_safety(von_mises: f64, yield_stress: f64) -> f64 {
    if von_mises <= ZERO_STRESS_TOLERANCE * yield_stress.abs().max(1.0) {
        f64::INFINITY
    } else {
        yield_stress / von_mises
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn reference_principal_stresses() {
        let check = FailureAssessment::assess(70.0, -30.0, 250.0);
        assert_relative_eq!(check.von_mises, 88.881_944_173, epsilon = 1.0e-6);
        assert_relative_eq!(check.factor_of_safety, 2.812_719_752, epsilon = 1.0e-6);
        assert_eq!(check.status, SafetyStatus::Safe);
    }

    #[test]
    fn unloaded_state_never_fails() {
        let check = FailureAssessment::assess(0.0, 0.0, 250.0);
        assert_eq!(check.von_mises, 0.0);
        assert!(check.factor_of_safety.is_infinite());
        assert_eq!(check.status, SafetyStatus::Safe);

        assert!(factor_of_safety(1.0e-14, 250.0).is_infinite());
    }

    #[test]
    fn equal_biaxial_and_pure_shear() {
        assert_relative_eq!(von_mises(100.0, 100.0), 100.0);
        assert_relative_eq!(von_mises(50.0, -50.0), 50.0 * 3.0_f64.sqrt());
    }

    #[test]
    fn status_bands() {
        assert_eq!(SafetyStatus::from_factor(2.0), SafetyStatus::Safe);
        assert_eq!(SafetyStatus::from_factor(1.5), SafetyStatus::Marginal);
        assert_eq!(SafetyStatus::from_factor(1.2), SafetyStatus::Marginal);
        assert_eq!(SafetyStatus::from_factor(1.0), SafetyStatus::Failure);
        assert_eq!(SafetyStatus::from_factor(0.4), SafetyStatus::Failure);
    }
}
