//! Plane-stress analysis pipeline: rosette or direct stresses in, principal values and yield check out.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::StressResult;
use crate::failure::FailureAssessment;
use crate::material::Material;
use crate::mohr::MohrCircle;
use crate::rosette::{RosetteKind, RosetteReading};
use crate::state::{PlaneTensor, StrainState, StressState};

/// Where the analysed state comes from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum StressInput {
    /// Stresses entered directly.
    Direct {
        /// The known stress state.
        stress: StressState,
    },
    /// Strains measured with a three-gauge rosette.
    Rosette {
        /// Gauge readings in strain units.
        reading: RosetteReading,
        /// Gauge layout.
        kind: RosetteKind,
    },
}

impl StressInput {
    /// Short description of the input source for reports.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            StressInput::Direct { .. } => "direct stress input".to_string(),
            StressInput::Rosette { kind, .. } => format!("{} strain rosette", kind.label()),
        }
    }
}

/// Complete plane-stress result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StressAnalysis {
    /// The input that produced this result.
    pub input: StressInput,
    /// Strain state in the reference axes.
    pub strain: StrainState,
    /// Stress state in the reference axes.
    pub stress: StressState,
    /// Mohr's circle and principal stresses.
    pub principal_stress: MohrCircle,
    /// Mohr's circle and principal strains (radius is γmax/2).
    pub principal_strain: MohrCircle,
    /// Probe angle in radians.
    pub probe_angle: f64,
    /// Stress state in axes rotated by the probe angle.
    pub rotated: StressState,
    /// Von Mises check against the material's yield stress.
    pub failure: FailureAssessment,
}

/// Run the plane-stress pipeline for `input`, rotating the result by `probe_angle` radians.
///
/// # Errors
///
/// Returns [`crate::MaterialError`] when the material constants are not physical.
///
/// # Examples
/// ```
/// use planar_mechanics::{analyze_plane_stress, Material, StressInput, StressState};
///
/// let input = StressInput::Direct { stress: StressState::new(50.0, -10.0, 40.0) };
/// let result = analyze_plane_stress(&input, &Material::default(), 0.0).expect("valid input");
/// assert!((result.principal_stress.principal_1 - 70.0).abs() < 1.0e-9);
/// ```
pub fn analyze_plane_stress(
    input: &StressInput,
    material: &Material,
    probe_angle: f64,
) -> StressResult<StressAnalysis> {
    material.validate()?;
    let (strain, stress) = match input {
        StressInput::Direct { stress } => (material.strain_from_stress(stress)?, *stress),
        StressInput::Rosette { reading, kind } => {
            let strain = reading.to_strain(*kind);
            (strain, material.stress_from_strain(&strain)?)
        }
    };
    debug!("analysing {}: {stress:?}, {strain:?}", input.describe());

    let principal_stress = stress.mohr_circle();
    let failure = FailureAssessment::assess(
        principal_stress.principal_1,
        principal_stress.principal_2,
        material.yield_stress,
    );
    debug!(
        "sigma_1 = {:.4}, sigma_2 = {:.4}, von Mises = {:.4}, FoS = {:.4}",
        principal_stress.principal_1,
        principal_stress.principal_2,
        failure.von_mises,
        failure.factor_of_safety
    );

    Ok(StressAnalysis {
        input: *input,
        strain,
        stress,
        principal_stress,
        principal_strain: strain.mohr_circle(),
        probe_angle,
        rotated: stress.rotated(probe_angle),
        failure,
    })
}
