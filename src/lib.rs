#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod errors;
pub mod failure;
pub mod geometry;
pub mod material;
pub mod mohr;
pub mod plane_stress;
pub mod rosette;
pub mod state;
pub mod stiffness;
pub mod truss;

pub use errors::{MaterialError, MemberPropertyError, StressResult, TrussError, TrussResult};
pub use failure::{factor_of_safety, von_mises, FailureAssessment, SafetyStatus};
pub use geometry::{
    dof_count, dof_index, dof_owner, member_dofs, Axis, Displacement, Force, Point,
};
pub use material::Material;
pub use mohr::MohrCircle;
pub use plane_stress::{analyze_plane_stress, StressAnalysis, StressInput};
pub use rosette::{RosetteKind, RosetteReading};
pub use state::{PlaneTensor, StrainState, StressState};
pub use stiffness::MemberStiffness;
pub use truss::{
    ForceState, Load, Member, MemberForce, Node, NodeResult, Reaction, Resultant, TrussModel,
    TrussSolution,
};
