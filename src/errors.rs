//! Error types produced while analysing trusses or plane stress states.

use serde::Serialize;
use thiserror::Error;

use crate::geometry::Axis;

/// Result alias for the truss pipeline.
pub type TrussResult<T> = Result<T, TrussError>;

/// Result alias for the plane-stress pipeline.
pub type StressResult<T> = Result<T, MaterialError>;

/// Error returned when a truss analysis fails.
///
/// Every variant rejects the whole input set; no partial result is produced.
#[derive(Clone, Debug, Error, PartialEq, Serialize)]
pub enum TrussError {
    /// Returned when a member spans zero distance.
    #[error("member {member} has zero length")]
    DegenerateGeometry {
        /// Index of the offending member.
        member: usize,
    },
    /// Returned when the reduced stiffness matrix is singular or nearly so.
    #[error(
        "structure is unstable: no stiffness left at node {node} along {axis:?}; check supports and connectivity"
    )]
    UnstableStructure {
        /// Node owning the degree of freedom where the reduced system lost rank.
        node: usize,
        /// Axis of that degree of freedom.
        axis: Axis,
    },
    /// Returned when a member references a node that does not exist.
    #[error("member {member} references unknown node {node}")]
    UnknownNode {
        /// Index of the offending member.
        member: usize,
        /// Node index that was not found.
        node: usize,
    },
    /// Returned when a load targets a node that does not exist.
    #[error("load {load} targets unknown node {node}")]
    UnknownLoadNode {
        /// Position of the load in the input list.
        load: usize,
        /// Node index that was not found.
        node: usize,
    },
    /// Returned when a node used by a member has a NaN or infinite coordinate.
    #[error("node {node} has a non-finite position")]
    NonFiniteNode {
        /// Index of the offending node.
        node: usize,
    },
    /// Returned when a load has a NaN or infinite component.
    #[error("load {load} has a non-finite component")]
    NonFiniteLoad {
        /// Position of the load in the input list.
        load: usize,
    },
    /// Returned when the supplied properties for a member are not physically meaningful.
    #[error("member {member} has invalid properties: {source}")]
    InvalidMemberProperties {
        /// Index of the offending member.
        member: usize,
        /// Description of the invalid property.
        #[source]
        source: MemberPropertyError,
    },
}

/// Reason a member's section or material properties were rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Serialize)]
pub enum MemberPropertyError {
    /// Returned when the cross-sectional area is zero, negative or not finite.
    #[error("area must be positive (received {area})")]
    NonPositiveArea {
        /// Rejected cross-sectional area.
        area: f64,
    },
    /// Returned when the elastic modulus is zero, negative or not finite.
    #[error("elastic modulus must be positive (received {elastic_modulus})")]
    NonPositiveElasticModulus {
        /// Rejected elastic modulus.
        elastic_modulus: f64,
    },
}

/// Error returned when material constants cannot support a stress analysis.
#[derive(Clone, Debug, Error, PartialEq, Serialize)]
pub enum MaterialError {
    /// Returned when E ≤ 0 or |ν| ≥ 1, which leaves Hooke's law undefined.
    #[error("invalid material (E = {elastic_modulus}, nu = {poisson_ratio}): {reason}")]
    InvalidMaterial {
        /// Human readable reason.
        reason: &'static str,
        /// Elastic modulus as supplied.
        elastic_modulus: f64,
        /// Poisson ratio as supplied.
        poisson_ratio: f64,
    },
    /// Returned when the yield stress is zero, negative or not finite.
    #[error("yield stress must be positive (received {yield_stress})")]
    NonPositiveYieldStress {
        /// Rejected yield stress.
        yield_stress: f64,
    },
}
