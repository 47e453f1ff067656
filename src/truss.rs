//! Planar pin-jointed truss model and its direct stiffness solution.

use log::debug;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::errors::{MemberPropertyError, TrussError, TrussResult};
use crate::geometry::{dof_count, dof_index, dof_owner, Axis, Displacement, Force, Point};
use crate::stiffness::{assemble_global_stiffness, free_dofs, solve_reduced, MemberStiffness};

/// Axial forces with a magnitude at or below this value are reported as [`ForceState::Zero`].
pub const ZERO_FORCE_TOLERANCE: f64 = 1.0e-9;

/// A truss joint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Position of the joint.
    pub position: Point,
    /// Whether horizontal translation is restrained.
    #[serde(default)]
    pub support_x: bool,
    /// Whether vertical translation is restrained.
    #[serde(default)]
    pub support_y: bool,
}

impl Node {
    /// An unsupported joint at (`x`, `y`).
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            support_x: false,
            support_y: false,
        }
    }

    /// Same joint with the given restraints.
    #[must_use]
    pub const fn supported(mut self, support_x: bool, support_y: bool) -> Self {
        self.support_x = support_x;
        self.support_y = support_y;
        self
    }

    /// Whether translation along `axis` is restrained.
    #[must_use]
    pub const fn is_restrained(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.support_x,
            Axis::Y => self.support_y,
        }
    }
}

/// A two-force member connecting two joints.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Start node index.
    pub start: usize,
    /// End node index.
    pub end: usize,
    /// Cross-sectional area.
    pub area: f64,
    /// Elastic modulus.
    pub elastic_modulus: f64,
}

impl Member {
    /// Create a member from `start` to `end`.
    #[must_use]
    pub const fn new(start: usize, end: usize, area: f64, elastic_modulus: f64) -> Self {
        Self {
            start,
            end,
            area,
            elastic_modulus,
        }
    }

    /// Check the section and material are physical.
    fn validate_properties(&self) -> Result<(), MemberPropertyError> {
        if !(self.area.is_finite() && self.area > 0.0) {
            return Err(MemberPropertyError::NonPositiveArea { area: self.area });
        }
        if !(self.elastic_modulus.is_finite() && self.elastic_modulus > 0.0) {
            return Err(MemberPropertyError::NonPositiveElasticModulus {
                elastic_modulus: self.elastic_modulus,
            });
        }
        Ok(())
    }
}

/// A point load applied at a joint in global axes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// Loaded node index.
    pub node: usize,
    /// Force components.
    #[serde(flatten)]
    pub force: Force,
}

impl Load {
    /// Create a load at `node`.
    #[must_use]
    pub const fn new(node: usize, fx: f64, fy: f64) -> Self {
        Self {
            node,
            force: Force::new(fx, fy),
        }
    }
}

/// Complete input for one truss analysis.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrussModel {
    /// Joints, indexed from zero.
    pub nodes: Vec<Node>,
    /// Members, indexed from zero.
    pub members: Vec<Member>,
    /// Nodal loads; several loads on one node add up.
    #[serde(default)]
    pub loads: Vec<Load>,
}

impl TrussModel {
    /// Create an empty model.
    ///
    /// # Examples
    /// ```
    /// use planar_mechanics::TrussModel;
    ///
    /// let model = TrussModel::new();
    /// assert_eq!(model.node_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Three joints and two steel members with a load at the apex.
    ///
    /// Node 0 is pinned, node 2 rests on a roller that restrains vertical movement, and
    /// node 1 carries (10 kN, -20 kN). Without a bottom chord the roller lets the two
    /// rafters fold, so [`TrussModel::solve`] reports
    /// [`TrussError::UnstableStructure`]. See [`TrussModel::braced_example`].
    #[must_use]
    pub fn default_example() -> Self {
        let mut model = Self::new();
        let left = model.add_node(Node::new(0.0, 0.0).supported(true, true));
        let apex = model.add_node(Node::new(4.0, 3.0));
        let right = model.add_node(Node::new(8.0, 0.0).supported(false, true));
        model.add_member(Member::new(left, apex, 0.01, 2.1e11));
        model.add_member(Member::new(apex, right, 0.01, 2.1e11));
        model.add_load(Load::new(apex, 10_000.0, -20_000.0));
        model
    }

    /// [`TrussModel::default_example`] closed by a bottom chord from node 0 to node 2.
    ///
    /// Three members and three restraints on three joints make it statically determinate.
    ///
    /// # Examples
    /// ```
    /// use planar_mechanics::TrussModel;
    ///
    /// let solution = TrussModel::braced_example().solve().expect("stable truss");
    /// assert!((solution.member_forces[2].force - 18_333.333).abs() < 1.0e-3);
    /// ```
    #[must_use]
    pub fn braced_example() -> Self {
        let mut model = Self::default_example();
        model.add_member(Member::new(0, 2, 0.01, 2.1e11));
        model
    }

    /// Append a joint and return its index.
    pub fn add_node(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Append a member and return its index.
    pub fn add_member(&mut self, member: Member) -> usize {
        self.members.push(member);
        self.members.len() - 1
    }

    /// Append a load.
    pub fn add_load(&mut self, load: Load) {
        self.loads.push(load);
    }

    /// Number of joints.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Restrained global degrees of freedom in ascending order.
    #[must_use]
    pub fn restrained_dofs(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .flat_map(|(index, node)| {
                [Axis::X, Axis::Y]
                    .into_iter()
                    .filter(move |&axis| node.is_restrained(axis))
                    .map(move |axis| dof_index(index, axis))
            })
            .collect()
    }

    /// Global load vector with loads on the same node summed.
    ///
    /// # Errors
    ///
    /// Returns [`TrussError::UnknownLoadNode`] when a load targets a missing node and
    /// [`TrussError::NonFiniteLoad`] when a component is NaN or infinite.
    pub fn load_vector(&self) -> TrussResult<DVector<f64>> {
        let mut load = DVector::zeros(dof_count(self.node_count()));
        for (index, entry) in self.loads.iter().enumerate() {
            if entry.node >= self.node_count() {
                return Err(TrussError::UnknownLoadNode {
                    load: index,
                    node: entry.node,
                });
            }
            if !entry.force.is_finite() {
                return Err(TrussError::NonFiniteLoad { load: index });
            }
            load[dof_index(entry.node, Axis::X)] += entry.force.fx;
            load[dof_index(entry.node, Axis::Y)] += entry.force.fy;
        }
        Ok(load)
    }

    /// Validate every member and build its stiffness description.
    ///
    /// # Errors
    ///
    /// Returns [`TrussError`] for unknown nodes, non-finite coordinates, non-physical
    /// properties or zero length.
    pub fn member_stiffnesses(&self) -> TrussResult<Vec<MemberStiffness>> {
        self.members
            .iter()
            .enumerate()
            .map(|(index, member)| {
                for node in [member.start, member.end] {
                    let Some(joint) = self.nodes.get(node) else {
                        return Err(TrussError::UnknownNode {
                            member: index,
                            node,
                        });
                    };
                    if !joint.position.is_finite() {
                        return Err(TrussError::NonFiniteNode { node });
                    }
                }
                member
                    .validate_properties()
                    .map_err(|source| TrussError::InvalidMemberProperties {
                        member: index,
                        source,
                    })?;
                MemberStiffness::build(
                    index,
                    (member.start, member.end),
                    (
                        self.nodes[member.start].position,
                        self.nodes[member.end].position,
                    ),
                    member.area,
                    member.elastic_modulus,
                )
            })
            .collect()
    }

    /// Analyse the truss under its loads.
    ///
    /// # Errors
    ///
    /// Returns [`TrussError`] when the input is malformed or the structure is unstable.
    ///
    /// # Examples
    /// ```
    /// use planar_mechanics::{Load, Member, Node, TrussModel};
    ///
    /// let mut model = TrussModel::new();
    /// let fixed = model.add_node(Node::new(0.0, 0.0).supported(true, true));
    /// let tip = model.add_node(Node::new(1.0, 0.0).supported(false, true));
    /// model.add_member(Member::new(fixed, tip, 0.01, 200.0e9));
    /// model.add_load(Load::new(tip, -1_000.0, 0.0));
    ///
    /// let solution = model.solve().expect("stable cantilever");
    /// assert!((solution.nodes[tip].displacement.ux + 5.0e-7).abs() < 1.0e-15);
    /// ```
    pub fn solve(&self) -> TrussResult<TrussSolution> {
        debug!(
            "solving truss with {} nodes, {} members and {} loads",
            self.node_count(),
            self.member_count(),
            self.loads.len()
        );
        let members = self.member_stiffnesses()?;
        let load = self.load_vector()?;
        let dofs = dof_count(self.node_count());
        let stiffness = assemble_global_stiffness(dofs, &members);
        let restrained = self.restrained_dofs();
        let free = free_dofs(dofs, &restrained);
        let displacements = solve_reduced(&stiffness, &load, &free)?;

        let internal = &stiffness * &displacements;
        let reactions = restrained
            .iter()
            .map(|&dof| {
                let (node, axis) = dof_owner(dof);
                Reaction {
                    node,
                    axis,
                    value: internal[dof] - load[dof],
                }
            })
            .collect();

        let member_forces = members
            .iter()
            .zip(&self.members)
            .enumerate()
            .map(|(index, (stiffness, member))| {
                let force = stiffness.axial_force(&displacements);
                MemberForce {
                    member: index,
                    start: member.start,
                    end: member.end,
                    length: stiffness.length,
                    force,
                    stress: force / member.area,
                    state: ForceState::classify(force),
                }
            })
            .collect();

        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| NodeResult {
                node: index,
                position: node.position,
                displacement: Displacement::new(
                    displacements[dof_index(index, Axis::X)],
                    displacements[dof_index(index, Axis::Y)],
                ),
                load: Force::new(
                    load[dof_index(index, Axis::X)],
                    load[dof_index(index, Axis::Y)],
                ),
            })
            .collect();

        Ok(TrussSolution {
            displacements: displacements.iter().copied().collect(),
            nodes,
            reactions,
            member_forces,
        })
    }
}

/// Whether a member is stretched or squeezed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceState {
    /// Positive axial force.
    Tension,
    /// Negative axial force.
    Compression,
    /// Force within [`ZERO_FORCE_TOLERANCE`] of zero.
    Zero,
}

impl ForceState {
    /// Classify a signed axial force.
    #[must_use]
    pub fn classify(force: f64) -> Self {
        if force.abs() <= ZERO_FORCE_TOLERANCE {
            ForceState::Zero
        } else if force > 0.0 {
            ForceState::Tension
        } else {
            ForceState::Compression
        }
    }

    /// Report label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ForceState::Tension => "tension",
            ForceState::Compression => "compression",
            ForceState::Zero => "zero-force",
        }
    }
}

/// Support reaction along one restrained degree of freedom.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// Supported node.
    pub node: usize,
    /// Restrained axis.
    pub axis: Axis,
    /// Reaction force.
    pub value: f64,
}

/// Internal force of one member.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberForce {
    /// Member index.
    pub member: usize,
    /// Start node index.
    pub start: usize,
    /// End node index.
    pub end: usize,
    /// Undeformed length.
    pub length: f64,
    /// Axial force, positive in tension.
    pub force: f64,
    /// Axial stress, force over area.
    pub stress: f64,
    /// Tension / compression label.
    pub state: ForceState,
}

/// Per-node view of the solution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeResult {
    /// Node index.
    pub node: usize,
    /// Undeformed position.
    pub position: Point,
    /// Solved displacement.
    pub displacement: Displacement,
    /// Total applied load.
    pub load: Force,
}

/// Net force and moment about the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resultant {
    /// Sum of horizontal forces.
    pub fx: f64,
    /// Sum of vertical forces.
    pub fy: f64,
    /// Sum of moments about the origin, counter-clockwise positive.
    pub moment: f64,
}

/// Output of [`TrussModel::solve`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrussSolution {
    /// Global displacement vector indexed by degree of freedom.
    pub displacements: Vec<f64>,
    /// Displacement and load per node.
    pub nodes: Vec<NodeResult>,
    /// Reactions in ascending degree-of-freedom order.
    pub reactions: Vec<Reaction>,
    /// Member forces in member order.
    pub member_forces: Vec<MemberForce>,
}

impl TrussSolution {
    /// Net force and moment of applied loads plus reactions.
    ///
    /// A solved truss is in equilibrium, so every component is zero up to rounding.
    #[must_use]
    pub fn resultant(&self) -> Resultant {
        let mut total = Resultant {
            fx: 0.0,
            fy: 0.0,
            moment: 0.0,
        };
        let mut add = |position: Point, fx: f64, fy: f64| {
            total.fx += fx;
            total.fy += fy;
            total.moment += position.x * fy - position.y * fx;
        };
        for node in &self.nodes {
            add(node.position, node.load.fx, node.load.fy);
        }
        for reaction in &self.reactions {
            let position = self.nodes[reaction.node].position;
            match reaction.axis {
                Axis::X => add(position, reaction.value, 0.0),
                Axis::Y => add(position, 0.0, reaction.value),
            }
        }
        total
    }

    /// Member with the largest absolute axial force.
    #[must_use]
    pub fn critical_member(&self) -> Option<&MemberForce> {
        self.member_forces
            .iter()
            .max_by(|a, b| a.force.abs().total_cmp(&b.force.abs()))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn restrained_dofs_follow_support_flags() {
        let model = TrussModel::default_example();
        assert_eq!(model.restrained_dofs(), vec![0, 1, 5]);
    }

    #[test]
    fn loads_on_one_node_accumulate() {
        let mut model = TrussModel::default_example();
        model.add_load(Load::new(1, -4_000.0, 500.0));
        let load = model.load_vector().expect("valid loads");
        assert_relative_eq!(load[2], 6_000.0);
        assert_relative_eq!(load[3], -19_500.0);
        assert_eq!(load[0], 0.0);
    }

    #[test]
    fn unknown_nodes_are_rejected() {
        let mut model = TrussModel::default_example();
        model.add_member(Member::new(1, 9, 0.01, 2.1e11));
        let error = model.solve().expect_err("unknown node rejected");
        assert_eq!(error, TrussError::UnknownNode { member: 2, node: 9 });

        let mut model = TrussModel::default_example();
        model.add_load(Load::new(4, 1.0, 0.0));
        let error = model.solve().expect_err("unknown load node rejected");
        assert_eq!(error, TrussError::UnknownLoadNode { load: 1, node: 4 });
    }

    #[test]
    fn invalid_member_properties_are_rejected() {
        let mut model = TrussModel::default_example();
        model.members[1].area = 0.0;
        let error = model.solve().expect_err("zero area rejected");
        assert!(matches!(
            error,
            TrussError::InvalidMemberProperties {
                member: 1,
                source: MemberPropertyError::NonPositiveArea { .. }
            }
        ));

        let mut model = TrussModel::default_example();
        model.members[0].elastic_modulus = -1.0;
        let error = model.solve().expect_err("negative modulus rejected");
        assert!(matches!(
            error,
            TrussError::InvalidMemberProperties {
                member: 0,
                source: MemberPropertyError::NonPositiveElasticModulus { .. }
            }
        ));
    }

    #[test]
    fn default_example_is_a_mechanism() {
        // The rafters can fold about node 0 while the roller slides along X.
        let error = TrussModel::default_example()
            .solve()
            .expect_err("mechanism detected");
        assert_eq!(
            error,
            TrussError::UnstableStructure {
                node: 2,
                axis: Axis::X
            }
        );
    }

    #[test]
    fn braced_example_member_forces() {
        let solution = TrussModel::braced_example().solve().expect("stable truss");
        // Joint equilibrium at node 2: 0.6·F12 + 13750 = 0, then F02 = -0.8·F12.
        // At node 0: 0.6·F01 + 6250 = 0.
        let forces: Vec<f64> = solution
            .member_forces
            .iter()
            .map(|member| member.force)
            .collect();
        assert_relative_eq!(forces[0], -10_416.666_666_7, max_relative = 1.0e-9);
        assert_relative_eq!(forces[1], -22_916.666_666_7, max_relative = 1.0e-9);
        assert_relative_eq!(forces[2], 18_333.333_333_3, max_relative = 1.0e-9);
        assert_eq!(solution.member_forces[0].state, ForceState::Compression);
        assert_eq!(solution.member_forces[2].state, ForceState::Tension);
        assert_relative_eq!(solution.member_forces[0].length, 5.0);
        assert_relative_eq!(solution.member_forces[2].length, 8.0);
        assert_relative_eq!(
            solution.member_forces[2].stress,
            18_333.333_333_3 / 0.01,
            max_relative = 1.0e-9
        );
        assert_eq!(
            solution.critical_member().map(|member| member.member),
            Some(1)
        );
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let mut model = TrussModel::braced_example();
        model.nodes[1].position.x = f64::NAN;
        let error = model.solve().expect_err("NaN coordinate rejected");
        assert_eq!(error, TrussError::NonFiniteNode { node: 1 });

        let mut model = TrussModel::braced_example();
        model.nodes[2].position.y = f64::INFINITY;
        let error = model.solve().expect_err("infinite coordinate rejected");
        assert_eq!(error, TrussError::NonFiniteNode { node: 2 });
    }

    #[test]
    fn non_finite_loads_are_rejected() {
        let mut model = TrussModel::braced_example();
        model.add_load(Load::new(2, 0.0, f64::NAN));
        let error = model.solve().expect_err("NaN load rejected");
        assert_eq!(error, TrussError::NonFiniteLoad { load: 1 });

        let mut model = TrussModel::braced_example();
        model.loads[0].force.fx = f64::NEG_INFINITY;
        let error = model.load_vector().expect_err("infinite load rejected");
        assert_eq!(error, TrussError::NonFiniteLoad { load: 0 });
    }

    #[test]
    fn force_state_labels() {
        assert_eq!(ForceState::classify(3.0), ForceState::Tension);
        assert_eq!(ForceState::classify(-3.0), ForceState::Compression);
        assert_eq!(ForceState::classify(1.0e-12), ForceState::Zero);
        assert_eq!(ForceState::Tension.label(), "tension");
    }
}
