//! Direct stiffness building blocks: member blocks, global assembly and the reduced solve.

use log::{debug, trace, warn};
use nalgebra::{DMatrix, DVector, Matrix4, RowVector4, Vector2};

use crate::errors::{TrussError, TrussResult};
use crate::geometry::{dof_owner, member_dofs, Point};

/// Smallest pivot, relative to the largest, accepted by the reduced solve.
pub const PIVOT_TOLERANCE: f64 = 1.0e-10;

/// Axial stiffness of a single member expressed in global coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberStiffness {
    /// Member length.
    pub length: f64,
    /// Direction cosine with the global X axis.
    pub cos: f64,
    /// Direction cosine with the global Y axis.
    pub sin: f64,
    /// Axial stiffness A·E/L.
    pub axial: f64,
    /// Global degrees of freedom in local block order.
    pub dofs: [usize; 4],
}

impl MemberStiffness {
    /// Build the stiffness description for `member` spanning `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns [`TrussError::DegenerateGeometry`] when the two nodes coincide.
    pub fn build(
        member: usize,
        nodes: (usize, usize),
        positions: (Point, Point),
        area: f64,
        elastic_modulus: f64,
    ) -> TrussResult<Self> {
        let (start, end) = (positions.0.to_vector(), positions.1.to_vector());
        let delta: Vector2<f64> = end - start;
        let length = delta.norm();
        let scale = start.norm().max(end.norm()).max(1.0);
        if nodes.0 == nodes.1 || length <= f64::EPSILON * scale {
            return Err(TrussError::DegenerateGeometry { member });
        }
        let stiffness = Self {
            length,
            cos: delta.x / length,
            sin: delta.y / length,
            axial: area * elastic_modulus / length,
            dofs: member_dofs(nodes.0, nodes.1),
        };
        trace!(
            "member {member}: L = {:.6e}, c = {:.6}, s = {:.6}, AE/L = {:.6e}",
            stiffness.length,
            stiffness.cos,
            stiffness.sin,
            stiffness.axial
        );
        Ok(stiffness)
    }

    /// Row vector mapping the member's four global displacements to axial elongation.
    #[must_use]
    pub fn elongation_row(&self) -> RowVector4<f64> {
        RowVector4::new(-self.cos, -self.sin, self.cos, self.sin)
    }

    /// The 4×4 stiffness block in global coordinates.
    #[must_use]
    pub fn local_block(&self) -> Matrix4<f64> {
        let (c, s) = (self.cos, self.sin);
        let (cc, cs, ss) = (c * c, c * s, s * s);
        self.axial
            * Matrix4::new(
                cc, cs, -cc, -cs, //
                cs, ss, -cs, -ss, //
                -cc, -cs, cc, cs, //
                -cs, -ss, cs, ss,
            )
    }

    /// Axial force (positive in tension) from the member's global displacements.
    #[must_use]
    pub fn axial_force(&self, displacements: &DVector<f64>) -> f64 {
        let local = self.dofs.map(|dof| displacements[dof]);
        self.axial * (self.elongation_row() * nalgebra::Vector4::from(local))[0]
    }
}

/// Superpose the member blocks into the global stiffness matrix.
#[must_use]
pub fn assemble_global_stiffness(dof_count: usize, members: &[MemberStiffness]) -> DMatrix<f64> {
    let mut matrix = DMatrix::zeros(dof_count, dof_count);
    for member in members {
        let block = member.local_block();
        for (row_local, &global_row) in member.dofs.iter().enumerate() {
            for (col_local, &global_col) in member.dofs.iter().enumerate() {
                matrix[(global_row, global_col)] += block[(row_local, col_local)];
            }
        }
    }
    debug!(
        "assembled {dof_count}x{dof_count} stiffness matrix from {} members",
        members.len()
    );
    matrix
}

/// Complement of `restrained` within `0..dof_count`, in ascending order.
#[must_use]
pub fn free_dofs(dof_count: usize, restrained: &[usize]) -> Vec<usize> {
    (0..dof_count)
        .filter(|dof| !restrained.contains(dof))
        .collect()
}

/// Solve `K_ff · U_f = F_f` and scatter the result into a full displacement vector.
///
/// Restrained degrees of freedom keep a displacement of zero.
///
/// # Errors
///
/// Returns [`TrussError::UnstableStructure`] when the reduced matrix is singular or
/// its smallest LU pivot falls below [`PIVOT_TOLERANCE`] relative to the largest.
pub fn solve_reduced(
    stiffness: &DMatrix<f64>,
    load: &DVector<f64>,
    free: &[usize],
) -> TrussResult<DVector<f64>> {
    let mut displacements = DVector::zeros(load.len());
    if free.is_empty() {
        return Ok(displacements);
    }
    let k_ff = stiffness.select_rows(free).select_columns(free);
    let f_f = load.select_rows(free);
    debug!("solving reduced system with {} free dofs", free.len());

    let lu = k_ff.lu();
    let pivots = lu.u().diagonal().map(f64::abs);
    let largest = pivots.max();
    let unstable = |index: usize| {
        let (node, axis) = dof_owner(free[index]);
        warn!("reduced stiffness lost rank at node {node} along {axis:?}");
        TrussError::UnstableStructure { node, axis }
    };
    if let Some(index) = pivots
        .iter()
        .position(|pivot| !pivot.is_finite() || *pivot <= PIVOT_TOLERANCE * largest)
    {
        return Err(unstable(index));
    }
    let solution = lu.solve(&f_f).ok_or_else(|| unstable(free.len() - 1))?;
    if let Some(index) = solution.iter().position(|value| !value.is_finite()) {
        return Err(unstable(index));
    }
    for (idx, &dof) in free.iter().enumerate() {
        displacements[dof] = solution[idx];
    }
    Ok(displacements)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    use super::*;
    use crate::geometry::Axis;

    fn diagonal_member() -> MemberStiffness {
        MemberStiffness::build(0, (0, 1), (Point::new(0.0, 0.0), Point::new(4.0, 3.0)), 0.01, 2.1e11)
            .expect("valid member")
    }

    #[test]
    fn direction_cosines_and_length() {
        let member = diagonal_member();
        assert_relative_eq!(member.length, 5.0);
        assert_relative_eq!(member.cos, 0.8);
        assert_relative_eq!(member.sin, 0.6);
        assert_relative_eq!(member.axial, 0.01 * 2.1e11 / 5.0);
        assert_eq!(member.dofs, [0, 1, 2, 3]);
    }

    #[test]
    fn local_block_is_symmetric_and_singular() {
        let member = diagonal_member();
        let block = member.local_block();
        assert_relative_eq!(block, block.transpose(), epsilon = 1.0e-6);

        // Rigid translation and motion perpendicular to the axis produce no force.
        let translation = Vector4::new(1.0, 1.0, 1.0, 1.0);
        let perpendicular = Vector4::new(0.0, 0.0, -member.sin, member.cos);
        let scale = member.axial;
        assert!((block * translation).norm() <= 1.0e-12 * scale);
        assert!((block * perpendicular).norm() <= 1.0e-12 * scale);

        let eigen = block.symmetric_eigen();
        let nonzero = eigen
            .eigenvalues
            .iter()
            .filter(|value| value.abs() > 1.0e-9 * scale)
            .count();
        assert_eq!(nonzero, 1);
    }

    #[test]
    fn coincident_nodes_are_degenerate() {
        let error = MemberStiffness::build(
            7,
            (0, 1),
            (Point::new(2.0, 2.0), Point::new(2.0, 2.0)),
            0.01,
            2.1e11,
        )
        .expect_err("zero length rejected");
        assert_eq!(error, TrussError::DegenerateGeometry { member: 7 });

        let error = MemberStiffness::build(
            2,
            (1, 1),
            (Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
            0.01,
            2.1e11,
        )
        .expect_err("self loop rejected");
        assert_eq!(error, TrussError::DegenerateGeometry { member: 2 });
    }

    #[test]
    fn zero_length_verdict_ignores_member_direction() {
        // A gap far below rounding at this distance from the origin.
        let near = Point::new(0.0, 0.0);
        let far = Point::new(1.0e9, 0.0);
        let nudged = Point::new(1.0e9 + 1.0e-7, 0.0);
        for (start, end) in [(far, nudged), (nudged, far)] {
            let error = MemberStiffness::build(0, (0, 1), (start, end), 0.01, 2.1e11)
                .expect_err("zero length rejected");
            assert_eq!(error, TrussError::DegenerateGeometry { member: 0 });
        }
        for (start, end) in [(near, far), (far, near)] {
            let member = MemberStiffness::build(0, (0, 1), (start, end), 0.01, 2.1e11)
                .expect("long member accepted");
            assert_relative_eq!(member.length, 1.0e9);
        }
    }

    #[test]
    fn assembly_superposes_shared_dofs() {
        let left =
            MemberStiffness::build(0, (0, 1), (Point::new(0.0, 0.0), Point::new(1.0, 0.0)), 1.0, 1.0)
                .expect("valid member");
        let right =
            MemberStiffness::build(1, (1, 2), (Point::new(1.0, 0.0), Point::new(2.0, 0.0)), 1.0, 1.0)
                .expect("valid member");
        let matrix = assemble_global_stiffness(6, &[left, right]);
        assert_relative_eq!(matrix[(2, 2)], 2.0);
        assert_relative_eq!(matrix[(0, 2)], -1.0);
        assert_relative_eq!(matrix[(2, 4)], -1.0);
        assert_relative_eq!(matrix[(0, 4)], 0.0);
        assert_relative_eq!(matrix, matrix.transpose());
    }

    #[test]
    fn free_dofs_skip_restraints() {
        assert_eq!(free_dofs(6, &[0, 1, 5]), vec![2, 3, 4]);
        assert!(free_dofs(2, &[0, 1]).is_empty());
    }

    #[test]
    fn unrestrained_bar_is_unstable() {
        let bar =
            MemberStiffness::build(0, (0, 1), (Point::new(0.0, 0.0), Point::new(1.0, 0.0)), 1.0, 1.0)
                .expect("valid member");
        let matrix = assemble_global_stiffness(4, &[bar]);
        let load = DVector::from_vec(vec![0.0, 0.0, 1.0, 0.0]);
        let error = solve_reduced(&matrix, &load, &[0, 1, 2, 3]).expect_err("mechanism detected");
        // Nothing resists vertical motion, so the first vertical column has no pivot.
        assert_eq!(
            error,
            TrussError::UnstableStructure {
                node: 0,
                axis: Axis::Y
            }
        );
    }

    #[test]
    fn restrained_dofs_stay_at_zero() {
        let bar =
            MemberStiffness::build(0, (0, 1), (Point::new(0.0, 0.0), Point::new(2.0, 0.0)), 0.5, 4.0)
                .expect("valid member");
        let matrix = assemble_global_stiffness(4, &[bar.clone()]);
        let load = DVector::from_vec(vec![0.0, 0.0, 3.0, 0.0]);
        let displacements = solve_reduced(&matrix, &load, &[2]).expect("stable bar");
        assert_relative_eq!(displacements[2], 3.0 * 2.0 / (0.5 * 4.0));
        assert_eq!(displacements[0], 0.0);
        assert_eq!(displacements[3], 0.0);
        assert_relative_eq!(bar.axial_force(&displacements), 3.0);
        assert_eq!(crate::geometry::dof_owner(3), (1, Axis::Y));
    }
}
