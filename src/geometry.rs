//! Fundamental planar types and the degree-of-freedom numbering used by the truss solver.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Number of translational degrees of freedom carried by every node.
pub const DOFS_PER_NODE: usize = 2;

/// Position in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Coordinate along the global X axis.
    pub x: f64,
    /// Coordinate along the global Y axis.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Planar force in global axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Force {
    /// Component along the global X axis.
    pub fx: f64,
    /// Component along the global Y axis.
    pub fy: f64,
}

impl Force {
    /// Create a [`Force`] with explicit components.
    #[must_use]
    pub const fn new(fx: f64, fy: f64) -> Self {
        Self { fx, fy }
    }

    /// Whether both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.fx.is_finite() && self.fy.is_finite()
    }
}

impl std::ops::Add for Force {
    type Output = Force;

    fn add(self, rhs: Force) -> Force {
        Force::new(self.fx + rhs.fx, self.fy + rhs.fy)
    }
}

impl std::ops::AddAssign for Force {
    fn add_assign(&mut self, rhs: Force) {
        *self = *self + rhs;
    }
}

/// Translation of a node after analysis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Displacement {
    /// Displacement along the global X axis.
    pub ux: f64,
    /// Displacement along the global Y axis.
    pub uy: f64,
}

impl Displacement {
    /// Create a [`Displacement`] with explicit components.
    #[must_use]
    pub const fn new(ux: f64, uy: f64) -> Self {
        Self { ux, uy }
    }
}

/// Global axis of a nodal degree of freedom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal translation.
    X,
    /// Vertical translation.
    Y,
}

impl Axis {
    /// Offset of this axis within a node's block of degrees of freedom.
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }

    /// Short reaction label used in reports.
    #[must_use]
    pub const fn reaction_label(self) -> &'static str {
        match self {
            Axis::X => "Rx",
            Axis::Y => "Ry",
        }
    }
}

/// Global degree-of-freedom index for `node` along `axis`.
///
/// # Examples
/// ```
/// use planar_mechanics::{dof_index, Axis};
///
/// assert_eq!(dof_index(0, Axis::X), 0);
/// assert_eq!(dof_index(3, Axis::Y), 7);
/// ```
#[must_use]
pub const fn dof_index(node: usize, axis: Axis) -> usize {
    node * DOFS_PER_NODE + axis.offset()
}

/// Node and axis owning the global degree of freedom `dof`.
#[must_use]
pub const fn dof_owner(dof: usize) -> (usize, Axis) {
    let axis = if dof % DOFS_PER_NODE == 0 {
        Axis::X
    } else {
        Axis::Y
    };
    (dof / DOFS_PER_NODE, axis)
}

/// The four global degrees of freedom touched by a member, in local block order.
#[must_use]
pub const fn member_dofs(start: usize, end: usize) -> [usize; 4] {
    [
        dof_index(start, Axis::X),
        dof_index(start, Axis::Y),
        dof_index(end, Axis::X),
        dof_index(end, Axis::Y),
    ]
}

/// Total number of degrees of freedom for `node_count` nodes.
#[must_use]
pub const fn dof_count(node_count: usize) -> usize {
    node_count * DOFS_PER_NODE
}
