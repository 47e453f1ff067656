use std::fmt::Write;

use planar_mechanics::{PlaneTensor, StressAnalysis, TrussSolution};

/// Factor for printing strains in microstrain.
const MICRO: f64 = 1.0e6;

/// Render a textual summary of a truss solution.
///
/// Forces are printed with the sign convention of the solver: positive members are in
/// tension, negative in compression.
#[must_use]
pub fn render_truss(solution: &TrussSolution) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Truss analysis ({} nodes, {} members)",
        solution.nodes.len(),
        solution.member_forces.len()
    )
    .expect("writing to string cannot fail");

    output.push_str("\nNode displacements\n");
    for node in &solution.nodes {
        writeln!(
            &mut output,
            "  node {:>3}: ux = {:+.4e}, uy = {:+.4e}",
            node.node, node.displacement.ux, node.displacement.uy
        )
        .expect("writing to string cannot fail");
    }

    output.push_str("\nMember forces\n");
    for member in &solution.member_forces {
        writeln!(
            &mut output,
            "  member {:>3} ({}-{}): {:+.2} ({}), stress = {:+.4e}",
            member.member,
            member.start,
            member.end,
            member.force,
            member.state.label(),
            member.stress
        )
        .expect("writing to string cannot fail");
    }

    output.push_str("\nSupport reactions\n");
    for reaction in &solution.reactions {
        writeln!(
            &mut output,
            "  node {:>3} {}: {:+.2}",
            reaction.node,
            reaction.axis.reaction_label(),
            reaction.value
        )
        .expect("writing to string cannot fail");
    }

    // Equilibrium residual lets the reader sanity check supports and loads.
    let resultant = solution.resultant();
    writeln!(
        &mut output,
        "\nEquilibrium residual: sum Fx = {:.3e}, sum Fy = {:.3e}, sum M = {:.3e}",
        resultant.fx, resultant.fy, resultant.moment
    )
    .expect("writing to string cannot fail");

    output
}

/// Render a textual summary of a plane-stress analysis.
#[must_use]
pub fn render_stress(analysis: &StressAnalysis) -> String {
    let mut output = String::new();
    let principal = &analysis.principal_stress;

    writeln!(
        &mut output,
        "Plane stress analysis from {}",
        analysis.input.describe()
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Stress state: sigma_x = {:.2} MPa, sigma_y = {:.2} MPa, tau_xy = {:.2} MPa",
        analysis.stress.sigma_x, analysis.stress.sigma_y, analysis.stress.tau_xy
    )
    .expect("writing to string cannot fail");

    output.push_str("\nMohr's circle\n");
    writeln!(
        &mut output,
        "  sigma_1 = {:.2} MPa, sigma_2 = {:.2} MPa, tau_max = {:.2} MPa",
        principal.principal_1,
        principal.principal_2,
        principal.max_shear()
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "  centre = {:.2} MPa, principal angle = {:.1} deg",
        principal.center,
        principal.principal_angle_degrees()
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "  at {:.1} deg: sigma_x' = {:.2} MPa, sigma_y' = {:.2} MPa, tau_xy' = {:.2} MPa",
        analysis.probe_angle.to_degrees(),
        analysis.rotated.sigma_x,
        analysis.rotated.sigma_y,
        analysis.rotated.tau_xy
    )
    .expect("writing to string cannot fail");

    output.push_str("\nStrains\n");
    writeln!(
        &mut output,
        "  eps_x = {:.1} ue, eps_y = {:.1} ue, gamma_xy = {:.1} urad",
        analysis.strain.epsilon_x * MICRO,
        analysis.strain.epsilon_y * MICRO,
        analysis.strain.gamma_xy * MICRO
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "  eps_1 = {:.1} ue, eps_2 = {:.1} ue, gamma_max = {:.1} urad",
        analysis.principal_strain.principal_1 * MICRO,
        analysis.principal_strain.principal_2 * MICRO,
        2.0 * analysis.strain.radius() * MICRO
    )
    .expect("writing to string cannot fail");

    output.push_str("\nYield check (von Mises)\n");
    writeln!(
        &mut output,
        "  sigma_vm = {:.2} MPa, factor of safety = {:.2} ({:?})",
        analysis.failure.von_mises, analysis.failure.factor_of_safety, analysis.failure.status
    )
    .expect("writing to string cannot fail");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use planar_mechanics::{analyze_plane_stress, Material, StressInput, StressState, TrussModel};

    #[test]
    fn formats_truss_report() {
        let solution = TrussModel::braced_example()
            .solve()
            .expect("stable truss");
        let report = render_truss(&solution);
        assert!(report.contains("Truss analysis (3 nodes, 3 members)"));
        assert!(report.contains("member   0 (0-1): -10416.67 (compression)"));
        assert!(report.contains("member   2 (0-2): +18333.33 (tension)"));
        assert!(report.contains("node   2 Ry"));
    }

    #[test]
    fn formats_stress_report() {
        let input = StressInput::Direct {
            stress: StressState::new(50.0, -10.0, 40.0),
        };
        let analysis =
            analyze_plane_stress(&input, &Material::default(), 0.0).expect("analysis runs");
        let report = render_stress(&analysis);
        assert!(report.contains("direct stress input"));
        assert!(report.contains("sigma_1 = 70.00 MPa, sigma_2 = -30.00 MPa, tau_max = 50.00 MPa"));
        assert!(report.contains("principal angle = 26.6 deg"));
        assert!(report.contains("sigma_vm = 88.88 MPa, factor of safety = 2.81 (Safe)"));
    }
}
