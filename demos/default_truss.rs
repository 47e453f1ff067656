use planar_mechanics::{Load, TrussModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Start from the braced three-node example and add a second load at the apex
    let mut model = TrussModel::braced_example();
    model.add_load(Load::new(1, 0.0, -5_000.0));

    // Solve and unwrap the result
    let solution = model.solve()?;

    for member in &solution.member_forces {
        println!(
            "Member {} ({}-{}): {:+.1} N, {}",
            member.member,
            member.start,
            member.end,
            member.force,
            member.state.label()
        );
    }
    for reaction in &solution.reactions {
        println!(
            "Node {} {}: {:+.1} N",
            reaction.node,
            reaction.axis.reaction_label(),
            reaction.value
        );
    }

    Ok(())
}
