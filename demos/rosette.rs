use planar_mechanics::{
    analyze_plane_stress, Material, RosetteKind, RosetteReading, StressInput,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Aluminium in MPa
    let material = Material::new(70_000.0, 0.33, 270.0)?;

    // Delta rosette readings in microstrain
    let input = StressInput::Rosette {
        reading: RosetteReading::from_microstrain(200.0, 150.0, -100.0),
        kind: RosetteKind::Delta,
    };

    let analysis = analyze_plane_stress(&input, &material, 30.0_f64.to_radians())?;
    println!(
        "sigma_1 = {:.1} MPa, sigma_2 = {:.1} MPa at {:.1} deg",
        analysis.principal_stress.principal_1,
        analysis.principal_stress.principal_2,
        analysis.principal_stress.principal_angle_degrees()
    );
    println!(
        "Von Mises factor of safety: {:.2} ({:?})",
        analysis.failure.factor_of_safety, analysis.failure.status
    );

    Ok(())
}
