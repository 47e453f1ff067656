mod conditions;
mod report;

use std::error::Error;

use clap::Parser;
use conditions::{Cli, Command};
use planar_mechanics::analyze_plane_stress;
use report::{render_stress, render_truss};

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // RUST_LOG still wins when set; --verbose only changes the fallback level.
    let fallback = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(fallback)).init();

    let output = match &cli.command {
        Command::Truss(args) => {
            let model = args.load_model()?;
            let solution = model.solve()?;
            if args.json {
                serde_json::to_string_pretty(&solution)?
            } else {
                render_truss(&solution)
            }
        }
        Command::Stress(args) => {
            let material = args.material()?;
            let input = args.input()?;
            let analysis = analyze_plane_stress(&input, &material, args.probe_angle())?;
            if args.json {
                serde_json::to_string_pretty(&analysis)?
            } else {
                render_stress(&analysis)
            }
        }
    };
    println!("{output}");

    Ok(())
}
