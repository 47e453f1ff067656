use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use planar_mechanics::{
    Material, MaterialError, RosetteKind, RosetteReading, StressInput, StressState, TrussModel,
};
use thiserror::Error;

/// Megapascals per gigapascal; every stress handled by the `stress` command is in MPa.
const MPA_PER_GPA: f64 = 1_000.0;

/// Command line interface.
#[derive(Debug, Parser)]
#[command(
    name = "planar-mechanics",
    version,
    about = "Planar truss and plane-stress calculator"
)]
pub struct Cli {
    /// Log solver milestones (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Calculator to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available calculators.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve a pin-jointed truss with the direct stiffness method.
    Truss(TrussArgs),
    /// Principal stresses, Mohr's circle and von Mises check for a plane stress state.
    Stress(StressArgs),
}

/// Options of the `truss` command.
#[derive(Debug, Args)]
pub struct TrussArgs {
    /// JSON file with `nodes`, `members` and `loads`; the built-in braced three-node truss when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Print the solution as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Options of the `stress` command. Stresses and yield in MPa, modulus in GPa.
#[derive(Debug, Args)]
pub struct StressArgs {
    /// Normal stress along X.
    #[arg(long, default_value_t = 50.0, allow_negative_numbers = true)]
    pub sigma_x: f64,

    /// Normal stress along Y.
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    pub sigma_y: f64,

    /// In-plane shear stress.
    #[arg(long, default_value_t = 40.0, allow_negative_numbers = true)]
    pub tau_xy: f64,

    /// Reduce rosette readings instead of taking stresses directly (rectangular or delta).
    #[arg(long)]
    pub rosette: Option<RosetteKind>,

    /// Gauge readings A,B,C in microstrain.
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [200.0, 150.0, -100.0],
        allow_hyphen_values = true
    )]
    pub gauges: Vec<f64>,

    /// Young's modulus in GPa.
    #[arg(long, default_value_t = 200.0)]
    pub modulus_gpa: f64,

    /// Poisson's ratio.
    #[arg(long, default_value_t = 0.3, allow_negative_numbers = true)]
    pub poisson: f64,

    /// Yield stress in MPa.
    #[arg(long, default_value_t = 250.0)]
    pub yield_mpa: f64,

    /// Probe angle in degrees, counter-clockwise from X.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub angle_deg: f64,

    /// Print the analysis as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Problems turning command line options into calculator input.
#[derive(Debug, Error)]
pub enum ConditionsError {
    /// The truss file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The truss file is not valid JSON for a model.
    #[error("invalid truss description: {0}")]
    Json(#[from] serde_json::Error),
    /// A rosette needs exactly three gauges.
    #[error("a rosette needs exactly three gauge readings, received {0}")]
    GaugeCount(usize),
    /// The material constants are not physical.
    #[error(transparent)]
    Material(#[from] MaterialError),
}

impl TrussArgs {
    /// Read the model from `--input`, or fall back to the built-in example.
    pub fn load_model(&self) -> Result<TrussModel, ConditionsError> {
        let Some(path) = &self.input else {
            return Ok(TrussModel::braced_example());
        };
        let text = fs::read_to_string(path).map_err(|source| ConditionsError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl StressArgs {
    /// Material in MPa.
    pub fn material(&self) -> Result<Material, ConditionsError> {
        Ok(Material::new(
            self.modulus_gpa * MPA_PER_GPA,
            self.poisson,
            self.yield_mpa,
        )?)
    }

    /// Direct stresses, or rosette readings converted from microstrain.
    pub fn input(&self) -> Result<StressInput, ConditionsError> {
        match self.rosette {
            None => Ok(StressInput::Direct {
                stress: StressState::new(self.sigma_x, self.sigma_y, self.tau_xy),
            }),
            Some(kind) => {
                let &[a, b, c] = self.gauges.as_slice() else {
                    return Err(ConditionsError::GaugeCount(self.gauges.len()));
                };
                Ok(StressInput::Rosette {
                    reading: RosetteReading::from_microstrain(a, b, c),
                    kind,
                })
            }
        }
    }

    /// Probe angle in radians.
    pub fn probe_angle(&self) -> f64 {
        self.angle_deg.to_radians()
    }
}
