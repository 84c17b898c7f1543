//! Command-line arguments and how they override a parameters file.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use config::constants::DEFAULT_PORE_SEGMENTS;
use pore_batch::{BatchParams, ExhaustionPolicy};
use pore_layout::PoreShape;

/// Generate batches of porous cube models
#[derive(Parser, Debug)]
#[command(name = "porogen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build every model and write solids, reports and images
    Run {
        #[command(flatten)]
        params: ParamArgs,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Tessellation segments per pore
        #[arg(long, default_value_t = DEFAULT_PORE_SEGMENTS)]
        segments: u32,

        /// Write ASCII STL instead of binary
        #[arg(long)]
        ascii: bool,
    },

    /// Sample layouts and reports for every model without building solids
    Plan {
        #[command(flatten)]
        params: ParamArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sample a single layout and print it as JSON
    Sample {
        #[command(flatten)]
        params: ParamArgs,
    },
}

/// Generation parameters shared by every subcommand.
///
/// Flags override values loaded from `--params`.
#[derive(Args, Debug, Default)]
pub struct ParamArgs {
    /// Batch parameters file (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Number of models
    #[arg(short = 'n', long)]
    pub models: Option<usize>,

    /// Pores per model
    #[arg(long)]
    pub pores: Option<usize>,

    /// Sphere pore radius (mm)
    #[arg(long, conflicts_with = "ellipsoid")]
    pub radius: Option<f64>,

    /// Ellipsoid pore semi-axes (mm), as RX,RY,RZ
    #[arg(long, value_delimiter = ',', num_args = 3, value_name = "RX,RY,RZ")]
    pub ellipsoid: Option<Vec<f64>>,

    /// Cube edge length (mm)
    #[arg(long)]
    pub cube_size: Option<f64>,

    /// Gaussian mean as a fraction of the cube edge
    #[arg(long)]
    pub mean: Option<f64>,

    /// Gaussian standard deviation as a fraction of the cube edge
    #[arg(long)]
    pub std_dev: Option<f64>,

    /// Clearance gap (mm)
    #[arg(long)]
    pub gap: Option<f64>,

    /// Candidate draws per pore
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Material density (g/cm³)
    #[arg(long)]
    pub density: Option<f64>,

    /// Base seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Distance between cross-sections (mm)
    #[arg(long)]
    pub section_step: Option<f64>,

    /// Retry cap across the whole run
    #[arg(long)]
    pub max_retries: Option<usize>,

    /// Run time limit in seconds
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<f64>,

    /// Keep incomplete layouts holding at least this many pores
    #[arg(long, value_name = "MIN_PORES")]
    pub accept_partial: Option<usize>,

    /// Retry models whose geometry or rendering failed
    #[arg(long)]
    pub retry_failures: bool,
}

impl ParamArgs {
    /// Loads the parameters file, if any, and applies every flag.
    pub fn resolve(&self) -> Result<BatchParams> {
        let mut params = match &self.params {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading parameters file {}", path.display()))?;
                serde_json::from_str::<BatchParams>(&text)
                    .with_context(|| format!("parsing parameters file {}", path.display()))?
            }
            None => BatchParams::default(),
        };

        let layout = &mut params.layout;
        if let Some(pores) = self.pores {
            layout.pore_count = pores;
        }
        if let Some(radius) = self.radius {
            layout.shape = PoreShape::sphere(radius)?;
        }
        if let Some(axes) = &self.ellipsoid {
            let [x, y, z] = axes.as_slice() else {
                bail!("--ellipsoid takes exactly three semi-axes, got {}", axes.len());
            };
            layout.shape = PoreShape::ellipsoid(*x, *y, *z)?;
        }
        if let Some(size) = self.cube_size {
            layout.cube_size = size;
        }
        if let Some(mean) = self.mean {
            layout.mean = mean;
        }
        if let Some(std_dev) = self.std_dev {
            layout.std_dev = std_dev;
        }
        if let Some(gap) = self.gap {
            layout.gap = gap;
        }
        if let Some(attempts) = self.max_attempts {
            layout.max_attempts_per_pore = attempts;
        }

        if let Some(models) = self.models {
            params.model_count = models;
        }
        if let Some(density) = self.density {
            params.material_density = density;
        }
        if let Some(seed) = self.seed {
            params.seed = Some(seed);
        }
        if let Some(step) = self.section_step {
            params.section_step = step;
        }
        if let Some(retries) = self.max_retries {
            params.max_total_retries = retries;
        }
        if let Some(secs) = self.time_limit {
            let limit = Duration::try_from_secs_f64(secs)
                .with_context(|| format!("invalid --time-limit {secs}"))?;
            params.time_limit = Some(limit);
        }
        if let Some(min_pores) = self.accept_partial {
            params.exhaustion_policy = ExhaustionPolicy::AcceptPartial { min_pores };
        }
        if self.retry_failures {
            params.retry_collaborator_failures = true;
        }

        params.validate()?;
        Ok(params)
    }
}
