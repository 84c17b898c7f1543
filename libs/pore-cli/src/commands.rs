//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;
use pore_batch::seed::resolve_base_seed;
use pore_layout::{PlacementSampler, SampleOutcome};
use pore_mesh::export::StlFormat;
use pore_mesh::{MeshEngine, SvgRenderer};

use crate::args::ParamArgs;

/// Runs a full batch on the mesh backend.
pub fn run(args: &ParamArgs, output: Option<PathBuf>, segments: u32, ascii: bool) -> Result<()> {
    let mut params = args.resolve()?;
    if let Some(output) = output {
        params.output_root = output;
    }

    let stl_format = if ascii { StlFormat::Ascii } else { StlFormat::Binary };
    let mut engine = MeshEngine::default()
        .with_segments(segments)
        .with_stl_format(stl_format);
    let mut renderer = SvgRenderer::new();

    let batch = pore_batch::run(&params, &mut engine, &mut renderer).context("batch run failed")?;

    println!(
        "{:<48} {:>6} {:>11} {:>12}",
        "MODEL", "PORES", "POROSITY %", "MASS g"
    );
    for model in batch.models() {
        println!(
            "{:<48} {:>6} {:>11.4} {:>12.6}",
            model.name,
            model.report.pore_count,
            model.report.porosity_percent(),
            model.report.mass
        );
    }

    let stats = batch.stats();
    println!(
        "{} models written to {} (seed {}, {} retries)",
        batch.models().len(),
        params.output_root.display(),
        batch.base_seed(),
        stats.retries
    );
    Ok(())
}

/// Samples and reports every model without building solids.
pub fn plan(args: &ParamArgs, json: bool) -> Result<()> {
    let params = args.resolve()?;
    let batch = pore_batch::plan(&params).context("planning failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
        return Ok(());
    }

    println!(
        "{:<48} {:>6} {:>11} {:>12} {:>8}",
        "MODEL", "PORES", "POROSITY %", "MASS g", "ATTEMPT"
    );
    for model in &batch.models {
        println!(
            "{:<48} {:>6} {:>11.4} {:>12.6} {:>8}",
            model.name,
            model.report.pore_count,
            model.report.porosity_percent(),
            model.report.mass,
            model.attempt
        );
    }
    println!(
        "{} models planned (seed {}, {} retries)",
        batch.models.len(),
        batch.base_seed,
        batch.retries
    );
    Ok(())
}

/// Samples one layout and prints it as JSON.
pub fn sample(args: &ParamArgs) -> Result<()> {
    let params = args.resolve()?;
    let seed = resolve_base_seed(params.seed);
    let sampler = PlacementSampler::new(params.layout)?;

    match sampler.sample_seeded(seed) {
        SampleOutcome::Accepted(layout) => {
            info!("sampled {} pores with seed {seed}", layout.len());
            println!("{}", serde_json::to_string_pretty(&layout)?);
            Ok(())
        }
        SampleOutcome::Exhausted(exhaustion) => bail!(
            "sampler exhausted ({:?}): placed {} of {} pores, pore {} failed after {} draws (seed {seed})",
            exhaustion.reason,
            exhaustion.partial.len(),
            params.layout.pore_count,
            exhaustion.pore_index + 1,
            exhaustion.attempts
        ),
    }
}
