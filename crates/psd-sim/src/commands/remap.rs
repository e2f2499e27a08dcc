use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use psd_core::PsdError;
use psd_dist::{to_reconstructable_string, DistributionRecord};
use psd_instrument::{InstrumentResponse, RemapReport};
use serde::Serialize;

use crate::config::{LoadedRun, RunConfig};

#[derive(Args, Debug)]
pub struct RemapArgs {
    /// YAML run configuration.
    #[arg(long)]
    pub config: PathBuf,
    /// Output directory for remap artefacts.
    #[arg(long)]
    pub out: PathBuf,
    /// Override the configured volumetric shape factor.
    #[arg(long)]
    pub shape_factor: Option<f64>,
}

/// Remapped member with its diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemapEntry {
    /// Member index in the configuration.
    pub index: usize,
    /// Remapped distribution.
    pub record: DistributionRecord,
    /// Remap diagnostics.
    pub report: RemapReport,
}

/// Remaps every member, optionally overriding the shape factor.
pub fn compute(run: &LoadedRun, shape_factor: Option<f64>) -> Result<Vec<RemapEntry>, PsdError> {
    let mut opts = run.remap.clone();
    if let Some(kv) = shape_factor {
        opts.shape_factor = kv;
    }
    let response = InstrumentResponse::from_options(&opts)?;
    run.ensemble
        .iter()
        .enumerate()
        .map(|(index, dist)| {
            let (remapped, report) = response.apply_with_report(dist, &opts)?;
            let label = run.labels.get(index).cloned().flatten();
            let record = DistributionRecord::from_distribution(&remapped, label)?;
            Ok(RemapEntry {
                index,
                record,
                report,
            })
        })
        .collect()
}

pub fn run(args: &RemapArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let loaded = RunConfig::load(&args.config)?.build()?;
    let entries = compute(&loaded, args.shape_factor)?;
    fs::write(
        args.out.join("remapped.json"),
        serde_json::to_string_pretty(&entries)?,
    )?;

    let mut strings = Vec::with_capacity(entries.len());
    for entry in &entries {
        strings.push(to_reconstructable_string(&entry.record.to_distribution()?));
    }
    fs::write(args.out.join("remapped.txt"), strings.join("\n") + "\n")?;
    Ok(())
}
