use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use psd_core::PsdError;
use psd_dist::Selection;
use serde::Serialize;

use crate::config::{LoadedRun, RunConfig};

#[derive(Args, Debug)]
pub struct MomentsArgs {
    /// YAML run configuration.
    #[arg(long)]
    pub config: PathBuf,
    /// Moment order.
    #[arg(long)]
    pub order: Option<f64>,
    /// Members to evaluate, in output order; all members when omitted.
    #[arg(long, value_delimiter = ',')]
    pub indices: Vec<usize>,
}

/// Moment values for a selection of members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MomentsOutput {
    /// Requested order, `None` when omitted.
    pub order: Option<f64>,
    /// Selected member indices, in request order.
    pub indices: Vec<usize>,
    /// Labels of the selected members.
    pub labels: Vec<Option<String>>,
    /// One moment per selected index.
    pub values: Vec<f64>,
}

/// Moments of the selected members; an empty selection means every member.
pub fn compute(
    run: &LoadedRun,
    order: Option<f64>,
    indices: &[usize],
) -> Result<MomentsOutput, PsdError> {
    let indices: Vec<usize> = if indices.is_empty() {
        (0..run.ensemble.len()).collect()
    } else {
        indices.to_vec()
    };
    let values = run
        .ensemble
        .moments(order, &Selection::Indices(indices.clone()))?;
    let labels = if values.is_empty() {
        Vec::new()
    } else {
        indices
            .iter()
            .map(|&idx| run.labels.get(idx).cloned().flatten())
            .collect()
    };
    Ok(MomentsOutput {
        order,
        indices: if values.is_empty() { Vec::new() } else { indices },
        labels,
        values,
    })
}

pub fn run(args: &MomentsArgs) -> Result<(), Box<dyn Error>> {
    let loaded = RunConfig::load(&args.config)?.build()?;
    let output = compute(&loaded, args.order, &args.indices)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
