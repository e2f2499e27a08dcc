use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use psd_dist::to_reconstructable_string;

use crate::config::{LoadedRun, RunConfig};

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// YAML run configuration.
    #[arg(long)]
    pub config: PathBuf,
    /// Output file; standard output when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// One reconstructable string per member.
pub fn encode(run: &LoadedRun) -> Vec<String> {
    run.ensemble.iter().map(to_reconstructable_string).collect()
}

pub fn run(args: &EncodeArgs) -> Result<(), Box<dyn Error>> {
    let loaded = RunConfig::load(&args.config)?.build()?;
    let mut text = encode(&loaded).join("\n");
    text.push('\n');
    match &args.out {
        Some(path) => fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}
