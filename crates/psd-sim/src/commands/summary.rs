use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use psd_core::PsdError;
use psd_dist::{parse_reconstructable, to_summary_string};

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Text file with one reconstructable string per line.
    #[arg(long)]
    pub input: PathBuf,
}

/// Summarises every non-blank line of `text`.
pub fn summarize(text: &str) -> Result<Vec<String>, PsdError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| parse_reconstructable(line).map(|dist| to_summary_string(&dist)))
        .collect()
}

pub fn run(args: &SummaryArgs) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(&args.input)?;
    for line in summarize(&text)? {
        println!("{line}");
    }
    Ok(())
}
