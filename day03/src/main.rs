use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser as _;

use day03::parser::scan;

/// Sums every `mul(a,b)` in the corrupted memory dump.
#[derive(clap::Parser)]
struct Args {
    /// corrupted memory dump
    input: PathBuf,

    /// only run one challenge: 1 ignores do()/don't(), 2 honours them
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    part: Option<u8>,
}

fn get_input(filename: &Path) -> Result<String> {
    fs::read_to_string(filename)
        .with_context(|| format!("failed to open input {}", filename.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let input = get_input(&args.input)?;

    if args.part != Some(2) {
        println!("challenge 1: {}", scan(&input, false));
    }
    if args.part != Some(1) {
        println!("challenge 2: {}", scan(&input, true));
    }

    Ok(())
}
