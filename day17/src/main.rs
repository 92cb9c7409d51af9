use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::style::Stylize;

use day17::{
    construct::{
        REFERENCE_PROGRAM, construct_by_simulation, construct_reference, find_self_referential,
    },
    cpu::{Cpu, CpuMode, Registers, format_output},
    input::get_debug_info,
};

/// Runs the 3-bit computer and searches for the register A that makes it print itself.
#[derive(Parser)]
struct Args {
    /// debugger dump with the registers and program
    input: PathBuf,

    /// print every executed instruction of the first run
    #[arg(short, long)]
    trace: bool,

    /// scan register A linearly below this bound instead of constructing it
    #[arg(long, value_name = "LIMIT")]
    brute_force: Option<u64>,
}

fn get_input(filename: &Path) -> Result<String> {
    fs::read_to_string(filename)
        .with_context(|| format!("failed to open input {}", filename.display()))
}

fn find_quine_a(cpu: &mut Cpu, brute_force: Option<u64>) -> Result<Option<u64>> {
    let a = match brute_force {
        Some(limit) => find_self_referential(cpu, limit)?,
        None if cpu.program() == REFERENCE_PROGRAM => construct_reference(),
        None => construct_by_simulation(cpu)?,
    };

    match a {
        Some(a) if !cpu.is_self_referential(Registers::with_a(a))? => {
            bail!("constructed A = {a} does not reproduce the program")
        }
        a => Ok(a),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let input = get_input(&args.input)?;
    let (registers, program) = get_debug_info(&input)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;

    let mut cpu = Cpu::new(program)?;
    if args.trace {
        cpu.mode = CpuMode::Trace;
    }
    let output = cpu.execute(registers)?;
    println!("{} {}", "challenge 1:".green().bold(), format_output(output));

    cpu.mode = CpuMode::Normal;
    match find_quine_a(&mut cpu, args.brute_force)? {
        Some(a) => println!("{} {a}", "challenge 2:".green().bold()),
        None => println!("{}", "challenge 2: no value of A reproduces the program".red()),
    }

    Ok(())
}
