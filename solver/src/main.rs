use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use lemin::{parse_colony, Schedule};
use tracing::info;

use crate::cli::Args;

mod cli;

const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

fn write_highlighted(out: &mut impl Write, schedule: &Schedule<'_>) -> io::Result<()> {
    for turn in schedule.turns() {
        let line = turn.display_with(|step, f| {
            if step.arrived {
                write!(f, "{GREEN}{step}{RESET}")
            } else {
                write!(f, "{step}")
            }
        });
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn run(args: &Args) -> anyhow::Result<()> {
    let text = fs::read_to_string(&args.map_file)
        .with_context(|| format!("failed to read {}", args.map_file.display()))?;

    let colony = parse_colony(&text)?;
    let schedule = colony.solve_with(&args.solver_config())?;
    info!(
        units = colony.units(),
        paths = schedule.plan().routes().len(),
        turns = schedule.turns().len(),
        "solved"
    );

    let mut out = io::stdout().lock();
    if !args.no_echo {
        out.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    if args.highlight {
        write_highlighted(&mut out, &schedule)?;
    } else {
        write!(out, "{schedule}")?;
    }
    out.flush()?;

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}
