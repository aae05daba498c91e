//! AOC CLI - Command-line interface for running Advent of Code solvers

mod cli;
mod error;
mod input;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_core::{RegistryBuilder, SolveOutcome, SolverRegistry};
use clap::Parser;
use cli::Args;
use error::CliError;
use log::{LevelFilter, debug};

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    if args.input.is_some() && (args.year.is_none() || args.day.is_none()) {
        return Err(CliError::InputNeedsYearDay);
    }

    let registry = build_registry(&args.tags)?;

    let work_items: Vec<_> = registry
        .iter_info()
        .filter(|info| args.year.is_none_or(|y| info.year == y))
        .filter(|info| args.day.is_none_or(|d| info.day == d))
        .collect();
    if work_items.is_empty() {
        return Err(CliError::NoSolversMatched);
    }

    for info in work_items {
        let path = match &args.input {
            Some(path) => path.clone(),
            None => input::input_path(&args.inputs_dir, info.year, info.day, args.test),
        };
        debug!("year {} day {}: input {}", info.year, info.day, path.display());
        let text = input::read_input(&path)?;

        let mut solver = registry.create_solver(info.year, info.day, &text)?;
        if !args.quiet {
            println!(
                "{}/day{:02} (parsed in {})",
                info.year,
                info.day,
                format_duration(solver.parse_duration())
            );
        }

        let parts = match args.part {
            Some(p) if p <= info.parts => p..=p,
            Some(_) => continue,
            None => 1..=info.parts,
        };
        for part in parts {
            let outcome = solver.solve(part)?;
            print_outcome(info.year, info.day, part, &outcome, args.quiet);
        }
    }

    Ok(())
}

fn print_outcome(year: u16, day: u8, part: u8, outcome: &SolveOutcome, quiet: bool) {
    if quiet {
        println!("{}", outcome.answer);
    } else {
        println!(
            "{}/day{:02} part {}: {} ({})",
            year,
            day,
            part,
            outcome.answer,
            format_duration(outcome.duration())
        );
    }
}

fn format_duration(delta: chrono::TimeDelta) -> String {
    let micros = delta.num_microseconds().unwrap_or(i64::MAX);
    if micros >= 1_000_000 {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    } else if micros >= 1_000 {
        format!("{:.2}ms", micros as f64 / 1_000.0)
    } else {
        format!("{}us", micros)
    }
}

/// Build registry from linked plugins, optionally filtered by tags
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = RegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_plugins_where(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
