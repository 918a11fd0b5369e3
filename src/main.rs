mod config;
mod input;
mod ocr;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use shiftcal_core::{filter_shifts, parse_shifts, FilterOptions, IcsOptions, Shift};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "shiftcal")]
#[command(about = "Convert German shift-plan text or images into ICS calendar files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse shift plans and write an ICS calendar file
    Convert {
        /// Input files to process (plain text or images)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (defaults to the configured one)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Attach a reminder alarm to shifts with this name (repeatable)
        #[arg(short, long)]
        reminders: Vec<String>,

        /// Only keep shifts with this name (repeatable)
        #[arg(short, long)]
        include: Vec<String>,

        /// Drop shifts with this name (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Keep special shifts (trailing *) regardless of the name filters
        #[arg(short, long)]
        special: bool,

        /// Year for the year-less dates (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Print the parsed shifts instead of writing a calendar
        #[arg(long)]
        dry_run: bool,

        /// Show per-stage shift counts
        #[arg(short, long)]
        verbose: bool,
    },
    /// Merge several ICS files into one
    Merge {
        /// ICS files to merge
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            inputs,
            output_dir,
            reminders,
            include,
            exclude,
            special,
            year,
            dry_run,
            verbose,
        } => cmd_convert(
            inputs, output_dir, reminders, include, exclude, special, year, dry_run, verbose,
        ),
        Commands::Merge { inputs, output } => cmd_merge(&inputs, &output),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_convert(
    inputs: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    reminders: Vec<String>,
    include: Vec<String>,
    exclude: Vec<String>,
    special: bool,
    year: Option<i32>,
    dry_run: bool,
    verbose: bool,
) -> Result<()> {
    let cfg = config::load_config()?;

    // The parser never reads the clock; the year is resolved here.
    let year = year.unwrap_or_else(|| Local::now().year());
    let output_dir = output_dir.unwrap_or_else(|| PathBuf::from(&cfg.output_dir));
    let reminder_names = if reminders.is_empty() {
        cfg.reminders.clone()
    } else {
        reminders
    };

    // Parse every input file into one combined record list.
    let mut all_shifts: Vec<Shift> = Vec::new();
    for path in &inputs {
        let text = input::read_input(path)?;
        let shifts = parse_shifts(&text, year)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if shifts.is_empty() {
            eprintln!("Warning: no shifts found in {}", path.display());
            continue;
        }
        if verbose {
            println!("Found {} shifts in {}", shifts.len(), path.display());
        }
        all_shifts.extend(shifts);
    }

    if all_shifts.is_empty() {
        anyhow::bail!("No shifts were parsed from the input files.");
    }

    let filter = FilterOptions {
        include,
        exclude,
        keep_special: special,
    };
    let shifts = filter_shifts(&all_shifts, &filter);
    if verbose {
        println!(
            "{} of {} shifts left after filtering",
            shifts.len(),
            all_shifts.len()
        );
    }

    if dry_run {
        for shift in &shifts {
            println!("{}", shift);
        }
        println!("\n{} shifts (dry run, nothing written)", shifts.len());
        return Ok(());
    }

    // Reported distinctly from a parse failure so callers can tell the
    // two conditions apart.
    let (first, last) = match date_range(&shifts) {
        Some(range) => range,
        None => anyhow::bail!("No shifts left after filtering."),
    };

    std::fs::create_dir_all(&output_dir).with_context(|| {
        format!("Could not create output directory {}", output_dir.display())
    })?;
    let output_file = output_dir.join(output_filename(first, last));

    let options = IcsOptions {
        reminder_names,
        timezone: cfg.timezone.clone(),
    };
    shiftcal_core::write_ics(&output_file, &shifts, &all_shifts, &options)
        .with_context(|| format!("Failed to write {}", output_file.display()))?;

    let days: HashSet<NaiveDate> = shifts.iter().map(|s| s.date).collect();
    println!("Created calendar file: {}", output_file.display());
    println!(
        "Processed {} shifts spanning {} days",
        shifts.len(),
        days.len()
    );

    Ok(())
}

fn cmd_merge(inputs: &[PathBuf], output: &Path) -> Result<()> {
    let mut contents = Vec::with_capacity(inputs.len());
    for path in inputs {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        contents.push(content);
    }

    let merged = shiftcal_core::merge_ics(&contents).context("Failed to merge calendars")?;

    std::fs::write(output, merged)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Merged {} calendars into {}", inputs.len(), output.display());
    Ok(())
}

/// Earliest and latest shift dates; the record sequence itself is never
/// resorted.
fn date_range(shifts: &[Shift]) -> Option<(NaiveDate, NaiveDate)> {
    let first = shifts.iter().map(|s| s.date).min()?;
    let last = shifts.iter().map(|s| s.date).max()?;
    Some((first, last))
}

fn output_filename(first: NaiveDate, last: NaiveDate) -> String {
    format!(
        "Shifts_{}_{}.ics",
        first.format("%d-%m"),
        last.format("%d-%m")
    )
}
