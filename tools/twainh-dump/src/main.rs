// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! twainh-dump - Print TWAIN struct layouts
//!
//! Shows the sizes and member offsets the compiling toolchain gives the TWAIN
//! header, and optionally cross-checks them against the declarative model.

use anyhow::{bail, Context};
use clap::{ArgAction, Parser};
use colored::*;
use twainh::{twain_schema, verify, LayoutTable, Packing, Platform};

/// Print TWAIN struct sizes and member offsets
#[derive(Parser, Debug)]
#[command(name = "twainh-dump")]
#[command(version)]
#[command(about = "Print TWAIN struct sizes and member offsets")]
struct Args {
    /// Type or struct names to show (default: everything)
    #[arg()]
    names: Vec<String>,

    /// Output format: pretty, json
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    /// Show only scalar typedefs
    #[arg(long, conflicts_with = "structs_only")]
    types_only: bool,

    /// Show only structs
    #[arg(long)]
    structs_only: bool,

    /// Cross-check the table against the layout model; exit 1 on mismatch
    #[arg(short, long)]
    check: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "p" => Ok(OutputFormat::Pretty),
            "json" | "j" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(level_for(args.verbose))
        .parse_default_env()
        .init();

    if let Err(e) = run(&args) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn level_for(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let table = LayoutTable::global().context("failed to build TWAIN layout table")?;
    let selection = select(table, args)?;
    log::info!(
        "selected {} types, {} structs",
        selection.type_count(),
        selection.struct_count()
    );

    match args.format {
        OutputFormat::Pretty => print_pretty(&selection),
        OutputFormat::Json => print_json(&selection)?,
    }

    if args.check {
        check(table)?;
    }

    Ok(())
}

/// The part of `table` picked by the name and kind filters.
fn select(table: &LayoutTable, args: &Args) -> anyhow::Result<LayoutTable> {
    for name in &args.names {
        if table.get_type(name).is_none() && table.get_struct(name).is_none() {
            bail!("unknown TWAIN type: {}", name);
        }
    }

    let named = |name: &str| args.names.is_empty() || args.names.iter().any(|n| n == name);
    Ok(table.filtered(
        |name| !args.structs_only && named(name),
        |name| !args.types_only && named(name),
    ))
}

fn describe(platform: &Platform) -> String {
    let packing = match platform.packing {
        Packing::Natural => "natural".to_string(),
        Packing::Pack(n) => format!("pack({})", n),
    };
    format!("{}-bit, {}", platform.pointer_width * 8, packing)
}

fn print_pretty(selection: &LayoutTable) {
    println!();
    println!(
        "{}",
        format!("=== TWAIN Layout ({}) ===", describe(&Platform::host())).bold()
    );

    if selection.type_count() > 0 {
        println!();
        println!("{}", "Types".bold());
        for t in selection.types() {
            println!("  {:<20} {:>5}", t.name.cyan(), t.size);
        }
    }

    for s in selection.structs() {
        println!();
        println!("  {} ({} bytes)", s.name.cyan(), s.size.to_string().yellow());
        for (member, offset) in &s.offsets {
            println!("      {:>5}  {}", offset, member);
        }
    }

    println!();
    println!("{}", "--- Summary ---".dimmed());
    println!(
        "  Types: {}  Structs: {}  Offsets: {}",
        selection.type_count(),
        selection.struct_count(),
        selection.structs().map(|s| s.offsets.len()).sum::<usize>()
    );
    println!();
}

fn print_json(selection: &LayoutTable) -> anyhow::Result<()> {
    println!("{}", twainh::to_host_json_pretty(selection)?);
    Ok(())
}

fn check(table: &LayoutTable) -> anyhow::Result<()> {
    let platform = Platform::host();
    let schema = twain_schema(platform).context("failed to build layout model")?;
    let report = verify(table, &schema).context("failed to evaluate layout model")?;

    if report.is_clean() {
        eprintln!(
            "{} {} structs, {} members agree with the layout model ({})",
            "OK".green().bold(),
            report.structs_checked(),
            report.members_checked(),
            describe(&platform)
        );
        return Ok(());
    }

    for m in report.mismatches() {
        eprintln!("  {} {}", "MISMATCH".red(), m);
    }
    bail!("{} layout mismatches", report.mismatches().len())
}
