//! CLI for exporting particle hair from a scene dump
//!
//! Usage:
//!   cargo run --release --bin hair_export -- <dump.json|dump.msgpack> [options]
//!
//! Options:
//!   --out <file>           Write script to file instead of stdout
//!   --config <file>        JSON script options
//!   --precision <n>        Float decimals
//!   --per-line <n>         Array values per line (0 = no wrapping)
//!   --runtime-type <name>  Runtime hair class
//!   --variables            Bind arrays to variables before assemble
//!   --dump-strands         Print the strand encoding as JSON instead
//!   --verbose              Debug logging

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use hair_export::{export_hair_systems, extract_strands, ArrayStyle, SceneDump, ScriptOptions};

struct Args {
    dump_path: String,
    out_path: Option<String>,
    config_path: Option<String>,
    precision: Option<usize>,
    per_line: Option<usize>,
    runtime_type: Option<String>,
    variables: bool,
    dump_strands: bool,
    verbose: bool,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <dump.json|dump.msgpack> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --out <file>           Write script to file instead of stdout");
    eprintln!("  --config <file>        JSON script options");
    eprintln!("  --precision <n>        Float decimals (default 4)");
    eprintln!("  --per-line <n>         Array values per line, 0 = no wrapping (default 32)");
    eprintln!("  --runtime-type <name>  Runtime hair class (default QI.Hair)");
    eprintln!("  --variables            Bind arrays to variables before assemble");
    eprintln!("  --dump-strands         Print the strand encoding as JSON instead");
    eprintln!("  --verbose              Debug logging");
}

fn parse_args(args: &[String]) -> Result<Args> {
    match args.get(1) {
        None => bail!("missing scene dump path"),
        Some(first) if first.starts_with('-') => {
            bail!("expected a scene dump path before options, got {}", first)
        }
        Some(_) => {}
    }

    let mut parsed = Args {
        dump_path: args[1].clone(),
        out_path: None,
        config_path: None,
        precision: None,
        per_line: None,
        runtime_type: None,
        variables: false,
        dump_strands: false,
        verbose: false,
    };

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || -> Result<String> {
            i += 1;
            args.get(i)
                .cloned()
                .with_context(|| format!("{} expects a value", flag))
        };
        match flag {
            "--out" => parsed.out_path = Some(value()?),
            "--config" => parsed.config_path = Some(value()?),
            "--precision" => parsed.precision = Some(value()?.parse().context("--precision")?),
            "--per-line" => parsed.per_line = Some(value()?.parse().context("--per-line")?),
            "--runtime-type" => parsed.runtime_type = Some(value()?),
            "--variables" => parsed.variables = true,
            "--dump-strands" => parsed.dump_strands = true,
            "--verbose" => parsed.verbose = true,
            other => bail!("unknown option {}", other),
        }
        i += 1;
    }
    Ok(parsed)
}

fn build_options(args: &Args) -> Result<ScriptOptions> {
    let mut options = match &args.config_path {
        Some(path) => ScriptOptions::from_json_file(path)?,
        None => ScriptOptions::default(),
    };
    if let Some(precision) = args.precision {
        options.float_precision = precision;
    }
    if let Some(per_line) = args.per_line {
        options.values_per_line = per_line;
    }
    if let Some(runtime_type) = &args.runtime_type {
        options.runtime_type = runtime_type.clone();
    }
    if args.variables {
        options.array_style = ArrayStyle::Variables;
    }
    Ok(options)
}

fn run(args: &Args) -> Result<bool> {
    let options = build_options(args)?;
    let dump = SceneDump::load(&args.dump_path)?;
    tracing::info!(path = %args.dump_path, systems = dump.hair_systems.len(), "loaded scene dump");

    let mut writer: Box<dyn Write> = match &args.out_path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if args.dump_strands {
        let mut all_ok = true;
        for system in &dump.hair_systems {
            match extract_strands(&system.mesh.vertices, &system.mesh.edges) {
                Ok(set) => {
                    serde_json::to_writer(&mut writer, &set)?;
                    writeln!(writer)?;
                }
                Err(err) => {
                    tracing::warn!(system = %system.name, error = %err, "extraction failed");
                    all_ok = false;
                }
            }
        }
        writer.flush()?;
        return Ok(all_ok);
    }

    let report = export_hair_systems(&dump.hair_systems, &options, &mut writer)
        .context("Failed to write hair script")?;
    writer.flush().context("Failed to flush hair script")?;

    for system in &report.systems {
        tracing::debug!(system = %system.name, outcome = ?system.outcome, "system outcome");
    }
    Ok(report.is_success())
}

fn main() -> ExitCode {
    let argv: Vec<String> = env::args().collect();
    let program = argv.first().map(String::as_str).unwrap_or("hair_export");
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {:#}", err);
            print_usage(program);
            return ExitCode::from(2);
        }
    };

    let level = if args.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
