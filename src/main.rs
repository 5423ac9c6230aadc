use anyhow::{Context, Result};
use clap::Parser;
use fix_exec_metrics::{config::Config, csv_io, metrics, utils, RunCtx};
use log::info;
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
};

#[derive(clap::Parser)]
struct Args {
    /// optional JSON file overriding parsing and output defaults
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Join limit-order fills with their New Order Single into a CSV
    FixToCsv {
        #[arg(long = "input_fix_file", value_parser = utils::fix_path)]
        input_fix_file: PathBuf,
        #[arg(long = "output_csv_file", value_parser = utils::csv_path)]
        output_csv_file: PathBuf,
    },
    /// Per-venue price improvement and execution speed from a joined CSV
    CalcMetrics {
        #[arg(long = "input_csv_file", value_parser = utils::csv_path)]
        input_csv_file: PathBuf,
        #[arg(long = "output_metrics_file", value_parser = utils::csv_path)]
        output_metrics_file: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::init();
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let ctx = RunCtx::new(config);
    match args.cmd {
        Command::FixToCsv { input_fix_file, output_csv_file } => {
            fix_to_csv(ctx, input_fix_file, output_csv_file)?
        }
        Command::CalcMetrics { input_csv_file, output_metrics_file } => {
            calc_metrics(ctx, input_csv_file, output_metrics_file)?
        }
    }
    Ok(())
}

fn fix_to_csv(mut ctx: RunCtx, input: PathBuf, output: PathBuf) -> Result<()> {
    info!("reading fix log {}", input.display());
    let file =
        File::open(&input).with_context(|| format!("opening {}", input.display()))?;
    ctx.ingest(BufReader::new(file))
        .with_context(|| format!("reading {}", input.display()))?;
    let outcome = ctx.join();
    let out =
        File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    csv_io::write_rows(BufWriter::new(out), &outcome.rows)
        .with_context(|| format!("writing {}", output.display()))?;
    if outcome.unmatched > 0 {
        println!(
            "Wrote {} rows to {} (skipped {} fills with no matching order)",
            outcome.rows.len(),
            output.display(),
            outcome.unmatched
        );
    } else {
        println!("Wrote {} rows to {}", outcome.rows.len(), output.display());
    }
    Ok(())
}

fn calc_metrics(ctx: RunCtx, input: PathBuf, output: PathBuf) -> Result<()> {
    info!("reading joined csv {}", input.display());
    let file =
        File::open(&input).with_context(|| format!("opening {}", input.display()))?;
    let rows = csv_io::read_rows(BufReader::new(file))
        .with_context(|| format!("reading {}", input.display()))?;
    let venues = metrics::compute(&rows, &ctx.metrics_options())?;
    info!("{} rows -> {} venues", rows.len(), venues.len());
    let out =
        File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    csv_io::write_metrics(BufWriter::new(out), &venues)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Wrote metrics for {} exchanges to {}", venues.len(), output.display());
    Ok(())
}
