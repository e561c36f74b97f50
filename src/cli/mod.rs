// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes each subcommand to its
// use case. Printing happens here and nowhere else.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, DescribeArgs, SampleArgs, SplitArgs};

use od_flow_dataset::application::{
    describe_use_case::DescribeUseCase,
    sample_use_case::SampleUseCase,
    split_use_case::SplitUseCase,
};

#[derive(Parser, Debug)]
#[command(
    name = "od-flow-dataset",
    version = "0.1.0",
    about = "Build and inspect pairwise OD-flow samples from per-area .npy arrays."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Describe(args) => run_describe(args),
            Commands::Sample(args)   => run_sample(args),
            Commands::Split(args)    => run_split(args),
        }
    }
}

fn run_describe(args: DescribeArgs) -> Result<()> {
    let cfg     = args.dataset.into_config()?;
    let summary = DescribeUseCase::new(cfg, args.granularity).execute()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} samples ({} granularity, {} features)",
        summary.total_samples, summary.granularity, summary.feature_mode
    );
    for a in &summary.areas {
        println!(
            "  {:<24} N={:<6} width={:<4} samples={}",
            a.area, a.locations, a.pair_width, a.samples
        );
    }
    Ok(())
}

fn run_sample(args: SampleArgs) -> Result<()> {
    let cfg  = args.dataset.into_config()?;
    let view = SampleUseCase::new(cfg, args.granularity).fetch(args.position)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn run_split(args: SplitArgs) -> Result<()> {
    let cfg   = args.dataset.into_config()?;
    let split = SplitUseCase::new(cfg, args.train_fraction, args.seed).execute()?;
    println!("{}", serde_json::to_string_pretty(&split)?);
    Ok(())
}
