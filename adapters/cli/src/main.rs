#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates, prints and optionally plays a maze.

mod session;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use maze_explorer_world::World;
use tracing_subscriber::EnvFilter;

use settings::Overrides;

/// Command-line arguments for the Maze Explorer host.
#[derive(Debug, Parser)]
#[command(name = "maze-explorer", author, version, about)]
struct CliArgs {
    /// TOML file with session settings; flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Use the smaller preset for constrained displays.
    #[arg(long)]
    constrained: bool,
    /// Seed for maze generation and goal selection.
    #[arg(long)]
    seed: Option<u64>,
    /// Maze width in cells.
    #[arg(long, value_name = "CELLS")]
    width: Option<u32>,
    /// Maze height in cells.
    #[arg(long, value_name = "CELLS")]
    height: Option<u32>,
    /// Chance that an open cell becomes a reward.
    #[arg(long, value_name = "P")]
    reward_probability: Option<f64>,
    /// Walk the demonstrated route to the goal and print a summary.
    #[arg(long)]
    autoplay: bool,
    /// Print the summary as JSON instead of text.
    #[arg(long)]
    json: bool,
}

/// Entry point for the Maze Explorer command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let overrides = Overrides {
        constrained: args.constrained,
        seed: args.seed,
        width: args.width,
        height: args.height,
        reward_probability: args.reward_probability,
    };
    let config = settings::resolve(args.config.as_deref(), overrides)?;
    let mut world = World::new(config).context("failed to start maze session")?;

    if !args.json {
        println!("{}", session::render(&world, false));
    }

    if args.autoplay {
        let summary = session::autoplay(&mut world);
        if args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("failed to encode summary")?
            );
        } else {
            println!();
            println!("{}", session::render(&world, true));
            println!("{}", summary.to_text());
        }
        if !summary.completed {
            anyhow::bail!("autoplay stopped before reaching the goal");
        }
    }

    Ok(())
}
