// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `orthtree` developer CLI.
//!
//! Loads a JSON scene (world region, optional tree config, id-tagged boxes)
//! and reports on the tree built from it.
//!
//! # Usage
//! ```text
//! orthtree [--format table|json] [-v] <stats|query|pairs> <SCENE> [options]
//! ```
//!
//! Results go to stdout; logs go to stderr (`RUST_LOG` or `-v` to raise).
//! The CLI exits with code `0` on success and non-zero on error.

// The CLI is expected to print to stdout.
#![allow(clippy::print_stdout)]

mod report;
mod scene;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use orthtree::{BroadPhase, Region};
use tracing::info;
use tracing_subscriber::EnvFilter;

use report::Format;
use scene::{ConfigOverrides, Scene};

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect quadtree/octree builds over a scene file")]
struct Cli {
    /// Output format for results
    #[arg(long, value_enum, default_value_t = Format::Table, global = true)]
    format: Format,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(flatten)]
    overrides: OverrideArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Copy)]
struct OverrideArgs {
    /// Override the scene's dimension count (2 or 3)
    #[arg(long, global = true)]
    dimensions: Option<u8>,
    /// Override the scene's per-node capacity
    #[arg(long, global = true)]
    capacity: Option<usize>,
    /// Override the scene's depth ceiling
    #[arg(long, global = true)]
    max_depth: Option<u32>,
}

impl From<OverrideArgs> for ConfigOverrides {
    fn from(args: OverrideArgs) -> Self {
        Self {
            dimensions: args.dimensions,
            capacity: args.capacity,
            max_depth: args.max_depth,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the tree and print structural statistics
    Stats {
        /// Scene file (JSON)
        scene: PathBuf,
    },
    /// Print candidate ids for a query box or for an item's own box
    Query {
        /// Scene file (JSON)
        scene: PathBuf,
        /// Query with the bounds of this item id
        #[arg(long, conflicts_with_all = ["min", "max"])]
        id: Option<usize>,
        /// Query minimum corner, comma separated (2 or 3 values)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "max")]
        min: Vec<f32>,
        /// Query maximum corner, comma separated (2 or 3 values)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "min")]
        max: Vec<f32>,
    },
    /// Print overlapping id pairs found through the tree
    Pairs {
        /// Scene file (JSON)
        scene: PathBuf,
        /// Report tree candidates without the box-overlap filter
        #[arg(long)]
        candidates: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn query_region(min: &[f32], max: &[f32]) -> Result<Region> {
    Region::from_slices(min, max).context("invalid --min/--max query box")
}

fn run(cli: Cli) -> Result<String> {
    let overrides = ConfigOverrides::from(cli.overrides);
    match cli.command {
        Command::Stats { scene } => {
            let scene = Scene::load(&scene)?;
            let config = overrides.apply(scene.config)?;
            let tree = scene.build_tree(config)?;
            report::render_stats(&tree.stats(), cli.format)
        }
        Command::Query {
            scene,
            id,
            min,
            max,
        } => {
            let scene = Scene::load(&scene)?;
            let config = overrides.apply(scene.config)?;
            let query = match id {
                Some(id) => *scene
                    .bounds_of(id)
                    .ok_or_else(|| anyhow!("no item with id {id} in scene"))?,
                None => query_region(&min, &max)?,
            };
            let tree = scene.build_tree(config)?;
            let ids: Vec<usize> = tree
                .retrieve(&query)
                .into_iter()
                .map(|item| *item.payload())
                .collect();
            info!(candidates = ids.len(), "query complete");
            report::render_ids(&ids, cli.format)
        }
        Command::Pairs { scene, candidates } => {
            let scene = Scene::load(&scene)?;
            let config = overrides.apply(scene.config)?;
            let bp = scene.build_broad_phase(config)?;
            let pairs = if candidates {
                bp.candidate_pairs()
            } else {
                bp.pairs()
            };
            info!(pairs = pairs.len(), "pairing complete");
            report::render_pairs(&pairs, cli.format)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let out = run(cli)?;
    println!("{out}");
    Ok(())
}
