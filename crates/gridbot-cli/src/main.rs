//! Operator CLI for the checkerboard placement workflow.

use anyhow::{anyhow, bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use gridbot_core::prelude::*;
use gridbot_core::types::Palette;
use gridbot_sim::{SimConfig, SimWorld};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Command::new("gridbot")
        .version(gridbot_core::VERSION)
        .about("Coordinate-driven two-color placement workflow")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("simulate")
                .about("Run the placement workflow against the simulated world")
                .arg(
                    Arg::new("from")
                        .long("from")
                        .required(true)
                        .help("First corner as X,Z"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .required(true)
                        .help("Opposite corner as X,Z"),
                )
                .arg(
                    Arg::new("level")
                        .long("level")
                        .default_value("64")
                        .value_parser(value_parser!(i32))
                        .help("Vertical placement level"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for the simulated actor"),
                )
                .arg(
                    Arg::new("cell-delay-ms")
                        .long("cell-delay-ms")
                        .default_value("150")
                        .value_parser(value_parser!(u64))
                        .help("Delay after each placement attempt"),
                )
                .arg(
                    Arg::new("fail-nav")
                        .long("fail-nav")
                        .action(ArgAction::SetTrue)
                        .help("Freeze the simulated actor so navigation times out"),
                )
                .arg(
                    Arg::new("deny-placement")
                        .long("deny-placement")
                        .action(ArgAction::SetTrue)
                        .help("Reject every placement request"),
                )
                .arg(
                    Arg::new("revoke-rights")
                        .long("revoke-rights")
                        .action(ArgAction::SetTrue)
                        .help("Deny elevated placement rights (aborts the run)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the final summary as JSON"),
                ),
        )
        .subcommand(
            Command::new("color")
                .about("Resolve the pattern color for one coordinate")
                .arg(
                    Arg::new("x")
                        .required(true)
                        .value_parser(value_parser!(i32))
                        .allow_negative_numbers(true),
                )
                .arg(
                    Arg::new("z")
                        .required(true)
                        .value_parser(value_parser!(i32))
                        .allow_negative_numbers(true),
                ),
        );

    match cli.get_matches().subcommand() {
        Some(("simulate", matches)) => simulate(matches).await,
        Some(("color", matches)) => {
            let x = *matches.get_one::<i32>("x").expect("required");
            let z = *matches.get_one::<i32>("z").expect("required");
            let color = gridbot_core::color_at(x, z);
            let palette = Palette::default();
            println!("({x}, {z}) -> color {color} ({})", palette.resource(color));
            Ok(())
        }
        _ => bail!("no subcommand given"),
    }
}

async fn simulate(matches: &ArgMatches) -> anyhow::Result<()> {
    let from = parse_corner(matches.get_one::<String>("from").expect("required"))?;
    let to = parse_corner(matches.get_one::<String>("to").expect("required"))?;
    let level = *matches.get_one::<i32>("level").expect("defaulted");
    let region = Region::from_corners(from, to, level);

    let sim_config = SimConfig {
        seed: *matches.get_one::<u64>("seed").expect("defaulted"),
        // Spawn the actor just above the pattern plane, near the first cell.
        start: gridbot_core::Position::new(
            f64::from(region.min_x()) + 0.5,
            f64::from(level) + 1.0,
            f64::from(region.min_z()) + 0.5,
        ),
        ground_level: Some(level - 1),
        freeze_actor: matches.get_flag("fail-nav"),
        deny_placement: matches.get_flag("deny-placement"),
        revoke_rights: matches.get_flag("revoke-rights"),
        ..SimConfig::default()
    };
    let world = Arc::new(SimWorld::new(sim_config));

    let config = OrchestratorConfig {
        cell_delay: Duration::from_millis(
            *matches.get_one::<u64>("cell-delay-ms").expect("defaulted"),
        ),
        ..OrchestratorConfig::default()
    };
    let orchestrator = Arc::new(RegionOrchestrator::new(world, config));
    let handle = orchestrator.handle();

    // Operator stop: Ctrl-C requests a cooperative abort; the run returns
    // with the partial summary.
    let stop_handle = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("stop requested, finishing current cell");
            stop_handle.stop();
        }
    });

    let report = tokio::spawn(async move { orchestrator.run(region).await })
        .await
        .context("run task panicked")?
        .map_err(|e| anyhow!(e))?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&handle.status())?);
    } else {
        println!("{}: {}", report.state, report.summary);
    }
    Ok(())
}

/// Parse an `X,Z` corner argument.
fn parse_corner(raw: &str) -> anyhow::Result<Cell> {
    let (x, z) = raw
        .split_once(',')
        .ok_or_else(|| anyhow!("expected X,Z but got '{raw}'"))?;
    Ok(Cell::new(
        x.trim().parse().context("invalid X coordinate")?,
        z.trim().parse().context("invalid Z coordinate")?,
    ))
}
