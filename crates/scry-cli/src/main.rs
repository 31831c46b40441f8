mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use scry_core::Vector3;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::hex_utils::{parse_hex_address, parse_remote_address, parse_remote_addresses};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { "scry=debug" } else { "scry=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(&cli.config)?.with_overrides(cli.width, cli.height, cli.offsets);
    let offsets = config.offset_table()?;
    debug!(
        "Offsets version {}, screen {}x{}",
        offsets.version, config.screen.width, config.screen.height
    );

    let snapshot_path = cli.snapshot.as_deref();

    match cli.command {
        Commands::Hexdump {
            address,
            size,
            ascii,
        } => {
            let snapshot = commands::open_snapshot(snapshot_path)?;
            commands::hexdump::run(&snapshot, parse_hex_address(&address)?, size, ascii)
        }

        Commands::Camera { local_players } => {
            let snapshot = commands::open_snapshot(snapshot_path)?;
            commands::camera::run(&snapshot, &offsets, parse_remote_address(&local_players)?)
        }

        Commands::Project {
            local_players,
            x,
            y,
            z,
            half,
        } => {
            let snapshot = commands::open_snapshot(snapshot_path)?;
            commands::project::run(
                &snapshot,
                &offsets,
                parse_remote_address(&local_players)?,
                config.screen,
                Vector3::new(x, y, z),
                half,
            )
        }

        Commands::Bone { mesh, bones } => {
            let snapshot = commands::open_snapshot(snapshot_path)?;
            commands::bone::run(&snapshot, &offsets, parse_remote_address(&mesh)?, &bones)
        }

        Commands::Scan {
            local_players,
            meshes,
            bone,
            json,
        } => {
            let snapshot = commands::open_snapshot(snapshot_path)?;
            commands::scan::run(
                &snapshot,
                &offsets,
                parse_remote_address(&local_players)?,
                config.screen,
                &parse_remote_addresses(&meshes)?,
                bone,
                json,
            )
        }

        Commands::Player { player_state } => {
            let snapshot = commands::open_snapshot(snapshot_path)?;
            commands::player::run(&snapshot, &offsets, parse_remote_address(&player_state)?)
        }

        Commands::Visibility { mesh, frames } => {
            commands::visibility::run(&offsets, &parse_remote_addresses(&mesh)?, &frames)
        }

        Commands::Dump {
            local_players,
            output,
        } => {
            let snapshot = commands::open_snapshot(snapshot_path)?;
            commands::dump::run(
                &snapshot,
                &offsets,
                parse_remote_address(&local_players)?,
                output.as_deref(),
            )
        }

        Commands::Offsets { output } => commands::offsets::run(&offsets, &output),

        Commands::InitConfig { force } => commands::init_config::run(&config, &cli.config, force),
    }
}
