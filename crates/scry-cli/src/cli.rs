//! CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scry")]
#[command(about = "Inspect engine structures in captured process memory", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Memory snapshot file (JSON) to read from
    #[arg(short, long, global = true, env = "SCRY_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, global = true, default_value = "scry.toml", env = "SCRY_CONFIG")]
    pub config: PathBuf,

    /// Offset table (JSON); overrides the path from the config file
    #[arg(short, long, global = true, env = "SCRY_OFFSETS")]
    pub offsets: Option<PathBuf>,

    /// Screen width in pixels; overrides the config file
    #[arg(long, global = true)]
    pub width: Option<u32>,

    /// Screen height in pixels; overrides the config file
    #[arg(long, global = true)]
    pub height: Option<u32>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display raw bytes at an address
    Hexdump {
        /// Address (hex)
        address: String,

        /// Number of bytes
        #[arg(short = 'n', long, default_value = "256")]
        size: usize,

        /// Show the ASCII column
        #[arg(short, long)]
        ascii: bool,
    },

    /// Decode the active camera
    Camera {
        /// Local players address (hex)
        local_players: String,
    },

    /// Project a world point to screen coordinates
    Project {
        /// Local players address (hex)
        local_players: String,

        x: f64,
        y: f64,
        z: f64,

        /// Use the half-resolution convention
        #[arg(long)]
        half: bool,
    },

    /// Resolve bone world positions for a mesh
    Bone {
        /// Mesh component address (hex)
        mesh: String,

        /// Bone indices
        #[arg(required = true)]
        bones: Vec<u32>,
    },

    /// Resolve and project one bone for several meshes
    Scan {
        /// Local players address (hex)
        local_players: String,

        /// Mesh component addresses (hex)
        #[arg(required = true)]
        meshes: Vec<String>,

        /// Bone index to sample
        #[arg(short, long, default_value = "0")]
        bone: u32,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Decode a player's name and platform
    Player {
        /// Player state address (hex)
        player_state: String,
    },

    /// Replay render timestamps across successive snapshots
    Visibility {
        /// Mesh component addresses (hex)
        #[arg(short, long, required = true)]
        mesh: Vec<String>,

        /// Snapshot files in capture order
        #[arg(required = true)]
        frames: Vec<PathBuf>,
    },

    /// Dump the camera chain with raw byte samples
    Dump {
        /// Local players address (hex)
        local_players: String,

        /// Output file (prints to stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Write the active offset table as JSON
    Offsets {
        /// Output file
        output: PathBuf,
    },
    /// Write the effective configuration to the --config path
    InitConfig {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
