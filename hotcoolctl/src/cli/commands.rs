//! CLI command and subcommand definitions

use clap::{Parser, Subcommand};
use hotcool_core::OscillationMode;
use std::path::PathBuf;

/// Hot+Cool fan heater CLI
#[derive(Parser, Debug)]
#[command(name = "hotcoolctl")]
#[command(version, about = "Hot+Cool fan heater CLI", long_about = None)]
pub struct Cli {
    /// Config file path (default: ~/.config/hotcool/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Device serial, required when several devices are configured
    #[arg(short, long, global = true)]
    pub device: Option<String>,

    /// Status snapshot file (default: {data_dir}/{serial}.json)
    #[arg(short, long, global = true)]
    pub status: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Merge issued commands into the status snapshot file
    #[arg(long, global = true)]
    pub write_back: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty table output
    Table,
    /// JSON output
    Json,
}

impl From<&OutputFormat> for crate::format::OutputFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Table => crate::format::OutputFormat::Table,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show derived oscillation and heating state
    Status,

    /// Oscillation control commands
    Oscillation {
        #[command(subcommand)]
        command: OscillationCommands,
    },

    /// Heating control commands
    Heat {
        #[command(subcommand)]
        command: HeatCommands,
    },

    /// List the number entities the device exposes
    Entities,

    /// Write through a number entity
    Number {
        #[command(subcommand)]
        command: NumberCommands,
    },

    /// Show CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum OscillationCommands {
    /// Start oscillating with a preset sweep around the current target
    Enable {
        /// Sweep: off, 45, 90, 180, 350 or custom (default: 45)
        #[arg(short, long)]
        mode: Option<OscillationMode>,
    },

    /// Stop oscillating at the current target
    Disable,

    /// Point at an angle (5-355)
    Target {
        /// Angle in degrees
        degrees: i32,
    },

    /// Oscillate between explicit bounds
    Angles {
        /// Low bound in degrees
        low: i32,
        /// High bound in degrees
        high: i32,
    },
}

#[derive(Subcommand, Debug)]
pub enum HeatCommands {
    /// Enable heat mode
    On,

    /// Disable heat mode
    Off,

    /// Set the heat target and enable heat mode
    Target {
        /// Target in kelvin (274-310)
        kelvin: f64,
    },
}

#[derive(Subcommand, Debug)]
pub enum NumberCommands {
    /// Set a number entity's value
    Set {
        /// Entity unique id (see `entities`)
        unique_id: String,
        /// New value
        value: f64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the loaded configuration
    Show,

    /// Show the configuration file path
    Path,
}
