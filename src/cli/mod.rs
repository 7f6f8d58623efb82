//! CLI module for Polnet.
//!
//! Subcommands:
//! - `visualize`: Load node/edge CSVs and render the network in 3D

mod visualize;

use clap::{Parser, Subcommand};

pub use visualize::VisualizeCommand;

/// Polnet - 3D political-network visualizer
#[derive(Parser)]
#[command(name = "polnet")]
#[command(about = "3D political-network visualizer - bundled edges, party filtering, PNG/PDF export")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a node/edge CSV pair and open the 3D scene
    Visualize(VisualizeCommand),
}

impl App {
    /// Run the CLI application.
    pub fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Visualize(cmd) => cmd.run(),
        }
    }
}
