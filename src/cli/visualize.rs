//! Visualize subcommand - load CSVs and open the 3D scene.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::dataset::NetworkData;
use crate::visualization::run_visualizer;

/// Render a node/edge CSV pair in 3D.
#[derive(Parser)]
pub struct VisualizeCommand {
    /// Path to the node CSV (columns: id,x,y,z,size,party,title).
    pub nodes: PathBuf,

    /// Path to the edge CSV (columns: source,target,points).
    pub edges: PathBuf,

    /// Directory receiving exported artifacts (overrides config).
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

impl VisualizeCommand {
    /// Run the visualize command.
    pub fn run(self) -> color_eyre::Result<()> {
        let mut config = Config::load()?;
        if let Some(dir) = self.export_dir {
            config.export.directory = dir;
        }

        // A failed load leaves the scene empty rather than killing the app.
        let data = match NetworkData::load(&self.nodes, &self.edges) {
            Ok(data) => data,
            Err(err) => {
                tracing::error!(%err, "dataset load failed, rendering empty scene");
                NetworkData::default()
            }
        };

        run_visualizer(data, config);
        Ok(())
    }
}
