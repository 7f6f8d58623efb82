//! Polnet - 3D Political-Network Visualizer
//!
//! Loads a node CSV and an edge CSV (with precomputed edge-bundling
//! polylines) and renders an interactive 3D scene with party-based
//! filtering, focus inspection, and PNG/PDF export.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod visualization;
