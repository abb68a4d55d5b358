//! Command-line arguments. Every gauge setting is optional here and only
//! overrides the config file when given.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Variant;
use crate::display::DisplayMode;

#[derive(Parser, Debug)]
#[command(name = "speedgauge")]
#[command(author, version, about = "Speed, pace and stopping-distance gauge")]
pub struct Args {
    /// Output surface: terminal or plain
    #[arg(short, long)]
    pub mode: Option<DisplayMode>,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Inner ring: stopping-distance or fuel-economy
    #[arg(long)]
    pub variant: Option<Variant>,

    /// First speed on the axis (km/h)
    #[arg(long)]
    pub start: Option<f64>,

    /// Last speed on the axis, inclusive (km/h)
    #[arg(long)]
    pub stop: Option<f64>,

    /// Speed step between samples (km/h)
    #[arg(long)]
    pub step: Option<f64>,

    /// Distance timed on the middle ring (km)
    #[arg(long)]
    pub distance: Option<f64>,

    /// Perception-reaction time (seconds)
    #[arg(long)]
    pub reaction_time: Option<f64>,

    /// Tyre/road friction coefficient
    #[arg(long, allow_negative_numbers = true)]
    pub friction: Option<f64>,

    /// Road grade as a decimal, positive uphill
    #[arg(long, allow_negative_numbers = true)]
    pub slope: Option<f64>,

    /// Average car length (meters)
    #[arg(long)]
    pub car_length: Option<f64>,

    /// Straight pieces drawn per arc segment
    #[arg(long)]
    pub resolution: Option<usize>,

    /// Write a commented config template to the default path and exit
    #[arg(long)]
    pub init_config: bool,

    /// Save the effective settings back into the config file
    #[arg(long)]
    pub save: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}
