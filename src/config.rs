use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::color::Rgba;
use crate::display::DisplayMode;
use crate::gauge::angles::ArcSpan;
use crate::gauge::axis::{FuelEconomyModel, StoppingDistanceModel, ThirdAxisModel};
use crate::gauge::gradient::GradientSpec;
use crate::gauge::{axis_samples, physics};

/// What the inner ring measures
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    #[default]
    StoppingDistance,
    FuelEconomy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub axis: AxisConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub colors: ColorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    /// Straight pieces per arc segment (1 = chord between samples)
    pub arc_resolution: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Terminal,
            arc_resolution: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub start: f64,
    /// Inclusive
    pub stop: f64,
    pub step: f64,
    /// Distance the middle ring times, in km
    pub reference_distance_km: f64,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            start: 10.0,
            stop: 150.0,
            step: 10.0,
            reference_distance_km: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub variant: Variant,
    pub reaction_time_sec: f64,
    pub friction_coeff: f64,
    pub slope: f64,
    pub avg_car_length_m: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            variant: Variant::StoppingDistance,
            reaction_time_sec: physics::DEFAULT_REACTION_TIME,
            friction_coeff: physics::DEFAULT_FRICTION,
            slope: physics::DEFAULT_SLOPE,
            avg_car_length_m: physics::DEFAULT_CAR_LENGTH,
        }
    }
}

impl PhysicsConfig {
    pub fn third_axis(&self) -> Box<dyn ThirdAxisModel> {
        match self.variant {
            Variant::StoppingDistance => Box::new(StoppingDistanceModel {
                reaction_time: self.reaction_time_sec,
                friction: self.friction_coeff,
                slope: self.slope,
                avg_car_length: self.avg_car_length_m,
            }),
            Variant::FuelEconomy => Box::new(FuelEconomyModel),
        }
    }
}

/// Signed radii of one ring. Negative radii flip the ring through the center.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RingRadii {
    pub arc: f64,
    pub label: f64,
}

impl RingRadii {
    pub const fn uniform(radius: f64) -> Self {
        Self {
            arc: radius,
            label: radius,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub arc_start_deg: f64,
    pub arc_end_deg: f64,
    pub outer: RingRadii,
    pub middle: RingRadii,
    pub inner: RingRadii,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        let span = ArcSpan::reference();
        Self {
            arc_start_deg: span.start.to_degrees(),
            arc_end_deg: span.end.to_degrees(),
            outer: RingRadii::uniform(-1.0),
            middle: RingRadii::uniform(-0.9),
            inner: RingRadii::uniform(-0.75),
        }
    }
}

impl GeometryConfig {
    pub fn span(&self) -> ArcSpan {
        ArcSpan::from_degrees(self.arc_start_deg, self.arc_end_deg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub outer: GradientSpec,
    pub middle: GradientSpec,
    /// Falls back to the variant's own palette when unset
    pub inner: Option<GradientSpec>,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            outer: GradientSpec::Linear {
                from: Rgba::from_rgb8(255, 0, 0),
                to: Rgba::from_rgb8(0, 0, 255),
            },
            middle: GradientSpec::ThreeSegment {
                start: Rgba::from_rgb8(255, 0, 0),
                middle: Rgba::from_rgb8(255, 255, 0),
                end: Rgba::from_rgb8(0, 128, 0),
            },
            inner: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/speedgauge/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("speedgauge").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists.
    /// Returns None if the file doesn't exist, logs a warning on parse errors.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("{:#}. Using defaults.", e);
                None
            }
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, Self::generate_config_template())?;

        Ok(path)
    }

    /// Reject settings that would make the gauge meaningless before rendering.
    pub fn validate(&self) -> Result<()> {
        if self.display.arc_resolution == 0 {
            bail!("display.arc_resolution must be at least 1");
        }
        let distance = self.axis.reference_distance_km;
        if !(distance.is_finite() && distance > 0.0) {
            bail!("axis.reference_distance_km must be positive, got {}", distance);
        }
        axis_samples(self.axis.start, self.axis.stop, self.axis.step)
            .context("Invalid [axis] section")?;
        // Same checks the inner ring runs for every sample
        let p = &self.physics;
        physics::stopping_distance(0.0, p.reaction_time_sec, p.friction_coeff, p.slope)
            .and_then(|meters| physics::car_lengths(meters, p.avg_car_length_m))
            .context("Invalid [physics] section")?;
        let sweep = self.geometry.span().sweep();
        if !sweep.is_finite() || sweep == 0.0 {
            bail!(
                "geometry arc span {}..{} has no extent",
                self.geometry.arc_start_deg,
                self.geometry.arc_end_deg
            );
        }
        Ok(())
    }

    /// Write the effective settings back into `path`, keeping its comments.
    pub fn save(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, Self::generate_config_template())?;
            info!("Created config file at {}", path.display());
        }

        let content = std::fs::read_to_string(path)?;
        let mut doc = content
            .parse::<toml_edit::DocumentMut>()
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        self.write_into(&mut doc);
        std::fs::write(path, doc.to_string())?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    fn write_into(&self, doc: &mut toml_edit::DocumentMut) {
        if !doc.contains_key("display") {
            doc["display"] = toml_edit::table();
        }
        doc["display"]["mode"] = toml_edit::value(self.display.mode.name());
        doc["display"]["arc_resolution"] = toml_edit::value(self.display.arc_resolution as i64);

        if !doc.contains_key("axis") {
            doc["axis"] = toml_edit::table();
        }
        doc["axis"]["start"] = toml_edit::value(self.axis.start);
        doc["axis"]["stop"] = toml_edit::value(self.axis.stop);
        doc["axis"]["step"] = toml_edit::value(self.axis.step);
        doc["axis"]["reference_distance_km"] = toml_edit::value(self.axis.reference_distance_km);

        if !doc.contains_key("physics") {
            doc["physics"] = toml_edit::table();
        }
        let variant = match self.physics.variant {
            Variant::StoppingDistance => "stopping-distance",
            Variant::FuelEconomy => "fuel-economy",
        };
        doc["physics"]["variant"] = toml_edit::value(variant);
        doc["physics"]["reaction_time_sec"] = toml_edit::value(self.physics.reaction_time_sec);
        doc["physics"]["friction_coeff"] = toml_edit::value(self.physics.friction_coeff);
        doc["physics"]["slope"] = toml_edit::value(self.physics.slope);
        doc["physics"]["avg_car_length_m"] = toml_edit::value(self.physics.avg_car_length_m);
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# Speedgauge Configuration
# This file is auto-generated. Edit as needed.

[display]
# Output surface: "terminal" or "plain"
mode = "terminal"
# Straight pieces drawn per arc segment (1 = straight chord between samples)
arc_resolution = 8

[axis]
# Speed axis in km/h, stop is inclusive
start = 10.0
stop = 150.0
step = 10.0
# Distance timed on the middle ring, in km
reference_distance_km = 10.0

[physics]
# Inner ring: "stopping-distance" or "fuel-economy"
variant = "stopping-distance"
# Perception-reaction time in seconds (1.0 alert, 1.5 average, 2.5 worst case)
reaction_time_sec = 1.5
# Tyre/road friction: about 0.7 dry, 0.3-0.4 wet
friction_coeff = 0.7
# Road grade as a decimal, positive uphill
slope = 0.0
# Average car length in meters
avg_car_length_m = 4.5

[geometry]
# Arc span in degrees; the default leaves the gap at the bottom
arc_start_deg = -202.5
arc_end_deg = 22.5
# Signed radii per ring (negative flips the ring through the center)
outer = { arc = -1.0, label = -1.0 }
middle = { arc = -0.9, label = -0.9 }
inner = { arc = -0.75, label = -0.75 }

[colors]
# Gradient kinds: "linear" (from, to), "three-segment" (start, middle, end)
# or "stops" (list of { position, color }). Colors are CSS names or #rrggbb[aa].
outer = { kind = "linear", from = "red", to = "blue" }
middle = { kind = "three-segment", start = "red", middle = "yellow", end = "green" }
# Inner ring defaults to red -> orange for stopping distance and
# red -> green -> red for fuel economy.
# inner = { kind = "linear", from = "red", to = "orange" }
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::cli::Args) {
        if let Some(mode) = args.mode {
            self.display.mode = mode;
        }
        if let Some(resolution) = args.resolution {
            self.display.arc_resolution = resolution;
        }

        if let Some(start) = args.start {
            self.axis.start = start;
        }
        if let Some(stop) = args.stop {
            self.axis.stop = stop;
        }
        if let Some(step) = args.step {
            self.axis.step = step;
        }
        if let Some(distance) = args.distance {
            self.axis.reference_distance_km = distance;
        }

        if let Some(variant) = args.variant {
            self.physics.variant = variant;
        }
        if let Some(t) = args.reaction_time {
            self.physics.reaction_time_sec = t;
        }
        if let Some(f) = args.friction {
            self.physics.friction_coeff = f;
        }
        if let Some(g) = args.slope {
            self.physics.slope = g;
        }
        if let Some(length) = args.car_length {
            self.physics.avg_car_length_m = length;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = toml::from_str(&Config::generate_config_template()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.axis.start, defaults.axis.start);
        assert_eq!(config.axis.stop, defaults.axis.stop);
        assert_eq!(config.physics.variant, Variant::StoppingDistance);
        assert_eq!(config.geometry.outer, RingRadii::uniform(-1.0));
        assert_eq!(config.colors.outer, defaults.colors.outer);
        assert_eq!(config.colors.middle, defaults.colors.middle);
        assert!(config.colors.inner.is_none());
        assert!((config.geometry.arc_start_deg - defaults.geometry.arc_start_deg).abs() < 1e-9);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
[physics]
variant = "fuel-economy"

[colors]
inner = { kind = "linear", from = "green", to = "red" }
"#,
        )
        .unwrap();
        assert_eq!(config.physics.variant, Variant::FuelEconomy);
        assert_eq!(config.physics.friction_coeff, 0.7);
        assert_eq!(config.axis.step, 10.0);
        assert!(matches!(config.colors.inner, Some(GradientSpec::Linear { .. })));
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        let parsed: Result<Config, _> =
            toml::from_str("[colors]\nouter = { kind = \"linear\", from = \"nope\", to = \"red\" }\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = Config::default();
        config.axis.step = -5.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.axis.reference_distance_km = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.arc_resolution = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.geometry.arc_end_deg = config.geometry.arc_start_deg;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unrenderable_physics() {
        let mut config = Config::default();
        config.physics.friction_coeff = -0.1;
        let err = config.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("friction coefficient plus slope must be positive"));
        assert!(crate::gauge::render(&config).is_err());

        let mut config = Config::default();
        config.physics.friction_coeff = 0.3;
        config.physics.slope = -0.3;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.physics.avg_car_length_m = 0.0;
        let err = config.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("average car length must be positive"));

        // Downhill is fine while friction still outweighs it
        let mut config = Config::default();
        config.physics.slope = -0.2;
        config.validate().unwrap();
        assert!(crate::gauge::render(&config).is_ok());
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config: Config = toml::from_str(
            r#"
[axis]
start = 30.0
step = 5.0

[physics]
friction_coeff = 0.5
slope = 0.02
"#,
        )
        .unwrap();
        let args = Args::try_parse_from([
            "speedgauge",
            "--variant",
            "fuel-economy",
            "--friction",
            "-0.2",
            "--start",
            "20",
        ])
        .unwrap();
        config.merge_args(&args);

        assert_eq!(config.physics.variant, Variant::FuelEconomy);
        assert_eq!(config.physics.friction_coeff, -0.2);
        assert_eq!(config.axis.start, 20.0);
        // Unset flags keep what the file said
        assert_eq!(config.axis.step, 5.0);
        assert_eq!(config.physics.slope, 0.02);
        assert_eq!(config.axis.stop, 150.0);
        assert_eq!(config.display.mode, DisplayMode::Terminal);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_accepts_negative_slope() {
        let mut config = Config::default();
        let args = Args::try_parse_from(["speedgauge", "--slope", "-0.05", "--mode", "plain"]).unwrap();
        config.merge_args(&args);
        assert_eq!(config.physics.slope, -0.05);
        assert_eq!(config.display.mode, DisplayMode::Plain);
        assert_eq!(config.physics.friction_coeff, 0.7);
    }

    #[test]
    fn test_write_into_keeps_comments() {
        let mut doc = "# keep me\n[axis]\nstart = 10.0 # inline\n"
            .parse::<toml_edit::DocumentMut>()
            .unwrap();
        let mut config = Config::default();
        config.axis.start = 20.0;
        config.physics.variant = Variant::FuelEconomy;
        config.write_into(&mut doc);

        let text = doc.to_string();
        assert!(text.contains("# keep me"));
        let reparsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(reparsed.axis.start, 20.0);
        assert_eq!(reparsed.physics.variant, Variant::FuelEconomy);
        assert_eq!(reparsed.display.mode, DisplayMode::Terminal);
    }

    #[test]
    fn test_stopping_distance_model_uses_physics_settings() {
        let mut config = Config::default();
        config.physics.avg_car_length_m = 9.0;
        // 34.9 m / 9 m = 3.88 -> 8 halves -> 4 cars
        assert_eq!(config.physics.third_axis().compute_value(50.0).unwrap(), 4.0);
        config.physics.variant = Variant::FuelEconomy;
        assert_eq!(config.physics.third_axis().compute_value(50.0).unwrap(), 15.0);
    }
}
