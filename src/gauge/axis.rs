use crate::color::Rgba;

use super::gradient::GradientSpec;
use super::physics::{self, CarLengths, DomainError};
use super::ticks::{format_value, LabelRule};

/// Strategy for the inner ring: what it measures and how it is labeled.
pub trait ThirdAxisModel {
    /// Inner-ring value for one speed sample.
    fn compute_value(&self, speed_kmh: f64) -> Result<f64, DomainError>;

    fn label_rule(&self) -> LabelRule;

    fn should_label(&self, value: f64) -> bool {
        self.label_rule().admits(value)
    }

    fn format_label(&self, value: f64) -> String;

    /// Legend line shown below the gauge center.
    fn caption(&self) -> &'static str;

    fn default_gradient(&self) -> GradientSpec;
}

/// Stopping distance counted in car lengths; every sample is labeled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoppingDistanceModel {
    pub reaction_time: f64,
    pub friction: f64,
    pub slope: f64,
    pub avg_car_length: f64,
}

impl Default for StoppingDistanceModel {
    fn default() -> Self {
        Self {
            reaction_time: physics::DEFAULT_REACTION_TIME,
            friction: physics::DEFAULT_FRICTION,
            slope: physics::DEFAULT_SLOPE,
            avg_car_length: physics::DEFAULT_CAR_LENGTH,
        }
    }
}

impl ThirdAxisModel for StoppingDistanceModel {
    fn compute_value(&self, speed_kmh: f64) -> Result<f64, DomainError> {
        let meters =
            physics::stopping_distance(speed_kmh, self.reaction_time, self.friction, self.slope)?;
        Ok(physics::car_lengths(meters, self.avg_car_length)?.value())
    }

    fn label_rule(&self) -> LabelRule {
        LabelRule::Always
    }

    fn format_label(&self, value: f64) -> String {
        CarLengths::from_quantized(value).to_string()
    }

    fn caption(&self) -> &'static str {
        "Bottom: Stopping distance (cars)"
    }

    fn default_gradient(&self) -> GradientSpec {
        GradientSpec::Linear {
            from: Rgba::from_rgb8(255, 0, 0),
            to: Rgba::from_rgb8(255, 165, 0),
        }
    }
}

/// Fuel economy in km/L; only whole values are labeled.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FuelEconomyModel;

impl ThirdAxisModel for FuelEconomyModel {
    fn compute_value(&self, speed_kmh: f64) -> Result<f64, DomainError> {
        Ok(physics::fuel_economy(speed_kmh))
    }

    fn label_rule(&self) -> LabelRule {
        LabelRule::Integral
    }

    fn format_label(&self, value: f64) -> String {
        format_value(value)
    }

    fn caption(&self) -> &'static str {
        "Bottom: Fuel economy (km/L)"
    }

    /// Inefficient at both ends, efficient through the middle speeds.
    fn default_gradient(&self) -> GradientSpec {
        GradientSpec::ThreeSegment {
            start: Rgba::from_rgb8(255, 0, 0),
            middle: Rgba::from_rgb8(0, 128, 0),
            end: Rgba::from_rgb8(255, 0, 0),
        }
    }
}
