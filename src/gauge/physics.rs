//! Vehicle physics behind the inner ring.
//!
//! Stopping distance follows the AASHTO sight-distance formula
//! `s = 0.278·t·v + v² / (254·(f + G))` with `v` in km/h, `t` the
//! perception-reaction time in seconds, `f` the tyre/road friction coefficient
//! (about 0.7 dry, 0.3-0.4 wet) and `G` the road grade as a decimal (positive
//! uphill). Results are in meters.

use std::fmt;
use thiserror::Error;

pub const DEFAULT_REACTION_TIME: f64 = 1.5;
pub const DEFAULT_FRICTION: f64 = 0.7;
pub const DEFAULT_SLOPE: f64 = 0.0;
/// Compact cars run 4.2-4.5 m, the passenger fleet averages 4.5-4.8 m.
pub const DEFAULT_CAR_LENGTH: f64 = 4.5;

const FUEL_A: f64 = -0.002;
const FUEL_B: f64 = 0.3;
const FUEL_C: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainError {
    #[error("friction coefficient plus slope must be positive (friction {friction}, slope {slope})")]
    NonPositiveFriction { friction: f64, slope: f64 },
    #[error("average car length must be positive, got {length}")]
    NonPositiveCarLength { length: f64 },
    #[error("speed axis {start}..={stop} step {step} must give 2..=10000 samples")]
    DegenerateAxis { start: f64, stop: f64, step: f64 },
}

/// Round to one decimal, ties to even.
///
/// Values sitting exactly on a `.x5` boundary go to the even neighbour, so
/// `16.25` becomes `16.2`. Results with a zero tenth are exact integers,
/// which is what the integral label predicates rely on.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

pub fn stopping_distance(
    speed_kmh: f64,
    reaction_time: f64,
    friction: f64,
    slope: f64,
) -> Result<f64, DomainError> {
    let grip = friction + slope;
    if grip <= 0.0 || grip.is_nan() {
        return Err(DomainError::NonPositiveFriction { friction, slope });
    }
    let reaction = 0.278 * reaction_time * speed_kmh;
    let braking = speed_kmh.powi(2) / (254.0 * grip);
    Ok(round_tenth(reaction + braking))
}

/// Fuel economy in km/L: a parabola peaking around 75 km/h. Not clamped, so
/// very high speeds go negative.
pub fn fuel_economy(speed_kmh: f64) -> f64 {
    round_tenth(FUEL_A * speed_kmh * speed_kmh + FUEL_B * speed_kmh + FUEL_C)
}

/// A distance expressed in car lengths, quantized to the nearest half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarLengths {
    Whole(i64),
    Half(f64),
}

impl CarLengths {
    /// Classify an already quantized value.
    pub fn from_quantized(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 {
            CarLengths::Whole(value as i64)
        } else {
            CarLengths::Half(value)
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            CarLengths::Whole(n) => *n as f64,
            CarLengths::Half(v) => *v,
        }
    }
}

impl fmt::Display for CarLengths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarLengths::Whole(n) => write!(f, "{}", n),
            CarLengths::Half(v) => write!(f, "{}", v),
        }
    }
}

pub fn car_lengths(distance_m: f64, avg_car_length: f64) -> Result<CarLengths, DomainError> {
    if avg_car_length <= 0.0 || avg_car_length.is_nan() {
        return Err(DomainError::NonPositiveCarLength {
            length: avg_car_length,
        });
    }
    let halves = ((distance_m / avg_car_length) * 2.0).round_ties_even();
    Ok(CarLengths::from_quantized(halves / 2.0))
}
