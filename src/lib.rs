//! Three-ring speed gauge: speed on the outer ring, minutes per reference
//! distance in the middle, and stopping distance (in car lengths) or fuel
//! economy on the inner ring.

pub mod cli;
pub mod color;
pub mod config;
pub mod display;
pub mod gauge;
