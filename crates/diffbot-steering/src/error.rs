//! This module defines the error types used by the `diffbot-steering` crate.

#![warn(missing_docs)]

/// Error type for steering operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SteeringError {
    /// Error for invalid arrival radius.
    /// This variant is returned when an arrival radius is provided that is not positive.
    InvalidArrivalRadius(&'static str),
    /// Error for an indeterminate turn direction.
    /// This variant is returned when the goal lies exactly on the ray behind
    /// the robot, where neither turn direction is preferable. Callers decide
    /// the fallback instead of the controller guessing.
    DegenerateHeading(&'static str),
}

impl core::fmt::Display for SteeringError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SteeringError::InvalidArrivalRadius(msg) => {
                write!(f, "Invalid arrival radius: {}", msg)
            }
            SteeringError::DegenerateHeading(msg) => {
                write!(f, "Indeterminate turn direction: {}", msg)
            }
        }
    }
}

impl core::error::Error for SteeringError {}
