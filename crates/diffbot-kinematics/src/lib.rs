#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for 2D differential-drive robot kinematics in screen space."]
#![doc = ""]
#![doc = "This crate provides pose, wheel-speed, and chassis-speed types, speed clamping,"]
#![doc = "and pose integration for a robot rendered in pixel coordinates."]

use core::f64::consts::PI;
use core::fmt;
use libm::{cos, fabs, sin};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::KinematicsError;

/// Pixels per meter. Physical parameters configured in meters are converted
/// to pixel units with this scale before they enter the model.
pub const METERS_TO_PIXELS: f64 = 3779.52;

/// A 2-D pose `(x, y, heading)` in pixels and radians.
///
/// Coordinates are screen coordinates: x grows to the right, y grows
/// downward. The heading increases when the right wheel outruns the left,
/// which on screen turns the robot counter-clockwise.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Screen x position (px).
    pub x: f64,
    /// Screen y position (px).
    pub y: f64,
    /// Heading (rad). Snaps back to 0 past a full revolution, see
    /// [`Pose::fold_heading`].
    pub heading: f64,
}

impl Pose {
    /// Construct a new pose.
    ///
    /// # Arguments
    ///
    /// * `x`: Screen x position in pixels.
    /// * `y`: Screen y position in pixels.
    /// * `heading`: Heading in radians.
    pub const fn new(x: f64, y: f64, heading: f64) -> Self {
        Pose { x, y, heading }
    }

    /// Fold a heading that has accumulated past a full revolution.
    ///
    /// Any heading with `|heading| > 2π` is reset to exactly `0.0`; everything
    /// else passes through untouched. This is a hard reset rather than a
    /// modulo wrap, so a robot spinning in place visibly snaps back to its
    /// initial orientation once per revolution.
    ///
    /// # Arguments
    ///
    /// * `heading`: The heading in radians to fold.
    ///
    /// # Returns
    ///
    /// The folded heading in radians.
    pub fn fold_heading(heading: f64) -> f64 {
        if fabs(heading) > 2.0 * PI {
            0.0
        } else {
            heading
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.2}, y: {:.2}, heading: {:.2} rad)", self.x, self.y, self.heading)
    }
}

/// Left and right wheel velocities in pixels per second.
///
/// These are the control inputs of the model: keyboard increments and
/// goal-steering adjustments both act on this pair.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelSpeeds {
    /// Left wheel velocity (px/s).
    pub left: f64,
    /// Right wheel velocity (px/s).
    pub right: f64,
}

impl WheelSpeeds {
    /// Construct wheel speeds.
    ///
    /// # Arguments
    ///
    /// * `left`: Left wheel velocity (px/s).
    /// * `right`: Right wheel velocity (px/s).
    pub const fn new(left: f64, right: f64) -> Self {
        WheelSpeeds { left, right }
    }

    /// Both wheels stopped.
    pub const fn stopped() -> Self {
        WheelSpeeds::new(0.0, 0.0)
    }
}

impl fmt::Display for WheelSpeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(L: {:.2} px/s, R: {:.2} px/s)", self.left, self.right)
    }
}

/// Linear and angular chassis velocities derived from the wheel pair.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChassisSpeeds {
    /// Linear speed of the chassis center (px/s).
    pub v: f64,
    /// Angular speed of the chassis (rad/s).
    pub omega: f64,
}

impl ChassisSpeeds {
    /// Construct chassis speeds.
    ///
    /// # Arguments
    ///
    /// * `v`: Linear speed of the chassis center (px/s).
    /// * `omega`: Angular speed of the chassis (rad/s).
    pub const fn new(v: f64, omega: f64) -> Self {
        ChassisSpeeds { v, omega }
    }
}

impl fmt::Display for ChassisSpeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(v: {:.2} px/s, ω: {:.2} rad/s)", self.v, self.omega)
    }
}

/// Symmetric-or-not clamp bounds for wheel velocities.
///
/// Every wheel-speed adjustment, whether from keyboard input or from the
/// steering controller, is expected to pass through [`SpeedLimits::clamp`]
/// before the next pose update.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedLimits {
    /// Lower bound (px/s).
    min: f64,
    /// Upper bound (px/s).
    max: f64,
}

impl SpeedLimits {
    /// Construct clamp bounds.
    ///
    /// # Arguments
    ///
    /// * `min`: The lower wheel-velocity bound in px/s.
    /// * `max`: The upper wheel-velocity bound in px/s.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidSpeedLimits)` if `min > max`.
    pub const fn new(min: f64, max: f64) -> Result<Self, KinematicsError> {
        if min > max {
            return Err(KinematicsError::InvalidSpeedLimits(
                "min must not exceed max",
            ));
        }
        Ok(SpeedLimits { min, max })
    }

    /// Returns the lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Returns the upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamp each wheel velocity independently into `[min, max]`.
    ///
    /// Clamping is idempotent: applying it to an already-clamped pair
    /// returns the pair unchanged.
    ///
    /// # Arguments
    ///
    /// * `speeds`: The wheel-velocity pair to clamp.
    ///
    /// # Returns
    ///
    /// The clamped wheel-velocity pair.
    pub fn clamp(&self, speeds: WheelSpeeds) -> WheelSpeeds {
        WheelSpeeds {
            left: speeds.left.clamp(self.min, self.max),
            right: speeds.right.clamp(self.min, self.max),
        }
    }
}

impl fmt::Display for SpeedLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2}, {:.2}] px/s", self.min, self.max)
    }
}

/// Differential-drive kinematics helper.
///
/// Encapsulates the one physical parameter of the model, the axle length
/// between the two drive wheels, and integrates wheel speeds into pose.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialDrive {
    /// Axle length (px).
    axle_length: f64,
}

impl DifferentialDrive {
    /// Construct a new differential-drive kinematics helper.
    ///
    /// # Arguments
    ///
    /// * `axle_length`: The distance between the two drive wheels in pixels.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidAxleLength)` if `axle_length` is
    /// not positive. Rejecting it here keeps the angular-velocity division
    /// safe everywhere else.
    pub const fn new(axle_length: f64) -> Result<Self, KinematicsError> {
        if axle_length <= 0.0 {
            return Err(KinematicsError::InvalidAxleLength(
                "must be positive",
            ));
        }
        Ok(DifferentialDrive { axle_length })
    }

    /// Returns the axle length.
    pub fn axle_length(&self) -> f64 {
        self.axle_length
    }

    /// Calculates the chassis speeds (linear and angular velocity) from the
    /// wheel pair. This is the forward kinematics problem.
    ///
    /// # Arguments
    ///
    /// * `wheel_speeds`: The commanded left and right wheel velocities.
    ///
    /// # Returns
    ///
    /// The resulting linear and angular velocities of the chassis.
    pub fn forward_kinematics(&self, wheel_speeds: WheelSpeeds) -> ChassisSpeeds {
        let v = (wheel_speeds.left + wheel_speeds.right) / 2.0;
        let omega = (wheel_speeds.right - wheel_speeds.left) / self.axle_length;

        ChassisSpeeds::new(v, omega)
    }

    /// Updates the robot's pose given its current pose, chassis speeds, and
    /// time delta.
    ///
    /// Integrates the chassis speeds over `dt`, assuming they are constant
    /// across the interval. The y displacement is subtracted because screen
    /// y grows downward. The resulting heading is folded with
    /// [`Pose::fold_heading`].
    ///
    /// # Arguments
    ///
    /// * `current_pose`: The robot's current pose.
    /// * `chassis_speeds`: The robot's current linear and angular speeds.
    /// * `dt`: The time delta in seconds over which the speeds are applied.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::NegativeTimeDelta)` if `dt` is negative.
    /// `dt = 0` is valid and leaves the pose unchanged.
    ///
    /// # Returns
    ///
    /// The robot's new pose.
    pub fn update_pose(
        &self,
        current_pose: Pose,
        chassis_speeds: ChassisSpeeds,
        dt: f64,
    ) -> Result<Pose, KinematicsError> {
        if dt < 0.0 {
            return Err(KinematicsError::NegativeTimeDelta(
                "must be non-negative",
            ));
        }

        let delta_x = chassis_speeds.v * cos(current_pose.heading) * dt;
        let delta_y = chassis_speeds.v * sin(current_pose.heading) * dt;
        let delta_heading = chassis_speeds.omega * dt;

        Ok(Pose {
            x: current_pose.x + delta_x,
            // Screen y grows downward, so a positive heading moves the
            // robot up the screen.
            y: current_pose.y - delta_y,
            heading: Pose::fold_heading(current_pose.heading + delta_heading),
        })
    }

    /// Convenience function to update pose directly from wheel speeds and dt.
    ///
    /// Runs `forward_kinematics` and then `update_pose`.
    ///
    /// # Arguments
    ///
    /// * `current_pose`: The robot's current pose.
    /// * `wheel_speeds`: The commanded left and right wheel velocities.
    /// * `dt`: The time delta in seconds over which the speeds are applied.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::NegativeTimeDelta)` if `dt` is negative
    /// (propagated from `update_pose`).
    ///
    /// # Returns
    ///
    /// The robot's new pose.
    pub fn update_pose_from_wheel_speeds(
        &self,
        current_pose: Pose,
        wheel_speeds: WheelSpeeds,
        dt: f64,
    ) -> Result<Pose, KinematicsError> {
        let chassis_speeds = self.forward_kinematics(wheel_speeds);
        self.update_pose(current_pose, chassis_speeds, dt)
    }
}

impl fmt::Display for DifferentialDrive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DifferentialDrive (L: {:.2} px)", self.axle_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-6;

    #[test]
    fn test_fold_heading() {
        assert_eq!(Pose::fold_heading(0.0), 0.0);
        assert_eq!(Pose::fold_heading(PI), PI);
        assert_eq!(Pose::fold_heading(-PI), -PI);
        assert_eq!(Pose::fold_heading(2.0 * PI), 2.0 * PI); // exactly 2π passes through
        assert_eq!(Pose::fold_heading(2.0 * PI + 0.01), 0.0); // reset, not wrapped
        assert_eq!(Pose::fold_heading(-2.0 * PI - 0.01), 0.0);
        assert_eq!(Pose::fold_heading(7.0), 0.0);
    }

    #[test]
    fn test_drive_constructor() {
        let drive = DifferentialDrive::new(37.7952).unwrap();
        assert_eq!(drive.axle_length, 37.7952);
        assert_eq!(drive.axle_length(), 37.7952); // Test getter
    }

    #[test]
    fn test_constructor_invalid_axle_length() {
        let result = DifferentialDrive::new(0.0);
        assert!(matches!(result, Err(KinematicsError::InvalidAxleLength("must be positive"))));
        let result_negative = DifferentialDrive::new(-37.8);
        assert!(matches!(result_negative, Err(KinematicsError::InvalidAxleLength("must be positive"))));
    }

    #[test]
    fn test_limits_constructor_invalid() {
        let result = SpeedLimits::new(10.0, -10.0);
        assert!(matches!(result, Err(KinematicsError::InvalidSpeedLimits("min must not exceed max"))));
    }

    #[test]
    fn test_clamp_within_bounds() {
        let limits = SpeedLimits::new(-75.5904, 75.5904).unwrap();
        let clamped = limits.clamp(WheelSpeeds::new(100.0, -100.0));
        assert_eq!(clamped.left, 75.5904);
        assert_eq!(clamped.right, -75.5904);
        // An in-range pair is untouched
        let clamped = limits.clamp(WheelSpeeds::new(10.0, -10.0));
        assert_eq!(clamped.left, 10.0);
        assert_eq!(clamped.right, -10.0);
    }

    #[test]
    fn test_clamp_idempotent() {
        let limits = SpeedLimits::new(-20.0, 20.0).unwrap();
        let once = limits.clamp(WheelSpeeds::new(35.0, -35.0));
        let twice = limits.clamp(once);
        assert_eq!(once, twice);
        assert!(once.left <= limits.max() && once.left >= limits.min());
        assert!(once.right <= limits.max() && once.right >= limits.min());
    }

    #[test]
    fn test_forward_kinematics_straight() {
        let drive = DifferentialDrive::new(37.7952).unwrap();
        let wheel_speeds = WheelSpeeds::new(75.59, 75.59);
        // v = (75.59 + 75.59) / 2 = 75.59 px/s
        // omega = (75.59 - 75.59) / 37.7952 = 0 rad/s
        let chassis_speeds = drive.forward_kinematics(wheel_speeds);
        assert!((chassis_speeds.v - 75.59).abs() < EPSILON);
        assert!((chassis_speeds.omega - 0.0).abs() < EPSILON);
    }

    #[test]
    fn test_forward_kinematics_pivot_turn() {
        let drive = DifferentialDrive::new(10.0).unwrap();
        let wheel_speeds = WheelSpeeds::new(-5.0, 5.0);
        // v = (-5 + 5) / 2 = 0 px/s
        // omega = (5 - (-5)) / 10 = 1 rad/s
        let chassis_speeds = drive.forward_kinematics(wheel_speeds);
        assert!((chassis_speeds.v - 0.0).abs() < EPSILON);
        assert!((chassis_speeds.omega - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_forward_kinematics_gentle_turn() {
        let drive = DifferentialDrive::new(10.0).unwrap();
        let wheel_speeds = WheelSpeeds::new(5.0, 10.0);
        // v = (5 + 10) / 2 = 7.5 px/s
        // omega = (10 - 5) / 10 = 0.5 rad/s
        let chassis_speeds = drive.forward_kinematics(wheel_speeds);
        assert!((chassis_speeds.v - 7.5).abs() < EPSILON);
        assert!((chassis_speeds.omega - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_update_pose_zero_dt_is_noop() {
        let drive = DifferentialDrive::new(37.7952).unwrap();
        let current_pose = Pose::new(200.0, 200.0, 1.3);
        let wheel_speeds = WheelSpeeds::new(75.59, -75.59);
        let new_pose = drive
            .update_pose_from_wheel_speeds(current_pose, wheel_speeds, 0.0)
            .unwrap();
        assert_eq!(new_pose, current_pose);
    }

    #[test]
    fn test_update_pose_straight_along_x() {
        let drive = DifferentialDrive::new(79.5).unwrap();
        let current_pose = Pose::new(200.0, 200.0, 0.0);
        let wheel_speeds = WheelSpeeds::new(75.59, 75.59);
        let dt = 1.0;

        // v = 75.59 px/s, omega = 0
        // x = 200 + 75.59*cos(0)*1 = 275.59
        // y = 200 - 75.59*sin(0)*1 = 200
        let new_pose = drive.update_pose_from_wheel_speeds(current_pose, wheel_speeds, dt).unwrap();
        assert!((new_pose.x - 275.59).abs() < EPSILON);
        assert!((new_pose.y - 200.0).abs() < EPSILON);
        assert!((new_pose.heading - 0.0).abs() < EPSILON);
    }

    #[test]
    fn test_update_pose_straight_heading_up() {
        let drive = DifferentialDrive::new(37.7952).unwrap();
        let current_pose = Pose::new(200.0, 200.0, PI / 2.0);
        let wheel_speeds = WheelSpeeds::new(10.0, 10.0);
        let dt = 2.0;

        // Heading π/2 points up the screen: x unchanged, y decreases.
        // x = 200 + 10*cos(π/2)*2 = 200
        // y = 200 - 10*sin(π/2)*2 = 180
        let new_pose = drive.update_pose_from_wheel_speeds(current_pose, wheel_speeds, dt).unwrap();
        assert!((new_pose.x - 200.0).abs() < EPSILON);
        assert!((new_pose.y - 180.0).abs() < EPSILON);
        assert!((new_pose.heading - PI / 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_update_pose_straight_displaces_along_heading() {
        let drive = DifferentialDrive::new(37.7952).unwrap();
        let heading = 0.7;
        let current_pose = Pose::new(100.0, 100.0, heading);
        let wheel_speeds = WheelSpeeds::new(20.0, 20.0);
        let dt = 0.5;

        let new_pose = drive.update_pose_from_wheel_speeds(current_pose, wheel_speeds, dt).unwrap();
        let dx = new_pose.x - current_pose.x;
        let dy = new_pose.y - current_pose.y;
        // Displacement lies on the heading ray (screen convention flips y)
        assert!((dx - 10.0 * cos(heading)).abs() < EPSILON);
        assert!((dy + 10.0 * sin(heading)).abs() < EPSILON);
        assert!((new_pose.heading - heading).abs() < EPSILON);
    }

    #[test]
    fn test_update_pose_pivot_turn_no_translation() {
        let drive = DifferentialDrive::new(10.0).unwrap();
        let current_pose = Pose::new(200.0, 200.0, 0.4);
        let wheel_speeds = WheelSpeeds::new(-5.0, 5.0);
        let dt = 1.0;

        // v = 0 so the position must not move; omega = 1 rad/s
        let new_pose = drive.update_pose_from_wheel_speeds(current_pose, wheel_speeds, dt).unwrap();
        assert!((new_pose.x - 200.0).abs() < EPSILON);
        assert!((new_pose.y - 200.0).abs() < EPSILON);
        assert!((new_pose.heading - 1.4).abs() < EPSILON);
    }

    #[test]
    fn test_update_pose_heading_resets_past_full_turn() {
        let drive = DifferentialDrive::new(10.0).unwrap();
        let current_pose = Pose::new(0.0, 0.0, 2.0 * PI - 0.01);
        let wheel_speeds = WheelSpeeds::new(0.0, 1.0);
        // omega = (1 - 0) / 10 = 0.1 rad/s, so dt=1 pushes the heading past 2π
        let new_pose = drive.update_pose_from_wheel_speeds(current_pose, wheel_speeds, 1.0).unwrap();
        // Exactly zero, not the wrapped remainder
        assert_eq!(new_pose.heading, 0.0);
    }

    #[test]
    fn test_update_pose_negative_dt() {
        let drive = DifferentialDrive::new(10.0).unwrap();
        let current_pose = Pose::new(0.0, 0.0, 0.0);
        let chassis_speeds = ChassisSpeeds::new(1.0, 0.0);
        let result = drive.update_pose(current_pose, chassis_speeds, -0.1);
        assert!(matches!(result, Err(KinematicsError::NegativeTimeDelta("must be non-negative"))));
    }

    #[test]
    fn test_update_pose_combined_motion() {
        let drive = DifferentialDrive::new(20.0).unwrap();
        let current_pose = Pose::new(100.0, 100.0, 0.0);
        let wheel_speeds = WheelSpeeds::new(10.0, 30.0);
        let dt = 0.5;

        // v = 20 px/s, omega = 20/20 = 1 rad/s
        // x = 100 + 20*cos(0)*0.5 = 110
        // y = 100 - 20*sin(0)*0.5 = 100
        // heading = 0 + 1*0.5 = 0.5
        let new_pose = drive.update_pose_from_wheel_speeds(current_pose, wheel_speeds, dt).unwrap();
        assert!((new_pose.x - 110.0).abs() < EPSILON);
        assert!((new_pose.y - 100.0).abs() < EPSILON);
        assert!((new_pose.heading - 0.5).abs() < EPSILON);
    }
}
