#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` go-to-goal steering controller for a 2D differential-drive robot."]
#![doc = ""]
#![doc = "Given a pose and a goal point, this crate computes the signed angular error"]
#![doc = "to the goal and emits wheel-speed adjustments that turn the robot toward the"]
#![doc = "goal, drive it straight once aligned, and stop it inside an arrival radius."]

use core::f64::consts::PI;
use core::fmt;
use libm::{acos, cos, sin, sqrt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use diffbot_kinematics::{Pose, WheelSpeeds};

pub mod error;
pub use error::SteeringError;

/// Distance below which a goal counts as reached (px).
pub const DEFAULT_ARRIVAL_RADIUS: f64 = 30.0;

/// Angular error within which the robot drives straight instead of
/// turning (degrees).
pub const ALIGNMENT_TOLERANCE_DEG: f64 = 3.0;

/// Length of the robot's forward ray (px). The length cancels out in
/// normalization; it matches the heading ray the renderer draws.
pub const HEADING_RAY_LEN: f64 = 80.0;

/// A goal point in screen coordinates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Goal {
    /// Screen x position (px).
    pub x: f64,
    /// Screen y position (px).
    pub y: f64,
}

impl Goal {
    /// Construct a goal point.
    pub const fn new(x: f64, y: f64) -> Self {
        Goal { x, y }
    }

    /// Euclidean distance from a pose to this goal, in pixels.
    pub fn distance_to(&self, pose: &Pose) -> f64 {
        let dx = self.x - pose.x;
        let dy = self.y - pose.y;
        sqrt(dx * dx + dy * dy)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Outcome of one steering step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steering {
    /// The robot is inside the arrival radius; both wheels must stop.
    Arrived,
    /// The next wheel-speed pair. The caller is responsible for clamping it
    /// before the next pose update.
    Adjust(WheelSpeeds),
}

/// Goal-following phase of one robot.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoalState {
    /// No active goal.
    #[default]
    Idle,
    /// A goal is set and the robot is outside its arrival radius.
    Seeking,
    /// The robot reached the goal. The goal stays set; only a new goal
    /// resumes seeking.
    Arrived,
}

impl fmt::Display for GoalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalState::Idle => write!(f, "idle"),
            GoalState::Seeking => write!(f, "seeking"),
            GoalState::Arrived => write!(f, "arrived"),
        }
    }
}

/// Tracks the active goal and its [`GoalState`].
///
/// Arrival is terminal for a given goal: `mark_arrived` keeps the goal set
/// (so it can still be rendered) and the tracker resumes seeking only when
/// `set_goal` replaces it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GoalTracker {
    goal: Option<Goal>,
    state: GoalState,
}

impl GoalTracker {
    /// A tracker with no goal.
    pub const fn new() -> Self {
        GoalTracker {
            goal: None,
            state: GoalState::Idle,
        }
    }

    /// Set or replace the active goal and start seeking it.
    pub fn set_goal(&mut self, goal: Goal) {
        self.goal = Some(goal);
        self.state = GoalState::Seeking;
    }

    /// Record that the active goal was reached. No-op without a goal.
    pub fn mark_arrived(&mut self) {
        if self.goal.is_some() {
            self.state = GoalState::Arrived;
        }
    }

    /// Drop the active goal and return to idle.
    pub fn clear(&mut self) {
        self.goal = None;
        self.state = GoalState::Idle;
    }

    /// The active goal, if any.
    pub fn goal(&self) -> Option<Goal> {
        self.goal
    }

    /// The current goal-following phase.
    pub fn state(&self) -> GoalState {
        self.state
    }

    /// Whether a goal is set and not yet reached.
    pub fn is_seeking(&self) -> bool {
        self.state == GoalState::Seeking
    }
}

/// Go-to-goal steering controller.
///
/// `step` is a pure function of pose, goal, and the current wheel speeds;
/// the controller itself holds only its tuning parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalSteering {
    /// Wheel-speed increment applied per invocation (px/s).
    step_gain: f64,
    /// Arrival radius (px).
    arrival_radius: f64,
}

impl GoalSteering {
    /// Construct a steering controller.
    ///
    /// # Arguments
    ///
    /// * `step_gain`: Wheel-speed increment in px/s applied per call.
    /// * `arrival_radius`: Distance in px below which the goal is reached.
    ///
    /// # Errors
    ///
    /// Returns `Err(SteeringError::InvalidArrivalRadius)` if
    /// `arrival_radius` is not positive. A positive radius also guarantees
    /// the goal-direction normalization below never divides by zero.
    pub const fn new(step_gain: f64, arrival_radius: f64) -> Result<Self, SteeringError> {
        if arrival_radius <= 0.0 {
            return Err(SteeringError::InvalidArrivalRadius(
                "must be positive",
            ));
        }
        Ok(GoalSteering {
            step_gain,
            arrival_radius,
        })
    }

    /// Construct a controller with the default 30 px arrival radius.
    pub const fn with_default_radius(step_gain: f64) -> Self {
        GoalSteering {
            step_gain,
            arrival_radius: DEFAULT_ARRIVAL_RADIUS,
        }
    }

    /// Returns the per-invocation wheel-speed increment.
    pub fn step_gain(&self) -> f64 {
        self.step_gain
    }

    /// Returns the arrival radius.
    pub fn arrival_radius(&self) -> f64 {
        self.arrival_radius
    }

    /// Decide the next wheel-speed pair for one frame of goal seeking.
    ///
    /// Inside the arrival radius the result is [`Steering::Arrived`] no
    /// matter the inputs. Otherwise the signed angle between the robot's
    /// forward ray and the goal direction picks one of three moves:
    ///
    /// * angle above +3°: the goal is off to the right, so the left wheel
    ///   speeds up by the step gain and the right wheel is forced to zero;
    /// * angle below −3°: mirrored, turning left;
    /// * within tolerance: both wheels speed up, accelerating straight.
    ///
    /// The gain is applied once per invocation, not per second. The caller
    /// runs this once per rendered frame, so the effective acceleration
    /// tracks the frame rate.
    ///
    /// # Errors
    ///
    /// Returns `Err(SteeringError::DegenerateHeading)` when the goal lies
    /// exactly on the ray behind the robot. The turn direction is
    /// indeterminate there; callers pick the fallback (the simulator holds
    /// the current speeds for that frame).
    pub fn step(
        &self,
        pose: Pose,
        goal: Goal,
        speeds: WheelSpeeds,
    ) -> Result<Steering, SteeringError> {
        let to_goal_x = goal.x - pose.x;
        let to_goal_y = goal.y - pose.y;
        let distance = sqrt(to_goal_x * to_goal_x + to_goal_y * to_goal_y);

        if distance < self.arrival_radius {
            return Ok(Steering::Arrived);
        }

        // Forward ray in screen coordinates. The negated heading mirrors the
        // inverted y-axis used by the kinematics.
        let fwd_x = HEADING_RAY_LEN * cos(-pose.heading);
        let fwd_y = HEADING_RAY_LEN * sin(-pose.heading);
        let fwd_len = sqrt(fwd_x * fwd_x + fwd_y * fwd_y);

        let (fx, fy) = (fwd_x / fwd_len, fwd_y / fwd_len);
        let (gx, gy) = (to_goal_x / distance, to_goal_y / distance);

        // 2x2 minor of the unit vectors decides which side the goal is on;
        // the clamped dot product gives the unsigned angle between them.
        let minor = gx * fy - gy * fx;
        let dot = (gx * fx + gy * fy).clamp(-1.0, 1.0);

        if minor == 0.0 && dot < 0.0 {
            return Err(SteeringError::DegenerateHeading(
                "goal lies exactly behind the robot",
            ));
        }

        let side = if minor > 0.0 {
            1.0
        } else if minor < 0.0 {
            -1.0
        } else {
            0.0
        };
        let angle_deg = -side * acos(dot) * (180.0 / PI);

        let next = if angle_deg > ALIGNMENT_TOLERANCE_DEG {
            // Goal to the right: accelerate the left wheel, zero the right.
            WheelSpeeds::new(speeds.left + self.step_gain, 0.0)
        } else if angle_deg < -ALIGNMENT_TOLERANCE_DEG {
            WheelSpeeds::new(0.0, speeds.right + self.step_gain)
        } else {
            WheelSpeeds::new(speeds.left + self.step_gain, speeds.right + self.step_gain)
        };

        Ok(Steering::Adjust(next))
    }
}

impl fmt::Display for GoalSteering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GoalSteering (gain: {:.2} px/s, radius: {:.1} px)",
            self.step_gain, self.arrival_radius
        )
    }
}
