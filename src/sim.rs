use std::collections::VecDeque;

use tracing::{debug, info, warn};

use diffbot_kinematics::{Pose, WheelSpeeds};
use diffbot_steering::{Goal, GoalTracker, Steering};

use crate::config::SimParams;

/// Motion-trail samples kept for rendering; the oldest are evicted first.
pub const TRAIL_CAPACITY: usize = 1200;

/// All mutable simulation state, owned by the frame loop.
pub struct SimState {
    params: SimParams,
    pub pose: Pose,
    pub speeds: WheelSpeeds,
    pub tracker: GoalTracker,
    pub trail: VecDeque<(f64, f64)>,
}

impl SimState {
    pub fn new(params: SimParams) -> Self {
        SimState {
            params,
            pose: params.start_pose,
            speeds: WheelSpeeds::stopped(),
            tracker: GoalTracker::new(),
            trail: VecDeque::with_capacity(TRAIL_CAPACITY),
        }
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Adjust the left wheel by `delta` px/s (keyboard input).
    pub fn nudge_left(&mut self, delta: f64) {
        self.speeds = self.params.limits.clamp(WheelSpeeds::new(
            self.speeds.left + delta,
            self.speeds.right,
        ));
        debug!(left = self.speeds.left, "left wheel adjusted");
    }

    /// Adjust the right wheel by `delta` px/s (keyboard input).
    pub fn nudge_right(&mut self, delta: f64) {
        self.speeds = self.params.limits.clamp(WheelSpeeds::new(
            self.speeds.left,
            self.speeds.right + delta,
        ));
        debug!(right = self.speeds.right, "right wheel adjusted");
    }

    /// Set or replace the active goal (mouse input).
    pub fn place_goal(&mut self, x: f64, y: f64) {
        self.tracker.set_goal(Goal::new(x, y));
        info!(x, y, "goal set");
    }

    /// Advance the simulation by `dt` seconds: run the steering controller
    /// if a goal is being sought, clamp the resulting speeds, integrate the
    /// pose, and record a trail sample.
    pub fn tick(&mut self, dt: f64) -> anyhow::Result<()> {
        if self.tracker.is_seeking() {
            if let Some(goal) = self.tracker.goal() {
                match self.params.steering.step(self.pose, goal, self.speeds) {
                    Ok(Steering::Arrived) => {
                        self.speeds = WheelSpeeds::stopped();
                        self.tracker.mark_arrived();
                        info!(x = goal.x, y = goal.y, "goal reached");
                    }
                    Ok(Steering::Adjust(next)) => {
                        self.speeds = self.params.limits.clamp(next);
                    }
                    Err(e) => {
                        // Indeterminate turn direction: hold the current
                        // speeds for this frame.
                        warn!(error = %e, "steering fallback, holding wheel speeds");
                    }
                }
            }
        }

        self.pose = self
            .params
            .drive
            .update_pose_from_wheel_speeds(self.pose, self.speeds, dt)?;

        self.trail.push_back((self.pose.x, self.pose.y));
        if self.trail.len() > TRAIL_CAPACITY {
            self.trail.pop_front();
        }

        Ok(())
    }
}
