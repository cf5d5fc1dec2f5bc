use anyhow::Context;
use config::{Config, File, FileFormat};
use serde::Deserialize;
use tracing::info;

use diffbot_kinematics::{DifferentialDrive, METERS_TO_PIXELS, Pose, SpeedLimits};
use diffbot_steering::GoalSteering;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Robot parameters as written in the config file, in physical units.
#[derive(Debug, Clone, Deserialize)]
pub struct RobotSettings {
    pub start_x: f64,
    pub start_y: f64,
    pub axle_width_m: f64,
    pub max_speed_mps: f64,
    pub key_increment_mps: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SteeringSettings {
    pub step_gain_mps: f64,
    pub arrival_radius_px: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub robot: RobotSettings,
    pub steering: SteeringSettings,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    info!("Attempting to load configuration from {}", DEFAULT_CONFIG_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(true))
        .build()
        .with_context(|| format!("failed to read {}", DEFAULT_CONFIG_PATH))?
        .try_deserialize()
        .with_context(|| format!("failed to parse {}", DEFAULT_CONFIG_PATH))?;

    info!(?settings, "Successfully loaded configuration");
    Ok(settings)
}

/// Validated simulation parameters in pixel units, built once at startup.
#[derive(Debug, Clone, Copy)]
pub struct SimParams {
    pub start_pose: Pose,
    pub drive: DifferentialDrive,
    pub limits: SpeedLimits,
    pub steering: GoalSteering,
    /// Wheel-speed change per directional key press (px/s).
    pub key_increment: f64,
}

impl SimParams {
    /// Convert the configured physical quantities to pixel units and build
    /// the core components, rejecting invalid values up front.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let max_speed = settings.robot.max_speed_mps * METERS_TO_PIXELS;

        let drive = DifferentialDrive::new(settings.robot.axle_width_m * METERS_TO_PIXELS)
            .context("invalid axle width")?;
        let limits = SpeedLimits::new(-max_speed, max_speed).context("invalid speed limits")?;
        let steering = GoalSteering::new(
            settings.steering.step_gain_mps * METERS_TO_PIXELS,
            settings.steering.arrival_radius_px,
        )
        .context("invalid steering settings")?;

        Ok(SimParams {
            start_pose: Pose::new(settings.robot.start_x, settings.robot.start_y, 0.0),
            drive,
            limits,
            steering,
            key_increment: settings.robot.key_increment_mps * METERS_TO_PIXELS,
        })
    }
}
