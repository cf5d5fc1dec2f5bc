use diffbot_kinematics::{DifferentialDrive, Pose, SpeedLimits, WheelSpeeds, METERS_TO_PIXELS};
use diffbot_steering::{Goal, GoalSteering, Steering};

fn main() {
    let drive = DifferentialDrive::new(0.01 * METERS_TO_PIXELS).unwrap();
    let max_speed = 0.02 * METERS_TO_PIXELS;
    let limits = SpeedLimits::new(-max_speed, max_speed).unwrap();
    let steering = GoalSteering::with_default_radius(0.005 * METERS_TO_PIXELS);

    let mut pose = Pose::new(200.0, 200.0, 0.0);
    let mut speeds = WheelSpeeds::stopped();
    let goal = Goal::new(700.0, 450.0);
    let dt = 1.0 / 60.0; // one simulated frame

    println!("Seeking {} from {}", goal, pose);

    for frame in 0..10_000 {
        match steering.step(pose, goal, speeds) {
            Ok(Steering::Arrived) => {
                println!("Arrived after {} frames at {}", frame, pose);
                return;
            }
            Ok(Steering::Adjust(next)) => speeds = limits.clamp(next),
            Err(e) => {
                // Hold the current speeds for this frame
                eprintln!("frame {}: {}", frame, e);
            }
        }

        pose = drive
            .update_pose_from_wheel_speeds(pose, speeds, dt)
            .expect("dt is non-negative");

        if frame % 120 == 0 {
            println!("frame {:>5}: pose {}  wheels {}", frame, pose, speeds);
        }
    }

    println!("Gave up before arriving; final pose {}", pose);
}
