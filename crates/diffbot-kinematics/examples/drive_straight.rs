use diffbot_kinematics::*;

fn main() {
    let axle_length = 0.01 * METERS_TO_PIXELS; // 1 cm axle, scaled to pixels
    let drive_result = DifferentialDrive::new(axle_length);

    let mut current_pose = Pose::new(200.0, 200.0, 0.0);
    let wheel_speeds = WheelSpeeds::new(0.01 * METERS_TO_PIXELS, 0.01 * METERS_TO_PIXELS);
    let dt = 0.1; // Time step in seconds
    let num_steps = 10;

    match drive_result {
        Ok(drive) => {
            println!("Initializing simulation...");
            println!("  Differential Drive Parameters:");
            println!("    Axle Length: {} px", drive.axle_length());
            println!("  Initial State:");
            println!("    Pose:         {:?}", current_pose);
            println!("    Wheel Speeds: {:?}", wheel_speeds);
            println!("  Simulation Settings:");
            println!("    Time Step:    {} s", dt);
            println!("    Num Steps:    {}", num_steps);
            println!("\nSimulating...");

            for i in 0..num_steps {
                match drive.update_pose_from_wheel_speeds(current_pose, wheel_speeds, dt) {
                    Ok(new_pose) => {
                        current_pose = new_pose;
                        println!("Step {:>2}: Pose: {}", i + 1, current_pose);
                    }
                    Err(e) => {
                        eprintln!("Error during simulation step {}: {:?}", i + 1, e);
                        break; // Stop loop on error
                    }
                }
            }

            println!("\nSimulation complete.");
            println!("Final Pose: {:?}", current_pose);
        }
        Err(e) => {
            eprintln!("Failed to initialize kinematics: {:?}", e);
            eprintln!("Please ensure axle_length ({}) is positive.", axle_length);
        }
    }
}
