mod config;   // brings `config.rs` in as `crate::config`
mod graphics; // brings `graphics.rs` in as `crate::graphics`
mod sim;      // brings `sim.rs` in as `crate::sim`

use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{self, EnvFilter};

use graphics::window_conf; // Import window_conf directly
use sim::SimState;

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let params = match config::load_settings().and_then(|s| config::SimParams::from_settings(&s)) {
        Ok(params) => params,
        Err(e) => {
            error!("Failed to configure the simulator: {:?}", e);
            return;
        }
    };

    let key_increment = params.key_increment;
    let mut state = SimState::new(params);
    info!(
        drive = %params.drive,
        limits = %params.limits,
        steering = %params.steering,
        "Differential drive simulator started"
    );

    loop {
        if is_key_pressed(KeyCode::Escape) {
            info!("Escape pressed, shutting down");
            break;
        }

        // Discrete key presses, one wheel-speed increment each
        if is_key_pressed(KeyCode::Kp4) {
            state.nudge_left(key_increment);
        }
        if is_key_pressed(KeyCode::Kp1) {
            state.nudge_left(-key_increment);
        }
        if is_key_pressed(KeyCode::Kp6) {
            state.nudge_right(key_increment);
        }
        if is_key_pressed(KeyCode::Kp3) {
            state.nudge_right(-key_increment);
        }
        if is_mouse_button_pressed(MouseButton::Left) {
            let (mx, my) = mouse_position();
            state.place_goal(mx as f64, my as f64);
        }

        let dt = get_frame_time() as f64;
        if let Err(e) = state.tick(dt) {
            error!("Simulation step failed: {:?}", e);
            break;
        }

        graphics::draw_frame(&state);
        next_frame().await;
    }
}
