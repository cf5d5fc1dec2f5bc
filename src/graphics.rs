use macroquad::prelude::*;

use diffbot_kinematics::Pose;
use diffbot_steering::{GoalState, HEADING_RAY_LEN};

use crate::sim::SimState;

// Function to configure the macroquad window
pub fn window_conf() -> Conf {
    Conf {
        window_title: "Differential Drive Robot".to_string(),
        window_width: 1200,
        window_height: 600,
        high_dpi: true,
        ..Default::default()
    }
}

const ROBOT_RADIUS: f32 = 15.0;
const GOAL_RADIUS: f32 = 10.0;
const LATERAL_AXIS_LEN: f32 = 40.0;

pub fn draw_frame(state: &SimState) {
    clear_background(WHITE);

    draw_trail(&state.trail);

    if let Some(goal) = state.tracker.goal() {
        let color = match state.tracker.state() {
            GoalState::Arrived => GREEN,
            _ => RED,
        };
        draw_circle(goal.x as f32, goal.y as f32, GOAL_RADIUS, color);
        draw_circle_lines(
            goal.x as f32,
            goal.y as f32,
            state.params().steering.arrival_radius() as f32,
            1.0,
            GRAY,
        );
    }

    draw_robot(&state.pose);
    draw_hud(state);
}

fn draw_trail(trail: &std::collections::VecDeque<(f64, f64)>) {
    let mut samples = trail.iter();
    let Some(mut prev) = samples.next() else {
        return;
    };
    for next in samples {
        draw_line(
            prev.0 as f32,
            prev.1 as f32,
            next.0 as f32,
            next.1 as f32,
            1.0,
            SKYBLUE,
        );
        prev = next;
    }
}

fn draw_robot(pose: &Pose) {
    let x = pose.x as f32;
    let y = pose.y as f32;
    // Screen y grows downward, so the drawn angle is the negated heading
    let th = -(pose.heading as f32);

    let p1 = Vec2::new(x + ROBOT_RADIUS * th.cos(), y + ROBOT_RADIUS * th.sin());
    let p2 = Vec2::new(
        x + ROBOT_RADIUS * (th + 2.0 * std::f32::consts::PI / 3.0).cos(),
        y + ROBOT_RADIUS * (th + 2.0 * std::f32::consts::PI / 3.0).sin(),
    );
    let p3 = Vec2::new(
        x + ROBOT_RADIUS * (th - 2.0 * std::f32::consts::PI / 3.0).cos(),
        y + ROBOT_RADIUS * (th - 2.0 * std::f32::consts::PI / 3.0).sin(),
    );
    draw_triangle(p1, p2, p3, BLUE);

    // Axis indicators: the forward ray the steering controller reasons
    // about, plus the lateral axle axis
    let ray = HEADING_RAY_LEN as f32;
    draw_line(x, y, x + ray * th.cos(), y + ray * th.sin(), 2.0, DARKBLUE);
    let lat = th + std::f32::consts::FRAC_PI_2;
    draw_line(
        x,
        y,
        x + LATERAL_AXIS_LEN * lat.cos(),
        y + LATERAL_AXIS_LEN * lat.sin(),
        1.0,
        DARKGREEN,
    );
}

fn draw_hud(state: &SimState) {
    draw_text(
        &format!(
            "Robot: x={:.2} y={:.2} heading={:.2}",
            state.pose.x, state.pose.y, state.pose.heading
        ),
        10.0,
        20.0,
        20.0,
        BLACK,
    );
    draw_text(
        &format!(
            "Wheels: L={:.2} R={:.2} px/s",
            state.speeds.left, state.speeds.right
        ),
        10.0,
        40.0,
        20.0,
        BLACK,
    );
    let goal_line = match state.tracker.goal() {
        Some(goal) => format!("Goal: {} ({})", goal, state.tracker.state()),
        None => "Goal: none (click to set)".to_string(),
    };
    draw_text(&goal_line, 10.0, 60.0, 20.0, BLACK);
    draw_text(
        "KP4/KP1: left wheel +/-   KP6/KP3: right wheel +/-   click: set goal",
        10.0,
        80.0,
        20.0,
        DARKGRAY,
    );
}
