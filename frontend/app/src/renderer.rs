use macroquad::math::vec2;
use macroquad::{camera, color, shapes, text, window};
use mothership_simulator::entity::EntityClass;
use mothership_simulator::model::{self, Segment};
use mothership_simulator::snapshot::{EntitySnapshot, Snapshot};
use nalgebra::{point, vector, Isometry2, Point2, Vector2};
use std::collections::HashMap;

const LINE_WIDTH: f32 = 2.0;
const FLAME_LENGTH: f64 = 10.0;

pub struct Renderer {
    models: HashMap<EntityClass, Vec<Segment>>,
}

fn entity_color(class: EntityClass) -> color::Color {
    match class {
        EntityClass::Player => color::WHITE,
        EntityClass::Mothership => color::SKYBLUE,
        EntityClass::Rock(_) => color::GRAY,
    }
}

fn draw_segment(a: Point2<f64>, b: Point2<f64>, thickness: f32, color: color::Color) {
    shapes::draw_line(a.x as f32, a.y as f32, b.x as f32, b.y as f32, thickness, color);
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            models: HashMap::new(),
        }
    }

    pub fn render(&mut self, snapshot: &Snapshot) {
        window::clear_background(color::BLACK);

        // World units are pixels with the origin at the bottom-left corner and y up.
        let (width, height) = (snapshot.width as f32, snapshot.height as f32);
        camera::set_camera(&camera::Camera2D {
            zoom: vec2(2.0 / width, 2.0 / height),
            target: vec2(width / 2.0, height / 2.0),
            ..Default::default()
        });

        for entity in snapshot.entities.iter() {
            self.draw_entity(entity);
        }

        if let Some(player) = snapshot.player() {
            draw_flames(player, snapshot.player_force);
        }
    }

    fn draw_entity(&mut self, entity: &EntitySnapshot) {
        let segments = self
            .models
            .entry(entity.class)
            .or_insert_with(|| model::load(entity.class));
        let transform = Isometry2::new(entity.position.coords, entity.heading);
        let color = entity_color(entity.class);
        for segment in segments.iter() {
            draw_segment(
                transform * segment.a,
                transform * segment.b,
                LINE_WIDTH,
                color,
            );
        }
    }

    pub fn draw_status(
        &self,
        snapshot: &Snapshot,
        scenario_name: &str,
        frame_time: (f64, f64, f64),
        paused: bool,
    ) {
        camera::set_default_camera();

        let mut lines = vec![
            format!("Score: {}", snapshot.score),
            format!("Tick: {}", snapshot.tick),
            format!("Scenario: {}", scenario_name),
        ];
        let (a, b, c) = frame_time;
        lines.push(format!(
            "Frame time: {:.1}/{:.1}/{:.1} ms",
            a * 1e3,
            b * 1e3,
            c * 1e3
        ));
        if paused {
            lines.push("PAUSED".to_owned());
        }

        for (i, line) in lines.iter().enumerate() {
            text::draw_text(line, 10.0, 20.0 + 20.0 * i as f32, 20.0, color::WHITE);
        }
    }
}

// Flames come out of the hull on the side opposite the thrust.
fn draw_flames(player: &EntitySnapshot, force: Vector2<f64>) {
    let half = model::PLAYER_SIZE / 2.0;
    let transform = Isometry2::new(player.position.coords, player.heading);
    let flame = |base: Point2<f64>, direction: Vector2<f64>| {
        let tip = base + direction * FLAME_LENGTH;
        draw_segment(transform * base, transform * tip, LINE_WIDTH, color::ORANGE);
    };
    if force.y != 0.0 {
        let s = -force.y.signum();
        flame(point![0.0, s * half], vector![0.0, s]);
    }
    if force.x != 0.0 {
        let s = -force.x.signum();
        flame(point![s * half, 0.0], vector![s, 0.0]);
    }
}
