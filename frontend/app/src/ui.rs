use crate::frame_timer::FrameTimer;
use crate::renderer::Renderer;
use macroquad::input::{self, KeyCode};
use macroquad::{time, window};
use mothership_simulator::controls::Key;
use mothership_simulator::simulation::{Simulation, PHYSICS_TICK_LENGTH};

// Bounds the work done after a long stall (window drag, debugger).
const MAX_STEPS_PER_FRAME: u32 = 5;

const KEY_BINDINGS: &[(KeyCode, Key)] = &[
    (KeyCode::Up, Key::Up),
    (KeyCode::Down, Key::Down),
    (KeyCode::Left, Key::Left),
    (KeyCode::Right, Key::Right),
    (KeyCode::A, Key::A),
    (KeyCode::D, Key::D),
    (KeyCode::S, Key::S),
];

pub struct UI {
    sim: Simulation,
    scenario_name: String,
    renderer: Renderer,
    frame_timer: FrameTimer,
    accumulator: f64,
    paused: bool,
    single_steps: u32,
    quit: bool,
}

impl UI {
    pub fn new(sim: Simulation, scenario_name: String) -> Self {
        log::info!("Initializing UI");
        UI {
            sim,
            scenario_name,
            renderer: Renderer::new(),
            frame_timer: Default::default(),
            accumulator: 0.0,
            paused: false,
            single_steps: 0,
            quit: false,
        }
    }

    fn handle_input(&mut self) {
        for &(code, key) in KEY_BINDINGS {
            if input::is_key_pressed(code) {
                self.sim.on_key_press(key);
            }
            if input::is_key_released(code) {
                self.sim.on_key_release(key);
            }
        }

        if input::is_key_pressed(KeyCode::Space) {
            self.paused = !self.paused;
            self.accumulator = 0.0;
            log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
        }
        if input::is_key_pressed(KeyCode::N) && self.paused {
            self.single_steps += 1;
        }
        if input::is_key_pressed(KeyCode::U) {
            for name in self.frame_timer.get_names() {
                let (a, b, c) = self.frame_timer.get(name);
                log::info!("{}: {:.1}/{:.1}/{:.1} ms", name, a * 1e3, b * 1e3, c * 1e3);
            }
        }
        if input::is_key_pressed(KeyCode::Escape) || input::is_key_pressed(KeyCode::Q) {
            self.quit = true;
        }
    }

    fn simulate(&mut self) {
        if self.paused {
            while self.single_steps > 0 {
                self.sim.step();
                self.single_steps -= 1;
            }
            return;
        }

        self.accumulator += time::get_frame_time() as f64;
        let mut steps = 0;
        while self.accumulator >= PHYSICS_TICK_LENGTH {
            if steps == MAX_STEPS_PER_FRAME {
                log::debug!("Dropping {:.1} ms of simulation time", self.accumulator * 1e3);
                self.accumulator = 0.0;
                break;
            }
            self.sim.step();
            self.accumulator -= PHYSICS_TICK_LENGTH;
            steps += 1;
        }
    }

    pub fn frame(&mut self) {
        self.frame_timer.start("frame", time::get_time());

        self.handle_input();

        self.frame_timer.start("simulate", time::get_time());
        self.simulate();
        self.frame_timer.end("simulate", time::get_time());

        self.frame_timer.start("render", time::get_time());
        let snapshot = self.sim.snapshot();
        self.renderer.render(&snapshot);
        self.renderer.draw_status(
            &snapshot,
            &self.scenario_name,
            self.frame_timer.get("frame"),
            self.paused,
        );
        self.frame_timer.end("render", time::get_time());

        self.frame_timer.end("frame", time::get_time());
    }
}

pub async fn run(sim: Simulation, scenario_name: String) {
    let mut ui = UI::new(sim, scenario_name);
    while !ui.quit {
        ui.frame();
        window::next_frame().await
    }
    log::info!("Exiting after {} ticks, score {}", ui.sim.tick(), ui.sim.score());
}
