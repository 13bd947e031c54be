use super::prelude::*;

/// The default game: the player, the mothership and a field of rocks
/// scattered across the screen.
pub struct Field {}

impl Field {
    pub fn new() -> Self {
        Self {}
    }
}

impl Scenario for Field {
    fn name(&self) -> String {
        "field".into()
    }

    fn human_name(&self) -> String {
        "Asteroid Field".into()
    }

    fn init(&mut self, sim: &mut Simulation, seed: u64) {
        super::add_player_and_mothership(sim);

        let mut rng = new_rng(seed);
        let width = sim.config().width.max(1.0) as u32;
        let height = sim.config().height.max(1.0) as u32;
        for _ in 0..sim.config().asteroid_count {
            let size = if rng.gen_range(0..2) == 0 {
                RockSize::Large
            } else {
                RockSize::Small
            };
            let x = rng.gen_range(0..width) as f64;
            let y = rng.gen_range(0..height) as f64;
            entity::create_rock(sim, vector![x, y], size);
        }
    }
}
