use super::prelude::*;

/// Open space with just the player and the mothership.
pub struct Sandbox {}

impl Sandbox {
    pub fn new() -> Self {
        Self {}
    }
}

impl Scenario for Sandbox {
    fn name(&self) -> String {
        "sandbox".into()
    }

    fn human_name(&self) -> String {
        "Sandbox".into()
    }

    fn init(&mut self, sim: &mut Simulation, _seed: u64) {
        super::add_player_and_mothership(sim);
    }
}
