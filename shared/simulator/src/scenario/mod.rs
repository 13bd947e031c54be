mod field;
mod sandbox;

use crate::error::Error;
use crate::simulation::Simulation;

pub mod prelude {
    pub use super::Scenario;
    pub use crate::entity::{self, RockSize};
    pub use crate::rng::{new_rng, SeededRng};
    pub use crate::simulation::Simulation;
    pub use nalgebra::{vector, Vector2};
    pub use rand::Rng;
}

/// Height of the mothership's centre above the bottom of the screen.
pub const MOTHERSHIP_ALTITUDE: f64 = 32.0;

pub trait Scenario {
    fn name(&self) -> String;

    fn human_name(&self) -> String {
        self.name()
    }

    fn init(&mut self, sim: &mut Simulation, seed: u64);
}

pub fn load(name: &str) -> Result<Box<dyn Scenario>, Error> {
    let scenario: Box<dyn Scenario> = match name {
        "field" => Box::new(field::Field::new()),
        "sandbox" => Box::new(sandbox::Sandbox::new()),
        _ => return Err(Error::UnknownScenario(name.to_string())),
    };
    debug_assert_eq!(scenario.name(), name);
    Ok(scenario)
}

pub fn list() -> Vec<String> {
    vec!["field", "sandbox"]
        .iter()
        .map(|x| x.to_string())
        .collect()
}

/// Places the player at the centre of the screen and the mothership along
/// the bottom edge.
pub fn add_player_and_mothership(sim: &mut Simulation) {
    let width = sim.config().width;
    let height = sim.config().height;
    crate::entity::create_player(sim, nalgebra::vector![width / 2.0, height / 2.0]);
    crate::entity::create_mothership(sim, nalgebra::vector![width / 2.0, MOTHERSHIP_ALTITUDE]);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_all() {
        for name in list() {
            assert_eq!(load(&name).unwrap().name(), name);
        }
        assert!(matches!(load("nope"), Err(Error::UnknownScenario(_))));
    }

    #[test]
    fn test_human_names() {
        assert_eq!(load("field").unwrap().human_name(), "Asteroid Field");
        assert_eq!(load("sandbox").unwrap().human_name(), "Sandbox");
    }
}
