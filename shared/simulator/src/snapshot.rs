use crate::controls::Controls;
use crate::entity::EntityClass;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Snapshot {
    pub tick: u32,
    pub time: f64,
    pub seed: u64,
    pub score: u32,
    pub controls: Controls,
    /// Body-frame force the player's thrusters applied on the last tick.
    pub player_force: Vector2<f64>,
    pub width: f64,
    pub height: f64,
    pub entities: Vec<EntitySnapshot>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EntitySnapshot {
    pub id: u64,
    pub class: EntityClass,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    /// Radians, counter-clockwise.
    pub heading: f64,
    pub angular_velocity: f64,
    pub extent: Vector2<f64>,
}

impl Snapshot {
    pub fn count(&self, pred: impl Fn(&EntityClass) -> bool) -> usize {
        self.entities.iter().filter(|e| pred(&e.class)).count()
    }

    pub fn player(&self) -> Option<&EntitySnapshot> {
        self.entities
            .iter()
            .find(|e| e.class == EntityClass::Player)
    }
}
