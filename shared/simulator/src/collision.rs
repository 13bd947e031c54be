use crate::entity::{EntityClass, EntityHandle};
use crate::simulation::Simulation;
use crossbeam::channel::Sender;
use rapier2d_f64::data::arena::Index;
use rapier2d_f64::prelude::*;

const WALL_COLLISION_GROUP: Group = Group::GROUP_1;
const PLAYER_COLLISION_GROUP: Group = Group::GROUP_2;
const MOTHERSHIP_COLLISION_GROUP: Group = Group::GROUP_3;
const ROCK_COLLISION_GROUP: Group = Group::GROUP_4;

const WALL_THICKNESS: f64 = 10.0;

fn all_groups() -> Group {
    WALL_COLLISION_GROUP | PLAYER_COLLISION_GROUP | MOTHERSHIP_COLLISION_GROUP | ROCK_COLLISION_GROUP
}

pub fn player_interaction_groups() -> InteractionGroups {
    InteractionGroups::new(PLAYER_COLLISION_GROUP, all_groups())
}

pub fn mothership_interaction_groups() -> InteractionGroups {
    InteractionGroups::new(MOTHERSHIP_COLLISION_GROUP, all_groups())
}

pub fn rock_interaction_groups() -> InteractionGroups {
    InteractionGroups::new(ROCK_COLLISION_GROUP, all_groups())
}

pub fn wall_interaction_groups() -> InteractionGroups {
    InteractionGroups::new(WALL_COLLISION_GROUP, all_groups())
}

/// Fences the screen rectangle `[0, width] x [0, height]` with fixed walls
/// placed just outside it.
pub fn add_walls(sim: &mut Simulation) {
    let width = sim.config().width;
    let height = sim.config().height;
    let mut make_edge = |x: f64, y: f64, half_length: f64, a: f64| {
        let rigid_body = RigidBodyBuilder::fixed()
            .translation(vector![x, y])
            .rotation(a)
            .build();
        let body_handle = sim.bodies.insert(rigid_body);
        let collider = ColliderBuilder::cuboid(half_length + WALL_THICKNESS, WALL_THICKNESS / 2.0)
            .restitution(1.0)
            .collision_groups(wall_interaction_groups())
            .build();
        sim.colliders
            .insert_with_parent(collider, body_handle, &mut sim.bodies);
    };
    let t = WALL_THICKNESS / 2.0;
    make_edge(width / 2.0, height + t, width / 2.0, 0.0);
    make_edge(width / 2.0, -t, width / 2.0, std::f64::consts::PI);
    make_edge(width + t, height / 2.0, height / 2.0, std::f64::consts::PI / 2.0);
    make_edge(-t, height / 2.0, height / 2.0, 3.0 * std::f64::consts::PI / 2.0);
}

pub fn handle_collisions(sim: &mut Simulation, events: &[CollisionEvent]) {
    for event in events {
        if let CollisionEvent::Started(h1, h2, _flags) = event {
            let get_index = |h| sim.colliders.get(h).and_then(|x| x.parent()).map(|x| x.0);
            if let (Some(idx1), Some(idx2)) = (get_index(*h1), get_index(*h2)) {
                handle_contact(sim, idx1, idx2);
            }
        }
    }
}

fn handle_contact(sim: &mut Simulation, idx1: Index, idx2: Index) {
    let classify = |idx| {
        let handle = EntityHandle(idx);
        sim.entity_data.get(&handle).map(|data| (handle, data.class))
    };
    let pair = match (classify(idx1), classify(idx2)) {
        (Some(a), Some(b)) => [a, b],
        _ => return,
    };
    match pair {
        [(_, EntityClass::Player), (rock, EntityClass::Rock(_))]
        | [(rock, EntityClass::Rock(_)), (_, EntityClass::Player)] => {
            if sim.config().salvage && !sim.entity(rock).data().destroyed {
                log::info!("Salvaged {}", sim.entity(rock).data().class.name());
                sim.entity_mut(rock).destroy();
                sim.score += 1;
            }
        }
        _ => {}
    }
}

pub struct CollisionEventHandler {
    collision_event_sender: Sender<CollisionEvent>,
}

impl CollisionEventHandler {
    pub fn new(collision_event_sender: Sender<CollisionEvent>) -> CollisionEventHandler {
        CollisionEventHandler {
            collision_event_sender,
        }
    }
}

impl EventHandler for CollisionEventHandler {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        let _ = self.collision_event_sender.send(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: f64,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f64,
    ) {
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_every_group_accepts_every_other() {
        let groups = [
            wall_interaction_groups(),
            player_interaction_groups(),
            mothership_interaction_groups(),
            rock_interaction_groups(),
        ];
        for a in groups.iter() {
            for b in groups.iter() {
                assert!(a.test(*b));
            }
        }
    }
}
