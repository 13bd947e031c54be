use crate::collision;
use crate::model::{self, Segment};
use crate::simulation::Simulation;
use nalgebra::{point, vector, Point2, Vector2};
use rapier2d_f64::data::arena::Index;
use rapier2d_f64::prelude::*;
use serde::{Deserialize, Serialize};

pub const PLAYER_MASS: f64 = 12.0;
const ROCK_FRICTION: f64 = 0.3;

#[derive(Hash, PartialEq, Eq, Copy, Clone, Debug)]
pub struct EntityHandle(pub Index);

impl EntityHandle {
    pub(crate) fn body_handle(self) -> RigidBodyHandle {
        RigidBodyHandle(self.0)
    }
}

impl From<EntityHandle> for u64 {
    fn from(handle: EntityHandle) -> u64 {
        let (idx, gen) = handle.0.into_raw_parts();
        ((gen as u64) << 32) | idx as u64
    }
}

#[derive(Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub enum RockSize {
    Large,
    Small,
}

impl RockSize {
    pub fn side(self) -> f64 {
        match self {
            RockSize::Large => 32.0,
            RockSize::Small => 16.0,
        }
    }

    pub fn mass(self) -> f64 {
        match self {
            RockSize::Large => 24.0,
            RockSize::Small => 6.0,
        }
    }
}

#[derive(Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub enum EntityClass {
    Player,
    Mothership,
    Rock(RockSize),
}

impl EntityClass {
    pub fn name(&self) -> &'static str {
        match self {
            EntityClass::Player => "player",
            EntityClass::Mothership => "mothership",
            EntityClass::Rock(RockSize::Large) => "rock",
            EntityClass::Rock(RockSize::Small) => "small rock",
        }
    }

    pub fn is_rock(&self) -> bool {
        matches!(self, EntityClass::Rock(_))
    }
}

#[derive(Debug, Clone)]
pub struct EntityData {
    pub class: EntityClass,
    /// Body-frame force applied at the origin on the next tick.
    pub force: Vector2<f64>,
    pub destroyed: bool,
}

impl EntityData {
    fn new(class: EntityClass) -> Self {
        EntityData {
            class,
            force: vector![0.0, 0.0],
            destroyed: false,
        }
    }
}

/// Mass properties of a solid box, matching what the colliders would give
/// if they were filled in.
fn box_mass_properties(mass: f64, extent: Vector2<f64>) -> MassProperties {
    let moment = mass * (extent.x * extent.x + extent.y * extent.y) / 12.0;
    MassProperties::new(point![0.0, 0.0], mass, moment)
}

fn segment_colliders(segments: &[Segment], radius: f64) -> Vec<ColliderBuilder> {
    segments
        .iter()
        .map(|s| ColliderBuilder::new(SharedShape::capsule(s.a, s.b, radius)))
        .collect()
}

fn insert(
    sim: &mut Simulation,
    rigid_body: RigidBody,
    colliders: Vec<ColliderBuilder>,
    groups: InteractionGroups,
    data: EntityData,
) -> EntityHandle {
    let body_handle = sim.bodies.insert(rigid_body);
    for collider in colliders {
        let collider = collider
            .density(0.0)
            .collision_groups(groups)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        sim.colliders
            .insert_with_parent(collider, body_handle, &mut sim.bodies);
    }
    let handle = EntityHandle(body_handle.0);
    log::debug!("Created {} {:?}", data.class.name(), handle);
    sim.entities.insert(handle);
    sim.entity_data.insert(handle, data);
    handle
}

pub fn create_player(sim: &mut Simulation, position: Vector2<f64>) -> EntityHandle {
    let class = EntityClass::Player;
    let rigid_body = RigidBodyBuilder::dynamic()
        .translation(position)
        .can_sleep(false)
        .additional_mass_properties(box_mass_properties(PLAYER_MASS, model::extent(class)))
        .build();
    let colliders = segment_colliders(&model::player(), model::PLAYER_SEGMENT_RADIUS)
        .into_iter()
        .map(|c| c.friction(0.0))
        .collect();
    let handle = insert(
        sim,
        rigid_body,
        colliders,
        collision::player_interaction_groups(),
        EntityData::new(class),
    );
    sim.player = Some(handle);
    handle
}

pub fn create_mothership(sim: &mut Simulation, position: Vector2<f64>) -> EntityHandle {
    let rigid_body = RigidBodyBuilder::fixed().translation(position).build();
    let colliders = segment_colliders(&model::mothership(), model::MOTHERSHIP_SEGMENT_RADIUS)
        .into_iter()
        .map(|c| c.friction(0.0))
        .collect();
    insert(
        sim,
        rigid_body,
        colliders,
        collision::mothership_interaction_groups(),
        EntityData::new(EntityClass::Mothership),
    )
}

pub fn create_rock(sim: &mut Simulation, position: Vector2<f64>, size: RockSize) -> EntityHandle {
    let class = EntityClass::Rock(size);
    let extent = model::extent(class);
    let rigid_body = RigidBodyBuilder::dynamic()
        .translation(position)
        .can_sleep(false)
        .additional_mass_properties(box_mass_properties(size.mass(), extent))
        .build();
    let collider =
        ColliderBuilder::cuboid(extent.x / 2.0, extent.y / 2.0).friction(ROCK_FRICTION);
    insert(
        sim,
        rigid_body,
        vec![collider],
        collision::rock_interaction_groups(),
        EntityData::new(class),
    )
}

pub struct EntityAccessor<'a> {
    pub(crate) simulation: &'a Simulation,
    pub(crate) handle: EntityHandle,
}

impl<'a> EntityAccessor<'a> {
    pub fn handle(&self) -> EntityHandle {
        self.handle
    }

    pub fn body(&self) -> &'a RigidBody {
        self.simulation
            .bodies
            .get(self.handle.body_handle())
            .expect("entity without a body")
    }

    pub fn data(&self) -> &'a EntityData {
        self.simulation
            .entity_data
            .get(&self.handle)
            .expect("entity without data")
    }

    pub fn position(&self) -> Point2<f64> {
        (*self.body().translation()).into()
    }

    pub fn velocity(&self) -> Vector2<f64> {
        *self.body().linvel()
    }

    pub fn heading(&self) -> f64 {
        self.body().rotation().angle()
    }

    pub fn angular_velocity(&self) -> f64 {
        self.body().angvel()
    }

    pub fn mass(&self) -> f64 {
        self.body().mass()
    }
}

pub struct EntityAccessorMut<'a> {
    pub(crate) simulation: &'a mut Simulation,
    pub(crate) handle: EntityHandle,
}

impl<'a> EntityAccessorMut<'a> {
    pub fn readonly(&self) -> EntityAccessor {
        EntityAccessor {
            simulation: &*self.simulation,
            handle: self.handle,
        }
    }

    pub fn body(&mut self) -> &mut RigidBody {
        self.simulation
            .bodies
            .get_mut(self.handle.body_handle())
            .expect("entity without a body")
    }

    pub fn data_mut(&mut self) -> &mut EntityData {
        self.simulation
            .entity_data
            .get_mut(&self.handle)
            .expect("entity without data")
    }

    pub fn set_velocity(&mut self, velocity: Vector2<f64>) {
        self.body().set_linvel(velocity, true);
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.body().set_angvel(angular_velocity, true);
    }

    /// Queues a force in the body frame, applied at the body origin for
    /// the next physics step only.
    pub fn apply_local_force(&mut self, force: Vector2<f64>) {
        self.data_mut().force = force;
    }

    /// Marks the entity for removal at the end of the current tick.
    pub fn destroy(&mut self) {
        self.data_mut().destroyed = true;
    }

    pub(crate) fn tick(&mut self) {
        let force = self.readonly().data().force;
        {
            let body = self.body();
            let rotation_matrix = body.position().rotation.to_rotation_matrix();
            body.reset_forces(false);
            if force != vector![0.0, 0.0] {
                body.add_force(rotation_matrix * force, true);
            }
        }
        self.data_mut().force = vector![0.0, 0.0];
    }

    pub(crate) fn remove(&mut self) {
        let handle = self.handle;
        log::debug!(
            "Removing {} {:?}",
            self.readonly().data().class.name(),
            handle
        );
        let sim = &mut *self.simulation;
        sim.entities.remove(handle);
        sim.entity_data.remove(&handle);
        if sim.player == Some(handle) {
            sim.player = None;
        }
        sim.bodies.remove(
            handle.body_handle(),
            &mut sim.island_manager,
            &mut sim.colliders,
            &mut sim.impulse_joints,
            &mut sim.multibody_joints,
            /*remove_attached_colliders=*/ true,
        );
    }
}
