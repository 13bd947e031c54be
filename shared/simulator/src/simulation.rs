use crate::collision::{self, CollisionEventHandler};
use crate::config::GameConfig;
use crate::controls::{self, Controls, Key};
use crate::entity::{EntityAccessor, EntityAccessorMut, EntityData, EntityHandle};
use crate::error::Error;
use crate::handle_set::HandleSet;
use crate::rng;
use crate::scenario;
use crate::snapshot::{EntitySnapshot, Snapshot};
use rapier2d_f64::prelude::*;
use std::collections::HashMap;

pub const PHYSICS_TICK_LENGTH: f64 = 1.0 / 60.0;

pub struct Simulation {
    config: GameConfig,
    pub entities: HandleSet<EntityHandle>,
    pub(crate) entity_data: HashMap<EntityHandle, EntityData>,
    pub(crate) player: Option<EntityHandle>,
    pub(crate) bodies: RigidBodySet,
    pub(crate) impulse_joints: ImpulseJointSet,
    pub(crate) multibody_joints: MultibodyJointSet,
    pub(crate) colliders: ColliderSet,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    pub(crate) island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
    event_collector: CollisionEventHandler,
    contact_recv: crossbeam::channel::Receiver<CollisionEvent>,
    controls: Controls,
    player_force: Vector<Real>,
    pub(crate) score: u32,
    tick: u32,
    seed: u64,
}

impl Simulation {
    /// Builds an empty world without running any scenario.
    pub fn empty(config: GameConfig) -> Result<Simulation, Error> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rng::random_seed);
        let (contact_send, contact_recv) = crossbeam::channel::unbounded();
        let mut sim = Simulation {
            config,
            entities: HandleSet::new(),
            entity_data: HashMap::new(),
            player: None,
            bodies: RigidBodySet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            colliders: ColliderSet::new(),
            integration_parameters: IntegrationParameters {
                dt: PHYSICS_TICK_LENGTH,
                ..Default::default()
            },
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            event_collector: CollisionEventHandler::new(contact_send),
            contact_recv,
            controls: Controls::new(),
            player_force: vector![0.0, 0.0],
            score: 0,
            tick: 0,
            seed,
        };
        if sim.config.walls {
            collision::add_walls(&mut sim);
        }
        Ok(sim)
    }

    pub fn new(config: GameConfig) -> Result<Simulation, Error> {
        let mut scenario = scenario::load(&config.scenario)?;
        let mut sim = Simulation::empty(config)?;
        let seed = sim.seed;
        log::info!("scenario {} seed {}", scenario.name(), seed);
        scenario.init(&mut sim, seed);
        log::info!("Created {} entities", sim.entities.len());
        Ok(sim)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn time(&self) -> f64 {
        self.tick as f64 * PHYSICS_TICK_LENGTH
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn player(&self) -> Option<EntityHandle> {
        self.player
    }

    pub fn entity(&self, handle: EntityHandle) -> EntityAccessor {
        EntityAccessor {
            simulation: self,
            handle,
        }
    }

    pub fn entity_mut(&mut self, handle: EntityHandle) -> EntityAccessorMut {
        EntityAccessorMut {
            simulation: self,
            handle,
        }
    }

    pub fn on_key_press(&mut self, key: Key) {
        let turn = self.controls.press(key);
        self.apply_turn(turn);
    }

    pub fn on_key_release(&mut self, key: Key) {
        let turn = self.controls.release(key);
        self.apply_turn(turn);
    }

    fn apply_turn(&mut self, turn: Option<controls::Turn>) {
        if let (Some(turn), Some(player)) = (turn, self.player) {
            let angular_velocity = turn.angular_velocity(self.config.turn_rate);
            self.entity_mut(player)
                .set_angular_velocity(angular_velocity);
        }
    }

    fn update_player(&mut self) {
        let player = match self.player {
            Some(player) => player,
            None => {
                self.player_force = vector![0.0, 0.0];
                return;
            }
        };
        let (velocity, heading) = {
            let ship = self.entity(player);
            (ship.velocity(), ship.heading())
        };
        let local_velocity = controls::local_velocity(velocity, heading);
        if self.controls.stabilize {
            log::debug!(
                "stabilize world=({:5.2}, {:5.2}) local=({:5.2}, {:5.2}) heading={:5.2}",
                velocity.x,
                velocity.y,
                local_velocity.x,
                local_velocity.y,
                heading
            );
        }
        let force = controls::thrust_force(
            &self.controls,
            local_velocity,
            self.config.player_move_force,
        );
        self.player_force = force;
        self.entity_mut(player).apply_local_force(force);
    }

    pub fn step(&mut self) {
        self.update_player();

        let handles: Vec<EntityHandle> = self.entities.iter().cloned().collect();
        for &handle in handles.iter() {
            self.entity_mut(handle).tick();
        }

        let gravity = vector![0.0, 0.0];
        let physics_hooks = ();
        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &physics_hooks,
            &self.event_collector,
        );

        let events: Vec<CollisionEvent> = self.contact_recv.try_iter().collect();
        collision::handle_collisions(self, &events);

        for handle in handles {
            if self
                .entity_data
                .get(&handle)
                .map_or(false, |data| data.destroyed)
            {
                self.entity_mut(handle).remove();
            }
        }

        self.tick += 1;
    }

    /// Fixed-point digest of every entity's transform and velocity.
    pub fn hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hasher;
        let fixedpoint = |v: f64| (v * 1e9) as i64;
        let mut s = DefaultHasher::new();
        for &handle in self.entities.iter() {
            let entity = self.entity(handle);
            s.write_i64(fixedpoint(entity.position().x));
            s.write_i64(fixedpoint(entity.position().y));
            s.write_i64(fixedpoint(entity.heading()));
            s.write_i64(fixedpoint(entity.velocity().x));
            s.write_i64(fixedpoint(entity.velocity().y));
            s.write_i64(fixedpoint(entity.angular_velocity()));
        }
        s.finish()
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot {
            tick: self.tick,
            time: self.time(),
            seed: self.seed,
            score: self.score,
            controls: self.controls,
            player_force: self.player_force,
            width: self.config.width,
            height: self.config.height,
            entities: Vec::with_capacity(self.entities.len()),
        };

        for &handle in self.entities.iter() {
            let entity = self.entity(handle);
            let class = entity.data().class;
            snapshot.entities.push(EntitySnapshot {
                id: handle.into(),
                class,
                position: entity.position(),
                velocity: entity.velocity(),
                heading: entity.heading(),
                angular_velocity: entity.angular_velocity(),
                extent: crate::model::extent(class),
            });
        }

        snapshot
    }
}
