use approx::assert_abs_diff_eq;
use mothership_simulator::controls::Key;
use mothership_simulator::entity::{self, EntityClass, RockSize, PLAYER_MASS};
use mothership_simulator::simulation::{Simulation, PHYSICS_TICK_LENGTH};
use mothership_simulator::GameConfig;
use nalgebra::vector;
use test_log::test;

fn sandbox(salvage: bool) -> Simulation {
    Simulation::new(GameConfig {
        scenario: "sandbox".into(),
        seed: Some(0),
        salvage,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_forward_thrust() {
    let mut sim = sandbox(false);
    let player = sim.player().unwrap();

    sim.on_key_press(Key::Up);
    for _ in 0..60 {
        sim.step();
    }
    assert_abs_diff_eq!(sim.entity(player).mass(), PLAYER_MASS, epsilon = 1e-9);
    let v = sim.entity(player).velocity();
    let expected = 1500.0 / PLAYER_MASS;
    assert_abs_diff_eq!(v.y, expected, epsilon = 1.0);
    assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-6);

    sim.on_key_release(Key::Up);
    for _ in 0..10 {
        sim.step();
    }
    assert_abs_diff_eq!(sim.entity(player).velocity().y, v.y, epsilon = 1e-6);
}

#[test]
fn test_reverse_and_slide_thrust() {
    let mut sim = sandbox(false);
    let player = sim.player().unwrap();
    sim.on_key_press(Key::Down);
    sim.on_key_press(Key::A);
    for _ in 0..30 {
        sim.step();
    }
    let v = sim.entity(player).velocity();
    assert!(v.x < 0.0);
    assert!(v.y < 0.0);
    assert_abs_diff_eq!(v.x, v.y, epsilon = 1e-6);
}

#[test]
fn test_thrust_follows_heading() {
    let mut sim = sandbox(false);
    let player = sim.player().unwrap();
    // Quarter turn counter-clockwise: the nose now points along -x.
    sim.on_key_press(Key::Left);
    let ticks = (std::f64::consts::FRAC_PI_2 / PHYSICS_TICK_LENGTH).round() as usize;
    for _ in 0..ticks {
        sim.step();
    }
    sim.on_key_release(Key::Left);
    assert_abs_diff_eq!(
        sim.entity(player).heading(),
        std::f64::consts::FRAC_PI_2,
        epsilon = 0.02
    );

    sim.on_key_press(Key::Up);
    for _ in 0..30 {
        sim.step();
    }
    let v = sim.entity(player).velocity();
    assert!(v.x < -10.0);
    assert!(v.y.abs() < 0.5);
}

#[test]
fn test_turning() {
    let mut sim = sandbox(false);
    let player = sim.player().unwrap();

    sim.on_key_press(Key::Left);
    assert_eq!(sim.entity(player).angular_velocity(), 1.0);
    for _ in 0..60 {
        sim.step();
    }
    assert_abs_diff_eq!(sim.entity(player).heading(), 1.0, epsilon = 1e-3);

    sim.on_key_release(Key::Left);
    assert_eq!(sim.entity(player).angular_velocity(), 0.0);

    sim.on_key_press(Key::Right);
    assert_eq!(sim.entity(player).angular_velocity(), -1.0);
    sim.on_key_release(Key::Right);
    assert_eq!(sim.entity(player).angular_velocity(), 0.0);
}

#[test]
fn test_stabilize() {
    let mut sim = sandbox(false);
    let player = sim.player().unwrap();
    sim.entity_mut(player).set_velocity(vector![50.0, 0.0]);

    sim.on_key_press(Key::S);
    for _ in 0..60 {
        sim.step();
    }
    let v = sim.entity(player).velocity();
    let max_dv = 1500.0 / PLAYER_MASS * PHYSICS_TICK_LENGTH;
    assert!(v.x.abs() <= max_dv + 1e-6, "vx={}", v.x);
    assert_abs_diff_eq!(v.y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_mothership_is_fixed() {
    let mut sim = Simulation::new(GameConfig {
        seed: Some(3),
        ..Default::default()
    })
    .unwrap();
    let mothership = *sim
        .entities
        .iter()
        .find(|&&h| sim.entity(h).data().class == EntityClass::Mothership)
        .unwrap();
    let p0 = sim.entity(mothership).position();
    assert_eq!(p0, nalgebra::point![400.0, 32.0]);

    sim.on_key_press(Key::Down);
    for _ in 0..300 {
        sim.step();
    }
    assert_eq!(sim.entity(mothership).position(), p0);
    assert_eq!(sim.entity(mothership).heading(), 0.0);
}

#[test]
fn test_salvage() {
    let mut sim = sandbox(true);
    let player = sim.player().unwrap();
    let rock = entity::create_rock(&mut sim, vector![460.0, 300.0], RockSize::Small);
    sim.entity_mut(player).set_velocity(vector![100.0, 0.0]);

    for _ in 0..120 {
        sim.step();
    }
    assert!(!sim.entities.contains(rock));
    assert_eq!(sim.score(), 1);
    assert_eq!(sim.entities.len(), 2);
}

#[test]
fn test_no_salvage_by_default() {
    let mut sim = sandbox(false);
    let player = sim.player().unwrap();
    let rock = entity::create_rock(&mut sim, vector![460.0, 300.0], RockSize::Small);
    sim.entity_mut(player).set_velocity(vector![100.0, 0.0]);

    for _ in 0..120 {
        sim.step();
    }
    assert!(sim.entities.contains(rock));
    assert_eq!(sim.score(), 0);
    // The push from the player sets the rock drifting.
    assert!(sim.entity(rock).velocity().x > 0.0);
}

#[test]
fn test_snapshot_mirrors_bodies() {
    let mut sim = sandbox(false);
    sim.on_key_press(Key::Up);
    sim.on_key_press(Key::Left);
    for _ in 0..20 {
        sim.step();
    }
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.tick, 20);
    assert_eq!(snapshot.entities.len(), sim.entities.len());
    assert!(snapshot.controls.forward_engines);
    let player = snapshot.player().unwrap();
    let body = sim.entity(sim.player().unwrap());
    assert_eq!(player.position, body.position());
    assert_eq!(player.heading, body.heading());
    assert_eq!(player.extent, vector![32.0, 32.0]);
}

#[test]
fn test_walls_contain_rocks() {
    let mut sim = Simulation::new(GameConfig {
        scenario: "sandbox".into(),
        seed: Some(0),
        walls: true,
        ..Default::default()
    })
    .unwrap();
    let rock = entity::create_rock(&mut sim, vector![700.0, 450.0], RockSize::Large);
    sim.entity_mut(rock).set_velocity(vector![300.0, 200.0]);
    for _ in 0..600 {
        sim.step();
        let p = sim.entity(rock).position();
        assert!(p.x > 0.0 && p.x < 800.0, "x={}", p.x);
        assert!(p.y > 0.0 && p.y < 600.0, "y={}", p.y);
    }
}

#[test]
fn test_stabilize_while_rotated() {
    let mut sim = sandbox(false);
    let player = sim.player().unwrap();

    sim.on_key_press(Key::Left);
    for _ in 0..45 {
        sim.step();
    }
    sim.on_key_release(Key::Left);
    let heading = sim.entity(player).heading();
    assert_abs_diff_eq!(heading, 0.75, epsilon = 1e-3);

    sim.entity_mut(player).set_velocity(vector![30.0, 40.0]);
    sim.on_key_press(Key::S);
    for _ in 0..120 {
        sim.step();
    }
    let v = sim.entity(player).velocity();
    let max_dv = 1500.0 / PLAYER_MASS * PHYSICS_TICK_LENGTH;
    assert!(v.norm() <= max_dv * 2.0f64.sqrt() + 1e-6, "v={:?}", v);
    assert_abs_diff_eq!(sim.entity(player).heading(), heading, epsilon = 1e-9);
}

#[test]
fn test_slow_rock_keeps_drifting() {
    let mut sim = sandbox(false);
    let rock = entity::create_rock(&mut sim, vector![100.0, 500.0], RockSize::Large);
    sim.entity_mut(rock).set_velocity(vector![0.3, 0.0]);
    for _ in 0..600 {
        sim.step();
    }
    assert_abs_diff_eq!(sim.entity(rock).position().x, 103.0, epsilon = 1e-6);
    assert_abs_diff_eq!(sim.entity(rock).velocity(), vector![0.3, 0.0], epsilon = 1e-9);
}

#[test]
fn test_slow_player_keeps_drifting() {
    let mut sim = sandbox(false);
    let player = sim.player().unwrap();
    sim.entity_mut(player).set_velocity(vector![0.0, 0.2]);
    for _ in 0..600 {
        sim.step();
    }
    assert_abs_diff_eq!(sim.entity(player).position().y, 302.0, epsilon = 1e-6);
}
