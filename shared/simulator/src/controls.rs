//! Keyboard bookkeeping for the player ship.
//!
//! Engine keys latch boolean flags that are turned into a body-frame force
//! once per physics step. Turn keys act immediately on the ship's angular
//! velocity instead.

use nalgebra::{vector, Rotation2, Vector2};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    A,
    D,
    S,
}

#[derive(Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub enum Turn {
    Left,
    Right,
    Stop,
}

impl Turn {
    pub fn angular_velocity(self, turn_rate: f64) -> f64 {
        match self {
            Turn::Left => turn_rate,
            Turn::Right => -turn_rate,
            Turn::Stop => 0.0,
        }
    }
}

#[derive(Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub struct Controls {
    pub forward_engines: bool,
    pub reverse_engines: bool,
    pub slide_left: bool,
    pub slide_right: bool,
    pub stabilize: bool,
}

impl Controls {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn press(&mut self, key: Key) -> Option<Turn> {
        self.set(key, true)
    }

    pub fn release(&mut self, key: Key) -> Option<Turn> {
        self.set(key, false)
    }

    fn set(&mut self, key: Key, down: bool) -> Option<Turn> {
        match key {
            Key::Up => self.forward_engines = down,
            Key::Down => self.reverse_engines = down,
            Key::A => self.slide_left = down,
            Key::D => self.slide_right = down,
            Key::S => self.stabilize = down,
            Key::Left if down => return Some(Turn::Left),
            Key::Right if down => return Some(Turn::Right),
            Key::Left | Key::Right => return Some(Turn::Stop),
        }
        None
    }

    pub fn is_idle(&self) -> bool {
        *self == Controls::default()
    }
}

/// Rotates a world-frame velocity into the frame of a body with the given
/// heading.
pub fn local_velocity(velocity: Vector2<f64>, heading: f64) -> Vector2<f64> {
    Rotation2::new(-heading) * velocity
}

/// Selects the body-frame force for the current controls.
///
/// `local_velocity` is only consulted while stabilizing.
pub fn thrust_force(controls: &Controls, local_velocity: Vector2<f64>, force: f64) -> Vector2<f64> {
    if controls.stabilize {
        let oppose = |v: f64| {
            if v > 0.0 {
                -force
            } else if v < 0.0 {
                force
            } else {
                0.0
            }
        };
        return vector![oppose(local_velocity.x), oppose(local_velocity.y)];
    }

    let axis = |positive: bool, negative: bool| match (positive, negative) {
        (true, false) => force,
        (false, true) => -force,
        _ => 0.0,
    };
    vector![
        axis(controls.slide_right, controls.slide_left),
        axis(controls.forward_engines, controls.reverse_engines)
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_local_velocity() {
        let v = vector![3.0, 4.0];
        assert_abs_diff_eq!(local_velocity(v, 0.0), v, epsilon = 1e-12);

        // Facing +y after a quarter turn: world +y is the body's +x.
        let a = std::f64::consts::FRAC_PI_2;
        assert_abs_diff_eq!(
            local_velocity(vector![0.0, 5.0], a),
            vector![5.0, 0.0],
            epsilon = 1e-9
        );

        let a = 0.7f64;
        let expected = vector![
            a.sin() * v.y + a.cos() * v.x,
            a.sin() * -v.x + a.cos() * v.y
        ];
        assert_abs_diff_eq!(local_velocity(v, a), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_turn_release_stops_either_direction() {
        let mut controls = Controls::new();
        assert_eq!(controls.press(Key::Left), Some(Turn::Left));
        assert_eq!(controls.press(Key::Right), Some(Turn::Right));
        assert_eq!(controls.release(Key::Left), Some(Turn::Stop));
        assert_eq!(controls.release(Key::Right), Some(Turn::Stop));
        assert!(controls.is_idle());
    }
}
