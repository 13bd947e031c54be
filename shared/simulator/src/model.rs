use crate::entity::{EntityClass, RockSize};
use nalgebra::{point, vector, Point2, Vector2};
use serde::{Deserialize, Serialize};

pub const PLAYER_SIZE: f64 = 32.0;
pub const PLAYER_SEGMENT_RADIUS: f64 = 2.0;
pub const MOTHERSHIP_WIDTH: f64 = 256.0;
pub const MOTHERSHIP_HEIGHT: f64 = 64.0;
pub const MOTHERSHIP_SEGMENT_RADIUS: f64 = 1.0;

/// A straight edge in body coordinates.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Segment {
    pub a: Point2<f64>,
    pub b: Point2<f64>,
}

fn polyline(points: &[Point2<f64>]) -> Vec<Segment> {
    points
        .windows(2)
        .map(|w| Segment { a: w[0], b: w[1] })
        .collect()
}

fn polygon(points: &[Point2<f64>]) -> Vec<Segment> {
    let mut segments = polyline(points);
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        segments.push(Segment { a: last, b: first });
    }
    segments
}

// Open at the nose (+y), where the engines push.
pub fn player() -> Vec<Segment> {
    polyline(&[
        point![-14.0, 14.0],
        point![-14.0, -14.0],
        point![14.0, -14.0],
        point![14.0, 14.0],
    ])
}

pub fn mothership() -> Vec<Segment> {
    polygon(&[
        point![-128.0, -32.0],
        point![-128.0, 32.0],
        // docking bay
        point![-98.0, 32.0],
        point![-98.0, 0.0],
        point![-58.0, 0.0],
        point![-58.0, 32.0],
        // upper hull
        point![128.0, 32.0],
        point![128.0, -32.0],
    ])
}

pub fn rock(size: RockSize) -> Vec<Segment> {
    let h = size.side() / 2.0;
    polygon(&[
        point![-h, -h],
        point![-h, h],
        point![h, h],
        point![h, -h],
    ])
}

pub fn load(class: EntityClass) -> Vec<Segment> {
    match class {
        EntityClass::Player => player(),
        EntityClass::Mothership => mothership(),
        EntityClass::Rock(size) => rock(size),
    }
}

/// Display width and height.
pub fn extent(class: EntityClass) -> Vector2<f64> {
    match class {
        EntityClass::Player => vector![PLAYER_SIZE, PLAYER_SIZE],
        EntityClass::Mothership => vector![MOTHERSHIP_WIDTH, MOTHERSHIP_HEIGHT],
        EntityClass::Rock(size) => vector![size.side(), size.side()],
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_segment_counts() {
        assert_eq!(player().len(), 3);
        assert_eq!(mothership().len(), 8);
        assert_eq!(rock(RockSize::Small).len(), 4);
    }

    #[test]
    fn test_mothership_hull_is_closed() {
        let hull = mothership();
        assert_eq!(hull[0].a, point![-128.0, -32.0]);
        assert_eq!(hull[0].b, point![-128.0, 32.0]);
        assert_eq!(hull[7].a, point![128.0, -32.0]);
        assert_eq!(hull[7].b, point![-128.0, -32.0]);
        for pair in hull.windows(2) {
            assert_eq!(pair[0].b, pair[1].a);
        }
    }

    #[test]
    fn test_rock_fits_extent() {
        for size in [RockSize::Large, RockSize::Small] {
            let e = extent(EntityClass::Rock(size));
            for s in rock(size) {
                assert!(s.a.x.abs() <= e.x / 2.0 && s.a.y.abs() <= e.y / 2.0);
            }
        }
    }
}
