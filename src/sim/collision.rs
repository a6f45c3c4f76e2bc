//! Collision detection for circles against axis-aligned rectangles
//!
//! Screen space: origin top-left, +y points down. A hit reports which face of
//! the rectangle the circle struck, plus the raw offset from the circle center
//! to the nearest point on the rectangle so the caller can compute push-out depth.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Compass direction used to classify which face of a rectangle was struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Classification order; earlier entries win ties
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Compass direction best aligned with `v` (first maximal match in `ALL`)
    pub fn classify(v: Vec2) -> Direction {
        let mut best = Direction::Up;
        let mut max = f32::NEG_INFINITY;
        for dir in Self::ALL {
            let dot = v.dot(dir.unit());
            if dot > max {
                max = dot;
                best = dir;
            }
        }
        best
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Result of a circle-vs-rectangle check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    pub hit: bool,
    /// Side of the rectangle the circle center lies on
    pub direction: Direction,
    /// Nearest point on the rectangle minus the circle center
    pub penetration: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            direction: Direction::Up,
            penetration: Vec2::ZERO,
        }
    }
}

/// Check a circle against an axis-aligned rectangle given by its top-left corner and size
pub fn circle_rect_collision(center: Vec2, radius: f32, rect_pos: Vec2, rect_size: Vec2) -> CollisionResult {
    let half_extents = rect_size * 0.5;
    let rect_center = rect_pos + half_extents;

    let offset = center - rect_center;
    let closest = rect_center + offset.clamp(-half_extents, half_extents);
    let diff = closest - center;

    if diff.length() < radius {
        CollisionResult {
            hit: true,
            direction: Direction::classify(offset),
            penetration: diff,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Axis-aligned rectangle overlap (touching edges count)
pub fn rect_rect_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    let overlap_x = a_pos.x + a_size.x >= b_pos.x && b_pos.x + b_size.x >= a_pos.x;
    let overlap_y = a_pos.y + a_size.y >= b_pos.y && b_pos.y + b_size.y >= a_pos.y;
    overlap_x && overlap_y
}
