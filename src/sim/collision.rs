//! Axis-aligned collision predicates
//!
//! Everything in this game is a rectangle. Overlap uses strict inequalities,
//! so boxes that merely share an edge are not in contact.

use glam::Vec2;

use crate::consts::STOMP_MARGIN;

/// An axis-aligned bounding box (y grows downward, screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Top edge y (smaller value is higher on screen)
    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    /// Bottom edge y
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Vertical midpoint
    #[inline]
    pub fn mid_y(&self) -> f32 {
        (self.min.y + self.max.y) / 2.0
    }

    /// Strict AABB overlap test
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Whether an overlap with an enemy hitbox counts as a stomp
///
/// The player must be descending, with their feet (plus a forgiveness
/// margin) above the hitbox's vertical midpoint. Anything else is a hit.
pub fn is_stomp(player: &Aabb, player_vy: f32, hitbox: &Aabb) -> bool {
    player_vy > 0.0 && player.bottom() - STOMP_MARGIN < hitbox.mid_y()
}

/// Whether a descending player lands on a platform this tick
///
/// Only top-landing is resolved: the player must be moving down and must
/// have started the tick above the platform's top surface. Side and bottom
/// contact deliberately pass through.
pub fn is_landing(player_vy: f32, player_top_at_tick_start: f32, platform_top: f32) -> bool {
    player_vy > 0.0 && player_top_at_tick_start < platform_top
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aabb(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap_hit() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_miss() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(20.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_edge_touch_is_not_contact() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        let c = aabb(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_stomp_descending_above_midpoint() {
        // Hitbox spans y 335..350, midpoint 342.5
        let hitbox = aabb(400.0, 335.0, 25.0, 15.0);
        // Player feet at 340, descending
        let player = aabb(400.0, 300.0, 30.0, 40.0);
        assert!(is_stomp(&player, 5.0, &hitbox));
    }

    #[test]
    fn test_stomp_requires_descent() {
        let hitbox = aabb(400.0, 335.0, 25.0, 15.0);
        let player = aabb(400.0, 300.0, 30.0, 40.0);
        assert!(!is_stomp(&player, -3.0, &hitbox));
        assert!(!is_stomp(&player, 0.0, &hitbox));
    }

    #[test]
    fn test_stomp_margin_forgives_near_midpoint() {
        let hitbox = aabb(400.0, 335.0, 25.0, 15.0);
        // Feet at 349, below the 342.5 midpoint but within the 8px margin
        let low = aabb(400.0, 309.0, 30.0, 40.0);
        assert!(is_stomp(&low, 5.0, &hitbox));
        // Feet at 352, past the margin: a hit
        let too_low = aabb(400.0, 312.0, 30.0, 40.0);
        assert!(!is_stomp(&too_low, 5.0, &hitbox));
    }

    #[test]
    fn test_landing_only_from_above() {
        let platform_top = 360.0;
        assert!(is_landing(5.0, 330.0, platform_top));
        // Ascending never lands
        assert!(!is_landing(-5.0, 330.0, platform_top));
        // Started the tick at or below the top: pass through
        assert!(!is_landing(5.0, 360.0, platform_top));
        assert!(!is_landing(5.0, 370.0, platform_top));
    }
}
