//! Axis-aligned bounding box collision
//!
//! Every entity in the runner is a rectangle as far as collision is concerned.
//! Visual rotation (rotators) and wave motion (moving blocks) only change where
//! the box is, never its shape.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Anything with a collision box
pub trait Body {
    fn bounds(&self) -> Rect;

    /// Whether this body's box overlaps another's
    fn touches(&self, other: &impl Body) -> bool
    where
        Self: Sized,
    {
        aabb_overlap(&self.bounds(), &other.bounds())
    }
}

/// Strict AABB overlap test. Rectangles that only share an edge do not collide.
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}
