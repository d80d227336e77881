//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in screen space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, b, color),
    ]
}

/// Generate vertices for a spike: apex at top-center, base on the bottom edge
pub fn spike(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(r.left(), r.bottom(), color),
        Vertex::new(r.left() + r.size.x / 2.0, r.top(), color),
        Vertex::new(r.right(), r.bottom(), color),
    ]
}

/// Generate vertices for a rectangle rotated by `angle` around its center
pub fn rotated_rect(r: &Rect, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let center = r.center();
    let half = r.size * 0.5;
    let rot = Vec2::from_angle(angle);
    let corner = |x: f32, y: f32| {
        let p = center + rot.rotate(Vec2::new(x, y));
        Vertex::new(p.x, p.y, color)
    };

    let tl = corner(-half.x, -half.y);
    let tr = corner(half.x, -half.y);
    let bl = corner(-half.x, half.y);
    let br = corner(half.x, half.y);
    vec![tl, tr, bl, bl, tr, br]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for an elliptical ring filling `r`, `thickness` pixels wide
pub fn ellipse_ring(r: &Rect, thickness: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let center = r.center();
    let outer = r.size * 0.5;
    let inner = (outer - Vec2::splat(thickness)).max(Vec2::ZERO);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        let inner1 = center + dir1 * inner;
        let outer1 = center + dir1 * outer;
        let inner2 = center + dir2 * inner;
        let outer2 = center + dir2 * outer;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}
