//! Frame geometry
//!
//! Turns a `GameState` into one triangle list the host can upload as-is.

use glam::Vec2;

use super::shapes;
use super::vertex::{HIGH_CONTRAST, NEON, Palette, Vertex};
use crate::settings::Settings;
use crate::sim::{Body, EntityRef, GameState, ObstacleKind, ParticleKind, Rect};

/// Maximum screen shake offset in pixels
const SHAKE_PIXELS: f32 = 8.0;
/// Floor strip thickness
const FLOOR_THICKNESS: f32 = 4.0;
const PORTAL_RING_WIDTH: f32 = 5.0;

pub fn palette_for(settings: &Settings) -> &'static Palette {
    if settings.high_contrast {
        &HIGH_CONTRAST
    } else {
        &NEON
    }
}

/// Build the whole frame: floor, monster, obstacles, player, particles
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let palette = palette_for(settings);
    let mut vertices = Vec::with_capacity(256);

    let floor_y = state.viewport.floor_y();
    vertices.extend(shapes::rect(
        &Rect::new(0.0, floor_y - FLOOR_THICKNESS, state.viewport.width, FLOOR_THICKNESS),
        palette.floor,
    ));

    for entity in state.entities() {
        vertices.extend(entity_vertices(entity, palette));
    }

    let max_particles = settings.max_particles();
    for particle in state.particles.iter().rev().take(max_particles) {
        let base = match particle.kind {
            ParticleKind::Dust => palette.dust,
            ParticleKind::Burst => palette.burst,
        };
        let color = [base[0], base[1], base[2], base[3] * particle.life.clamp(0.0, 1.0)];
        vertices.extend(shapes::circle(particle.pos, particle.size, color, 6));
    }

    if settings.effective_screen_shake() && state.screen_shake > 0.0 {
        let offset = shake_offset(state.frames, state.screen_shake);
        for v in &mut vertices {
            v.position[0] += offset.x;
            v.position[1] += offset.y;
        }
    }

    vertices
}

/// Geometry for one entity
pub fn entity_vertices(entity: EntityRef<'_>, palette: &Palette) -> Vec<Vertex> {
    let bounds = entity.bounds();
    match entity {
        EntityRef::Player(_) => shapes::rect(&bounds, palette.player),
        EntityRef::Monster(_) => {
            let mut verts = shapes::rect(&bounds, palette.monster);
            // Single eye, looking at the player
            let eye = Vec2::new(
                bounds.right() - bounds.size.x * 0.25,
                bounds.top() + bounds.size.y * 0.3,
            );
            verts.extend(shapes::circle(eye, bounds.size.x * 0.1, palette.monster_eye, 8));
            verts
        }
        EntityRef::Obstacle(obstacle) => match obstacle.kind {
            ObstacleKind::Spike => shapes::spike(&bounds, palette.spike),
            ObstacleKind::Block => shapes::rect(&bounds, palette.block),
            ObstacleKind::Rotator { angle } => {
                shapes::rotated_rect(&bounds, angle, palette.rotator)
            }
            ObstacleKind::MovingBlock { .. } => shapes::rect(&bounds, palette.moving_block),
            ObstacleKind::Portal => {
                shapes::ellipse_ring(&bounds, PORTAL_RING_WIDTH, palette.portal, 20)
            }
        },
    }
}

/// Deterministic jitter for the current frame
fn shake_offset(frames: u64, intensity: f32) -> Vec2 {
    let t = frames as f32;
    Vec2::new((t * 12.9898).sin(), (t * 78.233).sin()) * SHAKE_PIXELS * intensity
}
